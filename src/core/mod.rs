pub mod cache;
pub mod classifier;
pub mod client;
pub mod executor;
pub mod parser;

pub use crate::domain::model::{EmailState, ValidationResult};
pub use crate::domain::ports::{CacheBackend, Verifier};
pub use crate::utils::error::Result;
pub use classifier::{Failure, RawResponse};
