pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliArgs;

pub use adapters::InMemoryCache;
pub use config::{CacheConfig, VerifierConfig};
pub use crate::core::{cache::CacheStore, client::VerificationClient, executor::RequestExecutor};
pub use domain::model::{EmailState, ValidationResult};
pub use domain::ports::{CacheBackend, Verifier};
pub use utils::error::{ErrorKind, Result, VerifyError};
