#[cfg(feature = "cli")]
pub mod cli;
pub mod env;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliArgs;
pub use toml_config::{CacheConfig, VerifierConfig, DEFAULT_BASE_URL, DEFAULT_CACHE_PREFIX};
