use crate::domain::model::ValidationResult;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// 外部鍵值快取；只要求原子的 get / put，不需要 compare-and-swap
pub trait CacheBackend: Send + Sync {
    fn get(&self, key: &str) -> impl std::future::Future<Output = Result<Option<String>>> + Send;
    fn put(
        &self,
        key: &str,
        value: String,
        ttl: Duration,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Contract handed to form-validation adapters.
#[async_trait]
pub trait Verifier: Send + Sync {
    async fn validate(&self, email: &str) -> Result<ValidationResult>;
}
