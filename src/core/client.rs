use crate::adapters::memory_cache::InMemoryCache;
use crate::config::VerifierConfig;
use crate::core::cache::CacheStore;
use crate::core::classifier::{self, Failure};
use crate::core::executor::RequestExecutor;
use crate::core::parser;
use crate::domain::model::ValidationResult;
use crate::domain::ports::{CacheBackend, Verifier};
use crate::utils::error::{Result, VerifyError};
use async_trait::async_trait;

/// Single entry point: cache lookup, API call, policy, cache write.
///
/// `validate` only returns `Err` for authentication failures, or for any
/// classified error when `raise_on_error` is set. Otherwise failures come back
/// as `ValidationResult::failed` (state `Unknown`, `is_error() == true`).
#[derive(Debug, Clone)]
pub struct VerificationClient<C: CacheBackend = InMemoryCache> {
    executor: RequestExecutor,
    cache: CacheStore<C>,
    raise_on_error: bool,
}

impl VerificationClient<InMemoryCache> {
    pub fn new(config: VerifierConfig) -> Self {
        Self::with_cache(config, InMemoryCache::new())
    }
}

impl<C: CacheBackend> VerificationClient<C> {
    pub fn with_cache(config: VerifierConfig, backend: C) -> Self {
        let executor = RequestExecutor::new(&config);
        Self::with_executor(config, executor, backend)
    }

    /// 注入自訂的 RequestExecutor（例如自行設定 proxy 的 reqwest::Client）
    pub fn with_executor(config: VerifierConfig, executor: RequestExecutor, backend: C) -> Self {
        Self {
            executor,
            cache: CacheStore::new(backend, config.cache),
            raise_on_error: config.raise_on_error,
        }
    }

    pub fn cache(&self) -> &CacheStore<C> {
        &self.cache
    }

    pub async fn validate(&self, email: &str) -> Result<ValidationResult> {
        if let Some(cached) = self.cache.get(email).await {
            return Ok(cached);
        }

        match self.fetch(email).await {
            Ok(result) => {
                self.cache.put(email, &result).await;
                Ok(result)
            }
            Err(error) => self.apply_policy(email, error),
        }
    }

    /// 依序驗證多個地址，結果順序與輸入相同
    pub async fn validate_many(&self, emails: &[&str]) -> Vec<Result<ValidationResult>> {
        let mut results = Vec::with_capacity(emails.len());
        for email in emails {
            results.push(self.validate(email).await);
        }
        results
    }

    async fn fetch(&self, email: &str) -> Result<ValidationResult> {
        let response = self.executor.execute(email).await?;

        parser::parse(email, &response.body)
            .map_err(|e| classifier::classify(Failure::Malformed(e)))
    }

    fn apply_policy(&self, email: &str, error: VerifyError) -> Result<ValidationResult> {
        // 認證錯誤不受 raise_on_error 影響，一律往外拋
        if error.is_authentication() || self.raise_on_error {
            tracing::error!("❌ Verification of {} failed: {}", email, error);
            return Err(error);
        }

        tracing::info!(
            "Verification of {} failed ({:?}): {}; returning unknown result",
            email,
            error.kind(),
            error
        );
        Ok(ValidationResult::failed(email))
    }
}

#[async_trait]
impl<C: CacheBackend> Verifier for VerificationClient<C> {
    async fn validate(&self, email: &str) -> Result<ValidationResult> {
        VerificationClient::<C>::validate(self, email).await
    }
}
