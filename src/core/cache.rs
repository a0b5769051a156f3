use crate::config::CacheConfig;
use crate::domain::model::ValidationResult;
use crate::domain::ports::CacheBackend;

/// Cache-aside wrapper around an injected [`CacheBackend`].
///
/// There is no locking or single-flight: two concurrent misses for the same
/// address both reach the API and both write the entry.
#[derive(Debug, Clone)]
pub struct CacheStore<C: CacheBackend> {
    backend: C,
    config: CacheConfig,
}

impl<C: CacheBackend> CacheStore<C> {
    pub fn new(backend: C, config: CacheConfig) -> Self {
        Self { backend, config }
    }

    pub fn backend(&self) -> &C {
        &self.backend
    }

    /// `prefix + "validation:" + lowercase(trim(email))`
    pub fn key_for(&self, email: &str) -> String {
        format!(
            "{}validation:{}",
            self.config.prefix,
            email.trim().to_lowercase()
        )
    }

    /// 後端錯誤、無法解碼的內容或不可快取的結果都視為未命中
    pub async fn get(&self, email: &str) -> Option<ValidationResult> {
        if !self.config.enabled {
            return None;
        }

        let key = self.key_for(email);
        let raw = match self.backend.get(&key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!("Cache miss for {}", key);
                return None;
            }
            Err(e) => {
                tracing::warn!("Cache lookup for {} failed: {}", key, e);
                return None;
            }
        };

        match serde_json::from_str::<ValidationResult>(&raw) {
            Ok(result) if result.is_cacheable() => {
                tracing::debug!("Cache hit for {}", key);
                Some(result)
            }
            Ok(result) => {
                // 共用後端可能有其他寫入者
                tracing::warn!(
                    "Ignoring non-cacheable entry {} (state: {}, error: {})",
                    key,
                    result.state(),
                    result.is_error()
                );
                None
            }
            Err(e) => {
                tracing::warn!("Discarding undecodable cache entry {}: {}", key, e);
                None
            }
        }
    }

    /// 只寫入成功且非 Unknown 的結果
    pub async fn put(&self, email: &str, result: &ValidationResult) {
        if !self.config.enabled || !result.is_cacheable() {
            return;
        }

        let key = self.key_for(email);
        let encoded = match serde_json::to_string(result) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::warn!("Could not encode result for {}: {}", key, e);
                return;
            }
        };

        if let Err(e) = self
            .backend
            .put(&key, encoded, self.config.ttl_duration())
            .await
        {
            tracing::warn!("Cache write for {} failed: {}", key, e);
        }
    }
}
