use crate::config::VerifierConfig;
use crate::core::classifier::{self, Failure, RawResponse};
use crate::utils::error::{Result, VerifyError};
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::time::Duration;

pub const VERIFY_PATH: &str = "/api/v1/verify";

/// 重試上限：總嘗試次數最多 3 次
pub const MAX_RETRY_ATTEMPTS: u32 = 2;

/// Sends the verification request and retries transient failures.
#[derive(Debug, Clone)]
pub struct RequestExecutor {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    timeout: Duration,
    retry_attempts: u32,
    retry_delay: Duration,
}

impl RequestExecutor {
    pub fn new(config: &VerifierConfig) -> Self {
        Self::with_http_client(config, Client::new())
    }

    pub fn with_http_client(config: &VerifierConfig, client: Client) -> Self {
        Self {
            client,
            endpoint: format!("{}{}", config.trimmed_base_url(), VERIFY_PATH),
            api_key: config.api_key().map(str::to_string),
            timeout: config.timeout_duration(),
            retry_attempts: config.retry_attempts.min(MAX_RETRY_ATTEMPTS),
            retry_delay: config.retry_delay(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// 回傳 2xx 回應；失敗時已經過分類
    ///
    /// 缺少 API key 時在任何網路 I/O 之前就回傳 Authentication 錯誤。
    pub async fn execute(&self, email: &str) -> Result<RawResponse> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| VerifyError::Authentication {
                message: "Truelist API key is not configured. Set TRUELIST_API_KEY or api_key in the config file.".to_string(),
            })?;

        let max_attempts = self.retry_attempts.saturating_add(1);
        let mut attempt = 1;

        loop {
            tracing::debug!(
                "📡 POST {} for {} (attempt {}/{})",
                self.endpoint,
                email,
                attempt,
                max_attempts
            );

            let failure = match self.send_once(api_key, email).await {
                Ok(response) => {
                    tracing::debug!("📡 API response status: {}", response.status);
                    return Ok(response);
                }
                Err(failure) => failure,
            };

            if attempt < max_attempts && classifier::is_transient(&failure) {
                tracing::warn!(
                    "Verification attempt {}/{} failed ({}), retrying in {:?}",
                    attempt,
                    max_attempts,
                    failure,
                    self.retry_delay
                );
                tokio::time::sleep(self.retry_delay).await;
                attempt += 1;
                continue;
            }

            tracing::debug!("Giving up after {} attempt(s): {}", attempt, failure);
            return Err(classifier::classify(failure));
        }
    }

    async fn send_once(
        &self,
        api_key: &str,
        email: &str,
    ) -> std::result::Result<RawResponse, Failure> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .header(ACCEPT, "application/json")
            .json(&serde_json::json!({ "email": email }))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(Failure::Transport)?;

        let status = response.status();
        let body = response.text().await.map_err(Failure::Transport)?;
        let raw = RawResponse {
            status: status.as_u16(),
            body,
        };

        if status.is_success() {
            Ok(raw)
        } else {
            Err(Failure::Status(raw))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let config = VerifierConfig::new("key").with_base_url("https://api.example.com///");
        let executor = RequestExecutor::new(&config);

        assert_eq!(executor.endpoint(), "https://api.example.com/api/v1/verify");
    }

    #[test]
    fn test_retry_attempts_are_capped() {
        let config = VerifierConfig {
            retry_attempts: 10,
            ..VerifierConfig::new("key")
        };
        let executor = RequestExecutor::new(&config);
        assert_eq!(executor.retry_attempts, MAX_RETRY_ATTEMPTS);

        let config = VerifierConfig {
            retry_attempts: 1,
            ..VerifierConfig::new("key")
        };
        assert_eq!(RequestExecutor::new(&config).retry_attempts, 1);
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_before_network() {
        // 不可連線的位址：若真的送出請求會得到 Transport 錯誤而非 Authentication
        let config = VerifierConfig {
            api_key: None,
            base_url: "http://127.0.0.1:1".to_string(),
            ..VerifierConfig::default()
        };

        let err = RequestExecutor::new(&config)
            .execute("user@example.com")
            .await
            .unwrap_err();
        assert!(err.is_authentication());
    }

    #[tokio::test]
    async fn test_blank_api_key_fails_before_network() {
        let config = VerifierConfig::new("   ").with_base_url("http://127.0.0.1:1");

        let err = RequestExecutor::new(&config)
            .execute("user@example.com")
            .await
            .unwrap_err();
        assert!(matches!(err, VerifyError::Authentication { .. }));
    }
}
