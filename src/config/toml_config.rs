use crate::core::executor::MAX_RETRY_ATTEMPTS;
use crate::utils::error::{Result, VerifyError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.truelist.io";
pub const DEFAULT_CACHE_PREFIX: &str = "truelist:";

/// Verification client settings. Passed explicitly into the client; nothing in
/// the core reads global state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VerifierConfig {
    /// 未設定或為空字串時，呼叫前即回傳 Authentication 錯誤
    pub api_key: Option<String>,
    pub base_url: String,
    /// 秒
    pub timeout: u64,
    /// 只給表單驗證轉接層使用，核心判定不看這個值
    pub allow_risky: bool,
    pub raise_on_error: bool,
    /// 初次請求之後的重試次數，上限 2
    pub retry_attempts: u32,
    pub retry_delay_ms: u64,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    /// 秒
    pub ttl: u64,
    pub prefix: String,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: 10,
            allow_risky: true,
            raise_on_error: false,
            retry_attempts: 2,
            retry_delay_ms: 100,
            cache: CacheConfig::default(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            ttl: 3600,
            prefix: DEFAULT_CACHE_PREFIX.to_string(),
        }
    }
}

impl VerifierConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(VerifyError::Io)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| VerifyError::Config {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${TRUELIST_API_KEY})；未設定的變數替換為空字串
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| VerifyError::Config {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| {
                tracing::warn!("Environment variable {} is not set", var_name);
                String::new()
            })
        });

        Ok(result.to_string())
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_raise_on_error(mut self, raise_on_error: bool) -> Self {
        self.raise_on_error = raise_on_error;
        self
    }

    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }

    /// 去除尾端斜線後的 base URL
    pub fn trimmed_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// 空白字串視同未設定
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

impl CacheConfig {
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    pub fn ttl_duration(&self) -> Duration {
        Duration::from_secs(self.ttl)
    }
}

impl Validate for VerifierConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("base_url", &self.base_url)?;
        validation::validate_range("timeout", self.timeout, 1, 300)?;
        validation::validate_range(
            "retry_attempts",
            self.retry_attempts,
            0,
            MAX_RETRY_ATTEMPTS,
        )?;
        validation::validate_range("retry_delay_ms", self.retry_delay_ms, 0, 60_000)?;

        if self.cache.enabled {
            validation::validate_non_empty_string("cache.prefix", &self.cache.prefix)?;
            validation::validate_range("cache.ttl", self.cache.ttl, 1, u64::MAX)?;
        }

        Ok(())
    }
}
