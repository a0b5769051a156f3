use crate::config::toml_config::{CacheConfig, VerifierConfig, DEFAULT_BASE_URL, DEFAULT_CACHE_PREFIX};
use std::env;
use std::str::FromStr;

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}

fn env_flag(name: &str, default: bool) -> bool {
    match env::var(name) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" | "" => false,
            _ => default,
        },
        Err(_) => default,
    }
}

impl VerifierConfig {
    /// 從 TRUELIST_* 環境變數建立配置；無法解析的值使用預設值
    pub fn from_env() -> Self {
        let defaults = VerifierConfig::default();

        Self {
            api_key: env::var("TRUELIST_API_KEY").ok(),
            base_url: env::var("TRUELIST_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            timeout: env_or("TRUELIST_TIMEOUT", defaults.timeout),
            allow_risky: env_flag("TRUELIST_ALLOW_RISKY", defaults.allow_risky),
            raise_on_error: env_flag("TRUELIST_RAISE_ON_ERROR", defaults.raise_on_error),
            retry_attempts: env_or("TRUELIST_RETRY_ATTEMPTS", defaults.retry_attempts),
            retry_delay_ms: env_or("TRUELIST_RETRY_DELAY_MS", defaults.retry_delay_ms),
            cache: CacheConfig {
                enabled: env_flag("TRUELIST_CACHE_ENABLED", defaults.cache.enabled),
                ttl: env_or("TRUELIST_CACHE_TTL", defaults.cache.ttl),
                prefix: env::var("TRUELIST_CACHE_PREFIX")
                    .unwrap_or_else(|_| DEFAULT_CACHE_PREFIX.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 只有這個測試會改動 TRUELIST_* 環境變數
    #[test]
    fn test_from_env() {
        env::set_var("TRUELIST_API_KEY", "env_key");
        env::set_var("TRUELIST_TIMEOUT", "25");
        env::set_var("TRUELIST_RAISE_ON_ERROR", "true");
        env::set_var("TRUELIST_CACHE_ENABLED", "1");
        env::set_var("TRUELIST_CACHE_TTL", "not-a-number");

        let config = VerifierConfig::from_env();

        assert_eq!(config.api_key(), Some("env_key"));
        assert_eq!(config.timeout, 25);
        assert!(config.raise_on_error);
        assert!(config.allow_risky);
        assert!(config.cache.enabled);
        assert_eq!(config.cache.ttl, 3600);
        assert_eq!(config.base_url, "https://api.truelist.io");

        for name in [
            "TRUELIST_API_KEY",
            "TRUELIST_TIMEOUT",
            "TRUELIST_RAISE_ON_ERROR",
            "TRUELIST_CACHE_ENABLED",
            "TRUELIST_CACHE_TTL",
        ] {
            env::remove_var(name);
        }
    }

    #[test]
    fn test_env_flag_parsing() {
        env::set_var("TRUELIST_TEST_FLAG_PARSING", "OFF");
        assert!(!env_flag("TRUELIST_TEST_FLAG_PARSING", true));
        env::set_var("TRUELIST_TEST_FLAG_PARSING", "maybe");
        assert!(env_flag("TRUELIST_TEST_FLAG_PARSING", true));
        env::remove_var("TRUELIST_TEST_FLAG_PARSING");

        assert!(!env_flag("TRUELIST_TEST_FLAG_MISSING", false));
    }
}
