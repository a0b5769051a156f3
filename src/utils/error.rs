use thiserror::Error;

#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    #[error("Rate limit exceeded: {body}")]
    RateLimit { body: String },

    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Invalid JSON response from API: {0}")]
    InvalidResponse(#[source] serde_json::Error),

    #[error("Connection to verification API failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid configuration value for '{field}': {value} ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// 對外公開的錯誤分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Authentication,
    RateLimit,
    Api,
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl VerifyError {
    /// 將細部變體收斂為 Authentication / RateLimit / Api 三類（外加本地設定錯誤）
    pub fn kind(&self) -> ErrorKind {
        match self {
            VerifyError::Authentication { .. } => ErrorKind::Authentication,
            VerifyError::RateLimit { .. } => ErrorKind::RateLimit,
            VerifyError::Api { .. } | VerifyError::InvalidResponse(_) | VerifyError::Transport(_) => {
                ErrorKind::Api
            }
            VerifyError::Config { .. }
            | VerifyError::InvalidConfigValue { .. }
            | VerifyError::Io(_) => ErrorKind::Config,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.kind() {
            ErrorKind::RateLimit => ErrorSeverity::Medium,
            ErrorKind::Api => ErrorSeverity::Medium,
            ErrorKind::Config => ErrorSeverity::High,
            ErrorKind::Authentication => ErrorSeverity::Critical,
        }
    }

    pub fn is_authentication(&self) -> bool {
        self.kind() == ErrorKind::Authentication
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            VerifyError::Authentication { message } => message.clone(),
            VerifyError::RateLimit { .. } => {
                "The verification service is rate limiting requests".to_string()
            }
            VerifyError::Api { status, .. } => {
                format!("The verification service responded with HTTP {}", status)
            }
            VerifyError::InvalidResponse(_) => {
                "The verification service returned an unreadable response".to_string()
            }
            VerifyError::Transport(_) => "Could not reach the verification service".to_string(),
            VerifyError::Config { message } => format!("Configuration problem: {}", message),
            VerifyError::InvalidConfigValue { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
            VerifyError::Io(e) => format!("File access failed: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Authentication => {
                "Set TRUELIST_API_KEY (or api_key in the config file) to a valid key"
            }
            ErrorKind::RateLimit => "Wait a moment and retry, or lower the request rate",
            ErrorKind::Api => "Retry later; the verification service may be unavailable",
            ErrorKind::Config => "Check the configuration file and environment variables",
        }
    }
}

pub type Result<T> = std::result::Result<T, VerifyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_collapses_api_variants() {
        let status = VerifyError::Api {
            status: 503,
            body: "down".to_string(),
        };
        let malformed =
            VerifyError::InvalidResponse(serde_json::from_str::<serde_json::Value>("{").unwrap_err());

        assert_eq!(status.kind(), ErrorKind::Api);
        assert_eq!(malformed.kind(), ErrorKind::Api);
        assert_eq!(
            VerifyError::RateLimit {
                body: String::new()
            }
            .kind(),
            ErrorKind::RateLimit
        );
    }

    #[test]
    fn test_severity_by_kind() {
        let rate_limited = VerifyError::RateLimit {
            body: String::new(),
        };
        let config = VerifyError::InvalidConfigValue {
            field: "timeout".to_string(),
            value: "0".to_string(),
            reason: "out of range".to_string(),
        };

        assert_eq!(rate_limited.severity(), ErrorSeverity::Medium);
        assert_eq!(config.severity(), ErrorSeverity::High);
        assert!(config.severity() < ErrorSeverity::Critical);
    }

    #[test]
    fn test_authentication_is_critical() {
        let err = VerifyError::Authentication {
            message: "Invalid API key".to_string(),
        };
        assert!(err.is_authentication());
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.to_string().contains("Invalid API key"));
    }
}
