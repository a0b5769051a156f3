use crate::utils::error::VerifyError;
use std::fmt;

/// 成功（2xx）的原始回應
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// One failed attempt, before classification.
#[derive(Debug)]
pub enum Failure {
    /// 非 2xx 回應
    Status(RawResponse),
    /// 連線、逾時等傳輸層錯誤
    Transport(reqwest::Error),
    /// 2xx 但內容不是預期結構
    Malformed(serde_json::Error),
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Status(response) => write!(f, "HTTP {}", response.status),
            Failure::Transport(e) => write!(f, "transport error: {}", e),
            Failure::Malformed(e) => write!(f, "malformed body: {}", e),
        }
    }
}

/// 純函式：不做任何 I/O
pub fn classify(failure: Failure) -> VerifyError {
    match failure {
        Failure::Status(RawResponse { status: 401, .. }) => VerifyError::Authentication {
            message: "Invalid API key. Check your Truelist API key configuration.".to_string(),
        },
        Failure::Status(RawResponse { status: 429, body }) => VerifyError::RateLimit { body },
        Failure::Status(RawResponse { status, body }) => VerifyError::Api { status, body },
        Failure::Transport(e) => VerifyError::Transport(e),
        Failure::Malformed(e) => VerifyError::InvalidResponse(e),
    }
}

/// 429、5xx 與傳輸層錯誤可以重試；401 與其他 4xx 不重試
pub fn is_transient(failure: &Failure) -> bool {
    match failure {
        Failure::Status(response) => response.status == 429 || response.status >= 500,
        Failure::Transport(_) => true,
        Failure::Malformed(_) => false,
    }
}
