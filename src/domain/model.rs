use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 驗證結果的主要判定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmailState {
    #[serde(rename = "ok")]
    Ok,
    #[serde(rename = "email_invalid")]
    Invalid,
    /// 網域接受所有收件者，無法確認個別信箱（有風險但非失敗）
    #[serde(rename = "accept_all")]
    AcceptAll,
    #[serde(rename = "unknown")]
    Unknown,
}

impl EmailState {
    /// 無法辨識的字串一律視為 Unknown
    pub fn from_wire(value: &str) -> Self {
        match value {
            "ok" => EmailState::Ok,
            "email_invalid" => EmailState::Invalid,
            "accept_all" => EmailState::AcceptAll,
            _ => EmailState::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EmailState::Ok => "ok",
            EmailState::Invalid => "email_invalid",
            EmailState::AcceptAll => "accept_all",
            EmailState::Unknown => "unknown",
        }
    }
}

impl fmt::Display for EmailState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const SUB_STATE_DISPOSABLE: &str = "is_disposable";
const SUB_STATE_ROLE: &str = "is_role";

/// A single verification verdict.
///
/// Fields are only set while the value is being built (`new` + `with_*`);
/// there is no way to change a result afterwards. `error` is only ever set by
/// [`ValidationResult::failed`], which also pins the state to `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    email: String,
    state: EmailState,
    sub_state: Option<String>,
    domain: Option<String>,
    canonical: Option<String>,
    mx_record: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    verified_at: Option<String>,
    suggestion: Option<String>,
    error: bool,
}

impl ValidationResult {
    pub fn new(email: impl Into<String>, state: EmailState) -> Self {
        Self {
            email: email.into(),
            state,
            sub_state: None,
            domain: None,
            canonical: None,
            mx_record: None,
            first_name: None,
            last_name: None,
            verified_at: None,
            suggestion: None,
            error: false,
        }
    }

    /// 本地失敗時合成的結果（fail-open）
    pub fn failed(email: impl Into<String>) -> Self {
        Self {
            error: true,
            ..Self::new(email, EmailState::Unknown)
        }
    }

    pub fn with_sub_state(mut self, sub_state: Option<String>) -> Self {
        self.sub_state = sub_state;
        self
    }

    pub fn with_domain(mut self, domain: Option<String>) -> Self {
        self.domain = domain;
        self
    }

    pub fn with_canonical(mut self, canonical: Option<String>) -> Self {
        self.canonical = canonical;
        self
    }

    pub fn with_mx_record(mut self, mx_record: Option<String>) -> Self {
        self.mx_record = mx_record;
        self
    }

    pub fn with_name(mut self, first_name: Option<String>, last_name: Option<String>) -> Self {
        self.first_name = first_name;
        self.last_name = last_name;
        self
    }

    pub fn with_verified_at(mut self, verified_at: Option<String>) -> Self {
        self.verified_at = verified_at;
        self
    }

    pub fn with_suggestion(mut self, suggestion: Option<String>) -> Self {
        self.suggestion = suggestion;
        self
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn state(&self) -> EmailState {
        self.state
    }

    pub fn sub_state(&self) -> Option<&str> {
        self.sub_state.as_deref()
    }

    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    pub fn canonical(&self) -> Option<&str> {
        self.canonical.as_deref()
    }

    pub fn mx_record(&self) -> Option<&str> {
        self.mx_record.as_deref()
    }

    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    pub fn verified_at(&self) -> Option<&str> {
        self.verified_at.as_deref()
    }

    /// `verified_at` 以 RFC 3339 解析；格式不符時回傳 None
    pub fn verified_at_time(&self) -> Option<DateTime<FixedOffset>> {
        self.verified_at
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
    }

    pub fn suggestion(&self) -> Option<&str> {
        self.suggestion.as_deref()
    }

    pub fn is_valid(&self) -> bool {
        self.state == EmailState::Ok
    }

    pub fn is_invalid(&self) -> bool {
        self.state == EmailState::Invalid
    }

    pub fn is_accept_all(&self) -> bool {
        self.state == EmailState::AcceptAll
    }

    pub fn is_risky(&self) -> bool {
        self.is_accept_all()
    }

    pub fn is_unknown(&self) -> bool {
        self.state == EmailState::Unknown
    }

    pub fn is_error(&self) -> bool {
        self.error
    }

    pub fn is_disposable(&self) -> bool {
        self.sub_state() == Some(SUB_STATE_DISPOSABLE)
    }

    pub fn is_role(&self) -> bool {
        self.sub_state() == Some(SUB_STATE_ROLE)
    }

    /// Whether the cache may keep this verdict.
    pub fn is_cacheable(&self) -> bool {
        !self.error && self.state != EmailState::Unknown
    }

    /// 扁平化輸出，供日誌與遙測使用
    pub fn to_map(&self) -> BTreeMap<String, serde_json::Value> {
        use serde_json::Value;

        let optional = |v: &Option<String>| v.clone().map(Value::String).unwrap_or(Value::Null);

        let mut map = BTreeMap::new();
        map.insert("email".to_string(), Value::String(self.email.clone()));
        map.insert(
            "state".to_string(),
            Value::String(self.state.as_str().to_string()),
        );
        map.insert("sub_state".to_string(), optional(&self.sub_state));
        map.insert("domain".to_string(), optional(&self.domain));
        map.insert("canonical".to_string(), optional(&self.canonical));
        map.insert("mx_record".to_string(), optional(&self.mx_record));
        map.insert("first_name".to_string(), optional(&self.first_name));
        map.insert("last_name".to_string(), optional(&self.last_name));
        map.insert("verified_at".to_string(), optional(&self.verified_at));
        map.insert("suggestion".to_string(), optional(&self.suggestion));
        map.insert("error".to_string(), Value::Bool(self.error));
        map
    }
}
