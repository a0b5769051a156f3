//! Maps the verification API body into a [`ValidationResult`].
//!
//! Expected shape:
//!
//! ```json
//! { "emails": [ { "address": "...", "email_state": "ok", "email_sub_state": "email_ok", ... } ] }
//! ```
//!
//! Only the first entry is read. A missing list, an empty list or a missing
//! or unrecognized `email_state` is a normal `Unknown` verdict, not a failure.

use crate::domain::model::{EmailState, ValidationResult};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

#[derive(Debug, Default, Deserialize)]
struct VerifyResponse {
    #[serde(default)]
    emails: Vec<EmailEntry>,
}

/// 每個欄位都是選填；型別不符（例如 `"mx_record": 5`）視同缺席，不影響判定
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EmailEntry {
    #[serde(deserialize_with = "lenient_string")]
    address: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    domain: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    canonical: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    mx_record: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    first_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    last_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    email_state: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    email_sub_state: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    verified_at: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    did_you_mean: Option<String>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

pub fn parse(email: &str, body: &str) -> Result<ValidationResult, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(body)?;

    // 合法 JSON 但不是物件（例如字串或陣列）同樣視為格式錯誤
    if !value.is_object() {
        return Err(serde_json::Error::custom(
            "expected a JSON object at the top level",
        ));
    }

    let response: VerifyResponse = serde_json::from_value(value)?;

    let Some(entry) = response.emails.into_iter().next() else {
        tracing::debug!("Response for {} carried no email entries", email);
        return Ok(ValidationResult::new(email, EmailState::Unknown));
    };

    let state = entry
        .email_state
        .as_deref()
        .map(EmailState::from_wire)
        .unwrap_or(EmailState::Unknown);

    // 服務端回傳的正規化地址優先
    let address = entry
        .address
        .filter(|a| !a.trim().is_empty())
        .unwrap_or_else(|| email.to_string());

    Ok(ValidationResult::new(address, state)
        .with_sub_state(entry.email_sub_state)
        .with_domain(entry.domain)
        .with_canonical(entry.canonical)
        .with_mx_record(entry.mx_record)
        .with_name(entry.first_name, entry.last_name)
        .with_verified_at(entry.verified_at)
        .with_suggestion(entry.did_you_mean))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_full_entry() {
        let body = json!({
            "emails": [{
                "address": "user@example.com",
                "domain": "example.com",
                "canonical": "user",
                "mx_record": "mx.example.com",
                "first_name": "John",
                "last_name": "Doe",
                "email_state": "ok",
                "email_sub_state": "email_ok",
                "verified_at": "2026-02-21T10:00:00.000Z",
                "did_you_mean": "user@gmail.com"
            }]
        })
        .to_string();

        let result = parse("user@example.com", &body).unwrap();

        assert!(result.is_valid());
        assert!(!result.is_error());
        assert_eq!(result.sub_state(), Some("email_ok"));
        assert_eq!(result.domain(), Some("example.com"));
        assert_eq!(result.canonical(), Some("user"));
        assert_eq!(result.mx_record(), Some("mx.example.com"));
        assert_eq!(result.first_name(), Some("John"));
        assert_eq!(result.last_name(), Some("Doe"));
        assert_eq!(result.verified_at(), Some("2026-02-21T10:00:00.000Z"));
        assert_eq!(result.suggestion(), Some("user@gmail.com"));
    }

    #[test]
    fn test_parse_prefers_service_address() {
        let body = json!({
            "emails": [{ "address": "user@example.com", "email_state": "ok" }]
        })
        .to_string();

        let result = parse("  User@Example.com ", &body).unwrap();
        assert_eq!(result.email(), "user@example.com");
    }

    #[test]
    fn test_parse_keeps_input_without_address() {
        let body = json!({ "emails": [{ "email_state": "email_invalid" }] }).to_string();

        let result = parse("bad@example.com", &body).unwrap();
        assert_eq!(result.email(), "bad@example.com");
        assert!(result.is_invalid());
        assert_eq!(result.domain(), None);
        assert_eq!(result.suggestion(), None);
    }

    #[test]
    fn test_parse_missing_or_unrecognized_state_is_unknown() {
        let missing = json!({ "emails": [{ "address": "a@example.com" }] }).to_string();
        let odd = json!({ "emails": [{ "email_state": "something_new" }] }).to_string();
        let empty = json!({ "emails": [] }).to_string();
        let no_list = json!({ "status": "done" }).to_string();

        for body in [missing, odd, empty, no_list] {
            let result = parse("a@example.com", &body).unwrap();
            assert!(result.is_unknown(), "body: {}", body);
            assert!(!result.is_error(), "body: {}", body);
        }
    }

    #[test]
    fn test_parse_unknown_sub_state_is_opaque() {
        let body = json!({
            "emails": [{ "email_state": "email_invalid", "email_sub_state": "brand_new_reason" }]
        })
        .to_string();

        let result = parse("a@example.com", &body).unwrap();
        assert_eq!(result.sub_state(), Some("brand_new_reason"));
        assert!(!result.is_disposable());
        assert!(!result.is_role());
    }

    #[test]
    fn test_parse_ignores_wrongly_typed_enrichment_fields() {
        let body = json!({
            "emails": [{
                "address": "user@example.com",
                "domain": "example.com",
                "mx_record": 5,
                "first_name": {},
                "last_name": null,
                "did_you_mean": ["user@gmail.com"],
                "email_state": "ok",
                "email_sub_state": "email_ok"
            }]
        })
        .to_string();

        let result = parse("user@example.com", &body).unwrap();

        assert!(result.is_valid());
        assert!(!result.is_error());
        assert_eq!(result.domain(), Some("example.com"));
        assert_eq!(result.mx_record(), None);
        assert_eq!(result.first_name(), None);
        assert_eq!(result.last_name(), None);
        assert_eq!(result.suggestion(), None);
    }

    #[test]
    fn test_parse_non_string_state_is_unknown() {
        let body = json!({ "emails": [{ "email_state": 1 }] }).to_string();

        let result = parse("a@example.com", &body).unwrap();
        assert!(result.is_unknown());
        assert!(!result.is_error());
    }

    #[test]
    fn test_parse_rejects_malformed_bodies() {
        assert!(parse("a@example.com", "not json").is_err());
        assert!(parse("a@example.com", "").is_err());
        assert!(parse("a@example.com", "\"ok\"").is_err());
        assert!(parse("a@example.com", "[1, 2]").is_err());
        assert!(parse("a@example.com", r#"{"emails": "nope"}"#).is_err());
    }
}
