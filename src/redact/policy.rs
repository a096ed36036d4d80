// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Redaction rules and the redaction pass

use lazy_static::lazy_static;
use serde_json::Value;

use crate::capture::CaptureInfo;

/// Fixed mask token substituted for matched values
pub const MASK: &str = "[REDACTED]";

lazy_static! {
    /// Header names masked by the default rule set
    static ref DEFAULT_HEADERS: Vec<&'static str> = vec![
        "authorization",
        "proxy-authorization",
        "cookie",
        "set-cookie",
        "x-api-key",
        "x-auth-token",
    ];

    /// JSON body field names masked by the default rule set
    static ref DEFAULT_BODY_FIELDS: Vec<&'static str> = vec![
        "password",
        "passwd",
        "secret",
        "client_secret",
        "token",
        "access_token",
        "refresh_token",
        "api_key",
        "card_number",
    ];
}

/// Field names to mask before a record leaves the capture worker
///
/// Header matching is case-insensitive on header names. Body matching is
/// best-effort structured-JSON field matching: field names are compared
/// case-insensitively at any nesting depth, and a body that does not parse
/// as JSON is left untouched.
#[derive(Debug, Clone)]
pub struct RedactionRules {
    headers: Vec<String>,
    body_fields: Vec<String>,
}

impl Default for RedactionRules {
    /// The built-in rule set: authorization-style headers and
    /// password/token-style body fields
    fn default() -> Self {
        Self {
            headers: DEFAULT_HEADERS.iter().map(|h| h.to_string()).collect(),
            body_fields: DEFAULT_BODY_FIELDS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl RedactionRules {
    /// Rules that mask nothing
    pub fn none() -> Self {
        Self {
            headers: Vec::new(),
            body_fields: Vec::new(),
        }
    }

    /// Also mask the given header (case-insensitive)
    pub fn header(mut self, name: impl AsRef<str>) -> Self {
        self.headers.push(name.as_ref().to_lowercase());
        self
    }

    /// Also mask the given JSON body field (case-insensitive)
    pub fn body_field(mut self, name: impl AsRef<str>) -> Self {
        self.body_fields.push(name.as_ref().to_lowercase());
        self
    }

    fn matches_header(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h.eq_ignore_ascii_case(name))
    }

    fn matches_field(&self, name: &str) -> bool {
        self.body_fields.iter().any(|f| f.eq_ignore_ascii_case(name))
    }
}

/// Apply redaction rules to a record, exactly once
///
/// Idempotent: a record that already carries the `redacted` flag is returned
/// unchanged. After this call the original values of matched fields are gone
/// from the record; nothing downstream can recover them.
pub fn redact(info: &mut CaptureInfo, rules: &RedactionRules) {
    if info.redacted {
        return;
    }

    mask_headers(&mut info.request.headers, rules);
    if let Some(ref mut body) = info.request.body {
        mask_json_body(body, rules);
    }

    if let Some(ref mut response) = info.response {
        mask_headers(&mut response.headers, rules);
        if let Some(ref mut body) = response.body {
            mask_json_body(body, rules);
        }
    }

    info.redacted = true;
}

fn mask_headers(headers: &mut [(String, String)], rules: &RedactionRules) {
    for (name, value) in headers.iter_mut() {
        if rules.matches_header(name) {
            *value = MASK.to_string();
        }
    }
}

/// Best-effort body redaction: only rewrites the body when it parses as JSON
/// and at least one field matched
fn mask_json_body(body: &mut String, rules: &RedactionRules) {
    let Ok(mut value) = serde_json::from_str::<Value>(body) else {
        return;
    };

    if mask_json_value(&mut value, rules) {
        if let Ok(masked) = serde_json::to_string(&value) {
            *body = masked;
        }
    }
}

fn mask_json_value(value: &mut Value, rules: &RedactionRules) -> bool {
    match value {
        Value::Object(map) => {
            let mut changed = false;
            for (key, field) in map.iter_mut() {
                if rules.matches_field(key) {
                    *field = Value::String(MASK.to_string());
                    changed = true;
                } else {
                    changed |= mask_json_value(field, rules);
                }
            }
            changed
        }
        Value::Array(items) => {
            let mut changed = false;
            for item in items.iter_mut() {
                changed |= mask_json_value(item, rules);
            }
            changed
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::{RequestSnapshot, ResponseSnapshot};
    use chrono::Utc;

    fn record_with_auth() -> CaptureInfo {
        CaptureInfo::new(
            "cap_1",
            "auth",
            RequestSnapshot::new("https://api.example.com/login", "POST")
                .with_header("Authorization", "Bearer super-secret")
                .with_header("content-type", "application/json")
                .with_body(r#"{"user":"ada","password":"hunter2"}"#),
            Utc::now(),
        )
        .with_response(
            ResponseSnapshot::new(200, "OK")
                .with_header("Set-Cookie", "session=abc123")
                .with_body(r#"{"token":"tok-999","profile":{"name":"ada"}}"#),
        )
    }

    #[test]
    fn test_headers_masked_case_insensitive() {
        let mut info = record_with_auth();
        redact(&mut info, &RedactionRules::default());

        assert_eq!(info.request_header("authorization"), Some(MASK));
        assert_eq!(info.response_header("set-cookie"), Some(MASK));
        // Unmatched headers untouched
        assert_eq!(info.request_header("content-type"), Some("application/json"));
    }

    #[test]
    fn test_original_value_gone() {
        let mut info = record_with_auth();
        redact(&mut info, &RedactionRules::default());

        let serialized = serde_json::to_string(&info).unwrap();
        assert!(!serialized.contains("super-secret"));
        assert!(!serialized.contains("hunter2"));
        assert!(!serialized.contains("tok-999"));
    }

    #[test]
    fn test_nested_body_fields_masked() {
        let mut info = record_with_auth();
        redact(&mut info, &RedactionRules::default());

        let body: Value =
            serde_json::from_str(info.response.as_ref().unwrap().body.as_deref().unwrap())
                .unwrap();
        assert_eq!(body["token"], MASK);
        assert_eq!(body["profile"]["name"], "ada");
    }

    #[test]
    fn test_idempotent() {
        let mut once = record_with_auth();
        redact(&mut once, &RedactionRules::default());

        let mut twice = once.clone();
        redact(&mut twice, &RedactionRules::default());

        assert_eq!(once, twice);
    }

    #[test]
    fn test_non_json_body_untouched() {
        let mut info = CaptureInfo::new(
            "cap_2",
            "m",
            RequestSnapshot::new("https://example.com", "POST")
                .with_body("password=hunter2&user=ada"),
            Utc::now(),
        );
        redact(&mut info, &RedactionRules::default());

        // Form bodies are out of scope for best-effort JSON matching
        assert_eq!(
            info.request.body.as_deref(),
            Some("password=hunter2&user=ada")
        );
        assert!(info.redacted);
    }

    #[test]
    fn test_custom_rules() {
        let rules = RedactionRules::none()
            .header("x-internal-trace")
            .body_field("ssn");

        let mut info = CaptureInfo::new(
            "cap_3",
            "m",
            RequestSnapshot::new("https://example.com", "POST")
                .with_header("x-internal-trace", "trace-1")
                .with_header("authorization", "Bearer keepme")
                .with_body(r#"{"SSN":"123-45-6789"}"#),
            Utc::now(),
        );
        redact(&mut info, &rules);

        assert_eq!(info.request_header("x-internal-trace"), Some(MASK));
        // Default rules are not in play with RedactionRules::none()
        assert_eq!(info.request_header("authorization"), Some("Bearer keepme"));
        let body: Value = serde_json::from_str(info.request.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["SSN"], MASK);
    }
}
