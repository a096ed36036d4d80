// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Capture record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One record per intercepted HTTP exchange
///
/// A record is emitted fully formed by the recorder; after that the only
/// mutation it ever sees is the one-shot redaction pass on the capture
/// worker. Headers are kept as ordered pairs rather than a map, so repeated
/// names survive and display tooling sees them as observed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureInfo {
    /// Record ID, unique within a recorder
    pub id: String,
    /// Module the exchange belongs to
    pub module: String,
    /// Request phase data
    pub request: RequestSnapshot,
    /// Response phase data, absent when the exchange failed before a response
    pub response: Option<ResponseSnapshot>,
    /// When the request entered the interceptor
    pub started_at: DateTime<Utc>,
    /// When the exchange completed (response, failure or cancellation)
    pub completed_at: DateTime<Utc>,
    /// Exchange duration in milliseconds
    pub duration_ms: u64,
    /// Error message, set when the exchange failed
    pub error: Option<String>,
    /// Whether the redaction pass has run on this record
    pub redacted: bool,
}

/// Request-phase snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestSnapshot {
    /// Request URL
    pub url: String,
    /// HTTP method
    pub method: String,
    /// Ordered request header pairs
    pub headers: Vec<(String, String)>,
    /// Request body text (size-bounded, lossy for binary payloads)
    pub body: Option<String>,
    /// Whether the body was cut at the capture ceiling
    pub body_truncated: bool,
    /// Content type
    pub content_type: Option<String>,
}

/// Response-phase snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSnapshot {
    /// Status code
    pub status: u16,
    /// Status text
    pub status_text: String,
    /// Ordered response header pairs
    pub headers: Vec<(String, String)>,
    /// Response body text (size-bounded, lossy for binary payloads)
    pub body: Option<String>,
    /// Whether the body was cut at the capture ceiling
    pub body_truncated: bool,
    /// Content type
    pub content_type: Option<String>,
    /// Content length as declared by the server
    pub content_length: Option<usize>,
}

impl CaptureInfo {
    /// Create a record for a just-started exchange
    pub fn new(
        id: impl Into<String>,
        module: impl Into<String>,
        request: RequestSnapshot,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            module: module.into(),
            request,
            response: None,
            started_at,
            completed_at: started_at,
            duration_ms: 0,
            error: None,
            redacted: false,
        }
    }

    /// Attach the response phase
    pub fn with_response(mut self, response: ResponseSnapshot) -> Self {
        self.response = Some(response);
        self
    }

    /// Tag the record with an exchange error
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Set completion time and duration
    pub fn completed(mut self, completed_at: DateTime<Utc>, duration_ms: u64) -> Self {
        self.completed_at = completed_at;
        self.duration_ms = duration_ms;
        self
    }

    /// Check if the exchange completed with a 2xx status
    pub fn is_success(&self) -> bool {
        self.error.is_none()
            && self
                .response
                .as_ref()
                .map(|r| (200..300).contains(&r.status))
                .unwrap_or(false)
    }

    /// Check if the exchange failed before producing a response
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }

    /// Response status code, if a response was observed
    pub fn status(&self) -> Option<u16> {
        self.response.as_ref().map(|r| r.status)
    }

    /// Look up a request header, case-insensitive
    pub fn request_header(&self, name: &str) -> Option<&str> {
        lookup_header(&self.request.headers, name)
    }

    /// Look up a response header, case-insensitive
    pub fn response_header(&self, name: &str) -> Option<&str> {
        self.response
            .as_ref()
            .and_then(|r| lookup_header(&r.headers, name))
    }
}

fn lookup_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

impl RequestSnapshot {
    /// Create a snapshot with no headers or body
    pub fn new(url: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: method.into(),
            headers: Vec::new(),
            body: None,
            body_truncated: false,
            content_type: None,
        }
    }

    /// Add a header pair
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the body text
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

impl ResponseSnapshot {
    /// Create a snapshot with no headers or body
    pub fn new(status: u16, status_text: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            headers: Vec::new(),
            body: None,
            body_truncated: false,
            content_type: None,
            content_length: None,
        }
    }

    /// Add a header pair
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the body text
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Check if this is a redirect status
    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> CaptureInfo {
        CaptureInfo::new(
            "cap_1",
            "payments",
            RequestSnapshot::new("https://api.example.com/charge", "POST"),
            Utc::now(),
        )
    }

    #[test]
    fn test_success_requires_response() {
        let rec = record();
        assert!(!rec.is_success());

        let rec = rec.with_response(ResponseSnapshot::new(201, "Created"));
        assert!(rec.is_success());
        assert_eq!(rec.status(), Some(201));
    }

    #[test]
    fn test_error_record_is_never_success() {
        let rec = record()
            .with_response(ResponseSnapshot::new(200, "OK"))
            .with_error("connection reset mid-body");

        assert!(rec.is_failure());
        assert!(!rec.is_success());
    }

    #[test]
    fn test_header_lookup_case_insensitive() {
        let rec = CaptureInfo::new(
            "cap_2",
            "auth",
            RequestSnapshot::new("https://example.com", "GET")
                .with_header("Authorization", "Bearer abc"),
            Utc::now(),
        );

        assert_eq!(rec.request_header("authorization"), Some("Bearer abc"));
        assert_eq!(rec.request_header("AUTHORIZATION"), Some("Bearer abc"));
        assert_eq!(rec.request_header("cookie"), None);
    }
}
