// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP response type

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{Error, Result};

/// HTTP response representation
///
/// Holds the complete body; the capture layer snapshots from here without
/// consuming anything, so the caller always sees the full response.
#[derive(Debug, Clone)]
pub struct Response {
    /// Response status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: Bytes,
    /// Final URL (after redirects)
    pub url: Url,
    /// Response time in milliseconds
    pub response_time_ms: u64,
}

impl Response {
    /// Create a new response
    pub fn new(
        status: StatusCode,
        headers: HeaderMap,
        body: Bytes,
        url: Url,
        response_time_ms: u64,
    ) -> Self {
        Self {
            status,
            headers,
            body,
            url,
            response_time_ms,
        }
    }

    /// Check if status is success (2xx)
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Get status code as u16
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Canonical status text ("OK", "Not Found", ...)
    pub fn status_text(&self) -> &str {
        self.status.canonical_reason().unwrap_or("")
    }

    /// Get body as text
    pub fn text(&self) -> Result<String> {
        String::from_utf8(self.body.to_vec()).map_err(|e| Error::Other(e.to_string()))
    }

    /// Get body as text, lossy conversion
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parse body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(Error::from)
    }

    /// Get a header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Get content type
    pub fn content_type(&self) -> Option<&str> {
        self.header(super::headers::CONTENT_TYPE)
    }

    /// Get content length as declared by the server
    pub fn content_length(&self) -> Option<usize> {
        self.header(super::headers::CONTENT_LENGTH)
            .and_then(|v| v.parse().ok())
    }

    /// Get body length in bytes
    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    /// Headers as ordered (name, value) pairs for snapshotting
    pub fn header_pairs(&self) -> Vec<(String, String)> {
        self.headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: StatusCode, body: &str) -> Response {
        Response::new(
            status,
            HeaderMap::new(),
            Bytes::from(body.to_string()),
            Url::parse("https://example.com").unwrap(),
            10,
        )
    }

    #[test]
    fn test_response_status() {
        let resp = response(StatusCode::OK, "");
        assert!(resp.is_success());
        assert_eq!(resp.status_code(), 200);
        assert_eq!(resp.status_text(), "OK");
    }

    #[test]
    fn test_response_text() {
        let resp = response(StatusCode::OK, "Hello, World!");
        assert_eq!(resp.text().unwrap(), "Hello, World!");
        assert_eq!(resp.body_len(), 13);
    }

    #[test]
    fn test_response_json() {
        let resp = response(StatusCode::OK, r#"{"ok":true}"#);
        let value: serde_json::Value = resp.json().unwrap();
        assert_eq!(value["ok"], true);
    }
}
