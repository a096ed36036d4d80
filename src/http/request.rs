// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP request type and builder

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::Serialize;
use url::Url;

use crate::error::Result;

/// HTTP request representation
#[derive(Debug, Clone)]
pub struct Request {
    /// Request method
    pub method: Method,
    /// Request URL
    pub url: Url,
    /// Request headers
    pub headers: HeaderMap,
    /// Request body
    pub body: Option<Bytes>,
    /// Per-request timeout override
    pub timeout: Option<Duration>,
}

impl Request {
    /// Create a new request with an arbitrary method
    pub fn new(method: Method, url: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            method,
            url: Url::parse(url.as_ref())?,
            headers: HeaderMap::new(),
            body: None,
            timeout: None,
        })
    }

    /// Create a new GET request
    pub fn get(url: impl AsRef<str>) -> Result<Self> {
        Self::new(Method::GET, url)
    }

    /// Create a new POST request
    pub fn post(url: impl AsRef<str>) -> Result<Self> {
        Self::new(Method::POST, url)
    }

    /// Create a new PUT request
    pub fn put(url: impl AsRef<str>) -> Result<Self> {
        Self::new(Method::PUT, url)
    }

    /// Create a new DELETE request
    pub fn delete(url: impl AsRef<str>) -> Result<Self> {
        Self::new(Method::DELETE, url)
    }

    /// Set a header. Invalid names/values are silently ignored.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name.as_ref()),
            HeaderValue::try_from(value.as_ref()),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Set the request body
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set a JSON body and content type
    pub fn json<T: Serialize>(mut self, data: &T) -> Result<Self> {
        let json = serde_json::to_vec(data)?;
        self.body = Some(Bytes::from(json));
        self = self.header(super::headers::CONTENT_TYPE, "application/json");
        Ok(self)
    }

    /// Set a per-request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Get the URL as string
    pub fn url_str(&self) -> &str {
        self.url.as_str()
    }

    /// Get the host
    pub fn host(&self) -> Option<&str> {
        self.url.host_str()
    }

    /// Get the content type, if set
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(super::headers::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }

    /// Headers as ordered (name, value) pairs for snapshotting
    ///
    /// Non-UTF-8 header values are rendered lossily rather than dropped, so a
    /// snapshot always accounts for every header present on the wire.
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

    #[test]
    fn test_request_creation() {
        let req = Request::get("https://example.com/path").unwrap();
        assert_eq!(req.method, Method::GET);
        assert_eq!(req.host(), Some("example.com"));
    }

    #[test]
    fn test_invalid_url() {
        assert!(Request::get("not a url").is_err());
    }

    #[test]
    fn test_json_body_sets_content_type() {
        let req = Request::post("https://example.com")
            .unwrap()
            .json(&serde_json::json!({"user": "a"}))
            .unwrap();

        assert_eq!(req.content_type(), Some("application/json"));
        assert!(req.body.is_some());
    }

    #[test]
    fn test_header_pairs_complete() {
        let req = Request::get("https://example.com")
            .unwrap()
            .header("x-first", "1")
            .header("x-second", "2");

        let pairs = req.header_pairs();
        assert_eq!(pairs.len(), 2);
        assert!(pairs.contains(&("x-first".to_string(), "1".to_string())));
        assert!(pairs.contains(&("x-second".to_string(), "2".to_string())));
    }
}
