// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Per-module request filters
//!
//! A filter narrows which requests an enabled module captures. Predicates
//! combine conjunctively; an empty filter matches everything.

use regex::Regex;

use crate::error::{Error, Result};
use crate::http::Request;

/// Request filter for a capture module
#[derive(Debug, Clone, Default)]
pub struct CaptureFilter {
    url_contains: Option<String>,
    url_pattern: Option<Regex>,
    methods: Vec<String>,
}

impl CaptureFilter {
    /// Create a filter that matches every request
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture only URLs containing the given fragment (case-insensitive)
    pub fn url_contains(mut self, fragment: impl Into<String>) -> Self {
        self.url_contains = Some(fragment.into().to_lowercase());
        self
    }

    /// Capture only URLs matching the given regex
    pub fn url_matches(mut self, pattern: &str) -> Result<Self> {
        self.url_pattern =
            Some(Regex::new(pattern).map_err(|e| Error::filter(pattern, e.to_string()))?);
        Ok(self)
    }

    /// Capture only the given method (may be called repeatedly)
    pub fn method(mut self, method: impl AsRef<str>) -> Self {
        self.methods.push(method.as_ref().to_uppercase());
        self
    }

    /// Check whether a request passes the filter
    pub fn matches(&self, request: &Request) -> bool {
        if let Some(ref fragment) = self.url_contains {
            if !request.url_str().to_lowercase().contains(fragment) {
                return false;
            }
        }

        if let Some(ref pattern) = self.url_pattern {
            if !pattern.is_match(request.url_str()) {
                return false;
            }
        }

        if !self.methods.is_empty() {
            let method = request.method.as_str().to_uppercase();
            if !self.methods.contains(&method) {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get(url: &str) -> Request {
        Request::get(url).unwrap()
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let filter = CaptureFilter::new();
        assert!(filter.matches(&get("https://example.com/anything")));
    }

    #[test]
    fn test_url_contains() {
        let filter = CaptureFilter::new().url_contains("/API/");
        assert!(filter.matches(&get("https://example.com/api/users")));
        assert!(!filter.matches(&get("https://example.com/static/app.js")));
    }

    #[test]
    fn test_url_regex() {
        let filter = CaptureFilter::new().url_matches(r"/v\d+/").unwrap();
        assert!(filter.matches(&get("https://example.com/v2/users")));
        assert!(!filter.matches(&get("https://example.com/users")));
    }

    #[test]
    fn test_invalid_regex_rejected() {
        assert!(CaptureFilter::new().url_matches("[unclosed").is_err());
    }

    #[test]
    fn test_method_allow_list() {
        let filter = CaptureFilter::new().method("post").method("PUT");
        assert!(filter.matches(&Request::post("https://example.com").unwrap()));
        assert!(!filter.matches(&get("https://example.com")));
    }

    #[test]
    fn test_predicates_are_conjunctive() {
        let filter = CaptureFilter::new().url_contains("/api/").method("POST");
        assert!(!filter.matches(&get("https://example.com/api/users")));
        assert!(filter.matches(&Request::post("https://example.com/api/users").unwrap()));
    }
}
