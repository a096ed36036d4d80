// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Capture recorder
//!
//! Turns completed exchanges into [`CaptureInfo`] records. Size ceilings are
//! applied here: oversized bodies are truncated and flagged, never rejected.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};

use super::record::{CaptureInfo, RequestSnapshot, ResponseSnapshot};
use crate::http::{Request, Response};

/// Error tag used for records emitted when the in-flight future was dropped
pub(crate) const CANCELLED_ERROR: &str = "request cancelled before completion";

/// Size ceilings for captured data
#[derive(Debug, Clone, Copy)]
pub struct CaptureLimits {
    /// Maximum captured body size in bytes (request and response each)
    pub max_body_bytes: usize,
    /// Maximum captured header value size in bytes
    pub max_header_value_bytes: usize,
}

impl Default for CaptureLimits {
    fn default() -> Self {
        Self {
            max_body_bytes: 64 * 1024,
            max_header_value_bytes: 4 * 1024,
        }
    }
}

/// Builds capture records from observed exchanges
///
/// Deterministic apart from record ids, which come from a monotonic counter.
#[derive(Debug, Default)]
pub struct CaptureRecorder {
    limits: CaptureLimits,
    counter: AtomicU64,
}

impl CaptureRecorder {
    /// Create a recorder with the given ceilings
    pub fn new(limits: CaptureLimits) -> Self {
        Self {
            limits,
            counter: AtomicU64::new(0),
        }
    }

    /// The configured ceilings
    pub fn limits(&self) -> CaptureLimits {
        self.limits
    }

    /// Snapshot the request phase, ceilings applied
    pub fn snapshot_request(&self, request: &Request) -> RequestSnapshot {
        let (body, truncated) = match request.body {
            Some(ref bytes) => {
                let (text, truncated) = bounded_text(bytes, self.limits.max_body_bytes);
                (Some(text), truncated)
            }
            None => (None, false),
        };

        RequestSnapshot {
            url: request.url_str().to_string(),
            method: request.method.to_string(),
            headers: self.bounded_headers(request.header_pairs()),
            body,
            body_truncated: truncated,
            content_type: request.content_type().map(String::from),
        }
    }

    /// Snapshot the response phase, ceilings applied
    pub fn snapshot_response(&self, response: &Response) -> ResponseSnapshot {
        let (body, truncated) = if response.body.is_empty() {
            (None, false)
        } else {
            let (text, truncated) = bounded_text(&response.body, self.limits.max_body_bytes);
            (Some(text), truncated)
        };

        ResponseSnapshot {
            status: response.status_code(),
            status_text: response.status_text().to_string(),
            headers: self.bounded_headers(response.header_pairs()),
            body,
            body_truncated: truncated,
            content_type: response.content_type().map(String::from),
            content_length: response.content_length(),
        }
    }

    /// Finalize a record from the exchange outcome
    ///
    /// Exactly one record comes out of each call; the caller guarantees one
    /// call per exchange.
    pub fn record(
        &self,
        module: &str,
        request: RequestSnapshot,
        outcome: &crate::error::Result<Response>,
        started_at: DateTime<Utc>,
        duration_ms: u64,
    ) -> CaptureInfo {
        let record = CaptureInfo::new(self.next_id(), module, request, started_at)
            .completed(Utc::now(), duration_ms);

        match outcome {
            Ok(response) => record.with_response(self.snapshot_response(response)),
            Err(error) => record.with_error(error.to_string()),
        }
    }

    /// Best-effort record for an exchange whose future was dropped mid-flight
    pub fn record_cancelled(
        &self,
        module: &str,
        request: RequestSnapshot,
        started_at: DateTime<Utc>,
    ) -> CaptureInfo {
        let duration_ms = (Utc::now() - started_at).num_milliseconds().max(0) as u64;
        CaptureInfo::new(self.next_id(), module, request, started_at)
            .completed(Utc::now(), duration_ms)
            .with_error(CANCELLED_ERROR)
    }

    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("cap_{}", n)
    }

    fn bounded_headers(&self, mut headers: Vec<(String, String)>) -> Vec<(String, String)> {
        for (_, value) in headers.iter_mut() {
            truncate_utf8(value, self.limits.max_header_value_bytes);
        }
        headers
    }
}

/// Lossy text of at most `limit` bytes, with a truncation flag
fn bounded_text(bytes: &[u8], limit: usize) -> (String, bool) {
    if bytes.len() <= limit {
        (String::from_utf8_lossy(bytes).into_owned(), false)
    } else {
        (String::from_utf8_lossy(&bytes[..limit]).into_owned(), true)
    }
}

/// Truncate a string to at most `limit` bytes on a character boundary
fn truncate_utf8(s: &mut String, limit: usize) {
    if s.len() > limit {
        let mut end = limit;
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        s.truncate(end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder_with_body_limit(limit: usize) -> CaptureRecorder {
        CaptureRecorder::new(CaptureLimits {
            max_body_bytes: limit,
            ..Default::default()
        })
    }

    #[test]
    fn test_body_within_ceiling_not_truncated() {
        let recorder = recorder_with_body_limit(16);
        let request = Request::post("https://example.com")
            .unwrap()
            .body("short body");

        let snapshot = recorder.snapshot_request(&request);
        assert_eq!(snapshot.body.as_deref(), Some("short body"));
        assert!(!snapshot.body_truncated);
    }

    #[test]
    fn test_oversized_body_truncated_and_flagged() {
        let recorder = recorder_with_body_limit(8);
        let request = Request::post("https://example.com")
            .unwrap()
            .body("0123456789abcdef");

        let snapshot = recorder.snapshot_request(&request);
        assert_eq!(snapshot.body.as_deref(), Some("01234567"));
        assert!(snapshot.body_truncated);
    }

    #[test]
    fn test_header_value_ceiling() {
        let recorder = CaptureRecorder::new(CaptureLimits {
            max_header_value_bytes: 4,
            ..Default::default()
        });
        let request = Request::get("https://example.com")
            .unwrap()
            .header("x-long", "abcdefgh");

        let snapshot = recorder.snapshot_request(&request);
        let value = snapshot
            .headers
            .iter()
            .find(|(n, _)| n == "x-long")
            .map(|(_, v)| v.as_str());
        assert_eq!(value, Some("abcd"));
    }

    #[test]
    fn test_truncate_utf8_respects_char_boundary() {
        let mut s = "aé".to_string(); // 'é' is 2 bytes starting at index 1
        truncate_utf8(&mut s, 2);
        assert_eq!(s, "a");
    }

    #[test]
    fn test_cancelled_record_is_error_tagged() {
        let recorder = CaptureRecorder::default();
        let snapshot = RequestSnapshot::new("https://example.com", "GET");

        let record = recorder.record_cancelled("checkout", snapshot, Utc::now());
        assert!(record.is_failure());
        assert_eq!(record.error.as_deref(), Some(CANCELLED_ERROR));
        assert!(record.response.is_none());
    }

    #[test]
    fn test_ids_are_unique() {
        let recorder = CaptureRecorder::default();
        let a = recorder.record_cancelled("m", RequestSnapshot::new("u", "GET"), Utc::now());
        let b = recorder.record_cancelled("m", RequestSnapshot::new("u", "GET"), Utc::now());
        assert_ne!(a.id, b.id);
    }
}
