// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Capture sink trait and the transient callback sink

use std::sync::Arc;

use async_trait::async_trait;

use crate::capture::CaptureInfo;
use crate::error::Result;

/// Destination for finalized capture records
///
/// `store` is called once per record, on the capture worker, after redaction.
/// Errors returned here are logged and suppressed by the worker; they never
/// reach the HTTP caller.
#[async_trait]
pub trait CaptureSink: Send + Sync {
    /// Persist or dispatch one record
    async fn store(&self, info: &CaptureInfo) -> Result<()>;

    /// Records captured for a module, for visualization tooling
    ///
    /// Transient sinks keep nothing and return an empty list.
    async fn module_captures(&self, _module: &str) -> Result<Vec<CaptureInfo>> {
        Ok(Vec::new())
    }
}

/// Callback invoked with each redacted record
pub type CaptureCallback = Arc<dyn Fn(&CaptureInfo) + Send + Sync>;

/// Transient sink: hands each record to a callback, keeps nothing
pub struct CallbackSink {
    callback: CaptureCallback,
}

impl CallbackSink {
    /// Create a sink around the given callback
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&CaptureInfo) + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(callback),
        }
    }
}

#[async_trait]
impl CaptureSink for CallbackSink {
    async fn store(&self, info: &CaptureInfo) -> Result<()> {
        (self.callback)(info);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::RequestSnapshot;
    use chrono::Utc;
    use parking_lot::Mutex;

    #[tokio::test]
    async fn test_callback_sees_each_record() {
        let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let seen_by_sink = Arc::clone(&seen);

        let sink = CallbackSink::new(move |info| {
            seen_by_sink.lock().push(info.id.clone());
        });

        for id in ["cap_1", "cap_2"] {
            let info = CaptureInfo::new(
                id,
                "m",
                RequestSnapshot::new("https://example.com", "GET"),
                Utc::now(),
            );
            sink.store(&info).await.unwrap();
        }

        assert_eq!(seen.lock().as_slice(), &["cap_1", "cap_2"]);
    }

    #[tokio::test]
    async fn test_callback_sink_keeps_nothing() {
        let sink = CallbackSink::new(|_| {});
        assert!(sink.module_captures("m").await.unwrap().is_empty());
    }
}
