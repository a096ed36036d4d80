// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Capture interceptor
//!
//! Sits between the caller and the HTTP client. The exchange itself is
//! forwarded untouched; recording happens off the request path on a
//! background worker (redaction, then the sink). Capture-side failures are
//! logged and suppressed, downstream failures are recorded and rethrown.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::record::{CaptureInfo, RequestSnapshot};
use super::recorder::{CaptureLimits, CaptureRecorder};
use super::registry::ModuleRegistry;
use crate::error::{Error, Result};
use crate::http::{HttpClient, Request, Response};
use crate::redact::{redact, RedactionRules};
use crate::storage::CaptureSink;

enum WorkerMessage {
    Record(CaptureInfo),
    Flush(oneshot::Sender<()>),
}

/// Counters for capture activity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaptureStats {
    /// Records handed to the worker
    pub recorded: u64,
    /// Exchanges that ran with capture skipped (disabled, unregistered,
    /// filtered out, or globally off)
    pub skipped: u64,
    /// Records the worker failed to redact-and-store
    pub store_failures: u64,
}

#[derive(Debug, Default)]
struct StatsInner {
    recorded: AtomicU64,
    skipped: AtomicU64,
    store_failures: AtomicU64,
}

/// HTTP interceptor recording exchanges per module
///
/// Wraps an [`HttpClient`]; every exchange goes through [`execute`] with the
/// module name it belongs to. The response the caller gets is byte-identical
/// to an uncaptured exchange.
///
/// [`execute`]: CaptureInterceptor::execute
pub struct CaptureInterceptor {
    client: HttpClient,
    registry: Arc<ModuleRegistry>,
    recorder: Arc<CaptureRecorder>,
    sink: Arc<dyn CaptureSink>,
    enabled: AtomicBool,
    tx: mpsc::UnboundedSender<WorkerMessage>,
    worker: JoinHandle<()>,
    stats: Arc<StatsInner>,
}

impl CaptureInterceptor {
    /// Create an interceptor with default limits and redaction rules
    pub fn new(
        client: HttpClient,
        registry: Arc<ModuleRegistry>,
        sink: Arc<dyn CaptureSink>,
    ) -> Self {
        Self::with_config(
            client,
            registry,
            sink,
            CaptureLimits::default(),
            RedactionRules::default(),
        )
    }

    /// Create an interceptor with explicit limits and redaction rules
    pub fn with_config(
        client: HttpClient,
        registry: Arc<ModuleRegistry>,
        sink: Arc<dyn CaptureSink>,
        limits: CaptureLimits,
        rules: RedactionRules,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let stats = Arc::new(StatsInner::default());
        let worker = tokio::spawn(run_worker(
            rx,
            Arc::clone(&sink),
            rules,
            Arc::clone(&stats),
        ));

        Self {
            client,
            registry,
            recorder: Arc::new(CaptureRecorder::new(limits)),
            sink,
            enabled: AtomicBool::new(true),
            tx,
            worker,
            stats,
        }
    }

    /// Execute a GET request under the given module
    pub async fn get(&self, module: &str, url: impl AsRef<str>) -> Result<Response> {
        self.execute(module, Request::get(url)?).await
    }

    /// Execute a POST request under the given module
    pub async fn post(
        &self,
        module: &str,
        url: impl AsRef<str>,
        body: impl Into<Bytes>,
    ) -> Result<Response> {
        self.execute(module, Request::post(url)?.body(body)).await
    }

    /// Execute a request, recording the exchange if the module captures it
    ///
    /// Downstream errors are recorded and returned unchanged. Recording never
    /// alters, delays past the snapshot cost, or fails the exchange.
    pub async fn execute(&self, module: &str, request: Request) -> Result<Response> {
        if !self.capture_wanted(module, &request) {
            self.stats.skipped.fetch_add(1, Ordering::Relaxed);
            return self.client.execute(request).await;
        }

        let snapshot = self.recorder.snapshot_request(&request);
        let started_at = Utc::now();
        let start = Instant::now();

        let mut guard = CancelGuard::new(
            Arc::clone(&self.recorder),
            self.tx.clone(),
            Arc::clone(&self.stats),
            module,
            snapshot.clone(),
            started_at,
        );

        let outcome = self.client.execute(request).await;
        guard.defuse();

        let duration_ms = start.elapsed().as_millis() as u64;
        let record = self
            .recorder
            .record(module, snapshot, &outcome, started_at, duration_ms);
        submit(&self.tx, &self.stats, record);

        outcome
    }

    /// Records captured for a module (storage-mode sinks only)
    pub async fn module_captures(&self, module: &str) -> Result<Vec<CaptureInfo>> {
        self.sink.module_captures(module).await
    }

    /// Globally enable or disable capture at runtime
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    /// Whether capture is globally enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// The module registry this interceptor consults
    pub fn registry(&self) -> &Arc<ModuleRegistry> {
        &self.registry
    }

    /// Snapshot of capture counters
    pub fn stats(&self) -> CaptureStats {
        CaptureStats {
            recorded: self.stats.recorded.load(Ordering::Relaxed),
            skipped: self.stats.skipped.load(Ordering::Relaxed),
            store_failures: self.stats.store_failures.load(Ordering::Relaxed),
        }
    }

    /// Wait until the worker has drained everything queued so far
    pub async fn flush(&self) -> Result<()> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.tx
            .send(WorkerMessage::Flush(ack_tx))
            .map_err(|_| Error::WorkerStopped)?;
        ack_rx.await.map_err(|_| Error::WorkerStopped)
    }

    /// Flush, then stop the background worker
    pub async fn shutdown(self) -> Result<()> {
        let _ = self.flush().await;
        drop(self.tx);
        self.worker
            .await
            .map_err(|e| Error::other(format!("capture worker join failed: {}", e)))
    }

    /// The cheap gate: global toggle, module registration + enable flag,
    /// then the module filter
    fn capture_wanted(&self, module: &str, request: &Request) -> bool {
        if !self.enabled.load(Ordering::Relaxed) {
            return false;
        }

        let Some(config) = self.registry.config(module) else {
            debug!(module, "Module not registered, capture skipped");
            return false;
        };
        if !config.enabled {
            return false;
        }

        match config.filter {
            Some(ref filter) => filter.matches(request),
            None => true,
        }
    }
}

fn submit(
    tx: &mpsc::UnboundedSender<WorkerMessage>,
    stats: &StatsInner,
    record: CaptureInfo,
) {
    stats.recorded.fetch_add(1, Ordering::Relaxed);
    if tx.send(WorkerMessage::Record(record)).is_err() {
        stats.store_failures.fetch_add(1, Ordering::Relaxed);
        warn!("Capture worker unavailable, record dropped");
    }
}

/// Emits a best-effort error-tagged record if the in-flight future is
/// dropped between request snapshot and completion
struct CancelGuard {
    armed: bool,
    recorder: Arc<CaptureRecorder>,
    tx: mpsc::UnboundedSender<WorkerMessage>,
    stats: Arc<StatsInner>,
    module: String,
    snapshot: Option<RequestSnapshot>,
    started_at: DateTime<Utc>,
}

impl CancelGuard {
    fn new(
        recorder: Arc<CaptureRecorder>,
        tx: mpsc::UnboundedSender<WorkerMessage>,
        stats: Arc<StatsInner>,
        module: &str,
        snapshot: RequestSnapshot,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            armed: true,
            recorder,
            tx,
            stats,
            module: module.to_string(),
            snapshot: Some(snapshot),
            started_at,
        }
    }

    fn defuse(&mut self) {
        self.armed = false;
    }
}

impl Drop for CancelGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Some(snapshot) = self.snapshot.take() {
            let record = self
                .recorder
                .record_cancelled(&self.module, snapshot, self.started_at);
            submit(&self.tx, &self.stats, record);
        }
    }
}

async fn run_worker(
    mut rx: mpsc::UnboundedReceiver<WorkerMessage>,
    sink: Arc<dyn CaptureSink>,
    rules: RedactionRules,
    stats: Arc<StatsInner>,
) {
    while let Some(message) = rx.recv().await {
        match message {
            WorkerMessage::Record(mut info) => {
                redact(&mut info, &rules);
                if let Err(e) = sink.store(&info).await {
                    stats.store_failures.fetch_add(1, Ordering::Relaxed);
                    warn!(module = %info.module, error = %e, "Failed to store capture record");
                }
            }
            WorkerMessage::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }
    debug!("Capture worker stopped");
}
