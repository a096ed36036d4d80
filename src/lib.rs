// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # Remora - HTTP Traffic Capture & Inspection
//!
//! A pure Rust library for recording HTTP request/response exchanges without
//! altering them. Remora attaches to its own lightweight HTTP client the way
//! a remora attaches to a larger fish: it rides along, observes and records,
//! and the exchange itself is never the worse for it.
//!
//! ## Features
//!
//! - Pass-through interception: responses reach the caller byte-identical
//! - Per-module capture control: enable flag, request filter, at-rest cipher
//! - Size ceilings: oversized bodies are truncated and flagged, never dropped
//! - Redaction: authorization headers and password-style JSON fields are
//!   masked before a record is stored or displayed
//! - Off-path persistence: redaction and storage run on a background worker
//! - Sinks: transient callback, bounded in-memory store, JSONL file store
//!   with optional per-module encryption at rest
//! - Failure isolation: capture errors are logged and suppressed; HTTP
//!   errors are recorded and rethrown unchanged
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use remora::{CaptureInterceptor, HttpClient, MemoryStore, ModuleRegistry};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = Arc::new(ModuleRegistry::new());
//!     registry.set_capture("checkout", true);
//!
//!     let interceptor = CaptureInterceptor::new(
//!         HttpClient::new()?,
//!         Arc::clone(&registry),
//!         Arc::new(MemoryStore::new()),
//!     );
//!
//!     let response = interceptor.get("checkout", "https://example.com/cart").await?;
//!     println!("status: {}", response.status_code());
//!
//!     interceptor.flush().await?;
//!     for record in interceptor.module_captures("checkout").await? {
//!         println!("{} {} -> {:?}", record.request.method, record.request.url, record.status());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod capture;
pub mod error;
pub mod http;
pub mod redact;
pub mod storage;

// Re-exports for convenience

// Capture core
pub use capture::{
    CaptureFilter, CaptureInfo, CaptureInterceptor, CaptureLimits, CaptureRecorder,
    CaptureStats, ModuleConfig, ModuleRegistry, RequestSnapshot, ResponseSnapshot,
};

// Errors
pub use error::{Error, Result};

// HTTP
pub use http::{HttpClient, HttpClientConfig, Request, Response};

// Redaction
pub use redact::{redact, RedactionRules, MASK};

// Storage
pub use storage::{
    CallbackSink, CaptureCipher, CaptureSink, FileStore, MemoryStore, XorCipher,
};

/// Remora version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
