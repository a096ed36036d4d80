// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP capture core
//!
//! Wraps an [`HttpClient`](crate::http::HttpClient) and records one
//! [`CaptureInfo`] per exchange, gated by per-module configuration.
//! Persistence runs on a background worker so the request path never waits
//! on storage.

mod filter;
mod interceptor;
mod record;
mod recorder;
mod registry;

pub use filter::CaptureFilter;
pub use interceptor::{CaptureInterceptor, CaptureStats};
pub use record::{CaptureInfo, RequestSnapshot, ResponseSnapshot};
pub use recorder::{CaptureLimits, CaptureRecorder};
pub use registry::{ModuleConfig, ModuleRegistry};
