// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Sensitive-field redaction
//!
//! Masks configured header and body fields before a record is persisted or
//! displayed. Runs exactly once per record, on the capture worker.

mod policy;

pub use policy::{redact, RedactionRules, MASK};
