// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Capture sinks and stores
//!
//! A sink receives finalized, redacted records from the capture worker.
//! Transient mode hands records to a callback and discards them; storage
//! mode keeps them queryable per module, optionally encrypted at rest.

mod cipher;
mod file;
mod memory;
mod sink;

pub use cipher::{CaptureCipher, XorCipher};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use sink::{CallbackSink, CaptureSink};
