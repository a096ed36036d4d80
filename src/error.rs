// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for Remora
//!
//! Failures on the capture path (recording, redaction, storage) are kept
//! separate from failures of the observed HTTP exchange: the former are
//! logged and suppressed, the latter always reach the caller unchanged.

use thiserror::Error;

/// Result type alias for Remora operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Remora
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Capture filter error
    #[error("Invalid filter pattern '{pattern}': {reason}")]
    Filter { pattern: String, reason: String },

    /// Storage sink error
    #[error("Storage error for module '{module}': {reason}")]
    Storage { module: String, reason: String },

    /// Cipher error (encrypt/decrypt at rest)
    #[error("Cipher error: {0}")]
    Cipher(String),

    /// Background capture worker is no longer running
    #[error("Capture worker has stopped")]
    WorkerStopped,

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a filter error
    pub fn filter(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Filter {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    /// Create a storage error
    pub fn storage(module: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Storage {
            module: module.into(),
            reason: reason.into(),
        }
    }

    /// Create a cipher error
    pub fn cipher<S: Into<String>>(msg: S) -> Self {
        Error::Cipher(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a failure of the observed HTTP exchange
    /// (as opposed to a failure of the capture machinery)
    pub fn is_exchange_error(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Url(_))
    }

    /// Check if this is a capture-side failure that must be suppressed
    /// rather than surfaced to the HTTP caller
    pub fn is_capture_error(&self) -> bool {
        matches!(
            self,
            Error::Serialization(_)
                | Error::Storage { .. }
                | Error::Cipher(_)
                | Error::WorkerStopped
        )
    }

    /// Check if this is recoverable (can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Io(_))
    }

    /// Get the module name if this error carries one
    pub fn module(&self) -> Option<&str> {
        match self {
            Error::Storage { module, .. } => Some(module),
            _ => None,
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error() {
        let err = Error::storage("payments", "disk full");

        assert!(err.is_capture_error());
        assert!(!err.is_exchange_error());
        assert_eq!(err.module(), Some("payments"));
    }

    #[test]
    fn test_filter_error_display() {
        let err = Error::filter("[invalid", "unclosed character class");
        let msg = err.to_string();

        assert!(msg.contains("[invalid"));
        assert!(msg.contains("unclosed"));
    }

    #[test]
    fn test_capture_errors_are_not_exchange_errors() {
        for err in [
            Error::cipher("bad key"),
            Error::storage("m", "io"),
            Error::WorkerStopped,
        ] {
            assert!(err.is_capture_error());
            assert!(!err.is_exchange_error());
        }
    }
}
