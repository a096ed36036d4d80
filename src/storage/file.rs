// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! File-backed capture store
//!
//! One JSONL file per module under a root directory. When the module has a
//! cipher registered, each serialized record line is encrypted and
//! base64-armored so the file stays line-oriented.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use tokio::io::AsyncWriteExt;
use tracing::warn;

use super::cipher::CaptureCipher;
use super::sink::CaptureSink;
use crate::capture::{CaptureInfo, ModuleRegistry};
use crate::error::{Error, Result};

/// Durable store writing records keyed by module
pub struct FileStore {
    root: PathBuf,
    registry: Option<Arc<ModuleRegistry>>,
}

impl FileStore {
    /// Create a store rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            registry: None,
        }
    }

    /// Attach a registry so per-module ciphers apply at rest
    pub fn with_registry(mut self, registry: Arc<ModuleRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Path of a module's record file
    pub fn module_path(&self, module: &str) -> PathBuf {
        self.root.join(module_file_name(module))
    }

    fn cipher_for(&self, module: &str) -> Option<Arc<dyn CaptureCipher>> {
        self.registry.as_ref().and_then(|r| r.cipher(module))
    }

    fn encode_line(&self, info: &CaptureInfo) -> Result<String> {
        let json = serde_json::to_vec(info)?;
        match self.cipher_for(&info.module) {
            Some(cipher) => {
                let encrypted = cipher
                    .encrypt(&json)
                    .map_err(|e| Error::cipher(format!("{} encrypt failed: {}", cipher.name(), e)))?;
                Ok(BASE64.encode(encrypted))
            }
            None => String::from_utf8(json).map_err(|e| Error::other(e.to_string())),
        }
    }

    fn decode_line(&self, module: &str, line: &str) -> Result<CaptureInfo> {
        let json = match self.cipher_for(module) {
            Some(cipher) => {
                let encrypted = BASE64
                    .decode(line.trim())
                    .map_err(|e| Error::cipher(format!("base64 decode failed: {}", e)))?;
                cipher
                    .decrypt(&encrypted)
                    .map_err(|e| Error::cipher(format!("{} decrypt failed: {}", cipher.name(), e)))?
            }
            None => line.as_bytes().to_vec(),
        };
        Ok(serde_json::from_slice(&json)?)
    }
}

#[async_trait]
impl CaptureSink for FileStore {
    async fn store(&self, info: &CaptureInfo) -> Result<()> {
        let line = self.encode_line(info)?;

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| Error::storage(&info.module, e.to_string()))?;

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.module_path(&info.module))
            .await
            .map_err(|e| Error::storage(&info.module, e.to_string()))?;

        file.write_all(line.as_bytes())
            .await
            .map_err(|e| Error::storage(&info.module, e.to_string()))?;
        file.write_all(b"\n")
            .await
            .map_err(|e| Error::storage(&info.module, e.to_string()))?;

        Ok(())
    }

    async fn module_captures(&self, module: &str) -> Result<Vec<CaptureInfo>> {
        let path = self.module_path(module);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::storage(module, e.to_string())),
        };

        let mut records = Vec::new();
        for line in content.lines().filter(|l| !l.trim().is_empty()) {
            match self.decode_line(module, line) {
                Ok(record) => records.push(record),
                Err(e) => warn!(module, error = %e, "Skipping unreadable capture record"),
            }
        }
        Ok(records)
    }
}

/// Module name mapped to a safe file name
fn module_file_name(module: &str) -> String {
    let safe: String = module
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}.jsonl", safe)
}
