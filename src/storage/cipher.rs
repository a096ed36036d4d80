// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Pluggable at-rest cipher

use crate::error::Result;

/// Cipher applied to serialized records before they hit disk
///
/// Configured per module via
/// [`ModuleRegistry::set_encryption`](crate::capture::ModuleRegistry::set_encryption).
/// Implementations must be symmetric: `decrypt(encrypt(x)) == x`.
pub trait CaptureCipher: Send + Sync {
    /// Short human-readable cipher name for logs
    fn name(&self) -> &str;

    /// Encrypt a serialized record
    fn encrypt(&self, data: &[u8]) -> Result<Vec<u8>>;

    /// Decrypt a stored record
    fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>>;
}

/// Repeating-key XOR cipher
///
/// Obfuscation only, not cryptographically secure. Useful in tests and demos;
/// deployments needing real confidentiality plug in their own
/// [`CaptureCipher`]. An empty key degrades to the identity transform.
pub struct XorCipher {
    key: Vec<u8>,
}

impl XorCipher {
    /// Create a cipher with the given key
    pub fn new(key: &[u8]) -> Self {
        Self { key: key.to_vec() }
    }

    fn apply(&self, data: &[u8]) -> Vec<u8> {
        if self.key.is_empty() {
            return data.to_vec();
        }
        data.iter()
            .zip(self.key.iter().cycle())
            .map(|(byte, key)| byte ^ key)
            .collect()
    }
}

impl CaptureCipher for XorCipher {
    fn name(&self) -> &str {
        "xor"
    }

    fn encrypt(&self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(self.apply(data))
    }

    fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(self.apply(data))
    }
}
