// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Module registration
//!
//! Capture behavior is configured per module (a logical grouping key such as
//! an app feature area). The registry maps module name to that module's
//! enable flag, request filter and at-rest cipher. It is an explicit value
//! passed to whoever needs it, not process-global state, and is read-mostly:
//! a read-write lock with cheap snapshot clones on the read path.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use super::filter::CaptureFilter;
use crate::storage::CaptureCipher;

/// Capture configuration for one module
#[derive(Clone, Default)]
pub struct ModuleConfig {
    /// Whether capture is on for this module
    pub enabled: bool,
    /// Optional request filter
    pub filter: Option<CaptureFilter>,
    /// Optional at-rest cipher
    pub cipher: Option<Arc<dyn CaptureCipher>>,
}

impl fmt::Debug for ModuleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleConfig")
            .field("enabled", &self.enabled)
            .field("filter", &self.filter)
            .field("cipher", &self.cipher.as_ref().map(|c| c.name()))
            .finish()
    }
}

/// Module name to capture configuration mapping
#[derive(Default)]
pub struct ModuleRegistry {
    modules: RwLock<HashMap<String, ModuleConfig>>,
}

impl ModuleRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable capture for a module, registering it if new
    pub fn set_capture(&self, module: impl Into<String>, enabled: bool) {
        self.modules.write().entry(module.into()).or_default().enabled = enabled;
    }

    /// Set the request filter for a module, registering it (disabled) if new
    pub fn set_filter(&self, module: impl Into<String>, filter: CaptureFilter) {
        self.modules.write().entry(module.into()).or_default().filter = Some(filter);
    }

    /// Set the at-rest cipher for a module, registering it (disabled) if new
    pub fn set_encryption(&self, module: impl Into<String>, cipher: Arc<dyn CaptureCipher>) {
        self.modules.write().entry(module.into()).or_default().cipher = Some(cipher);
    }

    /// Snapshot of a module's configuration
    ///
    /// `None` means the module was never registered; callers treat that as
    /// "capture skipped", not as an error.
    pub fn config(&self, module: &str) -> Option<ModuleConfig> {
        self.modules.read().get(module).cloned()
    }

    /// Whether capture is on for a module (false when unregistered)
    pub fn is_enabled(&self, module: &str) -> bool {
        self.modules
            .read()
            .get(module)
            .map(|c| c.enabled)
            .unwrap_or(false)
    }

    /// The cipher configured for a module, if any
    pub fn cipher(&self, module: &str) -> Option<Arc<dyn CaptureCipher>> {
        self.modules.read().get(module).and_then(|c| c.cipher.clone())
    }

    /// Names of all registered modules
    pub fn modules(&self) -> Vec<String> {
        let mut names: Vec<String> = self.modules.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Drop a module's registration entirely
    pub fn remove(&self, module: &str) {
        self.modules.write().remove(module);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::XorCipher;

    #[test]
    fn test_unregistered_module() {
        let registry = ModuleRegistry::new();
        assert!(registry.config("ghost").is_none());
        assert!(!registry.is_enabled("ghost"));
    }

    #[test]
    fn test_set_capture_registers_and_toggles() {
        let registry = ModuleRegistry::new();

        registry.set_capture("payments", true);
        assert!(registry.is_enabled("payments"));

        registry.set_capture("payments", false);
        assert!(!registry.is_enabled("payments"));
        assert!(registry.config("payments").is_some());
    }

    #[test]
    fn test_set_filter_registers_disabled() {
        let registry = ModuleRegistry::new();
        registry.set_filter("search", CaptureFilter::new().url_contains("/api/"));

        let config = registry.config("search").unwrap();
        assert!(!config.enabled);
        assert!(config.filter.is_some());
    }

    #[test]
    fn test_modules_are_independent() {
        let registry = ModuleRegistry::new();
        registry.set_capture("a", true);
        registry.set_capture("b", false);
        registry.set_encryption("b", Arc::new(XorCipher::new(b"k")));

        assert!(registry.is_enabled("a"));
        assert!(registry.cipher("a").is_none());
        assert!(registry.cipher("b").is_some());
        assert_eq!(registry.modules(), vec!["a".to_string(), "b".to_string()]);
    }
}
