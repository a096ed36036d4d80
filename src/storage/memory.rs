// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! In-memory capture store

use async_trait::async_trait;
use dashmap::DashMap;

use super::sink::CaptureSink;
use crate::capture::CaptureInfo;
use crate::error::Result;

/// Default per-module record cap
const DEFAULT_MAX_PER_MODULE: usize = 1000;

/// Bounded in-memory store, records keyed by module
///
/// Each module keeps at most `max_per_module` records; the oldest record is
/// evicted when the cap is reached.
pub struct MemoryStore {
    records: DashMap<String, Vec<CaptureInfo>>,
    max_per_module: usize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create a store with the default per-module cap
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            max_per_module: DEFAULT_MAX_PER_MODULE,
        }
    }

    /// Set the per-module record cap
    pub fn max_per_module(mut self, max: usize) -> Self {
        self.max_per_module = max.max(1);
        self
    }

    /// Number of records held for a module
    pub fn len(&self, module: &str) -> usize {
        self.records.get(module).map(|r| r.len()).unwrap_or(0)
    }

    /// Whether the store holds no records for a module
    pub fn is_empty(&self, module: &str) -> bool {
        self.len(module) == 0
    }

    /// Drop all records for all modules
    pub fn clear(&self) {
        self.records.clear();
    }
}

#[async_trait]
impl CaptureSink for MemoryStore {
    async fn store(&self, info: &CaptureInfo) -> Result<()> {
        let mut records = self.records.entry(info.module.clone()).or_default();
        if records.len() >= self.max_per_module {
            records.remove(0);
        }
        records.push(info.clone());
        Ok(())
    }

    async fn module_captures(&self, module: &str) -> Result<Vec<CaptureInfo>> {
        Ok(self
            .records
            .get(module)
            .map(|r| r.value().clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::RequestSnapshot;
    use chrono::Utc;

    fn record(id: &str, module: &str) -> CaptureInfo {
        CaptureInfo::new(
            id,
            module,
            RequestSnapshot::new("https://example.com", "GET"),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_records_keyed_by_module() {
        let store = MemoryStore::new();
        store.store(&record("cap_1", "a")).await.unwrap();
        store.store(&record("cap_2", "b")).await.unwrap();
        store.store(&record("cap_3", "a")).await.unwrap();

        let a = store.module_captures("a").await.unwrap();
        assert_eq!(a.len(), 2);
        assert!(a.iter().all(|r| r.module == "a"));

        assert_eq!(store.len("b"), 1);
        assert!(store.module_captures("c").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_oldest_evicted_at_cap() {
        let store = MemoryStore::new().max_per_module(2);
        for id in ["cap_1", "cap_2", "cap_3"] {
            store.store(&record(id, "m")).await.unwrap();
        }

        let records = store.module_captures("m").await.unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["cap_2", "cap_3"]);
    }

    #[tokio::test]
    async fn test_clear() {
        let store = MemoryStore::new();
        store.store(&record("cap_1", "m")).await.unwrap();
        store.clear();
        assert!(store.is_empty("m"));
    }
}
