use std::collections::BTreeMap;

use crate::{CacheEntry, StoreError, TtlStore};

/// In-memory store, keyed in a `BTreeMap` for stable traversal order.
///
/// Used by tests and as a non-persistent fallback when no cache directory
/// is configured.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, CacheEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TtlStore for MemoryStore {
    fn is_valid(&self, key: &str, now_ms: u64) -> bool {
        self.entries
            .get(key)
            .map(|e| e.is_valid_at(now_ms))
            .unwrap_or(false)
    }

    fn get(&self, key: &str, now_ms: u64) -> Option<serde_json::Value> {
        let entry = self.entries.get(key)?;
        if !entry.is_valid_at(now_ms) {
            return None;
        }
        Some(entry.payload.clone())
    }

    fn put(
        &mut self,
        key: &str,
        payload: serde_json::Value,
        ttl_ms: u64,
        now_ms: u64,
    ) -> Result<(), StoreError> {
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                payload,
                expiry_ms: now_ms + ttl_ms,
            },
        );
        Ok(())
    }

    fn purge_expired(&mut self, now_ms: u64) {
        self.entries.retain(|_, e| e.is_valid_at(now_ms));
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryStore;
    use crate::TtlStore;
    use serde_json::json;

    #[test]
    fn get_after_put_returns_payload() {
        let mut store = MemoryStore::new();
        store.put("launchlog_cache", json!({"rows": 3}), 1_000, 0).unwrap();
        assert_eq!(store.get("launchlog_cache", 0), Some(json!({"rows": 3})));
        assert!(store.is_valid("launchlog_cache", 0));
    }

    #[test]
    fn entry_expires_after_ttl() {
        let mut store = MemoryStore::new();
        store.put("k", json!(1), 1_000, 10_000).unwrap();

        // Valid strictly before expiry, a miss at and after it.
        assert!(store.is_valid("k", 10_999));
        assert_eq!(store.get("k", 10_999), Some(json!(1)));
        assert!(!store.is_valid("k", 11_000));
        assert!(!store.is_valid("k", 11_001));
        assert_eq!(store.get("k", 11_001), None);
    }

    #[test]
    fn absent_key_is_a_miss_not_an_error() {
        let store = MemoryStore::new();
        assert!(!store.is_valid("never-written", 0));
        assert_eq!(store.get("never-written", 0), None);
    }

    #[test]
    fn put_overwrites_existing_entry() {
        let mut store = MemoryStore::new();
        store.put("k", json!("old"), 1_000, 0).unwrap();
        store.put("k", json!("new"), 1_000, 500).unwrap();
        assert_eq!(store.get("k", 600), Some(json!("new")));
        // Expiry was recomputed from the second put.
        assert!(store.is_valid("k", 1_400));
    }

    #[test]
    fn purge_drops_only_expired_entries() {
        let mut store = MemoryStore::new();
        store.put("old", json!(1), 100, 0).unwrap();
        store.put("fresh", json!(2), 10_000, 0).unwrap();
        store.purge_expired(5_000);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("fresh", 5_000), Some(json!(2)));
    }
}
