use std::fs;
use std::path::{Path, PathBuf};

use crate::{CacheEntry, StoreError, TtlStore};

/// Directory-backed store: one JSON file per key, so entries survive
/// process restarts.
///
/// Writes go through a temp file followed by a rename, which is atomic on
/// the filesystems we care about; a reader racing a writer sees either the
/// old or the new file. Unreadable or corrupt files are treated as misses
/// (storage may evict or truncate entries out-of-band).
#[derive(Debug)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| StoreError::Io(e.to_string()))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", sanitize_key(key)))
    }

    fn load_entry(&self, key: &str) -> Option<CacheEntry> {
        let raw = fs::read_to_string(self.entry_path(key)).ok()?;
        serde_json::from_str(&raw).ok()
    }
}

/// Keys are logical dataset names (`starlink_tle_cache`, `launchlog_cache`);
/// anything outside a conservative charset is mapped to `_` so a key can
/// never escape the store directory.
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

impl TtlStore for DirStore {
    fn is_valid(&self, key: &str, now_ms: u64) -> bool {
        self.load_entry(key)
            .map(|e| e.is_valid_at(now_ms))
            .unwrap_or(false)
    }

    fn get(&self, key: &str, now_ms: u64) -> Option<serde_json::Value> {
        let entry = self.load_entry(key)?;
        if !entry.is_valid_at(now_ms) {
            return None;
        }
        Some(entry.payload)
    }

    fn put(
        &mut self,
        key: &str,
        payload: serde_json::Value,
        ttl_ms: u64,
        now_ms: u64,
    ) -> Result<(), StoreError> {
        let entry = CacheEntry {
            payload,
            expiry_ms: now_ms + ttl_ms,
        };
        let text = serde_json::to_string(&entry).map_err(|e| StoreError::Io(e.to_string()))?;

        let path = self.entry_path(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, text).map_err(|e| StoreError::Io(e.to_string()))?;
        fs::rename(&tmp, &path).map_err(|e| StoreError::Io(e.to_string()))?;
        Ok(())
    }

    fn purge_expired(&mut self, now_ms: u64) {
        let Ok(dir) = fs::read_dir(&self.root) else {
            return;
        };
        for file in dir.flatten() {
            let path = file.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let expired = fs::read_to_string(&path)
                .ok()
                .and_then(|raw| serde_json::from_str::<CacheEntry>(&raw).ok())
                .map(|e| !e.is_valid_at(now_ms))
                // Unreadable entries are dead weight; drop them too.
                .unwrap_or(true);
            if expired {
                let _ = fs::remove_file(&path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{sanitize_key, DirStore};
    use crate::TtlStore;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = DirStore::open(dir.path()).unwrap();
            store
                .put("starlink_tle_cache", json!(["r1", "r2"]), 10_000, 0)
                .unwrap();
        }

        let store = DirStore::open(dir.path()).unwrap();
        assert_eq!(
            store.get("starlink_tle_cache", 5_000),
            Some(json!(["r1", "r2"]))
        );
    }

    #[test]
    fn expired_entry_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = DirStore::open(dir.path()).unwrap();
        store.put("k", json!(1), 1_000, 0).unwrap();
        assert!(store.is_valid("k", 999));
        assert!(!store.is_valid("k", 1_001));
        assert_eq!(store.get("k", 1_001), None);
    }

    #[test]
    fn vanished_file_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = DirStore::open(dir.path()).unwrap();
        store.put("k", json!(1), 10_000, 0).unwrap();
        std::fs::remove_file(dir.path().join("k.json")).unwrap();
        assert_eq!(store.get("k", 0), None);
        assert!(!store.is_valid("k", 0));
    }

    #[test]
    fn corrupt_file_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = DirStore::open(dir.path()).unwrap();
        store.put("k", json!(1), 10_000, 0).unwrap();
        std::fs::write(dir.path().join("k.json"), "{not json").unwrap();
        assert_eq!(store.get("k", 0), None);
    }

    #[test]
    fn purge_removes_expired_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = DirStore::open(dir.path()).unwrap();
        store.put("old", json!(1), 100, 0).unwrap();
        store.put("fresh", json!(2), 100_000, 0).unwrap();
        store.purge_expired(50_000);
        assert_eq!(store.get("old", 0), None);
        assert_eq!(store.get("fresh", 50_000), Some(json!(2)));
    }

    #[test]
    fn keys_cannot_escape_the_store_directory() {
        assert_eq!(sanitize_key("../../etc/passwd"), "______etc_passwd");
        assert_eq!(sanitize_key("beidou_tle_cache"), "beidou_tle_cache");
    }
}
