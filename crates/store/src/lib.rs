pub mod dir;
pub mod memory;

pub use dir::*;
pub use memory::*;

use serde::{Deserialize, Serialize};

/// Default entry lifetime: 2 days, matching the dataset refresh cadence.
pub const DEFAULT_TTL_MS: u64 = 2 * 24 * 60 * 60 * 1000;

/// A cached payload with an absolute expiry timestamp.
///
/// An entry is valid iff `now_ms < expiry_ms`; an expired entry and a
/// missing entry are indistinguishable to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub payload: serde_json::Value,
    pub expiry_ms: u64,
}

impl CacheEntry {
    pub fn is_valid_at(&self, now_ms: u64) -> bool {
        now_ms < self.expiry_ms
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    Unavailable,
    Corrupt(String),
    Io(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Unavailable => write!(f, "cache storage unavailable"),
            StoreError::Corrupt(msg) => write!(f, "cache storage corrupt: {msg}"),
            StoreError::Io(msg) => write!(f, "cache storage error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Persistent key/value store with per-entry expiry.
///
/// Contract:
/// - `is_valid`/`get` are total: any key (including one never written)
///   yields a negative result rather than an error.
/// - `put` is an idempotent upsert computing `expiry = now + ttl`.
/// - A disappeared entry (storage eviction, file removed out-of-band) is a
///   normal cache miss, never an error.
/// - Replacement is atomic: a reader racing a `put` on the same key sees
///   either the old or the new payload, never a torn one.
pub trait TtlStore {
    fn is_valid(&self, key: &str, now_ms: u64) -> bool;

    fn get(&self, key: &str, now_ms: u64) -> Option<serde_json::Value>;

    fn put(
        &mut self,
        key: &str,
        payload: serde_json::Value,
        ttl_ms: u64,
        now_ms: u64,
    ) -> Result<(), StoreError>;

    /// Drop entries that are already expired at `now_ms`. Housekeeping only;
    /// correctness never depends on it being called.
    fn purge_expired(&mut self, now_ms: u64);
}

impl<T: TtlStore + ?Sized> TtlStore for Box<T> {
    fn is_valid(&self, key: &str, now_ms: u64) -> bool {
        (**self).is_valid(key, now_ms)
    }

    fn get(&self, key: &str, now_ms: u64) -> Option<serde_json::Value> {
        (**self).get(key, now_ms)
    }

    fn put(
        &mut self,
        key: &str,
        payload: serde_json::Value,
        ttl_ms: u64,
        now_ms: u64,
    ) -> Result<(), StoreError> {
        (**self).put(key, payload, ttl_ms, now_ms)
    }

    fn purge_expired(&mut self, now_ms: u64) {
        (**self).purge_expired(now_ms)
    }
}
