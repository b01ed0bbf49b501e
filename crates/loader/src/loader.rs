use catalog::{parse_group, parse_launch_log, parse_sites};
use catalog::{GroupConfig, LaunchRecord, ObjectRecord, SiteRecord};
use store::TtlStore;

use crate::source::TextSource;

pub const LAUNCHLOG_CACHE_KEY: &str = "launchlog_cache";
pub const SITES_CACHE_KEY: &str = "site_cache";

/// Cache-first dataset loader.
///
/// Every dataset follows the same shape: serve a valid cache entry if one
/// exists, otherwise fetch, normalize, and write the normalized records
/// back. A fetch failure degrades that dataset to empty with an error log;
/// the rest of the dashboard keeps running on whatever did load.
pub struct DataLoader<S: TtlStore> {
    store: S,
    source: Box<dyn TextSource>,
    ttl_ms: u64,
}

impl<S: TtlStore> DataLoader<S> {
    pub fn new(store: S, source: Box<dyn TextSource>, ttl_ms: u64) -> Self {
        Self {
            store,
            source,
            ttl_ms,
        }
    }

    pub async fn load_launch_log(&mut self, url: &str, now_ms: u64) -> Vec<LaunchRecord> {
        if let Some(records) = self.cached(LAUNCHLOG_CACHE_KEY, now_ms) {
            tracing::info!(records = records.len(), "launch log served from cache");
            return records;
        }

        match self.source.fetch_text(url).await {
            Ok(text) => {
                let records = parse_launch_log(&text);
                tracing::info!(records = records.len(), "launch log fetched");
                self.write_back(LAUNCHLOG_CACHE_KEY, &records, now_ms);
                records
            }
            Err(e) => {
                tracing::error!(url, error = %e, "launch log fetch failed, continuing without");
                Vec::new()
            }
        }
    }

    pub async fn load_sites(&mut self, url: &str, now_ms: u64) -> Vec<SiteRecord> {
        if let Some(sites) = self.cached(SITES_CACHE_KEY, now_ms) {
            tracing::info!(sites = sites.len(), "site table served from cache");
            return sites;
        }

        match self.source.fetch_text(url).await {
            Ok(text) => {
                let sites = parse_sites(&text);
                tracing::info!(sites = sites.len(), "site table fetched");
                self.write_back(SITES_CACHE_KEY, &sites, now_ms);
                sites
            }
            Err(e) => {
                tracing::error!(url, error = %e, "site table fetch failed, continuing without");
                Vec::new()
            }
        }
    }

    /// Load one group's element feed. The launch log must already be loaded
    /// so the provenance join can run at parse time; cached payloads carry
    /// the joined records, so a cache hit skips the join as well.
    pub async fn load_group(
        &mut self,
        group: &GroupConfig,
        launch_log: &[LaunchRecord],
        now_ms: u64,
    ) -> Vec<ObjectRecord> {
        if let Some(records) = self.cached(&group.cache_key, now_ms) {
            tracing::info!(group = %group.id, records = records.len(), "elements served from cache");
            return records;
        }

        match self.source.fetch_text(&group.url).await {
            Ok(text) => {
                let parsed = parse_group(&text, group, launch_log);
                self.write_back(&group.cache_key, &parsed.records, now_ms);
                parsed.records
            }
            Err(e) => {
                tracing::error!(group = %group.id, url = %group.url, error = %e, "element fetch failed, group empty");
                Vec::new()
            }
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    fn cached<T: serde::de::DeserializeOwned>(&self, key: &str, now_ms: u64) -> Option<Vec<T>> {
        let payload = self.store.get(key, now_ms)?;
        match serde_json::from_value(payload) {
            Ok(records) => Some(records),
            Err(e) => {
                // A payload from an older schema revision; refetch.
                tracing::warn!(key, error = %e, "unusable cache payload, refetching");
                None
            }
        }
    }

    fn write_back<T: serde::Serialize>(&mut self, key: &str, records: &[T], now_ms: u64) {
        let payload = match serde_json::to_value(records) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(key, error = %e, "failed to serialize cache payload");
                return;
            }
        };
        if let Err(e) = self.store.put(key, payload, self.ttl_ms, now_ms) {
            tracing::error!(key, error = %e, "cache write failed, serving uncached");
        }
    }
}
