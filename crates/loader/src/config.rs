use std::env;
use std::path::PathBuf;

use catalog::GroupConfig;
use store::DEFAULT_TTL_MS;

const DEFAULT_LAUNCHLOG_URL: &str = "https://planet4589.org/space/gcat/tsv/derived/launchlog.tsv";
const DEFAULT_SITES_URL: &str = "https://planet4589.org/space/gcat/tsv/tables/sites.tsv";
const DEFAULT_STARLINK_URL: &str =
    "https://celestrak.org/NORAD/elements/gp.php?GROUP=starlink&FORMAT=tle";
const DEFAULT_BEIDOU_URL: &str =
    "https://celestrak.org/NORAD/elements/gp.php?GROUP=beidou&FORMAT=tle";

/// Dashboard configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub launch_log_url: String,
    pub sites_url: String,
    pub groups: Vec<GroupConfig>,
    /// Cache directory; `None` keeps the cache in memory only.
    pub cache_dir: Option<PathBuf>,
    pub cache_ttl_ms: u64,
}

impl DashboardConfig {
    /// Build from environment variables, with usable defaults for every
    /// value. `ORBITAL_CACHE_DIR` is the only setting without a default.
    pub fn from_env() -> Self {
        let launch_log_url =
            env::var("LAUNCHLOG_URL").unwrap_or_else(|_| DEFAULT_LAUNCHLOG_URL.to_string());
        let sites_url = env::var("SITES_URL").unwrap_or_else(|_| DEFAULT_SITES_URL.to_string());
        let starlink_url =
            env::var("STARLINK_TLE_URL").unwrap_or_else(|_| DEFAULT_STARLINK_URL.to_string());
        let beidou_url =
            env::var("BEIDOU_TLE_URL").unwrap_or_else(|_| DEFAULT_BEIDOU_URL.to_string());

        let cache_dir = env::var("ORBITAL_CACHE_DIR").ok().map(PathBuf::from);
        let cache_ttl_ms = env::var("CACHE_TTL_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TTL_MS);

        Self {
            launch_log_url,
            sites_url,
            groups: vec![
                GroupConfig::starlink(starlink_url),
                GroupConfig::beidou(beidou_url),
            ],
            cache_dir,
            cache_ttl_ms,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            launch_log_url: DEFAULT_LAUNCHLOG_URL.to_string(),
            sites_url: DEFAULT_SITES_URL.to_string(),
            groups: vec![
                GroupConfig::starlink(DEFAULT_STARLINK_URL),
                GroupConfig::beidou(DEFAULT_BEIDOU_URL),
            ],
            cache_dir: None,
            cache_ttl_ms: DEFAULT_TTL_MS,
        }
    }
}
