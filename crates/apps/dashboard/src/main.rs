use std::env;
use std::time::Duration;

use camera::{CameraRay, DistancePolicy, ViewSynchronizer};
use chrono::{TimeZone, Utc};
use compute::{top_counts, CountBy};
use feed::{labels_visible, PositionFeed, SimClock};
use foundation::math::Geodetic;
use foundation::SimTime;
use loader::{DashboardConfig, DataLoader, HttpTextSource};
use store::{DirStore, MemoryStore, TtlStore};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Wall-clock render tick; the simulation advances 10x faster.
const TICK_MS: u64 = 1_000;

/// Altitude of the demo globe camera (meters).
const GLOBE_CAMERA_ALTITUDE_M: f64 = 15.0e6;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = DashboardConfig::from_env();
    let store = open_store(&config);
    let mut loader = DataLoader::new(store, Box::new(HttpTextSource::new()), config.cache_ttl_ms);

    let now_ms = Utc::now().timestamp_millis() as u64;
    loader.store_mut().purge_expired(now_ms);

    let launch_log = loader.load_launch_log(&config.launch_log_url, now_ms).await;
    let sites = loader.load_sites(&config.sites_url, now_ms).await;
    info!(
        launches = launch_log.len(),
        sites = sites.len(),
        "historical data loaded"
    );

    let mut feed = PositionFeed::new();
    for group in &config.groups {
        let records = loader.load_group(group, &launch_log, now_ms).await;
        info!(group = %group.id, records = records.len(), "group loaded");
        feed.add_group(group, records);
    }
    if feed.is_empty() {
        warn!("no orbital objects loaded; nothing to display");
    }

    // Simulation window: first Starlink batch through the present, replayed
    // at the default multiplier with looping.
    let start = SimTime::from_datetime(Utc.with_ymd_and_hms(2019, 11, 10, 0, 0, 0).unwrap());
    let mut clock = SimClock::new(start, SimTime(now_ms as i64));

    let mut sync = ViewSynchronizer::new(DistancePolicy::follow_default());

    let ticks: u32 = env::var("DASHBOARD_TICKS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10);
    let sample_ids: Vec<u64> = feed.ids().take(3).collect();

    for _ in 0..ticks {
        tokio::time::sleep(Duration::from_millis(TICK_MS)).await;
        clock.tick(TICK_MS as f64);
        let t = clock.current();

        let displayable = feed
            .ids()
            .filter(|id| feed.position_at(*id, t).is_some())
            .count();

        for &id in &sample_ids {
            let Some(record) = feed.record(id) else {
                continue;
            };
            match feed.position_at(id, t) {
                Some(sample) => info!(
                    name = %record.display_name,
                    lon_deg = sample.geodetic.lon_deg(),
                    lat_deg = sample.geodetic.lat_deg(),
                    alt_km = sample.geodetic.height_m / 1000.0,
                    speed_m_s = sample.speed_m_s,
                    "object"
                ),
                None => info!(name = %record.display_name, "object not displayable"),
            }
        }

        // Globe camera: nadir over whichever sampled object is up, driving
        // the map view's destination.
        if let Some(sample) = sample_ids.iter().find_map(|id| feed.position_at(*id, t)) {
            let origin = Geodetic::new(
                sample.ground_track.lon_rad,
                sample.ground_track.lat_rad,
                GLOBE_CAMERA_ALTITUDE_M,
            )
            .to_ecef();
            let dest = sync.on_primary_changed(&CameraRay::new(origin, origin.scale(-1.0)));
            info!(
                focus_lon_deg = dest.focus.lon_deg(),
                focus_lat_deg = dest.focus.lat_deg(),
                distance_km = dest.distance_m / 1000.0,
                labels = labels_visible(GLOBE_CAMERA_ALTITUDE_M),
                "map view"
            );
        }

        let top = top_counts(&launch_log, CountBy::State, t.to_datetime(), 5);
        let top: Vec<String> = top
            .iter()
            .map(|k| format!("{}:{}", k.key, k.count))
            .collect();
        info!(sim_time = %t.to_datetime(), displayable, states = ?top, "tick");
    }
}

fn open_store(config: &DashboardConfig) -> Box<dyn TtlStore> {
    match &config.cache_dir {
        Some(dir) => match DirStore::open(dir.clone()) {
            Ok(store) => {
                info!(dir = %dir.display(), "using on-disk cache");
                Box::new(store)
            }
            Err(e) => {
                error!(error = %e, "cache directory unusable, falling back to memory");
                Box::new(MemoryStore::new())
            }
        },
        None => Box::new(MemoryStore::new()),
    }
}
