use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use foundation::math::EARTH_MU_KM3_S2;

const SECONDS_PER_DAY: f64 = 86_400.0;
const EARTH_RADIUS_KM: f64 = 6_378.137;

/// Orbit regime derived from semi-major axis and inclination.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrbitClass {
    Leo,
    Meo,
    Geo,
    Heo,
    SunSync,
    Unknown,
}

/// Classify an orbit from its mean motion (revolutions per day) and
/// inclination (degrees).
///
/// Altitude bands: LEO below 2,000 km, MEO to 30,000 km, GEO to 36,000 km,
/// HEO above. Sun-synchronous overrides LEO when inclination sits in the
/// 97..=102 degree band.
pub fn classify_orbit(mean_motion_rev_per_day: f64, inclination_deg: f64) -> OrbitClass {
    if !mean_motion_rev_per_day.is_finite() || mean_motion_rev_per_day <= 0.0 {
        return OrbitClass::Unknown;
    }

    let n_rad_per_s = mean_motion_rev_per_day * std::f64::consts::TAU / SECONDS_PER_DAY;
    let semi_major_km = (EARTH_MU_KM3_S2 / (n_rad_per_s * n_rad_per_s)).cbrt();
    let altitude_km = semi_major_km - EARTH_RADIUS_KM;

    if altitude_km < 2_000.0 {
        if (97.0..=102.0).contains(&inclination_deg) {
            OrbitClass::SunSync
        } else {
            OrbitClass::Leo
        }
    } else if altitude_km < 30_000.0 {
        OrbitClass::Meo
    } else if altitude_km < 36_000.0 {
        OrbitClass::Geo
    } else {
        OrbitClass::Heo
    }
}

/// Canonical per-object record produced by the element parser.
///
/// The raw element lines are kept verbatim so the record can round-trip
/// through the cache and be rehydrated into a propagator without having to
/// serialize the propagation library's internal state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectRecord {
    /// NORAD catalog number, unique within a loaded batch.
    pub id: u64,
    pub display_name: String,
    pub line1: String,
    pub line2: String,
    /// Unresolved when no launch-log row matched; propagation does not
    /// need provenance, so the record is kept either way.
    pub launch_date: Option<DateTime<Utc>>,
    pub launch_state: Option<String>,
    pub orbit_class: OrbitClass,
    pub group_id: String,
}

#[cfg(test)]
mod tests {
    use super::{classify_orbit, OrbitClass};

    #[test]
    fn starlink_shell_is_leo() {
        // ~550 km circular shell at 53 degrees.
        assert_eq!(classify_orbit(15.064_275_24, 53.051_1), OrbitClass::Leo);
    }

    #[test]
    fn sun_sync_overrides_leo_band() {
        // Typical SSO: ~800 km, 98.6 degrees.
        assert_eq!(classify_orbit(14.57, 98.6), OrbitClass::SunSync);
        // Same inclination outside the LEO band stays MEO.
        assert_eq!(classify_orbit(2.0, 98.6), OrbitClass::Meo);
    }

    #[test]
    fn geo_band() {
        // Geostationary: one revolution per sidereal day, ~35,786 km.
        assert_eq!(classify_orbit(1.002_737_9, 0.1), OrbitClass::Geo);
    }

    #[test]
    fn beidou_meo_shell() {
        // BeiDou MEO: ~21,500 km, 55 degrees, ~12.9 h period.
        assert_eq!(classify_orbit(1.862, 55.0), OrbitClass::Meo);
    }

    #[test]
    fn degenerate_mean_motion_is_unknown() {
        assert_eq!(classify_orbit(0.0, 53.0), OrbitClass::Unknown);
        assert_eq!(classify_orbit(f64::NAN, 53.0), OrbitClass::Unknown);
    }
}
