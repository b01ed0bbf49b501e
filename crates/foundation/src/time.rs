use chrono::{DateTime, TimeZone, Utc};

pub const MILLIS_PER_SECOND: i64 = 1_000;
pub const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
pub const MILLIS_PER_DAY: i64 = 24 * 60 * MILLIS_PER_MINUTE;

const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;
const GMST_BASE_DEG: f64 = 280.460_618_37;
const GMST_ROTATION_PER_DAY: f64 = 360.985_647_366_29;
const GMST_CORRECTION: f64 = 0.000_387_933;

/// Simulated time as milliseconds since the Unix epoch (UTC).
///
/// The simulation clock may run at a multiplier, be paused, or jump
/// backwards, so this is a plain value type with no notion of "now".
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SimTime(pub i64);

impl SimTime {
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp_millis())
    }

    pub fn to_datetime(self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.0)
            .single()
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }

    pub fn millis(self) -> i64 {
        self.0
    }

    pub fn offset_millis(self, delta: i64) -> Self {
        Self(self.0 + delta)
    }
}

/// Greenwich mean sidereal time at `t`, in radians.
pub fn greenwich_mean_sidereal_time(t: SimTime) -> f64 {
    // J2000.0 epoch: 2000-01-01T12:00:00Z.
    const J2000_MS: i64 = 946_728_000_000;

    let days_since_j2000 = (t.0 - J2000_MS) as f64 / MILLIS_PER_DAY as f64;
    let centuries = days_since_j2000 / DAYS_PER_JULIAN_CENTURY;
    let gmst_degrees = GMST_BASE_DEG
        + GMST_ROTATION_PER_DAY * days_since_j2000
        + GMST_CORRECTION * centuries * centuries
        - centuries * centuries * centuries / 38_710_000.0;

    gmst_degrees.rem_euclid(360.0).to_radians()
}
