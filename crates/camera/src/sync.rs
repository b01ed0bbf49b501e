use foundation::math::{ecef_to_geodetic, Geodetic, EARTH_CIRCUMFERENCE};

use crate::ray::CameraRay;

/// Ceiling for the secondary view's camera distance (meters).
pub const CAMERA_MAX_ALTITUDE_M: f64 = EARTH_CIRCUMFERENCE;
/// Floor for the secondary view's camera distance (meters).
pub const CAMERA_MIN_ALTITUDE_M: f64 = EARTH_CIRCUMFERENCE / 2.0;

/// How the secondary view's distance-from-focus is chosen.
///
/// Either policy is monotonic in the primary's zoom level, which keeps the
/// dependent view free of jitter as the primary zooms.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum DistancePolicy {
    /// Hold a constant distance.
    Fixed(f64),
    /// Track the primary's camera-to-focus distance, clamped to a range.
    FollowPrimary { min_m: f64, max_m: f64 },
}

impl DistancePolicy {
    pub fn follow_default() -> Self {
        DistancePolicy::FollowPrimary {
            min_m: CAMERA_MIN_ALTITUDE_M,
            max_m: CAMERA_MAX_ALTITUDE_M,
        }
    }

    fn distance_for(&self, primary_distance_m: f64) -> f64 {
        match *self {
            DistancePolicy::Fixed(d) => d,
            DistancePolicy::FollowPrimary { min_m, max_m } => {
                primary_distance_m.clamp(min_m, max_m)
            }
        }
    }
}

/// Where the secondary view's camera should fly to.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SecondaryDestination {
    /// Surface point the view is centered on.
    pub focus: Geodetic,
    pub distance_m: f64,
}

impl SecondaryDestination {
    /// Equatorial overview at the maximum distance; used until the primary
    /// camera produces its first on-globe focus.
    pub fn overview() -> Self {
        Self {
            focus: Geodetic::new(0.0, 0.0, 0.0),
            distance_m: CAMERA_MAX_ALTITUDE_M,
        }
    }
}

/// Keeps a dependent view centered on whatever the primary view looks at.
///
/// Driven by primary camera-changed events. When the primary's look
/// direction misses the globe, the previous destination is held; the
/// secondary view never receives a degenerate focus point.
#[derive(Debug)]
pub struct ViewSynchronizer {
    policy: DistancePolicy,
    last: SecondaryDestination,
}

impl ViewSynchronizer {
    pub fn new(policy: DistancePolicy) -> Self {
        Self {
            policy,
            last: SecondaryDestination::overview(),
        }
    }

    pub fn last_destination(&self) -> SecondaryDestination {
        self.last
    }

    /// Recompute the secondary destination from the primary's camera ray.
    ///
    /// Pure in the primary state: re-running with an unchanged ray yields
    /// the same destination.
    pub fn on_primary_changed(&mut self, ray: &CameraRay) -> SecondaryDestination {
        match ray.intersect_wgs84() {
            Some(hit) => {
                let primary_distance = (ray.origin - hit).length();
                self.last = SecondaryDestination {
                    focus: ecef_to_geodetic(hit).ground_track(),
                    distance_m: self.policy.distance_for(primary_distance),
                };
            }
            None => {
                tracing::trace!("primary view ray misses the globe, holding focus");
            }
        }
        self.last
    }
}
