use std::f64::consts::PI;

use super::geodesy::{Geodetic, WGS84_A, WGS84_E2};

/// WGS84 semi-major axis in kilometers (propagator output units).
pub const WGS84_A_KM: f64 = WGS84_A / 1000.0;
/// Earth gravitational parameter (km^3/s^2).
pub const EARTH_MU_KM3_S2: f64 = 398_600.441_8;

/// Inertial-frame (TEME) position in kilometers.
///
/// This is the raw output frame of SGP4-family propagators; converting it to
/// an Earth-fixed geodetic position requires the sidereal rotation angle for
/// the timestamp the vector was computed at.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TemeKm {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl TemeKm {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn from_array(p: [f64; 3]) -> Self {
        Self::new(p[0], p[1], p[2])
    }

    /// Rotate into the Earth-fixed frame and convert to geodetic.
    ///
    /// `gmst_rad` is the Greenwich mean sidereal time at the same timestamp
    /// the TEME vector was propagated for. Height comes back in meters.
    pub fn to_geodetic(self, gmst_rad: f64) -> Geodetic {
        let lon = wrap_longitude(self.y.atan2(self.x) - gmst_rad);
        let r = (self.x * self.x + self.y * self.y).sqrt();

        let mut lat = self.z.atan2(r);
        let mut c = 1.0;
        for _ in 0..20 {
            let prev = lat;
            c = 1.0 / (1.0 - WGS84_E2 * lat.sin() * lat.sin()).sqrt();
            lat = (self.z + WGS84_A_KM * c * WGS84_E2 * lat.sin()).atan2(r);
            if (lat - prev).abs() < 1e-12 {
                break;
            }
        }

        let height_km = r / lat.cos() - WGS84_A_KM * c;
        Geodetic::new(lon, lat, height_km * 1000.0)
    }
}

fn wrap_longitude(mut lon: f64) -> f64 {
    while lon < -PI {
        lon += 2.0 * PI;
    }
    while lon > PI {
        lon -= 2.0 * PI;
    }
    lon
}
