use super::Vec3;

/// WGS84 semi-major axis (meters).
pub const WGS84_A: f64 = 6_378_137.0;
/// WGS84 flattening.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;
/// WGS84 semi-minor axis (meters).
pub const WGS84_B: f64 = WGS84_A * (1.0 - WGS84_F);
/// WGS84 first eccentricity squared.
pub const WGS84_E2: f64 = WGS84_F * (2.0 - WGS84_F);

/// Meridional distance from the equator to a pole (meters).
pub const POLES_DISTANCE: f64 = WGS84_A * std::f64::consts::PI;
/// Equatorial circumference (meters); used as the camera altitude ceiling.
pub const EARTH_CIRCUMFERENCE: f64 = POLES_DISTANCE * 2.0;

/// Geodetic coordinates in radians and meters above the WGS84 ellipsoid.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Geodetic {
    pub lon_rad: f64,
    pub lat_rad: f64,
    pub height_m: f64,
}

impl Geodetic {
    pub fn new(lon_rad: f64, lat_rad: f64, height_m: f64) -> Self {
        Self {
            lon_rad,
            lat_rad,
            height_m,
        }
    }

    pub fn lon_deg(&self) -> f64 {
        self.lon_rad.to_degrees()
    }

    pub fn lat_deg(&self) -> f64 {
        self.lat_rad.to_degrees()
    }

    pub fn is_finite(&self) -> bool {
        self.lon_rad.is_finite() && self.lat_rad.is_finite() && self.height_m.is_finite()
    }

    /// The same surface point at zero height.
    pub fn ground_track(&self) -> Self {
        Self::new(self.lon_rad, self.lat_rad, 0.0)
    }

    pub fn to_ecef(&self) -> Vec3 {
        let sin_lat = self.lat_rad.sin();
        let cos_lat = self.lat_rad.cos();

        let n = WGS84_A / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();
        let x = (n + self.height_m) * cos_lat * self.lon_rad.cos();
        let y = (n + self.height_m) * cos_lat * self.lon_rad.sin();
        let z = (n * (1.0 - WGS84_E2) + self.height_m) * sin_lat;

        Vec3::new(x, y, z)
    }
}

/// ECEF (meters) to geodetic, iterative latitude refinement.
pub fn ecef_to_geodetic(p: Vec3) -> Geodetic {
    let lon = p.y.atan2(p.x);
    let r = (p.x * p.x + p.y * p.y).sqrt();

    let mut lat = p.z.atan2(r);
    let mut c = 1.0;
    for _ in 0..20 {
        let prev = lat;
        c = 1.0 / (1.0 - WGS84_E2 * lat.sin() * lat.sin()).sqrt();
        lat = (p.z + WGS84_A * c * WGS84_E2 * lat.sin()).atan2(r);
        if (lat - prev).abs() < 1e-12 {
            break;
        }
    }

    let height = if lat.cos().abs() > 1e-12 {
        r / lat.cos() - WGS84_A * c
    } else {
        p.z.abs() - WGS84_B
    };

    Geodetic::new(lon, lat, height)
}

#[cfg(test)]
mod tests {
    use super::{ecef_to_geodetic, Geodetic, WGS84_A};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn equator_prime_meridian() {
        let ecef = Geodetic::new(0.0, 0.0, 0.0).to_ecef();
        assert_close(ecef.x, WGS84_A, 1e-6);
        assert_close(ecef.y, 0.0, 1e-6);
        assert_close(ecef.z, 0.0, 1e-6);
    }

    #[test]
    fn round_trip_ecef_geodetic() {
        let geo = Geodetic::new(
            -std::f64::consts::FRAC_PI_3,
            std::f64::consts::FRAC_PI_6,
            550_000.0,
        );
        let rt = ecef_to_geodetic(geo.to_ecef());
        assert_close(rt.lon_rad, geo.lon_rad, 1e-9);
        assert_close(rt.lat_rad, geo.lat_rad, 1e-9);
        assert_close(rt.height_m, geo.height_m, 1e-3);
    }

    #[test]
    fn ground_track_zeroes_height() {
        let geo = Geodetic::new(0.1, 0.2, 550_000.0);
        let gt = geo.ground_track();
        assert_eq!(gt.lon_rad, geo.lon_rad);
        assert_eq!(gt.lat_rad, geo.lat_rad);
        assert_eq!(gt.height_m, 0.0);
    }
}
