use foundation::math::{Vec3, WGS84_A, WGS84_B};

/// A camera's position and look direction in ECEF meters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraRay {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl CameraRay {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// First intersection of the ray with the WGS84 ellipsoid, or `None`
    /// when the ray misses the globe or points away from it.
    ///
    /// The quadratic is solved in a frame where the ellipsoid is the unit
    /// sphere (coordinates scaled by the semi-axes), which keeps the
    /// discriminant well-conditioned at orbital distances.
    pub fn intersect_wgs84(&self) -> Option<Vec3> {
        let direction = self.direction.normalized()?;

        let q = Vec3::new(
            self.origin.x / WGS84_A,
            self.origin.y / WGS84_A,
            self.origin.z / WGS84_B,
        );
        let w = Vec3::new(
            direction.x / WGS84_A,
            direction.y / WGS84_A,
            direction.z / WGS84_B,
        );

        let a = w.dot(w);
        let b = 2.0 * q.dot(w);
        let c = q.dot(q) - 1.0;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_d = discriminant.sqrt();
        // Nearer root first; an intersection behind the camera is a miss.
        let t = if (-b - sqrt_d) / (2.0 * a) >= 0.0 {
            (-b - sqrt_d) / (2.0 * a)
        } else if (-b + sqrt_d) / (2.0 * a) >= 0.0 {
            (-b + sqrt_d) / (2.0 * a)
        } else {
            return None;
        };

        Some(self.origin + direction.scale(t))
    }
}
