/// Camera altitude below which object labels are drawn (meters).
pub const LABEL_ALTITUDE_THRESHOLD_M: f64 = 1.0e7;

/// Stateless per-tick predicate: labels show only at closer zoom levels.
pub fn labels_visible(camera_altitude_m: f64) -> bool {
    camera_altitude_m < LABEL_ALTITUDE_THRESHOLD_M
}

#[cfg(test)]
mod tests {
    use super::{labels_visible, LABEL_ALTITUDE_THRESHOLD_M};

    #[test]
    fn threshold_is_exclusive() {
        assert!(labels_visible(LABEL_ALTITUDE_THRESHOLD_M - 1.0));
        assert!(!labels_visible(LABEL_ALTITUDE_THRESHOLD_M));
        assert!(!labels_visible(LABEL_ALTITUDE_THRESHOLD_M + 1.0));
    }
}
