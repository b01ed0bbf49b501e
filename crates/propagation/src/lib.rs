use foundation::math::{Geodetic, TemeKm, Vec3};
use foundation::{greenwich_mean_sidereal_time, SimTime};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropagationError {
    /// The element lines could not be parsed.
    Elements(String),
    /// The lines parsed but the propagation model rejected them.
    Model(String),
}

impl std::fmt::Display for PropagationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropagationError::Elements(msg) => write!(f, "bad element lines: {msg}"),
            PropagationError::Model(msg) => write!(f, "unpropagatable elements: {msg}"),
        }
    }
}

impl std::error::Error for PropagationError {}

/// Position and velocity at one instant.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PropagatedState {
    pub geodetic: Geodetic,
    /// Inertial-frame velocity in km/s, from the same propagation call as
    /// the position.
    pub velocity_km_s: Vec3,
}

impl PropagatedState {
    pub fn speed_m_s(&self) -> f64 {
        self.velocity_km_s.length() * 1000.0
    }
}

/// Point-in-time propagation for one object.
///
/// Wraps the SGP4 model and converts its inertial output into a geodetic
/// position for the requested timestamp. Construction is fallible;
/// evaluation is total: any model failure or non-finite output at a given
/// timestamp is reported as `None`, never as an error, so one decayed or
/// numerically degenerate object cannot stall a render tick.
#[derive(Debug)]
pub struct Propagator {
    constants: sgp4::Constants,
    epoch_ms: i64,
}

impl Propagator {
    pub fn from_lines(name: &str, line1: &str, line2: &str) -> Result<Self, PropagationError> {
        let elements = sgp4::Elements::from_tle(
            Some(name.to_string()),
            line1.as_bytes(),
            line2.as_bytes(),
        )
        .map_err(|e| PropagationError::Elements(e.to_string()))?;

        let constants = sgp4::Constants::from_elements(&elements)
            .map_err(|e| PropagationError::Model(e.to_string()))?;

        Ok(Self {
            constants,
            epoch_ms: elements.datetime.and_utc().timestamp_millis(),
        })
    }

    /// Geodetic state at simulated time `t`, or `None` when the model fails
    /// or produces non-finite output for this timestamp.
    pub fn state_at(&self, t: SimTime) -> Option<PropagatedState> {
        let minutes = (t.millis() - self.epoch_ms) as f64 / 60_000.0;
        let prediction = self
            .constants
            .propagate(sgp4::MinutesSinceEpoch(minutes))
            .ok()?;

        let velocity_km_s = Vec3::new(
            prediction.velocity[0],
            prediction.velocity[1],
            prediction.velocity[2],
        );
        let geodetic =
            TemeKm::from_array(prediction.position).to_geodetic(greenwich_mean_sidereal_time(t));

        if !geodetic.is_finite() || !velocity_km_s.length().is_finite() {
            tracing::debug!("non-finite propagation output, dropping sample");
            return None;
        }

        Some(PropagatedState {
            geodetic,
            velocity_km_s,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{PropagationError, Propagator};
    use chrono::{TimeZone, Utc};
    use foundation::SimTime;

    const NAME: &str = "STARLINK-1008";
    const LINE1: &str = "1 44714U 19074B   24331.95925387  .00009614  00000+0  66297-3 0  9994";
    const LINE2: &str = "2 44714  53.0511 126.3413 0001270 109.2614 250.8513 15.06427524278423";

    fn epoch_time() -> SimTime {
        // Element epoch: day 331.95925387 of 2024.
        SimTime::from_datetime(Utc.with_ymd_and_hms(2024, 11, 26, 23, 1, 19).unwrap())
    }

    #[test]
    fn garbage_lines_are_rejected_at_construction() {
        let err = Propagator::from_lines("X", "garbage", "garbage").unwrap_err();
        assert!(matches!(err, PropagationError::Elements(_)));
    }

    #[test]
    fn state_near_epoch_is_in_the_starlink_shell() {
        let prop = Propagator::from_lines(NAME, LINE1, LINE2).unwrap();
        let state = prop.state_at(epoch_time()).unwrap();

        // ~550 km circular orbit at 53 degrees inclination.
        assert!(state.geodetic.height_m > 400_000.0 && state.geodetic.height_m < 700_000.0);
        assert!(state.geodetic.lat_rad.to_degrees().abs() <= 53.2);
        assert!(state.speed_m_s() > 7_000.0 && state.speed_m_s() < 8_000.0);
    }

    #[test]
    fn position_advances_with_simulated_time() {
        let prop = Propagator::from_lines(NAME, LINE1, LINE2).unwrap();
        let a = prop.state_at(epoch_time()).unwrap();
        let b = prop.state_at(epoch_time().offset_millis(5 * 60 * 1000)).unwrap();
        assert_ne!(a.geodetic.lat_rad, b.geodetic.lat_rad);
    }

    #[test]
    fn evaluation_before_epoch_still_yields_a_state() {
        // The simulation clock can be scrubbed backwards past the element
        // epoch; the model extrapolates rather than failing.
        let prop = Propagator::from_lines(NAME, LINE1, LINE2).unwrap();
        let state = prop.state_at(epoch_time().offset_millis(-60 * 60 * 1000));
        assert!(state.is_some());
    }
}
