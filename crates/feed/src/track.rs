use std::collections::BTreeMap;

use catalog::{GroupConfig, ObjectRecord};
use foundation::math::Geodetic;
use foundation::SimTime;
use propagation::Propagator;

/// Display state of a tracked object at some simulated instant.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TrackState {
    /// Simulated time precedes the object's resolved launch date.
    PreLaunch,
    /// Eligible for propagation and display.
    Active,
    /// The object's group is deselected.
    Hidden,
}

/// One render-tick sample for one object.
///
/// All three fields come from a single propagation call, so the position,
/// its ground track, and the speed are mutually consistent.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TickSample {
    pub geodetic: Geodetic,
    pub ground_track: Geodetic,
    pub speed_m_s: f64,
}

#[derive(Debug)]
struct TrackedObject {
    record: ObjectRecord,
    propagator: Propagator,
}

/// Pull-based position source for the render loop.
///
/// The renderer asks `position_at(id, t)` once per object per tick; the
/// answer is `None` whenever the object should not be drawn, whether that
/// is a state (pre-launch, hidden group) or a transient propagation
/// failure at this particular timestamp.
#[derive(Debug, Default)]
pub struct PositionFeed {
    objects: BTreeMap<u64, TrackedObject>,
    group_selected: BTreeMap<String, bool>,
}

impl PositionFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a group's parsed records. Records whose element lines no
    /// longer rehydrate into a propagation model are dropped with a warning;
    /// the parser validated them at ingest, so this only fires on a stale or
    /// tampered cache payload.
    pub fn add_group(&mut self, group: &GroupConfig, records: Vec<ObjectRecord>) {
        self.group_selected.insert(group.id.clone(), group.selected);
        for record in records {
            match Propagator::from_lines(&record.display_name, &record.line1, &record.line2) {
                Ok(propagator) => {
                    self.objects
                        .insert(record.id, TrackedObject { record, propagator });
                }
                Err(e) => {
                    tracing::warn!(
                        id = record.id,
                        name = %record.display_name,
                        error = %e,
                        "dropping record that no longer propagates"
                    );
                }
            }
        }
    }

    pub fn set_group_selected(&mut self, group_id: &str, selected: bool) {
        if let Some(flag) = self.group_selected.get_mut(group_id) {
            *flag = selected;
        }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Stable iteration order: ascending catalog number.
    pub fn ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.objects.keys().copied()
    }

    pub fn record(&self, id: u64) -> Option<&ObjectRecord> {
        self.objects.get(&id).map(|o| &o.record)
    }

    /// Display state for `id` at simulated time `t`; `None` for unknown ids.
    pub fn state_at(&self, id: u64, t: SimTime) -> Option<TrackState> {
        let object = self.objects.get(&id)?;
        let selected = self
            .group_selected
            .get(&object.record.group_id)
            .copied()
            .unwrap_or(true);
        if !selected {
            return Some(TrackState::Hidden);
        }
        // Unresolved launch dates never gate display.
        match object.record.launch_date {
            Some(launch) if t.millis() < launch.timestamp_millis() => Some(TrackState::PreLaunch),
            _ => Some(TrackState::Active),
        }
    }

    /// Position sample for `id` at simulated time `t`, or `None` when the
    /// object is not currently displayable.
    pub fn position_at(&self, id: u64, t: SimTime) -> Option<TickSample> {
        if self.state_at(id, t)? != TrackState::Active {
            return None;
        }
        let state = self.objects[&id].propagator.state_at(t)?;
        Some(TickSample {
            geodetic: state.geodetic,
            ground_track: state.geodetic.ground_track(),
            speed_m_s: state.speed_m_s(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{PositionFeed, TrackState};
    use catalog::{GroupConfig, ObjectRecord, OrbitClass};
    use chrono::{TimeZone, Utc};
    use foundation::SimTime;

    const LINE1: &str = "1 44714U 19074B   24331.95925387  .00009614  00000+0  66297-3 0  9994";
    const LINE2: &str = "2 44714  53.0511 126.3413 0001270 109.2614 250.8513 15.06427524278423";

    fn launch_millis() -> i64 {
        Utc.with_ymd_and_hms(2019, 11, 11, 14, 56, 0)
            .unwrap()
            .timestamp_millis()
    }

    fn record(launch_resolved: bool) -> ObjectRecord {
        ObjectRecord {
            id: 44714,
            display_name: "STARLINK-1008".to_string(),
            line1: LINE1.to_string(),
            line2: LINE2.to_string(),
            launch_date: launch_resolved
                .then(|| Utc.with_ymd_and_hms(2019, 11, 11, 14, 56, 0).unwrap()),
            launch_state: launch_resolved.then(|| "US".to_string()),
            orbit_class: OrbitClass::Leo,
            group_id: "starlink".to_string(),
        }
    }

    fn feed(launch_resolved: bool) -> PositionFeed {
        let mut feed = PositionFeed::new();
        feed.add_group(&GroupConfig::starlink("unused"), vec![record(launch_resolved)]);
        feed
    }

    #[test]
    fn active_object_emits_consistent_samples() {
        let feed = feed(true);
        let t = SimTime(launch_millis() + 24 * 60 * 60 * 1000);
        let sample = feed.position_at(44714, t).unwrap();
        assert_eq!(sample.ground_track.lon_rad, sample.geodetic.lon_rad);
        assert_eq!(sample.ground_track.lat_rad, sample.geodetic.lat_rad);
        assert_eq!(sample.ground_track.height_m, 0.0);
        assert!(sample.speed_m_s > 0.0);
    }

    #[test]
    fn strictly_before_launch_is_pre_launch() {
        let feed = feed(true);
        let before = SimTime(launch_millis() - 1);
        assert_eq!(feed.state_at(44714, before), Some(TrackState::PreLaunch));
        assert!(feed.position_at(44714, before).is_none());

        // At the launch instant the object becomes active.
        let at = SimTime(launch_millis());
        assert_eq!(feed.state_at(44714, at), Some(TrackState::Active));
        assert!(feed.position_at(44714, at).is_some());
    }

    #[test]
    fn unresolved_launch_date_is_always_active() {
        let feed = feed(false);
        let long_before = SimTime(launch_millis() - 365 * 24 * 60 * 60 * 1000);
        assert_eq!(feed.state_at(44714, long_before), Some(TrackState::Active));
        assert!(feed.position_at(44714, long_before).is_some());
    }

    #[test]
    fn deselected_group_hides_every_object_at_every_time() {
        let mut feed = feed(true);
        feed.set_group_selected("starlink", false);

        for offset_days in [0_i64, 1, 100, 1_000] {
            let t = SimTime(launch_millis() + offset_days * 24 * 60 * 60 * 1000);
            assert_eq!(feed.state_at(44714, t), Some(TrackState::Hidden));
            assert!(feed.position_at(44714, t).is_none());
        }

        // Reselecting reinstates the time-dependent state.
        feed.set_group_selected("starlink", true);
        let t = SimTime(launch_millis() + 24 * 60 * 60 * 1000);
        assert_eq!(feed.state_at(44714, t), Some(TrackState::Active));
        assert_eq!(
            feed.state_at(44714, SimTime(launch_millis() - 1)),
            Some(TrackState::PreLaunch)
        );
    }

    #[test]
    fn unknown_id_is_none() {
        let feed = feed(true);
        assert!(feed.state_at(99999, SimTime(0)).is_none());
        assert!(feed.position_at(99999, SimTime(0)).is_none());
    }
}
