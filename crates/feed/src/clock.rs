use foundation::SimTime;

/// Default simulation speed relative to wall-clock time.
pub const DEFAULT_MULTIPLIER: f64 = 10.0;

/// Shared simulation clock.
///
/// Runs at a configurable multiplier over a `[start, stop]` window, can be
/// paused, and can be scrubbed to an arbitrary instant. When looping is
/// enabled, crossing `stop` wraps back into the window so the simulation
/// replays indefinitely.
#[derive(Debug, Clone, PartialEq)]
pub struct SimClock {
    current: SimTime,
    start: SimTime,
    stop: SimTime,
    multiplier: f64,
    animating: bool,
    loop_at_stop: bool,
}

impl SimClock {
    pub fn new(start: SimTime, stop: SimTime) -> Self {
        Self {
            current: start,
            start,
            stop: stop.max(start),
            multiplier: DEFAULT_MULTIPLIER,
            animating: true,
            loop_at_stop: true,
        }
    }

    pub fn current(&self) -> SimTime {
        self.current
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn set_multiplier(&mut self, multiplier: f64) {
        self.multiplier = multiplier;
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn set_animating(&mut self, animating: bool) {
        self.animating = animating;
    }

    /// Advance by `real_elapsed_ms` of wall-clock time.
    pub fn tick(&mut self, real_elapsed_ms: f64) {
        if !self.animating {
            return;
        }
        let delta = (real_elapsed_ms * self.multiplier).round() as i64;
        self.current = self.current.offset_millis(delta);

        if self.current > self.stop {
            if self.loop_at_stop {
                let span = self.stop.millis() - self.start.millis();
                self.current = if span > 0 {
                    let wrapped = (self.current.millis() - self.start.millis()).rem_euclid(span);
                    SimTime(self.start.millis() + wrapped)
                } else {
                    self.start
                };
            } else {
                self.current = self.stop;
            }
        }
    }

    /// Jump to an arbitrary instant, clamped into the clock's window.
    pub fn scrub_to(&mut self, t: SimTime) {
        self.current = t.clamp(self.start, self.stop);
    }
}

#[cfg(test)]
mod tests {
    use super::SimClock;
    use foundation::SimTime;

    #[test]
    fn tick_advances_by_the_multiplier() {
        let mut clock = SimClock::new(SimTime(0), SimTime(1_000_000));
        clock.set_multiplier(10.0);
        clock.tick(100.0);
        assert_eq!(clock.current(), SimTime(1_000));
    }

    #[test]
    fn paused_clock_does_not_move() {
        let mut clock = SimClock::new(SimTime(0), SimTime(1_000_000));
        clock.set_animating(false);
        clock.tick(100.0);
        assert_eq!(clock.current(), SimTime(0));
    }

    #[test]
    fn crossing_stop_wraps_back_into_the_window() {
        let mut clock = SimClock::new(SimTime(0), SimTime(1_000));
        clock.set_multiplier(1.0);
        clock.scrub_to(SimTime(900));
        clock.tick(300.0);
        assert_eq!(clock.current(), SimTime(200));
    }

    #[test]
    fn scrub_clamps_into_the_window() {
        let mut clock = SimClock::new(SimTime(100), SimTime(1_000));
        clock.scrub_to(SimTime(5_000));
        assert_eq!(clock.current(), SimTime(1_000));
        clock.scrub_to(SimTime(-5));
        assert_eq!(clock.current(), SimTime(100));
        clock.scrub_to(SimTime(500));
        assert_eq!(clock.current(), SimTime(500));
    }
}
