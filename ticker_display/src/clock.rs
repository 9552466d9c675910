//! Time sources for scheduling and for the clock row.
//!
//! Scheduling uses a monotonic `Instant` so interval checks are immune to wall-clock
//! changes; the clock row uses local wall time. Both come from one [`Clock`] so tests
//! and offline demos can pin them.
use std::time::Instant;

use chrono::{Local, NaiveDateTime};

/// Source of "now".
pub trait Clock {
    /// Monotonic time used for poll interval checks.
    fn monotonic(&self) -> Instant;
    /// Local wall time shown on the panel.
    fn wall_time(&self) -> NaiveDateTime;
}

/// Live system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn monotonic(&self) -> Instant {
        Instant::now()
    }

    fn wall_time(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Real monotonic time with a pinned wall time, for demos and screenshots.
#[derive(Debug, Clone, Copy)]
pub struct FixedWallClock {
    wall: NaiveDateTime,
}

impl FixedWallClock {
    /// Pins the displayed time to `wall`.
    pub fn new(wall: NaiveDateTime) -> Self {
        Self { wall }
    }
}

impl Clock for FixedWallClock {
    fn monotonic(&self) -> Instant {
        Instant::now()
    }

    fn wall_time(&self) -> NaiveDateTime {
        self.wall
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::Cell;
    use std::time::Duration;

    /// Manually advanced clock for scheduler tests.
    pub(crate) struct ManualClock {
        start: Instant,
        elapsed: Cell<Duration>,
        wall: NaiveDateTime,
    }

    impl ManualClock {
        pub(crate) fn new(wall: NaiveDateTime) -> Self {
            Self {
                start: Instant::now(),
                elapsed: Cell::new(Duration::ZERO),
                wall,
            }
        }

        pub(crate) fn advance(&self, by: Duration) {
            self.elapsed.set(self.elapsed.get() + by);
        }
    }

    impl Clock for ManualClock {
        fn monotonic(&self) -> Instant {
            self.start + self.elapsed.get()
        }

        fn wall_time(&self) -> NaiveDateTime {
            self.wall + chrono::TimeDelta::from_std(self.elapsed.get()).unwrap()
        }
    }

    pub(crate) fn demo_time() -> NaiveDateTime {
        "2025-04-09T23:21:46".parse().unwrap()
    }

    #[test]
    fn fixed_wall_clock_never_moves() {
        let clock = FixedWallClock::new(demo_time());
        assert_eq!(clock.wall_time(), demo_time());
        assert_eq!(clock.wall_time(), clock.wall_time());
    }

    #[test]
    fn manual_clock_advances_both_timelines() {
        let clock = ManualClock::new(demo_time());
        let before = clock.monotonic();
        clock.advance(Duration::from_secs(61));
        assert_eq!(clock.monotonic() - before, Duration::from_secs(61));
        assert_eq!(clock.wall_time().format("%H:%M:%S").to_string(), "23:22:47");
    }
}
