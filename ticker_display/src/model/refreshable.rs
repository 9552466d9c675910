//! A cached value that knows when it is due for a refresh.
use std::time::{Duration, Instant};

/// Cached value plus the time of its last fetch attempt.
///
/// The value is always present: it starts as a placeholder and every fetch attempt,
/// successful or not, overwrites it in place.
#[derive(Debug, Clone)]
pub struct Refreshable<T> {
    value: T,
    last_fetched_at: Option<Instant>,
    interval: Duration,
}

impl<T> Refreshable<T> {
    /// Creates a cache holding `placeholder` that is due immediately.
    pub fn new(placeholder: T, interval: Duration) -> Self {
        Self {
            value: placeholder,
            last_fetched_at: None,
            interval,
        }
    }

    /// Whether at least one interval has passed since the last attempt.
    pub fn is_due(&self, now: Instant) -> bool {
        match self.last_fetched_at {
            None => true,
            Some(at) => now.saturating_duration_since(at) >= self.interval,
        }
    }

    /// Stores the result of an attempt made at `now`.
    pub fn store(&mut self, value: T, now: Instant) {
        self.value = value;
        self.last_fetched_at = Some(now);
    }

    /// The current value.
    pub fn value(&self) -> &T {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn due_at_startup_then_once_per_interval() {
        let start = Instant::now();
        let mut cache = Refreshable::new("Loading...", Duration::from_secs(60));
        assert!(cache.is_due(start));

        cache.store("COF: $170.00 +1.00%", start);
        assert!(!cache.is_due(start + Duration::from_secs(59)));
        assert!(cache.is_due(start + Duration::from_secs(60)));
        assert_eq!(*cache.value(), "COF: $170.00 +1.00%");
    }

    #[test]
    fn failed_attempt_still_overwrites_and_reschedules() {
        let start = Instant::now();
        let mut cache = Refreshable::new(String::from("Loading quote..."), Duration::from_secs(300));
        cache.store(String::from("Quote API error."), start);
        assert_eq!(cache.value(), "Quote API error.");
        assert!(!cache.is_due(start + Duration::from_secs(299)));
        assert!(cache.is_due(start + Duration::from_secs(300)));
    }
}
