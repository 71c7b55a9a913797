//! Updates-per-second Counter

use std::time::{Duration, Instant};

/// Counts events and publishes the count once per interval
#[derive(Debug)]
pub struct RateCounter {
    count: u32,
    since: Instant,
    interval: Duration,
}

impl RateCounter {
    /// Counter publishing once per second
    pub fn new() -> Self {
        Self::with_interval(Duration::from_secs(1))
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self {
            count: 0,
            since: Instant::now(),
            interval,
        }
    }

    /// Record one event; returns the count when an interval has elapsed
    pub fn record(&mut self) -> Option<u32> {
        self.record_at(Instant::now())
    }

    /// Record one event observed at `now`
    pub fn record_at(&mut self, now: Instant) -> Option<u32> {
        self.count += 1;
        if now.duration_since(self.since) >= self.interval {
            let count = self.count;
            self.count = 0;
            self.since = now;
            Some(count)
        } else {
            None
        }
    }
}

impl Default for RateCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publishes_after_interval() {
        let start = Instant::now();
        let mut counter = RateCounter {
            count: 0,
            since: start,
            interval: Duration::from_secs(1),
        };

        for i in 1..=85 {
            let now = start + Duration::from_millis(i * 10);
            assert_eq!(counter.record_at(now), None);
        }

        let published = (86..=100)
            .map(|i| counter.record_at(start + Duration::from_millis(i * 10 + 5)))
            .find_map(|p| p);
        assert_eq!(published, Some(100));
    }

    #[test]
    fn test_resets_after_publishing() {
        let start = Instant::now();
        let mut counter = RateCounter {
            count: 0,
            since: start,
            interval: Duration::from_millis(100),
        };

        assert_eq!(counter.record_at(start + Duration::from_millis(100)), Some(1));
        assert_eq!(counter.record_at(start + Duration::from_millis(150)), None);
        assert_eq!(counter.record_at(start + Duration::from_millis(200)), Some(2));
    }
}
