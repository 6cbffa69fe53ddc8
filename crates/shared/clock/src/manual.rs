use argus_core::TimestampMs;
use argus_ports::Clock;
use std::sync::atomic::{AtomicI64, Ordering};

/// Manually advanced clock for deterministic tests
///
/// Time only moves when [`set`](ManualClock::set) or
/// [`advance_ms`](ManualClock::advance_ms) is called.
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn new(start: TimestampMs) -> Self {
        Self {
            now: AtomicI64::new(start),
        }
    }

    /// Explicitly set the current time
    pub fn set(&self, time: TimestampMs) {
        self.now.store(time, Ordering::SeqCst);
    }

    /// Advance the current time by `delta_ms`
    pub fn advance_ms(&self, delta_ms: i64) {
        self.now.fetch_add(delta_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> TimestampMs {
        self.now.load(Ordering::SeqCst)
    }

    fn name(&self) -> &str {
        "ManualClock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_only_moves_explicitly() {
        let clock = ManualClock::new(1_000);
        assert_eq!(clock.now(), 1_000);
        assert_eq!(clock.now(), 1_000);

        clock.advance_ms(500);
        assert_eq!(clock.now(), 1_500);

        clock.set(10_000);
        assert_eq!(clock.now(), 10_000);
    }
}
