use argus_core::TimestampMs;
use argus_ports::Clock;
use chrono::Utc;

/// Real system clock for live runs
///
/// This simply returns the current wall-clock time in epoch milliseconds.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> TimestampMs {
        Utc::now().timestamp_millis()
    }

    fn name(&self) -> &str {
        "SystemClock"
    }
}
