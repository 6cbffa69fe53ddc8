use argus_core::TimestampMs;
use serde::{Deserialize, Serialize};

/// Configuration for the pattern tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Lookback window for pattern detection, in seconds
    pub window_seconds: u64,
    /// Minimum in-window repetitions of a (symbol, volume) key before its
    /// trades count toward the conditioned metric
    pub min_occurrences: usize,
    /// Trades below this volume are ignored entirely (no key is created)
    pub volume_threshold: u64,
    /// Emission cadence in *data* time: a snapshot is emitted when at least
    /// this many milliseconds of event time have passed since the last one
    pub prediction_interval_ms: TimestampMs,
    /// Sweep stale window entries across all keys every N processed events
    pub sweep_interval: u64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            window_seconds: 300,           // 5-minute detection window
            min_occurrences: 5,            // 5 repetitions flag a pattern
            volume_threshold: 200,         // ignore volume < 200
            prediction_interval_ms: 15_000, // emit every 15s of data time
            sweep_interval: 100,           // sweep every 100 events
        }
    }
}

impl DetectorConfig {
    /// Lookback window in milliseconds
    pub fn window_ms(&self) -> TimestampMs {
        self.window_seconds as TimestampMs * 1000
    }
}
