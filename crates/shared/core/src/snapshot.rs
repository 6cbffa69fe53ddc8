use serde::{Deserialize, Serialize};

use crate::values::{Metric, TimestampMs};

/// Point-in-time read of the aggregate conditioned flow across all keys
///
/// Emitted by the detector on its emission cadence; read-only once
/// constructed. The metrics are market-wide aggregates, not per-key detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Data timestamp of the event that triggered emission
    pub timestamp: TimestampMs,
    /// Timestamp with the configured non-trading interval subtracted out
    pub effective_timestamp: TimestampMs,
    /// Accumulated buy-side conditioned metric (billions)
    pub buy_metric: Metric,
    /// Accumulated sell-side conditioned metric (billions)
    pub sell_metric: Metric,
    /// buy_metric - sell_metric
    pub net_metric: Metric,
}

impl Snapshot {
    /// Create a snapshot. The effective timestamp starts equal to the data
    /// timestamp; the pipeline rewrites it after gap compensation.
    pub fn new(timestamp: TimestampMs, buy_metric: Metric, sell_metric: Metric) -> Self {
        Self {
            timestamp,
            effective_timestamp: timestamp,
            buy_metric,
            sell_metric,
            net_metric: buy_metric - sell_metric,
        }
    }

    /// Rewrite the effective timestamp (after gap compensation)
    pub fn with_effective(mut self, effective_timestamp: TimestampMs) -> Self {
        self.effective_timestamp = effective_timestamp;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_net_is_buy_minus_sell() {
        let snap = Snapshot::new(1_000, dec!(12.5), dec!(4.5));
        assert_eq!(snap.net_metric, dec!(8.0));
        assert_eq!(snap.effective_timestamp, 1_000);
    }

    #[test]
    fn test_with_effective_rewrites_only_effective() {
        let snap = Snapshot::new(10_000, dec!(1), dec!(0)).with_effective(7_000);
        assert_eq!(snap.timestamp, 10_000);
        assert_eq!(snap.effective_timestamp, 7_000);
    }
}
