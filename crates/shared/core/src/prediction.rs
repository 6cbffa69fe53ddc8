use serde::{Deserialize, Serialize};

use crate::snapshot::Snapshot;
use crate::values::{Metric, TimestampMs};

/// Published output record: current metrics, momentum rates and the
/// horizon forecast, derived from the last two snapshots.
///
/// Immutable; handed to the snapshot publisher with no back-reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    /// Data timestamp of the latest snapshot
    pub timestamp: TimestampMs,
    /// Gap-compensated timestamp of the latest snapshot
    pub effective_timestamp: TimestampMs,
    pub buy_metric: Metric,
    pub sell_metric: Metric,
    pub net_metric: Metric,
    /// Accumulation rates in metric units per minute
    pub rate_buy: Metric,
    pub rate_sell: Metric,
    pub rate_net: Metric,
    /// Extrapolated metric values at the horizon
    pub pred_buy: Metric,
    pub pred_sell: Metric,
    pub pred_net: Metric,
    /// timestamp + horizon, in epoch milliseconds
    pub predicted_at: TimestampMs,
}

impl PredictionRecord {
    /// Build a record from the snapshot it extends.
    pub fn from_snapshot(
        snapshot: &Snapshot,
        rates: (Metric, Metric, Metric),
        preds: (Metric, Metric, Metric),
        predicted_at: TimestampMs,
    ) -> Self {
        let (rate_buy, rate_sell, rate_net) = rates;
        let (pred_buy, pred_sell, pred_net) = preds;
        Self {
            timestamp: snapshot.timestamp,
            effective_timestamp: snapshot.effective_timestamp,
            buy_metric: snapshot.buy_metric,
            sell_metric: snapshot.sell_metric,
            net_metric: snapshot.net_metric,
            rate_buy,
            rate_sell,
            rate_net,
            pred_buy,
            pred_sell,
            pred_net,
            predicted_at,
        }
    }
}
