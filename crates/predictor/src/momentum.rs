use argus_core::{Metric, PredictionRecord, TimestampMs};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::gap::GapCompensator;
use crate::history::SnapshotHistory;

const MS_PER_MINUTE: Decimal = dec!(60000);

/// Two-point momentum predictor
///
/// Computes the instantaneous accumulation rate from the last two snapshots
/// and extrapolates linearly to a fixed horizon:
///
/// `prediction = current + rate_per_minute * horizon_minutes`
///
/// Using only the last two points makes the forecast maximally responsive
/// to recent momentum at the cost of noise sensitivity. No smoothing, no
/// regression over a longer window.
#[derive(Debug, Clone, Copy)]
pub struct MomentumPredictor {
    gap: GapCompensator,
    horizon_minutes: u32,
}

impl MomentumPredictor {
    pub fn new(gap: GapCompensator, horizon_minutes: u32) -> Self {
        Self {
            gap,
            horizon_minutes,
        }
    }

    pub fn horizon_minutes(&self) -> u32 {
        self.horizon_minutes
    }

    /// Predict the metric at the horizon from the last two snapshots.
    ///
    /// Returns `None` with fewer than two snapshots (no trend observable
    /// yet). A zero effective time delta yields zero rates, never a
    /// division fault: the forecast degenerates to the current value.
    pub fn predict(&self, history: &SnapshotHistory) -> Option<PredictionRecord> {
        let latest = history.latest()?;
        let previous = history.previous()?;

        let dt_ms = self.gap.effective(latest.timestamp) - self.gap.effective(previous.timestamp);
        let dt_min = Decimal::from(dt_ms) / MS_PER_MINUTE;

        let (rate_buy, rate_sell, rate_net) = if dt_min.is_zero() {
            (Metric::ZERO, Metric::ZERO, Metric::ZERO)
        } else {
            (
                (latest.buy_metric - previous.buy_metric) / dt_min,
                (latest.sell_metric - previous.sell_metric) / dt_min,
                (latest.net_metric - previous.net_metric) / dt_min,
            )
        };

        let horizon = Decimal::from(self.horizon_minutes);
        let preds = (
            latest.buy_metric + rate_buy * horizon,
            latest.sell_metric + rate_sell * horizon,
            latest.net_metric + rate_net * horizon,
        );

        let predicted_at: TimestampMs =
            latest.timestamp + TimestampMs::from(self.horizon_minutes) * 60_000;

        Some(PredictionRecord::from_snapshot(
            latest,
            (rate_buy, rate_sell, rate_net),
            preds,
            predicted_at,
        ))
    }
}
