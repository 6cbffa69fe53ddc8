use std::collections::{HashMap, VecDeque};

use argus_core::{Metric, PatternKey, Side, Snapshot, TimestampMs, TradeEvent};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::config::DetectorConfig;

/// Metric unit: volume * price is expressed in billions of quote currency
const BILLION: Decimal = dec!(1_000_000_000);

/// Per-key tracking state
///
/// The window holds only timestamps of in-window trades for that key; it
/// decides qualification and stores no trade payloads. The side sums are
/// strictly non-decreasing: contributions added while the key qualified are
/// never retracted, even if the window later empties.
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    window: VecDeque<TimestampMs>,
    buy_sum: Metric,
    sell_sum: Metric,
}

impl KeyState {
    /// Number of in-window occurrences (as of the last event for this key)
    pub fn occurrences(&self) -> usize {
        self.window.len()
    }

    pub fn buy_sum(&self) -> Metric {
        self.buy_sum
    }

    pub fn sell_sum(&self) -> Metric {
        self.sell_sum
    }

    pub fn net_sum(&self) -> Metric {
        self.buy_sum - self.sell_sum
    }

    /// Drop window entries older than `cutoff`
    fn evict_before(&mut self, cutoff: TimestampMs) {
        while self
            .window
            .front()
            .is_some_and(|&front| front < cutoff)
        {
            self.window.pop_front();
        }
    }
}

/// Pattern tracker for one processing session
///
/// Owns all per-key windows and sums for the session; single logical owner,
/// no sharing. Keys are created lazily on first sight and retained for the
/// life of the session so their accumulated sums are never lost (sized for
/// single trading-day sessions).
pub struct DetectorSession {
    config: DetectorConfig,
    window_ms: TimestampMs,
    keys: HashMap<PatternKey, KeyState>,
    /// Aggregate sums across all keys, maintained incrementally
    buy_total: Metric,
    sell_total: Metric,
    /// Data timestamp of the last emitted snapshot
    last_emitted: Option<TimestampMs>,
    events_processed: u64,
}

impl DetectorSession {
    pub fn new(config: DetectorConfig) -> Self {
        let window_ms = config.window_ms();
        Self {
            config,
            window_ms,
            keys: HashMap::new(),
            buy_total: Metric::ZERO,
            sell_total: Metric::ZERO,
            last_emitted: None,
            events_processed: 0,
        }
    }

    /// Process one trade event, updating pattern state and deciding
    /// whether to emit a snapshot.
    ///
    /// Qualification is evaluated event-by-event, not sticky: the event
    /// just appended counts, so the `min_occurrences`-th in-window
    /// occurrence is the first that contributes. Events below the volume
    /// threshold are a no-op (no key is created, no emission happens).
    pub fn process(&mut self, event: &TradeEvent) -> Option<Snapshot> {
        if event.volume < self.config.volume_threshold {
            return None;
        }

        let state = self.keys.entry(event.pattern_key()).or_default();
        state.window.push_back(event.timestamp);
        state.evict_before(event.timestamp - self.window_ms);

        let qualified = state.window.len() >= self.config.min_occurrences;
        if qualified {
            let contribution = Decimal::from(event.volume) * event.price / BILLION;
            match event.side {
                Side::AggressorBuy => {
                    state.buy_sum += contribution;
                    self.buy_total += contribution;
                }
                Side::AggressorSell => {
                    state.sell_sum += contribution;
                    self.sell_total += contribution;
                }
            }
        }

        self.events_processed += 1;
        if self.config.sweep_interval > 0 && self.events_processed % self.config.sweep_interval == 0
        {
            self.sweep(event.timestamp);
        }

        self.emission(event.timestamp)
    }

    /// Emit a snapshot on the first processed event, then whenever the
    /// configured interval of *data* time has elapsed since the last one.
    fn emission(&mut self, timestamp: TimestampMs) -> Option<Snapshot> {
        let due = match self.last_emitted {
            None => true,
            Some(last) => timestamp - last >= self.config.prediction_interval_ms,
        };
        if !due {
            return None;
        }

        self.last_emitted = Some(timestamp);
        Some(Snapshot::new(timestamp, self.buy_total, self.sell_total))
    }

    /// Trim stale window entries across all keys.
    ///
    /// Keys themselves are retained even when their window empties: their
    /// sums must survive indefinitely, and the key re-qualifies from a
    /// fresh count if its pattern resumes.
    fn sweep(&mut self, now: TimestampMs) {
        let cutoff = now - self.window_ms;
        for state in self.keys.values_mut() {
            state.evict_before(cutoff);
        }
        log::debug!(
            "[detector] sweep at {}: {} keys tracked",
            now,
            self.keys.len()
        );
    }

    /// Current aggregate sums as a snapshot, without emission bookkeeping
    pub fn current(&self, timestamp: TimestampMs) -> Snapshot {
        Snapshot::new(timestamp, self.buy_total, self.sell_total)
    }

    pub fn key_state(&self, key: &PatternKey) -> Option<&KeyState> {
        self.keys.get(key)
    }

    pub fn tracked_keys(&self) -> usize {
        self.keys.len()
    }

    pub fn events_processed(&self) -> u64 {
        self.events_processed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn buy(symbol: &str, volume: u64, price: Decimal, ts: TimestampMs) -> TradeEvent {
        TradeEvent::new(symbol, volume, price, Side::AggressorBuy, ts)
    }

    fn sell(symbol: &str, volume: u64, price: Decimal, ts: TimestampMs) -> TradeEvent {
        TradeEvent::new(symbol, volume, price, Side::AggressorSell, ts)
    }

    #[test]
    fn test_below_threshold_never_creates_key() {
        let mut session = DetectorSession::new(DetectorConfig::default());
        assert!(session.process(&buy("HPG", 100, dec!(20000), 1_000)).is_none());
        assert_eq!(session.tracked_keys(), 0);
        assert_eq!(session.events_processed(), 0);
    }

    #[test]
    fn test_nth_occurrence_is_first_to_contribute() {
        let mut session = DetectorSession::new(DetectorConfig::default());
        let key = PatternKey::new("HPG", 1000);

        // First 4 occurrences: window below threshold, no contribution
        for i in 0..4 {
            session.process(&buy("HPG", 1000, dec!(25000), 1_000 * i));
            assert_eq!(session.key_state(&key).unwrap().buy_sum(), Metric::ZERO);
        }

        // 5th occurrence qualifies and contributes 1000 * 25000 / 1e9 = 0.025
        session.process(&buy("HPG", 1000, dec!(25000), 4_000));
        let state = session.key_state(&key).unwrap();
        assert_eq!(state.occurrences(), 5);
        assert_eq!(state.buy_sum(), dec!(0.025));

        // 6th contributes again
        session.process(&buy("HPG", 1000, dec!(25000), 5_000));
        assert_eq!(session.key_state(&key).unwrap().buy_sum(), dec!(0.05));
    }

    #[test]
    fn test_sides_accumulate_independently() {
        let config = DetectorConfig {
            min_occurrences: 2,
            ..Default::default()
        };
        let mut session = DetectorSession::new(config);

        session.process(&buy("VNM", 500, dec!(60000), 0));
        session.process(&sell("VNM", 500, dec!(60000), 100));
        session.process(&buy("VNM", 500, dec!(60000), 200));

        let key = PatternKey::new("VNM", 500);
        let state = session.key_state(&key).unwrap();
        // Events 2 and 3 qualified (window len 2 and 3): one sell, one buy
        assert_eq!(state.sell_sum(), dec!(0.03));
        assert_eq!(state.buy_sum(), dec!(0.03));
        assert_eq!(state.net_sum(), Metric::ZERO);
    }

    #[test]
    fn test_window_eviction_resets_qualification_not_sums() {
        let config = DetectorConfig {
            window_seconds: 300,
            min_occurrences: 3,
            ..Default::default()
        };
        let mut session = DetectorSession::new(config);
        let key = PatternKey::new("SSI", 2000);

        // Qualify with 3 rapid occurrences; the 3rd contributes
        session.process(&buy("SSI", 2000, dec!(30000), 0));
        session.process(&buy("SSI", 2000, dec!(30000), 1_000));
        session.process(&buy("SSI", 2000, dec!(30000), 2_000));
        let contributed = session.key_state(&key).unwrap().buy_sum();
        assert_eq!(contributed, dec!(0.06));

        // Next occurrence 10 minutes later: all prior entries evicted,
        // count restarts at 1, no new contribution, sums retained
        session.process(&buy("SSI", 2000, dec!(30000), 602_000));
        let state = session.key_state(&key).unwrap();
        assert_eq!(state.occurrences(), 1);
        assert_eq!(state.buy_sum(), contributed);
    }

    #[test]
    fn test_requalification_after_window_empties() {
        let config = DetectorConfig {
            min_occurrences: 2,
            ..Default::default()
        };
        let mut session = DetectorSession::new(config);
        let key = PatternKey::new("FPT", 300);

        session.process(&buy("FPT", 300, dec!(100000), 0));
        session.process(&buy("FPT", 300, dec!(100000), 1_000));
        assert_eq!(session.key_state(&key).unwrap().buy_sum(), dec!(0.03));

        // Long silence, then the pattern resumes: must re-qualify first
        session.process(&buy("FPT", 300, dec!(100000), 1_000_000));
        assert_eq!(session.key_state(&key).unwrap().buy_sum(), dec!(0.03));
        session.process(&buy("FPT", 300, dec!(100000), 1_001_000));
        assert_eq!(session.key_state(&key).unwrap().buy_sum(), dec!(0.06));
    }

    #[test]
    fn test_sums_monotone_over_synthetic_sequence() {
        let config = DetectorConfig {
            min_occurrences: 2,
            sweep_interval: 10,
            ..Default::default()
        };
        let mut session = DetectorSession::new(config);

        let mut prev_buy = Metric::ZERO;
        let mut prev_sell = Metric::ZERO;
        for i in 0..200i64 {
            let side_buy = i % 3 != 0;
            let symbol = if i % 2 == 0 { "HPG" } else { "VNM" };
            let event = if side_buy {
                buy(symbol, 400, dec!(15000), i * 700)
            } else {
                sell(symbol, 400, dec!(15000), i * 700)
            };
            session.process(&event);

            let snap = session.current(i * 700);
            assert!(snap.buy_metric >= prev_buy);
            assert!(snap.sell_metric >= prev_sell);
            prev_buy = snap.buy_metric;
            prev_sell = snap.sell_metric;
        }
    }

    #[test]
    fn test_emission_cadence_in_data_time() {
        let mut session = DetectorSession::new(DetectorConfig::default());

        // First processed event always emits
        let first = session.process(&buy("HPG", 1000, dec!(25000), 1_000));
        assert!(first.is_some());

        // 10s later: below the 15s interval, no emission
        assert!(session.process(&buy("HPG", 1000, dec!(25000), 11_000)).is_none());

        // 15s after the first emission: due again
        let second = session.process(&buy("HPG", 1000, dec!(25000), 16_000));
        assert_eq!(second.unwrap().timestamp, 16_000);

        // Cadence measures from the last emission, not the last event
        assert!(session.process(&buy("HPG", 1000, dec!(25000), 30_000)).is_none());
        assert!(session.process(&buy("HPG", 1000, dec!(25000), 31_000)).is_some());
    }

    #[test]
    fn test_snapshot_aggregates_across_keys() {
        let config = DetectorConfig {
            min_occurrences: 1,
            ..Default::default()
        };
        let mut session = DetectorSession::new(config);

        session.process(&buy("HPG", 1000, dec!(25000), 0));
        session.process(&sell("VNM", 500, dec!(60000), 100));
        session.process(&buy("SSI", 2000, dec!(30000), 200));

        let snap = session.current(200);
        assert_eq!(snap.buy_metric, dec!(0.025) + dec!(0.06));
        assert_eq!(snap.sell_metric, dec!(0.03));
        assert_eq!(snap.net_metric, dec!(0.055));
        assert_eq!(session.tracked_keys(), 3);
    }

    #[test]
    fn test_sweep_trims_windows_but_keeps_keys() {
        let config = DetectorConfig {
            min_occurrences: 2,
            sweep_interval: 3,
            ..Default::default()
        };
        let mut session = DetectorSession::new(config);

        session.process(&buy("HPG", 1000, dec!(25000), 0));
        session.process(&buy("HPG", 1000, dec!(25000), 1_000));

        // Third event for a different key, far in the future, triggers the
        // sweep; HPG's stale window empties but its sums survive
        session.process(&buy("VNM", 500, dec!(60000), 900_000));

        let key = PatternKey::new("HPG", 1000);
        let state = session.key_state(&key).unwrap();
        assert_eq!(state.occurrences(), 0);
        assert_eq!(state.buy_sum(), dec!(0.025));
        assert_eq!(session.tracked_keys(), 2);
    }
}
