//! Replay Pipeline - tracker to publisher, strictly sequential
//!
//! One pipeline per replay session. Processing a single event is
//! synchronous and never suspends; all detector state mutation is
//! serialized through this single owner, which is what preserves the
//! monotone-sums invariant.

use std::sync::Arc;

use argus_core::{PredictionRecord, TradeEvent};
use argus_detector::{DetectorConfig, DetectorSession};
use argus_ports::SnapshotPublisher;
use argus_predictor::{GapCompensator, MomentumPredictor, SnapshotHistory};

pub struct ReplayPipeline {
    session: DetectorSession,
    gap: GapCompensator,
    predictor: MomentumPredictor,
    history: SnapshotHistory,
    publisher: Arc<dyn SnapshotPublisher>,
    publish_failures: u64,
}

impl ReplayPipeline {
    pub fn new(
        detector_config: DetectorConfig,
        gap: GapCompensator,
        horizon_minutes: u32,
        publisher: Arc<dyn SnapshotPublisher>,
    ) -> Self {
        Self {
            session: DetectorSession::new(detector_config),
            gap,
            predictor: MomentumPredictor::new(gap, horizon_minutes),
            history: SnapshotHistory::default(),
            publisher,
            publish_failures: 0,
        }
    }

    /// Process one event end-to-end.
    ///
    /// Returns the published prediction record when this event triggered
    /// an emission and enough history existed to forecast. A failed
    /// publish is logged and swallowed: one lost record is recoverable,
    /// lost stream position is not.
    pub fn process(&mut self, event: &TradeEvent) -> Option<PredictionRecord> {
        let snapshot = self.session.process(event)?;
        let effective = self.gap.effective(snapshot.timestamp);
        self.history.push(snapshot.with_effective(effective));

        let record = self.predictor.predict(&self.history)?;
        if let Err(err) = self.publisher.publish(&record) {
            self.publish_failures += 1;
            log::error!(
                "[pipeline] publish failed via {} ({} so far): {}",
                self.publisher.name(),
                self.publish_failures,
                err
            );
        }
        Some(record)
    }

    pub fn snapshots_emitted(&self) -> usize {
        self.history.len()
    }

    pub fn publish_failures(&self) -> u64 {
        self.publish_failures
    }

    pub fn detector(&self) -> &DetectorSession {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argus_core::Side;
    use argus_ports::{PublishError, PublishResult};
    use argus_predictor::SessionGap;
    use rust_decimal_macros::dec;

    struct FailingPublisher;

    impl SnapshotPublisher for FailingPublisher {
        fn publish(&self, _record: &PredictionRecord) -> PublishResult<()> {
            Err(PublishError::SinkUnavailable("down".into()))
        }
    }

    struct NullPublisher;

    impl SnapshotPublisher for NullPublisher {
        fn publish(&self, _record: &PredictionRecord) -> PublishResult<()> {
            Ok(())
        }
    }

    fn pipeline(publisher: Arc<dyn SnapshotPublisher>) -> ReplayPipeline {
        let config = DetectorConfig {
            min_occurrences: 1,
            ..Default::default()
        };
        ReplayPipeline::new(config, GapCompensator::new(None), 15, publisher)
    }

    fn event(ts: i64) -> TradeEvent {
        TradeEvent::new("HPG", 1000, dec!(25000), Side::AggressorBuy, ts)
    }

    #[test]
    fn test_first_emission_has_no_prediction() {
        let mut pipeline = pipeline(Arc::new(NullPublisher));
        // First event emits a snapshot but there is no trend yet
        assert!(pipeline.process(&event(1_000)).is_none());
        assert_eq!(pipeline.snapshots_emitted(), 1);
    }

    #[test]
    fn test_second_emission_predicts() {
        let mut pipeline = pipeline(Arc::new(NullPublisher));
        pipeline.process(&event(1_000));
        let record = pipeline.process(&event(61_000)).unwrap();
        assert_eq!(record.timestamp, 61_000);
        assert!(record.rate_buy > dec!(0));
    }

    #[test]
    fn test_publish_failure_does_not_halt_processing() {
        let mut pipeline = pipeline(Arc::new(FailingPublisher));
        pipeline.process(&event(1_000));
        let record = pipeline.process(&event(61_000));

        // The record is still produced and the pipeline keeps going
        assert!(record.is_some());
        assert_eq!(pipeline.publish_failures(), 1);
        assert!(pipeline.process(&event(121_000)).is_some());
        assert_eq!(pipeline.publish_failures(), 2);
    }

    #[test]
    fn test_effective_timestamp_applied_to_snapshots() {
        let gap = GapCompensator::new(Some(SessionGap::new(40_000, 100_000)));
        let config = DetectorConfig {
            min_occurrences: 1,
            ..Default::default()
        };
        let mut pipeline = ReplayPipeline::new(config, gap, 15, Arc::new(NullPublisher));

        pipeline.process(&event(10_000));
        let record = pipeline.process(&event(130_000)).unwrap();
        assert_eq!(record.effective_timestamp, 70_000);
    }
}
