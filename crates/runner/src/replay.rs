//! Replay Scheduler - timestamp-scaled event delivery
//!
//! Replays a stored, timestamp-sorted event sequence through the pipeline,
//! suspending between events proportionally to their original data-time
//! gap divided by the speed multiplier. Only relative spacing matters;
//! the absolute wall-clock start time is irrelevant.

use std::sync::Arc;
use std::time::Duration;

use argus_clock::SystemClock;
use argus_core::{TimestampMs, TradeEvent};
use argus_ports::Clock;
use tokio::sync::watch;
use uuid::Uuid;

use crate::pipeline::ReplayPipeline;

/// Valid speed multiplier range; out-of-range requests are clamped
pub const MIN_SPEED: f64 = 1.0;
pub const MAX_SPEED: f64 = 100.0;

const PROGRESS_LOG_EVERY: u64 = 1000;

/// Outcome of a replay session
#[derive(Debug, Clone, Default)]
pub struct ReplayStats {
    /// Events delivered to the pipeline
    pub events_delivered: u64,
    /// Prediction records the pipeline produced; publish failures are
    /// tracked separately by the pipeline
    pub records_produced: u64,
    /// Whether the session was stopped by cancellation
    pub cancelled: bool,
    /// Wall-clock duration of the session
    pub wall_elapsed_ms: i64,
}

/// Paced, cancellable replay of a finite event sequence
pub struct ReplayScheduler {
    session_id: Uuid,
    speed: f64,
    clock: Arc<dyn Clock>,
}

impl ReplayScheduler {
    pub fn new(speed_multiplier: f64) -> Self {
        Self::with_clock(speed_multiplier, Arc::new(SystemClock::new()))
    }

    pub fn with_clock(speed_multiplier: f64, clock: Arc<dyn Clock>) -> Self {
        let speed = speed_multiplier.clamp(MIN_SPEED, MAX_SPEED);
        if speed != speed_multiplier {
            log::warn!(
                "[replay] speed multiplier {} out of range, clamped to {}",
                speed_multiplier,
                speed
            );
        }
        Self {
            session_id: Uuid::new_v4(),
            speed,
            clock,
        }
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Pacing rule: suspension before delivering an event whose
    /// predecessor carried timestamp `prev`. Negative data gaps
    /// (out-of-order input) pause for zero.
    pub fn pause_for(&self, prev: TimestampMs, next: TimestampMs) -> Duration {
        let gap_ms = (next - prev).max(0) as f64;
        Duration::from_secs_f64(gap_ms / 1000.0 / self.speed)
    }

    /// Deliver every event to the pipeline in order, pacing wall-clock
    /// time between deliveries.
    ///
    /// The first event is delivered immediately. Cancellation (via the
    /// shutdown watch flipping to `true`) is honored between events only:
    /// per-event processing is synchronous and never abandoned mid-event.
    /// Cancellation is a normal termination path, not a failure.
    pub async fn run(
        &self,
        events: &[TradeEvent],
        pipeline: &mut ReplayPipeline,
        mut shutdown: watch::Receiver<bool>,
    ) -> ReplayStats {
        let started = self.clock.now();
        let mut stats = ReplayStats::default();
        let mut prev_ts: Option<TimestampMs> = None;

        log::info!(
            "[replay {}] starting: {} events at {}x",
            self.session_id,
            events.len(),
            self.speed
        );

        for event in events {
            if *shutdown.borrow() {
                stats.cancelled = true;
                break;
            }

            if let Some(prev) = prev_ts {
                if event.timestamp < prev {
                    log::warn!(
                        "[replay {}] out-of-order timestamp {} after {}, delivering immediately",
                        self.session_id,
                        event.timestamp,
                        prev
                    );
                }
                let pause = self.pause_for(prev, event.timestamp);
                if !pause.is_zero() {
                    tokio::select! {
                        _ = tokio::time::sleep(pause) => {}
                        _ = Self::wait_cancelled(&mut shutdown) => {
                            stats.cancelled = true;
                            break;
                        }
                    }
                }
            }

            if pipeline.process(event).is_some() {
                stats.records_produced += 1;
            }
            stats.events_delivered += 1;
            prev_ts = Some(event.timestamp);

            if stats.events_delivered % PROGRESS_LOG_EVERY == 0 {
                let elapsed_ms = (self.clock.now() - started).max(1);
                let rate = stats.events_delivered as f64 / (elapsed_ms as f64 / 1000.0);
                log::info!(
                    "[replay {}] {} events, {} records, {:.1} events/sec",
                    self.session_id,
                    stats.events_delivered,
                    stats.records_produced,
                    rate
                );
            }
        }

        stats.wall_elapsed_ms = self.clock.now() - started;
        log::info!(
            "[replay {}] {}: {} events delivered, {} records, {} ms",
            self.session_id,
            if stats.cancelled { "cancelled" } else { "finished" },
            stats.events_delivered,
            stats.records_produced,
            stats.wall_elapsed_ms
        );
        stats
    }

    /// Resolves when the shutdown flag flips to `true`; pends forever if
    /// the sender goes away (no cancellation possible after that).
    async fn wait_cancelled(shutdown: &mut watch::Receiver<bool>) {
        while shutdown.changed().await.is_ok() {
            if *shutdown.borrow() {
                return;
            }
        }
        std::future::pending::<()>().await
    }
}
