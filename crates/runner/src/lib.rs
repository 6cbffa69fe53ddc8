//! Argus Runner - Replay orchestration
//!
//! Drives stored trade-event logs through the detection/prediction
//! pipeline at a controlled pace:
//!
//! - **Feed**: line-oriented canonical event input (file or stdin)
//! - **Replay Scheduler**: timestamp-scaled pacing with cooperative
//!   cancellation between events
//! - **Pipeline**: tracker -> gap compensation -> predictor -> publisher,
//!   strictly sequential (single writer)
//! - **Slot Store**: single-writer/multi-reader hand-off of published
//!   records

pub mod config;
pub mod error;
pub mod feed;
pub mod pipeline;
pub mod publish;
pub mod replay;

// Re-export main types
pub use config::RunnerConfig;
pub use error::{ConfigError, FeedError};
pub use feed::EventFeed;
pub use pipeline::ReplayPipeline;
pub use publish::{PREDICTIONS_KEY, SlotPublisher, SlotStore, VersionedRecord};
pub use replay::{ReplayScheduler, ReplayStats};
