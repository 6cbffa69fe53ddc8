//! Argus Core Domain
//!
//! Pure domain types for the Argus flow detection pipeline.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod events;
pub mod prediction;
pub mod snapshot;
pub mod values;

// Re-export commonly used types at crate root
pub use events::{PatternKey, Side, TradeEvent};
pub use prediction::PredictionRecord;
pub use snapshot::Snapshot;
pub use values::{Metric, Symbol, TimestampMs, to_datetime};
