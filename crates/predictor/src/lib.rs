//! Argus Predictor - Momentum extrapolation of the conditioned flow metric
//!
//! Forecasts the accumulated metric a fixed horizon ahead from the last two
//! snapshots:
//!
//! - **GapCompensator**: removes a known non-trading interval from the
//!   elapsed-time denominator so rates stay smooth across it
//! - **SnapshotHistory**: bounded rolling buffer of emitted snapshots
//! - **MomentumPredictor**: two-point instantaneous rate, linear
//!   extrapolation to the horizon

mod gap;
mod history;
mod momentum;

pub use gap::{GapCompensator, SessionGap};
pub use history::SnapshotHistory;
pub use momentum::MomentumPredictor;
