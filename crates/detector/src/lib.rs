//! Argus Detector - Sliding-window pattern tracking
//!
//! Detects equities being executed in repetitive same-size chunks (the
//! signature of algorithmic order-slicing) and accumulates a
//! volume-weighted value metric conditioned on that detection:
//!
//! - **DetectorConfig**: window length, qualification count, volume floor,
//!   emission cadence
//! - **DetectorSession**: per-key sliding windows, per-key and aggregate
//!   sums, snapshot emission

mod config;
mod session;

pub use config::DetectorConfig;
pub use session::{DetectorSession, KeyState};
