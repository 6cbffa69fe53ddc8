//! Argus Ports
//!
//! Port definitions (traits) for the Argus flow detection pipeline.
//! These define the boundaries between domain logic and infrastructure.

mod clock;
mod error;
mod publish;

pub use clock::Clock;
pub use error::{PublishError, PublishResult};
pub use publish::SnapshotPublisher;
