use argus_core::PredictionRecord;

use crate::error::PublishResult;

/// Port for handing records to the cross-process hand-off mechanism
///
/// The core is the single writer; the implementation must make each
/// published value atomically visible to any number of concurrent
/// readers, with no torn reads. Records arrive in non-decreasing
/// event-timestamp order and implementations exposing history must
/// preserve that order (last-write-wins is fine for latest-only views).
pub trait SnapshotPublisher: Send + Sync {
    fn publish(&self, record: &PredictionRecord) -> PublishResult<()>;

    /// Identifier for logging
    fn name(&self) -> &str {
        "SnapshotPublisher"
    }
}
