use std::collections::VecDeque;

use argus_core::Snapshot;

/// Default retention; the predictor itself only needs the last two, the
/// rest is kept for display readers.
const DEFAULT_CAPACITY: usize = 1000;

/// Bounded rolling history of emitted snapshots, in arrival order
#[derive(Debug, Clone)]
pub struct SnapshotHistory {
    snapshots: VecDeque<Snapshot>,
    capacity: usize,
}

impl Default for SnapshotHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl SnapshotHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity >= 2, "history must hold at least two snapshots");
        Self {
            snapshots: VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY)),
            capacity,
        }
    }

    /// Append a snapshot, dropping the oldest when at capacity
    pub fn push(&mut self, snapshot: Snapshot) {
        if self.snapshots.len() == self.capacity {
            self.snapshots.pop_front();
        }
        self.snapshots.push_back(snapshot);
    }

    /// Most recent snapshot
    pub fn latest(&self) -> Option<&Snapshot> {
        self.snapshots.back()
    }

    /// Snapshot before the most recent one
    pub fn previous(&self) -> Option<&Snapshot> {
        let len = self.snapshots.len();
        if len < 2 {
            return None;
        }
        self.snapshots.get(len - 2)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Oldest-to-newest iteration, for display readers
    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter()
    }
}
