//! Slot Store - cross-process style hand-off of published records
//!
//! Single writer (the pipeline), any number of concurrent readers
//! (display processes, verification tools). Three read surfaces:
//!
//! - keyed versioned slots (last-write-wins, version bumps per write)
//! - a `watch` channel carrying the latest record
//! - a bounded append-only history in arrival order

use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use argus_core::PredictionRecord;
use argus_ports::{PublishError, PublishResult, SnapshotPublisher};
use dashmap::DashMap;
use tokio::sync::watch;

/// Slot key the pipeline publishes prediction records under
pub const PREDICTIONS_KEY: &str = "predictions";

const HISTORY_CAPACITY: usize = 1000;

/// A published record together with its write version
///
/// The version is bumped on every write to the same key, so readers can
/// cheaply detect staleness without comparing payloads.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionedRecord {
    pub version: u64,
    pub record: PredictionRecord,
}

/// Single-writer/multi-reader value store for published records
pub struct SlotStore {
    slots: DashMap<String, VersionedRecord>,
    latest_tx: watch::Sender<Option<PredictionRecord>>,
    history: RwLock<VecDeque<PredictionRecord>>,
}

impl SlotStore {
    pub fn new() -> Arc<Self> {
        let (latest_tx, _) = watch::channel(None);
        Arc::new(Self {
            slots: DashMap::new(),
            latest_tx,
            history: RwLock::new(VecDeque::with_capacity(HISTORY_CAPACITY)),
        })
    }

    /// Write a record under `key`. Each write is atomically visible as a
    /// whole; readers never observe a torn record.
    pub fn store(&self, key: &str, record: PredictionRecord) -> PublishResult<()> {
        self.slots
            .entry(key.to_string())
            .and_modify(|slot| {
                slot.version += 1;
                slot.record = record.clone();
            })
            .or_insert_with(|| VersionedRecord {
                version: 1,
                record: record.clone(),
            });

        // send_replace never fails, even with no subscribers
        self.latest_tx.send_replace(Some(record.clone()));

        let mut history = self
            .history
            .write()
            .map_err(|e| PublishError::SinkUnavailable(e.to_string()))?;
        if history.len() == HISTORY_CAPACITY {
            history.pop_front();
        }
        history.push_back(record);
        Ok(())
    }

    /// Latest record under `key`, with its version
    pub fn load(&self, key: &str) -> Option<VersionedRecord> {
        self.slots.get(key).map(|slot| slot.clone())
    }

    /// Subscribe to the latest published record
    pub fn subscribe(&self) -> watch::Receiver<Option<PredictionRecord>> {
        self.latest_tx.subscribe()
    }

    /// Copy of the retained history, oldest first
    pub fn history(&self) -> Vec<PredictionRecord> {
        self.history
            .read()
            .map(|h| h.iter().cloned().collect())
            .unwrap_or_default()
    }
}

/// [`SnapshotPublisher`] adapter writing to a [`SlotStore`]
pub struct SlotPublisher {
    store: Arc<SlotStore>,
}

impl SlotPublisher {
    pub fn new(store: Arc<SlotStore>) -> Self {
        Self { store }
    }
}

impl SnapshotPublisher for SlotPublisher {
    fn publish(&self, record: &PredictionRecord) -> PublishResult<()> {
        self.store.store(PREDICTIONS_KEY, record.clone())
    }

    fn name(&self) -> &str {
        "SlotPublisher"
    }
}
