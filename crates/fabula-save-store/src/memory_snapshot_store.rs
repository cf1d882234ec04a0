//! In-memory implementation of the `SnapshotStore` trait.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use fabula_core::error::SnapshotError;
use fabula_core::snapshot::{SaveRecord, SlotSummary};
use fabula_core::store::SnapshotStore;
use tracing::debug;

/// Save slots held in memory, shared by every session of the process.
/// Writing a slot replaces whatever it held.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    slots: Mutex<BTreeMap<u32, SaveRecord>>,
}

impl MemorySnapshotStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> Result<MutexGuard<'_, BTreeMap<u32, SaveRecord>>, SnapshotError> {
        self.slots
            .lock()
            .map_err(|_| SnapshotError::Store("save slots lock poisoned".to_owned()))
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn put(&self, record: SaveRecord) -> Result<(), SnapshotError> {
        debug!(slot = record.slot, name = %record.name, "writing save slot");
        self.slots()?.insert(record.slot, record);
        Ok(())
    }

    fn get(&self, slot: u32) -> Result<Option<SaveRecord>, SnapshotError> {
        Ok(self.slots()?.get(&slot).cloned())
    }

    fn list(&self) -> Result<Vec<SlotSummary>, SnapshotError> {
        Ok(self.slots()?.values().map(SaveRecord::summary).collect())
    }
}
