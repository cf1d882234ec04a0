//! Save slot storage abstraction.

use crate::error::SnapshotError;
use crate::snapshot::{SaveRecord, SlotSummary};

/// Keyed storage for save records.
pub trait SnapshotStore: Send + Sync {
    /// Writes `record` into its slot, replacing any previous save.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::Store` if the backing storage fails.
    fn put(&self, record: SaveRecord) -> Result<(), SnapshotError>;

    /// Reads the record in `slot`, if any.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::Store` if the backing storage fails.
    fn get(&self, slot: u32) -> Result<Option<SaveRecord>, SnapshotError>;

    /// Lists all occupied slots ordered by slot id.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::Store` if the backing storage fails.
    fn list(&self) -> Result<Vec<SlotSummary>, SnapshotError>;
}
