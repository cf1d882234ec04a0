//! Fabula Save Store — process-wide save slot storage.

pub mod memory_snapshot_store;

pub use memory_snapshot_store::MemorySnapshotStore;
