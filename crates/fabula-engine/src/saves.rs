//! Save and load requests arriving from the client.

use fabula_core::clock::Clock;
use fabula_core::error::SnapshotError;
use fabula_core::event::PresentationEvent;
use fabula_core::port::{LoadRequest, PresentationPort, SaveRequest};
use fabula_core::scene::SceneLoader;
use fabula_core::snapshot::SaveRecord;
use fabula_core::state::ExecutionState;
use fabula_core::store::SnapshotStore;
use tracing::{info, warn};

use crate::ENGINE_VERSION;
use crate::snapshot_manager::{capture, restore};

/// Captures `state` into the requested slot, overwriting it.
///
/// # Errors
///
/// Returns `SnapshotError::Store` if the store rejects the write.
pub fn save_to_slot(
    state: &ExecutionState,
    request: &SaveRequest,
    store: &dyn SnapshotStore,
    clock: &dyn Clock,
) -> Result<SaveRecord, SnapshotError> {
    let name = request
        .name
        .clone()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| format!("Save {}", request.slot));
    let record = SaveRecord {
        slot: request.slot,
        name,
        saved_at: clock.now(),
        engine_version: ENGINE_VERSION.to_owned(),
        snapshot: capture(state),
    };
    store.put(record.clone())?;
    Ok(record)
}

/// Restores the requested slot into `state`.
///
/// # Errors
///
/// Returns `SnapshotError::EmptySlot` for an unused slot,
/// `SnapshotError::SceneReload` if the saved scene is gone, or
/// `SnapshotError::Store` if the store fails.
pub fn load_from_slot(
    state: &mut ExecutionState,
    request: LoadRequest,
    store: &dyn SnapshotStore,
    scenes: &dyn SceneLoader,
    port: &dyn PresentationPort,
) -> Result<SaveRecord, SnapshotError> {
    let record = store
        .get(request.slot)?
        .ok_or(SnapshotError::EmptySlot(request.slot))?;
    restore(state, &record.snapshot, scenes, port)?;
    Ok(record)
}

/// Saves and reports the outcome with `SAVE_SUCCESS` or `SAVE_ERROR`.
pub fn handle_save_request(
    state: &ExecutionState,
    request: &SaveRequest,
    store: &dyn SnapshotStore,
    clock: &dyn Clock,
    port: &dyn PresentationPort,
) {
    match save_to_slot(state, request, store, clock) {
        Ok(record) => {
            info!(slot = record.slot, scene = %record.snapshot.scene, "game saved");
            port.emit(PresentationEvent::SaveSuccess {
                slot: record.slot,
                message: format!("{} saved successfully", record.name),
                name: record.name,
            });
        }
        Err(err) => {
            warn!(slot = request.slot, error = %err, "save failed");
            port.emit(PresentationEvent::SaveError {
                message: format!("Save failed: {err}"),
            });
        }
    }
}

/// Loads and reports the outcome with `LOAD_SUCCESS` or `LOAD_ERROR`.
/// Returns `true` when `state` was replaced.
pub fn handle_load_request(
    state: &mut ExecutionState,
    request: LoadRequest,
    store: &dyn SnapshotStore,
    scenes: &dyn SceneLoader,
    port: &dyn PresentationPort,
) -> bool {
    match load_from_slot(state, request, store, scenes, port) {
        Ok(record) => {
            info!(slot = record.slot, scene = %record.snapshot.scene, "game loaded");
            port.emit(PresentationEvent::LoadSuccess {
                slot: record.slot,
                message: format!("{} loaded successfully", record.name),
                name: record.name,
            });
            true
        }
        Err(err @ SnapshotError::EmptySlot(_)) => {
            port.emit(PresentationEvent::LoadError {
                message: err.to_string(),
            });
            false
        }
        Err(err) => {
            warn!(slot = request.slot, error = %err, "load failed");
            port.emit(PresentationEvent::LoadError {
                message: format!("Load failed: {err}"),
            });
            false
        }
    }
}
