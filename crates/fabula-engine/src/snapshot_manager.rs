//! Captures and restores resumable execution state.

use fabula_core::error::SnapshotError;
use fabula_core::event::PresentationEvent;
use fabula_core::port::PresentationPort;
use fabula_core::scene::SceneLoader;
use fabula_core::snapshot::Snapshot;
use fabula_core::state::{ExecutionState, PresentationOverlay};
use tracing::debug;

/// Takes a deep copy of the resumable parts of `state`.
///
/// Snapshots are only taken while a command is suspended, after the cursor
/// has moved past it, so the resume index points back at that command.
/// Restoring replays it: a pending `say` is shown again, a pending choice is
/// offered again.
#[must_use]
pub fn capture(state: &ExecutionState) -> Snapshot {
    Snapshot {
        variables: state.variables.clone(),
        scene: state.current_scene.clone(),
        resume_index: state.cursor.saturating_sub(1),
        call_stack: state.call_stack.clone(),
        labels: state.labels.clone(),
        overlay: state.overlay.clone(),
        captured_cursor: state.cursor,
    }
}

/// Replaces `state` with `snapshot` and replays its overlay to `port`.
///
/// When the snapshot names another scene it is loaded first; if that fails
/// `state` is left untouched. Within the same scene the live program and
/// labels are kept.
///
/// # Errors
///
/// Returns `SnapshotError::SceneReload` if the saved scene cannot be loaded.
pub fn restore(
    state: &mut ExecutionState,
    snapshot: &Snapshot,
    scenes: &dyn SceneLoader,
    port: &dyn PresentationPort,
) -> Result<(), SnapshotError> {
    let reloaded = if snapshot.scene == state.current_scene {
        None
    } else {
        Some(scenes.load(&snapshot.scene)?)
    };

    // Installing a program resets the overlay; keep what the client shows.
    let live = std::mem::take(&mut state.overlay);
    if let Some(program) = reloaded {
        state.install(snapshot.scene.clone(), program);
    }
    state.variables = snapshot.variables.clone();
    state.call_stack = snapshot.call_stack.clone();
    state.cursor = snapshot.resume_index.min(state.program.len());
    replay_overlay(&live, &snapshot.overlay, port);
    state.overlay = snapshot.overlay.clone();

    debug!(
        scene = %state.current_scene,
        cursor = state.cursor,
        depth = state.call_stack.len(),
        "snapshot restored"
    );
    Ok(())
}

/// Clears the media the live or saved overlay involves, then re-applies the
/// saved image and track. Nothing is emitted when both are empty.
fn replay_overlay(
    live: &PresentationOverlay,
    overlay: &PresentationOverlay,
    port: &dyn PresentationPort,
) {
    if live.image.is_some() || overlay.image.is_some() {
        port.emit(PresentationEvent::HideImage {});
    }
    if live.track.is_some() || overlay.track.is_some() {
        port.emit(PresentationEvent::StopBgm {});
        port.emit(PresentationEvent::StopVoice {});
    }
    if let Some(path) = &overlay.image {
        port.emit(PresentationEvent::ShowImage { path: path.clone() });
    }
    if let Some(track) = &overlay.track {
        port.emit(PresentationEvent::PlayBgm {
            path: track.path.clone(),
            looping: track.looping,
        });
    }
}
