//! Domain error types.

use thiserror::Error;

/// Failure to produce a scene's command sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    /// No script exists for the scene name.
    #[error("scene '{0}' not found")]
    NotFound(String),

    /// The script exists but could not be parsed.
    #[error("scene '{scene}' is malformed: {reason}")]
    Malformed {
        /// The scene that failed to parse.
        scene: String,
        /// Parser diagnostic.
        reason: String,
    },
}

/// Recoverable failure inside a command handler. Caught at the loop
/// boundary and reported to the client; never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    /// A jump or menu selection named a label that does not exist.
    #[error("label '{0}' not found")]
    UnknownLabel(String),

    /// A scene transition could not load its target.
    #[error("could not load scene: {0}")]
    SceneLoad(#[from] SceneError),
}

/// Failure while saving or restoring a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// The requested slot holds no save.
    #[error("No save data in slot {0}")]
    EmptySlot(u32),

    /// The saved scene could not be reloaded.
    #[error("scene switch failed: {0}")]
    SceneReload(#[from] SceneError),

    /// The slot store failed.
    #[error("snapshot store error: {0}")]
    Store(String),
}
