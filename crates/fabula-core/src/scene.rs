//! Scene loading abstraction.

use crate::command::Command;
use crate::error::SceneError;

/// Produces the command sequence of a named scene.
///
/// Parsing script text is the implementor's concern; the engine only sees
/// ready-made commands.
pub trait SceneLoader: Send + Sync {
    /// Loads the commands of `scene`.
    ///
    /// # Errors
    ///
    /// Returns `SceneError::NotFound` if no script exists for the name, or
    /// `SceneError::Malformed` if it cannot be parsed.
    fn load(&self, scene: &str) -> Result<Vec<Command>, SceneError>;
}
