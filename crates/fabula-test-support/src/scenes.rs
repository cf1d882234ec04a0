//! Test scene loaders.

use std::collections::HashMap;
use std::sync::Mutex;

use fabula_core::command::Command;
use fabula_core::error::SceneError;
use fabula_core::scene::SceneLoader;

/// A scene loader backed by a map of scene name → commands. Records every
/// requested name.
#[derive(Debug, Default)]
pub struct InMemorySceneLoader {
    scenes: HashMap<String, Vec<Command>>,
    malformed: Vec<String>,
    requested: Mutex<Vec<String>>,
}

impl InMemorySceneLoader {
    /// Create an empty loader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a scene.
    #[must_use]
    pub fn with_scene(mut self, name: &str, commands: Vec<Command>) -> Self {
        self.scenes.insert(name.to_owned(), commands);
        self
    }

    /// Registers a scene name that fails to parse.
    #[must_use]
    pub fn with_malformed(mut self, name: &str) -> Self {
        self.malformed.push(name.to_owned());
        self
    }

    /// Returns every scene name requested so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl SceneLoader for InMemorySceneLoader {
    fn load(&self, scene: &str) -> Result<Vec<Command>, SceneError> {
        self.requested.lock().unwrap().push(scene.to_owned());
        if self.malformed.iter().any(|name| name == scene) {
            return Err(SceneError::Malformed {
                scene: scene.to_owned(),
                reason: "unexpected token".to_owned(),
            });
        }
        self.scenes
            .get(scene)
            .cloned()
            .ok_or_else(|| SceneError::NotFound(scene.to_owned()))
    }
}

/// A scene loader that never finds anything.
#[derive(Debug)]
pub struct FailingSceneLoader;

impl SceneLoader for FailingSceneLoader {
    fn load(&self, scene: &str) -> Result<Vec<Command>, SceneError> {
        Err(SceneError::NotFound(scene.to_owned()))
    }
}
