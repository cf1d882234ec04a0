//! Scene files on disk.

use std::io::ErrorKind;
use std::path::PathBuf;

use fabula_core::command::Command;
use fabula_core::error::SceneError;
use fabula_core::scene::SceneLoader;
use tracing::debug;

/// Loads pre-parsed scenes from `<dir>/<name>.yaml`, `.yml` or `.json`,
/// tried in that order.
#[derive(Debug, Clone)]
pub struct FileSceneLoader {
    dir: PathBuf,
}

impl FileSceneLoader {
    /// Creates a loader reading from `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

// Scene names are plain identifiers, never paths.
fn is_valid_name(scene: &str) -> bool {
    !scene.is_empty() && !scene.contains(['/', '\\']) && !scene.contains("..")
}

fn malformed(scene: &str, reason: impl ToString) -> SceneError {
    SceneError::Malformed {
        scene: scene.to_owned(),
        reason: reason.to_string(),
    }
}

impl SceneLoader for FileSceneLoader {
    fn load(&self, scene: &str) -> Result<Vec<Command>, SceneError> {
        if !is_valid_name(scene) {
            return Err(SceneError::NotFound(scene.to_owned()));
        }

        for extension in ["yaml", "yml", "json"] {
            let path = self.dir.join(format!("{scene}.{extension}"));
            let source = match std::fs::read_to_string(&path) {
                Ok(source) => source,
                Err(err) if err.kind() == ErrorKind::NotFound => continue,
                Err(err) => return Err(malformed(scene, err)),
            };
            debug!(scene, path = %path.display(), "scene file read");
            return if extension == "json" {
                serde_json::from_str(&source).map_err(|err| malformed(scene, err))
            } else {
                serde_yaml::from_str(&source).map_err(|err| malformed(scene, err))
            };
        }

        Err(SceneError::NotFound(scene.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fabula_core::command::SceneMode;
    use tempfile::{TempDir, tempdir};

    fn write(dir: &TempDir, file: &str, contents: &str) {
        std::fs::write(dir.path().join(file), contents).unwrap();
    }

    #[test]
    fn test_loads_yaml_scene() {
        // Arrange
        let dir = tempdir().unwrap();
        write(
            &dir,
            "main.yaml",
            r"
- kind: say
  text: Hello, {name}
  speaker: Guide
- kind: set_var
  name: gold
  value: 10
- kind: scene
  name: cave
  mode: call
",
        );
        let loader = FileSceneLoader::new(dir.path());

        // Act
        let commands = loader.load("main").unwrap();

        // Assert
        assert_eq!(commands.len(), 3);
        assert_eq!(
            commands[1],
            Command::SetVar {
                name: "gold".to_owned(),
                value: "10".to_owned()
            }
        );
        assert_eq!(
            commands[2],
            Command::Scene {
                name: "cave".to_owned(),
                mode: SceneMode::Call
            }
        );
    }

    #[test]
    fn test_loads_json_scene() {
        let dir = tempdir().unwrap();
        write(&dir, "end.json", r#"[{"kind": "return"}]"#);

        let commands = FileSceneLoader::new(dir.path()).load("end").unwrap();

        assert_eq!(commands, vec![Command::Return]);
    }

    #[test]
    fn test_missing_scene_is_not_found() {
        let dir = tempdir().unwrap();

        let result = FileSceneLoader::new(dir.path()).load("nowhere");

        assert_eq!(result, Err(SceneError::NotFound("nowhere".to_owned())));
    }

    #[test]
    fn test_unparseable_scene_is_malformed() {
        let dir = tempdir().unwrap();
        write(&dir, "broken.yaml", "- kind: teleport\n");

        let result = FileSceneLoader::new(dir.path()).load("broken");

        assert!(matches!(result, Err(SceneError::Malformed { .. })));
    }

    #[test]
    fn test_path_like_names_are_not_found() {
        let dir = tempdir().unwrap();
        let loader = FileSceneLoader::new(dir.path());

        assert!(matches!(loader.load("../etc/passwd"), Err(SceneError::NotFound(_))));
        assert!(matches!(loader.load("a/b"), Err(SceneError::NotFound(_))));
        assert!(matches!(loader.load(""), Err(SceneError::NotFound(_))));
    }
}
