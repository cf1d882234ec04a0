//! Server configuration read from the environment.

use std::path::PathBuf;

use crate::error::AppError;

/// Runtime settings for the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Bind address (`HOST`).
    pub host: String,
    /// Bind port (`PORT`).
    pub port: u16,
    /// Directory holding scene files (`SCENE_DIR`).
    pub scene_dir: PathBuf,
    /// Scene each session starts in (`ENTRY_SCENE`).
    pub entry_scene: String,
    /// Seed for session dice (`RNG_SEED`); OS entropy when unset.
    pub rng_seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8765,
            scene_dir: PathBuf::from("."),
            entry_scene: "main".to_string(),
            rng_seed: None,
        }
    }
}

impl ServerConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `PORT` or `RNG_SEED` does not parse.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, falling back to defaults
    /// for unset keys.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `PORT` or `RNG_SEED` does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let defaults = Self::default();
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => defaults.port,
        };
        let rng_seed = lookup("RNG_SEED")
            .map(|raw| {
                raw.parse()
                    .map_err(|e| AppError::Config(format!("RNG_SEED must be a valid u64: {e}")))
            })
            .transpose()?;

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            scene_dir: lookup("SCENE_DIR").map_or(defaults.scene_dir, PathBuf::from),
            entry_scene: lookup("ENTRY_SCENE").unwrap_or(defaults.entry_scene),
            rng_seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.port, 8765);
        assert_eq!(config.entry_scene, "main");
    }

    #[test]
    fn test_reads_every_variable() {
        // Arrange
        let lookup = lookup_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("SCENE_DIR", "/srv/scenes"),
            ("ENTRY_SCENE", "prologue"),
            ("RNG_SEED", "42"),
        ]);

        // Act
        let config = ServerConfig::from_lookup(lookup).unwrap();

        // Assert
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
        assert_eq!(config.scene_dir, PathBuf::from("/srv/scenes"));
        assert_eq!(config.entry_scene, "prologue");
        assert_eq!(config.rng_seed, Some(42));
    }

    #[test]
    fn test_invalid_port_is_a_config_error() {
        let result = ServerConfig::from_lookup(lookup_from(&[("PORT", "eighty")]));

        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_invalid_seed_is_a_config_error() {
        let result = ServerConfig::from_lookup(lookup_from(&[("RNG_SEED", "-1")]));

        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
