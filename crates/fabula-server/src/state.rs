//! Shared application state.

use std::sync::Arc;

use fabula_core::clock::Clock;
use fabula_core::rng::SystemRng;
use fabula_core::scene::SceneLoader;
use fabula_core::store::SnapshotStore;

use crate::config::ServerConfig;

/// Application state shared across all request handlers and sessions.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Scene source for every session.
    pub scenes: Arc<dyn SceneLoader>,
    /// Save slots, shared process-wide.
    pub saves: Arc<dyn SnapshotStore>,
    /// Clock for save timestamps.
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        config: ServerConfig,
        scenes: Arc<dyn SceneLoader>,
        saves: Arc<dyn SnapshotStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            scenes,
            saves,
            clock,
        }
    }

    /// A fresh dice generator for one session.
    #[must_use]
    pub fn session_rng(&self) -> SystemRng {
        self.config
            .rng_seed
            .map_or_else(SystemRng::from_os, SystemRng::seeded)
    }
}
