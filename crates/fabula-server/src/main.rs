//! Fabula server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use fabula_core::clock::SystemClock;
use fabula_save_store::MemorySnapshotStore;
use fabula_server::config::ServerConfig;
use fabula_server::error::AppError;
use fabula_server::scenes::FileSceneLoader;
use fabula_server::state::AppState;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Fabula server");

    let config = ServerConfig::from_env()?;
    tracing::info!(
        scene_dir = %config.scene_dir.display(),
        entry_scene = %config.entry_scene,
        seeded = config.rng_seed.is_some(),
        "configuration loaded"
    );

    let app_state = AppState::new(
        config.clone(),
        Arc::new(FileSceneLoader::new(config.scene_dir.clone())),
        Arc::new(MemorySnapshotStore::new()),
        Arc::new(SystemClock),
    );

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, fabula_server::app(app_state)).await?;

    Ok(())
}
