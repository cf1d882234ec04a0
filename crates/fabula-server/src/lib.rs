//! Fabula Server — serves script sessions over WebSocket.

pub mod bridge;
pub mod config;
pub mod error;
pub mod routes;
pub mod scenes;
pub mod session;
pub mod state;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::play::router())
        .nest("/api/v1/saves", routes::saves::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
