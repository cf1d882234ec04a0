//! Shared test helpers for server integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use fabula_core::store::SnapshotStore;
use fabula_save_store::MemorySnapshotStore;
use fabula_server::config::ServerConfig;
use fabula_server::state::AppState;
use fabula_test_support::{FixedClock, InMemorySceneLoader};
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Build the full app with an in-memory scene loader and the given store.
pub fn build_test_app_with_store(saves: Arc<dyn SnapshotStore>) -> Router {
    let app_state = AppState::new(
        ServerConfig::default(),
        Arc::new(InMemorySceneLoader::new()),
        saves,
        Arc::new(FixedClock::default()),
    );
    fabula_server::app(app_state)
}

/// Build the full app with an empty save store.
pub fn build_test_app() -> Router {
    build_test_app_with_store(Arc::new(MemorySnapshotStore::new()))
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
