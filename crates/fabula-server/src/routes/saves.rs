//! Save slot listing.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use fabula_core::snapshot::SlotSummary;
use tracing::instrument;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /
#[instrument(skip(state))]
async fn list_saves(State(state): State<AppState>) -> Result<Json<Vec<SlotSummary>>, ApiError> {
    Ok(Json(state.saves.list()?))
}

/// Returns the router for save slots.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_saves))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use fabula_core::error::SnapshotError;
    use fabula_core::snapshot::SaveRecord;
    use fabula_core::store::SnapshotStore;
    use fabula_test_support::{FailingSceneLoader, FixedClock};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::config::ServerConfig;

    struct BrokenStore;

    impl SnapshotStore for BrokenStore {
        fn put(&self, _record: SaveRecord) -> Result<(), SnapshotError> {
            Err(SnapshotError::Store("unavailable".into()))
        }

        fn get(&self, _slot: u32) -> Result<Option<SaveRecord>, SnapshotError> {
            Err(SnapshotError::Store("unavailable".into()))
        }

        fn list(&self) -> Result<Vec<SlotSummary>, SnapshotError> {
            Err(SnapshotError::Store("unavailable".into()))
        }
    }

    #[tokio::test]
    async fn test_store_failure_returns_500_with_error_code() {
        // Arrange
        let state = AppState::new(
            ServerConfig::default(),
            Arc::new(FailingSceneLoader),
            Arc::new(BrokenStore),
            Arc::new(FixedClock::default()),
        );
        let app = router().with_state(state);
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();

        // Act
        let response = app.oneshot(request).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(json["error"], "store_error");
    }
}
