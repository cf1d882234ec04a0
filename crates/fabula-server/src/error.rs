//! Fabula server error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use fabula_core::error::SnapshotError;
use serde::Serialize;
use thiserror::Error;

/// Startup and runtime errors for the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `SnapshotError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub SnapshotError);

impl From<SnapshotError> for ApiError {
    fn from(err: SnapshotError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            SnapshotError::EmptySlot(_) => (StatusCode::NOT_FOUND, "empty_slot"),
            SnapshotError::SceneReload(_) => (StatusCode::CONFLICT, "scene_reload_failed"),
            SnapshotError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "store_error"),
        };

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fabula_core::error::SceneError;

    fn status_of(err: SnapshotError) -> StatusCode {
        ApiError(err).into_response().status()
    }

    #[test]
    fn test_empty_slot_maps_to_404() {
        assert_eq!(status_of(SnapshotError::EmptySlot(3)), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_scene_reload_maps_to_409() {
        assert_eq!(
            status_of(SnapshotError::SceneReload(SceneError::NotFound("cave".into()))),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_store_failure_maps_to_500() {
        assert_eq!(
            status_of(SnapshotError::Store("lock poisoned".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
