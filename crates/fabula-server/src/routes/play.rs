//! WebSocket endpoint for script sessions.

use axum::extract::State;
use axum::extract::ws::WebSocketUpgrade;
use axum::response::Response;
use axum::{Router, routing::get};

use crate::session::run_session;
use crate::state::AppState;

/// Largest inbound WebSocket message accepted.
pub const MAX_MESSAGE_SIZE: usize = 10 * 1024 * 1024;

/// GET /ws
async fn play(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.max_message_size(MAX_MESSAGE_SIZE)
        .on_upgrade(move |socket| run_session(socket, state))
}

/// Returns the router for the play socket.
pub fn router() -> Router<AppState> {
    Router::new().route("/ws", get(play))
}
