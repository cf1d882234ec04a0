//! One WebSocket connection driving one script instance.

use axum::extract::ws::{Message, WebSocket};
use fabula_core::event::PresentationEvent;
use fabula_core::port::PresentationPort;
use fabula_engine::{Interpreter, Outcome, Services};
use tokio::sync::mpsc;
use tracing::{Instrument, Span, debug, info, info_span, warn};
use uuid::Uuid;

use crate::bridge::{ChannelPort, ClientMessage};
use crate::state::AppState;

/// Runs a session until the script ends or the client leaves.
///
/// The interpreter runs on a blocking thread; this task pumps its events to
/// the socket and client messages back to it.
pub async fn run_session(socket: WebSocket, state: AppState) {
    let session_id = Uuid::new_v4();
    let span = info_span!("session", %session_id);
    pump(socket, state).instrument(span).await;
}

async fn pump(mut socket: WebSocket, state: AppState) {
    info!("client connected");
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (message_tx, message_rx) = mpsc::unbounded_channel();
    let port = ChannelPort::new(event_tx, message_rx);

    let span = Span::current();
    let engine = tokio::task::spawn_blocking(move || {
        let _entered = span.enter();
        run_script(&port, &state)
    });

    loop {
        tokio::select! {
            event = event_rx.recv() => {
                // `None` once the script thread has dropped its port.
                let Some(event) = event else { break };
                match serde_json::to_string(&event) {
                    Ok(text) => {
                        if socket.send(Message::Text(text.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(err) => warn!(error = %err, "failed to serialize event"),
                }
            }
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Text(text))) => match ClientMessage::parse(text.as_str()) {
                    Some(message) => {
                        if message_tx.send(message).is_err() {
                            break;
                        }
                    }
                    None => debug!("dropping malformed client message"),
                },
                Some(Ok(Message::Close(_)) | Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }

    // Closing the inbound queue wakes a pending wait with `Wake::Closed`.
    drop(message_tx);
    match engine.await {
        Ok(Some(outcome)) => info!(?outcome, "session ended"),
        Ok(None) => info!("session ended before the script started"),
        Err(err) => warn!(error = %err, "script thread failed"),
    }
}

fn run_script(port: &ChannelPort, state: &AppState) -> Option<Outcome> {
    let mut rng = state.session_rng();
    let services = Services {
        port,
        scenes: state.scenes.as_ref(),
        saves: state.saves.as_ref(),
        clock: state.clock.as_ref(),
    };

    match Interpreter::start(&state.config.entry_scene, services, &mut rng) {
        Ok(mut interpreter) => Some(interpreter.run()),
        Err(err) => {
            warn!(entry_scene = %state.config.entry_scene, error = %err, "entry scene failed to load");
            port.emit(PresentationEvent::Error {
                message: err.to_string(),
            });
            None
        }
    }
}
