//! Hand-off between the async socket and the blocking interpreter thread.

use std::sync::Mutex;

use fabula_core::event::PresentationEvent;
use fabula_core::port::{LoadRequest, PresentationPort, SaveRequest, Wake};
use serde::Deserialize;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::debug;

/// A message received from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientMessage {
    /// `NEXT`
    Next,
    /// `CHOICE_SELECTED { id }`
    ChoiceSelected(String),
    /// `INPUT_REPLY { value }`
    InputReply(String),
    /// `SAVE_REQUEST { slot, name }`
    Save(SaveRequest),
    /// `LOAD_REQUEST { slot }`
    Load(LoadRequest),
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: serde_json::Value,
}

#[derive(Deserialize)]
struct ChoicePayload {
    id: String,
}

#[derive(Deserialize)]
struct InputPayload {
    #[serde(default)]
    value: serde_json::Value,
}

impl ClientMessage {
    /// Parses a wire message. Returns `None` for malformed JSON, unknown
    /// types and payloads of the wrong shape.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let envelope: Envelope = serde_json::from_str(text).ok()?;
        let payload = if envelope.payload.is_null() {
            serde_json::Value::Object(serde_json::Map::new())
        } else {
            envelope.payload
        };
        match envelope.kind.as_str() {
            "NEXT" => Some(ClientMessage::Next),
            "CHOICE_SELECTED" => serde_json::from_value::<ChoicePayload>(payload)
                .ok()
                .map(|p| ClientMessage::ChoiceSelected(p.id)),
            "INPUT_REPLY" => serde_json::from_value::<InputPayload>(payload)
                .ok()
                .map(|p| ClientMessage::InputReply(input_text(p.value))),
            "SAVE_REQUEST" => serde_json::from_value(payload).ok().map(ClientMessage::Save),
            "LOAD_REQUEST" => serde_json::from_value(payload).ok().map(ClientMessage::Load),
            _ => None,
        }
    }
}

// Clients send numbers as JSON numbers or as strings.
fn input_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(text) => text,
        other => other.to_string(),
    }
}

/// A `PresentationPort` over two unbounded channels.
///
/// Waits block the interpreter thread on the inbound queue. Save and load
/// requests are handed back as wake-ups rather than applied here, so only
/// the interpreter thread mutates execution state.
#[derive(Debug)]
pub struct ChannelPort {
    outbound: UnboundedSender<PresentationEvent>,
    inbound: Mutex<UnboundedReceiver<ClientMessage>>,
}

impl ChannelPort {
    /// Creates a port sending events to `outbound` and reading client
    /// messages from `inbound`.
    #[must_use]
    pub fn new(
        outbound: UnboundedSender<PresentationEvent>,
        inbound: UnboundedReceiver<ClientMessage>,
    ) -> Self {
        Self {
            outbound,
            inbound: Mutex::new(inbound),
        }
    }

    fn next_wake<T>(&self, mut accept: impl FnMut(ClientMessage) -> Option<T>) -> Wake<T> {
        let Ok(mut inbound) = self.inbound.lock() else {
            return Wake::Closed;
        };
        while let Some(message) = inbound.blocking_recv() {
            match message {
                ClientMessage::Save(request) => return Wake::Save(request),
                ClientMessage::Load(request) => return Wake::Load(request),
                other => match accept(other) {
                    Some(reply) => return Wake::Reply(reply),
                    None => debug!("ignoring message that does not answer the current wait"),
                },
            }
        }
        Wake::Closed
    }
}

impl PresentationPort for ChannelPort {
    fn emit(&self, event: PresentationEvent) {
        if self.outbound.send(event).is_err() {
            debug!("client gone, dropping event");
        }
    }

    fn wait_continue(&self) -> Wake<()> {
        self.next_wake(|message| matches!(message, ClientMessage::Next).then_some(()))
    }

    fn wait_choice(&self, valid_ids: &[String]) -> Wake<String> {
        self.next_wake(|message| match message {
            ClientMessage::ChoiceSelected(id) if valid_ids.contains(&id) => Some(id),
            _ => None,
        })
    }

    fn wait_text_input(&self, _prompt: &str) -> Wake<String> {
        self.next_wake(|message| match message {
            ClientMessage::InputReply(value) => Some(value),
            _ => None,
        })
    }
}
