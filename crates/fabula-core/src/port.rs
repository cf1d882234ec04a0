//! Presentation port abstraction.
//!
//! The interpreter thread is the only writer of execution state, so a port
//! never services save/load requests itself. A blocking wait instead wakes up
//! with the request and the interpreter applies it before deciding whether
//! to keep waiting.

use serde::{Deserialize, Serialize};

use crate::event::PresentationEvent;

/// A client request to write a save slot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SaveRequest {
    /// Target slot.
    #[serde(default)]
    pub slot: u32,
    /// Save name; defaults to `Save <slot>`.
    #[serde(default)]
    pub name: Option<String>,
}

/// A client request to restore a save slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoadRequest {
    /// Source slot.
    #[serde(default)]
    pub slot: u32,
}

/// Why a blocking wait returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Wake<T> {
    /// The awaited response arrived.
    Reply(T),
    /// A save request arrived while waiting.
    Save(SaveRequest),
    /// A load request arrived while waiting.
    Load(LoadRequest),
    /// The client is gone; no further responses will arrive.
    Closed,
}

/// Contract between the interpreter and a presentation transport.
///
/// Waits block the calling thread until a matching response, a save/load
/// request, or disconnection. Unrelated messages never end a wait.
pub trait PresentationPort: Send + Sync {
    /// Sends an event to the client (fire-and-forget).
    fn emit(&self, event: PresentationEvent);

    /// Blocks until the client asks to continue.
    fn wait_continue(&self) -> Wake<()>;

    /// Blocks until the client selects one of `valid_ids`.
    fn wait_choice(&self, valid_ids: &[String]) -> Wake<String>;

    /// Blocks until the client submits a line of text.
    fn wait_text_input(&self, prompt: &str) -> Wake<String>;
}
