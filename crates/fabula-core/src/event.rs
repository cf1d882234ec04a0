//! Presentation events emitted to the client.

use serde::{Deserialize, Serialize};

use crate::command::SceneMode;
use crate::value::Value;

/// One entry of a `CHOICES` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceItem {
    /// Option id (its jump target).
    pub id: String,
    /// Display text.
    pub text: String,
    /// Whether the option can currently be selected.
    pub enabled: bool,
}

/// Events sent to the presentation client.
///
/// Serialized as `{"type": "SHOW_TEXT", "payload": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PresentationEvent {
    /// A script instance started.
    Init {
        /// Entry scene name.
        title: String,
    },
    /// Show a line of dialogue.
    ShowText {
        /// Interpolated text.
        text: String,
        /// Speaker, if any.
        speaker: Option<String>,
    },
    /// Ask the player for text.
    InputRequest {
        /// Prompt text.
        prompt: String,
        /// Variable that will receive the answer.
        var: String,
    },
    /// Offer a menu.
    Choices {
        /// Visible options.
        items: Vec<ChoiceItem>,
    },
    /// Result of a roll command.
    RollResult {
        /// Expression as authored.
        expr: String,
        /// Variable the result was stored in.
        to: String,
        /// Rolled value.
        value: Value,
    },
    /// Show a background image.
    ShowImage {
        /// Asset path.
        path: String,
    },
    /// Hide the background image.
    HideImage {},
    /// Start background music.
    PlayBgm {
        /// Asset path.
        path: String,
        /// Whether the track loops.
        #[serde(rename = "loop")]
        looping: bool,
    },
    /// Stop background music.
    StopBgm {},
    /// Play a sound effect.
    PlaySfx {
        /// Asset path.
        path: String,
    },
    /// Play a voice clip.
    PlayVoice {
        /// Asset path.
        path: String,
    },
    /// Stop the voice clip.
    StopVoice {},
    /// The active scene changed.
    SceneChanged {
        /// New scene name.
        name: String,
        /// Transition mode.
        mode: SceneMode,
    },
    /// Informational / diagnostic message.
    Info {
        /// Message text.
        text: String,
    },
    /// The script finished.
    End {
        /// Closing message.
        text: String,
    },
    /// The script instance could not start.
    Error {
        /// Human-readable message.
        message: String,
    },
    /// A save request succeeded.
    SaveSuccess {
        /// Slot written.
        slot: u32,
        /// Save name.
        name: String,
        /// Human-readable message.
        message: String,
    },
    /// A save request failed.
    SaveError {
        /// Human-readable message.
        message: String,
    },
    /// A load request succeeded.
    LoadSuccess {
        /// Slot read.
        slot: u32,
        /// Save name.
        name: String,
        /// Human-readable message.
        message: String,
    },
    /// A load request failed.
    LoadError {
        /// Human-readable message.
        message: String,
    },
}

impl PresentationEvent {
    /// Convenience constructor for `INFO`.
    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        PresentationEvent::Info { text: text.into() }
    }

    /// Returns the wire type name.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            PresentationEvent::Init { .. } => "INIT",
            PresentationEvent::ShowText { .. } => "SHOW_TEXT",
            PresentationEvent::InputRequest { .. } => "INPUT_REQUEST",
            PresentationEvent::Choices { .. } => "CHOICES",
            PresentationEvent::RollResult { .. } => "ROLL_RESULT",
            PresentationEvent::ShowImage { .. } => "SHOW_IMAGE",
            PresentationEvent::HideImage {} => "HIDE_IMAGE",
            PresentationEvent::PlayBgm { .. } => "PLAY_BGM",
            PresentationEvent::StopBgm {} => "STOP_BGM",
            PresentationEvent::PlaySfx { .. } => "PLAY_SFX",
            PresentationEvent::PlayVoice { .. } => "PLAY_VOICE",
            PresentationEvent::StopVoice {} => "STOP_VOICE",
            PresentationEvent::SceneChanged { .. } => "SCENE_CHANGED",
            PresentationEvent::Info { .. } => "INFO",
            PresentationEvent::End { .. } => "END",
            PresentationEvent::Error { .. } => "ERROR",
            PresentationEvent::SaveSuccess { .. } => "SAVE_SUCCESS",
            PresentationEvent::SaveError { .. } => "SAVE_ERROR",
            PresentationEvent::LoadSuccess { .. } => "LOAD_SUCCESS",
            PresentationEvent::LoadError { .. } => "LOAD_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_with_type_and_payload() {
        let event = PresentationEvent::PlayBgm {
            path: "theme.ogg".to_owned(),
            looping: false,
        };

        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "type": "PLAY_BGM",
                "payload": { "path": "theme.ogg", "loop": false }
            })
        );
        assert_eq!(json["type"], event.event_type());
    }

    #[test]
    fn test_fieldless_events_carry_empty_payload() {
        let json = serde_json::to_value(PresentationEvent::HideImage {}).unwrap();

        assert_eq!(json, serde_json::json!({ "type": "HIDE_IMAGE", "payload": {} }));
    }

    #[test]
    fn test_roll_result_payload_keeps_value_type() {
        let event = PresentationEvent::RollResult {
            expr: "1d6".to_owned(),
            to: "rollResult".to_owned(),
            value: Value::Int(4),
        };

        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["payload"]["value"], 4);
        assert_eq!(json["payload"]["to"], "rollResult");
    }
}
