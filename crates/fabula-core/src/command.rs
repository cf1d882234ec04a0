//! The command model produced by the external script parser.
//!
//! Commands are immutable data. Serialization uses an internal `kind` tag so
//! pre-parsed scenes can be stored as YAML or JSON.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::value::Value;

/// Label name → index of the label command within its program.
pub type Labels = HashMap<String, usize>;

/// How a scene transition treats the current program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneMode {
    /// Replace the current program.
    Change,
    /// Push the current program onto the call stack, then replace it.
    Call,
}

impl fmt::Display for SceneMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneMode::Change => f.write_str("change"),
            SceneMode::Call => f.write_str("call"),
        }
    }
}

/// One selectable entry of a branching menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    /// Display text.
    pub text: String,
    /// Label jumped to when selected. Doubles as the option id.
    pub target: String,
    /// Visibility condition.
    #[serde(default, deserialize_with = "optional_expression")]
    pub when: Option<String>,
    /// Enabled condition; a visible but disabled option is shown greyed out.
    #[serde(default, deserialize_with = "optional_expression")]
    pub enable: Option<String>,
}

/// A branching menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    /// Options in display order.
    pub options: Vec<ChoiceOption>,
    /// Menu-wide visibility condition.
    #[serde(default, deserialize_with = "optional_expression")]
    pub when: Option<String>,
    /// Menu-wide enabled condition.
    #[serde(default, deserialize_with = "optional_expression")]
    pub enable: Option<String>,
}

/// A single script command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Command {
    /// A line of dialogue or narration.
    Say {
        /// Text with optional `{name}` interpolation markers.
        text: String,
        /// Speaker name, if any.
        #[serde(default)]
        speaker: Option<String>,
    },
    /// Assign the result of an expression to a variable.
    SetVar {
        /// Target variable.
        name: String,
        /// Expression source.
        #[serde(deserialize_with = "expression")]
        value: String,
    },
    /// Ask the client for a line of text.
    Input {
        /// Target variable.
        var: String,
        /// Prompt shown to the player.
        #[serde(default)]
        prompt: Option<String>,
    },
    /// Roll dice / evaluate arithmetic into a variable.
    Roll {
        /// Expression source, may contain `NdM` dice.
        #[serde(deserialize_with = "expression")]
        expr: String,
        /// Target variable; `rollResult` when absent.
        #[serde(default)]
        to: Option<String>,
    },
    /// A branching menu.
    Choose(Menu),
    /// Jump target marker.
    Label {
        /// Label name.
        name: String,
    },
    /// Unconditional jump to a label.
    Jump {
        /// Label name.
        target: String,
    },
    /// Transition to another scene.
    Scene {
        /// Scene name.
        name: String,
        /// Change or call.
        mode: SceneMode,
    },
    /// Return from a called scene.
    Return,
    /// Show a background image.
    ShowImage {
        /// Asset path.
        path: String,
    },
    /// Hide the background image.
    HideImage,
    /// Start background music.
    PlayBgm {
        /// Asset path.
        path: String,
        /// Whether the track loops.
        #[serde(rename = "loop", default = "default_loop")]
        looping: bool,
    },
    /// Stop background music.
    StopBgm,
    /// Play a one-shot sound effect.
    PlaySfx {
        /// Asset path.
        path: String,
    },
    /// Play a voice clip.
    PlayVoice {
        /// Asset path.
        path: String,
    },
    /// Stop the current voice clip.
    StopVoice,
}

impl Command {
    /// The kind name (for logging).
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Command::Say { .. } => "say",
            Command::SetVar { .. } => "set_var",
            Command::Input { .. } => "input",
            Command::Roll { .. } => "roll",
            Command::Choose(_) => "choose",
            Command::Label { .. } => "label",
            Command::Jump { .. } => "jump",
            Command::Scene { .. } => "scene",
            Command::Return => "return",
            Command::ShowImage { .. } => "show_image",
            Command::HideImage => "hide_image",
            Command::PlayBgm { .. } => "play_bgm",
            Command::StopBgm => "stop_bgm",
            Command::PlaySfx { .. } => "play_sfx",
            Command::PlayVoice { .. } => "play_voice",
            Command::StopVoice => "stop_voice",
        }
    }
}

/// Builds the label table for a program. A repeated label resolves to its
/// last occurrence.
#[must_use]
pub fn index_labels(program: &[Command]) -> Labels {
    program
        .iter()
        .enumerate()
        .filter_map(|(index, command)| match command {
            Command::Label { name } => Some((name.clone(), index)),
            _ => None,
        })
        .collect()
}

fn default_loop() -> bool {
    true
}

// Scene authors write `value: 5` as often as `value: "hp - 1"`.
fn expression<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(scalar_source)
}

fn optional_expression<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Value>::deserialize(deserializer).map(|value| value.map(scalar_source))
}

// `{:?}` keeps the exponent, so `1e20` does not come back as an integer
// literal too large to lex.
fn scalar_source(value: Value) -> String {
    match value {
        Value::Float(x) => format!("{x:?}"),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_labels_maps_names_to_positions() {
        let program = vec![
            Command::Label {
                name: "start".to_owned(),
            },
            Command::Say {
                text: "hi".to_owned(),
                speaker: None,
            },
            Command::Label {
                name: "end".to_owned(),
            },
        ];

        let labels = index_labels(&program);

        assert_eq!(labels.len(), 2);
        assert_eq!(labels["start"], 0);
        assert_eq!(labels["end"], 2);
    }

    #[test]
    fn test_deserializes_tagged_commands_with_scalar_expressions() {
        let json = serde_json::json!([
            { "kind": "set_var", "name": "hp", "value": 10 },
            { "kind": "roll", "expr": "1d20+2", "to": "attack" },
            { "kind": "play_bgm", "path": "theme.ogg" },
            { "kind": "return" },
            { "kind": "choose", "when": true, "options": [
                { "text": "Go", "target": "go", "enable": "hp > 5" }
            ]}
        ]);

        let commands: Vec<Command> = serde_json::from_value(json).unwrap();

        assert_eq!(
            commands[0],
            Command::SetVar {
                name: "hp".to_owned(),
                value: "10".to_owned()
            }
        );
        assert_eq!(commands[1].kind(), "roll");
        assert_eq!(
            commands[2],
            Command::PlayBgm {
                path: "theme.ogg".to_owned(),
                looping: true
            }
        );
        assert_eq!(commands[3], Command::Return);
        match &commands[4] {
            Command::Choose(menu) => {
                assert_eq!(menu.when.as_deref(), Some("true"));
                assert_eq!(menu.options[0].enable.as_deref(), Some("hp > 5"));
                assert_eq!(menu.options[0].when, None);
            }
            other => panic!("expected Choose, got {other:?}"),
        }
    }

    #[test]
    fn test_float_scalars_keep_their_exponent() {
        // Arrange
        let json = serde_json::json!([
            { "kind": "set_var", "name": "big", "value": 1e20 },
            { "kind": "set_var", "name": "tiny", "value": 2.5e-7 },
            { "kind": "set_var", "name": "half", "value": 0.5 }
        ]);

        // Act
        let commands: Vec<Command> = serde_json::from_value(json).unwrap();

        // Assert
        let values: Vec<&str> = commands
            .iter()
            .map(|command| match command {
                Command::SetVar { value, .. } => value.as_str(),
                other => panic!("expected SetVar, got {other:?}"),
            })
            .collect();
        assert_eq!(values, vec!["1e20", "2.5e-7", "0.5"]);
    }
}
