//! The mutable interpreter record.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::command::{Command, Labels, index_labels};
use crate::value::Value;

/// An immutable, shareable command sequence.
pub type Program = Arc<Vec<Command>>;

/// Script variables.
pub type Variables = HashMap<String, Value>;

/// A saved caller context, pushed by a scene call and popped by a return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// The caller's program.
    pub program: Program,
    /// The caller's cursor (already past the call command).
    pub cursor: usize,
    /// The caller's label table.
    pub labels: Labels,
    /// The caller's scene name.
    pub scene: String,
}

/// The background track currently playing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Asset path.
    pub path: String,
    /// Whether the track loops.
    #[serde(rename = "loop")]
    pub looping: bool,
}

/// Transient presentation state mirrored into snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationOverlay {
    /// Current background image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Current background track.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track: Option<Track>,
}

impl PresentationOverlay {
    /// Returns `true` when neither an image nor a track is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.image.is_none() && self.track.is_none()
    }
}

/// The single mutable interpreter record.
///
/// Invariant: `cursor <= program.len()`.
#[derive(Debug, Clone)]
pub struct ExecutionState {
    /// Commands of the active scene.
    pub program: Program,
    /// Index of the next command to dispatch.
    pub cursor: usize,
    /// Script variables.
    pub variables: Variables,
    /// Label table of `program`.
    pub labels: Labels,
    /// Saved caller contexts, innermost last.
    pub call_stack: Vec<Frame>,
    /// Name of the active scene.
    pub current_scene: String,
    /// Presentation overlay.
    pub overlay: PresentationOverlay,
}

impl ExecutionState {
    /// Creates the state for a fresh script instance.
    #[must_use]
    pub fn new(scene: impl Into<String>, program: Vec<Command>) -> Self {
        let labels = index_labels(&program);
        Self {
            program: Arc::new(program),
            cursor: 0,
            variables: HashMap::new(),
            labels,
            call_stack: Vec::new(),
            current_scene: scene.into(),
            overlay: PresentationOverlay::default(),
        }
    }

    /// Returns `true` once the cursor has run off the end of the program.
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.cursor >= self.program.len()
    }

    /// Replaces the program with a freshly loaded scene: cursor to 0, labels
    /// rebuilt, overlay cleared.
    pub fn install(&mut self, scene: impl Into<String>, program: Vec<Command>) {
        self.labels = index_labels(&program);
        self.program = Arc::new(program);
        self.cursor = 0;
        self.current_scene = scene.into();
        self.overlay = PresentationOverlay::default();
    }

    /// Saves the current program position onto the call stack.
    pub fn push_frame(&mut self) {
        self.call_stack.push(Frame {
            program: Arc::clone(&self.program),
            cursor: self.cursor,
            labels: self.labels.clone(),
            scene: self.current_scene.clone(),
        });
    }

    /// Restores the innermost caller context. Returns `false` when the call
    /// stack is empty, leaving the state untouched.
    pub fn pop_frame(&mut self) -> bool {
        let Some(frame) = self.call_stack.pop() else {
            return false;
        };
        self.program = frame.program;
        self.cursor = frame.cursor;
        self.labels = frame.labels;
        self.current_scene = frame.scene;
        true
    }

    /// Moves the cursor to a label. Returns `false` when the label is unknown.
    pub fn jump_to(&mut self, label: &str) -> bool {
        match self.labels.get(label) {
            Some(&index) => {
                self.cursor = index;
                true
            }
            None => false,
        }
    }
}
