//! Snapshot values produced and consumed by save/load.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::command::Labels;
use crate::state::{Frame, PresentationOverlay, Variables};

/// A deep, value-semantics copy of the resumable parts of an execution state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Script variables.
    pub variables: Variables,
    /// Scene active at capture time.
    pub scene: String,
    /// Cursor to resume from: the last dispatched command, not the next one.
    pub resume_index: usize,
    /// Call stack frames, outermost first.
    pub call_stack: Vec<Frame>,
    /// Label table at capture time.
    pub labels: Labels,
    /// Presentation overlay; omitted when empty.
    #[serde(default, skip_serializing_if = "PresentationOverlay::is_empty")]
    pub overlay: PresentationOverlay,
    /// Raw cursor at capture time.
    pub captured_cursor: usize,
}

/// A snapshot stored in a save slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveRecord {
    /// Slot id.
    pub slot: u32,
    /// Player-facing save name.
    pub name: String,
    /// When the save was taken.
    pub saved_at: DateTime<Utc>,
    /// Engine version that produced the snapshot.
    pub engine_version: String,
    /// The captured state.
    pub snapshot: Snapshot,
}

/// Listing entry for a save slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSummary {
    /// Slot id.
    pub slot: u32,
    /// Save name.
    pub name: String,
    /// When the save was taken.
    pub saved_at: DateTime<Utc>,
    /// Scene active at capture time.
    pub scene: String,
    /// Whether an image or track was captured.
    pub has_media: bool,
}

impl SaveRecord {
    /// Summarizes this record for slot listings.
    #[must_use]
    pub fn summary(&self) -> SlotSummary {
        SlotSummary {
            slot: self.slot,
            name: self.name.clone(),
            saved_at: self.saved_at,
            scene: self.snapshot.scene.clone(),
            has_media: !self.snapshot.overlay.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_empty_overlay_is_omitted_from_serialized_snapshot() {
        let snapshot = Snapshot {
            variables: HashMap::new(),
            scene: "main".to_owned(),
            resume_index: 0,
            call_stack: Vec::new(),
            labels: HashMap::new(),
            overlay: PresentationOverlay::default(),
            captured_cursor: 1,
        };

        let json = serde_json::to_value(&snapshot).unwrap();

        assert!(json.get("overlay").is_none());
        let back: Snapshot = serde_json::from_value(json).unwrap();
        assert_eq!(back, snapshot);
    }
}
