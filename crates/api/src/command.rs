//! Commands - operations that modify editor state.
//!
//! Pointer commands replay exactly what the canvas element would send, so
//! selection and the minimum room size apply the same way. Panel commands
//! act on a [`Target`] and report which rooms they touched.

use crate::Target;
use plan::{CanvasPoint, RoomId, RoomType};
use serde::{Deserialize, Serialize};

/// A command that modifies editor state.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    // === Pointer ===
    /// Press at a canvas position.
    PointerDown { position: CanvasPoint },

    /// Move the pointer (only matters while drawing).
    PointerMove { position: CanvasPoint },

    /// Release at a canvas position.
    PointerUp { position: CanvasPoint },

    /// Abandon the drag in progress.
    Cancel,

    /// Press, move and release in one go.
    DrawRoom { from: CanvasPoint, to: CanvasPoint },

    // === Selection ===
    /// Select the first targeted room.
    Select { target: Target },

    ClearSelection,

    // === Properties ===
    SetType {
        #[serde(default)]
        target: Target,
        room_type: RoomType,
    },

    /// Rename rooms. An empty name shows the type label instead.
    SetName {
        #[serde(default)]
        target: Target,
        name: String,
    },

    Delete {
        #[serde(default)]
        target: Target,
    },

    ClearAll,

    /// Change what the next drawn room will be.
    SetDraft {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        room_type: Option<RoomType>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },

    // === Persistence ===
    Save,

    /// Run several commands in order.
    Batch { commands: Vec<Command> },
}

/// Result of executing a command.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CommandResult {
    /// Command succeeded.
    Success {
        /// IDs of rooms created, if any.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        created: Vec<RoomId>,
        /// IDs of rooms modified, if any.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        modified: Vec<RoomId>,
        /// IDs of rooms deleted, if any.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        deleted: Vec<RoomId>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    /// Command failed.
    Error { message: String },
}

impl CommandResult {
    fn with_ids(created: Vec<RoomId>, modified: Vec<RoomId>, deleted: Vec<RoomId>) -> Self {
        Self::Success {
            created,
            modified,
            deleted,
            message: None,
        }
    }

    pub fn success() -> Self {
        Self::with_ids(Vec::new(), Vec::new(), Vec::new())
    }

    pub fn created(ids: Vec<RoomId>) -> Self {
        Self::with_ids(ids, Vec::new(), Vec::new())
    }

    pub fn modified(ids: Vec<RoomId>) -> Self {
        Self::with_ids(Vec::new(), ids, Vec::new())
    }

    pub fn deleted(ids: Vec<RoomId>) -> Self {
        Self::with_ids(Vec::new(), Vec::new(), ids)
    }

    /// Success carrying only a note for the operator.
    pub fn message(message: impl Into<String>) -> Self {
        Self::Success {
            created: Vec::new(),
            modified: Vec::new(),
            deleted: Vec::new(),
            message: Some(message.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_room_serializes_with_type_field() {
        let cmd = Command::DrawRoom {
            from: CanvasPoint::new(100, 100),
            to: CanvasPoint::new(260, 320),
        };
        let json: serde_json::Value = serde_json::to_value(&cmd).unwrap();

        assert_eq!(json["type"], "draw_room");
        // Points serialize as [x, y] arrays
        assert_eq!(json["from"], serde_json::json!([100, 100]));
        assert_eq!(json["to"], serde_json::json!([260, 320]));
    }

    #[test]
    fn set_type_defaults_to_selection() {
        let json = r#"{"type": "set_type", "room_type": "dining_room"}"#;
        let cmd: Command = serde_json::from_str(json).unwrap();

        match cmd {
            Command::SetType { target, room_type } => {
                assert_eq!(target, Target::Selection);
                assert_eq!(room_type, RoomType::DiningRoom);
            }
            _ => panic!("Expected SetType command"),
        }
    }

    #[test]
    fn unknown_room_type_is_rejected() {
        let json = r#"{"type": "set_type", "room_type": "garage"}"#;
        assert!(serde_json::from_str::<Command>(json).is_err());
    }

    #[test]
    fn set_draft_omits_none_fields() {
        let cmd = Command::SetDraft {
            room_type: Some(RoomType::Balcony),
            name: None,
        };
        let json: serde_json::Value = serde_json::to_value(&cmd).unwrap();

        assert_eq!(json["room_type"], "balcony");
        assert!(json.get("name").is_none());
    }

    #[test]
    fn batch_command_contains_nested_commands() {
        let cmd = Command::Batch {
            commands: vec![Command::ClearSelection, Command::ClearAll, Command::Save],
        };
        let json: serde_json::Value = serde_json::to_value(&cmd).unwrap();

        assert_eq!(json["type"], "batch");
        let commands = json["commands"].as_array().unwrap();
        assert_eq!(commands.len(), 3);
        assert_eq!(commands[0]["type"], "clear_selection");
        assert_eq!(commands[1]["type"], "clear_all");
        assert_eq!(commands[2]["type"], "save");
    }

    #[test]
    fn success_omits_empty_lists() {
        let json = serde_json::to_value(CommandResult::created(vec![RoomId::from_u128(1)])).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["created"].as_array().unwrap().len(), 1);
        assert!(json.get("modified").is_none());
        assert!(json.get("message").is_none());

        let json = serde_json::to_value(CommandResult::error("nope")).unwrap();
        assert_eq!(json, serde_json::json!({"status": "error", "message": "nope"}));
    }
}
