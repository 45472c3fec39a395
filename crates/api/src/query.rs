//! Queries - read-only access to editor state.

use editor::{PointerState, Primitive, Scene};
use plan::{CanvasRect, PlanConfig, Room, RoomId, RoomType};
use serde::{Deserialize, Serialize};

/// A query for editor state (read-only).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Query {
    /// All rooms in paint order.
    GetRooms,

    GetRoom { id: RoomId },

    GetSelection,

    GetRoomCount,

    /// Plot configuration the session was started with.
    GetPlan,

    /// Pointer state and draft.
    GetState,

    /// Summary of what the canvas currently draws.
    Render,
}

/// Response to a query.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueryResult {
    Rooms { rooms: Vec<RoomInfo> },

    Room { room: Option<RoomInfo> },

    Selection { id: Option<RoomId> },

    Count { count: usize },

    Plan {
        config: Option<PlanConfig>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        summary: Option<String>,
    },

    State {
        pointer: PointerState,
        selection: Option<RoomId>,
        draft_type: RoomType,
        draft_name: String,
        room_count: usize,
    },

    Scene { scene: SceneInfo },

    Error { message: String },
}

/// Serializable room information.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoomInfo {
    pub id: RoomId,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub room_type: RoomType,
    pub name: String,
    /// What the canvas shows for this room.
    pub label: String,
}

impl From<&Room> for RoomInfo {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id,
            x: room.x(),
            y: room.y(),
            width: room.width(),
            height: room.height(),
            room_type: room.room_type,
            name: room.name.clone(),
            label: room.label().to_string(),
        }
    }
}

/// Counts and labels from a rendered [`Scene`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneInfo {
    pub grid_lines: usize,
    pub rooms: usize,
    pub selected: Option<RoomId>,
    pub labels: Vec<String>,
    pub preview: Option<CanvasRect>,
}

impl From<&Scene> for SceneInfo {
    fn from(scene: &Scene) -> Self {
        let selected = scene.primitives.iter().find_map(|p| match p {
            Primitive::Room {
                id, selected: true, ..
            } => Some(*id),
            _ => None,
        });

        Self {
            grid_lines: scene.grid_lines().count(),
            rooms: scene.rooms().count(),
            selected,
            labels: scene.labels().map(str::to_string).collect(),
            preview: scene.preview(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plan::{CanvasPoint, CanvasSize};

    #[test]
    fn queries_use_snake_case_tags() {
        let json = serde_json::to_value(Query::GetRoomCount).unwrap();
        assert_eq!(json, serde_json::json!({"type": "get_room_count"}));

        let query: Query = serde_json::from_str(r#"{"type": "render"}"#).unwrap();
        assert!(matches!(query, Query::Render));
    }

    #[test]
    fn room_info_carries_label() {
        let room = Room::new(
            CanvasRect::new(CanvasPoint::new(10, 20), CanvasSize::new(40, 50)),
            RoomType::LivingRoom,
            "",
        );
        let info = RoomInfo::from(&room);
        let json = serde_json::to_value(&info).unwrap();

        assert_eq!(json["room_type"], "living_room");
        assert_eq!(json["label"], "Living Room");
        assert_eq!(json["name"], "");
        assert_eq!(json["width"], 40);
    }

    #[test]
    fn state_serializes_pointer_tag() {
        let result = QueryResult::State {
            pointer: PointerState::Drawing {
                anchor: CanvasPoint::new(1, 2),
                current: CanvasPoint::new(3, 4),
            },
            selection: None,
            draft_type: RoomType::Bedroom,
            draft_name: String::new(),
            room_count: 0,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["type"], "state");
        assert_eq!(json["pointer"]["state"], "drawing");
        assert_eq!(json["pointer"]["anchor"], serde_json::json!([1, 2]));
    }
}
