use crate::coords::{CanvasPoint, CanvasRect, CanvasSize};
use crate::{RoomId, RoomType};
use serde::{Deserialize, Serialize};

/// A labelled rectangular room on the plan.
///
/// Geometry is fixed once the room is committed; only `room_type` and
/// `name` are edited afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub bounds: CanvasRect,
    pub room_type: RoomType,
    /// Free text. Empty means "show the type's display name".
    #[serde(default)]
    pub name: String,
}

impl Room {
    pub fn new(bounds: CanvasRect, room_type: RoomType, name: impl Into<String>) -> Self {
        Self {
            id: RoomId::new(),
            bounds,
            room_type,
            name: name.into(),
        }
    }

    pub fn with_id(mut self, id: RoomId) -> Self {
        self.id = id;
        self
    }

    pub fn x(&self) -> i32 {
        self.bounds.x()
    }

    pub fn y(&self) -> i32 {
        self.bounds.y()
    }

    pub fn width(&self) -> u32 {
        self.bounds.width()
    }

    pub fn height(&self) -> u32 {
        self.bounds.height()
    }

    pub fn position(&self) -> CanvasPoint {
        self.bounds.origin
    }

    pub fn size(&self) -> CanvasSize {
        self.bounds.size
    }

    /// Text drawn in the middle of the room.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            self.room_type.display_name()
        } else {
            &self.name
        }
    }

    /// Check if a point is inside this room, edges included.
    pub fn contains_point(&self, point: CanvasPoint) -> bool {
        self.bounds.contains(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn study(name: &str) -> Room {
        Room::new(
            CanvasRect::new(CanvasPoint::new(0, 0), CanvasSize::new(100, 100)),
            RoomType::Study,
            name,
        )
    }

    #[test]
    fn empty_name_labels_with_type() {
        let room = study("");
        assert_eq!(room.label(), "Study");
        assert!(room.name.is_empty());
    }

    #[test]
    fn explicit_name_wins_over_type() {
        assert_eq!(study("Library").label(), "Library");
    }

    #[test]
    fn serializes_bounds_as_arrays() {
        let room = study("Den").with_id(RoomId::from_u128(7));
        let json = serde_json::to_value(&room).unwrap();
        assert_eq!(json["bounds"]["origin"], serde_json::json!([0, 0]));
        assert_eq!(json["bounds"]["size"], serde_json::json!([100, 100]));
        assert_eq!(json["room_type"], "study");
        assert_eq!(json["name"], "Den");
    }
}
