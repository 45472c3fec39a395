//! Which rooms a command applies to.
//!
//! Commands that edit rooms say which rooms they mean: the current
//! selection, specific ids, everything, or a query.

use plan::{CanvasPoint, RoomId, RoomType};
use serde::{Deserialize, Serialize};

/// Specifies which rooms a command targets.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// The selected room, if any.
    #[default]
    Selection,

    /// Specific room by ID.
    Room(RoomId),

    /// Multiple specific rooms by ID.
    Rooms(Vec<RoomId>),

    /// Every room on the canvas.
    All,

    /// Rooms matching a query.
    Query(RoomQuery),
}

impl From<RoomId> for Target {
    fn from(id: RoomId) -> Self {
        Self::Room(id)
    }
}

impl From<Vec<RoomId>> for Target {
    fn from(ids: Vec<RoomId>) -> Self {
        Self::Rooms(ids)
    }
}

/// Query to find rooms by properties.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomQuery {
    /// Rooms of a given type.
    ByType(RoomType),

    /// The room a click at this point would hit.
    AtPoint(CanvasPoint),
}
