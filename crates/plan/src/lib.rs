//! House plan data model.
//!
//! Rooms are flat, axis-aligned rectangles kept in creation order.
//! Rooms are drawn and hit-tested in list order.

pub mod coords;
mod plan_config;
mod room;
mod room_id;
mod room_list;
mod room_type;

pub use coords::{CanvasPoint, CanvasRect, CanvasSize};
pub use plan_config::{PlanConfig, PlanStyle};
pub use room::Room;
pub use room_id::RoomId;
pub use room_list::RoomList;
pub use room_type::RoomType;

/// Rooms must be strictly larger than this in both dimensions to be committed.
pub const MIN_ROOM_SIZE: u32 = 20;
