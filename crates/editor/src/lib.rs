//! Room layout editor.
//!
//! Draw rooms by dragging on an empty part of the canvas, click a room to
//! select it, then edit its type and name or delete it. The editing state
//! lives in [`LayoutEditor`], which is plain data driven by pointer calls;
//! [`EditorElement`] adapts it to a gpui window.

mod editor;
mod element;
mod scene;
mod settings;

pub use editor::{EditorError, EditorEvent, LayoutEditor, PointerState};
pub use element::{editor_canvas, EditorElement};
pub use scene::{hit_test, render, Primitive, Scene};
pub use settings::EditorSettings;
// Re-export model types for convenience
pub use plan::{CanvasPoint, CanvasRect, CanvasSize, PlanConfig, Room, RoomId, RoomType};
