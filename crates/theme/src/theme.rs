//! Minimal theming for the plan editor.
//!
//! Provides colors for the canvas grid, rooms, the draw preview and the
//! surrounding panels.

use gpui::{rgb, rgba, Hsla};
use serde::{Deserialize, Serialize};

/// Theme colors for the plan editor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Canvas background
    pub canvas_background: Hsla,

    /// Grid lines
    pub grid: Hsla,

    /// Room fill
    pub room_fill: Hsla,

    /// Room outline
    pub room_stroke: Hsla,

    /// Fill of the selected room
    pub selected_fill: Hsla,

    /// Outline of the selected room
    pub selected_stroke: Hsla,

    /// Room labels
    pub label: Hsla,

    /// Dashed outline while dragging out a new room
    pub preview: Hsla,

    /// Destructive actions (delete)
    pub danger: Hsla,

    /// UI background
    pub ui_background: Hsla,

    /// UI border
    pub ui_border: Hsla,

    /// UI text
    pub ui_text: Hsla,

    /// UI text muted
    pub ui_text_muted: Hsla,
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl Theme {
    pub fn light() -> Self {
        Self {
            canvas_background: gpui::white(),
            grid: rgb(0xe2e8f0).into(),
            room_fill: rgba(0x64748b40).into(),
            room_stroke: rgb(0x64748b).into(),
            selected_fill: rgba(0x3b82f680).into(),
            selected_stroke: rgb(0x3b82f6).into(),
            label: rgb(0x1e293b).into(),
            preview: rgb(0x3b82f6).into(),
            danger: hsla(0.0, 0.75, 0.5, 1.0),
            ui_background: hsla(0.0, 0.0, 0.98, 1.0),
            ui_border: hsla(0.0, 0.0, 0.9, 1.0),
            ui_text: hsla(0.0, 0.0, 0.1, 1.0),
            ui_text_muted: hsla(0.0, 0.0, 0.5, 1.0),
        }
    }

    pub fn dark() -> Self {
        Self {
            canvas_background: hsla(0.0, 0.0, 0.1, 1.0),
            grid: hsla(0.0, 0.0, 0.2, 1.0),
            room_fill: hsla(0.6, 0.1, 0.5, 0.25),
            room_stroke: hsla(0.6, 0.1, 0.6, 1.0),
            selected_fill: hsla(0.6, 0.9, 0.6, 0.5),
            selected_stroke: hsla(0.6, 0.9, 0.6, 1.0),
            label: hsla(0.0, 0.0, 0.9, 1.0),
            preview: hsla(0.6, 0.9, 0.6, 1.0),
            danger: hsla(0.0, 0.7, 0.55, 1.0),
            ui_background: hsla(0.0, 0.0, 0.12, 1.0),
            ui_border: hsla(0.0, 0.0, 0.2, 1.0),
            ui_text: hsla(0.0, 0.0, 0.9, 1.0),
            ui_text_muted: hsla(0.0, 0.0, 0.5, 1.0),
        }
    }
}

/// Helper to create Hsla from h, s, l, a values.
pub fn hsla(h: f32, s: f32, l: f32, a: f32) -> Hsla {
    Hsla { h, s, l, a }
}
