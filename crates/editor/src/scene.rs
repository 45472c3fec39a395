//! What the canvas looks like, as data.
//!
//! [`render`] turns the room list into a flat display list. It has no side
//! effects, so the same input always yields an equal [`Scene`]; the gpui
//! element only has to walk the primitives in order.

use crate::EditorSettings;
use gpui::Hsla;
use plan::{CanvasPoint, CanvasRect, CanvasSize, RoomId, RoomList};
use theme::Theme;

/// Stroke width of room outlines and the draw preview.
pub const ROOM_STROKE_WIDTH: f32 = 2.0;
/// Stroke width of grid lines.
pub const GRID_STROKE_WIDTH: f32 = 1.0;
/// Font size of room labels.
pub const LABEL_FONT_SIZE: f32 = 12.0;

/// A single drawing instruction, in canvas coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    /// Fill the whole surface.
    Clear { size: CanvasSize, color: Hsla },
    /// A straight grid line.
    GridLine {
        from: CanvasPoint,
        to: CanvasPoint,
        color: Hsla,
        width: f32,
    },
    /// A filled and outlined room.
    Room {
        id: RoomId,
        bounds: CanvasRect,
        fill: Hsla,
        stroke: Hsla,
        stroke_width: f32,
        selected: bool,
    },
    /// Text centered in `bounds`.
    Label {
        id: RoomId,
        text: String,
        bounds: CanvasRect,
        color: Hsla,
        font_size: f32,
    },
    /// Dashed outline of the room being dragged out.
    Preview {
        bounds: CanvasRect,
        stroke: Hsla,
        stroke_width: f32,
    },
}

/// Ordered display list, back to front.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub primitives: Vec<Primitive>,
}

impl Scene {
    pub fn grid_lines(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives
            .iter()
            .filter(|p| matches!(p, Primitive::GridLine { .. }))
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Room { .. }))
    }

    /// Label text in paint order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Label { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn preview(&self) -> Option<CanvasRect> {
        self.primitives.iter().find_map(|p| match p {
            Primitive::Preview { bounds, .. } => Some(*bounds),
            _ => None,
        })
    }
}

/// Build the display list for a room list, its selection and an optional
/// in-progress rectangle.
pub fn render(
    rooms: &RoomList,
    selected: Option<RoomId>,
    preview: Option<CanvasRect>,
    settings: &EditorSettings,
    theme: &Theme,
) -> Scene {
    let size = settings.canvas_size;
    let mut primitives = vec![Primitive::Clear {
        size,
        color: theme.canvas_background,
    }];

    push_grid(&mut primitives, size, settings.grid_spacing, theme.grid);

    for room in rooms {
        let is_selected = selected == Some(room.id);
        let (fill, stroke) = if is_selected {
            (theme.selected_fill, theme.selected_stroke)
        } else {
            (theme.room_fill, theme.room_stroke)
        };

        primitives.push(Primitive::Room {
            id: room.id,
            bounds: room.bounds,
            fill,
            stroke,
            stroke_width: ROOM_STROKE_WIDTH,
            selected: is_selected,
        });
        primitives.push(Primitive::Label {
            id: room.id,
            text: room.label().to_string(),
            bounds: room.bounds,
            color: theme.label,
            font_size: LABEL_FONT_SIZE,
        });
    }

    if let Some(bounds) = preview {
        primitives.push(Primitive::Preview {
            bounds,
            stroke: theme.preview,
            stroke_width: ROOM_STROKE_WIDTH,
        });
    }

    Scene { primitives }
}

fn push_grid(primitives: &mut Vec<Primitive>, size: CanvasSize, spacing: u32, color: Hsla) {
    if spacing == 0 {
        return;
    }

    let width = size.width() as i32;
    let height = size.height() as i32;
    let step = spacing as usize;

    for x in (0..=width).step_by(step) {
        primitives.push(Primitive::GridLine {
            from: CanvasPoint::new(x, 0),
            to: CanvasPoint::new(x, height),
            color,
            width: GRID_STROKE_WIDTH,
        });
    }
    for y in (0..=height).step_by(step) {
        primitives.push(Primitive::GridLine {
            from: CanvasPoint::new(0, y),
            to: CanvasPoint::new(width, y),
            color,
            width: GRID_STROKE_WIDTH,
        });
    }
}

/// The first room in list order whose bounds contain `point`.
pub fn hit_test(rooms: &RoomList, point: CanvasPoint) -> Option<RoomId> {
    rooms.room_at(point).map(|room| room.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use plan::{Room, RoomType};

    fn room(id: u128, x: i32, y: i32, w: u32, h: u32, room_type: RoomType, name: &str) -> Room {
        Room::new(
            CanvasRect::new(CanvasPoint::new(x, y), CanvasSize::new(w, h)),
            room_type,
            name,
        )
        .with_id(RoomId::from_u128(id))
    }

    fn two_rooms() -> RoomList {
        [
            room(1, 100, 100, 160, 220, RoomType::Bedroom, "Master"),
            room(2, 200, 200, 100, 100, RoomType::Study, ""),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn render_is_idempotent() {
        let rooms = two_rooms();
        let settings = EditorSettings::default();
        let theme = Theme::light();
        let preview = Some(CanvasRect::from_corners(CanvasPoint::new(5, 5), CanvasPoint::new(50, 60)));

        let first = render(&rooms, Some(RoomId::from_u128(2)), preview, &settings, &theme);
        let second = render(&rooms, Some(RoomId::from_u128(2)), preview, &settings, &theme);
        assert_eq!(first, second);
    }

    #[test]
    fn grid_covers_canvas_inclusive_of_far_edges() {
        let scene = render(
            &RoomList::new(),
            None,
            None,
            &EditorSettings::default(),
            &Theme::light(),
        );
        // 0..=800 step 20 and 0..=600 step 20
        assert_eq!(scene.grid_lines().count(), 41 + 31);
        assert!(matches!(scene.primitives[0], Primitive::Clear { .. }));
    }

    #[test]
    fn selected_room_uses_selection_colors() {
        let theme = Theme::light();
        let scene = render(
            &two_rooms(),
            Some(RoomId::from_u128(1)),
            None,
            &EditorSettings::default(),
            &theme,
        );

        let fills: Vec<_> = scene
            .rooms()
            .map(|p| match p {
                Primitive::Room { fill, selected, .. } => (*fill, *selected),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(fills, vec![(theme.selected_fill, true), (theme.room_fill, false)]);
    }

    #[test]
    fn empty_name_renders_type_label() {
        let scene = render(
            &two_rooms(),
            None,
            None,
            &EditorSettings::default(),
            &Theme::light(),
        );
        let labels: Vec<_> = scene.labels().collect();
        assert_eq!(labels, vec!["Master", "Study"]);
    }

    #[test]
    fn preview_is_drawn_last() {
        let preview = CanvasRect::from_corners(CanvasPoint::new(10, 10), CanvasPoint::new(40, 40));
        let scene = render(
            &two_rooms(),
            None,
            Some(preview),
            &EditorSettings::default(),
            &Theme::light(),
        );
        assert!(matches!(scene.primitives.last(), Some(Primitive::Preview { .. })));
        assert_eq!(scene.preview(), Some(preview));
    }

    #[test]
    fn hit_test_is_edge_inclusive_and_order_stable() {
        let rooms = two_rooms();
        // Overlap region belongs to the first room
        assert_eq!(hit_test(&rooms, CanvasPoint::new(220, 220)), Some(RoomId::from_u128(1)));
        assert_eq!(hit_test(&rooms, CanvasPoint::new(220, 220)), Some(RoomId::from_u128(1)));
        // Edges
        assert_eq!(hit_test(&rooms, CanvasPoint::new(100, 100)), Some(RoomId::from_u128(1)));
        assert_eq!(hit_test(&rooms, CanvasPoint::new(300, 300)), Some(RoomId::from_u128(2)));
        assert_eq!(hit_test(&rooms, CanvasPoint::new(301, 300)), None);
    }
}
