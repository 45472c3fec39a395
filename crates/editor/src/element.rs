use crate::{LayoutEditor, Primitive, Scene};
use gpui::{
    div, point, px, size, transparent_black, App, BorderStyle, Bounds, ContentMask, DispatchPhase,
    Div, Element, ElementId, Entity, Hitbox, Hsla, IntoElement, MouseButton,
    MouseDownEvent, MouseMoveEvent, MouseUpEvent, PaintQuad, ParentElement, Pixels, Point, Style,
    Styled, Window,
};
use plan::{CanvasPoint, CanvasRect};

/// A GPUI element that paints a [`LayoutEditor`] and feeds it pointer input.
pub struct EditorElement {
    editor: Entity<LayoutEditor>,
}

impl EditorElement {
    pub fn new(editor: Entity<LayoutEditor>) -> Self {
        Self { editor }
    }
}

impl IntoElement for EditorElement {
    type Element = Self;

    fn into_element(self) -> Self::Element {
        self
    }
}

pub struct EditorElementState {
    hitbox: Hitbox,
}

impl Element for EditorElement {
    type RequestLayoutState = ();
    type PrepaintState = EditorElementState;

    fn id(&self) -> Option<ElementId> {
        None
    }

    fn source_location(&self) -> Option<&'static std::panic::Location<'static>> {
        None
    }

    fn request_layout(
        &mut self,
        _id: Option<&gpui::GlobalElementId>,
        _inspector_id: Option<&gpui::InspectorElementId>,
        window: &mut Window,
        cx: &mut App,
    ) -> (gpui::LayoutId, Self::RequestLayoutState) {
        let canvas_size = self.editor.read(cx).settings().canvas_size;
        let mut style = Style::default();
        style.size.width = px(canvas_size.width() as f32).into();
        style.size.height = px(canvas_size.height() as f32).into();
        let layout_id = window.request_layout(style, None, cx);
        (layout_id, ())
    }

    fn prepaint(
        &mut self,
        _id: Option<&gpui::GlobalElementId>,
        _inspector_id: Option<&gpui::InspectorElementId>,
        bounds: Bounds<Pixels>,
        _request_layout: &mut Self::RequestLayoutState,
        window: &mut Window,
        _cx: &mut App,
    ) -> Self::PrepaintState {
        let hitbox = window.insert_hitbox(bounds, gpui::HitboxBehavior::BlockMouse);
        EditorElementState { hitbox }
    }

    fn paint(
        &mut self,
        _id: Option<&gpui::GlobalElementId>,
        _inspector_id: Option<&gpui::InspectorElementId>,
        bounds: Bounds<Pixels>,
        _request_layout: &mut Self::RequestLayoutState,
        prepaint: &mut Self::PrepaintState,
        window: &mut Window,
        cx: &mut App,
    ) {
        let scene = self.editor.read(cx).scene();

        window.with_content_mask(Some(ContentMask { bounds }), |window| {
            paint_scene(&scene, bounds, window);
        });

        let hitbox = prepaint.hitbox.clone();

        window.on_mouse_event({
            let editor = self.editor.clone();
            let hitbox = hitbox.clone();
            move |event: &MouseDownEvent, phase, window, cx| {
                if phase == DispatchPhase::Bubble
                    && event.button == MouseButton::Left
                    && hitbox.is_hovered(window)
                {
                    let position = to_canvas(event.position, bounds);
                    editor.update(cx, |editor, cx| {
                        let events = editor.pointer_down(position);
                        editor.publish(events, cx);
                    });
                }
            }
        });

        // Moves and ups are followed outside the canvas while drawing so a
        // drag released past the edge still commits (clamped).
        window.on_mouse_event({
            let editor = self.editor.clone();
            let hitbox = hitbox.clone();
            move |event: &MouseMoveEvent, phase, window, cx| {
                if phase != DispatchPhase::Bubble {
                    return;
                }
                let drawing = editor.read(cx).pointer().is_drawing();
                if drawing || hitbox.is_hovered(window) {
                    let position = to_canvas(event.position, bounds);
                    editor.update(cx, |editor, cx| {
                        let events = editor.pointer_move(position);
                        editor.publish(events, cx);
                    });
                }
            }
        });

        window.on_mouse_event({
            let editor = self.editor.clone();
            move |event: &MouseUpEvent, phase, _window, cx| {
                if phase == DispatchPhase::Bubble && event.button == MouseButton::Left {
                    let position = to_canvas(event.position, bounds);
                    editor.update(cx, |editor, cx| {
                        let events = editor.pointer_up(position);
                        editor.publish(events, cx);
                    });
                }
            }
        });
    }
}

/// Window position to integer canvas position, relative to the element.
fn to_canvas(position: Point<Pixels>, bounds: Bounds<Pixels>) -> CanvasPoint {
    let local_x: f32 = (position.x - bounds.origin.x).into();
    let local_y: f32 = (position.y - bounds.origin.y).into();
    CanvasPoint::from_f32(local_x, local_y)
}

fn to_screen(rect: CanvasRect, origin: Point<Pixels>) -> Bounds<Pixels> {
    Bounds {
        origin: point(origin.x + px(rect.x() as f32), origin.y + px(rect.y() as f32)),
        size: size(px(rect.width() as f32), px(rect.height() as f32)),
    }
}

fn paint_scene(scene: &Scene, bounds: Bounds<Pixels>, window: &mut Window) {
    let origin = bounds.origin;

    for primitive in &scene.primitives {
        match primitive {
            Primitive::Clear { color, .. } => {
                window.paint_quad(gpui::fill(bounds, *color));
            }
            Primitive::GridLine {
                from,
                to,
                color,
                width,
            } => {
                let half = width / 2.0;
                let line = Bounds {
                    origin: point(
                        origin.x + px(from.x() as f32 - half),
                        origin.y + px(from.y() as f32 - half),
                    ),
                    size: size(
                        px((to.x() - from.x()) as f32 + width),
                        px((to.y() - from.y()) as f32 + width),
                    ),
                };
                window.paint_quad(gpui::fill(line, *color));
            }
            Primitive::Room {
                bounds: rect,
                fill,
                stroke,
                stroke_width,
                ..
            } => {
                let room_bounds = to_screen(*rect, origin);
                window.paint_quad(gpui::fill(room_bounds, *fill));
                paint_border(window, room_bounds, *stroke, *stroke_width, BorderStyle::Solid);
            }
            // Text is laid out by `editor_canvas`
            Primitive::Label { .. } => {}
            Primitive::Preview {
                bounds: rect,
                stroke,
                stroke_width,
            } => {
                paint_border(
                    window,
                    to_screen(*rect, origin),
                    *stroke,
                    *stroke_width,
                    BorderStyle::Dashed,
                );
            }
        }
    }
}

fn paint_border(
    window: &mut Window,
    bounds: Bounds<Pixels>,
    color: Hsla,
    width: f32,
    style: BorderStyle,
) {
    window.paint_quad(PaintQuad {
        bounds,
        corner_radii: px(0.).into(),
        background: transparent_black().into(),
        border_widths: px(width).into(),
        border_color: color,
        border_style: style,
    });
}

/// The canvas with room labels centered over each room.
pub fn editor_canvas(editor: &Entity<LayoutEditor>, cx: &App) -> Div {
    let scene = editor.read(cx).scene();
    let canvas_size = editor.read(cx).settings().canvas_size;

    let labels = scene.primitives.iter().filter_map(|primitive| match primitive {
        Primitive::Label {
            text,
            bounds,
            color,
            font_size,
            ..
        } => Some(
            div()
                .absolute()
                .left(px(bounds.x() as f32))
                .top(px(bounds.y() as f32))
                .w(px(bounds.width() as f32))
                .h(px(bounds.height() as f32))
                .flex()
                .items_center()
                .justify_center()
                .overflow_hidden()
                .text_size(px(*font_size))
                .text_color(*color)
                .child(text.clone()),
        ),
        _ => None,
    });

    div()
        .relative()
        .w(px(canvas_size.width() as f32))
        .h(px(canvas_size.height() as f32))
        .child(EditorElement::new(editor.clone()))
        .children(labels)
}
