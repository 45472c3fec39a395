//! Basic UI components.

use gpui::{
    div, px, Div, ElementId, Hsla, InteractiveElement, ParentElement, SharedString, Stateful,
    StatefulInteractiveElement, Styled,
};
use theme::Theme;

/// Horizontal stack layout.
pub fn h_stack() -> Div {
    div().flex().flex_row().items_center()
}

/// Vertical stack layout.
pub fn v_stack() -> Div {
    div().flex().flex_col()
}

/// A panel container with background and border.
pub fn panel(theme: &Theme) -> Div {
    div()
        .bg(theme.ui_background)
        .border_1()
        .border_color(theme.ui_border)
        .rounded(px(8.0))
        .p(px(8.0))
}

/// Small uppercase-ish heading above a group of controls.
pub fn section_label(label: impl Into<SharedString>, theme: &Theme) -> Div {
    div()
        .text_xs()
        .text_color(theme.ui_text_muted)
        .pb(px(2.0))
        .child(label.into())
}

/// A simple button. Attach behavior with `on_click`.
pub fn button(id: impl Into<ElementId>, label: impl Into<SharedString>, theme: &Theme) -> Stateful<Div> {
    styled_button(id, label, theme.ui_text, theme.ui_background, theme.ui_border, theme)
}

/// A button that shows whether it is the current choice.
pub fn toggle_button(
    id: impl Into<ElementId>,
    label: impl Into<SharedString>,
    active: bool,
    theme: &Theme,
) -> Stateful<Div> {
    if active {
        styled_button(
            id,
            label,
            theme.selected_stroke,
            theme.selected_fill.alpha(0.2),
            theme.selected_stroke,
            theme,
        )
    } else {
        button(id, label, theme)
    }
}

/// A button for destructive actions.
pub fn danger_button(id: impl Into<ElementId>, label: impl Into<SharedString>, theme: &Theme) -> Stateful<Div> {
    styled_button(id, label, gpui::white(), theme.danger, theme.danger, theme)
}

fn styled_button(
    id: impl Into<ElementId>,
    label: impl Into<SharedString>,
    text: Hsla,
    bg: Hsla,
    border: Hsla,
    theme: &Theme,
) -> Stateful<Div> {
    let label = label.into();
    let hover_border = theme.ui_text_muted;

    div()
        .id(id)
        .px(px(12.0))
        .py(px(6.0))
        .bg(bg)
        .border_1()
        .border_color(border)
        .rounded(px(4.0))
        .text_color(text)
        .text_sm()
        .cursor_pointer()
        .hover(move |d| d.border_color(hover_border))
        .child(label)
}
