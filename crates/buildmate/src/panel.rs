//! Room property panel.
//!
//! Edits the selected room when there is one, otherwise the draft that the
//! next drawn room will be created with.

use crate::components::{button, danger_button, h_stack, panel, section_label, toggle_button, v_stack};
use editor::{EditorError, EditorEvent, LayoutEditor};
use gpui::{
    div, prelude::FluentBuilder, px, App, Context, ElementId, Entity, FocusHandle,
    InteractiveElement, IntoElement, KeyDownEvent, ParentElement, Render, SharedString,
    StatefulInteractiveElement, Styled, Subscription, Window,
};
use interchange::SaveReceipt;
use plan::RoomType;
use strum::IntoEnumIterator;
use theme::Theme;

pub struct RoomPanel {
    editor: Entity<LayoutEditor>,
    theme: Theme,
    name_focus: FocusHandle,
    status: Option<SharedString>,
    _subscriptions: Vec<Subscription>,
}

impl RoomPanel {
    pub fn new(editor: Entity<LayoutEditor>, theme: Theme, cx: &mut Context<Self>) -> Self {
        let editor_sub = cx.subscribe(&editor, Self::on_editor_event);
        let observe_sub = cx.observe(&editor, |_, _, cx| cx.notify());

        Self {
            editor,
            theme,
            name_focus: cx.focus_handle(),
            status: None,
            _subscriptions: vec![editor_sub, observe_sub],
        }
    }

    fn on_editor_event(
        &mut self,
        _editor: Entity<LayoutEditor>,
        event: &EditorEvent,
        cx: &mut Context<Self>,
    ) {
        match event {
            EditorEvent::Saved(receipt) => {
                self.status = Some(describe_receipt(receipt).into());
            }
            EditorEvent::SaveFailed(message) => {
                self.status = Some(format!("Save failed: {}", message).into());
            }
            _ => return,
        }
        cx.notify();
    }

    /// Name of the selected room, or the draft name when nothing is selected.
    fn current_name(&self, cx: &App) -> String {
        let editor = self.editor.read(cx);
        match editor.selected_room() {
            Some(room) => room.name.clone(),
            None => editor.draft_name().to_string(),
        }
    }

    fn write_name(&self, name: String, cx: &mut Context<Self>) {
        let selection = self.editor.read(cx).selection();
        match selection {
            Some(id) => edit(&self.editor, cx, |editor| editor.set_name(id, name)),
            None => self.editor.update(cx, |editor, cx| {
                editor.set_draft_name(name);
                cx.notify();
            }),
        }
    }

    fn on_name_key(&mut self, event: &KeyDownEvent, window: &mut Window, cx: &mut Context<Self>) {
        let keystroke = &event.keystroke;
        if keystroke.modifiers.platform || keystroke.modifiers.control {
            return;
        }

        let mut name = self.current_name(cx);
        match keystroke.key.as_str() {
            "backspace" => {
                name.pop();
            }
            "enter" => {
                window.blur();
                cx.stop_propagation();
                return;
            }
            _ => match &keystroke.key_char {
                Some(text) if !text.chars().any(char::is_control) => name.push_str(text),
                _ => return,
            },
        }

        cx.stop_propagation();
        self.write_name(name, cx);
    }

    fn type_picker(&self, current: RoomType) -> impl IntoElement {
        let theme = &self.theme;
        let buttons = RoomType::iter().map(|room_type| {
            let editor = self.editor.clone();
            toggle_button(
                ElementId::Name(room_type.key().into()),
                room_type.display_name(),
                room_type == current,
                theme,
            )
            .on_click(move |_, _window, cx| set_room_type(&editor, room_type, cx))
        });

        div().flex().flex_wrap().gap(px(4.0)).children(buttons)
    }

    fn name_field(&self, name: &str, window: &Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = &self.theme;
        let focused = self.name_focus.is_focused(window);
        let border = if focused { theme.selected_stroke } else { theme.ui_border };

        let text = if name.is_empty() && !focused {
            div().text_color(theme.ui_text_muted).child("Room name")
        } else if focused {
            div().child(format!("{}|", name))
        } else {
            div().child(name.to_string())
        };

        div()
            .id("room-name")
            .track_focus(&self.name_focus)
            .px(px(8.0))
            .py(px(4.0))
            .border_1()
            .border_color(border)
            .rounded(px(4.0))
            .text_sm()
            .cursor_text()
            .on_click(cx.listener(|this, _, window, _cx| {
                window.focus(&this.name_focus);
            }))
            .on_key_down(cx.listener(Self::on_name_key))
            .child(text)
    }
}

impl Render for RoomPanel {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let editor = self.editor.read(cx);
        let summary = editor.plan().map(|plan| plan.summary());
        let room_count = editor.rooms().len();
        let selected = editor.selected_room().map(|room| (room.room_type, room.name.clone(), room.size()));
        let draft = (editor.draft_type(), editor.draft_name().to_string());

        let theme = self.theme.clone();
        let heading = if selected.is_some() { "Selected Room" } else { "New Room" };
        let (current_type, name) = match &selected {
            Some((room_type, name, _)) => (*room_type, name.clone()),
            None => draft,
        };

        let delete_editor = self.editor.clone();
        let clear_editor = self.editor.clone();
        let save_editor = self.editor.clone();

        let mut body = v_stack()
            .gap(px(12.0))
            .child(
                v_stack()
                    .gap(px(2.0))
                    .child(div().text_base().child("BuildMate"))
                    .when_some(summary, |this, summary| {
                        this.child(div().text_xs().text_color(theme.ui_text_muted).child(summary))
                    }),
            )
            .child(
                v_stack()
                    .gap(px(6.0))
                    .child(section_label(heading, &theme))
                    .child(section_label("Type", &theme))
                    .child(self.type_picker(current_type))
                    .child(section_label("Name", &theme))
                    .child(self.name_field(&name, window, cx)),
            );

        if let Some((_, _, size)) = selected {
            body = body.child(
                v_stack()
                    .gap(px(6.0))
                    .child(
                        div()
                            .text_xs()
                            .text_color(theme.ui_text_muted)
                            .child(format!("{} × {} px", size.width(), size.height())),
                    )
                    .child(danger_button("delete-room", "Delete Room", &theme).on_click(
                        move |_, _window, cx| {
                            let selection = delete_editor.read(cx).selection();
                            if let Some(id) = selection {
                                edit(&delete_editor, cx, |editor| editor.delete(id));
                            }
                        },
                    )),
            );
        }

        let body = body
            .child(
                h_stack()
                    .gap(px(6.0))
                    .child(button("clear-all", "Clear All", &theme).on_click(move |_, _window, cx| {
                        edit(&clear_editor, cx, |editor| Ok(editor.clear_all()));
                    }))
                    .child(button("save-plan", "Save Plan", &theme).on_click(move |_, _window, cx| {
                        save_editor.update(cx, |editor, cx| {
                            let events = editor.save_and_acknowledge();
                            editor.publish(events, cx);
                        });
                    })),
            )
            .child(
                div()
                    .text_xs()
                    .text_color(theme.ui_text_muted)
                    .child(format!("Rooms: {}", room_count)),
            )
            .when_some(self.status.clone(), |this, status| {
                this.child(div().text_xs().text_color(theme.ui_text).child(status))
            });

        panel(&theme).w(px(260.0)).text_color(theme.ui_text).child(body)
    }
}

/// Run an editor operation and publish what it produced.
fn edit(
    editor: &Entity<LayoutEditor>,
    cx: &mut App,
    f: impl FnOnce(&mut LayoutEditor) -> Result<Vec<EditorEvent>, EditorError>,
) {
    editor.update(cx, |editor, cx| match f(editor) {
        Ok(events) => editor.publish(events, cx),
        Err(e) => log::warn!("room edit failed: {}", e),
    });
}

fn set_room_type(editor: &Entity<LayoutEditor>, room_type: RoomType, cx: &mut App) {
    match editor.read(cx).selection() {
        Some(id) => edit(editor, cx, |editor| editor.set_type(id, room_type)),
        None => editor.update(cx, |editor, cx| {
            editor.set_draft_type(room_type);
            cx.notify();
        }),
    }
}

fn describe_receipt(receipt: &SaveReceipt) -> String {
    let rooms = match receipt.room_count {
        1 => "1 room".to_string(),
        n => format!("{} rooms", n),
    };
    let at = receipt.saved_at.format("%H:%M:%S");
    match &receipt.location {
        Some(path) => format!("Saved {} to {} at {}", rooms, path.display(), at),
        None => format!("Saved {} at {}", rooms, at),
    }
}
