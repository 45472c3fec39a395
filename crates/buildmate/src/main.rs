//! BuildMate: room layout editor
//!
//! Drag on the canvas to draw rooms, click to select, and label them from the
//! property panel. Set `BUILDMATE_DEBUG=1` to accept `buildmate-cli`
//! connections.

use anyhow::Result;
use api::DebugServer;
use clap::Parser;
use editor::{editor_canvas, EditorError, EditorEvent, LayoutEditor};
use gpui::{
    actions, div, prelude::*, px, size, App, Application, Bounds, Entity, FocusHandle, Focusable,
    IntoElement, KeyBinding, Menu, MenuItem, ParentElement, Styled, Subscription,
    TitlebarOptions, Window, WindowBounds, WindowOptions,
};
use interchange::InterchangeError;
use panel::RoomPanel;
use std::sync::Arc;
use theme::Theme;

mod args;
mod components;
mod logger;
mod panel;

actions!(buildmate, [Cancel, ClearAll, Delete, Quit, Save]);

/// Main application component
struct BuildMate {
    editor: Entity<LayoutEditor>,
    panel: Entity<RoomPanel>,
    focus_handle: FocusHandle,
    theme: Theme,
    debug_server: Option<Arc<DebugServer>>,
    _subscriptions: Vec<Subscription>,
}

impl BuildMate {
    fn new(editor: LayoutEditor, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let theme = editor.theme().clone();
        let focus_handle = cx.focus_handle();
        let editor = cx.new(|_| editor);
        let panel = cx.new(|cx| RoomPanel::new(editor.clone(), theme.clone(), cx));

        let editor_sub = cx.subscribe_in(&editor, window, Self::handle_editor_event);
        let observe_sub = cx.observe(&editor, |_, _, cx| cx.notify());

        let debug_server = if DebugServer::should_start() {
            let server = Arc::new(DebugServer::new());
            match server.start() {
                Ok(()) => {
                    // Poll for pending requests and re-render to process them
                    let server_clone = server.clone();
                    cx.spawn(async move |this, cx| loop {
                        cx.background_executor()
                            .timer(std::time::Duration::from_millis(50))
                            .await;

                        if server_clone.has_pending()
                            && this.update(cx, |_, cx| cx.notify()).is_err()
                        {
                            break;
                        }
                    })
                    .detach();
                    Some(server)
                }
                Err(e) => {
                    log::error!(
                        "failed to start debug server at {}: {}",
                        server.socket_path().display(),
                        e
                    );
                    None
                }
            }
        } else {
            None
        };

        BuildMate {
            editor,
            panel,
            focus_handle,
            theme,
            debug_server,
            _subscriptions: vec![editor_sub, observe_sub],
        }
    }

    fn handle_editor_event(
        &mut self,
        _editor: &Entity<LayoutEditor>,
        event: &EditorEvent,
        window: &mut Window,
        _cx: &mut Context<Self>,
    ) {
        // Working on the canvas takes keyboard focus away from the name field
        if matches!(event, EditorEvent::SelectionChanged | EditorEvent::PreviewChanged)
            && !self.focus_handle.is_focused(window)
        {
            window.focus(&self.focus_handle);
        }

        match event {
            EditorEvent::RoomAdded(id) => log::debug!("room added: {}", id),
            EditorEvent::RoomRemoved(id) => log::debug!("room removed: {}", id),
            EditorEvent::RoomChanged(id) => log::debug!("room changed: {}", id),
            EditorEvent::Cleared => log::debug!("all rooms cleared"),
            EditorEvent::Saved(receipt) => log::info!("plan saved ({} rooms)", receipt.room_count),
            EditorEvent::SaveFailed(message) => log::error!("plan save failed: {}", message),
            EditorEvent::SelectionChanged | EditorEvent::PreviewChanged => {}
        }
    }

    fn handle_cancel(&mut self, _: &Cancel, _window: &mut Window, cx: &mut Context<Self>) {
        self.editor.update(cx, |editor, cx| {
            let events = if editor.pointer().is_drawing() {
                editor.cancel()
            } else {
                editor.clear_selection()
            };
            editor.publish(events, cx);
        });
    }

    fn delete_selected(&mut self, _: &Delete, _window: &mut Window, cx: &mut Context<Self>) {
        self.editor.update(cx, |editor, cx| {
            let Some(id) = editor.selection() else {
                return;
            };
            match editor.delete(id) {
                Ok(events) => editor.publish(events, cx),
                Err(e) => log::warn!("delete failed: {}", e),
            }
        });
    }

    fn clear_all(&mut self, _: &ClearAll, _window: &mut Window, cx: &mut Context<Self>) {
        self.editor.update(cx, |editor, cx| {
            let events = editor.clear_all();
            editor.publish(events, cx);
        });
    }

    fn save(&mut self, _: &Save, _window: &mut Window, cx: &mut Context<Self>) {
        self.editor.update(cx, |editor, cx| {
            let events = editor.save_and_acknowledge();
            editor.publish(events, cx);
        });
    }
}

impl Render for BuildMate {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        // Process any pending debug server requests
        if let Some(ref server) = self.debug_server {
            server.process_pending(&self.editor, cx);
        }

        div()
            .id("BuildMate")
            .key_context("buildmate")
            .track_focus(&self.focus_handle)
            .size_full()
            .flex()
            .flex_row()
            .gap(px(16.0))
            .p(px(16.0))
            .bg(self.theme.ui_background)
            .text_color(self.theme.ui_text)
            .on_action(cx.listener(Self::handle_cancel))
            .on_action(cx.listener(Self::delete_selected))
            .on_action(cx.listener(Self::clear_all))
            .on_action(cx.listener(Self::save))
            .child(
                div()
                    .border_1()
                    .border_color(self.theme.ui_border)
                    .child(editor_canvas(&self.editor, cx)),
            )
            .child(self.panel.clone())
    }
}

impl Focusable for BuildMate {
    fn focus_handle(&self, _cx: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

fn init_keymap(cx: &mut App) {
    cx.bind_keys([
        KeyBinding::new("escape", Cancel, None),
        KeyBinding::new("delete", Delete, None),
        KeyBinding::new("cmd-backspace", Delete, None),
        KeyBinding::new("cmd-shift-backspace", ClearAll, None),
        KeyBinding::new("cmd-s", Save, None),
        KeyBinding::new("cmd-q", Quit, None),
    ]);
}

/// Build the editor session from the launch options, reopening a saved plan
/// if one was asked for.
fn load_editor(launch: args::Launch) -> Result<LayoutEditor> {
    let theme = if launch.dark { Theme::dark() } else { Theme::light() };
    let location = launch.store.path().to_path_buf();

    let mut editor = LayoutEditor::new(launch.settings, theme).with_store(Box::new(launch.store));
    if let Some(plan) = launch.plan {
        editor = editor.with_plan(plan);
    }

    if launch.restore {
        match editor.restore() {
            Ok(_) => log::info!(
                "opened {} ({} rooms)",
                location.display(),
                editor.rooms().len()
            ),
            Err(EditorError::Store(InterchangeError::NothingSaved)) => {
                log::info!("{} does not exist yet; starting empty", location.display())
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(editor)
}

fn main() -> Result<()> {
    logger::init_logger();

    let launch = args::Args::parse().into_launch()?;
    let editor = load_editor(launch)?;

    Application::new().run(move |cx: &mut App| {
        cx.on_action(quit);

        cx.set_menus(vec![
            Menu {
                name: "BuildMate".into(),
                items: vec![MenuItem::action("Quit", Quit)],
            },
            Menu {
                name: "File".into(),
                items: vec![MenuItem::action("Save Plan", Save)],
            },
            Menu {
                name: "Edit".into(),
                items: vec![
                    MenuItem::action("Delete Room", Delete),
                    MenuItem::action("Clear All", ClearAll),
                    MenuItem::separator(),
                    MenuItem::action("Cancel", Cancel),
                ],
            },
        ]);

        init_keymap(cx);

        let bounds = Bounds::centered(None, size(px(1160.0), px(680.0)), cx);
        let window = cx.open_window(
            WindowOptions {
                window_bounds: Some(WindowBounds::Windowed(bounds)),
                titlebar: Some(TitlebarOptions {
                    title: Some("BuildMate".into()),
                    ..Default::default()
                }),
                ..Default::default()
            },
            |window, cx| cx.new(|cx| BuildMate::new(editor, window, cx)),
        );

        let window = match window {
            Ok(window) => window,
            Err(e) => {
                log::error!("failed to open window: {}", e);
                cx.quit();
                return;
            }
        };

        let focused = window.update(cx, |view, window, cx| {
            window.focus(&view.focus_handle(cx));
            cx.activate(true);
        });
        if let Err(e) = focused {
            log::warn!("failed to focus window: {}", e);
        }
    });

    Ok(())
}

fn quit(_: &Quit, cx: &mut App) {
    cx.quit();
}

#[cfg(test)]
mod tests {
    use super::*;
    use interchange::{FilePlanStore, PlanDocument, PlanStore};
    use plan::{CanvasPoint, CanvasRect, CanvasSize, PlanConfig, Room, RoomList, RoomType};

    fn launch(store: FilePlanStore, restore: bool) -> args::Launch {
        args::Launch {
            plan: Some(PlanConfig::default()),
            settings: editor::EditorSettings::default(),
            store,
            restore,
            dark: false,
        }
    }

    #[test]
    fn opening_missing_file_starts_empty() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let store = FilePlanStore::new(temp_dir.path().join("house.plan.kdl"));

        let editor = load_editor(launch(store, true)).unwrap();
        assert!(editor.rooms().is_empty());
        assert_eq!(editor.plan(), Some(&PlanConfig::default()));
    }

    #[test]
    fn opening_saved_file_restores_rooms() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let store = FilePlanStore::new(temp_dir.path().join("house.plan.kdl"));
        let rooms: RoomList = [Room::new(
            CanvasRect::new(CanvasPoint::new(20, 40), CanvasSize::new(100, 80)),
            RoomType::Kitchen,
            "Galley",
        )]
        .into_iter()
        .collect();
        store.save(&PlanDocument::new(None, rooms)).unwrap();

        let editor = load_editor(launch(store, true)).unwrap();
        assert_eq!(editor.rooms().len(), 1);
        assert_eq!(editor.rooms().as_slice()[0].label(), "Galley");
    }

    #[test]
    fn opening_corrupt_file_is_an_error() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let path = temp_dir.path().join("house.plan.kdl");
        std::fs::write(&path, "plan {").unwrap();

        assert!(load_editor(launch(FilePlanStore::new(&path), true)).is_err());
    }
}
