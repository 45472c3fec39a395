//! Command and query execution against a LayoutEditor.
//!
//! [`apply_command`] and [`run_query`] work on a plain editor and are what
//! the tests drive. The `*_in_context` wrappers update an editor entity and
//! publish the resulting events so open windows redraw.

use crate::{Command, CommandResult, Query, QueryResult, RoomInfo, RoomQuery, SceneInfo, Target};
use editor::{EditorError, EditorEvent, LayoutEditor};
use gpui::{Context, Entity};
use plan::RoomId;
use std::collections::HashSet;

/// Execute a command against an editor entity from within a view context.
pub fn execute_command_in_context<T: 'static>(
    editor: &Entity<LayoutEditor>,
    command: Command,
    cx: &mut Context<T>,
) -> CommandResult {
    editor.update(cx, |editor, cx| execute_command_inner(editor, command, cx))
}

fn execute_command_inner(
    editor: &mut LayoutEditor,
    command: Command,
    cx: &mut Context<LayoutEditor>,
) -> CommandResult {
    let mut events = Vec::new();
    let result = apply_command(editor, command, &mut events);
    editor.publish(events, cx);
    result
}

/// Run a command, collecting the editor events it produced into `events`.
pub fn apply_command(editor: &mut LayoutEditor, command: Command, events: &mut Vec<EditorEvent>) -> CommandResult {
    match command {
        Command::PointerDown { position } => {
            events.extend(editor.pointer_down(position));
            CommandResult::success()
        }

        Command::PointerMove { position } => {
            events.extend(editor.pointer_move(position));
            CommandResult::success()
        }

        Command::PointerUp { position } => {
            let produced = editor.pointer_up(position);
            let created = added_rooms(&produced);
            events.extend(produced);
            CommandResult::created(created)
        }

        Command::Cancel => {
            events.extend(editor.cancel());
            CommandResult::success()
        }

        Command::DrawRoom { from, to } => {
            let mut produced = editor.pointer_down(from);
            produced.extend(editor.pointer_move(to));
            produced.extend(editor.pointer_up(to));
            let created = added_rooms(&produced);
            events.extend(produced);
            CommandResult::created(created)
        }

        Command::Select { target } => {
            let ids = match resolve_existing(editor, &target) {
                Ok(ids) => ids,
                Err(result) => return result,
            };
            match ids.first() {
                Some(&id) => match editor.select(id) {
                    Ok(produced) => {
                        events.extend(produced);
                        CommandResult::success()
                    }
                    Err(err) => CommandResult::error(err.to_string()),
                },
                None => {
                    events.extend(editor.clear_selection());
                    CommandResult::success()
                }
            }
        }

        Command::ClearSelection => {
            events.extend(editor.clear_selection());
            CommandResult::success()
        }

        Command::SetType { target, room_type } => {
            modify_each(editor, &target, events, |editor, id| editor.set_type(id, room_type))
        }

        Command::SetName { target, name } => {
            modify_each(editor, &target, events, |editor, id| editor.set_name(id, name.as_str()))
        }

        Command::Delete { target } => {
            let ids = match resolve_existing(editor, &target) {
                Ok(ids) => ids,
                Err(result) => return result,
            };
            let mut deleted = Vec::new();
            for id in ids {
                match editor.delete(id) {
                    Ok(produced) => {
                        deleted.push(id);
                        events.extend(produced);
                    }
                    Err(err) => return CommandResult::error(err.to_string()),
                }
            }
            CommandResult::deleted(deleted)
        }

        Command::ClearAll => {
            let deleted: Vec<_> = editor.rooms().ids().collect();
            events.extend(editor.clear_all());
            CommandResult::deleted(deleted)
        }

        Command::SetDraft { room_type, name } => {
            if let Some(room_type) = room_type {
                editor.set_draft_type(room_type);
            }
            if let Some(name) = name {
                editor.set_draft_name(name);
            }
            CommandResult::success()
        }

        Command::Save => {
            let produced = editor.save_and_acknowledge();
            let result = match produced.first() {
                Some(EditorEvent::Saved(receipt)) => {
                    let message = match &receipt.location {
                        Some(path) => format!("saved {} rooms to {}", receipt.room_count, path.display()),
                        None => format!("saved {} rooms", receipt.room_count),
                    };
                    CommandResult::message(message)
                }
                Some(EditorEvent::SaveFailed(message)) => CommandResult::error(message.clone()),
                _ => CommandResult::error("save produced no acknowledgement"),
            };
            events.extend(produced);
            result
        }

        Command::Batch { commands } => {
            let mut all_created = Vec::new();
            let mut all_modified = Vec::new();
            let mut all_deleted = Vec::new();
            let mut messages = Vec::new();

            for cmd in commands {
                match apply_command(editor, cmd, events) {
                    CommandResult::Success {
                        created,
                        modified,
                        deleted,
                        message,
                    } => {
                        all_created.extend(created);
                        all_modified.extend(modified);
                        all_deleted.extend(deleted);
                        messages.extend(message);
                    }
                    CommandResult::Error { message } => {
                        return CommandResult::error(format!("Batch failed: {}", message));
                    }
                }
            }

            CommandResult::Success {
                created: all_created,
                modified: all_modified,
                deleted: all_deleted,
                message: (!messages.is_empty()).then(|| messages.join("; ")),
            }
        }
    }
}

/// Apply `edit` to every targeted room, reporting the ones that changed.
fn modify_each(
    editor: &mut LayoutEditor,
    target: &Target,
    events: &mut Vec<EditorEvent>,
    mut edit: impl FnMut(&mut LayoutEditor, RoomId) -> Result<Vec<EditorEvent>, EditorError>,
) -> CommandResult {
    let ids = match resolve_existing(editor, target) {
        Ok(ids) => ids,
        Err(result) => return result,
    };

    let mut modified = Vec::new();
    for id in ids {
        match edit(editor, id) {
            Ok(produced) if produced.is_empty() => {}
            Ok(produced) => {
                modified.push(id);
                events.extend(produced);
            }
            Err(err) => return CommandResult::error(err.to_string()),
        }
    }
    CommandResult::modified(modified)
}

/// Execute a query against an editor entity from within a view context.
pub fn execute_query_in_context<T: 'static>(
    editor: &Entity<LayoutEditor>,
    query: Query,
    cx: &Context<T>,
) -> QueryResult {
    run_query(editor.read(cx), query)
}

pub fn run_query(editor: &LayoutEditor, query: Query) -> QueryResult {
    match query {
        Query::GetRooms => QueryResult::Rooms {
            rooms: editor.rooms().iter().map(RoomInfo::from).collect(),
        },

        Query::GetRoom { id } => QueryResult::Room {
            room: editor.room(id).map(RoomInfo::from),
        },

        Query::GetSelection => QueryResult::Selection {
            id: editor.selection(),
        },

        Query::GetRoomCount => QueryResult::Count {
            count: editor.rooms().len(),
        },

        Query::GetPlan => QueryResult::Plan {
            config: editor.plan().cloned(),
            summary: editor.plan().map(|plan| plan.summary()),
        },

        Query::GetState => QueryResult::State {
            pointer: editor.pointer(),
            selection: editor.selection(),
            draft_type: editor.draft_type(),
            draft_name: editor.draft_name().to_string(),
            room_count: editor.rooms().len(),
        },

        Query::Render => QueryResult::Scene {
            scene: SceneInfo::from(&editor.scene()),
        },
    }
}

fn added_rooms(events: &[EditorEvent]) -> Vec<RoomId> {
    events
        .iter()
        .filter_map(|event| match event {
            EditorEvent::RoomAdded(id) => Some(*id),
            _ => None,
        })
        .collect()
}

/// Resolve a target to room IDs, in list order for the open-ended targets.
/// Each id appears once, at its first position.
fn resolve_target(editor: &LayoutEditor, target: &Target) -> Vec<RoomId> {
    let mut seen = HashSet::new();
    let mut ids = named_rooms(editor, target);
    ids.retain(|id| seen.insert(*id));
    ids
}

fn named_rooms(editor: &LayoutEditor, target: &Target) -> Vec<RoomId> {
    match target {
        Target::Selection => editor.selection().into_iter().collect(),
        Target::Room(id) => vec![*id],
        Target::Rooms(ids) => ids.clone(),
        Target::All => editor.rooms().ids().collect(),
        Target::Query(RoomQuery::ByType(room_type)) => editor
            .rooms()
            .iter()
            .filter(|room| room.room_type == *room_type)
            .map(|room| room.id)
            .collect(),
        Target::Query(RoomQuery::AtPoint(point)) => editor.hit_test(*point).into_iter().collect(),
    }
}

/// Like [`resolve_target`], but every explicitly named room must exist.
fn resolve_existing(editor: &LayoutEditor, target: &Target) -> Result<Vec<RoomId>, CommandResult> {
    let ids = resolve_target(editor, target);
    match ids.iter().find(|id| editor.room(**id).is_none()) {
        Some(missing) => Err(CommandResult::error(format!("no room with id {}", missing.to_uuid_string()))),
        None => Ok(ids),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use editor::{EditorSettings, PointerState};
    use plan::{CanvasPoint, RoomType};
    use theme::Theme;

    fn editor() -> LayoutEditor {
        LayoutEditor::new(EditorSettings::default(), Theme::light())
    }

    fn run(editor: &mut LayoutEditor, command: Command) -> CommandResult {
        let mut events = Vec::new();
        apply_command(editor, command, &mut events)
    }

    fn draw(editor: &mut LayoutEditor, from: (i32, i32), to: (i32, i32)) -> CommandResult {
        run(
            editor,
            Command::DrawRoom {
                from: CanvasPoint::new(from.0, from.1),
                to: CanvasPoint::new(to.0, to.1),
            },
        )
    }

    fn created(result: &CommandResult) -> Vec<RoomId> {
        match result {
            CommandResult::Success { created, .. } => created.clone(),
            CommandResult::Error { message } => panic!("command failed: {}", message),
        }
    }

    #[test]
    fn draw_room_reports_created_id() {
        let mut editor = editor();
        let result = draw(&mut editor, (100, 100), (260, 320));
        let ids = created(&result);
        assert_eq!(ids.len(), 1);

        let QueryResult::Room { room: Some(room) } = run_query(&editor, Query::GetRoom { id: ids[0] }) else {
            panic!("room missing");
        };
        assert_eq!((room.x, room.y, room.width, room.height), (100, 100, 160, 220));
        assert_eq!(room.label, "Bedroom");
    }

    #[test]
    fn small_draw_creates_nothing() {
        let mut editor = editor();
        assert!(created(&draw(&mut editor, (300, 300), (310, 305))).is_empty());
        assert!(matches!(run_query(&editor, Query::GetRoomCount), QueryResult::Count { count: 0 }));
    }

    #[test]
    fn pointer_commands_step_the_state_machine() {
        let mut editor = editor();
        run(&mut editor, Command::PointerDown { position: CanvasPoint::new(10, 10) });
        run(&mut editor, Command::PointerMove { position: CanvasPoint::new(90, 70) });
        match run_query(&editor, Query::GetState) {
            QueryResult::State { pointer, .. } => assert!(matches!(pointer, PointerState::Drawing { .. })),
            other => panic!("unexpected {:?}", other),
        }
        match run_query(&editor, Query::Render) {
            QueryResult::Scene { scene } => assert!(scene.preview.is_some()),
            other => panic!("unexpected {:?}", other),
        }

        let result = run(&mut editor, Command::PointerUp { position: CanvasPoint::new(90, 70) });
        assert_eq!(created(&result).len(), 1);
    }

    #[test]
    fn selection_target_edits_selected_room() {
        let mut editor = editor();
        let id = created(&draw(&mut editor, (0, 0), (100, 100)))[0];

        // Nothing selected yet: no-op
        let result = run(
            &mut editor,
            Command::SetName {
                target: Target::Selection,
                name: "Den".into(),
            },
        );
        assert_eq!(result, CommandResult::modified(vec![]));

        run(&mut editor, Command::Select { target: Target::Room(id) });
        let result = run(
            &mut editor,
            Command::SetType {
                target: Target::Selection,
                room_type: RoomType::Study,
            },
        );
        assert_eq!(result, CommandResult::modified(vec![id]));
        assert_eq!(editor.room(id).unwrap().label(), "Study");
    }

    #[test]
    fn query_targets_resolve() {
        let mut editor = editor();
        run(
            &mut editor,
            Command::SetDraft {
                room_type: Some(RoomType::Bathroom),
                name: None,
            },
        );
        let bath = created(&draw(&mut editor, (0, 0), (100, 100)))[0];
        run(
            &mut editor,
            Command::SetDraft {
                room_type: Some(RoomType::Kitchen),
                name: Some("Galley".into()),
            },
        );
        let kitchen = created(&draw(&mut editor, (200, 0), (300, 100)))[0];

        let result = run(
            &mut editor,
            Command::Delete {
                target: Target::Query(RoomQuery::ByType(RoomType::Bathroom)),
            },
        );
        assert_eq!(result, CommandResult::deleted(vec![bath]));

        run(
            &mut editor,
            Command::Select {
                target: Target::Query(RoomQuery::AtPoint(CanvasPoint::new(250, 50))),
            },
        );
        assert_eq!(editor.selection(), Some(kitchen));
        assert_eq!(editor.room(kitchen).unwrap().name, "Galley");
    }

    #[test]
    fn unknown_room_is_an_error() {
        let mut editor = editor();
        let result = run(
            &mut editor,
            Command::Delete {
                target: Target::Room(RoomId::from_u128(99)),
            },
        );
        assert!(result.is_error());
    }

    #[test]
    fn repeated_ids_are_deleted_once() {
        let mut editor = editor();
        let a = created(&draw(&mut editor, (0, 0), (100, 100)))[0];
        let b = created(&draw(&mut editor, (200, 0), (300, 100)))[0];

        let mut events = Vec::new();
        let result = apply_command(
            &mut editor,
            Command::Delete {
                target: Target::Rooms(vec![a, b, a]),
            },
            &mut events,
        );

        assert_eq!(result, CommandResult::deleted(vec![a, b]));
        assert_eq!(
            events,
            vec![EditorEvent::RoomRemoved(a), EditorEvent::RoomRemoved(b)]
        );
        assert!(editor.rooms().is_empty());
    }

    #[test]
    fn clear_all_reports_deleted_rooms() {
        let mut editor = editor();
        draw(&mut editor, (0, 0), (100, 100));
        draw(&mut editor, (200, 200), (300, 300));
        match run(&mut editor, Command::ClearAll) {
            CommandResult::Success { deleted, .. } => assert_eq!(deleted.len(), 2),
            other => panic!("unexpected {:?}", other),
        }
        assert!(editor.rooms().is_empty());
    }

    #[test]
    fn batch_stops_at_first_error() {
        let mut editor = editor();
        let result = run(
            &mut editor,
            Command::Batch {
                commands: vec![
                    Command::DrawRoom {
                        from: CanvasPoint::new(0, 0),
                        to: CanvasPoint::new(50, 50),
                    },
                    Command::SetName {
                        target: Target::Room(RoomId::from_u128(5)),
                        name: "x".into(),
                    },
                    Command::ClearAll,
                ],
            },
        );
        assert!(matches!(result, CommandResult::Error { message } if message.starts_with("Batch failed")));
        assert_eq!(editor.rooms().len(), 1);
    }

    #[test]
    fn save_acknowledges() {
        let mut editor = editor();
        draw(&mut editor, (0, 0), (100, 100));
        let mut events = Vec::new();
        let result = apply_command(&mut editor, Command::Save, &mut events);
        assert_eq!(result, CommandResult::message("saved 1 rooms"));
        assert!(matches!(events.as_slice(), [EditorEvent::Saved(_)]));
    }
}
