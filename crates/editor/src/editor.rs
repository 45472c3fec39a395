use crate::{scene, EditorSettings, Scene};
use gpui::{Context, EventEmitter};
use interchange::{InterchangeError, MemoryPlanStore, PlanDocument, PlanStore, SaveReceipt};
use plan::{CanvasPoint, CanvasRect, PlanConfig, Room, RoomId, RoomList, RoomType};
use serde::{Deserialize, Serialize};
use theme::Theme;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("no room with id {0}")]
    RoomNotFound(RoomId),
    #[error("plan store: {0}")]
    Store(#[from] InterchangeError),
    #[error("settings: {0}")]
    Settings(String),
}

/// Where the pointer interaction currently is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PointerState {
    #[default]
    Idle,
    /// Dragging out a new room from `anchor`.
    Drawing {
        anchor: CanvasPoint,
        current: CanvasPoint,
    },
}

impl PointerState {
    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing { .. })
    }

    /// Normalized rectangle spanned by the drag, if one is in progress.
    pub fn preview(&self) -> Option<CanvasRect> {
        match *self {
            Self::Idle => None,
            Self::Drawing { anchor, current } => Some(CanvasRect::from_corners(anchor, current)),
        }
    }
}

/// Things that happened as the result of an editor operation.
#[derive(Clone, Debug, PartialEq)]
pub enum EditorEvent {
    RoomAdded(RoomId),
    RoomRemoved(RoomId),
    RoomChanged(RoomId),
    SelectionChanged,
    PreviewChanged,
    Cleared,
    Saved(SaveReceipt),
    SaveFailed(String),
}

/// The editing session: rooms, selection, pointer state and the draft
/// applied to the next room.
///
/// Every mutating operation returns the events it produced. Inside a gpui
/// app, pass them to [`LayoutEditor::publish`].
pub struct LayoutEditor {
    rooms: RoomList,
    selection: Option<RoomId>,
    pointer: PointerState,
    draft_type: RoomType,
    draft_name: String,
    settings: EditorSettings,
    plan: Option<PlanConfig>,
    theme: Theme,
    store: Box<dyn PlanStore>,
}

impl LayoutEditor {
    pub fn new(settings: EditorSettings, theme: Theme) -> Self {
        Self {
            rooms: RoomList::new(),
            selection: None,
            pointer: PointerState::Idle,
            draft_type: RoomType::default(),
            draft_name: String::new(),
            settings,
            plan: None,
            theme,
            store: Box::new(MemoryPlanStore::new()),
        }
    }

    pub fn with_plan(mut self, plan: PlanConfig) -> Self {
        self.plan = Some(plan);
        self
    }

    pub fn with_store(mut self, store: Box<dyn PlanStore>) -> Self {
        self.store = store;
        self
    }

    pub fn rooms(&self) -> &RoomList {
        &self.rooms
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id)
    }

    pub fn selection(&self) -> Option<RoomId> {
        self.selection
    }

    pub fn selected_room(&self) -> Option<&Room> {
        self.selection.and_then(|id| self.rooms.get(id))
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn draft_type(&self) -> RoomType {
        self.draft_type
    }

    pub fn draft_name(&self) -> &str {
        &self.draft_name
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn plan(&self) -> Option<&PlanConfig> {
        self.plan.as_ref()
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn preview(&self) -> Option<CanvasRect> {
        self.pointer.preview()
    }

    /// Display list for the current state.
    pub fn scene(&self) -> Scene {
        scene::render(
            &self.rooms,
            self.selection,
            self.preview(),
            &self.settings,
            &self.theme,
        )
    }

    pub fn hit_test(&self, point: CanvasPoint) -> Option<RoomId> {
        scene::hit_test(&self.rooms, point)
    }

    // Pointer interaction

    pub fn pointer_down(&mut self, point: CanvasPoint) -> Vec<EditorEvent> {
        let point = self.settings.clamp(point);
        let mut events = Vec::new();

        // A missed pointer-up leaves a stale drag behind
        if self.pointer.is_drawing() {
            log::debug!("discarding unfinished drag");
            self.pointer = PointerState::Idle;
            events.push(EditorEvent::PreviewChanged);
        }

        match self.hit_test(point) {
            Some(id) => {
                if self.selection != Some(id) {
                    self.selection = Some(id);
                    events.push(EditorEvent::SelectionChanged);
                }
            }
            None => {
                if self.selection.take().is_some() {
                    events.push(EditorEvent::SelectionChanged);
                }
                self.pointer = PointerState::Drawing {
                    anchor: point,
                    current: point,
                };
                events.push(EditorEvent::PreviewChanged);
            }
        }

        events
    }

    pub fn pointer_move(&mut self, point: CanvasPoint) -> Vec<EditorEvent> {
        let point = self.settings.clamp(point);
        match &mut self.pointer {
            PointerState::Drawing { current, .. } if *current != point => {
                *current = point;
                vec![EditorEvent::PreviewChanged]
            }
            _ => Vec::new(),
        }
    }

    pub fn pointer_up(&mut self, point: CanvasPoint) -> Vec<EditorEvent> {
        let point = self.settings.clamp(point);
        let PointerState::Drawing { anchor, .. } = self.pointer else {
            return Vec::new();
        };

        self.pointer = PointerState::Idle;
        let mut events = vec![EditorEvent::PreviewChanged];

        let bounds = CanvasRect::from_corners(anchor, point);
        if bounds.size.exceeds(self.settings.min_room_size) {
            events.push(self.commit(bounds));
        } else {
            log::debug!(
                "discarding {}x{} drag below minimum room size",
                bounds.width(),
                bounds.height()
            );
        }

        events
    }

    /// Abandon the drag in progress, if any.
    pub fn cancel(&mut self) -> Vec<EditorEvent> {
        if self.pointer.is_drawing() {
            self.pointer = PointerState::Idle;
            vec![EditorEvent::PreviewChanged]
        } else {
            Vec::new()
        }
    }

    fn commit(&mut self, bounds: CanvasRect) -> EditorEvent {
        let name = std::mem::take(&mut self.draft_name);
        let room = Room::new(bounds, self.draft_type, name);
        let id = room.id;
        log::debug!(
            "added {} {} at ({}, {}) {}x{}",
            room.room_type.key(),
            id,
            room.x(),
            room.y(),
            room.width(),
            room.height()
        );
        self.rooms.push(room);
        EditorEvent::RoomAdded(id)
    }

    // Property panel

    pub fn select(&mut self, id: RoomId) -> Result<Vec<EditorEvent>, EditorError> {
        if !self.rooms.contains(id) {
            return Err(EditorError::RoomNotFound(id));
        }
        if self.selection == Some(id) {
            return Ok(Vec::new());
        }
        self.selection = Some(id);
        Ok(vec![EditorEvent::SelectionChanged])
    }

    pub fn clear_selection(&mut self) -> Vec<EditorEvent> {
        match self.selection.take() {
            Some(_) => vec![EditorEvent::SelectionChanged],
            None => Vec::new(),
        }
    }

    pub fn set_type(&mut self, id: RoomId, room_type: RoomType) -> Result<Vec<EditorEvent>, EditorError> {
        let room = self.rooms.get_mut(id).ok_or(EditorError::RoomNotFound(id))?;
        if room.room_type == room_type {
            return Ok(Vec::new());
        }
        room.room_type = room_type;
        Ok(vec![EditorEvent::RoomChanged(id)])
    }

    /// Rename a room. An empty name makes the label fall back to the type.
    pub fn set_name(&mut self, id: RoomId, name: impl Into<String>) -> Result<Vec<EditorEvent>, EditorError> {
        let name = name.into();
        let room = self.rooms.get_mut(id).ok_or(EditorError::RoomNotFound(id))?;
        if room.name == name {
            return Ok(Vec::new());
        }
        room.name = name;
        Ok(vec![EditorEvent::RoomChanged(id)])
    }

    pub fn delete(&mut self, id: RoomId) -> Result<Vec<EditorEvent>, EditorError> {
        let room = self.rooms.remove(id).ok_or(EditorError::RoomNotFound(id))?;
        log::debug!("deleted {} {}", room.room_type.key(), id);

        let mut events = vec![EditorEvent::RoomRemoved(id)];
        if self.selection == Some(id) {
            self.selection = None;
            events.push(EditorEvent::SelectionChanged);
        }
        Ok(events)
    }

    pub fn clear_all(&mut self) -> Vec<EditorEvent> {
        let removed = self.rooms.len();
        self.rooms.clear();
        log::debug!("cleared {} rooms", removed);

        let mut events = vec![EditorEvent::Cleared];
        if self.selection.take().is_some() {
            events.push(EditorEvent::SelectionChanged);
        }
        events
    }

    pub fn set_draft_type(&mut self, room_type: RoomType) {
        self.draft_type = room_type;
    }

    pub fn set_draft_name(&mut self, name: impl Into<String>) {
        self.draft_name = name.into();
    }

    // Persistence

    /// Snapshot of the plan as it would be saved.
    pub fn document(&self) -> PlanDocument {
        PlanDocument::new(self.plan.clone(), self.rooms.clone())
    }

    pub fn save(&self) -> Result<SaveReceipt, EditorError> {
        Ok(self.store.save(&self.document())?)
    }

    /// Save and turn the outcome into an acknowledgement event.
    pub fn save_and_acknowledge(&self) -> Vec<EditorEvent> {
        match self.save() {
            Ok(receipt) => vec![EditorEvent::Saved(receipt)],
            Err(err) => {
                log::warn!("save failed: {}", err);
                vec![EditorEvent::SaveFailed(err.to_string())]
            }
        }
    }

    /// Replace the session contents with a saved document.
    ///
    /// Every room must satisfy the same rules as a drawn one: larger than
    /// the minimum size on both sides and entirely on the canvas. Nothing is
    /// changed if any room fails. A plan config given at launch is kept over
    /// the document's.
    pub fn load(&mut self, document: PlanDocument) -> Result<Vec<EditorEvent>, EditorError> {
        for room in &document.rooms {
            self.check_loaded_room(room)?;
        }

        let mut events = self.clear_all();
        events.extend(self.cancel());

        if self.plan.is_none() {
            self.plan = document.config;
        } else if let (Some(current), Some(saved)) = (&self.plan, &document.config) {
            if current != saved {
                log::info!(
                    "keeping launch plan {} over saved plan {}",
                    current.summary(),
                    saved.summary()
                );
            }
        }

        for room in document.rooms.iter().cloned() {
            let id = room.id;
            if self.rooms.push(room) {
                events.push(EditorEvent::RoomAdded(id));
            }
        }
        Ok(events)
    }

    fn check_loaded_room(&self, room: &Room) -> Result<(), EditorError> {
        if !room.size().exceeds(self.settings.min_room_size) {
            return Err(InterchangeError::InvalidValue(format!(
                "room {} is {}x{}, rooms must exceed {} px on both sides",
                room.id,
                room.width(),
                room.height(),
                self.settings.min_room_size
            ))
            .into());
        }
        if !self.settings.contains_rect(room.bounds) {
            return Err(InterchangeError::InvalidValue(format!(
                "room {} at ({}, {}) {}x{} lies outside the {}x{} canvas",
                room.id,
                room.x(),
                room.y(),
                room.width(),
                room.height(),
                self.settings.canvas_size.width(),
                self.settings.canvas_size.height()
            ))
            .into());
        }
        Ok(())
    }

    /// Load whatever the store last saved.
    pub fn restore(&mut self) -> Result<Vec<EditorEvent>, EditorError> {
        let document = self.store.load()?;
        self.load(document)
    }

    /// Emit `events` and schedule a redraw if anything happened.
    pub fn publish(&mut self, events: Vec<EditorEvent>, cx: &mut Context<Self>) {
        if events.is_empty() {
            return;
        }
        for event in events {
            cx.emit(event);
        }
        cx.notify();
    }
}

impl EventEmitter<EditorEvent> for LayoutEditor {}
