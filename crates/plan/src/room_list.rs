use crate::coords::CanvasPoint;
use crate::{Room, RoomId};
use serde::{Deserialize, Serialize};

/// Rooms in creation order, addressed by id.
///
/// Order matters: rooms are painted back to front in list order and
/// hit-testing returns the earliest room under a point.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomList {
    rooms: Vec<Room>,
}

impl RoomList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a room. Returns false (and leaves the list untouched) if a
    /// room with the same id is already present.
    pub fn push(&mut self, room: Room) -> bool {
        if self.contains(room.id) {
            return false;
        }
        self.rooms.push(room);
        true
    }

    pub fn get(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn get_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.iter_mut().find(|r| r.id == id)
    }

    pub fn contains(&self, id: RoomId) -> bool {
        self.rooms.iter().any(|r| r.id == id)
    }

    /// Index of a room in paint order.
    pub fn position(&self, id: RoomId) -> Option<usize> {
        self.rooms.iter().position(|r| r.id == id)
    }

    /// Remove a room by id, preserving the order of the rest.
    pub fn remove(&mut self, id: RoomId) -> Option<Room> {
        let index = self.position(id)?;
        Some(self.rooms.remove(index))
    }

    pub fn clear(&mut self) {
        self.rooms.clear();
    }

    /// First room in list order containing `point`.
    pub fn room_at(&self, point: CanvasPoint) -> Option<&Room> {
        self.rooms.iter().find(|r| r.contains_point(point))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Room> {
        self.rooms.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = RoomId> + '_ {
        self.rooms.iter().map(|r| r.id)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn as_slice(&self) -> &[Room] {
        &self.rooms
    }
}

impl<'a> IntoIterator for &'a RoomList {
    type Item = &'a Room;
    type IntoIter = std::slice::Iter<'a, Room>;

    fn into_iter(self) -> Self::IntoIter {
        self.rooms.iter()
    }
}

impl FromIterator<Room> for RoomList {
    /// Later duplicates of an id are dropped.
    fn from_iter<I: IntoIterator<Item = Room>>(iter: I) -> Self {
        let mut list = RoomList::new();
        for room in iter {
            list.push(room);
        }
        list
    }
}
