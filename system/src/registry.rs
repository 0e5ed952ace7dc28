use std::collections::HashMap;
use std::num::Wrapping;

use crate::message::{CanvasSnapshot, ConnectionId, RoomId};
use crate::room::Room;

/// Authoritative `RoomId -> Room` mapping plus connection bookkeeping.
///
/// Rooms are created lazily and deleted in the same operation that removes
/// their last member; nothing here is durable. A connection is a member of
/// at most one room at a time.
pub struct RoomRegistry {
    connection_id_source: Wrapping<ConnectionId>,
    connection_locations: HashMap<ConnectionId, RoomId>,
    rooms: HashMap<RoomId, Room>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self {
            connection_id_source: Wrapping(0),
            connection_locations: HashMap::new(),
            rooms: HashMap::new(),
        }
    }

    pub fn create_connection(&mut self) -> ConnectionId {
        self.connection_id_source += Wrapping(1);
        self.connection_id_source.0
    }

    pub fn ensure_room(&mut self, room_id: &RoomId) -> &mut Room {
        self.rooms.entry(room_id.clone()).or_insert_with(Room::new)
    }

    /// Registers membership, creating the room lazily. A join while joined
    /// to a different room leaves that room first; re-joining the current
    /// room is a no-op on membership.
    pub fn join(&mut self, connection_id: ConnectionId, room_id: &RoomId) {
        match self.connection_locations.get(&connection_id) {
            Some(current) if current == room_id => return,
            Some(_) => {
                self.leave(connection_id);
            }
            None => {}
        }
        self.ensure_room(room_id).add_connection(connection_id);
        self.connection_locations
            .insert(connection_id, room_id.clone());
        log::info!("Connection {} joined room {}", connection_id, room_id);
    }

    /// Removes membership. The room is deleted, canvases included, when its
    /// last member leaves.
    pub fn leave(&mut self, connection_id: ConnectionId) -> Option<RoomId> {
        let room_id = self.connection_locations.remove(&connection_id)?;
        let emptied = match self.rooms.get_mut(&room_id) {
            Some(room) => {
                room.remove_connection(connection_id);
                room.is_empty()
            }
            None => false,
        };
        if emptied {
            self.delete_room(&room_id);
            log::info!("Room {} removed after last connection left", room_id);
        }
        log::info!("Connection {} left room {}", connection_id, room_id);
        Some(room_id)
    }

    /// Deterministic deep copy of every canvas in the room; empty for an
    /// unknown room.
    pub fn room_snapshot(&self, room_id: &RoomId) -> Vec<CanvasSnapshot> {
        self.rooms
            .get(room_id)
            .map(|room| room.snapshot())
            .unwrap_or_default()
    }

    pub fn delete_room(&mut self, room_id: &RoomId) {
        if self.rooms.remove(room_id).is_some() {
            self.connection_locations.retain(|_, r| r != room_id);
        }
    }

    pub fn members(&self, room_id: &RoomId) -> &[ConnectionId] {
        self.rooms
            .get(room_id)
            .map(|room| room.connections())
            .unwrap_or(&[])
    }

    pub fn room(&self, room_id: &RoomId) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    pub fn room_mut(&mut self, room_id: &RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(room_id)
    }

    pub fn location(&self, connection_id: ConnectionId) -> Option<&RoomId> {
        self.connection_locations.get(&connection_id)
    }

    pub fn rooms(&self) -> impl Iterator<Item = (&RoomId, &Room)> {
        self.rooms.iter()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}
