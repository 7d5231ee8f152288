//! The session registry: every active room, keyed by id.

use std::collections::HashMap;

use gomoku_protocol::{PlayerId, RoomId};

use crate::Room;

/// Active rooms, plus an index from participant to room.
///
/// Rooms enter through [`insert`](Self::insert) at pairing time and leave
/// through [`remove`](Self::remove) at disconnect time. There is no other
/// way in or out, so the index can never point at a room that's gone.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    rooms: HashMap<RoomId, Room>,

    /// Maps each participant to the room they're in. A participant is in
    /// at most one room.
    player_rooms: HashMap<PlayerId, RoomId>,
}

impl SessionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a freshly paired room and indexes both participants.
    pub fn insert(&mut self, room: Room) {
        let room_id = room.id().clone();
        for player in room.participants() {
            self.player_rooms.insert(player.id().clone(), room_id.clone());
        }
        self.rooms.insert(room_id, room);
    }

    /// Removes a room and both of its index entries.
    pub fn remove(&mut self, room_id: &RoomId) -> Option<Room> {
        let room = self.rooms.remove(room_id)?;
        for player in room.participants() {
            self.player_rooms.remove(player.id());
        }
        Some(room)
    }

    /// Looks up a room by id.
    pub fn get(&self, room_id: &RoomId) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    /// Looks up a room by id for the turn engine.
    pub fn get_mut(&mut self, room_id: &RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(room_id)
    }

    /// Returns the id of the room `player` is in, if any.
    pub fn room_of(&self, player: &PlayerId) -> Option<&RoomId> {
        self.player_rooms.get(player)
    }

    /// Returns the number of active rooms.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Returns `true` if there are no active rooms.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
