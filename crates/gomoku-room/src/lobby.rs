//! The lobby: the one service object behind the server's lock.
//!
//! It owns the [`Matchmaker`], the [`SessionRegistry`] and the room id
//! generator, and exposes exactly the three operations connections need:
//! join, move, leave.

use std::sync::Arc;

use gomoku_protocol::{MoveRejection, PlayerId, RoomId, ServerMessage};
use gomoku_session::{IdGenerator, Participant};

use crate::{MatchResult, Matchmaker, MoveOutcome, SessionRegistry};

/// Which branch [`Lobby::disconnect`] took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisconnectOutcome {
    /// The participant was waiting; the slot is empty now.
    ClearedWaiting,
    /// The participant's room was torn down and the opponent told.
    RoomClosed {
        room_id: RoomId,
        opponent: PlayerId,
    },
    /// The participant was in neither place. Nothing happened.
    NotTracked,
}

/// A point-in-time view of the lobby, for logs and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LobbySnapshot {
    /// The participant in the waiting slot, if any.
    pub waiting: Option<PlayerId>,
    /// Number of active rooms.
    pub rooms: usize,
}

/// Pairing, turn, and teardown state for the whole process.
#[derive(Debug)]
pub struct Lobby {
    matchmaker: Matchmaker,
    registry: SessionRegistry,
    ids: Arc<IdGenerator>,
}

impl Lobby {
    /// Creates an empty lobby with its own id generator.
    pub fn new() -> Self {
        Self::with_ids(Arc::new(IdGenerator::new()))
    }

    /// Creates an empty lobby that draws room ids from `ids`.
    pub fn with_ids(ids: Arc<IdGenerator>) -> Self {
        Self {
            matchmaker: Matchmaker::new(),
            registry: SessionRegistry::new(),
            ids,
        }
    }

    /// Hands `participant` to the matchmaker.
    ///
    /// The caller is responsible for telling the participant (and, on a
    /// pairing, the opponent) what happened, while still holding the lock
    /// the lobby lives behind. That ordering guarantees `gameStart`
    /// reaches both sides before any `move` in their room can.
    pub fn enqueue(&mut self, participant: Participant) -> MatchResult {
        self.matchmaker
            .enqueue(participant, &mut self.registry, &self.ids)
    }

    /// Turn engine entry point: resolves the room, then applies the move.
    ///
    /// A move naming a room that doesn't exist is
    /// [`MoveRejection::RoomNotFound`]; everything else is decided by
    /// [`Room::apply_move`](crate::Room::apply_move).
    pub fn apply_move(
        &mut self,
        room_id: &RoomId,
        requester: &PlayerId,
        row: i64,
        col: i64,
    ) -> MoveOutcome {
        let Some(room) = self.registry.get_mut(room_id) else {
            return MoveOutcome::Rejected(MoveRejection::RoomNotFound);
        };
        room.apply_move(requester, row, col)
    }

    /// Reacts to `player`'s connection closing.
    ///
    /// - waiting → slot cleared, nothing sent
    /// - in a room → the opponent gets one `opponentLeft`, the room is
    ///   removed
    /// - neither → no-op
    pub fn disconnect(&mut self, player: &PlayerId) -> DisconnectOutcome {
        if self.matchmaker.cancel(player) {
            tracing::info!(player_id = %player, "waiting participant left");
            return DisconnectOutcome::ClearedWaiting;
        }

        let Some(room_id) = self.registry.room_of(player).cloned() else {
            return DisconnectOutcome::NotTracked;
        };
        let Some(room) = self.registry.remove(&room_id) else {
            return DisconnectOutcome::NotTracked;
        };

        // `room_of` only indexes members, so the opponent always exists.
        let Some(opponent) = room.opponent_of(player) else {
            return DisconnectOutcome::NotTracked;
        };
        opponent.notify(ServerMessage::OpponentLeft);

        tracing::info!(
            %room_id,
            player_id = %player,
            opponent = %opponent.id(),
            moves = room.move_count(),
            "room closed"
        );

        DisconnectOutcome::RoomClosed {
            room_id,
            opponent: opponent.id().clone(),
        }
    }

    /// Returns the waiting slot's occupant and the active room count.
    pub fn snapshot(&self) -> LobbySnapshot {
        LobbySnapshot {
            waiting: self.matchmaker.waiting().cloned(),
            rooms: self.registry.len(),
        }
    }

    /// Read access to the registry.
    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }
}

impl Default for Lobby {
    fn default() -> Self {
        Self::new()
    }
}
