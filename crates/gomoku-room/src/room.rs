//! A room: one game between exactly two participants.
//!
//! The room owns the board and the turn, and is where the turn engine
//! lives. It holds clones of both participants so it can broadcast
//! accepted moves without going back through the registry.

use gomoku_protocol::{Color, MoveRejection, PlayerId, RoomId, ServerMessage};
use gomoku_session::Participant;

use crate::Board;

/// What the turn engine did with a move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The stone was placed and broadcast; the turn passed to the other
    /// participant.
    Applied { color: Color, row: usize, col: usize },
    /// Nothing changed and nothing was sent.
    Rejected(MoveRejection),
}

/// One paired game.
///
/// Invariants, upheld by construction:
/// - exactly two participants with distinct ids
/// - `players[0]` plays black, `players[1]` plays white
/// - the turn holder is always one of the two
#[derive(Debug)]
pub struct Room {
    id: RoomId,
    players: [Participant; 2],
    board: Board,
    turn: Color,
    moves: u32,
}

impl Room {
    /// Creates a room with an empty board, black to move.
    ///
    /// Only the matchmaker builds rooms, after checking the two ids differ.
    pub(crate) fn new(
        id: RoomId,
        black: Participant,
        white: Participant,
    ) -> Self {
        debug_assert_ne!(black.id(), white.id());
        Self {
            id,
            players: [black, white],
            board: Board::new(),
            turn: Color::Black,
            moves: 0,
        }
    }

    /// Returns the room's id.
    pub fn id(&self) -> &RoomId {
        &self.id
    }

    /// Returns the black participant's id.
    pub fn black(&self) -> &PlayerId {
        self.players[0].id()
    }

    /// Returns the white participant's id.
    pub fn white(&self) -> &PlayerId {
        self.players[1].id()
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the number of accepted moves so far.
    pub fn move_count(&self) -> u32 {
        self.moves
    }

    /// Returns the color whose turn it is.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Returns the id of the participant who may move next.
    pub fn turn_holder(&self) -> &PlayerId {
        self.participant(self.turn).id()
    }

    /// Returns the color `player` plays in this room, if they're in it.
    ///
    /// Color is decided by position in the pair, not stored separately.
    pub fn color_of(&self, player: &PlayerId) -> Option<Color> {
        if self.players[0].id() == player {
            Some(Color::Black)
        } else if self.players[1].id() == player {
            Some(Color::White)
        } else {
            None
        }
    }

    /// Returns the participant opposite `player`, if `player` is in the room.
    pub fn opponent_of(&self, player: &PlayerId) -> Option<&Participant> {
        self.color_of(player)
            .map(|color| self.participant(color.opponent()))
    }

    /// Validates and applies a move from `requester`.
    ///
    /// Checks run in order: turn, bounds, occupancy. The first failure is
    /// returned and the room is left exactly as it was. On success the
    /// stone is placed, a `move` event goes to both participants (the
    /// requester included), and the turn flips.
    pub fn apply_move(
        &mut self,
        requester: &PlayerId,
        row: i64,
        col: i64,
    ) -> MoveOutcome {
        if self.turn_holder() != requester {
            return MoveOutcome::Rejected(MoveRejection::NotYourTurn);
        }
        let Some((row, col)) = Board::index(row, col) else {
            return MoveOutcome::Rejected(MoveRejection::OutOfBounds);
        };

        let color = self.turn;
        if let Err(reason) = self.board.place(row, col, color) {
            return MoveOutcome::Rejected(reason);
        }

        self.broadcast(ServerMessage::Move { row, col, color });
        self.turn = color.opponent();
        self.moves += 1;

        MoveOutcome::Applied { color, row, col }
    }

    /// Queues `msg` for both participants.
    pub fn broadcast(&self, msg: ServerMessage) {
        for player in &self.players {
            player.notify(msg.clone());
        }
    }

    pub(crate) fn participants(&self) -> &[Participant; 2] {
        &self.players
    }

    fn participant(&self, color: Color) -> &Participant {
        match color {
            Color::Black => &self.players[0],
            Color::White => &self.players[1],
        }
    }
}
