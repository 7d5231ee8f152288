//! Core protocol types for the relay's wire format.
//!
//! Every type here is serialized to JSON and sent as a WebSocket text
//! frame, or parsed from one. Field names and `type` tags are fixed by the
//! browser client, so the serde attributes matter as much as the Rust
//! names.

use serde::{Deserialize, Serialize};

use std::fmt;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a participant (one live connection).
///
/// A "newtype wrapper" around `String`: on the wire it is just a string
/// (`#[serde(transparent)]`), but in Rust you cannot pass a `RoomId` where
/// a `PlayerId` is expected. Ids are minted by `gomoku-session`; the
/// protocol layer treats them as opaque.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for PlayerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A unique identifier for a room (one paired game).
///
/// Same newtype pattern as [`PlayerId`]. Clients echo it back in every
/// `move` request so the server knows which board they mean.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for RoomId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for RoomId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// The stone color a participant plays.
///
/// Assigned at pairing time: whoever was waiting plays black, the
/// newcomer plays white. Serialized as `"black"` / `"white"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// Returns the other color.
    pub fn opponent(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Black => write!(f, "black"),
            Self::White => write!(f, "white"),
        }
    }
}

// ---------------------------------------------------------------------------
// MoveRejection
// ---------------------------------------------------------------------------

/// Why the turn engine refused a move.
///
/// This is an outcome, not an error: a rejected move leaves the room
/// untouched and the connection open. The dispatcher drops it silently or,
/// when rejection feedback is enabled, reports it to the sender inside
/// [`ServerMessage::InvalidMove`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MoveRejection {
    /// The referenced room does not exist (never did, or was torn down).
    RoomNotFound,
    /// The requester does not hold the turn in that room.
    NotYourTurn,
    /// Row or column lies outside the board.
    OutOfBounds,
    /// The target cell already holds a stone.
    CellOccupied,
}

impl fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoomNotFound => write!(f, "room not found"),
            Self::NotYourTurn => {
                write!(f, "requester is not the current turn holder")
            }
            Self::OutOfBounds => write!(f, "coordinates out of grid bounds"),
            Self::CellOccupied => write!(f, "cell already occupied"),
        }
    }
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// Messages a client sends to the server.
///
/// `#[serde(tag = "type")]` produces "internally tagged" JSON:
///   `{ "type": "move", "roomId": "r1-…", "row": 7, "col": 7 }`
///
/// Coordinates are signed so that a negative value decodes and is then
/// rejected as out of bounds, instead of failing as malformed input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    /// "Place my stone at (row, col) in this room."
    Move {
        #[serde(rename = "roomId")]
        room_id: RoomId,
        row: i64,
        col: i64,
    },
}

/// Messages the server sends to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    /// "You're connected; no opponent yet."
    Waiting,

    /// "You've been paired." Each participant gets its own color and the
    /// other participant's id.
    GameStart {
        #[serde(rename = "roomId")]
        room_id: RoomId,
        color: Color,
        #[serde(rename = "opponentId")]
        opponent_id: PlayerId,
    },

    /// "A stone was placed." Broadcast to both participants, the mover
    /// included.
    Move { row: usize, col: usize, color: Color },

    /// "Your opponent disconnected; the room is gone."
    OpponentLeft,

    /// "Your move was refused." Only sent when rejection feedback is
    /// enabled on the server.
    InvalidMove { reason: MoveRejection },
}

// =========================================================================
// Tests
// =========================================================================
