//! Room lifecycle for the gomoku relay.
//!
//! Everything with state and invariants lives here: the single waiting
//! slot, the registry of active rooms, each room's board and turn, and the
//! teardown that runs when a participant goes away.
//!
//! # Key types
//!
//! - [`Lobby`]: the one service object that owns all of the above
//! - [`Matchmaker`]: the waiting slot; pairs participants two at a time
//! - [`SessionRegistry`]: active rooms by id, plus participant → room
//! - [`Room`]: two participants, a [`Board`], whose turn it is
//!
//! # Concurrency
//!
//! Nothing in this crate locks. The server wraps the [`Lobby`] in one
//! mutex, which serializes every pairing, move and disconnect. All
//! outbound sends are pushes onto unbounded channels, so no operation
//! here ever waits on a socket.

mod board;
mod lobby;
mod matchmaker;
mod registry;
mod room;

pub use board::{BOARD_SIZE, Board};
pub use lobby::{DisconnectOutcome, Lobby, LobbySnapshot};
pub use matchmaker::{MatchResult, Matchmaker, Pairing};
pub use registry::SessionRegistry;
pub use room::{MoveOutcome, Room};
