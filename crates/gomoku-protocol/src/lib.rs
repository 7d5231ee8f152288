//! Wire protocol for the gomoku relay.
//!
//! This crate defines the "language" that browsers and the server speak:
//!
//! - **Types** ([`ClientMessage`], [`ServerMessage`], [`Color`], ids):
//!   the message structures that travel on the wire.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how those messages
//!   are converted to/from bytes.
//! - **Errors** ([`ProtocolError`]): what can go wrong during
//!   encoding/decoding.
//!
//! # Architecture
//!
//! The protocol layer sits between transport (raw bytes) and the room
//! layer (pairing and turns). It doesn't know about connections or rooms;
//! it only knows how to serialize and deserialize messages.
//!
//! ```text
//! Transport (bytes) → Protocol (ClientMessage) → Room (turn engine)
//! ```

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{
    ClientMessage, Color, MoveRejection, PlayerId, RoomId, ServerMessage,
};
