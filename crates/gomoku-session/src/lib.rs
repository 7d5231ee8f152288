//! Participant identity for the gomoku relay.
//!
//! This crate answers two questions for the layers above it:
//!
//! 1. **Who is this?**: [`IdGenerator`] mints collision-free participant
//!    and room ids.
//! 2. **How do I reach them?**: [`Participant`] pairs an id with an
//!    outbound channel that feeds the connection's writer task.
//!
//! # How it fits in the stack
//!
//! ```text
//! Room Layer (above)  ← stores Participants in rooms and the waiting slot
//!     ↕
//! Session Layer (this crate)  ← identity + outbound delivery
//!     ↕
//! Protocol Layer (below)  ← provides PlayerId, RoomId, ServerMessage
//! ```

mod error;
mod id;
mod participant;

pub use error::SessionError;
pub use id::IdGenerator;
pub use participant::{Outbound, OutboundReceiver, Participant};
