//! A participant: one connected party and the way to reach it.

use gomoku_protocol::{PlayerId, ServerMessage};
use tokio::sync::mpsc;

use crate::SessionError;

/// Sending half of a participant's outbound queue.
///
/// Unbounded so a send never waits: the room logic runs under the lobby
/// lock and must not stall on one slow socket.
pub type Outbound = mpsc::UnboundedSender<ServerMessage>;

/// Receiving half, drained by the connection's writer task.
pub type OutboundReceiver = mpsc::UnboundedReceiver<ServerMessage>;

/// One connected party: an id plus its outbound queue.
///
/// Cloning is cheap (a `String` and a channel handle). The room layer
/// keeps clones in rooms and in the waiting slot; the connection task
/// keeps the receiver.
#[derive(Debug, Clone)]
pub struct Participant {
    id: PlayerId,
    outbound: Outbound,
}

impl Participant {
    /// Wraps an existing outbound sender.
    pub fn new(id: PlayerId, outbound: Outbound) -> Self {
        Self { id, outbound }
    }

    /// Creates a participant together with the receiver its writer task
    /// should drain.
    pub fn channel(id: PlayerId) -> (Self, OutboundReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(id, tx), rx)
    }

    /// Returns the participant's id.
    pub fn id(&self) -> &PlayerId {
        &self.id
    }

    /// Queues a message for delivery. Never blocks.
    ///
    /// # Errors
    /// Returns [`SessionError::ParticipantGone`] if the writer task has
    /// already exited and dropped the receiver.
    pub fn send(&self, msg: ServerMessage) -> Result<(), SessionError> {
        self.outbound
            .send(msg)
            .map_err(|_| SessionError::ParticipantGone(self.id.clone()))
    }

    /// Like [`send`](Self::send), but a closed queue is only logged.
    ///
    /// Used for broadcasts, where one departed receiver must not affect
    /// delivery to the other.
    pub fn notify(&self, msg: ServerMessage) {
        if let Err(e) = self.send(msg) {
            tracing::debug!(error = %e, "dropping outbound message");
        }
    }
}
