//! Error types for the session layer.

use gomoku_protocol::PlayerId;

/// Errors that can occur while delivering to a participant.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The participant's outbound channel is closed: its connection task
    /// has already exited. The message was dropped.
    #[error("participant {0} is gone")]
    ParticipantGone(PlayerId),
}
