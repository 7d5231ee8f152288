//! Codec trait and implementations for serializing/deserializing messages.
//!
//! The dispatcher never calls `serde_json` directly. It holds something
//! that implements [`Codec`] and asks it to turn [`ServerMessage`]s into
//! bytes and bytes into [`ClientMessage`]s. Only [`JsonCodec`] exists
//! today, because browsers speak JSON text frames.
//!
//! [`ServerMessage`]: crate::ServerMessage
//! [`ClientMessage`]: crate::ClientMessage

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// `Send + Sync + 'static` because a single codec instance lives in the
/// shared server state and is used from every connection task.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed,
    /// incomplete, or don't match the expected type.
    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// This is behind the `json` feature flag (enabled by default).
///
/// ## Example
///
/// ```rust
/// use gomoku_protocol::{ClientMessage, Codec, JsonCodec, RoomId};
///
/// let codec = JsonCodec;
///
/// let raw = br#"{"type":"move","roomId":"r1-00ff00ff","row":7,"col":7}"#;
/// let msg: ClientMessage = codec.decode(raw).unwrap();
///
/// assert_eq!(
///     msg,
///     ClientMessage::Move {
///         room_id: RoomId::from("r1-00ff00ff"),
///         row: 7,
///         col: 7,
///     }
/// );
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
