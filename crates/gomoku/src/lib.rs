//! # Gomoku
//!
//! WebSocket relay server for two-player gomoku.
//!
//! Participants connect, wait in a single slot until an opponent arrives,
//! and are then placed in a room: the first arrival plays black, the
//! second white. The server arbitrates turns on a 15×15 board, relays each
//! accepted move to both sides, and tears the room down when either side
//! disconnects. It does not decide the winner; clients do.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gomoku::prelude::*;
//!
//! # async fn run() -> Result<(), GomokuError> {
//! init_tracing("info");
//! let server = GomokuServer::builder()
//!     .config(ServerConfig::from_env()?)
//!     .build()
//!     .await?;
//! server.run().await
//! # }
//! ```

mod config;
mod error;
mod handler;
mod logging;
mod server;

pub use crate::config::{ConfigError, DEFAULT_HOST, DEFAULT_PORT, ServerConfig};
pub use error::GomokuError;
pub use logging::init_tracing;
pub use server::{GomokuServer, GomokuServerBuilder, ServerHandle};

/// Everything needed to run a server or talk to one.
pub mod prelude {
    pub use crate::{
        ConfigError, GomokuError, GomokuServer, GomokuServerBuilder,
        ServerConfig, ServerHandle, init_tracing,
    };
    pub use gomoku_protocol::{
        ClientMessage, Codec, Color, JsonCodec, MoveRejection, PlayerId,
        RoomId, ServerMessage,
    };
    pub use gomoku_room::{BOARD_SIZE, LobbySnapshot};
}
