//! `GomokuServer` builder and accept loop.
//!
//! This is the entry point for running the relay. It ties together all the
//! layers: transport → protocol → session → room.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use gomoku_protocol::{Codec, JsonCodec};
use gomoku_room::{Lobby, LobbySnapshot};
use gomoku_session::IdGenerator;
use gomoku_transport::{Pending, Transport, WebSocketTransport};
use tokio::sync::Mutex;

use crate::handler::handle_connection;
use crate::{GomokuError, ServerConfig};

/// Shared server state passed to each connection task.
///
/// Wrapped in `Arc` so it can be cheaply cloned across tasks. The lobby
/// mutex is the only lock on the pairing/turn/teardown path: holding it
/// is what makes each of those operations atomic.
pub(crate) struct ServerState<C: Codec> {
    pub(crate) lobby: Mutex<Lobby>,
    pub(crate) ids: Arc<IdGenerator>,
    pub(crate) codec: C,
    pub(crate) notify_rejections: bool,
}

/// Builder for configuring and starting a server.
///
/// # Example
///
/// ```rust,no_run
/// use gomoku::prelude::*;
///
/// # async fn run() -> Result<(), GomokuError> {
/// let server = GomokuServer::builder()
///     .bind("0.0.0.0:3000")
///     .build()
///     .await?;
/// server.run().await
/// # }
/// ```
pub struct GomokuServerBuilder {
    config: ServerConfig,
}

impl GomokuServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: ServerConfig::default(),
        }
    }

    /// Replaces all settings with `config`.
    pub fn config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the address to bind to, as `host:port`.
    ///
    /// An address without a parsable port keeps the current port.
    pub fn bind(mut self, addr: &str) -> Self {
        match addr.rsplit_once(':') {
            Some((host, port)) => {
                self.config.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.config.port = port;
                }
            }
            None => self.config.host = addr.to_string(),
        }
        self
    }

    /// Enables or disables `invalidMove` feedback for rejected moves.
    pub fn notify_rejections(mut self, enabled: bool) -> Self {
        self.config.notify_rejections = enabled;
        self
    }

    /// Binds the listener and returns the server, ready to [`run`].
    ///
    /// Uses `JsonCodec` and `WebSocketTransport`.
    ///
    /// [`run`]: GomokuServer::run
    pub async fn build(self) -> Result<GomokuServer<JsonCodec>, GomokuError> {
        let transport =
            WebSocketTransport::bind(&self.config.bind_addr()).await?;

        let ids = Arc::new(IdGenerator::new());
        let state = Arc::new(ServerState {
            lobby: Mutex::new(Lobby::with_ids(Arc::clone(&ids))),
            ids,
            codec: JsonCodec,
            notify_rejections: self.config.notify_rejections,
        });

        Ok(GomokuServer { transport, state })
    }
}

impl Default for GomokuServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound, not yet running server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct GomokuServer<C: Codec> {
    transport: WebSocketTransport,
    state: Arc<ServerState<C>>,
}

impl GomokuServer<JsonCodec> {
    /// Creates a new builder.
    pub fn builder() -> GomokuServerBuilder {
        GomokuServerBuilder::new()
    }
}

impl<C: Codec> GomokuServer<C> {
    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, GomokuError> {
        Ok(self.transport.local_addr()?)
    }

    /// Returns a handle that can inspect the lobby after `run` has taken
    /// the server.
    pub fn handle(&self) -> ServerHandle<C> {
        ServerHandle {
            state: Arc::clone(&self.state),
        }
    }

    /// Runs the accept loop until the process is terminated.
    pub async fn run(self) -> Result<(), GomokuError> {
        self.run_until(std::future::pending()).await
    }

    /// Runs the accept loop until `shutdown` resolves.
    ///
    /// Each accepted connection is handed to its own task, which performs
    /// the WebSocket upgrade and then runs the connection. A failed accept
    /// or upgrade is logged and the loop continues.
    /// Connection tasks already running are left to finish on their own.
    pub async fn run_until(
        mut self,
        shutdown: impl Future<Output = ()>,
    ) -> Result<(), GomokuError> {
        tracing::info!(addr = ?self.transport.local_addr().ok(), "gomoku server running");
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                () = &mut shutdown => {
                    tracing::info!("shutdown requested, no longer accepting");
                    return Ok(());
                }
                accepted = self.transport.accept() => match accepted {
                    Ok(pending) => {
                        let state = Arc::clone(&self.state);
                        tokio::spawn(async move {
                            let peer = pending.peer_addr();
                            let conn = match pending.establish().await {
                                Ok(conn) => conn,
                                Err(e) => {
                                    tracing::debug!(
                                        %peer,
                                        error = %e,
                                        "WebSocket upgrade failed"
                                    );
                                    return;
                                }
                            };
                            if let Err(e) = handle_connection(conn, state).await {
                                tracing::debug!(
                                    %peer,
                                    error = %e,
                                    "connection ended with error"
                                );
                            }
                        });
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "accept failed");
                    }
                },
            }
        }
    }
}

/// A cloneable view into a server's lobby.
pub struct ServerHandle<C: Codec> {
    state: Arc<ServerState<C>>,
}

impl<C: Codec> Clone for ServerHandle<C> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<C: Codec> ServerHandle<C> {
    /// Returns who is waiting and how many rooms are active.
    pub async fn lobby_snapshot(&self) -> LobbySnapshot {
        self.state.lobby.lock().await.snapshot()
    }
}
