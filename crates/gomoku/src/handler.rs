//! Per-connection handler: intake, message routing, and cleanup.
//!
//! Each accepted connection gets its own Tokio task running this handler.
//! The flow is:
//!   1. Mint a participant id and an outbound queue
//!   2. Spawn the writer task that drains the queue into the socket
//!   3. Enqueue with the matchmaker → `waiting` or `gameStart`
//!   4. Loop: receive messages → decode → turn engine
//!   5. On exit, however it happens: disconnect handler

use std::sync::Arc;

use gomoku_protocol::{ClientMessage, Codec, PlayerId, ServerMessage};
use gomoku_room::{MatchResult, MoveOutcome};
use gomoku_session::{OutboundReceiver, Participant};
use gomoku_transport::{Connection, WebSocketConnection};

use crate::GomokuError;
use crate::server::ServerState;

/// Drop guard that runs the disconnect handler when the connection task
/// exits.
///
/// This ensures cleanup happens on every exit path, early `?` returns and
/// panics included. Since `Drop` is synchronous, we spawn a
/// fire-and-forget task for the async lock.
///
/// A newcomer may take the lock before that task and pair with the
/// departing participant. The same cleanup then closes that room, so the
/// newcomer sees `gameStart` followed by `opponentLeft`, the same as if
/// the close had arrived a moment later.
struct DisconnectGuard<C: Codec> {
    player_id: PlayerId,
    state: Arc<ServerState<C>>,
}

impl<C: Codec> Drop for DisconnectGuard<C> {
    fn drop(&mut self) {
        let player_id = self.player_id.clone();
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            let outcome = state.lobby.lock().await.disconnect(&player_id);
            tracing::info!(%player_id, ?outcome, "participant disconnected");
        });
    }
}

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection<C: Codec>(
    conn: WebSocketConnection,
    state: Arc<ServerState<C>>,
) -> Result<(), GomokuError> {
    let conn = Arc::new(conn);
    let conn_id = conn.id();

    let player_id = state.ids.next_player_id();
    let (participant, outbound) = Participant::channel(player_id.clone());
    tracing::info!(%conn_id, %player_id, "participant connected");

    let writer = tokio::spawn(write_outbound(
        Arc::clone(&conn),
        Arc::clone(&state),
        outbound,
        player_id.clone(),
    ));

    // Armed before the enqueue so a failure past this point still clears
    // whatever the enqueue left behind.
    let _guard = DisconnectGuard {
        player_id: player_id.clone(),
        state: Arc::clone(&state),
    };

    // Notices are queued while the lobby lock is held, so both sides of a
    // new room see `gameStart` before any `move` from that room.
    {
        let mut lobby = state.lobby.lock().await;
        match lobby.enqueue(participant.clone()) {
            MatchResult::Waiting => participant.send(ServerMessage::Waiting)?,
            MatchResult::Paired(pairing) => pairing.announce(),
        }
    }

    let result = read_inbound(&conn, &state, &participant).await;

    writer.abort();
    if let Err(e) = conn.close().await {
        // Expected when the peer already hung up.
        tracing::debug!(%player_id, error = %e, "close failed");
    }
    result
    // _guard drops here → disconnect handler fires.
}

/// Reads messages in arrival order until the peer goes away.
async fn read_inbound<C: Codec>(
    conn: &WebSocketConnection,
    state: &Arc<ServerState<C>>,
    participant: &Participant,
) -> Result<(), GomokuError> {
    let player_id = participant.id();

    loop {
        let data = match conn.recv().await {
            Ok(Some(data)) => data,
            Ok(None) => {
                tracing::info!(%player_id, "connection closed cleanly");
                return Ok(());
            }
            Err(e) => {
                tracing::debug!(%player_id, error = %e, "recv error");
                return Ok(());
            }
        };

        let msg: ClientMessage = match state.codec.decode(&data) {
            Ok(msg) => msg,
            Err(e) => {
                tracing::debug!(
                    %player_id, error = %e, "ignoring undecodable message"
                );
                continue;
            }
        };

        handle_client_message(state, participant, msg).await?;
    }
}

/// Routes one decoded message to the turn engine.
async fn handle_client_message<C: Codec>(
    state: &Arc<ServerState<C>>,
    participant: &Participant,
    msg: ClientMessage,
) -> Result<(), GomokuError> {
    let player_id = participant.id();

    match msg {
        ClientMessage::Move { room_id, row, col } => {
            let outcome = state
                .lobby
                .lock()
                .await
                .apply_move(&room_id, player_id, row, col);

            match outcome {
                MoveOutcome::Applied { color, row, col } => {
                    tracing::debug!(
                        %room_id, %player_id, %color, row, col, "move applied"
                    );
                }
                MoveOutcome::Rejected(reason) => {
                    tracing::debug!(
                        %room_id, %player_id, %reason, row, col, "move rejected"
                    );
                    if state.notify_rejections {
                        participant.send(ServerMessage::InvalidMove { reason })?;
                    }
                }
            }
        }
    }

    Ok(())
}

/// Writer task: encodes queued messages and sends them in order.
///
/// Ends when the queue closes or the socket refuses a send.
async fn write_outbound<C: Codec>(
    conn: Arc<WebSocketConnection>,
    state: Arc<ServerState<C>>,
    mut outbound: OutboundReceiver,
    player_id: PlayerId,
) {
    while let Some(msg) = outbound.recv().await {
        let bytes = match state.codec.encode(&msg) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(%player_id, error = %e, "failed to encode message");
                continue;
            }
        };
        if let Err(e) = conn.send(&bytes).await {
            tracing::debug!(%player_id, error = %e, "send failed, writer stopping");
            break;
        }
    }
}
