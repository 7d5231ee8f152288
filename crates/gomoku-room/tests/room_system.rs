//! Integration tests for the lobby: pairing, turns, and teardown working
//! together, observed through each participant's outbound queue.

use gomoku_protocol::{Color, MoveRejection, PlayerId, RoomId, ServerMessage};
use gomoku_room::{DisconnectOutcome, Lobby, MatchResult, MoveOutcome};
use gomoku_session::{OutboundReceiver, Participant};

// =========================================================================
// Helpers
// =========================================================================

fn pid(id: &str) -> PlayerId {
    PlayerId::from(id)
}

/// Enqueues a participant the way the dispatcher does: result handled
/// immediately, notices queued.
fn join(lobby: &mut Lobby, id: &str) -> (OutboundReceiver, Option<RoomId>) {
    let (participant, rx) = Participant::channel(pid(id));
    let room = match lobby.enqueue(participant.clone()) {
        MatchResult::Waiting => {
            participant.notify(ServerMessage::Waiting);
            None
        }
        MatchResult::Paired(pairing) => {
            pairing.announce();
            Some(pairing.room_id)
        }
    };
    (rx, room)
}

/// Drains everything queued so far.
fn drain(rx: &mut OutboundReceiver) -> Vec<ServerMessage> {
    let mut out = Vec::new();
    while let Ok(msg) = rx.try_recv() {
        out.push(msg);
    }
    out
}

/// Two participants paired; returns their queues (already drained) and
/// the room id.
fn paired(lobby: &mut Lobby) -> (OutboundReceiver, OutboundReceiver, RoomId) {
    let (mut black, _) = join(lobby, "black");
    let (mut white, room) = join(lobby, "white");
    drain(&mut black);
    drain(&mut white);
    (black, white, room.expect("second join pairs"))
}

// =========================================================================
// Matchmaking
// =========================================================================

#[test]
fn test_first_waits_second_pairs() {
    let mut lobby = Lobby::new();

    let (mut p1, room) = join(&mut lobby, "p1");
    assert!(room.is_none());
    assert_eq!(drain(&mut p1), vec![ServerMessage::Waiting]);

    let (mut p2, room) = join(&mut lobby, "p2");
    let room_id = room.expect("should pair");

    assert_eq!(
        drain(&mut p1),
        vec![ServerMessage::GameStart {
            room_id: room_id.clone(),
            color: Color::Black,
            opponent_id: pid("p2"),
        }]
    );
    assert_eq!(
        drain(&mut p2),
        vec![ServerMessage::GameStart {
            room_id,
            color: Color::White,
            opponent_id: pid("p1"),
        }]
    );
    assert_eq!(lobby.snapshot().waiting, None);
    assert_eq!(lobby.snapshot().rooms, 1);
}

#[test]
fn test_arrivals_pair_in_twos() {
    let mut lobby = Lobby::new();
    let mut rooms = Vec::new();
    let mut queues = Vec::new();

    for i in 0..7 {
        let (rx, room) = join(&mut lobby, &format!("p{i}"));
        assert_eq!(room.is_some(), i % 2 == 1, "arrival {i}");
        rooms.extend(room);
        queues.push(rx);
    }

    assert_eq!(lobby.snapshot().rooms, 3);
    assert_eq!(lobby.snapshot().waiting, Some(pid("p6")));
    for room_id in &rooms {
        let room = lobby.registry().get(room_id).unwrap();
        assert_ne!(room.black(), room.white());
    }
}

// =========================================================================
// Turn engine through the lobby
// =========================================================================

#[test]
fn test_move_broadcasts_and_passes_turn() {
    let mut lobby = Lobby::new();
    let (mut black, mut white, room_id) = paired(&mut lobby);

    let outcome = lobby.apply_move(&room_id, &pid("black"), 7, 7);

    assert_eq!(
        outcome,
        MoveOutcome::Applied {
            color: Color::Black,
            row: 7,
            col: 7
        }
    );
    let expected = ServerMessage::Move {
        row: 7,
        col: 7,
        color: Color::Black,
    };
    assert_eq!(drain(&mut black), vec![expected.clone()]);
    assert_eq!(drain(&mut white), vec![expected]);
    let room = lobby.registry().get(&room_id).unwrap();
    assert_eq!(room.turn_holder(), &pid("white"));
}

#[test]
fn test_white_cannot_move_first() {
    let mut lobby = Lobby::new();
    let (mut black, mut white, room_id) = paired(&mut lobby);

    let outcome = lobby.apply_move(&room_id, &pid("white"), 7, 7);

    assert_eq!(
        outcome,
        MoveOutcome::Rejected(MoveRejection::NotYourTurn)
    );
    assert!(drain(&mut black).is_empty());
    assert!(drain(&mut white).is_empty());
    let room = lobby.registry().get(&room_id).unwrap();
    assert_eq!(room.board().stone_count(), 0);
    assert_eq!(room.turn_holder(), &pid("black"));
}

#[test]
fn test_move_in_unknown_room_is_rejected() {
    let mut lobby = Lobby::new();
    let (_black, _white, _room_id) = paired(&mut lobby);

    let outcome =
        lobby.apply_move(&RoomId::from("r999-deadbeef"), &pid("black"), 0, 0);

    assert_eq!(
        outcome,
        MoveOutcome::Rejected(MoveRejection::RoomNotFound)
    );
}

#[test]
fn test_move_into_other_room_is_not_your_turn() {
    let mut lobby = Lobby::new();
    let (_b1, _w1, room_one) = paired(&mut lobby);
    let (_b2, _) = join(&mut lobby, "intruder");
    let (_w2, _) = join(&mut lobby, "other");

    let outcome = lobby.apply_move(&room_one, &pid("intruder"), 0, 0);

    assert_eq!(
        outcome,
        MoveOutcome::Rejected(MoveRejection::NotYourTurn)
    );
}

#[test]
fn test_rooms_do_not_interfere() {
    let mut lobby = Lobby::new();
    let (_b1, mut w1, room_one) = paired(&mut lobby);
    let (_b2, _) = join(&mut lobby, "b2");
    let (mut w2, room_two) = join(&mut lobby, "w2");
    let room_two = room_two.unwrap();
    drain(&mut w2);

    lobby.apply_move(&room_two, &pid("b2"), 0, 0);

    assert!(drain(&mut w1).is_empty());
    assert_eq!(drain(&mut w2).len(), 1);
    let one = lobby.registry().get(&room_one).unwrap();
    assert_eq!(one.board().stone_count(), 0);
}

// =========================================================================
// Disconnect
// =========================================================================

#[test]
fn test_waiting_disconnect_clears_slot() {
    let mut lobby = Lobby::new();
    let (_p1, _) = join(&mut lobby, "p1");

    let outcome = lobby.disconnect(&pid("p1"));

    assert_eq!(outcome, DisconnectOutcome::ClearedWaiting);
    assert_eq!(lobby.snapshot().waiting, None);
    assert_eq!(lobby.snapshot().rooms, 0);

    // The next arrival waits instead of pairing with a ghost.
    let (_p2, room) = join(&mut lobby, "p2");
    assert!(room.is_none());
}

#[test]
fn test_room_disconnect_notifies_once_and_removes_room() {
    let mut lobby = Lobby::new();
    let (_black, mut white, room_id) = paired(&mut lobby);
    lobby.apply_move(&room_id, &pid("black"), 7, 7);
    drain(&mut white);

    let outcome = lobby.disconnect(&pid("black"));

    assert_eq!(
        outcome,
        DisconnectOutcome::RoomClosed {
            room_id: room_id.clone(),
            opponent: pid("white"),
        }
    );
    assert_eq!(drain(&mut white), vec![ServerMessage::OpponentLeft]);
    assert_eq!(lobby.snapshot().rooms, 0);

    // The survivor's later move hits a room that no longer exists.
    let outcome = lobby.apply_move(&room_id, &pid("white"), 8, 8);
    assert_eq!(
        outcome,
        MoveOutcome::Rejected(MoveRejection::RoomNotFound)
    );

    // And their own disconnect is a no-op that sends nothing.
    assert_eq!(
        lobby.disconnect(&pid("white")),
        DisconnectOutcome::NotTracked
    );
    assert!(drain(&mut white).is_empty());
}

#[test]
fn test_unknown_disconnect_is_noop() {
    let mut lobby = Lobby::new();
    let (_p1, _) = join(&mut lobby, "p1");

    let outcome = lobby.disconnect(&pid("stranger"));

    assert_eq!(outcome, DisconnectOutcome::NotTracked);
    assert_eq!(lobby.snapshot().waiting, Some(pid("p1")));
}

#[test]
fn test_disconnect_with_opponent_queue_closed_still_removes_room() {
    let mut lobby = Lobby::new();
    let (_black, white, _room_id) = paired(&mut lobby);
    drop(white);

    let outcome = lobby.disconnect(&pid("black"));

    assert!(matches!(outcome, DisconnectOutcome::RoomClosed { .. }));
    assert_eq!(lobby.snapshot().rooms, 0);
}
