//! The matchmaker: a single waiting slot.
//!
//! The first participant to arrive waits. The next one is paired with
//! them, and the slot is empty again. There is never a queue longer than
//! one, because every enqueue runs to completion under the lobby lock.

use gomoku_protocol::{Color, PlayerId, RoomId, ServerMessage};
use gomoku_session::{IdGenerator, Participant};

use crate::{Room, SessionRegistry};

/// The result of [`Matchmaker::enqueue`].
#[derive(Debug)]
pub enum MatchResult {
    /// No opponent yet; the participant now occupies the waiting slot.
    Waiting,
    /// A room was created and registered.
    Paired(Pairing),
}

/// The two sides of a freshly created room.
#[derive(Debug, Clone)]
pub struct Pairing {
    /// The new room's id.
    pub room_id: RoomId,
    /// The participant who was waiting.
    pub black: Participant,
    /// The participant who just arrived.
    pub white: Participant,
}

impl Pairing {
    /// The `gameStart` message for the given side.
    pub fn game_start(&self, color: Color) -> ServerMessage {
        let opponent = match color {
            Color::Black => &self.white,
            Color::White => &self.black,
        };
        ServerMessage::GameStart {
            room_id: self.room_id.clone(),
            color,
            opponent_id: opponent.id().clone(),
        }
    }

    /// Sends each side its own `gameStart`, black first.
    pub fn announce(&self) {
        self.black.notify(self.game_start(Color::Black));
        self.white.notify(self.game_start(Color::White));
    }
}

/// Holds at most one participant awaiting an opponent.
#[derive(Debug, Default)]
pub struct Matchmaker {
    waiting: Option<Participant>,
}

impl Matchmaker {
    /// Creates a matchmaker with an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id of the waiting participant, if any.
    pub fn waiting(&self) -> Option<&PlayerId> {
        self.waiting.as_ref().map(Participant::id)
    }

    /// Pairs `participant` with whoever is waiting, or makes them wait.
    ///
    /// On a pairing, the room is built with the waiting participant as
    /// black and the newcomer as white, inserted into `registry`, and the
    /// slot is cleared. Never fails.
    ///
    /// Enqueueing the participant who is already waiting leaves the slot
    /// unchanged and returns [`MatchResult::Waiting`].
    pub fn enqueue(
        &mut self,
        participant: Participant,
        registry: &mut SessionRegistry,
        ids: &IdGenerator,
    ) -> MatchResult {
        let black = match self.waiting.take() {
            Some(waiting) if waiting.id() != participant.id() => waiting,
            _ => {
                tracing::info!(player_id = %participant.id(), "participant waiting");
                self.waiting = Some(participant);
                return MatchResult::Waiting;
            }
        };
        let white = participant;

        let room_id = ids.next_room_id();
        let room = Room::new(room_id.clone(), black.clone(), white.clone());
        registry.insert(room);

        tracing::info!(
            %room_id,
            black = %black.id(),
            white = %white.id(),
            "room created"
        );

        MatchResult::Paired(Pairing {
            room_id,
            black,
            white,
        })
    }

    /// Empties the slot if `player` is the one waiting.
    ///
    /// Returns `true` if the slot was cleared.
    pub fn cancel(&mut self, player: &PlayerId) -> bool {
        if self.waiting() == Some(player) {
            self.waiting = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant(id: &str) -> Participant {
        Participant::channel(PlayerId::from(id)).0
    }

    #[test]
    fn test_first_enqueue_waits() {
        let mut mm = Matchmaker::new();
        let mut registry = SessionRegistry::new();

        let result = mm.enqueue(participant("a"), &mut registry, &IdGenerator::new());

        assert!(matches!(result, MatchResult::Waiting));
        assert_eq!(mm.waiting(), Some(&PlayerId::from("a")));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_second_enqueue_pairs_waiting_as_black() {
        let mut mm = Matchmaker::new();
        let mut registry = SessionRegistry::new();
        let ids = IdGenerator::new();
        mm.enqueue(participant("a"), &mut registry, &ids);

        let MatchResult::Paired(pairing) =
            mm.enqueue(participant("b"), &mut registry, &ids)
        else {
            panic!("expected a pairing");
        };

        assert_eq!(pairing.black.id(), &PlayerId::from("a"));
        assert_eq!(pairing.white.id(), &PlayerId::from("b"));
        assert_eq!(mm.waiting(), None);

        let room = registry.get(&pairing.room_id).expect("room registered");
        assert_eq!(room.black(), &PlayerId::from("a"));
        assert_eq!(room.white(), &PlayerId::from("b"));
        assert_eq!(room.turn_holder(), &PlayerId::from("a"));
    }

    #[test]
    fn test_third_enqueue_waits_again() {
        let mut mm = Matchmaker::new();
        let mut registry = SessionRegistry::new();
        let ids = IdGenerator::new();
        mm.enqueue(participant("a"), &mut registry, &ids);
        mm.enqueue(participant("b"), &mut registry, &ids);

        let result = mm.enqueue(participant("c"), &mut registry, &ids);

        assert!(matches!(result, MatchResult::Waiting));
        assert_eq!(mm.waiting(), Some(&PlayerId::from("c")));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_enqueue_same_participant_twice_never_self_pairs() {
        let mut mm = Matchmaker::new();
        let mut registry = SessionRegistry::new();
        let ids = IdGenerator::new();
        let a = participant("a");
        mm.enqueue(a.clone(), &mut registry, &ids);

        let result = mm.enqueue(a, &mut registry, &ids);

        assert!(matches!(result, MatchResult::Waiting));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_cancel_only_clears_matching_participant() {
        let mut mm = Matchmaker::new();
        let mut registry = SessionRegistry::new();
        mm.enqueue(participant("a"), &mut registry, &IdGenerator::new());

        assert!(!mm.cancel(&PlayerId::from("b")));
        assert_eq!(mm.waiting(), Some(&PlayerId::from("a")));
        assert!(mm.cancel(&PlayerId::from("a")));
        assert_eq!(mm.waiting(), None);
    }

    #[test]
    fn test_pairing_announce_sends_each_side_its_color() {
        let (black, mut black_rx) = Participant::channel(PlayerId::from("a"));
        let (white, mut white_rx) = Participant::channel(PlayerId::from("b"));
        let pairing = Pairing {
            room_id: RoomId::from("r1"),
            black,
            white,
        };

        pairing.announce();

        assert_eq!(
            black_rx.try_recv().unwrap(),
            ServerMessage::GameStart {
                room_id: RoomId::from("r1"),
                color: Color::Black,
                opponent_id: PlayerId::from("b"),
            }
        );
        assert_eq!(
            white_rx.try_recv().unwrap(),
            ServerMessage::GameStart {
                room_id: RoomId::from("r1"),
                color: Color::White,
                opponent_id: PlayerId::from("a"),
            }
        );
    }
}
