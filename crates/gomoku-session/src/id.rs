//! Identifier generation for participants and rooms.
//!
//! An id looks like `p12-3fa2c1d0`: a kind prefix (`p` for participants,
//! `r` for rooms), a monotonic counter, and 32 random bits. The counter
//! alone makes ids unique within a process; the random suffix keeps them
//! from being guessable, so a client cannot address a room it was never
//! told about by counting up.

use std::sync::atomic::{AtomicU64, Ordering};

use gomoku_protocol::{PlayerId, RoomId};
use rand::Rng;

/// Mints participant and room ids.
///
/// Thread-safe through atomics: connection tasks can draw participant ids
/// without taking the lobby lock.
#[derive(Debug)]
pub struct IdGenerator {
    next_player: AtomicU64,
    next_room: AtomicU64,
}

impl IdGenerator {
    /// Creates a generator whose counters start at 1.
    pub fn new() -> Self {
        Self {
            next_player: AtomicU64::new(1),
            next_room: AtomicU64::new(1),
        }
    }

    /// Returns a fresh participant id.
    pub fn next_player_id(&self) -> PlayerId {
        let n = self.next_player.fetch_add(1, Ordering::Relaxed);
        PlayerId::from(format!("p{n}-{}", random_suffix()))
    }

    /// Returns a fresh room id.
    pub fn next_room_id(&self) -> RoomId {
        let n = self.next_room.fetch_add(1, Ordering::Relaxed);
        RoomId::from(format!("r{n}-{}", random_suffix()))
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// 4 random bytes as 8 lowercase hex characters.
fn random_suffix() -> String {
    let bytes: [u8; 4] = rand::rng().random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
