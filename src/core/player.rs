//! Player identification and per-player match data.
//!
//! ## PlayerId
//!
//! Type-safe identifier for the two seats. Ids are 0-based and also act as
//! the index into the match's player array.
//!
//! ## Player
//!
//! Position, start corner, colour and collected artifacts for one seat.

use serde::{Deserialize, Serialize};

use super::config::{PLAYER_COUNT, START_POSITIONS};
use super::position::Position;

/// Player identifier, `0` or `1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Player 0, red, starting top-left.
    pub const FIRST: PlayerId = PlayerId(0);
    /// Player 1, blue, starting bottom-right.
    pub const SECOND: PlayerId = PlayerId(1);

    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Whether this id names one of the two seats.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.index() < PLAYER_COUNT
    }

    /// The other seat.
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self((self.0 + 1) % PLAYER_COUNT as u8)
    }

    /// Both player IDs in id order.
    pub fn all() -> impl Iterator<Item = PlayerId> {
        (0..PLAYER_COUNT as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // UIs number players from 1.
        write!(f, "Player {}", self.0 + 1)
    }
}

/// Marker colour a UI should draw for a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerColor {
    Red,
    Blue,
}

impl PlayerColor {
    /// CSS hex colour.
    #[must_use]
    pub const fn hex(self) -> &'static str {
        match self {
            PlayerColor::Red => "#FF4136",
            PlayerColor::Blue => "#0074D9",
        }
    }

    fn for_player(id: PlayerId) -> Self {
        if id == PlayerId::FIRST {
            PlayerColor::Red
        } else {
            PlayerColor::Blue
        }
    }
}

/// One seat's state within a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub color: PlayerColor,
    pub position: Position,
    /// Artifacts collected this match. Never decreases.
    pub artifacts: u32,
    /// Where the player begins and where a wall hit sends them back.
    pub start_position: Position,
}

impl Player {
    /// A fresh player standing on their start corner.
    #[must_use]
    pub fn new(id: PlayerId) -> Self {
        let start = START_POSITIONS[id.index()];
        Self {
            id,
            color: PlayerColor::for_player(id),
            position: start,
            artifacts: 0,
            start_position: start,
        }
    }

    /// Both players, reset for a new match.
    #[must_use]
    pub fn fresh_pair() -> [Player; PLAYER_COUNT] {
        [Player::new(PlayerId::FIRST), Player::new(PlayerId::SECOND)]
    }

    /// Send the player back to their start corner.
    pub fn return_to_start(&mut self) {
        self.position = self.start_position;
    }
}
