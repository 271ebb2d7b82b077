//! Fixed game constants and per-engine configuration.
//!
//! Board size, wall density, die faces and the win threshold are part of
//! the rules and never change. `MatchConfig` only carries knobs that affect
//! reproducibility and bookkeeping, not gameplay.

use serde::{Deserialize, Serialize};

use super::position::Position;

/// Side length of the square board.
pub const BOARD_SIZE: usize = 8;

/// Total number of cells.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Probability that any eligible cell is a wall.
pub const WALL_PROBABILITY: f64 = 0.2;

/// Faces of the movement die. Drawn uniformly, so 2 and 3 are twice as
/// likely as 1 and 4.
pub const DIE_FACES: [u8; 6] = [1, 2, 2, 3, 3, 4];

/// Artifacts needed to win a match.
pub const WIN_THRESHOLD: u32 = 5;

/// Number of players in every match.
pub const PLAYER_COUNT: usize = 2;

/// Start corner of each player, indexed by player id.
pub const START_POSITIONS: [Position; PLAYER_COUNT] = [
    Position::new(0, 0),
    Position::new(BOARD_SIZE as i32 - 1, BOARD_SIZE as i32 - 1),
];

/// Engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Seed for the engine's RNG.
    /// Same seed and same calls produce identical matches.
    pub seed: u64,

    /// Random draws allowed when placing the artifact before falling back
    /// to a row-major scan for the first open cell.
    pub max_spawn_attempts: u32,

    /// Most events kept between drains. Once full, the oldest event is
    /// dropped for each new one. Zero disables the queue.
    pub max_pending_events: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_spawn_attempts: 1024,
            max_pending_events: 256,
        }
    }
}

impl MatchConfig {
    /// Create a new config with custom seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Create a new config with a custom artifact spawn cap.
    pub fn with_max_spawn_attempts(mut self, attempts: u32) -> Self {
        self.max_spawn_attempts = attempts;
        self
    }

    /// Create a new config with a custom event queue capacity.
    pub fn with_max_pending_events(mut self, capacity: usize) -> Self {
        self.max_pending_events = capacity;
        self
    }
}
