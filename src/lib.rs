//! # magic-labyrinth
//!
//! Deterministic rules engine for a two-player race through an 8×8 maze of
//! hidden walls. Players roll a die, step across the board one cell at a
//! time, and race to collect an artifact that respawns every time it is
//! picked up. The first to five artifacts wins.
//!
//! ## Design Principles
//!
//! 1. **One rule set**: a single canonical engine drives both "roll once,
//!    move up to N" and "spend moves one step at a time" front ends. Every
//!    `attempt_move` is one grid step.
//!
//! 2. **Explicit ownership**: the match lives in a `RulesEngine` owned by
//!    whatever drives the UI. Change notification is an event queue, not a
//!    global store.
//!
//! 3. **Reproducible**: all randomness goes through an injected
//!    `RandomSource`. `GameRng` (ChaCha8) is the default.
//!
//! ## Modules
//!
//! - `core`: Positions, players, wall grid, match state, events, errors, RNG, configuration
//! - `rules`: The rules engine and move outcomes
//!
//! ## Example
//!
//! ```
//! use magic_labyrinth::{MatchConfig, RulesEngine};
//!
//! let mut engine = RulesEngine::new(MatchConfig::default().with_seed(7));
//! let player = engine.state().current_player();
//! let steps = engine.roll_die().unwrap();
//! assert!((1..=4).contains(&steps));
//!
//! let target = engine.state().valid_moves()[0];
//! let outcome = engine.attempt_move(player, target).unwrap();
//! if outcome.ends_turn() {
//!     engine.finish_turn();
//! }
//! ```

pub mod core;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Direction, Position,
    Player, PlayerColor, PlayerId,
    WallGrid,
    GameRng, GameRngState, RandomSource,
    MatchConfig, BOARD_SIZE, DIE_FACES, WALL_PROBABILITY, WIN_THRESHOLD,
    MatchEvent,
    LabyrinthError, MoveError, Result, RollError,
    MatchPhase, MatchState, ValidMoves,
};

pub use crate::rules::{MoveOutcome, RulesEngine, TurnReport, TurnResolution};
