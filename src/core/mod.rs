//! Core engine types: positions, players, walls, state, events, RNG, configuration.
//!
//! Nothing in here decides what a move does; that lives in `rules`.

pub mod position;
pub mod player;
pub mod board;
pub mod rng;
pub mod config;
pub mod event;
pub mod error;
pub mod state;

pub use position::{Direction, Position};
pub use player::{Player, PlayerColor, PlayerId};
pub use board::WallGrid;
pub use rng::{GameRng, GameRngState, RandomSource};
pub use config::{
    MatchConfig, BOARD_SIZE, CELL_COUNT, DIE_FACES, PLAYER_COUNT, START_POSITIONS, WALL_PROBABILITY,
    WIN_THRESHOLD,
};
pub use event::MatchEvent;
pub use error::{LabyrinthError, MoveError, Result, RollError};
pub use state::{MatchPhase, MatchState, ValidMoves};
