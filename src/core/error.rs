//! Error types for rejected engine operations.
//!
//! Every rejection leaves the match untouched, so callers can report the
//! error and carry on with the same state.

use thiserror::Error;

use super::player::PlayerId;
use super::position::Position;

/// Why a move attempt was rejected. A rejected move never changes state.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),

    #[error("no moves remaining; roll the die first")]
    NoMovesRemaining,

    #[error("destination {0} is off the board")]
    OutOfBounds(Position),

    #[error("destination {to} is not one step from {from}")]
    NotAdjacent { from: Position, to: Position },

    #[error("path of {len} cells exceeds the {remaining} move(s) remaining")]
    PathTooLong { len: usize, remaining: u8 },
}

/// Why a die roll was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollError {
    #[error("cannot roll with {0} move(s) remaining")]
    MovesRemaining(u8),
}

/// Errors that can occur while driving a match
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabyrinthError {
    #[error(transparent)]
    Move(#[from] MoveError),

    #[error(transparent)]
    Roll(#[from] RollError),
}

/// Convenience Result type for engine operations
pub type Result<T> = std::result::Result<T, LabyrinthError>;
