//! Rules engine for the labyrinth race.
//!
//! `RulesEngine` owns the match state and is the only thing that mutates
//! it. Callers drive it one operation at a time:
//! - Roll for the current player
//! - Step the current player one cell per move
//! - Check for a winner and pass or restart

pub mod engine;

pub use engine::{MoveOutcome, RulesEngine, TurnReport, TurnResolution};
