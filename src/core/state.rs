//! Match state.
//!
//! ## MatchState
//!
//! Everything a UI needs to draw one match:
//! - Hidden wall grid
//! - Both players (position, start corner, artifacts)
//! - Current player and remaining moves this turn
//! - Artifact position
//! - Cells the current player may step to next
//!
//! Only the rules engine mutates it; everything here is a read projection.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::board::WallGrid;
use super::config::{PLAYER_COUNT, WIN_THRESHOLD};
use super::player::{Player, PlayerId};
use super::position::Position;

/// Up to four destination cells.
pub type ValidMoves = SmallVec<[Position; 4]>;

/// Where a match is in its turn cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchPhase {
    /// The current player must roll before moving.
    AwaitingRoll,
    /// The current player has steps left to spend.
    Moving { remaining: u8 },
    /// A player reached the win threshold. The caller should start a new match.
    Won(PlayerId),
}

/// Complete state of one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub(crate) walls: WallGrid,
    pub(crate) players: [Player; PLAYER_COUNT],
    pub(crate) current_player: PlayerId,
    pub(crate) artifact: Position,
    pub(crate) current_moves: u8,
    pub(crate) valid_moves: ValidMoves,
    pub(crate) turn_number: u32,
    pub(crate) match_number: u32,
}

impl MatchState {
    /// Assemble a state at the start of a turn with no moves rolled.
    ///
    /// `artifact` must not be a wall; the engine guarantees this for
    /// everything it builds.
    #[must_use]
    pub(crate) fn new(
        walls: WallGrid,
        first_player: PlayerId,
        artifact: Position,
        match_number: u32,
    ) -> Self {
        Self {
            walls,
            players: Player::fresh_pair(),
            current_player: first_player,
            artifact,
            current_moves: 0,
            valid_moves: ValidMoves::new(),
            turn_number: 1,
            match_number,
        }
    }

    /// The hidden wall grid.
    #[must_use]
    pub fn walls(&self) -> &WallGrid {
        &self.walls
    }

    /// Is `pos` a wall?
    #[must_use]
    pub fn is_wall(&self, pos: Position) -> bool {
        self.walls.is_wall(pos)
    }

    /// Both players in id order.
    #[must_use]
    pub fn players(&self) -> &[Player; PLAYER_COUNT] {
        &self.players
    }

    /// One player's state.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a valid seat.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }

    /// Whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    /// Where the artifact lies.
    #[must_use]
    pub fn artifact(&self) -> Position {
        self.artifact
    }

    /// Steps left this turn.
    #[must_use]
    pub fn current_moves(&self) -> u8 {
        self.current_moves
    }

    /// Cells the current player may target with their next step.
    #[must_use]
    pub fn valid_moves(&self) -> &[Position] {
        &self.valid_moves
    }

    /// Is `pos` among the current valid moves?
    #[must_use]
    pub fn is_valid_move(&self, pos: Position) -> bool {
        self.valid_moves.contains(&pos)
    }

    /// Turn counter within this match, starting at 1.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// How many matches the owning engine has started, this one included.
    #[must_use]
    pub fn match_number(&self) -> u32 {
        self.match_number
    }

    /// The player standing on `pos`, if any. Player 0 wins ties.
    #[must_use]
    pub fn player_at(&self, pos: Position) -> Option<&Player> {
        self.players.iter().find(|p| p.position == pos)
    }

    /// Legal next-step destinations for the current player.
    ///
    /// Empty with no moves left; otherwise the in-bounds 4-neighbours of the
    /// player's cell. Walls are deliberately included: stepping into one is
    /// legal and punished on arrival.
    #[must_use]
    pub fn compute_valid_moves(&self) -> ValidMoves {
        if self.current_moves == 0 {
            return ValidMoves::new();
        }
        self.player(self.current_player).position.neighbors()
    }

    pub(crate) fn refresh_valid_moves(&mut self) {
        self.valid_moves = self.compute_valid_moves();
    }

    /// First player, in id order, with at least `WIN_THRESHOLD` artifacts.
    #[must_use]
    pub fn winner(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.artifacts >= WIN_THRESHOLD)
    }

    /// Derived turn-cycle phase. A winner takes precedence.
    #[must_use]
    pub fn phase(&self) -> MatchPhase {
        if let Some(winner) = self.winner() {
            MatchPhase::Won(winner.id)
        } else if self.current_moves == 0 {
            MatchPhase::AwaitingRoll
        } else {
            MatchPhase::Moving {
                remaining: self.current_moves,
            }
        }
    }
}
