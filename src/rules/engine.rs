//! The labyrinth rules engine.
//!
//! ## Turn cycle
//!
//! 1. `roll_die` sets the step budget for the current player
//! 2. `attempt_move` spends one step per call
//! 3. when the outcome ends the turn, the caller checks `has_winner` and
//!    either starts a new match or calls `next_turn`
//!
//! `finish_turn` bundles step 3 for callers that don't need to interleave
//! their own UI work.
//!
//! ## Canonical rules
//!
//! - The starting player is drawn uniformly at random from the engine's RNG.
//! - Every move is a single grid step and consumes exactly one point of the
//!   roll. A UI that lets the player pick a cell further away issues one
//!   `attempt_move` per step along the path.
//! - Start corners are never walls.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{
    Direction, GameRng, GameRngState, MatchConfig, MatchEvent, MatchPhase, MatchState, MoveError,
    Player, PlayerId, Position, RandomSource, RollError, ValidMoves, WallGrid, DIE_FACES,
    PLAYER_COUNT, WIN_THRESHOLD,
};

/// What a successful `attempt_move` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// Stepped onto an open cell.
    Moved { to: Position, remaining: u8 },

    /// Stepped onto the artifact, which respawned at `respawned_at`.
    CollectedArtifact {
        to: Position,
        remaining: u8,
        total: u32,
        respawned_at: Position,
    },

    /// Walked into a wall. The player is back on their start corner and the
    /// rest of the roll is forfeited.
    HitWall { wall: Position, returned_to: Position },
}

impl MoveOutcome {
    /// Steps left after this move.
    #[must_use]
    pub fn remaining(&self) -> u8 {
        match self {
            MoveOutcome::Moved { remaining, .. }
            | MoveOutcome::CollectedArtifact { remaining, .. } => *remaining,
            MoveOutcome::HitWall { .. } => 0,
        }
    }

    /// Should the caller end the turn now?
    #[must_use]
    pub fn ends_turn(&self) -> bool {
        self.remaining() == 0
    }
}

/// Result of `finish_turn`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnResolution {
    /// Steps remain; the same player keeps moving.
    Continue { remaining: u8 },
    /// The turn passed to this player.
    NextTurn(PlayerId),
    /// This player won. A fresh match has already been set up.
    MatchWon(PlayerId),
}

/// Everything `take_turn` did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    /// Value shown by the die.
    pub rolled: u8,
    /// One outcome per step actually taken.
    pub outcomes: Vec<MoveOutcome>,
    /// How the turn was settled.
    pub resolution: TurnResolution,
}

/// Owns one match at a time and enforces the rules on it.
///
/// Generic over the randomness source so tests can script walls, rolls and
/// spawns. Every operation takes `&mut self`; share an engine across threads
/// only behind a single owner or a mutex.
#[derive(Clone, Debug)]
pub struct RulesEngine<R = GameRng> {
    config: MatchConfig,
    rng: R,
    state: MatchState,
    events: Vec<MatchEvent>,
}

impl RulesEngine<GameRng> {
    /// Create an engine seeded from `config.seed` and set up the first match.
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        let rng = GameRng::new(config.seed);
        Self::with_rng(config, rng)
    }

    /// Snapshot of the RNG position, for reproducing a session.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }
}

impl Default for RulesEngine<GameRng> {
    fn default() -> Self {
        Self::new(MatchConfig::default())
    }
}

impl<R: RandomSource> RulesEngine<R> {
    /// Create an engine drawing from `rng` and set up the first match.
    ///
    /// `config.seed` is ignored; the injected source is used as-is.
    pub fn with_rng(config: MatchConfig, mut rng: R) -> Self {
        let state = Self::fresh_state(&mut rng, &config, 1);
        let mut engine = Self {
            config,
            rng,
            state,
            events: Vec::new(),
        };
        engine.announce_match();
        engine
    }

    fn fresh_state(rng: &mut R, config: &MatchConfig, match_number: u32) -> MatchState {
        // Draw order is part of the reproducibility contract:
        // walls, then starting player, then artifact.
        let walls = WallGrid::generate(rng);
        let first_player = PlayerId::new(rng.gen_index(PLAYER_COUNT) as u8);
        let artifact = walls.random_open_cell(rng, config.max_spawn_attempts);
        MatchState::new(walls, first_player, artifact, match_number)
    }

    fn announce_match(&mut self) {
        debug!(
            match_number = self.state.match_number,
            first_player = %self.state.current_player,
            walls = self.state.walls.wall_count(),
            artifact = %self.state.artifact,
            "match started"
        );
        self.emit(MatchEvent::MatchStarted {
            match_number: self.state.match_number,
            first_player: self.state.current_player,
            artifact: self.state.artifact,
        });
    }

    /// Queue `event`, dropping the oldest once `max_pending_events` is hit.
    fn emit(&mut self, event: MatchEvent) {
        let capacity = self.config.max_pending_events;
        if capacity == 0 {
            return;
        }
        if self.events.len() >= capacity {
            let excess = self.events.len() + 1 - capacity;
            self.events.drain(..excess);
            trace!(dropped = excess, "event queue full, oldest events dropped");
        }
        self.events.push(event);
    }

    /// Throw away the current match and set up a new one.
    ///
    /// Generates a new wall grid, puts both players on their start corners
    /// with no artifacts, picks the starting player at random, spawns the
    /// artifact on an open cell and clears the move budget.
    pub fn initialize_match(&mut self) -> &MatchState {
        let match_number = self.state.match_number + 1;
        self.state = Self::fresh_state(&mut self.rng, &self.config, match_number);
        self.announce_match();
        &self.state
    }

    /// Roll the movement die for the current player.
    ///
    /// Returns the rolled budget, drawn uniformly from `DIE_FACES`.
    ///
    /// # Errors
    ///
    /// `RollError::MovesRemaining` if the current player still has steps to
    /// spend. The budget is left untouched.
    pub fn roll_die(&mut self) -> Result<u8, RollError> {
        if self.state.current_moves > 0 {
            return Err(RollError::MovesRemaining(self.state.current_moves));
        }

        let value = DIE_FACES[self.rng.gen_index(DIE_FACES.len())];
        self.state.current_moves = value;
        self.state.refresh_valid_moves();

        let player = self.state.current_player;
        debug!(%player, value, "die rolled");
        self.emit(MatchEvent::DieRolled { player, value });
        Ok(value)
    }

    /// Legal next-step destinations for the current player.
    #[must_use]
    pub fn compute_valid_moves(&self) -> ValidMoves {
        self.state.compute_valid_moves()
    }

    /// Step `player` one cell to `destination`.
    ///
    /// On an open cell the step costs one move; landing on the artifact also
    /// collects it and respawns it elsewhere. Walking into a wall sends the
    /// player back to their start corner and forfeits the rest of the roll.
    ///
    /// # Errors
    ///
    /// Rejected without touching state when it is not `player`'s turn, no
    /// moves remain, `destination` is off the board, or it is not exactly
    /// one grid step from the player.
    pub fn attempt_move(
        &mut self,
        player: PlayerId,
        destination: Position,
    ) -> Result<MoveOutcome, MoveError> {
        if player != self.state.current_player {
            return Err(MoveError::NotYourTurn(player));
        }
        if self.state.current_moves == 0 {
            return Err(MoveError::NoMovesRemaining);
        }
        if !destination.in_bounds() {
            return Err(MoveError::OutOfBounds(destination));
        }
        let from = self.state.player(player).position;
        if !from.is_adjacent(destination) {
            return Err(MoveError::NotAdjacent { from, to: destination });
        }

        if self.state.is_wall(destination) {
            return Ok(self.hit_wall(player, destination));
        }

        self.state.player_mut(player).position = destination;
        self.state.current_moves -= 1;
        let remaining = self.state.current_moves;
        trace!(%player, %from, to = %destination, remaining, "player moved");
        self.emit(MatchEvent::PlayerMoved {
            player,
            from,
            to: destination,
            remaining,
        });

        let outcome = if destination == self.state.artifact {
            let (total, respawned_at) = self.collect_artifact(player);
            MoveOutcome::CollectedArtifact {
                to: destination,
                remaining,
                total,
                respawned_at,
            }
        } else {
            MoveOutcome::Moved { to: destination, remaining }
        };

        self.state.refresh_valid_moves();
        Ok(outcome)
    }

    /// `attempt_move` reduced to success or failure.
    pub fn try_move(&mut self, player: PlayerId, destination: Position) -> bool {
        self.attempt_move(player, destination).is_ok()
    }

    /// Step the current player one cell in `direction`.
    ///
    /// # Errors
    ///
    /// As `attempt_move`; stepping off the edge is `OutOfBounds`.
    pub fn step(&mut self, direction: Direction) -> Result<MoveOutcome, MoveError> {
        let player = self.state.current_player;
        let from = self.state.player(player).position;
        let (dx, dy) = direction.delta();
        let destination = Position::new(from.x + dx, from.y + dy);
        self.attempt_move(player, destination)
    }

    /// Walk `player` along `path`, one `attempt_move` per cell.
    ///
    /// Stops early when the turn ends (wall or budget spent) or someone
    /// reaches the win threshold. Returns the outcome of every step taken.
    ///
    /// # Errors
    ///
    /// The whole path is checked before the first step: wrong player, no
    /// moves, more cells than moves remaining, an off-board cell, or a gap
    /// between consecutive cells rejects it without touching state.
    pub fn walk_path(
        &mut self,
        player: PlayerId,
        path: &[Position],
    ) -> Result<Vec<MoveOutcome>, MoveError> {
        if player != self.state.current_player {
            return Err(MoveError::NotYourTurn(player));
        }
        let remaining = self.state.current_moves;
        if remaining == 0 {
            return Err(MoveError::NoMovesRemaining);
        }
        if path.len() > remaining as usize {
            return Err(MoveError::PathTooLong {
                len: path.len(),
                remaining,
            });
        }
        check_route(self.state.player(player).position, path)?;

        let mut outcomes = Vec::with_capacity(path.len());
        for &cell in path {
            let outcome = self.attempt_move(player, cell)?;
            outcomes.push(outcome);
            if outcome.ends_turn() || self.state.winner().is_some() {
                break;
            }
        }
        Ok(outcomes)
    }

    /// Play a whole turn for the current player: roll, walk up to the rolled
    /// number of cells of `path`, then settle the turn.
    ///
    /// Cells beyond the roll are ignored and unspent steps are forfeited, so
    /// the turn always passes (or the match restarts on a win).
    ///
    /// # Errors
    ///
    /// Rejected without touching state if steps are still pending from an
    /// earlier roll, or if `path` leaves the board or skips a cell.
    pub fn take_turn(&mut self, path: &[Position]) -> crate::core::Result<TurnReport> {
        if self.state.current_moves > 0 {
            return Err(RollError::MovesRemaining(self.state.current_moves).into());
        }
        let player = self.state.current_player;
        check_route(self.state.player(player).position, path)?;

        let rolled = self.roll_die()?;
        let steps = &path[..path.len().min(rolled as usize)];
        let outcomes = if steps.is_empty() {
            Vec::new()
        } else {
            self.walk_path(player, steps)?
        };

        if self.state.current_moves > 0 && self.state.winner().is_none() {
            trace!(%player, forfeited = self.state.current_moves, "unspent steps forfeited");
            self.state.current_moves = 0;
            self.state.valid_moves.clear();
        }
        let resolution = self.finish_turn();
        Ok(TurnReport {
            rolled,
            outcomes,
            resolution,
        })
    }

    fn hit_wall(&mut self, player: PlayerId, wall: Position) -> MoveOutcome {
        let mover = self.state.player_mut(player);
        mover.return_to_start();
        let returned_to = mover.position;

        self.state.current_moves = 0;
        self.state.valid_moves.clear();

        debug!(%player, %wall, "wall hit, returned to start");
        self.emit(MatchEvent::WallHit {
            player,
            wall,
            returned_to,
        });
        MoveOutcome::HitWall { wall, returned_to }
    }

    fn collect_artifact(&mut self, player: PlayerId) -> (u32, Position) {
        let mover = self.state.player_mut(player);
        mover.artifacts += 1;
        let total = mover.artifacts;

        let respawned_at = self
            .state
            .walls
            .random_open_cell(&mut self.rng, self.config.max_spawn_attempts);
        self.state.artifact = respawned_at;

        debug!(%player, total, %respawned_at, "artifact collected");
        self.emit(MatchEvent::ArtifactCollected {
            player,
            total,
            respawned_at,
        });
        if total == WIN_THRESHOLD {
            debug!(%player, "win threshold reached");
            self.emit(MatchEvent::PlayerWon { player });
        }
        (total, respawned_at)
    }

    /// Pass the turn to the other player and clear the move budget.
    pub fn next_turn(&mut self) {
        self.state.current_player = self.state.current_player.opponent();
        self.state.current_moves = 0;
        self.state.valid_moves.clear();
        self.state.turn_number += 1;

        let to = self.state.current_player;
        let turn_number = self.state.turn_number;
        debug!(%to, turn_number, "turn passed");
        self.emit(MatchEvent::TurnPassed { to, turn_number });
    }

    /// First player, in id order, who has collected enough artifacts to win.
    ///
    /// Never resets anything; call `initialize_match` to start over.
    #[must_use]
    pub fn has_winner(&self) -> Option<&Player> {
        self.state.winner()
    }

    /// Settle the turn after a move.
    ///
    /// A winner starts a fresh match. Otherwise, with no steps left the turn
    /// passes; with steps left nothing changes. Intended to be called right
    /// after `attempt_move`; called while awaiting a roll it passes the turn.
    pub fn finish_turn(&mut self) -> TurnResolution {
        if let Some(winner) = self.has_winner().map(|p| p.id) {
            self.initialize_match();
            return TurnResolution::MatchWon(winner);
        }
        if self.state.current_moves == 0 {
            self.next_turn();
            return TurnResolution::NextTurn(self.state.current_player);
        }
        TurnResolution::Continue {
            remaining: self.state.current_moves,
        }
    }

    /// Current match state.
    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Derived turn-cycle phase of the current match.
    #[must_use]
    pub fn phase(&self) -> MatchPhase {
        self.state.phase()
    }

    /// Engine configuration.
    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Events queued since the last drain, oldest first.
    ///
    /// Holds at most `MatchConfig::max_pending_events` entries.
    #[must_use]
    pub fn pending_events(&self) -> &[MatchEvent] {
        &self.events
    }

    /// Take all queued events, oldest first.
    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Each cell of `path` must be on the board and one step from the previous.
fn check_route(start: Position, path: &[Position]) -> Result<(), MoveError> {
    let mut from = start;
    for &to in path {
        if !to.in_bounds() {
            return Err(MoveError::OutOfBounds(to));
        }
        if !from.is_adjacent(to) {
            return Err(MoveError::NotAdjacent { from, to });
        }
        from = to;
    }
    Ok(())
}
