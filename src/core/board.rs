//! Hidden wall grid.
//!
//! Generated once per match and immutable afterwards. Walls are never shown
//! to players; a UI only learns about one when a player walks into it.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::config::{BOARD_SIZE, CELL_COUNT, START_POSITIONS, WALL_PROBABILITY};
use super::position::Position;
use super::rng::RandomSource;

/// `BOARD_SIZE × BOARD_SIZE` wall flags, stored row-major as `rows[y][x]`.
///
/// Invariant: the start corners are never walls.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WallGrid {
    rows: [[bool; BOARD_SIZE]; BOARD_SIZE],
}

impl WallGrid {
    /// A grid with no walls.
    #[must_use]
    pub fn open() -> Self {
        Self {
            rows: [[false; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Roll a fresh grid.
    ///
    /// Every cell except the start corners is an independent Bernoulli trial
    /// with `WALL_PROBABILITY`. Start corners consume no draw.
    pub fn generate<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        let mut grid = Self::open();
        for index in 0..CELL_COUNT {
            let pos = Position::from_index(index);
            if is_start_corner(pos) {
                continue;
            }
            grid.rows[pos.y as usize][pos.x as usize] = rng.gen_bool(WALL_PROBABILITY);
        }
        trace!(walls = grid.wall_count(), "generated wall grid");
        grid
    }

    /// Build a grid with walls at exactly `walls`.
    ///
    /// Out-of-bounds entries and start corners are ignored.
    #[must_use]
    pub fn from_walls(walls: &[Position]) -> Self {
        let mut grid = Self::open();
        for &pos in walls {
            if pos.in_bounds() && !is_start_corner(pos) {
                grid.rows[pos.y as usize][pos.x as usize] = true;
            }
        }
        grid
    }

    /// Is `pos` a wall? Off-board positions are not walls.
    #[must_use]
    pub fn is_wall(&self, pos: Position) -> bool {
        pos.in_bounds() && self.rows[pos.y as usize][pos.x as usize]
    }

    /// Number of wall cells.
    #[must_use]
    pub fn wall_count(&self) -> usize {
        self.rows.iter().flatten().filter(|&&w| w).count()
    }

    /// Rows of wall flags, `rows()[y][x]`.
    #[must_use]
    pub fn rows(&self) -> &[[bool; BOARD_SIZE]; BOARD_SIZE] {
        &self.rows
    }

    /// Every non-wall cell in row-major order.
    pub fn open_cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..CELL_COUNT)
            .map(Position::from_index)
            .filter(move |&pos| !self.is_wall(pos))
    }

    /// Pick a uniformly random non-wall cell.
    ///
    /// Rejection-samples up to `max_attempts` cells, then falls back to the
    /// first open cell in row-major order. A start corner is always open, so
    /// the scan cannot come up empty.
    pub fn random_open_cell<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        max_attempts: u32,
    ) -> Position {
        for _ in 0..max_attempts {
            let pos = Position::new(
                rng.gen_index(BOARD_SIZE) as i32,
                rng.gen_index(BOARD_SIZE) as i32,
            );
            if !self.is_wall(pos) {
                return pos;
            }
        }

        trace!(max_attempts, "spawn sampling exhausted, scanning for open cell");
        self.open_cells().next().unwrap_or(START_POSITIONS[0])
    }
}

fn is_start_corner(pos: Position) -> bool {
    START_POSITIONS.contains(&pos)
}
