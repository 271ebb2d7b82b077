//! Grid coordinates and the 4-neighbourhood.
//!
//! Positions are plain `(x, y)` pairs on the fixed 8×8 board. `x` grows to
//! the right, `y` grows downward, so `(0, 0)` is the top-left corner.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::config::BOARD_SIZE;

/// A cell on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// One grid step in a cardinal direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// All directions in neighbour enumeration order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// `(dx, dy)` for one step.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }
}

impl Position {
    /// Create a position. No bounds check; see [`Position::in_bounds`].
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Is this position on the board?
    #[must_use]
    pub const fn in_bounds(self) -> bool {
        let size = BOARD_SIZE as i32;
        self.x >= 0 && self.x < size && self.y >= 0 && self.y < size
    }

    /// Manhattan distance to `other`.
    #[must_use]
    pub const fn manhattan(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Exactly one grid step away?
    #[must_use]
    pub const fn is_adjacent(self, other: Position) -> bool {
        self.manhattan(other) == 1
    }

    /// The neighbour in `direction`, or `None` if it leaves the board.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<Position> {
        let (dx, dy) = direction.delta();
        let next = Position::new(self.x + dx, self.y + dy);
        next.in_bounds().then_some(next)
    }

    /// In-bounds 4-neighbours, ordered up, right, down, left.
    #[must_use]
    pub fn neighbors(self) -> SmallVec<[Position; 4]> {
        Direction::ALL.iter().filter_map(|&d| self.step(d)).collect()
    }

    /// Cell at row-major index `index` (`y * BOARD_SIZE + x`).
    #[must_use]
    pub(crate) const fn from_index(index: usize) -> Self {
        Self::new((index % BOARD_SIZE) as i32, (index / BOARD_SIZE) as i32)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
