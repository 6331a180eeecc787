//! Board squares, cursor displacements, and bounds checking.

use serde::{Deserialize, Serialize};

/// A square on the chess board, addressed by file (`x`) and rank (`y`).
///
/// The standard board spans `0 <= x, y < 8`. Squares are plain values;
/// whether a square is actually on a board is the [`BoardBounds`]
/// implementation's call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    /// File, increasing eastward.
    pub x: i32,
    /// Rank, increasing northward.
    pub y: i32,
}

impl Square {
    /// Creates a square from file and rank.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the square displaced by `delta`. No bounds check.
    pub fn offset(self, delta: Delta) -> Self {
        Self {
            x: self.x + delta.dx,
            y: self.y + delta.dy,
        }
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A one-step cursor displacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Delta {
    /// Change in file.
    pub dx: i32,
    /// Change in rank.
    pub dy: i32,
}

impl Delta {
    /// No displacement.
    pub const ZERO: Delta = Delta { dx: 0, dy: 0 };
    /// One rank up.
    pub const NORTH: Delta = Delta { dx: 0, dy: 1 };
    /// One rank down.
    pub const SOUTH: Delta = Delta { dx: 0, dy: -1 };
    /// One file left.
    pub const WEST: Delta = Delta { dx: -1, dy: 0 };
    /// One file right.
    pub const EAST: Delta = Delta { dx: 1, dy: 0 };

    /// True when this delta leaves the cursor in place.
    pub fn is_zero(self) -> bool {
        self == Delta::ZERO
    }
}

/// Decides whether a square lies on the board.
///
/// Injected into the selection state machine so tests can shrink the board
/// to a corner case without touching the 8x8 default.
pub trait BoardBounds {
    /// Returns true if `square` is on the board.
    fn contains(&self, square: Square) -> bool;
}

/// Width and height of the standard chess board.
pub const STANDARD_BOARD_SIZE: i32 = 8;

/// The standard 8x8 chess board.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardBoard;

impl BoardBounds for StandardBoard {
    fn contains(&self, square: Square) -> bool {
        (0..STANDARD_BOARD_SIZE).contains(&square.x) && (0..STANDARD_BOARD_SIZE).contains(&square.y)
    }
}

/// A rectangular board of arbitrary dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RectBoard {
    /// Number of files.
    pub width: i32,
    /// Number of ranks.
    pub height: i32,
}

impl RectBoard {
    /// Creates a board of `width` files by `height` ranks.
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

impl BoardBounds for RectBoard {
    fn contains(&self, square: Square) -> bool {
        (0..self.width).contains(&square.x) && (0..self.height).contains(&square.y)
    }
}
