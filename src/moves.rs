//! Move proposals and the legality seam.

use serde::{Deserialize, Serialize};

use crate::board::Square;

/// The side a player plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// White moves first.
    White,
    /// Black moves second.
    Black,
}

impl Side {
    /// Returns the opposing side.
    pub fn opponent(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Short label for logs and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::White => "white",
            Side::Black => "black",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A proposed move awaiting the external legality check.
///
/// Produced by the selection state machine when a turn's cursor work is
/// done; consumed exactly once by a [`MoveValidator`]. Carries no claim of
/// legality by itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateMove {
    /// The side proposing the move.
    pub side: Side,
    /// The square the piece moves from.
    pub src: Square,
    /// The square the piece moves to.
    pub dst: Square,
}

impl CandidateMove {
    /// Creates a move proposal.
    pub fn new(side: Side, src: Square, dst: Square) -> Self {
        Self { side, src, dst }
    }
}

impl std::fmt::Display for CandidateMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} -> {}", self.side, self.src, self.dst)
    }
}

/// The authoritative move-legality check.
///
/// Implemented by the actual chess engine; from this crate's perspective it
/// is side-effect-free and always answers. An illegal verdict is a normal
/// game outcome, not an error.
pub trait MoveValidator {
    /// True if `mv` is legal on the current board.
    fn is_legal(&self, mv: &CandidateMove) -> bool;
}

/// A validator that accepts everything.
///
/// Default for the demo binary and for tests that only exercise cursor
/// mechanics.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl MoveValidator for AllowAll {
    fn is_legal(&self, _mv: &CandidateMove) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_flips() {
        assert_eq!(Side::White.opponent(), Side::Black);
        assert_eq!(Side::Black.opponent(), Side::White);
    }

    #[test]
    fn test_move_display() {
        let mv = CandidateMove::new(Side::White, Square::new(2, 0), Square::new(2, 1));
        assert_eq!(mv.to_string(), "white (2, 0) -> (2, 1)");
    }
}
