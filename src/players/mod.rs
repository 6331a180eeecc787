//! Player capability interface and implementations.

mod human;
mod scripted;

pub use human::HumanPlayer;
pub use scripted::ScriptedPlayer;

use crate::board::Square;
use crate::moves::{CandidateMove, Side};

/// How a finished turn ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The validator accepted this move.
    Committed(CandidateMove),
    /// The turn was abandoned from outside.
    Cancelled,
    /// The turn's tick budget ran out before a move was committed.
    Forfeited,
}

impl TurnOutcome {
    /// The committed move, if the turn produced one.
    pub fn committed_move(&self) -> Option<&CandidateMove> {
        match self {
            TurnOutcome::Committed(mv) => Some(mv),
            TurnOutcome::Cancelled | TurnOutcome::Forfeited => None,
        }
    }
}

/// A source of moves for one side, driven one tick at a time.
///
/// The game loop owns the cadence: it starts a turn, polls `tick` once per
/// frame, and reads the outcome when `is_done` reports true. Implementations
/// never block in `tick` and never spawn threads; a human session, a
/// scripted replay, and a future engine-driven player all sit behind this
/// same interface.
pub trait Player {
    /// The side this player moves for.
    fn side(&self) -> Side;

    /// Begins a new turn with the cursor on `initial_focus`.
    ///
    /// # Panics
    ///
    /// Panics if a turn is already in flight; double-start is a driver
    /// bug, not a game condition. Board-backed implementations also
    /// panic when `initial_focus` is off the board.
    fn start_move(&mut self, initial_focus: Square);

    /// Advances the in-flight turn by one tick. No-op once the turn is
    /// done, and after a cancellation no further tick has any effect.
    fn tick(&mut self);

    /// Abandons the in-flight turn. Safe in any phase and idempotent; a
    /// second call is a no-op, and a finished turn's outcome is kept.
    fn cancel(&mut self);

    /// The finished turn's outcome, if any.
    fn outcome(&self) -> Option<&TurnOutcome>;

    /// True exactly when the current turn has committed, cancelled, or
    /// forfeited.
    fn is_done(&self) -> bool {
        self.outcome().is_some()
    }
}
