//! Scripted player for tests and replays.

use tracing::{debug, info};

use super::{Player, TurnOutcome};
use crate::board::Square;
use crate::moves::{CandidateMove, Side};

/// A player that commits one predetermined move on its first tick.
///
/// Useful as an opponent in tests and demos. The move is taken at face
/// value; no validator is consulted, so the caller decides legality.
pub struct ScriptedPlayer {
    mv: CandidateMove,
    outcome: Option<TurnOutcome>,
    active: bool,
}

impl ScriptedPlayer {
    /// Creates a player that will always propose `src -> dst` for `side`.
    pub fn new(side: Side, src: Square, dst: Square) -> Self {
        Self {
            mv: CandidateMove::new(side, src, dst),
            outcome: None,
            active: false,
        }
    }
}

impl Player for ScriptedPlayer {
    fn side(&self) -> Side {
        self.mv.side
    }

    fn start_move(&mut self, initial_focus: Square) {
        assert!(
            !self.active,
            "start_move() called while a turn is already in flight"
        );
        debug!(focus = %initial_focus, "Scripted turn started");
        self.active = true;
        self.outcome = None;
    }

    fn tick(&mut self) {
        if !self.active {
            return;
        }
        info!(mv = %self.mv, "Scripted turn committed");
        self.outcome = Some(TurnOutcome::Committed(self.mv));
        self.active = false;
    }

    fn cancel(&mut self) {
        if self.outcome.is_some() {
            return;
        }
        self.active = false;
        self.outcome = Some(TurnOutcome::Cancelled);
    }

    fn outcome(&self) -> Option<&TurnOutcome> {
        self.outcome.as_ref()
    }
}
