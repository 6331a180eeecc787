//! Human player: one selection session per turn, fed by an intent source.

use tracing::{debug, info, instrument};

use super::{Player, TurnOutcome};
use crate::board::{BoardBounds, Square};
use crate::input::IntentSource;
use crate::moves::{MoveValidator, Side};
use crate::selection::{FocusNotifier, MoveSelector, StepResult};

/// A human-driven move source.
///
/// Owns one [`MoveSelector`] and one [`IntentSource`]; each turn runs the
/// selector from `start_move` until the validator accepts a proposal, the
/// turn is cancelled, or the optional tick budget runs out. Absent input
/// on a tick is simply [`Intent::None`](crate::input::Intent::None), so
/// the session never waits for the player.
pub struct HumanPlayer {
    side: Side,
    selector: MoveSelector,
    intents: Box<dyn IntentSource>,
    outcome: Option<TurnOutcome>,
    active: bool,
    ticks_used: u32,
    tick_budget: Option<u32>,
}

impl HumanPlayer {
    /// Creates a player for `side` over the given input and collaborators.
    pub fn new(
        side: Side,
        intents: Box<dyn IntentSource>,
        bounds: Box<dyn BoardBounds>,
        validator: Box<dyn MoveValidator>,
        notifier: Box<dyn FocusNotifier>,
    ) -> Self {
        Self {
            side,
            selector: MoveSelector::new(side, Square::new(0, 0), bounds, validator, notifier),
            intents,
            outcome: None,
            active: false,
            ticks_used: 0,
            tick_budget: None,
        }
    }

    /// Limits each turn to `budget` ticks; exceeding it forfeits the turn.
    ///
    /// Turns run unbounded when no budget is set.
    pub fn with_tick_budget(mut self, budget: u32) -> Self {
        self.tick_budget = Some(budget);
        self
    }

    /// Ticks consumed by the current turn so far.
    pub fn ticks_used(&self) -> u32 {
        self.ticks_used
    }
}

impl Player for HumanPlayer {
    fn side(&self) -> Side {
        self.side
    }

    #[instrument(skip(self), fields(side = %self.side))]
    fn start_move(&mut self, initial_focus: Square) {
        assert!(
            !self.active,
            "start_move() called while a turn is already in flight"
        );
        info!(focus = %initial_focus, "Turn started");
        self.active = true;
        self.outcome = None;
        self.ticks_used = 0;
        self.selector.reset(initial_focus);
    }

    fn tick(&mut self) {
        if !self.active {
            return;
        }

        self.ticks_used += 1;
        let intent = self.intents.next_intent();

        match self.selector.step(intent) {
            StepResult::Completed(mv) => {
                info!(%mv, ticks = self.ticks_used, "Turn committed");
                self.outcome = Some(TurnOutcome::Committed(mv));
                self.active = false;
            }
            StepResult::Continue => {
                if let Some(budget) = self.tick_budget
                    && self.ticks_used >= budget
                {
                    info!(budget, "Turn budget exhausted, forfeiting");
                    self.outcome = Some(TurnOutcome::Forfeited);
                    self.active = false;
                }
            }
        }
    }

    fn cancel(&mut self) {
        if self.outcome.is_some() {
            // Already done (possibly already cancelled): keep the outcome.
            debug!(side = %self.side, "cancel() on a finished turn ignored");
            return;
        }
        info!(side = %self.side, "Turn cancelled");
        self.active = false;
        self.outcome = Some(TurnOutcome::Cancelled);
    }

    fn outcome(&self) -> Option<&TurnOutcome> {
        self.outcome.as_ref()
    }
}
