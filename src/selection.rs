//! The two-phase move-selection state machine.
//!
//! One selector drives one turn: the cursor first picks the source square,
//! then the destination, then the proposal goes to the validator. A
//! rejected proposal re-enters source selection with the cursor left where
//! it stopped, so the player re-aims instead of starting over.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::board::{BoardBounds, Square};
use crate::input::Intent;
use crate::moves::{CandidateMove, MoveValidator, Side};

/// The stage a turn's selection is in. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionPhase {
    /// The cursor is choosing the square to move from.
    SelectingSource,
    /// The source is locked; the cursor is choosing the square to move to.
    SelectingDestination,
    /// Both squares are chosen; the proposal awaits validation.
    Finished,
}

/// Receives cursor-focus updates, e.g. to drive camera framing.
///
/// Fire-and-forget: implementations must not fail the state machine, so
/// the method has no way to report an error.
pub trait FocusNotifier {
    /// The cursor now rests on `square`.
    fn on_focus_changed(&mut self, square: Square);
}

/// A notifier that ignores every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl FocusNotifier for NullNotifier {
    fn on_focus_changed(&mut self, _square: Square) {}
}

/// Outcome of one [`MoveSelector::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// The turn is still in progress; step again next tick.
    Continue,
    /// The validator accepted this proposal. The selector is now terminal
    /// and must be reset before it is stepped again.
    Completed(CandidateMove),
}

/// Consumes one [`Intent`] per tick and accumulates a source and
/// destination square into a validated [`CandidateMove`].
///
/// Collaborators are injected at construction; the selector holds no
/// global state and can be driven entirely from tests.
pub struct MoveSelector {
    phase: SelectionPhase,
    src: Square,
    dst: Square,
    side: Side,
    completed: bool,
    bounds: Box<dyn BoardBounds>,
    validator: Box<dyn MoveValidator>,
    notifier: Box<dyn FocusNotifier>,
}

impl MoveSelector {
    /// Creates a selector for `side` with the cursor on `focus`.
    ///
    /// Construction is silent; the first focus notification fires from
    /// [`MoveSelector::reset`] or from the first step.
    ///
    /// # Panics
    ///
    /// Panics if `focus` is outside `bounds`. Stepping refuses to leave
    /// the board, so an off-board cursor could never walk back on; a bad
    /// focus is a construction bug, not a game condition.
    pub fn new(
        side: Side,
        focus: Square,
        bounds: Box<dyn BoardBounds>,
        validator: Box<dyn MoveValidator>,
        notifier: Box<dyn FocusNotifier>,
    ) -> Self {
        assert!(
            bounds.contains(focus),
            "initial focus {} is outside the board",
            focus
        );
        Self {
            phase: SelectionPhase::SelectingSource,
            src: focus,
            dst: focus,
            side,
            completed: false,
            bounds,
            validator,
            notifier,
        }
    }

    /// The active selection phase.
    pub fn phase(&self) -> SelectionPhase {
        self.phase
    }

    /// The source square chosen so far.
    pub fn src(&self) -> Square {
        self.src
    }

    /// The destination cursor. Meaningful once the source is locked.
    pub fn dst(&self) -> Square {
        self.dst
    }

    /// The side this selector proposes moves for.
    pub fn side(&self) -> Side {
        self.side
    }

    /// True once a proposal has been accepted. A completed selector
    /// refuses further steps until reset.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Rearms the selector for a new turn with the cursor on `focus`.
    ///
    /// # Panics
    ///
    /// Panics if `focus` is outside the board, as in [`MoveSelector::new`].
    #[instrument(skip(self), fields(side = %self.side))]
    pub fn reset(&mut self, focus: Square) {
        assert!(
            self.bounds.contains(focus),
            "reset focus {} is outside the board",
            focus
        );
        debug!(%focus, "Selection reset");
        self.phase = SelectionPhase::SelectingSource;
        self.src = focus;
        self.dst = focus;
        self.completed = false;
        self.notifier.on_focus_changed(focus);
    }

    /// Advances the selection by one tick's intent.
    ///
    /// Order within a tick is fixed: the directional delta is computed
    /// first, phase transitions apply second, and the (possibly new)
    /// phase acts third. With a one-intent-per-tick vocabulary the delta
    /// and a transition are never both non-trivial, but the order decides
    /// which square a Start tick reports to the focus notifier.
    ///
    /// # Panics
    ///
    /// Panics if called after a [`StepResult::Completed`] without an
    /// intervening [`MoveSelector::reset`]; that is a driver bug, not a
    /// game condition.
    pub fn step(&mut self, intent: Intent) -> StepResult {
        assert!(
            !self.completed,
            "MoveSelector stepped after completion; reset() it for the next turn"
        );

        let delta = intent.delta();

        match intent {
            Intent::StartSelection if self.phase == SelectionPhase::SelectingSource => {
                self.dst = self.src;
                self.phase = SelectionPhase::SelectingDestination;
                debug!(src = %self.src, "Source locked, selecting destination");
            }
            Intent::EndSelection => {
                self.phase = SelectionPhase::Finished;
                debug!(src = %self.src, dst = %self.dst, "Selection closed");
            }
            _ => {}
        }

        match self.phase {
            SelectionPhase::SelectingSource => {
                let candidate = self.src.offset(delta);
                if self.bounds.contains(candidate) {
                    self.src = candidate;
                }
                self.notifier.on_focus_changed(self.src);
                StepResult::Continue
            }
            SelectionPhase::SelectingDestination => {
                let candidate = self.dst.offset(delta);
                if self.bounds.contains(candidate) {
                    self.dst = candidate;
                }
                self.notifier.on_focus_changed(self.dst);
                StepResult::Continue
            }
            SelectionPhase::Finished => {
                let mv = CandidateMove::new(self.side, self.src, self.dst);
                if self.validator.is_legal(&mv) {
                    self.completed = true;
                    info!(%mv, "Move selection completed");
                    StepResult::Completed(mv)
                } else {
                    // Re-aim from where the cursor stopped: the rejected
                    // destination becomes the new source.
                    debug!(%mv, "Proposal rejected, selecting a new source");
                    self.src = self.dst;
                    self.phase = SelectionPhase::SelectingSource;
                    StepResult::Continue
                }
            }
        }
    }
}
