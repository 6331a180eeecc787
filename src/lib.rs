//! Gesture Chess library - body tracking to board moves
//!
//! This library turns raw VR body tracking (or keyboard input) into
//! validated chess-style board moves, one fixed-rate tick at a time.
//!
//! # Architecture
//!
//! - **Tracking**: hand and head positions from a pluggable source
//! - **Gesture**: threshold classifier from positions to discrete poses
//! - **Input**: debounced translation of poses (or keys) into move intents
//! - **Selection**: cursor state machine from intents to a candidate move
//! - **Players**: per-turn sessions that run a selection to an outcome
//!
//! # Example
//!
//! ```
//! use gesture_chess::{
//!     AllowAll, HumanPlayer, Intent, NullNotifier, Player, ScriptedIntents, Side,
//!     Square, StandardBoard,
//! };
//!
//! // Drive a turn from a canned intent stream instead of live tracking.
//! let script = ScriptedIntents::new(vec![
//!     Intent::MoveEast,
//!     Intent::StartSelection,
//!     Intent::MoveNorth,
//!     Intent::EndSelection,
//! ]);
//!
//! let mut player = HumanPlayer::new(
//!     Side::White,
//!     Box::new(script),
//!     Box::new(StandardBoard),
//!     Box::new(AllowAll),
//!     Box::new(NullNotifier),
//! );
//!
//! player.start_move(Square::new(0, 0));
//! while !player.is_done() {
//!     player.tick();
//! }
//! assert!(player.outcome().is_some());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod board;
mod config;
mod gesture;
mod input;
mod moves;
mod players;
mod selection;
mod tracking;

// Crate-level exports - Board geometry
pub use board::{BoardBounds, Delta, RectBoard, Square, StandardBoard, STANDARD_BOARD_SIZE};

// Crate-level exports - Configuration
pub use config::{ConfigError, PipelineConfig};

// Crate-level exports - Gesture classification
pub use gesture::{GestureDetector, GestureThresholds, PhysicalGesture};

// Crate-level exports - Intent translation
pub use input::{
    GestureIntents, Intent, IntentSource, KeySource, KeyboardIntents, LogicalKey, ScriptedIntents,
};

// Crate-level exports - Moves and validation
pub use moves::{AllowAll, CandidateMove, MoveValidator, Side};

// Crate-level exports - Move selection
pub use selection::{FocusNotifier, MoveSelector, NullNotifier, SelectionPhase, StepResult};

// Crate-level exports - Players
pub use players::{HumanPlayer, Player, ScriptedPlayer, TurnOutcome};

// Crate-level exports - Body tracking
pub use tracking::{BodyPose, PositionSource, SharedPoseSource, StaticPositionSource, Vec3};
