//! Input translation: raw key edges and gesture labels into move intents.
//!
//! Every input path funnels into the same [`Intent`] vocabulary, so the
//! selection state machine never knows whether a player waves a hand or
//! taps an arrow key.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::debug;

use crate::board::Delta;
use crate::gesture::{GestureDetector, PhysicalGesture};

/// A normalized, input-source-agnostic control signal. One per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum Intent {
    /// Step the cursor one rank up.
    MoveNorth,
    /// Step the cursor one rank down.
    MoveSouth,
    /// Step the cursor one file left.
    MoveWest,
    /// Step the cursor one file right.
    MoveEast,
    /// Lock the source square and begin choosing the destination.
    StartSelection,
    /// Close the selection and submit the move for validation.
    EndSelection,
    /// Nothing this tick.
    None,
}

impl Intent {
    /// The cursor displacement this intent carries.
    ///
    /// Zero for everything but the four directional intents.
    pub fn delta(self) -> Delta {
        match self {
            Intent::MoveNorth => Delta::NORTH,
            Intent::MoveSouth => Delta::SOUTH,
            Intent::MoveWest => Delta::WEST,
            Intent::MoveEast => Delta::EAST,
            Intent::StartSelection | Intent::EndSelection | Intent::None => Delta::ZERO,
        }
    }

    /// Short label for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::MoveNorth => "move-north",
            Intent::MoveSouth => "move-south",
            Intent::MoveWest => "move-west",
            Intent::MoveEast => "move-east",
            Intent::StartSelection => "start-selection",
            Intent::EndSelection => "end-selection",
            Intent::None => "none",
        }
    }
}

impl From<PhysicalGesture> for Intent {
    /// Maps a classified pose to the intent it stands for.
    ///
    /// Jump begins a selection, squat ends one; the four leans step the
    /// cursor.
    fn from(gesture: PhysicalGesture) -> Self {
        match gesture {
            PhysicalGesture::Forward => Intent::MoveNorth,
            PhysicalGesture::Back => Intent::MoveSouth,
            PhysicalGesture::Left => Intent::MoveWest,
            PhysicalGesture::Right => Intent::MoveEast,
            PhysicalGesture::Jump => Intent::StartSelection,
            PhysicalGesture::Squat => Intent::EndSelection,
            PhysicalGesture::None => Intent::None,
        }
    }
}

/// The fixed set of logical keys a keyboard-like source reports.
///
/// Declaration order is the scan priority: when several keys went down on
/// the same tick, the first one listed here wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum LogicalKey {
    /// Step north.
    Up,
    /// Step south.
    Down,
    /// Step west.
    Left,
    /// Step east.
    Right,
    /// Lock the source square (begin destination selection).
    Confirm,
    /// End the selection and submit the move.
    Cancel,
}

impl LogicalKey {
    /// The intent this key triggers on its down edge.
    pub fn intent(self) -> Intent {
        match self {
            LogicalKey::Up => Intent::MoveNorth,
            LogicalKey::Down => Intent::MoveSouth,
            LogicalKey::Left => Intent::MoveWest,
            LogicalKey::Right => Intent::MoveEast,
            LogicalKey::Confirm => Intent::StartSelection,
            LogicalKey::Cancel => Intent::EndSelection,
        }
    }
}

/// Reports key-down edges for the current tick.
///
/// `was_pressed` must be true only on the tick the key actually went down;
/// a held key does not retrigger. That contract is what keeps one keypress
/// from flooding the state machine with repeated intents.
pub trait KeySource {
    /// True if `key` went down this tick.
    fn was_pressed(&self, key: LogicalKey) -> bool;
}

/// Yields one [`Intent`] per tick. Never blocks.
///
/// When the underlying input has nothing to report, the source returns
/// [`Intent::None`] immediately.
pub trait IntentSource {
    /// The intent for this tick.
    fn next_intent(&mut self) -> Intent;
}

/// Translates key edges into intents, first matching key wins.
pub struct KeyboardIntents {
    keys: Box<dyn KeySource>,
}

impl KeyboardIntents {
    /// Creates a translator over `keys`.
    pub fn new(keys: Box<dyn KeySource>) -> Self {
        Self { keys }
    }
}

impl IntentSource for KeyboardIntents {
    fn next_intent(&mut self) -> Intent {
        for key in LogicalKey::iter() {
            if self.keys.was_pressed(key) {
                let intent = key.intent();
                debug!(key = ?key, intent = intent.as_str(), "Key edge");
                return intent;
            }
        }
        Intent::None
    }
}

/// Translates gesture labels into intents, debounced on pose entry.
///
/// A sustained pose emits its intent exactly once, on the tick the pose is
/// first seen; the hands must return to no-pose before another intent can
/// fire. A direct change from one pose to another emits nothing and leaves
/// the remembered label alone, so the player always releases before the
/// next command.
pub struct GestureIntents {
    detector: GestureDetector,
    previous: PhysicalGesture,
}

impl GestureIntents {
    /// Creates a translator over `detector` with empty debounce memory.
    pub fn new(detector: GestureDetector) -> Self {
        Self {
            detector,
            previous: PhysicalGesture::None,
        }
    }

    /// Feeds one classified label through the debounce.
    ///
    /// Exposed so embedders that sample on their own cadence can reuse the
    /// edge logic without a [`GestureDetector`].
    pub fn translate(&mut self, current: PhysicalGesture) -> Intent {
        if self.previous == PhysicalGesture::None && current != PhysicalGesture::None {
            self.previous = current;
            let intent = Intent::from(current);
            debug!(gesture = current.as_str(), intent = intent.as_str(), "Gesture edge");
            intent
        } else if self.previous != PhysicalGesture::None && current == PhysicalGesture::None {
            self.previous = PhysicalGesture::None;
            Intent::None
        } else {
            Intent::None
        }
    }
}

impl IntentSource for GestureIntents {
    fn next_intent(&mut self) -> Intent {
        let current = self.detector.sample();
        self.translate(current)
    }
}

/// Replays a fixed sequence of intents, one per tick.
///
/// Used by tests and the demo's replay mode; yields [`Intent::None`]
/// once the script runs out.
#[derive(Debug, Clone, Default)]
pub struct ScriptedIntents {
    script: VecDeque<Intent>,
}

impl ScriptedIntents {
    /// Creates a source that replays `script` in order.
    pub fn new(script: impl IntoIterator<Item = Intent>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// True when the script has been fully consumed.
    pub fn is_exhausted(&self) -> bool {
        self.script.is_empty()
    }
}

impl IntentSource for ScriptedIntents {
    fn next_intent(&mut self) -> Intent {
        self.script.pop_front().unwrap_or(Intent::None)
    }
}
