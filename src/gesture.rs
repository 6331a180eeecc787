//! Physical gesture classification from tracked hand and head positions.
//!
//! A fixed-threshold heuristic over one frame of samples: no history, no
//! learning. Hand coordinates are head-relative, so leaning and reaching
//! read the same wherever the player stands.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::tracking::{PositionSource, Vec3};

/// A discrete physical pose read from one frame of body tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum PhysicalGesture {
    /// A hand reaches forward while both stay roughly centered.
    Forward,
    /// Both hands pulled back behind the torso.
    Back,
    /// Left hand swung out left, right hand kept near center.
    Left,
    /// Right hand swung out right, left hand kept near center.
    Right,
    /// Head above the standing band.
    Jump,
    /// Head below the squat line.
    Squat,
    /// No pose matched, or tracking was incomplete.
    None,
}

impl PhysicalGesture {
    /// Short label for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Back => "back",
            Self::Left => "left",
            Self::Right => "right",
            Self::Jump => "jump",
            Self::Squat => "squat",
            Self::None => "none",
        }
    }
}

/// Threshold constants for the pose classifier.
///
/// Distances are meters in the head-local frame (hands) or world frame
/// (head height). The defaults were tuned on a seated-scale rig; override
/// through [`PipelineConfig`](crate::config::PipelineConfig) if the play
/// space differs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureThresholds {
    /// Lower edge of the standing head-height band, inclusive.
    pub stand_min: f32,
    /// Upper edge of the standing head-height band, exclusive.
    pub stand_max: f32,
    /// Head heights below this classify as a squat.
    pub squat_max: f32,
    /// Head heights strictly above this classify as a jump.
    pub jump_min: f32,
    /// Forward reach: either hand past this forward offset.
    pub reach_z: f32,
    /// Pull-back: both hands behind this (negative) forward offset.
    pub pull_z: f32,
    /// Hands count as centered within plus/minus this lateral offset.
    pub center_x: f32,
    /// Looser centering allowance while pulling back.
    pub back_slack_x: f32,
    /// A sideways lean needs the leading hand past plus/minus this offset.
    pub lean_x: f32,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            stand_min: 0.4,
            stand_max: 0.7,
            squat_max: 0.2,
            jump_min: 0.7,
            reach_z: 0.35,
            pull_z: -0.3,
            center_x: 0.3,
            back_slack_x: 0.5,
            lean_x: 0.6,
        }
    }
}

impl GestureThresholds {
    /// Classifies one frame of samples into a [`PhysicalGesture`].
    ///
    /// Pure and deterministic. Evaluation order is fixed and first match
    /// wins: the standing-band poses (forward, back, left, right), then
    /// squat, then jump.
    pub fn classify(&self, left: Vec3, right: Vec3, head: Vec3) -> PhysicalGesture {
        if head.y >= self.stand_min && head.y < self.stand_max {
            if (left.z > self.reach_z || right.z > self.reach_z)
                && left.x > -self.center_x
                && right.x < self.center_x
            {
                PhysicalGesture::Forward
            } else if left.z < self.pull_z
                && right.z < self.pull_z
                && left.x > -self.back_slack_x
                && right.x < self.back_slack_x
            {
                PhysicalGesture::Back
            } else if left.x < -self.lean_x && right.x < self.center_x {
                PhysicalGesture::Left
            } else if left.x > -self.center_x && right.x > self.lean_x {
                PhysicalGesture::Right
            } else {
                PhysicalGesture::None
            }
        } else if head.y < self.squat_max {
            PhysicalGesture::Squat
        } else if head.y > self.jump_min {
            PhysicalGesture::Jump
        } else {
            PhysicalGesture::None
        }
    }
}

/// Polls a [`PositionSource`] and classifies the current frame.
///
/// A frame with any part untracked classifies as
/// [`PhysicalGesture::None`]; lost tracking is not an error.
pub struct GestureDetector {
    source: Box<dyn PositionSource>,
    thresholds: GestureThresholds,
}

impl GestureDetector {
    /// Creates a detector over `source` with the given thresholds.
    pub fn new(source: Box<dyn PositionSource>, thresholds: GestureThresholds) -> Self {
        Self { source, thresholds }
    }

    /// Creates a detector with default thresholds.
    pub fn with_defaults(source: Box<dyn PositionSource>) -> Self {
        Self::new(source, GestureThresholds::default())
    }

    /// Classifies the source's current frame.
    pub fn sample(&self) -> PhysicalGesture {
        let Some((left, right, head)) = self.source.pose().complete() else {
            return PhysicalGesture::None;
        };

        let gesture = self.thresholds.classify(left, right, head);
        trace!(
            gesture = gesture.as_str(),
            left_x = left.x,
            right_x = right.x,
            head_y = head.y,
            "Classified pose"
        );
        gesture
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::{BodyPose, StaticPositionSource};

    const STANDING_HEAD: Vec3 = Vec3 {
        x: 0.0,
        y: 0.5,
        z: 0.0,
    };

    fn rest_hand(x: f32) -> Vec3 {
        Vec3::new(x, 0.0, 0.0)
    }

    fn classify(left: Vec3, right: Vec3, head: Vec3) -> PhysicalGesture {
        GestureThresholds::default().classify(left, right, head)
    }

    #[test]
    fn test_forward_reach_either_hand() {
        let reach = Vec3::new(0.0, 0.0, 0.4);
        assert_eq!(
            classify(reach, rest_hand(0.1), STANDING_HEAD),
            PhysicalGesture::Forward
        );
        assert_eq!(
            classify(rest_hand(-0.1), reach, STANDING_HEAD),
            PhysicalGesture::Forward
        );
    }

    #[test]
    fn test_forward_needs_centered_hands() {
        // Reaching forward but with the left hand swung wide: no match.
        let reach = Vec3::new(-0.4, 0.0, 0.4);
        assert_eq!(
            classify(reach, rest_hand(0.1), STANDING_HEAD),
            PhysicalGesture::None
        );
    }

    #[test]
    fn test_back_requires_both_hands() {
        let pulled = Vec3::new(0.0, 0.0, -0.4);
        assert_eq!(
            classify(pulled, pulled, STANDING_HEAD),
            PhysicalGesture::Back
        );
        assert_eq!(
            classify(pulled, rest_hand(0.1), STANDING_HEAD),
            PhysicalGesture::None
        );
    }

    #[test]
    fn test_sideways_leans() {
        assert_eq!(
            classify(rest_hand(-0.7), rest_hand(0.1), STANDING_HEAD),
            PhysicalGesture::Left
        );
        assert_eq!(
            classify(rest_hand(-0.1), rest_hand(0.7), STANDING_HEAD),
            PhysicalGesture::Right
        );
    }

    #[test]
    fn test_head_height_bands() {
        let l = rest_hand(-0.1);
        let r = rest_hand(0.1);
        assert_eq!(classify(l, r, Vec3::new(0.0, 0.1, 0.0)), PhysicalGesture::Squat);
        assert_eq!(classify(l, r, Vec3::new(0.0, 0.8, 0.0)), PhysicalGesture::Jump);
        // Between the squat line and the standing band: nothing matches.
        assert_eq!(classify(l, r, Vec3::new(0.0, 0.3, 0.0)), PhysicalGesture::None);
    }

    #[test]
    fn test_band_edges_exact() {
        let reach = Vec3::new(0.0, 0.0, 0.4);
        let r = rest_hand(0.1);
        // 0.4 is inside the standing band (inclusive lower edge).
        assert_eq!(
            classify(reach, r, Vec3::new(0.0, 0.4, 0.0)),
            PhysicalGesture::Forward
        );
        // 0.7 is outside the band and not yet a jump.
        assert_eq!(
            classify(reach, r, Vec3::new(0.0, 0.7, 0.0)),
            PhysicalGesture::None
        );
    }

    #[test]
    fn test_classify_is_deterministic() {
        let left = Vec3::new(-0.7, 0.0, 0.0);
        let right = rest_hand(0.1);
        let first = classify(left, right, STANDING_HEAD);
        for _ in 0..100 {
            assert_eq!(classify(left, right, STANDING_HEAD), first);
        }
    }

    #[test]
    fn test_detector_handles_lost_tracking() {
        let mut pose = BodyPose::tracked(Vec3::new(0.0, 0.0, 0.4), rest_hand(0.1), STANDING_HEAD);
        let detector = GestureDetector::with_defaults(Box::new(StaticPositionSource::new(pose)));
        assert_eq!(detector.sample(), PhysicalGesture::Forward);

        pose.right_hand = None;
        let detector = GestureDetector::with_defaults(Box::new(StaticPositionSource::new(pose)));
        assert_eq!(detector.sample(), PhysicalGesture::None);
    }
}
