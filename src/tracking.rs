//! Tracked-body sampling seam between the VR rig and the classifier.
//!
//! The raw device layer (OpenXR, engine rig, replay file) lives behind
//! [`PositionSource`]; this module only defines the sample types and a
//! fixed-pose source used by tests and the demo.

use serde::{Deserialize, Serialize};

/// A tracked point in meters.
///
/// Hand samples are expressed in the head-relative local frame, so the
/// classifier stays invariant under head rotation and translation. The head
/// sample is in the rig's world frame; only its height is inspected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    /// Lateral offset, positive to the right.
    pub x: f32,
    /// Height.
    pub y: f32,
    /// Forward offset, positive away from the body.
    pub z: f32,
}

impl Vec3 {
    /// Creates a point from its components.
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// One frame's worth of body samples. Any part may have lost tracking.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BodyPose {
    /// Left hand in the head-local frame, if tracked.
    pub left_hand: Option<Vec3>,
    /// Right hand in the head-local frame, if tracked.
    pub right_hand: Option<Vec3>,
    /// Head in the world frame, if tracked.
    pub head: Option<Vec3>,
}

impl BodyPose {
    /// A pose with all three parts tracked.
    pub fn tracked(left_hand: Vec3, right_hand: Vec3, head: Vec3) -> Self {
        Self {
            left_hand: Some(left_hand),
            right_hand: Some(right_hand),
            head: Some(head),
        }
    }

    /// Returns `(left, right, head)` when every part is tracked.
    pub fn complete(&self) -> Option<(Vec3, Vec3, Vec3)> {
        match (self.left_hand, self.right_hand, self.head) {
            (Some(l), Some(r), Some(h)) => Some((l, r, h)),
            _ => None,
        }
    }
}

/// Supplies per-frame body samples.
///
/// Implementations wrap whatever actually tracks the player. Each accessor
/// returns `None` when that part has lost tracking; callers must treat a
/// partial frame as "no gesture", never as an error.
pub trait PositionSource {
    /// Left hand in the head-local frame.
    fn left_hand(&self) -> Option<Vec3>;

    /// Right hand in the head-local frame.
    fn right_hand(&self) -> Option<Vec3>;

    /// Head in the world frame.
    fn head(&self) -> Option<Vec3>;

    /// Assembles the current frame's samples.
    fn pose(&self) -> BodyPose {
        BodyPose {
            left_hand: self.left_hand(),
            right_hand: self.right_hand(),
            head: self.head(),
        }
    }
}

/// A source that always reports the same pose.
///
/// Stands in for real tracking hardware in tests and the demo binary.
#[derive(Debug, Clone, Default)]
pub struct StaticPositionSource {
    pose: BodyPose,
}

impl StaticPositionSource {
    /// Creates a source pinned to `pose`.
    pub fn new(pose: BodyPose) -> Self {
        Self { pose }
    }

    /// Replaces the reported pose.
    pub fn set_pose(&mut self, pose: BodyPose) {
        self.pose = pose;
    }
}

impl PositionSource for StaticPositionSource {
    fn left_hand(&self) -> Option<Vec3> {
        self.pose.left_hand
    }

    fn right_hand(&self) -> Option<Vec3> {
        self.pose.right_hand
    }

    fn head(&self) -> Option<Vec3> {
        self.pose.head
    }
}

/// A source whose pose can be updated from outside after it is boxed.
///
/// Clones share one underlying pose: hand a clone to the detector, keep
/// another, and push a fresh frame through [`SharedPoseSource::set_pose`]
/// each tick. Single-threaded by design, like the rest of the pipeline.
#[derive(Debug, Clone, Default)]
pub struct SharedPoseSource {
    inner: std::rc::Rc<std::cell::RefCell<BodyPose>>,
}

impl SharedPoseSource {
    /// Creates a source starting at `pose`.
    pub fn new(pose: BodyPose) -> Self {
        Self {
            inner: std::rc::Rc::new(std::cell::RefCell::new(pose)),
        }
    }

    /// Publishes this frame's samples to every clone.
    pub fn set_pose(&self, pose: BodyPose) {
        *self.inner.borrow_mut() = pose;
    }
}

impl PositionSource for SharedPoseSource {
    fn left_hand(&self) -> Option<Vec3> {
        self.inner.borrow().left_hand
    }

    fn right_hand(&self) -> Option<Vec3> {
        self.inner.borrow().right_hand
    }

    fn head(&self) -> Option<Vec3> {
        self.inner.borrow().head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_requires_all_parts() {
        let full = BodyPose::tracked(
            Vec3::new(-0.2, 0.0, 0.0),
            Vec3::new(0.2, 0.0, 0.0),
            Vec3::new(0.0, 0.5, 0.0),
        );
        assert!(full.complete().is_some());

        let mut missing = full;
        missing.head = None;
        assert!(missing.complete().is_none());
        assert_eq!(BodyPose::default().complete(), None);
    }

    #[test]
    fn test_static_source_reports_pose() {
        let pose = BodyPose::tracked(
            Vec3::new(-0.2, 0.0, 0.4),
            Vec3::new(0.2, 0.0, 0.0),
            Vec3::new(0.0, 0.5, 0.0),
        );
        let source = StaticPositionSource::new(pose);
        assert_eq!(source.pose(), pose);
    }

    #[test]
    fn test_shared_source_clones_see_updates() {
        let handle = SharedPoseSource::default();
        let reader = handle.clone();
        assert_eq!(reader.pose(), BodyPose::default());

        let pose = BodyPose::tracked(
            Vec3::new(-0.2, 0.0, 0.0),
            Vec3::new(0.2, 0.0, 0.0),
            Vec3::new(0.0, 0.5, 0.0),
        );
        handle.set_pose(pose);
        assert_eq!(reader.pose(), pose);
    }
}
