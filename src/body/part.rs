//! Per-segment physical state and actuator bookkeeping.

use glam::{Quat, Vec3};

use super::segment::{ContactPolicy, JointLimits, Segment, SegmentSpec};

/// Snapshot of one segment as reported by the physics backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPartState {
    /// World-space position of the rigid body.
    pub position: Vec3,
    /// World-space rotation of the rigid body.
    pub rotation: Quat,
    /// Linear velocity in world space.
    pub linear_velocity: Vec3,
    /// Whether the segment is currently touching the ground.
    pub touching_ground: bool,
}

impl BodyPartState {
    /// A motionless segment at `position` with `rotation`, not in contact.
    pub fn at_rest(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            linear_velocity: Vec3::ZERO,
            touching_ground: false,
        }
    }

    /// The segment's forward axis (+Z rotated into world space).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }
}

impl Default for BodyPartState {
    fn default() -> Self {
        Self::at_rest(Vec3::ZERO, Quat::IDENTITY)
    }
}

/// Canonical pose a segment returns to at the start of every episode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RestPose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl RestPose {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }
}

/// Registry record for one segment.
///
/// Holds the static joint configuration, the pose captured at setup, the
/// most recent physics snapshot and the last commands sent to its joint.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyPartSpec {
    pub segment: Segment,
    pub limits: JointLimits,
    pub contact: ContactPolicy,
    pub rest: RestPose,
    pub state: BodyPartState,
    /// Maximum force currently granted to the joint drive.
    pub current_strength: f32,
    /// Last joint target rotation, Euler degrees.
    pub target_euler: Vec3,
    /// Last joint target rotation, each axis normalised into `[0, 1]` of its range.
    pub normalized_rotation: Vec3,
}

impl BodyPartSpec {
    /// Creates a record from its static spec and the first physics snapshot.
    pub fn new(spec: &SegmentSpec, initial: BodyPartState) -> Self {
        Self {
            segment: spec.segment,
            limits: spec.limits,
            contact: spec.contact,
            rest: RestPose::new(initial.position, initial.rotation),
            state: initial,
            current_strength: 0.0,
            target_euler: Vec3::ZERO,
            normalized_rotation: Vec3::ZERO,
        }
    }

    /// Restores the snapshot to the rest pose with no motion or contact.
    ///
    /// Actuator strength is left as is; the next action overwrites it.
    pub fn reset(&mut self) {
        self.state = BodyPartState::at_rest(self.rest.position, self.rest.rotation);
    }

    pub fn is_root(&self) -> bool {
        self.segment.is_root()
    }
}
