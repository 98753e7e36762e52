//! Collaborator interfaces the locomotion core is driven through.
//!
//! The core never integrates physics or instantiates assets itself. A host
//! simulation implements these traits and hands itself to the agent on
//! every call.

use glam::{Quat, Vec3};

use super::action::JointCommand;
use crate::body::{BodyPartState, RestPose, Segment};

/// Rigid-body simulation seen from one agent.
pub trait PhysicsBackend {
    /// Current snapshot of `segment`, or `None` if the scene has no such body.
    fn body_state(&self, segment: Segment) -> Option<BodyPartState>;

    /// Casts a ray and returns the distance to the first hit within
    /// `max_distance`, or `None` on a miss.
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<f32>;

    /// Sends a joint target rotation and drive to `segment`.
    fn drive_joint(&mut self, segment: Segment, command: &JointCommand);

    /// Teleports `segment` to `pose` and clears its velocities and contacts.
    fn reset_body(&mut self, segment: Segment, pose: &RestPose);

    /// Overrides the world rotation of `segment`.
    fn set_rotation(&mut self, segment: Segment, rotation: Quat);

    /// Advances the simulation by one fixed tick.
    fn advance(&mut self);
}

/// Opaque handle to a spawned target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetHandle(pub u64);

/// Scene management: target instantiation and target events.
pub trait Scene {
    /// Instantiates a target at `position` and returns its handle.
    fn spawn_target(&mut self, position: Vec3) -> TargetHandle;

    /// Current world position of `target`, or `None` if it no longer exists.
    fn target_position(&self, target: TargetHandle) -> Option<Vec3>;

    /// Returns true once per "target touched" event since the last call.
    fn take_target_touch(&mut self) -> bool;
}

/// A host that provides both physics and scene services.
pub trait World: PhysicsBackend + Scene {}

impl<T: PhysicsBackend + Scene + ?Sized> World for T {}
