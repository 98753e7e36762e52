//! Scripted collaborators shared by unit tests.

use std::collections::{HashMap, VecDeque};

use glam::{Quat, Vec3};

use crate::body::{BodyPartState, RestPose, Segment};
use crate::locomotion::action::{JointCommand, ACTION_SIZE};
use crate::locomotion::policy::Policy;
use crate::locomotion::world::{PhysicsBackend, Scene, TargetHandle};

/// In-memory world: bodies are plain snapshots the test edits directly.
#[derive(Debug, Default)]
pub struct MockWorld {
    pub bodies: HashMap<Segment, BodyPartState>,
    pub ground_distance: Option<f32>,
    pub targets: Vec<Vec3>,
    pub spawned_targets: usize,
    pub refuse_targets: bool,
    pub pending_touch: bool,
    pub driven: Vec<(Segment, JointCommand)>,
    pub resets: Vec<Segment>,
    pub advances: usize,
    pub ground_body_on_advance: bool,
}

impl MockWorld {
    /// Nine motionless segments; the body at height 1, legs around it.
    pub fn spider() -> Self {
        let mut bodies = HashMap::new();
        for segment in Segment::ALL {
            let position = match segment.leg_index() {
                None => Vec3::new(0.0, 1.0, 0.0),
                Some(leg) => {
                    let angle = leg as f32 * std::f32::consts::FRAC_PI_2;
                    let reach = if segment.is_upper_leg() { 0.5 } else { 1.0 };
                    Vec3::new(angle.cos() * reach, 0.5, angle.sin() * reach)
                }
            };
            bodies.insert(segment, BodyPartState::at_rest(position, Quat::IDENTITY));
        }
        Self {
            bodies,
            ground_distance: Some(0.5),
            ..Self::default()
        }
    }

    pub fn set_velocity(&mut self, segment: Segment, velocity: Vec3) {
        if let Some(b) = self.bodies.get_mut(&segment) {
            b.linear_velocity = velocity;
        }
    }

    pub fn set_rotation_of(&mut self, segment: Segment, rotation: Quat) {
        if let Some(b) = self.bodies.get_mut(&segment) {
            b.rotation = rotation;
        }
    }

    pub fn set_ground_contact(&mut self, segment: Segment, touching: bool) {
        if let Some(b) = self.bodies.get_mut(&segment) {
            b.touching_ground = touching;
        }
    }
}

impl PhysicsBackend for MockWorld {
    fn body_state(&self, segment: Segment) -> Option<BodyPartState> {
        self.bodies.get(&segment).copied()
    }

    fn raycast(&self, _origin: Vec3, _direction: Vec3, _max_distance: f32) -> Option<f32> {
        self.ground_distance
    }

    fn drive_joint(&mut self, segment: Segment, command: &JointCommand) {
        self.driven.push((segment, *command));
    }

    fn reset_body(&mut self, segment: Segment, pose: &RestPose) {
        self.bodies
            .insert(segment, BodyPartState::at_rest(pose.position, pose.rotation));
        self.resets.push(segment);
    }

    fn set_rotation(&mut self, segment: Segment, rotation: Quat) {
        self.set_rotation_of(segment, rotation);
    }

    fn advance(&mut self) {
        self.advances += 1;
        if self.ground_body_on_advance {
            self.set_ground_contact(Segment::Body, true);
        }
    }
}

impl Scene for MockWorld {
    fn spawn_target(&mut self, position: Vec3) -> TargetHandle {
        self.spawned_targets += 1;
        if !self.refuse_targets {
            self.targets.push(position);
        }
        TargetHandle(self.spawned_targets as u64 - 1)
    }

    fn target_position(&self, target: TargetHandle) -> Option<Vec3> {
        self.targets.get(target.0 as usize).copied()
    }

    fn take_target_touch(&mut self) -> bool {
        std::mem::take(&mut self.pending_touch)
    }
}

/// Replays a fixed list of actions, then falls back to neutral.
pub struct ScriptedPolicy {
    actions: VecDeque<Vec<f32>>,
}

impl ScriptedPolicy {
    pub fn new(actions: Vec<Vec<f32>>) -> Self {
        Self {
            actions: actions.into(),
        }
    }
}

impl Policy for ScriptedPolicy {
    fn act(&mut self, _observation: &[f32]) -> Vec<f32> {
        self.actions
            .pop_front()
            .unwrap_or_else(|| vec![0.0; ACTION_SIZE])
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
