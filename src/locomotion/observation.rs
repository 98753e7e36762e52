//! Observation encoding for the locomotion agent.
//!
//! Reduces the agent's physical state to a fixed-length vector expressed
//! in the orientation frame, so the policy sees the same numbers whatever
//! the agent's absolute heading in the world.

use glam::Vec3;

use super::config::{MAX_RAYCAST_DISTANCE, MAX_WALKING_SPEED};
use super::world::PhysicsBackend;
use crate::body::BodyPartRegistry;
use crate::orientation::{rotation_delta, OrientationFrame};

/// Number of leading fields before the per-segment block.
pub const HEADER_DIM: usize = 16;

/// Observation length for the nine-segment spider.
pub const OBSERVATION_DIM: usize = HEADER_DIM + 1 + 8 * 2;

/// Everything an observation is computed from.
#[derive(Debug, Clone, Copy)]
pub struct ObservationInput<'a> {
    /// Commanded walking speed.
    pub target_speed: f32,
    /// Stabilised heading frame.
    pub frame: &'a OrientationFrame,
    /// World position of the target.
    pub target_position: Vec3,
    /// Segment records in registry order.
    pub registry: &'a BodyPartRegistry,
    /// Result of the downward ground probe.
    pub ground_hit: Option<f32>,
    /// Normaliser for joint strengths.
    pub max_joint_force: f32,
}

/// Downward ray from the root body measuring ground clearance.
pub struct GroundProbe;

impl GroundProbe {
    /// Casts straight down from `origin` up to [`MAX_RAYCAST_DISTANCE`].
    pub fn cast<P>(physics: &P, origin: Vec3) -> Option<f32>
    where
        P: PhysicsBackend + ?Sized,
    {
        physics
            .raycast(origin, Vec3::NEG_Y, MAX_RAYCAST_DISTANCE)
            .filter(|d| *d <= MAX_RAYCAST_DISTANCE)
    }

    /// Clearance as a fraction of the probe length; a miss reads as `1.0`.
    pub fn normalized(hit: Option<f32>) -> f32 {
        match hit {
            Some(distance) => distance / MAX_RAYCAST_DISTANCE,
            None => 1.0,
        }
    }
}

/// Builds observation vectors.
pub struct ObservationBuilder;

impl ObservationBuilder {
    /// Builds the observation vector.
    ///
    /// Layout:
    /// ```text
    /// [speed_norm(1)] [vel_error(1)] [avg_vel_local(3)] [vel_goal_local(3)]
    /// [facing_delta_xyzw(4)] [target_local(3)] [ground_clearance(1)]
    /// ++ per segment in registry order: [touching_ground(1)] [strength_norm(1), not for root]
    /// ```
    ///
    /// The output depends only on `input`; identical inputs give
    /// bit-identical vectors.
    pub fn build(input: &ObservationInput<'_>) -> Vec<f32> {
        let frame = input.frame;
        let registry = input.registry;
        let mut obs = Vec::with_capacity(Self::observation_dim(registry));

        let forward = frame.forward();
        obs.push(input.target_speed / MAX_WALKING_SPEED);

        let velocity_goal = forward * input.target_speed;
        let avg_velocity = registry.average_velocity();
        obs.push(velocity_goal.distance(avg_velocity));
        push_vec3(&mut obs, frame.inverse_transform_direction(avg_velocity));
        push_vec3(&mut obs, frame.inverse_transform_direction(velocity_goal));

        let delta = rotation_delta(registry.root().state.forward(), forward);
        obs.extend_from_slice(&[delta.x, delta.y, delta.z, delta.w]);

        push_vec3(&mut obs, frame.inverse_transform_point(input.target_position));
        obs.push(GroundProbe::normalized(input.ground_hit));

        for part in registry.iter() {
            obs.push(bool_feature(part.state.touching_ground));
            if !part.is_root() {
                obs.push(normalized_strength(
                    part.current_strength,
                    input.max_joint_force,
                ));
            }
        }

        obs
    }

    /// Observation length for a registry with `registry.len()` segments.
    pub fn observation_dim(registry: &BodyPartRegistry) -> usize {
        HEADER_DIM + registry.len() * 2 - 1
    }
}

fn push_vec3(obs: &mut Vec<f32>, v: Vec3) {
    obs.extend_from_slice(&[v.x, v.y, v.z]);
}

fn bool_feature(flag: bool) -> f32 {
    if flag {
        1.0
    } else {
        0.0
    }
}

fn normalized_strength(strength: f32, max_force: f32) -> f32 {
    if max_force > 0.0 {
        strength / max_force
    } else {
        0.0
    }
}
