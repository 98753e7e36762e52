//! Action decoding for the locomotion agent.
//!
//! A continuous action vector from the policy is turned into one
//! [`JointCommand`] per leg segment. Layout of the vector:
//!
//! ```text
//! [0..8)   upper legs 0..3, (x, y) target rotation each
//! [8..12)  lower legs 0..3, x target rotation
//! [12..20) strength: upper legs 0..3, then lower legs 0..3
//! [20..24) reserved, ignored
//! ```

use glam::{Quat, Vec3};

use super::config::AgentConfig;
use super::error::AgentError;
use crate::body::{BodyError, BodyPartRegistry, JointLimits, Segment};

/// Width of the action vector.
pub const ACTION_SIZE: usize = 24;

/// Number of leading components that drive joints.
pub const ACTIVE_ACTION_SIZE: usize = 20;

/// Drive parameters sent along with a joint target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointDrive {
    pub spring: f32,
    pub damper: f32,
    pub max_force: f32,
}

/// Decoded command for one joint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointCommand {
    pub segment: Segment,
    /// Target rotation relative to the joint's rest frame.
    pub target_rotation: Quat,
    /// The same target as Euler degrees `(x, y, z)`.
    pub euler_degrees: Vec3,
    /// Target position within each axis' range, in `[0, 1]`.
    pub normalized: Vec3,
    pub drive: JointDrive,
}

/// Decodes action vectors into joint commands.
pub struct ActionDecoder;

impl ActionDecoder {
    /// Checks length and finiteness without decoding.
    ///
    /// # Errors
    ///
    /// - [`AgentError::ActionLength`] if `actions.len() != ACTION_SIZE`
    /// - [`AgentError::NonFiniteAction`] for the first NaN or infinite component
    pub fn validate(actions: &[f32]) -> Result<(), AgentError> {
        if actions.len() != ACTION_SIZE {
            return Err(AgentError::ActionLength {
                expected: ACTION_SIZE,
                actual: actions.len(),
            });
        }
        if let Some((index, &value)) = actions.iter().enumerate().find(|(_, a)| !a.is_finite()) {
            return Err(AgentError::NonFiniteAction { index, value });
        }
        Ok(())
    }

    /// Decodes `actions` into commands for the eight leg segments, upper
    /// legs first.
    ///
    /// The whole vector is validated before anything is produced, so a
    /// rejected vector never reaches the actuators. Finite components
    /// outside `[-1, 1]` are clamped.
    pub fn decode(
        actions: &[f32],
        registry: &BodyPartRegistry,
        config: &AgentConfig,
    ) -> Result<Vec<JointCommand>, AgentError> {
        Self::validate(actions)?;

        let mut cursor = actions.iter().copied();
        let mut next = move || cursor.next().unwrap_or(0.0);

        let mut rotations = Vec::with_capacity(8);
        for segment in Segment::UPPER_LEGS {
            let (x, y) = (next(), next());
            rotations.push((segment, x, y));
        }
        for segment in Segment::LOWER_LEGS {
            rotations.push((segment, next(), 0.0));
        }

        let mut commands = Vec::with_capacity(rotations.len());
        for (segment, x, y) in rotations {
            let part = registry
                .get(segment)
                .ok_or(BodyError::MissingBodyPart(segment))?;
            let strength = config
                .strength_mapping
                .apply(next(), config.max_joint_force_limit);
            commands.push(Self::joint_command(
                segment,
                &part.limits,
                Vec3::new(x, y, 0.0),
                JointDrive {
                    spring: config.max_joint_spring,
                    damper: config.joint_damping,
                    max_force: strength,
                },
            ));
        }

        Ok(commands)
    }

    /// Maps per-axis actions in `[-1, 1]` onto the joint's limits.
    pub fn joint_command(
        segment: Segment,
        limits: &JointLimits,
        action: Vec3,
        drive: JointDrive,
    ) -> JointCommand {
        let t = (action.clamp(Vec3::NEG_ONE, Vec3::ONE) + Vec3::ONE) * 0.5;
        let euler = Vec3::new(
            lerp(limits.x_range(), t.x),
            lerp(limits.y_range(), t.y),
            lerp(limits.z_range(), t.z),
        );
        JointCommand {
            segment,
            target_rotation: euler_to_quat(euler),
            euler_degrees: euler,
            normalized: t,
            drive,
        }
    }
}

fn lerp((lo, hi): (f32, f32), t: f32) -> f32 {
    lo + (hi - lo) * t
}

/// Z first, then X, then Y.
fn euler_to_quat(degrees: Vec3) -> Quat {
    Quat::from_rotation_y(degrees.y.to_radians())
        * Quat::from_rotation_x(degrees.x.to_radians())
        * Quat::from_rotation_z(degrees.z.to_radians())
}
