//! Stabilised heading frame.
//!
//! A ragdoll's instantaneous rotation is noisy while it learns to walk.
//! Observations and rewards are instead expressed relative to an
//! [`OrientationFrame`] that sits on the root body and yaws toward the
//! target, ignoring pitch and roll.
//!
//! Convention: right-handed, Y up, forward is +Z.

use glam::{Quat, Vec3};

/// Massless reference frame tracking the intended walking direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationFrame {
    pub position: Vec3,
    pub rotation: Quat,
}

impl OrientationFrame {
    /// A frame at the origin facing +Z.
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }

    /// Moves the frame onto the root body and yaws it toward the target.
    ///
    /// The direction is flattened onto the ground plane. If the target is
    /// directly above or below the root the frame faces +Z.
    pub fn update(&mut self, root_position: Vec3, target_position: Vec3) {
        let mut dir = target_position - root_position;
        dir.y = 0.0;
        self.rotation = look_rotation(dir);
        self.position = root_position;
    }

    /// Forward axis of the frame in world space.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Expresses a world-space direction in frame coordinates.
    pub fn inverse_transform_direction(&self, direction: Vec3) -> Vec3 {
        self.rotation.inverse() * direction
    }

    /// Expresses a world-space point in frame coordinates.
    pub fn inverse_transform_point(&self, point: Vec3) -> Vec3 {
        self.rotation.inverse() * (point - self.position)
    }
}

impl Default for OrientationFrame {
    fn default() -> Self {
        Self::new()
    }
}

/// Yaw-only rotation whose forward axis points along `direction`.
fn look_rotation(direction: Vec3) -> Quat {
    if direction == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    Quat::from_rotation_y(direction.x.atan2(direction.z))
}

/// Shortest-arc rotation taking `from` onto `to`.
pub fn rotation_delta(from: Vec3, to: Vec3) -> Quat {
    Quat::from_rotation_arc(from.normalize_or_zero(), to.normalize_or_zero())
}
