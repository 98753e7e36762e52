//! Configuration for the locomotion agent.

/// Upper bound of the commanded walking speed.
pub const MAX_WALKING_SPEED: f32 = 20.0;

/// Lower bound of the commanded walking speed.
pub const MIN_WALKING_SPEED: f32 = 0.1;

/// Reach of the downward ground-clearance probe.
pub const MAX_RAYCAST_DISTANCE: f32 = 10.0;

/// How a strength action component maps onto joint drive force.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StrengthMapping {
    /// `max(a, 0) × max_force`: a zero action releases the joint.
    #[default]
    Rectified,
    /// `(a + 1) / 2 × max_force`: a zero action grants half strength.
    Affine,
}

impl StrengthMapping {
    /// Maps an action component in `[-1, 1]` to a force in `[0, max_force]`.
    pub fn apply(&self, action: f32, max_force: f32) -> f32 {
        let a = action.clamp(-1.0, 1.0);
        match self {
            StrengthMapping::Rectified => a.max(0.0) * max_force,
            StrengthMapping::Affine => (a + 1.0) * 0.5 * max_force,
        }
    }
}

/// Configuration for one locomotion agent.
///
/// Controls the commanded speed, the termination floor, joint drive
/// parameters and the seed of the episode randomiser.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentConfig {
    // --- Task ---
    /// Speed the agent tries to match, in `[0.1, 20.0]`.
    pub target_walking_speed: f32,
    /// Episode ends once accumulated reward falls to or below this value.
    pub min_reward_threshold: f32,

    // --- Joint drives ---
    /// Maximum force any joint drive may apply.
    pub max_joint_force_limit: f32,
    /// Spring stiffness of every joint drive.
    pub max_joint_spring: f32,
    /// Damping of every joint drive.
    pub joint_damping: f32,
    /// Mapping from strength actions to drive force.
    pub strength_mapping: StrengthMapping,

    // --- Episodes ---
    /// Seed of the random heading applied at every episode start.
    pub seed: u64,
}

impl AgentConfig {
    /// Clamps `speed` into the valid walking-speed range.
    ///
    /// `+∞` and `-∞` clamp to the nearest bound like any other value; NaN
    /// falls back to [`MAX_WALKING_SPEED`], the default speed.
    pub fn clamp_walking_speed(speed: f32) -> f32 {
        if speed.is_nan() {
            return MAX_WALKING_SPEED;
        }
        speed.clamp(MIN_WALKING_SPEED, MAX_WALKING_SPEED)
    }

    /// Sets the commanded speed, silently clamped into range.
    pub fn set_target_walking_speed(&mut self, speed: f32) {
        self.target_walking_speed = Self::clamp_walking_speed(speed);
    }

    /// Returns a copy with every field forced into its valid range.
    pub fn sanitized(mut self) -> Self {
        self.target_walking_speed = Self::clamp_walking_speed(self.target_walking_speed);
        self.max_joint_force_limit = self.max_joint_force_limit.max(0.0);
        self
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            target_walking_speed: MAX_WALKING_SPEED,
            min_reward_threshold: -100.0,
            max_joint_force_limit: 20_000.0,
            max_joint_spring: 40_000.0,
            joint_damping: 5_000.0,
            strength_mapping: StrengthMapping::default(),
            seed: 0,
        }
    }
}
