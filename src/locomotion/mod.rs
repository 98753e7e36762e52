//! Locomotion control loop.
//!
//! Observation encoding, action decoding, reward shaping and the episode
//! lifecycle of a legged ragdoll learning to walk toward a target. Physics,
//! scene management and the policy are collaborators reached through the
//! traits in [`world`] and [`policy`].

pub mod action;
pub mod agent;
pub mod config;
pub mod episode;
pub mod error;
pub mod metrics;
pub mod observation;
pub mod policy;
pub mod reward;
pub mod world;

pub use action::{ActionDecoder, JointCommand, JointDrive, ACTION_SIZE};
pub use agent::{SpiderAgent, StepResult};
pub use config::{AgentConfig, StrengthMapping, MAX_RAYCAST_DISTANCE, MAX_WALKING_SPEED};
pub use episode::{EpisodeController, EpisodePhase, EpisodeStart, StepStatus, TerminationReason};
pub use error::AgentError;
pub use metrics::EvaluationMetrics;
pub use observation::{GroundProbe, ObservationBuilder, ObservationInput, OBSERVATION_DIM};
pub use policy::{Policy, RandomPolicy, ZeroPolicy};
pub use reward::{RewardBreakdown, RewardComputer, TARGET_TOUCH_BONUS};
pub use world::{PhysicsBackend, Scene, TargetHandle, World};
