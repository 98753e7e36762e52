//! spiderwalk - control contract of a reinforcement-learning walking spider
//!
//! Reduces the physical state of a four-legged ragdoll to a fixed-size
//! observation, decodes continuous policy actions into joint commands,
//! shapes the step reward and runs the episode lifecycle. Physics, scene
//! management and the learning algorithm stay outside, behind the traits in
//! [`locomotion::world`] and [`locomotion::policy`].

pub mod body;
pub mod locomotion;
pub mod orientation;

#[cfg(test)]
pub(crate) mod testing;

pub use body::{BodyLayout, BodyPartRegistry, Segment};
pub use locomotion::{AgentConfig, AgentError, SpiderAgent, StepResult};
pub use orientation::OrientationFrame;

/// Identifier type used for agents.
pub type Id = String;

/// Generates a new unique identifier (UUID v4).
pub fn generate_id() -> Id {
    uuid::Uuid::new_v4().to_string()
}
