use thiserror::Error;

use crate::body::BodyError;

/// Errors raised by the locomotion control loop.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AgentError {
    #[error(transparent)]
    Body(#[from] BodyError),

    #[error("Target has not been spawned or no longer exists")]
    MissingTarget,

    #[error("Action vector has {actual} components, expected {expected}")]
    ActionLength { expected: usize, actual: usize },

    #[error("Action component {index} is not finite: {value}")]
    NonFiniteAction { index: usize, value: f32 },

    #[error("No episode is running; call begin_episode first")]
    EpisodeNotRunning,
}
