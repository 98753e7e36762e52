//! Episode lifecycle: reward accumulation and termination.
//!
//! ```text
//!              begin()                record(r) with acc <= threshold
//! Terminated ──────────► Running ─────────────────────────────────► Terminated
//!                          │  ▲                   terminate(reason)
//!                          └──┘ record(r) with acc > threshold
//! ```
//!
//! A terminated episode never resumes on its own; the host must call
//! [`EpisodeController::begin`] again.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::body::Segment;

/// Whether an episode is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodePhase {
    Running,
    Terminated,
}

/// Why an episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// Accumulated reward fell to or below the configured floor.
    RewardThreshold,
    /// A segment whose contact policy ends the episode touched the ground.
    GroundContact(Segment),
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminationReason::RewardThreshold => write!(f, "reward threshold"),
            TerminationReason::GroundContact(segment) => {
                write!(f, "ground contact on {}", segment)
            }
        }
    }
}

/// Outcome of opening an episode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeStart {
    /// 1-based episode counter.
    pub episode: u64,
    /// Heading applied to the root body, degrees in `[0, 360)`.
    pub yaw_degrees: f32,
}

/// Outcome of recording one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepStatus {
    Continue,
    Terminated(TerminationReason),
}

impl StepStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, StepStatus::Terminated(_))
    }
}

/// Owns the episode state machine and its random source.
#[derive(Debug, Clone)]
pub struct EpisodeController {
    phase: EpisodePhase,
    min_reward_threshold: f32,
    accumulated_reward: f32,
    steps: u32,
    episode: u64,
    last_termination: Option<TerminationReason>,
    rng: StdRng,
}

impl EpisodeController {
    /// Creates a controller with no open episode.
    ///
    /// # Arguments
    ///
    /// * `min_reward_threshold` - Termination floor for accumulated reward
    /// * `seed` - Seed of the heading randomiser
    pub fn new(min_reward_threshold: f32, seed: u64) -> Self {
        Self {
            phase: EpisodePhase::Terminated,
            min_reward_threshold,
            accumulated_reward: 0.0,
            steps: 0,
            episode: 0,
            last_termination: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Opens a new episode and draws its starting heading.
    pub fn begin(&mut self) -> EpisodeStart {
        let yaw_degrees = self.draw_heading();
        self.open(yaw_degrees)
    }

    /// Draws a heading in `[0, 360)` degrees without opening an episode.
    pub fn draw_heading(&mut self) -> f32 {
        self.rng.gen_range(0.0..360.0)
    }

    /// Opens a new episode that starts at `yaw_degrees`.
    pub fn open(&mut self, yaw_degrees: f32) -> EpisodeStart {
        self.phase = EpisodePhase::Running;
        self.accumulated_reward = 0.0;
        self.steps = 0;
        self.episode += 1;
        self.last_termination = None;
        EpisodeStart {
            episode: self.episode,
            yaw_degrees,
        }
    }

    /// Adds a step reward and checks the termination floor.
    ///
    /// Has no effect when no episode is running.
    pub fn record(&mut self, reward: f32) -> StepStatus {
        if self.phase != EpisodePhase::Running {
            return self.status();
        }
        self.steps += 1;
        self.accumulated_reward += reward;
        if self.accumulated_reward <= self.min_reward_threshold {
            self.terminate(TerminationReason::RewardThreshold);
        }
        self.status()
    }

    /// Adds a reward outside the shaped step reward.
    pub fn add_bonus(&mut self, reward: f32) {
        if self.phase == EpisodePhase::Running {
            self.accumulated_reward += reward;
        }
    }

    /// Ends the running episode.
    pub fn terminate(&mut self, reason: TerminationReason) {
        if self.phase == EpisodePhase::Running {
            self.phase = EpisodePhase::Terminated;
            self.last_termination = Some(reason);
        }
    }

    pub fn status(&self) -> StepStatus {
        match (self.phase, self.last_termination) {
            (EpisodePhase::Terminated, Some(reason)) => StepStatus::Terminated(reason),
            _ => StepStatus::Continue,
        }
    }

    pub fn phase(&self) -> EpisodePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == EpisodePhase::Running
    }

    pub fn accumulated_reward(&self) -> f32 {
        self.accumulated_reward
    }

    /// Steps recorded in the current (or last) episode.
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Number of episodes opened so far.
    pub fn episode(&self) -> u64 {
        self.episode
    }

    pub fn min_reward_threshold(&self) -> f32 {
        self.min_reward_threshold
    }

    pub fn last_termination(&self) -> Option<TerminationReason> {
        self.last_termination
    }
}
