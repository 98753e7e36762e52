//! Evaluation metrics for the locomotion agent.
//!
//! Runs a policy through whole episodes and aggregates episode-level
//! statistics. The per-episode step cap lives here, on the host side; the
//! agent itself only terminates on its reward floor or contact policies.

use std::fmt;

use super::agent::SpiderAgent;
use super::episode::TerminationReason;
use super::error::AgentError;
use super::policy::Policy;
use super::world::World;

/// Aggregated evaluation metrics over multiple episodes.
#[derive(Debug, Clone)]
pub struct EvaluationMetrics {
    /// Mean accumulated reward per episode.
    pub mean_return: f64,
    /// Mean number of steps per episode.
    pub mean_episode_length: f64,
    /// Mean shaped step reward over all steps.
    pub mean_step_reward: f64,
    /// Episodes ended by the reward floor.
    pub threshold_terminations: usize,
    /// Episodes ended by a ground-contact policy.
    pub contact_terminations: usize,
    /// Episodes cut off by the step cap.
    pub truncations: usize,
    /// Total target touches over all episodes.
    pub target_touches: usize,
    /// Number of episodes evaluated.
    pub n_episodes: usize,
}

/// Tracks per-episode statistics during evaluation.
#[derive(Debug, Default)]
struct EpisodeStats {
    steps: u32,
    step_reward_sum: f64,
    accumulated_reward: f64,
    termination: Option<TerminationReason>,
    target_touches: usize,
}

impl EvaluationMetrics {
    /// Evaluates a policy over multiple episodes and returns aggregated metrics.
    ///
    /// Each step advances the physics once, then runs one agent step.
    ///
    /// # Arguments
    ///
    /// * `agent` - An initialized agent
    /// * `world` - The agent's host world
    /// * `policy` - The policy to evaluate
    /// * `n_episodes` - Number of episodes to run
    /// * `max_steps` - Step cap per episode
    pub fn evaluate<W>(
        agent: &mut SpiderAgent,
        world: &mut W,
        policy: &mut dyn Policy,
        n_episodes: usize,
        max_steps: u32,
    ) -> Result<Self, AgentError>
    where
        W: World + ?Sized,
    {
        let mut all_stats = Vec::with_capacity(n_episodes);

        for _ in 0..n_episodes {
            agent.begin_episode(&mut *world)?;
            let mut stats = EpisodeStats::default();

            while stats.steps < max_steps {
                world.advance();
                let result = agent.step(&mut *world, &mut *policy)?;

                stats.steps = result.step;
                stats.step_reward_sum += result.reward.total as f64;
                stats.accumulated_reward = result.accumulated_reward as f64;
                if result.target_touched {
                    stats.target_touches += 1;
                }

                if result.done {
                    stats.termination = result.termination;
                    break;
                }
            }

            all_stats.push(stats);
        }

        Ok(Self::aggregate(&all_stats))
    }

    fn aggregate(all_stats: &[EpisodeStats]) -> Self {
        let n = all_stats.len().max(1) as f64;
        let total_steps: u64 = all_stats.iter().map(|s| s.steps as u64).sum();

        let mean_return = all_stats.iter().map(|s| s.accumulated_reward).sum::<f64>() / n;
        let mean_episode_length = total_steps as f64 / n;
        let mean_step_reward = if total_steps > 0 {
            all_stats.iter().map(|s| s.step_reward_sum).sum::<f64>() / total_steps as f64
        } else {
            0.0
        };

        let threshold_terminations = all_stats
            .iter()
            .filter(|s| s.termination == Some(TerminationReason::RewardThreshold))
            .count();
        let contact_terminations = all_stats
            .iter()
            .filter(|s| matches!(s.termination, Some(TerminationReason::GroundContact(_))))
            .count();
        let truncations = all_stats.iter().filter(|s| s.termination.is_none()).count();

        Self {
            mean_return,
            mean_episode_length,
            mean_step_reward,
            threshold_terminations,
            contact_terminations,
            truncations,
            target_touches: all_stats.iter().map(|s| s.target_touches).sum(),
            n_episodes: all_stats.len(),
        }
    }
}

impl fmt::Display for EvaluationMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "=== Evaluation Metrics ({} episodes) ===",
            self.n_episodes
        )?;
        writeln!(f, "  Mean return:             {:.3}", self.mean_return)?;
        writeln!(
            f,
            "  Mean episode length:     {:.1}",
            self.mean_episode_length
        )?;
        writeln!(f, "  Mean step reward:        {:.4}", self.mean_step_reward)?;
        writeln!(
            f,
            "  Threshold terminations:  {}",
            self.threshold_terminations
        )?;
        writeln!(
            f,
            "  Contact terminations:    {}",
            self.contact_terminations
        )?;
        writeln!(f, "  Truncations:             {}", self.truncations)?;
        writeln!(f, "  Target touches:          {}", self.target_touches)
    }
}
