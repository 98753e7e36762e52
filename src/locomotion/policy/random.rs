//! Random policy for testing and baselines.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::trait_::Policy;
use crate::locomotion::action::ACTION_SIZE;

/// Uniformly random actions in `[-1, 1]`.
///
/// Used for sanity checks and as a lower-bound baseline. Seeded so that
/// rollouts are reproducible.
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    /// Creates a new random policy.
    ///
    /// # Arguments
    ///
    /// * `seed` - Seed of the action sampler.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn act(&mut self, _observation: &[f32]) -> Vec<f32> {
        (0..ACTION_SIZE)
            .map(|_| self.rng.gen_range(-1.0f32..=1.0))
            .collect()
    }

    fn name(&self) -> &str {
        "random"
    }
}
