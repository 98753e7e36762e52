//! Constant policy.

use super::trait_::Policy;
use crate::locomotion::action::ACTION_SIZE;

/// Always emits the all-zero action: neutral joint targets.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroPolicy;

impl Policy for ZeroPolicy {
    fn act(&mut self, _observation: &[f32]) -> Vec<f32> {
        vec![0.0; ACTION_SIZE]
    }

    fn name(&self) -> &str {
        "zero"
    }
}
