//! Policy trait for the locomotion agent.

/// Maps an observation to a continuous action vector.
///
/// The agent calls [`Policy::act`] once per step and blocks until it
/// returns. Implementations should produce
/// [`ACTION_SIZE`](crate::locomotion::action::ACTION_SIZE) components in
/// `[-1, 1]`; anything else is rejected or clamped by the decoder.
pub trait Policy: Send + Sync {
    /// Selects an action for one observation.
    ///
    /// # Arguments
    ///
    /// * `observation` - Vector built by
    ///   [`ObservationBuilder`](crate::locomotion::ObservationBuilder)
    fn act(&mut self, observation: &[f32]) -> Vec<f32>;

    /// Returns a human-readable name for this policy.
    fn name(&self) -> &str;
}
