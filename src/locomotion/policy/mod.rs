//! Policy trait and implementations.

pub mod fixed;
pub mod random;
pub mod trait_;

pub use fixed::ZeroPolicy;
pub use random::RandomPolicy;
pub use trait_::Policy;
