//! Articulated body description and per-agent body part registry.
//!
//! A [`BodyLayout`] says which segments exist and how their joints are
//! limited; a [`BodyPartRegistry`] binds that layout to a physics scene and
//! tracks the live state of every segment.

pub mod error;
pub mod part;
pub mod registry;
pub mod segment;

pub use error::BodyError;
pub use part::{BodyPartSpec, BodyPartState, RestPose};
pub use registry::{BodyPartRegistry, PartHandle};
pub use segment::{BodyLayout, ContactPolicy, JointLimits, Segment, SegmentSpec};
