use thiserror::Error;

use super::segment::Segment;

/// Errors raised while building a body part registry.
///
/// These indicate a mismatch between the layout and the physics scene and
/// are fatal: setup aborts instead of producing a partial registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BodyError {
    #[error("Body part not found: {0}")]
    MissingBodyPart(Segment),

    #[error("Body part appears more than once in the layout: {0}")]
    DuplicateBodyPart(Segment),
}
