//! Limb segment identities and their joint configuration.

use std::fmt;

/// One rigid limb segment of the spider ragdoll.
///
/// The body is the root segment; every leg is split into an upper and a
/// lower segment joined by a knee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Segment {
    Body,
    Leg0Upper,
    Leg0Lower,
    Leg1Upper,
    Leg1Lower,
    Leg2Upper,
    Leg2Lower,
    Leg3Upper,
    Leg3Lower,
}

impl Segment {
    /// All segments in canonical registry order.
    pub const ALL: [Segment; 9] = [
        Segment::Body,
        Segment::Leg0Upper,
        Segment::Leg0Lower,
        Segment::Leg1Upper,
        Segment::Leg1Lower,
        Segment::Leg2Upper,
        Segment::Leg2Lower,
        Segment::Leg3Upper,
        Segment::Leg3Lower,
    ];

    /// Upper leg segments in leg order.
    pub const UPPER_LEGS: [Segment; 4] = [
        Segment::Leg0Upper,
        Segment::Leg1Upper,
        Segment::Leg2Upper,
        Segment::Leg3Upper,
    ];

    /// Lower leg segments in leg order.
    pub const LOWER_LEGS: [Segment; 4] = [
        Segment::Leg0Lower,
        Segment::Leg1Lower,
        Segment::Leg2Lower,
        Segment::Leg3Lower,
    ];

    /// Returns true for the root body segment.
    pub fn is_root(&self) -> bool {
        matches!(self, Segment::Body)
    }

    /// Returns true for upper leg segments (two actuated axes).
    pub fn is_upper_leg(&self) -> bool {
        Self::UPPER_LEGS.contains(self)
    }

    /// Returns the leg number for leg segments, `None` for the body.
    pub fn leg_index(&self) -> Option<usize> {
        match self {
            Segment::Body => None,
            Segment::Leg0Upper | Segment::Leg0Lower => Some(0),
            Segment::Leg1Upper | Segment::Leg1Lower => Some(1),
            Segment::Leg2Upper | Segment::Leg2Lower => Some(2),
            Segment::Leg3Upper | Segment::Leg3Lower => Some(3),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self, self.leg_index()) {
            (Segment::Body, _) => write!(f, "body"),
            (s, Some(leg)) if s.is_upper_leg() => write!(f, "leg{}_upper", leg),
            (_, Some(leg)) => write!(f, "leg{}_lower", leg),
            (_, None) => write!(f, "unknown"),
        }
    }
}

/// Angular limits of a segment's joint, in degrees.
///
/// The x axis spans `[low_x, high_x]`; the y and z axes are symmetric and
/// span `[-y, y]` and `[-z, z]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JointLimits {
    pub low_x: f32,
    pub high_x: f32,
    pub y: f32,
    pub z: f32,
}

impl JointLimits {
    /// Creates a new set of joint limits.
    pub fn new(low_x: f32, high_x: f32, y: f32, z: f32) -> Self {
        Self {
            low_x,
            high_x,
            y,
            z,
        }
    }

    /// A joint with no angular freedom (used for the root body).
    pub fn locked() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Range of the x axis.
    pub fn x_range(&self) -> (f32, f32) {
        (self.low_x, self.high_x)
    }

    /// Range of the y axis.
    pub fn y_range(&self) -> (f32, f32) {
        (-self.y, self.y)
    }

    /// Range of the z axis.
    pub fn z_range(&self) -> (f32, f32) {
        (-self.z, self.z)
    }
}

/// What happens when a segment touches the ground.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContactPolicy {
    /// Reward added on every step the segment is in ground contact.
    pub penalty: Option<f32>,
    /// Ends the episode as soon as the segment is in ground contact.
    pub ends_episode: bool,
}

impl ContactPolicy {
    /// Returns true if ground contact has no consequence.
    pub fn is_inert(&self) -> bool {
        self.penalty.is_none() && !self.ends_episode
    }
}

/// Static description of one segment: identity, joint limits, contact policy.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentSpec {
    pub segment: Segment,
    pub limits: JointLimits,
    pub contact: ContactPolicy,
}

impl SegmentSpec {
    pub fn new(segment: Segment, limits: JointLimits) -> Self {
        Self {
            segment,
            limits,
            contact: ContactPolicy::default(),
        }
    }

    /// Sets the ground-contact policy for this segment.
    pub fn with_contact(mut self, contact: ContactPolicy) -> Self {
        self.contact = contact;
        self
    }
}

/// Ordered list of segments making up a ragdoll.
///
/// The order given here becomes the registry order, which fixes the
/// layout of the per-segment block of every observation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BodyLayout {
    pub segments: Vec<SegmentSpec>,
}

impl BodyLayout {
    pub fn new(segments: Vec<SegmentSpec>) -> Self {
        Self { segments }
    }

    /// The default four-legged spider: a locked body, hips with two free
    /// axes and single-axis knees.
    pub fn spider() -> Self {
        let hip = JointLimits::new(-60.0, 60.0, 60.0, 0.0);
        let knee = JointLimits::new(-60.0, 60.0, 0.0, 0.0);
        let segments = Segment::ALL
            .iter()
            .map(|&segment| {
                let limits = if segment.is_root() {
                    JointLimits::locked()
                } else if segment.is_upper_leg() {
                    hip
                } else {
                    knee
                };
                SegmentSpec::new(segment, limits)
            })
            .collect();
        Self { segments }
    }

    /// Replaces the contact policy of one segment, if present.
    pub fn with_contact(mut self, segment: Segment, contact: ContactPolicy) -> Self {
        for spec in &mut self.segments {
            if spec.segment == segment {
                spec.contact = contact;
            }
        }
        self
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl Default for BodyLayout {
    fn default() -> Self {
        Self::spider()
    }
}
