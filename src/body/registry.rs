//! Fixed-size arena of body part records.

use std::collections::HashMap;

use glam::Vec3;

use super::error::BodyError;
use super::part::BodyPartSpec;
use super::segment::{BodyLayout, Segment};
use crate::locomotion::world::PhysicsBackend;

/// Stable index of a record inside a [`BodyPartRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartHandle(usize);

impl PartHandle {
    /// Position of the record in registry order.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Registry of every limb segment owned by one agent.
///
/// Populated once by [`BodyPartRegistry::setup`] and never resized after.
/// Records are reachable both by [`PartHandle`] (ordered iteration for
/// observation encoding) and by [`Segment`] (direct lookups for action
/// decoding).
///
/// # Internal Structure
/// - `parts`: records in layout order
/// - `by_segment`: `HashMap` from segment identity to handle
#[derive(Debug, Clone)]
pub struct BodyPartRegistry {
    parts: Vec<BodyPartSpec>,
    by_segment: HashMap<Segment, PartHandle>,
    root: PartHandle,
}

impl BodyPartRegistry {
    /// Builds the registry from `layout`, reading each segment's starting
    /// pose from `physics`.
    ///
    /// # Errors
    ///
    /// - [`BodyError::DuplicateBodyPart`] if a segment is listed twice
    /// - [`BodyError::MissingBodyPart`] if a segment is absent from the
    ///   layout or unknown to the physics backend
    pub fn setup<P>(layout: &BodyLayout, physics: &P) -> Result<Self, BodyError>
    where
        P: PhysicsBackend + ?Sized,
    {
        let mut parts = Vec::with_capacity(layout.len());
        let mut by_segment = HashMap::with_capacity(layout.len());

        for spec in &layout.segments {
            if by_segment.contains_key(&spec.segment) {
                return Err(BodyError::DuplicateBodyPart(spec.segment));
            }
            let initial = physics
                .body_state(spec.segment)
                .ok_or(BodyError::MissingBodyPart(spec.segment))?;
            by_segment.insert(spec.segment, PartHandle(parts.len()));
            parts.push(BodyPartSpec::new(spec, initial));
        }

        for segment in Segment::ALL {
            if !by_segment.contains_key(&segment) {
                return Err(BodyError::MissingBodyPart(segment));
            }
        }

        let root = by_segment
            .get(&Segment::Body)
            .copied()
            .ok_or(BodyError::MissingBodyPart(Segment::Body))?;

        Ok(Self {
            parts,
            by_segment,
            root,
        })
    }

    /// Refreshes every record's snapshot from the physics backend.
    pub fn sync<P>(&mut self, physics: &P) -> Result<(), BodyError>
    where
        P: PhysicsBackend + ?Sized,
    {
        for part in &mut self.parts {
            part.state = physics
                .body_state(part.segment)
                .ok_or(BodyError::MissingBodyPart(part.segment))?;
        }
        Ok(())
    }

    /// Puts every record's snapshot back to its rest pose.
    pub fn reset_states(&mut self) {
        for part in &mut self.parts {
            part.reset();
        }
    }

    /// Mean linear velocity over all segments.
    pub fn average_velocity(&self) -> Vec3 {
        let sum: Vec3 = self.parts.iter().map(|p| p.state.linear_velocity).sum();
        sum / self.parts.len() as f32
    }

    /// Looks up a record by segment identity.
    pub fn get(&self, segment: Segment) -> Option<&BodyPartSpec> {
        self.by_segment.get(&segment).map(|h| &self.parts[h.0])
    }

    pub fn get_mut(&mut self, segment: Segment) -> Option<&mut BodyPartSpec> {
        match self.by_segment.get(&segment) {
            Some(h) => self.parts.get_mut(h.0),
            None => None,
        }
    }

    /// Returns the handle of `segment`, if registered.
    pub fn handle_of(&self, segment: Segment) -> Option<PartHandle> {
        self.by_segment.get(&segment).copied()
    }

    /// Returns the record behind `handle`.
    pub fn part(&self, handle: PartHandle) -> &BodyPartSpec {
        &self.parts[handle.0]
    }

    /// The root body record.
    pub fn root(&self) -> &BodyPartSpec {
        &self.parts[self.root.0]
    }

    /// Records in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &BodyPartSpec> {
        self.parts.iter()
    }

    /// Handles in registry order.
    pub fn handles(&self) -> impl Iterator<Item = PartHandle> {
        (0..self.parts.len()).map(PartHandle)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::segment::{JointLimits, SegmentSpec};
    use crate::testing::MockWorld;

    #[test]
    fn setup_preserves_layout_order() {
        let world = MockWorld::spider();
        let registry = BodyPartRegistry::setup(&BodyLayout::spider(), &world).unwrap();
        let order: Vec<_> = registry.iter().map(|p| p.segment).collect();
        assert_eq!(order, Segment::ALL.to_vec());
        for (h, part) in registry.handles().zip(registry.iter()) {
            assert_eq!(registry.handle_of(part.segment), Some(h));
        }
    }

    #[test]
    fn setup_captures_rest_pose() {
        let world = MockWorld::spider();
        let registry = BodyPartRegistry::setup(&BodyLayout::spider(), &world).unwrap();
        let leg = registry.get(Segment::Leg2Lower).unwrap();
        let state = world.bodies[&Segment::Leg2Lower];
        assert_eq!(leg.rest.position, state.position);
        assert_eq!(leg.rest.rotation, state.rotation);
    }

    #[test]
    fn setup_rejects_duplicates() {
        let world = MockWorld::spider();
        let mut layout = BodyLayout::spider();
        layout
            .segments
            .push(SegmentSpec::new(Segment::Leg0Upper, JointLimits::locked()));
        let err = BodyPartRegistry::setup(&layout, &world).unwrap_err();
        assert_eq!(err, BodyError::DuplicateBodyPart(Segment::Leg0Upper));
    }

    #[test]
    fn setup_rejects_segment_missing_from_layout() {
        let world = MockWorld::spider();
        let mut layout = BodyLayout::spider();
        layout.segments.retain(|s| s.segment != Segment::Leg3Lower);
        let err = BodyPartRegistry::setup(&layout, &world).unwrap_err();
        assert_eq!(err, BodyError::MissingBodyPart(Segment::Leg3Lower));
    }

    #[test]
    fn setup_rejects_segment_unknown_to_physics() {
        let mut world = MockWorld::spider();
        world.bodies.remove(&Segment::Leg1Upper);
        let err = BodyPartRegistry::setup(&BodyLayout::spider(), &world).unwrap_err();
        assert_eq!(err, BodyError::MissingBodyPart(Segment::Leg1Upper));
    }

    #[test]
    fn average_velocity_is_mean_of_all_segments() {
        let mut world = MockWorld::spider();
        world.set_velocity(Segment::Body, Vec3::new(9.0, 0.0, 0.0));
        let registry = BodyPartRegistry::setup(&BodyLayout::spider(), &world).unwrap();
        let avg = registry.average_velocity();
        assert!((avg - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn sync_pulls_latest_state() {
        let mut world = MockWorld::spider();
        let mut registry = BodyPartRegistry::setup(&BodyLayout::spider(), &world).unwrap();
        world.set_velocity(Segment::Leg0Lower, Vec3::new(0.0, 0.0, 3.0));
        world.set_ground_contact(Segment::Leg0Lower, true);
        registry.sync(&world).unwrap();
        let part = registry.get(Segment::Leg0Lower).unwrap();
        assert_eq!(part.state.linear_velocity, Vec3::new(0.0, 0.0, 3.0));
        assert!(part.state.touching_ground);
    }

    #[test]
    fn reset_states_restores_rest_pose() {
        let mut world = MockWorld::spider();
        let mut registry = BodyPartRegistry::setup(&BodyLayout::spider(), &world).unwrap();
        world.set_velocity(Segment::Leg1Lower, Vec3::new(1.0, 2.0, 3.0));
        world.set_ground_contact(Segment::Leg1Lower, true);
        registry.sync(&world).unwrap();

        registry.reset_states();
        let part = registry.get(Segment::Leg1Lower).unwrap();
        assert_eq!(part.state.linear_velocity, Vec3::ZERO);
        assert!(!part.state.touching_ground);
        assert_eq!(part.state.position, part.rest.position);
    }

    #[test]
    fn root_is_body() {
        let world = MockWorld::spider();
        let registry = BodyPartRegistry::setup(&BodyLayout::spider(), &world).unwrap();
        assert!(registry.root().is_root());
        assert_eq!(registry.len(), 9);
    }
}
