//! Shaped step reward for the locomotion agent.
//!
//! The step reward is the product of a speed-matching term and a facing
//! term, both in `[0, 1]`. The product is only high when the agent moves at
//! the commanded speed *and* faces the walking direction.

use glam::Vec3;

use crate::body::BodyPartRegistry;
use crate::orientation::OrientationFrame;

/// Flat bonus granted when the agent touches its target.
pub const TARGET_TOUCH_BONUS: f32 = 1.0;

/// The two factors of a step reward and their product.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewardBreakdown {
    pub speed_match: f32,
    pub facing: f32,
    pub total: f32,
}

/// Computes step rewards.
pub struct RewardComputer;

impl RewardComputer {
    /// Computes the step reward from the frame and current body state.
    ///
    /// # Components
    ///
    /// 1. **Speed match**: [`Self::matching_velocity_reward`] between
    ///    `frame_forward × target_speed` and the mean limb velocity.
    /// 2. **Facing**: [`Self::facing_reward`] between the frame's and the
    ///    root body's forward axes.
    pub fn compute(
        frame: &OrientationFrame,
        registry: &BodyPartRegistry,
        target_speed: f32,
    ) -> RewardBreakdown {
        let forward = frame.forward();
        let speed_match = Self::matching_velocity_reward(
            forward * target_speed,
            registry.average_velocity(),
            target_speed,
        );
        let facing = Self::facing_reward(forward, registry.root().state.forward());
        RewardBreakdown {
            speed_match,
            facing,
            total: speed_match * facing,
        }
    }

    /// Decays from 1 at a perfect velocity match to 0 once the error
    /// reaches `target_speed`:
    ///
    /// ```text
    /// δ = clamp(|actual − goal|, 0, s)
    /// r = (1 − (δ / s)²)²
    /// ```
    pub fn matching_velocity_reward(
        velocity_goal: Vec3,
        actual_velocity: Vec3,
        target_speed: f32,
    ) -> f32 {
        let delta = actual_velocity
            .distance(velocity_goal)
            .min(target_speed)
            .max(0.0);
        (1.0 - (delta / target_speed).powi(2)).powi(2)
    }

    /// Maps the cosine between the two forward axes from `[-1, 1]` to `[0, 1]`.
    pub fn facing_reward(frame_forward: Vec3, body_forward: Vec3) -> f32 {
        ((frame_forward.dot(body_forward) + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{BodyLayout, Segment};
    use crate::testing::MockWorld;
    use glam::Quat;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const SPEEDS: [f32; 6] = [0.1, 0.5, 1.0, 7.3, 10.0, 20.0];

    #[test]
    fn perfect_match_is_one() {
        for s in SPEEDS {
            let goal = Vec3::new(0.0, 0.0, s);
            assert_eq!(RewardComputer::matching_velocity_reward(goal, goal, s), 1.0);
        }
    }

    #[test]
    fn error_at_clamp_boundary_is_zero() {
        for s in SPEEDS {
            let goal = Vec3::new(s, 0.0, 0.0);
            let actual = Vec3::ZERO;
            assert_eq!(RewardComputer::matching_velocity_reward(goal, actual, s), 0.0);
            let far = Vec3::new(-5.0 * s, 0.0, 0.0);
            assert_eq!(RewardComputer::matching_velocity_reward(goal, far, s), 0.0);
        }
    }

    #[test]
    fn speed_term_is_non_increasing() {
        for s in SPEEDS {
            let goal = Vec3::ZERO;
            let mut prev = f32::INFINITY;
            for i in 0..=100 {
                let delta = s * i as f32 / 100.0;
                let actual = Vec3::new(delta, 0.0, 0.0);
                let r = RewardComputer::matching_velocity_reward(goal, actual, s);
                assert!(r <= prev, "s={} delta={} r={} prev={}", s, delta, r, prev);
                assert!((0.0..=1.0).contains(&r));
                prev = r;
            }
        }
    }

    #[test]
    fn facing_extremes() {
        assert_eq!(RewardComputer::facing_reward(Vec3::Z, Vec3::Z), 1.0);
        assert_eq!(RewardComputer::facing_reward(Vec3::Z, Vec3::NEG_Z), 0.0);
        assert_eq!(RewardComputer::facing_reward(Vec3::Z, Vec3::X), 0.5);
    }

    #[test]
    fn step_reward_is_bounded() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut world = MockWorld::spider();
        let mut registry = BodyPartRegistry::setup(&BodyLayout::spider(), &world).unwrap();
        let mut frame = OrientationFrame::new();

        for _ in 0..500 {
            for segment in Segment::ALL {
                let v = Vec3::new(
                    rng.gen_range(-50.0..50.0),
                    rng.gen_range(-50.0..50.0),
                    rng.gen_range(-50.0..50.0),
                );
                world.set_velocity(segment, v);
            }
            let rot = Quat::from_euler(
                glam::EulerRot::XYZ,
                rng.gen_range(-3.2..3.2),
                rng.gen_range(-3.2..3.2),
                rng.gen_range(-3.2..3.2),
            );
            world.set_rotation_of(Segment::Body, rot);
            registry.sync(&world).unwrap();
            frame.update(
                Vec3::ZERO,
                Vec3::new(rng.gen_range(-9.0..9.0), 0.0, rng.gen_range(-9.0..9.0)),
            );
            let speed = rng.gen_range(0.1..20.0);

            let r = RewardComputer::compute(&frame, &registry, speed);
            assert!((0.0..=1.0).contains(&r.total), "reward {} out of range", r.total);
            assert_eq!(r.total, r.speed_match * r.facing);
        }
    }

    #[test]
    fn matched_walk_scores_full_reward() {
        let mut world = MockWorld::spider();
        for segment in Segment::ALL {
            world.set_velocity(segment, Vec3::new(0.0, 0.0, 10.0));
        }
        let registry = BodyPartRegistry::setup(&BodyLayout::spider(), &world).unwrap();
        let frame = OrientationFrame::new();
        let r = RewardComputer::compute(&frame, &registry, 10.0);
        assert_eq!(r.speed_match, 1.0);
        assert_eq!(r.facing, 1.0);
        assert_eq!(r.total, 1.0);
    }

    #[test]
    fn walking_backwards_scores_nothing() {
        let mut world = MockWorld::spider();
        for segment in Segment::ALL {
            world.set_velocity(segment, Vec3::new(0.0, 0.0, 10.0));
        }
        world.set_rotation_of(Segment::Body, Quat::from_rotation_y(std::f32::consts::PI));
        let registry = BodyPartRegistry::setup(&BodyLayout::spider(), &world).unwrap();
        let frame = OrientationFrame::new();
        let r = RewardComputer::compute(&frame, &registry, 10.0);
        assert_eq!(r.speed_match, 1.0);
        assert!(r.total < 1e-6);
    }
}
