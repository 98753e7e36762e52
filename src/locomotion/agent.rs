//! The spider agent: one instance of the observe → act → reward loop.

use glam::{Quat, Vec3};
use tracing::{debug, info, warn};

use super::action::{ActionDecoder, JointCommand};
use super::config::AgentConfig;
use super::episode::{
    EpisodeController, EpisodePhase, EpisodeStart, StepStatus, TerminationReason,
};
use super::error::AgentError;
use super::observation::{GroundProbe, ObservationBuilder, ObservationInput};
use super::policy::Policy;
use super::reward::{RewardBreakdown, RewardComputer, TARGET_TOUCH_BONUS};
use super::world::{PhysicsBackend, Scene, TargetHandle, World};
use crate::body::{BodyLayout, BodyPartRegistry, Segment};
use crate::orientation::OrientationFrame;
use crate::{generate_id, Id};

/// Result of a single control step.
#[derive(Debug, Clone)]
pub struct StepResult {
    /// Observation the policy acted on.
    pub observation: Vec<f32>,
    /// Shaped reward of this step.
    pub reward: RewardBreakdown,
    /// Bonus granted outside the shaped reward this step.
    pub bonus: f32,
    /// Whether the target was touched this step.
    pub target_touched: bool,
    /// Accumulated reward after this step.
    pub accumulated_reward: f32,
    /// Whether the episode ended on this step.
    pub done: bool,
    /// Why the episode ended, if it did.
    pub termination: Option<TerminationReason>,
    /// Steps taken in this episode.
    pub step: u32,
}

/// A four-legged ragdoll learning to walk toward a target.
///
/// Every instance owns its registry, orientation frame and episode state,
/// so several agents can share a host without sharing mutable state.
///
/// # Lifecycle
///
/// 1. [`SpiderAgent::initialize`] once per agent: spawns the target and
///    binds the body layout to the physics scene.
/// 2. [`SpiderAgent::begin_episode`] to open an episode.
/// 3. [`SpiderAgent::step`] every physics tick until `done`.
/// 4. Back to 2.
#[derive(Debug)]
pub struct SpiderAgent {
    id: Id,
    config: AgentConfig,
    registry: BodyPartRegistry,
    orientation: OrientationFrame,
    target: TargetHandle,
    episode: EpisodeController,
    pending_touches: u32,
}

impl SpiderAgent {
    /// Sets up the agent. Runs once per agent lifetime.
    ///
    /// # Arguments
    ///
    /// * `config` - Agent configuration; out-of-range values are clamped
    /// * `layout` - Segments to register, in observation order
    /// * `world` - Host physics and scene
    /// * `origin` - Where the target is spawned
    ///
    /// # Errors
    ///
    /// Any registry or target failure aborts setup.
    pub fn initialize<W>(
        config: AgentConfig,
        layout: &BodyLayout,
        world: &mut W,
        origin: Vec3,
    ) -> Result<Self, AgentError>
    where
        W: World + ?Sized,
    {
        let config = config.sanitized();
        let id = generate_id();

        let target = world.spawn_target(origin);
        if world.target_position(target).is_none() {
            return Err(AgentError::MissingTarget);
        }
        let registry = BodyPartRegistry::setup(layout, &*world)?;
        debug!(
            agent = %id,
            segments = registry.len(),
            target_speed = config.target_walking_speed,
            "agent initialized"
        );

        Ok(Self {
            id,
            episode: EpisodeController::new(config.min_reward_threshold, config.seed),
            config,
            registry,
            orientation: OrientationFrame::new(),
            target,
            pending_touches: 0,
        })
    }

    /// Opens a new episode.
    ///
    /// Every segment returns to its rest pose, the root body gets a random
    /// yaw (other axes at rest) and the accumulated reward restarts at 0.
    /// On error no episode is opened.
    pub fn begin_episode<W>(&mut self, world: &mut W) -> Result<EpisodeStart, AgentError>
    where
        W: World + ?Sized,
    {
        for part in self.registry.iter() {
            world.reset_body(part.segment, &part.rest);
        }

        let yaw_degrees = self.episode.draw_heading();
        let yaw = Quat::from_rotation_y(yaw_degrees.to_radians());
        world.set_rotation(Segment::Body, yaw);
        self.registry.sync(&*world)?;
        self.update_orientation(&*world)?;

        let start = self.episode.open(yaw_degrees);
        self.pending_touches = 0;

        debug!(
            agent = %self.id,
            episode = start.episode,
            yaw = start.yaw_degrees,
            "episode started"
        );
        Ok(start)
    }

    /// Builds the observation for the current state.
    pub fn collect_observations<W>(&self, world: &W) -> Result<Vec<f32>, AgentError>
    where
        W: World + ?Sized,
    {
        let target_position = self.target_position(world)?;
        let ground_hit = GroundProbe::cast(world, self.registry.root().state.position);
        Ok(ObservationBuilder::build(&ObservationInput {
            target_speed: self.config.target_walking_speed,
            frame: &self.orientation,
            target_position,
            registry: &self.registry,
            ground_hit,
            max_joint_force: self.config.max_joint_force_limit,
        }))
    }

    /// Decodes `actions` and sends the resulting commands to the joints.
    ///
    /// A malformed vector is rejected before any joint is touched.
    pub fn apply_actions<P>(
        &mut self,
        actions: &[f32],
        physics: &mut P,
    ) -> Result<Vec<JointCommand>, AgentError>
    where
        P: PhysicsBackend + ?Sized,
    {
        let commands = match ActionDecoder::decode(actions, &self.registry, &self.config) {
            Ok(commands) => commands,
            Err(e) => {
                warn!(agent = %self.id, error = %e, "rejected action vector");
                return Err(e);
            }
        };

        for cmd in &commands {
            if let Some(part) = self.registry.get_mut(cmd.segment) {
                part.current_strength = cmd.drive.max_force;
                part.target_euler = cmd.euler_degrees;
                part.normalized_rotation = cmd.normalized;
            }
            physics.drive_joint(cmd.segment, cmd);
        }
        Ok(commands)
    }

    /// Per-tick bookkeeping: refresh the frame, add the step reward and
    /// check termination.
    pub fn fixed_update<W>(&mut self, world: &mut W) -> Result<StepResult, AgentError>
    where
        W: World + ?Sized,
    {
        self.fixed_update_with(world, Vec::new())
    }

    /// One full control step against `policy`.
    ///
    /// sync state → orientation → observe → act → reward → termination.
    pub fn step<W>(
        &mut self,
        world: &mut W,
        policy: &mut dyn Policy,
    ) -> Result<StepResult, AgentError>
    where
        W: World + ?Sized,
    {
        self.ensure_running()?;
        self.registry.sync(&*world)?;
        self.update_orientation(&*world)?;

        let observation = self.collect_observations(&*world)?;
        let actions = policy.act(&observation);
        self.apply_actions(&actions, &mut *world)?;

        self.fixed_update_with(world, observation)
    }

    /// Credits the target bonus to the accumulated reward at once. The
    /// touch is reported in the next [`StepResult`].
    pub fn touched_target(&mut self) {
        if self.episode.is_running() {
            self.episode.add_bonus(TARGET_TOUCH_BONUS);
            self.pending_touches += 1;
            debug!(agent = %self.id, "target touched");
        }
    }

    fn fixed_update_with<W>(
        &mut self,
        world: &mut W,
        observation: Vec<f32>,
    ) -> Result<StepResult, AgentError>
    where
        W: World + ?Sized,
    {
        self.ensure_running()?;
        self.registry.sync(&*world)?;
        self.update_orientation(&*world)?;

        if world.take_target_touch() {
            self.touched_target();
        }

        let reward = RewardComputer::compute(
            &self.orientation,
            &self.registry,
            self.config.target_walking_speed,
        );
        let touches = std::mem::take(&mut self.pending_touches);
        let penalty = self.contact_penalty();
        self.episode.add_bonus(penalty);
        let bonus = penalty + touches as f32 * TARGET_TOUCH_BONUS;

        let status = match self.contact_termination() {
            Some(reason) => {
                self.episode.record(reward.total);
                self.episode.terminate(reason);
                self.episode.status()
            }
            None => self.episode.record(reward.total),
        };

        let termination = match status {
            StepStatus::Terminated(reason) => {
                info!(
                    agent = %self.id,
                    episode = self.episode.episode(),
                    steps = self.episode.steps(),
                    accumulated = self.episode.accumulated_reward(),
                    reason = %reason,
                    "episode ended"
                );
                Some(reason)
            }
            StepStatus::Continue => None,
        };

        Ok(StepResult {
            observation,
            reward,
            bonus,
            target_touched: touches > 0,
            accumulated_reward: self.episode.accumulated_reward(),
            done: termination.is_some(),
            termination,
            step: self.episode.steps(),
        })
    }

    /// Sum of ground-contact penalties for this tick.
    fn contact_penalty(&self) -> f32 {
        self.registry
            .iter()
            .filter(|p| p.state.touching_ground)
            .filter_map(|p| p.contact.penalty)
            .sum()
    }

    fn contact_termination(&self) -> Option<TerminationReason> {
        self.registry
            .iter()
            .find(|p| p.state.touching_ground && p.contact.ends_episode)
            .map(|p| TerminationReason::GroundContact(p.segment))
    }

    fn update_orientation<S>(&mut self, scene: &S) -> Result<(), AgentError>
    where
        S: Scene + ?Sized,
    {
        let target = self.target_position(scene)?;
        self.orientation
            .update(self.registry.root().state.position, target);
        Ok(())
    }

    fn target_position<S>(&self, scene: &S) -> Result<Vec3, AgentError>
    where
        S: Scene + ?Sized,
    {
        scene
            .target_position(self.target)
            .ok_or(AgentError::MissingTarget)
    }

    fn ensure_running(&self) -> Result<(), AgentError> {
        if self.episode.is_running() {
            Ok(())
        } else {
            Err(AgentError::EpisodeNotRunning)
        }
    }

    /// Sets the commanded walking speed, clamped into `[0.1, 20.0]`.
    pub fn set_target_walking_speed(&mut self, speed: f32) {
        self.config.set_target_walking_speed(speed);
    }

    pub fn target_walking_speed(&self) -> f32 {
        self.config.target_walking_speed
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn registry(&self) -> &BodyPartRegistry {
        &self.registry
    }

    pub fn orientation(&self) -> &OrientationFrame {
        &self.orientation
    }

    pub fn target(&self) -> TargetHandle {
        self.target
    }

    pub fn accumulated_reward(&self) -> f32 {
        self.episode.accumulated_reward()
    }

    pub fn phase(&self) -> EpisodePhase {
        self.episode.phase()
    }

    pub fn episode(&self) -> &EpisodeController {
        &self.episode
    }
}
