// Demonstration: drive a spider agent through a toy kinematic world and
// evaluate a baseline policy.
//
//   cargo run --example rollout_demo -- --policy random --episodes 5 --steps 500

use std::collections::HashMap;
use std::env;

use glam::{Quat, Vec3};
use spiderwalk::body::{BodyPartState, RestPose};
use spiderwalk::locomotion::{
    EvaluationMetrics, JointCommand, PhysicsBackend, Policy, RandomPolicy, Scene, TargetHandle,
    ZeroPolicy,
};
use spiderwalk::{AgentConfig, BodyLayout, Segment, SpiderAgent};

const DT: f32 = 0.02;

/// Every segment slides with the body; body speed follows mean leg strength.
struct ToyWorld {
    bodies: HashMap<Segment, BodyPartState>,
    strengths: HashMap<Segment, f32>,
    max_force: f32,
    target: Option<Vec3>,
    touched: bool,
}

impl ToyWorld {
    fn new(max_force: f32) -> Self {
        let mut bodies = HashMap::new();
        for segment in Segment::ALL {
            let offset = match segment.leg_index() {
                None => Vec3::ZERO,
                Some(leg) => {
                    let a = leg as f32 * std::f32::consts::FRAC_PI_2;
                    Vec3::new(a.cos(), -0.3, a.sin())
                }
            };
            let position = Vec3::new(0.0, 0.6, 0.0) + offset;
            bodies.insert(segment, BodyPartState::at_rest(position, Quat::IDENTITY));
        }
        Self {
            bodies,
            strengths: HashMap::new(),
            max_force,
            target: None,
            touched: false,
        }
    }
}

impl PhysicsBackend for ToyWorld {
    fn body_state(&self, segment: Segment) -> Option<BodyPartState> {
        self.bodies.get(&segment).copied()
    }

    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<f32> {
        // Flat ground at y = 0.
        if direction.y >= 0.0 {
            return None;
        }
        let distance = origin.y / -direction.y;
        (distance <= max_distance).then_some(distance)
    }

    fn drive_joint(&mut self, segment: Segment, command: &JointCommand) {
        self.strengths.insert(segment, command.drive.max_force);
    }

    fn reset_body(&mut self, segment: Segment, pose: &RestPose) {
        self.bodies
            .insert(segment, BodyPartState::at_rest(pose.position, pose.rotation));
    }

    fn set_rotation(&mut self, segment: Segment, rotation: Quat) {
        if let Some(body) = self.bodies.get_mut(&segment) {
            body.rotation = rotation;
        }
    }

    fn advance(&mut self) {
        let drive = self.strengths.values().sum::<f32>() / 8.0 / self.max_force;
        let heading = self
            .bodies
            .get(&Segment::Body)
            .map(|b| b.forward())
            .unwrap_or(Vec3::Z);
        let velocity = heading * drive * 20.0;
        for body in self.bodies.values_mut() {
            body.linear_velocity = velocity;
            body.position += velocity * DT;
            body.touching_ground = body.position.y < 0.4;
        }
        if let (Some(target), Some(body)) = (self.target, self.bodies.get(&Segment::Body)) {
            if body.position.distance(target) < 1.0 {
                self.touched = true;
            }
        }
    }
}

impl Scene for ToyWorld {
    fn spawn_target(&mut self, position: Vec3) -> TargetHandle {
        // The demo places the target ahead of where it was asked.
        self.target = Some(position + Vec3::new(0.0, 0.0, 15.0));
        TargetHandle(0)
    }

    fn target_position(&self, _target: TargetHandle) -> Option<Vec3> {
        self.target
    }

    fn take_target_touch(&mut self) -> bool {
        std::mem::take(&mut self.touched)
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = env::args().collect();
    let policy_name = arg_value(&args, "--policy").unwrap_or("random");
    let episodes: usize = arg_value(&args, "--episodes")
        .and_then(|s| s.parse().ok())
        .unwrap_or(5);
    let steps: u32 = arg_value(&args, "--steps")
        .and_then(|s| s.parse().ok())
        .unwrap_or(500);
    let seed: u64 = arg_value(&args, "--seed")
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    let config = AgentConfig {
        target_walking_speed: 5.0,
        seed,
        ..AgentConfig::default()
    };
    let mut world = ToyWorld::new(config.max_joint_force_limit);
    let mut agent =
        match SpiderAgent::initialize(config, &BodyLayout::spider(), &mut world, Vec3::ZERO) {
            Ok(agent) => agent,
            Err(e) => {
                eprintln!("setup failed: {}", e);
                std::process::exit(1);
            }
        };

    let mut policy: Box<dyn Policy> = match policy_name {
        "random" => Box::new(RandomPolicy::new(seed)),
        "zero" => Box::new(ZeroPolicy),
        other => {
            eprintln!("Unknown --policy '{}'; expected 'random' or 'zero'.", other);
            std::process::exit(2);
        }
    };

    match EvaluationMetrics::evaluate(&mut agent, &mut world, policy.as_mut(), episodes, steps) {
        Ok(metrics) => {
            println!("Policy: {}", policy.name());
            println!("{}", metrics);
        }
        Err(e) => {
            eprintln!("rollout failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn arg_value<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}
