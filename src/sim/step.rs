//! The step loop
//!
//! Advances the agent one unit time-step at a time: propose a straight-line
//! move, resolve it against the arena, re-randomize the heading on contact.
//! Every random draw comes from the single injected RNG, so a run is fully
//! reproducible from its seed.

use std::f32::consts::TAU;

use rand::Rng;
use rand_distr::{Distribution, Normal};
use rand_pcg::Pcg32;

use super::arena::Arena;
use super::policy::{HeadingPolicy, make_policy};
use super::state::{AgentState, RngHandle, StepSnapshot};
use crate::config::SimConfig;
use crate::consts::{JITTER_SPEED_CAP_FACTOR, JITTER_SPEED_FLOOR};
use crate::error::{Error, Result};
use crate::{heading_vec, normalize_angle};

/// Owns the agent and evolves it one step at a time.
///
/// Also an `Iterator` over `StepSnapshot`: finite when `max_steps` is
/// configured, unbounded otherwise. Restart only by reconstruction.
pub struct Simulator {
    arena: Arena,
    agent: AgentState,
    policy: Box<dyn HeadingPolicy>,
    rng: Pcg32,
    seed: u64,
    jitter: Option<Normal<f32>>,
    step_index: u64,
    max_steps: Option<u64>,
}

impl Simulator {
    /// Build a simulator from a validated configuration.
    ///
    /// The agent starts at the arena center. A missing `initial_heading` is
    /// drawn from the seeded stream; a missing `random_seed` is derived from
    /// entropy and logged so the run can be replayed.
    pub fn new(config: &SimConfig) -> Result<Self> {
        config.validate()?;
        let arena = Arena::new(config.arena_half_width)?;

        let handle = match config.random_seed {
            Some(seed) => RngHandle::new(seed),
            None => RngHandle::from_entropy(),
        };
        let mut rng = handle.to_rng();
        log::debug!("Simulator seed: {}", handle.seed);

        let heading = match config.initial_heading {
            Some(heading) => normalize_angle(heading),
            None => normalize_angle(rng.random_range(0.0..TAU)),
        };

        // Zero base speed must stay exactly still; the jitter floor would
        // move it, so jitter only applies to a moving agent.
        let jitter = match config.speed_jitter {
            Some(std) if std > 0.0 && config.initial_speed > 0.0 => Some(
                Normal::new(1.0, std)
                    .map_err(|e| Error::InvalidConfiguration(format!("speed_jitter: {e}")))?,
            ),
            _ => None,
        };

        Ok(Self {
            arena,
            agent: AgentState::new(heading, config.initial_speed),
            policy: make_policy(config.policy),
            rng,
            seed: handle.seed,
            jitter,
            step_index: 0,
            max_steps: config.max_steps,
        })
    }

    /// Seed this run is reproducible from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn agent(&self) -> &AgentState {
        &self.agent
    }

    /// Speed for the next step: the base speed, or one jittered draw
    /// (normal factor, floored and capped like the step distance itself)
    fn step_speed(&mut self) -> f32 {
        match &self.jitter {
            None => self.agent.speed,
            Some(dist) => {
                let drawn = dist.sample(&mut self.rng) * self.agent.speed;
                drawn
                    .min(self.agent.speed * JITTER_SPEED_CAP_FACTOR)
                    .max(JITTER_SPEED_FLOOR)
            }
        }
    }

    /// Advance the agent by one unit time-step.
    ///
    /// Total over all valid states: no error path. The returned snapshot
    /// describes the post-update state.
    pub fn step(&mut self) -> StepSnapshot {
        let speed = self.step_speed();
        let proposed = self.agent.pos + heading_vec(self.agent.heading) * speed;

        let rebound =
            self.arena
                .clamp_and_reflect(proposed, self.agent.heading, self.policy.as_ref(), &mut self.rng);

        if rebound.collided {
            // A non-finite policy draw is an internal invariant violation.
            assert!(
                rebound.heading.is_finite(),
                "re-heading policy produced a non-finite heading"
            );
            self.agent.collision_count += 1;
        }
        self.agent.pos = rebound.pos;
        self.agent.heading = rebound.heading;
        self.step_index += 1;

        StepSnapshot {
            step: self.step_index,
            pos: self.agent.pos,
            heading: self.agent.heading,
            speed,
            collision_count: self.agent.collision_count,
            collided: rebound.collided,
        }
    }
}

impl Iterator for Simulator {
    type Item = StepSnapshot;

    fn next(&mut self) -> Option<StepSnapshot> {
        match self.max_steps {
            Some(max) if self.step_index >= max => None,
            _ => Some(self.step()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PolicyKind;
    use glam::Vec2;
    use proptest::prelude::*;
    use std::f32::consts::FRAC_PI_4;

    fn config(half_width: f32, speed: f32, heading: f32, seed: u64) -> SimConfig {
        SimConfig {
            arena_half_width: half_width,
            initial_speed: speed,
            initial_heading: Some(heading),
            max_steps: None,
            random_seed: Some(seed),
            speed_jitter: None,
            policy: PolicyKind::Uniform,
        }
    }

    #[test]
    fn straight_run_reaches_the_wall_then_rebounds() {
        // W=10, speed=1, heading=0, start at the origin: ten free steps end
        // exactly on the wall, the eleventh clamps and collides.
        let mut sim = Simulator::new(&config(10.0, 1.0, 0.0, 42)).unwrap();

        let mut last = None;
        for _ in 0..10 {
            last = Some(sim.step());
        }
        let snap = last.unwrap();
        assert!((snap.pos.x - 10.0).abs() < 1e-4);
        assert!(snap.pos.y.abs() < 1e-4);
        assert_eq!(snap.collision_count, 0);
        assert!(!snap.collided);

        let snap = sim.step();
        assert!((snap.pos.x - 10.0).abs() < 1e-4);
        assert_eq!(snap.collision_count, 1);
        assert!(snap.collided);
        // Heading came from the seeded stream and is a fresh draw
        assert!(snap.heading.is_finite());
    }

    #[test]
    fn zero_speed_is_idempotent() {
        let mut sim = Simulator::new(&config(5.0, 0.0, 1.3, 7)).unwrap();
        for _ in 0..50 {
            let snap = sim.step();
            assert_eq!(snap.pos, Vec2::ZERO);
            assert!(!snap.collided);
            assert_eq!(snap.collision_count, 0);
        }
    }

    #[test]
    fn collision_count_is_monotonic_and_tracks_the_flag() {
        let mut sim = Simulator::new(&config(2.0, 0.9, 0.4, 1234)).unwrap();
        let mut prev = 0;
        for _ in 0..500 {
            let snap = sim.step();
            let delta = snap.collision_count - prev;
            assert_eq!(delta, u64::from(snap.collided));
            prev = snap.collision_count;
        }
        assert!(prev > 0, "a fast agent in a small arena must collide");
    }

    #[test]
    fn corner_crossing_is_a_single_collision() {
        // Heading 45° from the center with a step long enough to clear both
        // walls at once: both axes clamp, one collision.
        let mut sim = Simulator::new(&config(1.0, 2.0, FRAC_PI_4, 5)).unwrap();
        let snap = sim.step();
        assert_eq!(snap.pos, Vec2::new(1.0, 1.0));
        assert_eq!(snap.collision_count, 1);
        assert!(snap.collided);
    }

    #[test]
    fn same_seed_reproduces_the_whole_run() {
        let config = SimConfig {
            arena_half_width: 3.0,
            initial_speed: 0.7,
            initial_heading: None,
            max_steps: Some(300),
            random_seed: Some(987654321),
            speed_jitter: Some(0.1),
            policy: PolicyKind::Uniform,
        };
        let a: Vec<_> = Simulator::new(&config).unwrap().collect();
        let b: Vec<_> = Simulator::new(&config).unwrap().collect();
        assert_eq!(a.len(), 300);
        assert_eq!(a, b);
    }

    #[test]
    fn iterator_stops_at_max_steps() {
        let mut config = config(5.0, 0.2, 0.0, 11);
        config.max_steps = Some(5);
        let mut sim = Simulator::new(&config).unwrap();
        assert_eq!(sim.by_ref().count(), 5);
        assert!(sim.next().is_none());
    }

    #[test]
    fn jittered_speeds_stay_floored_and_capped() {
        let config = SimConfig {
            initial_speed: 0.5,
            speed_jitter: Some(0.4),
            random_seed: Some(3),
            initial_heading: Some(0.0),
            ..SimConfig::default()
        };
        let mut sim = Simulator::new(&config).unwrap();
        let mut saw_variation = false;
        for _ in 0..200 {
            let snap = sim.step();
            assert!(snap.speed >= JITTER_SPEED_FLOOR);
            assert!(snap.speed <= 0.5 * JITTER_SPEED_CAP_FACTOR + 1e-6);
            if (snap.speed - 0.5).abs() > 1e-3 {
                saw_variation = true;
            }
        }
        assert!(saw_variation);
    }

    proptest! {
        // Containment invariant: never outside the arena, for any seed,
        // heading, speed, arena size, or policy.
        #[test]
        fn agent_never_escapes_the_arena(
            seed in any::<u64>(),
            heading in -10.0f32..10.0,
            speed in 0.0f32..5.0,
            half_width in 0.5f32..20.0,
            policy_idx in 0usize..3,
        ) {
            let policy = [PolicyKind::Uniform, PolicyKind::Inward, PolicyKind::Specular][policy_idx];
            let config = SimConfig {
                arena_half_width: half_width,
                initial_speed: speed,
                initial_heading: Some(heading),
                max_steps: Some(200),
                random_seed: Some(seed),
                speed_jitter: None,
                policy,
            };
            let sim = Simulator::new(&config).unwrap();
            let arena = *sim.arena();
            for snap in sim {
                prop_assert!(arena.contains(snap.pos), "escaped to {:?}", snap.pos);
            }
        }
    }
}
