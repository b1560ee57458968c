//! Agent state and core simulation types
//!
//! Everything a run needs for determinism lives here: the mutable agent
//! state owned by the simulator, and the immutable per-step snapshot handed
//! to consumers.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// RNG seed wrapper for reproducibility
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RngHandle {
    pub seed: u64,
}

impl RngHandle {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Derive a seed from entropy when none was configured
    pub fn from_entropy() -> Self {
        Self {
            seed: rand::random(),
        }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Mutable agent state, owned exclusively by one `Simulator`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentState {
    /// Current position; always within the arena
    pub pos: Vec2,
    /// Direction of travel in radians
    pub heading: f32,
    /// Base speed, distance per step
    pub speed: f32,
    /// Total wall collisions so far (monotonically non-decreasing)
    pub collision_count: u64,
}

impl AgentState {
    /// Agent at the arena center with the given motion parameters
    pub fn new(heading: f32, speed: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            heading,
            speed,
            collision_count: 0,
        }
    }
}

/// Immutable record of agent state after one simulated step.
///
/// Produced by `Simulator::step`, consumed by renderers and statistics;
/// ownership transfers to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepSnapshot {
    /// 1-based step index
    pub step: u64,
    /// Position after the step (clamped to the arena on contact)
    pub pos: Vec2,
    /// Heading after the step (re-randomized on contact)
    pub heading: f32,
    /// Speed actually used this step (differs from base speed under jitter)
    pub speed: f32,
    /// Cumulative collision count
    pub collision_count: u64,
    /// Whether a wall collision happened on this step
    pub collided: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_starts_at_the_center() {
        let agent = AgentState::new(1.0, 0.5);
        assert_eq!(agent.pos, Vec2::ZERO);
        assert_eq!(agent.collision_count, 0);
    }

    #[test]
    fn same_seed_yields_the_same_rng_stream() {
        use rand::Rng;
        let mut a = RngHandle::new(42).to_rng();
        let mut b = RngHandle::new(42).to_rng();
        for _ in 0..16 {
            assert_eq!(a.random::<u64>(), b.random::<u64>());
        }
    }
}
