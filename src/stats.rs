//! Run statistics
//!
//! Accumulated from the snapshot sequence for the end-of-run report and the
//! trace artifact. The simulator itself never sees this; it only emits
//! snapshots.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::StepSnapshot;

/// Summary of a finished (or in-progress) run
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RunStats {
    /// Steps accumulated so far
    pub steps: u64,
    /// Sum of actual per-step travel distances
    pub total_distance: f32,
    /// Mean of the per-step speeds
    pub avg_speed: f32,
    /// Wall collisions
    pub collisions: u64,
}

/// Streaming accumulator over snapshots
#[derive(Debug, Clone)]
pub struct StatsAccumulator {
    last_pos: Vec2,
    total_distance: f32,
    speed_sum: f32,
    steps: u64,
    collisions: u64,
}

impl StatsAccumulator {
    /// Start accumulating from the agent's starting position
    pub fn new(start_pos: Vec2) -> Self {
        Self {
            last_pos: start_pos,
            total_distance: 0.0,
            speed_sum: 0.0,
            steps: 0,
            collisions: 0,
        }
    }

    /// Fold one snapshot into the running totals
    pub fn record(&mut self, snap: &StepSnapshot) {
        self.total_distance += (snap.pos - self.last_pos).length();
        self.last_pos = snap.pos;
        self.speed_sum += snap.speed;
        self.steps += 1;
        self.collisions = snap.collision_count;
    }

    /// Current totals
    pub fn stats(&self) -> RunStats {
        RunStats {
            steps: self.steps,
            total_distance: self.total_distance,
            avg_speed: if self.steps == 0 {
                0.0
            } else {
                self.speed_sum / self.steps as f32
            },
            collisions: self.collisions,
        }
    }
}
