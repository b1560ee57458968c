//! Brownian Rover - a point agent bouncing around a square arena
//!
//! Core modules:
//! - `sim`: Deterministic simulation (arena geometry, step loop, re-heading policies)
//! - `config`: Recognized options with eager validation
//! - `trace`: Versioned frame-trace artifact for downstream renderers
//! - `stats`: Run statistics derived from the frame sequence

pub mod config;
pub mod error;
pub mod sim;
pub mod stats;
pub mod trace;

pub use config::{PolicyKind, SimConfig};
pub use error::{Error, Result};

use glam::Vec2;

/// Simulation defaults and limits
pub mod consts {
    /// Default arena half-width (square side = 10 units)
    pub const DEFAULT_ARENA_HALF_WIDTH: f32 = 5.0;
    /// Default agent speed (distance per step)
    pub const DEFAULT_SPEED: f32 = 0.1;
    /// Default run length in steps
    pub const DEFAULT_MAX_STEPS: u64 = 2000;

    /// Relative std-dev of the per-step speed factor when jitter is enabled
    pub const DEFAULT_SPEED_JITTER: f32 = 0.1;
    /// Absolute floor on a jittered step speed
    pub const JITTER_SPEED_FLOOR: f32 = 0.05;
    /// Cap on a jittered step speed, as a multiple of the base speed
    pub const JITTER_SPEED_CAP_FACTOR: f32 = 2.0;

    /// Trace artifact format version
    pub const TRACE_VERSION: u32 = 1;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Unit direction vector for a heading angle
#[inline]
pub fn heading_vec(heading: f32) -> Vec2 {
    Vec2::new(heading.cos(), heading.sin())
}

/// Heading angle of a direction vector
#[inline]
pub fn vec_heading(dir: Vec2) -> f32 {
    dir.y.atan2(dir.x)
}
