//! Simulation configuration
//!
//! All recognized options with eager validation. A config can be loaded from
//! a JSON file and overridden field-by-field by the CLI.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

/// Re-heading policy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// Uniform random heading over [0, 2π) on every collision
    #[default]
    Uniform,
    /// Random heading biased into the half-plane facing away from the wall
    Inward,
    /// Deterministic mirror reflection
    Specular,
}

impl PolicyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyKind::Uniform => "uniform",
            PolicyKind::Inward => "inward",
            PolicyKind::Specular => "specular",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "uniform" | "random" => Some(PolicyKind::Uniform),
            "inward" => Some(PolicyKind::Inward),
            "specular" | "mirror" => Some(PolicyKind::Specular),
            _ => None,
        }
    }
}

/// Simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Arena half-width W (square side = 2W, centered on the origin)
    pub arena_half_width: f32,
    /// Base speed, distance per step
    pub initial_speed: f32,
    /// Initial heading in radians; None draws one from the seeded RNG
    pub initial_heading: Option<f32>,
    /// Run length; None runs until the caller stops pulling
    pub max_steps: Option<u64>,
    /// RNG seed; None derives one from entropy (logged for replay)
    pub random_seed: Option<u64>,
    /// Relative std-dev of the per-step speed factor; None keeps speed constant
    pub speed_jitter: Option<f32>,
    /// Collision re-heading policy
    pub policy: PolicyKind,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            arena_half_width: DEFAULT_ARENA_HALF_WIDTH,
            initial_speed: DEFAULT_SPEED,
            initial_heading: None,
            max_steps: Some(DEFAULT_MAX_STEPS),
            random_seed: None,
            speed_jitter: None,
            policy: PolicyKind::Uniform,
        }
    }
}

impl SimConfig {
    /// Check every invariant the simulator relies on.
    ///
    /// Runs before the first step; a rejected config never reaches the
    /// simulation.
    pub fn validate(&self) -> Result<()> {
        if !self.arena_half_width.is_finite() || self.arena_half_width <= 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "arena_half_width must be > 0, got {}",
                self.arena_half_width
            )));
        }
        if !self.initial_speed.is_finite() || self.initial_speed < 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "initial_speed must be >= 0, got {}",
                self.initial_speed
            )));
        }
        if let Some(heading) = self.initial_heading {
            if !heading.is_finite() {
                return Err(Error::InvalidConfiguration(format!(
                    "initial_heading must be finite, got {heading}"
                )));
            }
        }
        if self.max_steps == Some(0) {
            return Err(Error::InvalidConfiguration(
                "max_steps must be > 0 when provided".to_string(),
            ));
        }
        if let Some(jitter) = self.speed_jitter {
            if !jitter.is_finite() || jitter < 0.0 {
                return Err(Error::InvalidConfiguration(format!(
                    "speed_jitter must be a non-negative finite value, got {jitter}"
                )));
            }
        }
        Ok(())
    }

    /// Load and validate a config from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save the config as JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
