//! Frame-trace artifact
//!
//! Versioned JSON envelope holding the full snapshot sequence plus the run
//! summary. A downstream renderer turns frames into animation images; the
//! simulation core stays out of the image domain entirely.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::TRACE_VERSION;
use crate::error::Result;
use crate::sim::StepSnapshot;
use crate::stats::RunStats;

/// Complete run artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEnvelope {
    /// Format version, bumped on breaking changes
    pub version: u32,
    /// Seed the run is reproducible from
    pub seed: u64,
    /// Arena half-width the frames were produced in
    pub arena_half_width: f32,
    /// Per-step snapshots, in order
    pub frames: Vec<StepSnapshot>,
    /// End-of-run summary
    pub stats: RunStats,
}

impl TraceEnvelope {
    pub fn new(seed: u64, arena_half_width: f32, frames: Vec<StepSnapshot>, stats: RunStats) -> Self {
        Self {
            version: TRACE_VERSION,
            seed,
            arena_half_width,
            frames,
            stats,
        }
    }

    /// Write the trace as JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)?;
        log::info!("Wrote {} frames to {}", self.frames.len(), path.display());
        Ok(())
    }

    /// Read a trace back
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let envelope = serde_json::from_str(&json)?;
        Ok(envelope)
    }
}
