//! Brownian Rover entry point
//!
//! Builds the simulator from CLI flags (optionally layered over a JSON
//! config file), drives the pull loop, writes the frame-trace artifact, and
//! reports the final statistics.

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;

use brownian_rover::sim::Simulator;
use brownian_rover::stats::StatsAccumulator;
use brownian_rover::trace::TraceEnvelope;
use brownian_rover::{PolicyKind, SimConfig};

/// Progress log cadence, in steps
const PROGRESS_EVERY: u64 = 500;

#[derive(Parser, Debug)]
#[command(
    name = "brownian-rover",
    about = "Simulate a Brownian-motion rover in a square arena"
)]
struct Cli {
    /// JSON config file; the flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Arena half-width W (square side = 2W)
    #[arg(long)]
    half_width: Option<f32>,

    /// Base speed, distance per step
    #[arg(long)]
    speed: Option<f32>,

    /// Initial heading in radians (default: seeded random draw)
    #[arg(long)]
    heading: Option<f32>,

    /// Number of steps to simulate
    #[arg(long)]
    steps: Option<u64>,

    /// RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Per-step speed jitter, as a relative std-dev (e.g. 0.1)
    #[arg(long)]
    jitter: Option<f32>,

    /// Re-heading policy: uniform | inward | specular
    #[arg(long)]
    policy: Option<String>,

    /// Where to write the frame trace
    #[arg(long, default_value = "brownian_rover_trace.json")]
    out: PathBuf,
}

impl Cli {
    /// Layer the CLI flags over the (file or default) config
    fn into_config(self) -> anyhow::Result<(SimConfig, PathBuf)> {
        let mut config = match &self.config {
            Some(path) => SimConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => SimConfig::default(),
        };

        if let Some(half_width) = self.half_width {
            config.arena_half_width = half_width;
        }
        if let Some(speed) = self.speed {
            config.initial_speed = speed;
        }
        if self.heading.is_some() {
            config.initial_heading = self.heading;
        }
        if let Some(steps) = self.steps {
            config.max_steps = Some(steps);
        }
        if self.seed.is_some() {
            config.random_seed = self.seed;
        }
        if self.jitter.is_some() {
            config.speed_jitter = self.jitter;
        }
        if let Some(name) = &self.policy {
            config.policy = match PolicyKind::from_str(name) {
                Some(kind) => kind,
                None => bail!("unknown policy '{name}' (expected uniform, inward, or specular)"),
            };
        }

        Ok((config, self.out))
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let (config, out_path) = cli.into_config()?;
    if config.max_steps.is_none() {
        bail!("refusing an unbounded run from the CLI; pass --steps");
    }

    let mut sim = Simulator::new(&config)?;
    log::info!(
        "Starting run: W={}, speed={}, steps={}, seed={}, policy={}",
        config.arena_half_width,
        config.initial_speed,
        config.max_steps.unwrap_or_default(),
        sim.seed(),
        config.policy.as_str()
    );

    let seed = sim.seed();
    let start_pos = sim.agent().pos;
    let mut acc = StatsAccumulator::new(start_pos);
    let mut frames = Vec::new();

    for snap in sim.by_ref() {
        acc.record(&snap);
        if snap.step % PROGRESS_EVERY == 0 {
            log::info!(
                "step {}: pos=({:.3}, {:.3}), collisions={}",
                snap.step,
                snap.pos.x,
                snap.pos.y,
                snap.collision_count
            );
        }
        frames.push(snap);
    }

    let stats = acc.stats();
    let envelope = TraceEnvelope::new(seed, config.arena_half_width, frames, stats.clone());
    envelope
        .save(&out_path)
        .with_context(|| format!("writing trace {}", out_path.display()))?;

    let final_pos = sim.agent().pos;
    println!("Start position: ({:.3}, {:.3})", start_pos.x, start_pos.y);
    println!("Final position: ({:.3}, {:.3})", final_pos.x, final_pos.y);
    println!("Total steps: {}", stats.steps);
    println!("Total distance: {:.2}", stats.total_distance);
    println!("Average speed: {:.3}", stats.avg_speed);
    println!("Collisions: {}", stats.collisions);
    println!("Trace saved to {}", out_path.display());

    Ok(())
}
