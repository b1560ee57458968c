//! Deterministic simulation module
//!
//! All motion logic lives here. This module must be pure and deterministic:
//! - Discrete unit time-steps only
//! - Seeded RNG only, injected at construction
//! - No rendering, I/O, or platform dependencies

pub mod arena;
pub mod policy;
pub mod state;
pub mod step;

pub use arena::{Arena, Rebound};
pub use policy::{HeadingPolicy, InwardBiased, Specular, UniformRandom};
pub use state::{AgentState, RngHandle, StepSnapshot};
pub use step::Simulator;
