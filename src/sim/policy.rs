//! Collision re-heading policies
//!
//! What happens to the heading when the agent hits a wall is a pluggable
//! strategy: the step loop never cares which one is active. The default is
//! uniform re-randomization, which is what makes the walk Brownian-like
//! rather than billiards-like.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::config::PolicyKind;
use crate::{heading_vec, normalize_angle, vec_heading};

/// Margin kept between an inward-biased draw and the wall tangent (radians)
const INWARD_TANGENT_MARGIN: f32 = 0.1;

/// Strategy for picking a new heading after a wall collision
pub trait HeadingPolicy {
    /// Pick the rebound heading.
    ///
    /// `wall_normal` is the unit inward normal of the crossed wall (the
    /// renormalized sum of both axis normals at a corner).
    fn choose_heading(&self, old_heading: f32, wall_normal: Vec2, rng: &mut Pcg32) -> f32;
}

/// Uniform random heading over [0, 2π) on every collision (default)
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformRandom;

impl HeadingPolicy for UniformRandom {
    fn choose_heading(&self, _old_heading: f32, _wall_normal: Vec2, rng: &mut Pcg32) -> f32 {
        normalize_angle(rng.random_range(0.0..TAU))
    }
}

/// Random heading within the half-plane opening around the inward wall
/// normal, so the rebound cannot immediately re-collide with the same wall
#[derive(Debug, Clone, Copy, Default)]
pub struct InwardBiased;

impl HeadingPolicy for InwardBiased {
    fn choose_heading(&self, _old_heading: f32, wall_normal: Vec2, rng: &mut Pcg32) -> f32 {
        let base = vec_heading(wall_normal);
        let spread = FRAC_PI_2 - INWARD_TANGENT_MARGIN;
        normalize_angle(base + rng.random_range(-spread..spread))
    }
}

/// Deterministic mirror reflection: v' = v - 2(v·n)n
#[derive(Debug, Clone, Copy, Default)]
pub struct Specular;

impl HeadingPolicy for Specular {
    fn choose_heading(&self, old_heading: f32, wall_normal: Vec2, _rng: &mut Pcg32) -> f32 {
        let v = heading_vec(old_heading);
        let reflected = v - 2.0 * v.dot(wall_normal) * wall_normal;
        normalize_angle(vec_heading(reflected))
    }
}

/// Instantiate the policy selected in the configuration
pub fn make_policy(kind: PolicyKind) -> Box<dyn HeadingPolicy> {
    match kind {
        PolicyKind::Uniform => Box::new(UniformRandom),
        PolicyKind::Inward => Box::new(InwardBiased),
        PolicyKind::Specular => Box::new(Specular),
    }
}
