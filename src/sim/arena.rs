//! Square arena geometry and boundary contact
//!
//! The arena is axis-aligned, side `2 * half_width`, centered on the origin.
//! It is constructed once, validated once, and never mutated; a future
//! multi-agent setup shares it read-only across simulators.

use glam::Vec2;
use rand_pcg::Pcg32;

use super::policy::HeadingPolicy;
use crate::error::{Error, Result};

/// The bounded square region the agent moves in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    half_width: f32,
}

/// Outcome of resolving a proposed position against the walls
#[derive(Debug, Clone, Copy)]
pub struct Rebound {
    /// Final position, clamped to the arena on contact
    pub pos: Vec2,
    /// Heading after the collision policy ran (unchanged on a miss)
    pub heading: f32,
    /// Whether the proposed position crossed a wall
    pub collided: bool,
}

impl Arena {
    /// Create an arena with the given half-width.
    ///
    /// Fails with `InvalidConfiguration` when `half_width <= 0` or non-finite.
    pub fn new(half_width: f32) -> Result<Self> {
        if !half_width.is_finite() || half_width <= 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "arena_half_width must be > 0, got {half_width}"
            )));
        }
        Ok(Self { half_width })
    }

    /// Half-width W of the square
    #[inline]
    pub fn half_width(&self) -> f32 {
        self.half_width
    }

    /// True iff `-W <= x <= W` and `-W <= y <= W` (walls included)
    #[inline]
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x.abs() <= self.half_width && pos.y.abs() <= self.half_width
    }

    /// Inward wall normal for a position strictly outside the arena.
    ///
    /// A corner crossing sums both axis normals and renormalizes, so the
    /// caller sees a single collision with one normal.
    fn wall_normal(&self, proposed: Vec2) -> Option<Vec2> {
        let w = self.half_width;
        let mut normal = Vec2::ZERO;
        if proposed.x > w {
            normal.x -= 1.0;
        } else if proposed.x < -w {
            normal.x += 1.0;
        }
        if proposed.y > w {
            normal.y -= 1.0;
        } else if proposed.y < -w {
            normal.y += 1.0;
        }
        (normal != Vec2::ZERO).then(|| normal.normalize())
    }

    /// Resolve a proposed next position against the walls.
    ///
    /// Inside (or exactly on) the boundary: inputs come back unchanged with
    /// `collided = false`. Past the boundary: the position is clamped per
    /// axis to `[-W, W]` and the policy picks the rebound heading. Crossing
    /// two walls at a corner is one collision event with one re-heading.
    pub fn clamp_and_reflect(
        &self,
        proposed: Vec2,
        heading: f32,
        policy: &dyn HeadingPolicy,
        rng: &mut Pcg32,
    ) -> Rebound {
        match self.wall_normal(proposed) {
            None => Rebound {
                pos: proposed,
                heading,
                collided: false,
            },
            Some(normal) => {
                let w = self.half_width;
                let pos = proposed.clamp(Vec2::splat(-w), Vec2::splat(w));
                let heading = policy.choose_heading(heading, normal, rng);
                Rebound {
                    pos,
                    heading,
                    collided: true,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::policy::{Specular, UniformRandom};
    use rand::SeedableRng;
    use std::f32::consts::{FRAC_PI_4, PI};

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn rejects_bad_half_width() {
        assert!(Arena::new(0.0).is_err());
        assert!(Arena::new(-1.0).is_err());
        assert!(Arena::new(f32::NAN).is_err());
        assert!(Arena::new(10.0).is_ok());
    }

    #[test]
    fn contains_is_wall_inclusive() {
        let arena = Arena::new(10.0).unwrap();
        assert!(arena.contains(Vec2::ZERO));
        assert!(arena.contains(Vec2::new(10.0, -10.0)));
        assert!(!arena.contains(Vec2::new(10.001, 0.0)));
        assert!(!arena.contains(Vec2::new(0.0, -10.001)));
    }

    #[test]
    fn exact_wall_contact_is_not_a_collision() {
        let arena = Arena::new(10.0).unwrap();
        let rebound = arena.clamp_and_reflect(Vec2::new(10.0, 0.0), 0.0, &UniformRandom, &mut rng());
        assert!(!rebound.collided);
        assert_eq!(rebound.pos, Vec2::new(10.0, 0.0));
        assert_eq!(rebound.heading, 0.0);
    }

    #[test]
    fn crossing_clamps_to_the_wall() {
        let arena = Arena::new(10.0).unwrap();
        let rebound = arena.clamp_and_reflect(Vec2::new(11.0, 3.0), 0.0, &UniformRandom, &mut rng());
        assert!(rebound.collided);
        assert_eq!(rebound.pos, Vec2::new(10.0, 3.0));
    }

    #[test]
    fn specular_rebound_off_the_right_wall() {
        let arena = Arena::new(10.0).unwrap();
        // Heading straight right into x = W; the mirror image points left
        let rebound = arena.clamp_and_reflect(Vec2::new(10.5, 0.0), 0.0, &Specular, &mut rng());
        assert!(rebound.collided);
        assert!((rebound.heading.abs() - PI).abs() < 1e-5);
    }

    #[test]
    fn corner_crossing_clamps_both_axes() {
        let arena = Arena::new(10.0).unwrap();
        let rebound = arena.clamp_and_reflect(
            Vec2::new(10.7, 10.2),
            FRAC_PI_4,
            &UniformRandom,
            &mut rng(),
        );
        assert!(rebound.collided);
        assert_eq!(rebound.pos, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn corner_normal_points_back_inside() {
        let arena = Arena::new(10.0).unwrap();
        let normal = arena.wall_normal(Vec2::new(10.5, -10.5)).unwrap();
        assert!((normal.length() - 1.0).abs() < 1e-6);
        assert!(normal.x < 0.0 && normal.y > 0.0);
    }
}
