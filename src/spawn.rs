//! Spawn context for the initial population.
//!
//! The population is created once. Positions are uniform over the bounds and
//! each velocity component is uniform in `[-max_speed, max_speed)`. With a
//! fixed seed the same flock comes out every time.

use crate::boid::Boid;
use crate::config::Bounds;
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Seeded random source for placing boids.
pub struct SpawnContext {
    /// Seed the generator was created from.
    pub seed: u64,
    /// Plane the boids are scattered over.
    pub bounds: Bounds,
    rng: SmallRng,
}

impl SpawnContext {
    /// Create a spawn context from an explicit seed.
    pub fn new(seed: u64, bounds: Bounds) -> Self {
        Self {
            seed,
            bounds,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Create a spawn context seeded from the wall clock, different each run.
    pub fn from_clock(bounds: Bounds) -> Self {
        Self::new(clock_seed(), bounds)
    }

    /// Random f32 in the given range.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        if max > min {
            self.rng.gen_range(min..max)
        } else {
            min
        }
    }

    /// Uniform point over the bounds.
    pub fn random_in_bounds(&mut self) -> Vec2 {
        Vec2::new(
            self.random_range(0.0, self.bounds.width),
            self.random_range(0.0, self.bounds.height),
        )
    }

    /// Velocity with each component uniform in `[-max_speed, max_speed)`.
    pub fn random_velocity(&mut self, max_speed: f32) -> Vec2 {
        Vec2::new(
            self.random_range(-max_speed, max_speed),
            self.random_range(-max_speed, max_speed),
        )
    }

    /// A freshly spawned boid.
    pub fn spawn(&mut self, max_speed: f32) -> Boid {
        let position = self.random_in_bounds();
        let velocity = self.random_velocity(max_speed);
        Boid::new(position, velocity)
    }

    /// `count` freshly spawned boids.
    pub fn spawn_population(&mut self, count: usize, max_speed: f32) -> Vec<Boid> {
        (0..count).map(|_| self.spawn(max_speed)).collect()
    }
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(42)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_within_bounds() {
        let bounds = Bounds::new(800.0, 600.0);
        let mut ctx = SpawnContext::new(1, bounds);

        for boid in ctx.spawn_population(1_000, 5.0) {
            assert!((0.0..800.0).contains(&boid.position.x));
            assert!((0.0..600.0).contains(&boid.position.y));
            assert!((-5.0..5.0).contains(&boid.velocity.x));
            assert!((-5.0..5.0).contains(&boid.velocity.y));
        }
    }

    #[test]
    fn test_same_seed_same_population() {
        let bounds = Bounds::default();
        let a = SpawnContext::new(99, bounds).spawn_population(50, 5.0);
        let b = SpawnContext::new(99, bounds).spawn_population(50, 5.0);
        let c = SpawnContext::new(100, bounds).spawn_population(50, 5.0);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_zero_max_speed_spawns_at_rest() {
        let mut ctx = SpawnContext::new(3, Bounds::default());
        let boid = ctx.spawn(0.0);
        assert_eq!(boid.velocity, Vec2::ZERO);
    }
}
