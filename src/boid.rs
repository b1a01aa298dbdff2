//! The flocking agent.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A single flocking agent: a point with a velocity.
///
/// Boids are plain values; identity comes from their index in a
/// [`Flock`](crate::Flock), so two boids may share position and velocity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Boid {
    /// Position in world units. Only softly bounded by boundary avoidance.
    pub position: Vec2,
    /// Displacement applied per step.
    pub velocity: Vec2,
}

impl Boid {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self { position, velocity }
    }

    /// Boid at rest at `(x, y)`.
    pub fn at(x: f32, y: f32) -> Self {
        Self::new(Vec2::new(x, y), Vec2::ZERO)
    }

    /// Same boid with its velocity replaced.
    pub fn with_velocity(mut self, dx: f32, dy: f32) -> Self {
        self.velocity = Vec2::new(dx, dy);
        self
    }

    /// Current speed (Euclidean norm of the velocity).
    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Unit direction of travel, or `Vec2::ZERO` for a motionless boid.
    #[inline]
    pub fn heading(&self) -> Vec2 {
        self.velocity.normalize_or_zero()
    }

    /// Euclidean distance to another boid.
    #[inline]
    pub fn distance_to(&self, other: &Boid) -> f32 {
        self.position.distance(other.position)
    }

    /// Advance the position by one step of velocity.
    #[inline]
    pub fn integrate(&mut self) {
        self.position += self.velocity;
    }
}

/// What the renderer needs to draw one boid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoidView {
    pub position: Vec2,
    /// Unit velocity direction, zero when the boid is not moving.
    pub heading: Vec2,
}

impl From<&Boid> for BoidView {
    fn from(boid: &Boid) -> Self {
        Self {
            position: boid.position,
            heading: boid.heading(),
        }
    }
}
