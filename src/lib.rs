//! # Boids
//!
//! A 2D flocking simulation after Craig Reynolds' boids. A fixed population
//! moves on a rectangular plane; every frame each boid adjusts its velocity
//! from what its neighbors did on the previous frame, then moves.
//!
//! ## Quick Start
//!
//! ```no_run
//! use boids::prelude::*;
//!
//! fn main() -> Result<(), boids::SimulationError> {
//!     Simulation::new()
//!         .with_population(100)
//!         .with_bounds(800.0, 600.0)
//!         .run()
//! }
//! ```
//!
//! Without a window, build the [`Flock`] and step it yourself:
//!
//! ```
//! use boids::prelude::*;
//!
//! let mut flock = Flock::new(FlockConfig { seed: Some(1), ..Default::default() }).unwrap();
//! flock.step_n(100);
//! for view in flock.views() {
//!     let _ = (view.position, view.heading);
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Steps
//!
//! [`Flock::step`] reads an immutable snapshot of the population and commits
//! the whole next state at once. Results never depend on iteration order.
//!
//! ### Rules
//!
//! Rules run in a fixed order on each boid, then its position is integrated:
//!
//! | Order | Rule | Reads neighbors |
//! |-------|------|-----------------|
//! | 1 | [`Rule::Cohere`] | yes |
//! | 2 | [`Rule::Separate`] | yes |
//! | 3 | [`Rule::Align`] | yes |
//! | 4 | [`Rule::SpeedLimit`] | no |
//! | 5 | [`Rule::KeepWithinBounds`] | no |
//!
//! Every rule parameter lives in [`FlockConfig`], which can be loaded from JSON.

mod boid;
mod config;
mod error;
mod flock;
mod gpu;
pub mod input;
mod neighbors;
pub mod rules;
mod shader;
mod simulation;
mod spawn;
pub mod time;
mod window;

pub use boid::{Boid, BoidView};
pub use config::{Bounds, FlockConfig};
pub use error::{ConfigError, GpuError, SimulationError};
pub use flock::{Flock, FlockStats};
pub use glam::Vec2;
pub use neighbors::Neighborhood;
pub use rules::{
    AlignmentConfig, BoundaryConfig, CohesionConfig, Rule, SeparationConfig, SpeedLimitConfig,
};
pub use simulation::Simulation;
pub use spawn::SpawnContext;

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```
/// use boids::prelude::*;
/// ```
///
/// This imports:
/// - [`Simulation`] - the simulation builder
/// - [`Flock`], [`FlockConfig`], [`Bounds`] - the headless core
/// - [`Boid`], [`BoidView`], [`Neighborhood`] - per-boid types
/// - [`Rule`], the rule configs and the rule functions
/// - [`Vec2`] - glam vector type
pub mod prelude {
    pub use crate::boid::{Boid, BoidView};
    pub use crate::config::{Bounds, FlockConfig};
    pub use crate::flock::{Flock, FlockStats};
    pub use crate::neighbors::Neighborhood;
    pub use crate::rules::{
        avoid_others, fly_towards_center, keep_within_bounds, limit_speed, match_velocity,
        AlignmentConfig, BoundaryConfig, CohesionConfig, Rule, SeparationConfig,
        SpeedLimitConfig,
    };
    pub use crate::simulation::Simulation;
    pub use crate::spawn::SpawnContext;
    pub use crate::Vec2;
}
