//! Simulation builder and runner

use crate::config::{Bounds, FlockConfig};
use crate::error::{ConfigError, SimulationError};
use crate::flock::Flock;
use crate::rules::{
    AlignmentConfig, BoundaryConfig, CohesionConfig, SeparationConfig, SpeedLimitConfig,
};
use crate::window::App;
use winit::event_loop::{ControlFlow, EventLoop};

/// A flock simulation builder.
///
/// Use method chaining to configure, then call `.run()` to open a window, or
/// `.build()` to get a [`Flock`] to step yourself.
///
/// ```
/// use boids::Simulation;
///
/// let mut flock = Simulation::new()
///     .with_population(50)
///     .with_bounds(400.0, 300.0)
///     .with_seed(7)
///     .build()
///     .unwrap();
///
/// flock.step_n(10);
/// assert_eq!(flock.len(), 50);
/// assert_eq!(flock.steps(), 10);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Simulation {
    config: FlockConfig,
}

impl Simulation {
    /// Create a new simulation with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    pub fn from_config(config: FlockConfig) -> Self {
        Self { config }
    }

    /// Set the number of boids.
    pub fn with_population(mut self, count: usize) -> Self {
        self.config.population_size = count;
        self
    }

    /// Set the width and height of the plane, which is also the window size.
    pub fn with_bounds(mut self, width: f32, height: f32) -> Self {
        self.config.bounds = Bounds::new(width, height);
        self
    }

    /// Fix the spawn seed for a reproducible run.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn with_cohesion(mut self, cohesion: CohesionConfig) -> Self {
        self.config.cohesion = cohesion;
        self
    }

    pub fn with_separation(mut self, separation: SeparationConfig) -> Self {
        self.config.separation = separation;
        self
    }

    pub fn with_alignment(mut self, alignment: AlignmentConfig) -> Self {
        self.config.alignment = alignment;
        self
    }

    /// Set the speed cap, also used as the spawn velocity range.
    pub fn with_speed_limit(mut self, max_speed: f32) -> Self {
        self.config.speed_limit = SpeedLimitConfig { max_speed };
        self
    }

    pub fn with_boundary(mut self, boundary: BoundaryConfig) -> Self {
        self.config.boundary = boundary;
        self
    }

    /// Set how many steps per second the viewer runs.
    pub fn with_target_fps(mut self, fps: f32) -> Self {
        self.config.target_fps = fps;
        self
    }

    /// The configuration built so far.
    pub fn config(&self) -> &FlockConfig {
        &self.config
    }

    /// Validate the configuration and spawn the flock.
    pub fn build(self) -> Result<Flock, ConfigError> {
        Flock::new(self.config)
    }

    /// Run the simulation in a window. This blocks until the user quits.
    pub fn run(self) -> Result<(), SimulationError> {
        let flock = self.build()?;
        log::info!(
            "running {} boids over {}x{} (seed {:?})",
            flock.len(),
            flock.bounds().width,
            flock.bounds().height,
            flock.seed()
        );

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(flock);
        event_loop.run_app(&mut app)?;

        match app.take_error() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
