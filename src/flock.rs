//! The population and its per-frame update.
//!
//! [`Flock::step`] computes every boid's next state from an immutable
//! snapshot of the previous frame and only then commits the whole batch, so
//! no boid ever sees a neighbor that has already moved this frame and the
//! iteration order has no effect on the result.

use crate::boid::{Boid, BoidView};
use crate::config::{Bounds, FlockConfig};
use crate::error::ConfigError;
use crate::neighbors::Neighborhood;
use crate::rules::Rule;
use crate::spawn::SpawnContext;
use glam::Vec2;

/// Summary measures of a flock, useful for logging and tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlockStats {
    /// Mean position.
    pub center_of_mass: Vec2,
    /// Mean speed.
    pub mean_speed: f32,
    /// `|mean velocity| / mean speed`: 1 when every boid flies the same way,
    /// near 0 for disordered motion, 0 when nothing moves.
    pub order: f32,
}

/// A fixed population of boids plus the parameters that drive it.
#[derive(Clone, Debug)]
pub struct Flock {
    boids: Vec<Boid>,
    config: FlockConfig,
    rules: [Rule; 5],
    seed: Option<u64>,
    steps: u64,
}

impl Flock {
    /// Validate `config` and spawn its population.
    ///
    /// Uses `config.seed` when set, otherwise a clock-derived seed; the seed
    /// actually used is available from [`Flock::seed`].
    pub fn new(config: FlockConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut ctx = match config.seed {
            Some(seed) => SpawnContext::new(seed, config.bounds),
            None => SpawnContext::from_clock(config.bounds),
        };
        let boids = ctx.spawn_population(config.population_size, config.speed_limit.max_speed);
        log::debug!(
            "spawned {} boids over {}x{} with seed {}",
            boids.len(),
            config.bounds.width,
            config.bounds.height,
            ctx.seed
        );

        Ok(Self {
            boids,
            rules: config.rules(),
            seed: Some(ctx.seed),
            config,
            steps: 0,
        })
    }

    /// Build a flock around an explicit population.
    ///
    /// `config.population_size` is overwritten with `boids.len()`.
    pub fn from_boids(boids: Vec<Boid>, mut config: FlockConfig) -> Result<Self, ConfigError> {
        config.population_size = boids.len();
        config.validate()?;
        Ok(Self {
            boids,
            rules: config.rules(),
            seed: None,
            config,
            steps: 0,
        })
    }

    /// The boids as of the last completed step.
    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    pub fn config(&self) -> &FlockConfig {
        &self.config
    }

    pub fn bounds(&self) -> Bounds {
        self.config.bounds
    }

    /// Seed the population was spawned from, `None` for [`Flock::from_boids`].
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Number of completed steps.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Position and heading of every boid, in population order.
    pub fn views(&self) -> impl ExactSizeIterator<Item = BoidView> + '_ {
        self.boids.iter().map(BoidView::from)
    }

    /// Advance the whole flock by one frame.
    pub fn step(&mut self) {
        let next = self.next_state();
        self.boids = next;
        self.steps += 1;
    }

    /// Advance by `n` frames.
    pub fn step_n(&mut self, n: u64) {
        for _ in 0..n {
            self.step();
        }
    }

    /// Compute every boid's next state from the current snapshot.
    fn next_state(&self) -> Vec<Boid> {
        let snapshot = self.boids.as_slice();
        let bounds = self.config.bounds;

        snapshot
            .iter()
            .enumerate()
            .map(|(index, boid)| {
                let mut next = *boid;
                let hood = Neighborhood::member(snapshot, index);
                for rule in &self.rules {
                    rule.apply(&mut next, hood, bounds);
                }
                next.integrate();
                next
            })
            .collect()
    }

    /// Center of mass, mean speed and order of the current snapshot.
    pub fn stats(&self) -> FlockStats {
        let n = self.boids.len().max(1) as f32;
        let (position_sum, velocity_sum, speed_sum) = self.boids.iter().fold(
            (Vec2::ZERO, Vec2::ZERO, 0.0f32),
            |(p, v, s), boid| (p + boid.position, v + boid.velocity, s + boid.speed()),
        );

        let mean_speed = speed_sum / n;
        let order = if mean_speed > f32::EPSILON {
            (velocity_sum / n).length() / mean_speed
        } else {
            0.0
        };

        FlockStats {
            center_of_mass: position_sum / n,
            mean_speed,
            order,
        }
    }
}
