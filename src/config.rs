//! Flock configuration.
//!
//! A [`FlockConfig`] is read once when the flock is built. Every field has a
//! default, so a JSON file only needs to list what it overrides:
//!
//! ```
//! use boids::FlockConfig;
//!
//! let config = FlockConfig::from_json_str(r#"{
//!     "population_size": 250,
//!     "seed": 7,
//!     "alignment": { "factor": 0.08 }
//! }"#).unwrap();
//!
//! assert_eq!(config.population_size, 250);
//! assert_eq!(config.alignment.factor, 0.08);
//! assert_eq!(config.alignment.visual_range, 100.0);
//! ```

use crate::error::ConfigError;
use crate::rules::{
    AlignmentConfig, BoundaryConfig, CohesionConfig, Rule, SeparationConfig, SpeedLimitConfig,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Extents of the simulation plane, `[0, width] x [0, height]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Everything needed to build a [`Flock`](crate::Flock) and drive it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlockConfig {
    /// Number of boids, fixed for the whole run.
    pub population_size: usize,
    pub bounds: Bounds,
    /// Seed for the initial population. `None` picks one from the clock.
    pub seed: Option<u64>,
    pub cohesion: CohesionConfig,
    pub separation: SeparationConfig,
    pub alignment: AlignmentConfig,
    pub speed_limit: SpeedLimitConfig,
    pub boundary: BoundaryConfig,
    /// Frame rate the interactive viewer paces itself to.
    pub target_fps: f32,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            bounds: Bounds::default(),
            seed: None,
            cohesion: CohesionConfig::default(),
            separation: SeparationConfig::default(),
            alignment: AlignmentConfig::default(),
            speed_limit: SpeedLimitConfig::default(),
            boundary: BoundaryConfig::default(),
            target_fps: 60.0,
        }
    }
}

impl FlockConfig {
    /// The tuning the classic interactive runner ships with: a shorter
    /// visual range of 75 for both cohesion and alignment.
    pub fn classic() -> Self {
        let mut config = Self::default();
        config.cohesion.visual_range = 75.0;
        config.alignment.visual_range = 75.0;
        config
    }

    /// Parse a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The per-step rule pipeline, in application order.
    pub fn rules(&self) -> [Rule; 5] {
        [
            Rule::Cohere(self.cohesion),
            Rule::Separate(self.separation),
            Rule::Align(self.alignment),
            Rule::SpeedLimit(self.speed_limit),
            Rule::KeepWithinBounds(self.boundary),
        ]
    }

    /// Check the configuration before any step runs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::InvalidPopulation(self.population_size));
        }
        if !self.bounds.is_valid() {
            return Err(ConfigError::InvalidBounds {
                width: self.bounds.width,
                height: self.bounds.height,
            });
        }

        let parameters = [
            ("cohesion.factor", self.cohesion.factor),
            ("cohesion.visual_range", self.cohesion.visual_range),
            ("separation.min_distance", self.separation.min_distance),
            ("separation.factor", self.separation.factor),
            ("alignment.factor", self.alignment.factor),
            ("alignment.visual_range", self.alignment.visual_range),
            ("speed_limit.max_speed", self.speed_limit.max_speed),
            ("boundary.margin", self.boundary.margin),
            ("boundary.turning_speed", self.boundary.turning_speed),
        ];
        for (name, value) in parameters {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidParameter { name, value });
            }
        }

        // Spawn velocities span [-max_speed, max_speed), which must fit in an f32.
        let max_speed = self.speed_limit.max_speed;
        if !(2.0 * max_speed).is_finite() {
            return Err(ConfigError::InvalidParameter {
                name: "speed_limit.max_speed",
                value: max_speed,
            });
        }

        if !self.target_fps.is_finite() || self.target_fps <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "target_fps",
                value: self.target_fps,
            });
        }

        Ok(())
    }
}
