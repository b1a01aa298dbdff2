//! Flocking behavior rules.
//!
//! Each rule nudges a boid's velocity by accumulation. The neighbor rules
//! (cohesion, separation, alignment) read a [`Neighborhood`] built from the
//! population snapshot taken at the start of the step; speed limiting and
//! boundary avoidance only look at the boid itself.
//!
//! # Rule Order
//!
//! A [`Flock`](crate::Flock) always applies the rules in the same order:
//!
//! 1. [`Rule::Cohere`] - fly towards the local center
//! 2. [`Rule::Separate`] - move away from boids that are too close
//! 3. [`Rule::Align`] - match the local average velocity
//! 4. [`Rule::SpeedLimit`] - clamp the speed
//! 5. [`Rule::KeepWithinBounds`] - turn back near the edges
//!
//! after which the position is integrated. Because boundary avoidance runs
//! after the speed limit, a boid near an edge may briefly exceed `max_speed`
//! by up to `turning_speed` per axis.
//!
//! The rule functions are also usable on their own, e.g. against a population
//! the boid is not part of:
//!
//! ```
//! use boids::prelude::*;
//!
//! let flock = [Boid::at(400.0, 300.0), Boid::at(410.0, 310.0)];
//! let mut boid = Boid::at(450.0, 350.0);
//! fly_towards_center(&mut boid, Neighborhood::outsider(&flock), &CohesionConfig::default());
//! assert!(boid.velocity.x < 0.0 && boid.velocity.y < 0.0);
//! ```

use crate::boid::Boid;
use crate::neighbors::Neighborhood;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Parameters for [`fly_towards_center`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CohesionConfig {
    /// Fraction of the offset to the local center added per step.
    pub factor: f32,
    /// Neighbors strictly closer than this are averaged.
    pub visual_range: f32,
    /// Count the boid's own position in the average when it is a member of
    /// the population.
    pub include_self: bool,
}

impl Default for CohesionConfig {
    fn default() -> Self {
        Self {
            factor: 0.01,
            visual_range: 100.0,
            include_self: false,
        }
    }
}

/// Parameters for [`avoid_others`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeparationConfig {
    /// Other boids strictly closer than this push the boid away.
    pub min_distance: f32,
    /// Scale applied to the summed displacement.
    pub factor: f32,
}

impl Default for SeparationConfig {
    fn default() -> Self {
        Self {
            min_distance: 20.0,
            factor: 0.05,
        }
    }
}

/// Parameters for [`match_velocity`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignmentConfig {
    /// Fraction of the difference to the local mean velocity added per step.
    pub factor: f32,
    /// Neighbors strictly closer than this are averaged.
    pub visual_range: f32,
    /// Count the boid's own velocity in the average when it is a member of
    /// the population. On by default, unlike cohesion.
    pub include_self: bool,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            factor: 0.05,
            visual_range: 100.0,
            include_self: true,
        }
    }
}

/// Parameters for [`limit_speed`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedLimitConfig {
    pub max_speed: f32,
}

impl Default for SpeedLimitConfig {
    fn default() -> Self {
        Self { max_speed: 5.0 }
    }
}

/// Parameters for [`keep_within_bounds`]. The extents themselves come from
/// [`Bounds`](crate::Bounds).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryConfig {
    /// Distance from an edge at which boids start turning back.
    pub margin: f32,
    /// Velocity change per axis per step while inside the margin.
    pub turning_speed: f32,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            margin: 20.0,
            turning_speed: 1.0,
        }
    }
}

/// Cohesion: steer towards the mean position of boids within visual range.
///
/// With no neighbor in range the velocity is left untouched.
pub fn fly_towards_center(boid: &mut Boid, hood: Neighborhood<'_>, config: &CohesionConfig) {
    let mut sum = Vec2::ZERO;
    let mut count = 0u32;

    for (_, other) in hood.within(boid.position, config.visual_range) {
        sum += other.position;
        count += 1;
    }
    if config.include_self && hood.is_member() {
        sum += boid.position;
        count += 1;
    }

    if count > 0 {
        let center = sum / count as f32;
        boid.velocity += (center - boid.position) * config.factor;
    }
}

/// Separation: move away from every other boid closer than `min_distance`.
///
/// Displacements are summed, not averaged, so a crowded boid is pushed
/// harder. A boid never pushes itself.
pub fn avoid_others(boid: &mut Boid, hood: Neighborhood<'_>, config: &SeparationConfig) {
    let push: Vec2 = hood
        .within(boid.position, config.min_distance)
        .map(|(_, other)| boid.position - other.position)
        .sum();

    boid.velocity += push * config.factor;
}

/// Alignment: steer towards the mean velocity of boids within visual range.
///
/// The boid's own velocity takes part in the mean when `include_self` is set
/// and it belongs to the population. No neighbors means no change.
pub fn match_velocity(boid: &mut Boid, hood: Neighborhood<'_>, config: &AlignmentConfig) {
    let mut sum = Vec2::ZERO;
    let mut count = 0u32;

    for (_, other) in hood.within(boid.position, config.visual_range) {
        sum += other.velocity;
        count += 1;
    }
    if config.include_self && hood.is_member() {
        sum += boid.velocity;
        count += 1;
    }

    if count > 0 {
        let average = sum / count as f32;
        boid.velocity += (average - boid.velocity) * config.factor;
    }
}

/// Clamp the speed to `max_speed`, keeping the direction.
///
/// A motionless boid is left alone, so this never divides by zero.
pub fn limit_speed(boid: &mut Boid, config: &SpeedLimitConfig) {
    let speed = boid.speed();
    if speed > config.max_speed && speed > 0.0 {
        boid.velocity = boid.velocity / speed * config.max_speed;
    }
}

/// Nudge a boid back towards the inside of `width` x `height`.
///
/// Each axis changes by exactly `turning_speed` or not at all, however far
/// outside the margin the boid is. Positions are never clamped.
pub fn keep_within_bounds(boid: &mut Boid, width: f32, height: f32, config: &BoundaryConfig) {
    let margin = config.margin;
    let turn = config.turning_speed;

    if boid.position.x < margin {
        boid.velocity.x += turn;
    } else if boid.position.x > width - margin {
        boid.velocity.x -= turn;
    }

    if boid.position.y < margin {
        boid.velocity.y += turn;
    } else if boid.position.y > height - margin {
        boid.velocity.y -= turn;
    }
}

/// A single flocking rule together with its parameters.
///
/// # Example
///
/// ```
/// use boids::prelude::*;
///
/// let rule = Rule::SpeedLimit(SpeedLimitConfig { max_speed: 5.0 });
/// let mut boid = Boid::at(0.0, 0.0).with_velocity(30.0, 40.0);
/// rule.apply(&mut boid, Neighborhood::outsider(&[]), Bounds::default());
/// assert!((boid.speed() - 5.0).abs() < 1e-5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Rule {
    /// Fly towards the center of nearby boids.
    Cohere(CohesionConfig),
    /// Keep a minimum distance from other boids.
    Separate(SeparationConfig),
    /// Match the velocity of nearby boids.
    Align(AlignmentConfig),
    /// Clamp velocity magnitude.
    SpeedLimit(SpeedLimitConfig),
    /// Turn back when close to the domain edges.
    KeepWithinBounds(BoundaryConfig),
}

impl Rule {
    /// Returns `true` if this rule reads other boids.
    pub fn requires_neighbors(&self) -> bool {
        matches!(self, Rule::Cohere(_) | Rule::Separate(_) | Rule::Align(_))
    }

    /// Short name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Rule::Cohere(_) => "cohere",
            Rule::Separate(_) => "separate",
            Rule::Align(_) => "align",
            Rule::SpeedLimit(_) => "speed_limit",
            Rule::KeepWithinBounds(_) => "keep_within_bounds",
        }
    }

    /// Apply the rule to `boid`, reading neighbors from `hood`.
    pub fn apply(&self, boid: &mut Boid, hood: Neighborhood<'_>, bounds: crate::Bounds) {
        match self {
            Rule::Cohere(config) => fly_towards_center(boid, hood, config),
            Rule::Separate(config) => avoid_others(boid, hood, config),
            Rule::Align(config) => match_velocity(boid, hood, config),
            Rule::SpeedLimit(config) => limit_speed(boid, config),
            Rule::KeepWithinBounds(config) => {
                keep_within_bounds(boid, bounds.width, bounds.height, config)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Bounds;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    // ========== Cohesion ==========

    #[test]
    fn test_cohesion_pulls_towards_centroid() {
        let others = [Boid::at(400.0, 300.0), Boid::at(410.0, 310.0)];
        let mut boid = Boid::at(450.0, 350.0);
        fly_towards_center(&mut boid, Neighborhood::outsider(&others), &CohesionConfig::default());

        // centroid (405, 305): offset (-45, -45) * 0.01
        assert!(boid.velocity.x < 0.0);
        assert!(boid.velocity.y < 0.0);
        assert!((boid.velocity - Vec2::new(-0.45, -0.45)).length() < 1e-5);
    }

    #[test]
    fn test_cohesion_ignores_far_boids() {
        let others = [Boid::at(400.0, 300.0), Boid::at(410.0, 310.0)];
        let mut boid = Boid::at(600.0, 500.0).with_velocity(1.0, -2.0);
        let before = boid;
        fly_towards_center(&mut boid, Neighborhood::outsider(&others), &CohesionConfig::default());
        assert_eq!(boid, before);
    }

    #[test]
    fn test_cohesion_include_self_dilutes_pull() {
        let flock = [Boid::at(0.0, 0.0), Boid::at(10.0, 0.0)];

        let mut excluded = flock[0];
        fly_towards_center(&mut excluded, Neighborhood::member(&flock, 0), &CohesionConfig::default());
        assert!((excluded.velocity.x - 0.1).abs() < 1e-6);

        let mut included = flock[0];
        let config = CohesionConfig {
            include_self: true,
            ..Default::default()
        };
        fly_towards_center(&mut included, Neighborhood::member(&flock, 0), &config);
        assert!((included.velocity.x - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_cohesion_lone_member_is_unchanged() {
        let flock = [Boid::at(100.0, 100.0).with_velocity(2.0, 2.0)];
        let mut boid = flock[0];
        fly_towards_center(&mut boid, Neighborhood::member(&flock, 0), &CohesionConfig::default());
        assert_eq!(boid, flock[0]);
    }

    // ========== Separation ==========

    #[test]
    fn test_separation_pushes_away() {
        let others = [Boid::at(400.0, 300.0)];
        let mut boid = Boid::at(410.0, 310.0);
        avoid_others(&mut boid, Neighborhood::outsider(&others), &SeparationConfig::default());
        assert!(boid.velocity.x > 0.0);
        assert!(boid.velocity.y > 0.0);
        assert!((boid.velocity - Vec2::new(0.5, 0.5)).length() < 1e-6);
    }

    #[test]
    fn test_separation_ignores_distant_boids() {
        let others = [Boid::at(500.0, 500.0)];
        let mut boid = Boid::at(400.0, 300.0).with_velocity(-1.0, 0.5);
        let before = boid;
        avoid_others(&mut boid, Neighborhood::outsider(&others), &SeparationConfig::default());
        assert_eq!(boid, before);
    }

    #[test]
    fn test_separation_sums_displacements() {
        let flock = [
            Boid::at(0.0, 0.0),
            Boid::at(-5.0, 0.0),
            Boid::at(0.0, -10.0),
            Boid::at(0.0, 20.0), // exactly at min_distance, excluded
        ];
        let mut boid = flock[0];
        avoid_others(&mut boid, Neighborhood::member(&flock, 0), &SeparationConfig::default());
        assert!((boid.velocity - Vec2::new(0.25, 0.5)).length() < 1e-6);
    }

    // ========== Alignment ==========

    #[test]
    fn test_alignment_accelerates_along_neighbors() {
        let others = [
            Boid::at(400.0, 300.0).with_velocity(1.0, 1.0),
            Boid::at(410.0, 310.0).with_velocity(1.0, 1.0),
        ];
        let mut boid = Boid::at(405.0, 300.0);
        match_velocity(&mut boid, Neighborhood::outsider(&others), &AlignmentConfig::default());
        assert!(boid.velocity.x > 0.0);
        assert!(boid.velocity.y > 0.0);
        assert!((boid.velocity - Vec2::new(0.05, 0.05)).length() < 1e-6);
    }

    #[test]
    fn test_alignment_ignores_far_boids() {
        let others = [Boid::at(400.0, 300.0), Boid::at(410.0, 310.0)];
        let mut boid = Boid::at(600.0, 500.0).with_velocity(3.0, 0.0);
        let before = boid;
        match_velocity(&mut boid, Neighborhood::outsider(&others), &AlignmentConfig::default());
        assert_eq!(boid, before);
    }

    #[test]
    fn test_alignment_counts_self_for_members() {
        let flock = [
            Boid::at(0.0, 0.0).with_velocity(0.0, 0.0),
            Boid::at(5.0, 0.0).with_velocity(2.0, 0.0),
        ];
        let mut boid = flock[0];
        match_velocity(&mut boid, Neighborhood::member(&flock, 0), &AlignmentConfig::default());
        // mean of (0,0) and (2,0) is (1,0)
        assert!((boid.velocity.x - 0.05).abs() < 1e-6);

        let mut boid = flock[0];
        let config = AlignmentConfig {
            include_self: false,
            ..Default::default()
        };
        match_velocity(&mut boid, Neighborhood::member(&flock, 0), &config);
        assert!((boid.velocity.x - 0.1).abs() < 1e-6);
    }

    // ========== Speed Limit ==========

    #[test]
    fn test_speed_limit_rescales_to_max() {
        let mut boid = Boid::at(400.0, 300.0).with_velocity(5.0, 5.0);
        limit_speed(&mut boid, &SpeedLimitConfig { max_speed: 5.0 });

        assert!((boid.speed() - 5.0).abs() < 1e-5);
        assert_eq!(boid.velocity.x, boid.velocity.y);
        assert!(boid.velocity.x < 5.0);
    }

    #[test]
    fn test_speed_limit_leaves_slow_boids() {
        let mut boid = Boid::at(400.0, 300.0).with_velocity(5.0, 5.0);
        limit_speed(&mut boid, &SpeedLimitConfig { max_speed: 10.0 });
        assert_eq!(boid.velocity, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_speed_limit_zero_velocity() {
        let mut boid = Boid::at(0.0, 0.0);
        limit_speed(&mut boid, &SpeedLimitConfig { max_speed: 0.0 });
        assert_eq!(boid.velocity, Vec2::ZERO);
        assert!(!boid.velocity.x.is_nan());
    }

    #[test]
    fn test_speed_limit_bound_and_idempotent() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let max_speed = rng.gen_range(0.1..20.0);
            let config = SpeedLimitConfig { max_speed };
            let mut boid = Boid::at(0.0, 0.0)
                .with_velocity(rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0));

            limit_speed(&mut boid, &config);
            assert!(boid.speed() <= max_speed + 1e-4);

            let once = boid;
            limit_speed(&mut boid, &config);
            assert!((boid.velocity - once.velocity).length() <= 1e-5 * max_speed);
        }
    }

    // ========== Boundary Avoidance ==========

    #[test]
    fn test_bounds_outside_turns_back() {
        let mut boid = Boid::at(900.0, 700.0);
        keep_within_bounds(&mut boid, 800.0, 600.0, &BoundaryConfig::default());
        assert_eq!(boid.velocity, Vec2::new(-1.0, -1.0));
        assert_eq!(boid.position, Vec2::new(900.0, 700.0));
    }

    #[test]
    fn test_bounds_inside_margin_turns_back() {
        let mut boid = Boid::at(790.0, 590.0);
        keep_within_bounds(&mut boid, 800.0, 600.0, &BoundaryConfig::default());
        assert_eq!(boid.velocity, Vec2::new(-1.0, -1.0));

        let mut boid = Boid::at(5.0, 10.0);
        keep_within_bounds(&mut boid, 800.0, 600.0, &BoundaryConfig::default());
        assert_eq!(boid.velocity, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_bounds_center_untouched() {
        let mut boid = Boid::at(400.0, 300.0).with_velocity(2.0, -3.0);
        keep_within_bounds(&mut boid, 800.0, 600.0, &BoundaryConfig::default());
        assert_eq!(boid.velocity, Vec2::new(2.0, -3.0));
    }

    #[test]
    fn test_bounds_step_is_exactly_turning_speed() {
        let config = BoundaryConfig {
            margin: 20.0,
            turning_speed: 0.25,
        };
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..1_000 {
            let mut boid = Boid::at(rng.gen_range(-2_000.0..2_000.0), rng.gen_range(-2_000.0..2_000.0));
            keep_within_bounds(&mut boid, 800.0, 600.0, &config);
            for delta in [boid.velocity.x, boid.velocity.y] {
                assert!(delta == 0.0 || delta.abs() == 0.25, "unexpected delta {delta}");
            }
        }
    }

    // ========== Rule enum ==========

    #[test]
    fn test_requires_neighbors() {
        let neighbor_rules = [
            Rule::Cohere(CohesionConfig::default()),
            Rule::Separate(SeparationConfig::default()),
            Rule::Align(AlignmentConfig::default()),
        ];
        for rule in &neighbor_rules {
            assert!(rule.requires_neighbors(), "{} should need neighbors", rule.name());
        }

        let solo_rules = [
            Rule::SpeedLimit(SpeedLimitConfig::default()),
            Rule::KeepWithinBounds(BoundaryConfig::default()),
        ];
        for rule in &solo_rules {
            assert!(!rule.requires_neighbors(), "{} should not need neighbors", rule.name());
        }
    }

    #[test]
    fn test_rule_apply_dispatches_bounds() {
        let bounds = Bounds::new(100.0, 100.0);
        let mut boid = Boid::at(99.0, 50.0);
        Rule::KeepWithinBounds(BoundaryConfig::default()).apply(&mut boid, Neighborhood::outsider(&[]), bounds);
        assert_eq!(boid.velocity, Vec2::new(-1.0, 0.0));
    }
}
