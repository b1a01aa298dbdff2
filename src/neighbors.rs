//! Neighbor queries over a population snapshot.
//!
//! Every query is an exact brute-force scan: a candidate is a neighbor when its
//! Euclidean distance to the query point is strictly less than the radius, so a
//! boid sitting exactly on the radius is never counted.

use crate::boid::Boid;
use glam::Vec2;

/// Read-only view of a population from the point of view of one boid.
///
/// `this` is the index of the querying boid when it belongs to the
/// population. Rules use it to leave the boid out of (or put it back into)
/// its own neighbor set. A boid that is evaluated against a population it is
/// not part of is an *outsider* and has no index.
#[derive(Clone, Copy, Debug)]
pub struct Neighborhood<'a> {
    population: &'a [Boid],
    this: Option<usize>,
}

impl<'a> Neighborhood<'a> {
    /// Neighborhood of the boid stored at `index` in `population`.
    pub fn member(population: &'a [Boid], index: usize) -> Self {
        debug_assert!(index < population.len());
        Self {
            population,
            this: Some(index),
        }
    }

    /// Neighborhood of a boid that is not part of `population`.
    pub fn outsider(population: &'a [Boid]) -> Self {
        Self {
            population,
            this: None,
        }
    }

    /// Whether the querying boid is part of the population.
    pub fn is_member(&self) -> bool {
        self.this.is_some()
    }

    /// All other boids strictly closer than `radius` to `center`, with their
    /// indices, in population order. The querying boid is always skipped.
    pub fn within(&self, center: Vec2, radius: f32) -> impl Iterator<Item = (usize, &'a Boid)> + 'a {
        let this = self.this;
        self.population
            .iter()
            .enumerate()
            .filter(move |(i, other)| Some(*i) != this && center.distance(other.position) < radius)
    }

    /// Number of other boids strictly closer than `radius` to `center`.
    pub fn count_within(&self, center: Vec2, radius: f32) -> usize {
        self.within(center, radius).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indices(hood: &Neighborhood<'_>, center: Vec2, radius: f32) -> Vec<usize> {
        hood.within(center, radius).map(|(i, _)| i).collect()
    }

    #[test]
    fn finds_neighbors_in_known_layout() {
        let boids = vec![
            Boid::at(1.0, 1.0),
            Boid::at(1.5, 1.2),
            Boid::at(8.0, 8.0),
            Boid::at(2.7, 1.1),
        ];

        let hood = Neighborhood::member(&boids, 0);
        assert_eq!(indices(&hood, boids[0].position, 2.0), vec![1, 3]);

        let hood = Neighborhood::member(&boids, 2);
        assert!(indices(&hood, boids[2].position, 2.0).is_empty());
    }

    #[test]
    fn radius_boundary_is_exclusive() {
        let boids = vec![Boid::at(0.0, 0.0), Boid::at(3.0, 4.0), Boid::at(2.9, 4.0)];
        let hood = Neighborhood::member(&boids, 0);

        // (3, 4) sits exactly 5 away and must be excluded.
        assert_eq!(indices(&hood, Vec2::ZERO, 5.0), vec![2]);
        assert_eq!(hood.count_within(Vec2::ZERO, 5.0001), 2);
    }

    #[test]
    fn member_skips_itself_but_not_duplicates() {
        let boids = vec![Boid::at(5.0, 5.0), Boid::at(5.0, 5.0)];
        let hood = Neighborhood::member(&boids, 0);
        assert_eq!(indices(&hood, boids[0].position, 1.0), vec![1]);
    }

    #[test]
    fn outsider_sees_whole_population() {
        let boids = vec![Boid::at(400.0, 300.0), Boid::at(410.0, 310.0)];
        let hood = Neighborhood::outsider(&boids);
        assert!(!hood.is_member());
        assert_eq!(indices(&hood, Vec2::new(405.0, 305.0), 100.0), vec![0, 1]);
    }

    #[test]
    fn zero_radius_finds_nothing() {
        let boids = vec![Boid::at(0.0, 0.0), Boid::at(0.0, 0.0)];
        let hood = Neighborhood::outsider(&boids);
        assert_eq!(hood.count_within(Vec2::ZERO, 0.0), 0);
    }
}
