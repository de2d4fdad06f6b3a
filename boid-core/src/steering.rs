//! Zone classification of neighbours into steering contributions.
//!
//! Every other boid is offered to the zones in priority order (avoidance, spread, far)
//! and the first zone that matches owns it. Each zone then contributes the mean of
//! what it collected.

use alloc::vec::Vec;

use crate::boid::Boid;
use crate::config::BoidConfig;
use crate::vector::Vector2D;

/// Geometry between a boid and one neighbour, valid for the current tick only
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Relationship {
    /// Displacement from the base boid to the neighbour
    pub vector: Vector2D,
    pub distance: f32,
}

impl Relationship {
    pub fn between(base: &Boid, other: &Boid) -> Self {
        let vector = base.position.displacement_to(&other.position);
        Self {
            vector,
            distance: vector.magnitude(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Personal space: repels from neighbours inside the avoidance radius
    Avoidance,
    /// Aligns with the heading of neighbours inside `radius`
    Spread { radius: f32 },
    /// Graduated pull towards neighbours in the outer bands
    Far,
}

impl Effect {
    /// Signed contribution of `relationship`, or `None` when it lies outside this zone.
    pub fn resolve(
        &self,
        relationship: &Relationship,
        other: &Boid,
        config: &BoidConfig,
    ) -> Option<Vector2D> {
        let distance = relationship.distance;
        match *self {
            Effect::Avoidance => {
                if distance < config.avoidance_radius {
                    Some(-(relationship.vector / (distance * config.avoidance_divisor)))
                } else {
                    None
                }
            }
            Effect::Spread { radius } => {
                if distance < radius {
                    let speed = other.speed();
                    if speed > 0.0 {
                        Some(other.velocity / (speed * config.spread_divisor))
                    } else {
                        Some(Vector2D::zero())
                    }
                } else {
                    None
                }
            }
            Effect::Far => (0..config.far_bands)
                .find(|&band| distance < config.far_radius(band))
                .map(|band| {
                    relationship.vector / (distance * (band + 1) as f32 * config.far_divisor)
                }),
        }
    }
}

/// Running sum and match count of one zone
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Accumulator {
    sum: Vector2D,
    count: u32,
}

impl Accumulator {
    pub fn push(&mut self, contribution: Vector2D) {
        self.sum += contribution;
        self.count += 1;
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn mean(&self) -> Option<Vector2D> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f32)
        }
    }
}

/// Steering collected for one boid against the rest of the flock
#[derive(Debug, Clone)]
pub struct Steering {
    zones: [(Effect, Accumulator); 3],
    crowded: Vec<usize>,
}

impl Steering {
    pub fn new(spread_radius: f32) -> Self {
        Self {
            zones: [
                (Effect::Avoidance, Accumulator::default()),
                (Effect::Spread { radius: spread_radius }, Accumulator::default()),
                (Effect::Far, Accumulator::default()),
            ],
            crowded: Vec::new(),
        }
    }

    /// Evaluates `boids[index]` against every other boid in the slice.
    ///
    /// Neighbours at the exact same position have no direction and are skipped.
    pub fn evaluate(index: usize, boids: &[Boid], spread_radius: f32, config: &BoidConfig) -> Self {
        let mut steering = Self::new(spread_radius);
        let base = &boids[index];

        for (other_index, other) in boids.iter().enumerate() {
            if other_index == index {
                continue;
            }

            let relationship = Relationship::between(base, other);
            if !(relationship.distance > 0.0) {
                continue;
            }

            if let Some(Effect::Avoidance) = steering.classify(&relationship, other, config) {
                steering.crowded.push(other_index);
            }
        }

        steering
    }

    /// Hands `relationship` to the first zone that accepts it.
    pub fn classify(
        &mut self,
        relationship: &Relationship,
        other: &Boid,
        config: &BoidConfig,
    ) -> Option<Effect> {
        for (effect, accumulator) in self.zones.iter_mut() {
            if let Some(contribution) = effect.resolve(relationship, other, config) {
                accumulator.push(contribution);
                return Some(*effect);
            }
        }
        None
    }

    /// Sum of every zone's mean contribution
    pub fn net(&self) -> Vector2D {
        self.zones
            .iter()
            .filter_map(|(_, accumulator)| accumulator.mean())
            .fold(Vector2D::zero(), |net, mean| net + mean)
    }

    /// Match counts in priority order: avoidance, spread, far
    pub fn counts(&self) -> [u32; 3] {
        [
            self.zones[0].1.count(),
            self.zones[1].1.count(),
            self.zones[2].1.count(),
        ]
    }

    /// Indices of the neighbours caught in the avoidance zone
    pub fn crowded(&self) -> &[usize] {
        &self.crowded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    fn boid_at(x: f32, y: f32) -> Boid {
        Boid::new(Vector2D::new(x, y), Vector2D::new(1.0, 0.0))
    }

    fn assert_close(actual: Vector2D, expected: Vector2D) {
        assert!(
            (actual.x - expected.x).abs() < EPSILON && (actual.y - expected.y).abs() < EPSILON,
            "{:?} != {:?}",
            actual,
            expected
        );
    }

    #[test]
    fn test_relationship_points_at_neighbour() {
        let rel = Relationship::between(&boid_at(0.0, 0.0), &boid_at(3.0, 4.0));
        assert_eq!(rel.vector, Vector2D::new(3.0, 4.0));
        assert_eq!(rel.distance, 5.0);
    }

    #[test]
    fn test_zones_are_exclusive() {
        let config = BoidConfig::default();
        let base = boid_at(0.0, 0.0);

        for step in 0..300 {
            let distance = 0.5 + step as f32 * 0.5;
            let other = boid_at(distance, 0.0);
            let rel = Relationship::between(&base, &other);

            let mut steering = Steering::new(20.0);
            let owner = steering.classify(&rel, &other, &config);
            let total: u32 = steering.counts().iter().sum();

            assert!(total <= 1, "distance {} matched {} zones", distance, total);
            assert_eq!(owner.is_some(), total == 1);
        }
    }

    #[test]
    fn test_zone_ownership_by_distance() {
        let config = BoidConfig::default();
        let base = boid_at(0.0, 0.0);
        let classify = |distance: f32| {
            let other = boid_at(distance, 0.0);
            let rel = Relationship::between(&base, &other);
            Steering::new(20.0).classify(&rel, &other, &config)
        };

        assert_eq!(classify(11.9), Some(Effect::Avoidance));
        assert_eq!(classify(12.0), Some(Effect::Spread { radius: 20.0 }));
        assert_eq!(classify(19.9), Some(Effect::Spread { radius: 20.0 }));
        assert_eq!(classify(20.0), Some(Effect::Far));
        assert_eq!(classify(119.9), Some(Effect::Far));
        assert_eq!(classify(120.0), None);
    }

    #[test]
    fn test_avoidance_repels() {
        let config = BoidConfig::default();
        let base = boid_at(0.0, 0.0);
        let other = boid_at(8.0, 0.0);
        let rel = Relationship::between(&base, &other);

        let contribution = Effect::Avoidance.resolve(&rel, &other, &config).unwrap();
        // 8 / (8 * 4), pointing away from the neighbour
        assert_close(contribution, Vector2D::new(-0.25, 0.0));
    }

    #[test]
    fn test_spread_follows_neighbour_heading() {
        let config = BoidConfig::default();
        let base = boid_at(0.0, 0.0);
        let other = Boid::new(Vector2D::new(0.0, 15.0), Vector2D::new(0.0, -2.0));
        let rel = Relationship::between(&base, &other);

        let contribution = Effect::Spread { radius: 20.0 }
            .resolve(&rel, &other, &config)
            .unwrap();
        // unit heading scaled by 1/32
        assert_close(contribution, Vector2D::new(0.0, -1.0 / 32.0));
    }

    #[test]
    fn test_spread_with_resting_neighbour() {
        let config = BoidConfig::default();
        let base = boid_at(0.0, 0.0);
        let other = Boid::new(Vector2D::new(15.0, 0.0), Vector2D::zero());
        let rel = Relationship::between(&base, &other);

        let contribution = Effect::Spread { radius: 20.0 }.resolve(&rel, &other, &config);
        assert_eq!(contribution, Some(Vector2D::zero()));
    }

    #[test]
    fn test_far_bands_weaken_outwards() {
        let config = BoidConfig::default();
        let base = boid_at(0.0, 0.0);
        let pull = |distance: f32| {
            let other = boid_at(distance, 0.0);
            let rel = Relationship::between(&base, &other);
            Effect::Far.resolve(&rel, &other, &config).unwrap()
        };

        assert_close(pull(40.0), Vector2D::new(1.0 / 8.0, 0.0));
        assert_close(pull(60.0), Vector2D::new(1.0 / 16.0, 0.0));
        assert_close(pull(80.0), Vector2D::new(1.0 / 24.0, 0.0));
        assert_close(pull(100.0), Vector2D::new(1.0 / 32.0, 0.0));
    }

    #[test]
    fn test_net_is_mean_per_zone() {
        let config = BoidConfig::default();
        let boids = [
            boid_at(100.0, 100.0),
            // two avoidance matches on opposite sides at different distances
            boid_at(104.0, 100.0),
            boid_at(100.0, 92.0),
            // one far match
            boid_at(160.0, 100.0),
        ];

        let steering = Steering::evaluate(0, &boids, 20.0, &config);
        assert_eq!(steering.counts(), [2, 0, 1]);
        assert_eq!(steering.crowded(), &[1, 2]);

        let avoidance = (Vector2D::new(-0.25, 0.0) + Vector2D::new(0.0, 0.25)) / 2.0;
        let far = Vector2D::new(1.0 / 16.0, 0.0);
        assert_close(steering.net(), avoidance + far);
    }

    #[test]
    fn test_empty_neighbourhood_has_no_effect() {
        let config = BoidConfig::default();
        let boids = [boid_at(0.0, 0.0), boid_at(500.0, 500.0)];

        let steering = Steering::evaluate(0, &boids, 20.0, &config);
        assert_eq!(steering.counts(), [0, 0, 0]);
        assert_eq!(steering.net(), Vector2D::zero());
    }

    #[test]
    fn test_coincident_neighbours_are_skipped() {
        let config = BoidConfig::default();
        let boids = [boid_at(50.0, 50.0), boid_at(50.0, 50.0)];

        let steering = Steering::evaluate(0, &boids, 20.0, &config);
        assert_eq!(steering.counts(), [0, 0, 0]);
        assert!(steering.net().is_finite());
    }
}
