use alloc::vec::Vec;
use rand::Rng;

use crate::config::{BoidConfig, Canvas};
use crate::error::SimulationError;
use crate::math;
use crate::obstacle::Obstacle;
use crate::render::Rgb;
use crate::vector::Vector2D;

/// Rejection sampling gives up after this many positions inside obstacles.
pub const MAX_SPAWN_ATTEMPTS: u32 = 10_000;

/// Colour scheme of a boid; both kinds fade as they suffocate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoidKind {
    Red,
    Blue,
}

/// A single boid entity
#[derive(Debug, Clone, PartialEq)]
pub struct Boid {
    pub position: Vector2D,
    pub velocity: Vector2D,
    /// Velocity before this tick's steering, used to smooth the step
    pub previous_velocity: Vector2D,
    /// Suffocation degree, never below zero after a move
    pub suffocation: f32,
    pub kind: BoidKind,
}

impl Boid {
    pub fn new(position: Vector2D, velocity: Vector2D) -> Self {
        Self {
            position,
            velocity,
            previous_velocity: velocity,
            suffocation: 0.0,
            kind: BoidKind::Red,
        }
    }

    pub fn with_kind(mut self, kind: BoidKind) -> Self {
        self.kind = kind;
        self
    }

    /// Spawns a boid inside the canvas margin and outside every obstacle.
    pub fn random<R: Rng + ?Sized>(
        canvas: &Canvas,
        obstacles: &[Obstacle],
        config: &BoidConfig,
        rng: &mut R,
    ) -> Result<Self, SimulationError> {
        let margin_x = config.spawn_margin.min(canvas.width / 2.0);
        let margin_y = config.spawn_margin.min(canvas.height / 2.0);

        for _ in 0..MAX_SPAWN_ATTEMPTS {
            let position = Vector2D::new(
                margin_x + rng.gen::<f32>() * (canvas.width - 2.0 * margin_x),
                margin_y + rng.gen::<f32>() * (canvas.height - 2.0 * margin_y),
            );
            if obstacles.iter().any(|obstacle| obstacle.contains(position)) {
                continue;
            }

            let velocity = Vector2D::new(1.0 - rng.gen::<f32>() * 2.0, 1.0 - rng.gen::<f32>() * 2.0);
            let kind = if rng.gen_bool(0.5) {
                BoidKind::Blue
            } else {
                BoidKind::Red
            };
            return Ok(Self::new(position, velocity).with_kind(kind));
        }

        Err(SimulationError::NoFreeSpace {
            attempts: MAX_SPAWN_ATTEMPTS,
        })
    }

    pub fn speed(&self) -> f32 {
        self.velocity.magnitude()
    }

    pub fn is_suffocating(&self) -> bool {
        self.suffocation > 0.0
    }

    pub fn is_exhausted(&self, config: &BoidConfig) -> bool {
        self.suffocation >= config.suffocation_limit
    }

    /// Mean of the current and pre-steering velocity
    pub fn next_velocity(&self) -> Vector2D {
        (self.velocity + self.previous_velocity) / 2.0
    }

    pub fn next_point(&self) -> Vector2D {
        self.position + self.next_velocity()
    }

    /// Remembers the current velocity, then adds the flock's net steering.
    pub fn steer(&mut self, net: Vector2D) {
        self.previous_velocity = self.velocity;
        self.velocity += net;
    }

    /// Caps speed at a fresh random limit.
    pub fn normalize<R: Rng + ?Sized>(&mut self, config: &BoidConfig, rng: &mut R) {
        let cap = config.speed_cap(rng);
        self.velocity = self.velocity.limit(cap);
    }

    /// Advances one step: integrate, bounce off obstacles, stay on the canvas, then
    /// account for suffocation.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        canvas: &Canvas,
        obstacles: &[Obstacle],
        config: &BoidConfig,
        rng: &mut R,
    ) {
        self.position = self.next_point();
        self.avoid_obstacles(obstacles, config, rng);
        self.contain_within_bounds(canvas);
        self.update_suffocation(obstacles, config);
    }

    fn avoid_obstacles<R: Rng + ?Sized>(
        &mut self,
        obstacles: &[Obstacle],
        config: &BoidConfig,
        rng: &mut R,
    ) {
        let hits: Vec<&Obstacle> = obstacles
            .iter()
            .filter(|obstacle| obstacle.contains(self.position))
            .collect();

        for obstacle in hits {
            self.position -= self.velocity;
            match obstacle.deflection(self) {
                Some(deflection) => deflection.apply(&mut self.velocity),
                None => {
                    // no clean crossing this step: push straight out from the center
                    self.velocity = obstacle.center.displacement_to(&self.position);
                    self.normalize(config, rng);
                }
            }
            self.position += self.velocity;
        }
    }

    /// Clamps to the canvas and points the offending velocity component back inwards.
    pub fn contain_within_bounds(&mut self, canvas: &Canvas) {
        if self.position.x < 0.0 {
            self.position.x = 0.0;
            self.velocity.x = math::abs(self.velocity.x);
        }
        if self.position.x > canvas.width {
            self.position.x = canvas.width;
            self.velocity.x = -math::abs(self.velocity.x);
        }

        if self.position.y < 0.0 {
            self.position.y = 0.0;
            self.velocity.y = math::abs(self.velocity.y);
        }
        if self.position.y > canvas.height {
            self.position.y = canvas.height;
            self.velocity.y = -math::abs(self.velocity.y);
        }
    }

    fn update_suffocation(&mut self, obstacles: &[Obstacle], config: &BoidConfig) {
        if obstacles.iter().any(|obstacle| obstacle.contains(self.position)) {
            self.suffocation += config.obstacle_damage;
        } else {
            self.suffocation -= config.recovery;
        }
        self.suffocation = self.suffocation.max(0.0);
    }

    pub fn color(&self) -> Rgb {
        let fade = 255.0 - math::powf(self.suffocation, 1.125);
        let green = fade.clamp(0.0, 128.0) as u8;
        match self.kind {
            BoidKind::Red => Rgb::new(255, green, 0),
            BoidKind::Blue => {
                let red = (self.suffocation * 255.0 / 128.0).clamp(0.0, 255.0) as u8;
                Rgb::new(red, green, fade.clamp(0.0, 255.0) as u8)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn canvas() -> Canvas {
        Canvas::new(800.0, 600.0).unwrap()
    }

    #[test]
    fn test_boid_creation() {
        let boid = Boid::new(Vector2D::new(10.0, 20.0), Vector2D::new(1.0, 1.0));

        assert_eq!(boid.position, Vector2D::new(10.0, 20.0));
        assert_eq!(boid.velocity, Vector2D::new(1.0, 1.0));
        assert_eq!(boid.previous_velocity, boid.velocity);
        assert_eq!(boid.suffocation, 0.0);
        assert!(!boid.is_suffocating());
    }

    #[test]
    fn test_random_spawn_avoids_obstacles() {
        let config = BoidConfig::default();
        let obstacles = [
            Obstacle::new(Vector2D::new(200.0, 300.0), 150.0),
            Obstacle::new(Vector2D::new(600.0, 300.0), 150.0),
        ];
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..500 {
            let boid = Boid::random(&canvas(), &obstacles, &config, &mut rng).unwrap();
            assert!(obstacles.iter().all(|o| !o.contains(boid.position)));
            assert!((20.0..=780.0).contains(&boid.position.x));
            assert!((20.0..=580.0).contains(&boid.position.y));
            assert!((-1.0..=1.0).contains(&boid.velocity.x));
            assert!((-1.0..=1.0).contains(&boid.velocity.y));
        }
    }

    #[test]
    fn test_random_spawn_gives_up_on_covered_canvas() {
        let config = BoidConfig::default();
        let obstacles = [Obstacle::new(Vector2D::new(400.0, 300.0), 10_000.0)];
        let mut rng = StdRng::seed_from_u64(3);

        let result = Boid::random(&canvas(), &obstacles, &config, &mut rng);
        assert_eq!(
            result,
            Err(SimulationError::NoFreeSpace {
                attempts: MAX_SPAWN_ATTEMPTS
            })
        );
    }

    #[test]
    fn test_steer_snapshots_previous_velocity() {
        let mut boid = Boid::new(Vector2D::new(0.0, 0.0), Vector2D::new(1.0, 0.0));
        boid.steer(Vector2D::new(0.0, 1.0));

        assert_eq!(boid.previous_velocity, Vector2D::new(1.0, 0.0));
        assert_eq!(boid.velocity, Vector2D::new(1.0, 1.0));
        assert_eq!(boid.next_velocity(), Vector2D::new(1.0, 0.5));
    }

    #[test]
    fn test_normalize_caps_speed() {
        let config = BoidConfig::default();
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..100 {
            let mut boid = Boid::new(Vector2D::zero(), Vector2D::new(30.0, 40.0));
            boid.normalize(&config, &mut rng);
            assert!(boid.speed() <= 2.0 + 0.0001);
            assert!(boid.speed() >= 0.8 - 0.0001);
        }

        // slow boids are left alone
        let mut slow = Boid::new(Vector2D::zero(), Vector2D::new(0.3, 0.4));
        slow.normalize(&config, &mut rng);
        assert_eq!(slow.velocity, Vector2D::new(0.3, 0.4));
    }

    #[test]
    fn test_step_moves_by_smoothed_velocity() {
        let config = BoidConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut boid = Boid::new(Vector2D::new(100.0, 100.0), Vector2D::new(1.0, 0.0));
        boid.steer(Vector2D::new(0.0, 1.0));

        boid.step(&canvas(), &[], &config, &mut rng);
        assert_eq!(boid.position, Vector2D::new(101.0, 100.5));
    }

    #[test]
    fn test_contain_within_bounds_reflects_inwards() {
        let mut boid = Boid::new(Vector2D::new(-5.0, 610.0), Vector2D::new(-1.0, 2.0));
        boid.contain_within_bounds(&canvas());

        assert_eq!(boid.position, Vector2D::new(0.0, 600.0));
        assert_eq!(boid.velocity, Vector2D::new(1.0, -2.0));

        let mut boid = Boid::new(Vector2D::new(805.0, -1.0), Vector2D::new(3.0, -0.5));
        boid.contain_within_bounds(&canvas());

        assert_eq!(boid.position, Vector2D::new(800.0, 0.0));
        assert_eq!(boid.velocity, Vector2D::new(-3.0, 0.5));
    }

    #[test]
    fn test_suffocation_rises_inside_and_recovers_outside() {
        let config = BoidConfig::default();
        let mut rng = StdRng::seed_from_u64(2);
        let covering = [Obstacle::new(Vector2D::new(400.0, 300.0), 10_000.0)];

        let mut boid = Boid::new(Vector2D::new(400.0, 300.0), Vector2D::new(1.0, 0.0));
        for _ in 0..3 {
            boid.step(&canvas(), &covering, &config, &mut rng);
        }
        assert_eq!(boid.suffocation, 3.0);

        boid.step(&canvas(), &[], &config, &mut rng);
        assert_eq!(boid.suffocation, 2.875);

        let mut fresh = Boid::new(Vector2D::new(400.0, 300.0), Vector2D::new(1.0, 0.0));
        fresh.step(&canvas(), &[], &config, &mut rng);
        assert_eq!(fresh.suffocation, 0.0);
    }

    #[test]
    fn test_embedded_boid_is_pushed_outwards() {
        let config = BoidConfig::default();
        let mut rng = StdRng::seed_from_u64(9);
        let obstacle = Obstacle::new(Vector2D::new(400.0, 300.0), 100.0);

        // just inside the right side of the obstacle, crawling up
        let mut boid = Boid::new(Vector2D::new(450.0, 300.0), Vector2D::new(0.0, -0.01));
        boid.step(&canvas(), &[obstacle], &config, &mut rng);

        assert!(boid.velocity.x > 0.0);
        assert!(boid.velocity.y.abs() < 0.0001);
        assert!(boid.speed() <= 2.0 + 0.0001);
        assert!(boid.position.x > 450.0);
    }

    #[test]
    fn test_crossing_boid_is_turned_back() {
        let config = BoidConfig::default();
        let mut rng = StdRng::seed_from_u64(4);
        let obstacle = Obstacle::new(Vector2D::new(400.0, 300.0), 100.0);

        // one step short of the rim, moving straight at the center
        let mut boid = Boid::new(Vector2D::new(299.5, 300.0), Vector2D::new(1.0, 0.0));
        boid.step(&canvas(), &[obstacle], &config, &mut rng);

        assert!(boid.velocity.x < 0.0);
        assert!(!obstacle.contains(boid.position));
    }

    #[test]
    fn test_colors_fade_with_suffocation() {
        let mut red = Boid::new(Vector2D::zero(), Vector2D::zero());
        assert_eq!(red.color(), Rgb::new(255, 128, 0));

        let mut blue = red.clone().with_kind(BoidKind::Blue);
        assert_eq!(blue.color(), Rgb::new(0, 128, 255));

        red.suffocation = 128.0;
        blue.suffocation = 128.0;
        assert_eq!(red.color().r, 255);
        assert_eq!(blue.color().r, 255);
        assert!(blue.color().b < 255);
        assert!(red.color().g < 128);
    }
}
