use alloc::vec::Vec;

use boid_shared::{ObstacleEdit, StatusReport};
use log::{debug, trace};
use rand::Rng;

use crate::boid::Boid;
use crate::config::{BoidConfig, Canvas};
use crate::error::SimulationError;
use crate::obstacle::Obstacle;
use crate::render::RenderSink;
use crate::steering::Steering;
use crate::vector::Vector2D;

/// Distance kept between scattered obstacle centers and the canvas edges
const SCATTER_MARGIN: f32 = 100.0;

/// The flock together with the obstacles it lives among
#[derive(Debug, Clone, Default)]
pub struct Population {
    pub boids: Vec<Boid>,
    pub obstacles: Vec<Obstacle>,
    /// Number of boids spawned at the last reset
    pub initial: usize,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing flock; its current size becomes the initial population.
    pub fn from_boids(boids: Vec<Boid>, obstacles: Vec<Obstacle>) -> Self {
        let initial = boids.len();
        Self {
            boids,
            obstacles,
            initial,
        }
    }

    /// Replaces the flock with `count` freshly spawned boids, keeping the obstacles.
    ///
    /// On error the flock is left empty.
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        canvas: &Canvas,
        config: &BoidConfig,
        rng: &mut R,
    ) -> Result<(), SimulationError> {
        self.boids.clear();
        self.initial = 0;

        let mut boids = Vec::with_capacity(count);
        for _ in 0..count {
            boids.push(Boid::random(canvas, &self.obstacles, config, rng)?);
        }

        debug!(
            "spawned {} boids among {} obstacles",
            count,
            self.obstacles.len()
        );
        self.boids = boids;
        self.initial = count;
        Ok(())
    }

    pub fn add_obstacle(&mut self, obstacle: Obstacle) {
        debug!(
            "obstacle added at ({}, {}) r={}",
            obstacle.center.x, obstacle.center.y, obstacle.radius
        );
        self.obstacles.push(obstacle);
    }

    /// Drops `count` default-sized obstacles at random spots away from the edges.
    pub fn scatter_obstacles<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        canvas: &Canvas,
        config: &BoidConfig,
        rng: &mut R,
    ) {
        let margin_x = SCATTER_MARGIN.min(canvas.width / 2.0);
        let margin_y = SCATTER_MARGIN.min(canvas.height / 2.0);

        for _ in 0..count {
            let center = Vector2D::new(
                margin_x + rng.gen::<f32>() * (canvas.width - 2.0 * margin_x),
                margin_y + rng.gen::<f32>() * (canvas.height - 2.0 * margin_y),
            );
            self.add_obstacle(Obstacle::new(center, config.obstacle_radius));
        }
    }

    /// Removes every obstacle containing `point`, or adds one centered there if none does.
    pub fn toggle_obstacle_at(&mut self, point: Vector2D, config: &BoidConfig) -> ObstacleEdit {
        let before = self.obstacles.len();
        self.obstacles.retain(|obstacle| !obstacle.contains(point));
        let count = before - self.obstacles.len();

        if count > 0 {
            debug!("removed {} obstacles at ({}, {})", count, point.x, point.y);
            ObstacleEdit::Removed { count }
        } else {
            self.add_obstacle(Obstacle::new(point, config.obstacle_radius));
            ObstacleEdit::Added
        }
    }

    /// Runs one simulation tick and returns the status of the survivors.
    ///
    /// The scene is drawn as it stands before anything moves. Each boid then steers
    /// against the flock in order, later boids seeing the earlier ones' new velocities.
    /// Exhausted boids are culled before the survivors are capped and moved.
    pub fn tick<R, S>(
        &mut self,
        canvas: &Canvas,
        config: &BoidConfig,
        rng: &mut R,
        render: &mut S,
    ) -> Option<StatusReport>
    where
        R: Rng + ?Sized,
        S: RenderSink + ?Sized,
    {
        for obstacle in &self.obstacles {
            render.draw_obstacle(obstacle);
        }
        for boid in &self.boids {
            render.draw_boid(boid);
        }

        let mut alive = Vec::with_capacity(self.boids.len());
        for index in 0..self.boids.len() {
            let spread_radius = config.spread_radius(rng);
            let steering = Steering::evaluate(index, &self.boids, spread_radius, config);

            self.boids[index].steer(steering.net());
            for &neighbour in steering.crowded() {
                self.boids[neighbour].suffocation += config.crowding_penalty;
            }
            alive.push(!self.boids[index].is_exhausted(config));
        }

        let before = self.boids.len();
        let mut flags = alive.into_iter();
        self.boids.retain(|_| flags.next().unwrap_or(true));
        if self.boids.len() < before {
            debug!("culled {} suffocated boids", before - self.boids.len());
        }

        let status = self.status(config);

        for boid in self.boids.iter_mut() {
            boid.normalize(config, rng);
            boid.step(canvas, &self.obstacles, config, rng);
        }

        trace!(
            "tick: {} boids, {} obstacles",
            self.boids.len(),
            self.obstacles.len()
        );
        status
    }

    /// Summary of the current flock, `None` once nobody is left.
    pub fn status(&self, config: &BoidConfig) -> Option<StatusReport> {
        let limit = config.suffocation_limit;
        let remaining: f32 = self
            .boids
            .iter()
            .map(|boid| limit - boid.suffocation)
            .sum();
        let any_suffocating = self.boids.iter().any(Boid::is_suffocating);

        StatusReport::new(
            self.boids.len(),
            self.initial,
            remaining,
            limit,
            any_suffocating,
        )
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    /// Removes every boid; obstacles stay.
    pub fn clear(&mut self) {
        self.boids.clear();
        self.initial = 0;
    }
}
