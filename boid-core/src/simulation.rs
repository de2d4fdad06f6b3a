//! Fixed-rate driver around a [`Population`].
//!
//! The host owns the clock: it calls [`Simulation::advance`] once per
//! [`Simulation::tick_interval`] and hands in its drawing and status collaborators.

use core::time::Duration;

use boid_shared::ObstacleEdit;
use log::{debug, info};
use rand::Rng;

use crate::config::{BoidConfig, Canvas};
use crate::error::SimulationError;
use crate::obstacle::Obstacle;
use crate::population::Population;
use crate::render::{RenderSink, StatusSink};
use crate::vector::Vector2D;

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(25);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
}

pub struct Simulation<R: Rng> {
    population: Population,
    canvas: Canvas,
    config: BoidConfig,
    rng: R,
    state: RunState,
    ticks: u64,
    tick_interval: Duration,
}

impl<R: Rng> Simulation<R> {
    /// Creates a stopped simulation with no boids and no obstacles.
    pub fn new(canvas: Canvas, config: BoidConfig, rng: R) -> Self {
        Self {
            population: Population::new(),
            canvas,
            config,
            rng,
            state: RunState::Stopped,
            ticks: 0,
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }

    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    /// Stops the loop, respawns `count` boids and starts again.
    ///
    /// Obstacles survive a reset. If no free spot is found the simulation stays
    /// stopped with an empty flock.
    pub fn reset(&mut self, count: usize) -> Result<(), SimulationError> {
        self.stop();
        self.ticks = 0;
        self.population
            .spawn(count, &self.canvas, &self.config, &mut self.rng)?;
        info!(
            "simulation reset with {} boids on {}x{}",
            count, self.canvas.width, self.canvas.height
        );
        self.start();
        Ok(())
    }

    pub fn scatter_obstacles(&mut self, count: usize) {
        self.population
            .scatter_obstacles(count, &self.canvas, &self.config, &mut self.rng);
    }

    pub fn start(&mut self) {
        self.state = RunState::Running;
    }

    pub fn stop(&mut self) {
        if self.state == RunState::Running {
            debug!("simulation stopped after {} ticks", self.ticks);
        }
        self.state = RunState::Stopped;
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Runs one tick if the loop is running. Returns whether a tick happened.
    pub fn advance<D, S>(&mut self, render: &mut D, status: &mut S) -> bool
    where
        D: RenderSink + ?Sized,
        S: StatusSink + ?Sized,
    {
        if !self.is_running() {
            return false;
        }

        let report = self
            .population
            .tick(&self.canvas, &self.config, &mut self.rng, render);
        status.publish(report.as_ref());
        self.ticks += 1;
        true
    }

    /// Places a default-sized obstacle at `center`, even where others overlap.
    pub fn add_obstacle(&mut self, center: Vector2D) {
        self.population
            .add_obstacle(Obstacle::new(center, self.config.obstacle_radius));
    }

    /// Pointer press at `point` in canvas coordinates.
    pub fn toggle_obstacle_at(&mut self, point: Vector2D) -> ObstacleEdit {
        self.population.toggle_obstacle_at(point, &self.config)
    }

    /// Later steps clamp boids into the new bounds.
    pub fn resize(&mut self, canvas: Canvas) {
        debug!("canvas resized to {}x{}", canvas.width, canvas.height);
        self.canvas = canvas;
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn population_mut(&mut self) -> &mut Population {
        &mut self.population
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn config(&self) -> &BoidConfig {
        &self.config
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }
}
