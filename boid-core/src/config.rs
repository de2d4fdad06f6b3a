use rand::Rng;

use crate::error::SimulationError;

/// Tunables for steering, speed and suffocation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoidConfig {
    /// Neighbours closer than this push the boid away
    pub avoidance_radius: f32,
    pub avoidance_divisor: f32,
    /// Alignment radius is drawn from `spread_base + [0, spread_jitter)` each tick
    pub spread_base: f32,
    pub spread_jitter: f32,
    pub spread_divisor: f32,
    /// Inner radius of the first cohesion band
    pub far_base: f32,
    pub far_band_width: f32,
    pub far_bands: u32,
    pub far_divisor: f32,
    /// Speed cap is drawn from `speed_cap_base + [0, speed_cap_jitter)` on each normalization
    pub speed_cap_base: f32,
    pub speed_cap_jitter: f32,
    /// Suffocation degree at which a boid is removed
    pub suffocation_limit: f32,
    /// Added each tick a boid ends inside an obstacle
    pub obstacle_damage: f32,
    /// Subtracted each tick a boid ends clear of every obstacle
    pub recovery: f32,
    /// Added to every neighbour that crowds a boid's personal space
    pub crowding_penalty: f32,
    pub obstacle_radius: f32,
    /// Distance kept from the canvas edges when spawning
    pub spawn_margin: f32,
}

impl Default for BoidConfig {
    fn default() -> Self {
        Self {
            avoidance_radius: 12.0,
            avoidance_divisor: 4.0,
            spread_base: 16.0,
            spread_jitter: 8.0,
            spread_divisor: 32.0,
            far_base: 48.0,
            far_band_width: 24.0,
            far_bands: 4,
            far_divisor: 8.0,
            speed_cap_base: 0.8,
            speed_cap_jitter: 1.2,
            suffocation_limit: 128.0,
            obstacle_damage: 1.0,
            recovery: 0.125,
            crowding_penalty: 0.03125,
            obstacle_radius: 100.0,
            spawn_margin: 20.0,
        }
    }
}

impl BoidConfig {
    pub fn spread_radius<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        self.spread_base + rng.gen::<f32>() * self.spread_jitter
    }

    pub fn speed_cap<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        self.speed_cap_base + rng.gen::<f32>() * self.speed_cap_jitter
    }

    /// Outer radius of cohesion band `band` (zero-based)
    pub fn far_radius(&self, band: u32) -> f32 {
        self.far_base + band as f32 * self.far_band_width
    }
}

/// Drawable area; positions are kept within `[0, width] x [0, height]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f32,
    pub height: f32,
}

impl Canvas {
    pub fn new(width: f32, height: f32) -> Result<Self, SimulationError> {
        let valid = |extent: f32| extent.is_finite() && extent > 0.0;
        if !valid(width) || !valid(height) {
            return Err(SimulationError::EmptyCanvas { width, height });
        }
        Ok(Self { width, height })
    }
}
