use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use boid_core::Canvas;
use boid_shared::SimulationSettings;

/// Reads settings from a JSON file, or the defaults when no file is given.
///
/// Missing fields fall back to their defaults.
pub fn load(path: Option<&Path>) -> Result<SimulationSettings> {
    let Some(path) = path else {
        return Ok(SimulationSettings::default());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;
    let settings = serde_json::from_str(&text)
        .with_context(|| format!("Invalid settings in {}", path.display()))?;

    log::debug!("Loaded settings from {}", path.display());
    Ok(settings)
}

/// Command-line values that take precedence over the settings file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub number_of_boids: Option<String>,
    pub max_number_of_boids: Option<usize>,
    pub tick_interval_ms: Option<u64>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub random_obstacles: Option<usize>,
    pub seed: Option<u64>,
}

impl Overrides {
    pub fn apply(self, settings: &mut SimulationSettings) {
        if let Some(number_of_boids) = self.number_of_boids {
            settings.number_of_boids = number_of_boids;
        }
        if let Some(max) = self.max_number_of_boids {
            settings.max_number_of_boids = max;
        }
        if let Some(interval) = self.tick_interval_ms {
            settings.tick_interval_ms = interval;
        }
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(count) = self.random_obstacles {
            settings.random_obstacles = count;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
    }
}

pub fn canvas(settings: &SimulationSettings) -> Result<Canvas> {
    Canvas::new(settings.width, settings.height).context("Invalid canvas size")
}
