#![cfg_attr(not(feature = "std"), no_std)]

use serde::{Deserialize, Serialize};

/// Population size used when the requested count cannot be read.
pub const DEFAULT_POPULATION: usize = 100;

/// Represents a 2D position in canvas coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Coarse health of the flock, by the share of the initial population still alive
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum StatusBucket {
    Bad,
    NotGood,
    Good,
    Perfect,
}

impl StatusBucket {
    /// Bucket for `live` survivors out of `initial` spawned boids.
    ///
    /// `live * 3 / initial` splits the range into thirds for `Bad`, `NotGood` and `Good`;
    /// only a full population reaches `Perfect`.
    pub fn from_ratio(live: usize, initial: usize) -> Self {
        if initial == 0 {
            return StatusBucket::Bad;
        }
        match live.saturating_mul(3) / initial {
            0 => StatusBucket::Bad,
            1 => StatusBucket::NotGood,
            2 => StatusBucket::Good,
            _ => StatusBucket::Perfect,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusBucket::Bad => "bad",
            StatusBucket::NotGood => "not-good",
            StatusBucket::Good => "good",
            StatusBucket::Perfect => "perfect",
        }
    }
}

/// Per-tick summary published for the status display
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct StatusReport {
    /// Boids that survived this tick
    pub live: usize,
    /// Boids spawned at the last reset
    pub initial: usize,
    /// Aggregate remaining health scaled to 0..=9999
    pub health: u32,
    pub bucket: StatusBucket,
    /// Flock is doing well but at least one survivor is suffocating
    pub warning: bool,
}

impl StatusReport {
    /// Upper bound of the `health` display range.
    pub const HEALTH_SCALE: f32 = 9999.0;

    /// Builds a report from survivor totals.
    ///
    /// `remaining` is the sum of `limit - suffocation` over survivors and `limit` the
    /// suffocation degree at which a boid is removed. Returns `None` when nobody is alive.
    pub fn new(
        live: usize,
        initial: usize,
        remaining: f32,
        limit: f32,
        any_suffocating: bool,
    ) -> Option<Self> {
        if live == 0 || initial == 0 {
            return None;
        }

        let scaled = remaining * Self::HEALTH_SCALE / (initial as f32 * limit);
        let health = libm::floorf(scaled).clamp(0.0, Self::HEALTH_SCALE) as u32;
        let bucket = StatusBucket::from_ratio(live, initial);
        let warning = bucket > StatusBucket::NotGood && any_suffocating;

        Some(Self {
            live,
            initial,
            health,
            bucket,
            warning,
        })
    }
}

/// Outcome of toggling obstacles at a point
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ObstacleEdit {
    /// No obstacle contained the point, so one was created there
    Added,
    /// Every obstacle containing the point was removed
    Removed { count: usize },
}

/// Reads a requested population size the way a number input's text is read.
///
/// Leading whitespace and an optional sign are accepted, reading stops at the first
/// non-digit, and text without leading digits falls back to [`DEFAULT_POPULATION`].
/// The result is clamped to `1..=max`.
pub fn clamp_population(input: &str, max: usize) -> usize {
    let max = max.max(1);
    let value = match parse_leading_int(input) {
        Some(value) => value,
        None => DEFAULT_POPULATION as i64,
    };

    if value < 1 {
        1
    } else if value as u64 >= max as u64 {
        max
    } else {
        value as usize
    }
}

fn parse_leading_int(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    let mut seen = false;
    for byte in digits.bytes() {
        if !byte.is_ascii_digit() {
            break;
        }
        seen = true;
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(byte - b'0'));
    }

    if !seen {
        return None;
    }
    Some(if negative { -value } else { value })
}

/// Session settings read once when a population is created
#[cfg(feature = "std")]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationSettings {
    /// Requested population, as typed by the user
    pub number_of_boids: String,
    pub max_number_of_boids: usize,
    pub tick_interval_ms: u64,
    pub width: f32,
    pub height: f32,
    /// Obstacles scattered at random before boids are spawned
    pub random_obstacles: usize,
    pub seed: Option<u64>,
}

#[cfg(feature = "std")]
impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            number_of_boids: DEFAULT_POPULATION.to_string(),
            max_number_of_boids: 1000,
            tick_interval_ms: 25,
            width: 800.0,
            height: 600.0,
            random_obstacles: 0,
            seed: None,
        }
    }
}

#[cfg(feature = "std")]
impl SimulationSettings {
    pub fn population_size(&self) -> usize {
        clamp_population(&self.number_of_boids, self.max_number_of_boids)
    }
}
