//! Flocking simulation where boids steer by three distance zones, bounce off circular
//! obstacles and suffocate while trapped inside them.
//!
//! The crate is `no_std` with `alloc`; enable the default `std` feature for the
//! platform float intrinsics and `StdRng`.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod boid;
pub mod config;
pub mod error;
mod math;
pub mod obstacle;
pub mod population;
pub mod render;
pub mod simulation;
pub mod steering;
pub mod vector;

pub use boid::{Boid, BoidKind};
pub use config::{BoidConfig, Canvas};
pub use error::SimulationError;
pub use obstacle::{Deflection, Obstacle};
pub use population::Population;
pub use render::{NullSink, RenderSink, Rgb, Rgba, StatusSink};
pub use simulation::{RunState, Simulation};
pub use steering::{Effect, Relationship, Steering};
pub use vector::Vector2D;

pub use boid_shared::{ObstacleEdit, StatusBucket, StatusReport};
