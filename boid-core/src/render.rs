//! Seams towards the drawing and status display collaborators.

use boid_shared::StatusReport;

use crate::boid::Boid;
use crate::obstacle::Obstacle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// Receives the final state of every obstacle and boid once per tick, obstacles first.
pub trait RenderSink {
    fn draw_obstacle(&mut self, obstacle: &Obstacle);
    fn draw_boid(&mut self, boid: &Boid);
}

/// Receives the flock summary after each cull; `None` means nobody is left.
pub trait StatusSink {
    fn publish(&mut self, status: Option<&StatusReport>);
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn draw_obstacle(&mut self, _obstacle: &Obstacle) {}
    fn draw_boid(&mut self, _boid: &Boid) {}
}

impl StatusSink for NullSink {
    fn publish(&mut self, _status: Option<&StatusReport>) {}
}
