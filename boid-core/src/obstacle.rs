use core::f32::consts::PI;

use crate::boid::Boid;
use crate::math;
use crate::render::Rgba;
use crate::vector::Vector2D;

/// A static circle that boids bounce off and suffocate inside
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub center: Vector2D,
    pub radius: f32,
    pub color: Rgba,
}

impl Obstacle {
    pub const DEFAULT_COLOR: Rgba = Rgba::new(32, 32, 48, 0.5);

    pub fn new(center: Vector2D, radius: f32) -> Self {
        Self {
            center,
            radius,
            color: Self::DEFAULT_COLOR,
        }
    }

    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    /// Points on the rim count as inside.
    pub fn contains(&self, point: Vector2D) -> bool {
        self.center.distance(&point) <= self.radius
    }

    /// Both roots of `|position + t * velocity - center| = radius`, larger first.
    ///
    /// Returns `None` when the line misses the circle or `velocity` is zero.
    pub fn crossing_times(&self, position: Vector2D, velocity: Vector2D) -> Option<(f32, f32)> {
        let a = velocity.magnitude_squared();
        if !(a > 0.0) {
            return None;
        }

        let offset = position - self.center;
        let b = -velocity.dot(&offset);
        let c = offset.magnitude_squared() - self.radius * self.radius;
        let discriminant = b * b - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let root = math::sqrt(discriminant);
        Some(((b + root) / a, (b - root) / a))
    }

    /// Rotation to apply to `boid`'s velocity when its step this tick crosses the rim.
    ///
    /// `None` means no root falls within the step; the caller pushes the boid
    /// straight out from the center instead.
    pub fn deflection(&self, boid: &Boid) -> Option<Deflection> {
        let (first, second) = self.crossing_times(boid.position, boid.velocity)?;
        if !within_step(first) && !within_step(second) {
            return None;
        }

        let crossing = boid.position + boid.velocity * first;
        let to_next = boid.next_point() - crossing;
        let to_center = self.center - crossing;
        Some(Deflection::from_amplitude(angle_between(&to_next, &to_center)))
    }
}

/// Approximate reflection off an obstacle rim
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deflection {
    pub rotation: f32,
}

impl Deflection {
    pub fn from_amplitude(amplitude: f32) -> Self {
        let factor = if amplitude * 2.0 <= PI { 2.0 } else { 1.0 };
        Self {
            rotation: PI - factor * amplitude,
        }
    }

    pub fn apply(&self, velocity: &mut Vector2D) {
        velocity.rotate(self.rotation);
    }
}

fn within_step(t: f32) -> bool {
    (0.0..=1.0).contains(&t)
}

fn angle_between(a: &Vector2D, b: &Vector2D) -> f32 {
    let lengths = a.magnitude() * b.magnitude();
    if !(lengths > 0.0) {
        return 0.0;
    }
    math::acos((a.dot(b) / lengths).clamp(-1.0, 1.0))
}
