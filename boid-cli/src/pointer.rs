use std::str::FromStr;

use boid_core::{Canvas, Vector2D};
use boid_shared::Position;

/// Where the canvas is shown on screen, in client coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClientRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ClientRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Canvas shown unscaled at the origin.
    pub fn covering(canvas: &Canvas) -> Self {
        Self::new(0.0, 0.0, canvas.width, canvas.height)
    }

    /// Maps a client-space pointer position onto the canvas.
    ///
    /// Returns `None` for a collapsed rect.
    pub fn to_canvas(&self, client: Position, canvas: &Canvas) -> Option<Vector2D> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return None;
        }
        Some(Vector2D::new(
            (client.x - self.left) * canvas.width / self.width,
            (client.y - self.top) * canvas.height / self.height,
        ))
    }
}

/// Pointer press replayed before tick `tick` runs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptedPress {
    pub tick: u64,
    pub client: Position,
}

impl FromStr for ScriptedPress {
    type Err = String;

    /// Parses `TICK:X,Y`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (tick, point) = s
            .split_once(':')
            .ok_or_else(|| format!("expected TICK:X,Y, got '{}'", s))?;
        let tick = tick
            .trim()
            .parse()
            .map_err(|_| format!("invalid tick '{}'", tick))?;
        Ok(Self {
            tick,
            client: parse_point(point)?,
        })
    }
}

/// Parses `X,Y`.
pub fn parse_point(s: &str) -> Result<Position, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{}'", s))?;
    let coordinate = |text: &str| {
        text.trim()
            .parse::<f32>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| format!("invalid coordinate '{}'", text))
    };
    Ok(Position::new(coordinate(x)?, coordinate(y)?))
}

/// Parses `WIDTHxHEIGHT` into a rect at the origin.
pub fn parse_window(s: &str) -> Result<ClientRect, String> {
    let (width, height) = s
        .split_once('x')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", s))?;
    let extent = |text: &str| {
        text.trim()
            .parse::<f32>()
            .ok()
            .filter(|value| value.is_finite() && *value > 0.0)
            .ok_or_else(|| format!("invalid extent '{}'", text))
    };
    Ok(ClientRect::new(0.0, 0.0, extent(width)?, extent(height)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_and_offset_rect() {
        let canvas = Canvas::new(800.0, 600.0).unwrap();
        // shown at half size, 10px from the left and 20px from the top
        let rect = ClientRect::new(10.0, 20.0, 400.0, 300.0);

        let point = rect.to_canvas(Position::new(210.0, 170.0), &canvas).unwrap();
        assert_eq!(point, Vector2D::new(400.0, 300.0));
    }

    #[test]
    fn test_unscaled_rect_is_identity() {
        let canvas = Canvas::new(800.0, 600.0).unwrap();
        let rect = ClientRect::covering(&canvas);
        let point = rect.to_canvas(Position::new(123.0, 45.0), &canvas).unwrap();
        assert_eq!(point, Vector2D::new(123.0, 45.0));
    }

    #[test]
    fn test_collapsed_rect() {
        let canvas = Canvas::new(800.0, 600.0).unwrap();
        let rect = ClientRect::new(0.0, 0.0, 0.0, 300.0);
        assert!(rect.to_canvas(Position::new(1.0, 1.0), &canvas).is_none());
    }

    #[test]
    fn test_parse_press() {
        let press: ScriptedPress = "50:120.5, 80".parse().unwrap();
        assert_eq!(press.tick, 50);
        assert_eq!(press.client, Position::new(120.5, 80.0));

        assert!("50".parse::<ScriptedPress>().is_err());
        assert!("x:1,2".parse::<ScriptedPress>().is_err());
        assert!("1:1;2".parse::<ScriptedPress>().is_err());
    }

    #[test]
    fn test_parse_window() {
        assert_eq!(
            parse_window("400x300").unwrap(),
            ClientRect::new(0.0, 0.0, 400.0, 300.0)
        );
        assert!(parse_window("400x0").is_err());
        assert!(parse_window("400").is_err());
    }
}
