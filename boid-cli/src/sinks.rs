use std::io::{self, Write};

use boid_core::{Boid, Obstacle, RenderSink, StatusSink};
use boid_shared::StatusReport;
use serde::Serialize;

#[derive(Serialize)]
struct StatusLine<'a> {
    tick: u64,
    status: Option<&'a StatusReport>,
}

/// Writes status reports as one JSON object per line.
///
/// Only every `every`-th tick is written, plus the tick where the flock dies out.
/// The first write error stops output and is returned by [`JsonLinesStatus::finish`].
pub struct JsonLinesStatus<W: Write> {
    writer: W,
    every: u64,
    tick: u64,
    cleared: bool,
    error: Option<io::Error>,
}

impl<W: Write> JsonLinesStatus<W> {
    pub fn new(writer: W, every: u64) -> Self {
        Self {
            writer,
            every: every.max(1),
            tick: 0,
            cleared: false,
            error: None,
        }
    }

    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn write_line(&mut self, status: Option<&StatusReport>) -> io::Result<()> {
        let line = StatusLine {
            tick: self.tick,
            status,
        };
        serde_json::to_writer(&mut self.writer, &line)?;
        self.writer.write_all(b"\n")
    }
}

impl<W: Write> StatusSink for JsonLinesStatus<W> {
    fn publish(&mut self, status: Option<&StatusReport>) {
        self.tick += 1;
        if self.error.is_some() {
            return;
        }

        let newly_cleared = status.is_none() && !self.cleared;
        self.cleared = status.is_none();
        if self.tick % self.every != 0 && !newly_cleared {
            return;
        }

        if let Err(err) = self.write_line(status) {
            log::warn!("Failed to write status line: {}", err);
            self.error = Some(err);
        }
    }
}

/// Logs every drawn item at trace level and counts them
#[derive(Debug, Default)]
pub struct TraceRender {
    pub obstacles_drawn: u64,
    pub boids_drawn: u64,
}

impl RenderSink for TraceRender {
    fn draw_obstacle(&mut self, obstacle: &Obstacle) {
        self.obstacles_drawn += 1;
        let c = obstacle.color;
        log::trace!(
            "obstacle ({:.1}, {:.1}) r={} rgba({}, {}, {}, {})",
            obstacle.center.x,
            obstacle.center.y,
            obstacle.radius,
            c.r,
            c.g,
            c.b,
            c.a
        );
    }

    fn draw_boid(&mut self, boid: &Boid) {
        self.boids_drawn += 1;
        let c = boid.color();
        log::trace!(
            "boid ({:.1}, {:.1}) rgb({}, {}, {})",
            boid.position.x,
            boid.position.y,
            c.r,
            c.g,
            c.b
        );
    }
}
