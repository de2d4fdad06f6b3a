use std::thread;
use std::time::{Duration, Instant};

use boid_core::{ObstacleEdit, RenderSink, Simulation, StatusSink};
use rand::Rng;

use crate::pointer::{ClientRect, ScriptedPress};

/// Keeps ticks on a fixed cadence by sleeping out the rest of each interval.
///
/// A tick that overruns its slot resets the schedule instead of bursting to catch up.
pub struct Pacer {
    interval: Duration,
    next: Instant,
}

impl Pacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next: Instant::now(),
        }
    }

    pub fn wait(&mut self) {
        self.next += self.interval;
        let now = Instant::now();
        if self.next > now {
            thread::sleep(self.next - now);
        } else {
            self.next = now;
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunPlan {
    pub ticks: u64,
    pub presses: Vec<ScriptedPress>,
    /// On-screen placement the presses are given in
    pub window: ClientRect,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub ticks: u64,
    pub survivors: usize,
    pub obstacles: usize,
    /// Obstacle edits with the tick they were made before
    pub edits: Vec<(u64, ObstacleEdit)>,
}

/// Drives `simulation` for up to `plan.ticks` ticks, replaying pointer presses on the way.
///
/// Stops early if the simulation is stopped.
pub fn run<R, D, S>(
    simulation: &mut Simulation<R>,
    plan: &RunPlan,
    render: &mut D,
    status: &mut S,
    mut pacer: Option<&mut Pacer>,
) -> RunSummary
where
    R: Rng,
    D: RenderSink + ?Sized,
    S: StatusSink + ?Sized,
{
    let mut summary = RunSummary::default();

    for tick in 0..plan.ticks {
        for press in plan.presses.iter().filter(|press| press.tick == tick) {
            let canvas = *simulation.canvas();
            match plan.window.to_canvas(press.client, &canvas) {
                Some(point) => {
                    let edit = simulation.toggle_obstacle_at(point);
                    log::info!(
                        "Pointer press at ({:.1}, {:.1}): {:?}",
                        point.x,
                        point.y,
                        edit
                    );
                    summary.edits.push((tick, edit));
                }
                None => log::warn!("Ignoring pointer press on a collapsed window"),
            }
        }

        if !simulation.advance(render, status) {
            break;
        }
        summary.ticks += 1;

        if let Some(pacer) = pacer.as_deref_mut() {
            pacer.wait();
        }
    }

    summary.survivors = simulation.population().len();
    summary.obstacles = simulation.population().obstacles.len();
    summary
}
