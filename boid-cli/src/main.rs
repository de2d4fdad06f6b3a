use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use boid_cli::pointer::{self, ClientRect, ScriptedPress};
use boid_cli::runner::{self, Pacer, RunPlan};
use boid_cli::settings::{self, Overrides};
use boid_cli::sinks::{JsonLinesStatus, TraceRender};
use boid_core::{BoidConfig, Simulation};
use boid_shared::Position;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless boid simulation runner", long_about = None)]
struct Args {
    /// Settings file (JSON); the flags below override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Requested population, read like a number field (e.g. "250")
    #[arg(short, long)]
    boids: Option<String>,

    /// Upper bound for the population
    #[arg(long)]
    max_boids: Option<usize>,

    /// Number of ticks to run
    #[arg(short = 'n', long, default_value_t = 1000)]
    ticks: u64,

    /// Canvas width
    #[arg(long)]
    width: Option<f32>,

    /// Canvas height
    #[arg(long)]
    height: Option<f32>,

    /// Tick interval in milliseconds
    #[arg(long)]
    tick_interval_ms: Option<u64>,

    /// Obstacle center in canvas coordinates, e.g. 400,300 (repeatable)
    #[arg(short, long = "obstacle", value_parser = pointer::parse_point)]
    obstacles: Vec<Position>,

    /// Obstacles to scatter at random before spawning
    #[arg(long)]
    random_obstacles: Option<usize>,

    /// Pointer press during the run as TICK:X,Y in window coordinates (repeatable)
    #[arg(long = "press")]
    presses: Vec<ScriptedPress>,

    /// On-screen canvas size as WIDTHxHEIGHT that presses are given in [default: canvas size]
    #[arg(long, value_parser = pointer::parse_window)]
    window: Option<ClientRect>,

    /// Seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print a status line every N ticks
    #[arg(short, long, default_value_t = 1)]
    report_every: u64,

    /// Sleep between ticks to keep the configured interval
    #[arg(long)]
    realtime: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    let mut settings = settings::load(args.config.as_deref())?;
    Overrides {
        number_of_boids: args.boids,
        max_number_of_boids: args.max_boids,
        tick_interval_ms: args.tick_interval_ms,
        width: args.width,
        height: args.height,
        random_obstacles: args.random_obstacles,
        seed: args.seed,
    }
    .apply(&mut settings);

    let canvas = settings::canvas(&settings)?;
    let rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut simulation = Simulation::new(canvas, BoidConfig::default(), rng)
        .with_tick_interval(Duration::from_millis(settings.tick_interval_ms));

    for obstacle in &args.obstacles {
        simulation.add_obstacle((*obstacle).into());
    }
    simulation.scatter_obstacles(settings.random_obstacles);

    let population = settings.population_size();
    log::info!(
        "Running {} boids on {}x{} for {} ticks",
        population,
        canvas.width,
        canvas.height,
        args.ticks
    );
    simulation
        .reset(population)
        .context("Failed to spawn the population")?;

    let plan = RunPlan {
        ticks: args.ticks,
        presses: args.presses,
        window: args.window.unwrap_or_else(|| ClientRect::covering(&canvas)),
    };
    let mut pacer = args
        .realtime
        .then(|| Pacer::new(simulation.tick_interval()));
    let mut render = TraceRender::default();
    let mut status = JsonLinesStatus::new(io::stdout().lock(), args.report_every);

    let summary = runner::run(
        &mut simulation,
        &plan,
        &mut render,
        &mut status,
        pacer.as_mut(),
    );
    status.finish().context("Failed to write status output")?;

    log::info!(
        "Finished after {} ticks: {} of {} boids alive, {} obstacles",
        summary.ticks,
        summary.survivors,
        population,
        summary.obstacles
    );

    Ok(())
}
