use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use boid_core::{population, Flock, FlockConfig};
use boid_sim::{load_settings, Overrides, Runner, TargetPath};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless flocking simulation", long_about = None)]
struct Args {
    /// JSON settings file; missing fields use the built-in defaults
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Plane width, overrides the settings file
    #[arg(long)]
    width: Option<f32>,

    /// Plane height, overrides the settings file
    #[arg(long)]
    height: Option<f32>,

    /// Number of agents, overrides the settings file
    #[arg(short = 'n', long)]
    agents: Option<usize>,

    /// Compute all velocities from the pre-tick state instead of in place
    #[arg(long)]
    batched: bool,

    /// RNG seed; taken from the clock when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ticks to simulate (0 runs until the process is stopped)
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    /// Pointer path: center, fixed:X,Y, circle:RADIUS,PERIOD or sweep:PERIOD
    #[arg(short, long, default_value = "center")]
    path: String,

    /// Limit the tick rate (0 runs unpaced)
    #[arg(long, default_value_t = 0)]
    fps: u32,

    /// Write one JSON frame snapshot per line to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit a snapshot every N ticks
    #[arg(long, default_value_t = 1)]
    emit_every: u64,

    /// Log progress every N ticks (0 disables)
    #[arg(long, default_value_t = 60)]
    log_every: u64,

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

    let settings = load_settings(args.settings.as_deref())?;
    let overrides = Overrides {
        width: args.width,
        height: args.height,
        agent_count: args.agents,
        batched: args.batched,
    };
    let config = overrides.apply(FlockConfig::from(settings));
    let path: TargetPath = args.path.parse().context("Invalid --path")?;
    let seed = args.seed.unwrap_or_else(population::clock_seed);

    log::info!("Flock simulation starting...");
    log::info!(
        "Plane {}x{}, {} agents, seed {}",
        config.width,
        config.height,
        config.agent_count,
        seed
    );
    log::info!("Pointer path: {:?}", path);

    let flock = Flock::with_seed(config, seed).context("Invalid flock configuration")?;
    let mut runner = Runner::new(flock, path)
        .with_progress(args.log_every)
        .paced(args.fps);

    if let Some(output) = &args.output {
        let file = File::create(output)
            .with_context(|| format!("Failed to create {}", output.display()))?;
        runner = runner.with_output(Box::new(BufWriter::new(file)), args.emit_every);
        log::info!("Writing frames to {}", output.display());
    }

    let summary = runner.run(args.ticks).context("Simulation error")?;
    log::info!(
        "Finished {} ticks in {:.2?} ({} frames written, mean speed {:.3})",
        summary.ticks,
        summary.elapsed,
        summary.frames_written,
        summary.mean_speed
    );

    Ok(())
}
