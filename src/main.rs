//! Boids command line.
//!
//! Opens a window by default; `--headless` steps the flock without one and
//! logs statistics instead.

use std::path::PathBuf;
use std::process::ExitCode;

use boids::{Flock, FlockConfig, Simulation, SimulationError};
use clap::Parser;

#[derive(Parser)]
#[command(name = "boids")]
#[command(version)]
#[command(about = "2D boids flocking simulation")]
struct Cli {
    /// JSON flock configuration; missing fields use defaults
    config: Option<PathBuf>,

    /// Start from the classic preset instead of the defaults
    #[arg(long, conflicts_with = "config")]
    classic: bool,

    /// Run this many steps without a window, then exit
    #[arg(long, value_name = "STEPS")]
    headless: Option<u64>,

    /// Override the spawn seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the number of boids
    #[arg(long)]
    population: Option<usize>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn flock_config(&self) -> Result<FlockConfig, SimulationError> {
        let mut config = match &self.config {
            Some(path) => FlockConfig::from_json_file(path)?,
            None if self.classic => FlockConfig::classic(),
            None => FlockConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(population) = self.population {
            config.population_size = population;
        }
        Ok(config)
    }
}

fn run_headless(config: FlockConfig, steps: u64) -> Result<(), SimulationError> {
    let mut flock = Flock::new(config)?;
    log::info!(
        "headless run: {} boids, {} steps, seed {:?}",
        flock.len(),
        steps,
        flock.seed()
    );

    let report_every = (steps / 10).max(1);
    for _ in 0..steps {
        flock.step();
        if flock.steps() % report_every == 0 {
            let stats = flock.stats();
            log::info!(
                "step {}: mean speed {:.2}, order {:.3}, center ({:.1}, {:.1})",
                flock.steps(),
                stats.mean_speed,
                stats.order,
                stats.center_of_mass.x,
                stats.center_of_mass.y
            );
        }
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<(), SimulationError> {
    let config = cli.flock_config()?;
    match cli.headless {
        Some(steps) => run_headless(config, steps),
        None => Simulation::from_config(config).run(),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
