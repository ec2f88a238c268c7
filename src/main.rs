//! OrbitWatch - orbital display propagation and collision-risk monitoring
//!
//! Host binary around the `orbitwatch` library: runs the tick loop, prints
//! catalog statistics and submits propagated states for conjunction analysis.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{AnalyzeArgs, SimulateArgs, StatsArgs};

#[derive(Parser, Debug)]
#[command(name = "orbitwatch", version, about = "Orbital collision-risk monitor")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the propagation loop and report the final snapshot
    Simulate(SimulateArgs),
    /// Print statistics for the catalog
    Stats(StatsArgs),
    /// Propagate to a tick and request a collision prediction
    Analyze(AnalyzeArgs),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    log::info!("Starting OrbitWatch...");

    match cli.command {
        Command::Simulate(args) => commands::run_simulation(args),
        Command::Stats(args) => commands::run_stats(args),
        Command::Analyze(args) => commands::run_analyze(args),
    }
}
