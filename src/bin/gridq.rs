//! gridq CLI - Grid-world navigation testbed
//!
//! This CLI provides a unified interface for:
//! - Training a tabular Q-learning agent and evaluating it greedily
//! - Running the greedy and random baselines
//! - Comparing all three across the reference grid conditions

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gridq")]
#[command(version, about = "Grid-world testbed for tabular Q-learning", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a Q-learning agent, then evaluate it greedily
    Train(Box<gridq::cli::commands::train::TrainArgs>),

    /// Run a non-learning baseline
    Baseline(gridq::cli::commands::baseline::BaselineArgs),

    /// Compare policies across grid conditions
    Compare(gridq::cli::commands::compare::CompareArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => gridq::cli::commands::train::execute(*args),
        Commands::Baseline(args) => gridq::cli::commands::baseline::execute(args),
        Commands::Compare(args) => gridq::cli::commands::compare::execute(args),
    }
}
