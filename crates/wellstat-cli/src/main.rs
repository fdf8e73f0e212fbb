//! # wellstat CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use wellstat_cli::proximity::{run_proximity, ProximityArgs};
use wellstat_cli::summarize::{run_summarize, SummarizeArgs};

/// Spatial statistics for drilling records.
///
/// Summarizes the wells inside a polygon (area, density, nearest-neighbour
/// dispersion, market concentration, status splits) and ranks wells by
/// calendar proximity to a target date.
#[derive(Parser, Debug)]
#[command(name = "wellstat", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to engine configuration file (YAML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Aggregate statistics for the records inside a polygon.
    Summarize(SummarizeArgs),

    /// Rank records by calendar distance to a month/day.
    Proximity(ProximityArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level. Logs go to stderr so
    // stdout stays valid JSON.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Summarize(args) => wellstat_cli::load_config(cli.config.as_deref())
            .and_then(|config| run_summarize(&args, config)),
        Commands::Proximity(args) => run_proximity(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
