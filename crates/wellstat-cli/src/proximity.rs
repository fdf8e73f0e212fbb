//! # Proximity Subcommand
//!
//! Ranks the records in a JSON file by wrap-around calendar distance to a
//! target month/day and prints them closest first.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use wellstat_spatial::{rank_by_calendar_proximity, MonthDay, RankedRecord};

/// Arguments for the `wellstat proximity` subcommand.
#[derive(Args, Debug)]
pub struct ProximityArgs {
    /// Target month (1-12).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: u32,

    /// Target day of month.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=31))]
    pub day: u32,

    /// Maximum number of records to print.
    #[arg(long, default_value_t = 25)]
    pub limit: usize,

    /// JSON file with the records to rank.
    #[arg(long, value_name = "RECORDS_JSON")]
    pub records: PathBuf,

    /// Write the ranking here instead of stdout.
    #[arg(long, short)]
    pub out: Option<PathBuf>,
}

/// Ranked output.
#[derive(Debug, Serialize)]
pub struct ProximityOutput {
    pub target_day_of_year: u32,
    pub count: usize,
    pub results: Vec<RankedRecord>,
}

/// Rank the records named by `args`.
pub fn rank_file(args: &ProximityArgs) -> Result<ProximityOutput> {
    let target = MonthDay::new(args.month, args.day)?;
    let records = crate::read_records(&args.records)?;
    let results = rank_by_calendar_proximity(records, target, args.limit);
    Ok(ProximityOutput {
        target_day_of_year: target.day_of_year(),
        count: results.len(),
        results,
    })
}

/// Execute the proximity subcommand.
///
/// Returns exit code 0 on success.
pub fn run_proximity(args: &ProximityArgs) -> Result<u8> {
    let output = rank_file(args)?;
    crate::write_output(&output, args.out.as_ref())?;
    Ok(0)
}
