//! # Summarize Subcommand
//!
//! Reads a polygon ring and a record batch from JSON files and prints the
//! aggregate report.
//!
//! The polygon file holds either a bare position array
//! (`[[lon, lat], ...]`) or a GeoJSON `Polygon` geometry, in which case the
//! outer ring is used and holes are ignored.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Deserialize;
use wellstat_core::EngineConfig;
use wellstat_spatial::{PolygonSummary, Ring, SummaryAggregator};

/// Arguments for the `wellstat summarize` subcommand.
#[derive(Args, Debug)]
pub struct SummarizeArgs {
    /// JSON file with the polygon ring.
    #[arg(long, value_name = "POLYGON_JSON")]
    pub polygon: PathBuf,

    /// JSON file with the records inside the polygon.
    #[arg(long, value_name = "RECORDS_JSON")]
    pub records: PathBuf,

    /// Write the report here instead of stdout.
    #[arg(long, short)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PolygonFile {
    Positions(Vec<Vec<f64>>),
    Geometry { coordinates: Vec<Vec<Vec<f64>>> },
}

/// Read the outer ring positions from a polygon file.
pub fn read_polygon(path: &Path) -> Result<Vec<Vec<f64>>> {
    match crate::read_json::<PolygonFile>(path)? {
        PolygonFile::Positions(positions) => Ok(positions),
        PolygonFile::Geometry { coordinates } => coordinates
            .into_iter()
            .next()
            .with_context(|| format!("polygon has no rings: {}", path.display())),
    }
}

/// Compute the report for the given files.
pub fn summarize_files(args: &SummarizeArgs, config: EngineConfig) -> Result<PolygonSummary> {
    let positions = read_polygon(&args.polygon)?;
    let ring = Ring::from_positions(&positions)
        .with_context(|| format!("invalid polygon: {}", args.polygon.display()))?;
    let records = crate::read_records(&args.records)?;

    tracing::debug!(vertices = ring.vertex_count(), "polygon ring normalized");
    Ok(SummaryAggregator::new(config).summarize(&ring, &records))
}

/// Execute the summarize subcommand.
///
/// Returns exit code 0 on success.
pub fn run_summarize(args: &SummarizeArgs, config: EngineConfig) -> Result<u8> {
    let summary = summarize_files(args, config)?;
    crate::write_output(&summary, args.out.as_ref())?;
    Ok(0)
}
