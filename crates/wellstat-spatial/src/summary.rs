//! # Polygon Summary
//!
//! Orchestrates the engine over one geo-filtered record batch and its
//! validated ring, producing a single [`PolygonSummary`].
//!
//! ## Stages
//!
//! 1. Categorical tallies: company, deviation × status, mineral rights,
//!    map status. Missing values count as `"Unknown"`.
//! 2. Status dates: min, max, and median over parseable dates only.
//! 3. Geometry: ring area and point density.
//! 4. Dispersion: mean nearest-neighbour distance and Clark–Evans index.
//! 5. Concentration: HHI over the company tally.
//!
//! Spatial filtering happens upstream; every record passed in is counted.
//! Empty batches produce zeros and nulls, never errors.

use chrono::{DateTime, Datelike, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use wellstat_core::{format_timestamp, parse_status_date, EngineConfig, WellRecord};

use crate::concentration::{concentration, tally, CategoryShare};
use crate::geodesy::{point_density, polygon_area_m2};
use crate::nearest::{clark_evans, mean_nearest_neighbor};
use crate::ring::Ring;

/// Square metres per square kilometre.
const M2_PER_KM2: f64 = 1_000_000.0;

/// Well count for one operating company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CompanyCount {
    pub company: String,
    pub count: u64,
}

/// Well count for one deviation type and status combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DeviationOutcome {
    pub deviation: String,
    pub status: String,
    pub count: u64,
}

/// Well count and percentage for one mineral-rights indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MineralRightsShare {
    pub mineral_ri: String,
    pub count: u64,
    /// Percentage of the batch, two decimals.
    pub pct: f64,
}

/// Well count for one map status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MapStatusCount {
    pub map_status: String,
    pub count: u64,
}

/// Earliest and latest parseable status dates, as originally written.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StatusDateSummary {
    pub min_status_date: Option<String>,
    pub max_status_date: Option<String>,
}

/// Aggregate statistics for the records inside one polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PolygonSummary {
    /// Records in the batch.
    pub count: usize,
    pub top_companies: Vec<CompanyCount>,
    pub deviation_vs_outcome: Vec<DeviationOutcome>,
    pub mineral_rights_split: Vec<MineralRightsShare>,
    pub map_status_split: Vec<MapStatusCount>,
    pub status_date_summary: StatusDateSummary,
    /// ISO 8601 with millisecond precision.
    pub median_status_date: Option<String>,
    pub median_status_year: Option<i32>,
    /// Geodesic area of the ring.
    pub area_m2: f64,
    /// Records with a usable point location.
    pub wells_with_coords: usize,
    pub density_per_km2: Option<f64>,
    pub mean_nnd_m: Option<f64>,
    pub expected_mean_nnd_m: Option<f64>,
    /// Clark–Evans nearest-neighbour index.
    pub nni: Option<f64>,
    pub nnd_used_n: usize,
    pub nnd_capped: bool,
    /// Herfindahl–Hirschman Index over companies.
    pub hhi: Option<f64>,
    pub company_shares: Vec<CategoryShare>,
}

/// Runs the full statistics battery for a record batch.
#[derive(Debug, Clone, Default)]
pub struct SummaryAggregator {
    config: EngineConfig,
}

impl SummaryAggregator {
    /// Create an aggregator with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Summarize with a thread-local random source for subsampling.
    pub fn summarize(&self, ring: &Ring, records: &[WellRecord]) -> PolygonSummary {
        self.summarize_with_rng(ring, records, &mut rand::thread_rng())
    }

    /// Summarize using the supplied random source for subsampling.
    pub fn summarize_with_rng<R: Rng + ?Sized>(
        &self,
        ring: &Ring,
        records: &[WellRecord],
        rng: &mut R,
    ) -> PolygonSummary {
        let count = records.len();
        let total = count as u64;

        // Categorical tallies.
        let companies = tally(records.iter().map(|r| r.company_label()));
        let top_companies = companies
            .iter()
            .take(self.config.top_companies_limit)
            .map(|(company, count)| CompanyCount {
                company: company.to_string(),
                count: *count,
            })
            .collect();

        let deviation_vs_outcome = tally(
            records
                .iter()
                .map(|r| (r.deviation_label(), r.status_label())),
        )
        .into_iter()
        .map(|((deviation, status), count)| DeviationOutcome {
            deviation: deviation.to_string(),
            status: status.to_string(),
            count,
        })
        .collect();

        let mineral_rights_split = tally(records.iter().map(|r| r.mineral_rights_label()))
            .into_iter()
            .map(|(mineral_ri, count)| MineralRightsShare {
                mineral_ri: mineral_ri.to_string(),
                count,
                pct: percentage(count, total),
            })
            .collect();

        let map_status_split = tally(records.iter().map(|r| r.map_status_label()))
            .into_iter()
            .map(|(map_status, count)| MapStatusCount {
                map_status: map_status.to_string(),
                count,
            })
            .collect();

        // Status dates.
        let dates = DateStats::collect(records);
        let median = median_timestamp(dates.timestamps);

        // Geometry and dispersion.
        let area_m2 = polygon_area_m2(ring);
        let points: Vec<_> = records.iter().filter_map(WellRecord::point).collect();
        let density = point_density(points.len(), area_m2);
        let cap = self.config.nnd.cap_for(points.len());
        let nnd = mean_nearest_neighbor(&points, cap, rng);
        let ce = clark_evans(nnd.mean_m, density);

        // Concentration.
        let company_counts: Vec<(String, u64)> = companies
            .iter()
            .map(|(label, count)| (label.to_string(), *count))
            .collect();
        let mut report = concentration(&company_counts, total);
        report.shares.truncate(self.config.top_companies_limit);

        tracing::debug!(
            count,
            wells_with_coords = points.len(),
            area_m2,
            nnd_used_n = nnd.used_n,
            nnd_capped = nnd.capped,
            "polygon summary computed"
        );

        PolygonSummary {
            count,
            top_companies,
            deviation_vs_outcome,
            mineral_rights_split,
            map_status_split,
            status_date_summary: StatusDateSummary {
                min_status_date: dates.min,
                max_status_date: dates.max,
            },
            median_status_date: median.as_ref().map(format_timestamp),
            median_status_year: median.map(|m| m.year()),
            area_m2,
            wells_with_coords: points.len(),
            density_per_km2: density.map(|lambda| lambda * M2_PER_KM2),
            mean_nnd_m: nnd.mean_m,
            expected_mean_nnd_m: ce.expected_mean_m,
            nni: ce.nni,
            nnd_used_n: nnd.used_n,
            nnd_capped: nnd.capped,
            hhi: report.hhi,
            company_shares: report.shares,
        }
    }
}

/// Percentage of `total`, rounded to two decimals; 0 for an empty total.
fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = count as f64 / total as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}

/// Parseable status dates from a batch with their extremes.
struct DateStats {
    timestamps: Vec<DateTime<Utc>>,
    min: Option<String>,
    max: Option<String>,
}

impl DateStats {
    fn collect(records: &[WellRecord]) -> Self {
        let mut timestamps = Vec::new();
        let mut min: Option<(DateTime<Utc>, &str)> = None;
        let mut max: Option<(DateTime<Utc>, &str)> = None;

        for raw in records.iter().filter_map(|r| r.status_date.as_deref()) {
            let Some(ts) = parse_status_date(raw) else {
                continue;
            };
            timestamps.push(ts);
            if min.map_or(true, |(m, _)| ts < m) {
                min = Some((ts, raw));
            }
            if max.map_or(true, |(m, _)| ts > m) {
                max = Some((ts, raw));
            }
        }

        Self {
            timestamps,
            min: min.map(|(_, raw)| raw.trim().to_string()),
            max: max.map(|(_, raw)| raw.trim().to_string()),
        }
    }
}

/// Median instant: the central value for odd counts, the arithmetic mean
/// of the two central values for even counts.
///
/// The even-count mean is taken in whole milliseconds and floors, so it can
/// sit up to 0.5 ms below the exact midpoint.
pub fn median_timestamp(mut timestamps: Vec<DateTime<Utc>>) -> Option<DateTime<Utc>> {
    if timestamps.is_empty() {
        return None;
    }
    timestamps.sort_unstable();
    let mid = timestamps.len() / 2;
    if timestamps.len() % 2 == 1 {
        return Some(timestamps[mid]);
    }
    let lo = timestamps[mid - 1].timestamp_millis();
    let hi = timestamps[mid].timestamp_millis();
    DateTime::<Utc>::from_timestamp_millis(lo + (hi - lo) / 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use wellstat_core::PointGeometry;

    fn epoch_day(days: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(0, 0).unwrap() + Duration::days(days)
    }

    fn unit_square() -> Ring {
        Ring::from_positions(&[
            [-0.005, -0.005],
            [0.005, -0.005],
            [0.005, 0.005],
            [-0.005, 0.005],
            [-0.005, -0.005],
        ])
        .unwrap()
    }

    fn well(company: Option<&str>, lon: f64, lat: f64) -> WellRecord {
        WellRecord {
            company: company.map(str::to_string),
            location: Some(PointGeometry::new(lon, lat)),
            ..WellRecord::default()
        }
    }

    #[test]
    fn median_of_empty_is_none() {
        assert_eq!(median_timestamp(Vec::new()), None);
    }

    #[test]
    fn median_of_single_is_itself() {
        let d = epoch_day(100);
        assert_eq!(median_timestamp(vec![d]), Some(d));
    }

    #[test]
    fn median_of_two_is_midpoint() {
        let m = median_timestamp(vec![epoch_day(10), epoch_day(0)]).unwrap();
        assert_eq!(m, epoch_day(5));
    }

    #[test]
    fn median_of_odd_count_is_central() {
        let m = median_timestamp(vec![epoch_day(9), epoch_day(1), epoch_day(4)]).unwrap();
        assert_eq!(m, epoch_day(4));
    }

    #[test]
    fn percentage_rounds_to_two_decimals() {
        assert_eq!(percentage(1, 3), 33.33);
        assert_eq!(percentage(2, 3), 66.67);
        assert_eq!(percentage(0, 0), 0.0);
    }

    #[test]
    fn five_wells_in_hundredth_degree_square() {
        let records = vec![
            well(Some("Acme"), -0.003, -0.003),
            well(Some("Acme"), 0.003, -0.003),
            well(Some("Acme"), 0.0, 0.0),
            well(Some("Borealis"), -0.003, 0.003),
            well(None, 0.003, 0.003),
        ];
        let summary = SummaryAggregator::default().summarize_with_rng(
            &unit_square(),
            &records,
            &mut StdRng::seed_from_u64(3),
        );

        assert_eq!(summary.count, 5);
        assert_eq!(summary.wells_with_coords, 5);
        assert!((summary.area_m2 - 1.24e6).abs() / 1.24e6 < 0.01);
        // Acme 3/5, Borealis 1/5, Unknown 1/5.
        assert!((summary.hhi.unwrap() - (0.36 + 0.04 + 0.04)).abs() < 1e-12);
        assert_eq!(summary.top_companies[0].company, "Acme");
        assert_eq!(summary.top_companies[0].count, 3);
        assert!(summary.mean_nnd_m.is_some());
        assert!(summary.expected_mean_nnd_m.is_some());
        assert!(summary.nni.is_some());
        assert_eq!(summary.nnd_used_n, 5);
        assert!(!summary.nnd_capped);
        let density = summary.density_per_km2.unwrap();
        assert!((density - 5.0 / 1.239).abs() < 0.05, "density {density}");
    }

    #[test]
    fn empty_batch_resolves_to_nulls() {
        let summary = SummaryAggregator::default().summarize(&unit_square(), &[]);
        assert_eq!(summary.count, 0);
        assert!(summary.top_companies.is_empty());
        assert!(summary.mineral_rights_split.is_empty());
        assert_eq!(summary.status_date_summary, StatusDateSummary::default());
        assert_eq!(summary.median_status_date, None);
        assert_eq!(summary.median_status_year, None);
        assert!(summary.area_m2 > 0.0);
        assert_eq!(summary.wells_with_coords, 0);
        assert_eq!(summary.density_per_km2, None);
        assert_eq!(summary.mean_nnd_m, None);
        assert_eq!(summary.expected_mean_nnd_m, None);
        assert_eq!(summary.nni, None);
        assert_eq!(summary.nnd_used_n, 0);
        assert!(!summary.nnd_capped);
        assert_eq!(summary.hhi, None);
    }

    #[test]
    fn single_located_well_has_expected_but_no_index() {
        let records = vec![well(Some("Acme"), 0.0, 0.0)];
        let summary = SummaryAggregator::default().summarize(&unit_square(), &records);
        assert!(summary.expected_mean_nnd_m.is_some());
        assert_eq!(summary.mean_nnd_m, None);
        assert_eq!(summary.nni, None);
        assert_eq!(summary.hhi, Some(1.0));
    }

    #[test]
    fn records_without_location_count_but_have_no_point() {
        let records = vec![
            WellRecord::default(),
            well(Some("A"), 0.001, 0.001),
            well(Some("B"), 0.002, 0.002),
        ];
        let summary = SummaryAggregator::default().summarize(&unit_square(), &records);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.wells_with_coords, 2);
    }

    #[test]
    fn categorical_splits() {
        let mk = |dev: &str, status: &str, mri: Option<&str>, map: &str| WellRecord {
            deviation: Some(dev.to_string()),
            status: Some(status.to_string()),
            mineral_ri: mri.map(str::to_string),
            map_status: Some(map.to_string()),
            ..WellRecord::default()
        };
        let records = vec![
            mk("Horizontal", "Producing", Some("Fee"), "Active"),
            mk("Horizontal", "Producing", Some("Fee"), "Active"),
            mk("Vertical", "Plugged", None, "Inactive"),
        ];
        let summary = SummaryAggregator::default().summarize(&unit_square(), &records);

        assert_eq!(
            summary.deviation_vs_outcome[0],
            DeviationOutcome {
                deviation: "Horizontal".to_string(),
                status: "Producing".to_string(),
                count: 2,
            }
        );
        assert_eq!(summary.mineral_rights_split[0].mineral_ri, "Fee");
        assert_eq!(summary.mineral_rights_split[0].pct, 66.67);
        assert_eq!(summary.mineral_rights_split[1].mineral_ri, "Unknown");
        assert_eq!(summary.mineral_rights_split[1].pct, 33.33);
        assert_eq!(summary.map_status_split[0].map_status, "Active");
        assert_eq!(summary.map_status_split[1].count, 1);
    }

    #[test]
    fn date_summary_skips_unparseable_dates() {
        let mk = |d: Option<&str>| WellRecord {
            status_date: d.map(str::to_string),
            ..WellRecord::default()
        };
        let records = vec![
            mk(Some("2012-03-01")),
            mk(Some("not a date")),
            mk(None),
            mk(Some("2018-09-30")),
            mk(Some("2009-11-15")),
        ];
        let summary = SummaryAggregator::default().summarize(&unit_square(), &records);
        assert_eq!(
            summary.status_date_summary.min_status_date.as_deref(),
            Some("2009-11-15")
        );
        assert_eq!(
            summary.status_date_summary.max_status_date.as_deref(),
            Some("2018-09-30")
        );
        assert_eq!(
            summary.median_status_date.as_deref(),
            Some("2012-03-01T00:00:00.000Z")
        );
        assert_eq!(summary.median_status_year, Some(2012));
    }

    #[test]
    fn top_companies_truncated_but_hhi_uses_all() {
        let records: Vec<_> = ["A", "B", "C", "D"]
            .iter()
            .map(|c| well(Some(c), 0.0, 0.0))
            .collect();
        let mut config = EngineConfig::default();
        config.top_companies_limit = 2;
        let summary = SummaryAggregator::new(config).summarize(&unit_square(), &records);
        assert_eq!(summary.top_companies.len(), 2);
        assert_eq!(summary.company_shares.len(), 2);
        assert!((summary.hhi.unwrap() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn large_batch_uses_reduced_cap() {
        let mut config = EngineConfig::default();
        config.nnd.high_input_threshold = 40;
        config.nnd.reduced_cap = 10;
        config.nnd.default_cap = 20;
        let records: Vec<_> = (0..50)
            .map(|i| well(Some("A"), (i % 10) as f64 * 0.0005, (i / 10) as f64 * 0.0005))
            .collect();
        let summary = SummaryAggregator::new(config).summarize_with_rng(
            &unit_square(),
            &records,
            &mut StdRng::seed_from_u64(11),
        );
        assert_eq!(summary.nnd_used_n, 10);
        assert!(summary.nnd_capped);
    }

    #[test]
    fn summary_serializes_expected_fields() {
        let summary = SummaryAggregator::default().summarize(&unit_square(), &[]);
        let json = serde_json::to_value(&summary).unwrap();
        for field in [
            "count",
            "top_companies",
            "deviation_vs_outcome",
            "mineral_rights_split",
            "map_status_split",
            "status_date_summary",
            "median_status_date",
            "median_status_year",
            "area_m2",
            "wells_with_coords",
            "mean_nnd_m",
            "expected_mean_nnd_m",
            "nni",
            "nnd_used_n",
            "nnd_capped",
            "hhi",
        ] {
            assert!(json.get(field).is_some(), "missing field {field}");
        }
        assert!(json["hhi"].is_null());
    }
}
