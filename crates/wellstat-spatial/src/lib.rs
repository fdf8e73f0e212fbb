//! # wellstat-spatial — Polygon Spatial-Statistics Engine
//!
//! Given a user-drawn polygon and the drilling records already filtered to
//! fall inside it, computes geodesic area, point density, mean
//! nearest-neighbour distance with the Clark–Evans index, HHI market
//! concentration, categorical cross-tabulations, and status-date summaries.
//! A separate ranker orders records by wrap-around calendar distance to a
//! target month/day.
//!
//! ## Modules (leaves first)
//!
//! | Module            | Responsibility                                       |
//! |-------------------|------------------------------------------------------|
//! | [`geodesy`]       | Haversine distance, spherical-excess area, density   |
//! | [`ring`]          | Ring clamping, closing, degeneracy checks            |
//! | [`nearest`]       | Capped nearest-neighbour scan, Clark–Evans index     |
//! | [`concentration`] | Tallies and Herfindahl–Hirschman Index               |
//! | [`proximity`]     | Circular day-of-year ranking                         |
//! | [`summary`]       | Orchestration into a [`PolygonSummary`]              |
//!
//! ## Execution model
//!
//! Everything here is synchronous, allocation-local, and free of shared
//! state. The nearest-neighbour scan is the only CPU-heavy step; async
//! callers should run [`SummaryAggregator::summarize`] on a blocking worker.

pub mod concentration;
pub mod geodesy;
pub mod nearest;
pub mod proximity;
pub mod ring;
pub mod summary;

pub use concentration::{concentration, tally, CategoryShare, ConcentrationReport};
pub use geodesy::{distance_meters, point_density, polygon_area_m2};
pub use nearest::{clark_evans, mean_nearest_neighbor, shuffle, ClarkEvans, NearestNeighborResult};
pub use proximity::{circular_diff, day_of_year, rank_by_calendar_proximity, MonthDay, RankedRecord};
pub use ring::Ring;
pub use summary::{PolygonSummary, SummaryAggregator};
