//! # API Route Modules
//!
//! - `polygon` — aggregate statistics for the records inside a drawn polygon.
//! - `proximity` — records ranked by calendar distance to a target month/day.
//!
//! Both accept record batches that were already filtered upstream; no
//! spatial query happens here. The engine runs on a blocking worker so a
//! large nearest-neighbour scan never stalls the async executor.

pub mod polygon;
pub mod proximity;
