#![deny(missing_docs)]

//! # wellstat-core — Foundational Types for the Well Statistics Engine
//!
//! This crate defines the types every other crate in the workspace depends
//! on. It has no internal crate dependencies — only `serde`, `serde_json`,
//! `thiserror`, and `chrono` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Coordinates are always `(longitude, latitude)` in WGS84 degrees.**
//!    [`GeoPoint`] is the only coordinate carrier; no bare tuples cross
//!    crate boundaries.
//!
//! 2. **Records are lenient on input.** A [`WellRecord`] deserializes from
//!    whatever the upstream store returns. Missing attributes stay `None`,
//!    malformed locations simply yield no point, and unknown attributes are
//!    carried through untouched.
//!
//! 3. **Configuration is explicit.** [`EngineConfig`] is passed into every
//!    computation. Nothing in the engine reads the environment.
//!
//! 4. **[`WellstatError`] hierarchy.** Structured errors with `thiserror` —
//!    no `Box<dyn Error>`, no `.unwrap()` outside tests.

pub mod config;
pub mod error;
pub mod geo;
pub mod record;
pub mod temporal;

// Re-export primary types at crate root for ergonomic imports.
pub use config::{EngineConfig, NndCapPolicy};
pub use error::{ValidationError, WellstatError};
pub use geo::GeoPoint;
pub use record::{PointGeometry, WellRecord, UNKNOWN_LABEL};
pub use temporal::{format_timestamp, parse_status_date, status_calendar_day};
