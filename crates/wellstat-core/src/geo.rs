//! # Geographic Points
//!
//! WGS84 longitude/latitude pairs in degrees. The engine never projects
//! coordinates; every computation works on the sphere directly.

use serde::{Deserialize, Serialize};

/// A geographic position in degrees, longitude first.
///
/// Construction does not enforce ranges. Ring vertices are clamped by the
/// ring normalizer; record locations are used as supplied once they pass
/// the finiteness check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Longitude in degrees, nominally in [-180, 180].
    pub lon: f64,
    /// Latitude in degrees, nominally in [-90, 90].
    pub lat: f64,
}

impl GeoPoint {
    /// Create a point from longitude and latitude in degrees.
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Build a point from a GeoJSON-style position (`[lon, lat, ...]`).
    ///
    /// Extra ordinates (altitude) are ignored. Returns `None` when fewer than
    /// two numbers are present.
    pub fn from_position(position: &[f64]) -> Option<Self> {
        match position {
            [lon, lat, ..] => Some(Self::new(*lon, *lat)),
            _ => None,
        }
    }

    /// Whether both ordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }

    /// Longitude and latitude converted to radians.
    pub fn to_radians(self) -> (f64, f64) {
        (self.lon.to_radians(), self.lat.to_radians())
    }
}
