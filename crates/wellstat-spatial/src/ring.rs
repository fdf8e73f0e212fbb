//! # Ring Normalization
//!
//! Turns a user-drawn polygon boundary into a [`Ring`] the geodesy code can
//! trust: every vertex clamped into the valid coordinate range, the ring
//! closed, and at least three distinct vertices present.
//!
//! Out-of-range coordinates are clamped, never rejected. Simplicity
//! (self-intersection) and winding order are not checked; the area formula
//! tolerates either winding.

use std::collections::HashSet;

use wellstat_core::{GeoPoint, ValidationError};

/// Minimum number of positions accepted before closing.
pub const MIN_RING_POSITIONS: usize = 3;

/// A validated, closed polygon boundary.
///
/// Invariants: first point equals last point, at least four stored points,
/// at least three distinct vertices, all coordinates within range.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    points: Vec<GeoPoint>,
}

impl Ring {
    /// Validate and repair raw `[lon, lat, ...]` positions.
    ///
    /// Fewer than three positions is rejected outright. Each position is
    /// clamped, then the ring is closed.
    pub fn from_positions<P: AsRef<[f64]>>(raw: &[P]) -> Result<Self, ValidationError> {
        if raw.len() < MIN_RING_POSITIONS {
            return Err(ValidationError::RingTooSmall { points: raw.len() });
        }

        let mut points = Vec::with_capacity(raw.len() + 1);
        for (index, position) in raw.iter().enumerate() {
            let point = GeoPoint::from_position(position.as_ref())
                .ok_or(ValidationError::MalformedPosition { index })?;
            if !point.is_finite() {
                return Err(ValidationError::NonFiniteCoordinate { index });
            }
            points.push(clamp(point));
        }

        let mut points = close_if_needed(points);
        // A bare triangle is below the closing threshold; close it here so
        // the stored ring always satisfies the closure invariant.
        if points.first() != points.last() {
            points.push(points[0]);
        }

        let distinct = distinct_vertices(&points[..points.len() - 1]);
        if distinct < MIN_RING_POSITIONS {
            return Err(ValidationError::DegenerateRing { distinct });
        }

        Ok(Self { points })
    }

    /// Stored points, closing point included.
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// Number of vertices, closing point excluded.
    pub fn vertex_count(&self) -> usize {
        self.points.len() - 1
    }
}

/// Clip longitude to [-180, 180] and latitude to [-90, 90].
pub fn clamp(point: GeoPoint) -> GeoPoint {
    GeoPoint::new(point.lon.clamp(-180.0, 180.0), point.lat.clamp(-90.0, 90.0))
}

/// Append the first point unless the ring is already closed.
///
/// Rings with fewer than four points are returned unchanged; callers are
/// expected to have rejected or handled them. Closure is exact coordinate
/// equality.
pub fn close_if_needed(mut points: Vec<GeoPoint>) -> Vec<GeoPoint> {
    if points.len() < 4 {
        return points;
    }
    if points.first() != points.last() {
        points.push(points[0]);
    }
    points
}

fn distinct_vertices(points: &[GeoPoint]) -> usize {
    // `+ 0.0` folds -0.0 into 0.0 so both hash alike.
    points
        .iter()
        .map(|p| ((p.lon + 0.0).to_bits(), (p.lat + 0.0).to_bits()))
        .collect::<HashSet<_>>()
        .len()
}
