//! # Geodesy Primitives
//!
//! Great-circle distance and polygon area on a spherical Earth.
//!
//! The two functions deliberately use different radii: distances use the
//! mean radius (6 371 000 m), area uses the WGS84 equatorial radius
//! (6 378 137 m). Both are spherical approximations; fixtures downstream
//! depend on these exact constants.

use wellstat_core::GeoPoint;

use crate::ring::Ring;

/// Mean Earth radius for haversine distances, in metres.
pub const MEAN_EARTH_RADIUS_M: f64 = 6_371_000.0;

/// WGS84 equatorial radius for spherical-excess area, in metres.
pub const WGS84_EQUATORIAL_RADIUS_M: f64 = 6_378_137.0;

/// Haversine great-circle distance between two points, in metres.
///
/// Symmetric in its arguments. Precision near antipodal pairs is not a
/// concern: inputs are local clusters.
pub fn distance_meters(a: GeoPoint, b: GeoPoint) -> f64 {
    let (lon1, lat1) = a.to_radians();
    let (lon2, lat2) = b.to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.clamp(0.0, 1.0).sqrt().asin();
    MEAN_EARTH_RADIUS_M * c
}

/// Geodesic area of a closed ring in square metres.
///
/// Spherical-excess accumulation over consecutive edges:
/// `Σ (λ₂ − λ₁)(2 + sin φ₁ + sin φ₂)`, then `|Σ| · R² / 2`. Winding order
/// does not matter; the result is never negative.
pub fn polygon_area_m2(ring: &Ring) -> f64 {
    ring_area_m2(ring.points())
}

/// Area accumulation over raw vertices. The slice is expected to be closed.
pub(crate) fn ring_area_m2(points: &[GeoPoint]) -> f64 {
    let sum: f64 = points
        .windows(2)
        .map(|edge| {
            let (lon1, lat1) = edge[0].to_radians();
            let (lon2, lat2) = edge[1].to_radians();
            (lon2 - lon1) * (2.0 + lat1.sin() + lat2.sin())
        })
        .sum();
    sum.abs() * WGS84_EQUATORIAL_RADIUS_M * WGS84_EQUATORIAL_RADIUS_M / 2.0
}

/// Points per square metre, or `None` when either side is empty.
pub fn point_density(point_count: usize, area_m2: f64) -> Option<f64> {
    (point_count > 0 && area_m2 > 0.0).then(|| point_count as f64 / area_m2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn square(half: f64) -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(-half, -half),
            GeoPoint::new(half, -half),
            GeoPoint::new(half, half),
            GeoPoint::new(-half, half),
            GeoPoint::new(-half, -half),
        ]
    }

    #[test]
    fn zero_distance_to_self() {
        let p = GeoPoint::new(-97.7, 30.3);
        assert_eq!(distance_meters(p, p), 0.0);
    }

    #[test]
    fn one_degree_of_latitude() {
        let d = distance_meters(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0));
        // 2πR / 360
        assert!((d - 111_194.93).abs() < 1.0, "got {d}");
    }

    #[test]
    fn hundredth_degree_square_near_equator() {
        let area = ring_area_m2(&square(0.005));
        let expected = 1_113.0 * 1_113.0;
        let rel = (area - expected).abs() / expected;
        assert!(rel < 0.03, "area {area} differs from {expected} by {rel}");
    }

    #[test]
    fn area_ignores_winding_order() {
        let mut ring = square(0.01);
        let forward = ring_area_m2(&ring);
        ring.reverse();
        let backward = ring_area_m2(&ring);
        assert!((forward - backward).abs() < 1e-6);
        assert!(forward > 0.0);
    }

    #[test]
    fn collinear_ring_has_zero_area() {
        let ring = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(1.0, 0.0),
            GeoPoint::new(2.0, 0.0),
            GeoPoint::new(0.0, 0.0),
        ];
        assert!(ring_area_m2(&ring).abs() < 1e-6);
    }

    #[test]
    fn density_guards_empty_inputs() {
        assert_eq!(point_density(0, 100.0), None);
        assert_eq!(point_density(5, 0.0), None);
        assert_eq!(point_density(5, 100.0), Some(0.05));
    }

    fn coord() -> impl Strategy<Value = GeoPoint> {
        (-180.0f64..=180.0, -90.0f64..=90.0).prop_map(|(lon, lat)| GeoPoint::new(lon, lat))
    }

    proptest! {
        /// Distance does not depend on argument order.
        #[test]
        fn distance_is_symmetric(a in coord(), b in coord()) {
            let ab = distance_meters(a, b);
            let ba = distance_meters(b, a);
            prop_assert!((ab - ba).abs() <= 1e-6 * ab.max(1.0));
        }

        /// Distance never exceeds half the circumference.
        #[test]
        fn distance_is_bounded(a in coord(), b in coord()) {
            let d = distance_meters(a, b);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= std::f64::consts::PI * MEAN_EARTH_RADIUS_M + 1e-6);
        }
    }
}
