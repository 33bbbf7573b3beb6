//! WGS84 geodesic kernel: direct and inverse problems on the ellipsoid.
//!
//! Delegates to [`geographiclib_rs`], a pure-Rust port of Karney's
//! GeographicLib algorithms (the same solver family the `geo` crate's own
//! `Geodesic` trait uses) rather than hand-rolling a Vincenty iteration.
//! Every function here is pure and stack-only: no allocation, no I/O, no
//! shared state, so callers may invoke them freely from multiple threads.

use geographiclib_rs::{DirectGeodesic, Geodesic, InverseGeodesic};
use pararoute_common::Point;

/// Result of the inverse geodesic problem: the azimuth leaving `p1` towards
/// `p2`, the azimuth arriving at `p2` as seen looking back towards `p1`, and
/// the distance between them in metres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inverse {
    pub forward_azimuth_deg: f64,
    pub back_azimuth_deg: f64,
    pub distance_m: f64,
}

/// Result of the direct geodesic problem: the destination point and the
/// azimuth looking back from it towards the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Direct {
    pub point: Point,
    pub back_azimuth_deg: f64,
}

fn geodesic() -> Geodesic {
    Geodesic::wgs84()
}

/// Normalises an azimuth to `[0, 360)`, mapping non-finite input (which
/// GeographicLib can return for coincident points) to 0.
fn normalize_azimuth(deg: f64) -> f64 {
    if !deg.is_finite() {
        return 0.0;
    }
    let wrapped = deg % 360.0;
    if wrapped < 0.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Solves the inverse geodesic problem between two points.
///
/// Coincident points return distance 0 with azimuth 0. Antipodal points
/// return the ellipsoidal antipodal distance; GeographicLib's azimuth for
/// the antipodal case is well-defined along the meridian of approach, but
/// degenerates to 0 when the two points coincide exactly.
pub fn inverse(p1: Point, p2: Point) -> Inverse {
    let (distance_m, azi1, azi2): (f64, f64, f64) =
        geodesic().inverse(p1.lat, p1.lon, p2.lat, p2.lon);
    Inverse {
        forward_azimuth_deg: normalize_azimuth(azi1),
        back_azimuth_deg: normalize_azimuth(azi2 + 180.0),
        distance_m: distance_m.max(0.0),
    }
}

/// Solves the direct geodesic problem: walk `distance_m` metres from `p`
/// along `azimuth_deg` (clockwise from true north).
pub fn direct(p: Point, azimuth_deg: f64, distance_m: f64) -> Direct {
    let (lat2, lon2, azi2): (f64, f64, f64) =
        geodesic().direct(p.lat, p.lon, azimuth_deg, distance_m);
    Direct {
        point: Point::new(lat2, lon2),
        back_azimuth_deg: normalize_azimuth(azi2 + 180.0),
    }
}

/// Shorthand for `inverse(p1, p2).distance_m`.
pub fn distance(p1: Point, p2: Point) -> f64 {
    inverse(p1, p2).distance_m
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn distance_matches_known_wgs84_value() {
        // One hundredth of a degree of latitude near 46N, per spec scenario S1.
        let p1 = Point::new(46.0, 7.0);
        let p2 = Point::new(46.01, 7.0);
        assert_relative_eq!(distance(p1, p2), 1111.949, epsilon = 0.5);
    }

    #[test]
    fn coincident_points_have_zero_distance_and_zero_azimuth() {
        let p = Point::new(12.5, -45.25);
        let result = inverse(p, p);
        assert_relative_eq!(result.distance_m, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn direct_and_inverse_round_trip() {
        let p1 = Point::new(46.0, 7.0);
        let az = 37.0;
        let dist = 12_345.0;
        let d = direct(p1, az, dist);
        let inv = inverse(p1, d.point);
        assert_relative_eq!(inv.distance_m, dist, epsilon = 1e-3);
        assert_relative_eq!(inv.forward_azimuth_deg, az, epsilon = 1e-6);
    }

    #[test]
    fn azimuths_are_normalized_to_0_360() {
        let p1 = Point::new(46.0, 7.0);
        let p2 = Point::new(45.99, 7.0);
        let result = inverse(p1, p2);
        assert!((0.0..360.0).contains(&result.forward_azimuth_deg));
        assert!((0.0..360.0).contains(&result.back_azimuth_deg));
        // Heading due south should resolve to ~180 degrees.
        assert_relative_eq!(result.forward_azimuth_deg, 180.0, epsilon = 0.1);
    }

    #[test]
    fn antipodal_points_do_not_panic() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(0.0, 180.0);
        let result = inverse(p1, p2);
        assert!(result.distance_m > 0.0);
        assert!(result.distance_m < 20_100_000.0);
    }
}
