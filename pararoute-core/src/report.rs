//! Cumulative-distance reporting: for each turnpoint index, the prefix
//! centre-route distance and the prefix optimized-route distance (§4.8).

use pararoute_common::Result;

use crate::centre::centre_distance;
use crate::config::OptimizationConfig;
use crate::refine::optimize;
use crate::turnpoint::Turnpoint;

/// One row of the cumulative report: kilometres travelled through the
/// centre route and through the optimized route, up to and including this
/// turnpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CumulativeRow {
    pub centre_km: f64,
    pub optimized_km: f64,
}

/// Produces one [`CumulativeRow`] per turnpoint. The optimized figure at
/// index `i` is the full iteratively-refined optimum through `T_0..=T_i`
/// treated as its own task, not a prefix sum of the full-task optimum:
/// prefix-optimality does not hold for the beam-pruned DP search.
pub fn cumulative(turnpoints: &[Turnpoint], config: &OptimizationConfig) -> Result<Vec<CumulativeRow>> {
    config.validate()?;
    let mut rows = Vec::with_capacity(turnpoints.len());
    for i in 0..turnpoints.len() {
        let prefix = &turnpoints[..=i];
        let centre_km = centre_distance(prefix) / 1000.0;
        let optimized_km = optimize(prefix, config)?.distance_m / 1000.0;
        rows.push(CumulativeRow { centre_km, optimized_km });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pararoute_common::Point;

    #[test]
    fn first_row_is_always_zero() {
        let ts = vec![
            Turnpoint::cylinder(Point::new(46.0, 7.0), 0.0),
            Turnpoint::cylinder(Point::new(46.1, 7.1), 400.0),
        ];
        let rows = cumulative(&ts, &OptimizationConfig::default()).unwrap();
        assert_relative_eq!(rows[0].centre_km, 0.0);
        assert_relative_eq!(rows[0].optimized_km, 0.0);
    }

    #[test]
    fn optimized_never_exceeds_centre_per_row() {
        let ts = vec![
            Turnpoint::cylinder(Point::new(46.0, 7.0), 0.0),
            Turnpoint::cylinder(Point::new(46.0, 7.1), 5000.0),
            Turnpoint::cylinder(Point::new(46.0, 7.2), 0.0),
        ];
        let rows = cumulative(&ts, &OptimizationConfig::default()).unwrap();
        for row in rows {
            assert!(row.optimized_km <= row.centre_km + 1e-6);
        }
    }

    #[test]
    fn row_count_matches_turnpoint_count() {
        let ts = vec![
            Turnpoint::cylinder(Point::new(46.0, 7.0), 0.0),
            Turnpoint::cylinder(Point::new(46.05, 7.05), 400.0),
            Turnpoint::cylinder(Point::new(46.1, 7.1), 0.0),
        ];
        let rows = cumulative(&ts, &OptimizationConfig::default()).unwrap();
        assert_eq!(rows.len(), ts.len());
    }
}
