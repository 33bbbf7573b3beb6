//! Iterative refinement: repeated DP passes where each pass's look-ahead
//! targets come from the previous pass's own touch points, per §4.6.

use pararoute_common::{Error, Point, Result};
use tracing::{debug, info};

use crate::config::OptimizationConfig;
use crate::dp::{dp_pass, PassResult};
use crate::turnpoint::{validate_sequence, Turnpoint};

/// Result of [`optimize`]: the optimized route length and its coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizeResult {
    pub distance_m: f64,
    pub route: Vec<Point>,
}

/// Computes the shortest valid route through `turnpoints`, iterating the
/// DP search per §4.6 until a pass fails to improve on the best seen so far.
pub fn optimize(turnpoints: &[Turnpoint], config: &OptimizationConfig) -> Result<OptimizeResult> {
    config.validate()?;
    if turnpoints.is_empty() {
        return Err(Error::EmptyTurnpoints);
    }
    validate_sequence(turnpoints)?;

    if turnpoints.len() < 2 {
        return Ok(OptimizeResult {
            distance_m: 0.0,
            route: turnpoints.iter().map(|t| t.centre).collect(),
        });
    }

    let pass0 = dp_pass(turnpoints, None, config);
    info!(iteration = 0, distance_m = pass0.distance_m, "refinement pass");

    let mut best = pass0;
    let mut previous_route = best.route.clone();

    for k in 1..config.iterations {
        let pass = dp_pass(turnpoints, Some(&previous_route), config);
        let improved = pass.distance_m < best.distance_m;
        debug!(
            iteration = k,
            distance_m = pass.distance_m,
            improved,
            "refinement pass"
        );
        previous_route = pass.route.clone();
        if !improved {
            break;
        }
        best = pass;
    }

    info!(final_distance_m = best.distance_m, "refinement complete");

    Ok(OptimizeResult {
        distance_m: best.distance_m,
        route: best.route,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pararoute_common::Point;

    #[test]
    fn empty_turnpoints_is_an_error() {
        let result = optimize(&[], &OptimizationConfig::default());
        assert!(matches!(result, Err(Error::EmptyTurnpoints)));
    }

    #[test]
    fn single_turnpoint_is_degenerate_not_an_error() {
        let ts = vec![Turnpoint::cylinder(Point::new(46.0, 7.0), 400.0)];
        let result = optimize(&ts, &OptimizationConfig::default()).unwrap();
        assert_relative_eq!(result.distance_m, 0.0);
        assert_eq!(result.route, vec![Point::new(46.0, 7.0)]);
    }

    #[test]
    fn scenario_s1_two_points_no_cylinders() {
        let ts = vec![
            Turnpoint::cylinder(Point::new(46.0, 7.0), 0.0),
            Turnpoint::cylinder(Point::new(46.01, 7.0), 0.0),
        ];
        let result = optimize(&ts, &OptimizationConfig::default()).unwrap();
        assert_relative_eq!(result.distance_m, 1111.949, epsilon = 0.5);
        assert_eq!(result.route, vec![ts[0].centre, ts[1].centre]);
    }

    #[test]
    fn scenario_s2_shortcut_via_large_cylinder() {
        let ts = vec![
            Turnpoint::cylinder(Point::new(46.0, 7.0), 0.0),
            Turnpoint::cylinder(Point::new(46.0, 7.1), 5000.0),
            Turnpoint::cylinder(Point::new(46.0, 7.2), 0.0),
        ];
        let centre = crate::centre::centre_distance(&ts);
        let result = optimize(&ts, &OptimizationConfig::default()).unwrap();
        assert!(centre > 15_000.0 && centre < 16_000.0, "centre = {centre}");
        assert!(result.distance_m <= 5_484.0 + 50.0, "optimized = {}", result.distance_m);
    }

    #[test]
    fn scenario_s3_goal_line_on_meridian_equals_centre_distance() {
        let ts = vec![
            Turnpoint::cylinder(Point::new(46.0, 7.0), 0.0),
            Turnpoint::goal_line(Point::new(46.01, 7.0), 800.0),
        ];
        let centre = crate::centre::centre_distance(&ts);
        let result = optimize(&ts, &OptimizationConfig::default()).unwrap();
        assert_relative_eq!(result.distance_m, centre, epsilon = 1.0);
    }

    #[test]
    fn scenario_s5_wider_beam_never_worse() {
        let ts = vec![
            Turnpoint::cylinder(Point::new(46.0, 7.0), 0.0),
            Turnpoint::cylinder(Point::new(46.05, 7.05), 3000.0),
            Turnpoint::cylinder(Point::new(46.1, 7.1), 2000.0),
            Turnpoint::cylinder(Point::new(46.15, 7.05), 2500.0),
            Turnpoint::cylinder(Point::new(46.2, 7.0), 0.0),
        ];
        let narrow = optimize(
            &ts,
            &OptimizationConfig {
                beam_width: 5,
                ..OptimizationConfig::default()
            },
        )
        .unwrap();
        let wide = optimize(
            &ts,
            &OptimizationConfig {
                beam_width: 20,
                ..OptimizationConfig::default()
            },
        )
        .unwrap();
        assert!(wide.distance_m <= narrow.distance_m + 1e-6);
    }

    #[test]
    fn zero_radii_collapses_to_centre_distance() {
        let ts = vec![
            Turnpoint::cylinder(Point::new(46.0, 7.0), 0.0),
            Turnpoint::cylinder(Point::new(46.05, 7.05), 0.0),
            Turnpoint::cylinder(Point::new(46.1, 7.1), 0.0),
        ];
        let centre = crate::centre::centre_distance(&ts);
        let result = optimize(&ts, &OptimizationConfig::default()).unwrap();
        assert_relative_eq!(result.distance_m, centre, epsilon = 1e-3);
    }

    #[test]
    fn route_length_sums_to_reported_distance() {
        let ts = vec![
            Turnpoint::cylinder(Point::new(46.0, 7.0), 0.0),
            Turnpoint::cylinder(Point::new(46.05, 7.05), 3000.0),
            Turnpoint::cylinder(Point::new(46.1, 7.0), 0.0),
        ];
        let result = optimize(&ts, &OptimizationConfig::default()).unwrap();
        let summed: f64 = result
            .route
            .windows(2)
            .map(|pair| pararoute_geo::distance(pair[0], pair[1]))
            .sum();
        assert_relative_eq!(summed, result.distance_m, epsilon = 1e-3);
    }

    #[test]
    fn rejects_goal_line_not_at_final_index() {
        let ts = vec![
            Turnpoint::goal_line(Point::new(46.0, 7.0), 800.0),
            Turnpoint::cylinder(Point::new(46.1, 7.1), 400.0),
        ];
        let result = optimize(&ts, &OptimizationConfig::default());
        assert!(matches!(result, Err(Error::InvalidGoalLine(_))));
    }
}
