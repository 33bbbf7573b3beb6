//! Turnpoint value type: cylinders and goal lines, and the touch-point
//! geometry queries the DP search and SSS helper build on.

use pararoute_common::{Error, Point, Result};
use pararoute_geo::{direct, distance, inverse};

/// Shape of a turnpoint's boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnpointKind {
    Cylinder,
    GoalLine,
}

/// An immutable turnpoint: a cylinder of given radius, or (for the final
/// turnpoint only) a goal line of given length through the centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Turnpoint {
    pub centre: Point,
    pub radius_m: f64,
    pub kind: TurnpointKind,
    pub line_length_m: Option<f64>,
}

impl Turnpoint {
    pub fn cylinder(centre: Point, radius_m: f64) -> Self {
        Self {
            centre,
            radius_m,
            kind: TurnpointKind::Cylinder,
            line_length_m: None,
        }
    }

    pub fn goal_line(centre: Point, line_length_m: f64) -> Self {
        Self {
            centre,
            radius_m: 0.0,
            kind: TurnpointKind::GoalLine,
            line_length_m: Some(line_length_m),
        }
    }

    /// Perimeter samples at `step_deg` resolution, for reporting and for
    /// brute-force checks. The DP search itself calls [`optimal_touch`]
    /// directly rather than scanning this list, but it is useful for tests
    /// and for any caller that wants to visualise the cylinder boundary.
    pub fn perimeter_samples(&self, step_deg: u32) -> Vec<Point> {
        match self.kind {
            TurnpointKind::GoalLine => vec![self.centre],
            TurnpointKind::Cylinder if self.radius_m <= 0.0 => vec![self.centre],
            TurnpointKind::Cylinder => {
                let step = step_deg.max(1) as f64;
                let mut az = 0.0;
                let mut samples = Vec::new();
                while az < 360.0 {
                    samples.push(direct(self.centre, az, self.radius_m).point);
                    az += step;
                }
                samples
            }
        }
    }

    /// The point on this turnpoint's boundary minimising the two-leg
    /// distance `distance(prev, p) + distance(p, next)`, per §4.2.
    ///
    /// `next` is ignored for goal lines: the route terminates there, so
    /// there is no successor leg to account for.
    pub fn optimal_touch(&self, prev: Point, next: Point, angle_step_deg: u32) -> Point {
        match self.kind {
            TurnpointKind::Cylinder if self.radius_m <= 0.0 => self.centre,
            TurnpointKind::Cylinder => self.optimal_cylinder_touch(prev, next, angle_step_deg),
            TurnpointKind::GoalLine => self.optimal_goal_line_touch(prev),
        }
    }

    fn optimal_cylinder_touch(&self, prev: Point, next: Point, angle_step_deg: u32) -> Point {
        let cost = |az: f64| {
            let p = direct(self.centre, az, self.radius_m).point;
            distance(prev, p) + distance(p, next)
        };

        // Coarse scan at the caller's step, then golden-section refine the
        // best bracket down to 0.01 degrees, per §4.2's tolerance.
        let step = (angle_step_deg.max(1) as f64).min(90.0);
        let mut best_az = 0.0;
        let mut best_cost = f64::INFINITY;
        let mut az = 0.0;
        while az < 360.0 {
            let c = cost(az);
            if c < best_cost {
                best_cost = c;
                best_az = az;
            }
            az += step;
        }

        let lo = best_az - step;
        let hi = best_az + step;
        let refined = golden_section_min(lo, hi, 0.01, cost);
        let normalized = refined.rem_euclid(360.0);
        direct(self.centre, normalized, self.radius_m).point
    }

    fn optimal_goal_line_touch(&self, prev: Point) -> Point {
        let length = self.line_length_m.unwrap_or(0.0).max(0.0);
        if length <= 0.0 {
            return self.centre;
        }
        let approach = inverse(prev, self.centre).forward_azimuth_deg;
        let e1 = direct(self.centre, approach + 90.0, length / 2.0).point;
        let e2 = direct(self.centre, approach - 90.0, length / 2.0).point;
        let e1_to_e2_azimuth = inverse(e1, e2).forward_azimuth_deg;
        let e1_to_e2_len = distance(e1, e2);

        // Perpendicular foot of prev onto the chord, clamped to [e1, e2].
        let point_at = |t: f64| -> Point {
            direct(e1, e1_to_e2_azimuth, e1_to_e2_len * t).point
        };
        let leg_distance = |t: f64| distance(prev, point_at(t));

        let best_t = golden_section_min(0.0, 1.0, 1e-4, leg_distance);
        point_at(best_t.clamp(0.0, 1.0))
    }
}

/// Validates that GOAL_LINE turnpoints only ever occur as the final entry
/// and carry a positive line length, per §4.5's edge-case rule. Called once
/// by every entry point that walks a turnpoint sequence (`optimize`,
/// `cumulative`) before touching the DP search.
pub fn validate_sequence(turnpoints: &[Turnpoint]) -> Result<()> {
    let n = turnpoints.len();
    for (i, t) in turnpoints.iter().enumerate() {
        if t.kind == TurnpointKind::GoalLine {
            if i != n - 1 {
                return Err(Error::InvalidGoalLine(format!(
                    "goal line at index {i} of {n}, must be the final turnpoint"
                )));
            }
            if t.line_length_m.unwrap_or(0.0) <= 0.0 {
                return Err(Error::InvalidGoalLine(
                    "goal line must carry a positive line_length_m".to_string(),
                ));
            }
        }
    }
    Ok(())
}

/// Golden-section search for the minimum of a unimodal-ish scalar function
/// over `[lo, hi]`, to within `tol`. Falls back gracefully on a non-unimodal
/// cost by still returning *a* local minimum found within the bracket,
/// which is all §4.2's tolerance requires.
fn golden_section_min(lo: f64, hi: f64, tol: f64, f: impl Fn(f64) -> f64) -> f64 {
    let gr = 0.618_033_988_749_895;
    let mut a = lo;
    let mut b = hi;
    let mut c = b - gr * (b - a);
    let mut d = a + gr * (b - a);
    let mut fc = f(c);
    let mut fd = f(d);
    while (b - a).abs() > tol {
        if fc < fd {
            b = d;
            d = c;
            fd = fc;
            c = b - gr * (b - a);
            fc = f(c);
        } else {
            a = c;
            c = d;
            fc = fd;
            d = a + gr * (b - a);
            fd = f(d);
        }
    }
    (a + b) / 2.0
}
