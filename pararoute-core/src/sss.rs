//! SSS (Start of Speed Section) entry-point helper. A reporting-only
//! operation: the SSS turnpoint participates in the DP search exactly like
//! any other cylinder, and this helper is invoked afterwards to surface the
//! "best SSS crossing" as a separate datum (§4.7).

use pararoute_common::Point;
use pararoute_geo::distance;
use tracing::debug;

use crate::turnpoint::Turnpoint;

/// Returns the point on `sss_turnpoint`'s perimeter minimising
/// `distance(takeoff_centre, p) + distance(p, first_touch_after_sss)`,
/// sampled at `angle_step_deg` resolution.
pub fn sss_entry(
    takeoff_centre: Point,
    sss_turnpoint: &Turnpoint,
    first_touch_after_sss: Point,
    angle_step_deg: u32,
) -> Point {
    let perimeter = sss_turnpoint.perimeter_samples(angle_step_deg);
    debug!(candidates = perimeter.len(), "sss entry search");

    perimeter
        .into_iter()
        .min_by(|a, b| {
            let cost_a = distance(takeoff_centre, *a) + distance(*a, first_touch_after_sss);
            let cost_b = distance(takeoff_centre, *b) + distance(*b, first_touch_after_sss);
            cost_a.partial_cmp(&cost_b).unwrap()
        })
        .unwrap_or(sss_turnpoint.centre)
}
