//! Bridges a foreign/duck-typed task shape ([`RawTask`]) into the core's
//! concrete [`Turnpoint`] sequence. This is the single place in the crate
//! that knows about the upstream JSON shape; everything downstream (DP
//! search, refinement, SSS helper, reporter) only ever sees [`Turnpoint`].

use pararoute_common::{Error, Point, Result};
use tracing::debug;

use crate::ingest::{RawGoalType, RawTask, RawTurnpointKind};
use crate::turnpoint::Turnpoint;

/// A turnpoint alongside the role (takeoff/SSS/ESS/none) the upstream task
/// tagged it with. The DP search and reporter never look at `source_kind`;
/// only [`crate::sss::sss_entry`] callers use it to locate the SSS leg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdaptedTurnpoint {
    pub turnpoint: Turnpoint,
    pub source_kind: RawTurnpointKind,
}

/// Converts a [`RawTask`] into the sequence of [`AdaptedTurnpoint`]s the
/// rest of the crate operates on, per §4.3.
pub fn adapt(raw_task: &RawTask) -> Result<Vec<AdaptedTurnpoint>> {
    if raw_task.turnpoints.is_empty() {
        return Err(Error::EmptyTurnpoints);
    }

    debug!(
        turnpoint_count = raw_task.turnpoints.len(),
        goal_type = ?raw_task.goal_type,
        "adapting raw task"
    );

    let mut adapted: Vec<AdaptedTurnpoint> = raw_task
        .turnpoints
        .iter()
        .map(|rt| AdaptedTurnpoint {
            turnpoint: Turnpoint::cylinder(Point::new(rt.waypoint.lat, rt.waypoint.lon), rt.radius_m),
            source_kind: rt.kind,
        })
        .collect();

    if raw_task.goal_type == Some(RawGoalType::Line) {
        let last = adapted.last_mut().expect("checked non-empty above");
        let last_radius = last.turnpoint.radius_m;
        let line_length_m = raw_task.line_length_m.unwrap_or_else(|| {
            if last_radius > 0.0 {
                2.0 * last_radius
            } else {
                400.0
            }
        });
        last.turnpoint = Turnpoint::goal_line(last.turnpoint.centre, line_length_m);
    }

    Ok(adapted)
}
