//! Minimal, serde-deserializable mirror of the upstream task container,
//! scoped to exactly the fields [`crate::adapter::adapt`] consumes. A real
//! upstream task document carries far more (SSS time windows, full task
//! metadata, an earth-model selector); all of that is parsed and discarded
//! upstream of this crate, which only ever sees this subset.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawWaypoint {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RawTurnpointKind {
    Takeoff,
    Sss,
    Ess,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawTurnpoint {
    pub waypoint: RawWaypoint,
    pub radius_m: f64,
    #[serde(default = "default_turnpoint_kind")]
    pub kind: RawTurnpointKind,
}

fn default_turnpoint_kind() -> RawTurnpointKind {
    RawTurnpointKind::None
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RawGoalType {
    Cylinder,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTask {
    pub turnpoints: Vec<RawTurnpoint>,
    #[serde(default)]
    pub goal_type: Option<RawGoalType>,
    #[serde(default)]
    pub line_length_m: Option<f64>,
}
