//! Shared types for the pararoute task optimizer.
//!
//! This crate is the leaf of the workspace dependency graph: it defines the
//! geographic point type and the error kinds that every other crate in the
//! workspace propagates, and depends on nothing beyond `thiserror`/`serde`.

use serde::{Deserialize, Serialize};

/// A point on the WGS84 ellipsoid, in degrees.
///
/// Latitude must be in `[-90, 90]` and longitude in `(-180, 180]`. Construction
/// does not validate these bounds: geodesy operations are total on sane inputs,
/// and callers passing out-of-range coordinates are violating the contract (see
/// the crate-level error handling notes) rather than triggering a recoverable
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub lat: f64,
    pub lon: f64,
}

impl Point {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Canonicalised integer key for this point, used wherever a point needs
    /// to serve as a deterministic map key (DP stage candidates). Scales both
    /// coordinates by 1e7 and rounds, which resolves sub-millimetre ULP noise
    /// between two points that should compare equal.
    pub fn canonical_key(&self) -> (i64, i64) {
        ((self.lat * 1.0e7).round() as i64, (self.lon * 1.0e7).round() as i64)
    }
}

/// Error kinds surfaced by the pararoute core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Fewer than one turnpoint supplied where at least one is required.
    #[error("at least one turnpoint is required")]
    EmptyTurnpoints,

    /// Fewer than two turnpoints supplied to an operation that distinguishes
    /// that case from the general empty-input case (`optimize` itself does
    /// not raise this; it returns a degenerate zero-distance route instead).
    #[error("at least two turnpoints are required for a route")]
    DegenerateTask,

    /// A goal line turnpoint was found at a non-terminal index, or carried a
    /// non-positive line length.
    #[error("invalid goal line: {0}")]
    InvalidGoalLine(String),

    /// `angle_step_deg` outside `[1, 90]`, `beam_width` < 1, or `iterations` < 1.
    #[error("invalid optimization config: {0}")]
    InvalidConfig(String),

    /// Caller-initiated cancellation between DP stages or refinement passes.
    #[error("optimization cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, Error>;
