//! Optimization configuration: beam width, angle step, refinement depth.

use pararoute_common::{Error, Result};
use serde::{Deserialize, Serialize};

/// Tunables for the DP search and iterative refinement.
///
/// Defaults mirror the values a competition-grade route optimizer has
/// settled on in practice: a 10-degree angle step is fine enough that
/// perimeter sampling error is well under a metre for any cylinder radius
/// seen in real tasks, a beam width of 10 keeps stage fan-out bounded
/// without discarding the candidates that matter, and 5 refinement
/// iterations is enough for gains to vanish (see invariant 2 in the
/// module-level tests).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizationConfig {
    pub angle_step_deg: u32,
    pub beam_width: usize,
    pub iterations: u32,
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self {
            angle_step_deg: 10,
            beam_width: 10,
            iterations: 5,
        }
    }
}

impl OptimizationConfig {
    /// Validates the configuration against §3's bounds, returning
    /// `Error::InvalidConfig` with a human-readable reason on failure.
    pub fn validate(&self) -> Result<()> {
        if self.angle_step_deg < 1 || self.angle_step_deg > 90 {
            return Err(Error::InvalidConfig(format!(
                "angle_step_deg must be in [1, 90], got {}",
                self.angle_step_deg
            )));
        }
        if self.beam_width < 1 {
            return Err(Error::InvalidConfig(format!(
                "beam_width must be >= 1, got {}",
                self.beam_width
            )));
        }
        if self.iterations < 1 {
            return Err(Error::InvalidConfig(format!(
                "iterations must be >= 1, got {}",
                self.iterations
            )));
        }
        Ok(())
    }
}
