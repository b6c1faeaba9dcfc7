//! Tunable constants of the association engine.

use crate::catalog::DEFAULT_DENSITY_RADIUS_DEG;
use crate::errors::{AssocError, AssocResult, InvalidArgumentKind};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Multiple of the error major axis used as the candidate search radius.
pub const DEFAULT_SEARCH_SIGMA: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Radius of the region used for the chance-coincidence density, in degrees.
    pub density_radius_deg: f64,
    /// Candidate cut, in units of the error major axis.
    pub search_sigma: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            density_radius_deg: DEFAULT_DENSITY_RADIUS_DEG,
            search_sigma: DEFAULT_SEARCH_SIGMA,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_density_radius(mut self, radius_deg: f64) -> Self {
        self.density_radius_deg = radius_deg;
        self
    }

    pub fn with_search_sigma(mut self, sigma: f64) -> Self {
        self.search_sigma = sigma;
        self
    }

    pub fn validate(&self) -> AssocResult<()> {
        if !(self.density_radius_deg.is_finite() && self.density_radius_deg > 0.0) {
            return Err(AssocError::invalid_argument(
                InvalidArgumentKind::Radius,
                format!(
                    "density radius {} must be finite and positive",
                    self.density_radius_deg
                ),
            ));
        }
        if !(self.search_sigma.is_finite() && self.search_sigma > 0.0) {
            return Err(AssocError::invalid_argument(
                InvalidArgumentKind::Radius,
                format!(
                    "search sigma {} must be finite and positive",
                    self.search_sigma
                ),
            ));
        }
        Ok(())
    }
}
