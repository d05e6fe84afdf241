//! Acceptance policy: is a scanned region habitable?

use std::error::Error;
use std::fmt;

use crate::report::ScanReport;

/// Fixed footprint constant scaled by the density ratio to get the
/// largest tolerated count of placed blocks.
pub const PLACED_BLOCK_FOOTPRINT: u64 = 40_000;

/// Thresholds a region must meet to stay open.
#[derive(Clone, Debug, PartialEq)]
pub struct HabitabilityPolicy {
    /// Minimum weighted ore score. Default: 400.
    pub resource_minimum: u64,
    /// Minimum reachable logs. Default: 200.
    pub wood_minimum: u32,
    /// Tolerated placed-block density, as a multiple of
    /// [`PLACED_BLOCK_FOOTPRINT`]. Default: 1.0.
    pub density_ratio: f64,
}

impl Default for HabitabilityPolicy {
    fn default() -> Self {
        Self {
            resource_minimum: 400,
            wood_minimum: 200,
            density_ratio: 1.0,
        }
    }
}

/// Outcome of applying a [`HabitabilityPolicy`] to a [`ScanReport`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Enough resources and not overbuilt.
    Accepted,
    /// Resource score or wood count below minimum.
    InsufficientResources,
    /// Resources are fine but too many placed blocks.
    Overcrowded,
}

impl Verdict {
    /// Whether the region may stay open.
    pub fn is_accepted(self) -> bool {
        self == Verdict::Accepted
    }

    /// One-line summary for scan logs.
    pub fn summary(self) -> &'static str {
        match self {
            Self::Accepted => "looks good, suitable for new arrivals",
            Self::InsufficientResources => "insufficient near-surface resources",
            Self::Overcrowded => "region seems overcrowded",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.summary())
    }
}

impl HabitabilityPolicy {
    /// Check that the density ratio is usable.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if !self.density_ratio.is_finite() || self.density_ratio < 0.0 {
            return Err(PolicyError::InvalidDensityRatio {
                value: self.density_ratio,
            });
        }
        Ok(())
    }

    /// Largest placed-block count a habitable region may contain.
    pub fn max_placed(&self) -> f64 {
        self.density_ratio * PLACED_BLOCK_FOOTPRINT as f64
    }

    /// Apply all three conditions. Missing resources are reported ahead
    /// of overcrowding when both fail.
    pub fn evaluate(&self, report: &ScanReport) -> Verdict {
        if report.resource_score() < self.resource_minimum || report.wood() < self.wood_minimum {
            Verdict::InsufficientResources
        } else if report.placed() as f64 > self.max_placed() {
            Verdict::Overcrowded
        } else {
            Verdict::Accepted
        }
    }
}

/// Errors detected by [`HabitabilityPolicy::validate`].
#[derive(Clone, Debug, PartialEq)]
pub enum PolicyError {
    /// `density_ratio` is NaN, infinite or negative.
    InvalidDensityRatio {
        /// The rejected value.
        value: f64,
    },
}

impl fmt::Display for PolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDensityRatio { value } => {
                write!(f, "density_ratio must be finite and >= 0, got {value}")
            }
        }
    }
}

impl Error for PolicyError {}
