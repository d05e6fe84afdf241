//! Scan geometry configuration.

use std::error::Error;
use std::fmt;

use homestead_core::{HeightRange, DEFAULT_REGION_SIZE};

/// Geometry of a region scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanConfig {
    /// Region side length in blocks. Default: 400.
    pub region_size: u32,
    /// One above the highest world layer. Default: 256.
    pub max_height: i32,
    /// Layers at or below this y never count toward a scan. Default: 41.
    pub depth_floor: i32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            region_size: DEFAULT_REGION_SIZE,
            max_height: 256,
            depth_floor: 41,
        }
    }
}

impl ScanConfig {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ScanConfigError> {
        if self.region_size == 0 {
            return Err(ScanConfigError::ZeroRegionSize);
        }
        if self.depth_floor >= self.max_height {
            return Err(ScanConfigError::FloorAboveCeiling {
                depth_floor: self.depth_floor,
                max_height: self.max_height,
            });
        }
        Ok(())
    }

    /// The layers worth capturing: the floor itself (as boundary) up to
    /// the top of the world.
    pub fn sample_range(&self) -> HeightRange {
        HeightRange {
            min: self.depth_floor,
            max: self.max_height,
        }
    }
}

/// Errors detected by [`ScanConfig::validate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanConfigError {
    /// `region_size` is zero.
    ZeroRegionSize,
    /// The depth floor is not below the top of the world.
    FloorAboveCeiling {
        /// Configured floor.
        depth_floor: i32,
        /// Configured ceiling.
        max_height: i32,
    },
}

impl fmt::Display for ScanConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroRegionSize => write!(f, "region_size must be at least 1"),
            Self::FloorAboveCeiling {
                depth_floor,
                max_height,
            } => write!(
                f,
                "depth_floor ({depth_floor}) must be below max_height ({max_height})"
            ),
        }
    }
}

impl Error for ScanConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = ScanConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.sample_range(), HeightRange { min: 41, max: 256 });
    }

    #[test]
    fn rejects_zero_region() {
        let config = ScanConfig {
            region_size: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ScanConfigError::ZeroRegionSize));
    }

    #[test]
    fn rejects_floor_at_ceiling() {
        let config = ScanConfig {
            depth_floor: 256,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ScanConfigError::FloorAboveCeiling { .. })
        ));
    }
}
