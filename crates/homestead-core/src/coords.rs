//! Region grid coordinates and their relation to world positions.
//!
//! The world is partitioned into square regions of `region_size` blocks
//! per side. Region `(0, 0)` covers blocks `[0, size)` on both axes;
//! negative regions extend south-west with floor-division semantics, so
//! block `-1` belongs to region `-1`, never to region `0`.

use std::fmt;
use std::str::FromStr;

use crate::error::FormatError;

/// Side length of a region in blocks when the host does not configure one.
pub const DEFAULT_REGION_SIZE: u32 = 400;

/// Integer `(x, z)` identifier of one region cell.
///
/// Immutable value type: equality and hashing are by value, and the
/// canonical text form `"x z"` is the durable key used by the region
/// store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionCoords {
    /// Region column along the world x axis.
    pub x: i32,
    /// Region row along the world z axis.
    pub z: i32,
}

/// An absolute horizontal block position in world units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WorldPosition {
    /// Block x.
    pub x: i64,
    /// Block z.
    pub z: i64,
}

/// The horizontal block rectangle covered by one region.
///
/// `min` is inclusive, `min + size` is exclusive on both axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Footprint {
    /// Smallest block x inside the region.
    pub min_x: i64,
    /// Smallest block z inside the region.
    pub min_z: i64,
    /// Side length in blocks.
    pub size: u32,
}

impl Footprint {
    /// Whether the block column at `(x, z)` lies inside this footprint.
    pub fn contains(&self, x: i64, z: i64) -> bool {
        let size = self.size as i64;
        x >= self.min_x && x < self.min_x + size && z >= self.min_z && z < self.min_z + size
    }

    /// Number of block columns covered.
    pub fn area(&self) -> u64 {
        (self.size as u64) * (self.size as u64)
    }
}

impl RegionCoords {
    /// The grid origin, where the spiral allocation starts.
    pub const ORIGIN: RegionCoords = RegionCoords { x: 0, z: 0 };

    /// Construct from two integers. Always succeeds.
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// The region containing the integer block column `(x, z)`.
    ///
    /// Uses Euclidean division, so negative blocks land in the
    /// south-west neighbour rather than being truncated toward zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use homestead_core::RegionCoords;
    ///
    /// assert_eq!(RegionCoords::containing_block(-1, 0, 100), RegionCoords::new(-1, 0));
    /// assert_eq!(RegionCoords::containing_block(99, 100, 100), RegionCoords::new(0, 1));
    /// ```
    pub fn containing_block(x: i64, z: i64, region_size: u32) -> Self {
        let size = region_size.max(1) as i64;
        Self {
            x: x.div_euclid(size) as i32,
            z: z.div_euclid(size) as i32,
        }
    }

    /// The region containing a floating-point world position.
    ///
    /// The position is floored to its block first, so `-0.5` is block
    /// `-1` and belongs to region `-1`.
    pub fn from_world_position(x: f64, z: f64, region_size: u32) -> Self {
        Self::containing_block(x.floor() as i64, z.floor() as i64, region_size)
    }

    /// The block rectangle this region covers.
    pub fn footprint(&self, region_size: u32) -> Footprint {
        let size = region_size as i64;
        Footprint {
            min_x: self.x as i64 * size,
            min_z: self.z as i64 * size,
            size: region_size,
        }
    }

    /// The block column at the middle of this region.
    ///
    /// Pure geometry: no world read is needed to know where a region's
    /// marker belongs.
    pub fn center(&self, region_size: u32) -> WorldPosition {
        let size = region_size as i64;
        WorldPosition {
            x: self.x as i64 * size + size / 2,
            z: self.z as i64 * size + size / 2,
        }
    }
}

impl fmt::Display for RegionCoords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.x, self.z)
    }
}

impl FromStr for RegionCoords {
    type Err = FormatError;

    /// Parse the canonical `"x z"` form produced by `Display`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split_whitespace().collect();
        if fields.len() != 2 {
            return Err(FormatError::WrongFieldCount {
                found: fields.len(),
            });
        }
        let parse = |field: &'static str, value: &str| {
            value
                .parse::<i32>()
                .map_err(|_| FormatError::InvalidInteger {
                    field,
                    value: value.to_string(),
                })
        };
        Ok(Self {
            x: parse("x", fields[0])?,
            z: parse("z", fields[1])?,
        })
    }
}

impl From<(i32, i32)> for RegionCoords {
    fn from((x, z): (i32, i32)) -> Self {
        Self { x, z }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn display_is_space_separated() {
        assert_eq!(RegionCoords::new(3, -7).to_string(), "3 -7");
    }

    #[test]
    fn parse_canonical_form() {
        assert_eq!("12 -4".parse::<RegionCoords>(), Ok(RegionCoords::new(12, -4)));
    }

    #[test]
    fn parse_rejects_wrong_field_count() {
        assert_eq!(
            "1".parse::<RegionCoords>(),
            Err(FormatError::WrongFieldCount { found: 1 })
        );
        assert_eq!(
            "1 2 3".parse::<RegionCoords>(),
            Err(FormatError::WrongFieldCount { found: 3 })
        );
        assert_eq!(
            "".parse::<RegionCoords>(),
            Err(FormatError::WrongFieldCount { found: 0 })
        );
    }

    #[test]
    fn parse_rejects_non_integers() {
        assert!(matches!(
            "mountain 2".parse::<RegionCoords>(),
            Err(FormatError::InvalidInteger { field: "x", .. })
        ));
        assert!(matches!(
            "1 2.5".parse::<RegionCoords>(),
            Err(FormatError::InvalidInteger { field: "z", .. })
        ));
    }

    // ── World position derivation ───────────────────────────────

    #[test]
    fn negative_positions_floor_toward_south_west() {
        assert_eq!(
            RegionCoords::from_world_position(-1.0, -1.0, 100),
            RegionCoords::new(-1, -1)
        );
        assert_eq!(
            RegionCoords::from_world_position(-0.25, 0.0, 100),
            RegionCoords::new(-1, 0)
        );
        assert_eq!(
            RegionCoords::from_world_position(-100.0, 99.9, 100),
            RegionCoords::new(-1, 0)
        );
        assert_eq!(
            RegionCoords::from_world_position(-100.5, 100.0, 100),
            RegionCoords::new(-2, 1)
        );
    }

    #[test]
    fn center_is_middle_of_footprint() {
        let c = RegionCoords::new(-1, 2);
        assert_eq!(c.center(400), WorldPosition { x: -200, z: 1000 });
        let fp = c.footprint(400);
        assert_eq!((fp.min_x, fp.min_z), (-400, 800));
        assert!(fp.contains(-200, 1000));
        assert!(!fp.contains(0, 1000));
        assert_eq!(fp.area(), 160_000);
    }

    // ── Property tests ──────────────────────────────────────────

    proptest! {
        #[test]
        fn canonical_string_round_trips(x in any::<i32>(), z in any::<i32>()) {
            let c = RegionCoords::new(x, z);
            prop_assert_eq!(c.to_string().parse::<RegionCoords>(), Ok(c));
        }

        #[test]
        fn containing_block_matches_footprint(
            x in -1_000_000i64..1_000_000,
            z in -1_000_000i64..1_000_000,
            size in 1u32..1000,
        ) {
            let region = RegionCoords::containing_block(x, z, size);
            prop_assert!(region.footprint(size).contains(x, z));
            prop_assert!(region.footprint(size).contains(region.center(size).x, region.center(size).z));
        }
    }
}
