//! Immutable terrain snapshots and the read-only sampling seam.
//!
//! A [`TerrainSnapshot`] is a dense `width × height × depth` grid of
//! [`BlockKind`] samples covering one region's footprint between two
//! heights. It is captured on the owning thread through a
//! [`TerrainSource`] and then moved, whole, to a scan worker.

use std::error::Error;
use std::fmt;

use crate::block::BlockKind;
use crate::coords::Footprint;

/// Half-open vertical sampling range `[min, max)` in world y.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeightRange {
    /// Lowest sampled layer (inclusive).
    pub min: i32,
    /// One above the highest sampled layer (exclusive).
    pub max: i32,
}

impl HeightRange {
    /// Number of sampled layers; zero for an inverted range.
    pub fn len(&self) -> u32 {
        (self.max as i64 - self.min as i64).max(0) as u32
    }

    /// Whether the range samples no layers.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `y` is a sampled layer.
    pub fn contains(&self, y: i32) -> bool {
        y >= self.min && y < self.max
    }
}

/// Errors from constructing a snapshot out of raw samples.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SnapshotError {
    /// One of the three dimensions is zero.
    EmptyVolume,
    /// The sample buffer does not match `width * height * depth`.
    SizeMismatch {
        /// Samples required by the dimensions.
        expected: usize,
        /// Samples supplied.
        found: usize,
    },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyVolume => write!(f, "snapshot volume has a zero dimension"),
            Self::SizeMismatch { expected, found } => {
                write!(f, "expected {expected} samples, found {found}")
            }
        }
    }
}

impl Error for SnapshotError {}

/// Dense block samples for one region volume.
///
/// Horizontal coordinates are local to the footprint (`0..width` along x,
/// `0..depth` along z); vertical coordinates are absolute world y inside
/// [`HeightRange`]. Reads outside the volume, and reads of unloaded
/// samples, return `None`: holes at the edges of a partially loaded
/// region are boundary, never a fault.
#[derive(Clone, Debug)]
pub struct TerrainSnapshot {
    width: u32,
    depth: u32,
    heights: HeightRange,
    cells: Vec<BlockKind>,
}

impl TerrainSnapshot {
    /// A snapshot with every sample set to `kind`.
    pub fn filled(
        width: u32,
        depth: u32,
        heights: HeightRange,
        kind: BlockKind,
    ) -> Result<Self, SnapshotError> {
        let n = Self::volume(width, depth, heights)?;
        Ok(Self {
            width,
            depth,
            heights,
            cells: vec![kind; n],
        })
    }

    /// Wrap raw samples laid out layer by layer from `heights.min`,
    /// each layer row-major in `z` then `x`.
    pub fn from_samples(
        width: u32,
        depth: u32,
        heights: HeightRange,
        cells: Vec<BlockKind>,
    ) -> Result<Self, SnapshotError> {
        let expected = Self::volume(width, depth, heights)?;
        if cells.len() != expected {
            return Err(SnapshotError::SizeMismatch {
                expected,
                found: cells.len(),
            });
        }
        Ok(Self {
            width,
            depth,
            heights,
            cells,
        })
    }

    fn volume(width: u32, depth: u32, heights: HeightRange) -> Result<usize, SnapshotError> {
        if width == 0 || depth == 0 || heights.is_empty() {
            return Err(SnapshotError::EmptyVolume);
        }
        Ok(width as usize * depth as usize * heights.len() as usize)
    }

    /// Extent along x.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Extent along z.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Sampled vertical range.
    pub fn heights(&self) -> HeightRange {
        self.heights
    }

    /// Total number of samples.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`; construction rejects empty volumes.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Flat index of `(x, y, z)`, or `None` outside the volume.
    pub fn index(&self, x: i32, y: i32, z: i32) -> Option<usize> {
        if x < 0 || z < 0 || x >= self.width as i32 || z >= self.depth as i32 {
            return None;
        }
        if !self.heights.contains(y) {
            return None;
        }
        let layer = (y - self.heights.min) as usize;
        Some((layer * self.depth as usize + z as usize) * self.width as usize + x as usize)
    }

    /// The sample at `(x, y, z)`, or `None` if outside the volume or unloaded.
    pub fn get(&self, x: i32, y: i32, z: i32) -> Option<BlockKind> {
        let kind = *self.cells.get(self.index(x, y, z)?)?;
        match kind {
            BlockKind::Unloaded => None,
            other => Some(other),
        }
    }

    /// Overwrite one sample. Returns `false` if `(x, y, z)` is outside
    /// the volume.
    pub fn set(&mut self, x: i32, y: i32, z: i32, kind: BlockKind) -> bool {
        match self.index(x, y, z) {
            Some(i) => {
                self.cells[i] = kind;
                true
            }
            None => false,
        }
    }
}

/// Read-only access to world terrain, provided by the host.
///
/// Called on the owning thread only. Implementations should fill
/// columns they cannot read with [`BlockKind::Unloaded`] rather than
/// failing the whole capture.
pub trait TerrainSource {
    /// Capture every block in `footprint` between `heights`.
    fn read_block_samples(
        &self,
        footprint: Footprint,
        heights: HeightRange,
    ) -> Result<TerrainSnapshot, SnapshotError>;
}
