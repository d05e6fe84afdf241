//! Core types and traits for the Homestead region allocator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the region grid coordinates, the block vocabulary the habitability
//! scanner understands, and the read-only terrain sampling seam through
//! which the allocator observes the world.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod block;
pub mod coords;
pub mod error;
pub mod snapshot;

pub use block::{BlockClass, BlockKind, OreKind};
pub use coords::{Footprint, RegionCoords, WorldPosition, DEFAULT_REGION_SIZE};
pub use error::FormatError;
pub use snapshot::{HeightRange, SnapshotError, TerrainSnapshot, TerrainSource};
