//! Homestead: spiral region allocation with flood-fill habitability
//! scanning for voxel worlds.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Homestead sub-crates. For most hosts, adding `homestead` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use std::time::Duration;
//!
//! use homestead::prelude::*;
//!
//! // A world of nothing but air.
//! struct Void;
//! impl TerrainSource for Void {
//!     fn read_block_samples(
//!         &self,
//!         footprint: Footprint,
//!         heights: HeightRange,
//!     ) -> Result<TerrainSnapshot, SnapshotError> {
//!         TerrainSnapshot::filled(footprint.size, footprint.size, heights, BlockKind::Air)
//!     }
//! }
//!
//! let mut registry =
//!     RegionRegistry::open(RegistryConfig::default(), Box::new(MemoryStore::new())).unwrap();
//! assert_eq!(registry.open_region(), RegionCoords::new(0, 0));
//!
//! let config = CoordinatorConfig {
//!     worker_count: Some(1),
//!     scan: ScanConfig { region_size: 16, max_height: 12, depth_floor: 2 },
//!     ..CoordinatorConfig::default()
//! };
//! let mut coordinator = ScanCoordinator::new(config).unwrap();
//! coordinator
//!     .request_scan(registry.open_region(), false, &registry, &Void)
//!     .unwrap();
//! let outcomes = coordinator.pump_timeout(&mut registry, &Void, Duration::from_secs(5));
//! assert_eq!(outcomes[0].verdict, Verdict::InsufficientResources);
//! assert_eq!(outcomes[0].resolution, Resolution::Rejected);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `homestead-core` | Coordinates, blocks, terrain snapshots |
//! | [`registry`] | `homestead-registry` | Named regions, spiral allocation, storage |
//! | [`scan`] | `homestead-scan` | Flood fill, reports, acceptance policy |
//! | [`engine`] | `homestead-engine` | Background scanning and chaining |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and the terrain seam (`homestead-core`).
pub use homestead_core as types;

/// Region registry and spiral allocator (`homestead-registry`).
///
/// [`registry::RegionRegistry`] is the single owner of region names;
/// [`registry::DirStore`] persists them one file per region.
pub use homestead_registry as registry;

/// Habitability scanning (`homestead-scan`).
pub use homestead_scan as scan;

/// Scan coordination (`homestead-engine`).
///
/// [`engine::ScanCoordinator`] runs scans on worker threads and chains
/// rejected regions into the next spiral cell.
pub use homestead_engine as engine;

/// Common imports for typical Homestead usage.
///
/// ```rust
/// use homestead::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use homestead_core::{
        BlockClass, BlockKind, Footprint, FormatError, HeightRange, OreKind, RegionCoords,
        SnapshotError, TerrainSnapshot, TerrainSource, WorldPosition,
    };

    // Registry
    pub use homestead_registry::{
        DirStore, MemoryStore, RegionNameError, RegionRegistry, RegionStore, RegistryConfig,
        StorageError,
    };

    // Scanning
    pub use homestead_scan::{
        HabitabilityPolicy, HabitabilityScanner, ScanConfig, ScanReport, Verdict,
    };

    // Engine
    pub use homestead_engine::{
        CoordinatorConfig, Resolution, ScanCoordinator, ScanId, ScanOutcome, SubmitError,
    };
}
