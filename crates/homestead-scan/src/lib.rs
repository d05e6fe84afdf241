//! Habitability scanning for Homestead regions.
//!
//! A scan flood-fills a [`TerrainSnapshot`](homestead_core::TerrainSnapshot)
//! from open air at the top of the region, classifying every block it
//! touches, and produces a [`ScanReport`]. A [`HabitabilityPolicy`] then
//! turns the report into a [`Verdict`].
//!
//! Scanning is pure: it reads an owned snapshot, allocates its own
//! working set, and never touches the registry.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod flood;
pub mod mask;
pub mod policy;
pub mod report;

pub use config::{ScanConfig, ScanConfigError};
pub use flood::HabitabilityScanner;
pub use mask::VisitedMask;
pub use policy::{HabitabilityPolicy, PolicyError, Verdict, PLACED_BLOCK_FOOTPRINT};
pub use report::{ScanReport, ORE_WEIGHTS};
