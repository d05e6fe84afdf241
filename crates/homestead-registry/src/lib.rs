//! Persistent region registry for Homestead.
//!
//! Owns the bidirectional name ↔ coordinate index, the outward spiral
//! that decides where the next region opens, and the naming policy for
//! automatically allocated regions. Every mutation is written through to
//! a [`RegionStore`] immediately.
//!
//! The registry is single-writer: it is owned by one context and mutated
//! only through `&mut self`. Background scans never touch it directly.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod index;
pub mod naming;
pub mod registry;
pub mod spiral;
pub mod store;

pub use config::{RegistryConfig, RegistryConfigError};
pub use error::{RegionNameError, StorageError};
pub use index::RegionIndex;
pub use naming::{validate_region_name, NamePool};
pub use registry::RegionRegistry;
pub use spiral::{Direction, SpiralCursor, SpiralWalk};
pub use store::{DirStore, MemoryStore, RegionStore};
