//! Test utilities and mock types for Homestead development.
//!
//! Provides a recipe-driven [`MockTerrain`] implementing
//! [`TerrainSource`], a [`FlakyStore`] whose failures can be switched on
//! from outside the registry that owns it, and small fixtures in
//! [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::collections::{BTreeSet, HashMap};
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use homestead_core::{
    BlockKind, Footprint, HeightRange, OreKind, RegionCoords, SnapshotError, TerrainSnapshot,
    TerrainSource,
};
use homestead_registry::{MemoryStore, RegionStore, StorageError};

/// Description of one region's terrain.
///
/// Stone below `surface`, air from `surface` up. The exposed layer
/// (`surface - 1`) is then overwritten cell by cell, x-major, with the
/// requested wood, ores and placed blocks, so a scan that starts in the
/// open air sees exactly these counts.
#[derive(Clone, Debug)]
pub struct RegionRecipe {
    pub surface: i32,
    pub wood: u32,
    pub ores: Vec<(OreKind, u32)>,
    pub placed: u32,
    /// Fill the whole column with `Unloaded` instead.
    pub unloaded: bool,
}

impl RegionRecipe {
    /// Bare stone with air above `surface`.
    pub fn barren(surface: i32) -> Self {
        Self {
            surface,
            wood: 0,
            ores: Vec::new(),
            placed: 0,
            unloaded: false,
        }
    }

    pub fn with_wood(mut self, wood: u32) -> Self {
        self.wood = wood;
        self
    }

    pub fn with_ore(mut self, kind: OreKind, count: u32) -> Self {
        self.ores.push((kind, count));
        self
    }

    pub fn with_placed(mut self, placed: u32) -> Self {
        self.placed = placed;
        self
    }

    /// A region the host could not load at all.
    pub fn unloaded() -> Self {
        Self {
            unloaded: true,
            ..Self::barren(0)
        }
    }

    /// Render the recipe into a snapshot of the given shape.
    ///
    /// # Panics
    ///
    /// Panics if the exposed layer cannot hold every requested block or
    /// lies outside `heights`.
    pub fn build(&self, size: u32, heights: HeightRange) -> TerrainSnapshot {
        if self.unloaded {
            return TerrainSnapshot::filled(size, size, heights, BlockKind::Unloaded)
                .expect("non-empty volume");
        }
        let mut snap = TerrainSnapshot::filled(size, size, heights, BlockKind::Stone)
            .expect("non-empty volume");
        for y in self.surface.max(heights.min)..heights.max {
            for z in 0..size as i32 {
                for x in 0..size as i32 {
                    snap.set(x, y, z, BlockKind::Air);
                }
            }
        }

        let exposed = self.surface - 1;
        assert!(heights.contains(exposed), "surface layer {exposed} not sampled");
        let blocks = std::iter::repeat(BlockKind::Log)
            .take(self.wood as usize)
            .chain(
                self.ores
                    .iter()
                    .flat_map(|&(kind, n)| std::iter::repeat(BlockKind::Ore(kind)).take(n as usize)),
            )
            .chain(std::iter::repeat(BlockKind::Cobblestone).take(self.placed as usize));

        let mut cells = (0..size as i32).flat_map(|x| (0..size as i32).map(move |z| (x, z)));
        for kind in blocks {
            let (x, z) = cells.next().expect("recipe does not fit in the surface layer");
            snap.set(x, exposed, z, kind);
        }
        snap
    }
}

/// Terrain assembled from per-region [`RegionRecipe`]s.
///
/// Regions without a recipe use the fallback. Every capture is counted.
#[derive(Debug)]
pub struct MockTerrain {
    fallback: RegionRecipe,
    regions: HashMap<RegionCoords, RegionRecipe>,
    captures: AtomicUsize,
    failing: AtomicBool,
}

impl MockTerrain {
    pub fn new(fallback: RegionRecipe) -> Self {
        Self {
            fallback,
            regions: HashMap::new(),
            captures: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
        }
    }

    /// Override the recipe for one region.
    pub fn set_region(&mut self, coords: impl Into<RegionCoords>, recipe: RegionRecipe) {
        self.regions.insert(coords.into(), recipe);
    }

    /// Make every subsequent capture fail.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::Relaxed);
    }

    /// Number of `read_block_samples` calls so far.
    pub fn captures(&self) -> usize {
        self.captures.load(Ordering::Relaxed)
    }
}

impl TerrainSource for MockTerrain {
    fn read_block_samples(
        &self,
        footprint: Footprint,
        heights: HeightRange,
    ) -> Result<TerrainSnapshot, SnapshotError> {
        self.captures.fetch_add(1, Ordering::Relaxed);
        if self.failing.load(Ordering::Relaxed) {
            return Err(SnapshotError::EmptyVolume);
        }
        let coords =
            RegionCoords::containing_block(footprint.min_x, footprint.min_z, footprint.size);
        let recipe = self.regions.get(&coords).unwrap_or(&self.fallback);
        Ok(recipe.build(footprint.size, heights))
    }
}

/// Shared switch controlling a [`FlakyStore`] after it has been boxed.
#[derive(Clone, Debug, Default)]
pub struct FailSwitch(Arc<AtomicBool>);

impl FailSwitch {
    pub fn set(&self, failing: bool) {
        self.0.store(failing, Ordering::Relaxed);
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// In-memory store whose writes and deletes fail while its
/// [`FailSwitch`] is set, and whose listed `unreadable` keys always
/// fail to read.
#[derive(Debug, Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    unreadable: BTreeSet<String>,
    switch: FailSwitch,
}

impl FlakyStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    /// Make reads of `key` fail permanently.
    pub fn unreadable(mut self, key: &str) -> Self {
        self.unreadable.insert(key.to_string());
        self
    }

    /// A handle toggling write failures.
    pub fn switch(&self) -> FailSwitch {
        self.switch.clone()
    }

    fn fault(key: &str) -> StorageError {
        StorageError::Io(io::Error::new(
            io::ErrorKind::Other,
            format!("injected fault on '{key}'"),
        ))
    }
}

impl RegionStore for FlakyStore {
    fn list_keys(&self) -> Result<Vec<String>, StorageError> {
        self.inner.list_keys()
    }

    fn read(&self, key: &str) -> Result<String, StorageError> {
        if self.unreadable.contains(key) {
            return Err(Self::fault(key));
        }
        self.inner.read(key)
    }

    fn write(&mut self, key: &str, payload: &str) -> Result<(), StorageError> {
        if self.switch.is_set() {
            return Err(Self::fault(key));
        }
        self.inner.write(key, payload)
    }

    fn delete(&mut self, key: &str) -> Result<(), StorageError> {
        if self.switch.is_set() {
            return Err(Self::fault(key));
        }
        self.inner.delete(key)
    }
}
