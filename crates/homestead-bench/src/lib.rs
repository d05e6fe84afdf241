//! Benchmark profiles for the Homestead region allocator.
//!
//! - [`rolling_terrain`]: a deterministic hilly region with trees, ore
//!   seams and a few caves, the shape the flood fill meets in practice
//! - [`populated_registry`]: a registry with `n` regions already opened

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use homestead_core::{BlockKind, HeightRange, OreKind, TerrainSnapshot};
use homestead_registry::{MemoryStore, RegionRegistry, RegistryConfig};

/// Deterministic pseudo-random value in `0..modulus` for a cell.
fn hash(x: i32, y: i32, z: i32, seed: u64, modulus: u64) -> u64 {
    let mut h = seed ^ 0x9E37_79B9_7F4A_7C15;
    for v in [x as u64, y as u64, z as u64] {
        h = (h ^ v).wrapping_mul(0x5851_F42D_4C95_7F2D);
        h ^= h >> 29;
    }
    h % modulus
}

/// Build a `size × size` region between `heights`.
///
/// The surface rolls gently around the middle of the range. Roughly one
/// column in 40 carries a three-block tree, one surface block in 60 is
/// exposed ore, and a tunnel at a third of the height is open to the sky
/// through a shaft in the middle of the region.
pub fn rolling_terrain(size: u32, heights: HeightRange, seed: u64) -> TerrainSnapshot {
    let mut snap = TerrainSnapshot::filled(size, size, heights, BlockKind::Stone)
        .expect("benchmark volume is non-empty");
    let base = heights.min + heights.len() as i32 / 2;
    let n = size as i32;

    for z in 0..n {
        for x in 0..n {
            let surface = base + ((x / 7 + z / 11) % 5) - 2;
            for y in surface..heights.max {
                snap.set(x, y, z, BlockKind::Air);
            }
            snap.set(x, surface - 1, z, BlockKind::GrassBlock);
            snap.set(x, surface - 2, z, BlockKind::Dirt);

            if hash(x, 0, z, seed, 40) == 0 {
                for y in surface..surface + 3 {
                    snap.set(x, y, z, BlockKind::Log);
                }
            } else if hash(x, 1, z, seed, 60) == 0 {
                let ore = OreKind::ALL[hash(x, 2, z, seed, 7) as usize];
                snap.set(x, surface - 1, z, BlockKind::Ore(ore));
            }
        }
    }

    let tunnel = heights.min + heights.len() as i32 / 3;
    for x in 0..n {
        snap.set(x, tunnel, n / 2, BlockKind::CaveAir);
        if hash(x, tunnel, n / 2 + 1, seed, 8) == 0 {
            snap.set(x, tunnel, n / 2 + 1, BlockKind::Ore(OreKind::Iron));
        }
    }
    for y in tunnel..heights.max {
        if snap.get(n / 2, y, n / 2) != Some(BlockKind::Air) {
            snap.set(n / 2, y, n / 2, BlockKind::Ladder);
        }
    }
    snap
}

/// A registry backed by memory with `n` regions opened.
pub fn populated_registry(n: usize) -> RegionRegistry {
    let mut reg = RegionRegistry::open(RegistryConfig::default(), Box::new(MemoryStore::new()))
        .expect("default registry config is valid");
    while reg.len() < n {
        reg.add_region();
    }
    reg
}
