//! Canned configurations small enough to scan in a unit test.

use homestead_core::{HeightRange, OreKind};
use homestead_registry::RegistryConfig;

use crate::RegionRecipe;

/// Side length of test regions.
pub const TEST_REGION_SIZE: u32 = 16;
/// Top of the test world.
pub const TEST_MAX_HEIGHT: i32 = 12;
/// Depth floor of the test world.
pub const TEST_DEPTH_FLOOR: i32 = 2;
/// Surface height used by the stock recipes.
pub const TEST_SURFACE: i32 = 8;

/// Sampled layers for the test world.
pub fn test_heights() -> HeightRange {
    HeightRange {
        min: TEST_DEPTH_FLOOR,
        max: TEST_MAX_HEIGHT,
    }
}

/// Owned name list from string literals.
pub fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Registry config with a short, predictable name pool.
pub fn registry_config(list: &[&str]) -> RegistryConfig {
    RegistryConfig {
        region_names: names(list),
        ..RegistryConfig::default()
    }
}

/// 20 logs and 10 diamonds on the surface: a resource score of 40.
pub fn rich_region() -> RegionRecipe {
    RegionRecipe::barren(TEST_SURFACE)
        .with_wood(20)
        .with_ore(OreKind::Diamond, 10)
}

/// Bare stone at the test surface height.
pub fn poor_region() -> RegionRecipe {
    RegionRecipe::barren(TEST_SURFACE)
}
