//! Bounded flood fill from open air.
//!
//! The fill starts at the first air block in the top sampled layer and
//! spreads through passable blocks only, 6-connected. Solid blocks on
//! the frontier are classified but not expanded, so ore sealed inside
//! rock or in caves that never open to the surface is invisible: the
//! scan measures what an arrival can reach without digging.

use std::collections::VecDeque;

use homestead_core::{BlockClass, BlockKind, TerrainSnapshot};

use crate::config::ScanConfig;
use crate::mask::VisitedMask;
use crate::report::ScanReport;

const NEIGHBOURS: [(i32, i32, i32); 6] = [
    (1, 0, 0),
    (-1, 0, 0),
    (0, 0, 1),
    (0, 0, -1),
    (0, 1, 0),
    (0, -1, 0),
];

/// Flood-fill scanner for one region snapshot.
#[derive(Clone, Debug)]
pub struct HabitabilityScanner {
    depth_floor: i32,
}

#[derive(Default)]
struct Tally {
    wood: u32,
    ores: [u32; 7],
    placed: u32,
    examined: u64,
    gaps: u64,
}

impl HabitabilityScanner {
    /// A scanner that ignores everything at or below `depth_floor`.
    pub fn new(depth_floor: i32) -> Self {
        Self { depth_floor }
    }

    /// A scanner using the floor from `config`.
    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(config.depth_floor)
    }

    /// The configured depth floor.
    pub fn depth_floor(&self) -> i32 {
        self.depth_floor
    }

    /// First air cell in the top layer, scanning x-major.
    fn start(snapshot: &TerrainSnapshot) -> Option<(i32, i32, i32)> {
        let top = snapshot.heights().max - 1;
        (0..snapshot.width() as i32)
            .flat_map(|x| (0..snapshot.depth() as i32).map(move |z| (x, z)))
            .find(|&(x, z)| snapshot.get(x, top, z) == Some(BlockKind::Air))
            .map(|(x, z)| (x, top, z))
    }

    /// Run the fill over `snapshot`.
    ///
    /// Every reachable cell is enqueued exactly once. Cells outside the
    /// volume are never enqueued; unloaded cells and cells at or below
    /// the depth floor are dequeued and dropped without classification.
    pub fn scan(&self, snapshot: &TerrainSnapshot) -> ScanReport {
        let Some(start) = Self::start(snapshot) else {
            tracing::debug!("no open air in the top layer, nothing to scan");
            return ScanReport::empty();
        };

        let mut visited = VisitedMask::new(snapshot.len());
        let mut queue = VecDeque::new();
        let mut tally = Tally::default();

        if let Some(i) = snapshot.index(start.0, start.1, start.2) {
            visited.insert(i);
            queue.push_back(start);
        }

        while let Some((x, y, z)) = queue.pop_front() {
            let Some(kind) = snapshot.get(x, y, z) else {
                tally.gaps += 1;
                continue;
            };
            if y <= self.depth_floor {
                continue;
            }
            tally.examined += 1;

            match kind.class() {
                BlockClass::Passable => {
                    for (dx, dy, dz) in NEIGHBOURS {
                        let (nx, ny, nz) = (x + dx, y + dy, z + dz);
                        if let Some(i) = snapshot.index(nx, ny, nz) {
                            if visited.insert(i) {
                                queue.push_back((nx, ny, nz));
                            }
                        }
                    }
                }
                BlockClass::Wood => tally.wood += 1,
                BlockClass::Ore(ore) => tally.ores[ore.index()] += 1,
                BlockClass::Natural => {}
                BlockClass::Placed => tally.placed += 1,
            }
        }

        ScanReport::from_counts(
            tally.wood,
            tally.ores,
            tally.placed,
            tally.examined,
            tally.gaps,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ORE_WEIGHTS;
    use homestead_core::{HeightRange, OreKind};
    use proptest::prelude::*;

    fn heights(min: i32, max: i32) -> HeightRange {
        HeightRange { min, max }
    }

    /// Stone everywhere below `surface`, air from `surface` up.
    fn ground(size: u32, range: HeightRange, surface: i32) -> TerrainSnapshot {
        let mut snap = TerrainSnapshot::filled(size, size, range, BlockKind::Stone).unwrap();
        for y in surface..range.max {
            for z in 0..size as i32 {
                for x in 0..size as i32 {
                    snap.set(x, y, z, BlockKind::Air);
                }
            }
        }
        snap
    }

    #[test]
    fn all_air_with_diamonds_counts_each_once() {
        let mut snap = TerrainSnapshot::filled(8, 8, heights(0, 8), BlockKind::Air).unwrap();
        for (x, y, z) in [(1, 1, 1), (2, 3, 4), (7, 7, 0), (0, 5, 6), (4, 2, 2)] {
            snap.set(x, y, z, BlockKind::Ore(OreKind::Diamond));
        }
        let report = HabitabilityScanner::new(-1).scan(&snap);
        assert_eq!(report.ore(OreKind::Diamond), 5);
        assert_eq!(
            report.resource_score(),
            5 * ORE_WEIGHTS[OreKind::Diamond.index()] as u64
        );
        assert_eq!(report.examined(), 8 * 8 * 8);
        assert_eq!(report.gaps(), 0);
    }

    #[test]
    fn only_surface_facing_blocks_are_classified() {
        let mut snap = ground(4, heights(0, 6), 3);
        // Exposed log on the surface, buried coal one layer deeper.
        snap.set(1, 2, 1, BlockKind::Log);
        snap.set(2, 1, 2, BlockKind::Ore(OreKind::Coal));
        let report = HabitabilityScanner::new(-1).scan(&snap);
        assert_eq!(report.wood(), 1);
        assert_eq!(report.ore(OreKind::Coal), 0);
        // 3 air layers of 16 plus the 16 surface blocks under them.
        assert_eq!(report.examined(), 16 * 3 + 16);
    }

    #[test]
    fn sealed_cave_is_not_counted() {
        let mut snap = ground(6, heights(0, 10), 8);
        // Hollow cave at y = 2..4 with iron walls, fully enclosed by stone.
        for y in 2..4 {
            for z in 2..4 {
                for x in 2..4 {
                    snap.set(x, y, z, BlockKind::CaveAir);
                }
            }
        }
        snap.set(1, 2, 2, BlockKind::Ore(OreKind::Iron));
        let report = HabitabilityScanner::new(-1).scan(&snap);
        assert_eq!(report.ore(OreKind::Iron), 0);
    }

    #[test]
    fn shaft_opens_cave_to_surface() {
        let mut snap = ground(6, heights(0, 10), 8);
        for y in 2..8 {
            snap.set(2, y, 2, BlockKind::Ladder);
        }
        snap.set(1, 2, 2, BlockKind::Ore(OreKind::Iron));
        snap.set(3, 3, 2, BlockKind::Ore(OreKind::Gold));
        let report = HabitabilityScanner::new(-1).scan(&snap);
        assert_eq!(report.ore(OreKind::Iron), 1);
        assert_eq!(report.ore(OreKind::Gold), 1);
    }

    #[test]
    fn depth_floor_hides_deep_resources() {
        let mut snap = ground(5, heights(0, 12), 10);
        // Open pit down to y = 0, lined with diamonds below the floor.
        for y in 0..10 {
            snap.set(2, y, 2, BlockKind::Air);
        }
        for y in 0..=4 {
            snap.set(1, y, 2, BlockKind::Ore(OreKind::Diamond));
            snap.set(3, y, 2, BlockKind::Log);
        }
        let report = HabitabilityScanner::new(4).scan(&snap);
        assert_eq!(report.ore(OreKind::Diamond), 0);
        assert_eq!(report.wood(), 0);

        // One layer above the floor counts.
        snap.set(1, 5, 2, BlockKind::Ore(OreKind::Diamond));
        let report = HabitabilityScanner::new(4).scan(&snap);
        assert_eq!(report.ore(OreKind::Diamond), 1);
    }

    #[test]
    fn no_open_air_reports_zero() {
        let mut snap = TerrainSnapshot::filled(4, 4, heights(0, 4), BlockKind::Stone).unwrap();
        snap.set(0, 0, 0, BlockKind::Ore(OreKind::Diamond));
        let report = HabitabilityScanner::new(-1).scan(&snap);
        assert_eq!(report, ScanReport::empty());
    }

    #[test]
    fn placed_blocks_counted() {
        let mut snap = ground(4, heights(0, 4), 2);
        snap.set(0, 1, 0, BlockKind::Cobblestone);
        snap.set(1, 1, 0, BlockKind::Planks);
        snap.set(2, 2, 0, BlockKind::Torch);
        snap.set(3, 1, 3, BlockKind::Leaves);
        let report = HabitabilityScanner::new(-1).scan(&snap);
        assert_eq!(report.placed(), 3);
    }

    #[test]
    fn unloaded_holes_are_boundary() {
        let mut snap = TerrainSnapshot::filled(6, 1, heights(0, 1), BlockKind::Air).unwrap();
        snap.set(3, 0, 0, BlockKind::Unloaded);
        snap.set(5, 0, 0, BlockKind::Log);
        let report = HabitabilityScanner::new(-1).scan(&snap);
        // Fill stops at the hole: x = 0..3 examined, log beyond it unseen.
        assert_eq!(report.examined(), 3);
        assert_eq!(report.gaps(), 1);
        assert_eq!(report.wood(), 0);
    }

    #[test]
    fn start_is_first_air_column_x_major() {
        let mut snap = TerrainSnapshot::filled(3, 3, heights(0, 2), BlockKind::Stone).unwrap();
        snap.set(1, 1, 2, BlockKind::Air);
        snap.set(2, 1, 0, BlockKind::Air);
        assert_eq!(HabitabilityScanner::start(&snap), Some((1, 1, 2)));
    }

    proptest! {
        #[test]
        fn counts_bounded_by_volume(
            picks in prop::collection::vec(0u8..6, 5 * 4 * 6),
            floor in -1i32..4,
        ) {
            let palette = [
                BlockKind::Air,
                BlockKind::Stone,
                BlockKind::Log,
                BlockKind::Ore(OreKind::Coal),
                BlockKind::Cobblestone,
                BlockKind::Unloaded,
            ];
            let cells = picks.iter().map(|&p| palette[p as usize]).collect();
            let snap = TerrainSnapshot::from_samples(5, 4, heights(0, 6), cells).unwrap();
            let report = HabitabilityScanner::new(floor).scan(&snap);

            prop_assert!(report.examined() + report.gaps() <= snap.len() as u64);
            let classified =
                report.wood() as u64 + report.ore(OreKind::Coal) as u64 + report.placed() as u64;
            prop_assert!(classified <= report.examined());
            prop_assert_eq!(report.resource_score(), 2 * report.ore(OreKind::Coal) as u64);
        }
    }
}
