//! End-to-end chaining: registry, terrain, workers and policy together.

use std::time::{Duration, Instant};

use homestead_core::RegionCoords;
use homestead_engine::{CoordinatorConfig, Resolution, ScanCoordinator, ScanOutcome};
use homestead_registry::{DirStore, RegionRegistry};
use homestead_scan::{HabitabilityPolicy, ScanConfig};
use homestead_test_utils::fixtures::{
    poor_region, registry_config, rich_region, TEST_DEPTH_FLOOR, TEST_MAX_HEIGHT, TEST_REGION_SIZE,
};
use homestead_test_utils::MockTerrain;

fn c(x: i32, z: i32) -> RegionCoords {
    RegionCoords::new(x, z)
}

fn config(workers: usize) -> CoordinatorConfig {
    CoordinatorConfig {
        worker_count: Some(workers),
        queue_depth: 8,
        scan: ScanConfig {
            region_size: TEST_REGION_SIZE,
            max_height: TEST_MAX_HEIGHT,
            depth_floor: TEST_DEPTH_FLOOR,
        },
        policy: HabitabilityPolicy {
            resource_minimum: 40,
            wood_minimum: 20,
            density_ratio: 0.001,
        },
    }
}

fn run_to_idle(
    coord: &mut ScanCoordinator,
    reg: &mut RegionRegistry,
    terrain: &MockTerrain,
) -> Vec<ScanOutcome> {
    let deadline = Instant::now() + Duration::from_secs(20);
    let mut outcomes = Vec::new();
    while coord.in_flight() > 0 {
        assert!(Instant::now() < deadline, "chain did not settle");
        outcomes.extend(coord.pump_timeout(reg, terrain, Duration::from_millis(50)));
    }
    outcomes
}

#[test]
fn long_chain_follows_the_spiral_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let store = DirStore::open(dir.path()).unwrap();
    let mut reg =
        RegionRegistry::open(registry_config(&["alpha", "beta", "gamma"]), Box::new(store)).unwrap();

    let mut terrain = MockTerrain::new(poor_region());
    terrain.set_region(c(1, 1), rich_region());
    let mut coord = ScanCoordinator::new(config(2)).unwrap();

    coord.request_scan(reg.open_region(), true, &reg, &terrain).unwrap();
    let outcomes = run_to_idle(&mut coord, &mut reg, &terrain);

    let scanned: Vec<RegionCoords> = outcomes.iter().map(|o| o.ticket.coords()).collect();
    assert_eq!(
        scanned,
        [
            c(0, 0),
            c(0, 1),
            c(-1, 1),
            c(-1, 0),
            c(-1, -1),
            c(0, -1),
            c(1, -1),
            c(1, 0),
            c(1, 1),
        ]
    );
    assert_eq!(outcomes.last().unwrap().resolution, Resolution::Accepted);
    assert_eq!(reg.open_region(), c(1, 1));
    assert_eq!(reg.next_region(), c(1, 2));
    coord.shutdown();
    drop(reg);

    // The chain's allocations survive a restart.
    let store = DirStore::open(dir.path()).unwrap();
    let reg =
        RegionRegistry::open(registry_config(&["alpha", "beta", "gamma"]), Box::new(store)).unwrap();
    assert_eq!(reg.len(), 9);
    assert_eq!(reg.lookup_name(c(1, 1)), Some("gamma2"));
    assert_eq!(reg.open_region(), c(1, 1));
}

#[test]
fn each_rejection_adds_exactly_one_region_per_pump() {
    let mut reg = RegionRegistry::open(
        registry_config(&["alpha", "beta", "gamma"]),
        Box::new(homestead_registry::MemoryStore::new()),
    )
    .unwrap();
    let terrain = MockTerrain::new(poor_region());
    let mut coord = ScanCoordinator::new(config(1)).unwrap();

    coord.request_scan(c(0, 0), true, &reg, &terrain).unwrap();
    for round in 1..=5 {
        let before = (reg.len(), coord.stats().requested);
        let outcomes = coord.pump_timeout(&mut reg, &terrain, Duration::from_secs(10));
        assert_eq!(outcomes.len(), 1, "round {round}");
        assert!(matches!(outcomes[0].resolution, Resolution::Chained { .. }));
        assert_eq!(reg.len(), before.0 + 1);
        assert_eq!(coord.stats().requested, before.1 + 1);
        assert_eq!(coord.in_flight(), 1);
    }
    let report = coord.shutdown();
    assert_eq!(report.scans_discarded, 1);
}

#[test]
fn independent_chains_share_the_registry() {
    let mut reg = RegionRegistry::open(
        registry_config(&["alpha", "beta", "gamma"]),
        Box::new(homestead_registry::MemoryStore::new()),
    )
    .unwrap();
    reg.name_region(c(7, 7), "Faraway").unwrap();

    let mut terrain = MockTerrain::new(rich_region());
    terrain.set_region(c(0, 0), poor_region());
    let mut coord = ScanCoordinator::new(config(2)).unwrap();

    coord.request_scan(c(0, 0), true, &reg, &terrain).unwrap();
    coord.request_scan(c(7, 7), true, &reg, &terrain).unwrap();
    let outcomes = run_to_idle(&mut coord, &mut reg, &terrain);

    assert_eq!(outcomes.len(), 3);
    let accepted: Vec<RegionCoords> = outcomes
        .iter()
        .filter(|o| o.resolution == Resolution::Accepted)
        .map(|o| o.ticket.coords())
        .collect();
    assert_eq!(accepted.len(), 2);
    assert!(accepted.contains(&c(7, 7)));
    assert!(accepted.contains(&c(0, 1)));
    assert_eq!(reg.len(), 3);
}
