//! Scan results.

use homestead_core::OreKind;

/// Resource score weight per ore, indexed by [`OreKind::index`].
///
/// Rarer ores weigh more. Lapis is counted but carries no weight.
pub const ORE_WEIGHTS: [u32; 7] = [
    2, // coal
    3, // iron
    3, // gold
    3, // redstone
    0, // lapis
    3, // emerald
    4, // diamond
];

/// Everything one scan found, produced once and consumed once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanReport {
    wood: u32,
    ores: [u32; 7],
    placed: u32,
    examined: u64,
    gaps: u64,
    resource_score: u64,
}

impl ScanReport {
    /// A report with every count zero, used when a scan has nowhere to
    /// start or could not run.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a report from raw counts; the resource score is derived.
    pub fn from_counts(wood: u32, ores: [u32; 7], placed: u32, examined: u64, gaps: u64) -> Self {
        let resource_score = ores
            .iter()
            .zip(ORE_WEIGHTS)
            .map(|(&n, w)| n as u64 * w as u64)
            .sum();
        Self {
            wood,
            ores,
            placed,
            examined,
            gaps,
            resource_score,
        }
    }

    /// Logs reached by the fill.
    pub fn wood(&self) -> u32 {
        self.wood
    }

    /// Count of one ore kind reached by the fill.
    pub fn ore(&self, kind: OreKind) -> u32 {
        self.ores[kind.index()]
    }

    /// Blocks outside the natural set, a proxy for prior building.
    pub fn placed(&self) -> u32 {
        self.placed
    }

    /// Cells classified (passable or not) above the depth floor.
    pub fn examined(&self) -> u64 {
        self.examined
    }

    /// Reached cells whose sample was missing from the snapshot.
    pub fn gaps(&self) -> u64 {
        self.gaps
    }

    /// Weighted ore total; see [`ORE_WEIGHTS`].
    pub fn resource_score(&self) -> u64 {
        self.resource_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_weights_each_ore() {
        let mut ores = [0; 7];
        ores[OreKind::Coal.index()] = 10;
        ores[OreKind::Lapis.index()] = 50;
        ores[OreKind::Diamond.index()] = 5;
        let report = ScanReport::from_counts(0, ores, 0, 0, 0);
        assert_eq!(report.resource_score(), 10 * 2 + 5 * 4);
        assert_eq!(report.ore(OreKind::Lapis), 50);
    }

    #[test]
    fn empty_report_is_all_zero() {
        let r = ScanReport::empty();
        assert_eq!(r.resource_score(), 0);
        assert_eq!(r.wood(), 0);
        assert_eq!(r.placed(), 0);
        for ore in OreKind::ALL {
            assert_eq!(r.ore(ore), 0);
        }
    }
}
