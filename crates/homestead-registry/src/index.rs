//! Bidirectional region name ↔ coordinate index.
//!
//! Both directions live behind one type and change together through
//! [`RegionIndex::insert`] and [`RegionIndex::remove`], so a caller can
//! never update one side without the other. Name lookups are
//! case-insensitive; the display name keeps the case it was given.

use std::collections::HashMap;

use homestead_core::RegionCoords;
use indexmap::IndexMap;

/// Pairings dropped by an [`insert`](RegionIndex::insert).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Displaced {
    /// The name the target coordinates held before, if any.
    pub previous_name: Option<String>,
    /// Other coordinates that held the new name before, if any.
    pub previous_holder: Option<RegionCoords>,
}

/// One-to-one mapping between named regions and their coordinates.
///
/// Iteration follows insertion order, which keeps seeded random picks
/// reproducible.
#[derive(Clone, Debug, Default)]
pub struct RegionIndex {
    by_coords: IndexMap<RegionCoords, String>,
    by_name: HashMap<String, RegionCoords>,
}

fn fold(name: &str) -> String {
    name.to_lowercase()
}

impl RegionIndex {
    /// An empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of named regions.
    pub fn len(&self) -> usize {
        self.by_coords.len()
    }

    /// Whether no region is named.
    pub fn is_empty(&self) -> bool {
        self.by_coords.is_empty()
    }

    /// Display name of the region at `coords`.
    pub fn name(&self, coords: RegionCoords) -> Option<&str> {
        self.by_coords.get(&coords).map(String::as_str)
    }

    /// Coordinates of the region called `name`, ignoring case.
    pub fn coords(&self, name: &str) -> Option<RegionCoords> {
        self.by_name.get(&fold(name)).copied()
    }

    /// Whether `coords` has a name.
    pub fn contains(&self, coords: RegionCoords) -> bool {
        self.by_coords.contains_key(&coords)
    }

    /// Bind `name` to `coords`.
    ///
    /// Any name `coords` held before is dropped, and any other region
    /// holding `name` loses it, so the mapping stays one-to-one.
    pub fn insert(&mut self, coords: RegionCoords, name: &str) -> Displaced {
        let key = fold(name);
        let mut displaced = Displaced::default();

        if let Some(old) = self.by_coords.get(&coords) {
            self.by_name.remove(&fold(old));
        }
        if let Some(holder) = self.by_name.get(&key).copied() {
            if holder != coords {
                self.by_coords.shift_remove(&holder);
                displaced.previous_holder = Some(holder);
            }
        }
        displaced.previous_name = self.by_coords.insert(coords, name.to_string());
        self.by_name.insert(key, coords);

        debug_assert!(self.is_consistent());
        displaced
    }

    /// Remove the name at `coords`, returning it.
    pub fn remove(&mut self, coords: RegionCoords) -> Option<String> {
        let name = self.by_coords.shift_remove(&coords)?;
        self.by_name.remove(&fold(&name));
        debug_assert!(self.is_consistent());
        Some(name)
    }

    /// Named regions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (RegionCoords, &str)> {
        self.by_coords.iter().map(|(c, n)| (*c, n.as_str()))
    }

    /// Whether the two directions are exact inverses.
    pub fn is_consistent(&self) -> bool {
        self.by_coords.len() == self.by_name.len()
            && self
                .by_coords
                .iter()
                .all(|(c, n)| self.by_name.get(&fold(n)) == Some(c))
    }
}
