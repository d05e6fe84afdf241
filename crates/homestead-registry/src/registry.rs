//! The region registry: named regions, the open/next pointers and
//! allocation.

use homestead_core::RegionCoords;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::{RegistryConfig, RegistryConfigError};
use crate::error::RegionNameError;
use crate::index::RegionIndex;
use crate::naming::{validate_region_name, NamePool};
use crate::spiral::SpiralCursor;
use crate::store::RegionStore;

/// Persistent bidirectional registry of named regions.
///
/// Owned by a single context for the lifetime of a world session and
/// passed by reference to whatever needs it. Every mutation is written
/// through to the [`RegionStore`] before the call returns.
pub struct RegionRegistry {
    index: RegionIndex,
    cursor: SpiralCursor,
    pool: NamePool,
    max_name_len: usize,
    store: Box<dyn RegionStore + Send>,
}

impl std::fmt::Debug for RegionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegionRegistry")
            .field("regions", &self.index.len())
            .field("open", &self.cursor.open())
            .field("next", &self.cursor.next())
            .finish_non_exhaustive()
    }
}

impl RegionRegistry {
    /// Load every region record from `store` and position the spiral.
    ///
    /// Records whose key is not a coordinate string are ignored;
    /// unreadable records are skipped with a warning. If nothing was
    /// loaded, the first region is allocated at the origin so that
    /// [`open_region`](Self::open_region) always names a real region.
    pub fn open(
        config: RegistryConfig,
        store: Box<dyn RegionStore + Send>,
    ) -> Result<Self, RegistryConfigError> {
        config.validate()?;
        let pool = NamePool::new(config.region_names).ok_or(RegistryConfigError::EmptyNamePool)?;

        let mut registry = Self {
            index: RegionIndex::new(),
            cursor: SpiralCursor::new(),
            pool,
            max_name_len: config.max_name_len,
            store,
        };
        registry.load();
        registry.cursor = SpiralCursor::locate(|c| registry.index.contains(c));

        if registry.index.is_empty() {
            tracing::info!("no regions on record, opening the first region at the origin");
            registry.add_region();
        }

        let open = registry.open_region();
        tracing::info!(
            "open region \"{}\" at {open}",
            registry.lookup_name(open).unwrap_or("wilderness"),
        );
        Ok(registry)
    }

    fn load(&mut self) {
        let keys = match self.store.list_keys() {
            Ok(keys) => keys,
            Err(e) => {
                tracing::warn!("could not list region records: {e}");
                return;
            }
        };
        for key in keys {
            let Ok(coords) = key.parse::<RegionCoords>() else {
                continue;
            };
            match self.store.read(&key) {
                Ok(name) => {
                    let displaced = self.index.insert(coords, &name);
                    if let Some(holder) = displaced.previous_holder {
                        tracing::warn!(
                            "region records {holder} and {coords} both claim \"{name}\"; keeping {coords}"
                        );
                    }
                }
                Err(e) => tracing::warn!("skipping region record '{key}': {e}"),
            }
        }
        tracing::debug!("loaded {} region records", self.index.len());
    }

    /// Name of the region at `coords`; `None` means wilderness.
    pub fn lookup_name(&self, coords: RegionCoords) -> Option<&str> {
        self.index.name(coords)
    }

    /// Coordinates of the region called `name`, ignoring case.
    pub fn lookup_coords(&self, name: &str) -> Option<RegionCoords> {
        self.index.coords(name)
    }

    /// The current default destination for new arrivals.
    pub fn open_region(&self) -> RegionCoords {
        self.cursor.open()
    }

    /// The coordinates the next [`add_region`](Self::add_region) will claim.
    pub fn next_region(&self) -> RegionCoords {
        self.cursor.next()
    }

    /// Number of named regions.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether no region is named. Never true after [`open`](Self::open).
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Named regions in the order they were registered.
    pub fn regions(&self) -> impl Iterator<Item = (RegionCoords, &str)> {
        self.index.iter()
    }

    /// The backing store.
    pub fn store(&self) -> &dyn RegionStore {
        self.store.as_ref()
    }

    /// Claim the next spiral cell under a freshly generated name and
    /// return the new open region.
    ///
    /// Names rotate through the configured pool starting from the
    /// current region count, skipping any already in use.
    pub fn add_region(&mut self) -> RegionCoords {
        let index = &self.index;
        let name = self
            .pool
            .first_free(index.len(), |candidate| index.coords(candidate).is_some());
        let coords = self.cursor.next();

        self.assign(coords, &name);

        let open = self.cursor.open();
        tracing::info!("opened region \"{name}\" at {coords}");
        open
    }

    /// Name or rename the region at `coords`, taking the name over from
    /// any other region that holds it.
    ///
    /// Only the naming policy can reject the call. A region that loses
    /// its name to `coords` becomes wilderness: its record is deleted
    /// before the new one is written, and the open/next pair is walked
    /// again from the origin.
    pub fn name_region(&mut self, coords: RegionCoords, name: &str) -> Result<(), RegionNameError> {
        validate_region_name(name, self.max_name_len)?;
        self.assign(coords, name);
        Ok(())
    }

    /// Rename the region at `coords`, refusing a name that belongs to a
    /// different region.
    pub fn rename_region(
        &mut self,
        coords: RegionCoords,
        name: &str,
    ) -> Result<(), RegionNameError> {
        validate_region_name(name, self.max_name_len)?;
        if let Some(holder) = self.index.coords(name) {
            if holder != coords {
                return Err(RegionNameError::NameTaken {
                    name: name.to_string(),
                    holder,
                });
            }
        }
        self.assign(coords, name);
        Ok(())
    }

    /// Persist and index `coords ↔ name`, replacing whatever either side
    /// held. Never fails: storage faults are logged and the in-memory
    /// view is updated regardless, so the spiral keeps moving.
    fn assign(&mut self, coords: RegionCoords, name: &str) {
        let holder = self.index.coords(name).filter(|&h| h != coords);
        if let Some(holder) = holder {
            let old_key = holder.to_string();
            if let Err(e) = self.store.delete(&old_key) {
                tracing::warn!("could not delete region record '{old_key}': {e}");
            }
            tracing::info!("region {holder} gave up \"{name}\" to {coords}");
        }

        let key = coords.to_string();
        if self.index.contains(coords) {
            if let Err(e) = self.store.delete(&key) {
                tracing::warn!("could not delete region record '{key}': {e}");
            }
        }
        if let Err(e) = self.store.write(&key, name) {
            tracing::warn!("could not write region record '{key}': {e}");
        }

        let displaced = self.index.insert(coords, name);
        debug_assert_eq!(displaced.previous_holder, holder);
        if holder.is_some() {
            // A named cell became wilderness; walk again from the origin.
            self.cursor = SpiralCursor::locate(|c| self.index.contains(c));
        } else {
            self.cursor.advance(|c| self.index.contains(c));
        }
    }

    /// A uniformly chosen named region other than `exclude`.
    ///
    /// Returns `None` when fewer than two regions exist.
    pub fn random_other_region<R: Rng + ?Sized>(
        &self,
        exclude: RegionCoords,
        rng: &mut R,
    ) -> Option<RegionCoords> {
        if self.index.len() < 2 {
            return None;
        }
        let candidates: Vec<RegionCoords> = self
            .index
            .iter()
            .map(|(c, _)| c)
            .filter(|c| *c != exclude)
            .collect();
        candidates.choose(rng).copied()
    }
}
