//! Per-scan bookkeeping on the owning thread.

use std::fmt;

use homestead_core::RegionCoords;

/// Identifier of one scan request, unique per coordinator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScanId(pub u64);

impl fmt::Display for ScanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scan#{}", self.0)
    }
}

/// Lifecycle of a scan: `Requested → Running → Completed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanState {
    /// Snapshot captured and queued for a worker.
    Requested,
    /// A worker has picked the job up.
    Running,
    /// The report has been applied on the owning thread.
    Completed,
}

/// A scan in flight, as tracked by the coordinator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanTicket {
    id: ScanId,
    coords: RegionCoords,
    name_at_request: Option<String>,
    chain: bool,
    hops: u32,
    state: ScanState,
}

impl ScanTicket {
    pub(crate) fn new(
        id: ScanId,
        coords: RegionCoords,
        name_at_request: Option<String>,
        chain: bool,
        hops: u32,
    ) -> Self {
        Self {
            id,
            coords,
            name_at_request,
            chain,
            hops,
            state: ScanState::Requested,
        }
    }

    /// The scan's identifier.
    pub fn id(&self) -> ScanId {
        self.id
    }

    /// Region being scanned.
    pub fn coords(&self) -> RegionCoords {
        self.coords
    }

    /// The region's name when the scan was requested.
    pub fn name_at_request(&self) -> Option<&str> {
        self.name_at_request.as_deref()
    }

    /// Whether a rejection opens and scans the next region.
    pub fn chain(&self) -> bool {
        self.chain
    }

    /// How many rejected scans preceded this one in its chain.
    pub fn hops(&self) -> u32 {
        self.hops
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// `Requested → Running`. Returns `false` if the ticket was not
    /// waiting to start.
    pub(crate) fn start(&mut self) -> bool {
        if self.state != ScanState::Requested {
            return false;
        }
        self.state = ScanState::Running;
        true
    }

    /// Move to `Completed` from either earlier state.
    pub(crate) fn complete(&mut self) {
        self.state = ScanState::Completed;
    }
}
