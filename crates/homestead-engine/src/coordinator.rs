//! The scan coordinator: dispatch, completion and the chaining policy.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, TrySendError};
use homestead_core::{OreKind, RegionCoords, SnapshotError, TerrainSnapshot, TerrainSource};
use homestead_registry::RegionRegistry;
use homestead_scan::{HabitabilityPolicy, HabitabilityScanner, ScanConfig, ScanReport, Verdict};

use crate::config::{ConfigError, CoordinatorConfig};
use crate::ticket::{ScanId, ScanTicket};
use crate::worker::{worker_loop, ScanEvent, ScanJob};

// ── Error types ──────────────────────────────────────────────────

/// Error requesting a scan.
#[derive(Debug, PartialEq, Eq)]
pub enum SubmitError {
    /// The coordinator has shut down.
    Shutdown,
    /// The job queue is full (back-pressure).
    QueueFull,
    /// The terrain could not be captured.
    Capture(SnapshotError),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shutdown => write!(f, "scan coordinator has shut down"),
            Self::QueueFull => write!(f, "scan queue full"),
            Self::Capture(e) => write!(f, "terrain capture failed: {e}"),
        }
    }
}

impl Error for SubmitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Capture(e) => Some(e),
            _ => None,
        }
    }
}

// ── Outcomes ─────────────────────────────────────────────────────

/// What the coordinator did with a finished scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The region passed and stays open.
    Accepted,
    /// The region failed and the scan was not chained.
    Rejected,
    /// The region failed; the next spiral region was opened and, if the
    /// capture succeeded, queued for scanning.
    Chained {
        /// Region returned by `add_region`.
        opened: RegionCoords,
        /// The follow-up scan, or `None` if it could not be issued.
        next_scan: Option<ScanId>,
    },
    /// The region was renamed while scanning; the report was ignored.
    Stale,
}

/// A finished scan, as seen by the owning thread.
#[derive(Clone, Debug)]
pub struct ScanOutcome {
    /// The completed ticket.
    pub ticket: ScanTicket,
    /// The worker's report.
    pub report: ScanReport,
    /// The policy's verdict on `report`.
    pub verdict: Verdict,
    /// Action taken.
    pub resolution: Resolution,
}

/// Running totals since the coordinator started.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CoordinatorStats {
    /// Scans queued, including chained follow-ups.
    pub requested: u64,
    /// Reports applied or discarded on the owning thread.
    pub completed: u64,
    /// Scans whose region passed.
    pub accepted: u64,
    /// Scans whose region failed, chained or not.
    pub rejected: u64,
    /// Rejections that opened a new region.
    pub chained: u64,
    /// Reports discarded because the region changed name.
    pub stale: u64,
}

/// Report from [`ScanCoordinator::shutdown`].
#[derive(Debug)]
pub struct ShutdownReport {
    /// Total time spent in the shutdown sequence.
    pub total_ms: u64,
    /// Number of worker threads joined.
    pub workers_joined: usize,
    /// Scans still in flight whose reports will never be applied.
    pub scans_discarded: usize,
}

// ── ScanCoordinator ──────────────────────────────────────────────

/// Dispatches region scans to background workers and applies their
/// reports on the owning thread.
///
/// The coordinator never holds the registry or the terrain: both are
/// borrowed for the duration of [`request_scan`](Self::request_scan)
/// and [`pump`](Self::pump), which must be called from the thread that
/// owns them.
pub struct ScanCoordinator {
    job_tx: Option<Sender<ScanJob>>,
    job_rx: Receiver<ScanJob>,
    event_rx: Receiver<ScanEvent>,
    workers: Vec<JoinHandle<()>>,
    tickets: BTreeMap<ScanId, ScanTicket>,
    next_id: u64,
    scan: ScanConfig,
    policy: HabitabilityPolicy,
    stats: CoordinatorStats,
}

impl ScanCoordinator {
    /// Validate `config` and spawn the worker pool.
    pub fn new(config: CoordinatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let worker_count = config.resolved_worker_count();
        let (job_tx, job_rx) = crossbeam_channel::bounded::<ScanJob>(config.queue_depth);
        let (event_tx, event_rx) = crossbeam_channel::unbounded();
        let scanner = HabitabilityScanner::from_config(&config.scan);

        let mut workers = Vec::with_capacity(worker_count);
        for i in 0..worker_count {
            let rx = job_rx.clone();
            let tx = event_tx.clone();
            let scanner = scanner.clone();
            let spawned = thread::Builder::new()
                .name(format!("homestead-scan-{i}"))
                .spawn(move || {
                    worker_loop(rx, tx, |snapshot: &TerrainSnapshot| scanner.scan(snapshot))
                });
            match spawned {
                Ok(handle) => workers.push(handle),
                Err(e) => {
                    drop(job_tx);
                    for handle in workers {
                        let _ = handle.join();
                    }
                    return Err(ConfigError::ThreadSpawnFailed {
                        reason: format!("scan worker {i}: {e}"),
                    });
                }
            }
        }
        tracing::debug!(
            "scan coordinator started with {worker_count} workers, queue depth {}",
            config.queue_depth
        );

        Ok(Self {
            job_tx: Some(job_tx),
            job_rx,
            event_rx,
            workers,
            tickets: BTreeMap::new(),
            next_id: 0,
            scan: config.scan,
            policy: config.policy,
            stats: CoordinatorStats::default(),
        })
    }

    /// Capture the region at `coords` and queue it for scanning.
    ///
    /// With `chain_on_rejection`, a failing report opens the next spiral
    /// region and scans that too, repeating until a region passes.
    /// Fails with [`SubmitError::QueueFull`] rather than blocking when
    /// every worker is busy and the queue is at capacity.
    pub fn request_scan(
        &mut self,
        coords: RegionCoords,
        chain_on_rejection: bool,
        registry: &RegionRegistry,
        terrain: &dyn TerrainSource,
    ) -> Result<ScanId, SubmitError> {
        self.submit(coords, chain_on_rejection, 0, false, registry, terrain)
    }

    fn submit(
        &mut self,
        coords: RegionCoords,
        chain: bool,
        hops: u32,
        wait: bool,
        registry: &RegionRegistry,
        terrain: &dyn TerrainSource,
    ) -> Result<ScanId, SubmitError> {
        let job_tx = self.job_tx.as_ref().ok_or(SubmitError::Shutdown)?;

        let footprint = coords.footprint(self.scan.region_size);
        let snapshot = terrain
            .read_block_samples(footprint, self.scan.sample_range())
            .map_err(SubmitError::Capture)?;

        let id = ScanId(self.next_id);
        let job = ScanJob { id, snapshot };
        if wait {
            job_tx.send(job).map_err(|_| SubmitError::Shutdown)?;
        } else {
            job_tx.try_send(job).map_err(|e| match e {
                TrySendError::Full(_) => SubmitError::QueueFull,
                TrySendError::Disconnected(_) => SubmitError::Shutdown,
            })?;
        }

        self.next_id += 1;
        let name = registry.lookup_name(coords).map(str::to_owned);
        self.tickets
            .insert(id, ScanTicket::new(id, coords, name, chain, hops));
        self.stats.requested += 1;
        tracing::debug!("{id} queued for region {coords} (chain hop {hops})");
        Ok(id)
    }

    /// Apply every event already queued by the workers and return the
    /// scans that finished.
    ///
    /// Never blocks. Follow-up scans issued while pumping are left for a
    /// later call, so each rejected report opens exactly one region.
    pub fn pump(
        &mut self,
        registry: &mut RegionRegistry,
        terrain: &dyn TerrainSource,
    ) -> Vec<ScanOutcome> {
        let queued = self.event_rx.len();
        let mut outcomes = Vec::new();
        for _ in 0..queued {
            let Ok(event) = self.event_rx.try_recv() else {
                break;
            };
            outcomes.extend(self.handle(event, registry, terrain));
        }
        outcomes
    }

    /// Wait up to `timeout` for one scan to finish and apply it.
    ///
    /// Returns an empty vector on timeout, or at once if nothing is in
    /// flight.
    pub fn pump_timeout(
        &mut self,
        registry: &mut RegionRegistry,
        terrain: &dyn TerrainSource,
        timeout: Duration,
    ) -> Vec<ScanOutcome> {
        let deadline = Instant::now() + timeout;
        while !self.tickets.is_empty() {
            let Ok(event) = self.event_rx.recv_deadline(deadline) else {
                break;
            };
            if let Some(outcome) = self.handle(event, registry, terrain) {
                return vec![outcome];
            }
        }
        Vec::new()
    }

    fn handle(
        &mut self,
        event: ScanEvent,
        registry: &mut RegionRegistry,
        terrain: &dyn TerrainSource,
    ) -> Option<ScanOutcome> {
        match event {
            ScanEvent::Started { id } => {
                if let Some(ticket) = self.tickets.get_mut(&id) {
                    ticket.start();
                }
                None
            }
            ScanEvent::Finished { id, report } => {
                let Some(mut ticket) = self.tickets.remove(&id) else {
                    tracing::warn!("{id} finished but is not in flight");
                    return None;
                };
                ticket.complete();
                self.stats.completed += 1;
                Some(self.resolve(ticket, report, registry, terrain))
            }
        }
    }

    fn resolve(
        &mut self,
        ticket: ScanTicket,
        report: ScanReport,
        registry: &mut RegionRegistry,
        terrain: &dyn TerrainSource,
    ) -> ScanOutcome {
        let coords = ticket.coords();
        let verdict = self.policy.evaluate(&report);

        let current = registry.lookup_name(coords);
        if current != ticket.name_at_request() {
            tracing::warn!(
                "discarding {} of region {coords}: name changed from {:?} to {:?} during the scan",
                ticket.id(),
                ticket.name_at_request(),
                current,
            );
            self.stats.stale += 1;
            return ScanOutcome {
                ticket,
                report,
                verdict,
                resolution: Resolution::Stale,
            };
        }
        self.log_results(coords, current.unwrap_or("wilderness"), &report, verdict);

        let resolution = if verdict.is_accepted() {
            self.stats.accepted += 1;
            Resolution::Accepted
        } else if !ticket.chain() {
            self.stats.rejected += 1;
            Resolution::Rejected
        } else {
            self.stats.rejected += 1;
            self.stats.chained += 1;
            let opened = registry.add_region();
            let hops = ticket.hops() + 1;
            tracing::debug!("chain from {coords} advanced to {opened} after {hops} rejections");
            // Blocks at most until one worker dequeues; workers never wait on this thread.
            let next_scan = match self.submit(opened, true, hops, true, registry, terrain) {
                Ok(id) => Some(id),
                Err(e) => {
                    tracing::warn!("could not scan newly opened region {opened}: {e}");
                    None
                }
            };
            Resolution::Chained { opened, next_scan }
        };

        ScanOutcome {
            ticket,
            report,
            verdict,
            resolution,
        }
    }

    fn log_results(&self, coords: RegionCoords, name: &str, report: &ScanReport, verdict: Verdict) {
        let ores = OreKind::ALL
            .iter()
            .map(|&kind| format!("{} {}", kind.label(), report.ore(kind)))
            .collect::<Vec<_>>()
            .join(", ");
        tracing::info!(
            "scan results for region \"{name}\" at {coords}: wood {} (min {}), {ores}, \
             resource score {} (min {}), placed {} (max {}), examined {}, gaps {}",
            report.wood(),
            self.policy.wood_minimum,
            report.resource_score(),
            self.policy.resource_minimum,
            report.placed(),
            self.policy.max_placed(),
            report.examined(),
            report.gaps(),
        );
        tracing::info!("region \"{name}\": {verdict}");
    }

    /// The ticket for an in-flight scan.
    pub fn ticket(&self, id: ScanId) -> Option<&ScanTicket> {
        self.tickets.get(&id)
    }

    /// Every in-flight scan, oldest first.
    pub fn tickets(&self) -> impl Iterator<Item = &ScanTicket> {
        self.tickets.values()
    }

    /// Number of scans requested but not yet applied.
    pub fn in_flight(&self) -> usize {
        self.tickets.len()
    }

    /// Running totals.
    pub fn stats(&self) -> CoordinatorStats {
        self.stats
    }

    /// Number of live worker threads.
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Stop accepting scans, drop queued jobs and join the workers.
    ///
    /// Scans a worker is already running are allowed to finish; their
    /// reports are never applied. Calling `shutdown` twice is harmless.
    pub fn shutdown(&mut self) -> ShutdownReport {
        let start = Instant::now();
        self.job_tx = None;
        while self.job_rx.try_recv().is_ok() {}

        let mut workers_joined = 0;
        for handle in self.workers.drain(..) {
            if handle.join().is_ok() {
                workers_joined += 1;
            }
        }

        let scans_discarded = self.tickets.len();
        self.tickets.clear();
        if scans_discarded > 0 {
            tracing::debug!("discarded {scans_discarded} unfinished scans at shutdown");
        }

        ShutdownReport {
            total_ms: start.elapsed().as_millis() as u64,
            workers_joined,
            scans_discarded,
        }
    }
}

impl Drop for ScanCoordinator {
    fn drop(&mut self) {
        if self.job_tx.is_some() || !self.workers.is_empty() {
            self.shutdown();
        }
    }
}
