//! Scan worker pool.
//!
//! Each worker receives a [`ScanJob`] over a crossbeam channel, reports
//! that it has started, runs the flood fill over the job's snapshot, and
//! sends the report back on the shared event channel. Workers never see
//! the registry.

use std::panic::{self, AssertUnwindSafe};

use crossbeam_channel::{Receiver, Sender};
use homestead_core::TerrainSnapshot;
use homestead_scan::ScanReport;

use crate::ticket::ScanId;

/// A scan dispatched to a worker. The worker owns the snapshot.
pub(crate) struct ScanJob {
    pub(crate) id: ScanId,
    pub(crate) snapshot: TerrainSnapshot,
}

/// Progress reported from a worker to the owning thread.
#[derive(Debug)]
pub(crate) enum ScanEvent {
    /// A worker picked the job up.
    Started { id: ScanId },
    /// The scan finished; `report` is all zeros if the scanner panicked.
    Finished { id: ScanId, report: ScanReport },
}

/// Main loop for a scan worker thread.
///
/// Runs `scan` on each job until the job channel is closed (sender
/// dropped) or the owning side stops listening. A panic inside `scan`
/// is contained to its job.
pub(crate) fn worker_loop<F>(job_rx: Receiver<ScanJob>, event_tx: Sender<ScanEvent>, scan: F)
where
    F: Fn(&TerrainSnapshot) -> ScanReport,
{
    while let Ok(job) = job_rx.recv() {
        let id = job.id;
        if event_tx.send(ScanEvent::Started { id }).is_err() {
            break;
        }

        let report = match panic::catch_unwind(AssertUnwindSafe(|| scan(&job.snapshot))) {
            Ok(report) => report,
            Err(_) => {
                tracing::warn!("{id} panicked in the scanner, reporting an empty region");
                ScanReport::empty()
            }
        };

        if event_tx.send(ScanEvent::Finished { id, report }).is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homestead_core::{BlockKind, HeightRange, OreKind};
    use homestead_scan::HabitabilityScanner;
    use std::thread;

    fn snapshot() -> TerrainSnapshot {
        let mut snap =
            TerrainSnapshot::filled(4, 4, HeightRange { min: 0, max: 4 }, BlockKind::Air).unwrap();
        snap.set(1, 1, 1, BlockKind::Ore(OreKind::Emerald));
        snap
    }

    #[test]
    fn worker_reports_start_then_finish() {
        let (job_tx, job_rx) = crossbeam_channel::bounded(2);
        let (event_tx, event_rx) = crossbeam_channel::unbounded();
        let handle = thread::spawn(move || {
            let scanner = HabitabilityScanner::new(-1);
            worker_loop(job_rx, event_tx, |snap: &TerrainSnapshot| scanner.scan(snap));
        });

        job_tx
            .send(ScanJob {
                id: ScanId(1),
                snapshot: snapshot(),
            })
            .unwrap();
        drop(job_tx);

        match event_rx.recv().unwrap() {
            ScanEvent::Started { id } => assert_eq!(id, ScanId(1)),
            other => panic!("expected Started, got {other:?}"),
        }
        match event_rx.recv().unwrap() {
            ScanEvent::Finished { id, report } => {
                assert_eq!(id, ScanId(1));
                assert_eq!(report.ore(OreKind::Emerald), 1);
            }
            other => panic!("expected Finished, got {other:?}"),
        }

        // Channel closed: the worker exits.
        handle.join().unwrap();
        assert!(event_rx.recv().is_err());
    }

    #[test]
    fn worker_exits_when_events_are_dropped() {
        let (job_tx, job_rx) = crossbeam_channel::bounded(1);
        let (event_tx, event_rx) = crossbeam_channel::unbounded();
        drop(event_rx);
        let handle = thread::spawn(move || {
            let scanner = HabitabilityScanner::new(-1);
            worker_loop(job_rx, event_tx, |snap: &TerrainSnapshot| scanner.scan(snap));
        });
        job_tx
            .send(ScanJob {
                id: ScanId(2),
                snapshot: snapshot(),
            })
            .unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn scanner_panic_yields_empty_report_and_worker_continues() {
        let (job_tx, job_rx) = crossbeam_channel::bounded(2);
        let (event_tx, event_rx) = crossbeam_channel::unbounded();
        let handle = thread::spawn(move || {
            let scanner = HabitabilityScanner::new(-1);
            worker_loop(job_rx, event_tx, |snap: &TerrainSnapshot| {
                if snap.get(1, 1, 1) == Some(BlockKind::Air) {
                    panic!("scanner blew up");
                }
                scanner.scan(snap)
            });
        });

        let mut broken = snapshot();
        broken.set(1, 1, 1, BlockKind::Air);
        job_tx
            .send(ScanJob {
                id: ScanId(3),
                snapshot: broken,
            })
            .unwrap();
        job_tx
            .send(ScanJob {
                id: ScanId(4),
                snapshot: snapshot(),
            })
            .unwrap();
        drop(job_tx);

        let events: Vec<ScanEvent> = event_rx.iter().collect();
        handle.join().unwrap();
        assert_eq!(events.len(), 4);
        match &events[1] {
            ScanEvent::Finished { id, report } => {
                assert_eq!(*id, ScanId(3));
                assert_eq!(*report, ScanReport::empty());
            }
            other => panic!("expected Finished, got {other:?}"),
        }
        assert!(matches!(events[2], ScanEvent::Started { id: ScanId(4) }));
        match &events[3] {
            ScanEvent::Finished { id, report } => {
                assert_eq!(*id, ScanId(4));
                assert_eq!(report.ore(OreKind::Emerald), 1);
            }
            other => panic!("expected Finished, got {other:?}"),
        }
    }
}
