//! Scan coordination for Homestead.
//!
//! The [`ScanCoordinator`] owns a small pool of scan workers. The owning
//! thread captures a terrain snapshot, hands it to a worker, and later
//! drains completions with [`ScanCoordinator::pump`], applying the
//! habitability policy against the registry it owns.
//!
//! ```text
//! Owning thread                                   Scan workers (N)
//!     |                                                 |
//!     |--request_scan()                                 |
//!     |   terrain.read_block_samples()                  |
//!     |   [job_tx: bounded(queue_depth)] ----> job_rx.recv()
//!     |                                        Started
//!     |                                        scanner.scan(snapshot)
//!     |   [event_rx: unbounded] <------------- Finished(report)
//!     |--pump()                                         |
//!     |   policy.evaluate(report)                       |
//!     |   rejected: registry.add_region()               |
//!     |             request_scan(next)                  |
//! ```
//!
//! The registry is never touched off the owning thread.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod coordinator;
pub mod ticket;
mod worker;

pub use config::{ConfigError, CoordinatorConfig};
pub use coordinator::{
    CoordinatorStats, Resolution, ScanCoordinator, ScanOutcome, ShutdownReport, SubmitError,
};
pub use ticket::{ScanId, ScanState, ScanTicket};
