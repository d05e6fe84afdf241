//! Coordinator configuration and validation.

use std::error::Error;
use std::fmt;

use homestead_scan::{HabitabilityPolicy, PolicyError, ScanConfig, ScanConfigError};

/// Configuration for a [`ScanCoordinator`](crate::ScanCoordinator).
#[derive(Clone, Debug)]
pub struct CoordinatorConfig {
    /// Number of scan worker threads. `None` = auto-detect.
    pub worker_count: Option<usize>,
    /// Capacity of the job queue between the owning thread and the
    /// workers. Default: 4. Minimum: 1.
    pub queue_depth: usize,
    /// Scan geometry.
    pub scan: ScanConfig,
    /// Acceptance thresholds.
    pub policy: HabitabilityPolicy,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            worker_count: None,
            queue_depth: 4,
            scan: ScanConfig::default(),
            policy: HabitabilityPolicy::default(),
        }
    }
}

impl CoordinatorConfig {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.queue_depth == 0 {
            return Err(ConfigError::QueueDepthZero);
        }
        self.scan.validate()?;
        self.policy.validate()?;
        Ok(())
    }

    /// Resolve the actual worker count, applying auto-detection if `None`.
    ///
    /// Explicit values are clamped to `[1, 16]`. Scans are large and
    /// infrequent, so auto-detection stays small: half the available
    /// cores, clamped to `[1, 4]`.
    pub fn resolved_worker_count(&self) -> usize {
        match self.worker_count {
            Some(n) => n.clamp(1, 16),
            None => {
                let cpus = std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(2);
                (cpus / 2).clamp(1, 4)
            }
        }
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while building a coordinator.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Scan geometry is invalid.
    Scan(ScanConfigError),
    /// Acceptance policy is invalid.
    Policy(PolicyError),
    /// `queue_depth` is zero.
    QueueDepthZero,
    /// A worker thread could not be spawned.
    ThreadSpawnFailed {
        /// Description of the failure.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scan(e) => write!(f, "scan: {e}"),
            Self::Policy(e) => write!(f, "policy: {e}"),
            Self::QueueDepthZero => write!(f, "queue_depth must be at least 1"),
            Self::ThreadSpawnFailed { reason } => write!(f, "thread spawn failed: {reason}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Scan(e) => Some(e),
            Self::Policy(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ScanConfigError> for ConfigError {
    fn from(e: ScanConfigError) -> Self {
        Self::Scan(e)
    }
}

impl From<PolicyError> for ConfigError {
    fn from(e: PolicyError) -> Self {
        Self::Policy(e)
    }
}
