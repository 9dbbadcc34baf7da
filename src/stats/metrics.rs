//! Archiver counters
//!
//! Counters are updated without taking the registry lock, so they can be read
//! while a long finalization is running.

use std::sync::atomic::{AtomicU64, Ordering};

/// Live counters updated by the archiver
#[derive(Debug, Default)]
pub struct ArchiverStats {
    publishes_registered: AtomicU64,
    publishes_ignored: AtomicU64,
    publishes_failed: AtomicU64,
    sessions_finalized: AtomicU64,
    clips_created: AtomicU64,
    step_failures: AtomicU64,
}

impl ArchiverStats {
    /// Create new stats tracker
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_registered(&self) {
        self.publishes_registered.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_ignored(&self) {
        self.publishes_ignored.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_publish_failed(&self) {
        self.publishes_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_finalized(&self) {
        self.sessions_finalized.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_clips(&self, count: u64) {
        self.clips_created.fetch_add(count, Ordering::Relaxed);
    }

    /// A single adapter call or setup step failed and was skipped
    pub(crate) fn record_step_failure(&self) {
        self.step_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Copy the current counter values
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            publishes_registered: self.publishes_registered.load(Ordering::Relaxed),
            publishes_ignored: self.publishes_ignored.load(Ordering::Relaxed),
            publishes_failed: self.publishes_failed.load(Ordering::Relaxed),
            sessions_finalized: self.sessions_finalized.load(Ordering::Relaxed),
            clips_created: self.clips_created.load(Ordering::Relaxed),
            step_failures: self.step_failures.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`ArchiverStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Publishes that ended with a stored session
    pub publishes_registered: u64,
    /// Publishes skipped because of the reserved prefix or an active session
    pub publishes_ignored: u64,
    /// Publishes that failed before a session was stored
    pub publishes_failed: u64,
    /// Sessions removed and finalized
    pub sessions_finalized: u64,
    /// Clips the archive service confirmed
    pub clips_created: u64,
    /// Individual steps that failed and were skipped
    pub step_failures: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed() {
        assert_eq!(ArchiverStats::new().snapshot(), StatsSnapshot::default());
    }

    #[test]
    fn test_counters() {
        let stats = ArchiverStats::new();
        stats.record_registered();
        stats.record_registered();
        stats.record_ignored();
        stats.record_publish_failed();
        stats.record_finalized();
        stats.record_clips(3);
        stats.record_step_failure();

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.publishes_registered, 2);
        assert_eq!(snapshot.publishes_ignored, 1);
        assert_eq!(snapshot.publishes_failed, 1);
        assert_eq!(snapshot.sessions_finalized, 1);
        assert_eq!(snapshot.clips_created, 3);
        assert_eq!(snapshot.step_failures, 1);
    }
}
