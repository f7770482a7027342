//! Refresh Statistics Module
//!
//! Counts what the catalog cache did, so failures that are hidden from users
//! stay visible to operators and tests.

use serde::Serialize;

// == Refresh Stats ==
/// Tracks refresh outcomes and storage failures.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RefreshStats {
    /// Remote fetches attempted
    pub fetches: u64,
    /// Fetches that replaced the catalog
    pub successes: u64,
    /// Fetches that failed or returned no rows
    pub failures: u64,
    /// Failures answered from the persisted snapshot
    pub fallbacks: u64,
    /// Local storage reads, writes or deletes that failed
    pub storage_errors: u64,
}

impl RefreshStats {
    // == Constructor ==
    /// Creates a new RefreshStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Success Rate ==
    /// Returns successes / fetches, or 0.0 if nothing was fetched yet.
    pub fn success_rate(&self) -> f64 {
        if self.fetches == 0 {
            0.0
        } else {
            self.successes as f64 / self.fetches as f64
        }
    }

    pub fn record_fetch(&mut self) {
        self.fetches += 1;
    }

    pub fn record_success(&mut self) {
        self.successes += 1;
    }

    pub fn record_failure(&mut self) {
        self.failures += 1;
    }

    pub fn record_fallback(&mut self) {
        self.fallbacks += 1;
    }

    pub fn record_storage_error(&mut self) {
        self.storage_errors += 1;
    }
}
