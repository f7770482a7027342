//! Cache Entry Module
//!
//! The persisted catalog snapshot: the full machine list plus the time it was
//! captured.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::MachineRecord;

// == Cache Entry ==
/// A complete snapshot of the catalog as stored locally.
///
/// Stored as `{ "data": [...], "timestamp": <unix ms> }`. A snapshot is only
/// ever written whole; there is no partial update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Machines in the order they were fetched
    #[serde(default)]
    pub data: Vec<MachineRecord>,
    /// Capture time (Unix milliseconds)
    #[serde(default)]
    pub timestamp: i64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a snapshot captured at `timestamp`.
    pub fn new(data: Vec<MachineRecord>, timestamp: i64) -> Self {
        Self { data, timestamp }
    }

    // == Age ==
    /// Milliseconds elapsed since capture, never negative.
    pub fn age_ms(&self, now_ms: i64) -> i64 {
        (now_ms - self.timestamp).max(0)
    }

    // == Staleness ==
    /// Whether the snapshot is strictly older than `window`.
    ///
    /// Staleness only decides whether a background refresh is worth trying;
    /// stale data is still served.
    pub fn is_older_than(&self, window: Duration, now_ms: i64) -> bool {
        let window_ms = i64::try_from(window.as_millis()).unwrap_or(i64::MAX);
        self.age_ms(now_ms) > window_ms
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: Duration = Duration::from_secs(3600);

    #[test]
    fn test_missing_fields_decode_as_empty() {
        let entry: CacheEntry = serde_json::from_str("{}").unwrap();
        assert!(entry.data.is_empty());
        assert_eq!(entry.timestamp, 0);
    }

    #[test]
    fn test_wire_shape() {
        let entry = CacheEntry::new(vec![MachineRecord::new("a", "B", "C")], 1_700_000_000_000);
        let json: serde_json::Value = serde_json::to_value(&entry).unwrap();
        assert!(json["data"].is_array());
        assert_eq!(json["timestamp"], 1_700_000_000_000i64);
    }

    #[test]
    fn test_age_is_clamped() {
        let entry = CacheEntry::new(Vec::new(), 10_000);
        assert_eq!(entry.age_ms(12_500), 2_500);
        assert_eq!(entry.age_ms(5_000), 0);
    }

    #[test]
    fn test_staleness_boundary_is_exclusive() {
        let entry = CacheEntry::new(Vec::new(), 0);
        assert!(!entry.is_older_than(HOUR, 3_600_000));
        assert!(entry.is_older_than(HOUR, 3_600_001));
    }
}
