//! Cache Observer Module
//!
//! Everything the catalog cache swallows is reported here instead. The
//! default observer writes to `tracing`; tests install a recorder.

use std::sync::Mutex;

use tracing::{debug, error, info, warn};

/// Something the catalog cache did or failed to do.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheEvent {
    /// Persisted snapshot read into memory at startup
    Hydrated { count: usize },
    /// Startup found a persisted catalog and skipped the fetch
    StartupFetchSkipped { count: usize },
    /// Startup found nothing persisted and is fetching
    StartupFetch,
    FetchStarted { silent: bool },
    FetchSucceeded { count: usize },
    /// Fetch failed or returned no rows; the reason is the error message
    FetchFailed { reason: String },
    /// A failed fetch was answered from the persisted snapshot
    FellBackToStored { count: usize },
    /// A failed fetch had nothing persisted to fall back on
    NothingStored,
    StorageReadFailed { reason: String },
    StorageWriteFailed { reason: String },
    /// Visibility check found a stale snapshot and started a silent refresh
    BackgroundRefreshTriggered { age_ms: i64 },
    Cleared,
}

/// Receives cache events. Must not block.
pub trait CacheObserver: Send + Sync {
    fn on_event(&self, event: &CacheEvent);
}

// == Tracing Observer ==
/// Logs events at a level matching their severity.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl CacheObserver for TracingObserver {
    fn on_event(&self, event: &CacheEvent) {
        match event {
            CacheEvent::Hydrated { count } => {
                info!(count, "Loaded machines from persisted catalog")
            }
            CacheEvent::StartupFetchSkipped { count } => {
                info!(count, "Using persisted catalog, skipping initial fetch")
            }
            CacheEvent::StartupFetch => info!("No persisted catalog, attempting initial fetch"),
            CacheEvent::FetchStarted { silent } => debug!(silent, "Fetching machines"),
            CacheEvent::FetchSucceeded { count } => {
                info!(count, "Successfully loaded machines")
            }
            CacheEvent::FetchFailed { reason } => error!(%reason, "Error fetching machines"),
            CacheEvent::FellBackToStored { count } => {
                info!(count, "Using persisted catalog after failed fetch")
            }
            CacheEvent::NothingStored => info!("No persisted catalog available after failed fetch"),
            CacheEvent::StorageReadFailed { reason } => {
                warn!(%reason, "Failed to read persisted catalog")
            }
            CacheEvent::StorageWriteFailed { reason } => {
                warn!(%reason, "Failed to write persisted catalog")
            }
            CacheEvent::BackgroundRefreshTriggered { age_ms } => {
                info!(age_ms, "Catalog is stale, starting background refresh")
            }
            CacheEvent::Cleared => info!("Persisted catalog cleared"),
        }
    }
}

// == Recording Observer ==
/// Keeps every event in order, for assertions.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<CacheEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<CacheEvent> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Whether any recorded event satisfies `pred`.
    pub fn saw(&self, pred: impl Fn(&CacheEvent) -> bool) -> bool {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .any(pred)
    }
}

impl CacheObserver for RecordingObserver {
    fn on_event(&self, event: &CacheEvent) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_observer_keeps_order() {
        let observer = RecordingObserver::new();
        observer.on_event(&CacheEvent::StartupFetch);
        observer.on_event(&CacheEvent::FetchSucceeded { count: 3 });

        assert_eq!(
            observer.events(),
            vec![
                CacheEvent::StartupFetch,
                CacheEvent::FetchSucceeded { count: 3 }
            ]
        );
        assert!(observer.saw(|e| matches!(e, CacheEvent::FetchSucceeded { .. })));
        assert!(!observer.saw(|e| matches!(e, CacheEvent::Cleared)));
    }

    #[test]
    fn test_tracing_observer_accepts_every_event() {
        let observer = TracingObserver;
        observer.on_event(&CacheEvent::FetchFailed {
            reason: "timeout".to_string(),
        });
        observer.on_event(&CacheEvent::Cleared);
    }
}
