//! Catalog Cache Module
//!
//! Keeps the machine list in memory, mirrors it to a persisted snapshot, and
//! decides when the remote table is worth asking again. Availability wins
//! over freshness: callers always get some list, possibly stale, possibly
//! empty, and never an error.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::{self, JoinHandle};

use crate::catalog::{
    CacheEntry, CacheEvent, CacheObserver, Clock, RefreshStats, SnapshotStorage, SystemClock,
    TracingObserver,
};
use crate::error::{RemoteError, StorageError};
use crate::models::MachineRecord;
use crate::remote::MachineSource;
use crate::tasks::spawn_silent_refresh;

/// Storage slot holding the catalog snapshot.
pub const CACHE_KEY: &str = "machinesCache";

/// Snapshots older than this are refreshed in the background when viewed.
pub const DEFAULT_STALE_AFTER: Duration = Duration::from_secs(60 * 60);

// == Catalog Snapshot ==
/// In-memory view handed to readers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSnapshot {
    pub machines: Vec<MachineRecord>,
    /// True while a non-silent refresh is in flight
    pub loading: bool,
    /// Unix milliseconds of the last successful fetch in this process, 0 if none
    pub last_updated: i64,
}

// == Catalog Cache ==
/// The machine catalog with its persistence and refresh policy.
///
/// `refresh` is not single-flight: two overlapping calls both fetch and both
/// write, and whichever finishes last owns the snapshot.
pub struct CatalogCache {
    state: RwLock<CatalogSnapshot>,
    stats: Mutex<RefreshStats>,
    storage: Arc<dyn SnapshotStorage>,
    source: Arc<dyn MachineSource>,
    clock: Arc<dyn Clock>,
    observer: Arc<dyn CacheObserver>,
    stale_after: Duration,
}

impl CatalogCache {
    // == Constructor ==
    /// Creates an empty cache. Call [`CatalogCache::start`] to hydrate it.
    pub fn new(storage: Arc<dyn SnapshotStorage>, source: Arc<dyn MachineSource>) -> Self {
        Self {
            state: RwLock::new(CatalogSnapshot::default()),
            stats: Mutex::new(RefreshStats::new()),
            storage,
            source,
            clock: Arc::new(SystemClock),
            observer: Arc::new(TracingObserver),
            stale_after: DEFAULT_STALE_AFTER,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn CacheObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_stale_after(mut self, stale_after: Duration) -> Self {
        self.stale_after = stale_after;
        self
    }

    // == Load ==
    /// Machines in the persisted snapshot, regardless of age.
    ///
    /// Empty if nothing is persisted or the snapshot can't be read.
    pub fn load(&self) -> Vec<MachineRecord> {
        self.read_entry().map(|entry| entry.data).unwrap_or_default()
    }

    // == Refresh ==
    /// Fetches the whole catalog and replaces memory and storage with it.
    ///
    /// A silent refresh leaves the loading flag alone. On any failure,
    /// including an empty result, memory falls back to the persisted
    /// snapshot when there is one and is otherwise left as it was.
    pub async fn refresh(&self, silent: bool) {
        if !silent {
            self.state.write().await.loading = true;
        }
        self.record(RefreshStats::record_fetch);
        self.emit(CacheEvent::FetchStarted { silent });

        let fetched = match self.source.fetch_machines().await {
            Ok(machines) if machines.is_empty() => Err(RemoteError::Empty),
            other => other,
        };

        match fetched {
            Ok(machines) => {
                let now = self.clock.now_ms();
                let count = machines.len();
                self.persist(&CacheEntry::new(machines.clone(), now)).await;

                let mut state = self.state.write().await;
                state.machines = machines;
                state.last_updated = now;
                if !silent {
                    state.loading = false;
                }
                drop(state);

                self.record(RefreshStats::record_success);
                self.emit(CacheEvent::FetchSucceeded { count });
            }
            Err(e) => {
                self.record(RefreshStats::record_failure);
                self.emit(CacheEvent::FetchFailed {
                    reason: e.to_string(),
                });

                let stored = self.load_off_thread().await;
                let fallback = (!stored.is_empty()).then_some(stored.len());

                let mut state = self.state.write().await;
                if fallback.is_some() {
                    state.machines = stored;
                }
                if !silent {
                    state.loading = false;
                }
                drop(state);

                match fallback {
                    Some(count) => {
                        self.record(RefreshStats::record_fallback);
                        self.emit(CacheEvent::FellBackToStored { count });
                    }
                    None => self.emit(CacheEvent::NothingStored),
                }
            }
        }
    }

    // == Clear ==
    /// Deletes the persisted snapshot. Memory is untouched.
    pub fn clear(&self) {
        match self.storage.remove(CACHE_KEY) {
            Ok(()) => self.emit(CacheEvent::Cleared),
            Err(e) => self.storage_failed(CacheEvent::StorageWriteFailed {
                reason: e.to_string(),
            }),
        }
    }

    // == Startup ==
    /// Hydrates memory from storage, fetching only when nothing is persisted.
    ///
    /// Returns whether a fetch was made.
    pub async fn start(&self) -> bool {
        let stored = self.load_off_thread().await;
        if stored.is_empty() {
            self.emit(CacheEvent::StartupFetch);
            self.refresh(false).await;
            return true;
        }

        let count = stored.len();
        self.state.write().await.machines = stored;
        self.emit(CacheEvent::Hydrated { count });
        self.emit(CacheEvent::StartupFetchSkipped { count });
        false
    }

    // == Visibility ==
    /// Called when the catalog is viewed again. Starts a silent background
    /// refresh if the persisted snapshot is older than the staleness window.
    pub fn on_visible(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        let entry = self.read_entry()?;
        if entry.data.is_empty() {
            return None;
        }

        let now = self.clock.now_ms();
        if !entry.is_older_than(self.stale_after, now) {
            return None;
        }

        self.emit(CacheEvent::BackgroundRefreshTriggered {
            age_ms: entry.age_ms(now),
        });
        Some(spawn_silent_refresh(Arc::clone(self)))
    }

    // == Readers ==
    pub async fn snapshot(&self) -> CatalogSnapshot {
        self.state.read().await.clone()
    }

    pub async fn machines(&self) -> Vec<MachineRecord> {
        self.state.read().await.machines.clone()
    }

    pub async fn machine(&self, id: &str) -> Option<MachineRecord> {
        self.state
            .read()
            .await
            .machines
            .iter()
            .find(|m| m.id == id)
            .cloned()
    }

    pub fn stats(&self) -> RefreshStats {
        self.stats.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn stale_after(&self) -> Duration {
        self.stale_after
    }

    // == Internals ==
    fn read_entry(&self) -> Option<CacheEntry> {
        let raw = self.storage.get(CACHE_KEY);
        self.decode_entry(raw)
    }

    /// [`CatalogCache::load`] for async callers; file I/O runs on the
    /// blocking pool.
    async fn load_off_thread(&self) -> Vec<MachineRecord> {
        let raw = self.storage_call(|storage| storage.get(CACHE_KEY)).await;
        self.decode_entry(raw)
            .map(|entry| entry.data)
            .unwrap_or_default()
    }

    fn decode_entry(&self, raw: Result<Option<String>, StorageError>) -> Option<CacheEntry> {
        let raw = match raw {
            Ok(raw) => raw?,
            Err(e) => {
                self.storage_failed(CacheEvent::StorageReadFailed {
                    reason: e.to_string(),
                });
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(entry) => Some(entry),
            Err(e) => {
                self.storage_failed(CacheEvent::StorageReadFailed {
                    reason: e.to_string(),
                });
                None
            }
        }
    }

    async fn persist(&self, entry: &CacheEntry) {
        let result = match serde_json::to_string(entry) {
            Ok(json) => {
                self.storage_call(move |storage| storage.set(CACHE_KEY, &json))
                    .await
            }
            Err(e) => Err(StorageError::from(e)),
        };

        if let Err(e) = result {
            self.storage_failed(CacheEvent::StorageWriteFailed {
                reason: e.to_string(),
            });
        }
    }

    /// Runs a storage operation on the blocking pool so disk access never
    /// stalls a runtime worker.
    async fn storage_call<T, F>(&self, op: F) -> Result<T, StorageError>
    where
        T: Send + 'static,
        F: FnOnce(&dyn SnapshotStorage) -> Result<T, StorageError> + Send + 'static,
    {
        let storage = Arc::clone(&self.storage);
        match task::spawn_blocking(move || op(storage.as_ref())).await {
            Ok(result) => result,
            Err(e) => Err(std::io::Error::other(e.to_string()).into()),
        }
    }

    fn storage_failed(&self, event: CacheEvent) {
        self.record(RefreshStats::record_storage_error);
        self.emit(event);
    }

    fn record(&self, update: impl FnOnce(&mut RefreshStats)) {
        let mut stats = self.stats.lock().unwrap_or_else(|e| e.into_inner());
        update(&mut *stats);
    }

    fn emit(&self, event: CacheEvent) {
        self.observer.on_event(&event);
    }
}
