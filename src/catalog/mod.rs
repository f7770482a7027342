//! Catalog Module
//!
//! The machine catalog cache: in-memory state, its persisted snapshot, and
//! the policy deciding when to fetch again.

mod clock;
mod entry;
mod observer;
mod stats;
mod storage;
mod store;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use observer::{CacheEvent, CacheObserver, RecordingObserver, TracingObserver};
pub use stats::RefreshStats;
pub use storage::{FileStorage, MemoryStorage, SnapshotStorage};
pub use store::{CatalogCache, CatalogSnapshot, CACHE_KEY, DEFAULT_STALE_AFTER};
