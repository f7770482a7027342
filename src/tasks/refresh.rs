//! Silent Refresh Task
//!
//! Background refresh started when a stale catalog is viewed again.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::catalog::CatalogCache;

/// Spawns a silent refresh of the catalog.
///
/// The task is best-effort: the cache absorbs every failure, so the handle
/// only matters for callers that want to wait for it or abort it on
/// shutdown.
///
/// # Example
/// ```ignore
/// let handle = spawn_silent_refresh(catalog.clone());
/// // Later, during shutdown:
/// handle.abort();
/// ```
pub fn spawn_silent_refresh(catalog: Arc<CatalogCache>) -> JoinHandle<()> {
    tokio::spawn(async move {
        debug!("Starting silent catalog refresh");
        catalog.refresh(true).await;
        debug!("Silent catalog refresh finished");
    })
}
