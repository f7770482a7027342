//! Espresso Picker - catalog service for an espresso machine comparison site
//!
//! Serves the machine catalog, spec sheets, signed images and the sitemap.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use espresso_picker::api::{create_router, AppState};
use espresso_picker::Config;

/// Main entry point for the catalog server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the catalog cache over the persisted snapshot
/// 4. Hydrate the catalog in the background, fetching only if nothing is persisted
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "espresso_picker=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Espresso Picker catalog server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, cache_dir={}, stale_after={}s, store_configured={}",
        config.server_port,
        config.cache_dir.display(),
        config.stale_after,
        config.has_store_credentials()
    );
    if !config.has_store_credentials() {
        warn!("Supabase credentials missing; serving persisted catalog only");
    }

    let state = AppState::from_config(&config);

    // Hydrate without holding up the listener; requests see an empty catalog
    // until this finishes.
    let catalog = Arc::clone(&state.catalog);
    let startup_handle = tokio::spawn(async move {
        let fetched = catalog.start().await;
        info!(fetched, "Catalog startup complete");
    });

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(startup_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the startup hydration if it is still running.
async fn shutdown_signal(startup_handle: JoinHandle<()>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if !startup_handle.is_finished() {
        startup_handle.abort();
        warn!("Catalog startup aborted");
    }
}
