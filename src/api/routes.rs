//! API Routes
//!
//! Configures the Axum router with all catalog endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    batch_images_handler, clear_cache_handler, compare_handler, debug_env_handler,
    health_handler, list_machines_handler, machine_handler, machine_image_handler,
    refresh_handler, sitemap_handler, stats_handler, visible_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/machines", get(list_machines_handler))
        .route("/api/machines/refresh", post(refresh_handler))
        .route("/api/machines/visible", post(visible_handler))
        .route("/api/machines/cache", delete(clear_cache_handler))
        .route("/api/machines/:id", get(machine_handler))
        .route("/api/machines/:id/image", get(machine_image_handler))
        .route("/api/compare", get(compare_handler))
        .route("/api/images", get(batch_images_handler))
        .route("/sitemap.xml", get(sitemap_handler))
        .route("/debug-env", get(debug_env_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogCache, MemoryStorage};
    use crate::config::Config;
    use crate::remote::SupabaseClient;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::util::ServiceExt;

    /// App wired to an unconfigured client, so nothing leaves the process.
    fn create_test_app() -> Router {
        let client = Arc::new(SupabaseClient::new(None, None, "bucket", 60));
        let catalog = Arc::new(CatalogCache::new(
            Arc::new(MemoryStorage::new()),
            client.clone(),
        ));
        let state = AppState::new(catalog, client.clone(), client, Config::default());
        create_router(state)
    }

    async fn status_of(method: &str, uri: &str) -> StatusCode {
        create_test_app()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        assert_eq!(status_of("GET", "/health").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_stats_endpoint() {
        assert_eq!(status_of("GET", "/stats").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_refresh_without_credentials_still_answers() {
        assert_eq!(
            status_of("POST", "/api/machines/refresh").await,
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn test_unknown_machine_not_found() {
        assert_eq!(
            status_of("GET", "/api/machines/nonexistent").await,
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_compare_requires_ids() {
        assert_eq!(
            status_of("GET", "/api/compare").await,
            StatusCode::BAD_REQUEST
        );
    }
}
