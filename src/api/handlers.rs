//! API Handlers
//!
//! HTTP request handlers for each catalog endpoint. Handlers stay thin: the
//! catalog cache, the formatting layer and the image helpers do the work.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::catalog::{CatalogCache, FileStorage};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::format::SpecSheet;
use crate::models::{
    CatalogResponse, ClearResponse, DebugEnvResponse, HealthResponse, MachineImage,
    StatsResponse, VisibilityResponse,
};
use crate::remote::{
    fetch_machine_image, fetch_machine_images, ImageSigner, MachineSource, SupabaseClient,
    BATCH_IMAGE_WIDTH, DETAIL_IMAGE_WIDTH,
};
use crate::sitemap::{render_sitemap, sitemap_urls};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The machine catalog
    pub catalog: Arc<CatalogCache>,
    /// Direct table access for sitemap and image lookups
    pub source: Arc<dyn MachineSource>,
    /// Signs image URLs
    pub signer: Arc<dyn ImageSigner>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        catalog: Arc<CatalogCache>,
        source: Arc<dyn MachineSource>,
        signer: Arc<dyn ImageSigner>,
        config: Config,
    ) -> Self {
        Self {
            catalog,
            source,
            signer,
            config: Arc::new(config),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// One [`SupabaseClient`] serves as both the machine source and the image
    /// signer; the snapshot is persisted under `config.cache_dir`.
    pub fn from_config(config: &Config) -> Self {
        let client = Arc::new(SupabaseClient::from_config(config));
        let source: Arc<dyn MachineSource> = client.clone();
        let signer: Arc<dyn ImageSigner> = client;

        let storage = Arc::new(FileStorage::new(config.cache_dir.clone()));
        let catalog = CatalogCache::new(storage, Arc::clone(&source))
            .with_stale_after(config.stale_after());

        Self::new(Arc::new(catalog), source, signer, config.clone())
    }
}

// == Query Parameters ==
#[derive(Debug, Deserialize)]
pub struct IdsQuery {
    /// Comma-separated machine ids
    pub ids: Option<String>,
    /// Image width in pixels
    pub w: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct WidthQuery {
    pub w: Option<u32>,
}

/// Splits `a, b,,c` into `["a", "b", "c"]`; an empty list is a bad request.
fn parse_ids(raw: Option<&str>) -> Result<Vec<String>> {
    let ids: Vec<String> = raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();

    if ids.is_empty() {
        return Err(AppError::InvalidRequest(
            "ids query parameter is required".to_string(),
        ));
    }
    Ok(ids)
}

// == Catalog ==
/// Handler for GET /api/machines
pub async fn list_machines_handler(State(state): State<AppState>) -> Json<CatalogResponse> {
    Json(CatalogResponse::from(state.catalog.snapshot().await))
}

/// Handler for GET /api/machines/:id
///
/// Returns the machine's formatted spec sheet.
pub async fn machine_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SpecSheet>> {
    let machine = state
        .catalog
        .machine(&id)
        .await
        .ok_or(AppError::NotFound(id))?;

    Ok(Json(SpecSheet::from(&machine)))
}

/// Handler for GET /api/compare?ids=a,b
///
/// Spec sheets for the requested machines in request order. Unknown ids
/// are skipped.
pub async fn compare_handler(
    State(state): State<AppState>,
    Query(query): Query<IdsQuery>,
) -> Result<Json<Vec<SpecSheet>>> {
    let ids = parse_ids(query.ids.as_deref())?;
    let machines = state.catalog.machines().await;

    let sheets = ids
        .iter()
        .filter_map(|id| machines.iter().find(|m| &m.id == id))
        .map(SpecSheet::from)
        .collect();

    Ok(Json(sheets))
}

/// Handler for POST /api/machines/refresh
pub async fn refresh_handler(State(state): State<AppState>) -> Json<CatalogResponse> {
    state.catalog.refresh(false).await;
    Json(CatalogResponse::from(state.catalog.snapshot().await))
}

/// Handler for POST /api/machines/visible
///
/// The catalog page came back into view; refresh in the background if stale.
pub async fn visible_handler(State(state): State<AppState>) -> Json<VisibilityResponse> {
    let refresh_triggered = state.catalog.on_visible().is_some();
    Json(VisibilityResponse { refresh_triggered })
}

/// Handler for DELETE /api/machines/cache
pub async fn clear_cache_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    state.catalog.clear();
    Json(ClearResponse::new())
}

// == Images ==
/// Handler for GET /api/machines/:id/image
pub async fn machine_image_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<WidthQuery>,
) -> Result<Json<MachineImage>> {
    let width = query.w.unwrap_or(DETAIL_IMAGE_WIDTH);
    let image = fetch_machine_image(
        state.source.as_ref(),
        state.signer.as_ref(),
        &id,
        width,
    )
    .await
    .ok_or(AppError::ImageNotFound(id))?;

    Ok(Json(image))
}

/// Handler for GET /api/images?ids=a,b
pub async fn batch_images_handler(
    State(state): State<AppState>,
    Query(query): Query<IdsQuery>,
) -> Result<Json<HashMap<String, Option<MachineImage>>>> {
    let ids = parse_ids(query.ids.as_deref())?;
    let width = query.w.unwrap_or(BATCH_IMAGE_WIDTH);
    let images =
        fetch_machine_images(state.source.as_ref(), state.signer.as_ref(), &ids, width).await;

    Ok(Json(images))
}

// == Site ==
/// Handler for GET /sitemap.xml
pub async fn sitemap_handler(State(state): State<AppState>) -> impl IntoResponse {
    let urls = sitemap_urls(
        state.source.as_ref(),
        state.config.has_store_credentials(),
        &state.config.site_url,
    )
    .await;
    let xml = render_sitemap(&urls, chrono::Utc::now());

    (
        [
            (header::CONTENT_TYPE, "application/xml"),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        xml,
    )
}

/// Handler for GET /debug-env
///
/// Reports credential presence and lengths, never the values.
pub async fn debug_env_handler(State(state): State<AppState>) -> Json<DebugEnvResponse> {
    let mut env_keys: Vec<String> = std::env::vars()
        .map(|(name, _)| name)
        .filter(|name| name.contains("SUPABASE"))
        .collect();
    env_keys.sort();

    Json(DebugEnvResponse::new(
        state.config.supabase_url.as_deref(),
        state.config.supabase_anon_key.as_deref(),
        env_keys,
    ))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let snapshot = state.catalog.snapshot().await;
    Json(StatsResponse::new(
        &state.catalog.stats(),
        snapshot.machines.len(),
        snapshot.last_updated,
    ))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
