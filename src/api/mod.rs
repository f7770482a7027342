//! API Module
//!
//! HTTP handlers and routing for the catalog server.
//!
//! # Endpoints
//! - `GET /api/machines` - Current catalog
//! - `GET /api/machines/:id` - Formatted spec sheet
//! - `GET /api/compare?ids=a,b` - Spec sheets side by side
//! - `POST /api/machines/refresh` - Fetch the catalog now
//! - `POST /api/machines/visible` - Refresh in the background if stale
//! - `DELETE /api/machines/cache` - Drop the persisted snapshot
//! - `GET /api/machines/:id/image` - Signed image for one machine
//! - `GET /api/images?ids=a,b` - Signed images for several machines
//! - `GET /sitemap.xml` - Sitemap
//! - `GET /debug-env` - Credential presence report
//! - `GET /stats` - Refresh counters
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
