//! Espresso Picker - catalog service for an espresso machine comparison site
//!
//! Keeps the machine catalog available from a persisted snapshot, refreshes
//! it from the remote table, and renders every spec for display.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod remote;
pub mod sitemap;
pub mod tasks;

pub use api::AppState;
pub use catalog::CatalogCache;
pub use config::Config;
pub use tasks::spawn_silent_refresh;
