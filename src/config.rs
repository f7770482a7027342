//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
/// The store credentials have no default; without them the catalog stays on
/// whatever is persisted locally.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Public origin used for sitemap URLs
    pub site_url: String,
    /// Supabase project URL
    pub supabase_url: Option<String>,
    /// Supabase anonymous API key
    pub supabase_anon_key: Option<String>,
    /// Directory holding the persisted catalog snapshot
    pub cache_dir: PathBuf,
    /// Age in seconds after which viewing the catalog triggers a background refresh
    pub stale_after: u64,
    /// Object store bucket holding machine images
    pub image_bucket: String,
    /// Lifetime in seconds of signed image URLs
    pub signed_url_ttl: u64,
}

/// First non-empty value among `names`.
fn first_var(names: &[&str]) -> Option<String> {
    names
        .iter()
        .find_map(|name| env::var(name).ok().filter(|v| !v.is_empty()))
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `SITE_URL` - Public origin (default: https://espressopicker.com)
    /// - `PUBLIC_SUPABASE_URL` or `SUPABASE_URL` - Store URL (no default)
    /// - `PUBLIC_SUPABASE_ANON_KEY` or `SUPABASE_ANON_KEY` - Store key (no default)
    /// - `CACHE_DIR` - Snapshot directory (default: .cache)
    /// - `CACHE_STALE_AFTER` - Staleness window in seconds (default: 3600)
    /// - `IMAGE_BUCKET` - Image bucket (default: espresso-machine-images)
    /// - `SIGNED_URL_TTL` - Signed URL lifetime in seconds (default: 86400)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            site_url: first_var(&["SITE_URL"])
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.site_url),
            supabase_url: first_var(&["PUBLIC_SUPABASE_URL", "SUPABASE_URL"]),
            supabase_anon_key: first_var(&["PUBLIC_SUPABASE_ANON_KEY", "SUPABASE_ANON_KEY"]),
            cache_dir: first_var(&["CACHE_DIR"])
                .map(PathBuf::from)
                .unwrap_or(defaults.cache_dir),
            stale_after: env::var("CACHE_STALE_AFTER")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.stale_after),
            image_bucket: first_var(&["IMAGE_BUCKET"]).unwrap_or(defaults.image_bucket),
            signed_url_ttl: env::var("SIGNED_URL_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.signed_url_ttl),
        }
    }

    pub fn stale_after(&self) -> Duration {
        Duration::from_secs(self.stale_after)
    }

    pub fn has_store_credentials(&self) -> bool {
        self.supabase_url.is_some() && self.supabase_anon_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            site_url: "https://espressopicker.com".to_string(),
            supabase_url: None,
            supabase_anon_key: None,
            cache_dir: PathBuf::from(".cache"),
            stale_after: 3600,
            image_bucket: "espresso-machine-images".to_string(),
            signed_url_ttl: 60 * 60 * 24,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.site_url, "https://espressopicker.com");
        assert_eq!(config.stale_after(), Duration::from_secs(3600));
        assert_eq!(config.signed_url_ttl, 86_400);
        assert_eq!(config.image_bucket, "espresso-machine-images");
        assert!(!config.has_store_credentials());
    }

    #[test]
    fn test_config_from_env() {
        // Single test touches the environment so parallel tests don't race.
        env::remove_var("SERVER_PORT");
        env::remove_var("CACHE_STALE_AFTER");
        env::remove_var("PUBLIC_SUPABASE_URL");
        env::set_var("SUPABASE_URL", "https://abc.supabase.co");
        env::set_var("PUBLIC_SUPABASE_ANON_KEY", "");
        env::set_var("SUPABASE_ANON_KEY", "anon");
        env::set_var("SITE_URL", "https://staging.espressopicker.com/");

        let config = Config::from_env();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.stale_after, 3600);
        assert_eq!(config.supabase_url.as_deref(), Some("https://abc.supabase.co"));
        assert_eq!(config.supabase_anon_key.as_deref(), Some("anon"));
        assert_eq!(config.site_url, "https://staging.espressopicker.com");
        assert!(config.has_store_credentials());

        env::remove_var("SUPABASE_URL");
        env::remove_var("PUBLIC_SUPABASE_ANON_KEY");
        env::remove_var("SUPABASE_ANON_KEY");
        env::remove_var("SITE_URL");
    }
}
