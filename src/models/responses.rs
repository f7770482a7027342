//! Response DTOs for the catalog API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::catalog::{CatalogSnapshot, RefreshStats};
use crate::models::MachineRecord;

/// Response body for the catalog listing (GET /api/machines)
#[derive(Debug, Clone, Serialize)]
pub struct CatalogResponse {
    /// Machines in brand order
    pub machines: Vec<MachineRecord>,
    /// Number of machines
    pub count: usize,
    /// Whether a non-silent refresh is in flight
    pub loading: bool,
    /// Unix milliseconds of the last successful fetch in this process, 0 if none
    pub last_updated: i64,
}

impl From<CatalogSnapshot> for CatalogResponse {
    fn from(snapshot: CatalogSnapshot) -> Self {
        Self {
            count: snapshot.machines.len(),
            machines: snapshot.machines,
            loading: snapshot.loading,
            last_updated: snapshot.last_updated,
        }
    }
}

/// Response body for the visibility hook (POST /api/machines/visible)
#[derive(Debug, Clone, Serialize)]
pub struct VisibilityResponse {
    /// Whether a silent background refresh was started
    pub refresh_triggered: bool,
}

/// Response body for clearing the persisted catalog (DELETE /api/machines/cache)
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Success message
    pub message: String,
}

impl ClearResponse {
    /// Creates a new ClearResponse
    pub fn new() -> Self {
        Self {
            message: "Persisted catalog cleared".to_string(),
        }
    }
}

impl Default for ClearResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Remote fetches attempted
    pub fetches: u64,
    /// Remote fetches that replaced the catalog
    pub successes: u64,
    /// Remote fetches that failed or came back empty
    pub failures: u64,
    /// Failures answered from the persisted snapshot
    pub fallbacks: u64,
    /// Local storage reads or writes that failed
    pub storage_errors: u64,
    /// Machines currently held in memory
    pub total_machines: usize,
    /// Share of fetches that succeeded
    pub success_rate: f64,
    /// Unix milliseconds of the last successful fetch, 0 if none
    pub last_updated: i64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from the cache counters and current state
    pub fn new(stats: &RefreshStats, total_machines: usize, last_updated: i64) -> Self {
        Self {
            fetches: stats.fetches,
            successes: stats.successes,
            failures: stats.failures,
            fallbacks: stats.fallbacks,
            storage_errors: stats.storage_errors,
            total_machines,
            success_rate: stats.success_rate(),
            last_updated,
        }
    }
}

/// Response body for the debug endpoint (GET /debug-env)
///
/// Reports whether the remote store credentials are present without
/// revealing them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugEnvResponse {
    pub has_supabase_url: bool,
    pub has_supabase_key: bool,
    pub supabase_url_length: usize,
    pub supabase_key_length: usize,
    /// Names of environment variables mentioning SUPABASE
    pub env_keys: Vec<String>,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl DebugEnvResponse {
    /// Builds the report from the configured credentials and the variable names
    /// present in the process environment.
    pub fn new(url: Option<&str>, key: Option<&str>, env_keys: Vec<String>) -> Self {
        Self {
            has_supabase_url: url.is_some_and(|u| !u.is_empty()),
            has_supabase_key: key.is_some_and(|k| !k.is_empty()),
            supabase_url_length: url.map_or(0, str::len),
            supabase_key_length: key.map_or(0, str::len),
            env_keys,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_response_counts_machines() {
        let snapshot = CatalogSnapshot {
            machines: vec![
                MachineRecord::new("a", "Breville", "Bambino"),
                MachineRecord::new("b", "Gaggia", "Classic Pro"),
            ],
            loading: false,
            last_updated: 42,
        };
        let resp = CatalogResponse::from(snapshot);
        assert_eq!(resp.count, 2);
        assert_eq!(resp.last_updated, 42);
    }

    #[test]
    fn test_stats_response_success_rate() {
        let stats = RefreshStats {
            fetches: 4,
            successes: 3,
            failures: 1,
            fallbacks: 1,
            storage_errors: 0,
        };
        let resp = StatsResponse::new(&stats, 10, 0);
        assert!((resp.success_rate - 0.75).abs() < 0.001);
        assert_eq!(resp.total_machines, 10);
    }

    #[test]
    fn test_debug_env_reports_lengths_only() {
        let resp = DebugEnvResponse::new(
            Some("https://xyz.supabase.co"),
            None,
            vec!["PUBLIC_SUPABASE_URL".to_string()],
        );
        assert!(resp.has_supabase_url);
        assert!(!resp.has_supabase_key);
        assert_eq!(resp.supabase_url_length, 23);
        assert_eq!(resp.supabase_key_length, 0);

        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("hasSupabaseUrl"));
        assert!(json.contains("envKeys"));
        assert!(!json.contains("xyz.supabase.co"));
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Machine not found: x");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("Machine not found"));
    }
}
