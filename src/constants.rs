//! Central Configuration Constants
//!
//! Single source of truth for all panel defaults.
//! To change the default analysis backend, only edit this file.

/// Default analysis backend URL
///
/// This is the fallback URL when no environment variable is set.
/// The development backend listens on port 5000.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Attack analysis endpoint path
pub const ATTACK_ANALYSIS_PATH: &str = "/api/attack-analysis";

/// Health check endpoint path
pub const HEALTH_PATH: &str = "/api/health";

/// Default poll interval (milliseconds)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 8000;

/// Default per-request fetch timeout (seconds)
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 5;

/// Maximum absolute confidence perturbation per drift tick
pub const DEFAULT_DRIFT_AMPLITUDE: f64 = 0.75;

/// Hard lower bound on drifted confidence
pub const DEFAULT_DRIFT_FLOOR: f64 = 85.0;

/// Hard upper bound on drifted confidence
pub const DEFAULT_DRIFT_CEILING: f64 = 99.0;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get analysis backend URL from environment or use default
pub fn get_api_url() -> String {
    std::env::var("PANEL_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Get poll interval from environment or use default
pub fn get_poll_interval_ms() -> u64 {
    std::env::var("PANEL_POLL_INTERVAL_MS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_POLL_INTERVAL_MS)
}

/// Get fetch timeout from environment or use default
pub fn get_fetch_timeout_secs() -> u64 {
    std::env::var("PANEL_FETCH_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS)
}
