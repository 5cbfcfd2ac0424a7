//! Snapshot Fetcher
//!
//! HTTP client for pulling attack-analysis snapshots from the backend.
//! One request per call, no internal retries: a failed poll is reported to
//! the caller, which falls back to the last known state and tries again on
//! the next tick.

use super::types::ThreatSnapshot;
use crate::constants;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Fetcher configuration
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Base URL of the analysis backend
    pub api_url: String,
    /// Per-request timeout; a timed-out poll counts as a network failure
    pub timeout_seconds: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            api_url: constants::get_api_url(),
            timeout_seconds: constants::get_fetch_timeout_secs(),
        }
    }
}

/// Anything the scheduler can poll a snapshot from.
///
/// Production uses [`SnapshotFetcher`]; scheduler tests substitute
/// in-memory sources.
#[async_trait]
pub trait SnapshotSource: Send + Sync + 'static {
    async fn fetch(&self) -> Result<ThreatSnapshot, FetchError>;
}

/// HTTP snapshot client
pub struct SnapshotFetcher {
    config: FetchConfig,
    http_client: reqwest::Client,
}

impl SnapshotFetcher {
    /// Create a new fetcher
    pub fn new(config: FetchConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            http_client,
        }
    }

    /// Check backend health
    ///
    /// Informational only: the poll loop starts regardless of the outcome.
    pub async fn health_check(&self) -> Result<HealthResponse, FetchError> {
        let url = format!("{}{}", self.config.api_url, constants::HEALTH_PATH);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if response.status().is_success() {
            response
                .json()
                .await
                .map_err(|e| FetchError::Parse(e.to_string()))
        } else {
            Err(FetchError::Server(response.status().as_u16()))
        }
    }
}

#[async_trait]
impl SnapshotSource for SnapshotFetcher {
    /// One GET against the attack-analysis endpoint
    async fn fetch(&self) -> Result<ThreatSnapshot, FetchError> {
        let url = format!(
            "{}{}",
            self.config.api_url,
            constants::ATTACK_ANALYSIS_PATH
        );

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Server(response.status().as_u16()));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| FetchError::Parse(e.to_string()))?;

        ThreatSnapshot::from_value(&body)
            .ok_or_else(|| FetchError::Parse("response body is not a JSON object".to_string()))
    }
}

/// Backend health payload (`GET /api/health`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HealthResponse {
    pub status: String,
    pub data_source: Option<String>,
    pub version: Option<String>,
}

/// Fetch errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    Network(String),
    Server(u16),
    Parse(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network(e) => write!(f, "Network error: {}", e),
            Self::Server(code) => write!(f, "Server error: {}", code),
            Self::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for FetchError {}

// ============================================================================
// TESTS
// ============================================================================
