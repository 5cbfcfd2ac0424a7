//! Attack Detection Panel - Live State Synchronization
//!
//! This module handles:
//! - Snapshot polling from the analysis backend
//! - Per-field reconciliation over the last known good state
//! - Simulated confidence drift between polls
//! - Poll lifecycle with teardown cancellation

pub mod drift;
pub mod fetch;
pub mod reconcile;
pub mod scheduler;
pub mod types;

#[cfg(test)]
mod tests;

pub use fetch::{FetchConfig, FetchError, SnapshotFetcher, SnapshotSource};
pub use reconcile::reconcile;
pub use scheduler::{PanelConfig, PanelStatus, PollScheduler};
pub use types::{DisplayState, ThreatLevel, ThreatSnapshot};
