//! Poll Scheduler
//!
//! Drives the fetch -> reconcile -> drift -> commit cycle and owns its
//! lifecycle: Idle until `start()`, Running until `stop()` or drop.
//!
//! Cycles run serialized inside a single task, so commit order always
//! equals completion order and two cycles can never race a commit. An
//! epoch token, bumped by both `start()` and `stop()`, is checked
//! immediately before every commit: a fetch that resolves after teardown
//! is discarded without a commit or a renderer notification.

use super::drift::{drift, DriftConfig};
use super::fetch::SnapshotSource;
use super::reconcile::reconcile;
use super::types::DisplayState;
use crate::constants;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Panel configuration
#[derive(Debug, Clone)]
pub struct PanelConfig {
    /// Period between poll cycles (milliseconds)
    pub poll_interval_ms: u64,
    /// Confidence drift tuning
    pub drift: DriftConfig,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: constants::get_poll_interval_ms(),
            drift: DriftConfig::default(),
        }
    }
}

/// Scheduler observability counters
#[derive(Debug, Clone, Default, Serialize)]
pub struct PanelStatus {
    pub is_running: bool,
    pub commit_count: u64,
    pub consecutive_failures: u64,
    pub last_error: Option<String>,
    pub last_success: Option<DateTime<Utc>>,
    pub last_commit: Option<DateTime<Utc>>,
}

/// Poll lifecycle owner
///
/// The spawned cycle task is the only mutator of committed state; the
/// renderer side only ever holds read-only [`watch::Receiver`]s.
pub struct PollScheduler<S: SnapshotSource> {
    config: PanelConfig,
    source: Arc<S>,
    tx: watch::Sender<DisplayState>,
    epoch: Arc<AtomicU64>,
    status: Arc<RwLock<PanelStatus>>,
    task: Option<JoinHandle<()>>,
}

impl<S: SnapshotSource> PollScheduler<S> {
    /// Create an Idle scheduler seeded with the default display state
    pub fn new(config: PanelConfig, source: S) -> Self {
        let (tx, _rx) = watch::channel(DisplayState::default());

        Self {
            config,
            source: Arc::new(source),
            tx,
            epoch: Arc::new(AtomicU64::new(0)),
            status: Arc::new(RwLock::new(PanelStatus::default())),
            task: None,
        }
    }

    /// Read-only view of committed state for a renderer
    ///
    /// Receivers are notified after every commit, including commits where
    /// only the drifted confidence changed and commits of an unchanged
    /// state after a failed poll.
    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.tx.subscribe()
    }

    /// Last committed state
    pub fn state(&self) -> DisplayState {
        self.tx.borrow().clone()
    }

    /// Current observability counters
    pub fn status(&self) -> PanelStatus {
        self.status.read().clone()
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Idle -> Running
    ///
    /// The first cycle runs immediately rather than waiting for the first
    /// timer tick, and carries no drift - drift models time passing
    /// between ticks. Subsequent cycles run every poll interval.
    pub fn start(&mut self) {
        if self.task.is_some() {
            log::warn!("Poll scheduler already running");
            return;
        }

        let token = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        let interval = Duration::from_millis(self.config.poll_interval_ms);
        let drift_config = self.config.drift.clone();
        let source = Arc::clone(&self.source);
        let epoch = Arc::clone(&self.epoch);
        let status = Arc::clone(&self.status);
        let tx = self.tx.clone();

        self.status.write().is_running = true;
        log::info!(
            "Poll scheduler started (interval: {}ms)",
            self.config.poll_interval_ms
        );

        self.task = Some(tokio::spawn(async move {
            // Working copy owned by this task - the single mutation thread
            let mut state = tx.borrow().clone();
            let mut first_cycle = true;

            loop {
                let outcome = source.fetch().await;

                // Teardown may have happened while the fetch was in flight
                if epoch.load(Ordering::SeqCst) != token {
                    log::debug!("Discarding snapshot that resolved after teardown");
                    break;
                }

                let snapshot = match outcome {
                    Ok(snapshot) => {
                        let mut s = status.write();
                        s.consecutive_failures = 0;
                        s.last_error = None;
                        s.last_success = Some(Utc::now());
                        Some(snapshot)
                    }
                    Err(e) => {
                        log::warn!("Snapshot fetch failed, keeping last known state: {}", e);
                        let mut s = status.write();
                        s.consecutive_failures += 1;
                        s.last_error = Some(e.to_string());
                        None
                    }
                };

                let mut next = reconcile(&state, snapshot.as_ref());
                if !first_cycle {
                    next.confidence_score = drift(&drift_config, next.confidence_score);
                }
                first_cycle = false;

                // Last gate before the commit becomes visible
                if epoch.load(Ordering::SeqCst) != token {
                    log::debug!("Discarding reconciled state after teardown");
                    break;
                }

                state = next;
                tx.send_replace(state.clone());

                {
                    let mut s = status.write();
                    s.commit_count += 1;
                    s.last_commit = Some(Utc::now());
                }

                tokio::time::sleep(interval).await;
            }
        }));
    }

    /// Running -> Idle
    ///
    /// Cancels the timer and invalidates the in-flight cycle, if any. A
    /// fetch result arriving after this call is discarded silently; no
    /// commit and no renderer notification can land after teardown.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            self.epoch.fetch_add(1, Ordering::SeqCst);
            task.abort();
            self.status.write().is_running = false;
            log::info!("Poll scheduler stopped");
        }
    }
}

impl<S: SnapshotSource> Drop for PollScheduler<S> {
    fn drop(&mut self) {
        self.stop();
    }
}
