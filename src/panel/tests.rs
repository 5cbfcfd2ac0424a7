//! Scheduler scenario tests: fallback to last known good state, partial
//! merge visibility, commit serialization and teardown cancellation.

use super::drift::DriftConfig;
use super::fetch::{FetchError, SnapshotSource};
use super::scheduler::{PanelConfig, PollScheduler};
use super::types::{
    AttackTypeRow, DatasetInfo, DisplayState, DistributionSlice, ModelMetrics, ThreatLevel,
    ThreatSnapshot,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn test_config(poll_interval_ms: u64) -> PanelConfig {
    PanelConfig {
        poll_interval_ms,
        drift: DriftConfig::default(),
    }
}

fn full_snapshot() -> ThreatSnapshot {
    ThreatSnapshot {
        threat_level: Some(ThreatLevel::High),
        confidence_score: Some(91.0),
        threat_distribution: Some(vec![
            DistributionSlice {
                name: "Normal".to_string(),
                value: 70.0,
                color: "#10B981".to_string(),
            },
            DistributionSlice {
                name: "Malicious".to_string(),
                value: 30.0,
                color: "#EF4444".to_string(),
            },
        ]),
        attack_types: Some(vec![AttackTypeRow {
            attack_type: "Flow Manipulation".to_string(),
            probability: 40.0,
            detected: 6,
        }]),
        model_metrics: Some(ModelMetrics {
            accuracy: 90.0,
            precision: 88.0,
            recall: 85.0,
            f1_score: 86.4,
        }),
        dataset_info: Some(DatasetInfo {
            dataset_type: "WADI".to_string(),
            attacks_available: true,
        }),
    }
}

/// Always answers with the same snapshot
struct StaticSource {
    snapshot: ThreatSnapshot,
}

#[async_trait]
impl SnapshotSource for StaticSource {
    async fn fetch(&self) -> Result<ThreatSnapshot, FetchError> {
        Ok(self.snapshot.clone())
    }
}

/// Always fails like a broken backend
struct FailingSource;

#[async_trait]
impl SnapshotSource for FailingSource {
    async fn fetch(&self) -> Result<ThreatSnapshot, FetchError> {
        Err(FetchError::Server(500))
    }
}

/// Plays a scripted list of outcomes, repeating the last one forever
struct SequenceSource {
    responses: Vec<Result<ThreatSnapshot, FetchError>>,
    calls: AtomicUsize,
}

impl SequenceSource {
    fn new(responses: Vec<Result<ThreatSnapshot, FetchError>>) -> Self {
        Self {
            responses,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl SnapshotSource for SequenceSource {
    async fn fetch(&self) -> Result<ThreatSnapshot, FetchError> {
        let i = self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses[i.min(self.responses.len() - 1)].clone()
    }
}

/// Takes longer than the poll interval and tags each answer with its call
/// number, so tests can check which fetch a commit came from
struct SlowSource {
    delay: Duration,
    calls: Arc<AtomicU32>,
}

#[async_trait]
impl SnapshotSource for SlowSource {
    async fn fetch(&self) -> Result<ThreatSnapshot, FetchError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        Ok(ThreatSnapshot {
            attack_types: Some(vec![AttackTypeRow {
                attack_type: "Probe".to_string(),
                probability: 10.0,
                detected: call,
            }]),
            ..Default::default()
        })
    }
}

#[tokio::test]
async fn test_mount_merges_partial_snapshot_over_defaults() {
    // partial payload on mount: {threat_level: High, confidence_score: 60}
    let source = StaticSource {
        snapshot: ThreatSnapshot {
            threat_level: Some(ThreatLevel::High),
            confidence_score: Some(60.0),
            ..Default::default()
        },
    };
    let mut scheduler = PollScheduler::new(test_config(60_000), source);
    let mut rx = scheduler.subscribe();
    scheduler.start();

    rx.changed().await.unwrap();
    let state = rx.borrow_and_update().clone();
    let defaults = DisplayState::default();

    assert_eq!(state.threat_level, ThreatLevel::High);
    // the mount cycle carries no drift, so the raw value is visible
    assert_eq!(state.confidence_score, 60.0);
    assert_eq!(state.threat_distribution, defaults.threat_distribution);
    assert_eq!(state.attack_types, defaults.attack_types);
    assert_eq!(state.model_metrics, defaults.model_metrics);
    assert_eq!(state.dataset_info, defaults.dataset_info);

    scheduler.stop();
}

#[tokio::test]
async fn test_failed_first_fetch_keeps_seeded_defaults() {
    // backend answers 500 from the very first poll
    let mut scheduler = PollScheduler::new(test_config(60_000), FailingSource);
    let mut rx = scheduler.subscribe();
    scheduler.start();

    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow_and_update(), DisplayState::default());

    let status = scheduler.status();
    assert_eq!(status.consecutive_failures, 1);
    assert!(status.last_error.is_some());
    assert!(status.last_success.is_none());

    scheduler.stop();
}

#[tokio::test]
async fn test_empty_snapshot_blanks_nothing() {
    // a successful fetch followed by an empty object
    let source = SequenceSource::new(vec![
        Ok(full_snapshot()),
        Ok(ThreatSnapshot::default()),
    ]);
    let mut scheduler = PollScheduler::new(test_config(25), source);
    let mut rx = scheduler.subscribe();
    scheduler.start();

    rx.changed().await.unwrap();
    let first = rx.borrow_and_update().clone();
    rx.changed().await.unwrap();
    let second = rx.borrow_and_update().clone();

    assert_eq!(second.threat_level, first.threat_level);
    assert_eq!(second.threat_distribution, first.threat_distribution);
    assert_eq!(second.attack_types, first.attack_types);
    assert_eq!(second.model_metrics, first.model_metrics);
    assert_eq!(second.dataset_info, first.dataset_info);
    // confidence moved by drift only, inside the band
    assert!((85.0..=99.0).contains(&second.confidence_score));
    assert!((second.confidence_score - first.confidence_score).abs() <= 0.75);

    scheduler.stop();
}

#[tokio::test]
async fn test_failed_tick_preserves_state_modulo_drift() {
    let source = SequenceSource::new(vec![Ok(full_snapshot()), Err(FetchError::Server(500))]);
    let mut scheduler = PollScheduler::new(test_config(25), source);
    let mut rx = scheduler.subscribe();
    scheduler.start();

    rx.changed().await.unwrap();
    let before = rx.borrow_and_update().clone();
    rx.changed().await.unwrap();
    let after = rx.borrow_and_update().clone();

    assert_eq!(after.threat_level, before.threat_level);
    assert_eq!(after.threat_distribution, before.threat_distribution);
    assert_eq!(after.attack_types, before.attack_types);
    assert_eq!(after.model_metrics, before.model_metrics);
    assert_eq!(after.dataset_info, before.dataset_info);
    assert!((after.confidence_score - before.confidence_score).abs() <= 0.75);
    assert_eq!(scheduler.status().consecutive_failures, 1);

    scheduler.stop();
}

#[tokio::test]
async fn test_teardown_discards_in_flight_fetch() {
    // stop while the first fetch is still pending
    let calls = Arc::new(AtomicU32::new(0));
    let source = SlowSource {
        delay: Duration::from_millis(100),
        calls: Arc::clone(&calls),
    };
    let mut scheduler = PollScheduler::new(test_config(25), source);
    let rx = scheduler.subscribe();
    scheduler.start();

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(calls.load(Ordering::SeqCst), 1); // fetch is in flight
    scheduler.stop();
    tokio::time::sleep(Duration::from_millis(200)).await;

    // the late result produced no commit and no notification
    assert!(!rx.has_changed().unwrap());
    assert_eq!(*rx.borrow(), DisplayState::default());
    assert!(!scheduler.is_running());
    assert_eq!(scheduler.status().commit_count, 0);
}

#[tokio::test]
async fn test_drop_cancels_like_stop() {
    let source = SlowSource {
        delay: Duration::from_millis(100),
        calls: Arc::new(AtomicU32::new(0)),
    };
    let mut scheduler = PollScheduler::new(test_config(25), source);
    let rx = scheduler.subscribe();
    scheduler.start();

    tokio::time::sleep(Duration::from_millis(20)).await;
    drop(scheduler);
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert_eq!(*rx.borrow(), DisplayState::default());
}

#[tokio::test]
async fn test_slow_cycles_commit_in_completion_order() {
    // fetch takes ~3x the poll interval; commits must stay one per
    // completed cycle, in order, with no stale overwrite
    let calls = Arc::new(AtomicU32::new(0));
    let source = SlowSource {
        delay: Duration::from_millis(60),
        calls: Arc::clone(&calls),
    };
    let mut scheduler = PollScheduler::new(test_config(20), source);
    let mut rx = scheduler.subscribe();
    scheduler.start();

    let mut seen = Vec::new();
    for _ in 0..3 {
        rx.changed().await.unwrap();
        seen.push(rx.borrow_and_update().attack_types[0].detected);
    }
    scheduler.stop();

    assert_eq!(seen, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_scheduler_restarts_after_stop() {
    let source = StaticSource {
        snapshot: full_snapshot(),
    };
    let mut scheduler = PollScheduler::new(test_config(20), source);
    let mut rx = scheduler.subscribe();

    scheduler.start();
    rx.changed().await.unwrap();
    let _ = rx.borrow_and_update();
    scheduler.stop();
    assert!(!scheduler.is_running());

    scheduler.start();
    assert!(scheduler.is_running());
    rx.changed().await.unwrap();
    assert_eq!(rx.borrow_and_update().threat_level, ThreatLevel::High);

    scheduler.stop();
}

#[tokio::test]
async fn test_double_start_is_ignored() {
    let source = StaticSource {
        snapshot: full_snapshot(),
    };
    let mut scheduler = PollScheduler::new(test_config(60_000), source);
    let mut rx = scheduler.subscribe();

    scheduler.start();
    scheduler.start();
    assert!(scheduler.is_running());

    rx.changed().await.unwrap();
    let _ = rx.borrow_and_update();
    scheduler.stop();
}

#[tokio::test]
async fn test_timer_tick_applies_drift_to_unchanged_confidence() {
    // confidence sits inside the band; ticks wiggle it without escaping
    let source = StaticSource {
        snapshot: ThreatSnapshot {
            confidence_score: Some(92.0),
            ..Default::default()
        },
    };
    let mut scheduler = PollScheduler::new(test_config(20), source);
    let mut rx = scheduler.subscribe();
    scheduler.start();

    rx.changed().await.unwrap();
    assert_eq!(rx.borrow_and_update().confidence_score, 92.0);

    for _ in 0..3 {
        rx.changed().await.unwrap();
        let confidence = rx.borrow_and_update().confidence_score;
        // every tick re-adopts 92.0 from the snapshot, then drifts once
        assert!((85.0..=99.0).contains(&confidence));
        assert!((confidence - 92.0).abs() <= 0.75);
    }

    scheduler.stop();
}
