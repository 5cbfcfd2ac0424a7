//! State Reconciler
//!
//! Merges an incoming (possibly partial) snapshot over the currently
//! displayed state, field by field. This is the central contract of the
//! panel: a failed or partial poll can never blank out a displayed value.

use super::types::{DisplayState, ThreatSnapshot};

/// Merge `incoming` over `current` with per-field fallback.
///
/// A `None` snapshot (failed fetch) returns `current` unchanged. Fields
/// merge independently: a payload carrying only `threat_level` leaves the
/// model metrics untouched. A field is adopted only when it is present and
/// non-empty; zero or non-finite confidence keeps the displayed value
/// (`value || previous` display semantics).
///
/// Numbers are adopted without clamping or range validation - bounding is
/// the drift simulator's concern, and only for confidence.
pub fn reconcile(current: &DisplayState, incoming: Option<&ThreatSnapshot>) -> DisplayState {
    let snapshot = match incoming {
        Some(snapshot) => snapshot,
        None => return current.clone(),
    };

    let mut next = current.clone();

    if let Some(level) = snapshot.threat_level {
        next.threat_level = level;
    }

    if let Some(score) = snapshot.confidence_score {
        if score != 0.0 && score.is_finite() {
            next.confidence_score = score;
        }
    }

    if let Some(distribution) = &snapshot.threat_distribution {
        if !distribution.is_empty() {
            next.threat_distribution = distribution.clone();
        }
    }

    if let Some(rows) = &snapshot.attack_types {
        if !rows.is_empty() {
            next.attack_types = rows.clone();
        }
    }

    if let Some(metrics) = &snapshot.model_metrics {
        next.model_metrics = metrics.clone();
    }

    if let Some(info) = &snapshot.dataset_info {
        next.dataset_info = info.clone();
    }

    next
}

// ============================================================================
// TESTS
// ============================================================================
