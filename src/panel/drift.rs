//! Confidence Drift Simulator
//!
//! Emulates continuous sensing between polls by nudging the confidence
//! metric with a small uniform perturbation on every timer tick.
//!
//! The [floor, ceiling] clamp is intentional cosmetic behavior, not a bug:
//! even when a snapshot legitimately set confidence far outside the band,
//! the next tick pulls it back inside.

use crate::constants;
use rand::Rng;

/// Drift tuning
#[derive(Debug, Clone)]
pub struct DriftConfig {
    /// Maximum absolute perturbation per tick
    pub amplitude: f64,
    /// Hard lower bound on displayed confidence
    pub floor: f64,
    /// Hard upper bound on displayed confidence
    pub ceiling: f64,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            amplitude: constants::DEFAULT_DRIFT_AMPLITUDE,
            floor: constants::DEFAULT_DRIFT_FLOOR,
            ceiling: constants::DEFAULT_DRIFT_CEILING,
        }
    }
}

/// Apply one drift step using the thread-local RNG
pub fn drift(config: &DriftConfig, confidence: f64) -> f64 {
    drift_with(config, confidence, &mut rand::thread_rng())
}

/// Apply one drift step with a caller-supplied RNG
///
/// Pure in everything but the RNG draw: reads no other state, touches no
/// other field.
pub fn drift_with<R: Rng>(config: &DriftConfig, confidence: f64, rng: &mut R) -> f64 {
    let delta = rng.gen_range(-config.amplitude..=config.amplitude);
    (confidence + delta).clamp(config.floor, config.ceiling)
}

// ============================================================================
// TESTS
// ============================================================================
