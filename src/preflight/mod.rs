//! Preflight checks on the cycle counter before trusting measurements.
//!
//! # Checks Performed
//!
//! - **Monotonicity**: back-to-back samples must not go backwards
//! - **Resolution**: smallest observable non-zero tick between reads

mod monotonic;

pub use monotonic::{monotonicity_check, MonotonicityReport, DEFAULT_MAX_VIOLATION_RATE};

use serde::{Deserialize, Serialize};

use crate::measurement::{counter_name, estimate_resolution};

/// Result of running all preflight checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreflightResult {
    /// Counter source these checks ran against.
    pub counter: String,

    /// Monotonicity check outcome.
    pub monotonicity: MonotonicityReport,

    /// Smallest non-zero delta between consecutive reads, if any was seen.
    pub resolution_ticks: Option<u64>,

    /// Whether measurements on this counter can be trusted.
    pub is_valid: bool,
}

/// Run all preflight checks with `trials` sample pairs each.
pub fn run_all_checks(trials: usize) -> PreflightResult {
    let monotonicity = monotonicity_check(trials);
    let resolution_ticks = estimate_resolution(trials);

    if resolution_ticks.is_none() {
        tracing::warn!(
            counter = counter_name(),
            trials,
            "cycle counter never advanced between consecutive reads"
        );
    }

    let is_valid = monotonicity.is_acceptable(DEFAULT_MAX_VIOLATION_RATE);
    PreflightResult {
        counter: counter_name().to_string(),
        monotonicity,
        resolution_ticks,
        is_valid,
    }
}
