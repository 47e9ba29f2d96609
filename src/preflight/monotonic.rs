//! Cycle counter monotonicity check.
//!
//! Reads the counter back-to-back and counts pairs where the second read
//! is smaller than the first. Rare violations come from core migration or
//! unsynchronized counters and are a platform anomaly, not a bug in the
//! code under test, but a harness should know about them.

use serde::{Deserialize, Serialize};

use crate::measurement::CycleSample;

/// Result of the monotonicity check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonotonicityReport {
    /// Number of sample pairs taken.
    pub trials: usize,
    /// Pairs where the end sample preceded the start sample.
    pub violations: usize,
    /// Largest backwards step observed, in counter ticks.
    pub max_backstep: u64,
}

impl MonotonicityReport {
    /// Fraction of pairs that went backwards.
    pub fn violation_rate(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.violations as f64 / self.trials as f64
        }
    }

    /// True when fewer than `max_rate` of the pairs went backwards.
    pub fn is_acceptable(&self, max_rate: f64) -> bool {
        self.violation_rate() <= max_rate
    }

    /// Get a human-readable description of the result.
    pub fn description(&self) -> String {
        if self.violations == 0 {
            format!("cycle counter monotonic over {} sample pairs", self.trials)
        } else {
            format!(
                "cycle counter went backwards in {} of {} sample pairs ({:.3}%), \
                 largest step back {} ticks. Pin the thread to one core for stable counts.",
                self.violations,
                self.trials,
                self.violation_rate() * 100.0,
                self.max_backstep
            )
        }
    }
}

/// Default tolerated violation rate.
pub const DEFAULT_MAX_VIOLATION_RATE: f64 = 0.001;

/// Take `trials` back-to-back sample pairs and count backwards steps.
///
/// Each violation is logged at `warn` level.
pub fn monotonicity_check(trials: usize) -> MonotonicityReport {
    let pairs = (0..trials).map(|_| {
        let start = CycleSample::now();
        let end = CycleSample::now();
        (start, end)
    });
    tally_pairs(pairs)
}

fn tally_pairs(pairs: impl IntoIterator<Item = (CycleSample, CycleSample)>) -> MonotonicityReport {
    let mut report = MonotonicityReport {
        trials: 0,
        violations: 0,
        max_backstep: 0,
    };

    for (start, end) in pairs {
        report.trials += 1;
        if let Err(err) = end.cycles_since(start) {
            let backstep = start.raw() - end.raw();
            report.violations += 1;
            report.max_backstep = report.max_backstep.max(backstep);
            tracing::warn!(backstep, error = %err, "cycle counter went backwards");
        }
    }

    report
}
