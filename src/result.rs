//! Pass/fail aggregation across a test run.

use serde::{Deserialize, Serialize};

use crate::compare::Comparison;
use crate::probe::CheckFailure;

/// Outcome of a single test step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The step passed.
    Pass,
    /// The step failed; the diagnostic was already reported.
    Fail,
}

impl From<&Comparison> for Outcome {
    fn from(cmp: &Comparison) -> Self {
        if cmp.is_match() {
            Outcome::Pass
        } else {
            Outcome::Fail
        }
    }
}

impl From<&Result<(), CheckFailure>> for Outcome {
    fn from(res: &Result<(), CheckFailure>) -> Self {
        match res {
            Ok(()) => Outcome::Pass,
            Err(_) => Outcome::Fail,
        }
    }
}

/// Running count of passed and failed steps.
///
/// Lets a runner continue through a suite and decide the exit code once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    passed: usize,
    failed: usize,
}

impl Tally {
    /// Create an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one outcome and return it.
    pub fn record(&mut self, outcome: impl Into<Outcome>) -> Outcome {
        let outcome = outcome.into();
        match outcome {
            Outcome::Pass => self.passed += 1,
            Outcome::Fail => self.failed += 1,
        }
        outcome
    }

    /// Number of passed steps.
    pub fn passed(&self) -> usize {
        self.passed
    }

    /// Number of failed steps.
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// True when nothing failed.
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Process exit code: 0 if all passed, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.all_passed() {
            0
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::compare;
    use crate::probe::check;

    #[test]
    fn test_empty_tally_passes() {
        let tally = Tally::new();
        assert!(tally.all_passed());
        assert_eq!(tally.exit_code(), 0);
    }

    #[test]
    fn test_records_comparisons_and_checks() {
        let mut tally = Tally::new();
        let ok = compare(&[1, 2], &[1, 2], 2).unwrap();
        let bad = compare(&[1, 2], &[1, 3], 2).unwrap();

        assert_eq!(tally.record(&ok), Outcome::Pass);
        assert_eq!(tally.record(&bad), Outcome::Fail);
        assert_eq!(tally.record(&check(1i32, 1i32)), Outcome::Pass);

        assert_eq!(tally.passed(), 2);
        assert_eq!(tally.failed(), 1);
        assert_eq!(tally.exit_code(), 1);
    }
}
