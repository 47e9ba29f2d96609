//! Cycles-per-round arithmetic.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::measurement::CycleSample;

/// Amortized cost of one round of the measured operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Throughput {
    /// Number of rounds the samples bracket.
    pub rounds: u32,
    /// Cycles between the two samples.
    pub total_cycles: u64,
    /// `total_cycles / rounds`, truncated.
    pub cycles_per_round: u64,
    /// `total_cycles / rounds` without truncation.
    pub mean_cycles_per_round: f64,
}

impl Throughput {
    /// Derive cycles per round from two samples around `rounds` executions.
    ///
    /// # Errors
    ///
    /// - [`Error::ZeroRounds`] if `rounds == 0`
    /// - [`Error::NonMonotonic`] if `end` precedes `start`
    pub fn from_samples(start: CycleSample, end: CycleSample, rounds: u32) -> Result<Self> {
        if rounds == 0 {
            return Err(Error::ZeroRounds);
        }
        let total_cycles = end.cycles_since(start)?;
        Ok(Self {
            rounds,
            total_cycles,
            cycles_per_round: total_cycles / u64::from(rounds),
            mean_cycles_per_round: total_cycles as f64 / f64::from(rounds),
        })
    }

    /// Unrounded cycles per round.
    pub fn cycles_per_round_f64(&self) -> f64 {
        self.mean_cycles_per_round
    }
}
