//! Error types for reporting and measurement.
//!
//! Comparison mismatches and failed `check`s are deliberately not errors:
//! they come back as values so a runner can keep going and tally them.
//! The variants here cover invalid arguments, broken measurements and
//! sink failures.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the reporting and measurement primitives.
#[derive(Debug, Error)]
pub enum Error {
    /// A throughput report was requested for zero rounds.
    #[error("invalid argument: round count must be greater than zero")]
    ZeroRounds,

    /// The end cycle sample precedes the start sample.
    ///
    /// Happens on counter wraparound or when the thread migrated between
    /// cores with unsynchronized counters. The delta is meaningless.
    #[error("non-monotonic cycle samples: end {end} < start {start}")]
    NonMonotonic {
        /// Sample taken before the measured region.
        start: u64,
        /// Sample taken after the measured region.
        end: u64,
    },

    /// The requested comparison length exceeds one of the buffers.
    #[error(
        "comparison length {len} exceeds buffer extent \
         (reference: {reference_len}, actual: {actual_len})"
    )]
    LengthOutOfBounds {
        /// Requested number of bytes to compare.
        len: usize,
        /// Length of the reference buffer.
        reference_len: usize,
        /// Length of the computed buffer.
        actual_len: usize,
    },

    /// Writing to the diagnostic sink failed.
    #[error("diagnostic sink write failed: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing a JSON report record failed.
    #[error("failed to serialize report record: {0}")]
    Json(#[from] serde_json::Error),
}
