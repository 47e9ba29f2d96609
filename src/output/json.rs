//! JSON line records for machine consumption.

use serde::Serialize;

use crate::compare::{Comparison, Divergence};
use crate::output::terminal::hex;
use crate::probe::CheckFailure;
use crate::throughput::Throughput;

/// One report record, serialized as a single JSON object.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record<'a> {
    /// Buffer comparison result.
    Comparison {
        /// Caller-supplied label.
        label: &'a str,
        /// Whether all bytes matched.
        passed: bool,
        /// Bytes compared.
        len: usize,
        /// First differing byte, if any.
        first_divergence: Option<Divergence>,
        /// Total differing bytes.
        mismatches: usize,
        /// Reference bytes in hex (always present on failure).
        #[serde(skip_serializing_if = "Option::is_none")]
        expected_hex: Option<String>,
        /// Computed bytes in hex (always present on failure).
        #[serde(skip_serializing_if = "Option::is_none")]
        actual_hex: Option<String>,
    },
    /// Cycles-per-round measurement.
    Throughput {
        /// Counter source that produced the samples.
        counter: &'static str,
        /// Measurement details.
        #[serde(flatten)]
        throughput: Throughput,
    },
    /// Rejected throughput measurement.
    InvalidMeasurement {
        /// Why the measurement was rejected.
        reason: String,
    },
    /// Comparison rejected before scanning (e.g. length out of bounds).
    InvalidComparison {
        /// Caller-supplied label.
        label: &'a str,
        /// Why the comparison was rejected.
        reason: String,
    },
    /// Computed output length differs from the reference vector.
    LengthMismatch {
        /// Caller-supplied label.
        label: &'a str,
        /// Reference length in bytes.
        expected_len: usize,
        /// Computed length in bytes.
        actual_len: usize,
    },
    /// Elapsed wall-clock time.
    Clock {
        /// Seconds between the samples (negative if reversed).
        elapsed_secs: f64,
    },
    /// Failed scalar check.
    Check {
        /// Expected and observed values.
        #[serde(flatten)]
        failure: CheckFailure,
    },
    /// Error code reported by the code under test.
    ErrorCode {
        /// The code.
        code: u32,
    },
}

impl<'a> Record<'a> {
    /// Build a comparison record, including hex buffers when requested or
    /// when the comparison failed.
    pub fn comparison(
        label: &'a str,
        reference: &[u8],
        actual: &[u8],
        cmp: &Comparison,
        show_buffers: bool,
    ) -> Self {
        let with_buffers = show_buffers || !cmp.is_match();
        Record::Comparison {
            label,
            passed: cmp.is_match(),
            len: cmp.len,
            first_divergence: cmp.first_divergence,
            mismatches: cmp.mismatches,
            expected_hex: with_buffers.then(|| hex(&reference[..cmp.len], 0)),
            actual_hex: with_buffers.then(|| hex(&actual[..cmp.len], 0)),
        }
    }
}

/// Serialize a record to a compact JSON line (no trailing newline).
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for `Record`).
pub fn to_json(record: &Record<'_>) -> Result<String, serde_json::Error> {
    serde_json::to_string(record)
}
