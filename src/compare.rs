//! Byte-exact comparison of computed output against a reference vector.
//!
//! The scan always walks the whole range: it records the first divergence
//! and counts every differing byte. It sits behind `#[inline(never)]` and
//! `black_box` so the optimizer cannot prove the buffers unobservable and
//! drop the comparison.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::measurement::black_box;

/// Location and values of the first differing byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Divergence {
    /// Byte offset of the first difference.
    pub offset: usize,
    /// Reference byte at `offset`.
    pub expected: u8,
    /// Computed byte at `offset`.
    pub actual: u8,
}

/// Outcome of comparing two buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    /// Number of bytes compared.
    pub len: usize,
    /// First divergence, `None` when the buffers match.
    pub first_divergence: Option<Divergence>,
    /// Total number of differing bytes.
    pub mismatches: usize,
}

impl Comparison {
    /// Whether every compared byte matched.
    pub fn is_match(&self) -> bool {
        self.first_divergence.is_none()
    }

    /// Offset of the first differing byte.
    pub fn offset(&self) -> Option<usize> {
        self.first_divergence.map(|d| d.offset)
    }
}

/// Compare the first `len` bytes of `reference` and `actual`.
///
/// # Errors
///
/// Returns [`Error::LengthOutOfBounds`] if `len` exceeds either buffer.
#[inline(never)]
pub fn compare(reference: &[u8], actual: &[u8], len: usize) -> Result<Comparison> {
    if len > reference.len() || len > actual.len() {
        return Err(Error::LengthOutOfBounds {
            len,
            reference_len: reference.len(),
            actual_len: actual.len(),
        });
    }

    let reference = black_box(&reference[..len]);
    let actual = black_box(&actual[..len]);

    let mut first_divergence = None;
    let mut mismatches = 0usize;
    for (offset, (&expected, &got)) in reference.iter().zip(actual).enumerate() {
        if expected != got {
            mismatches += 1;
            if first_divergence.is_none() {
                first_divergence = Some(Divergence {
                    offset,
                    expected,
                    actual: got,
                });
            }
        }
    }

    Ok(black_box(Comparison {
        len,
        first_divergence,
        mismatches,
    }))
}
