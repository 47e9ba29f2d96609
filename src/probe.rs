//! Liveness probes for benchmarked code.

use std::mem::MaybeUninit;
use std::ptr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::measurement::black_box;

/// Mark `value` as observed so the code computing it is not eliminated.
///
/// The value is stored with a volatile write, which the compiler must
/// emit, then handed to `black_box` and dropped normally. `black_box` on
/// its own is only a best-effort hint.
#[inline(never)]
pub fn touch<T>(value: T) {
    let mut slot = MaybeUninit::<T>::uninit();
    // SAFETY: the slot is fully written before it is read or dropped.
    unsafe {
        ptr::write_volatile(slot.as_mut_ptr(), value);
        black_box(slot.as_mut_ptr());
        slot.assume_init_drop();
    }
}

/// A scalar invariant that did not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("check failure: {expected} != {actual}")]
pub struct CheckFailure {
    /// Value the caller expected.
    pub expected: i64,
    /// Value actually observed.
    pub actual: i64,
}

/// Compare two integers.
///
/// Returns the mismatch as [`CheckFailure`]; reporting is left to
/// [`Reporter::check`](crate::Reporter::check).
#[inline(never)]
pub fn check<T: Into<i64>>(expected: T, actual: T) -> Result<(), CheckFailure> {
    let expected = black_box(expected.into());
    let actual = black_box(actual.into());
    if expected == actual {
        Ok(())
    } else {
        Err(CheckFailure { expected, actual })
    }
}
