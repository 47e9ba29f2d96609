//! Platform-specific cycle counter.
//!
//! Reads the processor's counter register with serialization:
//! - x86_64: `lfence; rdtsc` with compiler fences
//! - aarch64: `isb; mrs cntvct_el0`
//! - Fallback: `std::time::Instant` nanoseconds since first use

use std::hint::black_box as std_black_box;
#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Wrapper around `std::hint::black_box` for preventing compiler optimizations.
///
/// Wrap the result of the operation under measurement so the compiler can
/// neither drop it nor move it across the surrounding counter reads.
#[inline]
pub fn black_box<T>(x: T) -> T {
    std_black_box(x)
}

/// Read the CPU cycle counter with appropriate serialization.
///
/// On x86_64, this uses `lfence; rdtsc` so that all prior instructions
/// complete before the timestamp counter is read.
///
/// On aarch64, this uses `isb; mrs cntvct_el0` for the virtual timer count.
/// That counter ticks at a fixed frequency which is usually lower than the
/// core clock.
///
/// On other platforms, falls back to nanoseconds from a monotonic OS clock.
#[inline]
pub fn cpucycles() -> u64 {
    #[cfg(target_arch = "x86_64")]
    {
        cpucycles_x86_64()
    }

    #[cfg(target_arch = "aarch64")]
    {
        cpucycles_aarch64()
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        cpucycles_fallback()
    }
}

#[cfg(target_arch = "x86_64")]
#[inline]
fn cpucycles_x86_64() -> u64 {
    std::sync::atomic::compiler_fence(std::sync::atomic::Ordering::SeqCst);

    let cycles: u64;
    unsafe {
        // lfence waits for all earlier instructions to retire
        std::arch::asm!(
            "lfence",
            "rdtsc",
            "shl rdx, 32",
            "or rax, rdx",
            out("rax") cycles,
            out("rdx") _,
            options(nostack, nomem),
        );
    }

    std::sync::atomic::compiler_fence(std::sync::atomic::Ordering::SeqCst);

    cycles
}

#[cfg(target_arch = "aarch64")]
#[inline]
fn cpucycles_aarch64() -> u64 {
    std::sync::atomic::compiler_fence(std::sync::atomic::Ordering::SeqCst);

    let cycles: u64;
    unsafe {
        std::arch::asm!(
            "isb",
            "mrs {}, cntvct_el0",
            out(reg) cycles,
            options(nostack, nomem),
        );
    }

    std::sync::atomic::compiler_fence(std::sync::atomic::Ordering::SeqCst);

    cycles
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
#[inline]
fn cpucycles_fallback() -> u64 {
    use std::sync::OnceLock;
    static START: OnceLock<Instant> = OnceLock::new();

    let start = START.get_or_init(Instant::now);
    start.elapsed().as_nanos() as u64
}

/// Name of the counter source compiled into this build.
pub fn counter_name() -> &'static str {
    #[cfg(target_arch = "x86_64")]
    {
        "rdtsc"
    }
    #[cfg(target_arch = "aarch64")]
    {
        "cntvct_el0"
    }
    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        "Instant"
    }
}

/// A raw reading of the cycle counter.
///
/// The epoch is arbitrary, so a sample only means something relative to
/// another sample taken on the same core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CycleSample(u64);

impl CycleSample {
    /// Read the counter now.
    #[inline]
    pub fn now() -> Self {
        Self(cpucycles())
    }

    /// Wrap a counter value obtained elsewhere (e.g. a PMU backend).
    #[inline]
    pub const fn from_raw(cycles: u64) -> Self {
        Self(cycles)
    }

    /// The raw counter value.
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Cycles elapsed from `start` to `self`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonMonotonic`] if `self` precedes `start`.
    pub fn cycles_since(self, start: CycleSample) -> Result<u64> {
        self.0.checked_sub(start.0).ok_or(Error::NonMonotonic {
            start: start.0,
            end: self.0,
        })
    }
}

impl From<u64> for CycleSample {
    fn from(cycles: u64) -> Self {
        Self(cycles)
    }
}

impl std::fmt::Display for CycleSample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Smallest non-zero delta seen between back-to-back counter reads.
///
/// Returns `None` if every pair read the same value, which happens with
/// very coarse counters.
pub fn estimate_resolution(trials: usize) -> Option<u64> {
    let mut min_diff = u64::MAX;

    for _ in 0..trials {
        let t1 = cpucycles();
        let t2 = cpucycles();
        let diff = t2.saturating_sub(t1);
        if diff > 0 && diff < min_diff {
            min_diff = diff;
        }
    }

    (min_diff != u64::MAX).then_some(min_diff)
}
