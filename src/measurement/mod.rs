//! Measurement primitives: cycle counter and wall clock.
//!
//! # Counter Selection
//!
//! The counter source is fixed at compile time:
//! - **x86_64**: `rdtsc` behind `lfence`
//! - **aarch64**: `cntvct_el0` virtual timer behind `isb`
//! - **other**: nanoseconds from the OS monotonic clock
//!
//! On Linux, the `perf` feature adds a PMU-backed counter that counts
//! core cycles of the calling thread:
//!
//! ```toml
//! [dependencies]
//! primbench = { version = "0.1", features = ["perf"] }
//! ```
//!
//! Paired samples are only meaningful when taken in program order on one
//! thread without a core migration in between.

mod clock;
mod timer;

#[cfg(feature = "perf")]
pub mod perf;

pub use clock::ClockSample;
pub use timer::{black_box, counter_name, cpucycles, estimate_resolution, CycleSample};
