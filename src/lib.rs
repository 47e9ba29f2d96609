//! # primbench
//!
//! Measurement and verification primitives for cryptographic test suites.
//!
//! This crate provides:
//! - A serialized hardware cycle counter ([`CycleSample`]) and a
//!   cycles-per-round reporter
//! - A wall-clock sampler ([`ClockSample`]) with elapsed-time reporting
//! - Byte-exact comparison of computed output against reference vectors,
//!   reporting the first differing offset and both buffers in hex
//! - Fail-fast fixture allocation
//! - Liveness probes ([`touch`], [`check`]) that keep benchmarked code alive
//!
//! The pieces are independent. Test code composes them; nothing here
//! needs initialization or teardown.
//!
//! ## Quick Start
//!
//! ```ignore
//! use primbench::{allocate_or_exit, CycleSample, Reporter, Tally};
//!
//! let mut reporter = Reporter::stdout();
//! let mut tally = Tally::new();
//!
//! let mut out = allocate_or_exit(32);
//! let start = CycleSample::now();
//! for _ in 0..ROUNDS {
//!     my_hash(&input, &mut out);
//! }
//! let end = CycleSample::now();
//!
//! let cmp = reporter.compare_and_report("sha256 vector 1", &EXPECTED, &out, 32)?;
//! tally.record(&cmp);
//! reporter.print_cycles_per_round(start, end, ROUNDS)?;
//!
//! std::process::exit(tally.exit_code());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod error;
mod result;

pub mod compare;
pub mod fixture;
pub mod measurement;
pub mod output;
pub mod preflight;
pub mod probe;
pub mod throughput;

pub use compare::{compare, Comparison, Divergence};
pub use config::{Config, OutputFormat};
pub use error::{Error, Result};
pub use fixture::{allocate, allocate_or_exit, AllocError, Fixture};
pub use measurement::{black_box, cpucycles, ClockSample, CycleSample};
pub use output::Reporter;
pub use probe::{check, touch, CheckFailure};
pub use result::{Outcome, Tally};
pub use throughput::Throughput;

/// Declarative reference-vector test.
///
/// Generates a `#[test]` that computes a buffer, compares it with the
/// expected bytes through a stderr [`Reporter`], and fails on mismatch.
/// The hex diagnostic is written before a wrong output length fails the
/// test. Attributes placed before the name are applied to the test.
///
/// ```ignore
/// primbench::vector_test!(xor_zero_key {
///     expected: [0x01, 0x02, 0x03],
///     compute: xor(&[0x01, 0x02, 0x03], &[0u8; 3]),
/// });
/// ```
#[macro_export]
macro_rules! vector_test {
    ($(#[$meta:meta])* $name:ident {
        expected: $expected:expr,
        compute: $compute:expr $(,)?
    }) => {
        #[test]
        $(#[$meta])*
        fn $name() {
            let expected: &[u8] = &$expected;
            let computed = $compute;
            let computed: &[u8] = computed.as_ref();

            let mut reporter = $crate::Reporter::stderr();
            let cmp = reporter
                .compare_vector(stringify!($name), expected, computed)
                .expect("diagnostic sink write failed");

            assert_eq!(
                expected.len(),
                computed.len(),
                "{}: computed output has the wrong length",
                stringify!($name)
            );
            assert!(
                cmp.is_match(),
                "{}: output differs from reference at byte {:?}",
                stringify!($name),
                cmp.offset()
            );
        }
    };
}
