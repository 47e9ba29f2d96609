//! Wall-clock sampling through the OS monotonic clock.

use std::time::{Duration, Instant};

/// An opaque wall-clock timestamp.
///
/// Only comparable with another sample from the same process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockSample(Instant);

impl ClockSample {
    /// Read the clock now.
    #[inline]
    pub fn now() -> Self {
        Self(Instant::now())
    }

    /// Seconds elapsed from `t1` to `t2`.
    ///
    /// Ordering is not validated: if `t2` precedes `t1` the result is negative.
    pub fn elapsed_secs(t1: ClockSample, t2: ClockSample) -> f64 {
        match t2.0.checked_duration_since(t1.0) {
            Some(forward) => forward.as_secs_f64(),
            None => -t1.0.duration_since(t2.0).as_secs_f64(),
        }
    }

    /// Time since this sample was taken.
    pub fn elapsed(&self) -> Duration {
        self.0.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_elapsed_non_negative() {
        let t1 = ClockSample::now();
        std::thread::sleep(Duration::from_millis(2));
        let t2 = ClockSample::now();
        let secs = ClockSample::elapsed_secs(t1, t2);
        assert!(secs >= 0.002, "elapsed = {}", secs);
    }

    #[test]
    fn test_reversed_order_is_negative() {
        let t1 = ClockSample::now();
        std::thread::sleep(Duration::from_millis(2));
        let t2 = ClockSample::now();
        let secs = ClockSample::elapsed_secs(t2, t1);
        assert!(secs <= -0.002, "elapsed = {}", secs);
    }

    #[test]
    fn test_same_sample_is_zero() {
        let t = ClockSample::now();
        assert_eq!(ClockSample::elapsed_secs(t, t), 0.0);
    }
}
