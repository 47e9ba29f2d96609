//! PMU-based cycle counting for Linux using perf_event.
//!
//! The register-based counter in [`timer`](super::timer) measures reference
//! cycles (TSC) or a fixed-frequency timer. This backend reads the
//! hardware `CPU_CYCLES` event instead, which counts core clock cycles
//! of the calling thread only.
//!
//! # Permissions
//!
//! Linux perf requires one of:
//! - Root/sudo privileges
//! - `CAP_PERFMON` capability (kernel 5.8+)
//! - `kernel.perf_event_paranoid <= 2`
//!
//! Enable with `--features perf`.

use crate::measurement::CycleSample;

/// Error type for perf initialization and read failures.
#[derive(Debug, Clone)]
pub enum PerfError {
    /// Not running on Linux
    UnsupportedPlatform,
    /// Permission denied (need sudo or capabilities)
    PermissionDenied,
    /// Counter configuration or read failed
    ConfigurationFailed(String),
}

impl std::fmt::Display for PerfError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PerfError::UnsupportedPlatform => write!(f, "perf cycle counter requires Linux"),
            PerfError::PermissionDenied => {
                write!(
                    f,
                    "Permission denied - run with sudo, set CAP_PERFMON, or configure perf_event_paranoid"
                )
            }
            PerfError::ConfigurationFailed(msg) => write!(f, "perf configuration failed: {}", msg),
        }
    }
}

impl std::error::Error for PerfError {}

/// Thread-scoped hardware cycle counter.
#[cfg(target_os = "linux")]
pub struct PerfCycleCounter {
    counter: ::perf_event2::Counter,
}

#[cfg(target_os = "linux")]
impl PerfCycleCounter {
    /// Open and enable a `CPU_CYCLES` counter for the calling thread.
    ///
    /// # Errors
    ///
    /// Returns [`PerfError::PermissionDenied`] without sufficient privileges,
    /// or [`PerfError::ConfigurationFailed`] if the kernel rejects the event.
    pub fn new() -> Result<Self, PerfError> {
        use ::perf_event2::events::Hardware;
        use ::perf_event2::Builder;

        let mut counter = Builder::new(Hardware::CPU_CYCLES).build().map_err(|e| {
            if e.kind() == std::io::ErrorKind::PermissionDenied {
                PerfError::PermissionDenied
            } else {
                PerfError::ConfigurationFailed(format!("{:?}", e))
            }
        })?;

        counter
            .enable()
            .map_err(|e| PerfError::ConfigurationFailed(format!("Failed to enable: {:?}", e)))?;

        tracing::debug!("perf CPU_CYCLES counter enabled");

        Ok(Self { counter })
    }

    /// Read the running cycle count as a [`CycleSample`].
    ///
    /// Samples from this counter are only comparable with each other,
    /// never with [`CycleSample::now`].
    #[inline]
    pub fn sample(&mut self) -> Result<CycleSample, PerfError> {
        std::sync::atomic::compiler_fence(std::sync::atomic::Ordering::SeqCst);
        let cycles = self
            .counter
            .read()
            .map_err(|e| PerfError::ConfigurationFailed(format!("Failed to read: {:?}", e)))?;
        std::sync::atomic::compiler_fence(std::sync::atomic::Ordering::SeqCst);
        Ok(CycleSample::from_raw(cycles))
    }
}

#[cfg(target_os = "linux")]
impl std::fmt::Debug for PerfCycleCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PerfCycleCounter").finish_non_exhaustive()
    }
}

// Stub implementation for non-Linux platforms
#[cfg(not(target_os = "linux"))]
/// Stub counter for non-Linux platforms; construction always fails.
#[derive(Debug)]
pub struct PerfCycleCounter {
    _private: (),
}

#[cfg(not(target_os = "linux"))]
impl PerfCycleCounter {
    /// perf counters are only available on Linux.
    pub fn new() -> Result<Self, PerfError> {
        Err(PerfError::UnsupportedPlatform)
    }

    /// Unreachable in practice since `new` never succeeds.
    pub fn sample(&mut self) -> Result<CycleSample, PerfError> {
        Err(PerfError::UnsupportedPlatform)
    }
}
