//! Fail-fast allocation of test fixture buffers.
//!
//! [`allocate`] reports failure as a value so the allocator can be tested
//! in isolation. Test code that cannot proceed without the buffer calls
//! [`allocate_or_exit`], which turns the failure into a diagnostic and an
//! immediate process exit.

use std::alloc::{self, Layout};
use std::ops::{Deref, DerefMut};

use thiserror::Error;

/// Exit status used when a fixture cannot be allocated.
pub const ALLOC_FAILURE_EXIT_CODE: i32 = 1;

/// The allocator could not provide the requested buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AllocError {
    /// The size does not fit in a valid allocation layout.
    #[error("fixture allocation of {size} bytes failed: capacity overflow")]
    CapacityOverflow {
        /// Requested size in bytes.
        size: usize,
    },

    /// The allocator returned no memory.
    #[error("fixture allocation of {size} bytes failed: out of memory")]
    OutOfMemory {
        /// Requested size in bytes.
        size: usize,
    },
}

impl AllocError {
    /// Requested size in bytes.
    pub fn size(&self) -> usize {
        match *self {
            AllocError::CapacityOverflow { size } | AllocError::OutOfMemory { size } => size,
        }
    }
}

/// A zero-filled byte buffer owned by the caller.
///
/// Freed when dropped; nothing else in the crate keeps a reference.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fixture {
    bytes: Vec<u8>,
}

impl Fixture {
    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the fixture has zero extent.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Take ownership of the underlying vector.
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }
}

impl Deref for Fixture {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}

impl DerefMut for Fixture {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

impl AsRef<[u8]> for Fixture {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl AsMut<[u8]> for Fixture {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

/// Allocate a zero-filled buffer of `size` bytes.
///
/// `size == 0` always succeeds with an empty fixture.
///
/// Memory comes from `alloc_zeroed`, so large requests are not written
/// page by page here. On systems that overcommit, a successful return
/// still only reserves address space; touching the pages later can fail
/// outside this function.
///
/// # Errors
///
/// Returns [`AllocError`] if the size exceeds the largest valid layout or
/// the allocator refuses the request.
pub fn allocate(size: usize) -> Result<Fixture, AllocError> {
    if size == 0 {
        return Ok(Fixture::default());
    }
    let layout = Layout::array::<u8>(size).map_err(|_| AllocError::CapacityOverflow { size })?;
    // SAFETY: the layout has non-zero size.
    let ptr = unsafe { alloc::alloc_zeroed(layout) };
    if ptr.is_null() {
        return Err(AllocError::OutOfMemory { size });
    }
    // SAFETY: `ptr` was allocated by the global allocator with the layout of
    // `[u8; size]`, and all `size` bytes are initialized to zero.
    let bytes = unsafe { Vec::from_raw_parts(ptr, size, size) };
    tracing::trace!(size, "allocated fixture");
    Ok(Fixture { bytes })
}

/// Allocate a fixture or terminate the process.
///
/// On failure, writes a diagnostic to stderr and exits with
/// [`ALLOC_FAILURE_EXIT_CODE`]. Never returns an empty stand-in.
pub fn allocate_or_exit(size: usize) -> Fixture {
    match allocate(size) {
        Ok(fixture) => fixture,
        Err(err) => {
            tracing::error!(size, error = %err, "fixture allocation failed, aborting test run");
            eprintln!("[alloc] WARNING: {}", err);
            std::process::exit(ALLOC_FAILURE_EXIT_CODE);
        }
    }
}
