//! Fixture allocation, including the fatal path.
//!
//! The fatal path exits the process, so it is exercised by re-running this
//! test binary as a child with an environment flag set.

use std::process::Command;

use primbench::fixture::ALLOC_FAILURE_EXIT_CODE;
use primbench::{allocate, allocate_or_exit};

const CHILD_ENV: &str = "PRIMBENCH_FIXTURE_CHILD";

#[test]
fn zero_size_is_consistently_empty() {
    for _ in 0..10 {
        assert!(allocate(0).unwrap().is_empty());
        assert!(allocate_or_exit(0).is_empty());
    }
}

#[test]
fn regular_allocation_is_usable() {
    let mut fixture = allocate_or_exit(4096);
    assert_eq!(fixture.len(), 4096);
    fixture[4095] = 0xAB;
    assert_eq!(fixture[4095], 0xAB);
}

#[test]
fn oversized_allocation_returns_error() {
    let err = allocate(usize::MAX).unwrap_err();
    assert_eq!(err.size(), usize::MAX);
    assert!(err.to_string().contains("capacity overflow"));
}

#[test]
fn oversized_allocation_terminates_process() {
    if std::env::var_os(CHILD_ENV).is_some() {
        let _fixture = allocate_or_exit(usize::MAX);
        unreachable!("allocate_or_exit returned for an impossible size");
    }

    let exe = std::env::current_exe().unwrap();
    let output = Command::new(exe)
        .args([
            "oversized_allocation_terminates_process",
            "--exact",
            "--nocapture",
            "--test-threads=1",
        ])
        .env(CHILD_ENV, "1")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(ALLOC_FAILURE_EXIT_CODE));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[alloc] WARNING"), "stderr: {}", stderr);
}
