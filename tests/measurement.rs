//! Cycle counter, throughput and clock reporting through the public API.

use primbench::preflight::{monotonicity_check, run_all_checks};
use primbench::{black_box, touch, ClockSample, Config, CycleSample, Error, Reporter};

fn reporter() -> Reporter<Vec<u8>> {
    Reporter::new(Vec::new(), Config::new().color(false))
}

fn work(rounds: u32) -> u64 {
    let mut acc = 0u64;
    for i in 0..rounds {
        acc = acc.wrapping_mul(6364136223846793005).wrapping_add(u64::from(i));
    }
    black_box(acc)
}

#[test]
fn measured_rounds_report_cycles_per_round() {
    const ROUNDS: u32 = 1_000;

    let start = CycleSample::now();
    let acc = work(ROUNDS);
    let end = CycleSample::now();
    touch(acc);

    let mut r = reporter();
    match r.print_cycles_per_round(start, end, ROUNDS) {
        Ok(t) => {
            assert_eq!(t.rounds, ROUNDS);
            assert_eq!(t.cycles_per_round, t.total_cycles / u64::from(ROUNDS));
            let out = String::from_utf8(r.into_inner()).unwrap();
            assert!(out.starts_with("[perf] cpu cycles per round (averaged over 1000) = "));
        }
        // Core migration can step the counter back; that is a platform anomaly
        Err(Error::NonMonotonic { .. }) => {}
        Err(e) => panic!("unexpected error: {}", e),
    }
}

#[test]
fn zero_rounds_is_invalid_argument() {
    let mut r = reporter();
    let start = CycleSample::now();
    let end = CycleSample::now();
    let err = r.print_cycles_per_round(start, end, 0).unwrap_err();
    assert!(matches!(err, Error::ZeroRounds));
}

#[test]
fn consecutive_samples_are_overwhelmingly_monotonic() {
    let report = monotonicity_check(50_000);
    assert_eq!(report.trials, 50_000);
    assert!(report.violation_rate() < 0.01, "{}", report.description());
}

#[test]
fn preflight_runs() {
    let result = run_all_checks(2_000);
    assert_eq!(result.monotonicity.trials, 2_000);
}

#[test]
fn clock_diff_reports_forward_time() {
    let t1 = ClockSample::now();
    std::thread::sleep(std::time::Duration::from_millis(5));
    let t2 = ClockSample::now();

    let mut r = reporter();
    let secs = r.print_clock_diff(t1, t2).unwrap();
    assert!(secs >= 0.005);

    let out = String::from_utf8(r.into_inner()).unwrap();
    assert!(out.starts_with("[time] elapsed: "));
    assert!(out.ends_with(" s\n"));
}
