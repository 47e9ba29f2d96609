//! End-to-end tests for reference-vector comparison and reporting.

use primbench::{compare, Config, Divergence, Error, OutputFormat, Reporter, Tally};
use rand::Rng;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn reporter(format: OutputFormat) -> Reporter<Vec<u8>> {
    init_tracing();
    Reporter::new(Vec::new(), Config::new().color(false).format(format))
}

fn text(reporter: Reporter<Vec<u8>>) -> String {
    String::from_utf8(reporter.into_inner()).expect("report is utf-8")
}

#[test]
fn four_byte_vector_reports_offset_two() {
    let reference = [0x01, 0x02, 0x03, 0x04];
    let actual = [0x01, 0x02, 0xFF, 0x04];

    let mut r = reporter(OutputFormat::Terminal);
    let cmp = r
        .compare_and_report("vector1", &reference, &actual, 4)
        .unwrap();

    assert!(!cmp.is_match());
    assert_eq!(
        cmp.first_divergence,
        Some(Divergence {
            offset: 2,
            expected: 0x03,
            actual: 0xFF,
        })
    );

    let out = text(r);
    assert!(out.contains("[test] expected output vector1 is 01020304"));
    assert!(out.contains("[test] computed output vector1 is 0102ff04"));
    assert!(out.contains("vector1 differ at byte 2"));
    assert!(!out.contains("is a success"));
}

#[test]
fn identical_32_byte_buffers_succeed() {
    let buf: Vec<u8> = (0u8..32).collect();

    let mut r = reporter(OutputFormat::Terminal);
    let cmp = r.compare_and_report("block", &buf, &buf, 32).unwrap();

    assert!(cmp.is_match());
    assert_eq!(cmp.first_divergence, None);
    assert_eq!(cmp.mismatches, 0);
    assert!(text(r).ends_with("[test] block is a success\n"));
}

#[test]
fn random_single_byte_flip_is_located_exactly() {
    let mut rng = rand::thread_rng();

    for _ in 0..500 {
        let len = rng.gen_range(1..=256);
        let reference: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
        let mut actual = reference.clone();
        let i = rng.gen_range(0..len);
        actual[i] ^= rng.gen_range(1..=255u8);

        let cmp = compare(&reference, &actual, len).unwrap();
        assert_eq!(cmp.offset(), Some(i), "len = {}", len);
        assert_eq!(cmp.mismatches, 1);
    }
}

#[test]
fn first_and_last_byte_detected() {
    for len in [1usize, 2, 17, 1024] {
        let reference = vec![0x5Au8; len];

        let mut head = reference.clone();
        head[0] = 0;
        assert_eq!(compare(&reference, &head, len).unwrap().offset(), Some(0));

        let mut tail = reference.clone();
        tail[len - 1] = 0;
        assert_eq!(
            compare(&reference, &tail, len).unwrap().offset(),
            Some(len - 1)
        );
    }
}

#[test]
fn length_beyond_buffer_is_rejected() {
    let mut r = reporter(OutputFormat::Terminal);
    let err = r
        .compare_and_report("overrun", &[0u8; 16], &[0u8; 15], 16)
        .unwrap_err();
    assert!(matches!(err, Error::LengthOutOfBounds { len: 16, .. }));
    assert!(text(r).starts_with("[test] overrun invalid comparison: "));
}

#[test]
fn json_records_one_per_line() {
    let mut r = reporter(OutputFormat::Json);
    r.compare_and_report("good", &[1, 2], &[1, 2], 2).unwrap();
    r.compare_and_report("bad", &[1, 2], &[1, 3], 2).unwrap();

    let out = text(r);
    let records: Vec<serde_json::Value> = out
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["label"], "good");
    assert_eq!(records[0]["passed"], true);
    assert_eq!(records[1]["label"], "bad");
    assert_eq!(records[1]["passed"], false);
    assert_eq!(records[1]["first_divergence"]["offset"], 1);
    assert_eq!(records[1]["expected_hex"], "0102");
    assert_eq!(records[1]["actual_hex"], "0103");
}

#[test]
fn suite_continues_after_failure() {
    let mut r = reporter(OutputFormat::Terminal);
    let mut tally = Tally::new();

    let vectors: [(&str, &[u8], &[u8]); 3] = [
        ("a", &[1, 2, 3], &[1, 2, 3]),
        ("b", &[1, 2, 3], &[9, 2, 3]),
        ("c", &[4, 5], &[4, 5]),
    ];
    for (label, reference, actual) in vectors {
        let cmp = r
            .compare_and_report(label, reference, actual, reference.len())
            .unwrap();
        tally.record(&cmp);
    }
    tally.record(r.check(10i32, 11i32).unwrap());

    assert_eq!(tally.passed(), 2);
    assert_eq!(tally.failed(), 2);
    assert_eq!(tally.exit_code(), 1);

    let out = text(r);
    assert!(out.contains("[test] a is a success"));
    assert!(out.contains("b differ at byte 0"));
    assert!(out.contains("[test] c is a success"));
    assert!(out.contains("[check] failure: 10 != 11"));
}

#[test]
fn grouped_hex_output() {
    let mut r = Reporter::new(
        Vec::new(),
        Config::new().color(false).group_bytes(4),
    );
    r.compare_and_report("grouped", &[0u8; 8], &[0u8; 8], 8)
        .unwrap();
    assert!(text(r).contains("is 00000000 00000000\n"));
}
