use criterion::{black_box, criterion_group, criterion_main, Criterion};
use primbench::{compare, Config, CycleSample, Reporter};

fn bench_primitives(c: &mut Criterion) {
    let mut group = c.benchmark_group("primbench");

    group.bench_function("cycle_sample", |b| b.iter(|| black_box(CycleSample::now())));

    let reference = vec![0x5Au8; 4096];
    let mut actual = reference.clone();
    actual[4095] ^= 1;
    group.bench_function("compare_4k_last_byte", |b| {
        b.iter(|| black_box(compare(&reference, &actual, 4096)));
    });

    group.bench_function("compare_and_report_64b", |b| {
        let vector = [0xA5u8; 64];
        b.iter(|| {
            // Fresh sink per iteration keeps memory flat
            let mut reporter = Reporter::new(Vec::new(), Config::new().color(false));
            black_box(reporter.compare_and_report("bench", &vector, &vector, 64))
        });
    });

    group.finish();
}

criterion_group!(benches, bench_primitives);
criterion_main!(benches);
