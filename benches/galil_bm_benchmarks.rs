//! galil_bm Benchmarks
//!
//! Benchmarks for the matchers and the fixture codec, using the Criterion
//! framework for statistical analysis and regression detection.
//!
//! To run the benchmarks:
//! ```bash
//! cargo bench --features benchmarking
//! ```

use anyhow::Context;
use criterion::{
    black_box, criterion_group, criterion_main, BenchmarkId, Criterion, SamplingMode, Throughput,
};
use std::io::Cursor;
use std::time::Duration;

use galil_bm_lib::harness::fixture::{
    generate_fixture, FixtureReader, FixtureRecord, FixtureWriter, GeneratorOptions,
};
use galil_bm_lib::{BoyerMooreMatcher, Matcher, MatcherOptions, NaiveMatcher};

/// Seeded random records for the given alphabet and lengths.
fn records(alphabet: &[u8], text_len: usize, pattern_len: usize) -> anyhow::Result<Vec<FixtureRecord>> {
    let options = GeneratorOptions {
        records: 16,
        text_len,
        pattern_len,
        alphabet: alphabet.to_vec(),
        plant_probability: 0.5,
        seed: 0x5eed,
    };
    generate_fixture(&options).context("failed to generate benchmark records")
}

fn matchers() -> Vec<(&'static str, Box<dyn Matcher>)> {
    vec![
        ("boyer_moore", Box::new(BoyerMooreMatcher::new())),
        (
            "boyer_moore_no_memo",
            Box::new(BoyerMooreMatcher::with_options(MatcherOptions::new().galil_rule(false))),
        ),
        ("naive", Box::new(NaiveMatcher::new())),
    ]
}

/// Benchmark the matchers on random text with varying pattern lengths
fn bench_random_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_text");
    group.sampling_mode(SamplingMode::Flat);
    group.measurement_time(Duration::from_secs(2));
    group.warm_up_time(Duration::from_secs(1));

    let text_len = 64 * 1024;
    for pattern_len in [4, 16, 64, 256] {
        let inputs = records(b"abcdefghijklmnopqrstuvwxyz", text_len, pattern_len)
            .expect("benchmark input");
        group.throughput(Throughput::Bytes((text_len * inputs.len()) as u64));

        for (name, matcher) in matchers() {
            group.bench_with_input(BenchmarkId::new(name, pattern_len), &inputs, |b, inputs| {
                b.iter(|| {
                    for record in inputs {
                        black_box(matcher.search(&record.pattern, &record.text));
                    }
                });
            });
        }
    }

    group.finish();
}

/// Benchmark the periodic worst case where the memo pays off
fn bench_periodic(c: &mut Criterion) {
    let mut group = c.benchmark_group("periodic");
    group.sampling_mode(SamplingMode::Flat);
    group.measurement_time(Duration::from_secs(2));

    let text = vec![b'a'; 32 * 1024];
    group.throughput(Throughput::Bytes(text.len() as u64));
    for pattern_len in [8, 64, 512] {
        let pattern = vec![b'a'; pattern_len];

        for (name, matcher) in matchers() {
            group.bench_with_input(
                BenchmarkId::new(name, pattern_len),
                &pattern,
                |b, pattern| {
                    b.iter(|| black_box(matcher.search(pattern, &text)));
                },
            );
        }
    }

    group.finish();
}

/// Benchmark fixture encoding and decoding
fn bench_fixture_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("fixture_codec");
    group.measurement_time(Duration::from_secs(2));

    let inputs = records(b"acgt", 4096, 8).expect("benchmark input");
    let mut writer = FixtureWriter::new(Vec::new());
    for record in &inputs {
        writer.write_record(record).expect("encode");
    }
    let encoded = writer.finish().expect("flush");
    group.throughput(Throughput::Bytes(encoded.len() as u64));

    group.bench_function("encode", |b| {
        b.iter(|| {
            let mut writer = FixtureWriter::new(Vec::with_capacity(encoded.len()));
            for record in &inputs {
                writer.write_record(black_box(record)).expect("encode");
            }
            black_box(writer.finish().expect("flush"));
        });
    });

    group.bench_function("decode", |b| {
        b.iter(|| {
            let reader = FixtureReader::new(Cursor::new(black_box(&encoded)), usize::MAX);
            for record in reader {
                black_box(record.expect("decode"));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_random_text, bench_periodic, bench_fixture_codec);
criterion_main!(benches);
