//! Performance benchmarks for the tokenizer
//!
//! Run with: cargo bench --bench tokenizer_benchmarks

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use revtok_core::application::{compress, CompressionAlgorithm};
use revtok_core::{fingerprint, ExecutionMode, Strategy, Tokenizer, TokenizerConfig};
use std::hint::black_box;

/// Generate test text of specified size
fn generate_text(size: usize) -> String {
    let base = "This is a test sentence with some reasonable length, and a few words. ";
    let repeat_count = size / base.len() + 1;

    let mut text = base.repeat(repeat_count);
    text.truncate(size);
    text
}

/// Every strategy on the same 10KB input
fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("strategies");
    let tokenizer = Tokenizer::with_config(TokenizerConfig::small_text()).unwrap();
    let text = generate_text(10_240);

    group.throughput(Throughput::Bytes(text.len() as u64));
    for strategy in Strategy::ALL {
        group.bench_with_input(BenchmarkId::new("segment", strategy), &text, |b, text| {
            b.iter(|| tokenizer.segment(black_box(text), strategy).unwrap());
        });
    }

    group.finish();
}

/// Text sizes through the adaptive path
fn bench_text_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_sizes");
    let tokenizer = Tokenizer::new().unwrap();

    for size in [1024, 10_240, 102_400, 1_024_000] {
        let text = generate_text(size);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("word", size), &text, |b, text| {
            b.iter(|| tokenizer.segment(black_box(text), Strategy::Word).unwrap());
        });
    }

    group.finish();
}

/// Chunked execution with different thread counts
fn bench_thread_counts(c: &mut Criterion) {
    let mut group = c.benchmark_group("thread_counts");
    let text = generate_text(1_024_000);

    for threads in [1, 2, 4, 8] {
        let config = TokenizerConfig::builder()
            .max_threads(Some(threads))
            .execution_mode(ExecutionMode::Parallel {
                threads: Some(threads),
            })
            .build()
            .unwrap();
        let tokenizer = Tokenizer::with_config(config).unwrap();

        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("threads", threads), &text, |b, text| {
            b.iter(|| tokenizer.segment(black_box(text), Strategy::Grammar).unwrap());
        });
    }

    group.finish();
}

fn bench_reconstruct(c: &mut Criterion) {
    let tokenizer = Tokenizer::new().unwrap();
    let text = generate_text(102_400);
    let stream = tokenizer.segment(&text, Strategy::Char).unwrap();

    c.bench_function("reconstruct_char_100k", |b| {
        b.iter(|| {
            tokenizer
                .reconstruct(black_box(&stream), Strategy::Char)
                .unwrap()
        });
    });
}

fn bench_compression(c: &mut Criterion) {
    let mut group = c.benchmark_group("compression");
    let tokenizer = Tokenizer::new().unwrap();
    let stream = tokenizer
        .segment(&generate_text(10_240), Strategy::Word)
        .unwrap();

    for algorithm in CompressionAlgorithm::ALL {
        group.bench_with_input(
            BenchmarkId::new("compress", algorithm),
            &stream,
            |b, stream| {
                b.iter(|| compress(black_box(stream), algorithm));
            },
        );
    }

    group.finish();
}

fn bench_fingerprint(c: &mut Criterion) {
    let text = generate_text(102_400);
    c.bench_function("fingerprint_100k", |b| {
        b.iter(|| fingerprint(black_box(&text), false));
    });
}

criterion_group!(
    benches,
    bench_strategies,
    bench_text_sizes,
    bench_thread_counts,
    bench_reconstruct,
    bench_compression,
    bench_fingerprint
);
criterion_main!(benches);
