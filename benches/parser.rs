//! Parser benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use vtcore::Parser;

fn bench_plain_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser");

    let plain_text = "Hello, World! ".repeat(1000);
    group.throughput(Throughput::Bytes(plain_text.len() as u64));
    group.bench_function("plain_text", |b| {
        b.iter(|| {
            let mut parser = Parser::new();
            let actions = parser.feed(black_box(plain_text.as_bytes()));
            black_box(actions)
        })
    });

    group.finish();
}

fn bench_csi_sequences(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser");

    let csi_heavy = "\x1b[1;31mRed\x1b[0m \x1b[5;10H\x1b[2J".repeat(100);
    group.throughput(Throughput::Bytes(csi_heavy.len() as u64));
    group.bench_function("csi_sequences", |b| {
        b.iter(|| {
            let mut parser = Parser::new();
            let actions = parser.feed(black_box(csi_heavy.as_bytes()));
            black_box(actions)
        })
    });

    group.finish();
}

fn bench_truecolor_sgr(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser");

    let sgr = "\x1b[38;2;120;80;200mx\x1b[48:2:0:0:0my".repeat(200);
    group.throughput(Throughput::Bytes(sgr.len() as u64));
    group.bench_function("truecolor_sgr", |b| {
        b.iter(|| {
            let mut parser = Parser::new();
            let actions = parser.feed(black_box(sgr.as_bytes()));
            black_box(actions)
        })
    });

    group.finish();
}

fn bench_utf8(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser");

    let utf8 = "Hello, 世界! 🎉 ".repeat(500);
    group.throughput(Throughput::Bytes(utf8.len() as u64));
    group.bench_function("utf8_content", |b| {
        b.iter(|| {
            let mut parser = Parser::new();
            let actions = parser.feed(black_box(utf8.as_bytes()));
            black_box(actions)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_plain_text,
    bench_csi_sequences,
    bench_truecolor_sgr,
    bench_utf8
);
criterion_main!(benches);
