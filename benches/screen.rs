//! Screen model benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use vtcore::core::NullSink;
use vtcore::Terminal;

fn bench_scroll(c: &mut Criterion) {
    let mut group = c.benchmark_group("screen");

    // 500 lines pushed through a 24-row screen
    let scrolling = "line of terminal output that keeps on coming\r\n".repeat(500);
    group.throughput(Throughput::Bytes(scrolling.len() as u64));
    group.bench_function("scrolling_text", |b| {
        b.iter(|| {
            let mut term = Terminal::new(80, 24, Box::new(NullSink));
            term.feed(black_box(scrolling.as_bytes()));
            black_box(term.snapshot())
        })
    });

    group.finish();
}

fn bench_styled_output(c: &mut Criterion) {
    let mut group = c.benchmark_group("screen");

    let styled = "\x1b[32mok\x1b[0m \x1b[1;31merror\x1b[0m \x1b[38;5;245mdetail\x1b[0m\r\n"
        .repeat(300);
    group.throughput(Throughput::Bytes(styled.len() as u64));
    group.bench_function("styled_output", |b| {
        b.iter(|| {
            let mut term = Terminal::new(80, 24, Box::new(NullSink));
            term.feed(black_box(styled.as_bytes()));
            black_box(term.snapshot())
        })
    });

    group.finish();
}

fn bench_full_redraw(c: &mut Criterion) {
    let mut group = c.benchmark_group("screen");

    // A TUI-style frame: home, clear, repaint every row
    let mut frame = String::from("\x1b[H\x1b[2J");
    for row in 1..=24 {
        frame.push_str(&format!("\x1b[{};1H", row));
        frame.push_str(&"x".repeat(80));
    }
    let frames = frame.repeat(20);
    group.throughput(Throughput::Bytes(frames.len() as u64));
    group.bench_function("full_redraw", |b| {
        b.iter(|| {
            let mut term = Terminal::new(80, 24, Box::new(NullSink));
            term.feed(black_box(frames.as_bytes()));
            black_box(term.snapshot())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_scroll, bench_styled_output, bench_full_redraw);
criterion_main!(benches);
