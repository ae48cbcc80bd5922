//! Benchmarks for the recompute path, which runs on every keystroke.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use wordlight_buffer::{PositionRange, TextBuffer};
use wordlight_core::highlight::{self, compute};
use wordlight_core::{ConfigStore, RenderStyle, Renderer, StyleHandle, WordColorMapping};

/// Generates editor-sized source text with a sprinkling of marker words.
fn generate_text(lines: usize) -> String {
    (0..lines)
        .map(|i| match i % 10 {
            0 => format!("// TODO: line {} needs work\n", i),
            5 => format!("let category_{} = FIXME(cat, {});\n", i, i),
            _ => format!("Line {}: This is a sample line of text for benchmarking.\n", i),
        })
        .collect()
}

fn mapping(words: usize) -> WordColorMapping {
    ["TODO", "FIXME", "cat", "sample", "a.b", "HACK", "NOTE", "XXX"]
        .iter()
        .cycle()
        .take(words)
        .enumerate()
        .map(|(i, w)| {
            let word = if i < 8 { w.to_string() } else { format!("{w}{i}") };
            (word, "#ffff00")
        })
        .collect()
}

/// Renderer that discards everything.
#[derive(Default)]
struct NullRenderer(u64);

impl Renderer for NullRenderer {
    fn create_style(&mut self, _style: &RenderStyle) -> StyleHandle {
        self.0 += 1;
        StyleHandle::new(self.0)
    }

    fn set_highlights(&mut self, _handle: &StyleHandle, ranges: &[PositionRange]) {
        black_box(ranges);
    }

    fn release_style(&mut self, _handle: StyleHandle) {}
}

/// Benchmarks the pure matcher against document size.
fn bench_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute");
    let words = mapping(8);

    for size in [100, 1000, 10000].iter() {
        let text = generate_text(*size);
        group.bench_with_input(BenchmarkId::new("lines", size), &text, |b, text| {
            b.iter(|| black_box(compute(black_box(text), &words)))
        });
    }

    group.finish();
}

/// Benchmarks a full recompute with prebuilt matchers and position conversion.
fn bench_recompute(c: &mut Criterion) {
    let mut group = c.benchmark_group("recompute");
    let buffer = TextBuffer::from(generate_text(5000).as_str());

    for count in [1, 8, 32].iter() {
        let mut renderer = NullRenderer::default();
        let mut store = ConfigStore::new();
        store.replace(mapping(*count), &mut renderer);

        group.bench_with_input(BenchmarkId::new("words", count), &store, |b, store| {
            b.iter(|| {
                let requests = highlight::recompute(store, &buffer);
                black_box(highlight::render(&requests, &mut renderer))
            })
        });

        store.clear(&mut renderer);
    }

    group.finish();
}

criterion_group!(benches, bench_compute, bench_recompute);
criterion_main!(benches);
