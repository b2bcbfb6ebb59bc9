//! Throughput of validation, decoding and conversion on a mixed-width
//! corpus.

#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use encodem::{StaticBinding, TextBuilder, TextView, Utf8, Utf16Le};

fn corpus() -> String {
    // Mixed 1-4 byte characters, repeated to a few tens of kilobytes.
    let unit = "The quick brown fox — á é í ó ú — €€€ — 😀😀 — jumps over the lazy dog. ";
    unit.repeat(512)
}

fn bench_validate(c: &mut Criterion) {
    let text = corpus();
    let view = TextView::from_str(&text);
    c.bench_function("utf8_verify", |b| {
        b.iter(|| black_box(&view).verify().unwrap());
    });
}

fn bench_walk(c: &mut Criterion) {
    let text = corpus();
    let view = TextView::from_str(&text);
    c.bench_function("utf8_char_walk", |b| {
        b.iter(|| {
            let mut cur = black_box(&view).begin();
            let mut steps = 0usize;
            while !cur.is_at_end() {
                steps += cur.advance().unwrap();
            }
            steps
        });
    });
}

fn bench_convert(c: &mut Criterion) {
    let text = corpus();
    let view = TextView::from_str(&text);
    c.bench_function("utf8_to_utf16le", |b| {
        b.iter(|| {
            let mut out = TextBuilder::new(StaticBinding::<Utf16Le>::new());
            out.append_converted(black_box(&view)).unwrap();
            out.size()
        });
    });
}

criterion_group!(benches, bench_validate, bench_walk, bench_convert);
criterion_main!(benches);
