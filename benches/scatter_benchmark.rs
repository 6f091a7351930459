//! Benchmark for scatterplot rendering and brushing.

#![allow(clippy::unwrap_used)]

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use linkviz::prelude::*;

fn synthetic(size: usize) -> Vec<Record> {
    (0..size)
        .map(|i| {
            let day = 1 + (i / 24) % 28;
            let date = format!("{day:02}/{:02}/2018", 1 + (i / (24 * 28)) % 12);
            Record::new(i, &date, (i % 24) as u8, ((i * 37) % 3000) as f64)
                .with_measure(Field::Temperature, (i as f64 * 0.13).sin() * 20.0 + 10.0)
        })
        .collect()
}

fn scatter_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("scatterplot");
    let config = Config::default();

    for size in [1_000, 8_760] {
        let records = synthetic(size);

        group.bench_with_input(BenchmarkId::new("render", size), &records, |b, records| {
            let mut engine = ScatterplotEngine::new(&config);
            let (x, y) = (Field::Temperature, Field::RentedBikeCount);
            b.iter(|| engine.render(black_box(records), x, y));
        });

        group.bench_with_input(BenchmarkId::new("brush_move", size), &records, |b, records| {
            let mut engine = ScatterplotEngine::new(&config);
            engine.render(records, Field::Temperature, Field::RentedBikeCount);
            b.iter(|| engine.brush_move(black_box(Rect::from_extent(100.0, 100.0, 500.0, 400.0))));
        });

        group.bench_with_input(BenchmarkId::new("to_framebuffer", size), &records, |b, records| {
            let mut engine = ScatterplotEngine::new(&config);
            engine.render(records, Field::Temperature, Field::RentedBikeCount);
            b.iter(|| engine.to_framebuffer().unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, scatter_benchmark);
criterion_main!(benches);
