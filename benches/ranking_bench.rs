//! Benchmarks for FloatChat float ranking and chat dispatch
//!
//! Run with: cargo bench

use floatchat::chat::{classify, LocalAssistant};
use floatchat::floats::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use std::sync::Arc;

fn create_test_floats(count: usize) -> Vec<FloatRecord> {
    (0..count)
        .map(|i| {
            let lat = -60.0 + (i % 120) as f64;
            let lon = -180.0 + ((i * 7) % 360) as f64;
            FloatRecord::new(
                format!("{:07}", i),
                format!("Float {}", i),
                Coordinate::new_unchecked(lat, lon),
                20.0 + (i % 10) as f64,
            )
        })
        .collect()
}

fn bench_haversine(c: &mut Criterion) {
    let a = REFERENCE_POINT;
    let b = Coordinate::new_unchecked(-2.0, 80.0);

    c.bench_function("haversine_km", |bench| {
        bench.iter(|| haversine_km(black_box(a), black_box(b)))
    });
}

fn bench_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("ranking");

    for size in [3, 100, 10000] {
        let floats = create_test_floats(size);

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("rank_{}", size), |b| {
            b.iter(|| rank_by_distance(black_box(REFERENCE_POINT), black_box(&floats)).unwrap())
        });

        group.bench_function(format!("nearest_3_of_{}", size), |b| {
            b.iter(|| nearest(black_box(REFERENCE_POINT), black_box(&floats), 3).unwrap())
        });
    }

    group.finish();
}

fn bench_series(c: &mut Criterion) {
    let catalog = FloatCatalog::builtin();

    c.bench_function("monthly_chart", |b| {
        b.iter(|| ChartData::monthly_temperatures(black_box(catalog.floats()), ChartKind::Line))
    });

    let series = TemperatureSeries::for_float(&catalog.floats()[0]);
    c.bench_function("series_to_csv", |b| b.iter(|| black_box(&series).to_csv().unwrap()));
}

fn bench_chat(c: &mut Criterion) {
    let mut group = c.benchmark_group("chat");

    group.bench_function("classify", |b| {
        b.iter(|| classify(black_box("Can you plot a temperature trend for me?")))
    });

    let assistant = LocalAssistant::new(Arc::new(FloatCatalog::builtin()), REFERENCE_POINT, 3);
    group.bench_function("respond_nearest", |b| {
        b.iter(|| assistant.respond(black_box("nearest floats please")).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_haversine, bench_ranking, bench_series, bench_chat);
criterion_main!(benches);
