//! Benchmarks for relief rendering

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use terrashade_algorithms::terrain::{
    encode_elevation, shaded_relief_with, ReliefMode, ReliefParams,
};
use terrashade_core::RgbaImage;
use terrashade_parallel::ProcessingMode;

fn create_tile(size: usize) -> RgbaImage {
    // Varied surface: tilted plane plus a repeating bump pattern
    RgbaImage::from_fn(size, size, |x, y| {
        let base = (x + y) as f64 * 2.0;
        let variation = ((y * 7 + x * 13) % 100) as f64;
        let [r, g, b] = encode_elevation(base + variation);
        [r, g, b, 255]
    })
    .unwrap()
}

fn bench_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("relief_mode");
    let tile = create_tile(512);

    for mode in [ReliefMode::Shaded, ReliefMode::Colorized] {
        let params = ReliefParams {
            mode,
            resolution: 30.0,
            ..Default::default()
        };
        group.bench_with_input(BenchmarkId::from_parameter(mode), &params, |b, params| {
            b.iter(|| {
                shaded_relief_with(black_box(&tile), params, ProcessingMode::Parallel).unwrap()
            })
        });
    }

    group.finish();
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("relief_size");
    let params = ReliefParams {
        resolution: 30.0,
        ..Default::default()
    };

    for size in [256, 512, 1024].iter() {
        let tile = create_tile(*size);

        group.bench_with_input(BenchmarkId::new("sequential", size), size, |b, _| {
            b.iter(|| {
                shaded_relief_with(black_box(&tile), &params, ProcessingMode::Sequential).unwrap()
            })
        });
        group.bench_with_input(BenchmarkId::new("parallel", size), size, |b, _| {
            b.iter(|| {
                shaded_relief_with(black_box(&tile), &params, ProcessingMode::Parallel).unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_modes, bench_scaling);
criterion_main!(benches);
