use criterion::{criterion_group, criterion_main, Criterion};
use ndarray::Array2;
use spiral_math::fft::rfft_rows;
use std::hint::black_box;

fn bench_rfft_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("rfft_rows");

    for &(nr, nt) in &[(50, 50), (100, 61), (200, 257)] {
        let sigma = Array2::from_shape_fn((nr, nt), |(i, j)| {
            1.0 + 0.1 * ((i + 1) as f64 * j as f64 * 0.05).cos()
        });
        group.bench_function(format!("{nr}x{nt}"), |b| {
            b.iter(|| {
                let spectrum = rfft_rows(&sigma);
                black_box(spectrum[[nr / 2, 1]]);
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_rfft_rows);
criterion_main!(benches);
