use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use quantfit_curves::{FitEngine, FitOptions, ModelSpec};

fn generate_series(n: usize) -> (Vec<f64>, Vec<f64>) {
    let x: Vec<f64> = (1..=n).map(|i| i as f64 * 0.25).collect();
    let y: Vec<f64> = x
        .iter()
        .map(|&v| 2.0 * v * v - 3.0 * v + 1.0 + 0.05 * (v * 0.7).sin())
        .collect();
    (x, y)
}

fn bench_auto_fit(c: &mut Criterion) {
    let (x, y) = generate_series(40);
    let engine = FitEngine::new();
    let options = FitOptions::default();

    c.bench_function("fit_auto_40_points", |b| {
        b.iter(|| engine.fit(black_box(&x), black_box(&y), &options).unwrap())
    });
}

fn bench_polynomial_only(c: &mut Criterion) {
    let (x, y) = generate_series(200);
    let engine = FitEngine::new();
    let options = FitOptions::new().with_model(ModelSpec::Polynomial);

    c.bench_function("fit_polynomial_200_points", |b| {
        b.iter(|| engine.fit(black_box(&x), black_box(&y), &options).unwrap())
    });
}

fn bench_predict(c: &mut Criterion) {
    let (x, y) = generate_series(40);
    let engine = FitEngine::new();
    let report = engine.fit(&x, &y, &FitOptions::default()).unwrap();
    let grid: Vec<f64> = (0..1000).map(|i| i as f64 * 0.01).collect();

    c.bench_function("predict_1000_points", |b| {
        b.iter(|| engine.predict(black_box(&report.model_id), black_box(&grid)).unwrap())
    });
}

criterion_group!(benches, bench_auto_fit, bench_polynomial_only, bench_predict);
criterion_main!(benches);
