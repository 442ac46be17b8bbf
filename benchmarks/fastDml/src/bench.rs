//! DML estimation benchmarks using Criterion.
//!
//! Benchmarks cover:
//! - Scalability (1K to 20K observations)
//! - Nuisance learners (linear, ridge, kernel neighbours)
//! - Number of folds and repetitions
//! - Score functions (partialling-out vs IV-type)
//! - Pathological cases (binary treatment, many covariates)
//!
//! For serial execution, use `FASTDML_BACKEND=serial cargo bench`.
//! For parallel execution, use `FASTDML_BACKEND=parallel cargo bench`.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fastDml::prelude::*;
use rand::prelude::*;
use rand_distr::{Bernoulli, Normal};
use std::env;
use std::hint::black_box;

// ============================================================================
// Helper Functions
// ============================================================================

fn get_config() -> (bool, &'static str) {
    match env::var("FASTDML_BACKEND").ok().as_deref() {
        Some("serial") => (false, "serial"),
        Some("parallel") | _ => (true, "parallel"),
    }
}

// ============================================================================
// Data Generation with Reproducible RNG
// ============================================================================

/// Linear partially linear design with `p` Gaussian covariates.
fn generate_linear_data(size: usize, p: usize, seed: u64) -> Dataset<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, 1.0).unwrap();

    let mut x = Vec::with_capacity(size * p);
    let mut y = Vec::with_capacity(size);
    let mut d = Vec::with_capacity(size);
    for _ in 0..size {
        let row: Vec<f64> = (0..p).map(|_| normal.sample(&mut rng)).collect();
        let di = 0.5 * row[0] - 0.3 * row[p - 1] + normal.sample(&mut rng);
        let yi = di + row[0] + 0.5 * row[p / 2] + normal.sample(&mut rng);
        x.extend_from_slice(&row);
        d.push(di);
        y.push(yi);
    }
    Dataset::from_arrays(&y, &d, &x, p).unwrap()
}

/// Nonlinear confounding in two covariates.
fn generate_nonlinear_data(size: usize, seed: u64) -> Dataset<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, 1.0).unwrap();

    let mut x = Vec::with_capacity(size * 2);
    let mut y = Vec::with_capacity(size);
    let mut d = Vec::with_capacity(size);
    for _ in 0..size {
        let x1: f64 = rng.gen_range(-2.0..2.0);
        let x2: f64 = normal.sample(&mut rng);
        let di = x1.sin() + 0.2 * x2 * x2 + normal.sample(&mut rng);
        let yi = 0.8 * di + x1.cos() + x2.tanh() + normal.sample(&mut rng);
        x.extend_from_slice(&[x1, x2]);
        d.push(di);
        y.push(yi);
    }
    Dataset::from_arrays(&y, &d, &x, 2).unwrap()
}

/// Binary treatment with logistic propensity.
fn generate_binary_treatment_data(size: usize, seed: u64) -> Dataset<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, 1.0).unwrap();

    let mut x = Vec::with_capacity(size * 3);
    let mut y = Vec::with_capacity(size);
    let mut d = Vec::with_capacity(size);
    for _ in 0..size {
        let row: [f64; 3] = [
            normal.sample(&mut rng),
            normal.sample(&mut rng),
            normal.sample(&mut rng),
        ];
        let p = 1.0 / (1.0 + (-(0.8 * row[0] - 0.4 * row[2])).exp());
        let treated = Bernoulli::new(p).unwrap().sample(&mut rng);
        let di = if treated { 1.0 } else { 0.0 };
        y.push(0.4 * di + row[0] + 0.3 * row[1] + normal.sample(&mut rng));
        d.push(di);
        x.extend_from_slice(&row);
    }
    Dataset::from_arrays(&y, &d, &x, 3).unwrap()
}

// ============================================================================
// Benchmark Functions
// ============================================================================

fn bench_scalability(c: &mut Criterion) {
    let (use_parallel, mode_name) = get_config();
    let mut group = c.benchmark_group(format!("scalability_{}", mode_name));
    group.sample_size(30);

    let lr = LinearRegression::new();
    for size in [1_000, 5_000, 20_000] {
        group.throughput(Throughput::Elements(size as u64));

        let data = generate_linear_data(size, 10, 42);

        group.bench_with_input(BenchmarkId::new("linear", size), &size, |b, _| {
            b.iter(|| {
                DoubleML::new()
                    .n_folds(5)
                    .adapter(Batch)
                    .parallel(use_parallel)
                    .build()
                    .unwrap()
                    .fit(black_box(&data), &lr, &lr)
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_learners(c: &mut Criterion) {
    let (use_parallel, mode_name) = get_config();
    let mut group = c.benchmark_group(format!("learners_{}", mode_name));
    group.sample_size(20);

    let data = generate_nonlinear_data(2_000, 42);
    let model = DoubleML::new()
        .n_folds(5)
        .adapter(Batch)
        .parallel(use_parallel)
        .build()
        .unwrap();

    let lr = LinearRegression::new();
    let ridge = LinearRegression::ridge(1.0);
    let knn = KernelRegressor::new(25);
    let knn_gauss = KernelRegressor::new(25).weight_function(Gaussian);

    group.bench_function("linear", |b| {
        b.iter(|| model.fit(black_box(&data), &lr, &lr).unwrap())
    });
    group.bench_function("ridge", |b| {
        b.iter(|| model.fit(black_box(&data), &ridge, &ridge).unwrap())
    });
    group.bench_function("kernel_tricube", |b| {
        b.iter(|| model.fit(black_box(&data), &knn, &knn).unwrap())
    });
    group.bench_function("kernel_gaussian", |b| {
        b.iter(|| model.fit(black_box(&data), &knn_gauss, &knn_gauss).unwrap())
    });
    group.finish();
}

fn bench_folds(c: &mut Criterion) {
    let (use_parallel, mode_name) = get_config();
    let mut group = c.benchmark_group(format!("folds_{}", mode_name));
    group.sample_size(30);

    let data = generate_nonlinear_data(2_000, 42);
    let knn = KernelRegressor::new(20);

    for k in [2, 5, 10, 20] {
        group.bench_with_input(BenchmarkId::new("kernel", k), &k, |b, &k| {
            b.iter(|| {
                DoubleML::new()
                    .n_folds(k)
                    .adapter(Batch)
                    .parallel(use_parallel)
                    .build()
                    .unwrap()
                    .fit(black_box(&data), &knn, &knn)
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_repetitions(c: &mut Criterion) {
    let (use_parallel, mode_name) = get_config();
    let mut group = c.benchmark_group(format!("repetitions_{}", mode_name));
    group.sample_size(20);

    let data = generate_linear_data(5_000, 10, 42);
    let lr = LinearRegression::new();

    for n_rep in [1, 3, 5, 10] {
        group.bench_with_input(BenchmarkId::new("median", n_rep), &n_rep, |b, &n_rep| {
            b.iter(|| {
                DoubleML::new()
                    .n_rep(n_rep)
                    .adapter(Batch)
                    .parallel(use_parallel)
                    .build()
                    .unwrap()
                    .fit(black_box(&data), &lr, &lr)
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_scores(c: &mut Criterion) {
    let (use_parallel, mode_name) = get_config();
    let mut group = c.benchmark_group(format!("scores_{}", mode_name));
    group.sample_size(30);

    let data = generate_nonlinear_data(3_000, 42);
    let knn = KernelRegressor::new(20);

    group.bench_function("partialling_out", |b| {
        let model = DoubleML::new()
            .score(PartiallingOut)
            .adapter(Batch)
            .parallel(use_parallel)
            .build()
            .unwrap();
        b.iter(|| model.fit(black_box(&data), &knn, &knn).unwrap())
    });
    group.bench_function("iv_type", |b| {
        let model = DoubleML::new()
            .score(IvType)
            .adapter(Batch)
            .parallel(use_parallel)
            .build()
            .unwrap();
        b.iter(|| model.fit(black_box(&data), &knn, &knn).unwrap())
    });
    group.finish();
}

fn bench_pathological(c: &mut Criterion) {
    let (use_parallel, mode_name) = get_config();
    let mut group = c.benchmark_group(format!("pathological_{}", mode_name));
    group.sample_size(20);

    let model = DoubleML::new()
        .return_predictions()
        .return_diagnostics()
        .adapter(Batch)
        .parallel(use_parallel)
        .build()
        .unwrap();
    let lr = LinearRegression::new();

    // Binary treatment
    let binary = generate_binary_treatment_data(5_000, 42);
    group.bench_function("binary_treatment", |b| {
        b.iter(|| model.fit(black_box(&binary), &lr, &lr).unwrap())
    });

    // Wide covariate matrix
    let wide = generate_linear_data(2_000, 100, 42);
    let ridge = LinearRegression::ridge(10.0);
    group.bench_function("many_covariates", |b| {
        b.iter(|| model.fit(black_box(&wide), &ridge, &ridge).unwrap())
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_scalability,
    bench_learners,
    bench_folds,
    bench_repetitions,
    bench_scores,
    bench_pathological,
);

criterion_main!(benches);
