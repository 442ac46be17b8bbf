#![cfg(feature = "dev")]
//! Tests for the numerical building blocks.
//!
//! These tests verify:
//! - Summary statistics (mean, median, centered sum of squares)
//! - Cholesky factorization and solve
//! - Kernel weight functions
//! - Standard normal CDF and quantiles
//!
//! ## Test Organization
//!
//! 1. **Statistics** - Mean, median, dot products
//! 2. **Linear Algebra** - Positive definite and singular systems
//! 3. **Kernels** - Weights at the center and the boundary
//! 4. **Normal Distribution** - Known quantiles and CDF values

use approx::assert_relative_eq;

use dml::internals::math::kernel::WeightFunction;
use dml::internals::math::linalg::{cholesky_in_place, cholesky_solve};
use dml::internals::math::normal::{cdf, inverse_cdf, two_sided_p_value, z_critical};
use dml::internals::math::stats::{centered_sum_sq, dot, mean, median, median_inplace, sum};

// ============================================================================
// Statistics Tests
// ============================================================================

/// Test basic summary statistics.
#[test]
fn test_basic_stats() {
    let v = [1.0, 2.0, 3.0, 6.0];
    assert_relative_eq!(sum(&v), 12.0);
    assert_relative_eq!(mean(&v), 3.0);
    assert_relative_eq!(centered_sum_sq(&v), 4.0 + 1.0 + 0.0 + 9.0);
    assert_relative_eq!(dot(&v, &[1.0, 0.0, 1.0, 0.5]), 7.0);
    assert_eq!(mean::<f64>(&[]), 0.0);
}

/// Test median for odd and even lengths.
#[test]
fn test_median() {
    assert_relative_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
    assert_relative_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
    assert_relative_eq!(median(&[7.0]), 7.0);
    assert_eq!(median::<f64>(&[]), 0.0);

    let mut scratch = vec![10.0, -1.0, 5.0, 5.0, 0.0, 2.0];
    assert_relative_eq!(median_inplace(&mut scratch), 3.5);
}

// ============================================================================
// Linear Algebra Tests
// ============================================================================

/// Test solving a 2x2 positive definite system.
///
/// Verifies the solution of [[4, 2], [2, 3]] x = [2, 1].
#[test]
fn test_cholesky_solve() {
    let mut a = vec![4.0, 2.0, 2.0, 3.0];
    assert!(cholesky_in_place(&mut a, 2, 1e-12));

    let mut b = vec![2.0, 1.0];
    cholesky_solve(&a, 2, &mut b);
    assert_relative_eq!(b[0], 0.5, epsilon = 1e-12);
    assert_relative_eq!(b[1], 0.0, epsilon = 1e-12);
}

/// Test that singular matrices are rejected.
#[test]
fn test_cholesky_singular() {
    let mut a = vec![1.0, 1.0, 1.0, 1.0];
    assert!(!cholesky_in_place(&mut a, 2, 1e-12));

    let mut zero = vec![0.0];
    assert!(!cholesky_in_place(&mut zero, 1, 1e-12));
}

// ============================================================================
// Kernel Tests
// ============================================================================

/// Test weights at the center and the support boundary.
#[test]
fn test_kernel_weights() {
    for wf in [
        WeightFunction::Epanechnikov,
        WeightFunction::Biweight,
        WeightFunction::Tricube,
        WeightFunction::Uniform,
    ] {
        assert!(wf.is_bounded());
        assert_relative_eq!(wf.compute_weight(0.0f64), 1.0);
        assert_eq!(wf.compute_weight(1.0f64), 0.0);
        assert_eq!(wf.compute_weight(-1.5f64), 0.0);
    }

    assert_relative_eq!(WeightFunction::Epanechnikov.compute_weight(0.5f64), 0.75);
    assert_relative_eq!(WeightFunction::Biweight.compute_weight(0.5f64), 0.5625);
    assert_relative_eq!(
        WeightFunction::Tricube.compute_weight(0.5f64),
        0.875f64.powi(3),
        epsilon = 1e-12
    );
}

/// Test the unbounded Gaussian kernel.
#[test]
fn test_gaussian_kernel() {
    let g = WeightFunction::Gaussian;
    assert!(!g.is_bounded());
    assert_relative_eq!(g.compute_weight(1.0f64), (-0.5f64).exp(), epsilon = 1e-12);
    assert_eq!(g.compute_weight(10.0f64), 0.0);
    assert_eq!(WeightFunction::default(), WeightFunction::Tricube);
}

/// Test kernel names and their display form.
#[test]
fn test_kernel_names() {
    assert_eq!(WeightFunction::Epanechnikov.name(), "Epanechnikov");
    assert_eq!(WeightFunction::Gaussian.to_string(), "Gaussian");
    assert_eq!(WeightFunction::Uniform.to_string(), WeightFunction::Uniform.name());
}

// ============================================================================
// Normal Distribution Tests
// ============================================================================

/// Test known standard normal quantiles.
#[test]
fn test_inverse_cdf() {
    assert_relative_eq!(inverse_cdf(0.5), 0.0, epsilon = 1e-9);
    assert_relative_eq!(inverse_cdf(0.975), 1.959_963_985, epsilon = 1e-7);
    assert_relative_eq!(inverse_cdf(0.01), -2.326_347_874, epsilon = 1e-7);
    assert_eq!(inverse_cdf(0.0), 0.0);
}

/// Test the standard normal CDF.
#[test]
fn test_cdf() {
    assert_relative_eq!(cdf(0.0), 0.5, epsilon = 1e-7);
    assert_relative_eq!(cdf(1.959_963_985), 0.975, epsilon = 1e-7);
    assert_relative_eq!(cdf(-1.0) + cdf(1.0), 1.0, epsilon = 1e-7);
}

/// Test critical values and p-values in both precisions.
#[test]
fn test_critical_values() {
    assert_relative_eq!(z_critical(0.95f64), 1.959_963_985, epsilon = 1e-7);
    assert_relative_eq!(z_critical(0.95f32), 1.959_964f32, epsilon = 1e-5);
    assert_relative_eq!(two_sided_p_value(0.0f64), 1.0, epsilon = 1e-6);
    assert!(two_sided_p_value(f64::NAN).is_nan());
}
