#![cfg(feature = "dev")]
//! Tests for the built-in nuisance learners.
//!
//! These tests verify the reference regression learners:
//! - `LinearRegression` (OLS and ridge)
//! - `KernelRegressor` (k-nearest-neighbour kernel smoother)
//!
//! ## Test Organization
//!
//! 1. **Linear Regression** - Exact fits, ridge shrinkage, error cases
//! 2. **Kernel Regression** - Local averaging, clamping, fallbacks
//! 3. **Learner References** - Borrowed learners are learners

use approx::assert_relative_eq;

use dml::internals::algorithms::learner::{Learner, LearnerError, Predictor};
use dml::internals::algorithms::neighbors::KernelRegressor;
use dml::internals::algorithms::regression::LinearRegression;
use dml::internals::math::kernel::WeightFunction;
use dml::internals::primitives::matrix::Features;

// ============================================================================
// Linear Regression Tests
// ============================================================================

/// Test that OLS recovers an exact affine relationship.
///
/// Verifies intercept and both slopes of y = 1 + 2·x1 − 3·x2.
#[test]
fn test_ols_exact_fit() {
    let n = 12;
    let mut x = Vec::with_capacity(n * 2);
    let mut y = Vec::with_capacity(n);
    for i in 0..n {
        let x1 = i as f64;
        let x2 = (i as f64 * 0.9).sin();
        x.push(x1);
        x.push(x2);
        y.push(1.0 + 2.0 * x1 - 3.0 * x2);
    }

    let model = LinearRegression::new()
        .fit(Features::new(&x, n, 2), &y)
        .unwrap();
    assert_relative_eq!(model.intercept, 1.0, epsilon = 1e-9);
    assert_relative_eq!(model.coefficients[0], 2.0, epsilon = 1e-9);
    assert_relative_eq!(model.coefficients[1], -3.0, epsilon = 1e-9);

    let preds = model.predict(Features::new(&[0.5, 0.0], 1, 2)).unwrap();
    assert_relative_eq!(preds[0], 2.0, epsilon = 1e-9);
}

/// Test ridge shrinkage of the slope.
///
/// Verifies slope = Sxy / (Sxx + α) with α = Sxx gives half the OLS slope.
#[test]
fn test_ridge_shrinkage() {
    let x: Vec<f64> = (0..10).map(|i| i as f64).collect();
    let y = x.clone();
    let sxx = 82.5;
    assert_eq!(LinearRegression::new().alpha(), 0.0);
    assert_eq!(LinearRegression::ridge(sxx).alpha(), sxx);

    let model = LinearRegression::ridge(sxx)
        .fit(Features::new(&x, 10, 1), &y)
        .unwrap();
    assert_relative_eq!(model.coefficients[0], 0.5, epsilon = 1e-12);
    // The intercept is not penalized
    assert_relative_eq!(model.intercept, 4.5 - 0.5 * 4.5, epsilon = 1e-12);
}

/// Test the intercept-only model without covariates.
#[test]
fn test_ols_no_covariates() {
    let y = [1.0, 2.0, 6.0];
    let model = LinearRegression::new()
        .fit(Features::new(&[], 3, 0), &y)
        .unwrap();
    assert_relative_eq!(model.intercept, 3.0);
    let preds = model.predict(Features::new(&[], 2, 0)).unwrap();
    assert_eq!(preds, vec![3.0, 3.0]);
}

/// Test linear regression error cases.
#[test]
fn test_ols_errors() {
    let lr = LinearRegression::new();
    assert_eq!(
        lr.fit(Features::<f64>::new(&[], 0, 1), &[]).unwrap_err(),
        LearnerError::EmptyTrainingSet
    );
    assert_eq!(
        lr.fit(Features::new(&[1.0, 2.0], 2, 1), &[1.0]).unwrap_err(),
        LearnerError::TargetMismatch {
            rows: 2,
            targets: 1
        }
    );
    assert_eq!(
        lr.fit(Features::new(&[1.0, 1.0, 1.0], 3, 1), &[1.0, 2.0, 3.0])
            .unwrap_err(),
        LearnerError::SingularDesign
    );
    assert_eq!(
        LinearRegression::ridge(-1.0)
            .fit(Features::new(&[1.0, 2.0], 2, 1), &[1.0, 2.0])
            .unwrap_err(),
        LearnerError::InvalidParameter("alpha")
    );

    let model = lr.fit(Features::new(&[1.0, 2.0], 2, 1), &[1.0, 2.0]).unwrap();
    assert_eq!(
        model.predict(Features::new(&[1.0, 2.0], 1, 2)).unwrap_err(),
        LearnerError::DimensionMismatch {
            expected: 1,
            got: 2
        }
    );
}

/// Test that ridge regularizes an otherwise singular design.
#[test]
fn test_ridge_handles_constant_covariate() {
    let x = [1.0, 1.0, 1.0];
    let model = LinearRegression::ridge(1.0)
        .fit(Features::new(&x, 3, 1), &[1.0, 2.0, 3.0])
        .unwrap();
    assert_relative_eq!(model.coefficients[0], 0.0);
    assert_relative_eq!(model.intercept, 2.0);
}

// ============================================================================
// Kernel Regression Tests
// ============================================================================

/// Test that symmetric neighbours average to the center.
#[test]
fn test_kernel_symmetric_neighbours() {
    let x: Vec<f64> = (0..11).map(|i| i as f64).collect();
    let y: Vec<f64> = x.iter().map(|v| 2.0 * v).collect();

    for wf in [
        WeightFunction::Tricube,
        WeightFunction::Epanechnikov,
        WeightFunction::Gaussian,
        WeightFunction::Uniform,
    ] {
        let model = KernelRegressor::new(3)
            .weight_function(wf)
            .fit(Features::new(&x, 11, 1), &y)
            .unwrap();
        let preds = model.predict(Features::new(&[5.0], 1, 1)).unwrap();
        assert_relative_eq!(preds[0], 10.0, epsilon = 1e-12);
    }
}

/// Test that a neighbour count above the training size is clamped.
#[test]
fn test_kernel_clamps_neighbours() {
    let x = [0.0, 1.0, 2.0];
    let y = [1.0, 1.0, 1.0];
    let model = KernelRegressor::new(100)
        .fit(Features::new(&x, 3, 1), &y)
        .unwrap();
    let preds = model.predict(Features::new(&[10.0, -3.0], 2, 1)).unwrap();
    for p in preds {
        assert_relative_eq!(p, 1.0, epsilon = 1e-12);
    }
}

/// Test the plain mean fallback when all neighbours coincide.
#[test]
fn test_kernel_zero_bandwidth() {
    let x = [2.0, 2.0, 2.0, 2.0];
    let y = [1.0, 2.0, 3.0, 6.0];
    let model = KernelRegressor::new(4)
        .fit(Features::new(&x, 4, 1), &y)
        .unwrap();
    let preds = model.predict(Features::new(&[2.0], 1, 1)).unwrap();
    assert_relative_eq!(preds[0], 3.0, epsilon = 1e-12);
}

/// Test kernel regression error cases.
#[test]
fn test_kernel_errors() {
    assert_eq!(
        KernelRegressor::new(0)
            .fit(Features::new(&[1.0], 1, 1), &[1.0])
            .unwrap_err(),
        LearnerError::InvalidParameter("n_neighbors")
    );
    assert_eq!(
        KernelRegressor::default()
            .fit(Features::<f64>::new(&[], 0, 2), &[])
            .unwrap_err(),
        LearnerError::EmptyTrainingSet
    );
    assert_eq!(KernelRegressor::default().n_neighbors(), 10);
}

/// Test the kernel learner description.
#[test]
fn test_kernel_display() {
    assert_eq!(
        KernelRegressor::default().to_string(),
        "KernelRegressor(n_neighbors=10, kernel=Tricube)"
    );
    assert_eq!(
        KernelRegressor::new(25)
            .weight_function(WeightFunction::Gaussian)
            .to_string(),
        "KernelRegressor(n_neighbors=25, kernel=Gaussian)"
    );
}

// ============================================================================
// Learner Reference Tests
// ============================================================================

fn fit_through_trait<L: Learner<f64>>(learner: L) -> bool {
    learner.fit(Features::new(&[0.0, 1.0, 2.0], 3, 1), &[0.0, 1.0, 2.0]).is_ok()
}

/// Test that a borrowed learner is itself a learner.
#[test]
fn test_borrowed_learner() {
    let lr = LinearRegression::new();
    assert!(fit_through_trait(&lr));
    assert!(fit_through_trait(&&lr));
}
