//! Tests for the prelude module.
//!
//! These tests verify that the prelude exports all necessary types and traits
//! for convenient usage of the DML API. The prelude should provide a one-stop
//! import for common estimation workflows.
//!
//! ## Test Organization
//!
//! 1. **Import Verification** - All prelude exports are accessible
//! 2. **Type Usage** - Enum variants can be used without qualification

use dml::prelude::*;

fn tiny_table() -> Vec<(&'static str, Vec<f64>)> {
    let x: Vec<f64> = (0..30).map(|i| (i as f64 * 0.41).sin()).collect();
    let d: Vec<f64> = (0..30)
        .map(|i| 0.5 * x[i] + (i as f64 * 2.7).cos())
        .collect();
    let y: Vec<f64> = (0..30)
        .map(|i| d[i] + x[i] + 0.3 * (i as f64 * 1.9).sin())
        .collect();
    vec![("y", y), ("d", d), ("x", x)]
}

// ============================================================================
// Import Verification Tests
// ============================================================================

/// Test that all prelude imports work correctly.
///
/// Verifies that the prelude exports the builder, adapter, roles and learners.
#[test]
fn test_prelude_imports() {
    let table = tiny_table();
    let roles = ColumnRoles::new("y", "d");
    let lr = LinearRegression::new();

    let result = DoubleML::new()
        .n_folds(3)
        .adapter(Batch)
        .build()
        .unwrap()
        .fit_table(&table, &roles, &lr, &lr);

    assert!(result.is_ok(), "Basic fit should work with prelude imports");
}

/// Test score variants are available.
#[test]
fn test_prelude_score_kinds() {
    let _ = DoubleML::<f64>::new().score(PartiallingOut);
    let _ = DoubleML::<f64>::new().score(IvType);
}

/// Test aggregation variants are available.
#[test]
fn test_prelude_aggregation() {
    let _ = DoubleML::<f64>::new().aggregation(Median);
    let _ = DoubleML::<f64>::new().aggregation(Mean);
}

/// Test kernel weight functions are available.
#[test]
fn test_prelude_weight_functions() {
    for wf in [Tricube, Epanechnikov, Gaussian, Biweight, Uniform] {
        let _ = KernelRegressor::new(5).weight_function(wf);
    }
}

// ============================================================================
// Type Usage Tests
// ============================================================================

/// Test error types are available.
#[test]
fn test_prelude_errors() {
    let err = DmlError::EmptyInput;
    assert_eq!(err.kind(), ErrorKind::Data);
    assert_eq!(FitStage::Predict.to_string(), "predict");
    assert_eq!(NuisanceTarget::AdjustedOutcome.learner_name(), "ml_g");
    assert_eq!(ColumnRole::Covariate.to_string(), "covariate");
}

/// Test fold assignments and result types are available.
#[test]
fn test_prelude_result_types() {
    let folds = FoldAssignment::partition(30, 3, 0).unwrap();
    let table = tiny_table();
    let lr = LinearRegression::new();

    let result: EffectEstimate<f64> = DoubleML::new()
        .sample_splitting(vec![folds])
        .return_predictions()
        .return_diagnostics()
        .adapter(Batch)
        .build()
        .unwrap()
        .fit_table(&table, &ColumnRoles::new("y", "d"), &lr, &lr)
        .unwrap();

    let preds: &Vec<NuisancePredictions<f64>> = result.predictions.as_ref().unwrap();
    let diags: &Vec<Vec<NuisanceDiagnostics<f64>>> = result.diagnostics.as_ref().unwrap();
    assert_eq!(preds.len(), 1);
    assert_eq!(diags[0].len(), 2);
    assert_eq!(result.n_folds, 3);
}
