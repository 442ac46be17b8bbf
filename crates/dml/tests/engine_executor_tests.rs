#![cfg(feature = "dev")]
//! Tests for the repeated cross-fitting executor.
//!
//! These tests verify:
//! - Repetition `r` partitions with seed `seed + r`
//! - Caller-supplied assignments take precedence
//! - Sequential passes through references behave like the pass itself
//! - Per-repetition results, predictions and diagnostics
//!
//! ## Test Organization
//!
//! 1. **Fold Assignments** - Seeding and sample splitting
//! 2. **Execution** - Single and repeated runs, IV-type score

use approx::assert_relative_eq;

use dml::internals::algorithms::folds::FoldAssignment;
use dml::internals::algorithms::regression::LinearRegression;
use dml::internals::algorithms::score::ScoreKind;
use dml::internals::engine::executor::{CrossFitPass, DmlConfig, DmlExecutor, SequentialPass};
use dml::internals::evaluation::aggregation::Aggregation;
use dml::internals::primitives::matrix::Features;
use dml::internals::primitives::roles::NuisanceTarget;

// ============================================================================
// Helper Functions
// ============================================================================

fn config(n_rep: usize, score: ScoreKind) -> DmlConfig<f64> {
    DmlConfig {
        n_folds: 4,
        n_rep,
        seed: 11,
        confidence_level: 0.95,
        score,
        aggregation: Aggregation::Median,
        sample_splitting: None,
        return_diagnostics: true,
    }
}

/// Two covariates, treatment and outcome of a linear design with effect 2.
fn design(n: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let mut x = Vec::with_capacity(2 * n);
    let mut d = Vec::with_capacity(n);
    let mut y = Vec::with_capacity(n);
    for i in 0..n {
        let x1 = (i as f64 * 0.37).sin();
        let x2 = (i as f64 * 0.11).cos();
        let di = 0.7 * x1 + (i as f64 * 1.93).sin();
        x.extend_from_slice(&[x1, x2]);
        d.push(di);
        y.push(2.0 * di + x1 - 0.5 * x2 + 0.1 * (i as f64 * 2.71).cos());
    }
    (x, d, y)
}

// ============================================================================
// Fold Assignment Tests
// ============================================================================

/// Test that repetition `r` uses seed `seed + r`.
#[test]
fn test_fold_assignments_seeded_per_repetition() {
    let cfg = config(3, ScoreKind::PartiallingOut);
    let executor = DmlExecutor::new(&cfg, SequentialPass);

    let assignments = executor.fold_assignments(50).unwrap();
    assert_eq!(assignments.len(), 3);
    for (r, folds) in assignments.iter().enumerate() {
        let expected = FoldAssignment::partition(50, 4, 11 + r as u64).unwrap();
        assert_eq!(folds, &expected);
    }
    assert_ne!(assignments[0], assignments[1]);
}

/// Test that supplied assignments are used as given.
#[test]
fn test_fold_assignments_sample_splitting() {
    let labels: Vec<usize> = (0..20).map(|i| i % 2).collect();
    let supplied = FoldAssignment::from_labels(labels, 2).unwrap();

    let mut cfg = config(1, ScoreKind::PartiallingOut);
    cfg.sample_splitting = Some(vec![supplied.clone()]);
    let executor = DmlExecutor::new(&cfg, SequentialPass);

    assert_eq!(executor.fold_assignments(20).unwrap(), vec![supplied]);
}

/// Test that invalid partitions surface from the executor.
#[test]
fn test_fold_assignments_invalid() {
    let cfg = config(1, ScoreKind::PartiallingOut);
    let executor = DmlExecutor::new(&cfg, SequentialPass);
    assert!(executor.fold_assignments(3).is_err());
}

// ============================================================================
// Execution Tests
// ============================================================================

/// Test a single partialling-out repetition.
///
/// Verifies:
/// - One repetition passes through aggregation unchanged
/// - Predictions cover every row and diagnostics cover ml_l and ml_m
#[test]
fn test_run_single_repetition() {
    let (x, d, y) = design(120);
    let cfg = config(1, ScoreKind::PartiallingOut);
    let executor = DmlExecutor::new(&cfg, SequentialPass);
    let lr = LinearRegression::new();

    let out = executor
        .run(Features::new(&x, 120, 2), &y, &d, &lr, &lr, &lr)
        .unwrap();

    assert_eq!(out.n_obs, 120);
    assert_eq!(out.n_folds, 4);
    assert_eq!(out.repetitions.len(), 1);

    let rep = &out.repetitions[0];
    assert_eq!(out.coefficient, rep.inference.coefficient);
    assert_eq!(out.std_error, rep.inference.std_error);
    assert_relative_eq!(out.coefficient, 2.0, epsilon = 0.1);

    assert_eq!(rep.predictions.ml_l.len(), 120);
    assert_eq!(rep.predictions.ml_m.len(), 120);
    assert!(rep.predictions.ml_g.is_none());
    assert_eq!(rep.score.kind(), ScoreKind::PartiallingOut);

    let targets: Vec<NuisanceTarget> = rep.diagnostics.iter().map(|d| d.target).collect();
    assert_eq!(targets, vec![NuisanceTarget::Outcome, NuisanceTarget::Treatment]);
}

/// Test repeated runs aggregate with the median.
#[test]
fn test_run_repetitions_median() {
    let (x, d, y) = design(150);
    let cfg = config(3, ScoreKind::PartiallingOut);
    let executor = DmlExecutor::new(&cfg, SequentialPass);
    let lr = LinearRegression::new();

    let out = executor
        .run(Features::new(&x, 150, 2), &y, &d, &lr, &lr, &lr)
        .unwrap();

    let mut thetas: Vec<f64> = out
        .repetitions
        .iter()
        .map(|r| r.inference.coefficient)
        .collect();
    thetas.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(out.coefficient, thetas[1]);
}

/// Test the IV-type score trains ml_g and reports its diagnostics.
#[test]
fn test_run_iv_type() {
    let (x, d, y) = design(120);
    let cfg = config(1, ScoreKind::IvType);
    let executor = DmlExecutor::new(&cfg, SequentialPass);
    let lr = LinearRegression::new();

    let out = executor
        .run(Features::new(&x, 120, 2), &y, &d, &lr, &lr, &lr)
        .unwrap();

    let rep = &out.repetitions[0];
    assert_eq!(rep.score.kind(), ScoreKind::IvType);
    assert_eq!(rep.predictions.ml_g.as_ref().map(Vec::len), Some(120));
    assert_eq!(rep.diagnostics.len(), 3);
    assert_eq!(rep.diagnostics[2].target, NuisanceTarget::AdjustedOutcome);
    assert_relative_eq!(out.coefficient, 2.0, epsilon = 0.1);
}

/// Test that a borrowed pass gives the same result as the pass itself.
#[test]
fn test_borrowed_pass() {
    let (x, d, y) = design(80);
    let cfg = config(2, ScoreKind::PartiallingOut);
    let lr = LinearRegression::new();
    let features = Features::new(&x, 80, 2);

    let pass = SequentialPass;
    let owned = DmlExecutor::new(&cfg, pass)
        .run(features, &y, &d, &lr, &lr, &lr)
        .unwrap();
    let borrowed = DmlExecutor::new(&cfg, &pass)
        .run(features, &y, &d, &lr, &lr, &lr)
        .unwrap();

    assert_eq!(owned.coefficient, borrowed.coefficient);
    assert_eq!(owned.std_error, borrowed.std_error);

    let folds = FoldAssignment::partition(80, 4, 0).unwrap();
    let (l_hat, m_hat) = (&pass)
        .nuisance_pair(features, &y, &d, &folds, &lr, &lr, 0)
        .unwrap();
    let l_direct = CrossFitPass::<f64>::nuisance_pass(
        &pass,
        features,
        &y,
        &folds,
        &lr,
        NuisanceTarget::Outcome,
        0,
    )
    .unwrap();
    assert_eq!(l_hat, l_direct);
    assert_eq!(m_hat.len(), 80);
}
