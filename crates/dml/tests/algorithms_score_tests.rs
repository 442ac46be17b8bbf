#![cfg(feature = "dev")]
//! Tests for orthogonal scores and the moment solver.
//!
//! These tests verify the PLR score components and θ̂:
//! - Partialling-out: ψ_a = −ṽ², ψ_b = ṽ·ũ
//! - IV-type: ψ_a = −ṽ·d, ψ_b = ṽ·(y − ĝ)
//! - Degenerate treatments are reported, never solved
//!
//! ## Test Organization
//!
//! 1. **Residuals** - Residual pair construction
//! 2. **Score Components** - Both score variants on hand-computed data
//! 3. **Moment Solver** - θ̂ and the zero-sum property
//! 4. **Degeneracy** - No residual treatment variation

use approx::assert_relative_eq;

use dml::internals::algorithms::effect::solve_effect;
use dml::internals::algorithms::score::{
    residuals, LinearScore, ResidualPair, ScoreInputs, ScoreKind,
};
use dml::internals::primitives::errors::{DmlError, ErrorKind};

// ============================================================================
// Residual Tests
// ============================================================================

/// Test residual construction.
#[test]
fn test_residual_pair() {
    let pair = ResidualPair::new(&[3.0, 1.0], &[1.0, 1.5], &[2.0, 0.0], &[0.5, 0.5]);
    assert_eq!(pair.outcome, vec![2.0, -0.5]);
    assert_eq!(pair.treatment, vec![1.5, -0.5]);
    assert_eq!(pair.len(), 2);
    assert!(!pair.is_empty());

    assert_eq!(residuals(&[1.0, 2.0], &[0.5, 3.0]), vec![0.5, -1.0]);
}

// ============================================================================
// Score Component Tests
// ============================================================================

/// Test partialling-out score components.
///
/// Verifies ψ_a = −ṽ² and ψ_b = ṽ·ũ element-wise.
#[test]
fn test_partialling_out_components() {
    let zeros = [0.0; 4];
    let y = [1.0, -1.0, 3.0, -3.0];
    let d = [1.0, -1.0, 2.0, -2.0];
    let pair = ResidualPair::new(&y, &zeros, &d, &zeros);

    let score = LinearScore::build(&pair, ScoreInputs::PartiallingOut);
    assert_eq!(score.kind(), ScoreKind::PartiallingOut);
    assert_eq!(score.psi_a(), &[-1.0, -1.0, -4.0, -4.0]);
    assert_eq!(score.psi_b(), &[1.0, 1.0, 6.0, 6.0]);
    assert_eq!(score.len(), 4);
}

/// Test IV-type score components.
///
/// Verifies ψ_a uses the raw treatment and ψ_b the adjusted residual.
#[test]
fn test_iv_type_components() {
    let y = [0.0; 4];
    let d = [2.0, 0.0, 3.0, -1.0];
    let d_hat = [1.0; 4];
    let adjusted = [1.0, -1.0, 3.0, -3.0];
    let pair = ResidualPair::new(&y, &[0.0; 4], &d, &d_hat);

    let score = LinearScore::build(
        &pair,
        ScoreInputs::IvType {
            treatment: &d,
            adjusted_residual: &adjusted,
        },
    );
    assert_eq!(score.kind(), ScoreKind::IvType);
    // ṽ = [1, -1, 2, -2]
    assert_eq!(score.psi_a(), &[-2.0, 0.0, -6.0, -2.0]);
    assert_eq!(score.psi_b(), &[1.0, 1.0, 6.0, 6.0]);

    let theta = solve_effect(&score, &d, 0).unwrap();
    assert_relative_eq!(theta, 1.4, epsilon = 1e-12);
}

/// Test score names.
#[test]
fn test_score_names() {
    assert_eq!(ScoreKind::default(), ScoreKind::PartiallingOut);
    assert_eq!(ScoreKind::PartiallingOut.to_string(), ScoreKind::PartiallingOut.name());
    assert_ne!(ScoreKind::PartiallingOut.name(), ScoreKind::IvType.name());
}

// ============================================================================
// Moment Solver Tests
// ============================================================================

/// Test θ̂ = Σṽũ / Σṽ² on hand-computed data.
///
/// Verifies:
/// - θ̂ = 14 / 10
/// - The score sums to zero at θ̂
#[test]
fn test_solve_partialling_out() {
    let zeros = [0.0; 4];
    let y = [1.0, -1.0, 3.0, -3.0];
    let d = [1.0, -1.0, 2.0, -2.0];
    let pair = ResidualPair::new(&y, &zeros, &d, &zeros);
    let score = LinearScore::build(&pair, ScoreInputs::PartiallingOut);

    let theta = solve_effect(&score, &d, 0).unwrap();
    assert_relative_eq!(theta, 1.4, epsilon = 1e-12);

    let total: f64 = score.evaluate(theta).iter().sum();
    assert_relative_eq!(total, 0.0, epsilon = 1e-12);
}

/// Test that a perfectly linear outcome recovers θ exactly.
#[test]
fn test_solve_exact_effect() {
    let d: Vec<f64> = (0..10).map(|i| (i as f64 * 0.7).sin()).collect();
    let y: Vec<f64> = d.iter().map(|&v| -2.5 * v).collect();
    let zeros = vec![0.0; 10];
    let pair = ResidualPair::new(&y, &zeros, &d, &zeros);
    let score = LinearScore::build(&pair, ScoreInputs::PartiallingOut);

    let theta = solve_effect(&score, &d, 0).unwrap();
    assert_relative_eq!(theta, -2.5, epsilon = 1e-12);
}

// ============================================================================
// Degeneracy Tests
// ============================================================================

/// Test that a treatment fully explained by its prediction is degenerate.
#[test]
fn test_zero_residual_variation() {
    let d = [1.0, 2.0, 3.0, 4.0];
    let y = [0.5, 0.1, 0.3, 0.2];
    let pair = ResidualPair::new(&y, &[0.0; 4], &d, &d);
    let score = LinearScore::build(&pair, ScoreInputs::PartiallingOut);

    let err = solve_effect(&score, &d, 2).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Degenerate);
    assert!(matches!(err, DmlError::Degenerate { repetition: 2, .. }));
}

/// Test that a constant treatment is degenerate.
#[test]
fn test_constant_treatment() {
    let d = [1.0; 5];
    let d_hat = [0.9; 5];
    let y = [0.5, 0.1, 0.3, 0.2, 0.0];
    let pair = ResidualPair::new(&y, &[0.0; 5], &d, &d_hat);
    let score = LinearScore::build(&pair, ScoreInputs::PartiallingOut);

    let err = solve_effect(&score, &d, 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Degenerate);
}

/// Test that tiny but genuine variation is still solvable.
#[test]
fn test_small_scale_not_degenerate() {
    let d = [1e-4, -1e-4, 2e-4, -2e-4];
    let y = [1e-4, -1e-4, 3e-4, -3e-4];
    let zeros = [0.0; 4];
    let pair = ResidualPair::new(&y, &zeros, &d, &zeros);
    let score = LinearScore::build(&pair, ScoreInputs::PartiallingOut);

    let theta = solve_effect(&score, &d, 0).unwrap();
    assert_relative_eq!(theta, 1.4, epsilon = 1e-9);
}
