//! Orthogonalized residuals and linear scores.
//!
//! ## Purpose
//!
//! This module turns nuisance predictions into the per-observation score
//! `ψ(θ) = ψ_a·θ + ψ_b` whose sample mean is set to zero to estimate θ.
//!
//! ## Key concepts
//!
//! * **Partialling out**: `ψ_a = −ṽ²`, `ψ_b = ṽ·ũ` with outcome residual
//!   `ũ = y − l̂(X)` and treatment residual `ṽ = d − m̂(X)`.
//! * **IV-type**: `ψ_a = −ṽ·d`, `ψ_b = ṽ·(y − ĝ(X))` where `ĝ` estimates
//!   `E[Y − θD | X]`.
//!
//! Both scores are Neyman orthogonal: first-order errors in the nuisance
//! estimates do not bias θ.
//!
//! ## Invariants
//!
//! * All vectors share the observation order of the dataset.
//! * Construction is pure and deterministic.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt::{Display, Formatter, Result};
use num_traits::Float;

// ============================================================================
// Score Kind
// ============================================================================

/// Neyman-orthogonal score used for the PLR model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoreKind {
    /// Regress the outcome residual on the treatment residual.
    #[default]
    PartiallingOut,

    /// Instrument the treatment with its residual after fitting `E[Y − θD | X]`.
    IvType,
}

impl ScoreKind {
    /// Name as used in DML literature.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PartiallingOut => "partialling out",
            Self::IvType => "IV-type",
        }
    }
}

impl Display for ScoreKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Residual Pair
// ============================================================================

/// Outcome and treatment residuals of every observation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResidualPair<T> {
    /// `ũ_i = y_i − ŷ_i`.
    pub outcome: Vec<T>,

    /// `ṽ_i = d_i − d̂_i`.
    pub treatment: Vec<T>,
}

impl<T: Float> ResidualPair<T> {
    /// Residuals of `y` against `y_hat` and of `d` against `d_hat`.
    pub fn new(y: &[T], y_hat: &[T], d: &[T], d_hat: &[T]) -> Self {
        Self {
            outcome: residuals(y, y_hat),
            treatment: residuals(d, d_hat),
        }
    }

    /// Number of observations.
    #[inline]
    pub fn len(&self) -> usize {
        self.treatment.len()
    }

    /// Returns `true` if there are no observations.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.treatment.is_empty()
    }
}

/// Element-wise `actual − predicted`.
pub fn residuals<T: Float>(actual: &[T], predicted: &[T]) -> Vec<T> {
    actual
        .iter()
        .zip(predicted)
        .map(|(&a, &p)| a - p)
        .collect()
}

// ============================================================================
// Linear Score
// ============================================================================

/// Extra inputs required by a score.
#[derive(Debug, Clone, Copy)]
pub enum ScoreInputs<'a, T> {
    /// The partialling-out score only needs the residual pair.
    PartiallingOut,

    /// The IV-type score also needs the raw treatment and `y − ĝ(X)`.
    IvType {
        /// Raw treatment values.
        treatment: &'a [T],
        /// Outcome minus the out-of-fold prediction of `E[Y − θD | X]`.
        adjusted_residual: &'a [T],
    },
}

/// Score `ψ_i(θ) = ψ_a,i·θ + ψ_b,i`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearScore<T> {
    kind: ScoreKind,
    psi_a: Vec<T>,
    psi_b: Vec<T>,
}

impl<T: Float> LinearScore<T> {
    /// Build the score components from the residuals.
    pub fn build(residuals: &ResidualPair<T>, inputs: ScoreInputs<'_, T>) -> Self {
        let v = &residuals.treatment;
        match inputs {
            ScoreInputs::PartiallingOut => Self {
                kind: ScoreKind::PartiallingOut,
                psi_a: v.iter().map(|&vi| -(vi * vi)).collect(),
                psi_b: v
                    .iter()
                    .zip(&residuals.outcome)
                    .map(|(&vi, &ui)| vi * ui)
                    .collect(),
            },
            ScoreInputs::IvType {
                treatment,
                adjusted_residual,
            } => Self {
                kind: ScoreKind::IvType,
                psi_a: v
                    .iter()
                    .zip(treatment)
                    .map(|(&vi, &di)| -(vi * di))
                    .collect(),
                psi_b: v
                    .iter()
                    .zip(adjusted_residual)
                    .map(|(&vi, &ri)| vi * ri)
                    .collect(),
            },
        }
    }

    /// Score variant.
    #[inline]
    pub fn kind(&self) -> ScoreKind {
        self.kind
    }

    /// Derivative of the score with respect to θ.
    #[inline]
    pub fn psi_a(&self) -> &[T] {
        &self.psi_a
    }

    /// Score at θ = 0.
    #[inline]
    pub fn psi_b(&self) -> &[T] {
        &self.psi_b
    }

    /// Number of observations.
    #[inline]
    pub fn len(&self) -> usize {
        self.psi_a.len()
    }

    /// Returns `true` if there are no observations.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.psi_a.is_empty()
    }

    /// Score values at `theta`.
    pub fn evaluate(&self, theta: T) -> Vec<T> {
        self.psi_a
            .iter()
            .zip(&self.psi_b)
            .map(|(&a, &b)| a * theta + b)
            .collect()
    }
}
