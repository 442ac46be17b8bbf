//! Least squares nuisance learner.
//!
//! ## Purpose
//!
//! [`LinearRegression`] fits `E[target | X]` as an affine function of the
//! covariates. It is the reference learner for linear confounding and is
//! cheap enough to cross-fit many times.
//!
//! ## Design notes
//!
//! * **Centered**: covariates and targets are centered before solving, so
//!   the intercept is never penalized and the system is better conditioned.
//! * **Ridge**: an optional L2 penalty `alpha` is added to the diagonal.
//! * **Cholesky**: the normal equations are solved by Cholesky factorization.
//!
//! ## Invariants
//!
//! * With `alpha = 0` a rank-deficient design is reported, never regularized silently.
//! * With zero covariates the model reduces to the training mean.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};
#[cfg(feature = "std")]
use std::{vec, vec::Vec};

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::learner::{Learner, LearnerError, Predictor};
use crate::math::linalg::{cholesky_in_place, cholesky_solve};
use crate::primitives::matrix::Features;

// ============================================================================
// Learner Configuration
// ============================================================================

/// Ordinary (or ridge) least squares with intercept.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LinearRegression {
    alpha: f64,
}

impl LinearRegression {
    /// Unpenalized least squares.
    pub fn new() -> Self {
        Self { alpha: 0.0 }
    }

    /// Least squares with an L2 penalty of strength `alpha` on the slopes.
    pub fn ridge(alpha: f64) -> Self {
        Self { alpha }
    }

    /// Penalty strength.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

// ============================================================================
// Fitted Model
// ============================================================================

/// Fitted affine model `ŷ = intercept + xᵀβ`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel<T> {
    /// Intercept term.
    pub intercept: T,

    /// Slope per covariate.
    pub coefficients: Vec<T>,
}

impl<T: Float> LinearModel<T> {
    /// Predict a single row.
    #[inline]
    pub fn predict_row(&self, row: &[T]) -> T {
        row.iter()
            .zip(self.coefficients.iter())
            .fold(self.intercept, |acc, (&x, &b)| acc + x * b)
    }
}

impl<T: Float> Predictor<T> for LinearModel<T> {
    type Error = LearnerError;

    fn predict(&self, x: Features<'_, T>) -> Result<Vec<T>, LearnerError> {
        if x.n_features() != self.coefficients.len() {
            return Err(LearnerError::DimensionMismatch {
                expected: self.coefficients.len(),
                got: x.n_features(),
            });
        }
        Ok(x.rows().map(|row| self.predict_row(row)).collect())
    }
}

impl<T: Float> Learner<T> for LinearRegression {
    type Fitted = LinearModel<T>;
    type Error = LearnerError;

    fn fit(&self, x: Features<'_, T>, y: &[T]) -> Result<LinearModel<T>, LearnerError> {
        let n = x.n_rows();
        let p = x.n_features();

        if n == 0 {
            return Err(LearnerError::EmptyTrainingSet);
        }
        if y.len() != n {
            return Err(LearnerError::TargetMismatch {
                rows: n,
                targets: y.len(),
            });
        }
        if !(self.alpha >= 0.0) || !self.alpha.is_finite() {
            return Err(LearnerError::InvalidParameter("alpha"));
        }

        let n_t = T::from(n).unwrap_or(T::one());
        let y_mean = y.iter().fold(T::zero(), |acc, &v| acc + v) / n_t;

        if p == 0 {
            return Ok(LinearModel {
                intercept: y_mean,
                coefficients: Vec::new(),
            });
        }

        let mut x_mean = vec![T::zero(); p];
        for row in x.rows() {
            for (m, &v) in x_mean.iter_mut().zip(row) {
                *m = *m + v;
            }
        }
        for m in x_mean.iter_mut() {
            *m = *m / n_t;
        }

        // Accumulate the lower triangle of XcᵀXc and Xcᵀyc
        let mut gram = vec![T::zero(); p * p];
        let mut rhs = vec![T::zero(); p];
        let mut centered = vec![T::zero(); p];
        for (row, &yi) in x.rows().zip(y) {
            for j in 0..p {
                centered[j] = row[j] - x_mean[j];
            }
            let dy = yi - y_mean;
            for j in 0..p {
                let cj = centered[j];
                rhs[j] = rhs[j] + cj * dy;
                for k in 0..=j {
                    gram[j * p + k] = gram[j * p + k] + cj * centered[k];
                }
            }
        }

        let alpha = T::from(self.alpha).unwrap_or(T::zero());
        for j in 0..p {
            gram[j * p + j] = gram[j * p + j] + alpha;
        }

        let tol = T::epsilon() * T::from(1000.0).unwrap_or(T::one());
        if !cholesky_in_place(&mut gram, p, tol) {
            return Err(LearnerError::SingularDesign);
        }
        cholesky_solve(&gram, p, &mut rhs);

        let intercept = x_mean
            .iter()
            .zip(rhs.iter())
            .fold(y_mean, |acc, (&m, &b)| acc - m * b);

        Ok(LinearModel {
            intercept,
            coefficients: rhs,
        })
    }
}
