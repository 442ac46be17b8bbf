//! Nuisance learner capability.
//!
//! ## Purpose
//!
//! The estimator treats nuisance learners as opaque regression
//! capabilities: train on `(features, targets)`, then predict targets for
//! new features. Any model that can do that (linear, tree ensembles,
//! neural networks, bindings to external libraries) plugs in through the
//! [`Learner`] and [`Predictor`] traits.
//!
//! ## Design notes
//!
//! * **Config vs. model**: a `Learner` is an unfitted configuration and is
//!   reused for every fold. `fit` returns an independent fitted model.
//! * **Shared**: learners are `Sync` so that folds can be fitted concurrently.
//! * **Opaque errors**: learner errors only need `Display`; the estimator
//!   wraps them with the fold, repetition and nuisance target.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt::{Display, Formatter, Result};

// Internal dependencies
use crate::primitives::matrix::Features;

// ============================================================================
// Capability Traits
// ============================================================================

/// An unfitted regression learner.
pub trait Learner<T>: Sync {
    /// Model produced by [`Learner::fit`].
    type Fitted: Predictor<T>;

    /// Error reported when training fails.
    type Error: Display;

    /// Train a fresh model on `x` (row-major) and targets `y`.
    fn fit(&self, x: Features<'_, T>, y: &[T]) -> core::result::Result<Self::Fitted, Self::Error>;
}

/// A fitted regression model.
pub trait Predictor<T> {
    /// Error reported when prediction fails.
    type Error: Display;

    /// Predict one target per row of `x`.
    fn predict(&self, x: Features<'_, T>) -> core::result::Result<Vec<T>, Self::Error>;
}

impl<T, L: Learner<T> + ?Sized> Learner<T> for &L {
    type Fitted = L::Fitted;
    type Error = L::Error;

    fn fit(&self, x: Features<'_, T>, y: &[T]) -> core::result::Result<Self::Fitted, Self::Error> {
        (**self).fit(x, y)
    }
}

// ============================================================================
// Built-in Learner Errors
// ============================================================================

/// Errors reported by the built-in learners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LearnerError {
    /// No training rows were supplied.
    EmptyTrainingSet,

    /// The number of targets does not match the number of rows.
    TargetMismatch {
        /// Rows in the feature matrix.
        rows: usize,
        /// Length of the target vector.
        targets: usize,
    },

    /// Prediction features have a different width than the training features.
    DimensionMismatch {
        /// Width seen during training.
        expected: usize,
        /// Width seen during prediction.
        got: usize,
    },

    /// The normal equations are singular (collinear or constant covariates).
    SingularDesign,

    /// A learner hyperparameter is out of range.
    InvalidParameter(&'static str),
}

impl Display for LearnerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::EmptyTrainingSet => write!(f, "training set is empty"),
            Self::TargetMismatch { rows, targets } => {
                write!(f, "feature matrix has {rows} rows but {targets} targets were given")
            }
            Self::DimensionMismatch { expected, got } => {
                write!(f, "expected {expected} features, got {got}")
            }
            Self::SingularDesign => write!(f, "design matrix is singular"),
            Self::InvalidParameter(name) => write!(f, "invalid learner parameter '{name}'"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LearnerError {}
