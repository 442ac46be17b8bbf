//! Diagnostic metrics for nuisance learner quality.
//!
//! ## Purpose
//!
//! The DML estimate is only as good as its nuisance fits. This module
//! scores the out-of-fold predictions of each nuisance learner against the
//! observed targets.
//!
//! ## Invariants
//!
//! * RMSE and MAE are non-negative.
//! * R^2 <= 1; it is negative when the learner is worse than the mean.
//! * R^2 is 0 for a constant target.

// External dependencies
use core::fmt::{Display, Formatter, Result};
use num_traits::Float;

// Internal dependencies
use crate::primitives::roles::NuisanceTarget;

/// Out-of-fold fit quality of one nuisance learner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NuisanceDiagnostics<T> {
    /// Nuisance function that was estimated.
    pub target: NuisanceTarget,

    /// Root Mean Squared Error.
    pub rmse: T,

    /// Mean Absolute Error.
    pub mae: T,

    /// Coefficient of determination of the out-of-fold predictions.
    pub r_squared: T,
}

impl<T: Float> NuisanceDiagnostics<T> {
    /// Score out-of-fold `predicted` values against `actual` targets.
    pub fn compute(target: NuisanceTarget, actual: &[T], predicted: &[T]) -> Self {
        let n = actual.len();
        if n == 0 {
            return Self {
                target,
                rmse: T::zero(),
                mae: T::zero(),
                r_squared: T::zero(),
            };
        }
        let n_t = T::from(n).unwrap_or(T::one());

        let mean = actual.iter().fold(T::zero(), |acc, &v| acc + v) / n_t;
        let mut ss_res = T::zero();
        let mut ss_tot = T::zero();
        let mut sum_abs = T::zero();
        for (&a, &p) in actual.iter().zip(predicted) {
            let r = a - p;
            ss_res = ss_res + r * r;
            sum_abs = sum_abs + r.abs();
            let dev = a - mean;
            ss_tot = ss_tot + dev * dev;
        }

        let r_squared = if ss_tot > T::zero() {
            T::one() - ss_res / ss_tot
        } else {
            T::zero()
        };

        Self {
            target,
            rmse: (ss_res / n_t).sqrt(),
            mae: sum_abs / n_t,
            r_squared,
        }
    }
}

impl<T: Float + Display> Display for NuisanceDiagnostics<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "{:<5} RMSE: {:.6}  MAE: {:.6}  R^2: {:.6}",
            self.target.learner_name(),
            self.rmse,
            self.mae,
            self.r_squared
        )
    }
}
