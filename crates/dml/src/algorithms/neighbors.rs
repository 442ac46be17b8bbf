//! Kernel-weighted nearest-neighbour learner.
//!
//! ## Purpose
//!
//! [`KernelRegressor`] is a nonparametric nuisance learner: the prediction
//! at a query point is a kernel-weighted average of the targets of its `k`
//! nearest training rows. It captures nonlinear confounding that a linear
//! learner misses.
//!
//! ## Design notes
//!
//! * **Adaptive bandwidth**: the bandwidth is the distance to the `k`-th
//!   nearest neighbour, slightly inflated so that the farthest neighbour
//!   keeps a positive weight under bounded kernels.
//! * **Selection**: neighbours are found with Quickselect, not a full sort.
//! * **Fallback**: if every neighbour receives zero weight the plain
//!   neighbour mean is used.
//!
//! ## Invariants
//!
//! * `k` is clamped to the number of training rows.
//! * Distances are Euclidean on the raw covariate scale.
//!
//! ## Non-goals
//!
//! * This module does not standardize covariates.
//! * This module does not build spatial indices; queries are `O(n)`.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::cmp::Ordering::Equal;
use core::fmt::{Display, Formatter, Result as FmtResult};
use num_traits::Float;

// Internal dependencies
use crate::algorithms::learner::{Learner, LearnerError, Predictor};
use crate::math::kernel::WeightFunction;
use crate::primitives::matrix::Features;

/// Relative inflation of the k-th neighbour distance.
const BANDWIDTH_INFLATION: f64 = 1.01;

// ============================================================================
// Learner Configuration
// ============================================================================

/// k-nearest-neighbour kernel regression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelRegressor {
    n_neighbors: usize,
    weight_function: WeightFunction,
}

impl Default for KernelRegressor {
    fn default() -> Self {
        Self::new(10)
    }
}

impl KernelRegressor {
    /// Average over the `n_neighbors` nearest rows with the Tricube kernel.
    pub fn new(n_neighbors: usize) -> Self {
        Self {
            n_neighbors,
            weight_function: WeightFunction::default(),
        }
    }

    /// Set the kernel used to weight neighbours.
    pub fn weight_function(mut self, weight_function: WeightFunction) -> Self {
        self.weight_function = weight_function;
        self
    }

    /// Number of neighbours.
    pub fn n_neighbors(&self) -> usize {
        self.n_neighbors
    }
}

impl Display for KernelRegressor {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "KernelRegressor(n_neighbors={}, kernel={})",
            self.n_neighbors,
            self.weight_function.name()
        )
    }
}

// ============================================================================
// Fitted Model
// ============================================================================

/// Memorized training set of a [`KernelRegressor`].
#[derive(Debug, Clone)]
pub struct KernelModel<T> {
    train_x: Vec<T>,
    train_y: Vec<T>,
    n_features: usize,
    n_neighbors: usize,
    weight_function: WeightFunction,
}

impl<T: Float> KernelModel<T> {
    fn predict_row(&self, query: &[T], scratch: &mut Vec<(T, usize)>) -> T {
        let n = self.train_y.len();
        let p = self.n_features;

        scratch.clear();
        for i in 0..n {
            let row = &self.train_x[i * p..(i + 1) * p];
            let dist_sq = row
                .iter()
                .zip(query)
                .fold(T::zero(), |acc, (&a, &b)| acc + (a - b) * (a - b));
            scratch.push((dist_sq, i));
        }

        let k = self.n_neighbors;
        if k < n {
            scratch.select_nth_unstable_by(k - 1, |a, b| a.0.partial_cmp(&b.0).unwrap_or(Equal));
        }
        let neighbors = &scratch[..k];

        let max_dist = neighbors
            .iter()
            .fold(T::zero(), |acc, &(d, _)| acc.max(d))
            .sqrt();
        let inflation = T::from(BANDWIDTH_INFLATION).unwrap_or(T::one());
        let bandwidth = max_dist * inflation;

        let mut sum_w = T::zero();
        let mut sum_wy = T::zero();
        if bandwidth > T::zero() {
            for &(d, i) in neighbors {
                let w = self.weight_function.compute_weight(d.sqrt() / bandwidth);
                sum_w = sum_w + w;
                sum_wy = sum_wy + w * self.train_y[i];
            }
        }

        if sum_w > T::zero() {
            sum_wy / sum_w
        } else {
            // Zero bandwidth or zero weights: plain neighbour mean
            let total = neighbors
                .iter()
                .fold(T::zero(), |acc, &(_, i)| acc + self.train_y[i]);
            total / T::from(k).unwrap_or(T::one())
        }
    }
}

impl<T: Float> Predictor<T> for KernelModel<T> {
    type Error = LearnerError;

    fn predict(&self, x: Features<'_, T>) -> Result<Vec<T>, LearnerError> {
        if x.n_features() != self.n_features {
            return Err(LearnerError::DimensionMismatch {
                expected: self.n_features,
                got: x.n_features(),
            });
        }
        let mut scratch = Vec::with_capacity(self.train_y.len());
        Ok(x.rows()
            .map(|row| self.predict_row(row, &mut scratch))
            .collect())
    }
}

impl<T: Float> Learner<T> for KernelRegressor {
    type Fitted = KernelModel<T>;
    type Error = LearnerError;

    fn fit(&self, x: Features<'_, T>, y: &[T]) -> Result<KernelModel<T>, LearnerError> {
        if self.n_neighbors == 0 {
            return Err(LearnerError::InvalidParameter("n_neighbors"));
        }
        if x.n_rows() == 0 {
            return Err(LearnerError::EmptyTrainingSet);
        }
        if y.len() != x.n_rows() {
            return Err(LearnerError::TargetMismatch {
                rows: x.n_rows(),
                targets: y.len(),
            });
        }

        Ok(KernelModel {
            train_x: x.values().to_vec(),
            train_y: y.to_vec(),
            n_features: x.n_features(),
            n_neighbors: self.n_neighbors.min(y.len()),
            weight_function: self.weight_function,
        })
    }
}
