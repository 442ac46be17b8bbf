//! Out-of-fold nuisance prediction.
//!
//! ## Purpose
//!
//! This module implements one nuisance pass of cross-fitting: for every
//! fold `k`, train the learner on the fold complement and predict the
//! held-out rows of fold `k`. The result holds exactly one prediction per
//! observation, produced by a model that never saw that observation.
//!
//! ## Design notes
//!
//! * **Per-fold unit**: [`fit_fold`] is the unit of work shared by the
//!   sequential pass here and by parallel executors.
//! * **Disjoint writes**: fold predictions are scattered into the output at
//!   the fold's held-out indices only.
//! * **Checked output**: a prediction vector of the wrong length or with a
//!   non-finite entry is reported as a learner failure.
//!
//! ## Invariants
//!
//! * Training rows of fold `k` are exactly the rows whose label is not `k`.
//! * The first failing fold aborts the pass.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{
    format,
    string::{String, ToString},
    vec,
    vec::Vec,
};
#[cfg(feature = "std")]
use std::{
    format,
    string::{String, ToString},
    vec,
    vec::Vec,
};

// External dependencies
use num_traits::Float;
use tracing::debug;

// Internal dependencies
use crate::algorithms::folds::FoldAssignment;
use crate::algorithms::learner::{Learner, Predictor};
use crate::primitives::buffer::FoldBuffer;
use crate::primitives::errors::{DmlError, FitStage};
use crate::primitives::matrix::{gather, gather_rows, Features};
use crate::primitives::roles::NuisanceTarget;

// ============================================================================
// Nuisance Pass
// ============================================================================

/// Out-of-fold predictions of `target` from covariates `x`.
pub fn cross_fit_predict<T, L>(
    x: Features<'_, T>,
    target: &[T],
    folds: &FoldAssignment,
    learner: &L,
    nuisance: NuisanceTarget,
    repetition: usize,
) -> Result<Vec<T>, DmlError>
where
    T: Float,
    L: Learner<T> + ?Sized,
{
    let n = target.len();
    let mut out = vec![T::zero(); n];
    let mut buffer = FoldBuffer::new();
    buffer.ensure_capacity(n, x.n_features());

    for fold in 0..folds.n_folds() {
        let preds = fit_fold(x, target, folds, fold, learner, nuisance, repetition, &mut buffer)?;
        scatter(folds.test_indices(fold), &preds, &mut out);
    }

    Ok(out)
}

/// Train on the complement of `fold` and predict its held-out rows.
///
/// Predictions are returned in the order of `folds.test_indices(fold)`.
#[allow(clippy::too_many_arguments)]
pub fn fit_fold<T, L>(
    x: Features<'_, T>,
    target: &[T],
    folds: &FoldAssignment,
    fold: usize,
    learner: &L,
    nuisance: NuisanceTarget,
    repetition: usize,
    buffer: &mut FoldBuffer<T>,
) -> Result<Vec<T>, DmlError>
where
    T: Float,
    L: Learner<T> + ?Sized,
{
    let dims = x.n_features();
    let test_idx = folds.test_indices(fold);

    folds.train_indices_into(fold, &mut buffer.train_idx);
    gather_rows(&x, &buffer.train_idx, &mut buffer.train_x);
    gather(target, &buffer.train_idx, &mut buffer.train_y);
    gather_rows(&x, test_idx, &mut buffer.test_x);

    let n_train = buffer.train_idx.len();
    let n_test = test_idx.len();

    debug!(
        nuisance = nuisance.learner_name(),
        fold,
        repetition,
        n_train,
        n_test,
        "fitting nuisance learner"
    );

    let failure = |stage: FitStage, message: String| DmlError::LearnerFailed {
        target: nuisance,
        fold,
        repetition,
        stage,
        message,
    };

    let model = learner
        .fit(Features::new(&buffer.train_x, n_train, dims), &buffer.train_y)
        .map_err(|e| failure(FitStage::Fit, e.to_string()))?;

    let preds = model
        .predict(Features::new(&buffer.test_x, n_test, dims))
        .map_err(|e| failure(FitStage::Predict, e.to_string()))?;

    if preds.len() != n_test {
        return Err(failure(
            FitStage::Predict,
            format!("returned {} predictions for {n_test} rows", preds.len()),
        ));
    }
    if let Some(pos) = preds.iter().position(|p| !p.is_finite()) {
        return Err(failure(
            FitStage::Predict,
            format!("returned a non-finite prediction for observation {}", test_idx[pos]),
        ));
    }

    Ok(preds)
}

/// Write `values[j]` to `out[indices[j]]`.
#[inline]
pub fn scatter<T: Copy>(indices: &[usize], values: &[T], out: &mut [T]) {
    for (&i, &v) in indices.iter().zip(values) {
        out[i] = v;
    }
}
