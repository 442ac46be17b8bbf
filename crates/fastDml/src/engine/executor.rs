//! Parallel cross-fitting passes.
//!
//! ## Purpose
//!
//! This module implements the core crate's `CrossFitPass` with `rayon`:
//! the folds of a nuisance pass are fitted concurrently, and the outcome
//! and treatment passes of a repetition run side by side.
//!
//! ## Design notes
//!
//! * **Per-fold buffers**: each worker owns a `FoldBuffer`; fold predictions
//!   are collected per fold and merged by held-out index afterwards.
//! * **Deterministic**: the merge order does not depend on scheduling, so
//!   results are bit-identical to the sequential pass.
//!
//! ## Invariants
//!
//! * No two folds write to the same output index.
//!
//! ## Non-goals
//!
//! * This module does not parallelize inside a learner.
//! * When several folds fail, which of their errors is reported is unspecified.

// Feature-gated imports
#[cfg(feature = "cpu")]
use rayon::prelude::*;

// External dependencies
use num_traits::Float;
use tracing::debug;

// Export dependencies from dml crate
use dml::internals::algorithms::crossfit::{fit_fold, scatter};
use dml::internals::algorithms::folds::FoldAssignment;
use dml::internals::algorithms::learner::Learner;
use dml::internals::engine::executor::CrossFitPass;
use dml::internals::primitives::buffer::FoldBuffer;
use dml::internals::primitives::errors::DmlError;
use dml::internals::primitives::matrix::Features;
use dml::internals::primitives::roles::NuisanceTarget;

// ============================================================================
// Parallel Pass
// ============================================================================

/// Fits the folds of every nuisance pass on the rayon thread pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParallelPass;

#[cfg(feature = "cpu")]
impl<T> CrossFitPass<T> for ParallelPass
where
    T: Float + Send + Sync,
{
    fn nuisance_pass<L>(
        &self,
        x: Features<'_, T>,
        target: &[T],
        folds: &FoldAssignment,
        learner: &L,
        nuisance: NuisanceTarget,
        repetition: usize,
    ) -> Result<Vec<T>, DmlError>
    where
        L: Learner<T> + ?Sized,
    {
        let n = target.len();
        let dims = x.n_features();

        debug!(
            nuisance = nuisance.learner_name(),
            repetition,
            n_folds = folds.n_folds(),
            threads = rayon::current_num_threads(),
            "parallel nuisance pass"
        );

        let fold_preds: Vec<Vec<T>> = (0..folds.n_folds())
            .into_par_iter()
            .map_init(
                || {
                    let mut buffer = FoldBuffer::new();
                    buffer.ensure_capacity(n, dims);
                    buffer
                },
                |buffer, fold| {
                    fit_fold(x, target, folds, fold, learner, nuisance, repetition, buffer)
                },
            )
            .collect::<Result<Vec<_>, _>>()?;

        let mut out = vec![T::zero(); n];
        for (fold, preds) in fold_preds.iter().enumerate() {
            scatter(folds.test_indices(fold), preds, &mut out);
        }
        Ok(out)
    }

    #[allow(clippy::too_many_arguments)]
    fn nuisance_pair<L, M>(
        &self,
        x: Features<'_, T>,
        y: &[T],
        d: &[T],
        folds: &FoldAssignment,
        ml_l: &L,
        ml_m: &M,
        repetition: usize,
    ) -> Result<(Vec<T>, Vec<T>), DmlError>
    where
        L: Learner<T> + ?Sized,
        M: Learner<T> + ?Sized,
    {
        let (l_hat, m_hat) = rayon::join(
            || self.nuisance_pass(x, y, folds, ml_l, NuisanceTarget::Outcome, repetition),
            || self.nuisance_pass(x, d, folds, ml_m, NuisanceTarget::Treatment, repetition),
        );
        Ok((l_hat?, m_hat?))
    }
}
