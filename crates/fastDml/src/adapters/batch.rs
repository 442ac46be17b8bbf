//! Batch adapter with parallel cross-fitting.
//!
//! ## Purpose
//!
//! This module wraps the core batch estimator and runs its nuisance passes
//! on the rayon thread pool. Configuration, validation, scoring and
//! inference are delegated to the core crate unchanged.
//!
//! ## Design notes
//!
//! * **Delegation**: wraps `BatchDmlBuilder` and `BatchDml`.
//! * **Parallel by default**: `.parallel(false)` falls back to the
//!   sequential pass.
//! * **ndarray inputs**: `fit_arrays` accepts arrays without a header.
//!
//! ## Invariants
//!
//! * Parallel and sequential execution give bit-identical estimates for
//!   deterministic learners.

// External dependencies
use num_traits::Float;

// Export dependencies from dml crate
use dml::internals::adapters::batch::{BatchDml, BatchDmlBuilder};
use dml::internals::adapters::dataset::{Dataset, Table};
use dml::internals::algorithms::folds::FoldAssignment;
use dml::internals::algorithms::learner::Learner;
use dml::internals::algorithms::score::ScoreKind;
use dml::internals::engine::executor::SequentialPass;
use dml::internals::engine::output::EffectEstimate;
use dml::internals::evaluation::aggregation::Aggregation;
use dml::internals::primitives::errors::DmlError;
use dml::internals::primitives::roles::ColumnRoles;

// Internal dependencies
#[cfg(feature = "cpu")]
use crate::engine::executor::ParallelPass;
use crate::input::{DmlInput, DmlMatrix};

// ============================================================================
// Extended Batch DML Builder
// ============================================================================

/// Builder for the batch DML estimator with parallel support.
#[derive(Debug, Clone)]
pub struct ParallelBatchDmlBuilder<T: Float> {
    /// Base builder from the dml crate
    pub base: BatchDmlBuilder<T>,
}

impl<T: Float> Default for ParallelBatchDmlBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> ParallelBatchDmlBuilder<T> {
    /// Create a new builder with default parameters.
    ///
    /// # Defaults
    ///
    /// * All base parameters from dml BatchDmlBuilder
    /// * parallel: true (fastDml extension)
    fn new() -> Self {
        let base = BatchDmlBuilder::default().parallel(true);
        Self { base }
    }

    /// Set parallel execution mode.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.base = self.base.parallel(parallel);
        self
    }

    // ========================================================================
    // Shared Setters
    // ========================================================================

    /// Set the number of folds.
    pub fn n_folds(mut self, n_folds: usize) -> Self {
        self.base = self.base.n_folds(n_folds);
        self
    }

    /// Set the number of cross-fitting repetitions.
    pub fn n_rep(mut self, n_rep: usize) -> Self {
        self.base = self.base.n_rep(n_rep);
        self
    }

    /// Set the base seed of the fold partitioner.
    pub fn seed(mut self, seed: u64) -> Self {
        self.base = self.base.seed(seed);
        self
    }

    /// Set the confidence level of the reported interval.
    pub fn confidence_level(mut self, level: T) -> Self {
        self.base = self.base.confidence_level(level);
        self
    }

    /// Set the orthogonal score.
    pub fn score(mut self, score: ScoreKind) -> Self {
        self.base = self.base.score(score);
        self
    }

    /// Set the aggregation across repetitions.
    pub fn aggregation(mut self, aggregation: Aggregation) -> Self {
        self.base = self.base.aggregation(aggregation);
        self
    }

    /// Use caller-supplied fold assignments, one per repetition.
    pub fn sample_splitting(mut self, assignments: Vec<FoldAssignment>) -> Self {
        self.base = self.base.sample_splitting(assignments);
        self
    }

    /// Enable returning nuisance predictions.
    pub fn return_predictions(mut self, enabled: bool) -> Self {
        self.base = self.base.return_predictions(enabled);
        self
    }

    /// Enable returning score values.
    pub fn return_scores(mut self, enabled: bool) -> Self {
        self.base = self.base.return_scores(enabled);
        self
    }

    /// Enable returning nuisance diagnostics.
    pub fn return_diagnostics(mut self, enabled: bool) -> Self {
        self.base = self.base.return_diagnostics(enabled);
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Build the parallel batch estimator.
    pub fn build(self) -> Result<ParallelBatchDml<T>, DmlError> {
        let parallel = self.base.parallel.unwrap_or(true);
        let base = self.base.build()?;
        Ok(ParallelBatchDml { base, parallel })
    }
}

// ============================================================================
// Extended Batch DML Estimator
// ============================================================================

/// Batch DML estimator with parallel cross-fitting.
#[derive(Debug, Clone)]
pub struct ParallelBatchDml<T: Float> {
    base: BatchDml<T>,
    parallel: bool,
}

impl<T: Float + Send + Sync> ParallelBatchDml<T> {
    /// Whether nuisance passes run in parallel.
    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Estimate θ with `ml_l` for `E[Y | X]` and `ml_m` for `E[D | X]`.
    pub fn fit<L, M>(&self, data: &Dataset<T>, ml_l: &L, ml_m: &M) -> Result<EffectEstimate<T>, DmlError>
    where
        L: Learner<T> + ?Sized,
        M: Learner<T> + ?Sized,
    {
        self.fit_with_g(data, ml_l, ml_m, ml_l)
    }

    /// Estimate θ with a dedicated learner `ml_g` for `E[Y − θD | X]`.
    pub fn fit_with_g<L, M, G>(
        &self,
        data: &Dataset<T>,
        ml_l: &L,
        ml_m: &M,
        ml_g: &G,
    ) -> Result<EffectEstimate<T>, DmlError>
    where
        L: Learner<T> + ?Sized,
        M: Learner<T> + ?Sized,
        G: Learner<T> + ?Sized,
    {
        #[cfg(feature = "cpu")]
        if self.parallel {
            return self
                .base
                .fit_with_pass(data, ml_l, ml_m, ml_g, &ParallelPass);
        }

        self.base
            .fit_with_pass(data, ml_l, ml_m, ml_g, &SequentialPass)
    }

    /// Validate `table` against `roles` and estimate θ.
    pub fn fit_table<Tb, L, M>(
        &self,
        table: &Tb,
        roles: &ColumnRoles,
        ml_l: &L,
        ml_m: &M,
    ) -> Result<EffectEstimate<T>, DmlError>
    where
        Tb: Table<T> + ?Sized,
        L: Learner<T> + ?Sized,
        M: Learner<T> + ?Sized,
    {
        let data = Dataset::from_table(table, roles)?;
        self.fit(&data, ml_l, ml_m)
    }

    /// Estimate θ from a covariate matrix and outcome/treatment vectors.
    ///
    /// Columns are named `y`, `d` and `X1..Xp`.
    pub fn fit_arrays<X, Y, D, L, M>(
        &self,
        x: &X,
        y: &Y,
        d: &D,
        ml_l: &L,
        ml_m: &M,
    ) -> Result<EffectEstimate<T>, DmlError>
    where
        X: DmlMatrix<T> + ?Sized,
        Y: DmlInput<T> + ?Sized,
        D: DmlInput<T> + ?Sized,
        L: Learner<T> + ?Sized,
        M: Learner<T> + ?Sized,
    {
        let (n_rows, n_features) = x.dml_shape();
        let y = y.as_dml_values();
        let d = d.as_dml_values();
        if y.len() != n_rows {
            return Err(DmlError::RaggedTable {
                column: "y".to_string(),
                expected: n_rows,
                got: y.len(),
            });
        }
        let data = Dataset::from_arrays(&y, &d, &x.as_row_major(), n_features)?;
        self.fit(&data, ml_l, ml_m)
    }
}
