//! Batch adapter for in-memory DML estimation.
//!
//! ## Purpose
//!
//! This module provides the batch execution adapter: it holds a validated
//! configuration and estimates the treatment effect for a complete
//! in-memory dataset.
//!
//! ## Design notes
//!
//! * **Validation**: data-independent parameters are validated in `build()`,
//!   data-dependent ones at the start of `fit()`, before any learner runs.
//! * **Delegation**: computation is delegated to the execution engine.
//! * **Pluggable passes**: `fit_with_pass` lets extension crates swap the
//!   nuisance pass strategy while reusing everything else.
//!
//! ## Key concepts
//!
//! * **Learner reuse**: `fit` uses the outcome learner for `ml_g` as well;
//!   `fit_with_g` takes a dedicated learner.
//!
//! ## Invariants
//!
//! * A fitted model is reusable: `fit` borrows the configuration.
//!
//! ## Non-goals
//!
//! * This adapter does not handle out-of-core data.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{string::ToString, vec::Vec};
#[cfg(feature = "std")]
use std::{string::ToString, vec::Vec};

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::adapters::dataset::{Dataset, Table};
use crate::algorithms::folds::FoldAssignment;
use crate::algorithms::learner::Learner;
use crate::algorithms::score::ScoreKind;
use crate::engine::executor::{CrossFitPass, DmlConfig, DmlExecutor, SequentialPass};
use crate::engine::output::EffectEstimate;
use crate::engine::validator::Validator;
use crate::evaluation::aggregation::Aggregation;
use crate::evaluation::inference::Inference;
use crate::primitives::errors::DmlError;
use crate::primitives::roles::ColumnRoles;

// ============================================================================
// Batch DML Builder
// ============================================================================

/// Builder for the batch DML estimator.
#[derive(Debug, Clone)]
pub struct BatchDmlBuilder<T: Float> {
    /// Number of folds `K`.
    pub n_folds: usize,

    /// Number of cross-fitting repetitions.
    pub n_rep: usize,

    /// Base seed of the fold partitioner.
    pub seed: u64,

    /// Confidence level of the reported interval.
    pub confidence_level: T,

    /// Orthogonal score.
    pub score: ScoreKind,

    /// Aggregation across repetitions.
    pub aggregation: Aggregation,

    /// Caller-supplied fold assignments.
    pub sample_splitting: Option<Vec<FoldAssignment>>,

    /// Include nuisance predictions in the result.
    pub return_predictions: bool,

    /// Include score values in the result.
    pub return_scores: bool,

    /// Include nuisance diagnostics in the result.
    pub return_diagnostics: bool,

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++
    /// Parallel execution hint, read by extension crates.
    #[doc(hidden)]
    pub parallel: Option<bool>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub(crate) duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for BatchDmlBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> BatchDmlBuilder<T> {
    /// Create a new batch builder with default parameters.
    fn new() -> Self {
        Self {
            n_folds: 5,
            n_rep: 1,
            seed: 42,
            confidence_level: T::from(0.95).unwrap_or_else(T::one),
            score: ScoreKind::default(),
            aggregation: Aggregation::default(),
            sample_splitting: None,
            return_predictions: false,
            return_scores: false,
            return_diagnostics: false,
            parallel: None,
            duplicate_param: None,
        }
    }

    // ========================================================================
    // Setters
    // ========================================================================

    /// Set the number of folds.
    pub fn n_folds(mut self, n_folds: usize) -> Self {
        self.n_folds = n_folds;
        self
    }

    /// Set the number of cross-fitting repetitions.
    pub fn n_rep(mut self, n_rep: usize) -> Self {
        self.n_rep = n_rep;
        self
    }

    /// Set the base seed of the fold partitioner.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the confidence level of the reported interval.
    pub fn confidence_level(mut self, level: T) -> Self {
        self.confidence_level = level;
        self
    }

    /// Set the orthogonal score.
    pub fn score(mut self, score: ScoreKind) -> Self {
        self.score = score;
        self
    }

    /// Set the aggregation across repetitions.
    pub fn aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = aggregation;
        self
    }

    /// Use caller-supplied fold assignments, one per repetition.
    pub fn sample_splitting(mut self, assignments: Vec<FoldAssignment>) -> Self {
        self.sample_splitting = Some(assignments);
        self
    }

    /// Enable returning nuisance predictions.
    pub fn return_predictions(mut self, enabled: bool) -> Self {
        self.return_predictions = enabled;
        self
    }

    /// Enable returning score values.
    pub fn return_scores(mut self, enabled: bool) -> Self {
        self.return_scores = enabled;
        self
    }

    /// Enable returning nuisance diagnostics.
    pub fn return_diagnostics(mut self, enabled: bool) -> Self {
        self.return_diagnostics = enabled;
        self
    }

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++

    /// Set parallel execution hint.
    #[doc(hidden)]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Build the batch estimator.
    pub fn build(self) -> Result<BatchDml<T>, DmlError> {
        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        Validator::validate_folds(self.n_folds)?;
        Validator::validate_repetitions(self.n_rep)?;
        Validator::validate_confidence_level(self.confidence_level)?;

        if let Some(ref assignments) = self.sample_splitting {
            Validator::validate_sample_splitting(assignments, self.n_folds, self.n_rep)?;
        }

        Ok(BatchDml {
            config: DmlConfig {
                n_folds: self.n_folds,
                n_rep: self.n_rep,
                seed: self.seed,
                confidence_level: self.confidence_level,
                score: self.score,
                aggregation: self.aggregation,
                sample_splitting: self.sample_splitting,
                return_diagnostics: self.return_diagnostics,
            },
            return_predictions: self.return_predictions,
            return_scores: self.return_scores,
        })
    }
}

// ============================================================================
// Batch DML Estimator
// ============================================================================

/// Batch DML estimator for the partially linear model.
#[derive(Debug, Clone)]
pub struct BatchDml<T: Float> {
    config: DmlConfig<T>,
    return_predictions: bool,
    return_scores: bool,
}

impl<T: Float> BatchDml<T> {
    /// Validated configuration.
    pub fn config(&self) -> &DmlConfig<T> {
        &self.config
    }

    /// Estimate θ with `ml_l` for `E[Y | X]` and `ml_m` for `E[D | X]`.
    ///
    /// For the IV-type score `ml_l` is also used for `E[Y − θD | X]`.
    pub fn fit<L, M>(&self, data: &Dataset<T>, ml_l: &L, ml_m: &M) -> Result<EffectEstimate<T>, DmlError>
    where
        L: Learner<T> + ?Sized,
        M: Learner<T> + ?Sized,
    {
        self.fit_with_pass(data, ml_l, ml_m, ml_l, &SequentialPass)
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
        self.fit_with_pass(data, ml_l, ml_m, ml_g, &SequentialPass)
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

    /// Estimate θ using `pass` for every nuisance pass.
    #[doc(hidden)]
    pub fn fit_with_pass<L, M, G, P>(
        &self,
        data: &Dataset<T>,
        ml_l: &L,
        ml_m: &M,
        ml_g: &G,
        pass: &P,
    ) -> Result<EffectEstimate<T>, DmlError>
    where
        L: Learner<T> + ?Sized,
        M: Learner<T> + ?Sized,
        G: Learner<T> + ?Sized,
        P: CrossFitPass<T>,
    {
        let n_obs = data.n_obs();
        match &self.config.sample_splitting {
            Some(assignments) => Validator::validate_assignments_for_data(assignments, n_obs)?,
            None => Validator::validate_folds_for_data(self.config.n_folds, n_obs)?,
        }

        let output = DmlExecutor::new(&self.config, pass).run(
            data.features(),
            data.outcome(),
            data.treatment(),
            ml_l,
            ml_m,
            ml_g,
        )?;

        let inference = Inference::from_estimate(
            output.coefficient,
            output.std_error,
            self.config.confidence_level,
        );

        let coefficients = output
            .repetitions
            .iter()
            .map(|r| r.inference.coefficient)
            .collect();
        let std_errors = output
            .repetitions
            .iter()
            .map(|r| r.inference.std_error)
            .collect();

        let scores = if self.return_scores {
            Some(
                output
                    .repetitions
                    .iter()
                    .map(|r| r.score.evaluate(r.inference.coefficient))
                    .collect(),
            )
        } else {
            None
        };

        let diagnostics = if self.config.return_diagnostics {
            Some(
                output
                    .repetitions
                    .iter()
                    .map(|r| r.diagnostics.clone())
                    .collect(),
            )
        } else {
            None
        };

        let n_rep = output.repetitions.len();
        let predictions = if self.return_predictions {
            Some(output.repetitions.into_iter().map(|r| r.predictions).collect())
        } else {
            None
        };

        Ok(EffectEstimate {
            treatment: data.treatment_name().to_string(),
            coefficient: inference.coefficient,
            std_error: inference.std_error,
            ci_lower: inference.ci_lower,
            ci_upper: inference.ci_upper,
            t_stat: inference.t_stat,
            p_value: inference.p_value,
            confidence_level: inference.confidence_level,
            n_obs: output.n_obs,
            n_folds: output.n_folds,
            n_rep,
            score: self.config.score,
            aggregation: self.config.aggregation,
            coefficients,
            std_errors,
            predictions,
            scores,
            diagnostics,
        })
    }
}
