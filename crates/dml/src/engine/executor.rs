//! Execution engine for repeated cross-fitting.
//!
//! ## Purpose
//!
//! This module runs a complete DML estimation on validated inputs: it draws
//! (or takes) the fold assignment of every repetition, runs the nuisance
//! passes, builds the orthogonal score, solves for θ, computes inference and
//! aggregates the repetitions.
//!
//! ## Design notes
//!
//! * **Pluggable passes**: nuisance passes go through the [`CrossFitPass`]
//!   trait. [`SequentialPass`] runs folds one after another; parallel
//!   executors provide their own implementation.
//! * **Fail-fast**: the first learner or degeneracy error aborts the run.
//! * **Seeded splits**: repetition `r` partitions with seed `seed + r`.
//! * Generic over `Float` types to support f32 and f64.
//!
//! ## Invariants
//!
//! * All fold assignments exist before the first learner is trained.
//! * Repetition results are stored in repetition order.
//!
//! ## Non-goals
//!
//! * This module does not validate input columns (handled by the dataset adapter).
//! * This module does not format results (handled by `output`).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;
use tracing::{info, warn};

// Internal dependencies
use crate::algorithms::crossfit::cross_fit_predict;
use crate::algorithms::effect::solve_effect;
use crate::algorithms::folds::FoldAssignment;
use crate::algorithms::learner::Learner;
use crate::algorithms::score::{residuals, LinearScore, ResidualPair, ScoreInputs, ScoreKind};
use crate::evaluation::aggregation::Aggregation;
use crate::evaluation::diagnostics::NuisanceDiagnostics;
use crate::evaluation::inference::Inference;
use crate::primitives::errors::DmlError;
use crate::primitives::matrix::Features;
use crate::primitives::roles::NuisanceTarget;

/// Spread of repetition estimates (in aggregated standard errors) that is logged as a warning.
const REPETITION_SPREAD_WARNING: f64 = 2.0;

// ============================================================================
// Cross-Fitting Passes
// ============================================================================

/// Strategy for running out-of-fold nuisance passes.
pub trait CrossFitPass<T: Float> {
    /// Out-of-fold predictions of `target` for every observation.
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
        L: Learner<T> + ?Sized;

    /// Outcome and treatment passes of one repetition.
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
        let l_hat = self.nuisance_pass(x, y, folds, ml_l, NuisanceTarget::Outcome, repetition)?;
        let m_hat = self.nuisance_pass(x, d, folds, ml_m, NuisanceTarget::Treatment, repetition)?;
        Ok((l_hat, m_hat))
    }
}

impl<T: Float, P: CrossFitPass<T>> CrossFitPass<T> for &P {
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
        (**self).nuisance_pass(x, target, folds, learner, nuisance, repetition)
    }

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
        (**self).nuisance_pair(x, y, d, folds, ml_l, ml_m, repetition)
    }
}

/// Folds are fitted one after another on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialPass;

impl<T: Float> CrossFitPass<T> for SequentialPass {
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
        cross_fit_predict(x, target, folds, learner, nuisance, repetition)
    }
}

// ============================================================================
// Configuration and Output
// ============================================================================

/// Validated configuration of an estimation run.
#[derive(Debug, Clone)]
pub struct DmlConfig<T> {
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

    /// Policy for combining repetitions.
    pub aggregation: Aggregation,

    /// Caller-supplied fold assignments, one per repetition.
    pub sample_splitting: Option<Vec<FoldAssignment>>,

    /// Compute nuisance diagnostics for every repetition.
    pub return_diagnostics: bool,
}

/// Out-of-fold nuisance predictions of one repetition.
#[derive(Debug, Clone, PartialEq)]
pub struct NuisancePredictions<T> {
    /// Predictions of `E[Y | X]`.
    pub ml_l: Vec<T>,

    /// Predictions of `E[D | X]`.
    pub ml_m: Vec<T>,

    /// Predictions of `E[Y − θD | X]` (IV-type score only).
    pub ml_g: Option<Vec<T>>,
}

/// Result of a single cross-fitting repetition.
#[derive(Debug, Clone)]
pub struct RepetitionEstimate<T> {
    /// Inference computed from this repetition alone.
    pub inference: Inference<T>,

    /// Out-of-fold nuisance predictions.
    pub predictions: NuisancePredictions<T>,

    /// Score components.
    pub score: LinearScore<T>,

    /// Nuisance fit quality (empty unless requested).
    pub diagnostics: Vec<NuisanceDiagnostics<T>>,
}

/// Output of [`DmlExecutor::run`].
#[derive(Debug, Clone)]
pub struct ExecutorOutput<T> {
    /// Aggregated coefficient.
    pub coefficient: T,

    /// Aggregated standard error.
    pub std_error: T,

    /// Number of observations.
    pub n_obs: usize,

    /// Number of folds.
    pub n_folds: usize,

    /// Per-repetition results in repetition order.
    pub repetitions: Vec<RepetitionEstimate<T>>,
}

// ============================================================================
// Executor
// ============================================================================

/// Runs repeated cross-fitting with a given pass strategy.
#[derive(Debug)]
pub struct DmlExecutor<'a, T, P> {
    config: &'a DmlConfig<T>,
    pass: P,
}

impl<'a, T: Float, P: CrossFitPass<T>> DmlExecutor<'a, T, P> {
    /// Create an executor for `config` using `pass` for nuisance passes.
    pub fn new(config: &'a DmlConfig<T>, pass: P) -> Self {
        Self { config, pass }
    }

    /// Fold assignment of every repetition.
    pub fn fold_assignments(&self, n_obs: usize) -> Result<Vec<FoldAssignment>, DmlError> {
        match &self.config.sample_splitting {
            Some(assignments) => Ok(assignments.clone()),
            None => (0..self.config.n_rep)
                .map(|r| {
                    FoldAssignment::partition(
                        n_obs,
                        self.config.n_folds,
                        self.config.seed.wrapping_add(r as u64),
                    )
                })
                .collect(),
        }
    }

    /// Estimate θ from covariates `x`, outcome `y` and treatment `d`.
    ///
    /// `ml_g` is only trained for the IV-type score.
    #[allow(clippy::too_many_arguments)]
    pub fn run<L, M, G>(
        &self,
        x: Features<'_, T>,
        y: &[T],
        d: &[T],
        ml_l: &L,
        ml_m: &M,
        ml_g: &G,
    ) -> Result<ExecutorOutput<T>, DmlError>
    where
        L: Learner<T> + ?Sized,
        M: Learner<T> + ?Sized,
        G: Learner<T> + ?Sized,
    {
        let n_obs = y.len();
        let assignments = self.fold_assignments(n_obs)?;
        let n_folds = assignments.first().map_or(self.config.n_folds, FoldAssignment::n_folds);

        info!(
            n_obs,
            n_features = x.n_features(),
            n_folds,
            n_rep = assignments.len(),
            score = self.config.score.name(),
            "starting DML estimation"
        );

        let mut repetitions = Vec::with_capacity(assignments.len());
        for (r, folds) in assignments.iter().enumerate() {
            let estimate = self.run_repetition(x, y, d, folds, ml_l, ml_m, ml_g, r)?;
            info!(
                repetition = r,
                coefficient = estimate.inference.coefficient.to_f64(),
                std_error = estimate.inference.std_error.to_f64(),
                "repetition complete"
            );
            repetitions.push(estimate);
        }

        let coefficients: Vec<T> = repetitions.iter().map(|e| e.inference.coefficient).collect();
        let std_errors: Vec<T> = repetitions.iter().map(|e| e.inference.std_error).collect();
        let (coefficient, std_error) =
            self.config
                .aggregation
                .aggregate(&coefficients, &std_errors, n_obs);

        if coefficients.len() > 1 {
            let (lo, hi) = coefficients
                .iter()
                .fold((T::infinity(), T::neg_infinity()), |(lo, hi), &c| {
                    (lo.min(c), hi.max(c))
                });
            let limit = T::from(REPETITION_SPREAD_WARNING).unwrap_or(T::one()) * std_error;
            if hi - lo > limit {
                warn!(
                    min = lo.to_f64(),
                    max = hi.to_f64(),
                    std_error = std_error.to_f64(),
                    "repetition estimates disagree by more than {REPETITION_SPREAD_WARNING} standard errors"
                );
            }
        }

        Ok(ExecutorOutput {
            coefficient,
            std_error,
            n_obs,
            n_folds,
            repetitions,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn run_repetition<L, M, G>(
        &self,
        x: Features<'_, T>,
        y: &[T],
        d: &[T],
        folds: &FoldAssignment,
        ml_l: &L,
        ml_m: &M,
        ml_g: &G,
        repetition: usize,
    ) -> Result<RepetitionEstimate<T>, DmlError>
    where
        L: Learner<T> + ?Sized,
        M: Learner<T> + ?Sized,
        G: Learner<T> + ?Sized,
    {
        let (l_hat, m_hat) = self
            .pass
            .nuisance_pair(x, y, d, folds, ml_l, ml_m, repetition)?;

        let pair = ResidualPair::new(y, &l_hat, d, &m_hat);
        let partialled = LinearScore::build(&pair, ScoreInputs::PartiallingOut);
        let theta_po = solve_effect(&partialled, d, repetition)?;

        let (score, theta, g_fit) = match self.config.score {
            ScoreKind::PartiallingOut => (partialled, theta_po, None),
            ScoreKind::IvType => {
                // Initial θ from partialling out defines the target of ml_g
                let adjusted: Vec<T> = y
                    .iter()
                    .zip(d)
                    .map(|(&yi, &di)| yi - theta_po * di)
                    .collect();
                let g_hat = self.pass.nuisance_pass(
                    x,
                    &adjusted,
                    folds,
                    ml_g,
                    NuisanceTarget::AdjustedOutcome,
                    repetition,
                )?;
                let adjusted_residual = residuals(y, &g_hat);
                let score = LinearScore::build(
                    &pair,
                    ScoreInputs::IvType {
                        treatment: d,
                        adjusted_residual: &adjusted_residual,
                    },
                );
                let theta = solve_effect(&score, d, repetition)?;
                (score, theta, Some((adjusted, g_hat)))
            }
        };

        let inference = Inference::from_score(theta, &score, self.config.confidence_level);

        let mut diagnostics = Vec::new();
        if self.config.return_diagnostics {
            diagnostics.push(NuisanceDiagnostics::compute(NuisanceTarget::Outcome, y, &l_hat));
            diagnostics.push(NuisanceDiagnostics::compute(NuisanceTarget::Treatment, d, &m_hat));
            if let Some((adjusted, g_hat)) = &g_fit {
                diagnostics.push(NuisanceDiagnostics::compute(
                    NuisanceTarget::AdjustedOutcome,
                    adjusted,
                    g_hat,
                ));
            }
        }

        Ok(RepetitionEstimate {
            inference,
            predictions: NuisancePredictions {
                ml_l: l_hat,
                ml_m: m_hat,
                ml_g: g_fit.map(|(_, g_hat)| g_hat),
            },
            score,
            diagnostics,
        })
    }
}
