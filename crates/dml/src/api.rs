//! High-level API for DML estimation.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point. It implements
//! a fluent builder for configuring cross-fitting and inference and for
//! choosing an execution adapter.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters.
//! * **Polymorphic**: Uses marker types to transition to adapter builders.
//! * **Validated**: Parameters are validated when `.build()` is called.
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`DmlBuilder`] via `DoubleML::new()`.
//! 2. Chain configuration methods (`.n_folds()`, `.n_rep()`, etc.).
//! 3. Select an adapter via `.adapter(Batch)` and call `.build()`.
//!
//! ### Defaults
//!
//! | Parameter          | Default          |
//! |--------------------|------------------|
//! | `n_folds`          | 5                |
//! | `n_rep`            | 1                |
//! | `seed`             | 42               |
//! | `confidence_level` | 0.95             |
//! | `score`            | `PartiallingOut` |
//! | `aggregation`      | `Median`         |
//!
//! With `sample_splitting`, `n_folds` and `n_rep` default to the shape of
//! the supplied assignments.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Publicly re-exported types
pub use crate::adapters::batch::{BatchDml, BatchDmlBuilder};
pub use crate::adapters::dataset::{Dataset, Table};
pub use crate::algorithms::folds::FoldAssignment;
pub use crate::algorithms::learner::{Learner, LearnerError, Predictor};
pub use crate::algorithms::neighbors::KernelRegressor;
pub use crate::algorithms::regression::LinearRegression;
pub use crate::algorithms::score::ScoreKind;
pub use crate::engine::executor::NuisancePredictions;
pub use crate::engine::output::EffectEstimate;
pub use crate::evaluation::aggregation::Aggregation;
pub use crate::evaluation::diagnostics::NuisanceDiagnostics;
pub use crate::math::kernel::WeightFunction;
pub use crate::primitives::errors::{DmlError, ErrorKind, FitStage};
pub use crate::primitives::matrix::Features;
pub use crate::primitives::roles::{ColumnRole, ColumnRoles, NuisanceTarget};

/// Marker types for selecting execution adapters.
#[allow(non_snake_case)]
pub mod Adapter {
    pub use super::Batch;
}

/// Fluent builder for configuring DML estimation.
#[derive(Debug, Clone)]
pub struct DmlBuilder<T> {
    /// Number of folds `K`.
    pub n_folds: Option<usize>,

    /// Number of cross-fitting repetitions.
    pub n_rep: Option<usize>,

    /// Base seed of the fold partitioner.
    pub seed: Option<u64>,

    /// Confidence level of the reported interval.
    pub confidence_level: Option<T>,

    /// Orthogonal score.
    pub score: Option<ScoreKind>,

    /// Aggregation across repetitions.
    pub aggregation: Option<Aggregation>,

    /// Caller-supplied fold assignments, one per repetition.
    pub sample_splitting: Option<Vec<FoldAssignment>>,

    /// Include nuisance predictions in the result.
    pub return_predictions: Option<bool>,

    /// Include score values in the result.
    pub return_scores: Option<bool>,

    /// Include nuisance diagnostics in the result.
    pub return_diagnostics: Option<bool>,

    // ======================================
    // DEV
    // ======================================
    /// Parallel execution hint.
    #[doc(hidden)]
    pub parallel: Option<bool>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for DmlBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> DmlBuilder<T> {
    /// Select an execution adapter to transition to an execution builder.
    pub fn adapter<A>(self, _adapter: A) -> A::Output
    where
        A: DmlAdapter<T>,
    {
        A::convert(self)
    }

    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            n_folds: None,
            n_rep: None,
            seed: None,
            confidence_level: None,
            score: None,
            aggregation: None,
            sample_splitting: None,
            return_predictions: None,
            return_scores: None,
            return_diagnostics: None,
            parallel: None,
            duplicate_param: None,
        }
    }

    /// Set the number of folds (at least 2, at most the number of observations).
    pub fn n_folds(mut self, n_folds: usize) -> Self {
        if self.n_folds.is_some() {
            self.duplicate_param = Some("n_folds");
        }
        self.n_folds = Some(n_folds);
        self
    }

    /// Set the number of cross-fitting repetitions.
    pub fn n_rep(mut self, n_rep: usize) -> Self {
        if self.n_rep.is_some() {
            self.duplicate_param = Some("n_rep");
        }
        self.n_rep = Some(n_rep);
        self
    }

    /// Set the base seed of the fold partitioner.
    pub fn seed(mut self, seed: u64) -> Self {
        if self.seed.is_some() {
            self.duplicate_param = Some("seed");
        }
        self.seed = Some(seed);
        self
    }

    /// Set the confidence level of the reported interval (e.g., 0.95).
    pub fn confidence_level(mut self, level: T) -> Self {
        if self.confidence_level.is_some() {
            self.duplicate_param = Some("confidence_level");
        }
        self.confidence_level = Some(level);
        self
    }

    /// Set the orthogonal score.
    pub fn score(mut self, score: ScoreKind) -> Self {
        if self.score.is_some() {
            self.duplicate_param = Some("score");
        }
        self.score = Some(score);
        self
    }

    /// Set the aggregation across repetitions.
    pub fn aggregation(mut self, aggregation: Aggregation) -> Self {
        if self.aggregation.is_some() {
            self.duplicate_param = Some("aggregation");
        }
        self.aggregation = Some(aggregation);
        self
    }

    /// Use caller-supplied fold assignments instead of random partitions.
    pub fn sample_splitting(mut self, assignments: Vec<FoldAssignment>) -> Self {
        if self.sample_splitting.is_some() {
            self.duplicate_param = Some("sample_splitting");
        }
        self.sample_splitting = Some(assignments);
        self
    }

    /// Include out-of-fold nuisance predictions in the result.
    pub fn return_predictions(mut self) -> Self {
        self.return_predictions = Some(true);
        self
    }

    /// Include score values in the result.
    pub fn return_scores(mut self) -> Self {
        self.return_scores = Some(true);
        self
    }

    /// Include nuisance learner diagnostics (RMSE, MAE, R^2) in the result.
    pub fn return_diagnostics(mut self) -> Self {
        self.return_diagnostics = Some(true);
        self
    }

    // ==========================
    // Development Options
    // ==========================

    /// Set parallel execution hint (only for dev)
    #[doc(hidden)]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }
}

/// Trait for transitioning from a generic builder to an execution builder.
pub trait DmlAdapter<T: Float> {
    /// The output execution builder.
    type Output;

    /// Convert a generic [`DmlBuilder`] into a specialized execution builder.
    fn convert(builder: DmlBuilder<T>) -> Self::Output;
}

/// Marker for in-memory batch processing.
#[derive(Debug, Clone, Copy)]
pub struct Batch;

impl<T: Float> DmlAdapter<T> for Batch {
    type Output = BatchDmlBuilder<T>;

    fn convert(builder: DmlBuilder<T>) -> Self::Output {
        let mut result = BatchDmlBuilder::default();

        // Supplied splits fix the fold count and repetitions unless set explicitly
        if let Some(ref assignments) = builder.sample_splitting {
            if let Some(first) = assignments.first() {
                result.n_folds = first.n_folds();
            }
            result.n_rep = assignments.len();
        }

        if let Some(n_folds) = builder.n_folds {
            result.n_folds = n_folds;
        }
        if let Some(n_rep) = builder.n_rep {
            result.n_rep = n_rep;
        }
        if let Some(seed) = builder.seed {
            result.seed = seed;
        }
        if let Some(level) = builder.confidence_level {
            result.confidence_level = level;
        }
        if let Some(score) = builder.score {
            result.score = score;
        }
        if let Some(aggregation) = builder.aggregation {
            result.aggregation = aggregation;
        }
        result.sample_splitting = builder.sample_splitting;

        if let Some(rp) = builder.return_predictions {
            result.return_predictions = rp;
        }
        if let Some(rs) = builder.return_scores {
            result.return_scores = rs;
        }
        if let Some(rd) = builder.return_diagnostics {
            result.return_diagnostics = rd;
        }

        // ======================================
        // DEV
        // ======================================
        if let Some(p) = builder.parallel {
            result.parallel = Some(p);
        }

        result.duplicate_param = builder.duplicate_param;

        result
    }
}
