//! High-level API for parallel DML estimation.
//!
//! ## Purpose
//!
//! This module re-exports the core builder and provides a `Batch` adapter
//! marker that selects the parallel batch estimator.
//!
//! ## Design notes
//!
//! * **Delegation**: conversion is delegated to the core `Batch` marker,
//!   then wrapped with the parallel extension.
//! * **Parallel by default**: unless `.parallel(false)` is set on the builder.

// Internal dependencies
use crate::adapters::batch::ParallelBatchDmlBuilder;

// External dependencies
use num_traits::Float;

// Import base marker types for delegation
use dml::internals::api::Batch as BaseBatch;

// Publicly re-exported types
pub use crate::input::{ArrayTable, DmlInput, DmlMatrix};
pub use dml::internals::adapters::dataset::{Dataset, Table};
pub use dml::internals::algorithms::folds::FoldAssignment;
pub use dml::internals::algorithms::learner::{Learner, LearnerError, Predictor};
pub use dml::internals::algorithms::neighbors::KernelRegressor;
pub use dml::internals::algorithms::regression::LinearRegression;
pub use dml::internals::algorithms::score::ScoreKind;
pub use dml::internals::api::{DmlAdapter, DmlBuilder};
pub use dml::internals::engine::executor::NuisancePredictions;
pub use dml::internals::engine::output::EffectEstimate;
pub use dml::internals::evaluation::aggregation::Aggregation;
pub use dml::internals::evaluation::diagnostics::NuisanceDiagnostics;
pub use dml::internals::math::kernel::WeightFunction;
pub use dml::internals::primitives::errors::{DmlError, ErrorKind, FitStage};
pub use dml::internals::primitives::matrix::Features;
pub use dml::internals::primitives::roles::{ColumnRole, ColumnRoles, NuisanceTarget};

// ============================================================================
// Adapter Module
// ============================================================================

/// Adapter selection namespace.
#[allow(non_snake_case)]
pub mod Adapter {
    pub use super::Batch;
}

// ============================================================================
// Adapter Marker Types
// ============================================================================

/// Marker for parallel in-memory batch processing.
#[derive(Debug, Clone, Copy)]
pub struct Batch;

impl<T: Float> DmlAdapter<T> for Batch {
    type Output = ParallelBatchDmlBuilder<T>;

    fn convert(builder: DmlBuilder<T>) -> Self::Output {
        // Determine parallel mode: user choice OR default to true for fastDml Batch
        let parallel = builder.parallel.unwrap_or(true);

        // Delegate to base implementation to create base builder
        let mut base = <BaseBatch as DmlAdapter<T>>::convert(builder);
        base = base.parallel(parallel);

        // Wrap with extension fields
        ParallelBatchDmlBuilder { base }
    }
}
