//! # Fast DML — Parallel Double Machine Learning
//!
//! Parallel extension of the [`dml`] crate. The estimator, its validation,
//! scores and inference are those of `dml`; this crate runs the
//! cross-fitting passes on all CPU cores and accepts `ndarray` inputs.
//!
//! ## Quick Start
//!
//! ### Typical Use
//!
//! ```rust
//! use fastDml::prelude::*;
//! use ndarray::{Array1, Array2};
//!
//! let n = 60;
//! let x = Array2::from_shape_fn((n, 2), |(i, j)| ((i * (j + 3)) as f64 * 0.37).sin());
//! let d = Array1::from_shape_fn(n, |i| 0.5 * x[[i, 0]] + 0.3 * x[[i, 1]] + (i as f64 * 2.3).sin());
//! let y = Array1::from_shape_fn(n, |i| d[i] + 0.5 * x[[i, 0]] - 0.5 * x[[i, 1]] + (i as f64 * 1.7).cos());
//!
//! // Build the model with parallel execution (default)
//! let model = DoubleML::new()
//!     .n_folds(5)
//!     .seed(42)
//!     .adapter(Batch)     // Parallel by default
//!     .build()?;
//!
//! let lr = LinearRegression::new();
//! let result = model.fit_arrays(&x, &y, &d, &lr, &lr)?;
//!
//! println!("{}", result);
//! # Result::<(), DmlError>::Ok(())
//! ```
//!
//! ### Named Columns
//!
//! ```rust
//! use fastDml::prelude::*;
//! use ndarray::Array2;
//!
//! let data = Array2::from_shape_fn((40, 3), |(i, j)| ((i + 7 * j) as f64 * 0.61).sin() + j as f64);
//! let table = ArrayTable::new(&data, &["y", "d", "x"])?;
//!
//! let model = DoubleML::new().n_folds(4).adapter(Batch).build()?;
//! let lr = LinearRegression::new();
//! let result = model.fit_table(&table, &ColumnRoles::new("y", "d"), &lr, &lr)?;
//! assert_eq!(result.n_obs, 40);
//! # Result::<(), DmlError>::Ok(())
//! ```
//!
//! ## Parallelism
//!
//! Folds of a nuisance pass are fitted concurrently, and the outcome and
//! treatment passes of a repetition run side by side. Estimates are
//! bit-identical to the sequential `dml` crate for deterministic learners.
//! Use `.parallel(false)` on the builder to run sequentially.

#![allow(non_snake_case)]

// Layer 5: Engine - parallel cross-fitting passes.
mod engine;

// Layer 6: Adapters - parallel batch adapter.
mod adapters;

// High-level fluent API for DML estimation.
mod api;

// Input data handling.
mod input;

// Standard fastDml prelude.
pub mod prelude {
    pub use crate::api::{
        Adapter::Batch,
        Aggregation::{Mean, Median},
        ArrayTable, ColumnRole, ColumnRoles, Dataset, DmlBuilder as DoubleML, DmlError, DmlInput,
        DmlMatrix, EffectEstimate, ErrorKind, Features, FitStage, FoldAssignment, KernelRegressor,
        Learner, LearnerError, LinearRegression, NuisanceDiagnostics, NuisancePredictions,
        NuisanceTarget, Predictor,
        ScoreKind::{IvType, PartiallingOut},
        Table,
        WeightFunction::{Biweight, Epanechnikov, Gaussian, Tricube, Uniform},
    };
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod adapters {
        pub use crate::adapters::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
    pub mod input {
        pub use crate::input::*;
    }
}
