//! # DML — Double Machine Learning for Rust
//!
//! Estimation of causal effects in the partially linear regression (PLR)
//! model with cross-fitted machine learning nuisance functions.
//!
//! ## What is Double Machine Learning?
//!
//! The PLR model relates an outcome `Y`, a treatment `D` and confounders `X`:
//!
//! ```text
//! Y = θ·D + g(X) + ζ,     E[ζ | D, X] = 0
//! D = m(X) + V,           E[V | X]    = 0
//! ```
//!
//! DML learns `E[Y | X]` and `E[D | X]` with arbitrary regression learners,
//! removes them from `Y` and `D`, and regresses the outcome residual on the
//! treatment residual. Cross-fitting (training on `K − 1` folds, predicting
//! the held-out fold) prevents overfitting bias, and the Neyman-orthogonal
//! score makes θ̂ insensitive to first-order nuisance errors, so θ̂ is
//! root-n consistent and asymptotically normal.
//!
//! ## Quick Start
//!
//! ```rust
//! use dml::prelude::*;
//!
//! // Outcome y, treatment d and two confounders
//! let x1: Vec<f64> = (0..40).map(|i| (i as f64 * 0.37).sin()).collect();
//! let x2: Vec<f64> = (0..40).map(|i| (i as f64 * 0.91).cos()).collect();
//! let e: Vec<f64> = (0..40).map(|i| (i as f64 * 2.3).sin() * 0.5).collect();
//! let u: Vec<f64> = (0..40).map(|i| (i as f64 * 1.7).cos() * 0.5).collect();
//! let d: Vec<f64> = (0..40).map(|i| 0.5 * x1[i] + 0.3 * x2[i] + e[i]).collect();
//! let y: Vec<f64> = (0..40).map(|i| d[i] + 0.5 * x1[i] - 0.5 * x2[i] + u[i]).collect();
//!
//! let table = vec![("y", y), ("d", d), ("x1", x1), ("x2", x2)];
//! let roles = ColumnRoles::new("y", "d").covariates(&["x1", "x2"]);
//!
//! // Build the estimator
//! let model = DoubleML::new()
//!     .n_folds(5)              // 5-fold cross-fitting
//!     .n_rep(1)                // One sample split
//!     .seed(42)                // Reproducible folds
//!     .confidence_level(0.95)  // 95% confidence interval
//!     .adapter(Batch)
//!     .build()?;
//!
//! // Estimate with linear nuisance learners
//! let result = model.fit_table(&table, &roles, &LinearRegression::new(), &LinearRegression::new())?;
//!
//! println!("{}", result);
//! assert!((result.coefficient - 1.0).abs() < 0.5);
//! # Result::<(), DmlError>::Ok(())
//! ```
//!
//! ```text
//! Summary:
//!   Model:        Partially linear regression
//!   Score:        partialling out
//!   Observations: 40
//!   Folds:        5
//!   Repetitions:  1
//!
//! Coefficient:
//!                    coef      std err          t      P>|t|       2.5 %       97.5 %
//!   ----------------------------------------------------------------------------------
//!          d     0.962418     0.151207     6.3649     0.0000     0.666062     1.258774
//! ```
//!
//! ### Full Features
//!
//! ```rust
//! use dml::prelude::*;
//! # let x1: Vec<f64> = (0..60).map(|i| (i as f64 * 0.37).sin()).collect();
//! # let x2: Vec<f64> = (0..60).map(|i| (i as f64 * 0.91).cos()).collect();
//! # let e: Vec<f64> = (0..60).map(|i| (i as f64 * 2.3).sin() * 0.5).collect();
//! # let u: Vec<f64> = (0..60).map(|i| (i as f64 * 1.7).cos() * 0.5).collect();
//! # let d: Vec<f64> = (0..60).map(|i| 0.5 * x1[i] + 0.3 * x2[i] + e[i]).collect();
//! # let y: Vec<f64> = (0..60).map(|i| d[i] + 0.5 * x1[i] - 0.5 * x2[i] + u[i]).collect();
//! # let table = vec![("y", y), ("d", d), ("x1", x1), ("x2", x2)];
//!
//! let model = DoubleML::new()
//!     .n_folds(4)                // 4-fold cross-fitting
//!     .n_rep(3)                  // 3 independent sample splits
//!     .seed(7)                   // Base seed (repetition r uses seed + r)
//!     .confidence_level(0.90)    // 90% confidence interval
//!     .score(IvType)             // IV-type orthogonal score
//!     .aggregation(Median)       // Median aggregation across splits
//!     .return_predictions()      // Keep out-of-fold nuisance predictions
//!     .return_scores()           // Keep score values
//!     .return_diagnostics()      // Nuisance fit quality
//!     .adapter(Batch)
//!     .build()?;
//!
//! // Empty covariate list: every other column is a confounder
//! let roles = ColumnRoles::new("y", "d");
//! let ml_l = KernelRegressor::new(15).weight_function(Epanechnikov);
//! let ml_m = LinearRegression::ridge(1e-3);
//!
//! let result = model.fit_table(&table, &roles, &ml_l, &ml_m)?;
//! assert_eq!(result.n_rep, 3);
//! assert!(result.ci_lower <= result.coefficient && result.coefficient <= result.ci_upper);
//! # Result::<(), DmlError>::Ok(())
//! ```
//!
//! ### Result and Error Handling
//!
//! `fit` returns a `Result<EffectEstimate<T>, DmlError>`. Every error has
//! a category available through [`DmlError::kind`](prelude::DmlError::kind):
//!
//! | Kind         | Raised when                                              |
//! |--------------|----------------------------------------------------------|
//! | `Schema`     | a labeled column is absent, has two roles, or is ragged  |
//! | `Data`       | the table is empty or contains a non-finite value        |
//! | `Config`     | folds, repetitions, level or sample splits are invalid   |
//! | `Fit`        | a nuisance learner fails (fold and target are reported)  |
//! | `Degenerate` | the treatment has no variation left after `E[D | X]`    |
//!
//! No error is ever replaced by a fallback estimate.
//!
//! ```rust
//! use dml::prelude::*;
//!
//! let table = vec![("y", vec![1.0, 2.0, 3.0]), ("d", vec![0.0, 1.0, 0.0])];
//! let roles = ColumnRoles::new("y", "treatment");
//! let model = DoubleML::new().n_folds(2).adapter(Batch).build()?;
//!
//! let lr = LinearRegression::new();
//! match model.fit_table(&table, &roles, &lr, &lr) {
//!     Ok(result) => println!("θ = {}", result.coefficient),
//!     Err(e) => assert_eq!(e.kind(), ErrorKind::Schema),
//! }
//! # Result::<(), DmlError>::Ok(())
//! ```
//!
//! ## Custom Learners
//!
//! Any regression model can be used as a nuisance learner by implementing
//! [`Learner`](prelude::Learner) (training) and
//! [`Predictor`](prelude::Predictor) (prediction).
//!
//! ```rust
//! use dml::prelude::*;
//!
//! /// Predicts the training mean.
//! struct MeanLearner;
//! struct MeanModel(f64);
//!
//! impl Learner<f64> for MeanLearner {
//!     type Fitted = MeanModel;
//!     type Error = LearnerError;
//!
//!     fn fit(&self, _x: Features<'_, f64>, y: &[f64]) -> Result<MeanModel, LearnerError> {
//!         if y.is_empty() {
//!             return Err(LearnerError::EmptyTrainingSet);
//!         }
//!         Ok(MeanModel(y.iter().sum::<f64>() / y.len() as f64))
//!     }
//! }
//!
//! impl Predictor<f64> for MeanModel {
//!     type Error = LearnerError;
//!
//!     fn predict(&self, x: Features<'_, f64>) -> Result<Vec<f64>, LearnerError> {
//!         Ok(vec![self.0; x.n_rows()])
//!     }
//! }
//! ```
//!
//! ## Minimal Usage (no_std / Embedded)
//!
//! The crate supports `no_std` environments with `alloc`. Disable default
//! features to remove the standard library dependency:
//!
//! ```toml
//! [dependencies]
//! dml = { version = "0.3", default-features = false }
//! ```
//!
//! ## References
//!
//! - Chernozhukov, V., Chetverikov, D., Demirer, M., Duflo, E., Hansen, C.,
//!   Newey, W. and Robins, J. (2018). "Double/debiased machine learning for
//!   treatment and structural parameters". The Econometrics Journal, 21(1).
//! - Bach, P., Chernozhukov, V., Kurz, M. S. and Spindler, M. (2022).
//!   "DoubleML: An Object-Oriented Implementation of Double Machine Learning in Python".
//!
//! ## License
//!
//! See the repository for license information and contribution guidelines.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// Layer 1: Primitives - data structures and basic utilities.
mod primitives;

// Layer 2: Math - pure mathematical functions.
mod math;

// Layer 3: Algorithms - folds, learners, cross-fitting and scores.
mod algorithms;

// Layer 4: Evaluation - inference, aggregation and diagnostics.
mod evaluation;

// Layer 5: Engine - orchestration and execution control.
mod engine;

// Layer 6: Adapters - dataset and execution adapters.
mod adapters;

// High-level fluent API for DML estimation.
mod api;

// Standard DML prelude.
pub mod prelude {
    pub use crate::api::{
        Adapter::Batch,
        Aggregation::Mean,
        Aggregation::Median,
        ColumnRole, ColumnRoles, Dataset, DmlBuilder as DoubleML, DmlError, EffectEstimate,
        ErrorKind, Features, FitStage, FoldAssignment, KernelRegressor, Learner, LearnerError,
        LinearRegression, NuisanceDiagnostics, NuisancePredictions, NuisanceTarget, Predictor,
        ScoreKind::IvType,
        ScoreKind::PartiallingOut,
        Table,
        WeightFunction::Biweight,
        WeightFunction::Epanechnikov,
        WeightFunction::Gaussian,
        WeightFunction::Tricube,
        WeightFunction::Uniform,
    };
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod math {
        pub use crate::math::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    pub mod adapters {
        pub use crate::adapters::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
