//! Layer 4: Evaluation
//!
//! # Purpose
//!
//! This layer turns point estimates into statistical conclusions:
//! - Sandwich standard errors, t statistics, p-values and confidence intervals
//! - Aggregation of repeated cross-fitting runs
//! - Goodness-of-fit diagnostics of the nuisance learners
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Asymptotic normal inference for the treatment effect.
pub mod inference;

/// Aggregation across cross-fitting repetitions.
pub mod aggregation;

/// Diagnostic metrics for nuisance learner quality.
pub mod diagnostics;
