//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer implements the building blocks of a cross-fitted DML
//! estimate:
//! - Fold partitioning and caller-supplied sample splits
//! - The learner capability and two concrete regression learners
//! - Out-of-fold nuisance prediction
//! - Orthogonalized residuals and linear Neyman-orthogonal scores
//! - Solving the moment condition for the treatment effect
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
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// K-fold partitioning of observation indices.
pub mod folds;

/// Nuisance learner capability.
pub mod learner;

/// Least squares learner with optional ridge penalty.
pub mod regression;

/// Kernel-weighted nearest-neighbour learner.
pub mod neighbors;

/// Out-of-fold nuisance prediction.
pub mod crossfit;

/// Residuals and linear scores.
pub mod score;

/// Moment condition solver.
pub mod effect;
