//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure mathematical functions used throughout the crate:
//! - Summary statistics (mean, median, sums of squares)
//! - Dense symmetric linear solves for least squares learners
//! - Kernel functions for distance-based weighting
//! - Standard normal distribution functions for inference
//!
//! These are reusable mathematical building blocks with no DML-specific logic.
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
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Summary statistics.
pub mod stats;

/// Cholesky factorization and solves.
pub mod linalg;

/// Kernel (weight) functions for distance-based weighting.
pub mod kernel;

/// Standard normal CDF and quantile function.
pub mod normal;
