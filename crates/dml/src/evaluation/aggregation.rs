//! Aggregation across cross-fitting repetitions.
//!
//! ## Purpose
//!
//! Each repetition re-partitions the data and yields its own `(θ_r, se_r)`.
//! This module combines them into one estimate whose variance also reflects
//! the randomness of the sample split.
//!
//! ## Key concepts
//!
//! * **Median** (default): `θ = median_r θ_r` and
//!   `se² = median_r(n·se_r² + (θ_r − θ)²) / n`.
//! * **Mean**: the same formulas with the mean.
//!
//! ## Invariants
//!
//! * A single repetition is returned unchanged.
//! * Repetition order does not affect the result.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt::{Display, Formatter, Result};
use num_traits::Float;

// Internal dependencies
use crate::math::stats::{mean, median_inplace};

// ============================================================================
// Aggregation Policy
// ============================================================================

/// Policy for combining per-repetition estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Aggregation {
    /// Median of estimates, robust to an unlucky split.
    #[default]
    Median,

    /// Arithmetic mean of estimates.
    Mean,
}

impl Aggregation {
    /// Combine per-repetition coefficients and standard errors.
    ///
    /// Returns `(coefficient, std_error)`; both are NaN for empty input.
    pub fn aggregate<T: Float>(&self, coefficients: &[T], std_errors: &[T], n_obs: usize) -> (T, T) {
        debug_assert_eq!(coefficients.len(), std_errors.len());

        match coefficients.len() {
            0 => return (T::nan(), T::nan()),
            1 => return (coefficients[0], std_errors[0]),
            _ => {}
        }

        let mut scratch: Vec<T> = coefficients.to_vec();
        let theta = self.center(&mut scratch);

        let n = T::from(n_obs).unwrap_or(T::one());
        scratch.clear();
        scratch.extend(coefficients.iter().zip(std_errors).map(|(&c, &se)| {
            let dev = c - theta;
            n * se * se + dev * dev
        }));
        let variance = self.center(&mut scratch) / n;

        (theta, variance.sqrt())
    }

    fn center<T: Float>(&self, vals: &mut [T]) -> T {
        match self {
            Self::Median => median_inplace(vals),
            Self::Mean => mean(vals),
        }
    }
}

impl Display for Aggregation {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::Median => f.write_str("median"),
            Self::Mean => f.write_str("mean"),
        }
    }
}
