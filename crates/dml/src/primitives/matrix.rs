//! Row-major feature matrix views.
//!
//! ## Purpose
//!
//! Learners receive covariates as a borrowed, row-major matrix. This module
//! provides that view and the row-gathering helpers used to assemble the
//! training and held-out subsets of each fold.
//!
//! ## Design notes
//!
//! * **Zero-copy**: `Features` borrows a flat slice; it never owns data.
//! * **Explicit shape**: The row count is stored so that zero-covariate
//!   models (intercept only) remain well defined.
//!
//! ## Invariants
//!
//! * `values.len() == n_rows * n_features`.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// ============================================================================
// Feature Matrix View
// ============================================================================

/// Borrowed row-major covariate matrix handed to learners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Features<'a, T> {
    values: &'a [T],
    n_rows: usize,
    n_features: usize,
}

impl<'a, T> Features<'a, T> {
    /// Wrap a row-major slice of `n_rows * n_features` values.
    pub fn new(values: &'a [T], n_rows: usize, n_features: usize) -> Self {
        debug_assert_eq!(values.len(), n_rows * n_features);
        Self {
            values,
            n_rows,
            n_features,
        }
    }

    /// Number of rows (observations).
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns (covariates).
    #[inline]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Underlying row-major values.
    #[inline]
    pub fn values(&self) -> &'a [T] {
        self.values
    }

    /// Covariates of row `i`.
    #[inline]
    pub fn row(&self, i: usize) -> &'a [T] {
        let offset = i * self.n_features;
        &self.values[offset..offset + self.n_features]
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = &'a [T]> + '_ {
        (0..self.n_rows).map(move |i| self.row(i))
    }
}

// ============================================================================
// Row Gathering
// ============================================================================

/// Copy the rows at `indices` into `out` (cleared first).
pub fn gather_rows<T: Copy>(features: &Features<'_, T>, indices: &[usize], out: &mut Vec<T>) {
    out.clear();
    for &i in indices {
        out.extend_from_slice(features.row(i));
    }
}

/// Copy the entries at `indices` into `out` (cleared first).
pub fn gather<T: Copy>(values: &[T], indices: &[usize], out: &mut Vec<T>) {
    out.clear();
    out.extend(indices.iter().map(|&i| values[i]));
}
