//! Reusable scratch space for cross-fitting.
//!
//! ## Purpose
//!
//! Every fold of every nuisance pass needs a training subset (covariates
//! and targets of the fold complement) and a held-out covariate subset.
//! `FoldBuffer` holds that scratch space so it is allocated once per pass
//! (or once per worker thread) instead of once per fold.
//!
//! ## Design notes
//!
//! * **Lazy Expansion**: Buffers grow via `ensure_capacity` but never shrink.
//! * **Explicit ownership**: Buffers are passed explicitly so parallel
//!   executors can keep one buffer per thread.
//!
//! ## Invariants
//!
//! * Buffers are only logically cleared between folds, never deallocated.

// Feature-gated dependencies
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// ============================================================================
// Fold Buffers
// ============================================================================

/// Training and held-out subsets for one fold.
#[derive(Debug, Clone)]
pub struct FoldBuffer<T> {
    /// Indices of the fold complement (training rows).
    pub train_idx: Vec<usize>,
    /// Training covariates, row-major.
    pub train_x: Vec<T>,
    /// Training targets.
    pub train_y: Vec<T>,
    /// Held-out covariates, row-major.
    pub test_x: Vec<T>,
}

impl<T> Default for FoldBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FoldBuffer<T> {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self {
            train_idx: Vec::new(),
            train_x: Vec::new(),
            train_y: Vec::new(),
            test_x: Vec::new(),
        }
    }

    /// Ensure sufficient capacity for `n_total` rows of `dims` covariates.
    pub fn ensure_capacity(&mut self, n_total: usize, dims: usize) {
        if self.train_idx.capacity() < n_total {
            self.train_idx.reserve(n_total);
        }
        if self.train_x.capacity() < n_total * dims {
            self.train_x.reserve(n_total * dims);
        }
        if self.train_y.capacity() < n_total {
            self.train_y.reserve(n_total);
        }
        // Held-out sets are at most half the data for K >= 2
        if self.test_x.capacity() < (n_total / 2 + 1) * dims {
            self.test_x.reserve((n_total / 2 + 1) * dims);
        }
    }
}
