//! K-fold partitioning for cross-fitting.
//!
//! ## Purpose
//!
//! This module assigns every observation to exactly one of `K` folds. Fold
//! `k` is held out while the nuisance learners are trained on the remaining
//! `K - 1` folds.
//!
//! ## Design notes
//!
//! * **Shuffle then slice**: indices are shuffled with a seeded `ChaCha8Rng`
//!   and sliced into contiguous groups, so fold sizes differ by at most one.
//! * **Portable**: the same seed yields the same folds on every platform.
//! * **Caller splits**: [`FoldAssignment::from_labels`] accepts an external
//!   fold labeling instead of the random partition.
//!
//! ## Invariants
//!
//! * Every index in `[0, n)` belongs to exactly one fold.
//! * Every fold and every fold complement is non-empty.
//! * Held-out indices of each fold are stored in ascending order.
//!
//! ## Non-goals
//!
//! * This module does not stratify folds by treatment or outcome.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{format, vec, vec::Vec};
#[cfg(feature = "std")]
use std::{format, vec, vec::Vec};

// External dependencies
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Internal dependencies
use crate::primitives::errors::DmlError;

// ============================================================================
// Fold Assignment
// ============================================================================

/// Mapping from observation index to fold id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldAssignment {
    labels: Vec<usize>,
    test_sets: Vec<Vec<usize>>,
}

impl FoldAssignment {
    /// Randomly partition `n` indices into `k` near-equal folds.
    ///
    /// The first `n % k` folds hold one extra observation.
    pub fn partition(n: usize, k: usize, seed: u64) -> Result<Self, DmlError> {
        if k < 2 || k > n {
            return Err(DmlError::InvalidFolds { folds: k, n_obs: n });
        }

        let mut order: Vec<usize> = (0..n).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        order.shuffle(&mut rng);

        let base = n / k;
        let extra = n % k;
        let mut labels = vec![0usize; n];
        let mut start = 0;
        for fold in 0..k {
            let size = base + usize::from(fold < extra);
            for &i in &order[start..start + size] {
                labels[i] = fold;
            }
            start += size;
        }

        Ok(Self::from_valid_labels(labels, k))
    }

    /// Build an assignment from caller-supplied fold labels in `[0, k)`.
    pub fn from_labels(labels: Vec<usize>, k: usize) -> Result<Self, DmlError> {
        let n = labels.len();
        if k < 2 || k > n {
            return Err(DmlError::InvalidFolds { folds: k, n_obs: n });
        }

        let mut counts = vec![0usize; k];
        for (i, &label) in labels.iter().enumerate() {
            if label >= k {
                return Err(DmlError::InvalidFoldAssignment(format!(
                    "observation {i} has fold label {label}, expected a label below {k}"
                )));
            }
            counts[label] += 1;
        }
        if let Some(empty) = counts.iter().position(|&c| c == 0) {
            return Err(DmlError::InvalidFoldAssignment(format!(
                "fold {empty} has no observations"
            )));
        }

        Ok(Self::from_valid_labels(labels, k))
    }

    fn from_valid_labels(labels: Vec<usize>, k: usize) -> Self {
        let mut test_sets = vec![Vec::new(); k];
        for (i, &label) in labels.iter().enumerate() {
            test_sets[label].push(i);
        }
        Self { labels, test_sets }
    }

    /// Number of folds.
    #[inline]
    pub fn n_folds(&self) -> usize {
        self.test_sets.len()
    }

    /// Number of observations covered by the assignment.
    #[inline]
    pub fn n_obs(&self) -> usize {
        self.labels.len()
    }

    /// Fold id of observation `i`.
    #[inline]
    pub fn fold_of(&self, i: usize) -> usize {
        self.labels[i]
    }

    /// Fold id of every observation.
    #[inline]
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Held-out indices of fold `k`, ascending.
    #[inline]
    pub fn test_indices(&self, k: usize) -> &[usize] {
        &self.test_sets[k]
    }

    /// Write the training indices of fold `k` (its complement) into `out`.
    pub fn train_indices_into(&self, k: usize, out: &mut Vec<usize>) {
        out.clear();
        out.extend(
            self.labels
                .iter()
                .enumerate()
                .filter(|&(_, &label)| label != k)
                .map(|(i, _)| i),
        );
    }

    /// Number of held-out observations in each fold.
    pub fn fold_sizes(&self) -> Vec<usize> {
        self.test_sets.iter().map(Vec::len).collect()
    }
}
