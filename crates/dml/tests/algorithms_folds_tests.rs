#![cfg(feature = "dev")]
//! Tests for K-fold partitioning.
//!
//! These tests verify the fold assignment used by cross-fitting:
//! - Every observation is held out exactly once
//! - Fold sizes are balanced
//! - Partitions are reproducible from the seed
//! - Caller-supplied labels are validated
//!
//! ## Test Organization
//!
//! 1. **Partition Properties** - Completeness, balance and ordering
//! 2. **Reproducibility** - Same seed, same folds
//! 3. **Caller Labels** - Validation of external fold labels
//! 4. **Training Sets** - Complements of held-out folds

use dml::internals::algorithms::folds::FoldAssignment;
use dml::internals::primitives::errors::DmlError;

// ============================================================================
// Partition Properties Tests
// ============================================================================

/// Test that every index is held out exactly once.
///
/// Verifies completeness and disjointness for all K in [2, n].
#[test]
fn test_partition_is_complete_and_disjoint() {
    for n in [2usize, 3, 7, 10, 23] {
        for k in 2..=n {
            let folds = FoldAssignment::partition(n, k, 42).unwrap();
            assert_eq!(folds.n_folds(), k);
            assert_eq!(folds.n_obs(), n);

            let mut seen = vec![0usize; n];
            for fold in 0..k {
                for &i in folds.test_indices(fold) {
                    seen[i] += 1;
                    assert_eq!(folds.fold_of(i), fold);
                }
            }
            assert!(seen.iter().all(|&c| c == 1), "n={n}, k={k}: {seen:?}");
        }
    }
}

/// Test that fold sizes differ by at most one.
///
/// Verifies the first n % k folds carry the extra observation.
#[test]
fn test_partition_sizes_are_balanced() {
    let folds = FoldAssignment::partition(23, 5, 1).unwrap();
    assert_eq!(folds.fold_sizes(), vec![5, 5, 5, 4, 4]);

    for n in [10usize, 11, 99, 100] {
        for k in [2usize, 3, 5, 10] {
            let sizes = FoldAssignment::partition(n, k, 9).unwrap().fold_sizes();
            let min = *sizes.iter().min().unwrap();
            let max = *sizes.iter().max().unwrap();
            assert!(max - min <= 1, "n={n}, k={k}: {sizes:?}");
            assert_eq!(sizes.iter().sum::<usize>(), n);
        }
    }
}

/// Test that held-out indices are stored in ascending order.
#[test]
fn test_partition_test_indices_sorted() {
    let folds = FoldAssignment::partition(50, 4, 3).unwrap();
    for fold in 0..4 {
        let idx = folds.test_indices(fold);
        assert!(idx.windows(2).all(|w| w[0] < w[1]));
    }
}

/// Test leave-one-out partitioning.
///
/// Verifies K = n yields singleton folds.
#[test]
fn test_partition_leave_one_out() {
    let folds = FoldAssignment::partition(6, 6, 0).unwrap();
    assert_eq!(folds.fold_sizes(), vec![1; 6]);
}

/// Test invalid fold counts.
///
/// Verifies K < 2 and K > n are rejected.
#[test]
fn test_partition_invalid_folds() {
    assert_eq!(
        FoldAssignment::partition(10, 1, 0),
        Err(DmlError::InvalidFolds { folds: 1, n_obs: 10 })
    );
    assert_eq!(
        FoldAssignment::partition(3, 4, 0),
        Err(DmlError::InvalidFolds { folds: 4, n_obs: 3 })
    );
}

// ============================================================================
// Reproducibility Tests
// ============================================================================

/// Test that the same seed gives the same partition.
#[test]
fn test_partition_reproducible() {
    let a = FoldAssignment::partition(200, 5, 123).unwrap();
    let b = FoldAssignment::partition(200, 5, 123).unwrap();
    assert_eq!(a, b);
}

/// Test that different seeds give different partitions.
#[test]
fn test_partition_seed_changes_folds() {
    let a = FoldAssignment::partition(200, 5, 1).unwrap();
    let b = FoldAssignment::partition(200, 5, 2).unwrap();
    assert_ne!(a.labels(), b.labels());
}

// ============================================================================
// Caller Labels Tests
// ============================================================================

/// Test building folds from explicit labels.
#[test]
fn test_from_labels_valid() {
    let folds = FoldAssignment::from_labels(vec![1, 0, 1, 0, 2], 3).unwrap();
    assert_eq!(folds.test_indices(0), &[1, 3]);
    assert_eq!(folds.test_indices(1), &[0, 2]);
    assert_eq!(folds.test_indices(2), &[4]);
    assert_eq!(folds.labels(), &[1, 0, 1, 0, 2]);
}

/// Test label outside [0, k).
#[test]
fn test_from_labels_out_of_range() {
    let err = FoldAssignment::from_labels(vec![0, 1, 2], 2).unwrap_err();
    assert!(matches!(err, DmlError::InvalidFoldAssignment(_)));
}

/// Test a fold with no observations.
#[test]
fn test_from_labels_empty_fold() {
    let err = FoldAssignment::from_labels(vec![0, 0, 2, 2], 3).unwrap_err();
    match err {
        DmlError::InvalidFoldAssignment(msg) => assert!(msg.contains("fold 1")),
        other => panic!("unexpected error: {other:?}"),
    }
}

/// Test too few folds in caller labels.
#[test]
fn test_from_labels_single_fold() {
    let err = FoldAssignment::from_labels(vec![0, 0, 0], 1).unwrap_err();
    assert_eq!(err, DmlError::InvalidFolds { folds: 1, n_obs: 3 });
}

// ============================================================================
// Training Set Tests
// ============================================================================

/// Test that training indices are the complement of the held-out fold.
#[test]
fn test_train_indices_complement() {
    let folds = FoldAssignment::partition(31, 4, 8).unwrap();
    let mut train = Vec::new();
    for fold in 0..4 {
        folds.train_indices_into(fold, &mut train);
        let test = folds.test_indices(fold);
        assert_eq!(train.len() + test.len(), 31);
        assert!(!train.is_empty());
        assert!(train.iter().all(|i| !test.contains(i)));
        assert!(train.windows(2).all(|w| w[0] < w[1]));
    }
}
