//! Summary statistics over float slices.
//!
//! Medians use Quickselect (`select_nth_unstable_by`) on a scratch copy, so
//! the callers' data is never reordered.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::cmp::Ordering::Equal;
use num_traits::Float;

/// Arithmetic mean; zero for an empty slice.
#[inline]
pub fn mean<T: Float>(vals: &[T]) -> T {
    if vals.is_empty() {
        return T::zero();
    }
    let n = T::from(vals.len()).unwrap_or(T::one());
    sum(vals) / n
}

/// Sum of all values.
#[inline]
pub fn sum<T: Float>(vals: &[T]) -> T {
    vals.iter().fold(T::zero(), |acc, &v| acc + v)
}

/// Sum of element-wise products.
#[inline]
pub fn dot<T: Float>(a: &[T], b: &[T]) -> T {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .fold(T::zero(), |acc, (&x, &y)| acc + x * y)
}

/// Sum of squared deviations from the mean.
#[inline]
pub fn centered_sum_sq<T: Float>(vals: &[T]) -> T {
    let m = mean(vals);
    vals.iter().fold(T::zero(), |acc, &v| {
        let d = v - m;
        acc + d * d
    })
}

/// Median of `vals`; zero for an empty slice.
pub fn median<T: Float>(vals: &[T]) -> T {
    let mut scratch: Vec<T> = vals.to_vec();
    median_inplace(&mut scratch)
}

/// Median computed in place using Quickselect (reorders `vals`).
pub fn median_inplace<T: Float>(vals: &mut [T]) -> T {
    let n = vals.len();
    if n == 0 {
        return T::zero();
    }

    let mid = n / 2;
    vals.select_nth_unstable_by(mid, |a, b| a.partial_cmp(b).unwrap_or(Equal));
    let upper = vals[mid];

    if n % 2 == 1 {
        return upper;
    }

    // Even length: the lower middle is the maximum of the left partition
    let lower = vals[..mid]
        .iter()
        .copied()
        .fold(T::neg_infinity(), T::max);
    (lower + upper) / (T::one() + T::one())
}
