//! Dense symmetric positive-definite solves.
//!
//! ## Purpose
//!
//! Least squares learners solve the normal equations `A β = b` with
//! `A = XᵀX (+ λI)`. `A` is small (covariates × covariates), so an in-place
//! Cholesky factorization is sufficient.
//!
//! ## Invariants
//!
//! * Matrices are square, row-major, and only the lower triangle is read.
//! * A pivot below `tol · max(diag(A))` is reported as a singular system.
//!
//! ## Non-goals
//!
//! * This module does not pivot or handle indefinite systems.

// External dependencies
use num_traits::Float;

/// Factorize `a` (p × p, row-major) in place into its lower Cholesky factor.
///
/// Returns `false` if the matrix is not numerically positive definite.
pub fn cholesky_in_place<T: Float>(a: &mut [T], p: usize, tol: T) -> bool {
    debug_assert_eq!(a.len(), p * p);

    let max_diag = (0..p).fold(T::zero(), |acc, i| acc.max(a[i * p + i].abs()));
    let threshold = tol * max_diag;

    for j in 0..p {
        let mut diag = a[j * p + j];
        for k in 0..j {
            diag = diag - a[j * p + k] * a[j * p + k];
        }
        if !(diag > threshold) {
            return false;
        }
        let l_jj = diag.sqrt();
        a[j * p + j] = l_jj;

        for i in (j + 1)..p {
            let mut s = a[i * p + j];
            for k in 0..j {
                s = s - a[i * p + k] * a[j * p + k];
            }
            a[i * p + j] = s / l_jj;
        }
    }
    true
}

/// Solve `L Lᵀ x = b` in place given the lower Cholesky factor `l`.
pub fn cholesky_solve<T: Float>(l: &[T], p: usize, b: &mut [T]) {
    debug_assert_eq!(b.len(), p);

    // Forward substitution: L z = b
    for i in 0..p {
        let mut s = b[i];
        for k in 0..i {
            s = s - l[i * p + k] * b[k];
        }
        b[i] = s / l[i * p + i];
    }

    // Back substitution: Lᵀ x = z
    for i in (0..p).rev() {
        let mut s = b[i];
        for k in (i + 1)..p {
            s = s - l[k * p + i] * b[k];
        }
        b[i] = s / l[i * p + i];
    }
}
