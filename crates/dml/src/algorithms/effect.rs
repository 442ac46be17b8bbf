//! Moment condition solver.
//!
//! ## Purpose
//!
//! Solves `Σ ψ_i(θ) = 0` for a linear score, i.e.
//! `θ̂ = −Σ ψ_b / Σ ψ_a`. For the partialling-out score this is
//! `θ̂ = Σ ṽ·ũ / Σ ṽ²`.
//!
//! ## Invariants
//!
//! * A denominator that is numerically zero relative to the treatment's
//!   own variation is reported as [`DmlError::Degenerate`], never as a zero
//!   or infinite effect.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::score::LinearScore;
use crate::math::stats::{centered_sum_sq, sum};
use crate::primitives::errors::DmlError;

/// Relative size below which the score denominator is treated as zero.
pub const DEGENERACY_TOLERANCE: f64 = 1e-10;

/// Solve the linear moment condition of `score` for θ.
///
/// `treatment` is the raw treatment column; its centered sum of squares
/// sets the scale of the degeneracy check.
pub fn solve_effect<T: Float>(
    score: &LinearScore<T>,
    treatment: &[T],
    repetition: usize,
) -> Result<T, DmlError> {
    let denominator = sum(score.psi_a());
    let scale = centered_sum_sq(treatment);
    let tol = T::from(DEGENERACY_TOLERANCE).unwrap_or(T::epsilon());

    let degenerate = !denominator.is_finite()
        || !(scale > T::zero())
        || denominator.abs() <= tol * scale;

    if degenerate {
        return Err(DmlError::Degenerate {
            repetition,
            denominator: denominator.to_f64().unwrap_or(f64::NAN),
        });
    }

    Ok(-sum(score.psi_b()) / denominator)
}
