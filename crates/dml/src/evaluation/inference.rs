//! Asymptotic normal inference for the treatment effect.
//!
//! ## Purpose
//!
//! Given θ̂ and the linear score, this module computes the sandwich
//! variance, the standard error and a two-sided normal confidence interval.
//!
//! ## Key concepts
//!
//! * **Sandwich variance**: `σ̂² = mean(ψ²) / mean(ψ_a)²` with
//!   `ψ_i = ψ_a,i·θ̂ + ψ_b,i`. For the partialling-out score this equals
//!   `(1/n) Σ ψ² / ((1/n) Σ ṽ²)²`.
//! * **Standard error**: `se = √(σ̂² / n)`.
//! * **Interval**: `θ̂ ± z_{(1+level)/2} · se`.
//!
//! ## Invariants
//!
//! * `ci_lower <= coefficient <= ci_upper` whenever `se` is finite.
//! * `p_value` lies in `[0, 1]`.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::score::LinearScore;
use crate::math::normal::{two_sided_p_value, z_critical};

// ============================================================================
// Inference Result
// ============================================================================

/// Point estimate with its normal-approximation inference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inference<T> {
    /// Estimated coefficient θ̂.
    pub coefficient: T,

    /// Standard error of θ̂.
    pub std_error: T,

    /// `θ̂ / se`.
    pub t_stat: T,

    /// Two-sided p-value of `H0: θ = 0`.
    pub p_value: T,

    /// Lower confidence bound.
    pub ci_lower: T,

    /// Upper confidence bound.
    pub ci_upper: T,

    /// Confidence level of the interval.
    pub confidence_level: T,
}

impl<T: Float> Inference<T> {
    /// Inference for θ̂ from the score it solves.
    pub fn from_score(theta: T, score: &LinearScore<T>, level: T) -> Self {
        let se = Self::standard_error(theta, score);
        Self::from_estimate(theta, se, level)
    }

    /// Sandwich standard error of θ̂.
    pub fn standard_error(theta: T, score: &LinearScore<T>) -> T {
        let n = score.len();
        if n == 0 {
            return T::nan();
        }
        let n_t = T::from(n).unwrap_or(T::one());

        let mut sum_psi_sq = T::zero();
        let mut sum_psi_a = T::zero();
        for (&a, &b) in score.psi_a().iter().zip(score.psi_b()) {
            let psi = a * theta + b;
            sum_psi_sq = sum_psi_sq + psi * psi;
            sum_psi_a = sum_psi_a + a;
        }

        let j = sum_psi_a / n_t;
        let sigma2 = (sum_psi_sq / n_t) / (j * j);
        (sigma2 / n_t).sqrt()
    }

    /// Inference from a point estimate and its standard error.
    pub fn from_estimate(theta: T, se: T, level: T) -> Self {
        let z = z_critical(level);
        let t_stat = theta / se;
        Self {
            coefficient: theta,
            std_error: se,
            t_stat,
            p_value: two_sided_p_value(t_stat),
            ci_lower: theta - z * se,
            ci_upper: theta + z * se,
            confidence_level: level,
        }
    }
}
