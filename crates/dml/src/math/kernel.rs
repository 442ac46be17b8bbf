//! Kernel (weight) functions for distance-based weighting.
//!
//! ## Purpose
//!
//! This module provides the kernels used by the nearest-neighbour learner to
//! turn normalized distances into weights.
//!
//! ## Design notes
//!
//! * **Normalization**: Maps distances u = d / bandwidth to weights.
//! * **Support**: All kernels except Gaussian are bounded on [-1, 1].
//!
//! ## Invariants
//!
//! * Kernels are non-negative (K(u) >= 0) and symmetric (K(u) = K(-u)).
//! * Bounded kernels return exactly zero outside their support.
//!
//! ## Non-goals
//!
//! * This module does not perform weight normalization.
//! * This module does not handle bandwidth selection logic.

// External dependencies
use core::fmt::{Display, Formatter, Result};
use num_traits::Float;

/// Cutoff for Gaussian kernel evaluation.
///
/// Beyond this normalized distance the Gaussian kernel value is effectively
/// zero (exp(-6^2/2) approx 1.5e-8).
const GAUSSIAN_CUTOFF: f64 = 6.0;

// ============================================================================
// Weight Function Enum
// ============================================================================

/// Weight function (kernel) for neighbour weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeightFunction {
    /// Epanechnikov kernel: K(u) = (1 - u^2) for |u| < 1.
    Epanechnikov,

    /// Gaussian kernel: K(u) = exp(-u^2 / 2).
    Gaussian,

    /// Biweight (quartic) kernel: K(u) = (1 - u^2)^2 for |u| < 1.
    Biweight,

    /// Tricube kernel: K(u) = (1 - |u|^3)^3 for |u| < 1.
    #[default]
    Tricube,

    /// Uniform (rectangular) kernel: K(u) = 1 for |u| < 1.
    Uniform,
}

impl WeightFunction {
    /// Get the name of the weight function.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            WeightFunction::Epanechnikov => "Epanechnikov",
            WeightFunction::Gaussian => "Gaussian",
            WeightFunction::Biweight => "Biweight",
            WeightFunction::Tricube => "Tricube",
            WeightFunction::Uniform => "Uniform",
        }
    }

    /// Returns `true` if the kernel has bounded support on [-1, 1].
    #[inline]
    pub fn is_bounded(&self) -> bool {
        !matches!(self, WeightFunction::Gaussian)
    }

    /// Compute the unnormalized weight K(u) for a given normalized distance.
    #[inline]
    pub fn compute_weight<T: Float>(&self, u: T) -> T {
        let abs_u = u.abs();

        if self.is_bounded() && abs_u >= T::one() {
            return T::zero();
        }

        match self {
            WeightFunction::Epanechnikov => T::one() - abs_u * abs_u,

            WeightFunction::Gaussian => {
                let u_f64 = abs_u.to_f64().unwrap_or(f64::INFINITY);
                if u_f64 > GAUSSIAN_CUTOFF {
                    T::zero()
                } else {
                    T::from(Float::exp(-0.5 * u_f64 * u_f64)).unwrap_or_else(T::zero)
                }
            }

            WeightFunction::Biweight => {
                let tmp = T::one() - abs_u * abs_u;
                tmp * tmp
            }

            WeightFunction::Tricube => {
                let tmp = T::one() - abs_u * abs_u * abs_u;
                tmp * tmp * tmp
            }

            WeightFunction::Uniform => T::one(),
        }
    }
}

impl Display for WeightFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(self.name())
    }
}
