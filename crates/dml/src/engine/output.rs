//! Output types for DML estimation.
//!
//! ## Purpose
//!
//! This module defines [`EffectEstimate`], the record returned to the
//! caller: the aggregated coefficient with its inference, the fold
//! configuration that produced it, and optional per-repetition detail.
//!
//! ## Design notes
//!
//! * **Optional Outputs**: predictions, scores and diagnostics are only
//!   populated when requested on the builder.
//! * **Ergonomics**: Implements `Display` as a summary table.
//!
//! ## Invariants
//!
//! * `coefficients.len() == std_errors.len() == n_rep`.
//! * `ci_lower <= coefficient <= ci_upper`.
//!
//! ## Non-goals
//!
//! * This module does not perform calculations beyond re-deriving intervals.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{format, string::String, vec::Vec};
#[cfg(feature = "std")]
use std::{format, string::String, vec::Vec};

// External dependencies
use core::fmt::{Debug, Display, Formatter, Result};
use num_traits::Float;

// Internal dependencies
use crate::algorithms::score::ScoreKind;
use crate::engine::executor::NuisancePredictions;
use crate::engine::validator::Validator;
use crate::evaluation::aggregation::Aggregation;
use crate::evaluation::diagnostics::NuisanceDiagnostics;
use crate::evaluation::inference::Inference;
use crate::primitives::errors::DmlError;

// ============================================================================
// Result Structure
// ============================================================================

/// Estimated treatment effect with inference.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectEstimate<T> {
    /// Name of the treatment column.
    pub treatment: String,

    /// Estimated coefficient θ̂.
    pub coefficient: T,

    /// Standard error of θ̂.
    pub std_error: T,

    /// Lower confidence bound.
    pub ci_lower: T,

    /// Upper confidence bound.
    pub ci_upper: T,

    /// `θ̂ / se`.
    pub t_stat: T,

    /// Two-sided p-value of `H0: θ = 0`.
    pub p_value: T,

    /// Level of the confidence interval.
    pub confidence_level: T,

    /// Number of observations.
    pub n_obs: usize,

    /// Number of folds.
    pub n_folds: usize,

    /// Number of cross-fitting repetitions.
    pub n_rep: usize,

    /// Score that was solved.
    pub score: ScoreKind,

    /// Policy used to combine repetitions.
    pub aggregation: Aggregation,

    /// Coefficient of each repetition.
    pub coefficients: Vec<T>,

    /// Standard error of each repetition.
    pub std_errors: Vec<T>,

    /// Out-of-fold nuisance predictions of each repetition.
    pub predictions: Option<Vec<NuisancePredictions<T>>>,

    /// Score values `ψ_i(θ̂_r)` of each repetition.
    pub scores: Option<Vec<Vec<T>>>,

    /// Nuisance fit quality of each repetition.
    pub diagnostics: Option<Vec<Vec<NuisanceDiagnostics<T>>>>,
}

impl<T: Float> EffectEstimate<T> {
    /// Confidence interval at another `level`.
    pub fn confint(&self, level: T) -> core::result::Result<(T, T), DmlError> {
        Validator::validate_confidence_level(level)?;
        let inf = Inference::from_estimate(self.coefficient, self.std_error, level);
        Ok((inf.ci_lower, inf.ci_upper))
    }

    /// Check if `value` lies inside the reported confidence interval.
    pub fn covers(&self, value: T) -> bool {
        self.ci_lower <= value && value <= self.ci_upper
    }

    /// Returns `true` if per-repetition nuisance predictions are available.
    pub fn has_predictions(&self) -> bool {
        self.predictions.is_some()
    }

    /// Returns `true` if per-repetition score values are available.
    pub fn has_scores(&self) -> bool {
        self.scores.is_some()
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl<T: Float + Display + Debug> Display for EffectEstimate<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Model:        Partially linear regression")?;
        writeln!(f, "  Score:        {}", self.score)?;
        writeln!(f, "  Observations: {}", self.n_obs)?;
        writeln!(f, "  Folds:        {}", self.n_folds)?;
        writeln!(f, "  Repetitions:  {}", self.n_rep)?;
        if self.n_rep > 1 {
            writeln!(f, "  Aggregation:  {}", self.aggregation)?;
        }
        writeln!(f)?;

        let level = self.confidence_level.to_f64().unwrap_or(0.95);
        let tail = (1.0 - level) / 2.0 * 100.0;
        let lower_label = format_percent(tail);
        let upper_label = format_percent(100.0 - tail);

        writeln!(f, "Coefficient:")?;
        writeln!(
            f,
            "{:>10} {:>12} {:>12} {:>10} {:>10} {:>12} {:>12}",
            "", "coef", "std err", "t", "P>|t|", lower_label.as_str(), upper_label.as_str()
        )?;
        writeln!(f, "  {}", "-".repeat(82))?;
        writeln!(
            f,
            "{:>10} {:>12.6} {:>12.6} {:>10.4} {:>10.4} {:>12.6} {:>12.6}",
            truncate(&self.treatment, 10),
            self.coefficient,
            self.std_error,
            self.t_stat,
            self.p_value,
            self.ci_lower,
            self.ci_upper
        )?;

        if let Some(diagnostics) = &self.diagnostics {
            writeln!(f)?;
            writeln!(f, "Nuisance Diagnostics:")?;
            for (r, rep) in diagnostics.iter().enumerate() {
                if diagnostics.len() > 1 {
                    writeln!(f, "  Repetition {r}:")?;
                }
                for diag in rep {
                    writeln!(f, "  {diag}")?;
                }
            }
        }

        Ok(())
    }
}

fn format_percent(p: f64) -> String {
    if Float::abs(Float::fract(p * 10.0)) < 1e-9 {
        format!("{p:.1} %")
    } else {
        format!("{p:.2} %")
    }
}

fn truncate(name: &str, width: usize) -> &str {
    match name.char_indices().nth(width) {
        Some((idx, _)) => &name[..idx],
        None => name,
    }
}
