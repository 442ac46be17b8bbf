//! Input validation for DML configuration and data.
//!
//! ## Purpose
//!
//! This module checks configuration parameters and input columns before
//! any learner is called, so that invalid input never reaches numeric work.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Two stages**: data-independent checks run in `build()`, checks that
//!   need the number of observations run at the start of `fit()`.
//!
//! ## Invariants
//!
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not repair or impute invalid inputs.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{format, string::ToString};
#[cfg(feature = "std")]
use std::{format, string::ToString};

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::folds::FoldAssignment;
use crate::primitives::errors::DmlError;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for DML configuration and input data.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Configuration Validation
    // ========================================================================

    /// Validate the number of folds without knowledge of the data.
    pub fn validate_folds(folds: usize) -> Result<(), DmlError> {
        if folds < 2 {
            return Err(DmlError::InvalidFolds { folds, n_obs: 0 });
        }
        Ok(())
    }

    /// Validate the number of folds against the number of observations.
    pub fn validate_folds_for_data(folds: usize, n_obs: usize) -> Result<(), DmlError> {
        if folds < 2 || folds > n_obs {
            return Err(DmlError::InvalidFolds { folds, n_obs });
        }
        Ok(())
    }

    /// Validate the number of cross-fitting repetitions.
    pub fn validate_repetitions(n_rep: usize) -> Result<(), DmlError> {
        if n_rep == 0 {
            return Err(DmlError::InvalidRepetitions(n_rep));
        }
        Ok(())
    }

    /// Validate a confidence level in (0, 1).
    pub fn validate_confidence_level<T: Float>(level: T) -> Result<(), DmlError> {
        if !(level > T::zero() && level < T::one()) {
            return Err(DmlError::InvalidConfidenceLevel(
                level.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate caller-supplied sample splits against each other.
    pub fn validate_sample_splitting(
        assignments: &[FoldAssignment],
        n_folds: usize,
        n_rep: usize,
    ) -> Result<(), DmlError> {
        // Check 1: One assignment per repetition
        if assignments.len() != n_rep {
            return Err(DmlError::InvalidFoldAssignment(format!(
                "{} fold assignments given for {n_rep} repetitions",
                assignments.len()
            )));
        }

        // Check 2: Same fold count everywhere
        for (r, a) in assignments.iter().enumerate() {
            if a.n_folds() != n_folds {
                return Err(DmlError::InvalidFoldAssignment(format!(
                    "assignment {r} has {} folds, expected {n_folds}",
                    a.n_folds()
                )));
            }
        }

        // Check 3: Same number of observations everywhere
        if let Some(first) = assignments.first() {
            if assignments.iter().any(|a| a.n_obs() != first.n_obs()) {
                return Err(DmlError::InvalidFoldAssignment(
                    "fold assignments cover different numbers of observations".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Validate that caller-supplied sample splits match the data.
    pub fn validate_assignments_for_data(
        assignments: &[FoldAssignment],
        n_obs: usize,
    ) -> Result<(), DmlError> {
        for (r, a) in assignments.iter().enumerate() {
            if a.n_obs() != n_obs {
                return Err(DmlError::InvalidFoldAssignment(format!(
                    "assignment {r} covers {} observations, data has {n_obs}",
                    a.n_obs()
                )));
            }
        }
        Ok(())
    }

    /// Validate that no parameter was set twice.
    pub fn validate_no_duplicates(duplicate_param: Option<&'static str>) -> Result<(), DmlError> {
        if let Some(param) = duplicate_param {
            return Err(DmlError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }

    // ========================================================================
    // Data Validation
    // ========================================================================

    /// Validate that every value of a column is finite.
    pub fn validate_finite<T: Float>(column: &str, values: &[T]) -> Result<(), DmlError> {
        if let Some(row) = values.iter().position(|v| !v.is_finite()) {
            return Err(DmlError::NonFiniteValue {
                column: column.to_string(),
                row,
            });
        }
        Ok(())
    }
}
