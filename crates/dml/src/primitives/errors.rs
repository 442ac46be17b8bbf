//! Error types for DML estimation.
//!
//! ## Purpose
//!
//! This module defines every failure an estimation run can report: schema
//! problems with the input table, invalid data values, invalid
//! configuration, learner failures and an unidentified treatment effect.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors carry column names, fold ids and repetition ids.
//! * **Categorized**: Each variant belongs to exactly one [`ErrorKind`].
//! * **Deferred**: Builder misconfiguration is stored and reported by `build()`.
//! * **No-std**: Uses `alloc` for dynamic messages when `std` is disabled.
//!
//! ## Key concepts
//!
//! 1. **Input errors** (schema, data, config): detected before any learner runs.
//! 2. **Learner errors**: propagated from the nuisance capability with the
//!    originating fold, repetition and nuisance target.
//! 3. **Degeneracy errors**: the treatment has no residual variation.
//!
//! ## Invariants
//!
//! * No variant is ever converted into a fallback estimate.
//! * `kind()` is total and stable for every variant.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation itself.
//! * This module does not retry failed learners.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::error::Error;
#[cfg(feature = "std")]
use std::string::String;

// External dependencies
use core::fmt::{Display, Formatter, Result};

// Internal dependencies
use crate::primitives::roles::{ColumnRole, NuisanceTarget};

// ============================================================================
// Error Category
// ============================================================================

/// Coarse category of a [`DmlError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A labeled column is absent, duplicated across roles, or ragged.
    Schema,

    /// The data contains missing or non-finite values, or is empty.
    Data,

    /// The estimator configuration is invalid.
    Config,

    /// A nuisance learner failed during fit or predict.
    Fit,

    /// The treatment effect is not identified.
    Degenerate,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let name = match self {
            Self::Schema => "SchemaError",
            Self::Data => "DataError",
            Self::Config => "ConfigError",
            Self::Fit => "FitError",
            Self::Degenerate => "DegenerateError",
        };
        f.write_str(name)
    }
}

/// Stage of the learner call that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitStage {
    /// Training on the fold complement.
    Fit,

    /// Predicting the held-out fold.
    Predict,
}

impl Display for FitStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::Fit => f.write_str("fit"),
            Self::Predict => f.write_str("predict"),
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

/// Error type for DML operations.
#[derive(Debug, Clone, PartialEq)]
pub enum DmlError {
    /// A column required by a role is not present in the table.
    MissingColumn {
        /// Role the column was labeled with.
        role: ColumnRole,
        /// Name of the missing column.
        column: String,
    },

    /// The same column was labeled with more than one role.
    ConflictingRoles {
        /// Name of the column.
        column: String,
    },

    /// A column has a different number of rows than the outcome column.
    RaggedTable {
        /// Name of the offending column.
        column: String,
        /// Number of rows of the outcome column.
        expected: usize,
        /// Number of rows of the offending column.
        got: usize,
    },

    /// The table has no rows.
    EmptyInput,

    /// A labeled column contains a NaN, infinite, or missing value.
    NonFiniteValue {
        /// Name of the column.
        column: String,
        /// Row of the first offending value.
        row: usize,
    },

    /// Fold count outside `[2, n_obs]`.
    InvalidFolds {
        /// Requested number of folds.
        folds: usize,
        /// Number of observations (0 when not yet known).
        n_obs: usize,
    },

    /// Number of cross-fitting repetitions must be at least 1.
    InvalidRepetitions(usize),

    /// Confidence level must be strictly between 0 and 1.
    InvalidConfidenceLevel(f64),

    /// A caller-supplied fold assignment is inconsistent with the data.
    InvalidFoldAssignment(String),

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },

    /// A nuisance learner failed during fit or predict.
    LearnerFailed {
        /// Nuisance function being estimated.
        target: NuisanceTarget,
        /// Held-out fold whose complement was being used.
        fold: usize,
        /// Cross-fitting repetition.
        repetition: usize,
        /// Whether `fit` or `predict` failed.
        stage: FitStage,
        /// Message reported by the learner.
        message: String,
    },

    /// The treatment has no residual variation after orthogonalization.
    Degenerate {
        /// Cross-fitting repetition.
        repetition: usize,
        /// Value of the score denominator that was found to be zero.
        denominator: f64,
    },
}

impl DmlError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingColumn { .. } | Self::ConflictingRoles { .. } | Self::RaggedTable { .. } => {
                ErrorKind::Schema
            }
            Self::EmptyInput | Self::NonFiniteValue { .. } => ErrorKind::Data,
            Self::InvalidFolds { .. }
            | Self::InvalidRepetitions(_)
            | Self::InvalidConfidenceLevel(_)
            | Self::InvalidFoldAssignment(_)
            | Self::DuplicateParameter { .. } => ErrorKind::Config,
            Self::LearnerFailed { .. } => ErrorKind::Fit,
            Self::Degenerate { .. } => ErrorKind::Degenerate,
        }
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for DmlError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}: ", self.kind())?;
        match self {
            Self::MissingColumn { role, column } => {
                write!(f, "{role} column '{column}' not found in table")
            }
            Self::ConflictingRoles { column } => {
                write!(f, "column '{column}' is assigned to more than one role")
            }
            Self::RaggedTable {
                column,
                expected,
                got,
            } => write!(
                f,
                "column '{column}' has {got} rows, expected {expected}"
            ),
            Self::EmptyInput => write!(f, "input table has no rows"),
            Self::NonFiniteValue { column, row } => {
                write!(f, "column '{column}' has a missing or non-finite value at row {row}")
            }
            Self::InvalidFolds { folds, n_obs } => {
                if *n_obs == 0 {
                    write!(f, "invalid number of folds: {folds} (must be at least 2)")
                } else {
                    write!(
                        f,
                        "invalid number of folds: {folds} (must be in [2, {n_obs}])"
                    )
                }
            }
            Self::InvalidRepetitions(n_rep) => {
                write!(f, "invalid number of repetitions: {n_rep} (must be >= 1)")
            }
            Self::InvalidConfidenceLevel(level) => {
                write!(f, "invalid confidence level: {level} (must be > 0 and < 1)")
            }
            Self::InvalidFoldAssignment(msg) => write!(f, "invalid fold assignment: {msg}"),
            Self::DuplicateParameter { parameter } => write!(
                f,
                "parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
            ),
            Self::LearnerFailed {
                target,
                fold,
                repetition,
                stage,
                message,
            } => write!(
                f,
                "learner for {target} failed during {stage} (fold {fold}, repetition {repetition}): {message}"
            ),
            Self::Degenerate {
                repetition,
                denominator,
            } => write!(
                f,
                "treatment has no residual variation after orthogonalization \
                 (repetition {repetition}, denominator {denominator:e}); effect is not identified"
            ),
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

#[cfg(feature = "std")]
impl Error for DmlError {}
