//! Column roles and nuisance targets.
//!
//! ## Purpose
//!
//! This module names the parts of a PLR dataset: which column is the
//! outcome, which is the treatment, and which are covariates. It also names
//! the nuisance functions that are estimated by cross-fitting.
//!
//! ## Invariants
//!
//! * Role labels are plain column names; existence is checked by the dataset adapter.
//! * An empty covariate list means "every other column".

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{
    string::{String, ToString},
    vec::Vec,
};
#[cfg(feature = "std")]
use std::{
    string::{String, ToString},
    vec::Vec,
};

// External dependencies
use core::fmt::{Display, Formatter, Result};

// ============================================================================
// Column Roles
// ============================================================================

/// Role a column plays in the partially linear model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    /// The outcome `Y`.
    Outcome,

    /// The treatment `D`.
    Treatment,

    /// A confounder in `X`.
    Covariate,
}

impl Display for ColumnRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::Outcome => f.write_str("outcome"),
            Self::Treatment => f.write_str("treatment"),
            Self::Covariate => f.write_str("covariate"),
        }
    }
}

/// Column role labels used to build a [`Dataset`](crate::adapters::dataset::Dataset).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRoles {
    /// Outcome column name.
    pub outcome: String,

    /// Treatment column name.
    pub treatment: String,

    /// Covariate column names, in the order they are given to learners.
    pub covariates: Vec<String>,
}

impl ColumnRoles {
    /// Label the outcome and treatment columns; covariates default to all other columns.
    pub fn new(outcome: impl Into<String>, treatment: impl Into<String>) -> Self {
        Self {
            outcome: outcome.into(),
            treatment: treatment.into(),
            covariates: Vec::new(),
        }
    }

    /// Label the covariate columns explicitly.
    pub fn covariates<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        self.covariates = names.iter().map(|s| s.as_ref().to_string()).collect();
        self
    }
}

// ============================================================================
// Nuisance Targets
// ============================================================================

/// Nuisance function estimated by cross-fitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NuisanceTarget {
    /// `l(X) = E[Y | X]`.
    Outcome,

    /// `m(X) = E[D | X]`.
    Treatment,

    /// `g(X) = E[Y - θ·D | X]`, only used by the IV-type score.
    AdjustedOutcome,
}

impl NuisanceTarget {
    /// Short learner name, as used in DML literature (`ml_l`, `ml_m`, `ml_g`).
    pub const fn learner_name(&self) -> &'static str {
        match self {
            Self::Outcome => "ml_l",
            Self::Treatment => "ml_m",
            Self::AdjustedOutcome => "ml_g",
        }
    }
}

impl Display for NuisanceTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::Outcome => f.write_str("outcome (ml_l)"),
            Self::Treatment => f.write_str("treatment (ml_m)"),
            Self::AdjustedOutcome => f.write_str("adjusted outcome (ml_g)"),
        }
    }
}
