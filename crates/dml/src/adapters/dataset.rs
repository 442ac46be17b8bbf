//! Tabular input and validated datasets.
//!
//! ## Purpose
//!
//! This module turns a caller-owned columnar table plus column role labels
//! into an immutable [`Dataset`]: one outcome, one treatment and a
//! row-major covariate matrix, all validated and finite.
//!
//! ## Design notes
//!
//! * **Table trait**: any column store implementing [`Table`] can be used.
//!   Implementations are provided for maps and lists of named columns.
//! * **Copying**: the dataset owns copies of the labeled columns; the
//!   caller's table is never modified.
//! * **Default covariates**: without explicit covariate labels every column
//!   not used as outcome or treatment is a covariate, in table order.
//!
//! ## Invariants
//!
//! * All labeled columns exist, are assigned a single role, and have the same length.
//! * The dataset has at least one row and contains only finite values.
//!
//! ## Non-goals
//!
//! * This module does not impute missing values.
//! * This module does not encode categorical columns.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{
    borrow::Cow,
    collections::BTreeMap,
    format,
    string::{String, ToString},
    vec::Vec,
};
#[cfg(feature = "std")]
use std::{
    borrow::Cow,
    collections::{BTreeMap, HashMap},
    format,
    string::{String, ToString},
    vec::Vec,
};

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::engine::validator::Validator;
use crate::primitives::errors::DmlError;
use crate::primitives::matrix::Features;
use crate::primitives::roles::{ColumnRole, ColumnRoles};

// ============================================================================
// Table Abstraction
// ============================================================================

/// A columnar table of named numeric columns.
pub trait Table<T: Clone> {
    /// Column names in table order.
    fn column_names(&self) -> Vec<String>;

    /// Values of the named column, or `None` if it does not exist.
    fn column(&self, name: &str) -> Option<Cow<'_, [T]>>;
}

impl<T: Clone> Table<T> for BTreeMap<String, Vec<T>> {
    fn column_names(&self) -> Vec<String> {
        self.keys().cloned().collect()
    }

    fn column(&self, name: &str) -> Option<Cow<'_, [T]>> {
        self.get(name).map(|c| Cow::Borrowed(c.as_slice()))
    }
}

/// Column names are reported in sorted order so that default covariates are deterministic.
#[cfg(feature = "std")]
impl<T: Clone, S: std::hash::BuildHasher> Table<T> for HashMap<String, Vec<T>, S> {
    fn column_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.keys().cloned().collect();
        names.sort();
        names
    }

    fn column(&self, name: &str) -> Option<Cow<'_, [T]>> {
        self.get(name).map(|c| Cow::Borrowed(c.as_slice()))
    }
}

impl<T: Clone, S: AsRef<str>> Table<T> for [(S, Vec<T>)] {
    fn column_names(&self) -> Vec<String> {
        self.iter().map(|(n, _)| n.as_ref().to_string()).collect()
    }

    fn column(&self, name: &str) -> Option<Cow<'_, [T]>> {
        self.iter()
            .find(|(n, _)| n.as_ref() == name)
            .map(|(_, c)| Cow::Borrowed(c.as_slice()))
    }
}

impl<T: Clone, S: AsRef<str>> Table<T> for Vec<(S, Vec<T>)> {
    fn column_names(&self) -> Vec<String> {
        self.as_slice().column_names()
    }

    fn column(&self, name: &str) -> Option<Cow<'_, [T]>> {
        self.as_slice().column(name)
    }
}

impl<T: Clone, S: AsRef<str>, const N: usize> Table<T> for [(S, Vec<T>); N] {
    fn column_names(&self) -> Vec<String> {
        self.as_slice().column_names()
    }

    fn column(&self, name: &str) -> Option<Cow<'_, [T]>> {
        self.as_slice().column(name)
    }
}

impl<'a, T: Clone, S: AsRef<str>> Table<T> for [(S, &'a [T])] {
    fn column_names(&self) -> Vec<String> {
        self.iter().map(|(n, _)| n.as_ref().to_string()).collect()
    }

    fn column(&self, name: &str) -> Option<Cow<'_, [T]>> {
        self.iter()
            .find(|(n, _)| n.as_ref() == name)
            .map(|(_, c)| Cow::Borrowed(*c))
    }
}

// ============================================================================
// Dataset
// ============================================================================

/// Validated, immutable PLR data.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset<T> {
    outcome: Vec<T>,
    treatment: Vec<T>,
    covariates: Vec<T>,
    n_obs: usize,
    n_features: usize,
    outcome_name: String,
    treatment_name: String,
    covariate_names: Vec<String>,
}

impl<T: Float> Dataset<T> {
    /// Extract and validate the labeled columns of `table`.
    pub fn from_table<Tb>(table: &Tb, roles: &ColumnRoles) -> Result<Self, DmlError>
    where
        Tb: Table<T> + ?Sized,
    {
        // Check 1: Each column has a single role
        if roles.outcome == roles.treatment {
            return Err(DmlError::ConflictingRoles {
                column: roles.treatment.clone(),
            });
        }
        for (i, name) in roles.covariates.iter().enumerate() {
            if *name == roles.outcome
                || *name == roles.treatment
                || roles.covariates[..i].contains(name)
            {
                return Err(DmlError::ConflictingRoles {
                    column: name.clone(),
                });
            }
        }

        // Check 2: Labeled columns exist
        let outcome = table
            .column(&roles.outcome)
            .ok_or_else(|| DmlError::MissingColumn {
                role: ColumnRole::Outcome,
                column: roles.outcome.clone(),
            })?;
        let treatment = table
            .column(&roles.treatment)
            .ok_or_else(|| DmlError::MissingColumn {
                role: ColumnRole::Treatment,
                column: roles.treatment.clone(),
            })?;

        let covariate_names: Vec<String> = if roles.covariates.is_empty() {
            table
                .column_names()
                .into_iter()
                .filter(|n| *n != roles.outcome && *n != roles.treatment)
                .collect()
        } else {
            roles.covariates.clone()
        };

        let mut columns = Vec::with_capacity(covariate_names.len());
        for name in &covariate_names {
            let column = table.column(name).ok_or_else(|| DmlError::MissingColumn {
                role: ColumnRole::Covariate,
                column: name.clone(),
            })?;
            columns.push(column);
        }

        // Check 3: Equal lengths
        let n = outcome.len();
        let check_len = |name: &str, len: usize| {
            if len != n {
                Err(DmlError::RaggedTable {
                    column: name.to_string(),
                    expected: n,
                    got: len,
                })
            } else {
                Ok(())
            }
        };
        check_len(&roles.treatment, treatment.len())?;
        for (name, column) in covariate_names.iter().zip(&columns) {
            check_len(name, column.len())?;
        }

        // Check 4: Non-empty
        if n == 0 {
            return Err(DmlError::EmptyInput);
        }

        // Check 5: Finite values
        Validator::validate_finite(&roles.outcome, &outcome)?;
        Validator::validate_finite(&roles.treatment, &treatment)?;
        for (name, column) in covariate_names.iter().zip(&columns) {
            Validator::validate_finite(name, column)?;
        }

        // Column-major to row-major
        let p = columns.len();
        let mut covariates = Vec::with_capacity(n * p);
        for i in 0..n {
            covariates.extend(columns.iter().map(|c| c[i]));
        }

        Ok(Self {
            outcome: outcome.into_owned(),
            treatment: treatment.into_owned(),
            covariates,
            n_obs: n,
            n_features: p,
            outcome_name: roles.outcome.clone(),
            treatment_name: roles.treatment.clone(),
            covariate_names,
        })
    }

    /// Build a dataset from arrays, naming the columns `y`, `d` and `X1..Xp`.
    ///
    /// `covariates` is row-major with `n_features` values per observation.
    pub fn from_arrays(
        outcome: &[T],
        treatment: &[T],
        covariates: &[T],
        n_features: usize,
    ) -> Result<Self, DmlError> {
        let n = outcome.len();
        if treatment.len() != n {
            return Err(DmlError::RaggedTable {
                column: "d".to_string(),
                expected: n,
                got: treatment.len(),
            });
        }
        if covariates.len() != n * n_features {
            return Err(DmlError::RaggedTable {
                column: "X".to_string(),
                expected: n,
                got: if n_features == 0 {
                    0
                } else {
                    covariates.len() / n_features
                },
            });
        }
        if n == 0 {
            return Err(DmlError::EmptyInput);
        }

        Validator::validate_finite("y", outcome)?;
        Validator::validate_finite("d", treatment)?;
        if let Some(pos) = covariates.iter().position(|v| !v.is_finite()) {
            return Err(DmlError::NonFiniteValue {
                column: format!("X{}", pos % n_features + 1),
                row: pos / n_features,
            });
        }

        Ok(Self {
            outcome: outcome.to_vec(),
            treatment: treatment.to_vec(),
            covariates: covariates.to_vec(),
            n_obs: n,
            n_features,
            outcome_name: "y".to_string(),
            treatment_name: "d".to_string(),
            covariate_names: (1..=n_features).map(|j| format!("X{j}")).collect(),
        })
    }

    /// Number of observations.
    #[inline]
    pub fn n_obs(&self) -> usize {
        self.n_obs
    }

    /// Number of covariates.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Outcome values.
    #[inline]
    pub fn outcome(&self) -> &[T] {
        &self.outcome
    }

    /// Treatment values.
    #[inline]
    pub fn treatment(&self) -> &[T] {
        &self.treatment
    }

    /// Covariate matrix.
    #[inline]
    pub fn features(&self) -> Features<'_, T> {
        Features::new(&self.covariates, self.n_obs, self.n_features)
    }

    /// Outcome column name.
    pub fn outcome_name(&self) -> &str {
        &self.outcome_name
    }

    /// Treatment column name.
    pub fn treatment_name(&self) -> &str {
        &self.treatment_name
    }

    /// Covariate column names, in feature order.
    pub fn covariate_names(&self) -> &[String] {
        &self.covariate_names
    }
}
