//! Input abstractions for DML estimation.
//!
//! ## Purpose
//!
//! This module lets the parallel estimator consume `ndarray` data
//! directly: vectors and 1-D arrays for the outcome and treatment, 2-D
//! arrays for covariates, and 2-D arrays with a header as a named table.
//!
//! ## Design notes
//!
//! * **Zero-copy where possible**: contiguous data is borrowed; strided
//!   views are copied in logical order.
//! * **Interoperability**: bridges standard Rust collections with `ndarray`.
//!
//! ## Invariants
//!
//! * Returned values cover all elements in logical (row-major) order.
//!
//! ## Non-goals
//!
//! * This module does not perform data cleaning or imputation.

// External dependencies
use ndarray::{ArrayBase, ArrayView2, Data, Ix1, Ix2};
use num_traits::Float;
use std::borrow::Cow;

// Export dependencies from dml crate
use dml::internals::adapters::dataset::Table;
use dml::internals::primitives::errors::DmlError;

// ============================================================================
// One-Dimensional Inputs
// ============================================================================

/// Trait for types that can be used as an outcome or treatment column.
pub trait DmlInput<T: Float> {
    /// Values in order, borrowed when contiguous.
    fn as_dml_values(&self) -> Cow<'_, [T]>;
}

impl<T: Float> DmlInput<T> for [T] {
    fn as_dml_values(&self) -> Cow<'_, [T]> {
        Cow::Borrowed(self)
    }
}

impl<T: Float> DmlInput<T> for Vec<T> {
    fn as_dml_values(&self) -> Cow<'_, [T]> {
        Cow::Borrowed(self.as_slice())
    }
}

impl<T: Float, S> DmlInput<T> for ArrayBase<S, Ix1>
where
    S: Data<Elem = T>,
{
    fn as_dml_values(&self) -> Cow<'_, [T]> {
        match self.as_slice() {
            Some(slice) => Cow::Borrowed(slice),
            None => Cow::Owned(self.iter().copied().collect()),
        }
    }
}

// ============================================================================
// Two-Dimensional Inputs
// ============================================================================

/// Trait for types that can be used as a covariate matrix.
pub trait DmlMatrix<T: Float> {
    /// `(rows, columns)`.
    fn dml_shape(&self) -> (usize, usize);

    /// Row-major values, borrowed when already in standard layout.
    fn as_row_major(&self) -> Cow<'_, [T]>;
}

impl<T: Float, S> DmlMatrix<T> for ArrayBase<S, Ix2>
where
    S: Data<Elem = T>,
{
    fn dml_shape(&self) -> (usize, usize) {
        self.dim()
    }

    fn as_row_major(&self) -> Cow<'_, [T]> {
        match self.as_slice() {
            Some(slice) => Cow::Borrowed(slice),
            None => Cow::Owned(self.iter().copied().collect()),
        }
    }
}

// ============================================================================
// Named Table
// ============================================================================

/// A 2-D array whose columns are named by a header.
#[derive(Debug, Clone)]
pub struct ArrayTable<'a, T> {
    data: ArrayView2<'a, T>,
    names: Vec<String>,
}

impl<'a, T: Float> ArrayTable<'a, T> {
    /// Attach one name per column of `data`.
    pub fn new<S, N>(data: &'a ArrayBase<S, Ix2>, names: &[N]) -> Result<Self, DmlError>
    where
        S: Data<Elem = T>,
        N: AsRef<str>,
    {
        if names.len() != data.ncols() {
            return Err(DmlError::RaggedTable {
                column: "header".to_string(),
                expected: data.ncols(),
                got: names.len(),
            });
        }
        Ok(Self {
            data: data.view(),
            names: names.iter().map(|n| n.as_ref().to_string()).collect(),
        })
    }
}

impl<T: Float> Table<T> for ArrayTable<'_, T> {
    fn column_names(&self) -> Vec<String> {
        self.names.clone()
    }

    fn column(&self, name: &str) -> Option<Cow<'_, [T]>> {
        let j = self.names.iter().position(|n| n == name)?;
        let column = self.data.column(j);
        Some(match column.to_slice() {
            Some(slice) => Cow::Borrowed(slice),
            None => Cow::Owned(column.to_vec()),
        })
    }
}
