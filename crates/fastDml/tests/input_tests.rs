//! Tests for `ndarray` inputs.
//!
//! These tests verify:
//! - `fit_arrays` with owned arrays, views and plain vectors
//! - Named-column tables backed by a 2-D array
//! - Shape mismatches are reported as schema errors
//!
//! ## Test Organization
//!
//! 1. **Array Fitting** - Matrix and vector inputs
//! 2. **Array Tables** - Header validation and column lookup

use ndarray::{s, Array1, Array2};

use fastDml::prelude::*;

fn design(n: usize) -> (Array2<f64>, Array1<f64>, Array1<f64>) {
    let x = Array2::from_shape_fn((n, 2), |(i, j)| ((i * (j + 2)) as f64 * 0.29).sin());
    let d = Array1::from_shape_fn(n, |i| 0.4 * x[[i, 0]] + (i as f64 * 2.1).cos());
    let y = Array1::from_shape_fn(n, |i| 1.5 * d[i] - x[[i, 1]] + 0.2 * (i as f64 * 0.7).sin());
    (x, d, y)
}

// ============================================================================
// Array Fitting Tests
// ============================================================================

/// Test that array inputs match the equivalent dataset.
///
/// Verifies the covariate matrix is read row by row.
#[test]
fn test_fit_arrays_matches_dataset() {
    let (x, d, y) = design(80);
    let model = DoubleML::new().n_folds(4).adapter(Batch).build().unwrap();
    let lr = LinearRegression::new();

    let from_arrays = model.fit_arrays(&x, &y, &d, &lr, &lr).unwrap();

    let flat: Vec<f64> = x.iter().copied().collect();
    let data = Dataset::from_arrays(y.as_slice().unwrap(), d.as_slice().unwrap(), &flat, 2).unwrap();
    let from_data = model.fit(&data, &lr, &lr).unwrap();

    assert_eq!(from_arrays.coefficient, from_data.coefficient);
    assert_eq!(from_arrays.std_error, from_data.std_error);
    assert_eq!(from_arrays.treatment, "d");
}

/// Test array views, transposed layouts and vector inputs.
#[test]
fn test_fit_arrays_views_and_vectors() {
    let (x, d, y) = design(60);
    let model = DoubleML::new().adapter(Batch).build().unwrap();
    let lr = LinearRegression::new();

    let reference = model.fit_arrays(&x, &y, &d, &lr, &lr).unwrap();

    // Column-major copy of the same matrix
    let x_f = x.t().to_owned().reversed_axes();
    let y_vec = y.to_vec();
    let from_views = model
        .fit_arrays(&x_f, &y_vec, &d.view(), &lr, &lr)
        .unwrap();
    assert_eq!(reference.coefficient, from_views.coefficient);

    let from_slice_view = model
        .fit_arrays(&x.slice(s![.., ..]), y_vec.as_slice(), &d, &lr, &lr)
        .unwrap();
    assert_eq!(reference.coefficient, from_slice_view.coefficient);
}

/// Test mismatched array lengths.
#[test]
fn test_fit_arrays_shape_errors() {
    let (x, d, y) = design(40);
    let model = DoubleML::new().adapter(Batch).build().unwrap();
    let lr = LinearRegression::new();

    let short_y = y.slice(s![..30]).to_owned();
    let err = model.fit_arrays(&x, &short_y, &d, &lr, &lr).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Schema);

    let short_d = d.slice(s![..39]).to_owned();
    let err = model.fit_arrays(&x, &y, &short_d, &lr, &lr).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Schema);
}

// ============================================================================
// Array Table Tests
// ============================================================================

/// Test named columns backed by an array.
#[test]
fn test_array_table() {
    let (x, d, y) = design(50);
    let mut data = Array2::zeros((50, 4));
    data.column_mut(0).assign(&x.column(0));
    data.column_mut(1).assign(&y);
    data.column_mut(2).assign(&x.column(1));
    data.column_mut(3).assign(&d);

    let table = ArrayTable::new(&data, &["x1", "y", "x2", "d"]).unwrap();
    assert_eq!(
        table.column_names(),
        vec!["x1".to_string(), "y".to_string(), "x2".to_string(), "d".to_string()]
    );
    assert!(table.column("missing").is_none());

    let model = DoubleML::new().n_folds(4).adapter(Batch).build().unwrap();
    let lr = LinearRegression::new();
    let roles = ColumnRoles::new("y", "d").covariates(&["x1", "x2"]);
    let from_table = model.fit_table(&table, &roles, &lr, &lr).unwrap();
    let from_arrays = model.fit_arrays(&x, &y, &d, &lr, &lr).unwrap();

    assert_eq!(from_table.coefficient, from_arrays.coefficient);
}

/// Test a header with the wrong number of names.
#[test]
fn test_array_table_header_mismatch() {
    let data = Array2::<f64>::zeros((5, 3));
    let err = ArrayTable::new(&data, &["y", "d"]).unwrap_err();
    assert_eq!(
        err,
        DmlError::RaggedTable {
            column: "header".to_string(),
            expected: 3,
            got: 2
        }
    );
}
