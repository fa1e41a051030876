//! rust_finitediff — finite-difference derivatives with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the finite-difference routines to Python via the
//! `_rust_finitediff` extension module. When the `python-bindings` feature is
//! enabled, this module defines the Python-facing functions used by the
//! `rust_finitediff` package.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`derivatives`, `comparison`, and
//!   `utils`) as the public crate surface.
//! - Define `#[pyfunction]` wrappers and the `#[pymodule]` initializer for
//!   the `_rust_finitediff` Python extension.
//! - Convert NumPy arrays and Python callables into the `ndarray`-based
//!   types the engines expect, and route Python exceptions raised inside a
//!   target function back to the caller.
//!
//! Invariants & assumptions
//! ------------------------
//! - All heavy numerical work is implemented in the inner Rust modules; this
//!   file performs only FFI glue, input validation, and error mapping.
//! - A Python exception raised inside a target function is captured in a
//!   shared cell while the engine runs (the engine sees NaN for that
//!   evaluation) and re-raised once the engine returns; partial results are
//!   never handed back alongside an error.
//! - On successful conversion from Python objects to Rust types, the
//!   invariants documented in the core modules are assumed to hold.
//!
//! Conventions
//! -----------
//! - Accuracy orders cross the boundary as strings (`"second"`, `"fourth"`,
//!   `"sixth"`, `"eighth"`); unknown names surface as `ValueError`.
//! - Errors from core Rust code are propagated as rich error types
//!   internally and converted to `PyErr` values at the PyO3 boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should usually depend directly on the inner modules
//!   and can ignore the PyO3 items guarded by the `python-bindings` feature.
//! - The Python packaging layer imports the `_rust_finitediff` module
//!   defined here and wraps its functions in user-facing Python APIs.
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in the inner modules
//!   and by the Rust integration suite; smoke tests for the PyO3 bindings
//!   verify that functions can be called and round-tripped from Python.

pub mod comparison;
pub mod derivatives;
pub mod utils;

#[cfg(feature = "python-bindings")]
use ndarray::Array1;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray1, PyArray2};

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use std::cell::{Cell, RefCell};

#[cfg(feature = "python-bindings")]
use crate::{
    derivatives::{stencil::AccuracyOrder, types::Point},
    utils::{extract_f64_array, extract_f64_matrix},
};

/// Convert a Python evaluation point into an owned [`Point`].
#[cfg(feature = "python-bindings")]
fn extract_point<'py>(py: Python<'py>, raw: &Bound<'py, PyAny>) -> PyResult<Point> {
    let arr = extract_f64_array(py, raw)?;
    let slice = arr.as_slice().map_err(|_| {
        PyValueError::new_err("x must be a 1-D contiguous float64 array or sequence")
    })?;
    Ok(Array1::from(slice.to_vec()))
}

/// Compute the gradient of a Python callable via central finite differences.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    signature = (x, f, accuracy = "second", eps = None),
    text_signature = "(x, f, /, accuracy='second', eps=None)"
)]
fn finite_gradient<'py>(
    py: Python<'py>, x: &Bound<'py, PyAny>, f: &Bound<'py, PyAny>, accuracy: &str,
    eps: Option<f64>,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let order: AccuracyOrder = accuracy.parse()?;
    let point = extract_point(py, x)?;

    // Exceptions raised by the callable are stored in the shared cell and the
    // evaluation reports NaN; the error is re-raised once the engine returns.
    let closure_err: RefCell<Option<PyErr>> = RefCell::new(None);
    let target = |pt: &Point| -> f64 {
        let arg = pt.to_owned().into_pyarray(py);
        match f.call1((arg,)).and_then(|v| v.extract::<f64>()) {
            Ok(value) => value,
            Err(err) => {
                closure_err.replace(Some(err));
                f64::NAN
            }
        }
    };
    let grad = derivatives::finite_gradient(&point, target, order, eps)?;
    if let Some(err) = closure_err.take() {
        return Err(err);
    }
    Ok(grad.into_pyarray(py))
}

/// Compute the Jacobian of a vector-valued Python callable.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    signature = (x, f, accuracy = "second", eps = None),
    text_signature = "(x, f, /, accuracy='second', eps=None)"
)]
fn finite_jacobian<'py>(
    py: Python<'py>, x: &Bound<'py, PyAny>, f: &Bound<'py, PyAny>, accuracy: &str,
    eps: Option<f64>,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let order: AccuracyOrder = accuracy.parse()?;
    let point = extract_point(py, x)?;

    let closure_err: RefCell<Option<PyErr>> = RefCell::new(None);
    // Tracks the output length seen so far, so an error mid-sweep can report
    // NaNs of a consistent shape instead of tripping the engine.
    let rows_seen = Cell::new(0usize);
    let target = |pt: &Point| -> Array1<f64> {
        let arg = pt.to_owned().into_pyarray(py);
        match f.call1((arg,)).and_then(|v| v.extract::<Vec<f64>>()) {
            Ok(values) => {
                rows_seen.set(values.len());
                Array1::from(values)
            }
            Err(err) => {
                closure_err.replace(Some(err));
                Array1::from_elem(rows_seen.get(), f64::NAN)
            }
        }
    };
    let jac = derivatives::finite_jacobian(&point, target, order, eps)?;
    if let Some(err) = closure_err.take() {
        return Err(err);
    }
    Ok(jac.into_pyarray(py))
}

/// Compute the Hessian of a scalar-valued Python callable.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    signature = (x, f, accuracy = "second", eps = None),
    text_signature = "(x, f, /, accuracy='second', eps=None)"
)]
fn finite_hessian<'py>(
    py: Python<'py>, x: &Bound<'py, PyAny>, f: &Bound<'py, PyAny>, accuracy: &str,
    eps: Option<f64>,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let order: AccuracyOrder = accuracy.parse()?;
    let point = extract_point(py, x)?;

    let closure_err: RefCell<Option<PyErr>> = RefCell::new(None);
    let target = |pt: &Point| -> f64 {
        let arg = pt.to_owned().into_pyarray(py);
        match f.call1((arg,)).and_then(|v| v.extract::<f64>()) {
            Ok(value) => value,
            Err(err) => {
                closure_err.replace(Some(err));
                f64::NAN
            }
        }
    };
    let hess = derivatives::finite_hessian(&point, target, order, eps)?;
    if let Some(err) = closure_err.take() {
        return Err(err);
    }
    Ok(hess.into_pyarray(py))
}

/// Compare two gradients under a combined absolute/relative tolerance.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    signature = (x, y, test_eps = None, msg = None),
    text_signature = "(x, y, /, test_eps=1e-4, msg='compare_gradient ')"
)]
fn compare_gradient<'py>(
    py: Python<'py>, x: &Bound<'py, PyAny>, y: &Bound<'py, PyAny>, test_eps: Option<f64>,
    msg: Option<&str>,
) -> PyResult<bool> {
    let x_arr = extract_f64_array(py, x)?.as_array().to_owned();
    let y_arr = extract_f64_array(py, y)?.as_array().to_owned();
    let same =
        comparison::compare_gradient(&x_arr, &y_arr, test_eps, msg.unwrap_or("compare_gradient "))?;
    Ok(same)
}

/// Compare two Jacobians under a combined absolute/relative tolerance.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    signature = (x, y, test_eps = None, msg = None),
    text_signature = "(x, y, /, test_eps=1e-4, msg='compare_jacobian ')"
)]
fn compare_jacobian<'py>(
    _py: Python<'py>, x: &Bound<'py, PyAny>, y: &Bound<'py, PyAny>, test_eps: Option<f64>,
    msg: Option<&str>,
) -> PyResult<bool> {
    let x_arr = extract_f64_matrix(x)?.as_array().to_owned();
    let y_arr = extract_f64_matrix(y)?.as_array().to_owned();
    let same =
        comparison::compare_jacobian(&x_arr, &y_arr, test_eps, msg.unwrap_or("compare_jacobian "))?;
    Ok(same)
}

/// Compare two Hessians under a combined absolute/relative tolerance.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    signature = (x, y, test_eps = None, msg = None),
    text_signature = "(x, y, /, test_eps=1e-4, msg='compare_hessian ')"
)]
fn compare_hessian<'py>(
    _py: Python<'py>, x: &Bound<'py, PyAny>, y: &Bound<'py, PyAny>, test_eps: Option<f64>,
    msg: Option<&str>,
) -> PyResult<bool> {
    let x_arr = extract_f64_matrix(x)?.as_array().to_owned();
    let y_arr = extract_f64_matrix(y)?.as_array().to_owned();
    let same =
        comparison::compare_hessian(&x_arr, &y_arr, test_eps, msg.unwrap_or("compare_hessian "))?;
    Ok(same)
}

/// Flatten a matrix row-major into a vector.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(text_signature = "(x, /)")]
fn flatten<'py>(py: Python<'py>, x: &Bound<'py, PyAny>) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let x_arr = extract_f64_matrix(x)?.as_array().to_owned();
    Ok(utils::flatten(&x_arr).into_pyarray(py))
}

/// Unflatten a vector row-major into a matrix with `dim` columns.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(text_signature = "(x, dim, /)")]
fn unflatten<'py>(
    py: Python<'py>, x: &Bound<'py, PyAny>, dim: usize,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let x_arr = extract_f64_array(py, x)?.as_array().to_owned();
    let out = utils::unflatten(&x_arr, dim)?;
    Ok(out.into_pyarray(py))
}

/// _rust_finitediff — PyO3 module initializer for the Python extension.
///
/// Registers the differencing, comparison, and layout functions on the
/// `_rust_finitediff` module; the pure-Python packaging layer wraps these in
/// the user-facing API.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_finitediff<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(finite_gradient, m)?)?;
    m.add_function(wrap_pyfunction!(finite_jacobian, m)?)?;
    m.add_function(wrap_pyfunction!(finite_hessian, m)?)?;
    m.add_function(wrap_pyfunction!(compare_gradient, m)?)?;
    m.add_function(wrap_pyfunction!(compare_jacobian, m)?)?;
    m.add_function(wrap_pyfunction!(compare_hessian, m)?)?;
    m.add_function(wrap_pyfunction!(flatten, m)?)?;
    m.add_function(wrap_pyfunction!(unflatten, m)?)?;
    Ok(())
}
