//! Shared helpers: row-major matrix↔vector layout conversion, plus the
//! NumPy extraction utilities used by the Python bindings.
//!
//! The layout helpers exist for callers wiring multi-dimensional outputs into
//! the vector-valued function signature the differencing engines expect; they
//! are pure reindexing, not part of the differencing algorithm itself.
use crate::derivatives::errors::{FDError, FDResult};
use ndarray::{Array1, Array2};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1, PyReadonlyArray2,
};

/// Flatten a matrix row-major into a vector.
///
/// Element `(i, j)` of an r×c matrix lands at index `i * c + j`. The inverse
/// is [`unflatten`] with `dim = c`; the round trip is exact (pure
/// reindexing, no numeric tolerance involved).
pub fn flatten(x: &Array2<f64>) -> Array1<f64> {
    let (rows, cols) = x.dim();
    let mut flat = Array1::<f64>::zeros(rows * cols);
    for i in 0..rows {
        for j in 0..cols {
            flat[i * cols + j] = x[[i, j]];
        }
    }
    flat
}

/// Unflatten a vector row-major into a matrix with `dim` columns.
///
/// Element at index `k` lands at `(k / dim, k % dim)`.
///
/// # Errors
/// Returns [`FDError::UnflattenLengthMismatch`] when `dim` is zero or the
/// vector length is not a multiple of `dim`.
pub fn unflatten(x: &Array1<f64>, dim: usize) -> FDResult<Array2<f64>> {
    if dim == 0 || x.len() % dim != 0 {
        return Err(FDError::UnflattenLengthMismatch { len: x.len(), dim });
    }
    let mut out = Array2::<f64>::zeros((x.len() / dim, dim));
    for (k, &value) in x.iter().enumerate() {
        out[[k / dim, k % dim]] = value;
    }
    Ok(out)
}

#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 1-D numpy.ndarray or sequence of float64",
        )
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_matrix<'py>(
    raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray2<'py, f64>> {
    raw_data.extract::<PyReadonlyArray2<f64>>().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err("expected a 2-D numpy.ndarray of float64")
    })
}
