//! Errors for finite-difference configuration and layout helpers.
//!
//! This module defines the crate error type, [`FDError`], used across the
//! Python-facing API and the internal Rust core. It implements
//! `Display`/`Error` and converts to `PyErr` for PyO3.
//!
//! ## Conventions
//! - **Indices are 0-based** (match Rust/NumPy).
//! - Step sizes and comparison tolerances must be **strictly positive and
//!   finite**; invalid values are rejected up front rather than silently
//!   replaced by a default.
//! - Numerical disagreement between a reference derivative and a
//!   finite-difference estimate is **not** an error; the comparison routines
//!   report it through their boolean return value.
#[cfg(feature = "python-bindings")]
use pyo3::exceptions::PyValueError;
#[cfg(feature = "python-bindings")]
use pyo3::prelude::*;

/// Crate-wide result alias for operations that may produce [`FDError`].
pub type FDResult<T> = Result<T, FDError>;

/// Unified error type for finite-difference routines.
///
/// Covers accuracy-order parsing, step-size/tolerance validation, and
/// flatten/unflatten layout checks. Implements `Display`/`Error` and converts
/// to a Python `ValueError` at PyO3 boundaries.
#[derive(Debug, Clone, PartialEq)]
pub enum FDError {
    // ---- Accuracy order ----
    /// Accuracy-order name is not one of the supported stencils.
    InvalidAccuracyOrder { name: String },

    // ---- Step sizes and tolerances ----
    /// Finite-difference step must be positive and finite.
    InvalidEps { eps: f64, reason: &'static str },

    /// Comparison tolerance must be positive and finite.
    InvalidTestEps { eps: f64, reason: &'static str },

    // ---- Layout ----
    /// Vector length is not a positive multiple of the column count.
    UnflattenLengthMismatch { len: usize, dim: usize },
}

impl std::error::Error for FDError {}

impl std::fmt::Display for FDError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Accuracy order ----
            FDError::InvalidAccuracyOrder { name } => {
                write!(
                    f,
                    "Invalid accuracy order '{name}': expected 'second', 'fourth', 'sixth', or \
                     'eighth'"
                )
            }

            // ---- Step sizes and tolerances ----
            FDError::InvalidEps { eps, reason } => {
                write!(f, "Invalid finite-difference step {eps}: {reason}")
            }
            FDError::InvalidTestEps { eps, reason } => {
                write!(f, "Invalid comparison tolerance {eps}: {reason}")
            }

            // ---- Layout ----
            FDError::UnflattenLengthMismatch { len, dim } => {
                write!(
                    f,
                    "Cannot unflatten a vector of length {len} into rows of {dim} columns: length \
                     must be a positive multiple of the column count"
                )
            }
        }
    }
}

/// Convert an [`FDError`] into a Python `ValueError` with the error message.
///
/// This is used at the Rust↔Python boundary to surface domain errors cleanly.
#[cfg(feature = "python-bindings")]
impl std::convert::From<FDError> for PyErr {
    fn from(err: FDError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_offending_values() {
        let err = FDError::InvalidEps { eps: -1.0, reason: "Step size must be positive." };
        let msg = err.to_string();
        assert!(msg.contains("-1"));
        assert!(msg.contains("positive"));

        let err = FDError::UnflattenLengthMismatch { len: 7, dim: 3 };
        let msg = err.to_string();
        assert!(msg.contains('7'));
        assert!(msg.contains('3'));
    }
}
