//! Validation helpers for finite-difference configuration.
//!
//! This module centralizes the numeric sanity checks applied to
//! caller-supplied step sizes and comparison tolerances:
//!
//! - **Step resolution**: [`resolve_step`] substitutes the per-engine default
//!   when no step is given, then requires the result to be finite and
//!   strictly positive.
//! - **Tolerance resolution**: [`resolve_tolerance`] does the same for the
//!   comparison tolerance.
//!
//! These helpers standardize error reporting by returning domain-specific
//! [`FDError`] variants, so an invalid configuration fails up front instead
//! of silently degrading the approximation.
use crate::derivatives::errors::{FDError, FDResult};

/// Resolve and validate a finite-difference step size.
///
/// - `None` selects the engine's `default` step.
/// - The resolved value must be **finite** and **strictly positive**.
///
/// # Errors
/// Returns [`FDError::InvalidEps`] if the resolved step is non-finite or
/// ≤ 0.0.
pub fn resolve_step(eps: Option<f64>, default: f64) -> FDResult<f64> {
    let eps = eps.unwrap_or(default);
    if !eps.is_finite() {
        return Err(FDError::InvalidEps { eps, reason: "Step size must be finite." });
    }
    if eps <= 0.0 {
        return Err(FDError::InvalidEps { eps, reason: "Step size must be positive." });
    }
    Ok(eps)
}

/// Resolve and validate a comparison tolerance.
///
/// - `None` selects `default` (normally
///   [`DEFAULT_TEST_EPS`](crate::comparison::DEFAULT_TEST_EPS)).
/// - The resolved value must be **finite** and **strictly positive**.
///
/// # Errors
/// Returns [`FDError::InvalidTestEps`] if the resolved tolerance is
/// non-finite or ≤ 0.0.
pub fn resolve_tolerance(test_eps: Option<f64>, default: f64) -> FDResult<f64> {
    let test_eps = test_eps.unwrap_or(default);
    if !test_eps.is_finite() {
        return Err(FDError::InvalidTestEps { eps: test_eps, reason: "Tolerance must be finite." });
    }
    if test_eps <= 0.0 {
        return Err(FDError::InvalidTestEps {
            eps: test_eps,
            reason: "Tolerance must be positive.",
        });
    }
    Ok(test_eps)
}
