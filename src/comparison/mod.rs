//! comparison — tolerance-aware derivative checks with debug diagnostics.
//!
//! Purpose
//! -------
//! Decide whether a reference derivative and a finite-difference estimate
//! agree elementwise under a combined absolute/relative tolerance, and report
//! the offending entries through the `log` facade for debugging multi-call
//! test suites.
//!
//! Key behaviors
//! -------------
//! - [`compare_gradient`] checks two vectors, [`compare_jacobian`] two
//!   matrices, and [`compare_hessian`] delegates to the matrix check.
//! - Every element pair must satisfy
//!   `|x - y| <= test_eps * max(|x|, |y|, 1.0)`; the `1.0` floor prevents
//!   false failures near zero while the max term keeps the bound scaling
//!   with magnitude.
//! - Each offending element emits one `log::debug!` record tagged with a
//!   caller-supplied label and carrying the index, both values, the absolute
//!   difference, and both relative differences.
//!
//! Invariants & assumptions
//! ------------------------
//! - The boolean return value alone carries the pass/fail contract; the
//!   logging side channel is purely informational and may be disabled or
//!   unconfigured (`log` then drops the records).
//! - Shape mismatch between the two containers yields `false` (with a debug
//!   record), never a panic: a reference Jacobian of the wrong shape is a
//!   failed check, and test suites probe exactly that case.
//!
//! Conventions
//! -----------
//! - Numerical disagreement is **not** an error; only an invalid tolerance
//!   is (`FDError::InvalidTestEps`). Callers decide what a `false` means.
//! - Diagnostics go to `debug` level only; this crate never logs above that.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the tolerance rule (including the absolute floor near
//!   zero), shape-mismatch behavior, delegation of the Hessian check, and
//!   tolerance validation failures.
use crate::derivatives::{
    errors::FDResult,
    types::{Gradient, Hessian, Jacobian},
    validation::resolve_tolerance,
};

/// Default tolerance for derivative comparisons.
pub const DEFAULT_TEST_EPS: f64 = 1e-4;

/// Compare a reference gradient against a finite-difference estimate.
///
/// Every element pair must satisfy
/// `|x - y| <= test_eps * max(|x|, |y|, 1.0)`. Offending entries are logged
/// at debug level, tagged with `label`.
///
/// # Returns
/// `Ok(true)` when every element passes, `Ok(false)` otherwise — including
/// when the two vectors differ in length.
///
/// # Errors
/// - [`FDError::InvalidTestEps`](crate::derivatives::errors::FDError::InvalidTestEps)
///   if `test_eps` is non-finite or ≤ 0.0 (`None` selects
///   [`DEFAULT_TEST_EPS`]).
pub fn compare_gradient(
    x: &Gradient, y: &Gradient, test_eps: Option<f64>, label: &str,
) -> FDResult<bool> {
    let test_eps = resolve_tolerance(test_eps, DEFAULT_TEST_EPS)?;
    if x.len() != y.len() {
        log::debug!("{label} length mismatch: x has {} entries, y has {}", x.len(), y.len());
        return Ok(false);
    }

    let mut same = true;
    for i in 0..x.len() {
        if !elements_close(x[i], y[i], test_eps) {
            report_mismatch(label, test_eps, &format!("r={i}"), x[i], y[i]);
            same = false;
        }
    }
    Ok(same)
}

/// Compare a reference Jacobian against a finite-difference estimate.
///
/// Same elementwise rule and diagnostics as [`compare_gradient`], applied
/// over all matrix entries.
///
/// # Returns
/// `Ok(true)` when every element passes, `Ok(false)` otherwise — including
/// when the two matrices differ in shape.
///
/// # Errors
/// - [`FDError::InvalidTestEps`](crate::derivatives::errors::FDError::InvalidTestEps)
///   if `test_eps` is non-finite or ≤ 0.0.
pub fn compare_jacobian(
    x: &Jacobian, y: &Jacobian, test_eps: Option<f64>, label: &str,
) -> FDResult<bool> {
    let test_eps = resolve_tolerance(test_eps, DEFAULT_TEST_EPS)?;
    if x.dim() != y.dim() {
        log::debug!(
            "{label} shape mismatch: x is {:?}, y is {:?}",
            x.dim(),
            y.dim()
        );
        return Ok(false);
    }

    let mut same = true;
    for i in 0..x.nrows() {
        for j in 0..x.ncols() {
            if !elements_close(x[[i, j]], y[[i, j]], test_eps) {
                report_mismatch(label, test_eps, &format!("r={i} c={j}"), x[[i, j]], y[[i, j]]);
                same = false;
            }
        }
    }
    Ok(same)
}

/// Compare a reference Hessian against a finite-difference estimate.
///
/// Hessians are plain matrices for comparison purposes; this delegates to
/// [`compare_jacobian`].
///
/// # Errors
/// - [`FDError::InvalidTestEps`](crate::derivatives::errors::FDError::InvalidTestEps)
///   if `test_eps` is non-finite or ≤ 0.0.
pub fn compare_hessian(
    x: &Hessian, y: &Hessian, test_eps: Option<f64>, label: &str,
) -> FDResult<bool> {
    compare_jacobian(x, y, test_eps, label)
}

// ---- Helper methods ----

/// Combined absolute/relative closeness rule for one element pair.
fn elements_close(x: f64, y: f64, test_eps: f64) -> bool {
    let scale = x.abs().max(y.abs()).max(1.0);
    (x - y).abs() <= test_eps * scale
}

/// Emit one debug record for an offending element pair.
///
/// The relative differences divide by the respective magnitudes and may be
/// infinite or NaN when a value is zero; they are diagnostic only.
fn report_mismatch(label: &str, test_eps: f64, index: &str, x: f64, y: f64) {
    let abs_diff = (x - y).abs();
    log::debug!(
        "{label} eps={test_eps:.3e} {index} x={x:.3e} y={y:.3e} |x-y|={abs_diff:.3e} \
         |x-y|/|x|={:.3e} |x-y|/|y|={:.3e}",
        abs_diff / x.abs(),
        abs_diff / y.abs()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derivatives::errors::FDError;
    use ndarray::{Array2, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The elementwise tolerance rule, including the absolute floor near
    //   zero and magnitude scaling for large entries.
    // - Shape-mismatch behavior (false, not a panic).
    // - Delegation of the Hessian check and tolerance validation failures.
    //
    // They intentionally DO NOT cover:
    // - The content of the debug log records (informational only).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that identical vectors and slightly perturbed vectors inside the
    // tolerance both pass.
    //
    // Given
    // -----
    // - A gradient and a copy perturbed by less than test_eps.
    //
    // Expect
    // ------
    // - Both comparisons return true.
    fn close_gradients_pass() {
        let x = array![1.0, -2.0, 0.5];
        let mut y = x.clone();
        assert!(compare_gradient(&x, &y, None, "compare_gradient ").unwrap());

        y[1] += 5e-5;
        assert!(compare_gradient(&x, &y, None, "compare_gradient ").unwrap());
    }

    #[test]
    // Purpose
    // -------
    // Verify that a deviation beyond the tolerance fails the check.
    //
    // Given
    // -----
    // - A gradient and a copy with one entry shifted by 1e-3 under the
    //   default 1e-4 tolerance.
    //
    // Expect
    // ------
    // - The comparison returns false.
    fn deviation_beyond_tolerance_fails() {
        let x = array![1.0, -2.0, 0.5];
        let mut y = x.clone();
        y[2] += 1e-3;

        assert!(!compare_gradient(&x, &y, None, "compare_gradient ").unwrap());
    }

    #[test]
    // Purpose
    // -------
    // Verify the absolute floor near zero: tiny absolute differences pass
    // even when the relative difference is enormous.
    //
    // Given
    // -----
    // - x = 0 and y = 5e-5 under the default 1e-4 tolerance (relative
    //   difference is infinite, absolute difference is under the floor).
    //
    // Expect
    // ------
    // - The comparison returns true.
    fn absolute_floor_protects_near_zero() {
        let x = array![0.0];
        let y = array![5e-5];

        assert!(compare_gradient(&x, &y, None, "compare_gradient ").unwrap());
    }

    #[test]
    // Purpose
    // -------
    // Verify magnitude scaling: a difference that would fail near zero
    // passes between large values of matching magnitude.
    //
    // Given
    // -----
    // - x = 1000 and y = 1000.05 under the default 1e-4 tolerance
    //   (scale = 1000.05, bound ≈ 0.1).
    //
    // Expect
    // ------
    // - The comparison returns true.
    fn relative_scaling_admits_large_magnitudes() {
        let x = array![1000.0];
        let y = array![1000.05];

        assert!(compare_gradient(&x, &y, None, "compare_gradient ").unwrap());
    }

    #[test]
    // Purpose
    // -------
    // Verify that mismatched shapes yield false rather than panicking.
    //
    // Given
    // -----
    // - A 2×3 and a 3×2 matrix.
    //
    // Expect
    // ------
    // - `compare_jacobian` returns Ok(false).
    fn shape_mismatch_returns_false() {
        let x = Array2::<f64>::zeros((2, 3));
        let y = Array2::<f64>::zeros((3, 2));

        assert!(!compare_jacobian(&x, &y, None, "compare_jacobian ").unwrap());
    }

    #[test]
    // Purpose
    // -------
    // Verify that mismatched gradient lengths also yield false.
    //
    // Given
    // -----
    // - Vectors of length 2 and 3.
    //
    // Expect
    // ------
    // - `compare_gradient` returns Ok(false).
    fn length_mismatch_returns_false() {
        let x = array![1.0, 2.0];
        let y = array![1.0, 2.0, 3.0];

        assert!(!compare_gradient(&x, &y, None, "compare_gradient ").unwrap());
    }

    #[test]
    // Purpose
    // -------
    // Verify that the Hessian check is the matrix check.
    //
    // Given
    // -----
    // - A symmetric matrix and a perturbed copy, one inside and one outside
    //   the tolerance.
    //
    // Expect
    // ------
    // - Matching results from compare_hessian and compare_jacobian.
    fn hessian_check_delegates_to_matrix_check() {
        let x = array![[2.0, 0.5], [0.5, 1.0]];
        let mut y = x.clone();
        y[[0, 1]] += 1e-2;

        assert_eq!(
            compare_hessian(&x, &y, None, "compare_hessian ").unwrap(),
            compare_jacobian(&x, &y, None, "compare_jacobian ").unwrap()
        );
        assert!(!compare_hessian(&x, &y, None, "compare_hessian ").unwrap());
    }

    #[test]
    // Purpose
    // -------
    // Ensure tolerance validation fails fast with the offending value.
    //
    // Given
    // -----
    // - A zero tolerance.
    //
    // Expect
    // ------
    // - `FDError::InvalidTestEps`.
    fn zero_tolerance_is_rejected() {
        let x = array![1.0];
        let y = array![1.0];

        let err = compare_gradient(&x, &y, Some(0.0), "compare_gradient ")
            .expect_err("zero tolerance must be rejected");
        match err {
            FDError::InvalidTestEps { .. } => {}
            other => panic!("Expected InvalidTestEps, got {other:?}"),
        }
    }
}
