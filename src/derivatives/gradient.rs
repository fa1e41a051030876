//! derivatives::gradient — finite-difference gradient of a scalar function.
//!
//! Purpose
//! -------
//! Approximate `∇f(x)` for a scalar-valued `f : ℝⁿ → ℝ` by sweeping a
//! central-difference stencil along each coordinate of a private working copy
//! of the evaluation point.
//!
//! Key behaviors
//! -------------
//! - Resolve and validate the perturbation step (default
//!   [`DEFAULT_GRADIENT_EPS`]).
//! - Drive the shared stencil sweep once per coordinate, accumulating
//!   `outer[j] * f(x + inner[j] * eps * eᵢ)` and dividing by
//!   `denominator * eps`.
//! - Restore the perturbed coordinate after every stencil step, so the
//!   working point is bit-identical to the caller's input between
//!   coordinates.
//!
//! Invariants & assumptions
//! ------------------------
//! - Exactly `n * s` function evaluations for dimension `n` and stencil
//!   length `s`; no evaluation at the unperturbed point.
//! - `f` is pure and total on the perturbed neighborhood of `x`; the engine
//!   does not defend against panics, non-determinism, or non-finite outputs.
//!
//! Downstream usage
//! ----------------
//! - Optimizers and derivative checks call this directly; the Hessian engine
//!   does **not** reuse it (second derivatives get their own two-index
//!   sweep in [`hessian`](crate::derivatives::hessian)).
use crate::derivatives::{
    errors::FDResult,
    stencil::AccuracyOrder,
    types::{DEFAULT_GRADIENT_EPS, Gradient, Point},
    validation::resolve_step,
};

/// Approximate the gradient of `f` at `x` using central finite differences.
///
/// Purpose
/// -------
/// Compute a length-`n` gradient estimate for a scalar-valued function,
/// parameterized by the accuracy order of the stencil and the perturbation
/// step.
///
/// Parameters
/// ----------
/// - `x`: `&Point`
///   Evaluation point; read-only. Its length `n` fixes the gradient length.
/// - `f`: `F`
///   Scalar-valued target function `ℝⁿ → ℝ`. Called `n * s` times, where `s`
///   is the stencil length of `accuracy`.
/// - `accuracy`: [`AccuracyOrder`]
///   Truncation-error order of the stencil; `AccuracyOrder::default()` is
///   second order.
/// - `eps`: `Option<f64>`
///   Perturbation step; `None` selects [`DEFAULT_GRADIENT_EPS`]. Must be
///   finite and strictly positive.
///
/// Returns
/// -------
/// `FDResult<Gradient>`
///   Freshly allocated length-`n` gradient estimate; ownership transfers to
///   the caller.
///
/// Errors
/// ------
/// - [`FDError::InvalidEps`](crate::derivatives::errors::FDError::InvalidEps)
///   if the resolved step is non-finite or ≤ 0.0.
///
/// Panics
/// ------
/// - Never panics under the documented invariants; a panic inside `f`
///   propagates to the caller.
///
/// Notes
/// -----
/// - An empty point yields an empty gradient with zero evaluations of `f`.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use rust_finitediff::derivatives::gradient::finite_gradient;
/// # use rust_finitediff::derivatives::stencil::AccuracyOrder;
/// // f(x) = x₀² + x₁², ∇f = 2x.
/// let f = |x: &ndarray::Array1<f64>| x.dot(x);
/// let x = array![3.0, -4.0];
///
/// let grad = finite_gradient(&x, f, AccuracyOrder::Second, None).unwrap();
/// assert!((grad[0] - 6.0).abs() < 1e-6);
/// assert!((grad[1] + 8.0).abs() < 1e-6);
/// ```
pub fn finite_gradient<F>(
    x: &Point, f: F, accuracy: AccuracyOrder, eps: Option<f64>,
) -> FDResult<Gradient>
where
    F: Fn(&Point) -> f64,
{
    let eps = resolve_step(eps, DEFAULT_GRADIENT_EPS)?;
    let stencil = accuracy.stencil();
    let denom = stencil.denominator * eps;

    let n = x.len();
    let mut grad = Gradient::zeros(n);
    let mut work = x.clone();
    for i in 0..n {
        let mut acc = 0.0;
        stencil.sweep(&mut work, x, i, eps, &f, |weight, value: f64| acc += weight * value);
        grad[i] = acc / denom;
    }
    Ok(grad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derivatives::{errors::FDError, stencil::ALL_ORDERS};
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Agreement with closed-form gradients for quadratic and trig targets
    //   at every accuracy order.
    // - The evaluation-count contract (n * s calls, no base-point probe).
    // - Degenerate inputs (empty point) and step validation failures.
    //
    // They intentionally DO NOT cover:
    // - Large random problems and cross-order convergence (integration suite).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify agreement with the analytic gradient of a non-symmetric
    // quadratic at every accuracy order.
    //
    // Given
    // -----
    // - f(x) = xᵀAx + bᵀx in ℝ² with a fixed non-symmetric A.
    //
    // Expect
    // ------
    // - The estimate matches (A + Aᵀ)x + b within 1e-6 for all orders.
    fn quadratic_gradient_matches_analytic_for_all_orders() {
        let a = array![[1.0, 2.0], [0.5, -1.0]];
        let b = array![0.3, -0.7];
        let f = |x: &Point| x.dot(&a.dot(x)) + b.dot(x);
        let x = array![0.4, -1.2];
        let expected = a.dot(&x) + a.t().dot(&x) + &b;

        for order in ALL_ORDERS {
            let grad = finite_gradient(&x, f, order, None)
                .expect("gradient of a quadratic should succeed");
            for i in 0..x.len() {
                assert_abs_diff_eq!(grad[i], expected[i], epsilon = 1e-6);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Check the Rosenbrock gradient, a classic curved test surface, against
    // its closed form.
    //
    // Given
    // -----
    // - f(x) = (1 - x₀)² + 100(x₁ - x₀²)² at a generic point.
    //
    // Expect
    // ------
    // - The second-order estimate matches the analytic gradient within 1e-4.
    fn rosenbrock_gradient_matches_closed_form() {
        let f = |x: &Point| {
            let t1 = 1.0 - x[0];
            let t2 = x[1] - x[0] * x[0];
            t1 * t1 + 100.0 * t2 * t2
        };
        let x = array![-0.3, 0.8];
        let expected = array![
            -2.0 * (1.0 - x[0]) - 400.0 * (x[1] - x[0] * x[0]) * x[0],
            200.0 * (x[1] - x[0] * x[0]),
        ];

        let grad = finite_gradient(&x, f, AccuracyOrder::Second, None).unwrap();
        for i in 0..x.len() {
            assert_abs_diff_eq!(grad[i], expected[i], epsilon = 1e-4);
        }
    }

    #[test]
    // Purpose
    // -------
    // Pin the evaluation-count contract: n coordinates times s stencil steps,
    // with no extra probe at the base point.
    //
    // Given
    // -----
    // - A counting wrapper around a linear target in ℝ³, eighth order.
    //
    // Expect
    // ------
    // - Exactly 3 * 8 = 24 evaluations.
    fn evaluation_count_is_n_times_stencil_length() {
        use std::cell::Cell;
        let calls = Cell::new(0usize);
        let f = |x: &Point| {
            calls.set(calls.get() + 1);
            x.sum()
        };
        let x = array![1.0, 2.0, 3.0];

        let grad = finite_gradient(&x, f, AccuracyOrder::Eighth, None).unwrap();

        assert_eq!(calls.get(), 24);
        for i in 0..3 {
            assert_abs_diff_eq!(grad[i], 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the degenerate zero-dimensional case.
    //
    // Given
    // -----
    // - An empty evaluation point.
    //
    // Expect
    // ------
    // - An empty gradient and zero evaluations of f.
    fn empty_point_yields_empty_gradient() {
        use std::cell::Cell;
        let calls = Cell::new(0usize);
        let f = |_: &Point| {
            calls.set(calls.get() + 1);
            0.0
        };
        let x = Point::zeros(0);

        let grad = finite_gradient(&x, f, AccuracyOrder::Second, None).unwrap();

        assert_eq!(grad.len(), 0);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    // Purpose
    // -------
    // Ensure step validation fails fast rather than producing a garbage
    // gradient.
    //
    // Given
    // -----
    // - A zero step size.
    //
    // Expect
    // ------
    // - `FDError::InvalidEps` and no evaluation of f.
    fn zero_step_is_rejected() {
        let f = |_: &Point| panic!("target must not be evaluated");
        let x = array![1.0];

        let err = finite_gradient(&x, f, AccuracyOrder::Second, Some(0.0))
            .expect_err("zero step must be rejected");
        match err {
            FDError::InvalidEps { .. } => {}
            other => panic!("Expected InvalidEps, got {other:?}"),
        }
    }
}
