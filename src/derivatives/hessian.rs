//! derivatives::hessian — finite-difference Hessian of a scalar function.
//!
//! Purpose
//! -------
//! Approximate the symmetric n×n matrix of second partial derivatives of a
//! scalar-valued `f : ℝⁿ → ℝ` by applying the same 1-D central-difference
//! stencil to two coordinates at once.
//!
//! Key behaviors
//! -------------
//! - Compute only the upper triangle (i ≤ j) and mirror it into the lower
//!   triangle; the second derivative of the target is assumed symmetric
//!   regardless of whether the approximation would detect asymmetry.
//! - For each pair (i, j) and every combination of stencil steps (ci, cj),
//!   perturb both coordinates simultaneously through the shared
//!   perturb/evaluate/restore primitive and accumulate
//!   `outer[ci] * outer[cj] * f(perturbed)`.
//! - Divide by `(denominator * eps)²`. The diagonal (i == j) runs through the
//!   same two-index loop, degenerating to a nested application of the 1-D
//!   stencil to itself.
//!
//! Invariants & assumptions
//! ------------------------
//! - `n(n+1)/2 * s²` function evaluations — quadratic in both the dimension
//!   and the stencil length. This is the dominant cost for large n and the
//!   reason the default accuracy stays at second order unless higher
//!   precision is specifically required.
//! - The default step is looser than the first-order engines'
//!   (1e-5 vs 1e-8): the squared denominator amplifies round-off for very
//!   small steps.
use crate::derivatives::{
    errors::FDResult,
    stencil::{AccuracyOrder, eval_shifted},
    types::{DEFAULT_HESSIAN_EPS, Hessian, Point},
    validation::resolve_step,
};

/// Approximate the Hessian of `f` at `x` using central finite differences.
///
/// Purpose
/// -------
/// Compute the symmetric n×n matrix of second partial derivatives of a
/// scalar-valued function, parameterized by the accuracy order of the
/// stencil and the perturbation step.
///
/// Parameters
/// ----------
/// - `x`: `&Point`
///   Evaluation point; read-only. Its length `n` fixes the Hessian
///   dimension.
/// - `f`: `F`
///   Scalar-valued target function `ℝⁿ → ℝ`. Called `n(n+1)/2 * s²` times,
///   where `s` is the stencil length of `accuracy`.
/// - `accuracy`: [`AccuracyOrder`]
///   Truncation-error order of the stencil.
/// - `eps`: `Option<f64>`
///   Perturbation step; `None` selects [`DEFAULT_HESSIAN_EPS`]. Must be
///   finite and strictly positive.
///
/// Returns
/// -------
/// `FDResult<Hessian>`
///   Freshly allocated n×n Hessian estimate, exactly symmetric by
///   construction (`hess[(j, i)]` is copied from `hess[(i, j)]`).
///
/// Errors
/// ------
/// - [`FDError::InvalidEps`](crate::derivatives::errors::FDError::InvalidEps)
///   if the resolved step is non-finite or ≤ 0.0.
///
/// Notes
/// -----
/// - No symmetry cleanup pass is needed afterwards: the lower triangle is a
///   bitwise copy of the upper one.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use rust_finitediff::derivatives::hessian::finite_hessian;
/// # use rust_finitediff::derivatives::stencil::AccuracyOrder;
/// // f(x) = x₀² + 3 x₀ x₁, H = [[2, 3], [3, 0]].
/// let f = |x: &ndarray::Array1<f64>| x[0] * x[0] + 3.0 * x[0] * x[1];
/// let x = array![0.5, -0.5];
///
/// let hess = finite_hessian(&x, f, AccuracyOrder::Second, None).unwrap();
/// assert!((hess[[0, 0]] - 2.0).abs() < 1e-4);
/// assert!((hess[[0, 1]] - 3.0).abs() < 1e-4);
/// assert_eq!(hess[[0, 1]], hess[[1, 0]]);
/// ```
pub fn finite_hessian<F>(
    x: &Point, f: F, accuracy: AccuracyOrder, eps: Option<f64>,
) -> FDResult<Hessian>
where
    F: Fn(&Point) -> f64,
{
    let eps = resolve_step(eps, DEFAULT_HESSIAN_EPS)?;
    let stencil = accuracy.stencil();
    let denom = stencil.denominator * eps;
    let denom_sq = denom * denom;

    let n = x.len();
    let mut hess = Hessian::zeros((n, n));
    let mut work = x.clone();
    for i in 0..n {
        for j in i..n {
            let mut acc = 0.0;
            for (wi, oi) in stencil.steps() {
                for (wj, oj) in stencil.steps() {
                    let value = eval_shifted(&mut work, x, &[(i, oi * eps), (j, oj * eps)], &f);
                    acc += wi * wj * value;
                }
            }
            hess[[i, j]] = acc / denom_sq;
            hess[[j, i]] = hess[[i, j]]; // The Hessian is symmetric.
        }
    }
    Ok(hess)
}
