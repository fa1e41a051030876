//! derivatives::jacobian — finite-difference Jacobians of vector- and
//! matrix-valued functions.
//!
//! Purpose
//! -------
//! Approximate the matrix of first partial derivatives of a vector-valued
//! `f : ℝⁿ → ℝᵏ`, plus a tensor-aware variant for functions returning
//! matrices, where each input coordinate's derivative slice is placed in
//! column-blocks or row-blocks according to a storage convention.
//!
//! Key behaviors
//! -------------
//! - Probe `f` once at the base point to discover the output shape, then
//!   drive the shared stencil sweep along each coordinate.
//! - [`finite_jacobian`] fills column `i` with the derivative of `f` with
//!   respect to coordinate `i`.
//! - [`finite_jacobian_blocks`] generalizes to matrix-valued functions and a
//!   caller-chosen [`TensorLayout`]; [`finite_jacobian_tensor`] maps a tensor
//!   order to the layout (even → column-blocks, odd → row-blocks).
//!
//! Invariants & assumptions
//! ------------------------
//! - Exactly `n * s` evaluations plus the one shape probe.
//! - `f` must return the same output shape at every call; the engine treats a
//!   shape change mid-sweep as a caller contract violation and does not
//!   defend against it.
//!
//! Conventions
//! -----------
//! - Column-block layout: for a p×q-valued `f`, the result is p × (q·n) and
//!   coordinate `k`'s slice occupies columns `[q·k, q·(k+1))`.
//! - Row-block layout: the result is (p·q) × n and column `k` is the
//!   column-major vectorization of coordinate `k`'s slice. This matches the
//!   tensor vectorization of "Dynamic Deformables" by Kim and Eberle [2022]:
//!   even-order tensors are stored in column-blocks, odd-order in row-blocks.
//!
//! Downstream usage
//! ----------------
//! - Callers stacking per-coordinate tensor slices combine the block layouts
//!   with [`flatten`](crate::utils::flatten) /
//!   [`unflatten`](crate::utils::unflatten) to move between matrix and vector
//!   representations.
use crate::derivatives::{
    errors::FDResult,
    stencil::AccuracyOrder,
    types::{DEFAULT_JACOBIAN_EPS, Jacobian, Point},
    validation::resolve_step,
};
use ndarray::{Array1, Array2, s};

/// Storage convention for per-coordinate derivative slices of a
/// matrix-valued function.
///
/// Even-order tensors are conventionally stored in column-blocks, odd-order
/// tensors in row-blocks; [`finite_jacobian_tensor`] applies that parity rule
/// automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TensorLayout {
    /// p × (q·n) output; coordinate `k`'s p×q slice occupies columns
    /// `[q·k, q·(k+1))`.
    ColumnBlocks,
    /// (p·q) × n output; column `k` is the column-major vectorization of
    /// coordinate `k`'s slice.
    RowBlocks,
}

/// Approximate the Jacobian of `f` at `x` using central finite differences.
///
/// Purpose
/// -------
/// Compute the k×n matrix of first partial derivatives of a vector-valued
/// function, with `k` discovered by one probe evaluation at the base point.
///
/// Parameters
/// ----------
/// - `x`: `&Point`
///   Evaluation point; read-only. Its length `n` fixes the column count.
/// - `f`: `F`
///   Vector-valued target function `ℝⁿ → ℝᵏ`. Called `n * s + 1` times
///   (including the shape probe).
/// - `accuracy`: [`AccuracyOrder`]
///   Truncation-error order of the stencil.
/// - `eps`: `Option<f64>`
///   Perturbation step; `None` selects [`DEFAULT_JACOBIAN_EPS`].
///
/// Returns
/// -------
/// `FDResult<Jacobian>`
///   Freshly allocated k×n Jacobian estimate; column `i` holds ∂f/∂xᵢ.
///
/// Errors
/// ------
/// - [`FDError::InvalidEps`](crate::derivatives::errors::FDError::InvalidEps)
///   if the resolved step is non-finite or ≤ 0.0.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use rust_finitediff::derivatives::jacobian::finite_jacobian;
/// # use rust_finitediff::derivatives::stencil::AccuracyOrder;
/// // f(x) = (x₀ + x₁, x₀ x₁), J = [[1, 1], [x₁, x₀]].
/// let f = |x: &ndarray::Array1<f64>| array![x[0] + x[1], x[0] * x[1]];
/// let x = array![2.0, 3.0];
///
/// let jac = finite_jacobian(&x, f, AccuracyOrder::Second, None).unwrap();
/// assert!((jac[[1, 0]] - 3.0).abs() < 1e-6);
/// assert!((jac[[1, 1]] - 2.0).abs() < 1e-6);
/// ```
pub fn finite_jacobian<F>(
    x: &Point, f: F, accuracy: AccuracyOrder, eps: Option<f64>,
) -> FDResult<Jacobian>
where
    F: Fn(&Point) -> Array1<f64>,
{
    let eps = resolve_step(eps, DEFAULT_JACOBIAN_EPS)?;
    let stencil = accuracy.stencil();
    let denom = stencil.denominator * eps;

    let n = x.len();
    let rows = f(x).len();
    let mut jac = Jacobian::zeros((rows, n));
    let mut work = x.clone();
    for i in 0..n {
        let mut acc = Array1::<f64>::zeros(rows);
        stencil.sweep(&mut work, x, i, eps, &f, |weight, value: Array1<f64>| {
            acc.scaled_add(weight, &value)
        });
        acc /= denom;
        jac.column_mut(i).assign(&acc);
    }
    Ok(jac)
}

/// Approximate the Jacobian of a matrix-valued `f` with an explicit block
/// layout.
///
/// Purpose
/// -------
/// Generalize [`finite_jacobian`] to functions returning p×q matrices: each
/// coordinate's accumulated derivative slice is written into the output
/// according to `layout`.
///
/// Parameters
/// ----------
/// - `x`: `&Point`
///   Evaluation point; read-only.
/// - `f`: `F`
///   Matrix-valued target function `ℝⁿ → ℝ^(p×q)`. Called `n * s + 1` times
///   (including the shape probe).
/// - `layout`: [`TensorLayout`]
///   Where each coordinate's slice lands in the output.
/// - `accuracy`: [`AccuracyOrder`]
///   Truncation-error order of the stencil.
/// - `eps`: `Option<f64>`
///   Perturbation step; `None` selects [`DEFAULT_JACOBIAN_EPS`].
///
/// Returns
/// -------
/// `FDResult<Jacobian>`
///   p × (q·n) for [`TensorLayout::ColumnBlocks`], (p·q) × n for
///   [`TensorLayout::RowBlocks`].
///
/// Errors
/// ------
/// - [`FDError::InvalidEps`](crate::derivatives::errors::FDError::InvalidEps)
///   if the resolved step is non-finite or ≤ 0.0.
pub fn finite_jacobian_blocks<F>(
    x: &Point, f: F, layout: TensorLayout, accuracy: AccuracyOrder, eps: Option<f64>,
) -> FDResult<Jacobian>
where
    F: Fn(&Point) -> Array2<f64>,
{
    let eps = resolve_step(eps, DEFAULT_JACOBIAN_EPS)?;
    let stencil = accuracy.stencil();
    let denom = stencil.denominator * eps;

    let n = x.len();
    let (p, q) = f(x).dim();
    let mut jac = match layout {
        TensorLayout::ColumnBlocks => Jacobian::zeros((p, q * n)),
        TensorLayout::RowBlocks => Jacobian::zeros((p * q, n)),
    };
    let mut work = x.clone();
    for i in 0..n {
        let mut slice_acc = Array2::<f64>::zeros((p, q));
        stencil.sweep(&mut work, x, i, eps, &f, |weight, value: Array2<f64>| {
            slice_acc.scaled_add(weight, &value)
        });
        slice_acc /= denom;
        match layout {
            TensorLayout::ColumnBlocks => {
                jac.slice_mut(s![.., i * q..(i + 1) * q]).assign(&slice_acc);
            }
            TensorLayout::RowBlocks => {
                // Column-major vectorization of the slice into column i.
                for c in 0..q {
                    for r in 0..p {
                        jac[[c * p + r, i]] = slice_acc[[r, c]];
                    }
                }
            }
        }
    }
    Ok(jac)
}

/// Approximate the Jacobian of a matrix-valued `f`, choosing the block layout
/// from the tensor order of its output.
///
/// Even-order tensors (e.g. matrices) are stored in column-blocks, odd-order
/// tensors in row-blocks; this is the parity convention callers use when
/// stacking per-coordinate tensor slices.
///
/// # Errors
/// - [`FDError::InvalidEps`](crate::derivatives::errors::FDError::InvalidEps)
///   if the resolved step is non-finite or ≤ 0.0.
pub fn finite_jacobian_tensor<F>(
    x: &Point, f: F, tensor_order: usize, accuracy: AccuracyOrder, eps: Option<f64>,
) -> FDResult<Jacobian>
where
    F: Fn(&Point) -> Array2<f64>,
{
    let layout =
        if tensor_order % 2 == 0 { TensorLayout::ColumnBlocks } else { TensorLayout::RowBlocks };
    finite_jacobian_blocks(x, f, layout, accuracy, eps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derivatives::stencil::ALL_ORDERS;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Agreement with closed-form Jacobians for linear and elementwise trig
    //   targets at every accuracy order.
    // - Output-shape discovery for rectangular targets.
    // - Both tensor block layouts and the parity rule mapping orders to them.
    //
    // They intentionally DO NOT cover:
    // - Large random problems (integration suite).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that the Jacobian of a linear map recovers the matrix itself at
    // every accuracy order (central differences are exact on linear maps up
    // to round-off).
    //
    // Given
    // -----
    // - f(x) = Ax with a fixed 2×2 A.
    //
    // Expect
    // ------
    // - The estimate matches A entrywise within 1e-6 for all orders.
    fn linear_jacobian_recovers_matrix_for_all_orders() {
        let a = array![[2.0, -1.0], [0.5, 3.0]];
        let f = |x: &Point| a.dot(x);
        let x = array![0.7, -0.2];

        for order in ALL_ORDERS {
            let jac =
                finite_jacobian(&x, f, order, None).expect("jacobian of a linear map should succeed");
            assert_eq!(jac.dim(), (2, 2));
            for i in 0..2 {
                for j in 0..2 {
                    assert_abs_diff_eq!(jac[[i, j]], a[[i, j]], epsilon = 1e-6);
                }
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Check an elementwise nonlinear target: the Jacobian of sin applied
    // componentwise is the diagonal of cos.
    //
    // Given
    // -----
    // - f(x) = sin.(x) in ℝ³.
    //
    // Expect
    // ------
    // - Diagonal entries cos(xᵢ), off-diagonal entries 0, within 1e-6.
    fn elementwise_sin_jacobian_is_diagonal_cos() {
        let f = |x: &Point| x.mapv(f64::sin);
        let x = array![0.3, -0.7, 1.1];

        let jac = finite_jacobian(&x, f, AccuracyOrder::Fourth, None).unwrap();

        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { x[i].cos() } else { 0.0 };
                assert_abs_diff_eq!(jac[[i, j]], expected, epsilon = 1e-6);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that the probe evaluation sizes the output for rectangular
    // targets (k ≠ n).
    //
    // Given
    // -----
    // - f(x) = Ax with a 3×2 A.
    //
    // Expect
    // ------
    // - A 3×2 Jacobian equal to A.
    fn rectangular_target_discovers_row_count() {
        let a = array![[1.0, 0.0], [0.0, 1.0], [2.0, -2.0]];
        let f = |x: &Point| a.dot(x);
        let x = array![0.1, 0.9];

        let jac = finite_jacobian(&x, f, AccuracyOrder::Second, None).unwrap();

        assert_eq!(jac.dim(), (3, 2));
        for i in 0..3 {
            for j in 0..2 {
                assert_abs_diff_eq!(jac[[i, j]], a[[i, j]], epsilon = 1e-6);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify both block layouts on a matrix-valued target whose derivative
    // slices are known exactly.
    //
    // Given
    // -----
    // - f(x) = x₀ T₀ + x₁ T₁ with fixed 2×3 slices T₀, T₁ (so ∂f/∂xₖ = Tₖ).
    //
    // Expect
    // ------
    // - ColumnBlocks: 2 × 6 result with Tₖ in columns [3k, 3k+3).
    // - RowBlocks: 6 × 2 result with column k the column-major vectorization
    //   of Tₖ.
    fn block_layouts_place_slices_per_convention() {
        let t0 = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let t1 = array![[-1.0, 0.5, 0.0], [2.0, -2.0, 1.0]];
        let f = |x: &Point| &t0 * x[0] + &t1 * x[1];
        let x = array![0.6, -0.4];

        let even =
            finite_jacobian_blocks(&x, f, TensorLayout::ColumnBlocks, AccuracyOrder::Second, None)
                .unwrap();
        assert_eq!(even.dim(), (2, 6));
        for (k, t) in [&t0, &t1].into_iter().enumerate() {
            for r in 0..2 {
                for c in 0..3 {
                    assert_abs_diff_eq!(even[[r, 3 * k + c]], t[[r, c]], epsilon = 1e-6);
                }
            }
        }

        let odd =
            finite_jacobian_blocks(&x, f, TensorLayout::RowBlocks, AccuracyOrder::Second, None)
                .unwrap();
        assert_eq!(odd.dim(), (6, 2));
        for (k, t) in [&t0, &t1].into_iter().enumerate() {
            for c in 0..3 {
                for r in 0..2 {
                    assert_abs_diff_eq!(odd[[2 * c + r, k]], t[[r, c]], epsilon = 1e-6);
                }
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Pin the parity rule of the tensor-order front end against the explicit
    // layouts.
    //
    // Given
    // -----
    // - The same matrix-valued target, tensor orders 3 (odd) and 4 (even).
    //
    // Expect
    // ------
    // - Order 4 equals the ColumnBlocks result, order 3 the RowBlocks result.
    fn tensor_order_parity_selects_layout() {
        let t0 = array![[0.0, 1.0], [2.0, 3.0]];
        let f = |x: &Point| &t0 * x[0];
        let x = array![1.5];

        let even = finite_jacobian_tensor(&x, f, 4, AccuracyOrder::Second, None).unwrap();
        let by_columns =
            finite_jacobian_blocks(&x, f, TensorLayout::ColumnBlocks, AccuracyOrder::Second, None)
                .unwrap();
        assert_eq!(even, by_columns);

        let odd = finite_jacobian_tensor(&x, f, 3, AccuracyOrder::Second, None).unwrap();
        let by_rows =
            finite_jacobian_blocks(&x, f, TensorLayout::RowBlocks, AccuracyOrder::Second, None)
                .unwrap();
        assert_eq!(odd, by_rows);
    }
}
