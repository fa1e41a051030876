//! derivatives::types — shared numeric aliases and default step sizes.
//!
//! Purpose
//! -------
//! Centralize the core numeric types and step-size constants used by the
//! finite-difference engines. By defining these in one place, the rest of the
//! crate can stay agnostic to `ndarray` and can more easily evolve if the
//! container types change.
//!
//! Key behaviors
//! -------------
//! - Define canonical aliases for evaluation points, gradients, Jacobians,
//!   and Hessians (`Point`, `Gradient`, `Jacobian`, `Hessian`).
//! - Provide the default perturbation steps for first- and second-derivative
//!   approximations and the default comparison tolerance.
//!
//! Invariants & assumptions
//! ------------------------
//! - All vectors and matrices are dense `ndarray` containers over `f64`.
//! - `Gradient` matches the length of the `Point` it was computed at;
//!   `Hessian` is `n × n` for `n = point.len()`; `Jacobian` is `k × n` with
//!   `k` determined by the target function's output.
//!
//! Conventions
//! -----------
//! - The Hessian default step is deliberately looser than the first-order
//!   defaults: the second-derivative formula divides by the squared
//!   denominator, which amplifies round-off for very small steps.
//! - This module defines no runtime behavior beyond what `ndarray` requires
//!   when these types are instantiated elsewhere.
use ndarray::{Array1, Array2};

/// Evaluation point `x ∈ ℝⁿ` at which derivatives are approximated.
///
/// Alias for `ndarray::Array1<f64>`, used as the canonical input type
/// throughout the crate.
pub type Point = Array1<f64>;

/// Gradient vector `∇f(x)` of a scalar-valued function.
///
/// Alias for `ndarray::Array1<f64>`, matching the shape of `Point`.
pub type Gradient = Array1<f64>;

/// Dense Jacobian matrix of a vector-valued function.
///
/// Alias for `ndarray::Array2<f64>`; `k × n` for `k` output components and
/// `n = point.len()` input coordinates.
pub type Jacobian = Array2<f64>;

/// Dense symmetric Hessian matrix of a scalar-valued function.
///
/// Alias for `ndarray::Array2<f64>`; `n × n` for `n = point.len()`.
pub type Hessian = Array2<f64>;

/// Default perturbation step for gradient approximations.
pub const DEFAULT_GRADIENT_EPS: f64 = 1e-8;

/// Default perturbation step for Jacobian approximations.
pub const DEFAULT_JACOBIAN_EPS: f64 = 1e-8;

/// Default perturbation step for Hessian approximations.
///
/// Looser than the first-order defaults because the second-derivative
/// formula divides by `(denominator * eps)²`.
pub const DEFAULT_HESSIAN_EPS: f64 = 1e-5;
