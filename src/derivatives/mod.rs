//! derivatives — finite-difference engines and their shared building blocks.
//!
//! Purpose
//! -------
//! Provide numerical approximations of first and second derivatives
//! (gradient, Jacobian, Hessian) of user-supplied functions via fixed
//! central-difference stencils, for use inside optimization and simulation
//! code that either lacks analytic derivatives or needs to validate them.
//!
//! Key behaviors
//! -------------
//! - Look up the stencil parameters for a requested accuracy order
//!   (`stencil`) as a static, compile-time table.
//! - Drive a single perturb/evaluate/restore loop shared by all three
//!   engines (`gradient`, `jacobian`, `hessian`), parameterized by an
//!   accumulation callback, instead of three near-identical copies.
//! - Validate caller-supplied steps up front (`validation`) and surface
//!   configuration mistakes through a single error enum (`errors::FDError`)
//!   with a common result alias (`FDResult<T>`).
//!
//! Invariants & assumptions
//! ------------------------
//! - All operations are transient and function-scoped: no state survives a
//!   call, and the caller's evaluation point is only ever read. The engines
//!   perturb a private working copy and restore it bit-identically after
//!   every stencil step.
//! - Target functions are assumed pure; the engines may call them an
//!   unbounded number of times and do not defend against non-determinism,
//!   panics, or output-shape changes between calls.
//! - Everything here is single-threaded and synchronous with no I/O; each
//!   coordinate's perturb/evaluate/restore sequence is independent of every
//!   other coordinate's, so callers wanting parallelism can partition
//!   coordinates across their own working copies.
//!
//! Conventions
//! -----------
//! - Scalar-valued (`Fn(&Point) -> f64`) and vector-valued
//!   (`Fn(&Point) -> Array1<f64>`) targets are distinct type-level
//!   contracts: gradient/Hessian take the former, Jacobian the latter. The
//!   engines dispatch on return shape at the type level, not at runtime.
//! - Step size and accuracy order are caller-supplied constants; there is no
//!   adaptive or error-optimal step selection.
//! - Public entrypoints that can fail return `FDResult<T>`.
//!
//! Downstream usage
//! ----------------
//! - Derivative checks combine these engines with
//!   [`comparison`](crate::comparison) to validate analytic derivatives
//!   against the finite-difference estimate.
//! - Front-ends typically import the curated surface via
//!   `derivatives::prelude::*`.
//!
//! Testing notes
//! -------------
//! - Unit tests in the submodules pin the coefficient tables, the
//!   restore-after-each-step invariant, evaluation counts, and agreement
//!   with closed-form derivatives on small problems.
//! - The integration suite exercises random quadratic/linear targets across
//!   dimensions and all accuracy orders, plus cross-order convergence on
//!   smooth trig targets.

pub mod errors;
pub mod gradient;
pub mod hessian;
pub mod jacobian;
pub mod stencil;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{FDError, FDResult};
pub use self::gradient::finite_gradient;
pub use self::hessian::finite_hessian;
pub use self::jacobian::{
    TensorLayout, finite_jacobian, finite_jacobian_blocks, finite_jacobian_tensor,
};
pub use self::stencil::{ALL_ORDERS, AccuracyOrder, Stencil};
pub use self::types::{
    DEFAULT_GRADIENT_EPS, DEFAULT_HESSIAN_EPS, DEFAULT_JACOBIAN_EPS, Gradient, Hessian, Jacobian,
    Point,
};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_finitediff::derivatives::prelude::*;
//
// to import the main differencing surface in a single line.

pub mod prelude {
    pub use super::errors::{FDError, FDResult};
    pub use super::gradient::finite_gradient;
    pub use super::hessian::finite_hessian;
    pub use super::jacobian::{
        TensorLayout, finite_jacobian, finite_jacobian_blocks, finite_jacobian_tensor,
    };
    pub use super::stencil::AccuracyOrder;
    pub use super::types::{Gradient, Hessian, Jacobian, Point};
}
