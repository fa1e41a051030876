//! derivatives::stencil — central-difference coefficient tables and the shared
//! perturb/evaluate/restore loop.
//!
//! Purpose
//! -------
//! Provide the fixed central-difference stencils (outer weights, inner
//! offsets, denominator) for each supported accuracy order, together with the
//! single stencil-iteration primitive that the gradient, Jacobian, and
//! Hessian engines all drive. Keeping the loop in one place avoids drift
//! between three otherwise near-identical implementations.
//!
//! Key behaviors
//! -------------
//! - Map an [`AccuracyOrder`] to its [`Stencil`] via a static, match-based
//!   lookup (`AccuracyOrder::stencil`); the coefficient tables are `const`
//!   arrays, never derived or mutated at runtime.
//! - Parse accuracy orders from strings (`FromStr`), rejecting unknown names
//!   with [`FDError::InvalidAccuracyOrder`].
//! - Apply a set of coordinate shifts to a working point, evaluate the target
//!   function, and restore the shifted coordinates bit-identically
//!   ([`eval_shifted`]).
//! - Sweep a stencil along one coordinate, handing each weighted evaluation
//!   to an accumulation callback ([`Stencil::sweep`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - For every order, `outer.len() == inner.len()` and the length is even
//!   (one positive/negative offset pair per order step: 2, 4, 6, 8).
//! - The working point passed to [`eval_shifted`] equals the base point on
//!   entry; it equals the base point again on exit, so perturbations never
//!   compound across coordinates or stencil steps.
//! - The target function is pure: it may be called an unbounded number of
//!   times and identical inputs produce identical outputs. The engines do
//!   not defend against violations of this contract.
//!
//! Conventions
//! -----------
//! - Coefficients follow the standard minimal-stencil central-difference
//!   tables (see <https://en.wikipedia.org/wiki/Finite_difference_coefficient>):
//!   the approximation accumulates `outer[j] * f(x + inner[j] * eps)` and
//!   divides by `denominator * eps`.
//! - Traversal order is coordinate-ascending, stencil-step-ascending; callers
//!   must not rely on any finer ordering guarantee.
//!
//! Downstream usage
//! ----------------
//! - [`finite_gradient`](crate::derivatives::gradient::finite_gradient),
//!   [`finite_jacobian`](crate::derivatives::jacobian::finite_jacobian), and
//!   [`finite_hessian`](crate::derivatives::hessian::finite_hessian) obtain a
//!   stencil from their `AccuracyOrder` argument and drive the shared
//!   primitives; no other module touches the coefficient tables directly.
//! - The string parser backs the Python-facing API, where accuracy is passed
//!   as a keyword string.
//!
//! Testing notes
//! -------------
//! - Unit tests cover table shape invariants, exact coefficient values for
//!   the lowest order, string parsing (including rejection payloads), and
//!   bit-identical restoration of the working point after a sweep.
//! - Convergence behavior of the stencils themselves is exercised by the
//!   engine tests and the integration suite against closed-form derivatives.
use crate::derivatives::{
    errors::{FDError, FDResult},
    types::Point,
};
use std::str::FromStr;

// The outer coefficients, c1, and inner offsets, c2, in c1 * f(x + c2 * eps).
// See: https://en.wikipedia.org/wiki/Finite_difference_coefficient
const SECOND_OUTER: [f64; 2] = [1.0, -1.0];
const SECOND_INNER: [f64; 2] = [1.0, -1.0];

const FOURTH_OUTER: [f64; 4] = [1.0, -8.0, 8.0, -1.0];
const FOURTH_INNER: [f64; 4] = [-2.0, -1.0, 1.0, 2.0];

const SIXTH_OUTER: [f64; 6] = [-1.0, 9.0, -45.0, 45.0, -9.0, 1.0];
const SIXTH_INNER: [f64; 6] = [-3.0, -2.0, -1.0, 1.0, 2.0, 3.0];

const EIGHTH_OUTER: [f64; 8] = [3.0, -32.0, 168.0, -672.0, 672.0, -168.0, 32.0, -3.0];
const EIGHTH_INNER: [f64; 8] = [-4.0, -3.0, -2.0, -1.0, 1.0, 2.0, 3.0, 4.0];

/// Truncation-error order of a central-difference stencil.
///
/// Higher orders cancel more Taylor-series terms and require proportionally
/// more function evaluations per coordinate (2, 4, 6, or 8). These four
/// orders are the only supported stencils; the enum is closed by design, so
/// an invalid order is unrepresentable in Rust code and can only arise at
/// string boundaries (see the `FromStr` impl).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AccuracyOrder {
    /// Second-order accuracy (2 evaluations per coordinate).
    #[default]
    Second,
    /// Fourth-order accuracy (4 evaluations per coordinate).
    Fourth,
    /// Sixth-order accuracy (6 evaluations per coordinate).
    Sixth,
    /// Eighth-order accuracy (8 evaluations per coordinate).
    Eighth,
}

/// All supported orders, lowest first. Handy for iterating in tests and
/// convergence sweeps.
pub const ALL_ORDERS: [AccuracyOrder; 4] =
    [AccuracyOrder::Second, AccuracyOrder::Fourth, AccuracyOrder::Sixth, AccuracyOrder::Eighth];

impl AccuracyOrder {
    /// Return the stencil parameters for this order.
    ///
    /// Pure static lookup into the `const` coefficient tables; the returned
    /// [`Stencil`] borrows the tables and is never mutated.
    pub fn stencil(self) -> Stencil {
        match self {
            AccuracyOrder::Second => {
                Stencil { outer: &SECOND_OUTER, inner: &SECOND_INNER, denominator: 2.0 }
            }
            AccuracyOrder::Fourth => {
                Stencil { outer: &FOURTH_OUTER, inner: &FOURTH_INNER, denominator: 12.0 }
            }
            AccuracyOrder::Sixth => {
                Stencil { outer: &SIXTH_OUTER, inner: &SIXTH_INNER, denominator: 60.0 }
            }
            AccuracyOrder::Eighth => {
                Stencil { outer: &EIGHTH_OUTER, inner: &EIGHTH_INNER, denominator: 840.0 }
            }
        }
    }
}

impl FromStr for AccuracyOrder {
    type Err = FDError;

    /// Parse an accuracy order from its lowercase name or truncation order.
    ///
    /// Accepts `"second"`/`"2"`, `"fourth"`/`"4"`, `"sixth"`/`"6"`, and
    /// `"eighth"`/`"8"`, case-insensitively.
    ///
    /// # Errors
    /// Returns [`FDError::InvalidAccuracyOrder`] with the offending name for
    /// any other input.
    fn from_str(s: &str) -> FDResult<AccuracyOrder> {
        match s.to_ascii_lowercase().as_str() {
            "second" | "2" => Ok(AccuracyOrder::Second),
            "fourth" | "4" => Ok(AccuracyOrder::Fourth),
            "sixth" | "6" => Ok(AccuracyOrder::Sixth),
            "eighth" | "8" => Ok(AccuracyOrder::Eighth),
            _ => Err(FDError::InvalidAccuracyOrder { name: s.to_string() }),
        }
    }
}

/// Stencil — one central-difference formula as (weights, offsets, denominator).
///
/// Purpose
/// -------
/// Bundle the three parameter sets of a central-difference formula so the
/// engines can iterate weight/offset pairs without caring which accuracy
/// order produced them.
///
/// Fields
/// ------
/// - `outer`: the weights `c1` applied to each function evaluation.
/// - `inner`: the coordinate offsets `c2`, in units of the step `eps`.
/// - `denominator`: the common divisor of the weighted sum; the full divisor
///   of a first derivative is `denominator * eps`.
///
/// Invariants
/// ----------
/// - `outer.len() == inner.len()`, always even.
/// - Borrowed from `const` tables; a `Stencil` is never constructed from
///   runtime data.
#[derive(Debug, Clone, Copy)]
pub struct Stencil {
    pub outer: &'static [f64],
    pub inner: &'static [f64],
    pub denominator: f64,
}

impl Stencil {
    /// Number of function evaluations this stencil performs per coordinate.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Iterate `(weight, offset)` pairs in stencil order.
    pub(crate) fn steps(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.outer.iter().copied().zip(self.inner.iter().copied())
    }

    /// Sweep this stencil along coordinate `coord`, feeding each weighted
    /// evaluation to `accumulate`.
    ///
    /// For each stencil step, perturbs `work[coord]` by `offset * eps`,
    /// evaluates `f` at the perturbed point, restores the coordinate from
    /// `base`, and calls `accumulate(weight, value)`. The caller remains
    /// responsible for dividing the accumulated total by
    /// `denominator * eps`.
    ///
    /// `work` must equal `base` on entry and is guaranteed to equal it again
    /// on exit.
    pub(crate) fn sweep<F, T, A>(
        &self, work: &mut Point, base: &Point, coord: usize, eps: f64, f: &F, mut accumulate: A,
    ) where
        F: Fn(&Point) -> T,
        A: FnMut(f64, T),
    {
        for (weight, offset) in self.steps() {
            let value = eval_shifted(work, base, &[(coord, offset * eps)], f);
            accumulate(weight, value);
        }
    }
}

/// Evaluate `f` at a point shifted along one or two coordinates, then restore.
///
/// Applies every `(coordinate, delta)` shift to `work` in order, evaluates
/// `f(work)`, and resets each shifted coordinate to its value in `base`.
/// Shifts on the same coordinate add up, which is exactly what the Hessian's
/// diagonal entries need. Restoration copies from `base`, so the working
/// point is bit-identical to the caller's input between evaluations.
pub(crate) fn eval_shifted<F, T>(work: &mut Point, base: &Point, shifts: &[(usize, f64)], f: &F) -> T
where
    F: Fn(&Point) -> T,
{
    for &(coord, delta) in shifts {
        work[coord] += delta;
    }
    let value = f(work);
    for &(coord, _) in shifts {
        work[coord] = base[coord];
    }
    value
}
