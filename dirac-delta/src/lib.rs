//! Finding, splitting, and shift-normalizing Dirac delta terms in symbolic expressions.
//!
//! Expressions arising from discretized equations often contain a sum of terms proportional to
//! `δ(g(n))` for varying `g`. This crate rewrites such sums so that all deltas share the same
//! argument, exploiting the sifting property `δ(n + k) = δ(n)` under unit integer shifts of the
//! index symbol `n`:
//!
//! ```
//! use dirac_delta::{delta, normalize_delta_terms};
//! use dirac_expr::Expr;
//!
//! let n = Expr::symbol("n");
//! let expr = Expr::call("f", vec![n.clone()]) * delta(n.clone() - Expr::integer(1))
//!     + Expr::call("g", vec![n.clone()]) * delta(n.clone() + Expr::integer(1));
//!
//! // f(n) δ(n - 1) + g(n) δ(n + 1) = f(n + 1) δ(n) + g(n - 1) δ(n)
//! let normalized = normalize_delta_terms(&expr, &n).unwrap();
//! assert_eq!(
//!     normalized,
//!     Expr::call("f", vec![n.clone() + Expr::integer(1)]) * delta(n.clone())
//!         + Expr::call("g", vec![n.clone() - Expr::integer(1)]) * delta(n.clone()),
//! );
//! ```
//!
//! The shift search is deliberately restricted to the two unit shifts `+1` and `-1`, tried in
//! that order. Scaled or otherwise nonlinear delta arguments are reported as
//! [`DeltaError::CannotNormalize`] rather than solved for.
//!
//! # Features
//!
//! - `serde`: Derives serde traits for the expression types of [`dirac_expr`].

pub mod delta;
pub mod error;
pub mod find;
pub mod normalize;
pub mod split;

pub use delta::{delta, delta_arg, is_delta, DELTA};
pub use error::DeltaError;
pub use find::find_delta_terms;
pub use normalize::{
    normalize_delta_term, normalize_delta_term_with, normalize_delta_terms,
    normalize_delta_terms_with, INDEX_SYMBOL,
};
pub use split::split_delta_term;
