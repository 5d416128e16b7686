//! Implementation of the simplification rules.
//!
//! A rule is a function from an expression to `Some(expr)`, the rewritten expression, when the
//! rule applies, or `None` when it does not. Rules only look at the node they are given; the
//! driver in [`super`] walks the tree and brings every node here.

pub mod add;
pub mod distribute;
pub mod multiply;
pub mod power;

use crate::expr::Expr;
use super::step::{Step, StepCollector};

/// Runs the transformation on the terms of an [`Expr::Add`]. Any other node returns `None`.
pub(crate) fn do_add(expr: &Expr, f: impl Copy + Fn(&[Expr]) -> Option<Expr>) -> Option<Expr> {
    match expr {
        Expr::Add(terms) => f(terms),
        _ => None,
    }
}

/// Runs the transformation on the factors of an [`Expr::Mul`]. Any other node returns `None`.
pub(crate) fn do_multiply(expr: &Expr, f: impl Copy + Fn(&[Expr]) -> Option<Expr>) -> Option<Expr> {
    match expr {
        Expr::Mul(factors) => f(factors),
        _ => None,
    }
}

/// Runs the transformation on the base and exponent of an [`Expr::Exp`]. Any other node returns
/// `None`.
pub(crate) fn do_power(expr: &Expr, f: impl Copy + Fn(&Expr, &Expr) -> Option<Expr>) -> Option<Expr> {
    match expr {
        Expr::Exp(lhs, rhs) => f(lhs, rhs),
        _ => None,
    }
}

/// Applies all rules, stopping at the first one that rewrites the expression.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    add::all(expr, step_collector)
        .or_else(|| multiply::all(expr, step_collector))
        .or_else(|| power::all(expr, step_collector))
        .or_else(|| distribute::all(expr, step_collector))
}
