//! Searching an expression for Dirac delta terms.

use dirac_expr::{Expr, Pattern};
use once_cell::sync::Lazy;

use crate::delta::DELTA;

/// The pattern `w * δ(w2)`, where `w` and `w2` are wildcards.
static DELTA_TERM: Lazy<Pattern> = Lazy::new(|| Pattern::Mul(vec![
    Pattern::Wild("w".to_string()),
    Pattern::Call(DELTA.to_string(), vec![Pattern::Wild("w2".to_string())]),
]));

/// Returns all sub-expressions of the form `x * δ(y)` in the given expression.
///
/// Only sub-expressions that are syntactically a product are returned. A bare `δ(y)` matches the
/// pattern with a coefficient of 1, but is excluded by the filter; the splitter and normalizer
/// only ever see explicit products.
///
/// The result may contain duplicates if an identical term occurs at several positions. A product
/// with more than one delta factor is still returned; the one-delta invariant is policed by
/// [`split_delta_term`](crate::split::split_delta_term), not here.
pub fn find_delta_terms(expr: &Expr) -> Vec<Expr> {
    expr.find(&DELTA_TERM)
        .into_iter()
        .filter(|term| matches!(term, Expr::Mul(_)))
        .collect()
}
