//! Construction and recognition of Dirac delta applications.
//!
//! A Dirac delta is represented as an ordinary one-argument function call named [`DELTA`]. The
//! recognizers here check both the name and the arity, so a call with the right name but the
//! wrong number of arguments is not treated as a delta.

use dirac_expr::{Expr, Primary};

/// The well-known function name of the Dirac delta.
pub const DELTA: &str = "DiracDelta";

/// Creates the expression `δ(arg)`.
pub fn delta(arg: Expr) -> Expr {
    Expr::call(DELTA, vec![arg])
}

/// Returns true if the given expression is a Dirac delta application.
pub fn is_delta(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::Primary(Primary::Call(name, args)) if name == DELTA && args.len() == 1
    )
}

/// Returns the argument of a Dirac delta application, or `None` if the expression is not one.
pub fn delta_arg(expr: &Expr) -> Option<&Expr> {
    match expr {
        Expr::Primary(Primary::Call(name, args)) if name == DELTA && args.len() == 1 => {
            args.first()
        },
        _ => None,
    }
}
