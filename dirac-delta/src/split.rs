//! Splitting a Dirac delta term into a coefficient and a delta factor.

use dirac_expr::Expr;

use crate::delta::is_delta;
use crate::error::DeltaError;

/// Splits an expression of the form `x * δ(y) * z` into the pair `(x * z, δ(y))`.
///
/// The coefficient is the product of the non-delta factors in their original order; an empty
/// product collapses to `1` and a single factor is returned as itself.
///
/// Fails with [`DeltaError::NotAProduct`] if the expression is not syntactically a product, with
/// [`DeltaError::MultipleDeltas`] if more than one direct factor is a Dirac delta, and with
/// [`DeltaError::NoDelta`] if no direct factor is one.
pub fn split_delta_term(term: &Expr) -> Result<(Expr, Expr), DeltaError> {
    let Expr::Mul(factors) = term else {
        return Err(DeltaError::NotAProduct(term.clone()));
    };

    let mut coeff_factors = Vec::with_capacity(factors.len());
    let mut delta = None;
    for factor in factors {
        if is_delta(factor) {
            if delta.is_none() {
                delta = Some(factor.clone());
            } else {
                return Err(DeltaError::MultipleDeltas(term.clone()));
            }
        } else {
            coeff_factors.push(factor.clone());
        }
    }

    match delta {
        Some(delta) => Ok((Expr::Mul(coeff_factors).downgrade(), delta)),
        None => Err(DeltaError::NoDelta(term.clone())),
    }
}
