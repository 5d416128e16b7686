//! Construction and destructuring of the fraction encoding used by the simplifier.

use crate::expr::{Expr, Primary};
use crate::primitive::int;
use rug::Integer;

/// Builds the expression `num * den^-1`, the encoding this module uses for the fraction
/// `num / den`.
pub(crate) fn make_fraction(num: Expr, den: Expr) -> Expr {
    num * Expr::Exp(Box::new(den), Box::new(Expr::integer(-1)))
}

/// Removes a numerical fraction from the factors of an [`Expr::Mul`].
///
/// A fraction appears among the factors as an integer (the numerator) together with an integer
/// raised to the power of -1 (the denominator). The first factor filling each role is taken out
/// of the list, and the pair is returned as plain integers.
///
/// By default both roles must be present. The `num_optional` and `den_optional` arguments relax
/// this per side, substituting an implied `1` for the missing role instead of failing.
pub(crate) fn extract_integer_fraction(
    factors: &mut Vec<Expr>,
    num_optional: bool,
    den_optional: bool,
) -> Option<(Integer, Integer)> {
    let mut num = None;
    let mut den = None;

    // `swap_remove` moves the last factor into the hole, so the index only advances when
    // nothing was taken
    let mut idx = 0;
    while idx < factors.len() && (num.is_none() || den.is_none()) {
        if num.is_none() && factors[idx].is_integer() {
            num = factors.swap_remove(idx).into_integer();
        } else if den.is_none() && factors[idx].is_integer_recip() {
            den = factors.swap_remove(idx).into_integer_recip();
        } else {
            idx += 1;
        }
    }

    match (num, den) {
        (Some(num), Some(den)) => Some((num, den)),
        (Some(num), None) if den_optional => Some((num, int(1))),
        (None, Some(den)) if num_optional => Some((int(1), den)),
        (None, None) if num_optional && den_optional => Some((int(1), int(1))),
        _ => None,
    }
}

/// Extracts an expression from the factors of an [`Expr::Mul`] that represents a fraction. This
/// is like [`extract_integer_fraction`], but the result of the function is an [`Expr`] holding
/// the extracted factors, and not the extracted numerator and denominator.
pub(crate) fn extract_fractional(factors: &mut Vec<Expr>) -> Option<Expr> {
    let mut num_idx = None;
    let mut den_idx = None;

    let mut idx = 0;
    while idx < factors.len() && (num_idx.is_none() || den_idx.is_none()) {
        if num_idx.is_none() && factors[idx].is_integer() {
            num_idx = Some(idx);
        } else if den_idx.is_none() && factors[idx].is_integer_recip() {
            den_idx = Some(idx);
        }

        idx += 1;
    }

    match (num_idx, den_idx) {
        (Some(num_idx), Some(den_idx)) => {
            // remove the larger index first, so that the smaller index is still valid
            let (first, second) = if num_idx > den_idx {
                (num_idx, den_idx)
            } else {
                (den_idx, num_idx)
            };
            Some(factors.swap_remove(first) * factors.swap_remove(second))
        },
        (Some(idx), None) | (None, Some(idx)) => Some(factors.swap_remove(idx)),
        (None, None) => None,
    }
}

/// A more aggressive version of [`extract_integer_fraction`] that pulls a numerical fraction out
/// of any kind of expression, replacing what it takes with the integer 1.
///
/// An integer expression becomes the numerator over an implied denominator of 1; an integer
/// raised to the power of -1 becomes the denominator under an implied numerator of 1; the
/// factors of a product are searched with [`extract_integer_fraction`], with the denominator
/// optional.
pub(crate) fn extract_explicit_frac(expr: &mut Expr) -> Option<(Integer, Integer)> {
    match expr {
        Expr::Primary(Primary::Integer(num)) => {
            Some((std::mem::replace(num, int(1)), int(1)))
        },
        Expr::Mul(factors) => extract_integer_fraction(factors, false, true),
        Expr::Exp(..) if expr.is_integer_recip() => {
            let den = std::mem::replace(expr, Expr::integer(1)).into_integer_recip()?;
            Some((int(1), den))
        },
        _ => None,
    }
}
