//! Normalization of Dirac delta terms to a common argument.
//!
//! Normalization exploits the sifting property `δ(n + k) = δ(n)`: shifting the index symbol of a
//! delta's argument by an integer amount is compensated by applying the same shift to the term's
//! coefficient. The search is deliberately restricted to the two unit shifts, tried in the fixed
//! order `+1` then `-1`, so the result is deterministic even when both shifts would match.

use dirac_expr::consts::ONE;
use dirac_expr::{simplify, Expr};

use crate::delta::{delta, delta_arg};
use crate::error::DeltaError;
use crate::find::find_delta_terms;
use crate::split::split_delta_term;

/// The default index symbol shifted by the normalizer.
///
/// The symbol's identity is shared across all calls of a normalization pass so that shifts
/// compose correctly. Use the `*_with` variants to thread a different index symbol through.
pub const INDEX_SYMBOL: &str = "n";

/// Given a term of the form `f(n) * δ(g(n))`, shifts [`INDEX_SYMBOL`] such that `g(n)` becomes
/// `target`.
///
/// See [`normalize_delta_term_with`].
pub fn normalize_delta_term(term: &Expr, target: &Expr) -> Result<Expr, DeltaError> {
    normalize_delta_term_with(term, target, INDEX_SYMBOL)
}

/// Given a term of the form `f(index) * δ(g(index))`, shifts the index symbol such that
/// `g(index)` becomes `target`.
///
/// If the delta's argument is already strictly equal to the target, the term is returned
/// unchanged. Otherwise the two unit shifts are tried in the fixed order `+1` then `-1`: the
/// shift is substituted into the delta's argument, the result is simplified and compared with
/// the target as given. On the first match, the same substitution is applied to the coefficient
/// (which is *not* simplified further) and `coeff * δ(target)` is returned; a coefficient of 1
/// produces a bare `δ(target)`.
///
/// The target does not have to mention the index symbol at all; a shift still succeeds if the
/// shifted argument simplifies to exactly the target.
///
/// Fails with [`DeltaError::CannotNormalize`] when neither unit shift reconciles the delta's
/// argument with the target, and propagates the splitter's failures unchanged.
pub fn normalize_delta_term_with(
    term: &Expr,
    target: &Expr,
    index: &str,
) -> Result<Expr, DeltaError> {
    let (coeff, delta_factor) = split_delta_term(term)?;
    let Some(arg) = delta_arg(&delta_factor) else {
        unreachable!()
    };

    if arg == target {
        return Ok(term.clone());
    }

    for shift in [1, -1] {
        let shifted = Expr::symbol(index) + Expr::integer(shift);
        let arg_new = simplify(&arg.subs_symbol(index, &shifted));
        if &arg_new == target {
            let coeff_new = coeff.subs_symbol(index, &shifted);
            return Ok(if coeff_new == *ONE {
                delta(target.clone())
            } else {
                coeff_new * delta(target.clone())
            });
        }
    }

    Err(DeltaError::CannotNormalize {
        term: term.clone(),
        target: target.clone(),
    })
}

/// Normalizes all Dirac delta terms in the given expression such that they share the argument
/// `target`.
///
/// See [`normalize_delta_terms_with`].
pub fn normalize_delta_terms(expr: &Expr, target: &Expr) -> Result<Expr, DeltaError> {
    normalize_delta_terms_with(expr, target, INDEX_SYMBOL)
}

/// Normalizes all Dirac delta terms in the given expression such that they share the argument
/// `target`, shifting the given index symbol.
///
/// Every distinct term found by [`find_delta_terms`] is normalized with
/// [`normalize_delta_term_with`], and the resulting mapping is applied to the expression in a
/// single simultaneous substitution pass. Terms that are already normalized map to themselves.
/// The first error raised by a single-term normalization aborts the whole pass.
pub fn normalize_delta_terms_with(
    expr: &Expr,
    target: &Expr,
    index: &str,
) -> Result<Expr, DeltaError> {
    let mut mapping: Vec<(Expr, Expr)> = Vec::new();
    for term in find_delta_terms(expr) {
        if mapping.iter().any(|(old, _)| old == &term) {
            continue;
        }

        let normalized = normalize_delta_term_with(&term, target, index)?;
        mapping.push((term, normalized));
    }

    Ok(expr.subs(&mapping))
}

#[cfg(test)]
mod tests {
    use dirac_expr::Expr;
    use pretty_assertions::assert_eq;
    use crate::delta::delta;
    use super::*;

    fn n() -> Expr {
        Expr::symbol("n")
    }

    fn call_on_n(name: &str) -> Expr {
        Expr::call(name, vec![n()])
    }

    fn call_on(name: &str, arg: Expr) -> Expr {
        Expr::call(name, vec![arg])
    }

    #[test]
    fn already_normalized_terms_are_returned_unchanged() {
        let term = call_on_n("f") * delta(n());
        assert_eq!(normalize_delta_term(&term, &n()).unwrap(), term);
    }

    #[test]
    fn fast_path_compares_up_to_term_order() {
        // δ(k + 1) with target 1 + k: strictly equal, no shift needed
        let term = call_on_n("f") * delta(Expr::symbol("k") + Expr::integer(1));
        let target = Expr::integer(1) + Expr::symbol("k");
        assert_eq!(normalize_delta_term(&term, &target).unwrap(), term);
    }

    #[test]
    fn shifts_up_by_one() {
        // f(n) δ(n - 1) becomes f(n + 1) δ(n)
        let term = call_on_n("f") * delta(n() - Expr::integer(1));
        assert_eq!(
            normalize_delta_term(&term, &n()).unwrap(),
            call_on("f", n() + Expr::integer(1)) * delta(n()),
        );
    }

    #[test]
    fn shifts_down_by_one() {
        // f(n) δ(n + 1) becomes f(n - 1) δ(n)
        let term = call_on_n("f") * delta(n() + Expr::integer(1));
        assert_eq!(
            normalize_delta_term(&term, &n()).unwrap(),
            call_on("f", n() - Expr::integer(1)) * delta(n()),
        );
    }

    #[test]
    fn rejects_non_unit_shifts() {
        // no unit shift reconciles a scaled argument
        let term = call_on_n("f") * delta(Expr::integer(2) * n());
        assert_eq!(
            normalize_delta_term(&term, &n()),
            Err(DeltaError::CannotNormalize {
                term,
                target: n(),
            }),
        );
    }

    #[test]
    fn propagates_split_failures() {
        let term = Expr::symbol("a") * Expr::symbol("b");
        assert_eq!(
            normalize_delta_term(&term, &n()),
            Err(DeltaError::NoDelta(term)),
        );
    }

    #[test]
    fn prefers_the_positive_shift() {
        // δ(k + n - n): both shifts cancel the index symbol, so +1 must win, which shows in the
        // shifted coefficient
        let arg = Expr::symbol("k") + n() - n();
        let term = call_on_n("f") * delta(arg);
        assert_eq!(
            normalize_delta_term(&term, &Expr::symbol("k")).unwrap(),
            call_on("f", n() + Expr::integer(1)) * delta(Expr::symbol("k")),
        );
    }

    #[test]
    fn unit_coefficient_produces_a_bare_delta() {
        let term = Expr::Mul(vec![Expr::integer(1), delta(n() - Expr::integer(1))]);
        assert_eq!(normalize_delta_term(&term, &n()).unwrap(), delta(n()));
    }

    #[test]
    fn threads_a_custom_index_symbol() {
        let m = Expr::symbol("m");
        let term = call_on("f", m.clone()) * delta(m.clone() - Expr::integer(1));
        assert_eq!(
            normalize_delta_term_with(&term, &m, "m").unwrap(),
            call_on("f", m.clone() + Expr::integer(1)) * delta(m.clone()),
        );

        // the default index symbol does not appear in the term, so no shift can change anything
        assert_eq!(
            normalize_delta_term(&term, &m),
            Err(DeltaError::CannotNormalize {
                term,
                target: m,
            }),
        );
    }

    #[test]
    fn normalizes_every_term_of_an_expression() {
        let expr = call_on_n("f") * delta(n() - Expr::integer(1))
            + call_on_n("g") * delta(n())
            + call_on_n("h") * delta(n() + Expr::integer(1));
        assert_eq!(
            normalize_delta_terms(&expr, &n()).unwrap(),
            call_on("f", n() + Expr::integer(1)) * delta(n())
                + call_on_n("g") * delta(n())
                + call_on("h", n() - Expr::integer(1)) * delta(n()),
        );
    }

    #[test]
    fn repeated_terms_are_normalized_once() {
        let term = call_on_n("f") * delta(n() - Expr::integer(1));
        let expr = Expr::Add(vec![term.clone(), term]);
        let normalized = call_on("f", n() + Expr::integer(1)) * delta(n());
        assert_eq!(
            normalize_delta_terms(&expr, &n()).unwrap(),
            Expr::Add(vec![normalized.clone(), normalized]),
        );
    }

    #[test]
    fn bare_deltas_are_left_alone() {
        let expr = delta(n() - Expr::integer(1)) + call_on_n("f") * delta(n() - Expr::integer(1));
        assert_eq!(
            normalize_delta_terms(&expr, &n()).unwrap(),
            delta(n() - Expr::integer(1)) + call_on("f", n() + Expr::integer(1)) * delta(n()),
        );
    }

    #[test]
    fn expressions_without_deltas_are_unchanged() {
        let expr = Expr::symbol("a") + Expr::symbol("b") * call_on_n("f");
        assert_eq!(normalize_delta_terms(&expr, &n()).unwrap(), expr);
    }

    #[test]
    fn fails_fast_on_the_first_bad_term() {
        let bad = call_on_n("f") * delta(Expr::integer(2) * n());
        let expr = bad.clone() + call_on_n("g") * delta(n());
        assert_eq!(
            normalize_delta_terms(&expr, &n()),
            Err(DeltaError::CannotNormalize {
                term: bad,
                target: n(),
            }),
        );
    }

    #[test]
    fn repeated_runs_are_deterministic() {
        let expr = call_on_n("f") * delta(n() - Expr::integer(1))
            + call_on_n("g") * delta(n() + Expr::integer(1));
        let first = normalize_delta_terms(&expr, &n()).unwrap();
        let second = normalize_delta_terms(&expr, &n()).unwrap();
        assert_eq!(first, second);
    }
}
