//! Rules applied to sums: flattening nested sums, dropping zeros, and combining like terms.

use crate::expr::{Expr, Primary};
use crate::simplify::{
    fraction::{extract_explicit_frac, make_fraction, extract_fractional},
    rules::do_add,
    step::{Step, StepCollector},
};

/// Fraction-aware `+=`. Two rational operands are added with the usual cross-multiplication;
/// anything else falls back to the plain `+=` operator.
fn add_assign(lhs: &mut Expr, rhs: Expr) {
    match (extract_explicit_frac(&mut lhs.clone()), extract_explicit_frac(&mut rhs.clone())) {
        (Some((a, b)), Some((c, d))) => {
            // a/b + c/d = (a*d + b*c) / (b*d)
            let num = a * &d + c * &b;
            let den = b * d;
            *lhs = if den == 1 {
                Expr::Primary(Primary::Integer(num))
            } else {
                make_fraction(
                    Expr::Primary(Primary::Integer(num)),
                    Expr::Primary(Primary::Integer(den)),
                )
            };
        },
        _ => *lhs += rhs,
    }
}

/// `a+(b+c) = a+b+c`
///
/// Substitution can splice a sum into the term list of another sum. The [`Expr::Add`]
/// implementation flattens when expressions are combined through it, but a term replaced in
/// place stays nested until this rule lifts its terms into the outer sum. Degenerate sums with
/// zero or one term are downgraded here as well.
pub fn flatten_terms(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_add(expr, |terms| {
        if terms.len() >= 2 && !terms.iter().any(|term| matches!(term, Expr::Add(_))) {
            return None;
        }

        let mut new_terms = Vec::with_capacity(terms.len());
        for term in terms {
            match term {
                Expr::Add(inner) => new_terms.extend(inner.iter().cloned()),
                term => new_terms.push(term.clone()),
            }
        }

        Some(Expr::Add(new_terms).downgrade())
    })?;

    // the closure has to stay `Copy`, so the step is recorded after it runs
    step_collector.push(Step::FlattenTerms);
    Some(opt)
}

/// `a+0 = a`
pub fn add_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_add(expr, |terms| {
        let new_terms = terms.iter()
            .filter(|term| term.as_integer().map_or(true, |num| !num.is_zero()))
            .cloned()
            .collect::<Vec<_>>();

        (new_terms.len() != terms.len()).then(|| Expr::Add(new_terms).downgrade())
    })?;

    step_collector.push(Step::AddZero);
    Some(opt)
}

/// Combines terms that differ only by an integer coefficient.
///
/// `a+a = 2a`
/// `2a+3a = 5a`
pub fn combine_like_terms(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_add(expr, |terms| {
        /// Splits a term into its rational coefficient and the product of its remaining factors.
        /// A term that is not an [`Expr::Mul`] carries a coefficient of 1, and a bare number a
        /// remainder of 1: `3*a` becomes `(3, a)`, `f(n)` becomes `(1, f(n))`, and `5` becomes
        /// `(5, 1)`.
        fn get_coeff(expr: &Expr) -> (Expr, Expr) {
            match expr {
                Expr::Primary(Primary::Integer(_)) => (expr.clone(), Expr::integer(1)),
                Expr::Mul(factors) => {
                    let mut factors = factors.clone();
                    let coeff = extract_fractional(&mut factors).unwrap_or(Expr::integer(1));
                    (coeff, Expr::Mul(factors).downgrade())
                },
                Expr::Exp(..) if expr.is_integer_recip() => (expr.clone(), Expr::integer(1)),
                _ => (Expr::integer(1), expr.clone()),
            }
        }

        let mut new_terms = terms.to_vec();
        let mut idx = 0;

        // quadratic scan, every term checked against every later term
        while idx < new_terms.len() {
            let (mut coeff, factors) = get_coeff(&new_terms[idx]);

            let mut other_idx = idx + 1;
            while other_idx < new_terms.len() {
                let (other_coeff, other_factors) = get_coeff(&new_terms[other_idx]);

                // n*a + m*a = (n+m)*a, requiring strictly equal factors
                if factors == other_factors {
                    add_assign(&mut coeff, other_coeff);
                    new_terms.swap_remove(other_idx);
                } else {
                    other_idx += 1;
                }
            }

            new_terms[idx] = if coeff.as_integer().is_some_and(|num| num == &1) {
                factors
            } else {
                coeff * factors
            };
            idx += 1;
        }

        (new_terms.len() != terms.len()).then(|| Expr::Add(new_terms).downgrade())
    })?;

    step_collector.push(Step::CombineLikeTerms);
    Some(opt)
}

/// Tries each sum rule in order, returning the first rewrite.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    flatten_terms(expr, step_collector)
        .or_else(|| add_zero(expr, step_collector))
        .or_else(|| combine_like_terms(expr, step_collector))
}
