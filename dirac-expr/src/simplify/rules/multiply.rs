//! Rules applied to products: flattening nested products, dropping ones, annihilating on zero,
//! reducing numerical fractions, and combining like factors.

use crate::expr::Expr;
use crate::simplify::{
    fraction::{extract_integer_fraction, make_fraction},
    rules::do_multiply,
    step::{Step, StepCollector},
};

/// `a*(b*c) = a*b*c`
///
/// The multiplication counterpart of [`flatten_terms`](super::add::flatten_terms): substitution
/// can leave a product nested inside the factor list of another product, and degenerate products
/// with zero or one factor are downgraded here.
pub fn flatten_factors(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |factors| {
        if factors.len() >= 2 && !factors.iter().any(|factor| matches!(factor, Expr::Mul(_))) {
            return None;
        }

        let mut new_factors = Vec::with_capacity(factors.len());
        for factor in factors {
            match factor {
                Expr::Mul(inner) => new_factors.extend(inner.iter().cloned()),
                factor => new_factors.push(factor.clone()),
            }
        }

        Some(Expr::Mul(new_factors).downgrade())
    })?;

    // the closure has to stay `Copy`, so the step is recorded after it runs
    step_collector.push(Step::FlattenFactors);
    Some(opt)
}

/// `a*0 = 0`
pub fn multiply_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |factors| {
        factors.iter()
            .any(|factor| factor.as_integer().is_some_and(|n| n.is_zero()))
            .then(|| Expr::integer(0))
    })?;

    step_collector.push(Step::MultiplyZero);
    Some(opt)
}

/// `a*1 = a`
pub fn multiply_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |factors| {
        let new_factors = factors.iter()
            .filter(|factor| factor.as_integer().map_or(true, |n| n != &1))
            .cloned()
            .collect::<Vec<_>>();

        (new_factors.len() != factors.len()).then(|| Expr::Mul(new_factors).downgrade())
    })?;

    step_collector.push(Step::MultiplyOne);
    Some(opt)
}

/// Reduces a numerical fraction to lowest terms.
///
/// `4/12 = 1/3`
/// `12/4 = 3`
pub fn reduce_numerical_fraction(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |factors| {
        let mut new_factors = factors.to_vec();
        let (numerator, denominator) = extract_integer_fraction(&mut new_factors, false, false)?;

        let gcd = numerator.clone().gcd(&denominator);
        if gcd == 1 {
            return None;
        }

        // put the reduced fraction back among the factors
        Some(Expr::Mul(new_factors) * make_fraction(
            Expr::integer(numerator / &gcd),
            Expr::integer(denominator / &gcd),
        ))
    })?;

    step_collector.push(Step::ReduceFraction);
    Some(opt)
}

/// Combines factors that share a base, or integer factors that share an exponent.
///
/// `a^b*a^c = a^(b+c)`
/// `a^c*b^c = (a*b)^c`
pub fn combine_like_factors(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |factors| {
        let mut new_factors = factors.to_vec();

        /// Splits an expression into its base and exponent: `a^b` becomes `(a, b)`, and anything
        /// that is not a power is its own base with an exponent of 1.
        fn get_exp(expr: &Expr) -> (Expr, Expr) {
            match expr {
                Expr::Exp(lhs, rhs) => ((**lhs).clone(), (**rhs).clone()),
                expr => (expr.clone(), Expr::integer(1)),
            }
        }

        // quadratic scan, every factor checked against every later factor
        let mut idx = 0;
        while idx < new_factors.len() {
            let (mut base, mut exp) = get_exp(&new_factors[idx]);

            let mut other_idx = idx + 1;
            while other_idx < new_factors.len() {
                let (other_base, other_exp) = get_exp(&new_factors[other_idx]);

                if exp == other_exp && base.is_integer() && other_base.is_integer() {
                    // a^c*b^c = (a*b)^c, integer bases only
                    base *= other_base;
                    new_factors.swap_remove(other_idx);
                } else if base == other_base {
                    // a^b*a^c = a^(b+c)
                    exp += other_exp;
                    new_factors.swap_remove(other_idx);
                } else {
                    other_idx += 1;
                }
            }

            new_factors[idx] = if exp.as_integer().is_some_and(|n| n == &1) {
                base
            } else {
                Expr::Exp(Box::new(base), Box::new(exp))
            };

            idx += 1;
        }

        (new_factors.len() != factors.len()).then(|| Expr::Mul(new_factors).downgrade())
    })?;

    step_collector.push(Step::CombineLikeFactors);
    Some(opt)
}

/// Tries each product rule in order, returning the first rewrite.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    flatten_factors(expr, step_collector)
        .or_else(|| multiply_zero(expr, step_collector))
        .or_else(|| multiply_one(expr, step_collector))
        .or_else(|| reduce_numerical_fraction(expr, step_collector))
        .or_else(|| combine_like_factors(expr, step_collector))
}
