//! Rules applied to powers: the identity exponents and bases, collapsing towers of powers, and
//! folding integer powers.

use crate::expr::Expr;
use crate::simplify::{
    rules::do_power,
    step::{Step, StepCollector},
};
use rug::{ops::Pow, Integer};

/// `a^0 = 1`
///
/// This rule also sends `0^0` to `1`, taking the combinatorial convention.
pub fn power_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |_, rhs| {
        rhs.as_integer()?.is_zero().then(|| Expr::integer(1))
    })?;

    step_collector.push(Step::PowerZero);
    Some(opt)
}

/// `0^a = 0`
///
/// [`power_zero`] runs first, so `0^0` never reaches this rule.
pub fn power_zero_left(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |lhs, _| {
        lhs.as_integer()?.is_zero().then(|| Expr::integer(0))
    })?;

    step_collector.push(Step::PowerZeroLeft);
    Some(opt)
}

/// `1^a = 1`
pub fn power_one_left(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |lhs, _| {
        (lhs.as_integer()? == &1).then(|| Expr::integer(1))
    })?;

    step_collector.push(Step::PowerOneLeft);
    Some(opt)
}

/// `a^1 = a`
pub fn power_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |lhs, rhs| {
        (rhs.as_integer()? == &1).then(|| lhs.clone())
    })?;

    step_collector.push(Step::PowerOne);
    Some(opt)
}

/// `(a^b)^c = a^(b*c)`
pub fn power_power(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |lhs, rhs| {
        let Expr::Exp(base, exponent) = lhs else {
            return None;
        };
        Some(Expr::Exp(base.clone(), Box::new(*exponent.clone() * rhs.clone())))
    })?;

    step_collector.push(Step::PowerPower);
    Some(opt)
}

/// Folds a power of two integers into a single integer.
///
/// Negative exponents are left alone; an integer raised to the power of -1 is the canonical
/// representation of a fraction's denominator.
pub fn integer(expr: &Expr, _: &mut dyn StepCollector<Step>) -> Option<Expr> {
    do_power(expr, |lhs, rhs| {
        let exponent = rhs.as_integer()?.to_u32()?;
        Some(Expr::integer(Integer::from(lhs.as_integer()?.pow(exponent))))
    })
}

/// Tries each power rule in order, returning the first rewrite.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    power_zero(expr, step_collector)
        .or_else(|| power_zero_left(expr, step_collector))
        .or_else(|| power_one_left(expr, step_collector))
        .or_else(|| power_one(expr, step_collector))
        .or_else(|| power_power(expr, step_collector))
        .or_else(|| integer(expr, step_collector))
}
