//! Rules that distribute products over sums, and powers over products.

use crate::expr::Expr;
use crate::simplify::{
    rules::{do_multiply, do_power},
    step::{Step, StepCollector},
};

/// `a*(b+c) = a*b + a*c`
pub fn distributive_property(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |factors| {
        // distribute every other factor over the first sum found
        let idx = factors.iter().position(|factor| matches!(factor, Expr::Add(_)))?;
        let mut rest = factors.to_vec();
        let Expr::Add(terms) = rest.swap_remove(idx) else {
            unreachable!()
        };

        Some(Expr::Add(terms.into_iter()
            .map(|term| Expr::Mul(rest.clone()) * term)
            .collect()))
    })?;

    step_collector.push(Step::DistributiveProperty);
    Some(opt)
}

/// `(a*b)^c = a^c * b^c`
pub fn distribute_power(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |lhs, rhs| {
        let Expr::Mul(factors) = lhs else {
            return None;
        };

        Some(Expr::Mul(factors.iter()
            .map(|factor| Expr::Exp(Box::new(factor.clone()), Box::new(rhs.clone())))
            .collect()))
    })?;

    step_collector.push(Step::DistributePower);
    Some(opt)
}

/// Applies all distribution rules.
///
/// Distribution can grow an expression rather than shrink it, but the expanded form is what lets
/// the addition rules cancel and combine terms across a product.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    distributive_property(expr, step_collector)
        .or_else(|| distribute_power(expr, step_collector))
}
