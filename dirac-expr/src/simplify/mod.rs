//! Reduction of expressions to a canonical form.
//!
//! [`simplify`] repeatedly applies the rewriting rules in [`rules`] to every node of the tree,
//! in as many passes as it takes for the expression to stop changing. The rules cover combining
//! like terms and factors, dropping additive and multiplicative identities, basic power
//! identities, and distribution of multiplication over addition. Each applied rule reports the
//! [`Step`] it performed; use [`simplify_with_steps`] to collect them.

pub(crate) mod fraction;
pub mod rules;
pub mod step;

use crate::expr::{Expr, Primary};
use step::{Step, StepCollector};

/// Recursive core of the simplifier. Returns the simplified expression and whether any rule
/// fired anywhere in the tree.
fn inner_simplify(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> (Expr, bool) {
    /// Simplifies every child in place, reporting whether any of them changed.
    fn simplify_children(
        children: &mut [Expr],
        step_collector: &mut dyn StepCollector<Step>,
    ) -> bool {
        let mut changed = false;
        for child in children.iter_mut() {
            let (new_child, child_changed) = inner_simplify(child, step_collector);
            *child = new_child;
            changed |= child_changed;
        }
        changed
    }

    let mut expr = expr.clone();
    let mut rewritten = false;

    loop {
        let mut pass_changed = false;

        // the rules see the node itself first
        if let Some(new_expr) = rules::all(&expr, step_collector) {
            expr = new_expr;
            pass_changed = true;
            rewritten = true;
        }

        // then the children, which may expose new rule applications on the next pass
        let children_changed = match expr {
            Expr::Primary(Primary::Call(_, ref mut args)) => {
                simplify_children(args, step_collector)
            },
            // any other leaf is already fully simplified
            Expr::Primary(_) => break,
            Expr::Add(ref mut terms) => simplify_children(terms, step_collector),
            Expr::Mul(ref mut factors) => simplify_children(factors, step_collector),
            Expr::Exp(ref mut base, ref mut exp) => {
                let (new_base, base_changed) = inner_simplify(base, step_collector);
                let (new_exp, exp_changed) = inner_simplify(exp, step_collector);
                **base = new_base;
                **exp = new_exp;
                base_changed || exp_changed
            },
        };

        pass_changed |= children_changed;
        rewritten |= children_changed;

        if !pass_changed {
            break;
        }
    }

    (expr, rewritten)
}

/// Reduces the expression to the simplifier's canonical form.
pub fn simplify(expr: &Expr) -> Expr {
    inner_simplify(expr, &mut ()).0
}

/// Reduces the expression to the simplifier's canonical form, collecting every [`Step`] taken
/// along the way in the order the rules fired.
pub fn simplify_with_steps(expr: &Expr) -> (Expr, Vec<Step>) {
    let mut steps = Vec::new();
    let expr = inner_simplify(expr, &mut steps).0;
    (expr, steps)
}
