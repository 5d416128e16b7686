//! Structural pattern matching over expressions.
//!
//! A [`Pattern`] describes the *shape* of an expression: exact sub-expressions, function calls
//! with a given name and arity, products, and named wildcards that match any expression and
//! capture it. Matching is purely structural; exact comparisons use strict equality (see the
//! [`expr`](crate::expr) module), so a match never reports a false positive and never depends on
//! simplification.
//!
//! Product patterns deserve a note. A [`Pattern::Mul`] matches an expression by treating it as a
//! list of factors (a non-product expression is a list of one). Every non-wildcard element of the
//! pattern must match a **distinct** factor, searched with backtracking since factors are
//! unordered. The first wildcard element of the pattern does not pair with a single factor;
//! instead it binds the product of the factors left over once every other element is paired, the
//! lone leftover factor if there is exactly one, or `1` if there are none. This is what lets a
//! pattern like "anything times
//! `f(anything)`" match both `2 * x * f(y)` (capturing `2 * x`) and the bare `f(y)` (capturing
//! `1`).

use crate::expr::{Expr, Primary};
use std::collections::HashMap;

/// A pattern describing the shape of an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// Matches any expression, capturing it under the given name.
    ///
    /// If the same name appears multiple times in a pattern, every occurrence must capture
    /// strictly equal expressions for the match to succeed.
    Wild(String),

    /// Matches an expression strictly equal to the given expression.
    Exact(Expr),

    /// Matches a function call with the given name, whose arguments match the given patterns in
    /// order. The number of arguments must equal the number of patterns.
    Call(String, Vec<Pattern>),

    /// Matches a product of factors. See the [module-level documentation](self) for the matching
    /// rules.
    Mul(Vec<Pattern>),
}

/// The expressions captured by the wildcards of a successful match, keyed by wildcard name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings(HashMap<String, Expr>);

impl Bindings {
    /// Returns the expression captured by the wildcard with the given name.
    pub fn get(&self, name: &str) -> Option<&Expr> {
        self.0.get(name)
    }

    /// Records a captured expression, failing if the name is already bound to a different
    /// expression.
    fn bind(&mut self, name: &str, expr: Expr) -> bool {
        match self.0.get(name) {
            Some(existing) => *existing == expr,
            None => {
                self.0.insert(name.to_string(), expr);
                true
            },
        }
    }
}

impl Pattern {
    /// Matches this pattern against the given expression, returning the wildcard captures if the
    /// expression has the described shape.
    pub fn matches(&self, expr: &Expr) -> Option<Bindings> {
        let mut bindings = Bindings::default();
        if self.matches_with(expr, &mut bindings) {
            Some(bindings)
        } else {
            None
        }
    }

    /// Matches this pattern against the given expression, recording wildcard captures as they are
    /// found.
    ///
    /// On failure, `bindings` may be left holding captures from partially matched children;
    /// callers that need to retry must snapshot and restore it themselves.
    fn matches_with(&self, expr: &Expr, bindings: &mut Bindings) -> bool {
        match self {
            Self::Wild(name) => bindings.bind(name, expr.clone()),
            Self::Exact(target) => expr == target,
            Self::Call(name, patterns) => match expr {
                Expr::Primary(Primary::Call(call_name, args)) => {
                    call_name == name
                        && args.len() == patterns.len()
                        && patterns.iter()
                            .zip(args)
                            .all(|(pattern, arg)| pattern.matches_with(arg, bindings))
                },
                _ => false,
            },
            Self::Mul(patterns) => {
                // a non-product expression is matched as a product of one factor
                let factors = match expr {
                    Expr::Mul(factors) => factors.iter().collect::<Vec<_>>(),
                    other => vec![other],
                };

                // the first wildcard element collects the leftover factors; everything else must
                // pair up with a distinct factor
                let mut rest = None;
                let mut elements = Vec::with_capacity(patterns.len());
                for pattern in patterns {
                    match pattern {
                        Self::Wild(name) if rest.is_none() => rest = Some(name.as_str()),
                        pattern => elements.push(pattern),
                    }
                }

                if elements.len() > factors.len()
                    || (rest.is_none() && elements.len() != factors.len())
                {
                    return false;
                }

                let mut used = vec![false; factors.len()];
                if !assign_factors(&elements, &factors, &mut used, bindings) {
                    return false;
                }

                match rest {
                    Some(name) => {
                        let leftover = factors.iter()
                            .zip(&used)
                            .filter(|(_, used)| !**used)
                            .map(|(factor, _)| (*factor).clone())
                            .fold(Expr::Mul(Vec::new()), |product, factor| product * factor)
                            .downgrade();
                        bindings.bind(name, leftover)
                    },
                    None => true,
                }
            },
        }
    }
}

/// Assigns each element pattern to a distinct unused factor, backtracking over the possible
/// pairings. Factors are unordered, so an element that fails against one factor may still match
/// another; wildcard captures made along a failed branch are rolled back before the next attempt.
fn assign_factors(
    elements: &[&Pattern],
    factors: &[&Expr],
    used: &mut [bool],
    bindings: &mut Bindings,
) -> bool {
    let Some((element, remaining)) = elements.split_first() else {
        return true;
    };

    for (i, factor) in factors.iter().enumerate() {
        if used[i] {
            continue;
        }

        let snapshot = bindings.clone();
        used[i] = true;
        if element.matches_with(factor, bindings)
            && assign_factors(remaining, factors, used, bindings)
        {
            return true;
        }
        used[i] = false;
        *bindings = snapshot;
    }

    false
}

impl Expr {
    /// Returns every sub-expression matching the given pattern, in left-to-right post-order. The
    /// expression itself is included in the search, and structurally equal sub-expressions are
    /// reported once per occurrence.
    pub fn find(&self, pattern: &Pattern) -> Vec<Expr> {
        self.post_order_iter()
            .filter(|expr| pattern.matches(expr).is_some())
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    /// `w * f(w2)`, the shape of a term proportional to a call of `f`.
    fn coeff_times_f() -> Pattern {
        Pattern::Mul(vec![
            Pattern::Wild(String::from("w")),
            Pattern::Call(String::from("f"), vec![Pattern::Wild(String::from("w2"))]),
        ])
    }

    #[test]
    fn wild_captures_anything() {
        let pattern = Pattern::Wild(String::from("w"));
        let expr = Expr::symbol("x") + Expr::integer(1);
        let bindings = pattern.matches(&expr).unwrap();
        assert_eq!(bindings.get("w"), Some(&expr));
    }

    #[test]
    fn exact_uses_strict_equality() {
        let pattern = Pattern::Exact(Expr::symbol("a") * Expr::symbol("b"));
        assert!(pattern.matches(&(Expr::symbol("b") * Expr::symbol("a"))).is_some());
        assert!(pattern.matches(&Expr::symbol("a")).is_none());
    }

    #[test]
    fn call_checks_name_and_arity() {
        let pattern = Pattern::Call(String::from("f"), vec![Pattern::Wild(String::from("w"))]);
        let bindings = pattern.matches(&Expr::call("f", vec![Expr::symbol("x")])).unwrap();
        assert_eq!(bindings.get("w"), Some(&Expr::symbol("x")));

        assert!(pattern.matches(&Expr::call("g", vec![Expr::symbol("x")])).is_none());
        assert!(pattern
            .matches(&Expr::call("f", vec![Expr::symbol("x"), Expr::symbol("y")]))
            .is_none());
    }

    #[test]
    fn product_wildcard_collects_leftover_factors() {
        let expr = Expr::integer(2) * Expr::symbol("x") * Expr::call("f", vec![Expr::symbol("y")]);
        let bindings = coeff_times_f().matches(&expr).unwrap();
        assert_eq!(bindings.get("w"), Some(&(Expr::integer(2) * Expr::symbol("x"))));
        assert_eq!(bindings.get("w2"), Some(&Expr::symbol("y")));
    }

    #[test]
    fn product_wildcard_single_leftover_factor() {
        let expr = Expr::symbol("c") * Expr::call("f", vec![Expr::symbol("y")]);
        let bindings = coeff_times_f().matches(&expr).unwrap();
        assert_eq!(bindings.get("w"), Some(&Expr::symbol("c")));
    }

    #[test]
    fn product_matches_bare_expression_with_unit_coefficient() {
        let expr = Expr::call("f", vec![Expr::symbol("y")]);
        let bindings = coeff_times_f().matches(&expr).unwrap();
        assert_eq!(bindings.get("w"), Some(&Expr::integer(1)));
        assert_eq!(bindings.get("w2"), Some(&Expr::symbol("y")));
    }

    #[test]
    fn repeated_wildcard_must_capture_equal_expressions() {
        // `w * f(w)`: the coefficient must equal the call argument
        let pattern = Pattern::Mul(vec![
            Pattern::Wild(String::from("w")),
            Pattern::Call(String::from("f"), vec![Pattern::Wild(String::from("w"))]),
        ]);

        let matching = Expr::symbol("x") * Expr::call("f", vec![Expr::symbol("x")]);
        assert!(pattern.matches(&matching).is_some());

        let conflicting = Expr::symbol("y") * Expr::call("f", vec![Expr::symbol("x")]);
        assert!(pattern.matches(&conflicting).is_none());
    }

    #[test]
    fn backtracking_rolls_back_captures() {
        // the first pairing the search tries binds `a` to 2 and then fails; the match must
        // recover and bind `a` to 3 instead
        let pattern = Pattern::Mul(vec![
            Pattern::Call(String::from("f"), vec![Pattern::Wild(String::from("a"))]),
            Pattern::Exact(Expr::call("f", vec![Expr::integer(2)])),
        ]);
        let expr = Expr::call("f", vec![Expr::integer(2)])
            * Expr::call("f", vec![Expr::integer(3)]);

        let bindings = pattern.matches(&expr).unwrap();
        assert_eq!(bindings.get("a"), Some(&Expr::integer(3)));
    }

    #[test]
    fn product_without_wildcard_requires_exact_factor_count() {
        let pattern = Pattern::Mul(vec![
            Pattern::Exact(Expr::symbol("a")),
            Pattern::Exact(Expr::symbol("b")),
        ]);
        assert!(pattern.matches(&(Expr::symbol("b") * Expr::symbol("a"))).is_some());
        assert!(pattern
            .matches(&(Expr::symbol("a") * Expr::symbol("b") * Expr::symbol("c")))
            .is_none());
    }

    #[test]
    fn find_reports_matches_in_post_order() {
        let first = Expr::integer(2) * Expr::call("f", vec![Expr::symbol("x")]);
        let second = Expr::symbol("c") * Expr::call("f", vec![Expr::symbol("y")]);
        let expr = first.clone() + second.clone();

        // the bare calls match too, with a coefficient of 1; callers that only want syntactic
        // products must filter for `Expr::Mul` themselves
        let found = expr.find(&coeff_times_f());
        assert_eq!(found, vec![
            Expr::call("f", vec![Expr::symbol("x")]),
            first,
            Expr::call("f", vec![Expr::symbol("y")]),
            second,
        ]);
    }

    #[test]
    fn find_descends_into_call_arguments() {
        let inner = Expr::integer(3) * Expr::call("f", vec![Expr::symbol("x")]);
        let expr = Expr::call("g", vec![inner.clone()]);
        let found = expr.find(&coeff_times_f());
        assert_eq!(found, vec![
            Expr::call("f", vec![Expr::symbol("x")]),
            inner,
        ]);
    }
}
