//! Substitution of sub-expressions.

use super::{Expr, Primary};

impl Expr {
    /// Replaces sub-expressions of this expression according to the given mapping, returning a
    /// new expression.
    ///
    /// All replacements are made **simultaneously**, in a single top-down pass. If an expression
    /// strictly equals the left-hand side of a mapping pair, it becomes the right-hand side, and
    /// the replacement is **not** searched for further matches, so one pair can never rewrite the
    /// output of another. When several left-hand sides strictly equal the same expression, the
    /// pair listed first wins.
    ///
    /// Sums and products are rebuilt through the [`Add`](std::ops::Add) and
    /// [`Mul`](std::ops::Mul) operators, so a replacement that splices a sum into a sum (or a
    /// product into a product) is flattened into the parent's list of children.
    pub fn subs(&self, mapping: &[(Expr, Expr)]) -> Expr {
        if let Some((_, replacement)) = mapping.iter().find(|(old, _)| self == old) {
            return replacement.clone();
        }

        match self {
            Self::Primary(Primary::Call(name, args)) => Self::Primary(Primary::Call(
                name.clone(),
                args.iter().map(|arg| arg.subs(mapping)).collect(),
            )),
            Self::Primary(primary) => Self::Primary(primary.clone()),
            Self::Add(terms) => terms.iter()
                .map(|term| term.subs(mapping))
                .fold(Self::Add(Vec::new()), |terms, term| terms + term)
                .downgrade(),
            Self::Mul(factors) => factors.iter()
                .map(|factor| factor.subs(mapping))
                .fold(Self::Mul(Vec::new()), |factors, factor| factors * factor)
                .downgrade(),
            Self::Exp(base, exp) => Self::Exp(
                Box::new(base.subs(mapping)),
                Box::new(exp.subs(mapping)),
            ),
        }
    }

    /// Replaces every occurrence of the symbol with the given name by the replacement
    /// expression, returning a new expression.
    pub fn subs_symbol(&self, name: &str, replacement: &Expr) -> Expr {
        self.subs(&[(Expr::symbol(name), replacement.clone())])
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn simultaneous_replacement() {
        // `x` becomes `y` at the same time as `y` becomes `z`; a sequential replacement would
        // produce `z + z`
        let expr = Expr::symbol("x") + Expr::symbol("y");
        let mapping = [
            (Expr::symbol("x"), Expr::symbol("y")),
            (Expr::symbol("y"), Expr::symbol("z")),
        ];
        assert_eq!(expr.subs(&mapping), Expr::symbol("y") + Expr::symbol("z"));
    }

    #[test]
    fn replacement_is_not_rescanned() {
        let expr = Expr::symbol("x");
        let mapping = [(Expr::symbol("x"), Expr::symbol("x") + Expr::integer(1))];
        assert_eq!(expr.subs(&mapping), Expr::symbol("x") + Expr::integer(1));
    }

    #[test]
    fn spliced_sum_is_flattened() {
        let expr = Expr::symbol("a") + Expr::symbol("x");
        let mapping = [(Expr::symbol("x"), Expr::symbol("b") + Expr::symbol("c"))];
        assert_eq!(expr.subs(&mapping), Expr::Add(vec![
            Expr::symbol("a"),
            Expr::symbol("b"),
            Expr::symbol("c"),
        ]));
    }

    #[test]
    fn replaces_inside_call_args() {
        let expr = Expr::call("f", vec![Expr::symbol("n")]);
        let shifted = expr.subs_symbol("n", &(Expr::symbol("n") + Expr::integer(1)));
        assert_eq!(shifted, Expr::call("f", vec![
            Expr::symbol("n") + Expr::integer(1),
        ]));
    }

    #[test]
    fn replaces_equal_products_in_any_order() {
        let term = Expr::symbol("a") * Expr::symbol("b");
        let expr = term + Expr::symbol("c");
        // the mapping key lists the factors in the opposite order; strict equality does not care
        let key = Expr::symbol("b") * Expr::symbol("a");
        let result = expr.subs(&[(key, Expr::symbol("d"))]);
        assert_eq!(result, Expr::symbol("d") + Expr::symbol("c"));
    }

    #[test]
    fn replaces_in_exponents() {
        let expr = Expr::Exp(
            Box::new(Expr::symbol("x")),
            Box::new(Expr::symbol("n")),
        );
        let result = expr.subs_symbol("n", &Expr::integer(2));
        assert_eq!(result, Expr::Exp(
            Box::new(Expr::symbol("x")),
            Box::new(Expr::integer(2)),
        ));
    }
}
