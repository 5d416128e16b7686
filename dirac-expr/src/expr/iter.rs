use super::{Expr, Primary};

/// A non-recursive iterator over every node of an expression tree, in left-to-right post-order:
/// children first, parents after.
///
/// The arguments of function calls are part of the tree and are traversed like any other child
/// expression.
///
/// This iterator is created by [`Expr::post_order_iter`].
pub struct ExprIter<'a> {
    stack: Vec<&'a Expr>,
    last_visited: Option<&'a Expr>,
}

impl<'a> ExprIter<'a> {
    pub fn new(expr: &'a Expr) -> Self {
        Self {
            stack: vec![expr],
            last_visited: None,
        }
    }

    /// Pops the top of the stack, recording it as the most recently yielded node.
    fn visit(&mut self) -> Option<&'a Expr> {
        let expr = self.stack.pop()?;
        self.last_visited = Some(expr);
        Some(expr)
    }

    /// Whether the given node was the one yielded most recently. Compared by address, so equal
    /// subtrees at different positions in the tree stay distinct.
    fn is_last_visited(&self, expr: &'a Expr) -> bool {
        self.last_visited.is_some_and(|last| std::ptr::eq(last, expr))
    }
}

/// The contiguous children of an expression. [`Expr::Exp`] stores its children boxed, so the
/// iterator handles it separately.
fn children(expr: &Expr) -> &[Expr] {
    match expr {
        Expr::Primary(Primary::Call(_, args)) => args,
        Expr::Add(terms) => terms,
        Expr::Mul(factors) => factors,
        _ => &[],
    }
}

impl<'a> Iterator for ExprIter<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let expr = *self.stack.last()?;
            if let Expr::Exp(lhs, rhs) = expr {
                if self.is_last_visited(rhs) {
                    return self.visit();
                }
                self.stack.push(rhs);
                self.stack.push(lhs);
                continue;
            }

            match children(expr).last() {
                Some(last) if !self.is_last_visited(last) => {
                    for child in children(expr).iter().rev() {
                        self.stack.push(child);
                    }
                },
                _ => return self.visit(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn post_order_includes_call_args() {
        // x * f(y + 1)
        let expr = Expr::symbol("x") * Expr::call("f", vec![
            Expr::symbol("y") + Expr::integer(1),
        ]);

        let visited = expr.post_order_iter()
            .map(|expr| expr.to_string())
            .collect::<Vec<_>>();
        assert_eq!(visited, vec!["x", "y", "1", "y + 1", "f(y + 1)", "x * f(y + 1)"]);
    }
}
