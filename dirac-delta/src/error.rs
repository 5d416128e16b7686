//! Errors reported when splitting or normalizing Dirac delta terms.

use dirac_expr::Expr;
use thiserror::Error;

/// Errors that can occur while splitting or normalizing a Dirac delta term.
///
/// All of these are deterministic precondition violations; none are transient. They are never
/// caught internally, and the first one raised aborts a whole-expression normalization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeltaError {
    /// The expression handed to the splitter is not structurally a product.
    #[error("unexpected expression `{0}`: not a product")]
    NotAProduct(Expr),

    /// More than one direct factor of the product is a Dirac delta.
    #[error("unexpected expression `{0}`: more than one delta")]
    MultipleDeltas(Expr),

    /// No direct factor of the product is a Dirac delta.
    #[error("unexpected expression `{0}`: not proportional to a delta")]
    NoDelta(Expr),

    /// Neither unit shift of the index symbol brings the term's delta argument to the target.
    #[error("cannot bring `{term}` to `δ({target})`")]
    CannotNormalize {
        /// The term that could not be normalized.
        term: Expr,
        /// The desired delta argument.
        target: Expr,
    },
}

#[cfg(test)]
mod tests {
    use dirac_expr::Expr;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn display() {
        let err = DeltaError::NotAProduct(Expr::symbol("x") + Expr::symbol("y"));
        assert_eq!(err.to_string(), "unexpected expression `x + y`: not a product");

        let err = DeltaError::CannotNormalize {
            term: Expr::symbol("a") * Expr::symbol("b"),
            target: Expr::symbol("n"),
        };
        assert_eq!(err.to_string(), "cannot bring `a * b` to `δ(n)`");
    }
}
