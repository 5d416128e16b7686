//! A representation of mathematical expressions that is easy to manipulate algebraically.
//!
//! [`Expr`] stores an expression as a **flattened** tree: sums and products hold a list of an
//! arbitrary number of children, so `x + (y + z)` is a single [`Expr::Add`] node with _three_
//! children, `x`, `y`, and `z`. There is no text frontend; expressions are built with the
//! constructors ([`Expr::symbol`], [`Expr::integer`], [`Expr::call`]) and combined with the
//! standard operators, which flatten as they go.
//!
//! All submodules in this crate that deal with symbolic manipulation use [`Expr`], and any
//! occurrences of the word `expression` refer to this type.
//!
//! # Strict equality
//!
//! Deciding whether two expressions are *mathematically* equal is hard in general: `x^2 + 2x + 1`
//! and `(x + 1)^2` denote the same function, but seeing that requires expansion or factoring. A
//! simplifier needs an equality test to know which terms to combine, yet a full equality test
//! would itself need simplification.
//!
//! This crate therefore works with a decidable subset of mathematical equality, called **strict
//! equality**. Two expressions are strictly equal when they are the same kind of node with
//! strictly equal children, where the children of [`Expr::Add`] and [`Expr::Mul`] are compared as
//! unordered multisets: each child on one side must pair up with a distinct, strictly equal child
//! on the other, in any order.
//!
//! Strict equality is a *subset* of mathematical equality, so it can never report a false
//! positive: strictly equal expressions always denote the same value. The converse does not hold;
//! `x^2 + 2x + 1` and `(x + 1)^2` are **not** strictly equal. Because the test is cheap and needs
//! no simplification, simplification itself can rely on it freely, and callers can combine
//! "simplify, then compare strictly" into a stronger semantic test.
//!
//! For [`Expr`], `==` through [`PartialEq`] and [`Eq`] always means **strict** equality, never
//! mathematical equality.

mod iter;
mod subs;

use crate::primitive::int;
use iter::ExprIter;
use rug::Integer;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub}};

/// The smallest unit of an expression: a number, a named variable, or a function call.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Primary {
    /// An arbitrary-precision integer, like `2` or `-17`.
    Integer(Integer),

    /// A named variable, like `x` or `n`.
    Symbol(String),

    /// A function call, such as `f(x, y)` or `dirac(n)`.
    Call(String, Vec<Expr>),
}

impl std::fmt::Display for Primary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(num) => write!(f, "{num}"),
            Self::Symbol(sym) => f.write_str(sym),
            Self::Call(name, args) => {
                write!(f, "{name}(")?;
                for (idx, arg) in args.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            },
        }
    }
}

/// Adds two [`Primary`]s together. Integer operands are folded into a single integer; any other
/// pair becomes a two-term [`Expr::Add`].
impl Add for Primary {
    type Output = Expr;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Primary::Integer(lhs), Primary::Integer(rhs)) => Expr::integer(lhs + rhs),
            (lhs, rhs) => Expr::Add(vec![Expr::Primary(lhs), Expr::Primary(rhs)]),
        }
    }
}

/// Multiplies two [`Primary`]s together. Integer operands are folded into a single integer; any
/// other pair becomes a two-factor [`Expr::Mul`].
impl Mul for Primary {
    type Output = Expr;

    fn mul(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Primary::Integer(lhs), Primary::Integer(rhs)) => Expr::integer(lhs * rhs),
            (lhs, rhs) => Expr::Mul(vec![Expr::Primary(lhs), Expr::Primary(rhs)]),
        }
    }
}

/// A symbolic mathematical expression.
///
/// The tree is **flattened**: the expression `x + (y + z)` is represented as a single
/// [`Expr::Add`] node with _three_ children, `x`, `y`, and `z`. The [`Add`] and [`Mul`]
/// operator implementations maintain this flattening when combining expressions.
///
/// See the [module-level documentation](self) for the equality semantics of this type.
#[derive(Debug, Clone, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A leaf of the tree. See [`Primary`].
    Primary(Primary),

    /// A sum of any number of terms.
    Add(Vec<Expr>),

    /// A product of any number of factors.
    Mul(Vec<Expr>),

    /// A base raised to an exponent.
    Exp(Box<Expr>, Box<Expr>),
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // parenthesizes a child that binds looser than its parent
        fn operand(
            f: &mut std::fmt::Formatter<'_>,
            child: &Expr,
            parent: &Expr,
        ) -> std::fmt::Result {
            if child.cmp_precedence(parent) == Ordering::Less {
                write!(f, "({child})")
            } else {
                write!(f, "{child}")
            }
        }

        match self {
            Self::Primary(primary) => write!(f, "{primary}"),
            Self::Add(terms) => {
                for (idx, term) in terms.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(" + ")?;
                    }
                    write!(f, "{term}")?;
                }
                Ok(())
            },
            Self::Mul(factors) => {
                for (idx, factor) in factors.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(" * ")?;
                    }
                    operand(f, factor, self)?;
                }
                Ok(())
            },
            Self::Exp(base, exp) => {
                operand(f, base, self)?;
                f.write_str("^")?;
                operand(f, exp, self)
            },
        }
    }
}

/// Binding strength of each kind of expression, from loosest to tightest. Primaries bind
/// tighter than any operator and never need parentheses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Term,
    Factor,
    Exp,
    Primary,
}

impl Expr {
    /// Creates a symbol expression with the given name.
    pub fn symbol(name: &str) -> Self {
        Self::Primary(Primary::Symbol(name.to_string()))
    }

    /// Creates an integer expression.
    pub fn integer<T>(n: T) -> Self
    where
        Integer: From<T>,
    {
        Self::Primary(Primary::Integer(int(n)))
    }

    /// Creates a function call expression with the given function name and arguments.
    pub fn call(name: &str, args: Vec<Expr>) -> Self {
        Self::Primary(Primary::Call(name.to_string(), args))
    }

    /// The binding strength of this node when printed.
    fn precedence(&self) -> Precedence {
        match self {
            Self::Primary(_) => Precedence::Primary,
            Self::Add(_) => Precedence::Term,
            Self::Mul(_) => Precedence::Factor,
            Self::Exp(_, _) => Precedence::Exp,
        }
    }

    /// Compares the precedence of this expression with another expression.
    ///
    /// This is used to determine if parentheses are needed around this expression when printing
    /// it inside the other expression.
    pub fn cmp_precedence(&self, other: &Self) -> Ordering {
        self.precedence().cmp(&other.precedence())
    }

    /// Returns a reference to the inner integer, if the expression is an integer [`Primary`].
    pub fn as_integer(&self) -> Option<&Integer> {
        match self {
            Self::Primary(Primary::Integer(num)) => Some(num),
            _ => None,
        }
    }

    /// Consumes the expression and returns the inner integer, if it is an integer [`Primary`].
    pub fn into_integer(self) -> Option<Integer> {
        match self {
            Self::Primary(Primary::Integer(num)) => Some(num),
            _ => None,
        }
    }

    /// Returns `true` if the expression is an integer [`Primary`].
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Primary(Primary::Integer(_)))
    }

    /// Returns `true` if the expression is an integer raised to the power of `-1`.
    pub fn is_integer_recip(&self) -> bool {
        match self {
            Self::Exp(base, exp) => {
                base.is_integer() && exp.as_integer().is_some_and(|num| num == &-1)
            },
            _ => false,
        }
    }

    /// Consumes an integer raised to the power of `-1` and returns the base, the denominator of
    /// the fraction the expression encodes.
    pub fn into_integer_recip(self) -> Option<Integer> {
        let Self::Exp(base, exp) = self else {
            return None;
        };
        if exp.as_integer()? != &-1 {
            return None;
        }
        base.into_integer()
    }

    /// Collapses degenerate [`Expr::Add`] and [`Expr::Mul`] nodes.
    ///
    /// Removing terms or factors can leave an [`Expr::Add`] or [`Expr::Mul`] with a single child,
    /// or none at all. A single child replaces the node outright; an empty node collapses to the
    /// identity of its operation, `0` for addition and `1` for multiplication.
    pub fn downgrade(self) -> Self {
        match self {
            Self::Add(terms) if terms.is_empty() => Self::integer(0),
            Self::Mul(factors) if factors.is_empty() => Self::integer(1),
            Self::Add(mut children) | Self::Mul(mut children) if children.len() == 1 => {
                children.remove(0)
            },
            other => other,
        }
    }

    /// Returns an iterator over every node of the tree in left-to-right post-order, children
    /// before parents, visiting the arguments of function calls as well.
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }
}

/// Compares two lists of terms / factors as unordered multisets.
///
/// Every element on the left must pair up with a **distinct**, strictly equal element on the
/// right. Checking membership alone is not enough; `[a, a, b]` and `[a, b, b]` contain the same
/// elements but are not the same multiset.
fn multiset_eq(lhs: &[Expr], rhs: &[Expr]) -> bool {
    if lhs.len() != rhs.len() {
        return false;
    }

    let mut matched = vec![false; rhs.len()];
    lhs.iter().all(|term| {
        rhs.iter().enumerate().any(|(i, other)| {
            if !matched[i] && term == other {
                matched[i] = true;
                true
            } else {
                false
            }
        })
    })
}

/// Checks if two expressions are **strictly** equal: both must be the same kind of node with
/// strictly equal children, where the children of [`Expr::Add`] and [`Expr::Mul`] are compared
/// as unordered multisets.
///
/// The [module-level documentation](self) explains why `==` is strict.
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primary(a), Self::Primary(b)) => a == b,
            (Self::Add(a), Self::Add(b)) | (Self::Mul(a), Self::Mul(b)) => multiset_eq(a, b),
            (Self::Exp(a_base, a_exp), Self::Exp(b_base, b_exp)) => {
                a_base == b_base && a_exp == b_exp
            },
            _ => false,
        }
    }
}

/// Adds two [`Expr`]s together, maintaining the flattened tree: an [`Expr::Add`] operand
/// contributes its terms to the result rather than nesting, and two [`Primary`] integers fold
/// into one. No other simplification is done.
impl Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs + rhs,
            (Self::Add(mut terms), Self::Add(more)) => {
                terms.extend(more);
                Self::Add(terms)
            },
            (Self::Add(mut terms), single) | (single, Self::Add(mut terms)) => {
                terms.push(single);
                Self::Add(terms)
            },
            (lhs, rhs) => Self::Add(vec![lhs, rhs]),
        }
    }
}

/// In-place counterpart of [`Add`]. The list behind an [`Expr::Add`] moves through the operator
/// intact, so its allocation is reused.
impl AddAssign for Expr {
    fn add_assign(&mut self, rhs: Self) {
        let lhs = std::mem::replace(self, Self::Add(Vec::new()));
        *self = lhs + rhs;
    }
}

/// Multiplies two [`Expr`]s together, maintaining the flattened tree: an [`Expr::Mul`] operand
/// contributes its factors to the result rather than nesting, and two [`Primary`] integers fold
/// into one. No other simplification is done.
impl Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs * rhs,
            (Self::Mul(mut factors), Self::Mul(more)) => {
                factors.extend(more);
                Self::Mul(factors)
            },
            (Self::Mul(mut factors), single) | (single, Self::Mul(mut factors)) => {
                factors.push(single);
                Self::Mul(factors)
            },
            (lhs, rhs) => Self::Mul(vec![lhs, rhs]),
        }
    }
}

/// In-place counterpart of [`Mul`]. The list behind an [`Expr::Mul`] moves through the operator
/// intact, so its allocation is reused.
impl MulAssign for Expr {
    fn mul_assign(&mut self, rhs: Self) {
        let lhs = std::mem::replace(self, Self::Mul(Vec::new()));
        *self = lhs * rhs;
    }
}

/// Subtracts an [`Expr`] from this one by adding its negation. See [`Add`] and [`Neg`].
impl Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self + -rhs
    }
}

/// Negates an [`Expr`]. An integer [`Primary`] is negated in place; anything else is multiplied
/// by `-1` without further simplification.
impl Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Primary(Primary::Integer(num)) => Self::Primary(Primary::Integer(-num)),
            expr => Self::integer(-1) * expr,
        }
    }
}

/// NOTE: The output of `pretty_assertions` for failing tests here can be hard to read, because
/// strict equality allows different orderings of terms and factors, while the diff rendering
/// cares about order. If a test fails and the expected terms are listed in a different order than
/// the generated ones, the diff will be noisy even when the mismatch is small. Just a forewarning!
#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn eq_ignores_order_of_children() {
        let a = Expr::integer(2) * (Expr::symbol("x") + Expr::symbol("y") - Expr::integer(5));
        let b = (Expr::symbol("y") - Expr::integer(5) + Expr::symbol("x")) * Expr::integer(2);
        assert_eq!(a, b);
    }

    #[test]
    fn eq_does_not_expand() {
        // `b` is the expansion of `a`; equal in value, but not strictly equal
        let a = Expr::integer(2) * (Expr::symbol("x") + Expr::symbol("y"));
        let b = Expr::integer(2) * Expr::symbol("x") + Expr::integer(2) * Expr::symbol("y");
        assert_ne!(a, b);
    }

    #[test]
    fn eq_counts_duplicates() {
        // `a + a + b` and `a + b + b` contain the same terms, but are different multisets
        let a = Expr::symbol("a") + Expr::symbol("a") + Expr::symbol("b");
        let b = Expr::symbol("a") + Expr::symbol("b") + Expr::symbol("b");
        assert_ne!(a, b);
    }

    #[test]
    fn operators_flatten() {
        let expr = Expr::symbol("x") + (Expr::symbol("y") + Expr::symbol("z"));
        assert_eq!(expr, Expr::Add(vec![
            Expr::symbol("x"),
            Expr::symbol("y"),
            Expr::symbol("z"),
        ]));

        let expr = (Expr::symbol("a") * Expr::symbol("b")) * (Expr::symbol("c") * Expr::symbol("d"));
        assert_eq!(expr, Expr::Mul(vec![
            Expr::symbol("a"),
            Expr::symbol("b"),
            Expr::symbol("c"),
            Expr::symbol("d"),
        ]));
    }

    #[test]
    fn operators_fold_integers() {
        assert_eq!(Expr::integer(2) + Expr::integer(3), Expr::integer(5));
        assert_eq!(Expr::integer(2) * Expr::integer(3), Expr::integer(6));
        assert_eq!(-Expr::integer(7), Expr::integer(-7));
    }

    #[test]
    fn subtraction_negates() {
        let expr = Expr::symbol("n") - Expr::integer(1);
        assert_eq!(expr, Expr::Add(vec![
            Expr::symbol("n"),
            Expr::integer(-1),
        ]));
    }

    #[test]
    fn negate_factors() {
        let expr = -(Expr::symbol("x") * Expr::symbol("y"));
        assert_eq!(expr, Expr::Mul(vec![
            Expr::symbol("x"),
            Expr::symbol("y"),
            Expr::integer(-1),
        ]));
    }

    #[test]
    fn downgrade() {
        assert_eq!(Expr::Add(Vec::new()).downgrade(), Expr::integer(0));
        assert_eq!(Expr::Mul(Vec::new()).downgrade(), Expr::integer(1));
        assert_eq!(Expr::Add(vec![Expr::symbol("x")]).downgrade(), Expr::symbol("x"));
        assert_eq!(Expr::Mul(vec![Expr::symbol("x")]).downgrade(), Expr::symbol("x"));

        let untouched = Expr::symbol("x") + Expr::symbol("y");
        assert_eq!(untouched.clone().downgrade(), untouched);
    }

    #[test]
    fn fmt_expr() {
        let expr = Expr::integer(2) * (Expr::symbol("x") + Expr::integer(1));
        assert_eq!(expr.to_string(), "2 * (x + 1)");

        let expr = Expr::Exp(
            Box::new(Expr::integer(2) * Expr::symbol("x")),
            Box::new(Expr::integer(3)),
        );
        assert_eq!(expr.to_string(), "(2 * x)^3");

        let expr = Expr::call("f", vec![
            Expr::symbol("x"),
            Expr::symbol("n") + Expr::integer(1),
        ]);
        assert_eq!(expr.to_string(), "f(x, n + 1)");
    }
}
