//! Symbolic expression trees with substitution, wildcard matching, and simplification.
//!
//! Expressions are represented as a tree of [`Expr`] nodes, where sums and products **flatten**
//! out the tree structure: the expression `x + (y + z)` is represented as a single [`Expr::Add`]
//! node with _three_ children, `x`, `y`, and `z`. This makes algebraic manipulations, such as
//! combining like terms, much easier to perform, since all the terms in question are at the same
//! level of the tree. See the [`expr`] module for more information.
//!
//! Expressions are built directly from constructors and the standard arithmetic operators:
//!
//! ```
//! use dirac_expr::{simplify, Expr};
//!
//! let x = Expr::symbol("x");
//! let sum = x.clone() + x.clone() + x.clone();
//!
//! // x + x + x = 3x
//! assert_eq!(simplify(&sum), Expr::integer(3) * Expr::symbol("x"));
//! ```
//!
//! # Features
//!
//! - `serde`: Derives [`serde`] traits for the expression types.

pub mod consts;
pub mod expr;
pub mod pattern;
pub mod primitive;
pub mod simplify;

pub use expr::{Expr, Primary};
pub use pattern::{Bindings, Pattern};
pub use simplify::{simplify, simplify_with_steps};
