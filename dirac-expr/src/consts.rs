//! Frequently compared constants, wrapped in [`Expr`]s.

use crate::expr::{Expr, Primary};
use crate::primitive::int;
use once_cell::sync::Lazy;

/// The number one, wrapped in an [`Expr`].
pub static ONE: Lazy<Expr> = Lazy::new(|| Expr::Primary(Primary::Integer(int(1))));
