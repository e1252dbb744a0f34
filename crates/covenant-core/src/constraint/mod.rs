//! Cross-parameter constraint expressions.
//!
//! Constraints are free-form boolean expressions over the bound parameter
//! names of one call (`"a < b"`, `"count % 2 == 0 && !strict"`). Unlike the
//! assertion grammar they are deliberately permissive: a small expression
//! language of comparisons, boolean connectives, and arithmetic, with no
//! structural validation beyond "does it evaluate to a boolean".

mod eval;
mod expr;
mod parse;

#[cfg(test)]
mod tests;

pub use eval::{compare_values, eval_bool, eval_expr, values_equal, EvalError};
pub use expr::Expr;
pub use parse::parse_constraint;
