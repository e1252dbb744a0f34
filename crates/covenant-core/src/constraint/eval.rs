//! Constraint expression evaluation over a bound-parameter environment.

use std::cmp::Ordering;

use thiserror::Error;

use super::expr::Expr;
use crate::params::BoundParams;
use crate::value::Value;

/// Error evaluating a constraint expression.
///
/// The enforcement wrapper converts these into constraint violations; they
/// never crash a call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The expression refers to a name not bound in this call.
    #[error("unknown name '{0}'")]
    UnknownName(String),

    /// Operands of incompatible kinds.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// Integer or float division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// The whole expression did not evaluate to a boolean.
    #[error("constraint did not evaluate to a boolean")]
    NotBoolean,
}

/// Checks if two values are equal under constraint semantics.
///
/// Mixed numeric equality holds; values of different kinds compare unequal,
/// never erroring. Matches the engine-wide value equality.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    a == b
}

/// Compares two values, `None` when their kinds cannot be ordered.
pub fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::I64(x), Value::I64(y)) => Some(x.cmp(y)),
        (Value::F64(x), Value::F64(y)) => x.partial_cmp(y),
        (Value::I64(x), Value::F64(y)) => (*x as f64).partial_cmp(y),
        (Value::F64(x), Value::I64(y)) => x.partial_cmp(&(*y as f64)),
        (Value::Str(x), Value::Str(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        (Value::Date(x), Value::Date(y)) => Some(x.cmp(y)),
        (Value::DateTime(x), Value::DateTime(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

/// Evaluates a constraint expression to a boolean.
///
/// A non-boolean result is an [`EvalError::NotBoolean`], which the wrapper
/// reports as a constraint violation.
pub fn eval_bool(expr: &Expr, env: &BoundParams) -> Result<bool, EvalError> {
    eval_expr(expr, env)?.as_bool().ok_or(EvalError::NotBoolean)
}

/// Evaluates an expression in the given environment.
pub fn eval_expr(expr: &Expr, env: &BoundParams) -> Result<Value, EvalError> {
    match expr {
        Expr::Literal(value) => Ok(value.clone()),

        Expr::Name(name) => env
            .get(name)
            .cloned()
            .ok_or_else(|| EvalError::UnknownName(name.to_string())),

        Expr::Eq(left, right) => {
            let l = eval_expr(left, env)?;
            let r = eval_expr(right, env)?;
            Ok(Value::Bool(values_equal(&l, &r)))
        }

        Expr::Ne(left, right) => {
            let l = eval_expr(left, env)?;
            let r = eval_expr(right, env)?;
            Ok(Value::Bool(!values_equal(&l, &r)))
        }

        Expr::Lt(left, right) => ordering(left, right, env).map(|o| Value::Bool(o.is_lt())),
        Expr::Le(left, right) => ordering(left, right, env).map(|o| Value::Bool(o.is_le())),
        Expr::Gt(left, right) => ordering(left, right, env).map(|o| Value::Bool(o.is_gt())),
        Expr::Ge(left, right) => ordering(left, right, env).map(|o| Value::Bool(o.is_ge())),

        // Boolean connectives short-circuit, so errors in an unevaluated
        // right arm go unnoticed.
        Expr::And(left, right) => {
            if !boolean_operand(left, env)? {
                return Ok(Value::Bool(false));
            }
            Ok(Value::Bool(boolean_operand(right, env)?))
        }

        Expr::Or(left, right) => {
            if boolean_operand(left, env)? {
                return Ok(Value::Bool(true));
            }
            Ok(Value::Bool(boolean_operand(right, env)?))
        }

        Expr::Not(inner) => Ok(Value::Bool(!boolean_operand(inner, env)?)),

        Expr::Add(left, right) => arithmetic(left, right, env, "+", |a, b| a.checked_add(b), |a, b| a + b),
        Expr::Sub(left, right) => arithmetic(left, right, env, "-", |a, b| a.checked_sub(b), |a, b| a - b),
        Expr::Mul(left, right) => arithmetic(left, right, env, "*", |a, b| a.checked_mul(b), |a, b| a * b),

        Expr::Div(left, right) => {
            let l = eval_expr(left, env)?;
            let r = eval_expr(right, env)?;
            match (&l, &r) {
                (Value::I64(_), Value::I64(0)) => Err(EvalError::DivisionByZero),
                (Value::I64(a), Value::I64(b)) => Ok(Value::I64(a / b)),
                (Value::F64(_) | Value::I64(_), Value::F64(b)) if *b == 0.0 => {
                    Err(EvalError::DivisionByZero)
                }
                (Value::F64(a), Value::F64(b)) => Ok(Value::F64(a / b)),
                (Value::I64(a), Value::F64(b)) => Ok(Value::F64(*a as f64 / b)),
                (Value::F64(_), Value::I64(0)) => Err(EvalError::DivisionByZero),
                (Value::F64(a), Value::I64(b)) => Ok(Value::F64(a / *b as f64)),
                _ => Err(mismatch("/", &l, &r)),
            }
        }

        Expr::Mod(left, right) => {
            let l = eval_expr(left, env)?;
            let r = eval_expr(right, env)?;
            match (&l, &r) {
                (Value::I64(_), Value::I64(0)) => Err(EvalError::DivisionByZero),
                (Value::I64(a), Value::I64(b)) => Ok(Value::I64(a % b)),
                _ => Err(mismatch("%", &l, &r)),
            }
        }

        Expr::Neg(inner) => {
            let v = eval_expr(inner, env)?;
            match v {
                Value::I64(n) => Ok(Value::I64(-n)),
                Value::F64(n) => Ok(Value::F64(-n)),
                _ => Err(EvalError::TypeMismatch(format!("cannot negate {v}"))),
            }
        }
    }
}

fn ordering(left: &Expr, right: &Expr, env: &BoundParams) -> Result<Ordering, EvalError> {
    let l = eval_expr(left, env)?;
    let r = eval_expr(right, env)?;
    compare_values(&l, &r).ok_or_else(|| mismatch("compare", &l, &r))
}

fn boolean_operand(expr: &Expr, env: &BoundParams) -> Result<bool, EvalError> {
    let v = eval_expr(expr, env)?;
    v.as_bool()
        .ok_or_else(|| EvalError::TypeMismatch(format!("expected a boolean, got {v}")))
}

fn arithmetic(
    left: &Expr,
    right: &Expr,
    env: &BoundParams,
    op: &str,
    int_op: impl Fn(i64, i64) -> Option<i64>,
    float_op: impl Fn(f64, f64) -> f64,
) -> Result<Value, EvalError> {
    let l = eval_expr(left, env)?;
    let r = eval_expr(right, env)?;
    match (&l, &r) {
        (Value::I64(a), Value::I64(b)) => int_op(*a, *b)
            .map(Value::I64)
            .ok_or_else(|| EvalError::TypeMismatch(format!("integer overflow in '{op}'"))),
        (Value::F64(a), Value::F64(b)) => Ok(Value::F64(float_op(*a, *b))),
        (Value::I64(a), Value::F64(b)) => Ok(Value::F64(float_op(*a as f64, *b))),
        (Value::F64(a), Value::I64(b)) => Ok(Value::F64(float_op(*a, *b as f64))),
        _ => Err(mismatch(op, &l, &r)),
    }
}

fn mismatch(op: &str, l: &Value, r: &Value) -> EvalError {
    EvalError::TypeMismatch(format!("cannot apply '{op}' to {l} and {r}"))
}
