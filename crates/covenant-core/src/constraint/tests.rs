//! Tests for constraint parsing and evaluation.

use super::*;
use crate::error::ParseError;
use crate::params::BoundParams;
use crate::value::Value;

fn env() -> BoundParams {
    BoundParams::new()
        .bind("a", 1i64)
        .bind("b", 2i64)
        .bind("name", "ada")
        .bind("ratio", 0.5f64)
        .bind("strict", true)
}

fn eval(text: &str) -> Result<bool, EvalError> {
    let expr = parse_constraint(text).unwrap();
    eval_bool(&expr, &env())
}

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_parse_shapes() {
    assert_eq!(
        parse_constraint("a < b").unwrap(),
        Expr::lt(Expr::name("a"), Expr::name("b"))
    );
    assert_eq!(
        parse_constraint("a + 1 == b").unwrap(),
        Expr::eq(Expr::add(Expr::name("a"), Expr::int(1)), Expr::name("b"))
    );
    assert_eq!(
        parse_constraint("!strict || a != b").unwrap(),
        Expr::or(
            Expr::not(Expr::name("strict")),
            Expr::ne(Expr::name("a"), Expr::name("b"))
        )
    );
}

#[test]
fn test_parse_precedence() {
    // Multiplication binds tighter than addition, comparisons tighter than
    // connectives.
    assert_eq!(
        parse_constraint("a + b * 2 < 10 && strict").unwrap(),
        Expr::and(
            Expr::lt(
                Expr::add(Expr::name("a"), Expr::mul(Expr::name("b"), Expr::int(2))),
                Expr::int(10)
            ),
            Expr::name("strict")
        )
    );
}

#[test]
fn test_parse_word_connectives() {
    assert_eq!(
        parse_constraint("a < b and not strict").unwrap(),
        parse_constraint("a < b && !strict").unwrap()
    );
    assert_eq!(
        parse_constraint("a < b or strict").unwrap(),
        parse_constraint("a < b || strict").unwrap()
    );
}

#[test]
fn test_parse_literals() {
    assert_eq!(
        parse_constraint("name == 'ada'").unwrap(),
        Expr::eq(Expr::name("name"), Expr::Literal(Value::from("ada")))
    );
    assert_eq!(
        parse_constraint("ratio >= 0.25").unwrap(),
        Expr::ge(Expr::name("ratio"), Expr::Literal(Value::F64(0.25)))
    );
    assert_eq!(parse_constraint("true").unwrap(), Expr::bool(true));
    assert_eq!(
        parse_constraint("a != none").unwrap(),
        Expr::ne(Expr::name("a"), Expr::Literal(Value::None))
    );
}

#[test]
fn test_parse_errors() {
    for text in [
        "a <",
        "a = b",
        "a & b",
        "a | b",
        "(a < b",
        "a < b < 3",
        "'unterminated",
        "a ?? b",
        "",
    ] {
        assert!(
            matches!(parse_constraint(text), Err(ParseError::Constraint(_))),
            "expected parse error for {text:?}"
        );
    }
}

// ============================================================================
// Evaluation
// ============================================================================

#[test]
fn test_eval_comparisons() {
    assert_eq!(eval("a < b"), Ok(true));
    assert_eq!(eval("a > b"), Ok(false));
    assert_eq!(eval("a <= 1"), Ok(true));
    assert_eq!(eval("b >= 3"), Ok(false));
    assert_eq!(eval("a + 1 == b"), Ok(true));
    assert_eq!(eval("a != b"), Ok(true));
}

#[test]
fn test_eval_mixed_numeric() {
    assert_eq!(eval("ratio < a"), Ok(true));
    assert_eq!(eval("ratio * 4 == b"), Ok(true));
    assert_eq!(eval("b / 4 == 0"), Ok(true));
    assert_eq!(eval("b % 2 == 0"), Ok(true));
}

#[test]
fn test_eval_connectives_short_circuit() {
    assert_eq!(eval("a < b && strict"), Ok(true));
    assert_eq!(eval("a > b && nonsense"), Ok(false));
    assert_eq!(eval("a < b || nonsense"), Ok(true));
    assert_eq!(eval("!strict || a < b"), Ok(true));
}

#[test]
fn test_eval_string_and_none() {
    assert_eq!(eval("name == 'ada'"), Ok(true));
    assert_eq!(eval("name != 'bob'"), Ok(true));
    assert_eq!(eval("name != none"), Ok(true));
    // Equality across kinds is false, not an error.
    assert_eq!(eval("name == a"), Ok(false));
}

#[test]
fn test_eval_errors() {
    assert_eq!(
        eval("missing < 3"),
        Err(EvalError::UnknownName("missing".into()))
    );
    assert_eq!(eval("a / 0 == 1"), Err(EvalError::DivisionByZero));
    assert_eq!(eval("a % 0 == 1"), Err(EvalError::DivisionByZero));
    assert_eq!(eval("a + b"), Err(EvalError::NotBoolean));
    assert!(matches!(
        eval("name < a"),
        Err(EvalError::TypeMismatch(_))
    ));
    assert!(matches!(
        eval("name + 1 == 2"),
        Err(EvalError::TypeMismatch(_))
    ));
    assert!(matches!(eval("a && strict"), Err(EvalError::TypeMismatch(_))));
}

#[test]
fn test_eval_negation_and_parens() {
    assert_eq!(eval("-a == 0 - 1"), Ok(true));
    assert_eq!(eval("(a + b) * 2 == 6"), Ok(true));
    assert_eq!(eval("!(a < b)"), Ok(false));
}
