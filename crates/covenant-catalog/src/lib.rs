//! Baseline predicates for general usage:
//! - `None`, `not None`: null checks
//! - `bool`, `number`, `string`: the value is of the desired kind
//! - `string with text`: a string that is non-empty after trimming
//! - `not empty`: a sized value (text or container) with at least one element
//! - `date`, `datetime`, `any date`, `any datetime`: calendar values
//!   (`any date` also accepts a datetime, `any datetime` is strict)
//! - `sorted`: an iterable value (text, container, or map keys) whose
//!   elements are in non-descending order
//!
//! These are ordinary registrations with no special engine logic; see the
//! unit tests for the exact meaning of each contract.

use std::cmp::Ordering;

use covenant_core::constraint::compare_values;
use covenant_core::{global_registry, PredicateError, PredicateRegistry, Value};

/// Registers the catalog into an explicit registry handle.
pub fn install(registry: &PredicateRegistry) {
    // Empty
    registry.register("None", Value::is_none);
    registry.register("not None", |v: &Value| !v.is_none());
    registry.register_fallible("not empty", |v: &Value| {
        v.len_hint()
            .map(|n| n > 0)
            .ok_or_else(|| PredicateError::new(format!("{v} has no length")))
    });
    // Basic kinds
    registry.register("bool", |v: &Value| matches!(v, Value::Bool(_)));
    registry.register("number", |v: &Value| {
        matches!(v, Value::I64(_) | Value::F64(_))
    });
    registry.register("string", |v: &Value| matches!(v, Value::Str(_)));
    registry.register("string with text", |v: &Value| {
        v.as_str().is_some_and(|s| !s.trim().is_empty())
    });
    // Date/time
    registry.register("date", |v: &Value| matches!(v, Value::Date(_)));
    registry.register("datetime", |v: &Value| matches!(v, Value::DateTime(_)));
    registry.register("any date", |v: &Value| {
        matches!(v, Value::Date(_) | Value::DateTime(_))
    });
    registry.register("any datetime", |v: &Value| matches!(v, Value::DateTime(_)));
    // Others
    registry.register_fallible("sorted", is_sorted);
}

/// Registers the catalog into the process-wide registry.
///
/// Safe to call repeatedly; re-registration overwrites in place.
pub fn setup() {
    install(global_registry());
}

fn is_sorted(value: &Value) -> Result<bool, PredicateError> {
    match value {
        Value::Str(s) => {
            let chars: Vec<char> = s.chars().collect();
            Ok(chars.windows(2).all(|pair| pair[0] <= pair[1]))
        }
        Value::List(items) | Value::Set(items) => sorted_values(items),
        Value::Map(entries) => {
            let keys: Vec<Value> = entries.iter().map(|(key, _)| key.clone()).collect();
            sorted_values(&keys)
        }
        other => Err(PredicateError::new(format!("{other} is not iterable"))),
    }
}

fn sorted_values(items: &[Value]) -> Result<bool, PredicateError> {
    for pair in items.windows(2) {
        match compare_values(&pair[0], &pair[1]) {
            Some(Ordering::Greater) => return Ok(false),
            Some(_) => {}
            None => {
                return Err(PredicateError::new(format!(
                    "cannot compare {} with {}",
                    pair[0], pair[1]
                )))
            }
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use covenant_core::parse;

    fn catalog() -> PredicateRegistry {
        let registry = PredicateRegistry::new();
        install(&registry);
        registry
    }

    fn check(name: &str, value: &Value) -> bool {
        parse(name, &catalog()).unwrap().check(value)
    }

    fn ints(values: &[i64]) -> Value {
        Value::List(values.iter().map(|&n| Value::I64(n)).collect())
    }

    #[test]
    fn test_not_none() {
        assert!(!check("not None", &Value::None));
        assert!(check("not None", &Value::I64(1)));
        assert!(check("not None", &Value::Bool(false)));
        assert!(check("not None", &Value::from("")));
        assert!(check("not None", &Value::from("abc")));
        assert!(check("not None", &ints(&[])));
        assert!(check("not None", &ints(&[1, 2, 3])));
    }

    #[test]
    fn test_none() {
        assert!(!check("None", &Value::I64(1)));
        assert!(check("None", &Value::None));
    }

    #[test]
    fn test_bool() {
        assert!(!check("bool", &Value::None));
        assert!(!check("bool", &Value::I64(1)));
        assert!(check("bool", &Value::Bool(true)));
        assert!(check("bool", &Value::Bool(false)));
    }

    #[test]
    fn test_number() {
        assert!(!check("number", &Value::None));
        assert!(!check("number", &Value::from("1")));
        assert!(check("number", &Value::I64(-3)));
        assert!(check("number", &Value::F64(0.5)));
    }

    #[test]
    fn test_string() {
        assert!(!check("string", &Value::None));
        assert!(!check("string", &Value::I64(1)));
        assert!(!check("string", &ints(&[1])));
        assert!(check("string", &Value::from("foobar")));
        assert!(check("string", &Value::from("")));
    }

    #[test]
    fn test_string_with_text() {
        assert!(!check("string with text", &Value::None));
        assert!(!check("string with text", &Value::I64(1)));
        assert!(!check("string with text", &ints(&[1])));
        assert!(!check("string with text", &Value::from("")));
        assert!(!check("string with text", &Value::from("   ")));
        assert!(check("string with text", &Value::from("foobar")));
    }

    #[test]
    fn test_not_empty() {
        // Scalars have no length; the predicate errors and the node fails.
        assert!(!check("not empty", &Value::None));
        assert!(!check("not empty", &Value::I64(1)));
        assert!(!check("not empty", &Value::from("")));
        assert!(check("not empty", &Value::from("foobar")));
        assert!(check("not empty", &ints(&[1])));
        assert!(!check("not empty", &ints(&[])));
        assert!(check("not empty", &Value::map([(Value::from("k"), Value::I64(1))])));
    }

    #[test]
    fn test_sorted() {
        assert!(!check("sorted", &Value::None));
        assert!(!check("sorted", &Value::I64(1)));
        assert!(!check("sorted", &ints(&[2, 1])));
        assert!(check("sorted", &Value::from("")));
        assert!(check("sorted", &Value::from("abc")));
        assert!(!check("sorted", &Value::from("cba")));
        assert!(check("sorted", &ints(&[])));
        assert!(check("sorted", &ints(&[1, 2, 3])));
        assert!(check("sorted", &ints(&[1, 1, 2])));
        // Incomparable elements error, which fails the contract.
        assert!(!check(
            "sorted",
            &Value::List(vec![Value::I64(1), Value::from("a")])
        ));
    }

    #[test]
    fn test_dates() {
        let date = Value::Date(20_000);
        let datetime = Value::DateTime(1_700_000_000_000);

        assert!(check("date", &date));
        assert!(!check("date", &datetime));
        assert!(check("datetime", &datetime));
        assert!(!check("datetime", &date));

        for bad in [Value::None, Value::I64(1), Value::from(""), ints(&[1])] {
            assert!(!check("any date", &bad));
            assert!(!check("any datetime", &bad));
        }
        assert!(check("any date", &date));
        assert!(check("any date", &datetime));
        assert!(check("any datetime", &datetime));
        assert!(!check("any datetime", &date));
    }

    #[test]
    fn test_composition_with_engine() {
        let registry = catalog();
        // All elements sorted containers; the whole thing non-empty.
        let tree = parse("[sorted], not empty", &registry).unwrap();
        let value = Value::List(vec![ints(&[1, 2]), ints(&[])]);
        assert!(tree.check(&value));
        assert!(!tree.check(&Value::List(vec![ints(&[2, 1])])));
        assert!(!tree.check(&ints(&[])));
    }

    #[test]
    fn test_setup_registers_globally() {
        setup();
        assert!(global_registry().contains("not None"));
        assert!(global_registry().contains("sorted"));
        // Idempotent.
        setup();
        assert!(global_registry().contains("sorted"));
    }
}
