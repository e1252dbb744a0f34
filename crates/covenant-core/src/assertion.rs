//! Compiled assertion trees.
//!
//! An assertion tree is the per-expression artifact produced by the parser:
//! a small set of composable node kinds, each answering a single question,
//! `check(value) -> bool`. Trees are immutable, `Send + Sync`, and shared
//! freely between calls.

use std::fmt;
use std::sync::Arc;

use crate::registry::Predicate;
use crate::value::Value;

/// One node of a compiled assertion tree.
#[derive(Clone)]
pub enum Assertion {
    /// Delegates to a registered predicate. The name is kept for diagnostics.
    Simple {
        /// Registry name the predicate was resolved from.
        name: Arc<str>,
        /// The resolved predicate.
        predicate: Predicate,
    },
    /// Every element of an ordered container, or every key of a keyed
    /// container, must satisfy the inner assertion. Text never qualifies.
    Sequence(Box<Assertion>),
    /// Every value of a keyed container must satisfy the inner assertion.
    Mapping(Box<Assertion>),
    /// The named attribute must exist and satisfy the inner assertion.
    Member {
        /// Attribute name looked up on the checked value.
        name: Arc<str>,
        /// Assertion applied to the attribute's value.
        inner: Box<Assertion>,
    },
    /// A caller-supplied predicate, bypassing the registry and the grammar.
    Generic(Predicate),
    /// Logical AND over children.
    All(Vec<Assertion>),
    /// Logical OR over children.
    Any(Vec<Assertion>),
}

impl Assertion {
    /// Checks a value against this tree.
    ///
    /// Total over check-worthy error channels: a predicate error, a value of
    /// the wrong shape, or a missing attribute all yield `false`, never a
    /// panic or an error.
    pub fn check(&self, value: &Value) -> bool {
        match self {
            Assertion::Simple { name, predicate } => match predicate(value) {
                Ok(satisfied) => satisfied,
                Err(err) => {
                    tracing::debug!(assertion = %name, error = %err, "predicate error treated as failure");
                    false
                }
            },
            Assertion::Generic(predicate) => predicate(value).unwrap_or(false),
            Assertion::Sequence(inner) => match value {
                Value::List(items) | Value::Set(items) => {
                    items.iter().all(|item| inner.check(item))
                }
                Value::Map(entries) => entries.iter().all(|(key, _)| inner.check(key)),
                _ => false,
            },
            Assertion::Mapping(inner) => match value {
                Value::Map(entries) => entries.iter().all(|(_, val)| inner.check(val)),
                _ => false,
            },
            Assertion::Member { name, inner } => match value.field(name) {
                Some(member) => inner.check(member),
                None => false,
            },
            Assertion::All(children) => children.iter().all(|child| child.check(value)),
            Assertion::Any(children) => children.iter().any(|child| child.check(value)),
        }
    }

    /// Wraps a plain closure as a [`Assertion::Generic`] node.
    pub fn generic<F>(predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Assertion::Generic(Arc::new(move |value| Ok(predicate(value))))
    }
}

impl fmt::Debug for Assertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Assertion::Simple { name, .. } => f.debug_tuple("Simple").field(name).finish(),
            Assertion::Sequence(inner) => f.debug_tuple("Sequence").field(inner).finish(),
            Assertion::Mapping(inner) => f.debug_tuple("Mapping").field(inner).finish(),
            Assertion::Member { name, inner } => {
                f.debug_tuple("Member").field(name).field(inner).finish()
            }
            Assertion::Generic(_) => f.write_str("Generic"),
            Assertion::All(children) => f.debug_tuple("All").field(children).finish(),
            Assertion::Any(children) => f.debug_tuple("Any").field(children).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::PredicateError;

    fn simple(name: &str, result: Result<bool, PredicateError>) -> Assertion {
        Assertion::Simple {
            name: Arc::from(name),
            predicate: Arc::new(move |_| result.clone()),
        }
    }

    #[test]
    fn test_simple_delegates_to_predicate() {
        assert!(simple("t", Ok(true)).check(&Value::None));
        assert!(!simple("f", Ok(false)).check(&Value::None));
    }

    #[test]
    fn test_predicate_error_means_false() {
        let unstable = simple("unstable", Err(PredicateError::new("boom")));
        assert!(!unstable.check(&Value::I64(1)));
    }

    #[test]
    fn test_sequence_rejects_text_and_scalars() {
        let all_true = Assertion::generic(|_| true);
        let sequence = Assertion::Sequence(Box::new(all_true));

        assert!(sequence.check(&Value::List(vec![])));
        assert!(sequence.check(&Value::List(vec![Value::I64(1), Value::I64(2)])));
        assert!(!sequence.check(&Value::from("abc")));
        assert!(!sequence.check(&Value::from("")));
        assert!(!sequence.check(&Value::I64(1)));
        assert!(!sequence.check(&Value::None));
    }

    #[test]
    fn test_sequence_over_map_checks_keys() {
        let text = Assertion::generic(|v: &Value| v.as_str().is_some());
        let sequence = Assertion::Sequence(Box::new(text));

        let map = Value::map([
            (Value::from("a"), Value::I64(1)),
            (Value::from("b"), Value::I64(2)),
        ]);
        assert!(sequence.check(&map));

        let mixed_keys = Value::map([(Value::from("a"), Value::I64(1)), (Value::I64(9), Value::I64(2))]);
        assert!(!sequence.check(&mixed_keys));
    }

    #[test]
    fn test_mapping_checks_values_only() {
        let positive = Assertion::generic(|v: &Value| v.as_i64().is_some_and(|n| n > 0));
        let mapping = Assertion::Mapping(Box::new(positive));

        let map = Value::map([
            (Value::from("a"), Value::I64(1)),
            (Value::from("b"), Value::I64(2)),
        ]);
        assert!(mapping.check(&map));

        let bad = Value::map([(Value::from("a"), Value::I64(-1))]);
        assert!(!mapping.check(&bad));

        // Not a keyed container
        assert!(!mapping.check(&Value::List(vec![Value::I64(1)])));
    }

    #[test]
    fn test_member_requires_attribute() {
        let positive = Assertion::generic(|v: &Value| v.as_i64().is_some_and(|n| n > 0));
        let member = Assertion::Member {
            name: Arc::from("x"),
            inner: Box::new(positive),
        };

        assert!(member.check(&Value::record([("x", Value::I64(3))])));
        assert!(!member.check(&Value::record([("x", Value::I64(-3))])));
        assert!(!member.check(&Value::record([("y", Value::I64(3))])));
        assert!(!member.check(&Value::I64(3)));
    }

    #[test]
    fn test_composite_modes() {
        let t = || Assertion::generic(|_| true);
        let f = || Assertion::generic(|_| false);

        assert!(Assertion::All(vec![t(), t()]).check(&Value::None));
        assert!(!Assertion::All(vec![t(), f()]).check(&Value::None));
        assert!(Assertion::Any(vec![f(), t()]).check(&Value::None));
        assert!(!Assertion::Any(vec![f(), f()]).check(&Value::None));
    }
}
