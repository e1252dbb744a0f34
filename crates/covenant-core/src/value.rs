//! Runtime values checked by assertion trees.

use std::fmt;
use std::sync::Arc;

/// A runtime value handed to the enforcement engine.
///
/// Assertions are checked against arbitrary call arguments, so the engine
/// works on a closed tagged union rather than generic types. The structural
/// category of a value (see [`ValueKind`]) decides how the projection nodes
/// of an assertion tree treat it.
#[derive(Debug, Clone)]
pub enum Value {
    /// No value.
    None,
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer.
    I64(i64),
    /// 64-bit floating point.
    F64(f64),
    /// Text. Never treated as a sequence of characters by assertion trees.
    Str(Arc<str>),
    /// Date as days since Unix epoch.
    Date(i32),
    /// DateTime as Unix timestamp in milliseconds.
    DateTime(i64),
    /// Ordered list of values.
    List(Vec<Value>),
    /// Set of values (order not significant).
    Set(Vec<Value>),
    /// Keyed container: key -> value entries, insertion-ordered.
    Map(Vec<(Value, Value)>),
    /// An object with named attributes.
    Record(Vec<(Arc<str>, Value)>),
}

/// Structural category of a [`Value`], computed once per checked value.
///
/// `Sequence` assertions accept ordered and keyed containers but never text;
/// `Mapping` assertions accept keyed containers only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// A single value with no elements to project over.
    Scalar,
    /// Text. Deliberately distinct from the container kinds.
    Text,
    /// A container with ordered elements (list, set).
    OrderedContainer,
    /// A key -> value associative container.
    KeyedContainer,
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::F64(a), Value::F64(b)) => {
                (a - b).abs() < f64::EPSILON || (a.is_nan() && b.is_nan())
            }
            // Mixed numeric comparison
            (Value::I64(a), Value::F64(b)) => (*a as f64 - b).abs() < f64::EPSILON,
            (Value::F64(a), Value::I64(b)) => (a - *b as f64).abs() < f64::EPSILON,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => {
                // Sets are equal if they contain the same elements (order-independent)
                a.len() == b.len() && a.iter().all(|item| b.contains(item))
            }
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => a == b,
            _ => false,
        }
    }
}

impl Value {
    /// Returns the structural category of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Str(_) => ValueKind::Text,
            Value::List(_) | Value::Set(_) => ValueKind::OrderedContainer,
            Value::Map(_) => ValueKind::KeyedContainer,
            _ => ValueKind::Scalar,
        }
    }

    /// Returns true if this value is None.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Attempts to extract a bool value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Attempts to extract an i64 value.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I64(v) => Some(*v),
            _ => None,
        }
    }

    /// Attempts to extract an f64 value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::F64(v) => Some(*v),
            Value::I64(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Attempts to extract a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to extract the elements of a list or set.
    pub fn as_elements(&self) -> Option<&[Value]> {
        match self {
            Value::List(v) | Value::Set(v) => Some(v),
            _ => None,
        }
    }

    /// Attempts to extract the entries of a keyed container.
    pub fn as_entries(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Looks up a named attribute on a record.
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Record(fields) => fields
                .iter()
                .find(|(field, _)| field.as_ref() == name)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    /// Number of elements for sized values, `None` for everything else.
    pub fn len_hint(&self) -> Option<usize> {
        match self {
            Value::Str(s) => Some(s.chars().count()),
            Value::List(v) | Value::Set(v) => Some(v.len()),
            Value::Map(entries) => Some(entries.len()),
            _ => None,
        }
    }

    /// Builds a record from named fields.
    pub fn record<N>(fields: impl IntoIterator<Item = (N, Value)>) -> Self
    where
        N: Into<Arc<str>>,
    {
        Value::Record(
            fields
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        )
    }

    /// Builds a keyed container from entries.
    pub fn map(entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        Value::Map(entries.into_iter().collect())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::I64(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::I64(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::F64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(Arc::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(Arc::from(v.as_str()))
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl fmt::Display for Value {
    /// Best-effort description used in violation messages.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "none"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::I64(v) => write!(f, "{v}"),
            Value::F64(v) => write!(f, "{v}"),
            Value::Str(s) => write!(f, "'{s}'"),
            Value::Date(days) => write!(f, "date({days}d)"),
            Value::DateTime(ms) => write!(f, "datetime({ms}ms)"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Set(items) => {
                write!(f, "{{")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "}}")
            }
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            }
            Value::Record(fields) => {
                write!(f, "record(")?;
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{name}: {value}")?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(Value::None.kind(), ValueKind::Scalar);
        assert_eq!(Value::I64(1).kind(), ValueKind::Scalar);
        assert_eq!(Value::from("abc").kind(), ValueKind::Text);
        assert_eq!(Value::List(vec![]).kind(), ValueKind::OrderedContainer);
        assert_eq!(Value::Set(vec![]).kind(), ValueKind::OrderedContainer);
        assert_eq!(Value::map([]).kind(), ValueKind::KeyedContainer);
        assert_eq!(
            Value::record([("x", Value::None)]).kind(),
            ValueKind::Scalar
        );
    }

    #[test]
    fn test_conversions() {
        let v = Value::I64(42);
        assert_eq!(v.as_i64(), Some(42));
        assert_eq!(v.as_f64(), Some(42.0));
        assert!(!v.is_none());

        let v = Value::None;
        assert!(v.is_none());
        assert_eq!(v.as_i64(), None);
    }

    #[test]
    fn test_mixed_numeric_equality() {
        assert_eq!(Value::I64(2), Value::F64(2.0));
        assert_ne!(Value::I64(2), Value::F64(2.5));
        assert_ne!(Value::I64(1), Value::from("1"));
    }

    #[test]
    fn test_field_lookup() {
        let rec = Value::record([("age", Value::I64(7)), ("name", Value::from("ada"))]);
        assert_eq!(rec.field("age"), Some(&Value::I64(7)));
        assert_eq!(rec.field("missing"), None);
        assert_eq!(Value::I64(1).field("age"), None);
    }

    #[test]
    fn test_len_hint() {
        assert_eq!(Value::from("abc").len_hint(), Some(3));
        assert_eq!(Value::List(vec![Value::None]).len_hint(), Some(1));
        assert_eq!(Value::map([]).len_hint(), Some(0));
        assert_eq!(Value::I64(1).len_hint(), None);
        assert_eq!(Value::None.len_hint(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::from("x").to_string(), "'x'");
        assert_eq!(
            Value::List(vec![Value::I64(1), Value::I64(2)]).to_string(),
            "[1, 2]"
        );
        assert_eq!(
            Value::map([(Value::from("a"), Value::I64(1))]).to_string(),
            "{'a': 1}"
        );
    }
}
