//! Bound-parameter environments.

use std::sync::Arc;

use crate::value::Value;

/// The mapping from formal-parameter names to the actual values of one call.
///
/// Binding actual arguments to declared names (defaults, variadics, keyword
/// arguments) is a calling-convention concern of the host; the engine only
/// consumes the finished environment. Entries keep insertion order; binding
/// a name again replaces its value.
///
/// # Examples
///
/// ```
/// use covenant_core::{BoundParams, Value};
///
/// let params = BoundParams::new().bind("a", 1i64).bind("b", 2i64);
/// assert_eq!(params.get("a"), Some(&Value::I64(1)));
/// assert_eq!(params.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BoundParams {
    entries: Vec<(Arc<str>, Value)>,
}

impl BoundParams {
    /// Creates an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a name, replacing any previous binding. Builder-style.
    pub fn bind(mut self, name: impl Into<Arc<str>>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Binds a name in place, replacing any previous binding.
    pub fn insert(&mut self, name: impl Into<Arc<str>>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Looks up a bound value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| n.as_ref() == name)
            .map(|(_, value)| value)
    }

    /// Iterates over bindings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_ref(), value))
    }

    /// Number of bound names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_and_get() {
        let params = BoundParams::new().bind("a", 1i64).bind("b", "text");
        assert_eq!(params.get("a"), Some(&Value::I64(1)));
        assert_eq!(params.get("b"), Some(&Value::from("text")));
        assert_eq!(params.get("c"), None);
    }

    #[test]
    fn test_rebind_replaces() {
        let params = BoundParams::new().bind("a", 1i64).bind("a", 2i64);
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("a"), Some(&Value::I64(2)));
    }

    #[test]
    fn test_iteration_order() {
        let params = BoundParams::new().bind("b", 2i64).bind("a", 1i64);
        let names: Vec<&str> = params.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
