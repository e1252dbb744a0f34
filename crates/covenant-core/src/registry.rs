//! Named predicate registry.
//!
//! Assertion expressions refer to predicates by name; the registry is the
//! name -> predicate mapping they resolve against, once, at parse time.
//! Registration is expected to complete during an initialization phase
//! before concurrent calls begin.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use thiserror::Error;

use crate::value::Value;

/// Error raised by a predicate that cannot judge the given value.
///
/// Assertion nodes convert this into "predicate not satisfied"; it never
/// escapes a `check`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("predicate failed: {message}")]
pub struct PredicateError {
    /// What went wrong, for debug logging only.
    pub message: String,
}

impl PredicateError {
    /// Creates a new predicate error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A registered predicate: one value in, satisfied or not out.
///
/// The `Result` models predicates that cannot be applied to the value at
/// hand (wrong shape, missing length, incomparable elements); such errors
/// fail the contract instead of crashing the wrapper.
pub type Predicate = Arc<dyn Fn(&Value) -> Result<bool, PredicateError> + Send + Sync>;

/// Name -> predicate mapping with overwrite-on-re-register semantics.
///
/// Readers may run concurrently; writers are serialized by the interior
/// lock. Entries are added at setup time and read-only during evaluation.
///
/// # Examples
///
/// ```
/// use covenant_core::{PredicateRegistry, Value};
///
/// let registry = PredicateRegistry::new();
/// registry.register("positive", |v: &Value| v.as_i64().is_some_and(|n| n > 0));
/// assert!(registry.contains("positive"));
/// ```
#[derive(Default)]
pub struct PredicateRegistry {
    inner: RwLock<HashMap<String, Predicate>>,
}

impl PredicateRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a predicate under a name, replacing any previous entry.
    pub fn register<F>(&self, name: impl Into<String>, predicate: F)
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.register_fallible(name, move |value| Ok(predicate(value)));
    }

    /// Registers a predicate that may itself fail on unsuitable values.
    pub fn register_fallible<F>(&self, name: impl Into<String>, predicate: F)
    where
        F: Fn(&Value) -> Result<bool, PredicateError> + Send + Sync + 'static,
    {
        let mut entries = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(name.into(), Arc::new(predicate));
    }

    /// Looks up a predicate by name.
    pub fn get(&self, name: &str) -> Option<Predicate> {
        let entries = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(name).cloned()
    }

    /// Returns true if a predicate is registered under the name.
    pub fn contains(&self, name: &str) -> bool {
        let entries = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        entries.contains_key(name)
    }

    /// Number of registered predicates.
    pub fn len(&self) -> usize {
        let entries = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        entries.len()
    }

    /// Returns true if no predicates are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

static GLOBAL: OnceLock<PredicateRegistry> = OnceLock::new();

/// The process-wide default registry.
///
/// Convenience surface for hosts that want ambient registration; callers
/// that prefer explicit wiring can thread their own [`PredicateRegistry`]
/// through parse and builder calls instead.
pub fn global_registry() -> &'static PredicateRegistry {
    GLOBAL.get_or_init(PredicateRegistry::new)
}
