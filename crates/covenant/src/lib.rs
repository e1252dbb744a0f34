//! Covenant - design-by-contract enforcement
//!
//! Declare contracts on a callable's parameters, on relations between
//! parameters, and on the return value; every call through the wrapper is
//! checked. Parameter and return assertions are boolean predicates looked
//! up by name in a registry; cross-parameter constraints are small boolean
//! expressions over the bound parameter names.
//!
//! # Examples
//!
//! ```
//! use covenant::prelude::*;
//!
//! covenant::init_default();
//! global_registry().register("positive int", |v: &Value| {
//!     v.as_i64().is_some_and(|n| n > 0)
//! });
//!
//! let f = Contract::builder()
//!     .param("a", "positive int")
//!     .param("b", "positive int")
//!     .constraint("a < b")
//!     .returns("positive int")
//!     .build()
//!     .unwrap()
//!     .wrap("f", |args: &BoundParams| {
//!         let a = args.get("a").and_then(Value::as_i64).unwrap_or(0);
//!         let b = args.get("b").and_then(Value::as_i64).unwrap_or(0);
//!         Value::I64(a + b)
//!     });
//!
//! assert_eq!(
//!     f.call(&BoundParams::new().bind("a", 1i64).bind("b", 2i64)),
//!     Ok(Value::I64(3))
//! );
//! assert!(f
//!     .call(&BoundParams::new().bind("a", 2i64).bind("b", 1i64))
//!     .is_err());
//! ```

// Engine types
pub use covenant_core::{
    is_enabled, parse, set_enabled, Assertion, BoundParams, Contract, ContractBuilder,
    ContractError, EnforceError, Enforced, ParseError, Predicate, PredicateError,
    PredicateRegistry, Value, ValueKind,
};

// Registry surface
pub use covenant_core::global_registry;

// Constraint expressions, for hosts driving the evaluator directly
pub use covenant_core::constraint;

// Baseline predicates
pub use covenant_catalog as catalog;

// Configuration
pub use covenant_config::{ConfigError, EnforcementConfig};

/// Applies a configuration: installs the baseline catalog when requested
/// and sets the process-wide enforcement toggle.
pub fn init(config: &EnforcementConfig) {
    if config.catalog.defaults {
        covenant_catalog::setup();
    }
    set_enabled(config.enforcement.enabled);
    tracing::info!(
        enabled = config.enforcement.enabled,
        catalog = config.catalog.defaults,
        "contract enforcement initialized"
    );
}

/// Applies the default configuration: catalog installed, enforcement on.
pub fn init_default() {
    init(&EnforcementConfig::default());
}

pub mod prelude {
    pub use super::{
        global_registry, BoundParams, Contract, ContractError, PredicateRegistry, Value,
    };
}
