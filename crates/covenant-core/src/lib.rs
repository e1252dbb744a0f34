//! Covenant Core - assertion language and enforcement engine
//!
//! This crate provides the building blocks for design-by-contract
//! enforcement:
//! - A runtime [`Value`] model checked values are expressed in
//! - A [`PredicateRegistry`] mapping names to boolean predicates
//! - An assertion expression parser producing composable [`Assertion`] trees
//! - A constraint expression evaluator for cross-parameter relations
//! - A [`Contract`] builder and enforcement wrapper
//!
//! # Examples
//!
//! ```
//! use covenant_core::{BoundParams, Contract, PredicateRegistry, Value};
//!
//! let registry = PredicateRegistry::new();
//! registry.register("positive int", |v: &Value| v.as_i64().is_some_and(|n| n > 0));
//!
//! let sum = Contract::builder_with(&registry)
//!     .param("a", "positive int")
//!     .param("b", "positive int")
//!     .constraint("a < b")
//!     .returns("positive int")
//!     .build()
//!     .unwrap()
//!     .wrap("sum", |args: &BoundParams| {
//!         let a = args.get("a").and_then(Value::as_i64).unwrap_or(0);
//!         let b = args.get("b").and_then(Value::as_i64).unwrap_or(0);
//!         Value::I64(a + b)
//!     });
//!
//! assert_eq!(
//!     sum.call(&BoundParams::new().bind("a", 1i64).bind("b", 2i64)),
//!     Ok(Value::I64(3))
//! );
//! assert!(sum
//!     .call(&BoundParams::new().bind("a", 2i64).bind("b", 1i64))
//!     .is_err());
//! ```
//!
//! Assertion expression syntax:
//! 1. A basic assertion is a reference to a predicate registered beforehand
//! 2. Surrounding `[]` states the assertion holds for all items of a
//!    container (never for the characters of text)
//! 3. Surrounding `{}` states the assertion holds for all values of a keyed
//!    container
//! 4. A `name:` prefix states the assertion is on a member attribute
//! 5. The forms above nest freely
//! 6. Several assertions chain with `,` (all must hold) or `|` (at least
//!    one must hold), never both in one expression

pub mod assertion;
pub mod constraint;
pub mod contract;
pub mod enforcement;
pub mod error;
pub mod params;
pub mod parser;
pub mod registry;
pub mod value;


pub use assertion::Assertion;
pub use contract::{Contract, ContractBuilder, Enforced};
pub use enforcement::{is_enabled, set_enabled};
pub use error::{ContractError, EnforceError, ParseError};
pub use params::BoundParams;
pub use parser::parse;
pub use registry::{global_registry, Predicate, PredicateError, PredicateRegistry};
pub use value::{Value, ValueKind};
