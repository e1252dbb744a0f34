//! Compiled contracts and the enforcement wrapper.
//!
//! A contract is compiled once at declaration time (parameter assertion
//! trees, an optional cross-parameter constraint, an optional return
//! assertion) and reused unchanged for every call. Wrapping a callable
//! with a contract yields a checked callable with the same surface.

use std::collections::HashMap;
use std::sync::Arc;

use crate::assertion::Assertion;
use crate::constraint::{eval_bool, parse_constraint, Expr};
use crate::enforcement;
use crate::error::{ContractError, EnforceError, ParseError};
use crate::params::BoundParams;
use crate::parser::parse;
use crate::registry::{global_registry, Predicate, PredicateRegistry};
use crate::value::Value;

/// A cross-parameter constraint: the declared text plus its compiled form.
#[derive(Debug, Clone)]
struct Constraint {
    text: Arc<str>,
    expr: Expr,
}

/// The per-declaration artifact: everything a wrapped callable needs to
/// check a call. Immutable after [`ContractBuilder::build`]; share it
/// freely across threads.
#[derive(Debug, Clone)]
pub struct Contract {
    parameters: HashMap<String, Assertion>,
    constraint: Option<Constraint>,
    returns: Option<Assertion>,
}

impl Contract {
    /// Starts a declaration against the process-wide registry.
    pub fn builder() -> ContractBuilder<'static> {
        Self::builder_with(global_registry())
    }

    /// Starts a declaration against an explicit registry handle.
    pub fn builder_with(registry: &PredicateRegistry) -> ContractBuilder<'_> {
        ContractBuilder {
            registry,
            parameters: Vec::new(),
            constraint: None,
            returns: None,
        }
    }

    /// Checks every bound parameter that carries an assertion.
    ///
    /// Assertions declared for names absent from the bound set are inert;
    /// that mirrors default-parameter flexibility in the host convention.
    pub fn check_parameters(
        &self,
        function: &str,
        params: &BoundParams,
    ) -> Result<(), ContractError> {
        for (name, value) in params.iter() {
            if let Some(assertion) = self.parameters.get(name) {
                if !assertion.check(value) {
                    tracing::debug!(function, parameter = name, "parameter contract failed");
                    return Err(ContractError::Parameter {
                        function: function.to_string(),
                        parameter: name.to_string(),
                        value: value.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Evaluates the cross-parameter constraint, if any, over the full
    /// bound environment. A false result or an evaluation error is a
    /// violation.
    pub fn check_constraint(
        &self,
        function: &str,
        params: &BoundParams,
    ) -> Result<(), ContractError> {
        let Some(constraint) = &self.constraint else {
            return Ok(());
        };
        match eval_bool(&constraint.expr, params) {
            Ok(true) => Ok(()),
            Ok(false) => Err(self.constraint_violation(function, constraint)),
            Err(err) => {
                tracing::debug!(function, error = %err, "constraint evaluation failed");
                Err(self.constraint_violation(function, constraint))
            }
        }
    }

    /// Checks the return value against the return assertion, if any.
    pub fn check_return(&self, function: &str, value: &Value) -> Result<(), ContractError> {
        match &self.returns {
            Some(assertion) if !assertion.check(value) => {
                tracing::debug!(function, "return contract failed");
                Err(ContractError::Return {
                    function: function.to_string(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Wraps a callable; every invocation through the wrapper is checked.
    pub fn wrap<F>(self, function: impl Into<Arc<str>>, inner: F) -> Enforced<F> {
        Enforced {
            function: function.into(),
            contract: self,
            inner,
        }
    }

    /// Number of parameters carrying assertions.
    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    /// Returns true when a cross-parameter constraint is declared.
    pub fn has_constraint(&self) -> bool {
        self.constraint.is_some()
    }

    /// Returns true when a return assertion is declared.
    pub fn has_return_assertion(&self) -> bool {
        self.returns.is_some()
    }

    fn constraint_violation(&self, function: &str, constraint: &Constraint) -> ContractError {
        ContractError::Constraint {
            function: function.to_string(),
            expression: constraint.text.to_string(),
        }
    }
}

/// Declaration-time builder for [`Contract`].
///
/// Accepts, per parameter name, an assertion expression or a raw predicate;
/// plus an optional constraint expression and an optional return assertion.
/// All expressions compile in [`build`](Self::build), so malformed ones
/// fail at declaration time, before any call.
///
/// # Examples
///
/// ```
/// use covenant_core::{BoundParams, Contract, PredicateRegistry, Value};
///
/// let registry = PredicateRegistry::new();
/// registry.register("int", |v: &Value| v.as_i64().is_some());
///
/// let contract = Contract::builder_with(&registry)
///     .param("a", "int")
///     .param("b", "int")
///     .constraint("a < b")
///     .build()
///     .unwrap();
///
/// let args = BoundParams::new().bind("a", 1i64).bind("b", 2i64);
/// assert!(contract.check_parameters("f", &args).is_ok());
/// assert!(contract.check_constraint("f", &args).is_ok());
/// ```
pub struct ContractBuilder<'r> {
    registry: &'r PredicateRegistry,
    parameters: Vec<(String, Spec)>,
    constraint: Option<String>,
    returns: Option<Spec>,
}

enum Spec {
    Expression(String),
    Predicate(Predicate),
}

impl ContractBuilder<'_> {
    /// Declares an assertion expression for a parameter.
    pub fn param(mut self, name: impl Into<String>, expression: impl Into<String>) -> Self {
        self.parameters
            .push((name.into(), Spec::Expression(expression.into())));
        self
    }

    /// Declares a raw predicate for a parameter, bypassing the grammar.
    pub fn param_predicate<F>(mut self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.parameters.push((
            name.into(),
            Spec::Predicate(Arc::new(move |value| Ok(predicate(value)))),
        ));
        self
    }

    /// Declares the cross-parameter constraint expression.
    pub fn constraint(mut self, expression: impl Into<String>) -> Self {
        self.constraint = Some(expression.into());
        self
    }

    /// Declares the return-value assertion expression.
    pub fn returns(mut self, expression: impl Into<String>) -> Self {
        self.returns = Some(Spec::Expression(expression.into()));
        self
    }

    /// Declares a raw predicate for the return value.
    pub fn returns_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.returns = Some(Spec::Predicate(Arc::new(move |value| Ok(predicate(value)))));
        self
    }

    /// Compiles the declaration into an immutable [`Contract`].
    pub fn build(self) -> Result<Contract, ParseError> {
        let ContractBuilder {
            registry,
            parameters: declared,
            constraint,
            returns,
        } = self;
        let mut parameters = HashMap::with_capacity(declared.len());
        for (name, spec) in declared {
            parameters.insert(name, compile_spec(registry, spec)?);
        }
        let constraint = constraint
            .map(|text| {
                Ok::<_, ParseError>(Constraint {
                    expr: parse_constraint(&text)?,
                    text: Arc::from(text.as_str()),
                })
            })
            .transpose()?;
        let returns = returns
            .map(|spec| compile_spec(registry, spec))
            .transpose()?;
        Ok(Contract {
            parameters,
            constraint,
            returns,
        })
    }
}

fn compile_spec(registry: &PredicateRegistry, spec: Spec) -> Result<Assertion, ParseError> {
    match spec {
        Spec::Expression(text) => parse(&text, registry),
        Spec::Predicate(predicate) => Ok(Assertion::Generic(predicate)),
    }
}

/// A callable wrapped with a compiled contract.
///
/// When enforcement is off the wrapper delegates directly; otherwise each
/// invocation checks parameters, then the constraint, runs the callable,
/// and checks the result.
pub struct Enforced<F> {
    function: Arc<str>,
    contract: Contract,
    inner: F,
}

impl<F> Enforced<F> {
    /// The wrapped callable's name, as declared.
    pub fn function(&self) -> &str {
        &self.function
    }

    /// The compiled contract backing this wrapper.
    pub fn contract(&self) -> &Contract {
        &self.contract
    }
}

impl<F> Enforced<F>
where
    F: Fn(&BoundParams) -> Value,
{
    /// Invokes the wrapped callable with contract checks.
    pub fn call(&self, args: &BoundParams) -> Result<Value, ContractError> {
        if !enforcement::is_enabled() {
            return Ok((self.inner)(args));
        }
        self.contract.check_parameters(&self.function, args)?;
        self.contract.check_constraint(&self.function, args)?;
        let result = (self.inner)(args);
        self.contract.check_return(&self.function, &result)?;
        Ok(result)
    }
}

impl<F, E> Enforced<F>
where
    F: Fn(&BoundParams) -> Result<Value, E>,
{
    /// Invokes a fallible wrapped callable with contract checks.
    ///
    /// The callable's own error is passed through untouched as
    /// [`EnforceError::Callable`]; it is never reinterpreted as a
    /// violation.
    pub fn try_call(&self, args: &BoundParams) -> Result<Value, EnforceError<E>> {
        if !enforcement::is_enabled() {
            return (self.inner)(args).map_err(EnforceError::Callable);
        }
        self.contract.check_parameters(&self.function, args)?;
        self.contract.check_constraint(&self.function, args)?;
        let result = (self.inner)(args).map_err(EnforceError::Callable)?;
        self.contract.check_return(&self.function, &result)?;
        Ok(result)
    }
}
