//! Error types for the enforcement engine.

use thiserror::Error;

/// Error compiling an assertion or constraint expression.
///
/// Raised at declaration time only; compilation happens once per contract,
/// so malformed expressions surface before any call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// ',' and '|' mixed in a single expression.
    #[error("cannot use operators ',' and '|' in the same assertion expression")]
    MixedCombinators,

    /// Reference to a name missing from the predicate registry.
    #[error("unknown assertion '{0}'")]
    UnknownAssertion(String),

    /// Unbalanced bracket or brace.
    #[error("unbalanced '{0}' in assertion expression")]
    Unbalanced(char),

    /// Empty expression or empty combinator segment.
    #[error("empty assertion expression")]
    Empty,

    /// Member projection with an empty member name.
    #[error("member assertion with empty member name")]
    EmptyMemberName,

    /// Malformed cross-parameter constraint expression.
    #[error("invalid constraint expression: {0}")]
    Constraint(String),
}

/// A contract check failed at call time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    /// A parameter's assertion tree rejected the bound value.
    #[error("broken contract for parameter '{parameter}' in function '{function}': value {value}")]
    Parameter {
        /// Enclosing callable.
        function: String,
        /// Offending parameter name.
        parameter: String,
        /// Best-effort description of the offending value.
        value: String,
    },

    /// The cross-parameter constraint evaluated to false or failed to
    /// evaluate.
    #[error("broken contract for constraint '{expression}' in function '{function}'")]
    Constraint {
        /// Enclosing callable.
        function: String,
        /// The constraint expression as declared.
        expression: String,
    },

    /// The return-value assertion tree rejected the result.
    #[error("broken contract for return value of function '{function}'")]
    Return {
        /// Enclosing callable.
        function: String,
    },
}

/// Failure of a wrapped fallible callable: either a contract violation or
/// the callable's own error, passed through untouched.
#[derive(Debug, Error)]
pub enum EnforceError<E> {
    /// A contract check failed before or after the callable ran.
    #[error(transparent)]
    Contract(#[from] ContractError),

    /// The wrapped callable itself failed; never reinterpreted.
    #[error("{0}")]
    Callable(E),
}
