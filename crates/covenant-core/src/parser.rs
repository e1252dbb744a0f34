//! Assertion expression parser.
//!
//! Compiles an expression string into an [`Assertion`] tree, resolving
//! predicate names against a registry as it goes. Parsing is recursive and
//! top-down: container wrapping first, then member projection, then the
//! combinator list.
//!
//! Grammar, by example:
//!
//! - `positive`              the named predicate
//! - `[positive]`            every element satisfies `positive`
//! - `{positive}`            every mapping value satisfies `positive`
//! - `member:positive`       attribute `member` satisfies `positive`
//! - `[member:positive]`     every element has such an attribute
//! - `a,b`                   both must hold
//! - `a|b`                   at least one must hold (never mixed with `,`)

use std::sync::Arc;

use crate::assertion::Assertion;
use crate::error::ParseError;
use crate::registry::PredicateRegistry;

/// Compiles an assertion expression against the given registry.
///
/// Fails if the expression is malformed or references an unregistered
/// name. Names are resolved here, once; the resulting tree never touches
/// the registry again.
///
/// # Examples
///
/// ```
/// use covenant_core::{parse, PredicateRegistry, Value};
///
/// let registry = PredicateRegistry::new();
/// registry.register("positive", |v: &Value| v.as_i64().is_some_and(|n| n > 0));
///
/// let tree = parse("[positive]", &registry).unwrap();
/// assert!(tree.check(&Value::List(vec![Value::I64(1), Value::I64(2)])));
/// assert!(!tree.check(&Value::List(vec![Value::I64(-1)])));
/// ```
pub fn parse(expression: &str, registry: &PredicateRegistry) -> Result<Assertion, ParseError> {
    let text = expression.trim();
    if text.is_empty() {
        return Err(ParseError::Empty);
    }
    check_balanced(text)?;

    if let Some(inner) = strip_delimited(text, '[', ']') {
        return Ok(Assertion::Sequence(Box::new(parse(inner, registry)?)));
    }
    if let Some(inner) = strip_delimited(text, '{', '}') {
        return Ok(Assertion::Mapping(Box::new(parse(inner, registry)?)));
    }
    if let Some((name, rest)) = split_member(text) {
        let name = name.trim();
        if name.is_empty() {
            return Err(ParseError::EmptyMemberName);
        }
        return Ok(Assertion::Member {
            name: Arc::from(name),
            inner: Box::new(parse(rest, registry)?),
        });
    }

    let has_comma = contains_top_level(text, ',');
    let has_pipe = contains_top_level(text, '|');
    if has_comma && has_pipe {
        return Err(ParseError::MixedCombinators);
    }
    if has_comma || has_pipe {
        let separator = if has_pipe { '|' } else { ',' };
        let children = split_top_level(text, separator)
            .into_iter()
            .map(|segment| parse(segment, registry))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(if has_pipe {
            Assertion::Any(children)
        } else {
            Assertion::All(children)
        });
    }

    match registry.get(text) {
        Some(predicate) => Ok(Assertion::Simple {
            name: Arc::from(text),
            predicate,
        }),
        None => Err(ParseError::UnknownAssertion(text.to_string())),
    }
}

/// Rejects expressions with unbalanced or mismatched brackets/braces.
fn check_balanced(text: &str) -> Result<(), ParseError> {
    let mut stack = Vec::new();
    for c in text.chars() {
        match c {
            '[' | '{' => stack.push(c),
            ']' => {
                if stack.pop() != Some('[') {
                    return Err(ParseError::Unbalanced(']'));
                }
            }
            '}' => {
                if stack.pop() != Some('{') {
                    return Err(ParseError::Unbalanced('}'));
                }
            }
            _ => {}
        }
    }
    match stack.pop() {
        Some(open) => Err(ParseError::Unbalanced(open)),
        None => Ok(()),
    }
}

/// Returns the inner text when the whole expression is wrapped in one
/// matching `open`/`close` pair, e.g. `[a,b]` but not `[a],[b]`.
fn strip_delimited(text: &str, open: char, close: char) -> Option<&str> {
    if !text.starts_with(open) || !text.ends_with(close) {
        return None;
    }
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                if i == text.len() - close.len_utf8() {
                    return Some(&text[open.len_utf8()..i]);
                }
                return None;
            }
        }
    }
    None
}

/// Splits `member-name : remaining-expression` at the first top-level colon.
///
/// A colon only counts when it sits at bracket depth 0 and no depth-0
/// combinator separator precedes it; the combinator list binds looser, so
/// `[member:a], member:[b]` splits on the comma first.
fn split_member(text: &str) -> Option<(&str, &str)> {
    let mut depth = 0i32;
    for (i, c) in text.char_indices() {
        match c {
            '[' | '{' => depth += 1,
            ']' | '}' => depth -= 1,
            ',' | '|' if depth == 0 => return None,
            ':' if depth == 0 => return Some((&text[..i], &text[i + c.len_utf8()..])),
            _ => {}
        }
    }
    None
}

/// True when the character occurs at bracket depth 0.
fn contains_top_level(text: &str, target: char) -> bool {
    let mut depth = 0i32;
    for c in text.chars() {
        match c {
            '[' | '{' => depth += 1,
            ']' | '}' => depth -= 1,
            c if c == target && depth == 0 => return true,
            _ => {}
        }
    }
    false
}

/// Splits on the separator at bracket depth 0 only, so nested combinators
/// and brackets compose freely.
fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '[' | '{' => depth += 1,
            ']' | '}' => depth -= 1,
            c if c == separator && depth == 0 => {
                parts.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}
