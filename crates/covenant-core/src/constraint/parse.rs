//! Parsing of constraint expression text.
//!
//! Recursive descent over a small token stream. Precedence, loosest first:
//! `||`/`or`, `&&`/`and`, `!`/`not`, comparisons (non-chaining), `+`/`-`,
//! `*`/`/`/`%`, unary minus. Parameter names are plain identifiers; `true`,
//! `false` and `none` are literals.

use std::sync::Arc;

use super::expr::Expr;
use crate::error::ParseError;
use crate::value::Value;

/// Compiles constraint text into an [`Expr`] tree.
///
/// Name resolution is deferred to evaluation time; only structure is
/// validated here.
///
/// # Examples
///
/// ```
/// use covenant_core::constraint::parse_constraint;
///
/// assert!(parse_constraint("a < b").is_ok());
/// assert!(parse_constraint("a + 1 == b && !strict").is_ok());
/// assert!(parse_constraint("a <").is_err());
/// ```
pub fn parse_constraint(text: &str) -> Result<Expr, ParseError> {
    let tokens = tokenize(text).map_err(ParseError::Constraint)?;
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.parse_or().map_err(ParseError::Constraint)?;
    match parser.peek() {
        Some(token) => Err(ParseError::Constraint(format!(
            "unexpected trailing {token:?}"
        ))),
        None => Ok(expr),
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Int(i64),
    Float(f64),
    Text(String),
    Name(String),
    EqEq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    AndAnd,
    OrOr,
    Bang,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    LParen,
    RParen,
}

fn tokenize(text: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            c if c.is_whitespace() => i += 1,
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            '+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            '*' => {
                tokens.push(Token::Star);
                i += 1;
            }
            '/' => {
                tokens.push(Token::Slash);
                i += 1;
            }
            '%' => {
                tokens.push(Token::Percent);
                i += 1;
            }
            '=' => {
                if chars.get(i + 1) == Some(&'=') {
                    tokens.push(Token::EqEq);
                    i += 2;
                } else {
                    return Err("single '=' is not an operator, use '=='".into());
                }
            }
            '!' => {
                if chars.get(i + 1) == Some(&'=') {
                    tokens.push(Token::NotEq);
                    i += 2;
                } else {
                    tokens.push(Token::Bang);
                    i += 1;
                }
            }
            '<' => {
                if chars.get(i + 1) == Some(&'=') {
                    tokens.push(Token::Le);
                    i += 2;
                } else {
                    tokens.push(Token::Lt);
                    i += 1;
                }
            }
            '>' => {
                if chars.get(i + 1) == Some(&'=') {
                    tokens.push(Token::Ge);
                    i += 2;
                } else {
                    tokens.push(Token::Gt);
                    i += 1;
                }
            }
            '&' => {
                if chars.get(i + 1) == Some(&'&') {
                    tokens.push(Token::AndAnd);
                    i += 2;
                } else {
                    return Err("single '&' is not an operator, use '&&'".into());
                }
            }
            '|' => {
                if chars.get(i + 1) == Some(&'|') {
                    tokens.push(Token::OrOr);
                    i += 2;
                } else {
                    return Err("single '|' is not an operator, use '||'".into());
                }
            }
            '\'' | '"' => {
                let quote = c;
                let start = i + 1;
                let mut end = start;
                while end < chars.len() && chars[end] != quote {
                    end += 1;
                }
                if end == chars.len() {
                    return Err("unterminated string literal".into());
                }
                tokens.push(Token::Text(chars[start..end].iter().collect()));
                i = end + 1;
            }
            c if c.is_ascii_digit() => {
                let start = i;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
                let is_float = i + 1 < chars.len()
                    && chars[i] == '.'
                    && chars[i + 1].is_ascii_digit();
                if is_float {
                    i += 1;
                    while i < chars.len() && chars[i].is_ascii_digit() {
                        i += 1;
                    }
                    let literal: String = chars[start..i].iter().collect();
                    let value = literal
                        .parse::<f64>()
                        .map_err(|e| format!("bad float literal '{literal}': {e}"))?;
                    tokens.push(Token::Float(value));
                } else {
                    let literal: String = chars[start..i].iter().collect();
                    let value = literal
                        .parse::<i64>()
                        .map_err(|e| format!("bad integer literal '{literal}': {e}"))?;
                    tokens.push(Token::Int(value));
                }
            }
            c if c.is_alphabetic() || c == '_' => {
                let start = i;
                while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                tokens.push(Token::Name(chars[start..i].iter().collect()));
            }
            other => return Err(format!("unexpected character '{other}'")),
        }
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            return true;
        }
        false
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if matches!(self.peek(), Some(Token::Name(name)) if name == keyword) {
            self.pos += 1;
            return true;
        }
        false
    }

    fn parse_or(&mut self) -> Result<Expr, String> {
        let mut expr = self.parse_and()?;
        while self.eat(&Token::OrOr) || self.eat_keyword("or") {
            let right = self.parse_and()?;
            expr = Expr::or(expr, right);
        }
        Ok(expr)
    }

    fn parse_and(&mut self) -> Result<Expr, String> {
        let mut expr = self.parse_not()?;
        while self.eat(&Token::AndAnd) || self.eat_keyword("and") {
            let right = self.parse_not()?;
            expr = Expr::and(expr, right);
        }
        Ok(expr)
    }

    fn parse_not(&mut self) -> Result<Expr, String> {
        if self.eat(&Token::Bang) || self.eat_keyword("not") {
            return Ok(Expr::not(self.parse_not()?));
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Expr, String> {
        let left = self.parse_additive()?;
        let comparator: Option<fn(Expr, Expr) -> Expr> = match self.peek() {
            Some(Token::EqEq) => Some(Expr::eq),
            Some(Token::NotEq) => Some(Expr::ne),
            Some(Token::Lt) => Some(Expr::lt),
            Some(Token::Le) => Some(Expr::le),
            Some(Token::Gt) => Some(Expr::gt),
            Some(Token::Ge) => Some(Expr::ge),
            _ => None,
        };
        let Some(build) = comparator else {
            return Ok(left);
        };
        self.pos += 1;
        let right = self.parse_additive()?;
        if matches!(
            self.peek(),
            Some(Token::EqEq | Token::NotEq | Token::Lt | Token::Le | Token::Gt | Token::Ge)
        ) {
            return Err("chained comparisons are not supported".into());
        }
        Ok(build(left, right))
    }

    fn parse_additive(&mut self) -> Result<Expr, String> {
        let mut expr = self.parse_multiplicative()?;
        loop {
            if self.eat(&Token::Plus) {
                expr = Expr::add(expr, self.parse_multiplicative()?);
            } else if self.eat(&Token::Minus) {
                expr = Expr::sub(expr, self.parse_multiplicative()?);
            } else {
                return Ok(expr);
            }
        }
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, String> {
        let mut expr = self.parse_unary()?;
        loop {
            if self.eat(&Token::Star) {
                expr = Expr::mul(expr, self.parse_unary()?);
            } else if self.eat(&Token::Slash) {
                expr = Expr::div(expr, self.parse_unary()?);
            } else if self.eat(&Token::Percent) {
                expr = Expr::modulo(expr, self.parse_unary()?);
            } else {
                return Ok(expr);
            }
        }
    }

    fn parse_unary(&mut self) -> Result<Expr, String> {
        if self.eat(&Token::Minus) {
            return Ok(Expr::neg(self.parse_unary()?));
        }
        self.parse_atom()
    }

    fn parse_atom(&mut self) -> Result<Expr, String> {
        match self.advance() {
            Some(Token::Int(value)) => Ok(Expr::int(value)),
            Some(Token::Float(value)) => Ok(Expr::Literal(Value::F64(value))),
            Some(Token::Text(value)) => Ok(Expr::Literal(Value::Str(Arc::from(value.as_str())))),
            Some(Token::LParen) => {
                let expr = self.parse_or()?;
                if !self.eat(&Token::RParen) {
                    return Err("missing closing ')'".into());
                }
                Ok(expr)
            }
            Some(Token::Name(name)) => match name.as_str() {
                "true" => Ok(Expr::bool(true)),
                "false" => Ok(Expr::bool(false)),
                "none" => Ok(Expr::Literal(Value::None)),
                "and" | "or" | "not" => Err(format!("unexpected keyword '{name}'")),
                _ => Ok(Expr::name(name)),
            },
            Some(other) => Err(format!("unexpected {other:?}")),
            None => Err("unexpected end of expression".into()),
        }
    }
}
