//! Condition expression evaluation for the in-memory backend.
//!
//! Supports the subset of the DynamoDB grammar that key conditions and
//! filters commonly use:
//!
//! - comparisons `=`, `<>`, `<`, `<=`, `>`, `>=`
//! - `a BETWEEN :lo AND :hi`
//! - `begins_with(path, :v)`, `contains(path, :v)`,
//!   `attribute_exists(path)`, `attribute_not_exists(path)`
//! - `AND`, `OR`, `NOT` and parentheses
//! - `#name` and `:value` placeholders, dotted paths into nested maps

use std::cmp::Ordering;
use std::collections::HashMap;

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExpressionError {
    #[error("Invalid expression: {0}")]
    Syntax(String),
    #[error("Value {0} is used in the expression but not defined")]
    UndefinedValue(String),
    #[error("Name {0} is used in the expression but not defined")]
    UndefinedName(String),
}

type Result<T> = std::result::Result<T, ExpressionError>;

/// Longest expression DynamoDB accepts, in bytes.
const MAX_EXPRESSION_LENGTH: usize = 4096;

/// Deepest nesting of parentheses and `NOT`s the parser follows.
const MAX_NESTING_DEPTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

#[derive(Debug, Clone, PartialEq)]
enum Operand {
    /// Attribute path, each segment already resolved through `#name`s.
    Path(Vec<String>),
    Value(Value),
}

#[derive(Debug, Clone, PartialEq)]
enum Expr {
    Compare(Operand, CompareOp, Operand),
    Between(Operand, Operand, Operand),
    BeginsWith(Operand, Operand),
    Contains(Operand, Operand),
    Exists(Operand, bool),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Not(Box<Expr>),
}

/// A parsed condition expression bound to its placeholder values.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition(Expr);

impl Condition {
    /// Parses `text`, resolving placeholders against `names` and `values`.
    pub fn parse(
        text: &str,
        names: &HashMap<String, String>,
        values: &Map<String, Value>,
    ) -> Result<Self> {
        if text.len() > MAX_EXPRESSION_LENGTH {
            return Err(ExpressionError::Syntax(format!(
                "expression exceeds {MAX_EXPRESSION_LENGTH} bytes"
            )));
        }
        let tokens = tokenize(text)?;
        let mut parser = Parser {
            tokens,
            pos: 0,
            depth: 0,
            names,
            values,
        };
        let expr = parser.parse_or()?;
        if parser.pos != parser.tokens.len() {
            return Err(ExpressionError::Syntax(format!(
                "unexpected token {:?}",
                parser.tokens[parser.pos]
            )));
        }
        Ok(Self(expr))
    }

    /// Evaluates the condition against an item.
    pub fn matches(&self, item: &Map<String, Value>) -> bool {
        eval(&self.0, item)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    Name(String),
    Value(String),
    Op(CompareOp),
    LParen,
    RParen,
    Comma,
    Dot,
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

fn tokenize(text: &str) -> Result<Vec<Token>> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
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
            ',' => {
                tokens.push(Token::Comma);
                i += 1;
            }
            '.' => {
                tokens.push(Token::Dot);
                i += 1;
            }
            '=' => {
                tokens.push(Token::Op(CompareOp::Eq));
                i += 1;
            }
            '<' => match chars.get(i + 1) {
                Some('>') => {
                    tokens.push(Token::Op(CompareOp::Ne));
                    i += 2;
                }
                Some('=') => {
                    tokens.push(Token::Op(CompareOp::Le));
                    i += 2;
                }
                _ => {
                    tokens.push(Token::Op(CompareOp::Lt));
                    i += 1;
                }
            },
            '>' => match chars.get(i + 1) {
                Some('=') => {
                    tokens.push(Token::Op(CompareOp::Ge));
                    i += 2;
                }
                _ => {
                    tokens.push(Token::Op(CompareOp::Gt));
                    i += 1;
                }
            },
            '#' | ':' => {
                let start = i;
                i += 1;
                while i < chars.len() && is_ident_char(chars[i]) {
                    i += 1;
                }
                if i == start + 1 {
                    return Err(ExpressionError::Syntax(format!(
                        "empty placeholder at position {start}"
                    )));
                }
                let word: String = chars[start..i].iter().collect();
                tokens.push(if c == '#' {
                    Token::Name(word)
                } else {
                    Token::Value(word)
                });
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let start = i;
                while i < chars.len() && is_ident_char(chars[i]) {
                    i += 1;
                }
                tokens.push(Token::Ident(chars[start..i].iter().collect()));
            }
            other => {
                return Err(ExpressionError::Syntax(format!(
                    "unexpected character '{other}' at position {i}"
                )))
            }
        }
    }

    Ok(tokens)
}

struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    names: &'a HashMap<String, String>,
    values: &'a Map<String, Value>,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn peek_keyword(&self, keyword: &str) -> bool {
        matches!(self.peek(), Some(Token::Ident(word)) if word.eq_ignore_ascii_case(keyword))
    }

    fn expect(&mut self, expected: Token) -> Result<()> {
        match self.next() {
            Some(token) if token == expected => Ok(()),
            other => Err(ExpressionError::Syntax(format!(
                "expected {expected:?}, found {other:?}"
            ))),
        }
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(ExpressionError::Syntax(format!(
                "expression nests deeper than {MAX_NESTING_DEPTH} levels"
            )));
        }
        Ok(())
    }

    fn parse_or(&mut self) -> Result<Expr> {
        let mut left = self.parse_and()?;
        while self.peek_keyword("OR") {
            self.pos += 1;
            let right = self.parse_and()?;
            left = Expr::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr> {
        let mut left = self.parse_not()?;
        while self.peek_keyword("AND") {
            self.pos += 1;
            let right = self.parse_not()?;
            left = Expr::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_not(&mut self) -> Result<Expr> {
        if self.peek_keyword("NOT") {
            self.pos += 1;
            self.enter()?;
            let inner = self.parse_not()?;
            self.depth -= 1;
            return Ok(Expr::Not(Box::new(inner)));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        if self.peek() == Some(&Token::LParen) {
            self.pos += 1;
            self.enter()?;
            let expr = self.parse_or()?;
            self.expect(Token::RParen)?;
            self.depth -= 1;
            return Ok(expr);
        }

        if let (Some(Token::Ident(word)), Some(Token::LParen)) =
            (self.peek().cloned(), self.tokens.get(self.pos + 1))
        {
            self.pos += 2;
            return self.parse_function(&word);
        }

        let left = self.parse_operand()?;

        if self.peek_keyword("BETWEEN") {
            self.pos += 1;
            let low = self.parse_operand()?;
            if !self.peek_keyword("AND") {
                return Err(ExpressionError::Syntax(
                    "BETWEEN requires AND".to_string(),
                ));
            }
            self.pos += 1;
            let high = self.parse_operand()?;
            return Ok(Expr::Between(left, low, high));
        }

        match self.next() {
            Some(Token::Op(op)) => {
                let right = self.parse_operand()?;
                Ok(Expr::Compare(left, op, right))
            }
            other => Err(ExpressionError::Syntax(format!(
                "expected comparison operator, found {other:?}"
            ))),
        }
    }

    fn parse_function(&mut self, name: &str) -> Result<Expr> {
        let mut args = vec![self.parse_operand()?];
        while self.peek() == Some(&Token::Comma) {
            self.pos += 1;
            args.push(self.parse_operand()?);
        }
        self.expect(Token::RParen)?;

        let arity_error =
            || ExpressionError::Syntax(format!("wrong number of arguments for {name}"));

        match (name, args.len()) {
            ("begins_with", 2) => {
                let value = args.pop().ok_or_else(arity_error)?;
                let path = args.pop().ok_or_else(arity_error)?;
                Ok(Expr::BeginsWith(path, value))
            }
            ("contains", 2) => {
                let value = args.pop().ok_or_else(arity_error)?;
                let path = args.pop().ok_or_else(arity_error)?;
                Ok(Expr::Contains(path, value))
            }
            ("attribute_exists", 1) => Ok(Expr::Exists(args.remove(0), true)),
            ("attribute_not_exists", 1) => Ok(Expr::Exists(args.remove(0), false)),
            ("begins_with" | "contains" | "attribute_exists" | "attribute_not_exists", _) => {
                Err(arity_error())
            }
            _ => Err(ExpressionError::Syntax(format!(
                "unsupported function {name}"
            ))),
        }
    }

    fn parse_operand(&mut self) -> Result<Operand> {
        match self.next() {
            Some(Token::Value(placeholder)) => self
                .values
                .get(&placeholder)
                .cloned()
                .map(Operand::Value)
                .ok_or(ExpressionError::UndefinedValue(placeholder)),
            Some(token @ (Token::Ident(_) | Token::Name(_))) => {
                let mut path = vec![self.path_segment(token)?];
                while self.peek() == Some(&Token::Dot) {
                    self.pos += 1;
                    let token = self.next().ok_or_else(|| {
                        ExpressionError::Syntax("path ends with '.'".to_string())
                    })?;
                    path.push(self.path_segment(token)?);
                }
                Ok(Operand::Path(path))
            }
            other => Err(ExpressionError::Syntax(format!(
                "expected operand, found {other:?}"
            ))),
        }
    }

    fn path_segment(&self, token: Token) -> Result<String> {
        match token {
            Token::Ident(word) => Ok(word),
            Token::Name(placeholder) => self
                .names
                .get(&placeholder)
                .cloned()
                .ok_or(ExpressionError::UndefinedName(placeholder)),
            other => Err(ExpressionError::Syntax(format!(
                "expected attribute name, found {other:?}"
            ))),
        }
    }
}

fn resolve<'v>(operand: &'v Operand, item: &'v Map<String, Value>) -> Option<&'v Value> {
    match operand {
        Operand::Value(value) => Some(value),
        Operand::Path(path) => {
            let (first, rest) = path.split_first()?;
            rest.iter()
                .try_fold(item.get(first)?, |value, segment| value.get(segment))
        }
    }
}

/// Ordering for the scalar types DynamoDB can compare: numbers and strings.
fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn eval(expr: &Expr, item: &Map<String, Value>) -> bool {
    match expr {
        Expr::Compare(left, op, right) => {
            let (Some(l), Some(r)) = (resolve(left, item), resolve(right, item)) else {
                // A missing attribute is unequal to everything.
                return *op == CompareOp::Ne;
            };
            match op {
                CompareOp::Eq => l == r,
                CompareOp::Ne => l != r,
                CompareOp::Lt => compare(l, r) == Some(Ordering::Less),
                CompareOp::Le => matches!(compare(l, r), Some(Ordering::Less | Ordering::Equal)),
                CompareOp::Gt => compare(l, r) == Some(Ordering::Greater),
                CompareOp::Ge => {
                    matches!(compare(l, r), Some(Ordering::Greater | Ordering::Equal))
                }
            }
        }
        Expr::Between(value, low, high) => {
            match (resolve(value, item), resolve(low, item), resolve(high, item)) {
                (Some(v), Some(lo), Some(hi)) => {
                    matches!(compare(v, lo), Some(Ordering::Greater | Ordering::Equal))
                        && matches!(compare(v, hi), Some(Ordering::Less | Ordering::Equal))
                }
                _ => false,
            }
        }
        Expr::BeginsWith(path, prefix) => match (resolve(path, item), resolve(prefix, item)) {
            (Some(Value::String(s)), Some(Value::String(p))) => s.starts_with(p.as_str()),
            _ => false,
        },
        Expr::Contains(path, needle) => match (resolve(path, item), resolve(needle, item)) {
            (Some(Value::String(s)), Some(Value::String(n))) => s.contains(n.as_str()),
            (Some(Value::Array(list)), Some(n)) => list.contains(n),
            _ => false,
        },
        Expr::Exists(path, expected) => resolve(path, item).is_some() == *expected,
        Expr::And(left, right) => eval(left, item) && eval(right, item),
        Expr::Or(left, right) => eval(left, item) || eval(right, item),
        Expr::Not(inner) => !eval(inner, item),
    }
}
