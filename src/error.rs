//! Error taxonomy for the two disjoint error regimes (spec §7): parser
//! errors accumulate and never halt parsing; evaluator errors are
//! first-class `Object::Error` values constructed from [`EvalError`].

use thiserror::Error;

use crate::token::{Token, TokenType};

/// Errors recorded by the parser. `parse_program` always returns a
/// (possibly partial) tree; callers inspect `errors()` afterward.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("expected next token to be {expected}, got {got} instead at {row}:{col}")]
    TokenType {
        expected: TokenType,
        got: TokenType,
        row: usize,
        col: usize,
    },

    #[error("no prefix parse function for {token_type} found at {row}:{col}")]
    NoParseFunc {
        token_type: TokenType,
        row: usize,
        col: usize,
    },

    #[error("could not parse {literal:?} as integer at {row}:{col}")]
    InvalidLiteral {
        literal: String,
        row: usize,
        col: usize,
    },
}

impl ParseError {
    pub fn token_type(expected: TokenType, got: &Token) -> Self {
        ParseError::TokenType {
            expected,
            got: got.token_type,
            row: got.row,
            col: got.col,
        }
    }

    pub fn no_parse_func(got: &Token) -> Self {
        ParseError::NoParseFunc {
            token_type: got.token_type,
            row: got.row,
            col: got.col,
        }
    }

    pub fn invalid_literal(got: &Token) -> Self {
        ParseError::InvalidLiteral {
            literal: got.literal.clone(),
            row: got.row,
            col: got.col,
        }
    }
}

/// Errors produced during evaluation. Every construction site renders to a
/// `String` and is stored as `Object::Error(String)` — the typed enum keeps
/// construction exhaustive-matched, the object model keeps a single
/// `Error` variant per spec §3.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("type mismatch: {left} {operator} {right}")]
    TypeMismatch {
        left: &'static str,
        operator: String,
        right: &'static str,
    },

    #[error("unknown operator: {operator}{right}")]
    UnknownOperatorPrefix { operator: String, right: &'static str },

    #[error("unknown operator: {left} {operator} {right}")]
    UnknownOperatorInfix {
        left: &'static str,
        operator: String,
        right: &'static str,
    },

    #[error("identifier not found: {name}")]
    IdentifierNotFound { name: String },

    #[error("not a function: {type_name}")]
    NotAFunction { type_name: &'static str },

    #[error("wrong number of arguments. got={got}, want={want}")]
    TooManyArgs { got: usize, want: usize },

    #[error("wrong number of arguments. got={got}, want={want}")]
    TooFewArgs { got: usize, want: usize },

    #[error("argument to `{builtin}` not supported, got {type_name}")]
    TypeNotSupported {
        builtin: &'static str,
        type_name: &'static str,
    },

    #[error("argument to `{builtin}` must be ARRAY, got {type_name}")]
    ArrayNeeded {
        builtin: &'static str,
        type_name: &'static str,
    },

    #[error("divide by zero")]
    DivideByZero,
}

impl EvalError {
    pub fn unknown_operator_prefix(operator: impl Into<String>, right: &'static str) -> Self {
        EvalError::UnknownOperatorPrefix {
            operator: operator.into(),
            right,
        }
    }
}
