//! Token model: lexical categories plus source position.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;

/// The closed set of lexical categories the lexer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    Illegal,
    Eof,

    Ident,
    Int,
    String,

    Assign,
    Plus,
    Minus,
    Bang,
    Asterisk,
    Slash,

    Lt,
    Gt,
    Eq,
    NotEq,

    Comma,
    Semicolon,

    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    Function,
    Let,
    True,
    False,
    If,
    Else,
    Return,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenType::Illegal => "ILLEGAL",
            TokenType::Eof => "EOF",
            TokenType::Ident => "IDENT",
            TokenType::Int => "INT",
            TokenType::String => "STRING",
            TokenType::Assign => "=",
            TokenType::Plus => "+",
            TokenType::Minus => "-",
            TokenType::Bang => "!",
            TokenType::Asterisk => "*",
            TokenType::Slash => "/",
            TokenType::Lt => "<",
            TokenType::Gt => ">",
            TokenType::Eq => "==",
            TokenType::NotEq => "!=",
            TokenType::Comma => ",",
            TokenType::Semicolon => ";",
            TokenType::LParen => "(",
            TokenType::RParen => ")",
            TokenType::LBrace => "{",
            TokenType::RBrace => "}",
            TokenType::LBracket => "[",
            TokenType::RBracket => "]",
            TokenType::Function => "fn",
            TokenType::Let => "let",
            TokenType::True => "true",
            TokenType::False => "false",
            TokenType::If => "if",
            TokenType::Else => "else",
            TokenType::Return => "return",
        };
        write!(f, "{s}")
    }
}

/// A tagged record carrying the exact source lexeme and its starting position.
///
/// `row` is 1-based; `col` is the 1-based column of the lexeme's first
/// character. Tokens are value-like and comparable by all fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub token_type: TokenType,
    pub literal: String,
    pub row: usize,
    pub col: usize,
}

impl Token {
    pub fn new(token_type: TokenType, literal: impl Into<String>, row: usize, col: usize) -> Self {
        Self {
            token_type,
            literal: literal.into(),
            row,
            col,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?}, {}, {})", self.token_type, self.literal, self.row, self.col)
    }
}

/// Fixed keyword table consulted once an identifier lexeme has been read.
pub static KEYWORDS: Lazy<HashMap<&'static str, TokenType>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("fn", TokenType::Function);
    m.insert("let", TokenType::Let);
    m.insert("true", TokenType::True);
    m.insert("false", TokenType::False);
    m.insert("if", TokenType::If);
    m.insert("else", TokenType::Else);
    m.insert("return", TokenType::Return);
    m
});

/// Looks up `ident` in the keyword table, defaulting to `Ident`.
pub fn lookup_ident(ident: &str) -> TokenType {
    KEYWORDS.get(ident).copied().unwrap_or(TokenType::Ident)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ident_finds_keywords() {
        assert_eq!(lookup_ident("let"), TokenType::Let);
        assert_eq!(lookup_ident("fn"), TokenType::Function);
        assert_eq!(lookup_ident("foobar"), TokenType::Ident);
    }

    #[test]
    fn display_matches_lexeme_for_operators() {
        assert_eq!(TokenType::Eq.to_string(), "==");
        assert_eq!(TokenType::NotEq.to_string(), "!=");
    }
}
