//! Token types

use std::fmt;

use crate::util::span::Span;

/// Token kind
///
/// The set is closed: literals, operators, the five keywords and the
/// delimiters. `Bang` is the lone `!`, which is distinct from `!=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    Int,
    String,
    Ident,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Assign,
    EqEq,
    NotEq,
    Bang,

    // Keywords
    KwIf,
    KwElse,
    KwFor,
    KwFunc,
    KwReturn,

    // Delimiters
    LParen,
    RParen,
    LBrace,
    RBrace,
    Semicolon,
    Comma,

    // Special
    Eof,
}

impl TokenKind {
    /// Stable upper-case name used in token dumps
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Int => "INT",
            TokenKind::String => "STRING",
            TokenKind::Ident => "IDENT",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "MUL",
            TokenKind::Slash => "DIV",
            TokenKind::Assign => "ASSIGN",
            TokenKind::EqEq => "EQ",
            TokenKind::NotEq => "NE",
            TokenKind::Bang => "BANG",
            TokenKind::KwIf => "IF",
            TokenKind::KwElse => "ELSE",
            TokenKind::KwFor => "FOR",
            TokenKind::KwFunc => "FUNC",
            TokenKind::KwReturn => "RETURN",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::Semicolon => "SEMI",
            TokenKind::Comma => "COMMA",
            TokenKind::Eof => "EOF",
        }
    }

    /// Keyword lookup for a scanned word
    pub fn keyword(word: &str) -> Option<TokenKind> {
        match word {
            "if" => Some(TokenKind::KwIf),
            "else" => Some(TokenKind::KwElse),
            "for" => Some(TokenKind::KwFor),
            "func" => Some(TokenKind::KwFunc),
            "return" => Some(TokenKind::KwReturn),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Literal source text (string literals exclude their quotes)
    pub literal: String,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(
        kind: TokenKind,
        literal: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            kind,
            literal: literal.into(),
            span,
        }
    }

    /// 1-based line of the token start
    #[inline]
    pub fn line(&self) -> usize {
        self.span.start.line
    }

    /// 1-based column of the token start
    #[inline]
    pub fn column(&self) -> usize {
        self.span.start.column
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl From<TokenKind> for Token {
    fn from(kind: TokenKind) -> Self {
        Token {
            kind,
            literal: String::new(),
            span: Span::dummy(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "{}:{}\t{}\t{:?}",
            self.line(),
            self.column(),
            self.kind,
            self.literal
        )
    }
}
