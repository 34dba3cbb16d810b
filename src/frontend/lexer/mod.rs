//! Lexer module
//!
//! Turns source text into a flat token stream. Scanning never fails:
//! characters outside the recognised classes are skipped without a token or
//! a diagnostic, and an unterminated string literal closes silently at end of
//! input. Both leniencies are deliberate and covered by tests.

pub mod tokens;

pub use tokenizer::tokenize;
pub use tokens::{Token, TokenKind};

/// Tokenize source code
mod tokenizer {
    use super::*;
    use crate::util::span::{Position, Span};
    use std::iter::Peekable;
    use std::str::CharIndices;
    use tracing::{debug, trace};

    /// Scan `source` into tokens, always terminated by exactly one `Eof`.
    pub fn tokenize(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();

        while let Some(token) = lexer.next_token() {
            tokens.push(token);
        }

        tokens.push(Token::new(TokenKind::Eof, "", Span::point(lexer.position())));

        if lexer.skipped > 0 {
            debug!("Skipped {} unrecognized characters", lexer.skipped);
        }
        debug!("Tokenized {} bytes into {} tokens", source.len(), tokens.len());
        tokens
    }

    struct Lexer<'a> {
        source: &'a str,
        chars: Peekable<CharIndices<'a>>,
        offset: usize,
        line: usize,
        column: usize,
        start: Position,
        skipped: usize,
    }

    impl<'a> Lexer<'a> {
        fn new(source: &'a str) -> Self {
            Self {
                source,
                chars: source.char_indices().peekable(),
                offset: 0,
                line: 1,
                column: 1,
                start: Position::START,
                skipped: 0,
            }
        }

        fn position(&self) -> Position {
            Position::with_offset(self.line, self.column, self.offset)
        }

        fn span(&self) -> Span {
            Span::new(self.start, self.position())
        }

        fn advance(&mut self) -> Option<char> {
            let (_, c) = self.chars.next()?;
            self.offset += c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            Some(c)
        }

        fn peek(&mut self) -> Option<char> {
            self.chars.peek().map(|&(_, c)| c)
        }

        fn skip_whitespace(&mut self) {
            while let Some(c) = self.peek() {
                match c {
                    ' ' | '\t' | '\r' | '\n' => {
                        self.advance();
                    }
                    _ => break,
                }
            }
        }

        fn next_token(&mut self) -> Option<Token> {
            loop {
                self.skip_whitespace();

                self.start = self.position();
                let c = self.advance()?;

                let kind = match c {
                    '+' => TokenKind::Plus,
                    '-' => TokenKind::Minus,
                    '*' => TokenKind::Star,
                    '/' => TokenKind::Slash,
                    '=' => self.either('=', TokenKind::EqEq, TokenKind::Assign),
                    '!' => self.either('=', TokenKind::NotEq, TokenKind::Bang),
                    '(' => TokenKind::LParen,
                    ')' => TokenKind::RParen,
                    '{' => TokenKind::LBrace,
                    '}' => TokenKind::RBrace,
                    ';' => TokenKind::Semicolon,
                    ',' => TokenKind::Comma,
                    '"' => return Some(self.scan_string()),
                    c if is_digit(c) => return Some(self.scan_number()),
                    c if is_identifier_start(c) => return Some(self.scan_identifier()),
                    c => {
                        trace!("Skipping unrecognized character {:?} at {}", c, self.start);
                        self.skipped += 1;
                        continue;
                    }
                };

                return Some(self.make_token(kind));
            }
        }

        /// Greedy two-character lookahead
        fn either(
            &mut self,
            next: char,
            double: TokenKind,
            single: TokenKind,
        ) -> TokenKind {
            if self.peek() == Some(next) {
                self.advance();
                double
            } else {
                single
            }
        }

        fn scan_identifier(&mut self) -> Token {
            while let Some(c) = self.peek() {
                if is_identifier_char(c) {
                    self.advance();
                } else {
                    break;
                }
            }

            let word = &self.source[self.start.offset..self.offset];
            let kind = TokenKind::keyword(word).unwrap_or(TokenKind::Ident);
            self.make_token(kind)
        }

        fn scan_number(&mut self) -> Token {
            while let Some(c) = self.peek() {
                if is_digit(c) {
                    self.advance();
                } else {
                    break;
                }
            }
            self.make_token(TokenKind::Int)
        }

        /// Consume up to the closing quote or end of input.
        fn scan_string(&mut self) -> Token {
            let body_start = self.offset;
            let mut body_end = self.source.len();

            while let Some(c) = self.peek() {
                if c == '"' {
                    body_end = self.offset;
                    self.advance();
                    break;
                }
                self.advance();
            }

            Token::new(
                TokenKind::String,
                &self.source[body_start..body_end],
                self.span(),
            )
        }

        fn make_token(
            &self,
            kind: TokenKind,
        ) -> Token {
            Token::new(kind, &self.source[self.start.offset..self.offset], self.span())
        }
    }

    fn is_identifier_start(c: char) -> bool {
        c.is_ascii_alphabetic()
    }
    fn is_identifier_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_'
    }
    fn is_digit(c: char) -> bool {
        c.is_ascii_digit()
    }
}
