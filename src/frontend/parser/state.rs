//! Parser state and token stream management

use super::super::lexer::tokens::*;
use super::ParseError;

/// Parser state for tracking position and errors
#[derive(Debug)]
pub struct ParserState<'a> {
    /// Token stream
    tokens: &'a [Token],
    /// Current position in token stream
    pos: usize,
    /// Parsing errors, in encounter order
    errors: Vec<ParseError>,
    /// Returned when peeking past the end of the stream
    eof: Token,
}

impl<'a> ParserState<'a> {
    /// Create a new parser state
    #[inline]
    pub fn new(tokens: &'a [Token]) -> Self {
        let eof = tokens
            .last()
            .filter(|t| t.is_eof())
            .cloned()
            .unwrap_or_else(|| Token::from(TokenKind::Eof));

        Self {
            tokens,
            pos: 0,
            errors: Vec::new(),
            eof,
        }
    }

    /// Check if at end of token stream
    #[inline]
    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len() || self.tokens[self.pos].is_eof()
    }

    /// Get current token, or the EOF sentinel past the end
    #[inline]
    pub fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    /// Check the current token kind
    #[inline]
    pub fn at(
        &self,
        kind: TokenKind,
    ) -> bool {
        self.current().kind == kind
    }

    /// Line of the current token, for error reporting
    #[inline]
    pub fn line(&self) -> usize {
        self.current().line()
    }

    /// Current position in the token stream
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Advance to next token; a no-op at end of input
    #[inline]
    pub fn bump(&mut self) {
        if !self.at_end() {
            self.pos += 1;
        }
    }

    /// Add a parse error
    #[inline]
    pub fn error(
        &mut self,
        error: ParseError,
    ) {
        self.errors.push(error);
    }

    /// Check if there are errors
    #[inline]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Errors recorded so far
    #[inline]
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Get all errors
    #[inline]
    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }
}
