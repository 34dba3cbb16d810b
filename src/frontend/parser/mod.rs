//! Parser module
//!
//! Statement-level recursive descent with panic-mode recovery. When a
//! statement fails, its error is recorded, the cursor skips exactly one
//! token, and parsing resumes until the stream is exhausted. The parse
//! fails iff at least one error was recorded.

mod state;
mod stmt;

pub use state::ParserState;

use crate::frontend::lexer::tokens::*;
use tracing::debug;

/// Syntax error for a single statement
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected '{{' after if condition (line {line})")]
    MissingIfBlock { line: usize },

    #[error("expected function name (line {line})")]
    MissingFunctionName { line: usize },

    #[error("expected '(' (line {line})")]
    MissingParameterList { line: usize },

    #[error("expected '{{' (line {line})")]
    MissingBlock { line: usize },
}

impl ParseError {
    /// Line of the offending token
    pub fn line(&self) -> usize {
        match self {
            ParseError::MissingIfBlock { line }
            | ParseError::MissingFunctionName { line }
            | ParseError::MissingParameterList { line }
            | ParseError::MissingBlock { line } => *line,
        }
    }
}

/// Aggregate failure of a whole parse: every recorded message, joined in
/// encounter order.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
#[error("parse errors:\n{}", .messages.join("\n"))]
pub struct ParseFailure {
    messages: Vec<String>,
    lines: Vec<usize>,
}

impl ParseFailure {
    fn from_errors(errors: &[ParseError]) -> Self {
        Self {
            messages: errors.iter().map(ToString::to_string).collect(),
            lines: errors.iter().map(ParseError::line).collect(),
        }
    }

    /// Individual messages in encounter order
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// `(line, message)` pairs in encounter order
    pub fn entries(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lines
            .iter()
            .copied()
            .zip(self.messages.iter().map(String::as_str))
    }
}

/// Result of one parse attempt; no errors means success.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    errors: Vec<ParseError>,
}

impl ParseOutcome {
    #[inline]
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    #[inline]
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    pub fn into_result(self) -> Result<(), ParseFailure> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ParseFailure::from_errors(&self.errors))
        }
    }
}

/// Parser over a borrowed token stream.
///
/// Keeps its accumulated errors queryable after [`Parser::parse`] returns.
#[derive(Debug)]
pub struct Parser<'a> {
    state: ParserState<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            state: ParserState::new(tokens),
        }
    }

    /// Run the statement loop to the end of the stream.
    pub fn parse(&mut self) -> Result<(), ParseFailure> {
        self.parse_statements();

        if self.state.has_errors() {
            Err(ParseFailure::from_errors(self.state.errors()))
        } else {
            Ok(())
        }
    }

    fn parse_statements(&mut self) {
        let state = &mut self.state;
        let mut statements = 0usize;

        while !state.at_end() {
            let before = state.pos();
            match state.parse_stmt() {
                Ok(()) => {
                    statements += 1;
                    // A stray ';' parses as an empty expression statement
                    // without consuming anything; step over it.
                    if state.pos() == before {
                        state.bump();
                    }
                }
                Err(error) => {
                    debug!("Statement failed: {}", error);
                    state.error(error);
                    state.bump();
                }
            }
        }

        debug!(
            "Parsed {} statements with {} errors",
            statements,
            state.errors().len()
        );
    }

    /// Errors accumulated by the last [`Parser::parse`] call
    pub fn errors(&self) -> &[ParseError] {
        self.state.errors()
    }

    pub fn into_outcome(self) -> ParseOutcome {
        ParseOutcome {
            errors: self.state.into_errors(),
        }
    }
}

/// Parse a token stream
///
/// # Example
/// ```text
/// func main() {
///     if ready { return 0; }
/// }
/// ```
pub fn parse(tokens: &[Token]) -> ParseOutcome {
    let mut parser = Parser::new(tokens);
    parser.parse_statements();
    parser.into_outcome()
}

#[cfg(test)]
mod tests;
