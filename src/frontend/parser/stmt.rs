//! Statement parsing
//!
//! Statements are recognised by their leading keyword. Expressions are not
//! validated: an expression is a single token, so the only structure the
//! parser really checks is the presence of blocks and their brace balance.

use super::state::*;
use super::ParseError;
use super::super::lexer::tokens::*;

impl<'a> ParserState<'a> {
    /// Parse a statement
    pub fn parse_stmt(&mut self) -> Result<(), ParseError> {
        match self.current().kind {
            TokenKind::KwIf => self.parse_if_stmt(),
            TokenKind::KwFor => self.parse_for_stmt(),
            TokenKind::KwFunc => self.parse_func_decl(),
            TokenKind::KwReturn => self.parse_return_stmt(),
            _ => self.parse_expression(),
        }
    }

    /// `if <expr> { ... }`
    fn parse_if_stmt(&mut self) -> Result<(), ParseError> {
        self.bump(); // if

        self.parse_expression()?;

        if !self.at(TokenKind::LBrace) {
            return Err(ParseError::MissingIfBlock { line: self.line() });
        }

        self.parse_block()
    }

    /// `for [init] ; [cond] ; [incr] { ... }`
    ///
    /// Each clause is optional. The token after the first and second clause
    /// is taken as the separator without checking it.
    fn parse_for_stmt(&mut self) -> Result<(), ParseError> {
        self.bump(); // for

        if !self.at(TokenKind::Semicolon) {
            self.parse_expression()?;
        }
        self.bump();

        if !self.at(TokenKind::Semicolon) {
            self.parse_expression()?;
        }
        self.bump();

        if !self.at(TokenKind::LBrace) {
            self.parse_expression()?;
        }

        self.parse_block()
    }

    /// `func name ( ... ) { ... }`; parameter contents are skipped unvalidated.
    fn parse_func_decl(&mut self) -> Result<(), ParseError> {
        self.bump(); // func

        if !self.at(TokenKind::Ident) {
            return Err(ParseError::MissingFunctionName { line: self.line() });
        }
        self.bump();

        if !self.at(TokenKind::LParen) {
            return Err(ParseError::MissingParameterList { line: self.line() });
        }
        self.bump();

        while !self.at(TokenKind::RParen) && !self.at_end() {
            self.bump();
        }
        self.bump(); // )

        self.parse_block()
    }

    /// `return <expr>`
    fn parse_return_stmt(&mut self) -> Result<(), ParseError> {
        self.bump(); // return
        self.parse_expression()
    }

    /// Consume one token, or none at `;` and end of input. Always succeeds.
    pub fn parse_expression(&mut self) -> Result<(), ParseError> {
        if self.at_end() || self.at(TokenKind::Semicolon) {
            return Ok(());
        }
        self.bump();
        Ok(())
    }

    /// Structural skip over a brace-balanced block.
    ///
    /// Runs to end of input when the block is never closed; that is not an error.
    pub fn parse_block(&mut self) -> Result<(), ParseError> {
        if !self.at(TokenKind::LBrace) {
            return Err(ParseError::MissingBlock { line: self.line() });
        }
        self.bump();

        let mut depth = 1usize;
        while depth > 0 && !self.at_end() {
            match self.current().kind {
                TokenKind::LBrace => depth += 1,
                TokenKind::RBrace => depth -= 1,
                _ => {}
            }
            self.bump();
        }

        Ok(())
    }
}
