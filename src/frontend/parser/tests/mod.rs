//! Parser tests module


use crate::frontend::lexer::tokenize;
use crate::frontend::parser::{parse, ParseOutcome};

/// Scan and parse in one step
pub(crate) fn parse_source(source: &str) -> ParseOutcome {
    let tokens = tokenize(source);
    parse(&tokens)
}
