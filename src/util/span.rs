//! 源码位置
//!
//! Tokens carry a [`Span`]; the compiler keeps a [`SourceFile`] so a
//! diagnostic can quote the line it points at.

use std::fmt;

/// Line, column and byte offset of a character in the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// 1-based; 0 marks a synthetic position
    pub line: usize,
    /// 1-based, counted in characters
    pub column: usize,
    pub offset: usize,
}

impl Position {
    /// First character of the input
    pub const START: Position = Position {
        line: 1,
        column: 1,
        offset: 0,
    };

    #[inline]
    pub fn with_offset(
        line: usize,
        column: usize,
        offset: usize,
    ) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Half-open range `[start, end)` over the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    #[inline]
    pub fn new(
        start: Position,
        end: Position,
    ) -> Self {
        Self { start, end }
    }

    /// Zero-width span, used for the EOF token
    #[inline]
    pub fn point(pos: Position) -> Self {
        Self::new(pos, pos)
    }

    /// Span of a token that was built by hand rather than scanned
    #[inline]
    pub fn dummy() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_dummy(&self) -> bool {
        self.start.line == 0
    }

    /// The covered text, if the offsets fall on char boundaries of `source`
    pub fn slice<'a>(
        &self,
        source: &'a str,
    ) -> Option<&'a str> {
        source.get(self.start.offset..self.end.offset)
    }
}

/// Named input with a line index
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub content: String,
    /// Byte offset of every line start
    line_starts: Vec<usize>,
}

impl SourceFile {
    pub fn new(
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let content = content.into();
        let line_starts = std::iter::once(0)
            .chain(content.match_indices('\n').map(|(i, _)| i + 1))
            .collect();

        Self {
            name: name.into(),
            content,
            line_starts,
        }
    }

    /// An empty file still has one (empty) line
    #[inline]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Text of a 1-based line without its `\n`
    pub fn line(
        &self,
        line: usize,
    ) -> Option<&str> {
        let start = *self.line_starts.get(line.checked_sub(1)?)?;
        let end = self
            .line_starts
            .get(line)
            .map_or(self.content.len(), |next| next - 1);
        self.content.get(start..end)
    }
}

impl fmt::Display for SourceFile {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.name)
    }
}
