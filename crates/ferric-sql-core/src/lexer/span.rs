//! Source location tracking for tokens.

/// A point in the source text.
///
/// `line` and `column` are 1-based and count characters, `offset` is a byte
/// offset into the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Position {
    /// Byte offset into the input.
    pub offset: usize,
    /// Line number, starting at 1.
    pub line: usize,
    /// Column number, starting at 1.
    pub column: usize,
}

impl Position {
    /// The position of the first character of any input.
    pub const START: Self = Self {
        offset: 0,
        line: 1,
        column: 1,
    };

    /// Creates a new position.
    #[must_use]
    pub const fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Returns the position after consuming `c`.
    #[must_use]
    pub const fn step(self, c: char) -> Self {
        if c == '\n' {
            Self {
                offset: self.offset + 1,
                line: self.line + 1,
                column: 1,
            }
        } else {
            Self {
                offset: self.offset + c.len_utf8(),
                line: self.line,
                column: self.column + 1,
            }
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

/// The source range covered by a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Span {
    /// Position of the first character (inclusive).
    pub start: Position,
    /// Position after the last character (exclusive).
    pub end: Position,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Returns the length of the span in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    /// Returns true if the span is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }
}
