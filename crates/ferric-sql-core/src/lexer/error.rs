//! Lexical errors.

/// An error raised while scanning source text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    /// A single-quoted string literal reached end of input.
    #[error("Unterminated string literal at line {line}, column {column}")]
    UnterminatedString {
        /// Line of the opening quote.
        line: usize,
        /// Column of the opening quote.
        column: usize,
    },

    /// A quoted identifier reached end of input.
    #[error("Unterminated quoted identifier at line {line}, column {column}")]
    UnterminatedIdentifier {
        /// Line of the opening quote.
        line: usize,
        /// Column of the opening quote.
        column: usize,
    },
}

impl LexError {
    /// Line where the offending token starts.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnterminatedString { line, .. } | Self::UnterminatedIdentifier { line, .. } => {
                *line
            }
        }
    }

    /// Column where the offending token starts.
    #[must_use]
    pub const fn column(&self) -> usize {
        match self {
            Self::UnterminatedString { column, .. }
            | Self::UnterminatedIdentifier { column, .. } => *column,
        }
    }
}
