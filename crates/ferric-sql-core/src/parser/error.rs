//! Parser error types.

use core::fmt;

use crate::lexer::{LexError, Token};

/// Broad classification of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ParseErrorKind {
    /// The lexer rejected the input (unterminated literal).
    Lexical,
    /// A specific token was required and something else was found.
    UnexpectedToken,
    /// Unknown statement, data type, constraint or object type.
    UnknownConstruct,
    /// Well-formed tokens in an invalid arrangement (duplicate clause,
    /// HAVING without GROUP BY, empty USING list, ...).
    Structural,
    /// Misuse of the parser's backtracking machinery. Indicates a bug in the
    /// parser rather than bad input.
    Internal,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Lexical => "lexical error",
            Self::UnexpectedToken => "unexpected token",
            Self::UnknownConstruct => "unknown construct",
            Self::Structural => "structural error",
            Self::Internal => "internal parser error",
        })
    }
}

/// A parse error.
///
/// Parsing stops at the first error; there is no recovery.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[error("{message} at line {line}, column {column}")]
pub struct ParseError {
    /// The error classification.
    pub kind: ParseErrorKind,
    /// The error message.
    pub message: String,
    /// Line of the offending token.
    pub line: usize,
    /// Column of the offending token.
    pub column: usize,
    /// What the parser expected (if applicable).
    pub expected: Option<String>,
    /// Description of the token actually found (if applicable).
    pub found: Option<String>,
}

impl ParseError {
    /// Creates a new parse error located at `token`.
    #[must_use]
    pub fn new(kind: ParseErrorKind, message: impl Into<String>, token: &Token) -> Self {
        Self {
            kind,
            message: message.into(),
            line: token.line(),
            column: token.column(),
            expected: None,
            found: None,
        }
    }

    /// Creates an "unexpected token" error.
    #[must_use]
    pub fn unexpected(expected: impl Into<String>, found: &Token) -> Self {
        let expected: String = expected.into();
        let description = found.describe();
        let message = if found.is_eof() {
            format!("Unexpected end of input: expected {expected}")
        } else {
            format!("Unexpected token: expected {expected}, found {description}")
        };
        Self {
            kind: ParseErrorKind::UnexpectedToken,
            message,
            line: found.line(),
            column: found.column(),
            expected: Some(expected),
            found: Some(description),
        }
    }

    /// Creates an "unknown construct" error.
    #[must_use]
    pub fn unknown(message: impl Into<String>, token: &Token) -> Self {
        Self::new(ParseErrorKind::UnknownConstruct, message, token)
    }

    /// Creates a structural error.
    #[must_use]
    pub fn structural(message: impl Into<String>, token: &Token) -> Self {
        Self::new(ParseErrorKind::Structural, message, token)
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>, token: &Token) -> Self {
        Self::new(ParseErrorKind::Internal, message, token)
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        Self {
            kind: ParseErrorKind::Lexical,
            message: match err {
                LexError::UnterminatedString { .. } => String::from("Unterminated string literal"),
                LexError::UnterminatedIdentifier { .. } => {
                    String::from("Unterminated quoted identifier")
                }
            },
            line: err.line(),
            column: err.column(),
            expected: None,
            found: None,
        }
    }
}

/// Result alias used throughout the parser.
pub type Result<T> = core::result::Result<T, ParseError>;
