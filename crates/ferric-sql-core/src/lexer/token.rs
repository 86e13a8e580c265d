//! Token types for the SQL lexer.

use core::fmt;

use super::Span;

/// Reserved SQL keywords.
///
/// Words outside this set lex as identifiers. The parser recognises those
/// contextually (see `Parser::check_word`), so names like `comment` or
/// `engine` stay usable as column names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Keyword {
    // Queries
    Select,
    From,
    Where,
    Group,
    By,
    Having,
    Order,
    Limit,
    Offset,
    Distinct,
    All,
    As,

    // Joins
    Join,
    Inner,
    Left,
    Right,
    Full,
    Outer,
    Cross,
    Natural,
    On,
    Using,

    // Data manipulation
    Insert,
    Into,
    Values,
    Update,
    Set,
    Delete,

    // Data definition
    Create,
    Drop,
    Alter,
    Table,
    Index,
    View,
    If,
    Exists,

    // Constraints
    Primary,
    Key,
    Foreign,
    References,
    Unique,
    Check,
    Default,
    Constraint,
    Cascade,
    Restrict,

    // Operators and literals
    Not,
    Null,
    True,
    False,
    And,
    Or,
    Like,
    In,
    Is,
    Between,

    // Ordering
    Asc,
    Desc,
    Nulls,
    First,
    Last,

    // Windows
    Over,
    Partition,
    Rows,
    Range,
    Unbounded,
    Preceding,
    Following,
    Current,
    Row,

    // CASE
    Case,
    When,
    Then,
    Else,
    End,
}

impl Keyword {
    /// Looks up a reserved keyword, ignoring ASCII case.
    #[must_use]
    pub fn lookup(word: &str) -> Option<Self> {
        let keyword = match word.to_ascii_uppercase().as_str() {
            "SELECT" => Self::Select,
            "FROM" => Self::From,
            "WHERE" => Self::Where,
            "GROUP" => Self::Group,
            "BY" => Self::By,
            "HAVING" => Self::Having,
            "ORDER" => Self::Order,
            "LIMIT" => Self::Limit,
            "OFFSET" => Self::Offset,
            "DISTINCT" => Self::Distinct,
            "ALL" => Self::All,
            "AS" => Self::As,
            "JOIN" => Self::Join,
            "INNER" => Self::Inner,
            "LEFT" => Self::Left,
            "RIGHT" => Self::Right,
            "FULL" => Self::Full,
            "OUTER" => Self::Outer,
            "CROSS" => Self::Cross,
            "NATURAL" => Self::Natural,
            "ON" => Self::On,
            "USING" => Self::Using,
            "INSERT" => Self::Insert,
            "INTO" => Self::Into,
            "VALUES" => Self::Values,
            "UPDATE" => Self::Update,
            "SET" => Self::Set,
            "DELETE" => Self::Delete,
            "CREATE" => Self::Create,
            "DROP" => Self::Drop,
            "ALTER" => Self::Alter,
            "TABLE" => Self::Table,
            "INDEX" => Self::Index,
            "VIEW" => Self::View,
            "IF" => Self::If,
            "EXISTS" => Self::Exists,
            "PRIMARY" => Self::Primary,
            "KEY" => Self::Key,
            "FOREIGN" => Self::Foreign,
            "REFERENCES" => Self::References,
            "UNIQUE" => Self::Unique,
            "CHECK" => Self::Check,
            "DEFAULT" => Self::Default,
            "CONSTRAINT" => Self::Constraint,
            "CASCADE" => Self::Cascade,
            "RESTRICT" => Self::Restrict,
            "NOT" => Self::Not,
            "NULL" => Self::Null,
            "TRUE" => Self::True,
            "FALSE" => Self::False,
            "AND" => Self::And,
            "OR" => Self::Or,
            "LIKE" => Self::Like,
            "IN" => Self::In,
            "IS" => Self::Is,
            "BETWEEN" => Self::Between,
            "ASC" => Self::Asc,
            "DESC" => Self::Desc,
            "NULLS" => Self::Nulls,
            "FIRST" => Self::First,
            "LAST" => Self::Last,
            "OVER" => Self::Over,
            "PARTITION" => Self::Partition,
            "ROWS" => Self::Rows,
            "RANGE" => Self::Range,
            "UNBOUNDED" => Self::Unbounded,
            "PRECEDING" => Self::Preceding,
            "FOLLOWING" => Self::Following,
            "CURRENT" => Self::Current,
            "ROW" => Self::Row,
            "CASE" => Self::Case,
            "WHEN" => Self::When,
            "THEN" => Self::Then,
            "ELSE" => Self::Else,
            "END" => Self::End,
            _ => return None,
        };
        Some(keyword)
    }

    /// Returns the canonical uppercase spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::From => "FROM",
            Self::Where => "WHERE",
            Self::Group => "GROUP",
            Self::By => "BY",
            Self::Having => "HAVING",
            Self::Order => "ORDER",
            Self::Limit => "LIMIT",
            Self::Offset => "OFFSET",
            Self::Distinct => "DISTINCT",
            Self::All => "ALL",
            Self::As => "AS",
            Self::Join => "JOIN",
            Self::Inner => "INNER",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Full => "FULL",
            Self::Outer => "OUTER",
            Self::Cross => "CROSS",
            Self::Natural => "NATURAL",
            Self::On => "ON",
            Self::Using => "USING",
            Self::Insert => "INSERT",
            Self::Into => "INTO",
            Self::Values => "VALUES",
            Self::Update => "UPDATE",
            Self::Set => "SET",
            Self::Delete => "DELETE",
            Self::Create => "CREATE",
            Self::Drop => "DROP",
            Self::Alter => "ALTER",
            Self::Table => "TABLE",
            Self::Index => "INDEX",
            Self::View => "VIEW",
            Self::If => "IF",
            Self::Exists => "EXISTS",
            Self::Primary => "PRIMARY",
            Self::Key => "KEY",
            Self::Foreign => "FOREIGN",
            Self::References => "REFERENCES",
            Self::Unique => "UNIQUE",
            Self::Check => "CHECK",
            Self::Default => "DEFAULT",
            Self::Constraint => "CONSTRAINT",
            Self::Cascade => "CASCADE",
            Self::Restrict => "RESTRICT",
            Self::Not => "NOT",
            Self::Null => "NULL",
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Like => "LIKE",
            Self::In => "IN",
            Self::Is => "IS",
            Self::Between => "BETWEEN",
            Self::Asc => "ASC",
            Self::Desc => "DESC",
            Self::Nulls => "NULLS",
            Self::First => "FIRST",
            Self::Last => "LAST",
            Self::Over => "OVER",
            Self::Partition => "PARTITION",
            Self::Rows => "ROWS",
            Self::Range => "RANGE",
            Self::Unbounded => "UNBOUNDED",
            Self::Preceding => "PRECEDING",
            Self::Following => "FOLLOWING",
            Self::Current => "CURRENT",
            Self::Row => "ROW",
            Self::Case => "CASE",
            Self::When => "WHEN",
            Self::Then => "THEN",
            Self::Else => "ELSE",
            Self::End => "END",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TokenKind {
    /// A reserved keyword.
    Keyword(Keyword),
    /// A plain or quoted identifier.
    Identifier,
    /// A numeric literal (digits with at most one `.`).
    Number,
    /// A single-quoted string literal, escapes already decoded.
    String,
    /// An operator or punctuation character (or one of `<=`, `>=`, `!=`, `<>`).
    Operator,
    /// End of input.
    Eof,
    /// No token. Used as the "nothing consumed yet" sentinel.
    #[default]
    Undefined,
}

/// A token with its text and source location.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The token text. Keywords and identifiers keep their original casing,
    /// string literals hold the decoded value.
    pub text: String,
    /// The location in the source code.
    pub span: Span,
    /// Set for `"..."` and `` `...` `` identifiers, which never match a
    /// contextual word.
    pub quoted: bool,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
            quoted: false,
        }
    }

    /// Line of the token's first character.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.span.start.line
    }

    /// Column of the token's first character.
    #[must_use]
    pub const fn column(&self) -> usize {
        self.span.start.column
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword(kw) => Some(kw),
            _ => None,
        }
    }

    /// Returns true if this is the operator `op`.
    #[must_use]
    pub fn is_operator(&self, op: &str) -> bool {
        self.kind == TokenKind::Operator && self.text == op
    }

    /// Returns true if this is an unquoted identifier spelled `word`,
    /// ignoring ASCII case.
    #[must_use]
    pub fn is_word(&self, word: &str) -> bool {
        self.kind == TokenKind::Identifier && !self.quoted && self.text.eq_ignore_ascii_case(word)
    }

    /// A short human-readable description, used in error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Keyword(kw) => format!("keyword {kw}"),
            TokenKind::Identifier => format!("identifier '{}'", self.text),
            TokenKind::Number => format!("number {}", self.text),
            TokenKind::String => format!("string '{}'", self.text),
            TokenKind::Operator => format!("'{}'", self.text),
            TokenKind::Eof => String::from("end of input"),
            TokenKind::Undefined => String::from("nothing"),
        }
    }
}
