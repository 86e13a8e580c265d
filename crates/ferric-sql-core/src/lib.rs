//! # ferric-sql-core
//!
//! A hand-written SQL front-end: a pull-based lexer, a recursive descent
//! parser with Pratt expression parsing, and an AST whose `Display` output
//! is canonical SQL.
//!
//! This crate provides:
//! - A lexer that produces [`Token`]s one at a time with line/column spans
//! - A parser for SELECT, INSERT, UPDATE, DELETE, MERGE, CREATE, DROP,
//!   ALTER TABLE, TRUNCATE, GRANT and REVOKE
//! - Owned AST types that render back to SQL and re-parse to an equal tree
//!
//! ## Parsing
//!
//! ```rust
//! use ferric_sql_core::{parse, ast::Statement};
//!
//! let stmt = parse("select id, name from users where id = 1").unwrap();
//! assert!(matches!(stmt, Statement::Select(_)));
//!
//! // Display renders canonical SQL
//! assert_eq!(stmt.to_string(), "SELECT id, name FROM users WHERE id = 1");
//! ```
//!
//! ## Errors
//!
//! Every failure carries a category and the position of the offending token:
//!
//! ```rust
//! use ferric_sql_core::{parse, parser::ParseErrorKind};
//!
//! let err = parse("SELECT id FROM users INNER orders").unwrap_err();
//! assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
//! assert_eq!((err.line, err.column), (1, 28));
//! ```

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::{Expr, Statement};
pub use lexer::{Keyword, LexError, Lexer, Token, TokenKind};
pub use parser::{ParseError, ParseErrorKind, Parser, ParserOptions};

/// Parses exactly one SQL statement, optionally followed by `;`.
///
/// # Errors
///
/// Returns a `ParseError` for lexical errors, unexpected tokens, unknown
/// constructs and structural violations.
pub fn parse(sql: &str) -> Result<Statement, ParseError> {
    Parser::new(Lexer::new(sql))?.parse()
}

/// Parses a `;`-separated script into its statements.
///
/// # Errors
///
/// Returns the first `ParseError` encountered.
pub fn parse_script(sql: &str) -> Result<Vec<Statement>, ParseError> {
    Parser::new(Lexer::new(sql))?.parse_statements()
}
