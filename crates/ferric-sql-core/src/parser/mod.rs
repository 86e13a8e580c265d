//! SQL Parser
//!
//! A hand-written recursive descent parser with Pratt expression parsing.
//! Statement families live in their own files, each adding methods to
//! [`Parser`].

mod dcl;
mod ddl;
mod dml;
mod error;
mod expression;
mod options;
#[allow(clippy::module_inception)]
mod parser;
mod pratt;
mod select;

pub use error::{ParseError, ParseErrorKind, Result};
pub use options::{DEFAULT_MAX_DEPTH, ParserOptions};
pub use parser::Parser;
