//! SQL Lexer/Tokenizer
//!
//! A hand-written, pull-based lexer that turns SQL text into [`Token`]s one
//! at a time.

mod error;
mod span;
mod token;
mod tokenizer;

pub use error::LexError;
pub use span::{Position, Span};
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::Lexer;
