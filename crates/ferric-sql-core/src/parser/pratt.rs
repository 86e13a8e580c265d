//! Pratt expression parser for operator precedence.
//!
//! Binding powers, lowest to highest:
//!
//! | operators                                  | left | right |
//! |--------------------------------------------|------|-------|
//! | `OR`                                       | 1    | 2     |
//! | `AND`                                      | 3    | 4     |
//! | prefix `NOT`                               |      | 5     |
//! | `= <> != < > <= >=`, LIKE, IN, IS, BETWEEN | 7    | 8     |
//! | `+ -`                                      | 9    | 10    |
//! | `* / %`                                    | 11   | 12    |
//! | prefix `-` / `+`                           |      | 13    |

use crate::ast::{BinaryOp, UnaryOp};
use crate::lexer::{Keyword, Token, TokenKind};

/// Left binding power of the additive operators. `parse_term` starts here.
pub const ADDITIVE_BP: u8 = 9;

/// Returns the prefix binding power for a token.
///
/// Returns `None` if the token is not a prefix operator.
#[must_use]
pub fn prefix_binding_power(token: &Token) -> Option<u8> {
    match token.kind {
        TokenKind::Keyword(Keyword::Not) => Some(5),
        TokenKind::Operator if token.text == "-" || token.text == "+" => Some(13),
        _ => None,
    }
}

/// Returns the infix binding power for a token.
///
/// Returns `(left_bp, right_bp)` where:
/// - Higher binding power = binds tighter
/// - Left associative: left_bp < right_bp
///
/// `NOT` is listed for `NOT LIKE` / `NOT IN` / `NOT BETWEEN`; the parser
/// checks the following token before treating it as infix.
#[must_use]
pub fn infix_binding_power(token: &Token) -> Option<(u8, u8)> {
    match token.kind {
        TokenKind::Keyword(Keyword::Or) => Some((1, 2)),
        TokenKind::Keyword(Keyword::And) => Some((3, 4)),
        TokenKind::Keyword(
            Keyword::Not | Keyword::Like | Keyword::In | Keyword::Is | Keyword::Between,
        ) => Some((7, 8)),
        TokenKind::Operator => match token.text.as_str() {
            "=" | "<>" | "!=" | "<" | ">" | "<=" | ">=" => Some((7, 8)),
            "+" | "-" => Some((ADDITIVE_BP, ADDITIVE_BP + 1)),
            "*" | "/" | "%" => Some((11, 12)),
            _ => None,
        },
        _ => None,
    }
}

/// Maps an operator token to its binary operator tag.
///
/// IN is not listed: its right side is a list or subquery, not an
/// expression, so the parser builds it directly.
#[must_use]
pub fn parse_operator(token: &Token) -> Option<BinaryOp> {
    match token.kind {
        TokenKind::Keyword(Keyword::And) => Some(BinaryOp::And),
        TokenKind::Keyword(Keyword::Or) => Some(BinaryOp::Or),
        TokenKind::Keyword(Keyword::Like) => Some(BinaryOp::Like),
        TokenKind::Operator => match token.text.as_str() {
            "=" => Some(BinaryOp::Eq),
            "<>" | "!=" => Some(BinaryOp::NotEq),
            "<" => Some(BinaryOp::Lt),
            ">" => Some(BinaryOp::Gt),
            "<=" => Some(BinaryOp::LtEq),
            ">=" => Some(BinaryOp::GtEq),
            "+" => Some(BinaryOp::Add),
            "-" => Some(BinaryOp::Sub),
            "*" => Some(BinaryOp::Mul),
            "/" => Some(BinaryOp::Div),
            "%" => Some(BinaryOp::Mod),
            _ => None,
        },
        _ => None,
    }
}

/// Converts a token to a unary operator. Unary `+` has no tag; the parser
/// drops it.
#[must_use]
pub fn token_to_unary_op(token: &Token) -> Option<UnaryOp> {
    match token.kind {
        TokenKind::Keyword(Keyword::Not) => Some(UnaryOp::Not),
        TokenKind::Operator if token.text == "-" => Some(UnaryOp::Neg),
        _ => None,
    }
}
