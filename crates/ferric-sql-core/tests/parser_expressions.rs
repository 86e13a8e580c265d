//! Tests for operators, precedence, predicates and subqueries.

mod common;
use common::*;

use ferric_sql_core::ast::{BinaryOp, Expr, LiteralKind, UnaryOp};

fn binary_op(expr: &Expr) -> BinaryOp {
    match expr {
        Expr::Binary { op, .. } => *op,
        other => panic!("Expected binary expression, got {other:?}"),
    }
}

#[test]
fn comparison_operators() {
    for (text, op) in [
        ("a = 1", BinaryOp::Eq),
        ("a <> 1", BinaryOp::NotEq),
        ("a != 1", BinaryOp::NotEq),
        ("a < 1", BinaryOp::Lt),
        ("a <= 1", BinaryOp::LtEq),
        ("a > 1", BinaryOp::Gt),
        ("a >= 1", BinaryOp::GtEq),
    ] {
        assert_eq!(binary_op(&parse_where(text)), op, "{text}");
    }
}

#[test]
fn not_equal_renders_canonically() {
    assert_eq!(
        round_trip("SELECT * FROM t WHERE a != 1"),
        "SELECT * FROM t WHERE a <> 1"
    );
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let Expr::Binary { op, right, .. } = parse_where("a = 1 + 2 * 3") else {
        panic!("Expected binary");
    };
    assert_eq!(op, BinaryOp::Eq);
    let Expr::Binary { op, right, .. } = *right else {
        panic!("Expected addition");
    };
    assert_eq!(op, BinaryOp::Add);
    assert_eq!(binary_op(&right), BinaryOp::Mul);
}

#[test]
fn additive_operators_are_left_associative() {
    let Expr::Binary { op, left, .. } = parse_where("a - b - c") else {
        panic!("Expected binary");
    };
    assert_eq!(op, BinaryOp::Sub);
    assert_eq!(binary_op(&left), BinaryOp::Sub);
}

#[test]
fn and_binds_tighter_than_or() {
    let expr = parse_where("a = 1 OR b = 2 AND c = 3");
    let Expr::Binary { op, right, .. } = expr else {
        panic!("Expected binary");
    };
    assert_eq!(op, BinaryOp::Or);
    assert_eq!(binary_op(&right), BinaryOp::And);
}

#[test]
fn not_binds_looser_than_comparison() {
    let Expr::Unary { op, operand } = parse_where("NOT a = 1") else {
        panic!("Expected unary");
    };
    assert_eq!(op, UnaryOp::Not);
    assert_eq!(binary_op(&operand), BinaryOp::Eq);
}

#[test]
fn parentheses_are_preserved() {
    let Expr::Binary { op, left, .. } = parse_where("(a = 1 OR b = 2) AND c = 3") else {
        panic!("Expected binary");
    };
    assert_eq!(op, BinaryOp::And);
    assert!(matches!(left.as_ref(), Expr::Paren(_)));
    round_trip("SELECT * FROM t WHERE (a = 1 OR b = 2) AND c = 3");
}

#[test]
fn unary_minus() {
    let Expr::Unary { op, operand } = parse_where("x = -5").as_binary_right() else {
        panic!("Expected unary minus");
    };
    assert_eq!(op, UnaryOp::Neg);
    assert_eq!(operand.as_literal().map(|l| l.kind), Some(LiteralKind::Integer));
}

#[test]
fn unary_plus_is_dropped() {
    assert_eq!(parse_where("x = +5"), parse_where("x = 5"));
}

#[test]
fn double_negation_does_not_become_a_comment() {
    assert_eq!(
        round_trip("SELECT * FROM t WHERE x = - -1"),
        "SELECT * FROM t WHERE x = - -1"
    );
}

#[test]
fn is_null_and_is_not_null() {
    assert!(matches!(parse_where("a IS NULL"), Expr::IsNull { negated: false, .. }));
    assert!(matches!(parse_where("a IS NOT NULL"), Expr::IsNull { negated: true, .. }));
    round_trip("SELECT * FROM t WHERE a IS NOT NULL AND b IS NULL");
}

#[test]
fn between_bounds_are_additive() {
    let Expr::Between { low, high, negated, .. } = parse_where("a BETWEEN 1 + 1 AND 10") else {
        panic!("Expected BETWEEN");
    };
    assert!(!negated);
    assert_eq!(binary_op(&low), BinaryOp::Add);
    assert!(high.as_literal().is_some());
}

#[test]
fn between_followed_by_and() {
    let Expr::Binary { op, left, .. } = parse_where("a BETWEEN 1 AND 5 AND b = 2") else {
        panic!("Expected AND");
    };
    assert_eq!(op, BinaryOp::And);
    assert!(matches!(left.as_ref(), Expr::Between { .. }));
}

#[test]
fn not_between() {
    assert!(matches!(
        parse_where("a NOT BETWEEN 1 AND 5"),
        Expr::Between { negated: true, .. }
    ));
    round_trip("SELECT * FROM t WHERE a NOT BETWEEN 1 AND 5");
}

#[test]
fn like_and_not_like() {
    assert_eq!(binary_op(&parse_where("name LIKE 'a%'")), BinaryOp::Like);
    assert_eq!(binary_op(&parse_where("name NOT LIKE 'a%'")), BinaryOp::NotLike);
    round_trip("SELECT * FROM t WHERE name NOT LIKE 'a%'");
}

#[test]
fn in_list() {
    let Expr::Binary { op, right, .. } = parse_where("id IN (1, 2, 3)") else {
        panic!("Expected IN");
    };
    assert_eq!(op, BinaryOp::In);
    assert!(matches!(right.as_ref(), Expr::List(items) if items.len() == 3));
    round_trip("SELECT * FROM t WHERE id NOT IN (1, 2, 3)");
}

#[test]
fn in_subquery() {
    let Expr::Binary { op, right, .. } = parse_where("id IN (SELECT user_id FROM orders)") else {
        panic!("Expected IN");
    };
    assert_eq!(op, BinaryOp::In);
    assert!(matches!(right.as_ref(), Expr::Subquery(_)));
    round_trip("SELECT * FROM t WHERE id IN (SELECT user_id FROM orders)");
}

#[test]
fn exists_and_not_exists() {
    assert!(matches!(
        parse_where("EXISTS (SELECT 1 FROM orders)"),
        Expr::Exists(_)
    ));
    let Expr::Unary { op, operand } = parse_where("NOT EXISTS (SELECT 1 FROM orders)") else {
        panic!("Expected NOT");
    };
    assert_eq!(op, UnaryOp::Not);
    assert!(matches!(operand.as_ref(), Expr::Exists(_)));
    round_trip("SELECT * FROM t WHERE NOT EXISTS (SELECT 1 FROM orders WHERE orders.uid = t.id)");
}

#[test]
fn scalar_subquery() {
    let Expr::Binary { right, .. } = parse_where("total > (SELECT AVG(total) FROM orders)") else {
        panic!("Expected comparison");
    };
    assert!(matches!(right.as_ref(), Expr::Subquery(_)));
}

#[test]
fn row_value_list() {
    assert!(matches!(
        parse_where("(a, b) IN ((1, 2), (3, 4))").as_binary_left(),
        Expr::List(items) if items.len() == 2
    ));
    round_trip("SELECT * FROM t WHERE (a, b) IN ((1, 2), (3, 4))");
}

#[test]
fn string_literal_escapes() {
    let expr = parse_where("name = 'It''s'");
    let Expr::Binary { right, .. } = &expr else {
        panic!("Expected comparison");
    };
    assert_eq!(right.as_literal().map(|l| l.value.as_str()), Some("It's"));
    round_trip("SELECT * FROM t WHERE name = 'It''s'");
}

trait BinarySides {
    fn as_binary_left(self) -> Expr;
    fn as_binary_right(self) -> Expr;
}

impl BinarySides for Expr {
    fn as_binary_left(self) -> Expr {
        match self {
            Self::Binary { left, .. } => *left,
            other => panic!("Expected binary expression, got {other:?}"),
        }
    }

    fn as_binary_right(self) -> Expr {
        match self {
            Self::Binary { right, .. } => *right,
            other => panic!("Expected binary expression, got {other:?}"),
        }
    }
}
