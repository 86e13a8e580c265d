//! Tests for INSERT statements.

mod common;
use common::*;

use ferric_sql_core::ast::{Expr, InsertSource};
use ferric_sql_core::ParseErrorKind;

#[test]
fn insert_with_columns_and_values() {
    let i = parse_insert("INSERT INTO users (name, email) VALUES ('Alice', 'a@example.com')");
    assert_eq!(i.table.name, "users");
    assert_eq!(i.columns, vec!["name", "email"]);
    let InsertSource::Values(rows) = &i.source else {
        panic!("Expected VALUES");
    };
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].len(), 2);
    round_trip("INSERT INTO users (name, email) VALUES ('Alice', 'a@example.com')");
}

#[test]
fn insert_without_columns() {
    let i = parse_insert("INSERT INTO users VALUES (1, 'Bob')");
    assert!(i.columns.is_empty());
    round_trip("INSERT INTO users VALUES (1, 'Bob')");
}

#[test]
fn insert_multiple_rows() {
    let i = parse_insert("INSERT INTO t (a, b) VALUES (1, 2), (3, 4), (5, 6)");
    assert!(matches!(&i.source, InsertSource::Values(rows) if rows.len() == 3));
    assert_eq!(
        round_trip("insert into t (a, b) values (1, 2), (3, 4)"),
        "INSERT INTO t (a, b) VALUES (1, 2), (3, 4)"
    );
}

#[test]
fn insert_expressions_in_values() {
    let i = parse_insert("INSERT INTO t (a, b, c) VALUES (1 + 2, NULL, lower('X'))");
    let InsertSource::Values(rows) = i.source else {
        panic!("Expected VALUES");
    };
    assert!(matches!(rows[0][0], Expr::Binary { .. }));
    assert!(matches!(rows[0][2], Expr::Function(_)));
}

#[test]
fn insert_select() {
    let i = parse_insert("INSERT INTO archive (id) SELECT id FROM users WHERE active = FALSE");
    assert_eq!(i.columns, vec!["id"]);
    assert!(matches!(i.source, InsertSource::Select(_)));
    round_trip("INSERT INTO archive (id) SELECT id FROM users WHERE active = FALSE");
}

#[test]
fn insert_parenthesized_select() {
    let i = parse_insert("INSERT INTO archive (SELECT * FROM users)");
    assert!(i.columns.is_empty());
    assert!(matches!(i.source, InsertSource::Select(_)));
    assert_eq!(
        round_trip("INSERT INTO archive (SELECT * FROM users)"),
        "INSERT INTO archive SELECT * FROM users"
    );
}

#[test]
fn insert_schema_qualified_table() {
    let i = parse_insert("INSERT INTO app.users (id) VALUES (1)");
    assert_eq!(i.table.schema.as_deref(), Some("app"));
    round_trip("INSERT INTO app.users (id) VALUES (1)");
}

#[test]
fn insert_on_duplicate_key_update() {
    let i = parse_insert(
        "INSERT INTO counters (k, n) VALUES ('a', 1) ON DUPLICATE KEY UPDATE n = n + 1",
    );
    assert_eq!(i.on_duplicate_update.len(), 1);
    assert_eq!(i.on_duplicate_update[0].column, "n");
    round_trip("INSERT INTO counters (k, n) VALUES ('a', 1) ON DUPLICATE KEY UPDATE n = n + 1");
}

#[test]
fn insert_requires_values_or_select() {
    let err = parse_err("INSERT INTO users (id) DEFAULT VALUES");
    assert_eq!(err.kind, ParseErrorKind::Structural);
    assert!(
        err.message
            .starts_with("Expected VALUES or SELECT after INSERT INTO users"),
        "{}",
        err.message
    );
}

#[test]
fn insert_requires_into() {
    let err = parse_err("INSERT users VALUES (1)");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    assert_eq!(err.expected.as_deref(), Some("INTO"));
}

#[test]
fn insert_unclosed_row() {
    let err = parse_err("INSERT INTO t VALUES (1, 2");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
}
