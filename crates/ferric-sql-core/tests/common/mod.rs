#![allow(dead_code)]

use ferric_sql_core::ast::{
    CreateStatement, DeleteStatement, Expr, InsertStatement, SelectStatement, Statement,
    UpdateStatement,
};
use ferric_sql_core::ParseError;

pub fn parse(sql: &str) -> Statement {
    ferric_sql_core::parse(sql).unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn parse_err(sql: &str) -> ParseError {
    ferric_sql_core::parse(sql).expect_err(&format!("Expected parse error for: {sql}"))
}

pub fn parse_select(sql: &str) -> SelectStatement {
    match parse(sql) {
        Statement::Select(s) => s,
        other => panic!("Expected SELECT, got {other:?}"),
    }
}

pub fn parse_insert(sql: &str) -> InsertStatement {
    match parse(sql) {
        Statement::Insert(i) => i,
        other => panic!("Expected INSERT, got {other:?}"),
    }
}

pub fn parse_update(sql: &str) -> UpdateStatement {
    match parse(sql) {
        Statement::Update(u) => u,
        other => panic!("Expected UPDATE, got {other:?}"),
    }
}

pub fn parse_delete(sql: &str) -> DeleteStatement {
    match parse(sql) {
        Statement::Delete(d) => d,
        other => panic!("Expected DELETE, got {other:?}"),
    }
}

pub fn parse_create(sql: &str) -> CreateStatement {
    match parse(sql) {
        Statement::Create(c) => c,
        other => panic!("Expected CREATE, got {other:?}"),
    }
}

/// The WHERE expression of `SELECT * FROM t WHERE <expr>`.
pub fn parse_where(expr: &str) -> Expr {
    parse_select(&format!("SELECT * FROM t WHERE {expr}"))
        .where_clause
        .unwrap_or_else(|| panic!("Expected WHERE clause for: {expr}"))
}

/// Verifies that rendering re-parses to an equal tree and that the
/// rendered text is a fixed point. Returns the rendered text.
pub fn round_trip(sql: &str) -> String {
    let ast1 = parse(sql);
    let rendered1 = ast1.to_string();
    let ast2 = parse(&rendered1);
    assert_eq!(
        ast1, ast2,
        "Round-trip changed the tree.\n  Input:    {sql}\n  Rendered: {rendered1}"
    );
    let rendered2 = ast2.to_string();
    assert_eq!(
        rendered1, rendered2,
        "Round-trip failed.\n  Input:    {sql}\n  First:    {rendered1}\n  Second:   {rendered2}"
    );
    rendered1
}
