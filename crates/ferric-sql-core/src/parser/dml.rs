//! INSERT, UPDATE, DELETE and MERGE statements.

use super::error::{ParseError, Result};
use super::parser::Parser;
use crate::ast::{
    Assignment, DeleteStatement, Expr, InsertSource, InsertStatement, MergeAction, MergeClause,
    MergeStatement, OrderByItem, UpdateStatement,
};
use crate::lexer::Keyword;

impl Parser<'_> {
    /// Parses an INSERT statement.
    pub(super) fn parse_insert(&mut self) -> Result<InsertStatement> {
        self.expect_keyword(Keyword::Insert)?;
        self.expect_keyword(Keyword::Into)?;
        let table = self.parse_object_name()?;

        // "(" opens either a column list or a parenthesized SELECT
        let columns = self
            .with_savepoint(|p| {
                if !p.match_op("(")? || p.check_keyword(Keyword::Select) {
                    return Ok(None);
                }
                let columns = p.parse_identifier_list()?;
                p.expect_op(")")?;
                Ok(Some(columns))
            })?
            .unwrap_or_default();

        let source = if self.match_keyword(Keyword::Values)? {
            let mut rows = vec![self.parse_value_row()?];
            while self.match_op(",")? {
                rows.push(self.parse_value_row()?);
            }
            InsertSource::Values(rows)
        } else if self.check_keyword(Keyword::Select) {
            InsertSource::Select(Box::new(self.parse_select()?))
        } else if self.check_op("(") && self.peek(1)?.as_keyword() == Some(Keyword::Select) {
            self.advance()?;
            let query = self.parse_select()?;
            self.expect_op(")")?;
            InsertSource::Select(Box::new(query))
        } else {
            return Err(ParseError::structural(
                format!(
                    "Expected VALUES or SELECT after INSERT INTO {table}, found {}",
                    self.current.describe()
                ),
                &self.current,
            ));
        };

        let on_duplicate_update = if self.match_keyword(Keyword::On)? {
            self.expect_word("DUPLICATE")?;
            self.expect_keyword(Keyword::Key)?;
            self.expect_keyword(Keyword::Update)?;
            self.parse_assignments()?
        } else {
            vec![]
        };

        Ok(InsertStatement {
            table,
            columns,
            source,
            on_duplicate_update,
        })
    }

    /// Parses `( expr[, expr]* )`.
    fn parse_value_row(&mut self) -> Result<Vec<Expr>> {
        self.expect_op("(")?;
        let row = self.parse_expression_list()?;
        self.expect_op(")")?;
        Ok(row)
    }

    /// Parses an UPDATE statement.
    pub(super) fn parse_update(&mut self) -> Result<UpdateStatement> {
        self.expect_keyword(Keyword::Update)?;
        let table = self.parse_object_name()?;
        let alias = self.parse_optional_alias()?;
        self.expect_keyword(Keyword::Set)?;
        let assignments = self.parse_assignments()?;
        let where_clause = self.parse_optional_where()?;
        let (order_by, limit) = self.parse_order_limit()?;

        Ok(UpdateStatement {
            table,
            alias,
            assignments,
            where_clause,
            order_by,
            limit,
        })
    }

    /// Parses a DELETE statement.
    pub(super) fn parse_delete(&mut self) -> Result<DeleteStatement> {
        self.expect_keyword(Keyword::Delete)?;
        self.expect_keyword(Keyword::From)?;
        let table = self.parse_object_name()?;
        let alias = self.parse_optional_alias()?;

        let mut using = vec![];
        if self.match_keyword(Keyword::Using)? {
            using.push(self.parse_table_ref()?);
            while self.match_op(",")? {
                using.push(self.parse_table_ref()?);
            }
        }

        let where_clause = self.parse_optional_where()?;
        let (order_by, limit) = self.parse_order_limit()?;

        Ok(DeleteStatement {
            table,
            alias,
            using,
            where_clause,
            order_by,
            limit,
        })
    }

    /// Parses a MERGE statement.
    pub(super) fn parse_merge(&mut self) -> Result<MergeStatement> {
        self.expect_word("MERGE")?;
        self.expect_keyword(Keyword::Into)?;
        let target = self.parse_object_name()?;
        let alias = self.parse_optional_alias()?;
        self.expect_keyword(Keyword::Using)?;
        let source = self.parse_table_primary()?;
        self.expect_keyword(Keyword::On)?;
        let on = self.parse_expression()?;

        let mut clauses = vec![];
        while self.match_keyword(Keyword::When)? {
            clauses.push(self.parse_merge_clause()?);
        }
        if clauses.is_empty() {
            return Err(ParseError::structural(
                "MERGE requires at least one WHEN clause",
                &self.current,
            ));
        }

        Ok(MergeStatement {
            target,
            alias,
            source,
            on,
            clauses,
        })
    }

    /// Parses `[NOT] MATCHED [AND cond] THEN action` after WHEN.
    fn parse_merge_clause(&mut self) -> Result<MergeClause> {
        let matched = !self.match_keyword(Keyword::Not)?;
        self.expect_word("MATCHED")?;
        let condition = if self.match_keyword(Keyword::And)? {
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.expect_keyword(Keyword::Then)?;

        let token = self.current.clone();
        let action = match token.as_keyword() {
            Some(Keyword::Update) if matched => {
                self.advance()?;
                self.expect_keyword(Keyword::Set)?;
                MergeAction::Update(self.parse_assignments()?)
            }
            Some(Keyword::Delete) if matched => {
                self.advance()?;
                MergeAction::Delete
            }
            Some(Keyword::Insert) if !matched => {
                self.advance()?;
                let columns = if self.check_op("(") {
                    self.parse_paren_identifier_list()?
                } else {
                    vec![]
                };
                self.expect_keyword(Keyword::Values)?;
                let values = self.parse_value_row()?;
                MergeAction::Insert { columns, values }
            }
            Some(Keyword::Update | Keyword::Delete) => {
                return Err(ParseError::structural(
                    format!("{} is only allowed in WHEN MATCHED", token.text.to_uppercase()),
                    &token,
                ));
            }
            Some(Keyword::Insert) => {
                return Err(ParseError::structural(
                    "INSERT is only allowed in WHEN NOT MATCHED",
                    &token,
                ));
            }
            _ => {
                let expected = if matched { "UPDATE or DELETE" } else { "INSERT" };
                return Err(ParseError::unexpected(expected, &token));
            }
        };

        Ok(MergeClause {
            matched,
            condition,
            action,
        })
    }

    /// Parses `col = expr[, col = expr]*`.
    pub(super) fn parse_assignments(&mut self) -> Result<Vec<Assignment>> {
        let mut assignments = vec![];
        loop {
            let column = self.expect_identifier()?;
            self.expect_op("=")?;
            let value = self.parse_expression()?;
            assignments.push(Assignment { column, value });

            if !self.match_op(",")? {
                break;
            }
        }
        Ok(assignments)
    }

    fn parse_optional_where(&mut self) -> Result<Option<Expr>> {
        if self.match_keyword(Keyword::Where)? {
            Ok(Some(self.parse_expression()?))
        } else {
            Ok(None)
        }
    }

    /// Parses the `[ORDER BY ...] [LIMIT n]` tail of UPDATE and DELETE.
    fn parse_order_limit(&mut self) -> Result<(Vec<OrderByItem>, Option<u64>)> {
        let order_by = if self.match_keyword(Keyword::Order)? {
            self.expect_keyword(Keyword::By)?;
            self.parse_order_by_list()?
        } else {
            vec![]
        };
        let limit = if self.match_keyword(Keyword::Limit)? {
            Some(self.expect_u64()?)
        } else {
            None
        };
        Ok((order_by, limit))
    }
}
