//! SELECT statements, FROM clauses and joins.

use super::error::{ParseError, Result};
use super::parser::Parser;
use crate::ast::{
    ColumnRef, Expr, GroupBy, Join, JoinCondition, JoinType, OrderByItem, SelectItem,
    SelectStatement, TableRef,
};
use crate::lexer::Keyword;

impl Parser<'_> {
    /// Parses a SELECT statement.
    pub(super) fn parse_select(&mut self) -> Result<SelectStatement> {
        self.nested(Self::parse_select_body)
    }

    fn parse_select_body(&mut self) -> Result<SelectStatement> {
        self.expect_keyword(Keyword::Select)?;

        // DISTINCT or ALL
        let distinct = if self.match_keyword(Keyword::Distinct)? {
            true
        } else {
            self.match_keyword(Keyword::All)?;
            false
        };

        let columns = self.parse_select_items()?;

        if !self.match_keyword(Keyword::From)? {
            return Err(ParseError::structural(
                format!(
                    "Expected FROM clause after SELECT columns, found {}",
                    self.current.describe()
                ),
                &self.current,
            ));
        }
        let mut from = vec![self.parse_table_ref()?];
        while self.match_op(",")? {
            from.push(self.parse_table_ref()?);
        }

        let mut where_clause: Option<Expr> = None;
        let mut group_exprs: Option<Vec<Expr>> = None;
        let mut having: Option<Expr> = None;
        let mut order_by: Option<Vec<OrderByItem>> = None;
        let mut limit: Option<u64> = None;
        let mut offset: Option<u64> = None;

        // Optional clauses, each at most once
        loop {
            let token = self.current.clone();
            match token.as_keyword() {
                Some(Keyword::Where) => {
                    if where_clause.is_some() {
                        return Err(ParseError::structural("Duplicate WHERE clause", &token));
                    }
                    self.advance()?;
                    where_clause = Some(self.parse_expression()?);
                }
                Some(Keyword::Group) => {
                    if group_exprs.is_some() {
                        return Err(ParseError::structural("Duplicate GROUP BY clause", &token));
                    }
                    self.advance()?;
                    self.expect_keyword(Keyword::By)?;
                    group_exprs = Some(self.parse_expression_list()?);
                }
                Some(Keyword::Having) => {
                    if group_exprs.is_none() {
                        return Err(ParseError::structural(
                            "HAVING clause requires GROUP BY",
                            &token,
                        ));
                    }
                    if having.is_some() {
                        return Err(ParseError::structural("Duplicate HAVING clause", &token));
                    }
                    self.advance()?;
                    having = Some(self.parse_expression()?);
                }
                Some(Keyword::Order) => {
                    if order_by.is_some() {
                        return Err(ParseError::structural("Duplicate ORDER BY clause", &token));
                    }
                    self.advance()?;
                    self.expect_keyword(Keyword::By)?;
                    order_by = Some(self.parse_order_by_list()?);
                }
                Some(Keyword::Limit) => {
                    if limit.is_some() {
                        return Err(ParseError::structural("Duplicate LIMIT clause", &token));
                    }
                    self.advance()?;
                    limit = Some(self.expect_u64()?);
                }
                Some(Keyword::Offset) => {
                    if offset.is_some() {
                        return Err(ParseError::structural("Duplicate OFFSET clause", &token));
                    }
                    self.advance()?;
                    offset = Some(self.expect_u64()?);
                }
                _ => break,
            }
        }

        Ok(SelectStatement {
            distinct,
            columns,
            from,
            where_clause,
            group_by: group_exprs.map(|exprs| GroupBy { exprs, having }),
            order_by: order_by.unwrap_or_default(),
            limit,
            offset,
        })
    }

    /// Parses the projection list.
    fn parse_select_items(&mut self) -> Result<Vec<SelectItem>> {
        let mut items = vec![];
        loop {
            if self.match_op("*")? {
                items.push(SelectItem::new(Expr::Column(ColumnRef::new("*"))));
            } else {
                let expr = self.parse_expression()?;
                let alias = self.parse_optional_alias()?;
                items.push(SelectItem { expr, alias });
            }

            if !self.match_op(",")? {
                break;
            }
        }
        Ok(items)
    }

    /// Parses a table reference followed by any number of joins. Joins nest
    /// to the left: `a JOIN b JOIN c` is `(a JOIN b) JOIN c`.
    pub(super) fn parse_table_ref(&mut self) -> Result<TableRef> {
        self.nested(Self::parse_join_chain)
    }

    fn parse_join_chain(&mut self) -> Result<TableRef> {
        let mut table_ref = self.parse_table_primary()?;

        while let Some((join_type, natural)) = self.parse_join_operator()? {
            self.deepen()?;
            let right = self.parse_table_primary()?;
            let condition = if natural || join_type == JoinType::Cross {
                None
            } else {
                Some(self.parse_join_condition()?)
            };
            table_ref = TableRef::Join(Box::new(Join {
                join_type,
                natural,
                left: table_ref,
                right,
                condition,
            }));
        }

        Ok(table_ref)
    }

    /// Parses a base table, a derived table, or a parenthesized join.
    pub(super) fn parse_table_primary(&mut self) -> Result<TableRef> {
        if self.match_op("(")? {
            if self.check_keyword(Keyword::Select) {
                let query = self.parse_select()?;
                self.expect_op(")")?;
                let alias = self.parse_optional_alias()?;
                return Ok(TableRef::Derived {
                    query: Box::new(query),
                    alias,
                });
            }
            let inner = self.parse_table_ref()?;
            self.expect_op(")")?;
            return Ok(inner);
        }

        let name = self.parse_object_name()?;
        let alias = self.parse_optional_alias()?;
        Ok(TableRef::Table { name, alias })
    }

    /// Consumes a join operator, returning its type and NATURAL flag, or
    /// `None` if the current token does not start one.
    fn parse_join_operator(&mut self) -> Result<Option<(JoinType, bool)>> {
        let natural = self.match_keyword(Keyword::Natural)?;

        let join_type = match self.current.as_keyword() {
            Some(Keyword::Join) => JoinType::Inner,
            Some(Keyword::Inner) => {
                self.advance()?;
                JoinType::Inner
            }
            Some(kw @ (Keyword::Left | Keyword::Right | Keyword::Full)) => {
                self.advance()?;
                self.match_keyword(Keyword::Outer)?;
                match kw {
                    Keyword::Left => JoinType::Left,
                    Keyword::Right => JoinType::Right,
                    _ => JoinType::Full,
                }
            }
            Some(Keyword::Cross) if !natural => {
                self.advance()?;
                JoinType::Cross
            }
            _ if natural => return Err(ParseError::unexpected("JOIN", &self.current)),
            _ => return Ok(None),
        };

        self.expect_keyword(Keyword::Join)?;
        Ok(Some((join_type, natural)))
    }

    /// Parses `ON expr` or `USING (col, ...)`.
    fn parse_join_condition(&mut self) -> Result<JoinCondition> {
        if self.match_keyword(Keyword::On)? {
            return Ok(JoinCondition::On(self.parse_expression()?));
        }
        if self.match_keyword(Keyword::Using)? {
            self.expect_op("(")?;
            if self.check_op(")") {
                return Err(ParseError::structural(
                    "USING clause requires at least one column",
                    &self.current,
                ));
            }
            let columns = self.parse_identifier_list()?;
            self.expect_op(")")?;
            return Ok(JoinCondition::Using(columns));
        }
        Err(ParseError::structural(
            format!(
                "Expected ON or USING after JOIN, found {}",
                self.current.describe()
            ),
            &self.current,
        ))
    }
}
