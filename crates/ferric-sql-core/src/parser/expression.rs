//! Expression parsing.

use super::error::{ParseError, Result};
use super::parser::Parser;
use super::pratt::{
    infix_binding_power, parse_operator, prefix_binding_power, token_to_unary_op, ADDITIVE_BP,
};
use crate::ast::{
    BinaryOp, ColumnRef, Expr, FrameBound, FrameExclusion, FrameUnits, FunctionCall, Literal,
    NullOrdering, OrderByItem, OrderDirection, WindowFrame, WindowSpec,
};
use crate::lexer::{Keyword, TokenKind};

impl Parser<'_> {
    /// Parses a full expression, OR being the loosest operator.
    pub(super) fn parse_expression(&mut self) -> Result<Expr> {
        self.parse_expr_bp(0)
    }

    /// Parses an additive expression: no comparisons or logical operators.
    /// Used for BETWEEN bounds and window frame offsets.
    pub(super) fn parse_term(&mut self) -> Result<Expr> {
        self.parse_expr_bp(ADDITIVE_BP)
    }

    fn parse_expr_bp(&mut self, min_bp: u8) -> Result<Expr> {
        self.nested(|p| {
            let mut lhs = p.parse_factor()?;
            while let Some((l_bp, r_bp)) = p.infix_power()? {
                if l_bp < min_bp {
                    break;
                }
                p.deepen()?;
                lhs = p.parse_infix(lhs, r_bp)?;
            }
            Ok(lhs)
        })
    }

    /// Binding power of the current token as an infix operator. A `NOT`
    /// only counts when it starts `NOT LIKE`, `NOT IN` or `NOT BETWEEN`.
    fn infix_power(&mut self) -> Result<Option<(u8, u8)>> {
        if self.check_keyword(Keyword::Not) {
            let next = self.peek(1)?;
            if !matches!(
                next.kind,
                TokenKind::Keyword(Keyword::Like | Keyword::In | Keyword::Between)
            ) {
                return Ok(None);
            }
        }
        Ok(infix_binding_power(&self.current))
    }

    fn parse_infix(&mut self, lhs: Expr, r_bp: u8) -> Result<Expr> {
        if self.match_keyword(Keyword::Is)? {
            let negated = self.match_keyword(Keyword::Not)?;
            self.expect_keyword(Keyword::Null)?;
            return Ok(Expr::IsNull {
                expr: Box::new(lhs),
                negated,
            });
        }

        let negated = self.match_keyword(Keyword::Not)?;
        if self.match_keyword(Keyword::In)? {
            let right = self.parse_in_list()?;
            let op = if negated { BinaryOp::NotIn } else { BinaryOp::In };
            return Ok(Expr::binary(lhs, op, right));
        }
        if self.match_keyword(Keyword::Between)? {
            let low = self.parse_term()?;
            self.expect_keyword(Keyword::And)?;
            let high = self.parse_term()?;
            return Ok(Expr::Between {
                expr: Box::new(lhs),
                low: Box::new(low),
                high: Box::new(high),
                negated,
            });
        }
        if negated {
            self.expect_keyword(Keyword::Like)?;
            let rhs = self.parse_expr_bp(r_bp)?;
            return Ok(Expr::binary(lhs, BinaryOp::NotLike, rhs));
        }

        let Some(op) = parse_operator(&self.current) else {
            return Err(ParseError::unexpected("operator", &self.current));
        };
        self.advance()?;
        let rhs = self.parse_expr_bp(r_bp)?;
        Ok(Expr::binary(lhs, op, rhs))
    }

    /// Parses the right side of IN: `(SELECT ...)` or `(e[, e]*)`.
    fn parse_in_list(&mut self) -> Result<Expr> {
        self.expect_op("(")?;
        let right = if self.check_keyword(Keyword::Select) {
            Expr::Subquery(Box::new(self.parse_select()?))
        } else {
            Expr::List(self.parse_expression_list()?)
        };
        self.expect_op(")")?;
        Ok(right)
    }

    /// Parses a prefix operator application or a primary expression.
    pub(super) fn parse_factor(&mut self) -> Result<Expr> {
        let Some(bp) = prefix_binding_power(&self.current) else {
            return self.parse_primary();
        };
        let op = token_to_unary_op(&self.current);
        self.advance()?;
        let operand = self.parse_expr_bp(bp)?;
        Ok(match op {
            Some(op) => Expr::Unary {
                op,
                operand: Box::new(operand),
            },
            None => operand,
        })
    }

    /// Parses a primary expression.
    fn parse_primary(&mut self) -> Result<Expr> {
        match self.current.kind {
            TokenKind::Number => {
                let literal = Literal::number(&self.current.text);
                self.advance()?;
                Ok(Expr::Literal(literal))
            }
            TokenKind::String => {
                let literal = Literal::string(self.current.text.clone());
                self.advance()?;
                Ok(Expr::Literal(literal))
            }
            TokenKind::Keyword(Keyword::Null) => {
                self.advance()?;
                Ok(Expr::Literal(Literal::null()))
            }
            TokenKind::Keyword(Keyword::True) => {
                self.advance()?;
                Ok(Expr::Literal(Literal::boolean(true)))
            }
            TokenKind::Keyword(Keyword::False) => {
                self.advance()?;
                Ok(Expr::Literal(Literal::boolean(false)))
            }
            TokenKind::Keyword(Keyword::Case) => self.parse_case(),
            TokenKind::Keyword(Keyword::Exists) => {
                self.advance()?;
                self.expect_op("(")?;
                let query = self.parse_select()?;
                self.expect_op(")")?;
                Ok(Expr::Exists(Box::new(query)))
            }
            TokenKind::Operator if self.check_op("(") => {
                self.advance()?;
                if self.check_keyword(Keyword::Select) {
                    let query = self.parse_select()?;
                    self.expect_op(")")?;
                    return Ok(Expr::Subquery(Box::new(query)));
                }
                let first = self.parse_expression()?;
                if self.match_op(")")? {
                    return Ok(Expr::Paren(Box::new(first)));
                }
                self.expect_op(",")?;
                let mut items = vec![first];
                items.extend(self.parse_expression_list()?);
                self.expect_op(")")?;
                Ok(Expr::List(items))
            }
            TokenKind::Identifier => {
                if self.check_word("CAST") && self.peek(1)?.is_operator("(") {
                    return self.parse_cast();
                }
                let name = self.expect_identifier()?;
                if self.check_op("(") {
                    return self.parse_function_call(name);
                }
                if self.match_op(".")? {
                    if self.match_op("*")? {
                        return Ok(Expr::Column(ColumnRef::qualified(name, "*")));
                    }
                    let column = self.expect_identifier()?;
                    return Ok(Expr::Column(ColumnRef::qualified(name, column)));
                }
                Ok(Expr::Column(ColumnRef::new(name)))
            }
            _ => Err(ParseError::unexpected("expression", &self.current)),
        }
    }

    /// Parses `( [DISTINCT] args | * ) [OVER window]` after a function name.
    fn parse_function_call(&mut self, name: String) -> Result<Expr> {
        self.expect_op("(")?;
        let mut call = FunctionCall::new(name, vec![]);

        if self.match_op("*")? {
            call.star = true;
        } else if !self.check_op(")") {
            call.distinct = self.match_keyword(Keyword::Distinct)?;
            call.args = self.parse_expression_list()?;
        }
        self.expect_op(")")?;

        if self.match_keyword(Keyword::Over)? {
            call.over = Some(Box::new(self.parse_window_spec()?));
        }
        Ok(Expr::Function(call))
    }

    /// Parses a window specification after OVER.
    fn parse_window_spec(&mut self) -> Result<WindowSpec> {
        if self.check_identifier() {
            return Ok(WindowSpec::named(self.expect_identifier()?));
        }

        self.expect_op("(")?;
        let mut spec = WindowSpec::default();
        if self.check_identifier() {
            spec.name = Some(self.expect_identifier()?);
        }
        if self.match_keyword(Keyword::Partition)? {
            self.expect_keyword(Keyword::By)?;
            spec.partition_by = self.parse_expression_list()?;
        }
        if self.match_keyword(Keyword::Order)? {
            self.expect_keyword(Keyword::By)?;
            spec.order_by = self.parse_order_by_list()?;
        }
        spec.frame = self.parse_window_frame()?;
        self.expect_op(")")?;
        Ok(spec)
    }

    fn parse_window_frame(&mut self) -> Result<Option<WindowFrame>> {
        let units = if self.match_keyword(Keyword::Rows)? {
            FrameUnits::Rows
        } else if self.match_keyword(Keyword::Range)? {
            FrameUnits::Range
        } else if self.match_word("GROUPS")? {
            FrameUnits::Groups
        } else {
            return Ok(None);
        };

        let (start, end) = if self.match_keyword(Keyword::Between)? {
            let start = self.parse_frame_bound()?;
            self.expect_keyword(Keyword::And)?;
            let end = self.parse_frame_bound()?;
            (start, end)
        } else {
            let bound = self.parse_frame_bound()?;
            (bound.clone(), bound)
        };

        let exclusion = if self.match_word("EXCLUDE")? {
            Some(self.parse_frame_exclusion()?)
        } else {
            None
        };

        Ok(Some(WindowFrame {
            units,
            start,
            end,
            exclusion,
        }))
    }

    fn parse_frame_bound(&mut self) -> Result<FrameBound> {
        if self.match_keyword(Keyword::Unbounded)? {
            if self.match_keyword(Keyword::Preceding)? {
                return Ok(FrameBound::UnboundedPreceding);
            }
            self.expect_keyword(Keyword::Following)?;
            return Ok(FrameBound::UnboundedFollowing);
        }
        if self.match_keyword(Keyword::Current)? {
            self.expect_keyword(Keyword::Row)?;
            return Ok(FrameBound::CurrentRow);
        }

        let offset = Box::new(self.parse_term()?);
        if self.match_keyword(Keyword::Preceding)? {
            Ok(FrameBound::Preceding(offset))
        } else if self.match_keyword(Keyword::Following)? {
            Ok(FrameBound::Following(offset))
        } else {
            Err(ParseError::unexpected(
                "PRECEDING or FOLLOWING",
                &self.current,
            ))
        }
    }

    fn parse_frame_exclusion(&mut self) -> Result<FrameExclusion> {
        if self.match_keyword(Keyword::Current)? {
            self.expect_keyword(Keyword::Row)?;
            Ok(FrameExclusion::CurrentRow)
        } else if self.match_keyword(Keyword::Group)? {
            Ok(FrameExclusion::Group)
        } else if self.match_word("TIES")? {
            Ok(FrameExclusion::Ties)
        } else if self.match_word("NO")? {
            self.expect_word("OTHERS")?;
            Ok(FrameExclusion::NoOthers)
        } else {
            Err(ParseError::unexpected(
                "CURRENT ROW, GROUP, TIES or NO OTHERS",
                &self.current,
            ))
        }
    }

    /// Parses a CASE expression.
    fn parse_case(&mut self) -> Result<Expr> {
        self.expect_keyword(Keyword::Case)?;

        // Simple CASE has an operand before the first WHEN
        let operand = if self.check_keyword(Keyword::When) {
            None
        } else {
            Some(Box::new(self.parse_expression()?))
        };

        let mut when_clauses = vec![];
        while self.match_keyword(Keyword::When)? {
            let condition = self.parse_expression()?;
            self.expect_keyword(Keyword::Then)?;
            let result = self.parse_expression()?;
            when_clauses.push((condition, result));
        }
        if when_clauses.is_empty() {
            return Err(ParseError::unexpected("WHEN", &self.current));
        }

        let else_clause = if self.match_keyword(Keyword::Else)? {
            Some(Box::new(self.parse_expression()?))
        } else {
            None
        };
        self.expect_keyword(Keyword::End)?;

        Ok(Expr::Case {
            operand,
            when_clauses,
            else_clause,
        })
    }

    /// Parses `CAST(expr AS type)`.
    fn parse_cast(&mut self) -> Result<Expr> {
        self.expect_word("CAST")?;
        self.expect_op("(")?;
        let expr = self.parse_expression()?;
        self.expect_keyword(Keyword::As)?;
        let data_type = self.parse_data_type()?;
        self.expect_op(")")?;
        Ok(Expr::Cast {
            expr: Box::new(expr),
            data_type,
        })
    }

    /// Parses a comma-separated list of expressions.
    pub(super) fn parse_expression_list(&mut self) -> Result<Vec<Expr>> {
        let mut exprs = vec![self.parse_expression()?];
        while self.match_op(",")? {
            exprs.push(self.parse_expression()?);
        }
        Ok(exprs)
    }

    /// Parses `item[, item]*` after ORDER BY.
    pub(super) fn parse_order_by_list(&mut self) -> Result<Vec<OrderByItem>> {
        let mut items = vec![];
        loop {
            let expr = self.parse_expression()?;
            let direction = if self.match_keyword(Keyword::Desc)? {
                OrderDirection::Desc
            } else {
                self.match_keyword(Keyword::Asc)?;
                OrderDirection::Asc
            };
            let nulls = if self.match_keyword(Keyword::Nulls)? {
                if self.match_keyword(Keyword::First)? {
                    Some(NullOrdering::First)
                } else {
                    self.expect_keyword(Keyword::Last)?;
                    Some(NullOrdering::Last)
                }
            } else {
                None
            };
            items.push(OrderByItem {
                expr,
                direction,
                nulls,
            });

            if !self.match_op(",")? {
                break;
            }
        }
        Ok(items)
    }
}
