//! Expression AST types.

use core::fmt;

use super::render::{Commas, Ident, Quoted};
use super::{DataType, SelectStatement, WindowSpec};

/// The type tag of a [`Literal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum LiteralKind {
    /// NULL.
    Null,
    /// A number without a decimal point.
    Integer,
    /// A number with a decimal point.
    Float,
    /// A string literal.
    String,
    /// TRUE or FALSE.
    Boolean,
}

/// A literal value with its source text.
///
/// Numbers keep the digits exactly as written, strings hold the decoded
/// value, and NULL/TRUE/FALSE are stored in canonical uppercase.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Literal {
    /// The literal type.
    pub kind: LiteralKind,
    /// The raw (or decoded, for strings) text.
    pub value: String,
}

impl Literal {
    /// The NULL literal.
    #[must_use]
    pub fn null() -> Self {
        Self {
            kind: LiteralKind::Null,
            value: String::from("NULL"),
        }
    }

    /// An integer literal.
    #[must_use]
    pub fn integer(value: impl Into<String>) -> Self {
        Self {
            kind: LiteralKind::Integer,
            value: value.into(),
        }
    }

    /// A floating point literal.
    #[must_use]
    pub fn float(value: impl Into<String>) -> Self {
        Self {
            kind: LiteralKind::Float,
            value: value.into(),
        }
    }

    /// Classifies number text as integer or float.
    #[must_use]
    pub fn number(text: &str) -> Self {
        if text.contains('.') {
            Self::float(text)
        } else {
            Self::integer(text)
        }
    }

    /// A string literal.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            kind: LiteralKind::String,
            value: value.into(),
        }
    }

    /// A boolean literal.
    #[must_use]
    pub fn boolean(value: bool) -> Self {
        Self {
            kind: LiteralKind::Boolean,
            value: String::from(if value { "TRUE" } else { "FALSE" }),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            LiteralKind::String => write!(f, "{}", Quoted(&self.value)),
            _ => f.write_str(&self.value),
        }
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    And,
    Or,

    // Pattern and membership
    Like,
    NotLike,
    In,
    NotIn,
}

impl BinaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum UnaryOp {
    /// Negation (-)
    Neg,
    /// Logical NOT
    Not,
}

impl UnaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Not => "NOT",
        }
    }
}

/// A column reference, optionally qualified with a table name or alias.
///
/// The name `*` stands for all columns (`*` or `t.*`).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ColumnRef {
    /// Table name or alias.
    pub table: Option<String>,
    /// Column name.
    pub name: String,
}

impl ColumnRef {
    /// An unqualified column.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            table: None,
            name: name.into(),
        }
    }

    /// A table-qualified column.
    #[must_use]
    pub fn qualified(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            table: Some(table.into()),
            name: name.into(),
        }
    }

    /// Returns true for `*` and `t.*`.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.name == "*"
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(table) = &self.table {
            write!(f, "{}.", Ident(table))?;
        }
        if self.is_wildcard() {
            f.write_str("*")
        } else {
            write!(f, "{}", Ident(&self.name))
        }
    }
}

/// A function call expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FunctionCall {
    /// The function name.
    pub name: String,
    /// The arguments.
    pub args: Vec<Expr>,
    /// Whether DISTINCT was specified.
    pub distinct: bool,
    /// Whether the argument list was `*`, as in `COUNT(*)`.
    pub star: bool,
    /// Window specification from an OVER clause.
    pub over: Option<Box<WindowSpec>>,
}

impl FunctionCall {
    /// A call with positional arguments.
    #[must_use]
    pub fn new(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self {
            name: name.into(),
            args,
            distinct: false,
            star: false,
            over: None,
        }
    }
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.eq_ignore_ascii_case("CAST") {
            // a bare `cast(` reads back as the CAST expression
            write!(f, "\"{}\"(", self.name)?;
        } else {
            write!(f, "{}(", Ident(&self.name))?;
        }
        if self.distinct {
            f.write_str("DISTINCT ")?;
        }
        if self.star {
            f.write_str("*")?;
        } else {
            write!(f, "{}", Commas(&self.args))?;
        }
        f.write_str(")")?;
        if let Some(over) = &self.over {
            write!(f, " OVER {over}")?;
        }
        Ok(())
    }
}

/// An SQL expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Expr {
    /// A literal value.
    Literal(Literal),

    /// A column reference.
    Column(ColumnRef),

    /// A binary expression.
    Binary {
        /// Left operand.
        left: Box<Expr>,
        /// Operator.
        op: BinaryOp,
        /// Right operand. For IN / NOT IN this is a `List` or `Subquery`.
        right: Box<Expr>,
    },

    /// A unary expression.
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Operand.
        operand: Box<Expr>,
    },

    /// IS [NOT] NULL.
    IsNull {
        /// The expression to check.
        expr: Box<Expr>,
        /// Whether this is IS NOT NULL.
        negated: bool,
    },

    /// [NOT] BETWEEN low AND high.
    Between {
        /// The expression to check.
        expr: Box<Expr>,
        /// Lower bound.
        low: Box<Expr>,
        /// Upper bound.
        high: Box<Expr>,
        /// Whether this is NOT BETWEEN.
        negated: bool,
    },

    /// A function call.
    Function(FunctionCall),

    /// CASE expression.
    Case {
        /// The operand of a simple CASE.
        operand: Option<Box<Expr>>,
        /// WHEN/THEN pairs.
        when_clauses: Vec<(Expr, Expr)>,
        /// ELSE result.
        else_clause: Option<Box<Expr>>,
    },

    /// CAST(expr AS type).
    Cast {
        /// The expression to convert.
        expr: Box<Expr>,
        /// The target type.
        data_type: DataType,
    },

    /// EXISTS (subquery).
    Exists(Box<SelectStatement>),

    /// A scalar or IN subquery.
    Subquery(Box<SelectStatement>),

    /// A parenthesized list of expressions, as in `IN (1, 2, 3)`.
    List(Vec<Expr>),

    /// A parenthesized expression.
    Paren(Box<Expr>),
}

impl Expr {
    /// A column reference expression.
    #[must_use]
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column(ColumnRef::new(name))
    }

    /// A binary expression.
    #[must_use]
    pub fn binary(left: Self, op: BinaryOp, right: Self) -> Self {
        Self::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Returns the literal if this is a literal expression.
    #[must_use]
    pub const fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    /// Returns the column reference if this is a column expression.
    #[must_use]
    pub const fn as_column(&self) -> Option<&ColumnRef> {
        match self {
            Self::Column(col) => Some(col),
            _ => None,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(lit) => write!(f, "{lit}"),
            Self::Column(col) => write!(f, "{col}"),
            Self::Binary { left, op, right } => write!(f, "{left} {op} {right}"),
            Self::Unary {
                op: UnaryOp::Not,
                operand,
            } => write!(f, "NOT {operand}"),
            Self::Unary {
                op: UnaryOp::Neg,
                operand,
            } => {
                // "--" would start a comment
                if matches!(
                    operand.as_ref(),
                    Self::Unary {
                        op: UnaryOp::Neg,
                        ..
                    }
                ) {
                    write!(f, "- {operand}")
                } else {
                    write!(f, "-{operand}")
                }
            }
            Self::IsNull { expr, negated } => {
                if *negated {
                    write!(f, "{expr} IS NOT NULL")
                } else {
                    write!(f, "{expr} IS NULL")
                }
            }
            Self::Between {
                expr,
                low,
                high,
                negated,
            } => {
                let not = if *negated { "NOT " } else { "" };
                write!(f, "{expr} {not}BETWEEN {low} AND {high}")
            }
            Self::Function(call) => write!(f, "{call}"),
            Self::Case {
                operand,
                when_clauses,
                else_clause,
            } => {
                f.write_str("CASE")?;
                if let Some(operand) = operand {
                    write!(f, " {operand}")?;
                }
                for (when, then) in when_clauses {
                    write!(f, " WHEN {when} THEN {then}")?;
                }
                if let Some(else_clause) = else_clause {
                    write!(f, " ELSE {else_clause}")?;
                }
                f.write_str(" END")
            }
            Self::Cast { expr, data_type } => write!(f, "CAST({expr} AS {data_type})"),
            Self::Exists(query) => write!(f, "EXISTS ({query})"),
            Self::Subquery(query) => write!(f, "({query})"),
            Self::List(items) => write!(f, "({})", Commas(items)),
            Self::Paren(inner) => write!(f, "({inner})"),
        }
    }
}
