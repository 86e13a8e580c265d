//! SQL statement AST types.

use core::fmt;

use super::ddl::{AlterTableStatement, CreateStatement, DropStatement};
use super::expression::Expr;
use super::render::{Commas, Ident, IdentList};

/// A possibly schema-qualified object name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ObjectName {
    /// Schema name (optional).
    pub schema: Option<String>,
    /// Object name.
    pub name: String,
}

impl ObjectName {
    /// An unqualified name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
        }
    }

    /// A schema-qualified name.
    #[must_use]
    pub fn qualified(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: Some(schema.into()),
            name: name.into(),
        }
    }
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(schema) = &self.schema {
            write!(f, "{}.", Ident(schema))?;
        }
        write!(f, "{}", Ident(&self.name))
    }
}

/// Order direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum OrderDirection {
    /// Ascending order (default).
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl OrderDirection {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Null ordering for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum NullOrdering {
    /// NULLs come first.
    First,
    /// NULLs come last.
    Last,
}

impl NullOrdering {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::First => "NULLS FIRST",
            Self::Last => "NULLS LAST",
        }
    }
}

/// An ORDER BY entry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OrderByItem {
    /// The expression to order by.
    pub expr: Expr,
    /// The direction (ASC or DESC).
    pub direction: OrderDirection,
    /// Null ordering (optional).
    pub nulls: Option<NullOrdering>,
}

impl fmt::Display for OrderByItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)?;
        if self.direction == OrderDirection::Desc {
            f.write_str(" DESC")?;
        }
        if let Some(nulls) = self.nulls {
            write!(f, " {}", nulls.as_str())?;
        }
        Ok(())
    }
}

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum JoinType {
    /// INNER JOIN.
    Inner,
    /// LEFT OUTER JOIN.
    Left,
    /// RIGHT OUTER JOIN.
    Right,
    /// FULL OUTER JOIN.
    Full,
    /// CROSS JOIN.
    Cross,
}

impl JoinType {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Full => "FULL JOIN",
            Self::Cross => "CROSS JOIN",
        }
    }
}

/// How a join matches rows.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum JoinCondition {
    /// ON <expr>
    On(Expr),
    /// USING (col, ...), never empty.
    Using(Vec<String>),
}

/// A join of two table references.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Join {
    /// The type of join.
    pub join_type: JoinType,
    /// Whether NATURAL was specified.
    pub natural: bool,
    /// Left side. For chained joins this is itself a join.
    pub left: TableRef,
    /// Right side.
    pub right: TableRef,
    /// Join condition. Absent only for NATURAL and CROSS joins.
    pub condition: Option<JoinCondition>,
}

impl fmt::Display for Join {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.left)?;
        if self.natural {
            f.write_str("NATURAL ")?;
            f.write_str(match self.join_type {
                JoinType::Inner => "JOIN",
                other => other.as_str(),
            })?;
        } else {
            f.write_str(self.join_type.as_str())?;
        }
        if matches!(self.right, TableRef::Join(_)) {
            write!(f, " ({})", self.right)?;
        } else {
            write!(f, " {}", self.right)?;
        }
        match &self.condition {
            Some(JoinCondition::On(expr)) => write!(f, " ON {expr}"),
            Some(JoinCondition::Using(cols)) => write!(f, " USING ({})", IdentList(cols)),
            None => Ok(()),
        }
    }
}

/// A table reference in a FROM clause.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TableRef {
    /// A base table.
    Table {
        /// Table name.
        name: ObjectName,
        /// Alias.
        alias: Option<String>,
    },
    /// A subquery used as a table.
    Derived {
        /// The subquery.
        query: Box<SelectStatement>,
        /// Alias.
        alias: Option<String>,
    },
    /// A joined table.
    Join(Box<Join>),
}

impl TableRef {
    /// Creates a simple table reference.
    #[must_use]
    pub fn table(name: impl Into<String>) -> Self {
        Self::Table {
            name: ObjectName::new(name),
            alias: None,
        }
    }

    /// Adds an alias to a base or derived table.
    #[must_use]
    pub fn alias(self, alias: impl Into<String>) -> Self {
        match self {
            Self::Table { name, .. } => Self::Table {
                name,
                alias: Some(alias.into()),
            },
            Self::Derived { query, .. } => Self::Derived {
                query,
                alias: Some(alias.into()),
            },
            join @ Self::Join(_) => join,
        }
    }

    /// Returns the join if this is a joined table.
    #[must_use]
    pub fn as_join(&self) -> Option<&Join> {
        match self {
            Self::Join(join) => Some(join),
            _ => None,
        }
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table { name, alias } => {
                write!(f, "{name}")?;
                if let Some(alias) = alias {
                    write!(f, " AS {}", Ident(alias))?;
                }
                Ok(())
            }
            Self::Derived { query, alias } => {
                write!(f, "({query})")?;
                if let Some(alias) = alias {
                    write!(f, " AS {}", Ident(alias))?;
                }
                Ok(())
            }
            Self::Join(join) => write!(f, "{join}"),
        }
    }
}

/// An item in the SELECT list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SelectItem {
    /// The expression. `*` and `t.*` are column references named `*`.
    pub expr: Expr,
    /// Column alias.
    pub alias: Option<String>,
}

impl SelectItem {
    /// Creates a new select item.
    #[must_use]
    pub const fn new(expr: Expr) -> Self {
        Self { expr, alias: None }
    }

    /// Creates a select item with an alias.
    #[must_use]
    pub fn with_alias(expr: Expr, alias: impl Into<String>) -> Self {
        Self {
            expr,
            alias: Some(alias.into()),
        }
    }
}

impl fmt::Display for SelectItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)?;
        if let Some(alias) = &self.alias {
            write!(f, " AS {}", Ident(alias))?;
        }
        Ok(())
    }
}

/// GROUP BY with its optional HAVING filter.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GroupBy {
    /// Grouping expressions.
    pub exprs: Vec<Expr>,
    /// HAVING condition.
    pub having: Option<Expr>,
}

/// A SELECT statement.
///
/// `columns` and `from` are never empty in a parsed statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SelectStatement {
    /// Whether to select DISTINCT values.
    pub distinct: bool,
    /// The projected items.
    pub columns: Vec<SelectItem>,
    /// The FROM list.
    pub from: Vec<TableRef>,
    /// The WHERE clause.
    pub where_clause: Option<Expr>,
    /// GROUP BY clause (with HAVING).
    pub group_by: Option<GroupBy>,
    /// ORDER BY items.
    pub order_by: Vec<OrderByItem>,
    /// LIMIT row count.
    pub limit: Option<u64>,
    /// OFFSET row count.
    pub offset: Option<u64>,
}

impl fmt::Display for SelectStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT ")?;
        if self.distinct {
            f.write_str("DISTINCT ")?;
        }
        write!(f, "{} FROM {}", Commas(&self.columns), Commas(&self.from))?;
        if let Some(condition) = &self.where_clause {
            write!(f, " WHERE {condition}")?;
        }
        if let Some(group_by) = &self.group_by {
            write!(f, " GROUP BY {}", Commas(&group_by.exprs))?;
            if let Some(having) = &group_by.having {
                write!(f, " HAVING {having}")?;
            }
        }
        if !self.order_by.is_empty() {
            write!(f, " ORDER BY {}", Commas(&self.order_by))?;
        }
        if let Some(limit) = self.limit {
            write!(f, " LIMIT {limit}")?;
        }
        if let Some(offset) = self.offset {
            write!(f, " OFFSET {offset}")?;
        }
        Ok(())
    }
}

/// A `column = value` assignment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Assignment {
    /// Column name.
    pub column: String,
    /// Value expression.
    pub value: Expr,
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", Ident(&self.column), self.value)
    }
}

/// Source of data for INSERT.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum InsertSource {
    /// VALUES (...), (...), ...
    Values(Vec<Vec<Expr>>),
    /// SELECT ...
    Select(Box<SelectStatement>),
}

/// An INSERT statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InsertStatement {
    /// Target table.
    pub table: ObjectName,
    /// Column names (empty when omitted).
    pub columns: Vec<String>,
    /// Rows to insert.
    pub source: InsertSource,
    /// ON DUPLICATE KEY UPDATE assignments (empty when omitted).
    pub on_duplicate_update: Vec<Assignment>,
}

impl fmt::Display for InsertStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "INSERT INTO {}", self.table)?;
        if !self.columns.is_empty() {
            write!(f, " ({})", IdentList(&self.columns))?;
        }
        match &self.source {
            InsertSource::Values(rows) => {
                f.write_str(" VALUES ")?;
                for (i, row) in rows.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "({})", Commas(row))?;
                }
            }
            InsertSource::Select(query) => write!(f, " {query}")?,
        }
        if !self.on_duplicate_update.is_empty() {
            write!(
                f,
                " ON DUPLICATE KEY UPDATE {}",
                Commas(&self.on_duplicate_update)
            )?;
        }
        Ok(())
    }
}

/// Renders the ORDER BY / LIMIT tail shared by UPDATE and DELETE.
fn write_order_limit(
    f: &mut fmt::Formatter<'_>,
    order_by: &[OrderByItem],
    limit: Option<u64>,
) -> fmt::Result {
    if !order_by.is_empty() {
        write!(f, " ORDER BY {}", Commas(order_by))?;
    }
    if let Some(limit) = limit {
        write!(f, " LIMIT {limit}")?;
    }
    Ok(())
}

/// An UPDATE statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UpdateStatement {
    /// Target table.
    pub table: ObjectName,
    /// Alias.
    pub alias: Option<String>,
    /// SET assignments.
    pub assignments: Vec<Assignment>,
    /// WHERE clause.
    pub where_clause: Option<Expr>,
    /// ORDER BY items.
    pub order_by: Vec<OrderByItem>,
    /// LIMIT row count.
    pub limit: Option<u64>,
}

impl fmt::Display for UpdateStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UPDATE {}", self.table)?;
        if let Some(alias) = &self.alias {
            write!(f, " AS {}", Ident(alias))?;
        }
        write!(f, " SET {}", Commas(&self.assignments))?;
        if let Some(condition) = &self.where_clause {
            write!(f, " WHERE {condition}")?;
        }
        write_order_limit(f, &self.order_by, self.limit)
    }
}

/// A DELETE statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DeleteStatement {
    /// Target table.
    pub table: ObjectName,
    /// Alias.
    pub alias: Option<String>,
    /// USING tables.
    pub using: Vec<TableRef>,
    /// WHERE clause.
    pub where_clause: Option<Expr>,
    /// ORDER BY items.
    pub order_by: Vec<OrderByItem>,
    /// LIMIT row count.
    pub limit: Option<u64>,
}

impl fmt::Display for DeleteStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DELETE FROM {}", self.table)?;
        if let Some(alias) = &self.alias {
            write!(f, " AS {}", Ident(alias))?;
        }
        if !self.using.is_empty() {
            write!(f, " USING {}", Commas(&self.using))?;
        }
        if let Some(condition) = &self.where_clause {
            write!(f, " WHERE {condition}")?;
        }
        write_order_limit(f, &self.order_by, self.limit)
    }
}

/// The action of a MERGE WHEN clause.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum MergeAction {
    /// UPDATE SET ... (WHEN MATCHED only).
    Update(Vec<Assignment>),
    /// DELETE (WHEN MATCHED only).
    Delete,
    /// INSERT [(cols)] VALUES (...) (WHEN NOT MATCHED only).
    Insert {
        /// Column names (empty when omitted).
        columns: Vec<String>,
        /// Values for one row.
        values: Vec<Expr>,
    },
}

/// A `WHEN [NOT] MATCHED [AND cond] THEN action` clause.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MergeClause {
    /// WHEN MATCHED (true) or WHEN NOT MATCHED (false).
    pub matched: bool,
    /// Additional AND condition.
    pub condition: Option<Expr>,
    /// What to do with the row.
    pub action: MergeAction,
}

impl fmt::Display for MergeClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.matched {
            "WHEN MATCHED"
        } else {
            "WHEN NOT MATCHED"
        })?;
        if let Some(condition) = &self.condition {
            write!(f, " AND {condition}")?;
        }
        f.write_str(" THEN ")?;
        match &self.action {
            MergeAction::Update(assignments) => write!(f, "UPDATE SET {}", Commas(assignments)),
            MergeAction::Delete => f.write_str("DELETE"),
            MergeAction::Insert { columns, values } => {
                f.write_str("INSERT")?;
                if !columns.is_empty() {
                    write!(f, " ({})", IdentList(columns))?;
                }
                write!(f, " VALUES ({})", Commas(values))
            }
        }
    }
}

/// A MERGE statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MergeStatement {
    /// Target table.
    pub target: ObjectName,
    /// Target alias.
    pub alias: Option<String>,
    /// Source table or subquery.
    pub source: TableRef,
    /// Match condition.
    pub on: Expr,
    /// WHEN clauses, at least one.
    pub clauses: Vec<MergeClause>,
}

impl fmt::Display for MergeStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MERGE INTO {}", self.target)?;
        if let Some(alias) = &self.alias {
            write!(f, " AS {}", Ident(alias))?;
        }
        write!(f, " USING {} ON {}", self.source, self.on)?;
        for clause in &self.clauses {
            write!(f, " {clause}")?;
        }
        Ok(())
    }
}

/// A TRUNCATE TABLE statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TruncateStatement {
    /// Table to empty.
    pub table: ObjectName,
}

/// A single privilege, optionally restricted to columns.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Privilege {
    /// Privilege name in uppercase (SELECT, INSERT, EXECUTE, ...).
    pub name: String,
    /// Column list (empty for the whole object).
    pub columns: Vec<String>,
}

impl fmt::Display for Privilege {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.columns.is_empty() {
            write!(f, " ({})", IdentList(&self.columns))?;
        }
        Ok(())
    }
}

/// The privileges named by GRANT or REVOKE.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Privileges {
    /// ALL [PRIVILEGES]
    All,
    /// An explicit list.
    List(Vec<Privilege>),
}

impl fmt::Display for Privileges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("ALL PRIVILEGES"),
            Self::List(privileges) => write!(f, "{}", Commas(privileges)),
        }
    }
}

/// A GRANT statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GrantStatement {
    /// Granted privileges.
    pub privileges: Privileges,
    /// The object the privileges apply to.
    pub object: ObjectName,
    /// Users or roles receiving the privileges.
    pub grantees: Vec<String>,
    /// WITH GRANT OPTION.
    pub with_grant_option: bool,
}

/// A REVOKE statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RevokeStatement {
    /// Revoked privileges.
    pub privileges: Privileges,
    /// The object the privileges apply to.
    pub object: ObjectName,
    /// Users or roles losing the privileges.
    pub grantees: Vec<String>,
}

/// A SQL statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[allow(clippy::large_enum_variant)]
pub enum Statement {
    /// SELECT statement.
    Select(SelectStatement),
    /// INSERT statement.
    Insert(InsertStatement),
    /// UPDATE statement.
    Update(UpdateStatement),
    /// DELETE statement.
    Delete(DeleteStatement),
    /// CREATE TABLE / INDEX / VIEW / TRIGGER.
    Create(CreateStatement),
    /// DROP statement.
    Drop(DropStatement),
    /// ALTER TABLE statement.
    AlterTable(AlterTableStatement),
    /// TRUNCATE TABLE statement.
    Truncate(TruncateStatement),
    /// GRANT statement.
    Grant(GrantStatement),
    /// REVOKE statement.
    Revoke(RevokeStatement),
    /// MERGE statement.
    Merge(MergeStatement),
}

impl Statement {
    /// The leading keyword(s) of the statement, for logging.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Select(_) => "SELECT",
            Self::Insert(_) => "INSERT",
            Self::Update(_) => "UPDATE",
            Self::Delete(_) => "DELETE",
            Self::Create(_) => "CREATE",
            Self::Drop(_) => "DROP",
            Self::AlterTable(_) => "ALTER TABLE",
            Self::Truncate(_) => "TRUNCATE",
            Self::Grant(_) => "GRANT",
            Self::Revoke(_) => "REVOKE",
            Self::Merge(_) => "MERGE",
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select(s) => write!(f, "{s}"),
            Self::Insert(s) => write!(f, "{s}"),
            Self::Update(s) => write!(f, "{s}"),
            Self::Delete(s) => write!(f, "{s}"),
            Self::Create(s) => write!(f, "{s}"),
            Self::Drop(s) => write!(f, "{s}"),
            Self::AlterTable(s) => write!(f, "{s}"),
            Self::Truncate(s) => write!(f, "TRUNCATE TABLE {}", s.table),
            Self::Grant(s) => {
                write!(
                    f,
                    "GRANT {} ON {} TO {}",
                    s.privileges,
                    s.object,
                    IdentList(&s.grantees)
                )?;
                if s.with_grant_option {
                    f.write_str(" WITH GRANT OPTION")?;
                }
                Ok(())
            }
            Self::Revoke(s) => write!(
                f,
                "REVOKE {} ON {} FROM {}",
                s.privileges,
                s.object,
                IdentList(&s.grantees)
            ),
            Self::Merge(s) => write!(f, "{s}"),
        }
    }
}
