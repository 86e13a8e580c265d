//! DDL statement AST types: CREATE, DROP and ALTER TABLE.

use core::fmt;

use super::render::{Commas, Ident, IdentList, Quoted};
use super::{
    ColumnDef, DataType, Expr, ObjectName, OrderDirection, SelectStatement, Statement,
    TableConstraint,
};

/// Table options written after the column list.
///
/// `CHARACTER SET` and `CHARSET` both land in `charset`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableOptions {
    /// ENGINE
    pub engine: Option<String>,
    /// AUTO_INCREMENT start value
    pub auto_increment: Option<u64>,
    /// CHARACTER SET / CHARSET
    pub charset: Option<String>,
    /// COLLATE
    pub collate: Option<String>,
    /// COMMENT
    pub comment: Option<String>,
    /// ROW_FORMAT
    pub row_format: Option<String>,
    /// KEY_BLOCK_SIZE
    pub key_block_size: Option<u64>,
    /// MAX_ROWS
    pub max_rows: Option<u64>,
    /// MIN_ROWS
    pub min_rows: Option<u64>,
    /// TABLESPACE
    pub tablespace: Option<String>,
}

impl TableOptions {
    /// Returns true if no option is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl fmt::Display for TableOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if let Some(engine) = &self.engine {
            parts.push(format!("ENGINE = {}", Ident(engine)));
        }
        if let Some(value) = self.auto_increment {
            parts.push(format!("AUTO_INCREMENT = {value}"));
        }
        if let Some(charset) = &self.charset {
            parts.push(format!("CHARACTER SET = {}", Ident(charset)));
        }
        if let Some(collate) = &self.collate {
            parts.push(format!("COLLATE = {}", Ident(collate)));
        }
        if let Some(comment) = &self.comment {
            parts.push(format!("COMMENT = {}", Quoted(comment)));
        }
        if let Some(row_format) = &self.row_format {
            parts.push(format!("ROW_FORMAT = {}", Ident(row_format)));
        }
        if let Some(value) = self.key_block_size {
            parts.push(format!("KEY_BLOCK_SIZE = {value}"));
        }
        if let Some(value) = self.max_rows {
            parts.push(format!("MAX_ROWS = {value}"));
        }
        if let Some(value) = self.min_rows {
            parts.push(format!("MIN_ROWS = {value}"));
        }
        if let Some(tablespace) = &self.tablespace {
            parts.push(format!("TABLESPACE = {}", Ident(tablespace)));
        }
        f.write_str(&parts.join(" "))
    }
}

/// How rows are assigned to partitions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PartitionMethod {
    /// HASH (expr)
    Hash(Expr),
    /// KEY (cols)
    Key(Vec<String>),
    /// RANGE (expr)
    Range(Expr),
    /// LIST (expr)
    List(Expr),
}

impl fmt::Display for PartitionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hash(expr) => write!(f, "HASH ({expr})"),
            Self::Key(cols) => write!(f, "KEY ({})", IdentList(cols)),
            Self::Range(expr) => write!(f, "RANGE ({expr})"),
            Self::List(expr) => write!(f, "LIST ({expr})"),
        }
    }
}

/// The VALUES clause of a partition definition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PartitionValues {
    /// VALUES LESS THAN (expr); `None` is MAXVALUE.
    LessThan(Option<Expr>),
    /// VALUES IN (expr, ...)
    In(Vec<Expr>),
}

/// A single `PARTITION name VALUES ...` definition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PartitionDef {
    /// Partition name.
    pub name: String,
    /// Bound values.
    pub values: PartitionValues,
}

impl fmt::Display for PartitionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PARTITION {} VALUES ", Ident(&self.name))?;
        match &self.values {
            PartitionValues::LessThan(Some(expr)) => write!(f, "LESS THAN ({expr})"),
            PartitionValues::LessThan(None) => f.write_str("LESS THAN (MAXVALUE)"),
            PartitionValues::In(values) => write!(f, "IN ({})", Commas(values)),
        }
    }
}

/// A PARTITION BY clause.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PartitionSpec {
    /// Partitioning method.
    pub method: PartitionMethod,
    /// PARTITIONS n.
    pub partitions: Option<u64>,
    /// Explicit partition definitions.
    pub definitions: Vec<PartitionDef>,
}

impl fmt::Display for PartitionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PARTITION BY {}", self.method)?;
        if let Some(count) = self.partitions {
            write!(f, " PARTITIONS {count}")?;
        }
        if !self.definitions.is_empty() {
            write!(f, " ({})", Commas(&self.definitions))?;
        }
        Ok(())
    }
}

/// CREATE TABLE.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CreateTable {
    /// Table name.
    pub name: ObjectName,
    /// IF NOT EXISTS.
    pub if_not_exists: bool,
    /// Column definitions, never empty.
    pub columns: Vec<ColumnDef>,
    /// Table-level constraints.
    pub constraints: Vec<TableConstraint>,
    /// Table options.
    pub options: TableOptions,
    /// Partitioning.
    pub partition: Option<PartitionSpec>,
}

impl fmt::Display for CreateTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE TABLE ")?;
        if self.if_not_exists {
            f.write_str("IF NOT EXISTS ")?;
        }
        write!(f, "{} ({}", self.name, Commas(&self.columns))?;
        if !self.constraints.is_empty() {
            write!(f, ", {}", Commas(&self.constraints))?;
        }
        f.write_str(")")?;
        if !self.options.is_empty() {
            write!(f, " {}", self.options)?;
        }
        if let Some(partition) = &self.partition {
            write!(f, " {partition}")?;
        }
        Ok(())
    }
}

/// What an index key refers to.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum IndexTarget {
    /// A column, with an optional prefix length.
    Column {
        /// Column name.
        name: String,
        /// Prefix length.
        length: Option<u32>,
    },
    /// A parenthesized expression.
    Expr(Expr),
}

/// A key part of CREATE INDEX.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IndexColumn {
    /// Column or expression.
    pub target: IndexTarget,
    /// Sort direction.
    pub direction: OrderDirection,
}

impl fmt::Display for IndexColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target {
            IndexTarget::Column { name, length } => {
                write!(f, "{}", Ident(name))?;
                if let Some(length) = length {
                    write!(f, "({length})")?;
                }
            }
            IndexTarget::Expr(expr) => write!(f, "({expr})")?,
        }
        if self.direction == OrderDirection::Desc {
            f.write_str(" DESC")?;
        }
        Ok(())
    }
}

/// CREATE [UNIQUE] INDEX.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CreateIndex {
    /// Index name.
    pub name: String,
    /// UNIQUE.
    pub unique: bool,
    /// IF NOT EXISTS.
    pub if_not_exists: bool,
    /// Indexed table.
    pub table: ObjectName,
    /// Key parts, never empty.
    pub columns: Vec<IndexColumn>,
    /// USING method (BTREE, HASH, ...).
    pub using: Option<String>,
}

impl fmt::Display for CreateIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE ")?;
        if self.unique {
            f.write_str("UNIQUE ")?;
        }
        f.write_str("INDEX ")?;
        if self.if_not_exists {
            f.write_str("IF NOT EXISTS ")?;
        }
        write!(
            f,
            "{} ON {} ({})",
            Ident(&self.name),
            self.table,
            Commas(&self.columns)
        )?;
        if let Some(method) = &self.using {
            write!(f, " USING {}", Ident(method))?;
        }
        Ok(())
    }
}

/// CREATE [OR REPLACE] VIEW.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CreateView {
    /// View name.
    pub name: ObjectName,
    /// OR REPLACE.
    pub or_replace: bool,
    /// Explicit column names.
    pub columns: Vec<String>,
    /// The defining query.
    pub query: Box<SelectStatement>,
    /// WITH CHECK OPTION.
    pub with_check_option: bool,
}

impl fmt::Display for CreateView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE ")?;
        if self.or_replace {
            f.write_str("OR REPLACE ")?;
        }
        write!(f, "VIEW {}", self.name)?;
        if !self.columns.is_empty() {
            write!(f, " ({})", IdentList(&self.columns))?;
        }
        write!(f, " AS {}", self.query)?;
        if self.with_check_option {
            f.write_str(" WITH CHECK OPTION")?;
        }
        Ok(())
    }
}

/// When a trigger fires relative to its event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TriggerTiming {
    /// BEFORE
    Before,
    /// AFTER
    After,
    /// INSTEAD OF
    InsteadOf,
}

impl TriggerTiming {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Before => "BEFORE",
            Self::After => "AFTER",
            Self::InsteadOf => "INSTEAD OF",
        }
    }
}

/// The event a trigger fires on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TriggerEvent {
    /// INSERT
    Insert,
    /// UPDATE
    Update,
    /// DELETE
    Delete,
}

impl TriggerEvent {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }
}

/// The statements a trigger runs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TriggerBody {
    /// A single statement.
    Single(Box<Statement>),
    /// BEGIN stmt; ... END
    Block(Vec<Statement>),
}

impl fmt::Display for TriggerBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(statement) => write!(f, "{statement}"),
            Self::Block(statements) => {
                f.write_str("BEGIN")?;
                for statement in statements {
                    write!(f, " {statement};")?;
                }
                f.write_str(" END")
            }
        }
    }
}

/// CREATE TRIGGER.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CreateTrigger {
    /// Trigger name.
    pub name: ObjectName,
    /// IF NOT EXISTS.
    pub if_not_exists: bool,
    /// BEFORE, AFTER or INSTEAD OF.
    pub timing: TriggerTiming,
    /// INSERT, UPDATE or DELETE.
    pub event: TriggerEvent,
    /// The table the trigger is attached to.
    pub table: ObjectName,
    /// FOR EACH ROW.
    pub for_each_row: bool,
    /// WHEN (condition).
    pub when: Option<Expr>,
    /// Trigger body.
    pub body: TriggerBody,
}

impl fmt::Display for CreateTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE TRIGGER ")?;
        if self.if_not_exists {
            f.write_str("IF NOT EXISTS ")?;
        }
        write!(
            f,
            "{} {} {} ON {}",
            self.name,
            self.timing.as_str(),
            self.event.as_str(),
            self.table
        )?;
        if self.for_each_row {
            f.write_str(" FOR EACH ROW")?;
        }
        if let Some(condition) = &self.when {
            write!(f, " WHEN ({condition})")?;
        }
        write!(f, " {}", self.body)
    }
}

/// Direction of a procedure parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ParameterMode {
    /// IN
    In,
    /// OUT
    Out,
    /// INOUT
    InOut,
}

impl ParameterMode {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::In => "IN",
            Self::Out => "OUT",
            Self::InOut => "INOUT",
        }
    }
}

/// A parameter in a procedure signature.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ProcedureParameter {
    /// IN, OUT or INOUT, if written.
    pub mode: Option<ParameterMode>,
    pub name: String,
    pub data_type: DataType,
}

impl fmt::Display for ProcedureParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(mode) = self.mode {
            write!(f, "{} ", mode.as_str())?;
        }
        write!(f, "{} {}", Ident(&self.name), self.data_type)
    }
}

/// CREATE PROCEDURE. The body is limited to statements this crate parses;
/// local declarations and control flow are not modelled.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CreateProcedure {
    pub name: ObjectName,
    pub if_not_exists: bool,
    pub parameters: Vec<ProcedureParameter>,
    /// Statements between BEGIN and END.
    pub body: Vec<Statement>,
}

impl fmt::Display for CreateProcedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE PROCEDURE ")?;
        if self.if_not_exists {
            f.write_str("IF NOT EXISTS ")?;
        }
        write!(f, "{} ({}) BEGIN", self.name, Commas(&self.parameters))?;
        for statement in &self.body {
            write!(f, " {statement};")?;
        }
        f.write_str(" END")
    }
}

/// The kind of schema object a DDL statement targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ObjectType {
    /// TABLE
    Table,
    /// INDEX
    Index,
    /// VIEW
    View,
    /// TRIGGER
    Trigger,
    /// PROCEDURE
    Procedure,
}

impl ObjectType {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "TABLE",
            Self::Index => "INDEX",
            Self::View => "VIEW",
            Self::Trigger => "TRIGGER",
            Self::Procedure => "PROCEDURE",
        }
    }
}

/// A CREATE statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CreateStatement {
    /// CREATE TABLE
    Table(CreateTable),
    /// CREATE INDEX
    Index(CreateIndex),
    /// CREATE VIEW
    View(CreateView),
    /// CREATE TRIGGER
    Trigger(CreateTrigger),
    /// CREATE PROCEDURE
    Procedure(CreateProcedure),
}

impl CreateStatement {
    /// The kind of object being created.
    #[must_use]
    pub const fn object_type(&self) -> ObjectType {
        match self {
            Self::Table(_) => ObjectType::Table,
            Self::Index(_) => ObjectType::Index,
            Self::View(_) => ObjectType::View,
            Self::Trigger(_) => ObjectType::Trigger,
            Self::Procedure(_) => ObjectType::Procedure,
        }
    }
}

impl fmt::Display for CreateStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table(table) => write!(f, "{table}"),
            Self::Index(index) => write!(f, "{index}"),
            Self::View(view) => write!(f, "{view}"),
            Self::Trigger(trigger) => write!(f, "{trigger}"),
            Self::Procedure(procedure) => write!(f, "{procedure}"),
        }
    }
}

/// CASCADE or RESTRICT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DropBehavior {
    /// CASCADE
    Cascade,
    /// RESTRICT
    Restrict,
}

/// A DROP statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DropStatement {
    /// What is being dropped.
    pub object_type: ObjectType,
    /// IF EXISTS.
    pub if_exists: bool,
    /// Object names, never empty.
    pub names: Vec<ObjectName>,
    /// CASCADE / RESTRICT.
    pub behavior: Option<DropBehavior>,
}

impl fmt::Display for DropStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DROP {} ", self.object_type.as_str())?;
        if self.if_exists {
            f.write_str("IF EXISTS ")?;
        }
        write!(f, "{}", Commas(&self.names))?;
        match self.behavior {
            Some(DropBehavior::Cascade) => f.write_str(" CASCADE"),
            Some(DropBehavior::Restrict) => f.write_str(" RESTRICT"),
            None => Ok(()),
        }
    }
}

/// Where ADD COLUMN places the new column.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ColumnPosition {
    /// FIRST
    First,
    /// AFTER column
    After(String),
}

/// A single ALTER TABLE action.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum AlterTableAction {
    /// ADD [COLUMN] def [FIRST | AFTER col]
    AddColumn {
        /// The new column.
        column: ColumnDef,
        /// Placement.
        position: Option<ColumnPosition>,
    },
    /// ADD constraint
    AddConstraint(TableConstraint),
    /// DROP [COLUMN] name
    DropColumn(String),
    /// DROP CONSTRAINT name
    DropConstraint(String),
    /// MODIFY [COLUMN] def
    ModifyColumn(ColumnDef),
    /// RENAME COLUMN old TO new
    RenameColumn {
        /// Current name.
        from: String,
        /// New name.
        to: String,
    },
    /// RENAME TO name
    RenameTable(ObjectName),
}

impl fmt::Display for AlterTableAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddColumn { column, position } => {
                write!(f, "ADD COLUMN {column}")?;
                match position {
                    Some(ColumnPosition::First) => f.write_str(" FIRST"),
                    Some(ColumnPosition::After(name)) => write!(f, " AFTER {}", Ident(name)),
                    None => Ok(()),
                }
            }
            Self::AddConstraint(constraint) => write!(f, "ADD {constraint}"),
            Self::DropColumn(name) => write!(f, "DROP COLUMN {}", Ident(name)),
            Self::DropConstraint(name) => write!(f, "DROP CONSTRAINT {}", Ident(name)),
            Self::ModifyColumn(column) => write!(f, "MODIFY COLUMN {column}"),
            Self::RenameColumn { from, to } => {
                write!(f, "RENAME COLUMN {} TO {}", Ident(from), Ident(to))
            }
            Self::RenameTable(name) => write!(f, "RENAME TO {name}"),
        }
    }
}

/// ALTER TABLE name action[, action]*.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AlterTableStatement {
    /// Table name.
    pub name: ObjectName,
    /// Actions, never empty.
    pub actions: Vec<AlterTableAction>,
}

impl fmt::Display for AlterTableStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ALTER TABLE {} {}", self.name, Commas(&self.actions))
    }
}
