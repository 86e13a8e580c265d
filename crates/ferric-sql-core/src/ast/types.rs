//! SQL data types, column definitions and constraints.

use core::fmt;

use super::render::{Ident, IdentList, Quoted};
use super::{Expr, ObjectName};

/// The base SQL type names understood by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TypeName {
    /// INT / INTEGER
    Integer,
    /// BIGINT
    Bigint,
    /// SMALLINT
    Smallint,
    /// DECIMAL[(p[, s])]
    Decimal,
    /// NUMERIC[(p[, s])]
    Numeric,
    /// FLOAT
    Float,
    /// DOUBLE [PRECISION]
    Double,
    /// CHAR[(n)]
    Char,
    /// VARCHAR(n)
    Varchar,
    /// TEXT
    Text,
    /// DATE
    Date,
    /// TIME
    Time,
    /// TIMESTAMP
    Timestamp,
    /// BOOLEAN / BOOL
    Boolean,
    /// BLOB
    Blob,
    /// JSON
    Json,
}

impl TypeName {
    /// Looks up a type name, ignoring ASCII case. `DOUBLE PRECISION` is
    /// handled by the parser.
    #[must_use]
    pub fn lookup(word: &str) -> Option<Self> {
        let name = match word.to_ascii_uppercase().as_str() {
            "INT" | "INTEGER" => Self::Integer,
            "BIGINT" => Self::Bigint,
            "SMALLINT" => Self::Smallint,
            "DECIMAL" => Self::Decimal,
            "NUMERIC" => Self::Numeric,
            "FLOAT" => Self::Float,
            "DOUBLE" => Self::Double,
            "CHAR" => Self::Char,
            "VARCHAR" => Self::Varchar,
            "TEXT" => Self::Text,
            "DATE" => Self::Date,
            "TIME" => Self::Time,
            "TIMESTAMP" => Self::Timestamp,
            "BOOLEAN" | "BOOL" => Self::Boolean,
            "BLOB" => Self::Blob,
            "JSON" => Self::Json,
            _ => return None,
        };
        Some(name)
    }

    /// Returns the canonical SQL spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::Bigint => "BIGINT",
            Self::Smallint => "SMALLINT",
            Self::Decimal => "DECIMAL",
            Self::Numeric => "NUMERIC",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE",
            Self::Char => "CHAR",
            Self::Varchar => "VARCHAR",
            Self::Text => "TEXT",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Timestamp => "TIMESTAMP",
            Self::Boolean => "BOOLEAN",
            Self::Blob => "BLOB",
            Self::Json => "JSON",
        }
    }
}

/// A column data type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DataType {
    /// The base type.
    pub name: TypeName,
    /// Length for CHAR/VARCHAR.
    pub length: Option<u32>,
    /// Precision for DECIMAL/NUMERIC.
    pub precision: Option<u32>,
    /// Scale for DECIMAL/NUMERIC.
    pub scale: Option<u32>,
    /// CHARACTER SET.
    pub charset: Option<String>,
    /// COLLATE.
    pub collation: Option<String>,
}

impl DataType {
    /// A type without parameters.
    #[must_use]
    pub const fn new(name: TypeName) -> Self {
        Self {
            name,
            length: None,
            precision: None,
            scale: None,
            charset: None,
            collation: None,
        }
    }

    /// VARCHAR(n).
    #[must_use]
    pub const fn varchar(length: u32) -> Self {
        let mut data_type = Self::new(TypeName::Varchar);
        data_type.length = Some(length);
        data_type
    }

    /// DECIMAL(p, s).
    #[must_use]
    pub const fn decimal(precision: u32, scale: u32) -> Self {
        let mut data_type = Self::new(TypeName::Decimal);
        data_type.precision = Some(precision);
        data_type.scale = Some(scale);
        data_type
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name.as_str())?;
        if let Some(length) = self.length {
            write!(f, "({length})")?;
        }
        match (self.precision, self.scale) {
            (Some(p), Some(s)) => write!(f, "({p}, {s})")?,
            (Some(p), None) => write!(f, "({p})")?,
            _ => {}
        }
        if let Some(charset) = &self.charset {
            write!(f, " CHARACTER SET {}", Ident(charset))?;
        }
        if let Some(collation) = &self.collation {
            write!(f, " COLLATE {}", Ident(collation))?;
        }
        Ok(())
    }
}

/// MATCH type of a foreign key reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum MatchType {
    /// MATCH FULL
    Full,
    /// MATCH PARTIAL
    Partial,
    /// MATCH SIMPLE
    Simple,
}

impl MatchType {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "FULL",
            Self::Partial => "PARTIAL",
            Self::Simple => "SIMPLE",
        }
    }
}

/// ON DELETE / ON UPDATE action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ReferentialAction {
    /// RESTRICT
    Restrict,
    /// CASCADE
    Cascade,
    /// SET NULL
    SetNull,
    /// SET DEFAULT
    SetDefault,
    /// NO ACTION
    NoAction,
}

impl ReferentialAction {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
            Self::NoAction => "NO ACTION",
        }
    }
}

/// The REFERENCES part of a foreign key.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ForeignKeyRef {
    /// Referenced table.
    pub table: ObjectName,
    /// Referenced columns (empty for the primary key).
    pub columns: Vec<String>,
    /// MATCH type.
    pub match_type: Option<MatchType>,
    /// ON DELETE action.
    pub on_delete: Option<ReferentialAction>,
    /// ON UPDATE action.
    pub on_update: Option<ReferentialAction>,
    /// `Some(true)` for ENFORCED, `Some(false)` for NOT ENFORCED.
    pub enforced: Option<bool>,
}

impl ForeignKeyRef {
    /// A reference to `table (columns)` with no options.
    #[must_use]
    pub const fn new(table: ObjectName, columns: Vec<String>) -> Self {
        Self {
            table,
            columns,
            match_type: None,
            on_delete: None,
            on_update: None,
            enforced: None,
        }
    }
}

impl fmt::Display for ForeignKeyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "REFERENCES {}", self.table)?;
        if !self.columns.is_empty() {
            write!(f, " ({})", IdentList(&self.columns))?;
        }
        if let Some(match_type) = self.match_type {
            write!(f, " MATCH {}", match_type.as_str())?;
        }
        if let Some(action) = self.on_delete {
            write!(f, " ON DELETE {}", action.as_str())?;
        }
        if let Some(action) = self.on_update {
            write!(f, " ON UPDATE {}", action.as_str())?;
        }
        match self.enforced {
            Some(true) => f.write_str(" ENFORCED"),
            Some(false) => f.write_str(" NOT ENFORCED"),
            None => Ok(()),
        }
    }
}

/// A column definition for CREATE TABLE and ALTER TABLE.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ColumnDef {
    /// Column name.
    pub name: String,
    /// Data type.
    pub data_type: DataType,
    /// Whether the column is nullable. Only NOT NULL clears it.
    pub nullable: bool,
    /// Default value expression.
    pub default: Option<Expr>,
    /// ON UPDATE expression (MySQL auto-update columns).
    pub on_update: Option<Expr>,
    /// Whether this is a primary key.
    pub primary_key: bool,
    /// Whether this column is unique.
    pub unique: bool,
    /// Whether this column auto-increments.
    pub auto_increment: bool,
    /// CHECK constraint expression.
    pub check: Option<Expr>,
    /// Inline foreign key.
    pub references: Option<ForeignKeyRef>,
    /// Column comment.
    pub comment: Option<String>,
}

impl ColumnDef {
    /// Creates a new nullable column definition without constraints.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable: true,
            default: None,
            on_update: None,
            primary_key: false,
            unique: false,
            auto_increment: false,
            check: None,
            references: None,
            comment: None,
        }
    }

    /// Sets the column as NOT NULL.
    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Sets the column as PRIMARY KEY. Nullability is left unchanged.
    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Sets the column as UNIQUE.
    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Sets the column as AUTO_INCREMENT.
    #[must_use]
    pub const fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default(mut self, expr: Expr) -> Self {
        self.default = Some(expr);
        self
    }
}

impl fmt::Display for ColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", Ident(&self.name), self.data_type)?;
        if !self.nullable {
            f.write_str(" NOT NULL")?;
        }
        if let Some(default) = &self.default {
            write!(f, " DEFAULT {default}")?;
        }
        if let Some(on_update) = &self.on_update {
            write!(f, " ON UPDATE {on_update}")?;
        }
        if self.primary_key {
            f.write_str(" PRIMARY KEY")?;
        }
        if self.unique {
            f.write_str(" UNIQUE")?;
        }
        if self.auto_increment {
            f.write_str(" AUTO_INCREMENT")?;
        }
        if let Some(check) = &self.check {
            write!(f, " CHECK ({check})")?;
        }
        if let Some(references) = &self.references {
            write!(f, " {references}")?;
        }
        if let Some(comment) = &self.comment {
            write!(f, " COMMENT {}", Quoted(comment))?;
        }
        Ok(())
    }
}

/// The body of a table-level constraint.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TableConstraintKind {
    /// PRIMARY KEY (cols)
    PrimaryKey(Vec<String>),
    /// UNIQUE (cols)
    Unique(Vec<String>),
    /// FOREIGN KEY (cols) REFERENCES ...
    ForeignKey {
        /// Referencing columns.
        columns: Vec<String>,
        /// The referenced table and options.
        reference: ForeignKeyRef,
    },
    /// CHECK (expr)
    Check(Expr),
}

/// A table-level constraint.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableConstraint {
    /// Constraint name from `CONSTRAINT name`.
    pub name: Option<String>,
    /// The constraint itself.
    pub kind: TableConstraintKind,
}

impl fmt::Display for TableConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "CONSTRAINT {} ", Ident(name))?;
        }
        match &self.kind {
            TableConstraintKind::PrimaryKey(cols) => write!(f, "PRIMARY KEY ({})", IdentList(cols)),
            TableConstraintKind::Unique(cols) => write!(f, "UNIQUE ({})", IdentList(cols)),
            TableConstraintKind::ForeignKey { columns, reference } => {
                write!(f, "FOREIGN KEY ({}) {reference}", IdentList(columns))
            }
            TableConstraintKind::Check(expr) => write!(f, "CHECK ({expr})"),
        }
    }
}
