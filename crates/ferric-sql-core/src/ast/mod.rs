//! Abstract Syntax Tree (AST) types for SQL statements.
//!
//! Every node implements [`core::fmt::Display`], rendering canonical SQL
//! that parses back into an equal tree.

mod ddl;
mod expression;
mod render;
mod statement;
mod types;
mod window;

pub use ddl::{
    AlterTableAction, AlterTableStatement, ColumnPosition, CreateIndex, CreateProcedure,
    CreateStatement, CreateTable, CreateTrigger, CreateView, DropBehavior, DropStatement,
    IndexColumn, IndexTarget, ObjectType, ParameterMode, PartitionDef, PartitionMethod,
    PartitionSpec, PartitionValues, ProcedureParameter, TableOptions, TriggerBody, TriggerEvent,
    TriggerTiming,
};
pub use expression::{BinaryOp, ColumnRef, Expr, FunctionCall, Literal, LiteralKind, UnaryOp};
pub use statement::{
    Assignment, DeleteStatement, GrantStatement, GroupBy, InsertSource, InsertStatement, Join,
    JoinCondition, JoinType, MergeAction, MergeClause, MergeStatement, NullOrdering, ObjectName,
    OrderByItem, OrderDirection, Privilege, Privileges, RevokeStatement, SelectItem,
    SelectStatement, Statement, TableRef, TruncateStatement, UpdateStatement,
};
pub use types::{
    ColumnDef, DataType, ForeignKeyRef, MatchType, ReferentialAction, TableConstraint,
    TableConstraintKind, TypeName,
};
pub use window::{FrameBound, FrameExclusion, FrameUnits, WindowFrame, WindowSpec};
