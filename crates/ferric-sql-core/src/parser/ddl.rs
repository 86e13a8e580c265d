//! DDL statements: CREATE, DROP and ALTER TABLE.

use super::error::{ParseError, Result};
use super::parser::Parser;
use crate::ast::{
    AlterTableAction, AlterTableStatement, ColumnDef, ColumnPosition, CreateIndex,
    CreateProcedure, CreateStatement, CreateTable, CreateTrigger, CreateView, DataType,
    DropBehavior, DropStatement, Expr, ForeignKeyRef, IndexColumn, IndexTarget, MatchType,
    ObjectType, OrderDirection, ParameterMode, PartitionDef, PartitionMethod, PartitionSpec,
    PartitionValues, ProcedureParameter, ReferentialAction, Statement, TableConstraint,
    TableConstraintKind, TableOptions, TriggerBody, TriggerEvent, TriggerTiming, TypeName,
};
use crate::lexer::{Keyword, Token};

/// Stores a table option, rejecting a second occurrence.
fn set_option<T>(slot: &mut Option<T>, value: T, key: &str, token: &Token) -> Result<()> {
    if slot.is_some() {
        return Err(ParseError::structural(
            format!("Duplicate table option {key}"),
            token,
        ));
    }
    *slot = Some(value);
    Ok(())
}

impl Parser<'_> {
    /// Parses a CREATE statement.
    pub(super) fn parse_create(&mut self) -> Result<CreateStatement> {
        self.expect_keyword(Keyword::Create)?;
        let or_replace = if self.match_keyword(Keyword::Or)? {
            self.expect_word("REPLACE")?;
            true
        } else {
            false
        };
        let unique = self.match_keyword(Keyword::Unique)?;

        let token = self.current.clone();
        let object = match token.as_keyword() {
            Some(Keyword::Table) => Some(ObjectType::Table),
            Some(Keyword::Index) => Some(ObjectType::Index),
            Some(Keyword::View) => Some(ObjectType::View),
            _ if token.is_word("TRIGGER") => Some(ObjectType::Trigger),
            _ if token.is_word("PROCEDURE") => Some(ObjectType::Procedure),
            _ => None,
        };
        let Some(object) = object else {
            return Err(ParseError::unknown(
                format!("Unsupported CREATE object type: {}", token.text),
                &token,
            ));
        };
        if or_replace && object != ObjectType::View {
            return Err(ParseError::structural(
                format!("OR REPLACE is not supported for CREATE {}", object.as_str()),
                &token,
            ));
        }
        if unique && object != ObjectType::Index {
            return Err(ParseError::structural(
                format!("UNIQUE is not supported for CREATE {}", object.as_str()),
                &token,
            ));
        }
        self.advance()?;

        Ok(match object {
            ObjectType::Table => CreateStatement::Table(self.parse_create_table()?),
            ObjectType::Index => CreateStatement::Index(self.parse_create_index(unique)?),
            ObjectType::View => CreateStatement::View(self.parse_create_view(or_replace)?),
            ObjectType::Trigger => CreateStatement::Trigger(self.parse_create_trigger()?),
            ObjectType::Procedure => CreateStatement::Procedure(self.parse_create_procedure()?),
        })
    }

    /// Parses an optional `IF NOT EXISTS`.
    fn parse_if_not_exists(&mut self) -> Result<bool> {
        if self.match_keyword(Keyword::If)? {
            self.expect_keyword(Keyword::Not)?;
            self.expect_keyword(Keyword::Exists)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn parse_create_table(&mut self) -> Result<CreateTable> {
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.parse_object_name()?;

        self.expect_op("(")?;
        let mut columns = vec![];
        let mut constraints = vec![];
        loop {
            if self.starts_table_constraint() {
                constraints.push(self.parse_table_constraint()?);
            } else if self.check_identifier() {
                columns.push(self.parse_column_def()?);
            } else {
                return Err(ParseError::unexpected(
                    "column definition or table constraint",
                    &self.current,
                ));
            }
            if !self.match_op(",")? {
                break;
            }
        }
        self.expect_op(")")?;

        if columns.is_empty() {
            return Err(ParseError::structural(
                "CREATE TABLE requires at least one column",
                &self.previous,
            ));
        }

        let options = self.parse_table_options()?;
        let partition = if self.match_keyword(Keyword::Partition)? {
            Some(self.parse_partition_spec()?)
        } else {
            None
        };

        Ok(CreateTable {
            name,
            if_not_exists,
            columns,
            constraints,
            options,
            partition,
        })
    }

    fn starts_table_constraint(&self) -> bool {
        matches!(
            self.current.as_keyword(),
            Some(
                Keyword::Constraint
                    | Keyword::Primary
                    | Keyword::Foreign
                    | Keyword::Unique
                    | Keyword::Check
            )
        )
    }

    /// Parses `name type [constraint]*`.
    fn parse_column_def(&mut self) -> Result<ColumnDef> {
        let name = self.expect_identifier()?;
        let data_type = self.parse_data_type()?;
        let mut column = ColumnDef::new(name, data_type);

        loop {
            match self.current.as_keyword() {
                Some(Keyword::Not) => {
                    self.advance()?;
                    self.expect_keyword(Keyword::Null)?;
                    column.nullable = false;
                }
                Some(Keyword::Null) => {
                    self.advance()?;
                    column.nullable = true;
                }
                Some(Keyword::Default) => {
                    self.advance()?;
                    column.default = Some(self.parse_expression()?);
                }
                Some(Keyword::Primary) => {
                    self.advance()?;
                    self.expect_keyword(Keyword::Key)?;
                    column.primary_key = true;
                }
                Some(Keyword::Unique) => {
                    self.advance()?;
                    self.match_keyword(Keyword::Key)?;
                    column.unique = true;
                }
                Some(Keyword::Check) => {
                    self.advance()?;
                    column.check = Some(self.parse_paren_expression()?);
                }
                Some(Keyword::References) => {
                    column.references = Some(self.parse_foreign_key_ref()?);
                }
                Some(Keyword::On) if self.peek(1)?.as_keyword() == Some(Keyword::Update) => {
                    self.advance()?;
                    self.advance()?;
                    column.on_update = Some(self.parse_expression()?);
                }
                _ if self.check_word("AUTO_INCREMENT") => {
                    self.advance()?;
                    column.auto_increment = true;
                }
                _ if self.check_word("COMMENT") => {
                    self.advance()?;
                    column.comment = Some(self.expect_string()?);
                }
                // AFTER is the ALTER TABLE position, not a constraint
                _ if self.check_identifier() && !self.check_word("AFTER") => {
                    return Err(ParseError::unknown(
                        format!("Unknown column constraint: {}", self.current.text),
                        &self.current,
                    ));
                }
                _ => break,
            }
        }

        Ok(column)
    }

    /// Parses `( expr )`.
    fn parse_paren_expression(&mut self) -> Result<Expr> {
        self.expect_op("(")?;
        let expr = self.parse_expression()?;
        self.expect_op(")")?;
        Ok(expr)
    }

    /// Parses `REFERENCES table [(cols)]` and its MATCH, ON DELETE, ON UPDATE
    /// and ENFORCED options in any order.
    fn parse_foreign_key_ref(&mut self) -> Result<ForeignKeyRef> {
        self.expect_keyword(Keyword::References)?;
        let table = self.parse_object_name()?;
        let columns = if self.check_op("(") {
            self.parse_paren_identifier_list()?
        } else {
            vec![]
        };
        let mut reference = ForeignKeyRef::new(table, columns);

        loop {
            if self.match_word("MATCH")? {
                reference.match_type = Some(if self.match_keyword(Keyword::Full)? {
                    MatchType::Full
                } else if self.match_word("PARTIAL")? {
                    MatchType::Partial
                } else if self.match_word("SIMPLE")? {
                    MatchType::Simple
                } else {
                    return Err(ParseError::unexpected(
                        "FULL, PARTIAL or SIMPLE",
                        &self.current,
                    ));
                });
            } else if self.match_keyword(Keyword::On)? {
                if self.match_keyword(Keyword::Delete)? {
                    let Some(action) = self.parse_referential_action()? else {
                        return Err(ParseError::unexpected("referential action", &self.current));
                    };
                    reference.on_delete = Some(action);
                } else if self.check_keyword(Keyword::Update) {
                    // ON UPDATE <expr> belongs to the column, not the reference
                    let action = self.with_savepoint(|p| {
                        p.advance()?;
                        p.parse_referential_action()
                    })?;
                    if let Some(action) = action {
                        reference.on_update = Some(action);
                    } else {
                        self.backup()?;
                        break;
                    }
                } else {
                    self.backup()?;
                    break;
                }
            } else if self.match_word("ENFORCED")? {
                reference.enforced = Some(true);
            } else if self.check_keyword(Keyword::Not) && self.peek(1)?.is_word("ENFORCED") {
                self.advance()?;
                self.advance()?;
                reference.enforced = Some(false);
            } else {
                break;
            }
        }

        Ok(reference)
    }

    /// Parses RESTRICT, CASCADE, SET NULL, SET DEFAULT or NO ACTION.
    fn parse_referential_action(&mut self) -> Result<Option<ReferentialAction>> {
        let action = if self.match_keyword(Keyword::Restrict)? {
            ReferentialAction::Restrict
        } else if self.match_keyword(Keyword::Cascade)? {
            ReferentialAction::Cascade
        } else if self.match_keyword(Keyword::Set)? {
            if self.match_keyword(Keyword::Null)? {
                ReferentialAction::SetNull
            } else {
                self.expect_keyword(Keyword::Default)?;
                ReferentialAction::SetDefault
            }
        } else if self.match_word("NO")? {
            self.expect_word("ACTION")?;
            ReferentialAction::NoAction
        } else {
            return Ok(None);
        };
        Ok(Some(action))
    }

    /// Parses `[CONSTRAINT name] {PRIMARY KEY | UNIQUE | FOREIGN KEY | CHECK} ...`.
    fn parse_table_constraint(&mut self) -> Result<TableConstraint> {
        let name = if self.match_keyword(Keyword::Constraint)? {
            Some(self.expect_identifier()?)
        } else {
            None
        };

        let token = self.current.clone();
        let kind = match token.as_keyword() {
            Some(Keyword::Primary) => {
                self.advance()?;
                self.expect_keyword(Keyword::Key)?;
                TableConstraintKind::PrimaryKey(self.parse_paren_identifier_list()?)
            }
            Some(Keyword::Unique) => {
                self.advance()?;
                self.match_keyword(Keyword::Key)?;
                TableConstraintKind::Unique(self.parse_paren_identifier_list()?)
            }
            Some(Keyword::Foreign) => {
                self.advance()?;
                self.expect_keyword(Keyword::Key)?;
                let columns = self.parse_paren_identifier_list()?;
                let reference = self.parse_foreign_key_ref()?;
                TableConstraintKind::ForeignKey { columns, reference }
            }
            Some(Keyword::Check) => {
                self.advance()?;
                TableConstraintKind::Check(self.parse_paren_expression()?)
            }
            _ => {
                return Err(ParseError::unknown(
                    format!("Unknown table constraint: {}", token.text),
                    &token,
                ));
            }
        };

        Ok(TableConstraint { name, kind })
    }

    /// Parses table options after the column list. Each option may be
    /// followed by `=` and separated by commas.
    fn parse_table_options(&mut self) -> Result<TableOptions> {
        let mut options = TableOptions::default();

        loop {
            let token = self.current.clone();
            let has_default = self.match_keyword(Keyword::Default)?;
            let key = self.current.text.to_ascii_uppercase();
            let recognized = self.check_identifier()
                && !self.current.quoted
                && match key.as_str() {
                    "CHARACTER" | "CHARSET" | "COLLATE" => true,
                    "ENGINE" | "AUTO_INCREMENT" | "COMMENT" | "ROW_FORMAT" | "KEY_BLOCK_SIZE"
                    | "MAX_ROWS" | "MIN_ROWS" | "TABLESPACE" => !has_default,
                    _ => false,
                };
            if !recognized {
                if has_default {
                    return Err(ParseError::unexpected("CHARACTER SET or COLLATE", &self.current));
                }
                break;
            }

            self.advance()?;
            if key == "CHARACTER" {
                self.expect_keyword(Keyword::Set)?;
            }
            self.match_op("=")?;

            match key.as_str() {
                "ENGINE" => set_option(&mut options.engine, self.expect_name()?, &key, &token)?,
                "AUTO_INCREMENT" => {
                    set_option(&mut options.auto_increment, self.expect_u64()?, &key, &token)?;
                }
                "CHARACTER" | "CHARSET" => {
                    set_option(&mut options.charset, self.expect_name()?, "CHARSET", &token)?;
                }
                "COLLATE" => set_option(&mut options.collate, self.expect_name()?, &key, &token)?,
                "COMMENT" => set_option(&mut options.comment, self.expect_string()?, &key, &token)?,
                "ROW_FORMAT" => {
                    set_option(&mut options.row_format, self.expect_name()?, &key, &token)?;
                }
                "KEY_BLOCK_SIZE" => {
                    set_option(&mut options.key_block_size, self.expect_u64()?, &key, &token)?;
                }
                "MAX_ROWS" => set_option(&mut options.max_rows, self.expect_u64()?, &key, &token)?,
                "MIN_ROWS" => set_option(&mut options.min_rows, self.expect_u64()?, &key, &token)?,
                _ => set_option(&mut options.tablespace, self.expect_name()?, &key, &token)?,
            }

            self.match_op(",")?;
        }

        Ok(options)
    }

    /// Parses the rest of `PARTITION BY ...`.
    fn parse_partition_spec(&mut self) -> Result<PartitionSpec> {
        self.expect_keyword(Keyword::By)?;

        let method = if self.match_word("HASH")? {
            PartitionMethod::Hash(self.parse_paren_expression()?)
        } else if self.match_keyword(Keyword::Key)? {
            PartitionMethod::Key(self.parse_paren_identifier_list()?)
        } else if self.match_keyword(Keyword::Range)? {
            PartitionMethod::Range(self.parse_paren_expression()?)
        } else if self.match_word("LIST")? {
            PartitionMethod::List(self.parse_paren_expression()?)
        } else {
            return Err(ParseError::unexpected(
                "HASH, KEY, RANGE or LIST",
                &self.current,
            ));
        };

        let partitions = if self.match_word("PARTITIONS")? {
            Some(self.expect_u64()?)
        } else {
            None
        };

        let mut definitions = vec![];
        if self.match_op("(")? {
            loop {
                definitions.push(self.parse_partition_def()?);
                if !self.match_op(",")? {
                    break;
                }
            }
            self.expect_op(")")?;
        }

        Ok(PartitionSpec {
            method,
            partitions,
            definitions,
        })
    }

    fn parse_partition_def(&mut self) -> Result<PartitionDef> {
        self.expect_keyword(Keyword::Partition)?;
        let name = self.expect_identifier()?;
        self.expect_keyword(Keyword::Values)?;

        let values = if self.match_word("LESS")? {
            self.expect_word("THAN")?;
            self.expect_op("(")?;
            let bound = if self.match_word("MAXVALUE")? {
                None
            } else {
                Some(self.parse_expression()?)
            };
            self.expect_op(")")?;
            PartitionValues::LessThan(bound)
        } else if self.match_keyword(Keyword::In)? {
            self.expect_op("(")?;
            let values = self.parse_expression_list()?;
            self.expect_op(")")?;
            PartitionValues::In(values)
        } else {
            return Err(ParseError::unexpected("LESS THAN or IN", &self.current));
        };

        Ok(PartitionDef { name, values })
    }

    fn parse_create_index(&mut self, unique: bool) -> Result<CreateIndex> {
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.expect_identifier()?;
        self.expect_keyword(Keyword::On)?;
        let table = self.parse_object_name()?;

        self.expect_op("(")?;
        let mut columns = vec![self.parse_index_column()?];
        while self.match_op(",")? {
            columns.push(self.parse_index_column()?);
        }
        self.expect_op(")")?;

        let using = if self.match_keyword(Keyword::Using)? {
            Some(self.expect_identifier()?)
        } else {
            None
        };

        Ok(CreateIndex {
            name,
            unique,
            if_not_exists,
            table,
            columns,
            using,
        })
    }

    /// Parses `col [(len)] [ASC|DESC]` or `(expr) [ASC|DESC]`.
    fn parse_index_column(&mut self) -> Result<IndexColumn> {
        let target = if self.check_op("(") {
            IndexTarget::Expr(self.parse_paren_expression()?)
        } else {
            let name = self.expect_identifier()?;
            let length = if self.match_op("(")? {
                let length = self.expect_u32()?;
                self.expect_op(")")?;
                Some(length)
            } else {
                None
            };
            IndexTarget::Column { name, length }
        };

        let direction = if self.match_keyword(Keyword::Desc)? {
            OrderDirection::Desc
        } else {
            self.match_keyword(Keyword::Asc)?;
            OrderDirection::Asc
        };

        Ok(IndexColumn { target, direction })
    }

    fn parse_create_view(&mut self, or_replace: bool) -> Result<CreateView> {
        let name = self.parse_object_name()?;
        let columns = if self.check_op("(") {
            self.parse_paren_identifier_list()?
        } else {
            vec![]
        };
        self.expect_keyword(Keyword::As)?;
        let query = self.parse_select()?;

        let with_check_option = if self.match_word("WITH")? {
            self.expect_keyword(Keyword::Check)?;
            self.expect_word("OPTION")?;
            true
        } else {
            false
        };

        Ok(CreateView {
            name,
            or_replace,
            columns,
            query: Box::new(query),
            with_check_option,
        })
    }

    fn parse_create_trigger(&mut self) -> Result<CreateTrigger> {
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.parse_object_name()?;

        let timing = if self.match_word("BEFORE")? {
            TriggerTiming::Before
        } else if self.match_word("AFTER")? {
            TriggerTiming::After
        } else if self.match_word("INSTEAD")? {
            self.expect_word("OF")?;
            TriggerTiming::InsteadOf
        } else {
            return Err(ParseError::unexpected(
                "BEFORE, AFTER or INSTEAD OF",
                &self.current,
            ));
        };

        let event = if self.match_keyword(Keyword::Insert)? {
            TriggerEvent::Insert
        } else if self.match_keyword(Keyword::Update)? {
            TriggerEvent::Update
        } else if self.match_keyword(Keyword::Delete)? {
            TriggerEvent::Delete
        } else {
            return Err(ParseError::unexpected(
                "INSERT, UPDATE or DELETE",
                &self.current,
            ));
        };

        self.expect_keyword(Keyword::On)?;
        let table = self.parse_object_name()?;

        let for_each_row = if self.match_word("FOR")? {
            self.expect_word("EACH")?;
            self.expect_keyword(Keyword::Row)?;
            true
        } else {
            false
        };
        let when = if self.match_keyword(Keyword::When)? {
            Some(self.parse_paren_expression()?)
        } else {
            None
        };

        let body = if self.match_word("BEGIN")? {
            if self.check_keyword(Keyword::End) {
                return Err(ParseError::structural(
                    "Trigger body requires at least one statement",
                    &self.current,
                ));
            }
            TriggerBody::Block(self.parse_statement_block()?)
        } else {
            TriggerBody::Single(Box::new(self.parse_statement()?))
        };

        Ok(CreateTrigger {
            name,
            if_not_exists,
            timing,
            event,
            table,
            for_each_row,
            when,
            body,
        })
    }

    /// Parses a data type with its optional size arguments and character
    /// set or collation suffixes.
    pub(super) fn parse_data_type(&mut self) -> Result<DataType> {
        if !self.check_identifier() {
            return Err(ParseError::unexpected("data type", &self.current));
        }
        let token = self.current.clone();
        let Some(name) = TypeName::lookup(&token.text) else {
            return Err(ParseError::unknown(
                format!("Unknown data type: {}", token.text),
                &token,
            ));
        };
        self.advance()?;

        let mut data_type = DataType::new(name);
        match name {
            TypeName::Decimal | TypeName::Numeric | TypeName::Float => {
                if self.match_op("(")? {
                    data_type.precision = Some(self.expect_u32()?);
                    if name != TypeName::Float && self.match_op(",")? {
                        data_type.scale = Some(self.expect_u32()?);
                    }
                    self.expect_op(")")?;
                }
            }
            TypeName::Double => {
                self.match_word("PRECISION")?;
            }
            TypeName::Varchar => {
                if !self.check_op("(") {
                    return Err(ParseError::structural("VARCHAR requires a length", &token));
                }
                data_type.length = Some(self.parse_type_length()?);
            }
            TypeName::Char | TypeName::Integer | TypeName::Bigint | TypeName::Smallint => {
                if self.check_op("(") {
                    data_type.length = Some(self.parse_type_length()?);
                }
            }
            _ => {}
        }

        loop {
            if self.match_word("CHARACTER")? {
                self.expect_keyword(Keyword::Set)?;
                data_type.charset = Some(self.expect_name()?);
            } else if self.match_word("CHARSET")? {
                data_type.charset = Some(self.expect_name()?);
            } else if self.match_word("COLLATE")? {
                data_type.collation = Some(self.expect_name()?);
            } else {
                break;
            }
        }

        Ok(data_type)
    }

    fn parse_type_length(&mut self) -> Result<u32> {
        self.expect_op("(")?;
        let length = self.expect_u32()?;
        self.expect_op(")")?;
        Ok(length)
    }

    /// Parses `stmt; ... END` after BEGIN. Each statement ends with `;`.
    fn parse_statement_block(&mut self) -> Result<Vec<Statement>> {
        let mut statements = vec![];
        while !self.check_keyword(Keyword::End) {
            statements.push(self.parse_statement()?);
            self.expect_op(";")?;
        }
        self.expect_keyword(Keyword::End)?;
        Ok(statements)
    }

    /// Parses `name ( [[IN|OUT|INOUT] param type, ...] ) BEGIN ... END`.
    fn parse_create_procedure(&mut self) -> Result<CreateProcedure> {
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.parse_object_name()?;

        self.expect_op("(")?;
        let mut parameters = vec![];
        if !self.check_op(")") {
            loop {
                parameters.push(self.parse_procedure_parameter()?);
                if !self.match_op(",")? {
                    break;
                }
            }
        }
        self.expect_op(")")?;

        self.expect_word("BEGIN")?;
        let body = self.parse_statement_block()?;

        Ok(CreateProcedure {
            name,
            if_not_exists,
            parameters,
            body,
        })
    }

    fn parse_procedure_parameter(&mut self) -> Result<ProcedureParameter> {
        let mode = if self.match_keyword(Keyword::In)? {
            Some(ParameterMode::In)
        } else if self.match_word("OUT")? {
            Some(ParameterMode::Out)
        } else if self.match_word("INOUT")? {
            Some(ParameterMode::InOut)
        } else {
            None
        };
        let name = self.expect_identifier()?;
        let data_type = self.parse_data_type()?;
        Ok(ProcedureParameter {
            mode,
            name,
            data_type,
        })
    }

    /// Parses a DROP statement.
    pub(super) fn parse_drop(&mut self) -> Result<DropStatement> {
        self.expect_keyword(Keyword::Drop)?;

        let token = self.current.clone();
        let object_type = match token.as_keyword() {
            Some(Keyword::Table) => ObjectType::Table,
            Some(Keyword::Index) => ObjectType::Index,
            Some(Keyword::View) => ObjectType::View,
            _ if token.is_word("TRIGGER") => ObjectType::Trigger,
            _ if token.is_word("PROCEDURE") => ObjectType::Procedure,
            _ => {
                return Err(ParseError::unknown(
                    format!("Unsupported DROP object type: {}", token.text),
                    &token,
                ));
            }
        };
        self.advance()?;

        let if_exists = if self.match_keyword(Keyword::If)? {
            self.expect_keyword(Keyword::Exists)?;
            true
        } else {
            false
        };

        let mut names = vec![self.parse_object_name()?];
        while self.match_op(",")? {
            names.push(self.parse_object_name()?);
        }

        let behavior = if self.match_keyword(Keyword::Cascade)? {
            Some(DropBehavior::Cascade)
        } else if self.match_keyword(Keyword::Restrict)? {
            Some(DropBehavior::Restrict)
        } else {
            None
        };

        Ok(DropStatement {
            object_type,
            if_exists,
            names,
            behavior,
        })
    }

    /// Parses an ALTER TABLE statement.
    pub(super) fn parse_alter(&mut self) -> Result<AlterTableStatement> {
        self.expect_keyword(Keyword::Alter)?;
        self.expect_keyword(Keyword::Table)?;
        let name = self.parse_object_name()?;

        let mut actions = vec![self.parse_alter_action()?];
        while self.match_op(",")? {
            actions.push(self.parse_alter_action()?);
        }

        Ok(AlterTableStatement { name, actions })
    }

    fn parse_alter_action(&mut self) -> Result<AlterTableAction> {
        if self.match_word("ADD")? {
            if self.starts_table_constraint() {
                return Ok(AlterTableAction::AddConstraint(
                    self.parse_table_constraint()?,
                ));
            }
            self.match_word("COLUMN")?;
            let column = self.parse_column_def()?;
            let position = if self.match_keyword(Keyword::First)? {
                Some(ColumnPosition::First)
            } else if self.match_word("AFTER")? {
                Some(ColumnPosition::After(self.expect_identifier()?))
            } else {
                None
            };
            return Ok(AlterTableAction::AddColumn { column, position });
        }

        if self.match_keyword(Keyword::Drop)? {
            if self.match_keyword(Keyword::Constraint)? {
                return Ok(AlterTableAction::DropConstraint(self.expect_identifier()?));
            }
            self.match_word("COLUMN")?;
            return Ok(AlterTableAction::DropColumn(self.expect_identifier()?));
        }

        if self.match_word("MODIFY")? {
            self.match_word("COLUMN")?;
            return Ok(AlterTableAction::ModifyColumn(self.parse_column_def()?));
        }

        if self.match_word("RENAME")? {
            if self.match_word("COLUMN")? {
                let from = self.expect_identifier()?;
                self.expect_word("TO")?;
                let to = self.expect_identifier()?;
                return Ok(AlterTableAction::RenameColumn { from, to });
            }
            if !self.match_word("TO")? {
                self.match_keyword(Keyword::As)?;
            }
            return Ok(AlterTableAction::RenameTable(self.parse_object_name()?));
        }

        Err(ParseError::unknown(
            format!("Unknown ALTER TABLE action: {}", self.current.text),
            &self.current,
        ))
    }
}
