//! Tests for CREATE, DROP and ALTER TABLE.

mod common;
use common::*;

use ferric_sql_core::ast::{
    AlterTableAction, ColumnPosition, CreateStatement, DropBehavior, IndexTarget, MatchType,
    ObjectType, OrderDirection, ParameterMode, PartitionMethod, PartitionValues,
    ReferentialAction, Statement, TableConstraintKind, TriggerBody, TriggerEvent, TriggerTiming,
    TypeName,
};
use ferric_sql_core::ParseErrorKind;

fn create_table(sql: &str) -> ferric_sql_core::ast::CreateTable {
    match parse_create(sql) {
        CreateStatement::Table(table) => table,
        other => panic!("Expected CREATE TABLE, got {other:?}"),
    }
}

#[test]
fn create_table_basic_columns() {
    let table = create_table("CREATE TABLE t (id INT PRIMARY KEY, name VARCHAR(50) NOT NULL)");
    assert_eq!(table.name.name, "t");
    assert_eq!(table.columns.len(), 2);

    let id = &table.columns[0];
    assert_eq!(id.name, "id");
    assert_eq!(id.data_type.name, TypeName::Integer);
    assert!(id.primary_key);
    assert!(id.nullable);

    let name = &table.columns[1];
    assert_eq!(name.data_type.name, TypeName::Varchar);
    assert_eq!(name.data_type.length, Some(50));
    assert!(!name.nullable);

    assert_eq!(
        round_trip("CREATE TABLE t (id INT PRIMARY KEY, name VARCHAR(50) NOT NULL)"),
        "CREATE TABLE t (id INTEGER PRIMARY KEY, name VARCHAR(50) NOT NULL)"
    );
}

#[test]
fn create_table_if_not_exists_with_schema() {
    let table = create_table("CREATE TABLE IF NOT EXISTS app.users (id BIGINT)");
    assert!(table.if_not_exists);
    assert_eq!(table.name.schema.as_deref(), Some("app"));
    round_trip("CREATE TABLE IF NOT EXISTS app.users (id BIGINT)");
}

#[test]
fn column_constraints() {
    let sql = "CREATE TABLE t (\
               id INT NOT NULL AUTO_INCREMENT PRIMARY KEY, \
               email VARCHAR(255) UNIQUE KEY, \
               age INT DEFAULT 18 CHECK (age >= 0), \
               bio TEXT NULL COMMENT 'about me', \
               updated TIMESTAMP DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP)";
    let table = create_table(sql);
    let [id, email, age, bio, updated] = &table.columns[..] else {
        panic!("Expected five columns");
    };
    assert!(!id.nullable && id.auto_increment && id.primary_key);
    assert!(email.unique);
    assert!(age.default.is_some() && age.check.is_some());
    assert!(bio.nullable);
    assert_eq!(bio.comment.as_deref(), Some("about me"));
    assert!(updated.default.is_some() && updated.on_update.is_some());
    round_trip(sql);
}

#[test]
fn inline_foreign_key_reference() {
    let sql = "CREATE TABLE orders (user_id INT REFERENCES users (id) MATCH FULL \
               ON DELETE CASCADE ON UPDATE NO ACTION ENFORCED)";
    let table = create_table(sql);
    let reference = table.columns[0].references.as_ref().unwrap();
    assert_eq!(reference.table.name, "users");
    assert_eq!(reference.columns, vec!["id"]);
    assert_eq!(reference.match_type, Some(MatchType::Full));
    assert_eq!(reference.on_delete, Some(ReferentialAction::Cascade));
    assert_eq!(reference.on_update, Some(ReferentialAction::NoAction));
    assert_eq!(reference.enforced, Some(true));
    assert_eq!(round_trip(sql), sql.replace("INT ", "INTEGER "));
}

#[test]
fn on_update_expression_after_reference_goes_to_column() {
    let table = create_table(
        "CREATE TABLE t (ts TIMESTAMP REFERENCES h (ts) ON DELETE SET DEFAULT ON UPDATE now())",
    );
    let column = &table.columns[0];
    let reference = column.references.as_ref().unwrap();
    assert_eq!(reference.on_delete, Some(ReferentialAction::SetDefault));
    assert_eq!(reference.on_update, None);
    assert!(matches!(column.on_update, Some(ferric_sql_core::Expr::Function(_))));
}

#[test]
fn table_constraints() {
    let sql = "CREATE TABLE t (a INT, b INT, \
               CONSTRAINT pk PRIMARY KEY (a, b), \
               UNIQUE (b), \
               FOREIGN KEY (b) REFERENCES other (id) ON DELETE SET NULL, \
               CHECK (a > b))";
    let table = create_table(sql);
    assert_eq!(table.columns.len(), 2);
    assert_eq!(table.constraints.len(), 4);
    assert_eq!(table.constraints[0].name.as_deref(), Some("pk"));
    assert!(matches!(
        &table.constraints[0].kind,
        TableConstraintKind::PrimaryKey(cols) if cols == &["a", "b"]
    ));
    assert!(matches!(&table.constraints[1].kind, TableConstraintKind::Unique(_)));
    assert!(matches!(
        &table.constraints[2].kind,
        TableConstraintKind::ForeignKey { reference, .. }
            if reference.on_delete == Some(ReferentialAction::SetNull)
    ));
    assert!(matches!(&table.constraints[3].kind, TableConstraintKind::Check(_)));
    round_trip(sql);
}

#[test]
fn table_options() {
    let table = create_table(
        "CREATE TABLE t (a INT) ENGINE=InnoDB AUTO_INCREMENT=100 DEFAULT CHARSET=utf8mb4 \
         COLLATE utf8mb4_unicode_ci, COMMENT='log table' ROW_FORMAT=DYNAMIC",
    );
    let options = &table.options;
    assert_eq!(options.engine.as_deref(), Some("InnoDB"));
    assert_eq!(options.auto_increment, Some(100));
    assert_eq!(options.charset.as_deref(), Some("utf8mb4"));
    assert_eq!(options.collate.as_deref(), Some("utf8mb4_unicode_ci"));
    assert_eq!(options.comment.as_deref(), Some("log table"));
    assert_eq!(options.row_format.as_deref(), Some("DYNAMIC"));
    assert_eq!(
        round_trip("CREATE TABLE t (a INT) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COMMENT 'x'"),
        "CREATE TABLE t (a INTEGER) ENGINE = InnoDB CHARACTER SET = utf8mb4 COMMENT = 'x'"
    );
}

#[test]
fn numeric_table_options() {
    let table = create_table(
        "CREATE TABLE t (a INT) KEY_BLOCK_SIZE 8 MAX_ROWS = 1000 MIN_ROWS = 10 TABLESPACE ts1",
    );
    assert_eq!(table.options.key_block_size, Some(8));
    assert_eq!(table.options.max_rows, Some(1000));
    assert_eq!(table.options.min_rows, Some(10));
    assert_eq!(table.options.tablespace.as_deref(), Some("ts1"));
}

#[test]
fn duplicate_table_option() {
    let err = parse_err("CREATE TABLE t (a INT) CHARSET = a CHARACTER SET = b");
    assert_eq!(err.kind, ParseErrorKind::Structural);
    assert_eq!(err.message, "Duplicate table option CHARSET");
}

#[test]
fn partition_by_range() {
    let sql = "CREATE TABLE sales (id INT, yr INT) PARTITION BY RANGE (yr) (\
               PARTITION p0 VALUES LESS THAN (2000), \
               PARTITION p1 VALUES LESS THAN (MAXVALUE))";
    let partition = create_table(sql).partition.unwrap();
    assert!(matches!(partition.method, PartitionMethod::Range(_)));
    assert_eq!(partition.definitions.len(), 2);
    assert_eq!(partition.definitions[1].values, PartitionValues::LessThan(None));
    round_trip(sql);
}

#[test]
fn partition_by_hash_with_count() {
    let partition = create_table("CREATE TABLE t (id INT) PARTITION BY HASH (id) PARTITIONS 4")
        .partition
        .unwrap();
    assert_eq!(partition.partitions, Some(4));
    assert!(partition.definitions.is_empty());
    round_trip("CREATE TABLE t (id INT) PARTITION BY KEY (id) PARTITIONS 8");
    round_trip(
        "CREATE TABLE t (r INT) PARTITION BY LIST (r) (PARTITION a VALUES IN (1, 2), PARTITION b VALUES IN (3))",
    );
}

#[test]
fn create_table_errors() {
    let err = parse_err("CREATE TABLE t (PRIMARY KEY (a))");
    assert_eq!(err.message, "CREATE TABLE requires at least one column");

    let err = parse_err("CREATE TABLE t (a INT, 42)");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);

    let err = parse_err("CREATE OR REPLACE TABLE t (a INT)");
    assert_eq!(err.message, "OR REPLACE is not supported for CREATE TABLE");

    let err = parse_err("CREATE UNIQUE VIEW v AS SELECT a FROM t");
    assert_eq!(err.message, "UNIQUE is not supported for CREATE VIEW");

    let err = parse_err("CREATE FUNCTION f () RETURNS INT RETURN 1");
    assert_eq!(err.kind, ParseErrorKind::UnknownConstruct);
    assert_eq!(err.message, "Unsupported CREATE object type: FUNCTION");
}

#[test]
fn create_index() {
    let CreateStatement::Index(index) =
        parse_create("CREATE UNIQUE INDEX IF NOT EXISTS idx_email ON users (email(20), (lower(name)) DESC) USING btree")
    else {
        panic!("Expected CREATE INDEX");
    };
    assert!(index.unique);
    assert!(index.if_not_exists);
    assert_eq!(index.name, "idx_email");
    assert!(matches!(
        &index.columns[0].target,
        IndexTarget::Column { name, length: Some(20) } if name == "email"
    ));
    assert!(matches!(index.columns[1].target, IndexTarget::Expr(_)));
    assert_eq!(index.columns[1].direction, OrderDirection::Desc);
    assert_eq!(index.using.as_deref(), Some("btree"));
    round_trip(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_email ON users (email(20), (lower(name)) DESC) USING btree",
    );
}

#[test]
fn create_view() {
    let sql = "CREATE OR REPLACE VIEW active (id, name) AS SELECT id, name FROM users WHERE active = TRUE WITH CHECK OPTION";
    let CreateStatement::View(view) = parse_create(sql) else {
        panic!("Expected CREATE VIEW");
    };
    assert!(view.or_replace);
    assert_eq!(view.columns, vec!["id", "name"]);
    assert!(view.with_check_option);
    assert_eq!(round_trip(sql), sql);
}

#[test]
fn create_trigger_single_statement() {
    let sql = "CREATE TRIGGER audit BEFORE UPDATE ON accounts FOR EACH ROW \
               WHEN (balance < 0) INSERT INTO alerts (msg) VALUES ('negative')";
    let CreateStatement::Trigger(trigger) = parse_create(sql) else {
        panic!("Expected CREATE TRIGGER");
    };
    assert_eq!(trigger.timing, TriggerTiming::Before);
    assert_eq!(trigger.event, TriggerEvent::Update);
    assert!(trigger.when.is_some());
    assert!(matches!(&trigger.body, TriggerBody::Single(stmt) if matches!(**stmt, Statement::Insert(_))));
    round_trip(sql);
}

#[test]
fn create_trigger_block() {
    let sql = "CREATE TRIGGER cleanup INSTEAD OF DELETE ON v BEGIN DELETE FROM a; DELETE FROM b; END";
    let CreateStatement::Trigger(trigger) = parse_create(sql) else {
        panic!("Expected CREATE TRIGGER");
    };
    assert_eq!(trigger.timing, TriggerTiming::InsteadOf);
    assert!(!trigger.for_each_row);
    assert!(matches!(&trigger.body, TriggerBody::Block(stmts) if stmts.len() == 2));
    assert_eq!(round_trip(sql), sql);

    let err = parse_err("CREATE TRIGGER t AFTER INSERT ON x BEGIN END");
    assert_eq!(err.message, "Trigger body requires at least one statement");
}

#[test]
fn drop_statements() {
    let Statement::Drop(drop) = parse("DROP TABLE IF EXISTS a, s.b CASCADE") else {
        panic!("Expected DROP");
    };
    assert_eq!(drop.object_type, ObjectType::Table);
    assert!(drop.if_exists);
    assert_eq!(drop.names.len(), 2);
    assert_eq!(drop.behavior, Some(DropBehavior::Cascade));
    assert_eq!(
        round_trip("drop table if exists a, s.b cascade"),
        "DROP TABLE IF EXISTS a, s.b CASCADE"
    );

    round_trip("DROP INDEX idx RESTRICT");
    round_trip("DROP VIEW v");
    round_trip("DROP TRIGGER trg");

    let err = parse_err("DROP SEQUENCE s");
    assert_eq!(err.kind, ParseErrorKind::UnknownConstruct);
    assert_eq!(err.message, "Unsupported DROP object type: SEQUENCE");
}

#[test]
fn alter_table_actions() {
    let sql = "ALTER TABLE t ADD COLUMN a INT NOT NULL AFTER id, ADD c TEXT FIRST, \
               ADD CONSTRAINT uq UNIQUE (a), DROP COLUMN b, DROP CONSTRAINT old_fk, \
               MODIFY price DECIMAL(10, 2), RENAME COLUMN x TO y, RENAME AS t2";
    let Statement::AlterTable(alter) = parse(sql) else {
        panic!("Expected ALTER TABLE");
    };
    assert_eq!(alter.actions.len(), 8);
    assert!(matches!(
        &alter.actions[0],
        AlterTableAction::AddColumn { position: Some(ColumnPosition::After(after)), .. } if after == "id"
    ));
    assert!(matches!(
        &alter.actions[1],
        AlterTableAction::AddColumn { position: Some(ColumnPosition::First), .. }
    ));
    assert!(matches!(&alter.actions[2], AlterTableAction::AddConstraint(_)));
    assert!(matches!(&alter.actions[4], AlterTableAction::DropConstraint(n) if n == "old_fk"));
    assert!(matches!(&alter.actions[5], AlterTableAction::ModifyColumn(c) if c.name == "price"));
    assert!(matches!(&alter.actions[6], AlterTableAction::RenameColumn { from, to } if from == "x" && to == "y"));
    assert!(matches!(&alter.actions[7], AlterTableAction::RenameTable(n) if n.name == "t2"));
    assert_eq!(
        round_trip(sql),
        "ALTER TABLE t ADD COLUMN a INTEGER NOT NULL AFTER id, ADD COLUMN c TEXT FIRST, \
         ADD CONSTRAINT uq UNIQUE (a), DROP COLUMN b, DROP CONSTRAINT old_fk, \
         MODIFY COLUMN price DECIMAL(10, 2), RENAME COLUMN x TO y, RENAME TO t2"
    );
}

#[test]
fn unknown_alter_action() {
    let err = parse_err("ALTER TABLE t EXPLODE");
    assert_eq!(err.kind, ParseErrorKind::UnknownConstruct);
    assert_eq!(err.message, "Unknown ALTER TABLE action: EXPLODE");
}

#[test]
fn unknown_column_constraint() {
    let err = parse_err("CREATE TABLE t (a INT FOOBAR, b INT)");
    assert_eq!(err.kind, ParseErrorKind::UnknownConstruct);
    assert_eq!(err.message, "Unknown column constraint: FOOBAR");
    assert_eq!((err.line, err.column), (1, 23));

    let err = parse_err("CREATE TABLE t (a INT NOT NULL zerofill)");
    assert_eq!(err.message, "Unknown column constraint: zerofill");

    let err = parse_err("ALTER TABLE t MODIFY COLUMN a INT FOOBAR");
    assert_eq!(err.kind, ParseErrorKind::UnknownConstruct);
}

#[test]
fn create_procedure() {
    let sql = "CREATE PROCEDURE calculate_stats(IN start_date DATE, OUT total_count INT, note TEXT) \
               BEGIN DELETE FROM stats WHERE day < start_date; \
               INSERT INTO stats (day) VALUES (start_date); END";
    let CreateStatement::Procedure(procedure) = parse_create(sql) else {
        panic!("Expected CREATE PROCEDURE");
    };
    assert_eq!(procedure.name.name, "calculate_stats");
    assert_eq!(procedure.parameters.len(), 3);
    assert_eq!(procedure.parameters[0].name, "start_date");
    assert_eq!(procedure.parameters[0].mode, Some(ParameterMode::In));
    assert_eq!(procedure.parameters[0].data_type.name, TypeName::Date);
    assert_eq!(procedure.parameters[1].mode, Some(ParameterMode::Out));
    assert_eq!(procedure.parameters[2].mode, None);
    assert_eq!(procedure.body.len(), 2);
    assert!(matches!(procedure.body[0], Statement::Delete(_)));
    assert_eq!(
        round_trip(sql),
        "CREATE PROCEDURE calculate_stats (IN start_date DATE, OUT total_count INTEGER, note TEXT) \
         BEGIN DELETE FROM stats WHERE day < start_date; \
         INSERT INTO stats (day) VALUES (start_date); END"
    );
}

#[test]
fn create_procedure_without_parameters_or_statements() {
    assert_eq!(
        round_trip("create procedure if not exists app.noop() begin end"),
        "CREATE PROCEDURE IF NOT EXISTS app.noop () BEGIN END"
    );
    round_trip("CREATE PROCEDURE p (INOUT n BIGINT) BEGIN TRUNCATE TABLE t; END");
}

#[test]
fn create_procedure_errors() {
    let err = parse_err("CREATE PROCEDURE p (IN) BEGIN END");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);

    let err = parse_err("CREATE PROCEDURE p () SELECT 1 FROM t");
    assert_eq!(err.expected.as_deref(), Some("BEGIN"));

    let err = parse_err("CREATE OR REPLACE PROCEDURE p () BEGIN END");
    assert_eq!(err.message, "OR REPLACE is not supported for CREATE PROCEDURE");
}

#[test]
fn drop_procedure() {
    let Statement::Drop(drop) = parse("DROP PROCEDURE IF EXISTS calculate_stats") else {
        panic!("Expected DROP");
    };
    assert_eq!(drop.object_type, ObjectType::Procedure);
    assert_eq!(
        round_trip("drop procedure calculate_stats"),
        "DROP PROCEDURE calculate_stats"
    );
}
