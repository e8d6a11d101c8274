//! Literal statement checks for the diff-to-SQL pipeline.
//!
//! Each case feeds schemas through `diff` and `to_sql` and compares the
//! emitted statements character for character.

use pgdrift::diff::{Change, DiffOptions, diff};
use pgdrift::render::to_sql;
use pgdrift::schema::{Column, Constraint, ForeignKeyAction, Index, Schema, Table};

fn schema_with(table: Table) -> Schema {
    let mut schema = Schema::new("public");
    schema.tables.push(table);
    schema
}

fn varchar_column(table: &str, name: &str, nullable: bool) -> Column {
    let mut column = Column::new(table, name);
    column.nullable = nullable;
    column
}

#[test]
fn test_create_empty_table() {
    let mut table = Table::new("T1");
    table.columns.push(varchar_column("T1", "C1", true));
    let desired = schema_with(table);
    let observed = Schema::new("public");

    let changes = diff(&desired, &observed, &DiffOptions::default());
    assert_eq!(changes.len(), 1);
    assert!(matches!(changes[0], Change::TableCreate { .. }));

    assert_eq!(
        to_sql(&changes),
        vec!["CREATE TABLE \"T1\" (\"C1\" character varying);".to_string()]
    );
}

#[test]
fn test_create_table_with_not_null_default() {
    let mut table = Table::new("T1");
    let mut column = varchar_column("T1", "C1", false);
    column.default = Some("uuid_generate_v4()".to_string());
    table.columns.push(column);

    let changes = diff(
        &schema_with(table),
        &Schema::new("public"),
        &DiffOptions::default(),
    );
    assert_eq!(
        to_sql(&changes),
        vec![
            "CREATE TABLE \"T1\" (\"C1\" character varying NOT NULL DEFAULT uuid_generate_v4());"
                .to_string()
        ]
    );
}

#[test]
fn test_add_column() {
    let mut desired_table = Table::new("T1");
    desired_table.columns.push(varchar_column("T1", "C1", true));

    let changes = diff(
        &schema_with(desired_table),
        &schema_with(Table::new("T1")),
        &DiffOptions::default(),
    );
    assert_eq!(
        to_sql(&changes),
        vec!["ALTER TABLE \"T1\" ADD \"C1\" character varying;".to_string()]
    );
}

#[test]
fn test_nullability_flip_travels_toward_source() {
    // Desired NOT NULL, observed nullable: the database gains the constraint
    let mut desired_table = Table::new("T1");
    desired_table.columns.push(varchar_column("T1", "C1", false));
    let mut observed_table = Table::new("T1");
    observed_table.columns.push(varchar_column("T1", "C1", true));

    let changes = diff(
        &schema_with(desired_table),
        &schema_with(observed_table),
        &DiffOptions::default(),
    );
    assert_eq!(changes.len(), 1);
    assert!(matches!(changes[0], Change::ColumnUpdate { .. }));
    assert_eq!(
        to_sql(&changes),
        vec!["ALTER TABLE \"T1\" ALTER COLUMN \"C1\" SET NOT NULL;".to_string()]
    );
}

#[test]
fn test_foreign_key_with_cascades() {
    let mut table = Table::new("Table1");
    table.constraints.push(Constraint::ForeignKey {
        name: "FK_1".to_string(),
        table_name: "Table1".to_string(),
        column_names: vec!["Column1".to_string()],
        reference_table_name: "Table2".to_string(),
        reference_column_names: vec!["Column2".to_string()],
        on_update: Some(ForeignKeyAction::Cascade),
        on_delete: Some(ForeignKeyAction::NoAction),
    });

    let changes = diff(
        &schema_with(table),
        &schema_with(Table::new("Table1")),
        &DiffOptions::default(),
    );
    assert_eq!(
        to_sql(&changes),
        vec![
            "ALTER TABLE \"Table1\" ADD CONSTRAINT \"FK_1\" FOREIGN KEY (\"Column1\") REFERENCES \"Table2\" (\"Column2\") ON DELETE NO ACTION ON UPDATE CASCADE;"
                .to_string()
        ]
    );
}

#[test]
fn test_multi_column_unique_sorts_columns() {
    let mut table = Table::new("Table1");
    table.constraints.push(Constraint::Unique {
        name: "UQ_1".to_string(),
        table_name: "Table1".to_string(),
        column_names: vec!["Column2".to_string(), "Column1".to_string()],
    });

    let changes = diff(
        &schema_with(table),
        &schema_with(Table::new("Table1")),
        &DiffOptions::default(),
    );
    assert_eq!(
        to_sql(&changes),
        vec![
            "ALTER TABLE \"Table1\" ADD CONSTRAINT \"UQ_1\" UNIQUE (\"Column1\", \"Column2\");"
                .to_string()
        ]
    );
}

#[test]
fn test_unique_index_has_no_terminating_semicolon() {
    let mut table = Table::new("Table1");
    table.indexes.push(Index {
        name: "IDX_1".to_string(),
        table_name: "Table1".to_string(),
        unique: true,
        column_names: Some(vec!["Column1".to_string()]),
        expression: None,
        using: None,
        predicate: None,
    });

    let changes = diff(
        &schema_with(table),
        &schema_with(Table::new("Table1")),
        &DiffOptions::default(),
    );
    assert_eq!(
        to_sql(&changes),
        vec!["CREATE UNIQUE INDEX \"IDX_1\" ON \"Table1\" (\"Column1\")".to_string()]
    );
}

#[test]
fn test_drop_table_and_drop_index_statements() {
    let changes = vec![
        Change::IndexDelete {
            index_name: "IDX_1".to_string(),
        },
        Change::TableDelete {
            table_name: "T1".to_string(),
        },
    ];
    assert_eq!(
        to_sql(&changes),
        vec![
            "DROP INDEX \"IDX_1\";".to_string(),
            "DROP TABLE \"T1\";".to_string(),
        ]
    );
}

#[test]
fn test_column_update_without_nullability_change_emits_nothing() {
    // A default-only change appears in the diff but produces no SQL
    let mut desired_table = Table::new("T1");
    let mut desired_column = varchar_column("T1", "C1", true);
    desired_column.default = Some("'x'".to_string());
    desired_table.columns.push(desired_column);

    let mut observed_table = Table::new("T1");
    observed_table.columns.push(varchar_column("T1", "C1", true));

    let changes = diff(
        &schema_with(desired_table),
        &schema_with(observed_table),
        &DiffOptions::default(),
    );
    assert_eq!(changes.len(), 1);
    assert!(matches!(changes[0], Change::ColumnUpdate { .. }));
    assert!(to_sql(&changes).is_empty());
}
