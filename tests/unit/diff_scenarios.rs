//! Diff engine invariants across whole schemas.

use pgdrift::diff::{Change, DiffOptions, diff};
use pgdrift::metadata::naming::synthetic_name;
use pgdrift::schema::{Column, Constraint, Index, Schema, Table};

fn schema_with(tables: Vec<Table>) -> Schema {
    let mut schema = Schema::new("public");
    schema.tables = tables;
    schema
}

fn sample_schema() -> Schema {
    let mut users = Table::new("users");
    let mut id = Column::new("users", "id");
    id.column_type = "uuid".to_string();
    id.primary = true;
    id.default = Some("uuid_generate_v4()".to_string());
    users.columns.push(id);
    let mut email = Column::new("users", "email");
    email.nullable = true;
    users.columns.push(email);
    users.constraints.push(Constraint::PrimaryKey {
        name: synthetic_name("PK_", "users", &["id".to_string()]),
        table_name: "users".to_string(),
        column_names: vec!["id".to_string()],
    });
    users.indexes.push(Index {
        name: "IDX_users_email".to_string(),
        table_name: "users".to_string(),
        unique: false,
        column_names: Some(vec!["email".to_string()]),
        expression: None,
        using: None,
        predicate: None,
    });

    schema_with(vec![users])
}

#[test]
fn test_self_diff_is_stable() {
    let schema = sample_schema();
    let options = DiffOptions {
        ignore_extra_tables: false,
    };
    assert_eq!(diff(&schema, &schema, &options), Vec::<Change>::new());
}

#[test]
fn test_ignore_extra_tables_semantics() {
    let empty = Schema::new("public");
    let observed = schema_with(vec![Table::new("T1")]);

    assert!(
        diff(
            &empty,
            &observed,
            &DiffOptions {
                ignore_extra_tables: true
            }
        )
        .is_empty()
    );
    assert_eq!(
        diff(
            &empty,
            &observed,
            &DiffOptions {
                ignore_extra_tables: false
            }
        ),
        vec![Change::TableDelete {
            table_name: "T1".to_string()
        }]
    );
}

#[test]
fn test_reordered_column_sets_produce_no_diff() {
    let build = |pk_columns: Vec<&str>, index_columns: Vec<&str>| {
        let mut table = Table::new("t");
        table.constraints.push(Constraint::PrimaryKey {
            name: "PK_t".to_string(),
            table_name: "t".to_string(),
            column_names: pk_columns.into_iter().map(String::from).collect(),
        });
        table.indexes.push(Index {
            name: "IDX_t".to_string(),
            table_name: "t".to_string(),
            unique: false,
            column_names: Some(index_columns.into_iter().map(String::from).collect()),
            expression: None,
            using: None,
            predicate: None,
        });
        schema_with(vec![table])
    };

    let desired = build(vec!["a", "b"], vec!["x", "y"]);
    let observed = build(vec!["b", "a"], vec!["y", "x"]);
    assert!(diff(&desired, &observed, &DiffOptions::default()).is_empty());
}

#[test]
fn test_synthesized_names_are_stable_across_sources() {
    // The introspected name and the compiled name must agree for no-op diffs
    let name_a = synthetic_name("UQ_", "album", &["ownerId".to_string(), "assetId".to_string()]);
    let name_b = synthetic_name("UQ_", "album", &["assetId".to_string(), "ownerId".to_string()]);
    assert_eq!(name_a, name_b);
    assert_eq!(name_a.len(), 30);
}

#[test]
fn test_delete_always_precedes_create_in_structural_changes() {
    // Change the type of a column, the columns of a constraint and the
    // uniqueness of an index, all at once.
    let build = |column_type: &str, constraint_columns: Vec<&str>, unique: bool| {
        let mut table = Table::new("t");
        let mut column = Column::new("t", "c");
        column.column_type = column_type.to_string();
        table.columns.push(column);
        table.constraints.push(Constraint::Unique {
            name: "UQ_t".to_string(),
            table_name: "t".to_string(),
            column_names: constraint_columns.into_iter().map(String::from).collect(),
        });
        table.indexes.push(Index {
            name: "IDX_t".to_string(),
            table_name: "t".to_string(),
            unique,
            column_names: Some(vec!["c".to_string()]),
            expression: None,
            using: None,
            predicate: None,
        });
        schema_with(vec![table])
    };

    let desired = build("text", vec!["a"], true);
    let observed = build("integer", vec!["b"], false);
    let changes = diff(&desired, &observed, &DiffOptions::default());

    let position = |predicate: fn(&Change) -> bool| {
        changes
            .iter()
            .position(predicate)
            .expect("expected change missing")
    };

    let column_delete = position(|c| matches!(c, Change::ColumnDelete { .. }));
    let column_create = position(|c| matches!(c, Change::ColumnCreate { .. }));
    assert!(column_delete < column_create);

    let constraint_delete = position(|c| matches!(c, Change::ConstraintDelete { .. }));
    let constraint_create = position(|c| matches!(c, Change::ConstraintCreate { .. }));
    assert!(constraint_delete < constraint_create);

    let index_delete = position(|c| matches!(c, Change::IndexDelete { .. }));
    let index_create = position(|c| matches!(c, Change::IndexCreate { .. }));
    assert!(index_delete < index_create);
}

#[test]
fn test_new_table_change_order() {
    let desired = sample_schema();
    let observed = Schema::new("public");
    let changes = diff(&desired, &observed, &DiffOptions::default());

    assert!(matches!(changes[0], Change::TableCreate { .. }));
    assert!(matches!(changes[1], Change::IndexCreate { .. }));
    assert!(matches!(changes[2], Change::ConstraintCreate { .. }));
    assert_eq!(changes.len(), 3);
}
