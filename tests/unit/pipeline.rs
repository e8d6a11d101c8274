//! Declarations-to-SQL pipeline: a YAML declaration set compiled, diffed
//! against an empty database and emitted.

use pgdrift::diff::{DiffOptions, diff};
use pgdrift::metadata::Registry;
use pgdrift::metadata::declarations::DeclarationSet;
use pgdrift::metadata::naming::synthetic_name;
use pgdrift::render::to_sql;
use pgdrift::schema::Schema;

fn compile(yaml: &str) -> Schema {
    let set: DeclarationSet = serde_yaml::from_str(yaml).unwrap();
    let mut registry = Registry::default();
    registry.extend(set);
    registry.compile("public")
}

#[test]
fn test_declared_entities_reach_sql() {
    let desired = compile(
        r#"
tables:
  - entity: Album
  - entity: User
    name: users
columns:
  - entity: Album
    field: id
    type: uuid
    primary: true
    default: uuid_generate_v4()
  - entity: Album
    field: name
  - entity: User
    field: id
    type: uuid
    primary: true
relations:
  - entity: Album
    property: owner
    target: User
    onDelete: CASCADE
"#,
    );

    let observed = Schema::new("public");
    let changes = diff(&desired, &observed, &DiffOptions::default());
    let statements = to_sql(&changes);

    let album_pk = synthetic_name("PK_", "album", &["id".to_string()]);
    let album_fk = synthetic_name("FK_", "album", &["ownerId".to_string()]);
    let users_pk = synthetic_name("PK_", "users", &["id".to_string()]);

    assert_eq!(
        statements,
        vec![
            "CREATE TABLE \"album\" (\"id\" uuid NOT NULL DEFAULT uuid_generate_v4(), \"name\" character varying NOT NULL, \"ownerId\" uuid);"
                .to_string(),
            format!(
                "ALTER TABLE \"album\" ADD CONSTRAINT \"{album_pk}\" PRIMARY KEY (\"id\");"
            ),
            format!(
                "ALTER TABLE \"album\" ADD CONSTRAINT \"{album_fk}\" FOREIGN KEY (\"ownerId\") REFERENCES \"users\" (\"id\") ON DELETE CASCADE;"
            ),
            "CREATE TABLE \"users\" (\"id\" uuid NOT NULL);".to_string(),
            format!(
                "ALTER TABLE \"users\" ADD CONSTRAINT \"{users_pk}\" PRIMARY KEY (\"id\");"
            ),
        ]
    );
}

#[test]
fn test_compiled_schema_self_diff_is_empty() {
    let desired = compile(
        r#"
tables:
  - entity: Asset
columns:
  - entity: Asset
    field: id
    type: uuid
    primary: true
  - entity: Asset
    field: checksum
    unique: true
columnIndexes:
  - entity: Asset
    field: checksum
"#,
    );

    let options = DiffOptions {
        ignore_extra_tables: false,
    };
    assert!(diff(&desired, &desired, &options).is_empty());
}
