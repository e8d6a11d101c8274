//! Metadata compiler - turns registered entity declarations into the
//! desired `Schema`.

pub mod declarations;
pub mod naming;

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use once_cell::sync::{Lazy, OnceCell};
use tracing::warn;

use crate::schema::{Column, Constraint, Index, Schema, Table};
use declarations::{
    ColumnDeclaration, ColumnIndexDeclaration, DeclarationSet, IndexDeclaration,
    NormalizedDefault, RelationDeclaration, TableDeclaration,
};
use naming::{synthetic_name, to_snake_case};

pub const DEFAULT_SCHEMA: &str = "public";

static REGISTRY: Lazy<Mutex<Registry>> = Lazy::new(|| Mutex::new(Registry::default()));
static DYNAMIC_SCHEMA: OnceCell<Schema> = OnceCell::new();

pub fn register_table(declaration: TableDeclaration) {
    registry().tables.push(declaration);
}

pub fn register_column(declaration: ColumnDeclaration) {
    registry().columns.push(declaration);
}

pub fn register_index(declaration: IndexDeclaration) {
    registry().indexes.push(declaration);
}

pub fn register_column_index(declaration: ColumnIndexDeclaration) {
    registry().column_indexes.push(declaration);
}

pub fn register_relation(declaration: RelationDeclaration) {
    registry().relations.push(declaration);
}

/// Register a whole declarations file (the YAML surface).
pub fn register_declarations_file(path: &Path) -> Result<()> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading declarations file {}", path.display()))?;
    let set: DeclarationSet = serde_yaml::from_str(&contents)
        .with_context(|| format!("parsing declarations file {}", path.display()))?;
    registry().extend(set);
    Ok(())
}

/// Compile the registered declarations into the desired schema.
///
/// The first call compiles and caches; later calls return the cached value.
/// Registrations after the first call have no effect.
pub fn dynamic_schema() -> &'static Schema {
    DYNAMIC_SCHEMA.get_or_init(|| registry().compile(DEFAULT_SCHEMA))
}

fn registry() -> std::sync::MutexGuard<'static, Registry> {
    REGISTRY.lock().expect("metadata registry lock poisoned")
}

/// The five registration kinds, drained in one compile pass.
#[derive(Debug, Default)]
pub struct Registry {
    pub tables: Vec<TableDeclaration>,
    pub columns: Vec<ColumnDeclaration>,
    pub indexes: Vec<IndexDeclaration>,
    pub column_indexes: Vec<ColumnIndexDeclaration>,
    pub relations: Vec<RelationDeclaration>,
}

impl Registry {
    pub fn extend(&mut self, set: DeclarationSet) {
        self.tables.extend(set.tables);
        self.columns.extend(set.columns);
        self.indexes.extend(set.indexes);
        self.column_indexes.extend(set.column_indexes);
        self.relations.extend(set.relations);
    }

    pub fn compile(&self, schema_name: &str) -> Schema {
        let mut schema = Schema::new(schema_name);

        // Pass 1: tables. Entity name -> table name for later lookups.
        let mut table_names: BTreeMap<String, String> = BTreeMap::new();
        for declaration in &self.tables {
            let name = declaration
                .name
                .clone()
                .unwrap_or_else(|| to_snake_case(&declaration.entity));
            table_names.insert(declaration.entity.clone(), name.clone());
            schema.tables.push(Table::new(name));
        }

        // Pass 2: columns, plus synthetic UNIQUE constraints.
        // (entity, field) -> column name, for field-level index lookups.
        let mut field_columns: BTreeMap<(String, String), String> = BTreeMap::new();
        for declaration in &self.columns {
            let Some(table_name) = table_names.get(&declaration.entity) else {
                warn!(
                    "column {}.{} references unregistered entity, skipping",
                    declaration.entity, declaration.field
                );
                continue;
            };

            let column = compile_column(declaration, table_name);
            field_columns.insert(
                (declaration.entity.clone(), declaration.field.clone()),
                column.name.clone(),
            );

            let unique = if declaration.unique && !declaration.primary {
                let column_names = vec![column.name.clone()];
                Some(Constraint::Unique {
                    name: synthetic_name("UQ_", table_name, &column_names),
                    table_name: table_name.clone(),
                    column_names,
                })
            } else {
                None
            };

            if let Some(table) = table_mut(&mut schema, table_name) {
                table.columns.push(column);
                table.constraints.extend(unique);
            }
        }

        // Pass 3: primary keys.
        for table in &mut schema.tables {
            let primary = table.primary_columns();
            if !primary.is_empty() {
                table.constraints.push(Constraint::PrimaryKey {
                    name: synthetic_name("PK_", &table.name, &primary),
                    table_name: table.name.clone(),
                    column_names: primary,
                });
            }
        }

        // Pass 4: indexes, table-level then field-level.
        for declaration in &self.indexes {
            let Some(table_name) = table_names.get(&declaration.entity) else {
                warn!(
                    "index on unregistered entity {}, skipping",
                    declaration.entity
                );
                continue;
            };

            let name = match (&declaration.name, &declaration.column_names) {
                (Some(name), _) => name.clone(),
                (None, Some(columns)) => synthetic_name("IDX_", table_name, columns),
                (None, None) => {
                    warn!(
                        "expression index on {} needs an explicit name, skipping",
                        table_name
                    );
                    continue;
                }
            };

            if let Some(table) = table_mut(&mut schema, table_name) {
                table.indexes.push(Index {
                    name,
                    table_name: table_name.clone(),
                    unique: declaration.unique,
                    column_names: declaration.column_names.clone(),
                    expression: declaration.expression.clone(),
                    using: declaration.using.clone(),
                    predicate: declaration.predicate.clone(),
                });
            }
        }

        for declaration in &self.column_indexes {
            let Some(table_name) = table_names.get(&declaration.entity) else {
                warn!(
                    "column index on unregistered entity {}, skipping",
                    declaration.entity
                );
                continue;
            };
            let key = (declaration.entity.clone(), declaration.field.clone());
            let Some(column_name) = field_columns.get(&key) else {
                warn!(
                    "column index on {}.{} has no matching column, skipping",
                    declaration.entity, declaration.field
                );
                continue;
            };

            let column_names = vec![column_name.clone()];
            let name = declaration
                .name
                .clone()
                .unwrap_or_else(|| synthetic_name("IDX_", table_name, &column_names));

            if let Some(table) = table_mut(&mut schema, table_name) {
                table.indexes.push(Index {
                    name,
                    table_name: table_name.clone(),
                    unique: declaration.unique,
                    column_names: Some(column_names),
                    expression: None,
                    using: None,
                    predicate: None,
                });
            }
        }

        // Pass 5: many-to-one relations.
        for declaration in &self.relations {
            self.compile_relation(declaration, &table_names, &mut schema);
        }

        schema
    }

    fn compile_relation(
        &self,
        declaration: &RelationDeclaration,
        table_names: &BTreeMap<String, String>,
        schema: &mut Schema,
    ) {
        let Some(child_table) = table_names.get(&declaration.entity).cloned() else {
            warn!(
                "relation {}.{} on unregistered entity, skipping",
                declaration.entity, declaration.property
            );
            return;
        };
        let Some(target_table) = table_names.get(&declaration.target).cloned() else {
            warn!(
                "relation {}.{} references unregistered entity {}, skipping",
                declaration.entity, declaration.property, declaration.target
            );
            return;
        };

        let reference_column_names = schema
            .table(&target_table)
            .map(Table::primary_columns)
            .unwrap_or_default();

        let column_name = format!("{}Id", declaration.property);
        let Some(table) = table_mut(schema, &child_table) else {
            return;
        };

        if table.column(&column_name).is_none() {
            let mut column = Column::new(child_table.clone(), column_name.clone());
            column.column_type = "uuid".to_string();
            column.nullable = true;
            table.columns.push(column);
        }

        let column_names = vec![column_name];
        table.constraints.push(Constraint::ForeignKey {
            name: synthetic_name("FK_", &child_table, &column_names),
            table_name: child_table,
            column_names,
            reference_table_name: target_table,
            reference_column_names,
            on_update: declaration.on_update,
            on_delete: declaration.on_delete,
        });
    }
}

fn compile_column(declaration: &ColumnDeclaration, table_name: &str) -> Column {
    let name = declaration
        .name
        .clone()
        .unwrap_or_else(|| declaration.field.clone());

    let mut column = Column::new(table_name, name);
    if let Some(column_type) = &declaration.column_type {
        column.column_type = column_type.clone();
    }
    if let Some(values) = &declaration.enum_values {
        column.column_type = "enum".to_string();
        column.values = Some(values.clone());
    }
    column.nullable = declaration.nullable;
    column.is_array = declaration.is_array;
    column.primary = declaration.primary;
    column.numeric_precision = declaration.numeric_precision;
    column.numeric_scale = declaration.numeric_scale;

    match declaration.default.as_ref().map(|d| d.normalize()) {
        Some(NormalizedDefault::Value(value)) => column.default = Some(value),
        Some(NormalizedDefault::ForceNullable) => column.nullable = true,
        None => {}
    }

    column
}

fn table_mut<'a>(schema: &'a mut Schema, name: &str) -> Option<&'a mut Table> {
    schema.tables.iter_mut().find(|t| t.name == name)
}
