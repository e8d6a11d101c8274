//! Catalog introspector - reads a live PostgreSQL schema namespace into the
//! schema model.

pub mod constraint;
pub mod enums;
pub mod index;
pub mod table;

use anyhow::{Context, Result, bail};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::schema::{Constraint, Schema};

/// Load the observed schema for `schema_name`.
///
/// The five catalog queries share no state and run concurrently; their row
/// sets are merged single-threaded afterwards.
pub async fn load_schema(pool: &PgPool, schema_name: &str) -> Result<Schema> {
    ensure_namespace(pool, schema_name).await?;

    info!("Introspecting schema {}...", schema_name);
    let (table_names, column_rows, enum_types, index_rows, constraint_rows) = tokio::try_join!(
        table::fetch_tables(pool, schema_name),
        table::fetch_columns(pool, schema_name),
        enums::fetch(pool, schema_name),
        index::fetch(pool, schema_name),
        constraint::fetch(pool, schema_name),
    )
    .with_context(|| format!("introspecting schema {}", schema_name))?;

    let mut schema = Schema::new(schema_name);
    schema.tables = table::build_tables(table_names, column_rows, &enum_types);

    for row in constraint_rows {
        let Some(constraint) = constraint::build_constraint(row) else {
            continue;
        };
        let Some(table) = schema
            .tables
            .iter_mut()
            .find(|t| t.name == constraint.table_name())
        else {
            // Constraints on partitioned or foreign tables have no BASE TABLE
            warn!(
                "constraint {} references unknown table {}, skipping",
                constraint.name(),
                constraint.table_name()
            );
            continue;
        };

        if let Constraint::PrimaryKey { column_names, .. } = &constraint {
            for column in &mut table.columns {
                if column_names.contains(&column.name) {
                    column.primary = true;
                }
            }
        }
        table.constraints.push(constraint);
    }

    for row in index_rows {
        let Some(index) = index::build_index(row) else {
            continue;
        };
        let Some(table) = schema
            .tables
            .iter_mut()
            .find(|t| t.name == index.table_name)
        else {
            warn!(
                "index {} references unknown table {}, skipping",
                index.name, index.table_name
            );
            continue;
        };
        table.indexes.push(index);
    }

    info!(
        "Introspected {} tables from {}",
        schema.tables.len(),
        schema_name
    );
    Ok(schema)
}

async fn ensure_namespace(pool: &PgPool, schema_name: &str) -> Result<()> {
    let row = sqlx::query("SELECT 1 FROM pg_namespace WHERE nspname = $1")
        .bind(schema_name)
        .fetch_optional(pool)
        .await
        .context("querying pg_namespace")?;

    if row.is_none() {
        bail!("schema \"{}\" does not exist", schema_name);
    }
    Ok(())
}
