//! Fetch tables and columns via information_schema.

use std::collections::BTreeMap;

use anyhow::Result;
use itertools::Itertools;
use sqlx::{PgPool, Row};
use tracing::warn;

use crate::schema::{Column, Table};

pub async fn fetch_tables(pool: &PgPool, schema_name: &str) -> Result<Vec<String>> {
    let rows = sqlx::query(
        r#"
        SELECT table_name::text AS table_name
        FROM information_schema.tables
        WHERE table_schema = $1
          AND table_type = 'BASE TABLE'
        ORDER BY table_name
        "#,
    )
    .bind(schema_name)
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|row| Ok(row.try_get("table_name")?))
        .collect()
}

#[derive(Debug, Clone)]
pub struct ColumnRow {
    pub table_name: String,
    pub column_name: String,
    pub data_type: String,
    pub is_nullable: String,
    pub column_default: Option<String>,
    pub numeric_precision: Option<i32>,
    pub numeric_scale: Option<i32>,
    pub udt_name: String,
    /// Element type for ARRAY columns, joined from element_types.
    pub element_type: Option<String>,
}

pub async fn fetch_columns(pool: &PgPool, schema_name: &str) -> Result<Vec<ColumnRow>> {
    let rows = sqlx::query(
        r#"
        SELECT
            c.table_name::text AS table_name,
            c.column_name::text AS column_name,
            c.data_type::text AS data_type,
            c.is_nullable::text AS is_nullable,
            c.column_default::text AS column_default,
            c.numeric_precision::int AS numeric_precision,
            c.numeric_scale::int AS numeric_scale,
            c.udt_name::text AS udt_name,
            e.data_type::text AS element_type
        FROM information_schema.columns c
        LEFT JOIN information_schema.element_types e
          ON c.table_catalog = e.object_catalog
         AND c.table_schema = e.object_schema
         AND c.table_name = e.object_name
         AND e.object_type = 'TABLE'
         AND c.dtd_identifier = e.collection_type_identifier
        WHERE c.table_schema = $1
        ORDER BY c.table_name, c.ordinal_position
        "#,
    )
    .bind(schema_name)
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|row| {
            Ok(ColumnRow {
                table_name: row.try_get("table_name")?,
                column_name: row.try_get("column_name")?,
                data_type: row.try_get("data_type")?,
                is_nullable: row.try_get("is_nullable")?,
                column_default: row.try_get("column_default")?,
                numeric_precision: row.try_get("numeric_precision")?,
                numeric_scale: row.try_get("numeric_scale")?,
                udt_name: row.try_get("udt_name")?,
                element_type: row.try_get("element_type")?,
            })
        })
        .collect()
}

/// Merge the table list and column rows into tables, applying the
/// normalization rules for arrays, enums and nullability.
pub fn build_tables(
    table_names: Vec<String>,
    column_rows: Vec<ColumnRow>,
    enum_types: &BTreeMap<String, Vec<String>>,
) -> Vec<Table> {
    let mut tables = Vec::new();
    let mut table_index_map = BTreeMap::new();

    for (index, name) in table_names.into_iter().enumerate() {
        table_index_map.insert(name.clone(), index);
        tables.push(Table::new(name));
    }

    for (table_name, group) in &column_rows
        .into_iter()
        .chunk_by(|row| row.table_name.clone())
    {
        // Columns of views and foreign tables have no BASE TABLE entry
        let Some(&table_index) = table_index_map.get(&table_name) else {
            continue;
        };

        tables[table_index].columns = group
            .filter_map(|row| normalize_column(row, enum_types))
            .collect();
    }

    tables
}

fn normalize_column(
    row: ColumnRow,
    enum_types: &BTreeMap<String, Vec<String>>,
) -> Option<Column> {
    let mut column = Column::new(row.table_name, row.column_name);
    column.nullable = row.is_nullable == "YES";
    column.default = row.column_default;
    column.numeric_precision = row.numeric_precision;
    column.numeric_scale = row.numeric_scale;

    let mut data_type = row.data_type;
    if data_type == "ARRAY" {
        match row.element_type {
            Some(element_type) => {
                column.is_array = true;
                data_type = element_type;
            }
            None => {
                warn!(
                    "array column {}.{} has no element type, skipping",
                    column.table_name, column.name
                );
                return None;
            }
        }
    }

    if data_type == "USER-DEFINED" {
        match enum_types.get(&row.udt_name) {
            Some(values) => {
                column.column_type = "enum".to_string();
                column.values = Some(values.clone());
            }
            None => {
                warn!(
                    "column {}.{} has unknown user-defined type {}, skipping",
                    column.table_name, column.name, row.udt_name
                );
                return None;
            }
        }
    } else {
        column.column_type = data_type;
    }

    Some(column)
}
