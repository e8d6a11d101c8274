//! Fetch secondary indexes via pg_index.
//!
//! Indexes backing a PRIMARY KEY or UNIQUE constraint are excluded; the
//! constraint itself represents them.

use anyhow::Result;
use sqlx::{PgPool, Row};
use tracing::warn;

use crate::schema::Index;

#[derive(Debug, Clone)]
pub struct IndexRow {
    pub index_name: String,
    pub table_name: String,
    pub is_unique: bool,
    pub access_method: String,
    pub expression: Option<String>,
    pub predicate: Option<String>,
    pub column_names: Vec<String>,
}

pub async fn fetch(pool: &PgPool, schema_name: &str) -> Result<Vec<IndexRow>> {
    let rows = sqlx::query(
        r#"
        SELECT
            i.relname::text AS index_name,
            t.relname::text AS table_name,
            ix.indisunique AS is_unique,
            am.amname::text AS access_method,
            pg_get_expr(ix.indexprs, ix.indrelid)::text AS expression,
            pg_get_expr(ix.indpred, ix.indrelid)::text AS predicate,
            ARRAY(
                SELECT a.attname::text
                FROM pg_attribute a
                WHERE a.attrelid = t.oid
                  AND a.attnum = ANY(ix.indkey)
            ) AS column_names
        FROM pg_index ix
        JOIN pg_class i ON i.oid = ix.indexrelid
        JOIN pg_class t ON t.oid = ix.indrelid
        JOIN pg_namespace n ON n.oid = i.relnamespace
        JOIN pg_am am ON am.oid = i.relam
        WHERE n.nspname = $1
          AND NOT EXISTS (
              SELECT 1 FROM pg_constraint c
              WHERE c.conindid = ix.indexrelid
                AND c.contype IN ('p', 'u')
          )
        ORDER BY i.relname
        "#,
    )
    .bind(schema_name)
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|row| {
            Ok(IndexRow {
                index_name: row.try_get("index_name")?,
                table_name: row.try_get("table_name")?,
                is_unique: row.try_get("is_unique")?,
                access_method: row.try_get("access_method")?,
                expression: row.try_get("expression")?,
                predicate: row.try_get("predicate")?,
                column_names: row.try_get("column_names")?,
            })
        })
        .collect()
}

pub fn build_index(row: IndexRow) -> Option<Index> {
    let (column_names, expression) = match row.expression {
        Some(expression) => (None, Some(expression)),
        None if row.column_names.is_empty() => {
            warn!(
                "index {} has neither columns nor an expression, skipping",
                row.index_name
            );
            return None;
        }
        None => (Some(row.column_names), None),
    };

    Some(Index {
        name: row.index_name,
        table_name: row.table_name,
        unique: row.is_unique,
        column_names,
        expression,
        // btree is the default access method and is left implicit
        using: (row.access_method != "btree").then_some(row.access_method),
        predicate: row.predicate,
    })
}
