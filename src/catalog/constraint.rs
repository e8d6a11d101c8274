//! Fetch table constraints via pg_constraint.

use anyhow::Result;
use sqlx::{PgPool, Row};
use tracing::warn;

use crate::schema::{Constraint, ForeignKeyAction};

#[derive(Debug, Clone)]
pub struct ConstraintRow {
    pub constraint_name: String,
    pub constraint_type: String,
    pub table_name: String,
    pub reference_table_name: Option<String>,
    pub on_update: Option<String>,
    pub on_delete: Option<String>,
    /// Full constraint definition from pg_get_constraintdef.
    pub expression: String,
    pub column_names: Vec<String>,
    pub reference_column_names: Vec<String>,
}

pub async fn fetch(pool: &PgPool, schema_name: &str) -> Result<Vec<ConstraintRow>> {
    let rows = sqlx::query(
        r#"
        SELECT
            c.conname::text AS constraint_name,
            c.contype::text AS constraint_type,
            t.relname::text AS table_name,
            rt.relname::text AS reference_table_name,
            c.confupdtype::text AS on_update,
            c.confdeltype::text AS on_delete,
            pg_get_constraintdef(c.oid) AS expression,
            ARRAY(
                SELECT a.attname::text
                FROM pg_attribute a
                WHERE a.attrelid = c.conrelid
                  AND a.attnum = ANY(c.conkey)
                ORDER BY array_position(c.conkey, a.attnum)
            ) AS column_names,
            ARRAY(
                SELECT a.attname::text
                FROM pg_attribute a
                WHERE a.attrelid = c.confrelid
                  AND a.attnum = ANY(c.confkey)
                ORDER BY array_position(c.confkey, a.attnum)
            ) AS reference_column_names
        FROM pg_constraint c
        JOIN pg_namespace n ON n.oid = c.connamespace
        JOIN pg_class t ON t.oid = c.conrelid AND t.relkind IN ('r', 'p', 'f')
        LEFT JOIN pg_class rt ON rt.oid = c.confrelid
        WHERE n.nspname = $1
          AND c.contype IN ('p', 'f', 'u', 'c')
        ORDER BY t.relname, c.conname
        "#,
    )
    .bind(schema_name)
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|row| {
            Ok(ConstraintRow {
                constraint_name: row.try_get("constraint_name")?,
                constraint_type: row.try_get("constraint_type")?,
                table_name: row.try_get("table_name")?,
                reference_table_name: row.try_get("reference_table_name")?,
                on_update: row.try_get("on_update")?,
                on_delete: row.try_get("on_delete")?,
                expression: row.try_get("expression")?,
                column_names: row.try_get("column_names")?,
                reference_column_names: row.try_get("reference_column_names")?,
            })
        })
        .collect()
}

/// Translate a catalog row into a constraint, or drop it with a warning when
/// required pieces are missing.
pub fn build_constraint(row: ConstraintRow) -> Option<Constraint> {
    match row.constraint_type.as_str() {
        "p" => {
            if row.column_names.is_empty() {
                warn!(
                    "primary key {} on {} has no columns, skipping",
                    row.constraint_name, row.table_name
                );
                return None;
            }
            Some(Constraint::PrimaryKey {
                name: row.constraint_name,
                table_name: row.table_name,
                column_names: row.column_names,
            })
        }
        "f" => {
            let Some(reference_table_name) = row.reference_table_name else {
                warn!(
                    "foreign key {} on {} has no referenced table, skipping",
                    row.constraint_name, row.table_name
                );
                return None;
            };
            if row.column_names.is_empty() || row.reference_column_names.is_empty() {
                warn!(
                    "foreign key {} on {} is missing column names, skipping",
                    row.constraint_name, row.table_name
                );
                return None;
            }
            Some(Constraint::ForeignKey {
                name: row.constraint_name,
                table_name: row.table_name,
                column_names: row.column_names,
                reference_table_name,
                reference_column_names: row.reference_column_names,
                on_update: Some(ForeignKeyAction::from_code(
                    row.on_update.as_deref().unwrap_or_default(),
                )),
                on_delete: Some(ForeignKeyAction::from_code(
                    row.on_delete.as_deref().unwrap_or_default(),
                )),
            })
        }
        "u" => match parse_unique_columns(&row.expression) {
            Some(column_names) => Some(Constraint::Unique {
                name: row.constraint_name,
                table_name: row.table_name,
                column_names,
            }),
            None => {
                warn!(
                    "unique constraint {} on {} has an unparseable definition: {}",
                    row.constraint_name, row.table_name, row.expression
                );
                None
            }
        },
        "c" => Some(Constraint::Check {
            name: row.constraint_name,
            table_name: row.table_name,
            expression: row
                .expression
                .strip_prefix("CHECK ")
                .unwrap_or(&row.expression)
                .to_string(),
        }),
        other => {
            warn!(
                "constraint {} has unsupported type {}, skipping",
                row.constraint_name, other
            );
            None
        }
    }
}

/// Extract column names from the parenthesized list of a UNIQUE constraint
/// definition, e.g. `UNIQUE ("ownerId", "assetId")`.
fn parse_unique_columns(expression: &str) -> Option<Vec<String>> {
    let start = expression.find('(')?;
    let end = expression.rfind(')')?;
    let inner = expression.get(start + 1..end)?;

    let columns: Vec<String> = inner
        .split(',')
        .map(|part| part.trim().trim_matches('"').to_string())
        .filter(|part| !part.is_empty())
        .collect();

    if columns.is_empty() {
        return None;
    }
    Some(columns)
}
