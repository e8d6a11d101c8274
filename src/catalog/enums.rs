//! Fetch enum types and their ordered labels via pg_enum.

use std::collections::BTreeMap;

use anyhow::Result;
use sqlx::{PgPool, Row};

/// Enum type name -> labels in enum sort order.
pub async fn fetch(pool: &PgPool, schema_name: &str) -> Result<BTreeMap<String, Vec<String>>> {
    let rows = sqlx::query(
        r#"
        SELECT
            t.typname::text AS name,
            e.enumlabel::text AS value
        FROM pg_type t
        JOIN pg_namespace n ON n.oid = t.typnamespace
        JOIN pg_enum e ON e.enumtypid = t.oid
        WHERE n.nspname = $1
          AND t.typtype = 'e'
        ORDER BY t.typname, e.enumsortorder
        "#,
    )
    .bind(schema_name)
    .fetch_all(pool)
    .await?;

    let mut enum_types: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for row in rows {
        let name: String = row.try_get("name")?;
        let value: String = row.try_get("value")?;
        enum_types.entry(name).or_default().push(value);
    }

    Ok(enum_types)
}
