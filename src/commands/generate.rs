//! pgdrift generate - run the whole pipeline and write migration artifacts.
//!
//! Loads the declared (desired) schema and the introspected (observed)
//! schema, diffs them, and writes four artifacts into the output directory:
//! the two schema snapshots, the change list, and the UP migration SQL.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::catalog;
use crate::config::Config;
use crate::db;
use crate::diff::{Change, DiffOptions, diff};
use crate::metadata;
use crate::render;
use crate::schema::Schema;

pub async fn cmd_generate(config: &Config) -> Result<()> {
    info!("Compiling declared schema...");
    metadata::register_declarations_file(&config.declarations)?;
    let desired = metadata::dynamic_schema();

    info!("Introspecting database...");
    let pool = db::connect_with_retry(&config.database_url).await?;
    let observed = catalog::load_schema(&pool, &config.schema).await?;

    info!("Computing differences...");
    let changes = diff(desired, &observed, &DiffOptions::default());
    let statements = render::to_sql(&changes);

    write_artifacts(&config.output_dir, desired, &observed, &changes, &statements)
}

/// Write the four artifact files. The observed snapshot is filtered to
/// tables the desired schema also declares, keeping third-party tables out
/// of review diffs.
pub fn write_artifacts(
    output_dir: &Path,
    desired: &Schema,
    observed: &Schema,
    changes: &[Change],
    statements: &[String],
) -> Result<()> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("creating output directory {}", output_dir.display()))?;

    write_json(&output_dir.join("schema-dynamic.json"), desired)?;
    write_json(
        &output_dir.join("schema-database.json"),
        &observed.retain_tables_of(desired),
    )?;
    write_json(&output_dir.join("schema-diff.json"), &changes)?;

    let mut sql = String::from("-- UP\n");
    for statement in statements {
        sql.push_str(statement);
        sql.push('\n');
    }
    let sql_path = output_dir.join("schema-sql.sql");
    fs::write(&sql_path, sql).with_context(|| format!("writing {}", sql_path.display()))?;

    info!(
        "Wrote {} changes and {} statements to {}",
        changes.len(),
        statements.len(),
        output_dir.display()
    );
    Ok(())
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serializing artifact")?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}
