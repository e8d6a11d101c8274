//! DDL emitter - maps each change operation onto executable PostgreSQL.
//!
//! Statement text is part of the tool's contract: the generated SQL artifact
//! is compared byte-for-byte by downstream tooling, so renderers never
//! reformat or reorder beyond what the individual statement rules require.

pub mod column;
pub mod constraint;
pub mod index;
pub mod table;

use crate::diff::changes::Change;

/// Convert an ordered change list into SQL, preserving the change order.
pub fn to_sql(changes: &[Change]) -> Vec<String> {
    changes.iter().flat_map(render_change).collect()
}

fn render_change(change: &Change) -> Vec<String> {
    match change {
        Change::TableCreate {
            table_name,
            columns,
        } => vec![table::render_create_table(table_name, columns)],
        Change::TableDelete { table_name } => vec![table::render_drop_table(table_name)],
        Change::ColumnCreate { column } => vec![column::render_add_column(column)],
        Change::ColumnUpdate { source, target } => column::render_alter_column(source, target),
        Change::ColumnDelete {
            table_name,
            column_name,
        } => vec![column::render_drop_column(table_name, column_name)],
        Change::ConstraintCreate { constraint } => {
            vec![constraint::render_create_constraint(constraint)]
        }
        Change::ConstraintDelete {
            table_name,
            constraint_name,
        } => vec![constraint::render_drop_constraint(table_name, constraint_name)],
        Change::IndexCreate { index } => vec![index::render_create_index(index)],
        Change::IndexDelete { index_name } => vec![index::render_drop_index(index_name)],
    }
}

pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Column list for constraints and indexes: sorted lexicographically,
/// quoted, comma-joined.
pub fn quote_column_list(columns: &[String]) -> String {
    let mut sorted: Vec<&String> = columns.iter().collect();
    sorted.sort();
    sorted
        .iter()
        .map(|c| quote_ident(c))
        .collect::<Vec<_>>()
        .join(", ")
}
