//! CREATE TABLE / DROP TABLE rendering.

use crate::render::column::render_column_definition;
use crate::render::quote_ident;
use crate::schema::Column;

/// Render a CREATE TABLE statement. Columns keep the order given in the
/// change; constraints are emitted separately as ALTER TABLE statements.
pub fn render_create_table(table_name: &str, columns: &[Column]) -> String {
    let definitions = columns
        .iter()
        .map(render_column_definition)
        .collect::<Vec<_>>()
        .join(", ");

    format!("CREATE TABLE {} ({});", quote_ident(table_name), definitions)
}

pub fn render_drop_table(table_name: &str) -> String {
    format!("DROP TABLE {};", quote_ident(table_name))
}
