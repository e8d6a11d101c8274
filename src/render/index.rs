//! CREATE INDEX / DROP INDEX rendering.

use crate::render::{quote_column_list, quote_ident};
use crate::schema::Index;

/// Render a CREATE INDEX statement.
///
/// The statement carries no terminating semicolon, unlike every other
/// statement this emitter produces. Downstream consumers rely on the exact
/// text, so the asymmetry stays.
pub fn render_create_index(index: &Index) -> String {
    let mut sql = String::from("CREATE ");
    if index.unique {
        sql.push_str("UNIQUE ");
    }
    sql.push_str(&format!(
        "INDEX {} ON {}",
        quote_ident(&index.name),
        quote_ident(&index.table_name)
    ));

    if let Some(columns) = &index.column_names {
        sql.push_str(&format!(" ({})", quote_column_list(columns)));
    }

    if let Some(using) = &index.using {
        sql.push_str(&format!(" USING {}", using));
    }

    if let Some(expression) = &index.expression {
        sql.push_str(&format!(" ({})", expression));
    }

    if let Some(predicate) = &index.predicate {
        sql.push_str(&format!(" WHERE {}", predicate));
    }

    sql
}

pub fn render_drop_index(index_name: &str) -> String {
    format!("DROP INDEX {};", quote_ident(index_name))
}
