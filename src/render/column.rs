//! Column definition and ALTER TABLE column statement rendering.

use crate::render::quote_ident;
use crate::schema::Column;

/// `"name" type[ NOT NULL][ DEFAULT expr]` - shared by CREATE TABLE and
/// ADD COLUMN so both spell a column identically.
pub fn render_column_definition(column: &Column) -> String {
    let mut definition = format!("{} {}", quote_ident(&column.name), column_type(column));

    if !column.nullable {
        definition.push_str(" NOT NULL");
    }

    if let Some(default) = &column.default {
        definition.push_str(&format!(" DEFAULT {}", default));
    }

    definition
}

fn column_type(column: &Column) -> String {
    if column.is_array {
        format!("{}[]", column.column_type)
    } else {
        column.column_type.clone()
    }
}

pub fn render_add_column(column: &Column) -> String {
    format!(
        "ALTER TABLE {} ADD {};",
        quote_ident(&column.table_name),
        render_column_definition(column)
    )
}

/// Only nullability transitions produce SQL; other column updates travel in
/// the diff artifact but have no ALTER form here.
pub fn render_alter_column(source: &Column, target: &Column) -> Vec<String> {
    match (target.nullable, source.nullable) {
        (false, true) => vec![format!(
            "ALTER TABLE {} ALTER COLUMN {} DROP NOT NULL;",
            quote_ident(&source.table_name),
            quote_ident(&source.name)
        )],
        (true, false) => vec![format!(
            "ALTER TABLE {} ALTER COLUMN {} SET NOT NULL;",
            quote_ident(&source.table_name),
            quote_ident(&source.name)
        )],
        _ => Vec::new(),
    }
}

pub fn render_drop_column(table_name: &str, column_name: &str) -> String {
    format!(
        "ALTER TABLE {} DROP COLUMN {};",
        quote_ident(table_name),
        quote_ident(column_name)
    )
}
