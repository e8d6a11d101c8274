//! ALTER TABLE ADD/DROP CONSTRAINT rendering.

use crate::render::{quote_column_list, quote_ident};
use crate::schema::Constraint;

pub fn render_create_constraint(constraint: &Constraint) -> String {
    let definition = match constraint {
        Constraint::PrimaryKey { column_names, .. } => {
            format!("PRIMARY KEY ({})", quote_column_list(column_names))
        }
        Constraint::ForeignKey {
            column_names,
            reference_table_name,
            reference_column_names,
            on_update,
            on_delete,
            ..
        } => {
            let mut definition = format!(
                "FOREIGN KEY ({}) REFERENCES {} ({})",
                quote_column_list(column_names),
                quote_ident(reference_table_name),
                quote_column_list(reference_column_names)
            );
            // ON DELETE always precedes ON UPDATE
            if let Some(action) = on_delete {
                definition.push_str(&format!(" ON DELETE {}", action));
            }
            if let Some(action) = on_update {
                definition.push_str(&format!(" ON UPDATE {}", action));
            }
            definition
        }
        Constraint::Unique { column_names, .. } => {
            format!("UNIQUE ({})", quote_column_list(column_names))
        }
        Constraint::Check { expression, .. } => format!("CHECK ({})", expression),
    };

    format!(
        "ALTER TABLE {} ADD CONSTRAINT {} {};",
        quote_ident(constraint.table_name()),
        quote_ident(constraint.name()),
        definition
    )
}

pub fn render_drop_constraint(table_name: &str, constraint_name: &str) -> String {
    format!(
        "ALTER TABLE {} DROP CONSTRAINT {};",
        quote_ident(table_name),
        quote_ident(constraint_name)
    )
}
