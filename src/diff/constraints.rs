//! Diff the constraint sets of a table pair.
//!
//! Constraints are partitioned by kind before keying by name, so a UNIQUE
//! and a CHECK constraint sharing a name never collide.

use crate::diff::changes::Change;
use crate::diff::{column_sets_equal, diff_keyed};
use crate::schema::{Constraint, ConstraintKind};

pub fn diff_all(source: &[Constraint], target: &[Constraint]) -> Vec<Change> {
    ConstraintKind::ALL
        .iter()
        .flat_map(|kind| {
            diff_keyed(
                source.iter().filter(|c| c.kind() == *kind),
                target.iter().filter(|c| c.kind() == *kind),
                |constraint| constraint.name().to_string(),
                diff,
            )
        })
        .collect()
}

pub fn diff(source: Option<&Constraint>, target: Option<&Constraint>) -> Vec<Change> {
    match (source, target) {
        (Some(source), None) => vec![Change::ConstraintCreate {
            constraint: source.clone(),
        }],
        (None, Some(target)) => vec![delete(target)],
        (Some(source), Some(target)) => {
            if structurally_equal(source, target) {
                Vec::new()
            } else {
                vec![
                    delete(target),
                    Change::ConstraintCreate {
                        constraint: source.clone(),
                    },
                ]
            }
        }
        (None, None) => Vec::new(),
    }
}

fn delete(constraint: &Constraint) -> Change {
    Change::ConstraintDelete {
        table_name: constraint.table_name().to_string(),
        constraint_name: constraint.name().to_string(),
    }
}

fn structurally_equal(source: &Constraint, target: &Constraint) -> bool {
    match (source, target) {
        (
            Constraint::PrimaryKey {
                table_name: source_table,
                column_names: source_columns,
                ..
            },
            Constraint::PrimaryKey {
                table_name: target_table,
                column_names: target_columns,
                ..
            },
        ) => source_table == target_table && column_sets_equal(source_columns, target_columns),
        (
            Constraint::ForeignKey {
                table_name: source_table,
                column_names: source_columns,
                reference_table_name: source_reference,
                reference_column_names: source_reference_columns,
                on_update: source_on_update,
                on_delete: source_on_delete,
                ..
            },
            Constraint::ForeignKey {
                table_name: target_table,
                column_names: target_columns,
                reference_table_name: target_reference,
                reference_column_names: target_reference_columns,
                on_update: target_on_update,
                on_delete: target_on_delete,
                ..
            },
        ) => {
            source_table == target_table
                && source_reference == target_reference
                && source_on_update == target_on_update
                && source_on_delete == target_on_delete
                && column_sets_equal(source_columns, target_columns)
                && column_sets_equal(source_reference_columns, target_reference_columns)
        }
        (
            Constraint::Unique {
                column_names: source_columns,
                ..
            },
            Constraint::Unique {
                column_names: target_columns,
                ..
            },
        ) => column_sets_equal(source_columns, target_columns),
        (
            Constraint::Check {
                expression: source_expression,
                ..
            },
            Constraint::Check {
                expression: target_expression,
                ..
            },
        ) => source_expression == target_expression,
        _ => false,
    }
}
