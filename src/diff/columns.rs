//! Diff the column lists of a table pair.

use crate::diff::changes::Change;
use crate::diff::diff_keyed;
use crate::schema::Column;

pub fn diff_all(source: &[Column], target: &[Column]) -> Vec<Change> {
    diff_keyed(source, target, |column| column.name.clone(), diff)
}

/// Diff a single column.
///
/// A type change is a drop-and-recreate: no data migration is attempted.
/// Any other difference in the compared fields travels as one
/// `column.update` carrying both sides.
pub fn diff(source: Option<&Column>, target: Option<&Column>) -> Vec<Change> {
    match (source, target) {
        (Some(source), None) => vec![Change::ColumnCreate {
            column: source.clone(),
        }],
        (None, Some(target)) => vec![Change::ColumnDelete {
            table_name: target.table_name.clone(),
            column_name: target.name.clone(),
        }],
        (Some(source), Some(target)) => {
            if source.column_type != target.column_type {
                return vec![
                    Change::ColumnDelete {
                        table_name: target.table_name.clone(),
                        column_name: target.name.clone(),
                    },
                    Change::ColumnCreate {
                        column: source.clone(),
                    },
                ];
            }

            let changed = source.nullable != target.nullable
                || source.primary != target.primary
                || source.default != target.default
                || source.is_array != target.is_array;

            if changed {
                vec![Change::ColumnUpdate {
                    source: source.clone(),
                    target: target.clone(),
                }]
            } else {
                Vec::new()
            }
        }
        (None, None) => Vec::new(),
    }
}
