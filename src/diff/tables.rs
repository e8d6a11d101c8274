//! Diff a single table pair.

use crate::diff::changes::Change;
use crate::diff::{DiffOptions, columns, constraints, indexes};
use crate::schema::Table;

pub fn diff(source: Option<&Table>, target: Option<&Table>, options: &DiffOptions) -> Vec<Change> {
    match (source, target) {
        // 1) table exists only in the desired schema
        (Some(source), None) => {
            let mut out = vec![Change::TableCreate {
                table_name: source.name.clone(),
                columns: source.columns.clone(),
            }];
            // Indexes and constraints of a new table arrive as separate
            // statements after the CREATE TABLE.
            out.extend(indexes::diff_all(&source.indexes, &[]));
            out.extend(constraints::diff_all(&source.constraints, &[]));
            out
        }
        // 2) table exists only in the observed schema
        (None, Some(target)) => {
            if options.ignore_extra_tables {
                Vec::new()
            } else {
                vec![Change::TableDelete {
                    table_name: target.name.clone(),
                }]
            }
        }
        // 3) both present - recurse
        (Some(source), Some(target)) => {
            let mut out = columns::diff_all(&source.columns, &target.columns);
            out.extend(constraints::diff_all(
                &source.constraints,
                &target.constraints,
            ));
            out.extend(indexes::diff_all(&source.indexes, &target.indexes));
            out
        }
        (None, None) => Vec::new(),
    }
}
