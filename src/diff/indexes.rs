//! Diff the index sets of a table pair.

use crate::diff::changes::Change;
use crate::diff::{column_sets_equal, diff_keyed};
use crate::schema::Index;

pub fn diff_all(source: &[Index], target: &[Index]) -> Vec<Change> {
    diff_keyed(source, target, |index| index.name.clone(), diff)
}

pub fn diff(source: Option<&Index>, target: Option<&Index>) -> Vec<Change> {
    match (source, target) {
        (Some(source), None) => vec![Change::IndexCreate {
            index: source.clone(),
        }],
        (None, Some(target)) => vec![Change::IndexDelete {
            index_name: target.name.clone(),
        }],
        (Some(source), Some(target)) => {
            if structurally_equal(source, target) {
                Vec::new()
            } else {
                vec![
                    Change::IndexDelete {
                        index_name: target.name.clone(),
                    },
                    Change::IndexCreate {
                        index: source.clone(),
                    },
                ]
            }
        }
        (None, None) => Vec::new(),
    }
}

// The access method (`using`) is not compared: changing it alone produces
// no diff.
fn structurally_equal(source: &Index, target: &Index) -> bool {
    let columns_equal = match (&source.column_names, &target.column_names) {
        (Some(source_columns), Some(target_columns)) => {
            column_sets_equal(source_columns, target_columns)
        }
        (None, None) => true,
        _ => false,
    };

    columns_equal
        && source.expression == target.expression
        && source.unique == target.unique
        && source.predicate == target.predicate
}
