//! Diff engine - computes the ordered change list that transforms the
//! observed schema (`target`) into the desired schema (`source`).

pub mod changes;
pub mod columns;
pub mod constraints;
pub mod indexes;
pub mod tables;

pub use changes::Change;

use std::collections::{BTreeMap, BTreeSet};

use crate::schema::Schema;

#[derive(Debug, Clone)]
pub struct DiffOptions {
    /// Skip tables that exist only in the target. Protects third-party
    /// tables sharing the namespace from being dropped.
    pub ignore_extra_tables: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            ignore_extra_tables: true,
        }
    }
}

/// Diff two schemas. `source` is the desired state, `target` the observed
/// state; changes are returned in application order.
pub fn diff(source: &Schema, target: &Schema, options: &DiffOptions) -> Vec<Change> {
    diff_keyed(
        &source.tables,
        &target.tables,
        |table| table.name.clone(),
        |source_table, target_table| tables::diff(source_table, target_table, options),
    )
}

/// Union the key sets of both sides and diff each element pair. Keys iterate
/// in sorted order, which keeps the output deterministic.
pub(crate) fn diff_keyed<'a, T, K: Ord>(
    source: impl IntoIterator<Item = &'a T>,
    target: impl IntoIterator<Item = &'a T>,
    key_of: impl Fn(&T) -> K,
    diff_fn: impl Fn(Option<&'a T>, Option<&'a T>) -> Vec<Change>,
) -> Vec<Change>
where
    T: 'a,
{
    let source_map: BTreeMap<K, &T> = source
        .into_iter()
        .map(|item| (key_of(item), item))
        .collect();
    let target_map: BTreeMap<K, &T> = target
        .into_iter()
        .map(|item| (key_of(item), item))
        .collect();

    let all_keys: BTreeSet<&K> = source_map.keys().chain(target_map.keys()).collect();

    all_keys
        .into_iter()
        .flat_map(|key| {
            diff_fn(
                source_map.get(key).copied(),
                target_map.get(key).copied(),
            )
        })
        .collect()
}

/// Order-insensitive column list comparison.
pub(crate) fn column_sets_equal(a: &[String], b: &[String]) -> bool {
    let a: BTreeSet<&String> = a.iter().collect();
    let b: BTreeSet<&String> = b.iter().collect();
    a == b
}
