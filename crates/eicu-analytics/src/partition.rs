//! Group-by over stratifiable rows.

use std::collections::BTreeMap;

use eicu_model::{GroupField, GroupKey, Stratify};

/// Partitions rows by the values of `fields`, ordered by key.
///
/// Rows missing any of the fields are left out. With no fields every row
/// lands in the "All" group, and an empty input yields no groups.
pub fn partition<'a, T: Stratify>(
    rows: &'a [T],
    fields: &[GroupField],
) -> BTreeMap<GroupKey, Vec<&'a T>> {
    let mut groups: BTreeMap<GroupKey, Vec<&T>> = BTreeMap::new();
    for row in rows {
        if let Some(key) = row.group_key(fields) {
            groups.entry(key).or_default().push(row);
        }
    }
    groups
}
