//! Pure functions that attach loaded target rows to their owners.

use crate::{Key, Record, Value};

use indexmap::IndexMap;
use std::collections::HashSet;

/// Distinct keys found under `field` across `rows`, in first-seen order.
pub(crate) fn collect_keys<'a>(rows: impl IntoIterator<Item = &'a Record>, field: &str) -> Vec<Value> {
    let mut seen = HashSet::new();
    rows.into_iter()
        .filter_map(|row| row.get_or_null(field).to_key())
        .filter(|key| seen.insert(key.clone()))
        .map(Value::from)
        .collect()
}

/// Groups `rows` by the key stored under `field`. Rows without a key are
/// dropped. Group order follows row order.
pub(crate) fn group_by(rows: Vec<Record>, field: &str) -> IndexMap<Key, Vec<Record>> {
    let mut groups: IndexMap<Key, Vec<Record>> = IndexMap::new();
    for row in rows {
        if let Some(key) = row.get_or_null(field).to_key() {
            groups.entry(key).or_default().push(row);
        }
    }
    groups
}

/// Each owner gets the target whose `id` equals `owner[foreign_key]`, or
/// `Null`.
pub(crate) fn belongs_to(
    owners: Vec<Record>,
    name: &str,
    foreign_key: &str,
    targets: Vec<Record>,
) -> Vec<Record> {
    let targets = index_first(targets, "id");

    owners
        .into_iter()
        .map(|owner| {
            let target = owner
                .get_or_null(foreign_key)
                .to_key()
                .and_then(|key| targets.get(&key).cloned());
            owner.with(name, target)
        })
        .collect()
}

/// Each owner gets the first target whose `foreign_key` equals `owner.id`,
/// or `Null`. Which row wins among duplicates is unspecified.
pub(crate) fn has_one(
    owners: Vec<Record>,
    name: &str,
    foreign_key: &str,
    targets: Vec<Record>,
) -> Vec<Record> {
    let targets = index_first(targets, foreign_key);

    owners
        .into_iter()
        .map(|owner| {
            let target = owner.id().to_key().and_then(|key| targets.get(&key).cloned());
            owner.with(name, target)
        })
        .collect()
}

/// Each owner gets the list of targets whose `foreign_key` equals
/// `owner.id`, possibly empty.
pub(crate) fn has_many(
    owners: Vec<Record>,
    name: &str,
    foreign_key: &str,
    targets: Vec<Record>,
) -> Vec<Record> {
    let groups = group_by(targets, foreign_key);

    owners
        .into_iter()
        .map(|owner| {
            let children = owner
                .id()
                .to_key()
                .and_then(|key| groups.get(&key).cloned())
                .unwrap_or_default();
            owner.with(name, children)
        })
        .collect()
}

/// Each owner gets the targets linked to it through `joins`, in join order.
pub(crate) fn has_and_belongs_to_many(
    owners: Vec<Record>,
    name: &str,
    source_key: &str,
    foreign_key: &str,
    joins: &[Record],
    targets: Vec<Record>,
) -> Vec<Record> {
    let targets = index_first(targets, "id");

    let mut linked: IndexMap<Key, Vec<Record>> = IndexMap::new();
    for join in joins {
        let (Some(owner), Some(target)) = (
            join.get_or_null(source_key).to_key(),
            join.get_or_null(foreign_key).to_key(),
        ) else {
            continue;
        };

        if let Some(target) = targets.get(&target) {
            linked.entry(owner).or_default().push(target.clone());
        }
    }

    owners
        .into_iter()
        .map(|owner| {
            let related = owner
                .id()
                .to_key()
                .and_then(|key| linked.get(&key).cloned())
                .unwrap_or_default();
            owner.with(name, related)
        })
        .collect()
}

fn index_first(rows: Vec<Record>, field: &str) -> IndexMap<Key, Record> {
    let mut index = IndexMap::new();
    for row in rows {
        if let Some(key) = row.get_or_null(field).to_key() {
            index.entry(key).or_insert(row);
        }
    }
    index
}
