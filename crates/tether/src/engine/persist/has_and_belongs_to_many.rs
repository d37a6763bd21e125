use super::{ids_of, into_items, save as save_record, Exec, Saved};
use crate::{Filter, Key, Model, Options, Record, Result, Value};

use chrono::{DateTime, Utc};
use futures_util::future::try_join_all;
use std::collections::HashSet;
use tether_core::schema::relation::HasAndBelongsToMany;

/// Synchronizes the owner's join rows with the payload list.
///
/// Join rows for targets no longer listed are deleted; the targets
/// themselves are kept. Each listed target is saved, and a join row is
/// inserted only for targets that were not linked before, so re-saving the
/// same list never duplicates join rows.
pub(super) async fn save(
    model: &Model,
    exec: &Exec,
    owner: &Record,
    rel: &HasAndBelongsToMany,
    payload: Value,
    options: &Options,
    now: DateTime<Utc>,
) -> Result<Saved> {
    let target = model.related(&rel.target);
    let join = model.related(&rel.join_table);
    let owner_id = owner.id().clone();

    let plains = into_items(model.table(), &rel.name, payload)?
        .iter()
        .map(|item| target.state().adapter.to_plain(item))
        .collect::<Result<Vec<_>>>()?;
    let plains = dedup_by_id(plains);

    let ids = ids_of(&plains);

    let linked: HashSet<Key> = exec
        .select_where(
            &rel.join_table,
            Filter::eq(rel.source_key.as_str(), owner_id.clone()),
        )
        .await?
        .iter()
        .filter_map(|row| row.get_or_null(&rel.foreign_key).to_key())
        .collect();

    exec.delete_where(
        &rel.join_table,
        Filter::eq(rel.source_key.as_str(), owner_id.clone())
            .and(Filter::not_in(rel.foreign_key.as_str(), ids.clone())),
    )
    .await?;

    let existing: HashSet<Key> = exec
        .select_by_ids(&rel.target, "id", ids)
        .await?
        .iter()
        .filter_map(|row| row.id().to_key())
        .collect();

    let join_columns = join.columns(exec).await?;

    let related = try_join_all(plains.into_iter().map(|plain| {
        let exists = plain
            .id()
            .to_key()
            .is_some_and(|id| existing.contains(&id));
        let options = options.nested(Some(exists));
        let (target, linked, owner_id) = (&target, &linked, &owner_id);

        async move {
            let saved = save_record(target, Value::Record(plain), &options).await?;

            let target_id = target
                .state()
                .adapter
                .to_plain(&Value::Record(saved.clone()))?
                .id()
                .clone();

            let already_linked = target_id.to_key().is_some_and(|id| linked.contains(&id));
            if !already_linked {
                let mut row = Record::new()
                    .with("id", uuid::Uuid::new_v4().to_string())
                    .with(rel.foreign_key.as_str(), target_id)
                    .with(rel.source_key.as_str(), owner_id.clone());

                if let Some(at) = options.touch.stamp(now) {
                    let timestamps = &model.state().timestamps;
                    for column in [&timestamps.created_at, &timestamps.updated_at]
                        .into_iter()
                        .flatten()
                    {
                        row = row.with(column.as_str(), at);
                    }
                }

                let row = row.filter(|field, _| join_columns.contains_key(field));
                exec.insert(&rel.join_table, row).await?;
            }

            Ok::<_, crate::Error>(saved)
        }
    }))
    .await?;

    Ok(Saved {
        name: rel.name.clone(),
        value: Value::from(related),
        owner_fields: Record::new(),
    })
}

/// Keeps the first entry for each id so one pair never gets two join rows.
/// Entries without an id are all kept; each is saved as a new target.
fn dedup_by_id(plains: Vec<Record>) -> Vec<Record> {
    let mut seen = HashSet::new();
    plains
        .into_iter()
        .filter(|plain| plain.id().to_key().map_or(true, |id| seen.insert(id)))
        .collect()
}
