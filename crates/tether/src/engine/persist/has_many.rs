use super::{ids_of, into_items, save as save_record, Exec, Saved};
use crate::{Filter, Key, Model, Options, Record, Result, Value};

use futures_util::future::try_join_all;
use std::collections::HashSet;
use tether_core::schema::relation::HasMany;

/// Synchronizes the owner's children with the payload list.
///
/// Children no longer listed are detached (foreign key set to null), never
/// deleted. Listed children are pointed at the owner and saved; their
/// existence is resolved with one query for the whole list.
pub(super) async fn save(
    model: &Model,
    exec: &Exec,
    owner: &Record,
    rel: &HasMany,
    payload: Value,
    options: &Options,
) -> Result<Saved> {
    let target = model.related(&rel.target);
    let owner_id = owner.id().clone();

    let plains = into_items(model.table(), &rel.name, payload)?
        .iter()
        .map(|item| target.state().adapter.to_plain(item))
        .collect::<Result<Vec<_>>>()?;

    let ids = ids_of(&plains);

    exec.update_where(
        &rel.target,
        Filter::eq(rel.foreign_key.as_str(), owner_id.clone())
            .and(Filter::not_in("id", ids.clone())),
        Record::new().with(rel.foreign_key.as_str(), Value::Null),
    )
    .await?;

    let existing: HashSet<Key> = exec
        .select_by_ids(&rel.target, "id", ids)
        .await?
        .iter()
        .filter_map(|row| row.id().to_key())
        .collect();

    let children = try_join_all(plains.into_iter().map(|plain| {
        let exists = plain
            .id()
            .to_key()
            .is_some_and(|id| existing.contains(&id));
        let child = plain.with(rel.foreign_key.as_str(), owner_id.clone());
        let options = options.nested(Some(exists));
        let target = &target;

        async move { save_record(target, Value::Record(child), &options).await }
    }))
    .await?;

    Ok(Saved {
        name: rel.name.clone(),
        value: Value::from(children),
        owner_fields: Record::new(),
    })
}
