use crate::{bail, Filter, Model, Options, Record, Relation, Result, Value};

use futures_util::future::try_join_all;

/// Deletes the record's row, then the rows of every relation that cleans up
/// on destroy. Join rows of many-to-many relations are always removed; their
/// targets are not.
///
/// `before_destroy` returning `false` turns this into a no-op that returns
/// the record unchanged. A record without a usable id is rejected before any
/// hook runs, since a null id would match every orphan row.
pub(crate) async fn destroy(model: &Model, record: Record, options: &Options) -> Result<Record> {
    let state = model.state();
    let exec = model.exec(options)?;

    let plain = state.adapter.to_plain(&Value::Record(record.clone()))?;

    if plain.id().to_key().is_none() {
        bail!("cannot destroy a `{}` record without an id", state.table());
    }

    if !state.dispatcher().before_destroy(&record)? {
        tracing::debug!(table = state.table(), "destroy vetoed by before_destroy");
        return Ok(record);
    }

    let id = plain.id().clone();
    tracing::trace!(table = state.table(), ?id, "destroy");

    exec.delete_where(state.table(), Filter::eq("id", id.clone()))
        .await?;

    try_join_all(
        state
            .relations()
            .filter_map(Relation::cleanup)
            .map(|(table, column)| exec.delete_where(table, Filter::eq(column, id.clone()))),
    )
    .await?;

    state.dispatcher().after_destroy(&record)?;

    Ok(record)
}
