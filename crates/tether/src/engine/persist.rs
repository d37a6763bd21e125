mod belongs_to;
mod has_and_belongs_to_many;
mod has_many;
mod has_one;

use super::Exec;
use crate::{Columns, Error, Filter, Model, Options, Record, Relation, Result, Value};

use async_recursion::async_recursion;
use chrono::{DateTime, Utc};
use futures_util::future::try_join_all;

/// Result of saving one relation payload.
struct Saved {
    name: String,

    /// The persisted payload, in the target model's record form.
    value: Value,

    /// Columns changed on the owner row as a side effect.
    owner_fields: Record,
}

/// Persists `input` and, recursively, every relation payload it carries.
#[async_recursion]
pub(crate) async fn save(model: &Model, input: Value, options: &Options) -> Result<Record> {
    let state = model.state();
    let table = state.table();
    let exec = model.exec(options)?;

    let plain = state.adapter.to_plain(&input)?;
    let (payloads, scalars) = plain.partition(|field| state.is_relation(field));

    let now = Utc::now();
    let (mut scalars, generated) = state.ensure_id(scalars);

    let stamp = options.touch.stamp(now);
    if let (Some(column), Some(at)) = (&state.timestamps.updated_at, stamp) {
        scalars = scalars.with(column.as_str(), at);
    }

    let exists = match options.exists {
        Some(exists) => exists,
        // A freshly generated id cannot be in the table yet
        None if generated => false,
        None => !exec
            .select_where(table, Filter::eq("id", scalars.id().clone()))
            .await?
            .is_empty(),
    };

    tracing::trace!(table, exists, relations = payloads.len(), "save");

    if !exists {
        scalars = state.apply_defaults(scalars);

        if let Some(column) = &state.timestamps.created_at {
            if !scalars.contains(column) {
                scalars = scalars.with(column.as_str(), stamp.unwrap_or(now));
            }
        }
    }

    let scalars = state
        .dispatcher()
        .before_save(scalars, !exists)?
        .filter(|field, _| !state.is_relation(field));

    let row = to_row(scalars, model.columns(&exec).await?);

    let persisted = if exists {
        exec.update(table, &row.id().clone(), row).await?
    } else {
        exec.insert(table, row).await?
    };

    let mut saved = persisted.clone();
    if !payloads.is_empty() {
        let outcomes = try_join_all(payloads.iter().map(|(name, payload)| {
            save_relation(model, &exec, &persisted, name, payload.clone(), options, now)
        }))
        .await?;

        for outcome in outcomes {
            saved = saved
                .merge(&outcome.owner_fields)
                .with(outcome.name, outcome.value);
        }
    }

    let instance = state.adapter.from_plain(saved);
    state.dispatcher().after_save(&instance, !exists)?;

    Ok(instance)
}

async fn save_relation(
    model: &Model,
    exec: &Exec,
    owner: &Record,
    name: &str,
    payload: Value,
    options: &Options,
    now: DateTime<Utc>,
) -> Result<Saved> {
    let relation = model.state().relation(name)?;

    let saved = match relation {
        Relation::BelongsTo(rel) => {
            belongs_to::save(model, exec, owner, rel, payload, options, now).await?
        }
        Relation::HasOne(rel) => has_one::save(model, exec, owner, rel, payload, options).await?,
        Relation::HasMany(rel) => has_many::save(model, exec, owner, rel, payload, options).await?,
        Relation::HasAndBelongsToMany(rel) => {
            has_and_belongs_to_many::save(model, exec, owner, rel, payload, options, now).await?
        }
    };

    Ok(saved)
}

/// Keeps only the fields the table has and encodes nested values as JSON.
fn to_row(scalars: Record, columns: &Columns) -> Record {
    scalars
        .iter()
        .filter(|(field, _)| columns.contains_key(*field))
        .map(|(field, value)| {
            let value = match value {
                Value::Record(_) | Value::List(_) => Value::Json(value.to_json()),
                other => other.clone(),
            };
            (field.to_string(), value)
        })
        .collect()
}

/// A to-many payload as a list of items. `Null` is the empty list.
fn into_items(table: &str, name: &str, payload: Value) -> Result<Vec<Value>> {
    match payload {
        Value::Null => Ok(vec![]),
        Value::List(items) => Ok(items),
        other => Err(Error::type_conversion(other, "List")
            .context(tether_core::err!("relation `{name}` of `{table}`"))),
    }
}

/// Ids present among `plains`, as values.
fn ids_of(plains: &[Record]) -> Vec<Value> {
    plains
        .iter()
        .filter_map(|plain| plain.id().to_key())
        .map(Value::from)
        .collect()
}
