use super::{save as save_record, Exec, Saved};
use crate::{Model, Options, Record, Result, Value};

use chrono::{DateTime, Utc};
use tether_core::schema::relation::BelongsTo;

/// Saves the target, then points the owner's foreign key at it. A `Null`
/// payload clears the foreign key.
pub(super) async fn save(
    model: &Model,
    exec: &Exec,
    owner: &Record,
    rel: &BelongsTo,
    payload: Value,
    options: &Options,
    now: DateTime<Utc>,
) -> Result<Saved> {
    let state = model.state();

    if payload.is_null() {
        let assignments = Record::new().with(rel.foreign_key.as_str(), Value::Null);
        exec.update(state.table(), owner.id(), assignments.clone())
            .await?;

        return Ok(Saved {
            name: rel.name.clone(),
            value: Value::Null,
            owner_fields: assignments,
        });
    }

    let target = model.related(&rel.target);
    let saved = save_record(&target, payload, &options.nested(None)).await?;
    let target_id = target
        .state()
        .adapter
        .to_plain(&Value::Record(saved.clone()))?
        .id()
        .clone();

    let mut assignments = Record::new().with(rel.foreign_key.as_str(), target_id);

    if rel.touch {
        if let (Some(column), Some(at)) = (&state.timestamps.updated_at, options.touch.stamp(now)) {
            assignments = assignments.with(column.as_str(), at);
        }
    }

    exec.update(state.table(), owner.id(), assignments.clone())
        .await?;

    Ok(Saved {
        name: rel.name.clone(),
        value: Value::Record(saved),
        owner_fields: assignments,
    })
}
