use super::{save as save_record, Exec, Saved};
use crate::{Filter, Model, Options, Record, Result, Value};

use tether_core::schema::relation::HasOne;

/// Detaches every other target row from the owner, then saves the payload
/// pointing at the owner. A `Null` payload only detaches.
pub(super) async fn save(
    model: &Model,
    exec: &Exec,
    owner: &Record,
    rel: &HasOne,
    payload: Value,
    options: &Options,
) -> Result<Saved> {
    let target = model.related(&rel.target);
    let owner_id = owner.id().clone();

    let plain = match &payload {
        Value::Null => None,
        payload => Some(target.state().adapter.to_plain(payload)?),
    };

    let mut others = Filter::eq(rel.foreign_key.as_str(), owner_id.clone());
    if let Some(id) = plain.as_ref().map(|plain| plain.id()).filter(|id| !id.is_null()) {
        others = others.and(Filter::ne("id", id.clone()));
    }

    exec.update_where(
        &rel.target,
        others,
        Record::new().with(rel.foreign_key.as_str(), Value::Null),
    )
    .await?;

    let value = match plain {
        Some(plain) => {
            let child = plain.with(rel.foreign_key.as_str(), owner_id);
            Value::Record(save_record(&target, Value::Record(child), &options.nested(None)).await?)
        }
        None => Value::Null,
    };

    Ok(Saved {
        name: rel.name.clone(),
        value,
        owner_fields: Record::new(),
    })
}
