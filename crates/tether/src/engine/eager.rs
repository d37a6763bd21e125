use super::{graft, Exec};
use crate::{Model, Options, Record, Relation, Result, Value};

use futures_util::future::try_join_all;

/// Rows fetched for one relation, before grafting.
enum Loaded {
    Targets(Vec<Record>),
    Joined {
        joins: Vec<Record>,
        targets: Vec<Record>,
    },
}

/// Grafts each relation named in `include` onto `owners`.
///
/// Every relation costs at most two queries regardless of the number of
/// owners. Relations load concurrently. Nested rows are handed back in the
/// target model's record form.
pub(crate) async fn load(
    model: &Model,
    owners: Vec<Record>,
    include: &[String],
    options: &Options,
) -> Result<Vec<Record>> {
    if include.is_empty() {
        return Ok(owners);
    }

    let relations = include
        .iter()
        .map(|name| model.state().relation(name))
        .collect::<Result<Vec<_>>>()?;

    if owners.is_empty() {
        return Ok(owners);
    }

    let exec = model.exec(options)?;

    let loaded = try_join_all(
        relations
            .iter()
            .map(|relation| fetch(&exec, relation, &owners)),
    )
    .await?;

    let mut owners = owners;
    for (relation, loaded) in relations.iter().zip(loaded) {
        owners = attach(relation, owners, loaded);
        owners = wrap(model, relation, owners);
    }

    Ok(owners)
}

async fn fetch(exec: &Exec, relation: &Relation, owners: &[Record]) -> Result<Loaded> {
    tracing::trace!(relation = relation.name(), owners = owners.len(), "eager load");

    let targets = match relation {
        Relation::BelongsTo(rel) => {
            let ids = graft::collect_keys(owners, &rel.foreign_key);
            exec.select_by_ids(&rel.target, "id", ids).await?
        }
        Relation::HasOne(_) | Relation::HasMany(_) => {
            let ids = graft::collect_keys(owners, "id");
            exec.select_by_ids(relation.target(), relation.foreign_key(), ids)
                .await?
        }
        Relation::HasAndBelongsToMany(rel) => {
            let ids = graft::collect_keys(owners, "id");
            let joins = exec
                .select_by_ids(&rel.join_table, &rel.source_key, ids)
                .await?;

            let target_ids = graft::collect_keys(&joins, &rel.foreign_key);
            let targets = exec.select_by_ids(&rel.target, "id", target_ids).await?;

            return Ok(Loaded::Joined { joins, targets });
        }
    };

    Ok(Loaded::Targets(targets))
}

fn attach(relation: &Relation, owners: Vec<Record>, loaded: Loaded) -> Vec<Record> {
    match (relation, loaded) {
        (Relation::BelongsTo(rel), Loaded::Targets(targets)) => {
            graft::belongs_to(owners, &rel.name, &rel.foreign_key, targets)
        }
        (Relation::HasOne(rel), Loaded::Targets(targets)) => {
            graft::has_one(owners, &rel.name, &rel.foreign_key, targets)
        }
        (Relation::HasMany(rel), Loaded::Targets(targets)) => {
            graft::has_many(owners, &rel.name, &rel.foreign_key, targets)
        }
        (Relation::HasAndBelongsToMany(rel), Loaded::Joined { joins, targets }) => {
            graft::has_and_belongs_to_many(
                owners,
                &rel.name,
                &rel.source_key,
                &rel.foreign_key,
                &joins,
                targets,
            )
        }
        (relation, _) => unreachable!("fetch result does not match relation {relation:?}"),
    }
}

/// Converts the nested rows under the relation into the target model's
/// record form.
fn wrap(model: &Model, relation: &Relation, owners: Vec<Record>) -> Vec<Record> {
    let target = model.related(relation.target());
    let adapter = &target.state().adapter;

    owners
        .into_iter()
        .map(|owner| {
            let nested = match owner.get_or_null(relation.name()) {
                Value::Record(row) => Value::Record(adapter.from_plain(row.clone())),
                Value::List(rows) => Value::List(
                    rows.iter()
                        .map(|row| match row {
                            Value::Record(row) => Value::Record(adapter.from_plain(row.clone())),
                            other => other.clone(),
                        })
                        .collect(),
                ),
                other => other.clone(),
            };
            owner.with(relation.name(), nested)
        })
        .collect()
}
