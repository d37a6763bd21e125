use super::relation::{BelongsTo, HasAndBelongsToMany, HasMany, HasOne};
use super::{Declaration, Relation, RelationKind};

use std_util::str::{pluralize, singularize};

/// Applies defaults to a relation declaration.
///
/// Returns `None` when the declaration names no kind; callers keep the name
/// around so that using it reports an unknown relation.
pub fn resolve(owner: &str, name: &str, decl: &Declaration) -> Option<Relation> {
    let kind = decl.kind?;

    let target = decl
        .table
        .clone()
        .unwrap_or_else(|| pluralize(decl.target.as_deref().unwrap_or(name)));

    let relation = match kind {
        RelationKind::BelongsTo => Relation::BelongsTo(BelongsTo {
            name: name.to_string(),
            target,
            foreign_key: decl
                .foreign_key
                .clone()
                .unwrap_or_else(|| key_column(name)),
            touch: decl.touch,
        }),
        RelationKind::HasOne => Relation::HasOne(HasOne {
            name: name.to_string(),
            target,
            foreign_key: decl
                .foreign_key
                .clone()
                .unwrap_or_else(|| key_column(owner)),
            dependent: decl.dependent,
        }),
        RelationKind::HasMany => Relation::HasMany(HasMany {
            name: name.to_string(),
            target,
            foreign_key: decl
                .foreign_key
                .clone()
                .unwrap_or_else(|| key_column(owner)),
            dependent: decl.dependent,
        }),
        RelationKind::HasAndBelongsToMany => {
            let join_table = decl.through.clone().unwrap_or_else(|| {
                let mut tables = [owner.to_string(), pluralize(name)];
                tables.sort();
                tables.join("_")
            });

            Relation::HasAndBelongsToMany(HasAndBelongsToMany {
                name: name.to_string(),
                target,
                foreign_key: decl
                    .foreign_key
                    .clone()
                    .unwrap_or_else(|| key_column(name)),
                source_key: decl
                    .primary_key
                    .clone()
                    .unwrap_or_else(|| key_column(owner)),
                join_table,
            })
        }
    };

    Some(relation)
}

/// `users` -> `userId`
fn key_column(word: &str) -> String {
    format!("{}Id", singularize(word))
}
