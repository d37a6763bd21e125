mod belongs_to;
pub use belongs_to::BelongsTo;

mod has_and_belongs_to_many;
pub use has_and_belongs_to_many::HasAndBelongsToMany;

mod has_many;
pub use has_many::HasMany;

mod has_one;
pub use has_one::HasOne;

use super::RelationKind;

/// A fully resolved relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relation {
    BelongsTo(BelongsTo),
    HasOne(HasOne),
    HasMany(HasMany),
    HasAndBelongsToMany(HasAndBelongsToMany),
}

impl Relation {
    pub fn name(&self) -> &str {
        match self {
            Relation::BelongsTo(rel) => &rel.name,
            Relation::HasOne(rel) => &rel.name,
            Relation::HasMany(rel) => &rel.name,
            Relation::HasAndBelongsToMany(rel) => &rel.name,
        }
    }

    pub fn kind(&self) -> RelationKind {
        match self {
            Relation::BelongsTo(_) => RelationKind::BelongsTo,
            Relation::HasOne(_) => RelationKind::HasOne,
            Relation::HasMany(_) => RelationKind::HasMany,
            Relation::HasAndBelongsToMany(_) => RelationKind::HasAndBelongsToMany,
        }
    }

    /// Table holding the target rows.
    pub fn target(&self) -> &str {
        match self {
            Relation::BelongsTo(rel) => &rel.target,
            Relation::HasOne(rel) => &rel.target,
            Relation::HasMany(rel) => &rel.target,
            Relation::HasAndBelongsToMany(rel) => &rel.target,
        }
    }

    pub fn foreign_key(&self) -> &str {
        match self {
            Relation::BelongsTo(rel) => &rel.foreign_key,
            Relation::HasOne(rel) => &rel.foreign_key,
            Relation::HasMany(rel) => &rel.foreign_key,
            Relation::HasAndBelongsToMany(rel) => &rel.foreign_key,
        }
    }

    /// Whether the payload under this relation is a list.
    pub fn is_many(&self) -> bool {
        matches!(
            self,
            Relation::HasMany(_) | Relation::HasAndBelongsToMany(_)
        )
    }

    /// Whether destroying the owner removes associated rows (or join rows).
    /// Many-to-many join rows are always removed.
    pub fn cleans_on_destroy(&self) -> bool {
        self.cleanup().is_some()
    }

    /// Table and column of the rows to delete when the owner is destroyed:
    /// the join rows for many-to-many, the target rows for a dependent
    /// has-one or has-many.
    pub fn cleanup(&self) -> Option<(&str, &str)> {
        match self {
            Relation::BelongsTo(_) => None,
            Relation::HasOne(rel) if rel.dependent => Some((&rel.target, &rel.foreign_key)),
            Relation::HasMany(rel) if rel.dependent => Some((&rel.target, &rel.foreign_key)),
            Relation::HasOne(_) | Relation::HasMany(_) => None,
            Relation::HasAndBelongsToMany(rel) => Some((&rel.join_table, &rel.source_key)),
        }
    }
}
