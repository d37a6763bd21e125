/// The four association shapes the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    BelongsTo,
    HasOne,
    HasMany,
    HasAndBelongsToMany,
}

/// A relation as written by the user, before defaults are applied.
///
/// Every field other than `kind` is an optional override. A declaration
/// without a kind is accepted at registration; using it later fails with an
/// unknown relation error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declaration {
    pub kind: Option<RelationKind>,

    /// Declared target name, e.g. `project` in `belongs_to("project")`.
    /// Falls back to the relation name.
    pub target: Option<String>,

    /// Explicit target table, used verbatim.
    pub table: Option<String>,

    pub foreign_key: Option<String>,

    /// Join-table column referencing the owner (many-to-many only).
    pub primary_key: Option<String>,

    /// Join table name (many-to-many only).
    pub through: Option<String>,

    pub dependent: bool,

    /// Re-stamp the owner's update timestamp when the target is saved
    /// through this relation (belongs-to only).
    pub touch: bool,
}

impl Declaration {
    fn of(kind: RelationKind, target: Option<String>) -> Declaration {
        Declaration {
            kind: Some(kind),
            target,
            ..Declaration::default()
        }
    }

    pub fn belongs_to(target: impl Into<String>) -> Declaration {
        Declaration::of(RelationKind::BelongsTo, Some(target.into()))
    }

    pub fn has_one(target: impl Into<String>) -> Declaration {
        Declaration::of(RelationKind::HasOne, Some(target.into()))
    }

    pub fn has_many(target: impl Into<String>) -> Declaration {
        Declaration::of(RelationKind::HasMany, Some(target.into()))
    }

    pub fn has_and_belongs_to_many(target: impl Into<String>) -> Declaration {
        Declaration::of(RelationKind::HasAndBelongsToMany, Some(target.into()))
    }

    /// A declaration carrying no kind.
    pub fn untyped() -> Declaration {
        Declaration::default()
    }

    pub fn table(mut self, table: impl Into<String>) -> Declaration {
        self.table = Some(table.into());
        self
    }

    pub fn foreign_key(mut self, column: impl Into<String>) -> Declaration {
        self.foreign_key = Some(column.into());
        self
    }

    pub fn primary_key(mut self, column: impl Into<String>) -> Declaration {
        self.primary_key = Some(column.into());
        self
    }

    pub fn through(mut self, table: impl Into<String>) -> Declaration {
        self.through = Some(table.into());
        self
    }

    pub fn dependent(mut self, dependent: bool) -> Declaration {
        self.dependent = dependent;
        self
    }

    pub fn touch(mut self, touch: bool) -> Declaration {
        self.touch = touch;
        self
    }
}
