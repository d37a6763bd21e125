use super::{FieldDefault, ModelDef};
use crate::adapter::{Adapter, DefaultAdapter};
use crate::hooks::{Dispatcher, Hooks};
use crate::json::Context;
use crate::{Error, Record, Relation, Result, Timestamps, Value};

use indexmap::IndexMap;
use std::sync::Arc;
use tether_core::schema::{self, Columns};
use tokio::sync::OnceCell;

/// A registered model with every relation resolved.
#[derive(Debug)]
pub(crate) struct ModelState {
    table: String,

    /// `None` marks a declaration without a recognized kind.
    relations: IndexMap<String, Option<Relation>>,

    hooks: Hooks,

    pub(crate) timestamps: Timestamps,

    id: FieldDefault,

    defaults: IndexMap<String, FieldDefault>,

    pub(crate) adapter: Adapter,

    pub(crate) contexts: IndexMap<String, Context>,

    /// Fetched at most once.
    columns: OnceCell<Columns>,
}

impl ModelState {
    pub(crate) fn new(def: ModelDef, timestamps: &Timestamps) -> ModelState {
        let ModelDef {
            table,
            declarations,
            hooks,
            timestamps: own_timestamps,
            mut defaults,
            adapter,
            contexts,
        } = def;

        let relations = declarations
            .iter()
            .map(|(name, decl)| (name.clone(), schema::resolve(&table, name, decl)))
            .collect();

        let id = defaults
            .shift_remove("id")
            .unwrap_or_else(|| FieldDefault::Generate(Arc::new(generate_id)));

        let adapter = Adapter::new(&table, adapter.unwrap_or_else(|| Arc::new(DefaultAdapter)));

        ModelState {
            table,
            relations,
            hooks,
            timestamps: own_timestamps.unwrap_or_else(|| timestamps.clone()),
            id,
            defaults,
            adapter,
            contexts,
            columns: OnceCell::new(),
        }
    }

    pub(crate) fn table(&self) -> &str {
        &self.table
    }

    /// Whether `field` names a declared relation, resolvable or not.
    pub(crate) fn is_relation(&self, field: &str) -> bool {
        self.relations.contains_key(field)
    }

    pub(crate) fn relation(&self, name: &str) -> Result<&Relation> {
        self.relations
            .get(name)
            .and_then(Option::as_ref)
            .ok_or_else(|| Error::unknown_relation(&self.table, name))
    }

    /// Resolved relations, skipping declarations without a kind.
    pub(crate) fn relations(&self) -> impl Iterator<Item = &Relation> {
        self.relations.values().flatten()
    }

    pub(crate) fn dispatcher(&self) -> Dispatcher<'_> {
        Dispatcher {
            hooks: &self.hooks,
            adapter: &self.adapter,
            table: &self.table,
        }
    }

    /// Gives the record an id when it lacks one. Returns whether an id was
    /// generated.
    pub(crate) fn ensure_id(&self, plain: Record) -> (Record, bool) {
        if !plain.id().is_null() {
            return (plain, false);
        }
        let id = self.id.produce(&plain);
        (plain.with("id", id), true)
    }

    /// Fills every field the record leaves out and that has a default.
    pub(crate) fn apply_defaults(&self, mut plain: Record) -> Record {
        for (field, default) in &self.defaults {
            if !plain.contains(field) {
                let value = default.produce(&plain);
                plain = plain.with(field.as_str(), value);
            }
        }
        plain
    }

    pub(crate) fn columns(&self) -> &OnceCell<Columns> {
        &self.columns
    }

    pub(crate) fn context(&self, name: &str) -> Option<&Context> {
        self.contexts
            .get(name)
            .or_else(|| self.contexts.get("default"))
    }
}

fn generate_id(_: &Record) -> Value {
    Value::String(uuid::Uuid::new_v4().to_string())
}
