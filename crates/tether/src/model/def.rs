use crate::hooks::{guard_hook, notify_hook, transform_hook, Hooks};
use crate::json::Context;
use crate::{Declaration, Record, RecordAdapter, Result, Timestamps, Value};

use indexmap::IndexMap;
use std::sync::Arc;

/// Value used for a field the caller left out.
#[derive(Clone)]
pub enum FieldDefault {
    Value(Value),
    Generate(Arc<dyn Fn(&Record) -> Value + Send + Sync>),
}

impl FieldDefault {
    pub(crate) fn produce(&self, record: &Record) -> Value {
        match self {
            FieldDefault::Value(value) => value.clone(),
            FieldDefault::Generate(f) => f(record),
        }
    }
}

impl core::fmt::Debug for FieldDefault {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FieldDefault::Value(value) => f.debug_tuple("Value").field(value).finish(),
            FieldDefault::Generate(_) => f.write_str("Generate(..)"),
        }
    }
}

/// Definition of a model, registered with [`crate::db::Builder::register`].
///
/// ```ignore
/// let users = ModelDef::new("users")
///     .belongs_to("team")
///     .has_and_belongs_to_many("projects")
///     .before_save(|user| Ok(user.set("saveCount", 1).into()));
/// ```
pub struct ModelDef {
    pub(crate) table: String,
    pub(crate) declarations: IndexMap<String, Declaration>,
    pub(crate) hooks: Hooks,
    pub(crate) timestamps: Option<Timestamps>,
    pub(crate) defaults: IndexMap<String, FieldDefault>,
    pub(crate) adapter: Option<Arc<dyn RecordAdapter>>,
    pub(crate) contexts: IndexMap<String, Context>,
}

impl ModelDef {
    pub fn new(table: impl Into<String>) -> ModelDef {
        ModelDef {
            table: table.into(),
            declarations: IndexMap::new(),
            hooks: Hooks::default(),
            timestamps: None,
            defaults: IndexMap::new(),
            adapter: None,
            contexts: IndexMap::new(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Declares a relation under `name`.
    pub fn relation(mut self, name: impl Into<String>, declaration: Declaration) -> ModelDef {
        self.declarations.insert(name.into(), declaration);
        self
    }

    pub fn belongs_to(self, name: &str) -> ModelDef {
        self.relation(name, Declaration::belongs_to(name))
    }

    pub fn has_one(self, name: &str) -> ModelDef {
        self.relation(name, Declaration::has_one(name))
    }

    pub fn has_many(self, name: &str) -> ModelDef {
        self.relation(name, Declaration::has_many(name))
    }

    pub fn has_and_belongs_to_many(self, name: &str) -> ModelDef {
        self.relation(name, Declaration::has_and_belongs_to_many(name))
    }

    /// Overrides the database-wide timestamp columns for this model.
    pub fn timestamps(mut self, timestamps: Timestamps) -> ModelDef {
        self.timestamps = Some(timestamps);
        self
    }

    pub fn default_value(mut self, field: impl Into<String>, value: impl Into<Value>) -> ModelDef {
        self.defaults
            .insert(field.into(), FieldDefault::Value(value.into()));
        self
    }

    /// Computes a default from the fields being saved.
    pub fn default_with(
        mut self,
        field: impl Into<String>,
        f: impl Fn(&Record) -> Value + Send + Sync + 'static,
    ) -> ModelDef {
        self.defaults
            .insert(field.into(), FieldDefault::Generate(Arc::new(f)));
        self
    }

    /// Replaces the UUID v4 id generator.
    pub fn id_generator(self, f: impl Fn(&Record) -> Value + Send + Sync + 'static) -> ModelDef {
        self.default_with("id", f)
    }

    pub fn adapter(mut self, adapter: impl RecordAdapter) -> ModelDef {
        self.adapter = Some(Arc::new(adapter));
        self
    }

    /// A JSON context listing the fields to render. `["*"]` renders all.
    pub fn context<I, S>(mut self, name: impl Into<String>, fields: I) -> ModelDef
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.contexts.insert(
            name.into(),
            Context::Fields(fields.into_iter().map(Into::into).collect()),
        );
        self
    }

    /// A JSON context computed by a function.
    pub fn context_with(
        mut self,
        name: impl Into<String>,
        f: impl Fn(&Record) -> Record + Send + Sync + 'static,
    ) -> ModelDef {
        self.contexts.insert(name.into(), Context::Map(Arc::new(f)));
        self
    }

    /// Runs before an insert. Must return a record.
    pub fn before_create(
        mut self,
        f: impl Fn(Record) -> Result<Value> + Send + Sync + 'static,
    ) -> ModelDef {
        self.hooks.before_create = Some(transform_hook(f));
        self
    }

    /// Runs before every insert or update. Must return a record.
    pub fn before_save(
        mut self,
        f: impl Fn(Record) -> Result<Value> + Send + Sync + 'static,
    ) -> ModelDef {
        self.hooks.before_save = Some(transform_hook(f));
        self
    }

    pub fn after_save(mut self, f: impl Fn(&Record) -> Result<()> + Send + Sync + 'static) -> ModelDef {
        self.hooks.after_save = Some(notify_hook(f));
        self
    }

    pub fn after_create(
        mut self,
        f: impl Fn(&Record) -> Result<()> + Send + Sync + 'static,
    ) -> ModelDef {
        self.hooks.after_create = Some(notify_hook(f));
        self
    }

    /// Returning `false` turns the destroy into a no-op.
    pub fn before_destroy(
        mut self,
        f: impl Fn(&Record) -> Result<bool> + Send + Sync + 'static,
    ) -> ModelDef {
        self.hooks.before_destroy = Some(guard_hook(f));
        self
    }

    pub fn after_destroy(
        mut self,
        f: impl Fn(&Record) -> Result<()> + Send + Sync + 'static,
    ) -> ModelDef {
        self.hooks.after_destroy = Some(notify_hook(f));
        self
    }
}

impl core::fmt::Debug for ModelDef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ModelDef")
            .field("table", &self.table)
            .field("declarations", &self.declarations)
            .field("timestamps", &self.timestamps)
            .field("defaults", &self.defaults)
            .finish()
    }
}
