use crate::adapter::Adapter;
use crate::{Error, Record, Result, Value};

use std::sync::Arc;

pub(crate) type TransformHook = Arc<dyn Fn(Record) -> Result<Value> + Send + Sync>;
pub(crate) type NotifyHook = Arc<dyn Fn(&Record) -> Result<()> + Send + Sync>;
pub(crate) type GuardHook = Arc<dyn Fn(&Record) -> Result<bool> + Send + Sync>;

pub(crate) fn transform_hook(
    f: impl Fn(Record) -> Result<Value> + Send + Sync + 'static,
) -> TransformHook {
    Arc::new(f)
}

pub(crate) fn notify_hook(f: impl Fn(&Record) -> Result<()> + Send + Sync + 'static) -> NotifyHook {
    Arc::new(f)
}

pub(crate) fn guard_hook(f: impl Fn(&Record) -> Result<bool> + Send + Sync + 'static) -> GuardHook {
    Arc::new(f)
}

/// Lifecycle callbacks registered on a model.
#[derive(Default, Clone)]
pub(crate) struct Hooks {
    pub(crate) before_create: Option<TransformHook>,
    pub(crate) before_save: Option<TransformHook>,
    pub(crate) after_save: Option<NotifyHook>,
    pub(crate) after_create: Option<NotifyHook>,
    pub(crate) before_destroy: Option<GuardHook>,
    pub(crate) after_destroy: Option<NotifyHook>,
}

impl core::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hooks")
            .field("before_create", &self.before_create.is_some())
            .field("before_save", &self.before_save.is_some())
            .field("after_save", &self.after_save.is_some())
            .field("after_create", &self.after_create.is_some())
            .field("before_destroy", &self.before_destroy.is_some())
            .field("after_destroy", &self.after_destroy.is_some())
            .finish()
    }
}

/// Runs hooks for one model, converting between plain rows and the
/// caller-visible form at this boundary only.
pub(crate) struct Dispatcher<'a> {
    pub(crate) hooks: &'a Hooks,
    pub(crate) adapter: &'a Adapter,
    pub(crate) table: &'a str,
}

impl Dispatcher<'_> {
    /// Runs `before_create` (when inserting) then `before_save` over the plain
    /// scalar fields.
    pub(crate) fn before_save(&self, plain: Record, inserting: bool) -> Result<Record> {
        if self.hooks.before_create.is_none() && self.hooks.before_save.is_none() {
            return Ok(plain);
        }

        let mut instance = self.adapter.from_plain(plain);

        if inserting {
            if let Some(hook) = &self.hooks.before_create {
                instance = self.transform("before_create", hook, instance)?;
            }
        }

        if let Some(hook) = &self.hooks.before_save {
            instance = self.transform("before_save", hook, instance)?;
        }

        self.adapter.to_plain(&Value::Record(instance))
    }

    fn transform(&self, name: &str, hook: &TransformHook, instance: Record) -> Result<Record> {
        let ret = hook(instance)?;

        if !ret.is_record() && !self.adapter.is_instance(&ret) {
            return Err(Error::hook_contract(name, self.table));
        }

        ret.into_record()
            .map_err(|_| Error::hook_contract(name, self.table))
    }

    /// Runs `after_save` then, for inserts, `after_create`. Return values are
    /// ignored; errors propagate.
    pub(crate) fn after_save(&self, instance: &Record, inserted: bool) -> Result<()> {
        if let Some(hook) = &self.hooks.after_save {
            hook(instance)?;
        }

        if inserted {
            if let Some(hook) = &self.hooks.after_create {
                hook(instance)?;
            }
        }

        Ok(())
    }

    /// Returns `false` when `before_destroy` vetoes the destroy.
    pub(crate) fn before_destroy(&self, instance: &Record) -> Result<bool> {
        match &self.hooks.before_destroy {
            Some(hook) => hook(instance),
            None => Ok(true),
        }
    }

    pub(crate) fn after_destroy(&self, instance: &Record) -> Result<()> {
        match &self.hooks.after_destroy {
            Some(hook) => hook(instance),
            None => Ok(()),
        }
    }
}
