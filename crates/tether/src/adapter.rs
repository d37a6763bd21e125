use crate::{Error, Record, Result, Value};

use std::sync::Arc;

/// Converts between the plain rows the engine works with and the records
/// callers see.
///
/// The default implementation is the identity. A custom adapter that changes
/// the shape of a record must also override [`RecordAdapter::is_instance`] so
/// the engine can tell its records apart from plain payloads.
pub trait RecordAdapter: Send + Sync + 'static {
    /// Builds the caller-visible record from a plain row.
    fn factory(&self, plain: Record) -> Record {
        plain
    }

    /// Produces the plain fields for a caller-visible record. Must return a
    /// `Value::Record`.
    fn serialize(&self, instance: &Record) -> Value {
        Value::Record(instance.clone())
    }

    /// Whether `value` was produced by [`RecordAdapter::factory`].
    fn is_instance(&self, value: &Value) -> bool {
        value.is_record()
    }
}

/// The identity adapter used when a model does not supply its own.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultAdapter;

impl RecordAdapter for DefaultAdapter {}

/// A model's adapter together with the table name used in error reports.
#[derive(Clone)]
pub(crate) struct Adapter {
    table: String,
    inner: Arc<dyn RecordAdapter>,
}

impl Adapter {
    pub(crate) fn new(table: impl Into<String>, inner: Arc<dyn RecordAdapter>) -> Adapter {
        Adapter {
            table: table.into(),
            inner,
        }
    }

    pub(crate) fn to_plain(&self, value: &Value) -> Result<Record> {
        if self.inner.is_instance(value) {
            if let Value::Record(instance) = value {
                if let Value::Record(plain) = self.inner.serialize(instance) {
                    return Ok(plain);
                }
            }
            return Err(Error::serialize_contract(&self.table));
        }

        match value {
            Value::Record(plain) => Ok(plain.clone()),
            _ => Err(Error::serialize_contract(&self.table)),
        }
    }

    pub(crate) fn from_plain(&self, plain: Record) -> Record {
        self.inner.factory(plain)
    }

    pub(crate) fn is_instance(&self, value: &Value) -> bool {
        self.inner.is_instance(value)
    }
}

impl Default for Adapter {
    fn default() -> Self {
        Adapter::new("", Arc::new(DefaultAdapter))
    }
}

impl core::fmt::Debug for Adapter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Adapter").field("table", &self.table).finish()
    }
}
