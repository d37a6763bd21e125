use crate::{Model, Record, Value};

use std::sync::Arc;

/// A named way of rendering a model's records as JSON.
#[derive(Clone)]
pub enum Context {
    /// Render only these fields, in this order. Empty or `["*"]` renders
    /// every field. Relation fields are rendered by the target model under
    /// the same context name.
    Fields(Vec<String>),

    /// Render whatever the function returns.
    Map(Arc<dyn Fn(&Record) -> Record + Send + Sync>),
}

impl core::fmt::Debug for Context {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Context::Fields(fields) => f.debug_tuple("Fields").field(fields).finish(),
            Context::Map(_) => f.write_str("Map(..)"),
        }
    }
}

/// Renders a record or list of records through the model's `context`,
/// falling back to the `default` context, then to every field.
pub(crate) fn render(model: &Model, value: &Value, context: &str) -> serde_json::Value {
    match value {
        Value::List(items) => {
            serde_json::Value::Array(items.iter().map(|item| render(model, item, context)).collect())
        }
        Value::Record(record) => render_record(model, record, context),
        other => other.to_json(),
    }
}

fn render_record(model: &Model, record: &Record, context: &str) -> serde_json::Value {
    match model.state().context(context) {
        Some(Context::Map(f)) => f(record).to_json(),
        Some(Context::Fields(fields)) if !selects_all(fields) => {
            let mut out = serde_json::Map::new();

            for field in fields {
                let Some(value) = record.get(field) else {
                    continue;
                };

                let rendered = match model.state().relation(field) {
                    Ok(relation) => render(&model.related(relation.target()), value, context),
                    Err(_) => value.to_json(),
                };
                out.insert(field.clone(), rendered);
            }

            serde_json::Value::Object(out)
        }
        _ => record.to_json(),
    }
}

fn selects_all(fields: &[String]) -> bool {
    fields.first().map_or(true, |first| first == "*")
}
