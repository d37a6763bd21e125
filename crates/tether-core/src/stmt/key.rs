use super::Value;

/// Hashable form of an id or foreign-key value.
///
/// Grafting matches owners to targets by comparing keys. Values that are not
/// integers or strings never produce a key and therefore never match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    I64(i64),
    String(String),
}

impl Key {
    pub fn from_value(value: &Value) -> Option<Key> {
        match value {
            Value::I64(v) => Some(Key::I64(*v)),
            Value::String(v) => Some(Key::String(v.clone())),
            _ => None,
        }
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Value {
        match key {
            Key::I64(v) => Value::I64(v),
            Key::String(v) => Value::String(v),
        }
    }
}

impl From<&Key> for Value {
    fn from(key: &Key) -> Value {
        key.clone().into()
    }
}

impl core::fmt::Display for Key {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Key::I64(v) => write!(f, "{v}"),
            Key::String(v) => f.write_str(v),
        }
    }
}
