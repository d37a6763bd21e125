use super::Value;

use indexmap::IndexMap;
use std::sync::Arc;

/// An immutable snapshot of one row.
///
/// Fields keep their insertion order. Cloning is cheap; every mutator returns
/// a new `Record` and leaves the receiver untouched.
#[derive(Default, Clone, PartialEq)]
pub struct Record {
    fields: Arc<IndexMap<String, Value>>,
}

impl Record {
    pub fn new() -> Record {
        Record::default()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns the field, treating a missing field as `Null`.
    pub fn get_or_null(&self, field: &str) -> &Value {
        static NULL: Value = Value::Null;
        self.fields.get(field).unwrap_or(&NULL)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// The `id` field, or `Null` when the record has none.
    pub fn id(&self) -> &Value {
        self.get_or_null("id")
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns a copy with `field` set to `value`.
    pub fn set(&self, field: impl Into<String>, value: impl Into<Value>) -> Record {
        self.clone().with(field, value)
    }

    /// Consuming form of [`Record::set`]. Avoids a copy when this is the only
    /// handle to the underlying fields.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Record {
        Arc::make_mut(&mut self.fields).insert(field.into(), value.into());
        self
    }

    /// Returns a copy without `field`.
    pub fn remove(&self, field: &str) -> Record {
        if !self.contains(field) {
            return self.clone();
        }
        let mut fields = (*self.fields).clone();
        fields.shift_remove(field);
        Record {
            fields: Arc::new(fields),
        }
    }

    /// Returns a copy with every field of `other` applied on top.
    pub fn merge(&self, other: &Record) -> Record {
        let mut ret = self.clone();
        if other.is_empty() {
            return ret;
        }
        let fields = Arc::make_mut(&mut ret.fields);
        for (field, value) in other.iter() {
            fields.insert(field.to_string(), value.clone());
        }
        ret
    }

    /// Returns a copy keeping only the fields for which `f` returns `true`.
    pub fn filter(&self, mut f: impl FnMut(&str, &Value) -> bool) -> Record {
        self.iter()
            .filter(|(field, value)| f(field, value))
            .map(|(field, value)| (field.to_string(), value.clone()))
            .collect()
    }

    /// Splits the record into the fields for which `f` returns `true` and the
    /// rest.
    pub fn partition(&self, mut f: impl FnMut(&str) -> bool) -> (Record, Record) {
        let mut matched = IndexMap::new();
        let mut rest = IndexMap::new();

        for (field, value) in self.fields.iter() {
            if f(field) {
                matched.insert(field.clone(), value.clone());
            } else {
                rest.insert(field.clone(), value.clone());
            }
        }

        (Record::from(matched), Record::from(rest))
    }
}

impl From<IndexMap<String, Value>> for Record {
    fn from(fields: IndexMap<String, Value>) -> Self {
        Record {
            fields: Arc::new(fields),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Record::from(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect::<IndexMap<_, _>>(),
        )
    }
}

impl core::fmt::Debug for Record {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.fields.iter()).finish()
    }
}

/// Builds a [`Record`] from `field => value` pairs.
#[macro_export]
macro_rules! record {
    () => {
        $crate::stmt::Record::new()
    };
    ( $( $field:expr => $value:expr ),+ $(,)? ) => {
        $crate::stmt::Record::new()
            $( .with($field, $value) )+
    };
}
