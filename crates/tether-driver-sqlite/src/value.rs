use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use rusqlite::types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef};
use tether_core::stmt::Value as CoreValue;

/// Storage interpretation derived from a column's declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Affinity {
    Bool,
    Timestamp,
    Json,
    Other,
}

impl Affinity {
    pub(crate) fn from_decl(decl: &str) -> Affinity {
        let decl = decl.to_ascii_uppercase();

        if decl.contains("BOOL") {
            Affinity::Bool
        } else if decl.contains("TIMESTAMP") || decl.contains("DATE") {
            Affinity::Timestamp
        } else if decl.contains("JSON") {
            Affinity::Json
        } else {
            Affinity::Other
        }
    }
}

#[derive(Debug)]
pub(crate) struct Value(CoreValue);

impl From<CoreValue> for Value {
    fn from(value: CoreValue) -> Self {
        Self(value)
    }
}

impl Value {
    pub(crate) fn into_inner(self) -> CoreValue {
        self.0
    }

    /// Converts a SQLite cell to an engine value, guided by the column's
    /// declared type.
    pub(crate) fn from_sql(value: ValueRef<'_>, affinity: Affinity) -> Self {
        let core_value = match value {
            ValueRef::Null => CoreValue::Null,
            ValueRef::Integer(v) => match affinity {
                Affinity::Bool => CoreValue::Bool(v != 0),
                _ => CoreValue::I64(v),
            },
            ValueRef::Real(v) => CoreValue::F64(v),
            ValueRef::Text(bytes) => {
                let text = String::from_utf8_lossy(bytes).into_owned();
                match affinity {
                    Affinity::Timestamp => match parse_timestamp(&text) {
                        Some(at) => CoreValue::Timestamp(at),
                        None => CoreValue::String(text),
                    },
                    Affinity::Json => match serde_json::from_str(&text) {
                        Ok(json) => CoreValue::Json(json),
                        Err(_) => CoreValue::String(text),
                    },
                    _ => CoreValue::String(text),
                }
            }
            ValueRef::Blob(bytes) => CoreValue::String(String::from_utf8_lossy(bytes).into_owned()),
        };

        Value(core_value)
    }
}

/// Accepts RFC 3339 as written by this driver and SQLite's own
/// `CURRENT_TIMESTAMP` format.
fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Some(at.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f")
        .ok()
        .map(|at| at.and_utc())
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        use CoreValue::*;

        match &self.0 {
            Null => Ok(ToSqlOutput::Owned(SqlValue::Null)),
            Bool(true) => Ok(ToSqlOutput::Owned(SqlValue::Integer(1))),
            Bool(false) => Ok(ToSqlOutput::Owned(SqlValue::Integer(0))),
            I64(v) => Ok(ToSqlOutput::Owned(SqlValue::Integer(*v))),
            F64(v) => Ok(ToSqlOutput::Owned(SqlValue::Real(*v))),
            String(v) => Ok(ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes()))),
            Timestamp(at) => Ok(ToSqlOutput::Owned(SqlValue::Text(
                at.to_rfc3339_opts(SecondsFormat::Micros, true),
            ))),
            Json(json) => Ok(ToSqlOutput::Owned(SqlValue::Text(json.to_string()))),
            value @ (Record(_) | List(_)) => Ok(ToSqlOutput::Owned(SqlValue::Text(
                value.to_json().to_string(),
            ))),
        }
    }
}
