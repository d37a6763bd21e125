use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Introspected description of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnInfo {
    /// Database type name as reported by the executor.
    #[serde(rename = "type")]
    pub ty: String,

    pub nullable: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// Columns of a table keyed by name, in table order.
pub type Columns = IndexMap<String, ColumnInfo>;
