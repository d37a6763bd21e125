use super::{Operation, Transaction};
use crate::stmt::Record;

#[derive(Debug, Clone)]
pub struct Insert {
    pub table: String,

    /// Plain fields to write. Nested records and lists are stored as JSON.
    pub row: Record,

    pub transaction: Option<Transaction>,
}

impl From<Insert> for Operation {
    fn from(value: Insert) -> Self {
        Self::Insert(value)
    }
}
