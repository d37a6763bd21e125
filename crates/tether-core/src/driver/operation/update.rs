use super::{Operation, Transaction};
use crate::stmt::{Filter, Record};

#[derive(Debug, Clone)]
pub struct Update {
    pub table: String,

    pub filter: Filter,

    /// Columns to assign on every matching row.
    pub assignments: Record,

    pub transaction: Option<Transaction>,
}

impl From<Update> for Operation {
    fn from(value: Update) -> Self {
        Self::Update(value)
    }
}
