use super::{Operation, Transaction};
use crate::stmt::Filter;

#[derive(Debug, Clone)]
pub struct Delete {
    pub table: String,

    pub filter: Filter,

    pub transaction: Option<Transaction>,
}

impl From<Delete> for Operation {
    fn from(value: Delete) -> Self {
        Self::Delete(value)
    }
}
