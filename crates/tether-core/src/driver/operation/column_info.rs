use super::Operation;
use crate::driver::Transaction;

#[derive(Debug, Clone)]
pub struct ColumnInfo {
    pub table: String,

    /// Introspection sees the table as it is inside this transaction.
    pub transaction: Option<Transaction>,
}

impl From<ColumnInfo> for Operation {
    fn from(value: ColumnInfo) -> Self {
        Self::ColumnInfo(value)
    }
}
