mod column_info;
pub use column_info::ColumnInfo;

mod delete;
pub use delete::Delete;

mod insert;
pub use insert::Insert;

mod select;
pub use select::Select;

mod transaction;
pub use transaction::TransactionOp;

mod update;
pub use update::Update;

use super::Transaction;

#[derive(Debug, Clone)]
pub enum Operation {
    /// Introspect the columns of a table
    ColumnInfo(ColumnInfo),

    /// Delete every row matching a filter
    Delete(Delete),

    /// Insert one row, returning it as persisted
    Insert(Insert),

    /// Read rows matching a filter
    Select(Select),

    /// Execute a transaction lifecycle op
    Transaction(TransactionOp),

    /// Update every row matching a filter, returning the updated rows
    Update(Update),
}

impl Operation {
    /// Table the operation targets, if any.
    pub fn table(&self) -> Option<&str> {
        match self {
            Operation::ColumnInfo(op) => Some(&op.table),
            Operation::Delete(op) => Some(&op.table),
            Operation::Insert(op) => Some(&op.table),
            Operation::Select(op) => Some(&op.table),
            Operation::Update(op) => Some(&op.table),
            Operation::Transaction(_) => None,
        }
    }

    /// Transaction the operation was issued under.
    pub fn transaction(&self) -> Option<Transaction> {
        match self {
            Operation::ColumnInfo(op) => op.transaction,
            Operation::Delete(op) => op.transaction,
            Operation::Insert(op) => op.transaction,
            Operation::Select(op) => op.transaction,
            Operation::Update(op) => op.transaction,
            Operation::Transaction(op) => op.transaction(),
        }
    }

    pub fn is_select(&self) -> bool {
        matches!(self, Operation::Select(_))
    }

    pub fn is_insert(&self) -> bool {
        matches!(self, Operation::Insert(_))
    }

    pub fn is_update(&self) -> bool {
        matches!(self, Operation::Update(_))
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, Operation::Delete(_))
    }

    pub fn is_column_info(&self) -> bool {
        matches!(self, Operation::ColumnInfo(_))
    }

    /// Short verb used in log output.
    pub fn verb(&self) -> &'static str {
        match self {
            Operation::ColumnInfo(_) => "column_info",
            Operation::Delete(_) => "delete",
            Operation::Insert(_) => "insert",
            Operation::Select(_) => "select",
            Operation::Update(_) => "update",
            Operation::Transaction(TransactionOp::Begin) => "begin",
            Operation::Transaction(TransactionOp::Commit(_)) => "commit",
            Operation::Transaction(TransactionOp::Rollback(_)) => "rollback",
        }
    }
}
