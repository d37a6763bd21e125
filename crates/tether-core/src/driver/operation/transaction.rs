use super::{Operation, Transaction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionOp {
    /// Start a transaction. The driver answers with a new handle.
    Begin,

    /// Commit a transaction
    Commit(Transaction),

    /// Rollback a transaction
    Rollback(Transaction),
}

impl TransactionOp {
    pub fn transaction(&self) -> Option<Transaction> {
        match self {
            TransactionOp::Begin => None,
            TransactionOp::Commit(tx) | TransactionOp::Rollback(tx) => Some(*tx),
        }
    }
}

impl From<TransactionOp> for Operation {
    fn from(value: TransactionOp) -> Self {
        Operation::Transaction(value)
    }
}
