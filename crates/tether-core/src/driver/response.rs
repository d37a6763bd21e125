use super::Transaction;
use crate::{schema::Columns, stmt::Record, Error, Result};

#[derive(Debug, Clone)]
pub enum Response {
    /// Number of rows impacted by the operation
    Count(u64),

    /// Rows read or written by the operation
    Rows(Vec<Record>),

    /// Column introspection result
    Columns(Columns),

    /// Handle of a newly started transaction
    Transaction(Transaction),
}

impl Response {
    pub fn count(count: u64) -> Self {
        Response::Count(count)
    }

    pub fn rows(rows: impl Into<Vec<Record>>) -> Self {
        Response::Rows(rows.into())
    }

    pub fn empty_rows() -> Self {
        Response::Rows(vec![])
    }

    pub fn is_count(&self) -> bool {
        matches!(self, Response::Count(_))
    }

    pub fn is_rows(&self) -> bool {
        matches!(self, Response::Rows(_))
    }

    fn kind_name(&self) -> &'static str {
        match self {
            Response::Count(_) => "count",
            Response::Rows(_) => "rows",
            Response::Columns(_) => "columns",
            Response::Transaction(_) => "transaction",
        }
    }

    fn unexpected(&self, expected: &str) -> Error {
        Error::invalid_result(format!("expected {expected}, got {}", self.kind_name()))
    }

    pub fn into_count(self) -> Result<u64> {
        match self {
            Response::Count(count) => Ok(count),
            other => Err(other.unexpected("count")),
        }
    }

    pub fn into_rows(self) -> Result<Vec<Record>> {
        match self {
            Response::Rows(rows) => Ok(rows),
            other => Err(other.unexpected("rows")),
        }
    }

    /// Exactly one row, as returned by an insert.
    pub fn into_row(self) -> Result<Record> {
        let mut rows = self.into_rows()?;
        match rows.len() {
            1 => Ok(rows.remove(0)),
            n => Err(Error::invalid_result(format!("expected 1 row, got {n}"))),
        }
    }

    pub fn into_columns(self) -> Result<Columns> {
        match self {
            Response::Columns(columns) => Ok(columns),
            other => Err(other.unexpected("columns")),
        }
    }

    pub fn into_transaction(self) -> Result<Transaction> {
        match self {
            Response::Transaction(tx) => Ok(tx),
            other => Err(other.unexpected("transaction")),
        }
    }
}
