use std::borrow::Cow;
use tether_core::{bail, driver::Transaction, Result};

/// Tracks transaction nesting on the single connection. The outermost
/// transaction is a real `BEGIN`; nested ones are savepoints.
///
/// Handles are the nesting depth they were opened at, so only the innermost
/// open transaction can be finished.
#[derive(Debug, Default)]
pub(crate) struct TransactionManager {
    depth: u64,
}

impl TransactionManager {
    pub(crate) fn new() -> Self {
        Self { depth: 0 }
    }

    pub(crate) fn depth(&self) -> u64 {
        self.depth
    }

    /// Returns `BEGIN` or `SAVEPOINT sp_N` along with the new handle.
    pub(crate) fn begin(&mut self) -> (Cow<'static, str>, Transaction) {
        let sql = if self.depth == 0 {
            Cow::Borrowed("BEGIN")
        } else {
            Cow::Owned(format!("SAVEPOINT sp_{}", self.depth))
        };
        self.depth += 1;
        (sql, Transaction::from_raw(self.depth))
    }

    /// Returns `COMMIT` or `RELEASE SAVEPOINT sp_N`.
    pub(crate) fn commit(&mut self, tx: Transaction) -> Result<Cow<'static, str>> {
        self.finish(tx)?;
        Ok(if self.depth == 0 {
            Cow::Borrowed("COMMIT")
        } else {
            Cow::Owned(format!("RELEASE SAVEPOINT sp_{}", self.depth))
        })
    }

    /// Returns `ROLLBACK` or a rollback to, and release of, `sp_N`.
    pub(crate) fn rollback(&mut self, tx: Transaction) -> Result<Cow<'static, str>> {
        self.finish(tx)?;
        Ok(if self.depth == 0 {
            Cow::Borrowed("ROLLBACK")
        } else {
            Cow::Owned(format!(
                "ROLLBACK TO SAVEPOINT sp_{0}; RELEASE SAVEPOINT sp_{0}",
                self.depth
            ))
        })
    }

    fn finish(&mut self, tx: Transaction) -> Result<()> {
        if self.depth == 0 || tx.to_raw() != self.depth {
            bail!(
                "transaction {} is not the innermost open transaction (depth {})",
                tx.to_raw(),
                self.depth
            );
        }
        self.depth -= 1;
        Ok(())
    }
}
