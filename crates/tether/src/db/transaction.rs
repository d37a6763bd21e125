use super::Db;
use crate::{Result, Transaction};

use tether_core::driver::operation::TransactionOp;

/// Transaction lifecycle is passed straight to the driver. The engine only
/// threads the handle through [`crate::Options`].
impl Db {
    pub async fn begin(&self) -> Result<Transaction> {
        self.driver()?
            .exec(TransactionOp::Begin.into())
            .await?
            .into_transaction()
    }

    pub async fn commit(&self, tx: Transaction) -> Result<()> {
        self.driver()?.exec(TransactionOp::Commit(tx).into()).await?;
        Ok(())
    }

    pub async fn rollback(&self, tx: Transaction) -> Result<()> {
        self.driver()?
            .exec(TransactionOp::Rollback(tx).into())
            .await?;
        Ok(())
    }

    /// Runs `f` inside a transaction, committing when it succeeds and
    /// rolling back when it fails.
    pub async fn transaction<O>(
        &self,
        f: impl AsyncFnOnce(Transaction) -> Result<O>,
    ) -> Result<O> {
        let tx = self.begin().await?;

        match f(tx).await {
            Ok(res) => {
                self.commit(tx).await?;
                Ok(res)
            }
            Err(err) => {
                tracing::debug!(?tx, %err, "rolling back");
                self.rollback(tx).await?;
                Err(err)
            }
        }
    }
}
