use crate::{Driver, Filter, Record, Result, Transaction, Value};

use tether_core::driver::operation::{self, Select};
use tether_core::driver::Operation;
use tether_core::schema::Columns;

use std::sync::Arc;

/// The narrow set of executor verbs the engine uses, bound to the
/// transaction of the current call.
#[derive(Debug, Clone)]
pub(crate) struct Exec {
    driver: Arc<dyn Driver>,
    transaction: Option<Transaction>,
}

impl Exec {
    pub(crate) fn new(driver: Arc<dyn Driver>, transaction: Option<Transaction>) -> Exec {
        Exec {
            driver,
            transaction,
        }
    }

    async fn exec(&self, op: Operation) -> Result<tether_core::driver::Response> {
        tracing::debug!(
            table = op.table().unwrap_or_default(),
            verb = op.verb(),
            transaction = ?self.transaction,
            "exec"
        );
        self.driver.exec(op).await
    }

    pub(crate) async fn select(&self, mut select: Select) -> Result<Vec<Record>> {
        select.transaction = self.transaction;
        self.exec(select.into()).await?.into_rows()
    }

    pub(crate) async fn select_where(&self, table: &str, filter: Filter) -> Result<Vec<Record>> {
        self.select(Select::new(table, filter)).await
    }

    /// Rows whose `column` is one of `ids`. Issues no query for an empty id
    /// list.
    pub(crate) async fn select_by_ids(
        &self,
        table: &str,
        column: &str,
        ids: Vec<Value>,
    ) -> Result<Vec<Record>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        self.select_where(table, Filter::in_list(column, ids)).await
    }

    pub(crate) async fn insert(&self, table: &str, row: Record) -> Result<Record> {
        self.exec(
            operation::Insert {
                table: table.to_string(),
                row,
                transaction: self.transaction,
            }
            .into(),
        )
        .await?
        .into_row()
    }

    /// Updates the row identified by `id`, returning it as persisted.
    pub(crate) async fn update(&self, table: &str, id: &Value, fields: Record) -> Result<Record> {
        let mut rows = self
            .update_where(table, Filter::eq("id", id.clone()), fields)
            .await?;

        match rows.len() {
            0 => Err(tether_core::Error::invalid_result(format!(
                "update of `{table}` matched no row"
            ))),
            _ => Ok(rows.swap_remove(0)),
        }
    }

    pub(crate) async fn update_where(
        &self,
        table: &str,
        filter: Filter,
        assignments: Record,
    ) -> Result<Vec<Record>> {
        self.exec(
            operation::Update {
                table: table.to_string(),
                filter,
                assignments,
                transaction: self.transaction,
            }
            .into(),
        )
        .await?
        .into_rows()
    }

    pub(crate) async fn delete_where(&self, table: &str, filter: Filter) -> Result<u64> {
        self.exec(
            operation::Delete {
                table: table.to_string(),
                filter,
                transaction: self.transaction,
            }
            .into(),
        )
        .await?
        .into_count()
    }

    pub(crate) async fn column_info(&self, table: &str) -> Result<Columns> {
        self.exec(
            operation::ColumnInfo {
                table: table.to_string(),
                transaction: self.transaction,
            }
            .into(),
        )
        .await?
        .into_columns()
    }
}
