use crate::engine::eager;
use crate::{CmpOp, Direction, Filter, Model, Options, OrderBy, Record, Result, Value};

use tether_core::driver::operation::Select;

const DEFAULT_PER_PAGE: u64 = 20;

/// A chainable, immutable description of a query against one model.
///
/// Nothing is issued until a terminal method (`all`, `first`, `delete`) runs.
#[derive(Debug, Clone)]
pub struct Scope {
    model: Model,
    filter: Filter,
    order_by: Vec<OrderBy>,
    limit: Option<u64>,
    offset: Option<u64>,
    include: Vec<String>,
}

impl Scope {
    pub(crate) fn new(model: Model) -> Scope {
        Scope {
            model,
            filter: Filter::All,
            order_by: vec![],
            limit: None,
            offset: None,
            include: vec![],
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Replaces the list of relations to eager-load.
    pub fn include<I, S>(mut self, relations: I) -> Scope
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include = relations.into_iter().map(Into::into).collect();
        self
    }

    pub fn filter(mut self, filter: Filter) -> Scope {
        self.filter = self.filter.and(filter);
        self
    }

    pub fn where_eq(self, column: impl Into<String>, value: impl Into<Value>) -> Scope {
        self.filter(Filter::eq(column, value))
    }

    /// One equality condition per field.
    pub fn where_fields(self, fields: &Record) -> Scope {
        fields.iter().fold(self, |scope, (column, value)| {
            scope.where_eq(column, value.clone())
        })
    }

    pub fn where_op(self, column: impl Into<String>, op: CmpOp, value: impl Into<Value>) -> Scope {
        self.filter(Filter::cmp(column, op, value))
    }

    pub fn where_in(self, column: impl Into<String>, values: impl IntoIterator<Item = Value>) -> Scope {
        self.filter(Filter::in_list(column, values))
    }

    pub fn where_not_in(
        self,
        column: impl Into<String>,
        values: impl IntoIterator<Item = Value>,
    ) -> Scope {
        self.filter(Filter::not_in(column, values))
    }

    pub fn where_null(self, column: impl Into<String>) -> Scope {
        self.filter(Filter::is_null(column))
    }

    pub fn where_not_null(self, column: impl Into<String>) -> Scope {
        self.filter(Filter::is_not_null(column))
    }

    pub fn order(mut self, column: impl Into<String>, direction: Direction) -> Scope {
        self.order_by.push(OrderBy {
            column: column.into(),
            direction,
        });
        self
    }

    /// 1-based page of `per_page` rows (20 when not given).
    pub fn page(mut self, page: u64, per_page: Option<u64>) -> Scope {
        let per_page = per_page.unwrap_or(DEFAULT_PER_PAGE);
        self.limit = Some(per_page);
        self.offset = Some(page.saturating_sub(1) * per_page);
        self
    }

    fn select(&self) -> Select {
        Select {
            table: self.model.table().to_string(),
            filter: self.filter.clone(),
            order_by: self.order_by.clone(),
            limit: self.limit,
            offset: self.offset,
            transaction: None,
        }
    }

    pub async fn all(&self) -> Result<Vec<Record>> {
        self.all_with(&Options::default()).await
    }

    pub async fn all_with(&self, options: &Options) -> Result<Vec<Record>> {
        let rows = self.model.exec(options)?.select(self.select()).await?;
        self.finish(rows, options).await
    }

    pub async fn first(&self) -> Result<Option<Record>> {
        self.first_with(&Options::default()).await
    }

    pub async fn first_with(&self, options: &Options) -> Result<Option<Record>> {
        let mut select = self.select();
        select.limit = Some(1);

        let rows = self.model.exec(options)?.select(select).await?;
        Ok(self.finish(rows, options).await?.into_iter().next())
    }

    /// Deletes every row matching the scope's filter. Returns the number of
    /// rows removed.
    pub async fn delete(&self) -> Result<u64> {
        self.delete_with(&Options::default()).await
    }

    pub async fn delete_with(&self, options: &Options) -> Result<u64> {
        self.model
            .exec(options)?
            .delete_where(self.model.table(), self.filter.clone())
            .await
    }

    async fn finish(&self, rows: Vec<Record>, options: &Options) -> Result<Vec<Record>> {
        let rows = eager::load(&self.model, rows, &self.include, options).await?;
        let adapter = &self.model.state().adapter;
        Ok(rows.into_iter().map(|row| adapter.from_plain(row)).collect())
    }
}
