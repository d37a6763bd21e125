mod def;
pub use def::{FieldDefault, ModelDef};

mod state;
pub(crate) use state::ModelState;

use crate::engine::{self, Exec};
use crate::{json, CmpOp, Columns, Db, Direction, Filter, Options, Record, Result, Scope, Value};

use futures_util::future::try_join_all;
use std::sync::Arc;

/// Handle to one table's model, obtained from [`Db::model`].
///
/// Every entry point fails with a not-connected error before issuing any
/// query when the database has no driver.
#[derive(Clone)]
pub struct Model {
    db: Db,
    state: Arc<ModelState>,
}

impl Model {
    pub(crate) fn new(db: Db, state: Arc<ModelState>) -> Model {
        Model { db, state }
    }

    pub fn table(&self) -> &str {
        self.state.table()
    }

    pub fn db(&self) -> &Db {
        &self.db
    }

    pub(crate) fn state(&self) -> &ModelState {
        &self.state
    }

    /// The model for `table` on the same database.
    pub(crate) fn related(&self, table: &str) -> Model {
        self.db.model(table)
    }

    pub(crate) fn exec(&self, options: &Options) -> Result<Exec> {
        Ok(Exec::new(self.db.driver()?.clone(), options.transaction))
    }

    /// Inserts or updates `record` along with every nested relation payload
    /// it carries.
    pub async fn save(&self, record: Record) -> Result<Record> {
        self.save_with(record, &Options::default()).await
    }

    pub async fn save_with(&self, record: Record, options: &Options) -> Result<Record> {
        self.db.driver()?;
        engine::persist::save(self, Value::Record(record), options).await
    }

    /// Like [`Model::save`] but always inserts.
    pub async fn create(&self, record: Record) -> Result<Record> {
        self.create_with(record, &Options::default()).await
    }

    pub async fn create_with(&self, record: Record, options: &Options) -> Result<Record> {
        self.save_with(record, &options.clone().exists(false)).await
    }

    /// Creates every record concurrently, returning them in input order.
    pub async fn create_many(&self, records: impl IntoIterator<Item = Record>) -> Result<Vec<Record>> {
        self.create_many_with(records, &Options::default()).await
    }

    pub async fn create_many_with(
        &self,
        records: impl IntoIterator<Item = Record>,
        options: &Options,
    ) -> Result<Vec<Record>> {
        self.db.driver()?;
        let options = options.clone().exists(false);
        try_join_all(
            records
                .into_iter()
                .map(|record| engine::persist::save(self, Value::Record(record), &options)),
        )
        .await
    }

    /// Deletes the record's row and the rows of dependent relations.
    pub async fn destroy(&self, record: Record) -> Result<Record> {
        self.destroy_with(record, &Options::default()).await
    }

    pub async fn destroy_with(&self, record: Record, options: &Options) -> Result<Record> {
        self.db.driver()?;
        engine::destroy::destroy(self, record, options).await
    }

    /// Looks a record up by id. A missing row is `Ok(None)`.
    pub async fn find(&self, id: impl Into<Value>) -> Result<Option<Record>> {
        self.find_with(id, &Options::default()).await
    }

    pub async fn find_with(&self, id: impl Into<Value>, options: &Options) -> Result<Option<Record>> {
        self.where_eq("id", id).first_with(options).await
    }

    /// Fetches the current row for `record`, or `None` once it was destroyed.
    pub async fn reload(&self, record: &Record) -> Result<Option<Record>> {
        self.reload_with(record, &Options::default()).await
    }

    pub async fn reload_with(&self, record: &Record, options: &Options) -> Result<Option<Record>> {
        self.db.driver()?;
        let plain = self.state.adapter.to_plain(&Value::Record(record.clone()))?;
        self.find_with(plain.id().clone(), options).await
    }

    /// Column information for the table, fetched once and cached.
    pub async fn schema(&self) -> Result<Columns> {
        self.schema_with(&Options::default()).await
    }

    pub async fn schema_with(&self, options: &Options) -> Result<Columns> {
        self.columns(&self.exec(options)?).await.cloned()
    }

    /// The cached columns, fetched through `exec` on first use so the fetch
    /// runs under the caller's transaction.
    pub(crate) async fn columns(&self, exec: &Exec) -> Result<&Columns> {
        self.state
            .columns()
            .get_or_try_init(|| exec.column_info(self.table()))
            .await
    }

    /// An unfiltered scope over the table.
    pub fn scope(&self) -> Scope {
        Scope::new(self.clone())
    }

    /// Eager-loads the named relations on the next terminal query.
    pub fn include<I, S>(&self, relations: I) -> Scope
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scope().include(relations)
    }

    pub fn filter(&self, filter: Filter) -> Scope {
        self.scope().filter(filter)
    }

    pub fn where_eq(&self, column: impl Into<String>, value: impl Into<Value>) -> Scope {
        self.scope().where_eq(column, value)
    }

    pub fn where_fields(&self, fields: &Record) -> Scope {
        self.scope().where_fields(fields)
    }

    pub fn where_op(&self, column: impl Into<String>, op: CmpOp, value: impl Into<Value>) -> Scope {
        self.scope().where_op(column, op, value)
    }

    pub fn where_in(&self, column: impl Into<String>, values: impl IntoIterator<Item = Value>) -> Scope {
        self.scope().where_in(column, values)
    }

    pub fn where_not_in(
        &self,
        column: impl Into<String>,
        values: impl IntoIterator<Item = Value>,
    ) -> Scope {
        self.scope().where_not_in(column, values)
    }

    pub fn where_null(&self, column: impl Into<String>) -> Scope {
        self.scope().where_null(column)
    }

    pub fn where_not_null(&self, column: impl Into<String>) -> Scope {
        self.scope().where_not_null(column)
    }

    pub fn order(&self, column: impl Into<String>, direction: Direction) -> Scope {
        self.scope().order(column, direction)
    }

    pub fn page(&self, page: u64, per_page: Option<u64>) -> Scope {
        self.scope().page(page, per_page)
    }

    pub async fn all(&self) -> Result<Vec<Record>> {
        self.scope().all().await
    }

    pub async fn first(&self) -> Result<Option<Record>> {
        self.scope().first().await
    }

    /// Renders a record as JSON through the named context.
    pub fn json(&self, record: &Record, context: &str) -> serde_json::Value {
        json::render(self, &Value::Record(record.clone()), context)
    }

    pub fn json_many(&self, records: &[Record], context: &str) -> serde_json::Value {
        serde_json::Value::Array(records.iter().map(|r| self.json(r, context)).collect())
    }
}

impl core::fmt::Debug for Model {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Model")
            .field("table", &self.table())
            .finish()
    }
}
