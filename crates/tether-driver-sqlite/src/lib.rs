mod sql;
mod transaction_manager;
mod value;

use transaction_manager::TransactionManager;
use value::{Affinity, Value};

use rusqlite::Connection as RusqliteConnection;
use std::{
    collections::HashMap,
    path::Path,
    sync::{Mutex, PoisonError},
};
use tether_core::{
    async_trait, bail,
    driver::{
        operation::{self, Operation, TransactionOp},
        Driver, Response,
    },
    schema::{ColumnInfo, Columns},
    stmt::Record,
    Result,
};
use url::Url;

/// SQLite executor over a single connection.
///
/// Operations from concurrent callers are serialized on the connection, so a
/// transaction opened through [`TransactionOp::Begin`] covers every
/// operation issued until it is finished.
#[derive(Debug)]
pub struct Sqlite {
    url: String,
    connection: Mutex<Connection>,
}

impl Sqlite {
    /// Create a new SQLite driver with an arbitrary connection URL
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str)
            .map_err(|err| tether_core::Error::invalid_connection_url(format!("{err}; url={url_str}")))?;

        if url.scheme() != "sqlite" {
            return Err(tether_core::Error::invalid_connection_url(format!(
                "connection URL does not have a `sqlite` scheme; url={url_str}"
            )));
        }

        if url.path() == ":memory:" {
            Self::in_memory()
        } else {
            Self::open(url.path())
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Result<Self> {
        let connection = RusqliteConnection::open_in_memory()
            .map_err(tether_core::Error::driver_operation_failed)?;
        Ok(Self::from_connection("sqlite::memory:".to_string(), connection))
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let connection =
            RusqliteConnection::open(path).map_err(tether_core::Error::driver_operation_failed)?;
        Ok(Self::from_connection(
            format!("sqlite:{}", path.display()),
            connection,
        ))
    }

    fn from_connection(url: String, connection: RusqliteConnection) -> Self {
        Self {
            url,
            connection: Mutex::new(Connection::new(connection)),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Runs raw SQL, typically schema setup. Column metadata gathered so far
    /// is discarded.
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        let mut connection = self.lock();
        connection.affinities.clear();
        connection
            .connection
            .execute_batch(sql)
            .map_err(tether_core::Error::driver_operation_failed)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.connection
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Driver for Sqlite {
    async fn exec(&self, op: Operation) -> Result<Response> {
        self.lock().exec(op)
    }
}

#[derive(Debug)]
struct Connection {
    connection: RusqliteConnection,
    transactions: TransactionManager,

    /// Declared-type interpretation per table, then per column.
    affinities: HashMap<String, HashMap<String, Affinity>>,
}

impl Connection {
    fn new(connection: RusqliteConnection) -> Self {
        Self {
            connection,
            transactions: TransactionManager::new(),
            affinities: HashMap::new(),
        }
    }

    fn exec(&mut self, op: Operation) -> Result<Response> {
        if let Some(tx) = op.transaction() {
            if tx.to_raw() > self.transactions.depth() {
                bail!("transaction {} is not open", tx.to_raw());
            }
        }

        match op {
            Operation::Select(op) => self.query(&op.table, sql::select(&op)),
            Operation::Insert(op) => self.query(&op.table, sql::insert(&op)),
            Operation::Update(op) => match sql::update(&op) {
                Some(stmt) => self.query(&op.table, stmt),
                // Nothing to assign; answer with the matching rows as they are
                None => {
                    let select = operation::Select::new(op.table.clone(), op.filter);
                    self.query(&op.table, sql::select(&select))
                }
            },
            Operation::Delete(op) => {
                let stmt = sql::delete(&op);
                let count = self.execute(&stmt)?;
                Ok(Response::count(count))
            }
            Operation::ColumnInfo(op) => Ok(Response::Columns(self.column_info(&op.table)?)),
            Operation::Transaction(op) => self.transaction(op),
        }
    }

    fn transaction(&mut self, op: TransactionOp) -> Result<Response> {
        match op {
            TransactionOp::Begin => {
                let (sql, tx) = self.transactions.begin();
                self.batch(&sql)?;
                Ok(Response::Transaction(tx))
            }
            TransactionOp::Commit(tx) => {
                let sql = self.transactions.commit(tx)?;
                self.batch(&sql)?;
                Ok(Response::count(0))
            }
            TransactionOp::Rollback(tx) => {
                let sql = self.transactions.rollback(tx)?;
                self.batch(&sql)?;
                Ok(Response::count(0))
            }
        }
    }

    fn batch(&self, sql: &str) -> Result<()> {
        tracing::trace!(sql, "sqlite batch");
        self.connection
            .execute_batch(sql)
            .map_err(tether_core::Error::driver_operation_failed)
    }

    fn execute(&self, stmt: &sql::Statement) -> Result<u64> {
        tracing::trace!(sql = %stmt.sql, params = stmt.params.len(), "sqlite execute");

        let mut prepared = self
            .connection
            .prepare_cached(&stmt.sql)
            .map_err(tether_core::Error::driver_operation_failed)?;

        let params = stmt
            .params
            .iter()
            .cloned()
            .map(Value::from)
            .collect::<Vec<_>>();

        let count = prepared
            .execute(rusqlite::params_from_iter(params.iter()))
            .map_err(tether_core::Error::driver_operation_failed)?;

        Ok(count as u64)
    }

    fn query(&mut self, table: &str, stmt: sql::Statement) -> Result<Response> {
        tracing::trace!(sql = %stmt.sql, params = stmt.params.len(), "sqlite query");

        // A missing table is reported by `prepare` below
        let affinities = self.affinities(table).unwrap_or_default();

        let mut prepared = self
            .connection
            .prepare_cached(&stmt.sql)
            .map_err(tether_core::Error::driver_operation_failed)?;

        let names = prepared
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>();

        let params = stmt
            .params
            .into_iter()
            .map(Value::from)
            .collect::<Vec<_>>();

        let mut rows = prepared
            .query(rusqlite::params_from_iter(params.iter()))
            .map_err(tether_core::Error::driver_operation_failed)?;

        let mut ret = vec![];

        loop {
            match rows.next() {
                Ok(Some(row)) => {
                    let mut record = Record::new();

                    for (index, name) in names.iter().enumerate() {
                        let cell = row
                            .get_ref(index)
                            .map_err(tether_core::Error::driver_operation_failed)?;
                        let affinity = affinities.get(name).copied().unwrap_or(Affinity::Other);
                        record = record
                            .with(name.as_str(), Value::from_sql(cell, affinity).into_inner());
                    }

                    ret.push(record);
                }
                Ok(None) => break,
                Err(err) => {
                    return Err(tether_core::Error::driver_operation_failed(err));
                }
            }
        }

        Ok(Response::rows(ret))
    }

    fn affinities(&mut self, table: &str) -> Result<HashMap<String, Affinity>> {
        if let Some(affinities) = self.affinities.get(table) {
            return Ok(affinities.clone());
        }

        let affinities = self
            .column_info(table)?
            .into_iter()
            .map(|(name, info)| (name, Affinity::from_decl(&info.ty)))
            .collect::<HashMap<_, _>>();

        self.affinities.insert(table.to_string(), affinities.clone());
        Ok(affinities)
    }

    fn column_info(&self, table: &str) -> Result<Columns> {
        let mut stmt = self
            .connection
            .prepare(&format!("PRAGMA table_info({})", sql::ident(table)))
            .map_err(tether_core::Error::driver_operation_failed)?;

        let rows = stmt
            .query_map([], |row| {
                let name: String = row.get("name")?;
                let ty: String = row.get("type")?;
                let not_null: bool = row.get("notnull")?;
                let default: Option<String> = row.get("dflt_value")?;

                Ok((
                    name,
                    ColumnInfo {
                        max_length: max_length(&ty),
                        ty,
                        nullable: !not_null,
                        default,
                    },
                ))
            })
            .map_err(tether_core::Error::driver_operation_failed)?;

        let columns = rows
            .collect::<rusqlite::Result<Columns>>()
            .map_err(tether_core::Error::driver_operation_failed)?;

        if columns.is_empty() {
            bail!("table `{table}` does not exist");
        }

        Ok(columns)
    }
}

/// `VARCHAR(255)` → `255`
fn max_length(ty: &str) -> Option<u32> {
    let (_, rest) = ty.split_once('(')?;
    let (len, _) = rest.split_once(')')?;
    len.trim().parse().ok()
}
