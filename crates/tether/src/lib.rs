mod adapter;
pub use adapter::{DefaultAdapter, RecordAdapter};

pub mod db;
pub use db::Db;

mod engine;

mod hooks;

mod json;
pub use json::Context;

mod model;
pub use model::{FieldDefault, Model, ModelDef};

mod options;
pub use options::{Options, Touch};

mod scope;
pub use scope::Scope;

mod timestamps;
pub use timestamps::Timestamps;

pub use tether_core::{
    bail,
    driver::{self, Driver, Transaction},
    err, record,
    schema::{ColumnInfo, Columns, Declaration, Relation, RelationKind},
    stmt::{self, CmpOp, Direction, Filter, Key, OrderBy, Record, Value},
    Error, Result,
};
