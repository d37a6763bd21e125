//! SQL text for the operations the engine issues. Values are always bound
//! as positional parameters.

use tether_core::{
    driver::operation::{Delete, Insert, Select, Update},
    stmt::{CmpOp, Filter, Value},
};

use std::fmt::Write;

/// A statement and its parameters, in placeholder order.
#[derive(Debug)]
pub(crate) struct Statement {
    pub(crate) sql: String,
    pub(crate) params: Vec<Value>,
}

#[derive(Debug, Default)]
struct Serializer {
    sql: String,
    params: Vec<Value>,
}

pub(crate) fn ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

impl Serializer {
    fn push(&mut self, s: &str) {
        self.sql.push_str(s);
    }

    fn param(&mut self, value: Value) {
        self.params.push(value);
        let _ = write!(self.sql, "?{}", self.params.len());
    }

    fn filter(&mut self, filter: &Filter) {
        if filter.is_all() {
            return;
        }
        self.push(" WHERE ");
        self.expr(filter);
    }

    fn expr(&mut self, filter: &Filter) {
        match filter {
            Filter::All => self.push("1 = 1"),
            Filter::Cmp { column, op, value } => {
                self.push(&ident(column));
                // `= NULL` never matches; compare with IS instead
                match (op, value.is_null()) {
                    (CmpOp::Eq, true) => self.push(" IS NULL"),
                    (CmpOp::Ne, true) => self.push(" IS NOT NULL"),
                    (op, _) => {
                        let _ = write!(self.sql, " {} ", op.sql_name());
                        self.param(value.clone());
                    }
                }
            }
            Filter::In { values, .. } if values.is_empty() => self.push("0 = 1"),
            Filter::NotIn { values, .. } if values.is_empty() => self.push("1 = 1"),
            Filter::In { column, values } => self.list(column, "IN", values),
            Filter::NotIn { column, values } => self.list(column, "NOT IN", values),
            Filter::IsNull(column) => {
                self.push(&ident(column));
                self.push(" IS NULL");
            }
            Filter::IsNotNull(column) => {
                self.push(&ident(column));
                self.push(" IS NOT NULL");
            }
            Filter::And(filters) if filters.is_empty() => self.push("1 = 1"),
            Filter::And(filters) => {
                self.push("(");
                for (i, filter) in filters.iter().enumerate() {
                    if i > 0 {
                        self.push(" AND ");
                    }
                    self.expr(filter);
                }
                self.push(")");
            }
        }
    }

    fn list(&mut self, column: &str, op: &str, values: &[Value]) {
        let _ = write!(self.sql, "{} {op} (", ident(column));
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.param(value.clone());
        }
        self.push(")");
    }

    fn finish(self) -> Statement {
        Statement {
            sql: self.sql,
            params: self.params,
        }
    }
}

pub(crate) fn select(op: &Select) -> Statement {
    let mut s = Serializer::default();
    let _ = write!(s.sql, "SELECT * FROM {}", ident(&op.table));
    s.filter(&op.filter);

    for (i, order_by) in op.order_by.iter().enumerate() {
        s.push(if i == 0 { " ORDER BY " } else { ", " });
        let _ = write!(
            s.sql,
            "{} {}",
            ident(&order_by.column),
            order_by.direction.sql_name()
        );
    }

    match (op.limit, op.offset) {
        (None, None) => {}
        (limit, offset) => {
            s.push(" LIMIT ");
            // SQLite has no OFFSET without LIMIT; -1 means unbounded
            s.param(Value::I64(limit.map(|n| n as i64).unwrap_or(-1)));
            if let Some(offset) = offset {
                s.push(" OFFSET ");
                s.param(Value::I64(offset as i64));
            }
        }
    }

    s.finish()
}

pub(crate) fn insert(op: &Insert) -> Statement {
    let mut s = Serializer::default();
    let _ = write!(s.sql, "INSERT INTO {}", ident(&op.table));

    if op.row.is_empty() {
        s.push(" DEFAULT VALUES");
    } else {
        let columns = op.row.keys().map(ident).collect::<Vec<_>>().join(", ");
        let _ = write!(s.sql, " ({columns}) VALUES (");
        for (i, (_, value)) in op.row.iter().enumerate() {
            if i > 0 {
                s.push(", ");
            }
            s.param(value.clone());
        }
        s.push(")");
    }

    s.push(" RETURNING *");
    s.finish()
}

/// `None` when there is nothing to assign.
pub(crate) fn update(op: &Update) -> Option<Statement> {
    if op.assignments.is_empty() {
        return None;
    }

    let mut s = Serializer::default();
    let _ = write!(s.sql, "UPDATE {} SET ", ident(&op.table));
    for (i, (column, value)) in op.assignments.iter().enumerate() {
        if i > 0 {
            s.push(", ");
        }
        let _ = write!(s.sql, "{} = ", ident(column));
        s.param(value.clone());
    }
    s.filter(&op.filter);
    s.push(" RETURNING *");
    Some(s.finish())
}

pub(crate) fn delete(op: &Delete) -> Statement {
    let mut s = Serializer::default();
    let _ = write!(s.sql, "DELETE FROM {}", ident(&op.table));
    s.filter(&op.filter);
    s.finish()
}
