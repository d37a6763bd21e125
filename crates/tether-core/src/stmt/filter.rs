use super::Value;
use crate::{bail, Error};

use std::str::FromStr;

/// A predicate over the rows of a single table.
///
/// The engine only ever builds filters; turning them into a query language
/// is the executor's job.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Filter {
    /// Matches every row.
    #[default]
    All,

    /// `column <op> value`
    Cmp {
        column: String,
        op: CmpOp,
        value: Value,
    },

    /// `column IN (values)`. An empty list matches nothing.
    In { column: String, values: Vec<Value> },

    /// `column NOT IN (values)`. An empty list matches everything.
    NotIn { column: String, values: Vec<Value> },

    IsNull(String),

    IsNotNull(String),

    /// Every nested filter must match.
    And(Vec<Filter>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Like,
}

impl Filter {
    pub fn cmp(column: impl Into<String>, op: CmpOp, value: impl Into<Value>) -> Filter {
        Filter::Cmp {
            column: column.into(),
            op,
            value: value.into(),
        }
    }

    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Filter {
        Filter::cmp(column, CmpOp::Eq, value)
    }

    pub fn ne(column: impl Into<String>, value: impl Into<Value>) -> Filter {
        Filter::cmp(column, CmpOp::Ne, value)
    }

    pub fn in_list(column: impl Into<String>, values: impl IntoIterator<Item = Value>) -> Filter {
        Filter::In {
            column: column.into(),
            values: values.into_iter().collect(),
        }
    }

    pub fn not_in(column: impl Into<String>, values: impl IntoIterator<Item = Value>) -> Filter {
        Filter::NotIn {
            column: column.into(),
            values: values.into_iter().collect(),
        }
    }

    pub fn is_null(column: impl Into<String>) -> Filter {
        Filter::IsNull(column.into())
    }

    pub fn is_not_null(column: impl Into<String>) -> Filter {
        Filter::IsNotNull(column.into())
    }

    /// Conjunction of `self` and `other`. `All` is the identity and nested
    /// conjunctions are flattened.
    pub fn and(self, other: Filter) -> Filter {
        match (self, other) {
            (Filter::All, other) => other,
            (this, Filter::All) => this,
            (Filter::And(mut lhs), Filter::And(rhs)) => {
                lhs.extend(rhs);
                Filter::And(lhs)
            }
            (Filter::And(mut lhs), rhs) => {
                lhs.push(rhs);
                Filter::And(lhs)
            }
            (lhs, Filter::And(rhs)) => {
                let mut operands = Vec::with_capacity(rhs.len() + 1);
                operands.push(lhs);
                operands.extend(rhs);
                Filter::And(operands)
            }
            (lhs, rhs) => Filter::And(vec![lhs, rhs]),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Filter::All)
    }
}

impl CmpOp {
    pub fn sql_name(&self) -> &'static str {
        match self {
            CmpOp::Eq => "=",
            CmpOp::Ne => "<>",
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
            CmpOp::Gt => ">",
            CmpOp::Ge => ">=",
            CmpOp::Like => "LIKE",
        }
    }
}

impl FromStr for CmpOp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "=" | "==" => CmpOp::Eq,
            "!=" | "<>" => CmpOp::Ne,
            "<" => CmpOp::Lt,
            "<=" => CmpOp::Le,
            ">" => CmpOp::Gt,
            ">=" => CmpOp::Ge,
            op if op.eq_ignore_ascii_case("like") => CmpOp::Like,
            op => bail!("unsupported comparison operator `{op}`"),
        })
    }
}
