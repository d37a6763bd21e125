use super::{Operation, Transaction};
use crate::stmt::{Filter, OrderBy};

#[derive(Debug, Clone, Default)]
pub struct Select {
    pub table: String,

    pub filter: Filter,

    pub order_by: Vec<OrderBy>,

    pub limit: Option<u64>,

    pub offset: Option<u64>,

    pub transaction: Option<Transaction>,
}

impl Select {
    pub fn new(table: impl Into<String>, filter: Filter) -> Select {
        Select {
            table: table.into(),
            filter,
            ..Select::default()
        }
    }
}

impl From<Select> for Operation {
    fn from(value: Select) -> Self {
        Self::Select(value)
    }
}
