use crate::Transaction;

use chrono::{DateTime, Utc};

/// Per-call persistence and query options.
///
/// The same options are handed to every nested save and every eager load
/// issued on behalf of one top-level call, so a transaction given here covers
/// the whole cascade.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub transaction: Option<Transaction>,

    /// Skips the insert-vs-update probe when set.
    pub exists: Option<bool>,

    pub touch: Touch,
}

/// How the update timestamp is stamped on save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Touch {
    /// Stamp with the current time.
    #[default]
    Now,

    /// Stamp with exactly this value.
    At(DateTime<Utc>),

    /// Leave the existing value untouched.
    Skip,
}

impl Options {
    pub fn new() -> Options {
        Options::default()
    }

    pub fn transaction(mut self, tx: Transaction) -> Options {
        self.transaction = Some(tx);
        self
    }

    pub fn exists(mut self, exists: bool) -> Options {
        self.exists = Some(exists);
        self
    }

    pub fn touch(mut self, touch: Touch) -> Options {
        self.touch = touch;
        self
    }

    /// Options for a nested save: same transaction and touch policy, with a
    /// precomputed existence flag.
    pub(crate) fn nested(&self, exists: Option<bool>) -> Options {
        Options {
            transaction: self.transaction,
            exists,
            touch: self.touch,
        }
    }
}

impl From<Transaction> for Options {
    fn from(tx: Transaction) -> Options {
        Options::new().transaction(tx)
    }
}

impl Touch {
    /// Value to write into the update timestamp, or `None` to leave it.
    pub(crate) fn stamp(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Touch::Now => Some(now),
            Touch::At(at) => Some(*at),
            Touch::Skip => None,
        }
    }
}
