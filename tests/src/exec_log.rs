use crate::logging_driver::OpsLog;
use tether_core::driver::Operation;

/// Query-count assertions over the calls a test's database made.
///
/// Counting helpers match on the operation's verb (`select`, `insert`,
/// `update`, `delete`, `column_info`, `begin`, `commit`, `rollback`) and
/// target table.
#[derive(Clone)]
pub struct ExecLog {
    log: OpsLog,
}

impl ExecLog {
    pub(crate) fn new(log: OpsLog) -> Self {
        Self { log }
    }

    pub fn len(&self) -> usize {
        self.log.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.lock().is_empty()
    }

    /// Forget everything logged so far, typically after seeding
    pub fn clear(&self) {
        self.log.lock().clear();
    }

    /// Every logged operation in execution order
    pub fn operations(&self) -> Vec<Operation> {
        self.log.lock().iter().map(|op| op.operation.clone()).collect()
    }

    /// Number of logged operations the driver rejected
    pub fn failures(&self) -> usize {
        self.log.lock().iter().filter(|op| !op.succeeded()).count()
    }

    pub fn any(&self, predicate: impl Fn(&Operation) -> bool) -> bool {
        self.log.lock().iter().any(|op| predicate(&op.operation))
    }

    pub fn count(&self, predicate: impl Fn(&Operation) -> bool) -> usize {
        self.log
            .lock()
            .iter()
            .filter(|op| predicate(&op.operation))
            .count()
    }

    pub fn count_on(&self, verb: &str, table: &str) -> usize {
        self.count(|op| op.verb() == verb && op.table() == Some(table))
    }

    pub fn selects(&self, table: &str) -> usize {
        self.count_on("select", table)
    }

    pub fn inserts(&self, table: &str) -> usize {
        self.count_on("insert", table)
    }

    pub fn updates(&self, table: &str) -> usize {
        self.count_on("update", table)
    }

    pub fn deletes(&self, table: &str) -> usize {
        self.count_on("delete", table)
    }
}
