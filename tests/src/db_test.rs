use crate::{
    exec_log::ExecLog,
    logging_driver::{LoggingDriver, OpsLog},
};
use std::{future::Future, pin::Pin};
use tether::Db;
use tether_driver_sqlite::Sqlite;

/// Per-test state: a fresh in-memory database wrapped in a logging driver.
///
/// Tests run on a current-thread runtime owned by [`DbTest::run`] so that
/// `#[test]` functions can drive async bodies.
pub struct DbTest {
    ops_log: OpsLog,
}

impl DbTest {
    fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        Self {
            ops_log: OpsLog::default(),
        }
    }

    /// Run a test body against a fresh `DbTest`.
    pub fn run<F>(test_fn: F)
    where
        F: for<'a> FnOnce(&'a mut DbTest) -> Pin<Box<dyn Future<Output = ()> + 'a>>,
    {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("Failed to create Tokio runtime");

        let mut test = DbTest::new();
        runtime.block_on(test_fn(&mut test));
    }

    /// Create the tables in `ddl` and build the database with logging
    /// enabled
    pub async fn try_setup_db(
        &mut self,
        mut builder: tether::db::Builder,
        ddl: &str,
    ) -> tether::Result<Db> {
        let driver = Sqlite::in_memory()?;
        driver.execute_batch(ddl)?;

        let logging_driver = LoggingDriver::new(Box::new(driver));
        self.ops_log = logging_driver.log();

        Ok(builder.build(logging_driver))
    }

    pub async fn setup_db(&mut self, builder: tether::db::Builder, ddl: &str) -> Db {
        self.try_setup_db(builder, ddl).await.unwrap()
    }

    /// Get the operations log for assertions
    pub fn log(&self) -> ExecLog {
        ExecLog::new(self.ops_log.clone())
    }
}
