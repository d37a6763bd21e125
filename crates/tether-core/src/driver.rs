pub mod operation;
pub use operation::Operation;

mod response;
pub use response::Response;

mod transaction;
pub use transaction::Transaction;

use crate::{async_trait, Result};

use std::fmt::Debug;

/// The query executor the engine talks to.
///
/// Implementations must accept concurrent calls through a shared reference;
/// the engine fans out sibling saves and eager loads against one driver.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Execute a database operation
    async fn exec(&self, op: Operation) -> Result<Response>;
}
