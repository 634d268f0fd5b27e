//! CLI command implementations

pub mod config;
pub mod read;
pub mod stat;
pub mod write;

pub use config::execute as config;
pub use read::execute as read;
pub use stat::execute as stat;
pub use write::execute as write;

use crate::error::{StoreError, StoreResult};

/// Run a blocking resource operation off the async runtime
pub(crate) async fn blocking<T, F>(op: F) -> StoreResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> StoreResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(op)
        .await
        .map_err(|e| StoreError::Internal(format!("resource task failed: {}", e)))?
}
