//! Read command - print a resource's content

use crate::cli::args::ReadArgs;
use crate::cli::commands::blocking;
use crate::error::{StoreError, StoreResult};
use crate::selector::ResourceSelector;
use tokio::io::AsyncWriteExt;

/// Execute the read command
pub async fn execute(args: ReadArgs, selector: &ResourceSelector) -> StoreResult<()> {
    let selector = selector.clone();
    let content = blocking(move || selector.open(&args.name, None)?.read_all()).await?;

    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(&content)
        .await
        .map_err(|e| StoreError::io("writing to stdout", e))?;
    stdout
        .flush()
        .await
        .map_err(|e| StoreError::io("flushing stdout", e))?;

    Ok(())
}
