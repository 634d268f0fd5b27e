//! Write command - replace a resource's content

use crate::cache::WriteOutcome;
use crate::cli::args::WriteArgs;
use crate::cli::commands::blocking;
use crate::error::{StoreError, StoreResult};
use crate::selector::ResourceSelector;
use console::style;
use tokio::io::AsyncReadExt;
use tracing::debug;

/// Execute the write command
pub async fn execute(args: WriteArgs, selector: &ResourceSelector) -> StoreResult<()> {
    let content = load_content(&args).await?;
    debug!("Writing {} bytes to {} x{}", content.len(), args.name, args.repeat);

    let selector = selector.clone();
    let name = args.name.clone();
    let repeat = args.repeat;
    let outcomes = blocking(move || {
        let resource = selector.open(&name, None)?;
        (0..repeat)
            .map(|_| resource.write(&content).map(|outcome| (outcome, content.len())))
            .collect::<StoreResult<Vec<_>>>()
    })
    .await?;

    for (outcome, len) in outcomes {
        let label = match outcome {
            WriteOutcome::Written => style("written").green(),
            WriteOutcome::Unchanged => style("unchanged").dim(),
        };
        println!("{}: {} ({} bytes)", args.name, label, len);
    }

    Ok(())
}

async fn load_content(args: &WriteArgs) -> StoreResult<Vec<u8>> {
    if let Some(ref data) = args.data {
        return Ok(data.as_bytes().to_vec());
    }

    if let Some(ref path) = args.from {
        return tokio::fs::read(path)
            .await
            .map_err(|e| StoreError::io(format!("reading input file {}", path.display()), e));
    }

    let mut content = Vec::new();
    tokio::io::stdin()
        .read_to_end(&mut content)
        .await
        .map_err(|e| StoreError::io("reading stdin", e))?;
    Ok(content)
}
