//! Stat command - show a resource's metadata

use crate::cli::args::{OutputFormat, StatArgs};
use crate::cli::commands::blocking;
use crate::error::StoreResult;
use crate::resource::Backend;
use crate::selector::ResourceSelector;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Metadata snapshot printed by `stat`
#[derive(Debug, Serialize)]
struct StatReport {
    name: String,
    backend: Backend,
    exists: bool,
    readable: bool,
    writable: bool,
    size: Option<u64>,
    modified: Option<DateTime<Utc>>,
    uri: String,
}

/// Execute the stat command
pub async fn execute(args: StatArgs, selector: &ResourceSelector) -> StoreResult<()> {
    let selector = selector.clone();
    let name = args.name.clone();
    let report = blocking(move || {
        let resource = selector.open(&name, None)?;
        let metadata = if resource.exists() {
            Some(resource.metadata()?)
        } else {
            None
        };

        Ok(StatReport {
            name: resource.name().to_string(),
            backend: resource.backend(),
            exists: resource.exists(),
            readable: resource.is_readable(),
            writable: resource.is_writable(),
            size: metadata.map(|m| m.len),
            modified: metadata.map(|m| m.modified),
            uri: resource.uri()?.to_string(),
        })
    })
    .await?;

    match args.format {
        OutputFormat::Text => print_text(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

fn print_text(report: &StatReport) {
    println!("{:<10} {}", "Name:", report.name);
    println!("{:<10} {}", "Backend:", report.backend);
    println!("{:<10} {}", "URI:", report.uri);
    println!("{:<10} {}", "Exists:", report.exists);
    if let Some(size) = report.size {
        println!("{:<10} {}", "Size:", format_bytes(size));
    }
    if let Some(modified) = report.modified {
        println!("{:<10} {}", "Modified:", modified.to_rfc3339());
    }
    println!("{:<10} {}", "Readable:", report.readable);
    println!("{:<10} {}", "Writable:", report.writable);
}

/// Format bytes as human-readable size (e.g., "1.5 KB")
fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
