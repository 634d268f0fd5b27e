//! dedupstore - write-deduplicating resource cache
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use dedupstore::cli::{Cli, Commands};
use dedupstore::config::ConfigFile;
use dedupstore::error::StoreResult;
use dedupstore::{ContentCache, ResourceSelector};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> StoreResult<()> {
    let cli = Cli::parse();

    let config_file = ConfigFile::resolve(cli.config.clone());
    let mut config = config_file.load().await?;

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug; RUST_LOG wins when set
    let default_filter = match cli.verbose {
        0 => "dedupstore=warn",
        1 => "dedupstore=info",
        _ => "dedupstore=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    if config.general.json_logs() {
        subscriber.json().init();
    } else {
        subscriber.without_time().init();
    }

    debug!("Loaded config from {}", config_file.path().display());

    if let Some(enabled) = cli.cache_override() {
        config.cache.enabled = enabled;
    }
    ContentCache::install_global(config.cache.capacity);
    let selector = ResourceSelector::new(config.cache.enabled);

    match cli.command {
        Commands::Read(args) => dedupstore::cli::commands::read(args, &selector).await,
        Commands::Write(args) => dedupstore::cli::commands::write(args, &selector).await,
        Commands::Stat(args) => dedupstore::cli::commands::stat(args, &selector).await,
        Commands::Config(args) => dedupstore::cli::commands::config(args, &config, &config_file).await,
    }
}
