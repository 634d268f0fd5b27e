//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// dedupstore - write-deduplicating resource cache
///
/// Reads and writes named resources (e.g. SAML metadata files), optionally
/// skipping disk writes whose content has not changed.
#[derive(Parser, Debug)]
#[command(name = "dedupstore")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "DEDUPSTORE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Route through the content cache (overrides cache.enabled)
    #[arg(long, global = true, conflicts_with = "no_cache")]
    pub cache: bool,

    /// Bypass the content cache (overrides cache.enabled)
    #[arg(long, global = true)]
    pub no_cache: bool,
}

impl Cli {
    /// Cache flag override from the command line, if any
    pub fn cache_override(&self) -> Option<bool> {
        match (self.cache, self.no_cache) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a resource's content to stdout
    Read(ReadArgs),

    /// Write content to a resource
    Write(WriteArgs),

    /// Show a resource's metadata
    Stat(StatArgs),

    /// Show or edit configuration
    Config(ConfigArgs),
}

/// Arguments for the read command
#[derive(Parser, Debug)]
pub struct ReadArgs {
    /// Resource path
    pub name: String,
}

/// Arguments for the write command
#[derive(Parser, Debug)]
pub struct WriteArgs {
    /// Resource path
    pub name: String,

    /// Content to write (reads stdin when neither --data nor --from is given)
    #[arg(short, long, conflicts_with = "from")]
    pub data: Option<String>,

    /// Copy content from this file
    #[arg(short, long)]
    pub from: Option<PathBuf>,

    /// Write the same content this many times
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub repeat: u32,
}

/// Arguments for the stat command
#[derive(Parser, Debug)]
pub struct StatArgs {
    /// Resource path
    pub name: String,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

/// Output format for stat
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON output
    Json,
}
