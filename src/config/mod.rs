//! Configuration file for dedupstore
//!
//! A single TOML file, by default `<config dir>/dedupstore/config.toml`.
//! A missing file means defaults; a malformed one is an error.

pub mod schema;

pub use schema::Config;

use crate::error::{StoreError, StoreResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Location of the configuration file
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
}

impl ConfigFile {
    /// Use `explicit` when given (from `--config` or `DEDUPSTORE_CONFIG`),
    /// otherwise the per-user default location
    pub fn resolve(explicit: Option<PathBuf>) -> Self {
        let path = explicit.unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("dedupstore")
                .join("config.toml")
        });
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub async fn load(&self) -> StoreResult<Config> {
        let text = match fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", self.path.display());
                return Ok(Config::default());
            }
            Err(e) => {
                return Err(StoreError::io(format!("reading config {}", self.path.display()), e))
            }
        };

        toml::from_str(&text).map_err(|e| StoreError::ConfigInvalid {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    /// Write `config`, creating the directory if needed
    pub async fn save(&self, config: &Config) -> StoreResult<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .await
                .map_err(|source| StoreError::ConfigDirCreate {
                    path: dir.to_path_buf(),
                    source,
                })?;
        }

        fs::write(&self.path, toml::to_string_pretty(config)?)
            .await
            .map_err(|e| StoreError::io(format!("writing config {}", self.path.display()), e))?;

        info!("Saved config to {}", self.path.display());
        Ok(())
    }
}
