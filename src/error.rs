//! Error types for dedupstore
//!
//! All modules use `StoreResult<T>` as their return type.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for dedupstore operations
pub type StoreResult<T> = Result<T, StoreError>;

/// All errors that can occur in dedupstore
#[derive(Error, Debug)]
pub enum StoreError {
    // Resource errors
    #[error("Resource not found: {0}")]
    NotFound(PathBuf),

    #[error("Operation not supported: {operation} on {resource}")]
    Unsupported { operation: String, resource: String },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create an error for a filesystem operation on `path`
    ///
    /// A missing file becomes `NotFound`; everything else keeps the
    /// underlying IO error as its source.
    pub fn from_io(path: &Path, context: impl Into<String>, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound(path.to_path_buf())
        } else {
            Self::io(format!("{} {}", context.into(), path.display()), source)
        }
    }

    /// Create an unsupported-operation error
    pub fn unsupported(operation: impl Into<String>, resource: impl Into<String>) -> Self {
        Self::Unsupported {
            operation: operation.into(),
            resource: resource.into(),
        }
    }

    /// Check if the error means the resource does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Message safe to show to an end user during sign-in
    ///
    /// Never contains paths or source errors.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::ConfigInvalid { .. } | Self::ConfigDirCreate { .. } => {
                "Sign-in is not configured correctly. Contact your administrator."
            }
            _ => "Sign-in failed. Please try again later.",
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::NotFound(_) => Some("Write the resource first, e.g.: dedupstore write <path>"),
            Self::ConfigInvalid { .. } => Some("Run: dedupstore config init --force"),
            Self::Unsupported { .. } => Some("Open the resource without the cache (--no-cache)"),
            _ => None,
        }
    }
}
