//! Named byte-blob resources backed by the filesystem
//!
//! A resource is identified by its name, which is also the path of the file
//! holding its bytes. Two backends implement the same capability set:
//! - [`DiskResource`]: every operation goes straight to the file
//! - [`CachedResource`]: writes are deduplicated against the shared
//!   [`ContentCache`](crate::cache::ContentCache) and reads prefer it

pub mod cached;
pub mod disk;

pub use cached::CachedResource;
pub use disk::DiskResource;

use crate::cache::WriteOutcome;
use crate::error::{StoreError, StoreResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::warn;
use url::Url;

/// Which backend serves a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Disk,
    Cached,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disk => write!(f, "disk"),
            Self::Cached => write!(f, "cached"),
        }
    }
}

/// Size and modification time of the file behind a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResourceMetadata {
    /// File size in bytes
    pub len: u64,
    /// Time of the last physical write
    pub modified: DateTime<Utc>,
}

/// Capabilities of a named resource
///
/// Mirrors what SAML metadata consumers expect from a writable resource.
/// Probes (`exists`, `is_readable`, `is_writable`) never fail; everything
/// touching content returns a `StoreResult`.
pub trait Resource: Send + Sync + fmt::Debug {
    /// The name as supplied by the caller
    fn name(&self) -> &str;

    /// Location of the backing file
    fn path(&self) -> &Path;

    /// Backend serving this resource
    fn backend(&self) -> Backend;

    fn filename(&self) -> &str {
        self.name()
    }

    fn description(&self) -> &str {
        self.name()
    }

    fn exists(&self) -> bool {
        self.path().exists()
    }

    fn is_readable(&self) -> bool {
        File::open(self.path()).is_ok()
    }

    fn is_writable(&self) -> bool {
        OpenOptions::new().write(true).open(self.path()).is_ok()
    }

    /// Resources are not single-use streams
    fn is_open(&self) -> bool {
        false
    }

    /// Open a stream over the resource content
    fn open_reader(&self) -> StoreResult<Box<dyn Read + Send>>;

    /// Open a stream that replaces the resource content
    fn open_writer(&self) -> StoreResult<ResourceWriter>;

    /// Replace the resource content
    fn write(&self, content: &[u8]) -> StoreResult<WriteOutcome>;

    /// Read the whole content
    fn read_all(&self) -> StoreResult<Vec<u8>> {
        let mut reader = self.open_reader()?;
        let mut content = Vec::new();
        reader
            .read_to_end(&mut content)
            .map_err(|e| StoreError::from_io(self.path(), "reading", e))?;
        Ok(content)
    }

    /// Filesystem size and modification time
    fn metadata(&self) -> StoreResult<ResourceMetadata> {
        file_metadata(self.path())
    }

    fn content_length(&self) -> StoreResult<u64> {
        Ok(self.metadata()?.len)
    }

    fn last_modified(&self) -> StoreResult<DateTime<Utc>> {
        Ok(self.metadata()?.modified)
    }

    /// `file://` URL of the absolute path
    fn uri(&self) -> StoreResult<Url> {
        file_url(self.path())
    }

    /// Physical file holding the content
    fn file(&self) -> StoreResult<PathBuf>;

    /// Resolve a resource relative to this one
    fn create_relative(&self, relative: &str) -> StoreResult<Box<dyn Resource>> {
        Err(StoreError::unsupported(
            format!("create_relative({})", relative),
            self.name(),
        ))
    }
}

/// Streaming writer returned by [`Resource::open_writer`]
///
/// Call [`finish`](ResourceWriter::finish) to complete the write and observe
/// errors. Dropping an unfinished writer completes it and logs failures.
pub struct ResourceWriter {
    name: String,
    sink: Sink,
    finished: bool,
}

enum Sink {
    File(BufWriter<File>),
    Cached { buf: Vec<u8>, target: CachedResource },
}

impl ResourceWriter {
    pub(crate) fn for_file(name: &str, file: File) -> Self {
        Self {
            name: name.to_string(),
            sink: Sink::File(BufWriter::new(file)),
            finished: false,
        }
    }

    pub(crate) fn for_cache(target: CachedResource) -> Self {
        Self {
            name: target.name().to_string(),
            sink: Sink::Cached {
                buf: Vec::new(),
                target,
            },
            finished: false,
        }
    }

    /// Complete the write
    pub fn finish(mut self) -> StoreResult<WriteOutcome> {
        self.complete()
    }

    fn complete(&mut self) -> StoreResult<WriteOutcome> {
        self.finished = true;
        match &mut self.sink {
            Sink::File(writer) => {
                writer
                    .flush()
                    .map_err(|e| StoreError::io(format!("flushing {}", self.name), e))?;
                Ok(WriteOutcome::Written)
            }
            Sink::Cached { buf, target } => {
                let content = std::mem::take(buf);
                target.write(&content)
            }
        }
    }
}

impl Write for ResourceWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        match &mut self.sink {
            Sink::File(writer) => writer.write(data),
            Sink::Cached { buf, .. } => {
                buf.extend_from_slice(data);
                Ok(data.len())
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.sink {
            Sink::File(writer) => writer.flush(),
            Sink::Cached { .. } => Ok(()),
        }
    }
}

impl Drop for ResourceWriter {
    fn drop(&mut self) {
        if !self.finished {
            if let Err(e) = self.complete() {
                warn!("Failed to complete write of {}: {}", self.name, e);
            }
        }
    }
}

impl fmt::Debug for ResourceWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceWriter")
            .field("name", &self.name)
            .field("finished", &self.finished)
            .finish()
    }
}

/// Replace the content of the file at `path`, creating parent directories
pub(crate) fn write_file(path: &Path, content: &[u8]) -> StoreResult<()> {
    ensure_parent(path)?;
    fs::write(path, content).map_err(|e| StoreError::io(format!("writing {}", path.display()), e))
}

/// Open the file at `path` for writing, truncating it
pub(crate) fn create_file(path: &Path) -> StoreResult<File> {
    ensure_parent(path)?;
    File::create(path).map_err(|e| StoreError::io(format!("creating {}", path.display()), e))
}

pub(crate) fn open_file(path: &Path) -> StoreResult<File> {
    File::open(path).map_err(|e| StoreError::from_io(path, "opening", e))
}

fn ensure_parent(path: &Path) -> StoreResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .map_err(|e| StoreError::io(format!("creating directory {}", parent.display()), e)),
        _ => Ok(()),
    }
}

fn file_metadata(path: &Path) -> StoreResult<ResourceMetadata> {
    let meta = fs::metadata(path).map_err(|e| StoreError::from_io(path, "reading metadata of", e))?;
    let modified = meta
        .modified()
        .map_err(|e| StoreError::io(format!("reading mtime of {}", path.display()), e))?;

    Ok(ResourceMetadata {
        len: meta.len(),
        modified: DateTime::<Utc>::from(modified),
    })
}

fn file_url(path: &Path) -> StoreResult<Url> {
    let absolute = std::path::absolute(path)
        .map_err(|e| StoreError::io(format!("resolving {}", path.display()), e))?;
    Url::from_file_path(&absolute)
        .map_err(|_| StoreError::unsupported("uri", absolute.display().to_string()))
}
