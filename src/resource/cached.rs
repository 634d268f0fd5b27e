//! Cache-backed resource
//!
//! Writes go through the shared [`ContentCache`]: unchanged content skips the
//! disk entirely, so the file's modification time only moves when the bytes
//! do. Reads are served from the cache when it holds the name, otherwise from
//! the file. A cache miss on read does not populate the cache.

use crate::cache::{ContentCache, WriteOutcome};
use crate::error::{StoreError, StoreResult};
use crate::resource::{open_file, write_file, Backend, Resource, ResourceWriter};
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Resource whose writes are deduplicated against a content cache
#[derive(Debug, Clone)]
pub struct CachedResource {
    name: String,
    path: PathBuf,
    cache: Arc<ContentCache>,
}

impl CachedResource {
    /// Refer to `name` through the process-wide cache
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_cache(name, ContentCache::global())
    }

    /// Refer to `name` through a specific cache
    pub fn with_cache(name: impl Into<String>, cache: Arc<ContentCache>) -> Self {
        let name = name.into();
        let path = PathBuf::from(&name);
        Self { name, path, cache }
    }

    /// Create the resource through the process-wide cache and write `content`
    pub fn with_content(name: impl Into<String>, content: &[u8]) -> StoreResult<Self> {
        let resource = Self::new(name);
        resource.write(content)?;
        Ok(resource)
    }

    /// The cache this resource writes through
    pub fn cache(&self) -> &Arc<ContentCache> {
        &self.cache
    }

    /// Whether the cache currently holds content for this name
    pub fn is_cached(&self) -> bool {
        self.cache.contains(&self.name)
    }
}

impl Resource for CachedResource {
    fn name(&self) -> &str {
        &self.name
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn backend(&self) -> Backend {
        Backend::Cached
    }

    fn open_reader(&self) -> StoreResult<Box<dyn Read + Send>> {
        match self.cache.get(&self.name) {
            Some(entry) => {
                debug!("Cache hit for {}", self.name);
                Ok(Box::new(Cursor::new(entry.shared_content())))
            }
            None => {
                debug!("Cache miss for {}, reading from disk", self.name);
                Ok(Box::new(open_file(&self.path)?))
            }
        }
    }

    fn open_writer(&self) -> StoreResult<ResourceWriter> {
        Ok(ResourceWriter::for_cache(self.clone()))
    }

    fn write(&self, content: &[u8]) -> StoreResult<WriteOutcome> {
        let outcome = self
            .cache
            .write_through(&self.name, content, |bytes| write_file(&self.path, bytes))?;

        if outcome.was_written() {
            info!("Wrote {} bytes to {}", content.len(), self.name);
        }
        Ok(outcome)
    }

    /// The content may live only in memory, so no file handle is exposed
    fn file(&self) -> StoreResult<PathBuf> {
        Err(StoreError::unsupported("file", &self.name))
    }
}
