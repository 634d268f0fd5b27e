//! Disk-backed resource
//!
//! Every write hits the file, even when the content is unchanged.

use crate::cache::WriteOutcome;
use crate::error::StoreResult;
use crate::resource::{create_file, open_file, write_file, Backend, Resource, ResourceWriter};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resource whose content lives only in its file
#[derive(Debug, Clone)]
pub struct DiskResource {
    name: String,
    path: PathBuf,
}

impl DiskResource {
    /// Refer to the resource at `name` without touching the filesystem
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let path = PathBuf::from(&name);
        Self { name, path }
    }

    /// Create the resource and write `content` to it
    pub fn with_content(name: impl Into<String>, content: &[u8]) -> StoreResult<Self> {
        let resource = Self::new(name);
        resource.write(content)?;
        Ok(resource)
    }
}

impl Resource for DiskResource {
    fn name(&self) -> &str {
        &self.name
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn backend(&self) -> Backend {
        Backend::Disk
    }

    fn open_reader(&self) -> StoreResult<Box<dyn Read + Send>> {
        Ok(Box::new(open_file(&self.path)?))
    }

    fn open_writer(&self) -> StoreResult<ResourceWriter> {
        let file = create_file(&self.path)?;
        Ok(ResourceWriter::for_file(&self.name, file))
    }

    fn write(&self, content: &[u8]) -> StoreResult<WriteOutcome> {
        write_file(&self.path, content)?;
        debug!("Wrote {} bytes to {}", content.len(), self.name);
        Ok(WriteOutcome::Written)
    }

    fn file(&self) -> StoreResult<PathBuf> {
        Ok(self.path.clone())
    }
}
