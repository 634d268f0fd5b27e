//! dedupstore - write-deduplicating resource cache
//!
//! Named byte-blob resources backed by the filesystem, with an optional
//! process-wide content cache that skips writes of unchanged content and
//! serves reads from memory.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod resource;
pub mod selector;

pub use cache::{ContentCache, Fingerprint, WriteOutcome};
pub use error::{StoreError, StoreResult};
pub use resource::{Backend, CachedResource, DiskResource, Resource, ResourceMetadata, ResourceWriter};
pub use selector::{open_resource, CacheFlag, FlagFn, ResourceSelector};
