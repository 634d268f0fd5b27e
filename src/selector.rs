//! Backend selection for opened resources
//!
//! Chooses between [`DiskResource`] and [`CachedResource`] each time a
//! resource is opened. The "use cache" flag is injected rather than looked up
//! globally and is read again on every open, so flipping it takes effect on
//! the next access.

use crate::cache::ContentCache;
use crate::config::schema::{CacheConfig, Config};
use crate::error::StoreResult;
use crate::resource::{Backend, CachedResource, DiskResource, Resource};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Source of the "use cache" flag
pub trait CacheFlag: Send + Sync {
    fn use_cache(&self) -> bool;
}

impl CacheFlag for bool {
    fn use_cache(&self) -> bool {
        *self
    }
}

impl CacheFlag for AtomicBool {
    fn use_cache(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<T: CacheFlag + ?Sized> CacheFlag for Arc<T> {
    fn use_cache(&self) -> bool {
        (**self).use_cache()
    }
}

impl CacheFlag for CacheConfig {
    fn use_cache(&self) -> bool {
        self.enabled
    }
}

impl CacheFlag for Config {
    fn use_cache(&self) -> bool {
        self.cache.enabled
    }
}

/// Adapts a closure into a [`CacheFlag`]
pub struct FlagFn<F>(pub F);

impl<F> CacheFlag for FlagFn<F>
where
    F: Fn() -> bool + Send + Sync,
{
    fn use_cache(&self) -> bool {
        (self.0)()
    }
}

/// Opens resources on the backend the flag selects
#[derive(Clone)]
pub struct ResourceSelector {
    flag: Arc<dyn CacheFlag>,
    cache: Arc<ContentCache>,
}

impl ResourceSelector {
    /// Selector using the process-wide cache
    pub fn new(flag: impl CacheFlag + 'static) -> Self {
        Self::with_cache(flag, ContentCache::global())
    }

    /// Selector using a specific cache for the cached backend
    pub fn with_cache(flag: impl CacheFlag + 'static, cache: Arc<ContentCache>) -> Self {
        Self {
            flag: Arc::new(flag),
            cache,
        }
    }

    /// Backend the next `open` will use
    pub fn backend(&self) -> Backend {
        if self.flag.use_cache() {
            Backend::Cached
        } else {
            Backend::Disk
        }
    }

    /// Open `name`, writing `initial` to it first when given
    pub fn open(&self, name: &str, initial: Option<&[u8]>) -> StoreResult<Box<dyn Resource>> {
        let resource: Box<dyn Resource> = match self.backend() {
            Backend::Cached => Box::new(CachedResource::with_cache(name, Arc::clone(&self.cache))),
            Backend::Disk => Box::new(DiskResource::new(name)),
        };
        debug!("Opened {} on {} backend", name, resource.backend());

        if let Some(content) = initial {
            resource.write(content)?;
        }
        Ok(resource)
    }
}

impl fmt::Debug for ResourceSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceSelector")
            .field("backend", &self.backend())
            .field("cache", &self.cache)
            .finish()
    }
}

/// Open `name` on the backend chosen by `use_cache`, using the process-wide cache
pub fn open_resource(
    name: &str,
    initial: Option<&[u8]>,
    use_cache: bool,
) -> StoreResult<Box<dyn Resource>> {
    ResourceSelector::new(use_cache).open(name, initial)
}
