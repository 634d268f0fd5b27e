//! Process-wide name → content cache
//!
//! Holds the last content written through a caching resource for each
//! name. Every key gets its own write lock, so the compare, the disk write
//! and the cache commit for one key happen as a unit while writers to other
//! keys proceed independently.

use crate::cache::fingerprint::Fingerprint;
use crate::error::StoreResult;
use dashmap::DashMap;
use lru::LruCache;
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use tracing::debug;

static GLOBAL: OnceLock<Arc<ContentCache>> = OnceLock::new();

/// Cached content for one resource name
#[derive(Debug)]
pub struct CacheEntry {
    content: Arc<[u8]>,
    fingerprint: Fingerprint,
}

impl CacheEntry {
    /// Create an entry, fingerprinting the content
    pub fn new(content: &[u8]) -> Self {
        Self::with_fingerprint(content, Fingerprint::of(content))
    }

    fn with_fingerprint(content: &[u8], fingerprint: Fingerprint) -> Self {
        Self {
            content: Arc::from(content),
            fingerprint,
        }
    }

    /// The cached bytes
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Shared handle to the cached bytes
    pub fn shared_content(&self) -> Arc<[u8]> {
        Arc::clone(&self.content)
    }

    pub fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    fn matches(&self, fingerprint: &Fingerprint, len: usize) -> bool {
        self.content.len() == len && self.fingerprint == *fingerprint
    }
}

/// Result of a deduplicating write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Content was persisted to disk
    Written,
    /// Content matched the cached copy; disk was left untouched
    Unchanged,
}

impl WriteOutcome {
    pub fn was_written(&self) -> bool {
        matches!(self, Self::Written)
    }
}

impl fmt::Display for WriteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Written => write!(f, "written"),
            Self::Unchanged => write!(f, "unchanged"),
        }
    }
}

/// Name-keyed content cache with write deduplication
///
/// Entries are never expired. With a capacity the least recently used entry
/// is evicted once the cache is full; a later read of an evicted name falls
/// through to disk, which always holds the same bytes.
pub struct ContentCache {
    entries: Mutex<LruCache<String, Arc<CacheEntry>>>,
    /// Per-key write locks; never removed, so a key always maps to one lock
    write_locks: DashMap<String, Arc<Mutex<()>>>,
    capacity: Option<NonZeroUsize>,
}

impl ContentCache {
    /// Create a cache; `None` or `Some(0)` means unbounded
    pub fn new(capacity: Option<usize>) -> Self {
        let capacity = capacity.and_then(NonZeroUsize::new);
        let entries = match capacity {
            Some(cap) => LruCache::new(cap),
            None => LruCache::unbounded(),
        };

        Self {
            entries: Mutex::new(entries),
            write_locks: DashMap::new(),
            capacity,
        }
    }

    /// Create an unbounded cache
    pub fn unbounded() -> Self {
        Self::new(None)
    }

    /// The process-wide cache shared by every caching resource
    pub fn global() -> Arc<ContentCache> {
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(Self::unbounded())))
    }

    /// Set up the process-wide cache with the given capacity
    ///
    /// Only the first initialization wins. Returns false if the global
    /// cache already existed.
    pub fn install_global(capacity: Option<usize>) -> bool {
        let installed = GLOBAL.set(Arc::new(Self::new(capacity))).is_ok();
        if installed {
            debug!("Installed global content cache (capacity: {:?})", capacity);
        }
        installed
    }

    /// Maximum number of entries, if bounded
    pub fn capacity(&self) -> Option<usize> {
        self.capacity.map(NonZeroUsize::get)
    }

    /// Look up the cached entry for `key`, marking it recently used
    pub fn get(&self, key: &str) -> Option<Arc<CacheEntry>> {
        self.lock_entries().get(key).cloned()
    }

    /// Check whether `key` is cached without touching its recency
    pub fn contains(&self, key: &str) -> bool {
        self.lock_entries().contains(key)
    }

    /// Fingerprint of the cached content for `key`
    pub fn fingerprint(&self, key: &str) -> Option<Fingerprint> {
        self.lock_entries().peek(key).map(|e| e.fingerprint())
    }

    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_entries().is_empty()
    }

    /// Drop the entry for `key`; returns true if one was present
    pub fn invalidate(&self, key: &str) -> bool {
        let lock = self.write_lock(key);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.lock_entries().pop(key).is_some()
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.lock_entries().clear();
    }

    /// Write `content` for `key` unless it matches the cached copy
    ///
    /// A key with no entry compares as empty content. When the content
    /// differs, `persist` is called and the cache is only updated once it
    /// succeeds. The whole sequence holds the key's write lock, which no
    /// other key shares.
    pub fn write_through<F>(&self, key: &str, content: &[u8], persist: F) -> StoreResult<WriteOutcome>
    where
        F: FnOnce(&[u8]) -> StoreResult<()>,
    {
        let lock = self.write_lock(key);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let incoming = Fingerprint::of(content);
        let unchanged = match self.lock_entries().peek(key) {
            Some(entry) => entry.matches(&incoming, content.len()),
            None => content.is_empty(),
        };

        if unchanged {
            debug!("Skipping write for {}: content unchanged ({})", key, incoming.short());
            return Ok(WriteOutcome::Unchanged);
        }

        persist(content)?;

        let entry = Arc::new(CacheEntry::with_fingerprint(content, incoming));
        if let Some((evicted, _)) = self.lock_entries().push(key.to_string(), entry) {
            if evicted != key {
                debug!("Evicted {} from content cache", evicted);
            }
        }

        debug!("Cached {} ({} bytes, {})", key, content.len(), incoming.short());
        Ok(WriteOutcome::Written)
    }

    fn lock_entries(&self) -> MutexGuard<'_, LruCache<String, Arc<CacheEntry>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The map shard guard is released before the caller locks
    fn write_lock(&self, key: &str) -> Arc<Mutex<()>> {
        if let Some(lock) = self.write_locks.get(key) {
            return Arc::clone(&lock);
        }
        Arc::clone(&self.write_locks.entry(key.to_string()).or_default())
    }
}

impl Default for ContentCache {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl fmt::Debug for ContentCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}
