//! Bounded pixmap cache.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use lru::LruCache;
use parking_lot::Mutex;

use crate::cache_key::CacheKey;
use crate::pixmap::IconPixmap;

/// Storage for rendered pixmaps.
///
/// Implementations synchronise internally. Two threads missing the same key
/// may both render and insert; the later insert wins.
pub trait PixmapCache: Send + Sync {
    fn find(&self, key: &CacheKey) -> Option<Arc<IconPixmap>>;

    fn insert(&self, key: CacheKey, pixmap: Arc<IconPixmap>);

    fn clear(&self);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Counters of an [`LruPixmapCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub entries: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
}

/// A [`PixmapCache`] evicting the least recently used pixmap.
pub struct LruPixmapCache {
    entries: Mutex<LruCache<CacheKey, Arc<IconPixmap>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl LruPixmapCache {
    /// Creates a cache holding at most `capacity` pixmaps (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.lock();
        CacheStats {
            entries: entries.len(),
            capacity: entries.cap().get(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl PixmapCache for LruPixmapCache {
    fn find(&self, key: &CacheKey) -> Option<Arc<IconPixmap>> {
        let found = self.entries.lock().get(key).cloned();
        let counter = if found.is_some() { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    fn insert(&self, key: CacheKey, pixmap: Arc<IconPixmap>) {
        if key.is_empty() {
            return;
        }
        self.entries.lock().put(key, pixmap);
    }

    fn clear(&self) {
        self.entries.lock().clear();
    }

    fn len(&self) -> usize {
        self.entries.lock().len()
    }
}
