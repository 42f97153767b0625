//! In-memory LRU image cache implementation.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use lru::LruCache;
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::domain::ports::ImageCachePort;

/// Default maximum number of decoded payloads to keep in memory.
pub const DEFAULT_CACHE_SIZE: usize = 100;

/// Process-wide in-memory cache of decoded images, keyed by exact variant URL.
///
/// Bounded LRU capacity stands in for host memory pressure: any entry may be
/// evicted between a `put` and the next `get`, and callers tolerate misses at
/// any point. Lock scope is a single map operation.
pub struct MemoryImageCache {
    cache: Mutex<LruCache<String, Arc<image::DynamicImage>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoryImageCache {
    /// Creates a new cache with the specified capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Mutex::new(LruCache::new(cap)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Creates a new cache with the default capacity.
    #[must_use]
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CACHE_SIZE)
    }

    /// Returns cache statistics.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        CacheStats {
            hits,
            misses,
            hit_rate,
            size: self.len(),
        }
    }
}

impl Default for MemoryImageCache {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

/// Statistics about cache performance.
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Hit rate as a percentage.
    pub hit_rate: f64,
    /// Current number of cached images.
    pub size: usize,
}

impl std::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cache: {} images, {:.1}% hit rate ({} hits, {} misses)",
            self.size, self.hit_rate, self.hits, self.misses
        )
    }
}

impl ImageCachePort for MemoryImageCache {
    fn get(&self, url: &str) -> Option<Arc<image::DynamicImage>> {
        let mut cache = self.cache.lock();
        if let Some(img) = cache.get(url) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(url = %url, "Memory cache hit");
            Some(img.clone())
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            trace!(url = %url, "Memory cache miss");
            None
        }
    }

    fn put(&self, url: &str, image: Arc<image::DynamicImage>) {
        let mut cache = self.cache.lock();
        debug!(url = %url, "Storing image in memory cache");
        cache.put(url.to_string(), image);
    }

    fn len(&self) -> usize {
        self.cache.lock().len()
    }

    fn clear(&self) {
        self.cache.lock().clear();
        debug!("Cleared memory image cache");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_image() -> Arc<image::DynamicImage> {
        Arc::new(image::DynamicImage::new_rgb8(10, 10))
    }

    #[test]
    fn test_cache_put_and_get() {
        let cache = MemoryImageCache::new(10);
        let url = "https://host/p/img_l.jpg";

        cache.put(url, test_image());
        let retrieved = cache.get(url);

        assert!(retrieved.is_some());
        assert_eq!(retrieved.unwrap().width(), 10);
    }

    #[test]
    fn test_cache_miss() {
        let cache = MemoryImageCache::new(10);
        assert!(cache.get("https://host/missing.jpg").is_none());
    }

    #[test]
    fn test_variants_are_cached_independently() {
        let cache = MemoryImageCache::new(10);
        cache.put("https://host/p/imgl.jpg", test_image());

        // Keyed by exact variant URL, not canonical URL.
        assert!(cache.get("https://host/p/imgl.jpg").is_some());
        assert!(cache.get("https://host/p/imgh.jpg").is_none());
        assert!(cache.get("https://host/p/img.jpg").is_none());
    }

    #[test]
    fn test_lru_eviction_under_pressure() {
        let cache = MemoryImageCache::new(2);
        cache.put("a", test_image());
        cache.put("b", test_image());
        cache.put("c", test_image());

        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_some());
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn test_clear_drops_everything() {
        let cache = MemoryImageCache::new(10);
        cache.put("a", test_image());
        cache.put("b", test_image());

        cache.clear();

        assert!(cache.is_empty());
        assert!(cache.get("a").is_none());
    }

    #[test]
    fn test_cache_stats() {
        let cache = MemoryImageCache::new(10);
        cache.put("a", test_image());

        let _ = cache.get("a");
        let _ = cache.get("missing");

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.size, 1);
    }
}
