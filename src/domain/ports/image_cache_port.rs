//! Port definition for the in-memory image cache.

use std::sync::Arc;

/// Port for caching decoded image payloads.
///
/// Keys are exact variant URL strings, not canonical URLs: thumbnail and
/// full-resolution payloads of the same asset are cached independently.
/// Entries may be dropped at any time, so `get` is allowed to miss even
/// immediately after `put`; callers must tolerate that. Not a durability
/// layer: contents never survive process restart.
pub trait ImageCachePort: Send + Sync {
    /// Looks up the payload cached under the exact URL.
    fn get(&self, url: &str) -> Option<Arc<image::DynamicImage>>;

    /// Stores a payload under the exact URL it was requested with.
    fn put(&self, url: &str, image: Arc<image::DynamicImage>);

    /// Returns the current number of cached payloads.
    fn len(&self) -> usize;

    /// Returns true if the cache is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops all cached payloads.
    fn clear(&self);
}
