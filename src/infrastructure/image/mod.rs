//! Image pipeline infrastructure.
//!
//! This module provides:
//! - Memory caching with LRU eviction
//! - HTTP transport for image payloads
//! - Per-request resilient loading with retry and cancellation

pub mod fetcher;
pub mod memory_cache;
pub mod transport;

pub use fetcher::{LoaderConfig, MAX_ATTEMPTS, MIN_IMAGE_BYTES, RETRY_BACKOFF, RemoteImageLoader};
pub use memory_cache::{CacheStats, MemoryImageCache};
pub use transport::HttpImageTransport;
