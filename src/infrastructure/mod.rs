//! Infrastructure layer with external service adapters.

/// Remote catalog client.
pub mod catalog;
/// Configuration and local persistence.
pub mod config;
/// Image pipeline (caching, transport, resilient loading).
pub mod image;

pub use catalog::CatalogClient;
pub use config::{CliArgs, ConfigError, LogLevel, RemoteConfig, SettingsStore, StorageManager};
pub use image::{
    CacheStats, HttpImageTransport, LoaderConfig, MemoryImageCache, RemoteImageLoader,
};
