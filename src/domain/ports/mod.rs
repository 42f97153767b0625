//! Port definitions for external collaborators.

mod catalog_port;
mod image_cache_port;
mod settings_port;
mod transport_port;

pub use catalog_port::CatalogPort;
pub use image_cache_port::ImageCachePort;
pub use settings_port::SettingsPort;
pub use transport_port::ImageTransport;
