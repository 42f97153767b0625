//! Domain layer with core entities, errors, ports, and pure services.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Pure domain services.
pub mod services;

pub use entities::{Asset, Category, LoadState};
pub use errors::{FetchError, FetchResult};
pub use services::VariantResolver;
