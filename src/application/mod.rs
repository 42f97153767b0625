//! Application layer orchestrating domain logic over ports.

/// Service implementations.
pub mod services;

pub use services::{CatalogService, CatalogSnapshot, FavoritesLedger};
