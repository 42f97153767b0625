//! Application services.

pub mod catalog_service;
pub mod favorites;
pub mod reconciler;

pub use catalog_service::CatalogService;
pub use favorites::FavoritesLedger;
pub use reconciler::{CatalogSnapshot, reconcile};
