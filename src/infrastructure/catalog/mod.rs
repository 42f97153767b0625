//! Remote catalog adapters.

pub mod client;

pub use client::CatalogClient;
