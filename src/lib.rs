//! Murale - a wallpaper catalog client with offline-tolerant favorites.
//!
//! The crate implements the client-side pipeline for browsing a catalog of
//! remotely hosted images: quality-variant URL derivation, resilient image
//! fetching with caching and bounded retry, and category reconciliation that
//! degrades gracefully when the network is unavailable.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing services built over port definitions.
pub mod application;
/// Domain layer containing entities, errors, ports, and pure services.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "murale";
