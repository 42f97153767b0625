//! Image transport port definition.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::errors::FetchResult;

/// Port for fetching raw image bytes over the network.
///
/// Implementations validate the HTTP status; payload validation (size floor,
/// decodability) belongs to the loader.
#[async_trait]
pub trait ImageTransport: Send + Sync {
    /// Fetches the body of the given URL.
    ///
    /// # Errors
    /// Returns `FetchError::Network` on transport failure and
    /// `FetchError::Status` on a non-2xx response.
    async fn fetch_bytes(&self, url: &str) -> FetchResult<Bytes>;
}
