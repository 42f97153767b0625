//! Errors produced by remote fetches and the image pipeline.

/// Result type for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Errors that can occur while fetching catalog data or image payloads.
///
/// Nothing here is fatal: catalog errors feed the offline fallback ladder,
/// image errors are retried and then surfaced per-asset as a failed state.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    /// Transport-level failure (DNS, TLS, timeout, connection reset).
    #[error("network error: {0}")]
    Network(String),
    /// The server answered with a non-2xx status.
    #[error("server returned {status} for {url}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Body snippet, truncated, for diagnostics.
        body: Option<String>,
    },
    /// The response body did not match any accepted shape.
    #[error("cannot parse response: {0}")]
    Parse(String),
    /// The payload is below the minimum size floor and is treated as a
    /// placeholder/corrupt response.
    #[error("response too small: {len} bytes (minimum {min})")]
    TooSmall {
        /// Received body length in bytes.
        len: usize,
        /// Configured minimum size floor in bytes.
        min: usize,
    },
    /// The payload could not be decoded as an image.
    #[error("image decode failed: {0}")]
    Decode(String),
}
