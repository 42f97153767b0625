//! HTTP image transport adapter.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::errors::{FetchError, FetchResult};
use crate::domain::ports::ImageTransport;

/// Fetches image bytes over HTTPS with a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpImageTransport {
    client: reqwest::Client,
}

impl HttpImageTransport {
    /// Creates a transport reusing an existing client.
    #[must_use]
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageTransport for HttpImageTransport {
    async fn fetch_bytes(&self, url: &str) -> FetchResult<Bytes> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body: None,
            });
        }

        response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(format!("failed to read body: {e}")))
    }
}
