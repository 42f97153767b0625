//! HTTP client for the remote key-value catalog store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, warn};

use crate::domain::errors::{FetchError, FetchResult};
use crate::domain::ports::CatalogPort;
use crate::infrastructure::config::RemoteConfig;

/// Request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum body snippet length carried in status errors.
const BODY_SNIPPET_CHARS: usize = 200;

/// Catalog adapter over a key-value JSON store reachable over HTTPS.
///
/// Every node is addressed as `<base>/<node>.json`. Bodies are decoded
/// leniently because the store is hand-maintained: lists may arrive as JSON
/// arrays or objects, version values in several numeric shapes.
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
    categories_node: String,
    version_node: String,
}

impl CatalogClient {
    /// Creates a client for the configured backend.
    ///
    /// # Errors
    /// Returns `FetchError::Network` if the HTTP client cannot be built.
    pub fn new(config: &RemoteConfig) -> FetchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| FetchError::Network(format!("failed to create HTTP client: {e}")))?;
        Ok(Self::with_client(client, config))
    }

    /// Creates a client reusing an existing `reqwest` client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, config: &RemoteConfig) -> Self {
        Self {
            client,
            base_url: config.database_url.trim_end_matches('/').to_string(),
            categories_node: config.categories_node.clone(),
            version_node: config.version_node.clone(),
        }
    }

    fn node_url(&self, node: &str) -> String {
        format!("{}/{}.json", self.base_url, node)
    }

    async fn fetch_node(&self, node: &str) -> FetchResult<Bytes> {
        let url = self.node_url(node);
        debug!(url = %url, "Catalog request");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(format!("request failed: {e}")))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(format!("failed to read body: {e}")))?;

        if !status.is_success() {
            let snippet: String = String::from_utf8_lossy(&bytes)
                .chars()
                .take(BODY_SNIPPET_CHARS)
                .collect();
            warn!(url = %url, status = %status, "Catalog request failed");
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
                body: (!snippet.is_empty()).then_some(snippet),
            });
        }

        Ok(bytes)
    }
}

/// Decodes a node body into a list of strings.
///
/// Accepted shapes, in order: a JSON array of strings; an object mapping
/// arbitrary keys to strings, consumed sorted by key; any object, keeping
/// only its string values (sorted by key for determinism).
fn decode_string_list(body: &[u8]) -> FetchResult<Vec<String>> {
    if let Ok(list) = serde_json::from_slice::<Vec<String>>(body) {
        return Ok(list);
    }
    if let Ok(map) = serde_json::from_slice::<BTreeMap<String, String>>(body) {
        return Ok(map.into_values().collect());
    }
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| FetchError::Parse(e.to_string()))?;
    if let serde_json::Value::Object(map) = value {
        let mut entries: Vec<(String, String)> = map
            .into_iter()
            .filter_map(|(key, value)| value.as_str().map(|s| (key, s.to_string())))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        return Ok(entries.into_iter().map(|(_, value)| value).collect());
    }
    Err(FetchError::Parse(
        "expected an array or object of strings".into(),
    ))
}

/// Decodes a version node body.
///
/// Accepted shapes, in order: an integer array (first element), a bare
/// integer, an object of integers (smallest value).
fn decode_version(body: &[u8]) -> FetchResult<i64> {
    if let Ok(values) = serde_json::from_slice::<Vec<i64>>(body) {
        if let Some(version) = values.first() {
            return Ok(*version);
        }
    }
    if let Ok(version) = serde_json::from_slice::<i64>(body) {
        return Ok(version);
    }
    if let Ok(map) = serde_json::from_slice::<BTreeMap<String, i64>>(body) {
        if let Some(version) = map.values().min() {
            return Ok(*version);
        }
    }
    Err(FetchError::Parse("expected a version number".into()))
}

#[async_trait]
impl CatalogPort for CatalogClient {
    async fn fetch_category_names(&self) -> FetchResult<Vec<String>> {
        let body = self.fetch_node(&self.categories_node).await?;
        decode_string_list(&body)
    }

    async fn fetch_category_urls(&self, category: &str) -> FetchResult<Vec<String>> {
        let body = self.fetch_node(category).await?;
        decode_string_list(&body)
    }

    async fn fetch_remote_version(&self) -> FetchResult<i64> {
        let body = self.fetch_node(&self.version_node).await?;
        decode_version(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_decode_string_array() {
        let list = decode_string_list(br#"["a", "b"]"#).unwrap();
        assert_eq!(list, vec!["a", "b"]);
    }

    #[test]
    fn test_decode_string_object_sorted_by_key() {
        let body = br#"{"k2": "second", "k1": "first", "k10": "tenth"}"#;
        let list = decode_string_list(body).unwrap();
        // Lexicographic key order, not insertion order.
        assert_eq!(list, vec!["first", "tenth", "second"]);
    }

    #[test]
    fn test_decode_mixed_object_keeps_string_values() {
        let body = br#"{"a": "url1", "b": 42, "c": "url2", "d": null}"#;
        let list = decode_string_list(body).unwrap();
        assert_eq!(list, vec!["url1", "url2"]);
    }

    #[test_case(b"null"; "missing node")]
    #[test_case(b"17"; "bare number")]
    #[test_case(b"not json"; "garbage")]
    fn test_undecodable_list_is_a_parse_error(body: &[u8]) {
        assert!(matches!(
            decode_string_list(body),
            Err(FetchError::Parse(_))
        ));
    }

    #[test_case(br#"[4]"# , 4; "single element array")]
    #[test_case(br#"[4, 9]"#, 4; "first element of array")]
    #[test_case(b"7", 7; "bare integer")]
    #[test_case(br#"{"ios": 3, "android": 5}"#, 3; "smallest object value")]
    fn test_decode_version_shapes(body: &[u8], expected: i64) {
        assert_eq!(decode_version(body).unwrap(), expected);
    }

    #[test]
    fn test_unparseable_version_is_a_parse_error() {
        assert!(matches!(
            decode_version(br#""seven""#),
            Err(FetchError::Parse(_))
        ));
        assert!(matches!(decode_version(b"[]"), Err(FetchError::Parse(_))));
    }

    #[test]
    fn test_node_url_normalizes_trailing_slash() {
        let mut config = RemoteConfig::placeholder();
        config.database_url = "https://db.example.com/".to_string();
        let client = CatalogClient::new(&config).unwrap();
        assert_eq!(
            client.node_url("Nature"),
            "https://db.example.com/Nature.json"
        );
    }
}
