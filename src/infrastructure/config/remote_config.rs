//! Remote backend configuration.

use serde::{Deserialize, Serialize};

use crate::domain::services::VariantResolver;

/// Structured startup configuration for the remote catalog backend.
///
/// Loaded once at startup; on load failure the app continues in degraded mode
/// with [`RemoteConfig::placeholder`] rather than failing to start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base address of the remote key-value JSON store.
    pub database_url: String,

    /// Locally bundled default category list, the last rung of the offline
    /// fallback ladder.
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,

    /// Suffix token for the lower-quality thumbnail variant.
    #[serde(default = "default_thumbnail_suffix")]
    pub thumbnail_suffix: String,

    /// Suffix token for the preferred thumbnail variant.
    #[serde(default = "default_preferred_thumbnail_suffix")]
    pub preferred_thumbnail_suffix: String,

    /// Suffix token for the full-resolution variant.
    #[serde(default = "default_full_size_suffix")]
    pub full_size_suffix: String,

    /// Node holding the latest published app version.
    #[serde(default = "default_version_node")]
    pub version_node: String,

    /// Node holding the remote category name list.
    #[serde(default = "default_categories_node")]
    pub categories_node: String,
}

fn default_categories() -> Vec<String> {
    vec!["All".to_string()]
}

fn default_thumbnail_suffix() -> String {
    "m".to_string()
}

fn default_preferred_thumbnail_suffix() -> String {
    "l".to_string()
}

fn default_full_size_suffix() -> String {
    "h".to_string()
}

fn default_version_node() -> String {
    "CurrentVersion".to_string()
}

fn default_categories_node() -> String {
    "categories".to_string()
}

impl RemoteConfig {
    /// Fixed built-in fallback used when the config file is missing or
    /// corrupt.
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            database_url: "https://example.firebaseio.com".to_string(),
            categories: default_categories(),
            thumbnail_suffix: default_thumbnail_suffix(),
            preferred_thumbnail_suffix: default_preferred_thumbnail_suffix(),
            full_size_suffix: default_full_size_suffix(),
            version_node: default_version_node(),
            categories_node: default_categories_node(),
        }
    }

    /// Builds the variant resolver configured with this config's suffix
    /// tokens.
    #[must_use]
    pub fn resolver(&self) -> VariantResolver {
        VariantResolver::new(
            &self.thumbnail_suffix,
            &self.preferred_thumbnail_suffix,
            &self.full_size_suffix,
        )
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self::placeholder()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_with_partial_fields() {
        let toml_content = r#"
            database_url = "https://wallpapers.example.com"
            categories = ["Nature", "Urban"]
            preferred_thumbnail_suffix = "xl"
        "#;

        let config: RemoteConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.database_url, "https://wallpapers.example.com");
        assert_eq!(config.categories, vec!["Nature", "Urban"]);
        assert_eq!(config.preferred_thumbnail_suffix, "xl");
        // Omitted fields fall back to serde defaults.
        assert_eq!(config.thumbnail_suffix, "m");
        assert_eq!(config.full_size_suffix, "h");
        assert_eq!(config.version_node, "CurrentVersion");
        assert_eq!(config.categories_node, "categories");
    }

    #[test]
    fn test_missing_database_url_is_an_error() {
        let result = toml::from_str::<RemoteConfig>("categories = [\"All\"]");
        assert!(result.is_err());
    }

    #[test]
    fn test_placeholder_config() {
        let config = RemoteConfig::placeholder();
        assert_eq!(config.categories, vec!["All"]);
        assert_eq!(config.preferred_thumbnail_suffix, "l");
    }

    #[test]
    fn test_resolver_uses_configured_tokens() {
        let config = RemoteConfig::placeholder();
        let resolver = config.resolver();
        assert_eq!(
            resolver.thumbnail_url("https://i.imgur.com/abc.jpg"),
            "https://i.imgur.com/abcl.jpg"
        );
    }
}
