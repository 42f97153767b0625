//! Remote wallpaper asset record.

use crate::domain::services::VariantResolver;

/// A remotely hosted wallpaper, identified by its canonical URL.
///
/// All three quality variants are derived once at construction time from a
/// single stored URL; the record is immutable afterwards. The canonical URL
/// (`id`) is also the persistence key for favorites.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Asset {
    /// Canonical URL, with all known quality suffixes stripped.
    pub id: String,
    /// The canonical, suffix-free URL.
    pub original_url: String,
    /// Preferred-quality thumbnail variant for grid display.
    pub thumbnail_url: String,
    /// Full-resolution variant.
    pub full_size_url: String,
}

impl Asset {
    /// Builds an asset from a stored URL string.
    ///
    /// Returns `None` when the input is not a well-formed URL. The input may
    /// be any variant of the asset; identity comes from the stripped form, so
    /// two variants of the same image produce equal records.
    #[must_use]
    pub fn new(url: &str, resolver: &VariantResolver) -> Option<Self> {
        url::Url::parse(url).ok()?;
        let canonical = resolver.strip_suffixes(url);
        let thumbnail_url = resolver.thumbnail_url(&canonical);
        let full_size_url = resolver.full_resolution_url(&canonical);
        Some(Self {
            id: canonical.clone(),
            original_url: canonical,
            thumbnail_url,
            full_size_url,
        })
    }

    /// Returns the URL to display in a grid cell.
    ///
    /// With HD thumbnails enabled this is the full-resolution variant,
    /// otherwise the preferred thumbnail.
    #[must_use]
    pub fn grid_url(&self, hd_thumbnails: bool) -> &str {
        if hd_thumbnails {
            &self.full_size_url
        } else {
            &self.thumbnail_url
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> VariantResolver {
        VariantResolver::new("m", "l", "h")
    }

    #[test]
    fn test_asset_from_canonical_url() {
        let asset = Asset::new("https://i.imgur.com/abc123.jpg", &resolver()).unwrap();
        assert_eq!(asset.id, "https://i.imgur.com/abc123.jpg");
        assert_eq!(asset.original_url, "https://i.imgur.com/abc123.jpg");
        assert_eq!(asset.thumbnail_url, "https://i.imgur.com/abc123l.jpg");
        assert_eq!(asset.full_size_url, "https://i.imgur.com/abc123h.jpg");
    }

    #[test]
    fn test_variant_input_canonicalizes_to_same_identity() {
        let from_thumb = Asset::new("https://i.imgur.com/abc123l.jpg", &resolver()).unwrap();
        let from_full = Asset::new("https://i.imgur.com/abc123h.jpg", &resolver()).unwrap();
        assert_eq!(from_thumb, from_full);
        assert_eq!(from_thumb.id, "https://i.imgur.com/abc123.jpg");
    }

    #[test]
    fn test_malformed_url_is_rejected() {
        assert!(Asset::new("not a url", &resolver()).is_none());
        assert!(Asset::new("", &resolver()).is_none());
    }

    #[test]
    fn test_grid_url_honors_hd_toggle() {
        let asset = Asset::new("https://i.imgur.com/abc123.jpg", &resolver()).unwrap();
        assert_eq!(asset.grid_url(false), asset.thumbnail_url);
        assert_eq!(asset.grid_url(true), asset.full_size_url);
    }
}
