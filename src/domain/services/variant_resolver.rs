//! Quality-variant URL derivation.
//!
//! The remote store holds only canonical image URLs; quality variants are a
//! CDN naming convention, a short suffix token appended to the filename stem.
//! All three user-facing qualities are derived losslessly from one stored
//! string, with no extra round trip.

/// File extensions that participate in suffix rewriting (case-insensitive).
const SUPPORTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Derives original/thumbnail/full-resolution URLs of an asset from a single
/// stored URL by reversible filename-suffix rewriting.
///
/// Transformation is best-effort: malformed URLs and unsupported extensions
/// are returned unchanged, never rejected, so asset construction is never
/// blocked by an untransformable string.
#[derive(Debug, Clone)]
pub struct VariantResolver {
    thumb_suffix: String,
    preferred_thumb_suffix: String,
    full_suffix: String,
}

struct UrlParts<'a> {
    /// Everything up to and including the last `/`.
    prefix: &'a str,
    /// Filename without extension.
    stem: &'a str,
    /// Extension without the dot.
    ext: &'a str,
}

fn split(url: &str) -> Option<UrlParts<'_>> {
    let slash = url.rfind('/')?;
    let name = &url[slash + 1..];
    let dot = name.rfind('.')?;
    if dot == 0 {
        return None;
    }
    let ext = &name[dot + 1..];
    if !SUPPORTED_EXTENSIONS
        .iter()
        .any(|supported| ext.eq_ignore_ascii_case(supported))
    {
        return None;
    }
    Some(UrlParts {
        prefix: &url[..=slash],
        stem: &name[..dot],
        ext,
    })
}

impl VariantResolver {
    /// Creates a resolver with the three configured suffix tokens.
    #[must_use]
    pub fn new(
        thumb_suffix: impl Into<String>,
        preferred_thumb_suffix: impl Into<String>,
        full_suffix: impl Into<String>,
    ) -> Self {
        Self {
            thumb_suffix: thumb_suffix.into(),
            preferred_thumb_suffix: preferred_thumb_suffix.into(),
            full_suffix: full_suffix.into(),
        }
    }

    /// Removes a trailing quality suffix from the filename stem, yielding the
    /// canonical URL.
    ///
    /// Matching is suffix-exact on the stem (no regex), so a token appearing
    /// elsewhere in the filename is left alone. At most one token is removed;
    /// stripping is idempotent only in combination with [`apply_suffix`],
    /// which never double-applies. Unsupported extensions and malformed URLs
    /// are returned unchanged.
    ///
    /// [`apply_suffix`]: Self::apply_suffix
    #[must_use]
    pub fn strip_suffixes(&self, url: &str) -> String {
        let Some(parts) = split(url) else {
            return url.to_string();
        };

        // Longest token first, so an overlapping shorter token cannot shadow
        // a longer one (e.g. "l" vs "xl").
        let mut tokens = [
            self.thumb_suffix.as_str(),
            self.preferred_thumb_suffix.as_str(),
            self.full_suffix.as_str(),
        ];
        tokens.sort_by_key(|token| std::cmp::Reverse(token.len()));

        for token in tokens {
            // An empty token would match everything; a full-stem match would
            // leave an empty filename. Neither is a real variant.
            if !token.is_empty() && parts.stem.len() > token.len() && parts.stem.ends_with(token) {
                let bare = &parts.stem[..parts.stem.len() - token.len()];
                return format!("{}{}.{}", parts.prefix, bare, parts.ext);
            }
        }

        url.to_string()
    }

    /// Appends a quality suffix to the filename stem.
    ///
    /// Strips first, so applying to an already-suffixed variant produces the
    /// same result as applying to the canonical URL, and a stem that already
    /// ends with the token is never suffixed twice.
    #[must_use]
    pub fn apply_suffix(&self, token: &str, url: &str) -> String {
        let stripped = self.strip_suffixes(url);
        let Some(parts) = split(&stripped) else {
            return stripped;
        };
        if token.is_empty() || parts.stem.ends_with(token) {
            return stripped;
        }
        format!("{}{}{}.{}", parts.prefix, parts.stem, token, parts.ext)
    }

    /// Returns the preferred-quality thumbnail variant.
    #[must_use]
    pub fn thumbnail_url(&self, url: &str) -> String {
        self.apply_suffix(&self.preferred_thumb_suffix, url)
    }

    /// Returns the alternate (lower-quality) thumbnail variant.
    #[must_use]
    pub fn alternate_thumbnail_url(&self, url: &str) -> String {
        self.apply_suffix(&self.thumb_suffix, url)
    }

    /// Returns the full-resolution variant.
    #[must_use]
    pub fn full_resolution_url(&self, url: &str) -> String {
        self.apply_suffix(&self.full_suffix, url)
    }

    /// Returns the canonical, suffix-free URL.
    #[must_use]
    pub fn original_url(&self, url: &str) -> String {
        self.strip_suffixes(url)
    }
}
