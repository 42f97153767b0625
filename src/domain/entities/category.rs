//! Catalog category definitions.

use serde::{Deserialize, Serialize};

/// Display name of the favorites pseudo-category.
pub const FAVORITES_NAME: &str = "❤Favourites";

/// A catalog category.
///
/// `Favorites` is a synthetic, locally-sourced category backed by the
/// favorites ledger rather than a remote node. Keeping it a distinct variant
/// (instead of a reserved string) makes it impossible to confuse with an
/// ordinary category that happens to share its display name. When present it
/// is always pinned at index 0 of a category list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// The local favorites pseudo-category.
    Favorites,
    /// A remote category; the name doubles as the catalog path segment.
    Named(String),
}

impl Category {
    /// Creates a named category.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Favorites => FAVORITES_NAME,
            Self::Named(name) => name,
        }
    }

    /// Returns the remote catalog node for this category, or `None` for the
    /// favorites pseudo-category, which never corresponds to a remote path.
    #[must_use]
    pub fn remote_node(&self) -> Option<&str> {
        match self {
            Self::Favorites => None,
            Self::Named(name) => Some(name),
        }
    }

    /// Returns true for the favorites pseudo-category.
    #[must_use]
    pub const fn is_favorites(&self) -> bool {
        matches!(self, Self::Favorites)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
