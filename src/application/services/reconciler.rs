//! Category list reconciliation.
//!
//! Merges the remote category list, the local favorites set, and the
//! previously displayed list into the list shown to the user, tracking an
//! offline flag. The guiding rule: favor some usable content over an error
//! screen. Favorites are always locally available, which makes them the most
//! durable fallback.

use crate::domain::entities::Category;
use crate::domain::errors::FetchResult;
use tracing::warn;

/// The category list currently shown to the user, plus whether it is a
/// fallback rather than freshly confirmed from the remote source.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    /// Displayed categories; favorites pinned first when present.
    pub categories: Vec<Category>,
    /// True when the displayed list is a fallback.
    pub offline: bool,
}

impl CatalogSnapshot {
    /// Returns true once any list has been displayed.
    #[must_use]
    pub fn has_list(&self) -> bool {
        !self.categories.is_empty()
    }
}

/// Produces the next displayed category list.
///
/// A successful remote fetch is authoritative: names sorted, favorites
/// pinned first, offline cleared. On failure the ladder is: favorites-only
/// when any favorite exists; the bundled defaults on a cold start; otherwise
/// the prior list untouched, offline flag left at its previous value since
/// stale-but-valid data is still being shown.
#[must_use]
pub fn reconcile(
    prior: &CatalogSnapshot,
    remote: FetchResult<Vec<String>>,
    favorites_len: usize,
    defaults: &[String],
) -> CatalogSnapshot {
    match remote {
        Ok(names) => CatalogSnapshot {
            categories: with_favorites_pinned(names),
            offline: false,
        },
        Err(err) => {
            warn!(error = %err, "Category fetch failed, falling back");
            if favorites_len > 0 {
                CatalogSnapshot {
                    categories: vec![Category::Favorites],
                    offline: true,
                }
            } else if prior.has_list() {
                prior.clone()
            } else {
                CatalogSnapshot {
                    categories: with_favorites_pinned(defaults.to_vec()),
                    offline: true,
                }
            }
        }
    }
}

fn with_favorites_pinned(mut names: Vec<String>) -> Vec<Category> {
    names.sort();
    let mut categories = Vec::with_capacity(names.len() + 1);
    categories.push(Category::Favorites);
    categories.extend(names.into_iter().map(Category::Named));
    categories
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::FAVORITES_NAME;
    use crate::domain::errors::FetchError;

    fn names(snapshot: &CatalogSnapshot) -> Vec<&str> {
        snapshot.categories.iter().map(Category::name).collect()
    }

    fn fetch_failure() -> FetchResult<Vec<String>> {
        Err(FetchError::Network("offline".into()))
    }

    #[test]
    fn test_successful_fetch_is_authoritative() {
        let prior = CatalogSnapshot {
            categories: vec![Category::named("Old")],
            offline: true,
        };
        let next = reconcile(
            &prior,
            Ok(vec!["B".to_string(), "A".to_string()]),
            0,
            &["Default".to_string()],
        );

        assert_eq!(names(&next), vec![FAVORITES_NAME, "A", "B"]);
        assert!(!next.offline);
    }

    #[test]
    fn test_failure_with_favorites_shows_favorites_only() {
        let prior = CatalogSnapshot {
            categories: vec![Category::Favorites, Category::named("A")],
            offline: false,
        };
        let next = reconcile(&prior, fetch_failure(), 1, &[]);

        assert_eq!(names(&next), vec![FAVORITES_NAME]);
        assert!(next.offline);
    }

    #[test]
    fn test_failure_on_cold_start_uses_bundled_defaults() {
        let defaults = vec!["Urban".to_string(), "Nature".to_string()];
        let next = reconcile(&CatalogSnapshot::default(), fetch_failure(), 0, &defaults);

        assert_eq!(names(&next), vec![FAVORITES_NAME, "Nature", "Urban"]);
        assert!(next.offline);
    }

    #[test]
    fn test_failure_with_prior_list_keeps_it_untouched() {
        let prior = CatalogSnapshot {
            categories: vec![Category::Favorites, Category::named("A")],
            offline: false,
        };
        let next = reconcile(&prior, fetch_failure(), 0, &["Default".to_string()]);

        assert_eq!(names(&next), names(&prior));
        // No forced transition to offline while stale-but-valid data shows.
        assert!(!next.offline);
    }

    #[test]
    fn test_empty_remote_list_still_pins_favorites() {
        // Known quirk of the source behavior: a successful fetch with zero
        // categories leaves a favorites-only catalog, preserved as-is.
        let next = reconcile(&CatalogSnapshot::default(), Ok(Vec::new()), 0, &[]);
        assert_eq!(names(&next), vec![FAVORITES_NAME]);
        assert!(!next.offline);
    }
}
