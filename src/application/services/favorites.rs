//! Durable favorites set.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::domain::ports::SettingsPort;

/// Process-wide set of favorited canonical asset URLs.
///
/// Loaded once at startup; every mutation persists the full set synchronously
/// through the settings port. A load failure degrades to an empty set, and
/// persist failures are absorbed by the adapter, so the ledger itself never
/// errors.
pub struct FavoritesLedger {
    favorites: Mutex<HashSet<String>>,
    store: Arc<dyn SettingsPort>,
}

impl FavoritesLedger {
    /// Creates a ledger, loading the persisted set.
    ///
    /// Duplicates in the stored blob collapse by set construction.
    #[must_use]
    pub fn new(store: Arc<dyn SettingsPort>) -> Self {
        let favorites: HashSet<String> = store.favorites().into_iter().collect();
        debug!(count = favorites.len(), "Loaded favorites");
        Self {
            favorites: Mutex::new(favorites),
            store,
        }
    }

    /// Flips membership of `id` and persists. Returns the new membership.
    pub fn toggle(&self, id: &str) -> bool {
        let mut favorites = self.favorites.lock();
        let now_favorite = if favorites.remove(id) {
            false
        } else {
            favorites.insert(id.to_string());
            true
        };

        // Order in storage is not semantically meaningful; sorted for
        // deterministic files.
        let mut stored: Vec<String> = favorites.iter().cloned().collect();
        stored.sort();
        self.store.set_favorites(&stored);

        now_favorite
    }

    /// Returns true if `id` is favorited.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.favorites.lock().contains(id)
    }

    /// Returns all favorited ids, sorted.
    #[must_use]
    pub fn all(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.favorites.lock().iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Number of favorited assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.favorites.lock().len()
    }

    /// Returns true when nothing is favorited.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.favorites.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::MockSettingsPort;

    fn empty_store() -> MockSettingsPort {
        let mut store = MockSettingsPort::new();
        store.expect_favorites().return_const(Vec::new());
        store.expect_set_favorites().return_const(());
        store
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let ledger = FavoritesLedger::new(Arc::new(empty_store()));
        let id = "https://i.imgur.com/a.jpg";

        assert!(ledger.toggle(id));
        assert!(ledger.contains(id));
        assert_eq!(ledger.len(), 1);

        assert!(!ledger.toggle(id));
        assert!(!ledger.contains(id));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_every_toggle_persists_the_full_set() {
        let mut store = MockSettingsPort::new();
        store.expect_favorites().return_const(Vec::new());
        store
            .expect_set_favorites()
            .withf(|ids: &[String]| ids == ["https://i.imgur.com/a.jpg"])
            .times(1)
            .return_const(());
        store
            .expect_set_favorites()
            .withf(<[String]>::is_empty)
            .times(1)
            .return_const(());

        let ledger = FavoritesLedger::new(Arc::new(store));
        ledger.toggle("https://i.imgur.com/a.jpg");
        ledger.toggle("https://i.imgur.com/a.jpg");
    }

    #[test]
    fn test_stored_duplicates_collapse_on_load() {
        let mut store = MockSettingsPort::new();
        store.expect_favorites().return_const(vec![
            "https://i.imgur.com/a.jpg".to_string(),
            "https://i.imgur.com/a.jpg".to_string(),
            "https://i.imgur.com/b.jpg".to_string(),
        ]);

        let ledger = FavoritesLedger::new(Arc::new(store));
        assert_eq!(ledger.len(), 2);
        assert_eq!(
            ledger.all(),
            vec!["https://i.imgur.com/a.jpg", "https://i.imgur.com/b.jpg"]
        );
    }
}
