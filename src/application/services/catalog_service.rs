//! Catalog orchestration.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tracing::debug;

use super::favorites::FavoritesLedger;
use super::reconciler::{CatalogSnapshot, reconcile};
use crate::domain::entities::{Asset, Category};
use crate::domain::errors::FetchResult;
use crate::domain::ports::CatalogPort;
use crate::domain::services::VariantResolver;

/// Drives category reloads and per-category asset listings.
///
/// Holds the current catalog snapshot. Concurrent reloads supersede each
/// other through an epoch counter: a reload that was overtaken drops its
/// result instead of interleaving with the winner (remote catalog reads are
/// idempotent, so last-writer-wins is sound).
pub struct CatalogService {
    catalog: Arc<dyn CatalogPort>,
    resolver: VariantResolver,
    defaults: Vec<String>,
    snapshot: Mutex<CatalogSnapshot>,
    reload_epoch: AtomicU64,
}

impl CatalogService {
    /// Creates a service over the given catalog backend.
    #[must_use]
    pub fn new(
        catalog: Arc<dyn CatalogPort>,
        resolver: VariantResolver,
        defaults: Vec<String>,
    ) -> Self {
        Self {
            catalog,
            resolver,
            defaults,
            snapshot: Mutex::new(CatalogSnapshot::default()),
            reload_epoch: AtomicU64::new(0),
        }
    }

    /// Returns the currently displayed catalog snapshot.
    #[must_use]
    pub fn snapshot(&self) -> CatalogSnapshot {
        self.snapshot.lock().clone()
    }

    /// Reloads the category list, reconciling the remote result with
    /// favorites and the prior snapshot.
    ///
    /// Returns the snapshot in effect afterwards, which is the prior winner's
    /// when this reload was superseded mid-flight.
    pub async fn refresh_categories(&self, favorites_len: usize) -> CatalogSnapshot {
        let epoch = self.reload_epoch.fetch_add(1, Ordering::AcqRel) + 1;
        let remote = self.catalog.fetch_category_names().await;

        let mut snapshot = self.snapshot.lock();
        if self.reload_epoch.load(Ordering::Acquire) != epoch {
            debug!("Category reload superseded, dropping result");
            return snapshot.clone();
        }

        let next = reconcile(&snapshot, remote, favorites_len, &self.defaults);
        *snapshot = next.clone();
        next
    }

    /// Checks whether `current` survives in the displayed list.
    ///
    /// Returns `None` when the selection is still valid, or the entry to
    /// reselect (index 0) when it vanished; the caller then triggers a reload
    /// for the new selection.
    #[must_use]
    pub fn resolve_selection(&self, current: &Category) -> Option<Category> {
        let snapshot = self.snapshot.lock();
        if snapshot.categories.contains(current) {
            None
        } else {
            snapshot.categories.first().cloned()
        }
    }

    /// Lists the assets of a category.
    ///
    /// The favorites pseudo-category resolves locally from the ledger and
    /// never touches the network; named categories fetch their remote node.
    /// Stored strings that are not well-formed URLs are skipped.
    ///
    /// # Errors
    /// Returns a `FetchError` when the remote node cannot be fetched.
    pub async fn fetch_assets(
        &self,
        category: &Category,
        favorites: &FavoritesLedger,
    ) -> FetchResult<Vec<Asset>> {
        let urls = match category.remote_node() {
            None => favorites.all(),
            Some(node) => self.catalog.fetch_category_urls(node).await?,
        };
        Ok(urls
            .iter()
            .filter_map(|url| Asset::new(url, &self.resolver))
            .collect())
    }

    /// Fetches the latest published app version.
    ///
    /// Errors are fully swallowed: absence of a version value is a valid,
    /// silent state.
    pub async fn refresh_remote_version(&self) -> Option<i64> {
        match self.catalog.fetch_remote_version().await {
            Ok(version) => Some(version),
            Err(err) => {
                debug!(error = %err, "Version check failed");
                None
            }
        }
    }
}
