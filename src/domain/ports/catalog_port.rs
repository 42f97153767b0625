//! Remote catalog port definition.

use async_trait::async_trait;

use crate::domain::errors::FetchResult;

/// Port for the remote key-value catalog store.
#[async_trait]
pub trait CatalogPort: Send + Sync {
    /// Fetches the list of remote category names.
    async fn fetch_category_names(&self) -> FetchResult<Vec<String>>;

    /// Fetches the stored wallpaper URL strings for a category node.
    async fn fetch_category_urls(&self, category: &str) -> FetchResult<Vec<String>>;

    /// Fetches the latest published app version.
    async fn fetch_remote_version(&self) -> FetchResult<i64>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::domain::errors::FetchError;
    use parking_lot::Mutex;

    /// Scripted catalog port for testing.
    pub struct MockCatalogPort {
        categories: Mutex<FetchResult<Vec<String>>>,
        urls: Mutex<FetchResult<Vec<String>>>,
        version: Mutex<FetchResult<i64>>,
    }

    impl MockCatalogPort {
        /// Creates a mock that fails every operation.
        pub fn offline() -> Self {
            let err = || Err(FetchError::Network("mock offline".into()));
            Self {
                categories: Mutex::new(err()),
                urls: Mutex::new(err()),
                version: Mutex::new(Err(FetchError::Network("mock offline".into()))),
            }
        }

        /// Sets the category-names response.
        pub fn set_categories(&self, result: FetchResult<Vec<String>>) {
            *self.categories.lock() = result;
        }

        /// Sets the category-urls response.
        pub fn set_urls(&self, result: FetchResult<Vec<String>>) {
            *self.urls.lock() = result;
        }

        /// Sets the version response.
        pub fn set_version(&self, result: FetchResult<i64>) {
            *self.version.lock() = result;
        }
    }

    #[async_trait]
    impl CatalogPort for MockCatalogPort {
        async fn fetch_category_names(&self) -> FetchResult<Vec<String>> {
            self.categories.lock().clone()
        }

        async fn fetch_category_urls(&self, _category: &str) -> FetchResult<Vec<String>> {
            self.urls.lock().clone()
        }

        async fn fetch_remote_version(&self) -> FetchResult<i64> {
            self.version.lock().clone()
        }
    }
}
