//! Local settings store port definition.

/// Port for the on-disk key-value settings store.
///
/// Write failures are absorbed by the adapter (logged, never surfaced): a
/// failed persist is indistinguishable from success to the caller and must
/// not block the UI. Read failures degrade to defaults.
#[cfg_attr(test, mockall::automock)]
pub trait SettingsPort: Send + Sync {
    /// Loads the stored favorites blob. Missing or corrupt data yields an
    /// empty list.
    fn favorites(&self) -> Vec<String>;

    /// Persists the full favorites set.
    fn set_favorites(&self, ids: &[String]);

    /// Loads the HD-thumbnails feature flag (defaults to off).
    fn hd_thumbnails(&self) -> bool;

    /// Persists the HD-thumbnails feature flag.
    fn set_hd_thumbnails(&self, enabled: bool);
}
