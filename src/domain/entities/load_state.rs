//! Per-request image load state.

use std::sync::Arc;

/// State of a single image load request.
///
/// Scoped to the UI element displaying the URL; `Success` and `Failed` are
/// terminal for the request. Automatic retries re-enter `Loading` through
/// `Idle`, so observers see every transition.
#[derive(Debug, Clone, Default)]
pub enum LoadState {
    /// No request in flight.
    #[default]
    Idle,
    /// A network fetch or decode is in progress.
    Loading,
    /// The payload was validated, decoded, and cached.
    Success(Arc<image::DynamicImage>),
    /// All attempts were exhausted; no automatic retry will follow.
    Failed,
}

impl LoadState {
    /// Returns true if a fetch is in progress.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns true once the image is ready for display.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns true if loading failed terminally.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }

    /// Returns the decoded image, if available.
    #[must_use]
    pub fn image(&self) -> Option<&Arc<image::DynamicImage>> {
        match self {
            Self::Success(img) => Some(img),
            _ => None,
        }
    }
}
