use alloc::rc::Rc;

use crate::{DEFAULT_INITIAL_PAGE, DEFAULT_THRESHOLD, LoadingSignal, Page};

/// Computes the next page from the current one (aka `onPagination`).
///
/// The default increments by one. Custom transitions must be strictly increasing; a transition
/// that returns a page not greater than its input is rejected and no fetch happens.
pub type OnPaginationCallback = Rc<dyn Fn(Page) -> Page>;

/// The plain-data subset of [`ViewportScrollOptions`].
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`, so it can live in an
/// application's config file. Missing fields fall back to their defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScrollConfig {
    pub threshold: u32,
    pub initial_page: Page,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            initial_page: DEFAULT_INITIAL_PAGE,
        }
    }
}

/// Configuration for [`crate::ViewportScroll`].
///
/// Cheap to clone: the transition closure is shared behind an `Rc`.
pub struct ViewportScrollOptions {
    /// The caller-owned loading flag. Read on every scroll event, never written.
    pub is_loading: LoadingSignal,

    /// Near-bottom distance. An advance is considered when less than this remains below the
    /// viewport.
    pub threshold: u32,

    /// The page fetched on mount.
    pub initial_page: Page,

    pub on_pagination: OnPaginationCallback,
}

impl Clone for ViewportScrollOptions {
    fn clone(&self) -> Self {
        Self {
            is_loading: self.is_loading.clone(),
            threshold: self.threshold,
            initial_page: self.initial_page,
            on_pagination: Rc::clone(&self.on_pagination),
        }
    }
}

impl ViewportScrollOptions {
    /// Creates options with the default threshold (100), initial page (1) and `+1` transition.
    pub fn new(is_loading: LoadingSignal) -> Self {
        Self {
            is_loading,
            threshold: DEFAULT_THRESHOLD,
            initial_page: DEFAULT_INITIAL_PAGE,
            on_pagination: Rc::new(|page: Page| page.saturating_add(1)),
        }
    }

    pub fn with_threshold(mut self, threshold: u32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_initial_page(mut self, initial_page: Page) -> Self {
        self.initial_page = initial_page;
        self
    }

    pub fn with_on_pagination(mut self, on_pagination: impl Fn(Page) -> Page + 'static) -> Self {
        self.on_pagination = Rc::new(on_pagination);
        self
    }

    /// Applies every field of a [`ScrollConfig`].
    pub fn with_config(mut self, config: ScrollConfig) -> Self {
        self.threshold = config.threshold;
        self.initial_page = config.initial_page;
        self
    }

    pub fn config(&self) -> ScrollConfig {
        ScrollConfig {
            threshold: self.threshold,
            initial_page: self.initial_page,
        }
    }
}

impl core::fmt::Debug for ViewportScrollOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ViewportScrollOptions")
            .field("is_loading", &self.is_loading)
            .field("threshold", &self.threshold)
            .field("initial_page", &self.initial_page)
            .finish_non_exhaustive()
    }
}
