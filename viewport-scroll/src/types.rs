/// A unit of pagination progress.
///
/// Pages are opaque to the controller apart from their ordering: every page handed to a fetch
/// handler is strictly greater than the previous one.
pub type Page = u64;

/// The page a controller starts on.
pub const DEFAULT_INITIAL_PAGE: Page = 1;

/// The default near-bottom distance, in the same units as [`ScrollGeometry`].
pub const DEFAULT_THRESHOLD: u32 = 100;

/// Geometry of a vertical scroll container, as reported by the UI layer.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollGeometry {
    /// Total height of the scrollable content.
    pub scroll_height: u64,
    /// Distance scrolled from the top.
    pub scroll_offset: u64,
    /// Height of the visible viewport.
    pub viewport_height: u32,
}

impl ScrollGeometry {
    pub fn new(scroll_height: u64, scroll_offset: u64, viewport_height: u32) -> Self {
        Self {
            scroll_height,
            scroll_offset,
            viewport_height,
        }
    }

    /// Distance left between the bottom of the viewport and the end of the content.
    ///
    /// Saturates at 0 (overscrolled or content shorter than the viewport).
    pub fn remaining(&self) -> u64 {
        self.scroll_height
            .saturating_sub(self.scroll_offset)
            .saturating_sub(self.viewport_height as u64)
    }

    pub fn max_scroll_offset(&self) -> u64 {
        self.scroll_height
            .saturating_sub(self.viewport_height as u64)
    }
}
