use crate::Page;

/// A lightweight snapshot of a controller's pagination state.
///
/// Useful for rendering ("loading more...", "end of list") and for logging. With
/// `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PaginationState {
    pub page: Page,
    pub has_more: bool,
    pub is_loading: bool,
    pub mounted: bool,
}

impl PaginationState {
    /// `true` once the data source has been declared exhausted.
    pub fn is_exhausted(&self) -> bool {
        !self.has_more
    }

    /// `true` when an advance would be admitted if the container were near the bottom.
    pub fn can_advance(&self) -> bool {
        self.mounted && self.has_more && !self.is_loading
    }
}
