use crate::{DEFAULT_THRESHOLD, ScrollGeometry};

/// Classifies scroll positions as "near bottom" or not.
///
/// The monitor only reads geometry. It never moves the scroll position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollMonitor {
    threshold: u32,
}

impl ScrollMonitor {
    pub fn new(threshold: u32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Returns `true` when less than `threshold` remains below the viewport.
    pub fn is_near_bottom(&self, geometry: ScrollGeometry) -> bool {
        geometry.remaining() < self.threshold as u64
    }

    /// Classifies an optional container geometry.
    ///
    /// Returns `None` when no container is attached; callers treat that as a no-op.
    pub fn check(&self, geometry: Option<ScrollGeometry>) -> Option<bool> {
        let geometry = geometry?;
        let near_bottom = self.is_near_bottom(geometry);
        vtrace!(
            remaining = geometry.remaining(),
            threshold = self.threshold,
            near_bottom,
            "ScrollMonitor::check"
        );
        Some(near_bottom)
    }
}

impl Default for ScrollMonitor {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}
